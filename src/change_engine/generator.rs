//! Cash-register problem synthesis.
//!
//! A bill is drawn uniformly from `[BILL_MIN, BILL_MAX]`, then the cash a
//! customer hands over is picked from a list of amounts a real cashier sees:
//! the next whole dollar, the next $5/$10/$20, and when the bill has cents,
//! "smart change" amounts that make the change come out round.
//!
//! ## RNG ordering
//!
//! Exactly two draws per problem: first the bill, then the candidate index.
//! Tests that script a [`ScriptedSource`](super::random::ScriptedSource)
//! depend on this order.

use tracing::debug;

use crate::change_engine::{
    models::Problem,
    money::Money,
    random::RandomSource,
};

pub const BILL_MIN: Money = Money::from_cents(100);
pub const BILL_MAX: Money = Money::from_cents(9899);

/// Nickel step used when pennies are switched off.
const NO_PENNY_STEP: i64 = 5;

/// All "realistic" cash-given amounts for `bill`, in a fixed order:
/// next dollar, next $5, next $10, next $20, then (bill has cents only)
/// the $5/$10/$20 boundaries plus the bill's cents, then the floor dollar
/// plus the cents rounded up to a quarter.
///
/// Duplicates are kept on purpose: they weight the uniform pick toward
/// amounts that several rules agree on.
pub fn cash_candidates(bill: Money) -> Vec<Money> {
    let next5 = bill.ceil_to(500);
    let next10 = bill.ceil_to(1_000);
    let next20 = bill.ceil_to(2_000);

    let mut candidates = vec![bill.ceil_to(100), next5, next10, next20];

    let cents = bill.cents_part();
    if cents > 0 {
        let cents = Money::from_cents(cents);
        candidates.extend([next5 + cents, next10 + cents, next20 + cents]);

        let quarter_cents = (cents.cents() + 24) / 25 * 25;
        if quarter_cents <= 100 {
            candidates.push(bill.floor_to(100) + Money::from_cents(quarter_cents));
        }
    }
    candidates
}

/// Uniform index into a non-empty list of `len` items.
fn pick_index<R: RandomSource + ?Sized>(rng: &mut R, len: usize) -> usize {
    let idx = (rng.next_unit() * len as f64).floor() as usize;
    idx.min(len - 1)
}

/// Draw a bill in `[BILL_MIN, BILL_MAX]`, rounded to the cent.
fn draw_bill<R: RandomSource + ?Sized>(rng: &mut R) -> Money {
    let span = (BILL_MAX - BILL_MIN).cents() as f64;
    let cents = BILL_MIN.cents() + (rng.next_unit() * span).round() as i64;
    Money::from_cents(cents.clamp(BILL_MIN.cents(), BILL_MAX.cents()))
}

/// Build the problem for a fixed bill, drawing only the cash-given pick.
///
/// With pennies off, the change is rounded to the nearest nickel and the
/// cash given is recomputed from it, so the triple stays consistent.
pub fn problem_for_bill<R: RandomSource + ?Sized>(rng: &mut R, bill: Money, penny_enabled: bool) -> Problem {
    let candidates = cash_candidates(bill);
    debug_assert!(!candidates.is_empty(), "cash candidate list must never be empty");
    let cash = candidates[pick_index(rng, candidates.len())];

    let mut change = cash - bill;
    debug_assert!(change >= Money::ZERO, "candidate {cash} is below bill {bill}");
    if !penny_enabled {
        change = change.round_to_nearest(NO_PENNY_STEP);
    }

    let problem = Problem::from_change(bill, change);
    debug!(%problem, penny_enabled, candidates = candidates.len(), "generated problem");
    problem
}

/// Synthesize a fresh problem under the given penny policy.
pub fn generate_problem<R: RandomSource + ?Sized>(rng: &mut R, penny_enabled: bool) -> Problem {
    let bill = draw_bill(rng);
    problem_for_bill(rng, bill, penny_enabled)
}

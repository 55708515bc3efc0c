use crate::change_engine::models::{HintTier, Judgement, Problem, UserAnswer};

/// Micro-units (millionths of a currency unit) per cent.
const MICROS_PER_CENT: i64 = 10_000;
const MICROS_PER_UNIT: i64 = 1_000_000;

/// An answer is correct when it is strictly closer than this to the change due (0.001).
pub const TOLERANCE_MICROS: i64 = 1_000;

/// Hint thresholds, strictly greater-than: 1.00 and 0.25.
const LARGE_SCALE_MICROS: i64 = MICROS_PER_UNIT;
const CENTS_MICROS: i64 = 25 * MICROS_PER_CENT;

const MAX_FRACTION_DIGITS: usize = 6;

/// Typed text read as micro-units, truncated toward zero.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
struct TypedAmount {
    micros: i64,
    /// Direction (`1` up, `-1` down) of any non-zero digits dropped past
    /// the sixth decimal place; `0` when nothing was lost.
    remainder: i64,
}

/// Parse typed text as a decimal in micro-units.
///
/// Accepts an optional sign and `$`, digits, and one decimal point. Digits
/// past the sixth decimal place are dropped. Anything else, including an
/// empty string, reads as zero.
pub fn parse_answer_micros(input: &str) -> i64 {
    parse_typed(input).micros
}

fn parse_typed(input: &str) -> TypedAmount {
    parse_decimal(input).unwrap_or_default()
}

fn parse_decimal(input: &str) -> Option<TypedAmount> {
    let mut s = input.trim();
    let negative = s.starts_with('-');
    s = s.strip_prefix(|c: char| c == '-' || c == '+').unwrap_or(s);
    s = s.strip_prefix('$').unwrap_or(s);

    let (whole, frac) = s.split_once('.').unwrap_or((s, ""));
    if whole.is_empty() && frac.is_empty() {
        return None;
    }
    if !whole.bytes().chain(frac.bytes()).all(|b| b.is_ascii_digit()) {
        return None;
    }

    let whole_units: i64 = if whole.is_empty() { 0 } else { whole.parse().ok()? };
    let (kept, dropped) = frac.split_at(frac.len().min(MAX_FRACTION_DIGITS));
    let mut frac_micros: i64 = if kept.is_empty() { 0 } else { kept.parse().ok()? };
    for _ in kept.len()..MAX_FRACTION_DIGITS {
        frac_micros *= 10;
    }

    let magnitude = whole_units.checked_mul(MICROS_PER_UNIT)?.checked_add(frac_micros)?;
    let lost = dropped.bytes().any(|b| b != b'0');
    let sign = if negative { -1 } else { 1 };
    Some(TypedAmount {
        micros: sign * magnitude,
        remainder: if lost { sign } else { 0 },
    })
}

/// Strict tolerance check on a truncated difference. A difference of exactly
/// the tolerance still passes when the dropped digits pull the answer back
/// toward the change due.
fn within_tolerance(signed_difference: i64, remainder: i64) -> bool {
    let diff = signed_difference.saturating_abs();
    diff < TOLERANCE_MICROS
        || (diff == TOLERANCE_MICROS && remainder != 0 && signed_difference.signum() != remainder)
}

/// Guidance tier for a wrong answer that was `difference_micros` away.
pub fn hint_tier(difference_micros: i64) -> HintTier {
    let diff = difference_micros.saturating_abs();
    if diff > LARGE_SCALE_MICROS {
        HintTier::LargeScale
    } else if diff > CENTS_MICROS {
        HintTier::Cents
    } else {
        HintTier::DecimalPlace
    }
}

/// Judge `answer` against the problem's change due. Pure; the caller applies
/// any state transition.
///
/// Hints are only attached to wrong calculate-mode answers.
pub fn evaluate(problem: &Problem, answer: &UserAnswer) -> Judgement {
    let user = match answer {
        UserAnswer::Typed(text)    => parse_typed(text),
        UserAnswer::Counted(held)  => TypedAmount {
            micros: held.cents().saturating_mul(MICROS_PER_CENT),
            remainder: 0,
        },
    };
    let change_micros = problem.change_due().cents() * MICROS_PER_CENT;
    let signed_difference = user.micros.saturating_sub(change_micros);
    let difference_micros = signed_difference.saturating_abs();
    let correct = within_tolerance(signed_difference, user.remainder);

    let hint = match answer {
        UserAnswer::Typed(_) if !correct => Some(hint_tier(difference_micros)),
        _ => None,
    };

    Judgement { correct, difference_micros, hint }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::change_engine::money::Money;

    fn problem(bill: i64, cash: i64) -> Problem {
        Problem::new(Money::from_cents(bill), Money::from_cents(cash)).unwrap()
    }

    fn typed(s: &str) -> UserAnswer {
        UserAnswer::Typed(s.to_string())
    }

    #[test]
    fn parses_decimal_text_exactly() {
        assert_eq!(parse_answer_micros("1.00"), 1_000_000);
        assert_eq!(parse_answer_micros("$3.5"), 3_500_000);
        assert_eq!(parse_answer_micros(".25"), 250_000);
        assert_eq!(parse_answer_micros("1.001"), 1_001_000);
        assert_eq!(parse_answer_micros("0.1234567"), 123_456);
        assert_eq!(parse_answer_micros("-2"), -2_000_000);
    }

    #[test]
    fn empty_or_garbage_input_reads_as_zero() {
        assert_eq!(parse_answer_micros(""), 0);
        assert_eq!(parse_answer_micros("   "), 0);
        assert_eq!(parse_answer_micros("."), 0);
        assert_eq!(parse_answer_micros("abc"), 0);
        assert_eq!(parse_answer_micros("1.2.3"), 0);
        assert_eq!(parse_answer_micros("99999999999999999999"), 0);
    }

    #[test]
    fn exact_typed_answer_is_correct() {
        let p = problem(1900, 2000);
        let j = evaluate(&p, &typed("1.00"));
        assert!(j.correct);
        assert_eq!(j.hint, None);
        assert!(evaluate(&p, &typed("1")).correct);
    }

    #[test]
    fn tolerance_is_strict() {
        let p = problem(1900, 2000);
        assert!(evaluate(&p, &typed("1.0009")).correct);
        assert!(evaluate(&p, &typed("0.9991")).correct);
        assert!(!evaluate(&p, &typed("1.001")).correct);
        assert!(!evaluate(&p, &typed("0.999")).correct);
    }

    #[test]
    fn digits_past_micro_precision_still_count_at_the_boundary() {
        let p = problem(1900, 2000); // change 1.00
        assert!(evaluate(&p, &typed("0.9990001")).correct);
        assert!(evaluate(&p, &typed("1.00099999999")).correct);
        assert!(!evaluate(&p, &typed("1.0010001")).correct);
        assert!(!evaluate(&p, &typed("0.9990000")).correct);
        assert!(!evaluate(&p, &typed("0.9989999")).correct);

        let free = problem(1000, 1000); // change 0.00
        assert!(!evaluate(&free, &typed("-0.0010001")).correct);
        assert!(evaluate(&free, &typed("-0.0009999")).correct);
    }

    #[test]
    fn dropped_digits_are_tracked_by_direction() {
        assert_eq!(parse_typed("0.9990001"), TypedAmount { micros: 999_000, remainder: 1 });
        assert_eq!(parse_typed("-1.0010001"), TypedAmount { micros: -1_001_000, remainder: -1 });
        assert_eq!(parse_typed("2.5000000"), TypedAmount { micros: 2_500_000, remainder: 0 });
        assert_eq!(parse_typed("abc"), TypedAmount::default());
    }

    #[test]
    fn empty_answer_is_judged_as_zero() {
        let free = problem(2000, 2000);
        assert!(evaluate(&free, &typed("")).correct);
        let j = evaluate(&problem(1900, 2000), &typed(""));
        assert!(!j.correct);
        assert_eq!(j.difference_micros, 1_000_000);
        assert_eq!(j.hint, Some(HintTier::Cents));
    }

    #[test]
    fn counted_answer_compares_held_sum() {
        let p = problem(735, 1035);
        assert!(evaluate(&p, &UserAnswer::Counted(Money::from_cents(300))).correct);
        let wrong = evaluate(&p, &UserAnswer::Counted(Money::from_cents(500)));
        assert!(!wrong.correct);
        assert_eq!(wrong.hint, None, "count mode gets no hint tier");
    }

    #[test]
    fn hint_tiers_follow_thresholds() {
        assert_eq!(hint_tier(1_500_000), HintTier::LargeScale);
        assert_eq!(hint_tier(1_000_000), HintTier::Cents);
        assert_eq!(hint_tier(400_000), HintTier::Cents);
        assert_eq!(hint_tier(250_000), HintTier::DecimalPlace);
        assert_eq!(hint_tier(20_000), HintTier::DecimalPlace);
        assert_eq!(hint_tier(-1_500_000), HintTier::LargeScale);
    }

    #[test]
    fn wrong_typed_answer_carries_hint() {
        let p = problem(1850, 2000); // change 1.50
        assert_eq!(evaluate(&p, &typed("3.00")).hint, Some(HintTier::LargeScale));
        assert_eq!(evaluate(&p, &typed("1.90")).hint, Some(HintTier::Cents));
        assert_eq!(evaluate(&p, &typed("1.52")).hint, Some(HintTier::DecimalPlace));
    }
}

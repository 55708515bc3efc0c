//! End-to-end tour of the change trainer.
//!
//! Run with: `cargo run --example demo`
//! Set `RUST_LOG=change_drill_gen=debug` to watch generation and judging.
//!
//! 1. **Calculate mode**: a wrong answer (with its hint), a retry, then a
//!    streak of correct answers showing the multiplier kick in.
//! 2. **Count mode**: change is built from till denominations with both
//!    readouts hidden, pennies off.
//! 3. **Persistence**: progress is saved to a JSON file and reopened.

use change_drill_gen::{
    change_engine::{till::currency_label, FallbackStore, JsonFileStore, MemoryStore},
    source_from_seed, to_client_view, Denomination, HiddenFields, Key, Mode, Money, RandomSource,
    Settings, Trainer, UserAnswer,
};
use tracing_subscriber::EnvFilter;

/// Greedy till breakdown, largest denomination first.
fn make_change(mut remaining: Money, penny_enabled: bool) -> Vec<Denomination> {
    let mut picks = Vec::new();
    for d in Denomination::available(penny_enabled) {
        while remaining >= d.value() {
            remaining = remaining - d.value();
            picks.push(d);
        }
    }
    picks
}

fn type_amount<R: RandomSource>(trainer: &mut Trainer<R>, amount: Money) {
    trainer.press_key(Key::Clear);
    for c in amount.to_string().chars() {
        match c {
            '.' => trainer.press_key(Key::Point),
            d => trainer.press_key(Key::Digit(d.to_digit(10).unwrap_or(0) as u8)),
        }
    }
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    // ── Calculate mode ──────────────────────────────────────────────────
    println!();
    println!("══ Calculate mode ══");
    let mut trainer = Trainer::new(source_from_seed(Some(42)), Settings::default());

    let p = *trainer.problem();
    println!("  {p}");
    let wrong = trainer.submit(UserAnswer::Typed("0".into())).unwrap();
    if let Some(hint) = wrong.hint {
        println!("  typed 0 -> incorrect. Hint: {}", hint.message());
    }

    for _ in 0..7 {
        let change = trainer.problem().change_due();
        type_amount(&mut trainer, change);
        let out = trainer.submit_current().unwrap();
        let multiplier = out.award.map(|a| a.streak_multiplier).unwrap_or(1);
        println!(
            "  {}  typed {} -> +{} XP (x{} streak)",
            trainer.problem(),
            trainer.input().display(),
            out.xp_earned,
            multiplier,
        );
        trainer.request_new_problem();
    }
    let s = trainer.session();
    println!("  XP {}  streak {}  best {}", s.total_xp(), s.current_streak(), s.best_streak());

    // ── Count mode ──────────────────────────────────────────────────────
    println!();
    println!("══ Count mode (pennies off, both readouts hidden) ══");
    let settings = Settings::default()
        .with_mode(Mode::Count)
        .with_penny(false)
        .with_hidden(HiddenFields { change_due: true, running_total: true });
    let mut trainer = Trainer::new(source_from_seed(Some(7)), settings);
    for _ in 0..3 {
        let change = trainer.problem().change_due();
        for d in make_change(change, false) {
            if let Err(e) = trainer.add_to_held(d) {
                println!("  {e}");
            }
        }
        let labels: Vec<String> = trainer
            .held()
            .items()
            .iter()
            .map(|i| currency_label(i.value, i.kind))
            .collect();
        let out = trainer.submit_current().unwrap();
        println!("  {}  held [{}] -> +{} XP", trainer.problem(), labels.join(" "), out.xp_earned);
        trainer.request_new_problem();
    }
    println!();
    println!("{}", serde_json::to_string_pretty(&to_client_view(&trainer)).unwrap_or_default());

    // ── Persistence ─────────────────────────────────────────────────────
    println!();
    println!("══ Persistence ══");
    let path = std::env::temp_dir().join("change_drill_gen_demo.json");
    {
        let store = FallbackStore::new(JsonFileStore::new(&path), MemoryStore::default());
        let mut trainer = Trainer::open(source_from_seed(Some(1)), store);
        let change = trainer.problem().change_due();
        trainer.submit(UserAnswer::Typed(change.to_string())).unwrap();
        println!("  saved: XP {}", trainer.session().total_xp());
    }
    let reopened = Trainer::open(source_from_seed(Some(2)), JsonFileStore::new(&path));
    println!("  reopened {}: XP {}", path.display(), reopened.session().total_xp());
}

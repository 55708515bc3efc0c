use serde_json::{json, Value};

use crate::change_engine::{
    models::{Mode, Phase},
    random::RandomSource,
    reward::{streak_multiplier, xp_award},
    till::{currency_label, Denomination},
    trainer::Trainer,
};

/// Change-due readout: masked in calculate mode until the problem is solved.
fn change_due_text<R: RandomSource>(trainer: &Trainer<R>) -> String {
    let solved = trainer.phase() == Phase::AwaitingNextProblem;
    match trainer.settings().mode {
        Mode::Calculate if !solved => "?.??".to_string(),
        _ => trainer.problem().change_due().to_string(),
    }
}

fn held_items<R: RandomSource>(trainer: &Trainer<R>) -> Value {
    let items: Vec<Value> = trainer
        .held()
        .items()
        .iter()
        .map(|item| {
            json!({
                "value": item.value,
                "kind":  item.kind.to_string(),
                "label": currency_label(item.value, item.kind),
            })
        })
        .collect();
    Value::Array(items)
}

fn till_buttons(penny_enabled: bool) -> Value {
    let buttons: Vec<Value> = Denomination::available(penny_enabled)
        .map(|d| json!({ "value": d.value(), "kind": d.kind().to_string(), "label": d.to_string() }))
        .collect();
    Value::Array(buttons)
}

/// Render everything a front end needs for one frame as JSON.
///
/// The payload carries display strings only; the front end never does
/// arithmetic of its own.
pub fn to_client_view<R: RandomSource>(trainer: &Trainer<R>) -> Value {
    let settings = trainer.settings();
    let session = trainer.session();
    let problem = trainer.problem();
    let count_mode = settings.mode == Mode::Count;

    // What a correct answer right now would pay, for the "+XP" preview.
    let preview = xp_award(settings.mode, session.current_streak(), settings.effective_hidden_count());

    json!({
        "mode": settings.mode.to_string(),
        "problem": {
            "bill":        problem.bill(),
            "cash_given":  problem.cash_given(),
            "change_due":  change_due_text(trainer),
            "change_due_hidden": count_mode && settings.hidden.change_due,
        },
        "input": {
            "typed":   trainer.input().display(),
            "visible": !count_mode,
        },
        "till": {
            "visible":      count_mode,
            "held":         held_items(trainer),
            "total":        trainer.held().total(),
            "total_hidden": count_mode && settings.hidden.running_total,
            "buttons":      till_buttons(settings.penny_enabled),
        },
        "stats": {
            "total_xp":        session.total_xp(),
            "current_streak":  session.current_streak(),
            "best_streak":     session.best_streak(),
            "problems_solved": session.problems_solved(),
            "streak_badge":    format!("{}🔥", session.current_streak()),
            "streak_multiplier": streak_multiplier(session.current_streak()),
        },
        "xp_preview":     preview.total,
        "submit_enabled": trainer.submit_enabled(),
        "sound_enabled":  settings.sound_enabled,
        "penny_enabled":  settings.penny_enabled,
    })
}

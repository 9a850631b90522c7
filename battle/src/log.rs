//! Logging utilities
//!
//! Thin helpers over the `log` facade so transitions log in a uniform shape.
//! Hosts decide where records go (console in the browser, nothing in tests).

#![allow(unused)]

use crate::state::{BattlePhase, BattleState};

/// Log an info message
#[inline]
pub fn info(msg: &str) {
    ::log::info!(target: "ma_battle", "{msg}");
}

/// Log a warning message
#[inline]
pub fn warn(msg: &str) {
    ::log::warn!(target: "ma_battle", "{msg}");
}

/// Log an error message
#[inline]
pub fn error(msg: &str) {
    ::log::error!(target: "ma_battle", "{msg}");
}

/// Log a debug message with a label
#[inline]
pub fn debug(label: &str, msg: &str) {
    ::log::debug!(target: "ma_battle", "[{label}] {msg}");
}

/// Log an action being performed
#[inline]
pub fn action(name: &str, details: &str) {
    ::log::debug!(target: "ma_battle", "action {name}: {details}");
}

/// Log action result
#[inline]
pub fn result(success: bool, msg: &str) {
    if success {
        ::log::debug!(target: "ma_battle", "ok: {msg}");
    } else {
        ::log::warn!(target: "ma_battle", "rejected: {msg}");
    }
}

/// Log battle state summary
pub fn state_summary(state: &BattleState) {
    if !::log::log_enabled!(target: "ma_battle", ::log::Level::Trace) {
        return;
    }
    let phase = match state.phase {
        BattlePhase::PlayerTurn => "player-turn",
        BattlePhase::EnemyTurn => "enemy-turn",
        BattlePhase::Victory => "victory",
        BattlePhase::Defeat => "defeat",
        BattlePhase::Aborted => "aborted",
    };
    ::log::trace!(
        target: "ma_battle",
        "turn={} phase={} hp={}/{} resource={}/{} hand={} deck={} discard={} enemies_alive={}",
        state.turn,
        phase,
        state.player.health,
        state.player.max_health,
        state.player.resource,
        state.player.max_resource,
        state.zones.hand.len(),
        state.zones.deck.len(),
        state.zones.discard.len(),
        state.living_enemy_count(),
    );
}

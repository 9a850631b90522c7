//! Enemy and boss action selection
//!
//! Selection and commitment are split: [`get_next_pattern`] picks (and caches)
//! the next action without consuming it, [`advance_pattern`] commits it once
//! the action has resolved. Calling `get_next_pattern` repeatedly is
//! idempotent, which is what lets the presentation layer preview intents.

use alloc::vec::Vec;

use crate::rng::BattleRng;
use crate::state::EnemyState;
use crate::types::{ActionEffect, EnemyAction, PatternEntry, PatternMode};

/// A boss moved to a later phase
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PhaseTransition {
    pub from: u32,
    pub to: u32,
    /// Effects of the entered phase, applied once by the caller
    pub on_enter: Vec<ActionEffect>,
}

fn is_eligible(enemy: &EnemyState, index: usize, entry: &PatternEntry) -> bool {
    match entry.max_streak {
        Some(max) => !(enemy.last_action == Some(index as u32) && enemy.streak >= max),
        None => true,
    }
}

/// Choose the pattern entry for the enemy's next action and cache it as the
/// enemy's intent. Returns the cached choice when one exists.
pub fn plan_intent<R: BattleRng>(enemy: &mut EnemyState, rng: &mut R) -> Option<u32> {
    if let Some(intent) = enemy.intent {
        return Some(intent);
    }

    let index = {
        let view: &EnemyState = enemy;
        let phase = view.active_phase()?;
        let entries = &phase.pattern.entries;
        if entries.is_empty() {
            return None;
        }

        match phase.pattern.mode {
            PatternMode::Sequential => (view.cursor as usize) % entries.len(),
            PatternMode::Weighted => {
                let eligible: Vec<u32> = entries
                    .iter()
                    .enumerate()
                    .map(|(i, e)| if is_eligible(view, i, e) { e.weight } else { 0 })
                    .collect();
                let all: Vec<u32> = entries.iter().map(|e| e.weight).collect();
                rng.gen_weighted(&eligible)
                    .or_else(|| rng.gen_weighted(&all))
                    .unwrap_or_else(|| rng.gen_range(entries.len()))
            }
        }
    };

    enemy.intent = Some(index as u32);
    Some(index as u32)
}

/// The action the enemy will take next, without consuming it.
pub fn get_next_pattern<'a, R: BattleRng>(
    enemy: &'a mut EnemyState,
    rng: &mut R,
) -> Option<&'a EnemyAction> {
    let index = plan_intent(enemy, rng)? as usize;
    let enemy: &'a EnemyState = enemy;
    enemy
        .active_phase()
        .and_then(|p| p.pattern.entries.get(index))
        .map(|e| &e.action)
}

/// Commit the action chosen by [`get_next_pattern`].
pub fn advance_pattern(enemy: &mut EnemyState) {
    let len = enemy
        .active_phase()
        .map(|p| p.pattern.entries.len())
        .unwrap_or(0);
    if len == 0 {
        return;
    }
    let used = enemy
        .intent
        .take()
        .unwrap_or(enemy.cursor % len as u32);

    if enemy.last_action == Some(used) {
        enemy.streak = enemy.streak.saturating_add(1);
    } else {
        enemy.last_action = Some(used);
        enemy.streak = 1;
    }
    enemy.cursor = enemy.cursor.wrapping_add(1);
}

/// Move the enemy to the deepest later phase whose threshold its health has
/// reached. Phases never move backwards; the new phase starts from the top of
/// its own pattern.
pub fn check_phase_transition(enemy: &mut EnemyState) -> Option<PhaseTransition> {
    let from = enemy.phase_index;
    let to = enemy.pending_phase()?;

    enemy.phase_index = to;
    enemy.cursor = 0;
    enemy.intent = None;
    enemy.last_action = None;
    enemy.streak = 0;

    let on_enter = enemy
        .active_phase()
        .map(|p| p.on_enter.clone())
        .unwrap_or_default();
    Some(PhaseTransition { from, to, on_enter })
}

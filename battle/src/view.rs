//! View types for UI serialization
//!
//! This module provides view structs for sending battle state to frontends.

use alloc::string::String;
use alloc::vec::Vec;
use parity_scale_codec::{Decode, Encode};
use scale_info::TypeInfo;
use serde::{Deserialize, Serialize};

use crate::state::*;
use crate::status::StatusEffect;
use crate::types::*;

/// View of a card in hand
#[derive(Debug, Clone, PartialEq, Eq, Encode, Decode, TypeInfo, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CardView {
    pub instance: CardInstanceId,
    pub id: CardId,
    pub name: String,
    pub kind: CardType,
    /// Cost after modifiers
    pub cost: i32,
    pub weight: Option<i32>,
    pub multiplier: Option<u32>,
    pub description: String,
    pub can_afford: bool,
    pub needs_target: bool,
}

/// What an enemy will do next
#[derive(Debug, Clone, PartialEq, Eq, Encode, Decode, TypeInfo, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IntentView {
    pub name: String,
    /// Per-hit damage after floor scaling, before statuses
    pub damage: i32,
    pub hits: u8,
    pub has_effects: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Encode, Decode, TypeInfo, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EnemyView {
    pub id: EnemyInstanceId,
    pub name: String,
    pub health: i32,
    pub max_health: i32,
    pub is_boss: bool,
    pub is_elite: bool,
    pub phase: u32,
    pub phase_name: String,
    /// A phase threshold has been crossed; the enemy changes phase before
    /// it next acts
    pub phase_pending: bool,
    /// Next action. While a phase change is pending this is the new phase's
    /// opening action when it is known, `None` for weighted patterns.
    pub intent: Option<IntentView>,
    pub statuses: Vec<StatusEffect>,
}

/// The complete battle view sent to the frontend
#[derive(Debug, Clone, PartialEq, Eq, Encode, Decode, TypeInfo, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BattleView {
    pub turn: u32,
    pub phase: String,
    pub result: BattleResult,
    pub health: i32,
    pub max_health: i32,
    pub resource: i32,
    pub max_resource: i32,
    pub statuses: Vec<StatusEffect>,
    pub hand: Vec<CardView>,
    pub deck_count: u32,
    pub discard_count: u32,
    pub exhaust_count: u32,
    pub enemies: Vec<EnemyView>,
    /// Distinct cards played this turn
    pub chain_length: u32,
}

fn action_view(enemy: &EnemyState, action: &EnemyAction) -> IntentView {
    let damage = (action.damage.max(0) as i64) * (enemy.damage_percent as i64)
        / crate::config::PERCENT as i64;
    IntentView {
        name: action.name.clone(),
        damage: damage.min(i32::MAX as i64) as i32,
        hits: action.hits,
        has_effects: !action.effects.is_empty(),
    }
}

fn intent_view(enemy: &EnemyState) -> Option<IntentView> {
    if let Some(next) = enemy.pending_phase() {
        // The phase change resets the cursor, so a sequential pattern opens
        // with its first entry.
        let pattern = &enemy.phases.get(next as usize)?.pattern;
        return match pattern.mode {
            PatternMode::Sequential => pattern
                .entries
                .first()
                .map(|entry| action_view(enemy, &entry.action)),
            PatternMode::Weighted => None,
        };
    }
    let index = enemy.intent? as usize;
    let action = &enemy.active_phase()?.pattern.entries.get(index)?.action;
    Some(action_view(enemy, action))
}

impl BattleView {
    /// Construct a view without touching the battle (intents are read from
    /// the cache, never re-rolled).
    pub fn from_state(state: &BattleState) -> Self {
        let hand = state
            .zones
            .hand
            .iter()
            .map(|instance| {
                let card = &instance.card;
                CardView {
                    instance: instance.id,
                    id: card.id,
                    name: card.name.clone(),
                    kind: card.kind,
                    cost: state.effective_cost(card),
                    weight: card.weight,
                    multiplier: card.multiplier,
                    description: card.description.clone(),
                    can_afford: state.can_afford(card),
                    needs_target: card.is_targeted(),
                }
            })
            .collect();

        let enemies = state
            .enemies
            .iter()
            .map(|enemy| EnemyView {
                id: enemy.id,
                name: enemy.name.clone(),
                health: enemy.health,
                max_health: enemy.max_health,
                is_boss: enemy.is_boss,
                is_elite: enemy.is_elite,
                phase: enemy.phase_index,
                phase_name: enemy
                    .active_phase()
                    .map(|p| p.name.clone())
                    .unwrap_or_default(),
                phase_pending: enemy.is_alive() && enemy.pending_phase().is_some(),
                intent: if enemy.is_alive() { intent_view(enemy) } else { None },
                statuses: enemy.statuses.iter().cloned().collect(),
            })
            .collect();

        Self {
            turn: state.turn,
            phase: match state.phase {
                BattlePhase::PlayerTurn => String::from("playerTurn"),
                BattlePhase::EnemyTurn => String::from("enemyTurn"),
                BattlePhase::Victory => String::from("victory"),
                BattlePhase::Defeat => String::from("defeat"),
                BattlePhase::Aborted => String::from("aborted"),
            },
            result: state.result(),
            health: state.player.health,
            max_health: state.player.max_health,
            resource: state.player.resource,
            max_resource: state.player.max_resource,
            statuses: state.player.statuses.iter().cloned().collect(),
            hand,
            deck_count: state.zones.deck.len() as u32,
            discard_count: state.zones.discard.len() as u32,
            exhaust_count: state.zones.exhaust.len() as u32,
            enemies,
            chain_length: state.distinct_played_this_turn(),
        }
    }
}

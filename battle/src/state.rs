use alloc::collections::BTreeSet;
use alloc::string::String;
use alloc::vec::Vec;

use parity_scale_codec::{Decode, Encode};
use scale_info::TypeInfo;
use serde::{Deserialize, Serialize};

use crate::config::{BalanceConfig, PERCENT};
use crate::error::{CorruptionReason, GameError, GameResult};
use crate::rng::XorShiftRng;
use crate::status::{StatusKind, Statuses};
use crate::types::*;

/// Current phase of the battle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Encode, Decode, TypeInfo, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum BattlePhase {
    PlayerTurn,
    EnemyTurn,
    Victory,
    Defeat,
    Aborted,
}

impl BattlePhase {
    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            BattlePhase::Victory | BattlePhase::Defeat | BattlePhase::Aborted
        )
    }
}

/// Outcome of a battle as seen by its owner
#[derive(Debug, Clone, Copy, PartialEq, Eq, Encode, Decode, TypeInfo, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum BattleResult {
    Victory,
    Defeat,
    InProgress,
    Aborted,
}

#[derive(Debug, Clone, PartialEq, Eq, Encode, Decode, TypeInfo, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlayerState {
    pub health: i32,
    pub max_health: i32,
    pub resource: i32,
    pub max_resource: i32,
    pub statuses: Statuses,
}

impl PlayerState {
    pub fn is_alive(&self) -> bool {
        self.health > 0
    }

    /// Lose health, saturating at zero. Returns the health actually lost.
    pub fn take_damage(&mut self, amount: i32) -> i32 {
        let dealt = amount.max(0).min(self.health);
        self.health -= dealt;
        dealt
    }

    /// Regain health up to the maximum. Returns the health actually gained.
    pub fn heal(&mut self, amount: i32) -> i32 {
        let healed = amount.max(0).min(self.max_health - self.health);
        self.health += healed;
        healed
    }
}

/// Card zones owned by the player during a battle
#[derive(Debug, Clone, Default, PartialEq, Eq, Encode, Decode, TypeInfo, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Zones {
    /// Draw pile; the last element is the top
    pub deck: Vec<CardInstance>,
    pub hand: Vec<CardInstance>,
    pub discard: Vec<CardInstance>,
    pub exhaust: Vec<CardInstance>,
}

impl Zones {
    pub fn hand_position(&self, id: CardInstanceId) -> Option<usize> {
        self.hand.iter().position(|c| c.id == id)
    }

    pub fn all(&self) -> impl Iterator<Item = &CardInstance> {
        self.deck
            .iter()
            .chain(self.hand.iter())
            .chain(self.discard.iter())
            .chain(self.exhaust.iter())
    }

    pub fn len(&self) -> usize {
        self.deck.len() + self.hand.len() + self.discard.len() + self.exhaust.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// One enemy on the battle roster
#[derive(Debug, Clone, PartialEq, Eq, Encode, Decode, TypeInfo, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EnemyState {
    pub id: EnemyInstanceId,
    pub def_id: EnemyId,
    pub name: String,
    pub health: i32,
    pub max_health: i32,
    pub is_boss: bool,
    pub is_elite: bool,
    /// Scaling applied to every action's damage, in percent
    pub damage_percent: u32,
    pub phases: Vec<PhaseDef>,
    /// Active phase; only ever increases
    pub phase_index: u32,
    /// Position in the active phase's pattern
    pub cursor: u32,
    /// Entry chosen for the next action, cached until the action resolves
    pub intent: Option<u32>,
    /// Entry used by the previous action
    pub last_action: Option<u32>,
    /// Consecutive uses of `last_action`
    pub streak: u8,
    pub statuses: Statuses,
}

impl EnemyState {
    pub fn is_alive(&self) -> bool {
        self.health > 0
    }

    /// Lose health, saturating at zero. Returns the health actually lost.
    pub fn take_damage(&mut self, amount: i32) -> i32 {
        let dealt = amount.max(0).min(self.health);
        self.health -= dealt;
        dealt
    }

    pub fn heal(&mut self, amount: i32) -> i32 {
        let healed = amount.max(0).min(self.max_health - self.health);
        self.health += healed;
        healed
    }

    pub fn active_phase(&self) -> Option<&PhaseDef> {
        self.phases.get(self.phase_index as usize)
    }

    /// Deepest later phase whose threshold has been reached. The move
    /// itself only happens when the enemy next acts.
    pub fn pending_phase(&self) -> Option<u32> {
        self.phases
            .iter()
            .enumerate()
            .skip(self.phase_index as usize + 1)
            .filter(|(_, phase)| self.health_at_or_below(phase.threshold_percent))
            .map(|(index, _)| index as u32)
            .last()
    }

    /// Health at or below `percent` of max health.
    pub fn health_at_or_below(&self, percent: u8) -> bool {
        (self.health as i64) * (PERCENT as i64) <= (self.max_health as i64) * (percent as i64)
    }
}

/// The aggregate root of one encounter
#[derive(Debug, Clone, PartialEq, Eq, Encode, Decode, TypeInfo, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BattleState {
    pub player: PlayerState,
    pub zones: Zones,
    /// Read-only during the battle
    pub relics: Vec<RelicDef>,
    pub enemies: Vec<EnemyState>,
    /// Current turn number (1-indexed)
    pub turn: u32,
    pub phase: BattlePhase,
    /// Card ids played this turn, in order
    pub turn_log: Vec<CardId>,
    /// Last turn whose status tick has been applied
    pub last_ticked_turn: u32,
    /// Next enemy (roster index) to act during an enemy turn
    pub enemy_cursor: u32,
    pub floor: u32,
    pub config: BalanceConfig,
    pub rng: XorShiftRng,
    /// Counter for generating unique card instance ids
    pub next_instance_id: u32,
}

impl BattleState {
    pub fn result(&self) -> BattleResult {
        match self.phase {
            BattlePhase::PlayerTurn | BattlePhase::EnemyTurn => BattleResult::InProgress,
            BattlePhase::Victory => BattleResult::Victory,
            BattlePhase::Defeat => BattleResult::Defeat,
            BattlePhase::Aborted => BattleResult::Aborted,
        }
    }

    /// Generate a unique card instance id
    pub fn generate_instance_id(&mut self) -> CardInstanceId {
        let id = self.next_instance_id;
        self.next_instance_id += 1;
        CardInstanceId(id)
    }

    pub fn enemy(&self, id: EnemyInstanceId) -> Option<&EnemyState> {
        self.enemies.iter().find(|e| e.id == id)
    }

    pub fn enemy_index(&self, id: EnemyInstanceId) -> Option<usize> {
        self.enemies.iter().position(|e| e.id == id)
    }

    pub fn living_enemy_count(&self) -> usize {
        self.enemies.iter().filter(|e| e.is_alive()).count()
    }

    pub fn first_living_enemy(&self) -> Option<EnemyInstanceId> {
        self.enemies.iter().find(|e| e.is_alive()).map(|e| e.id)
    }

    /// Distinct card definitions played so far this turn.
    pub fn distinct_played_this_turn(&self) -> u32 {
        self.turn_log.iter().collect::<BTreeSet<_>>().len() as u32
    }

    /// Card cost after the player's CostModifier, never below zero.
    pub fn effective_cost(&self, card: &Card) -> i32 {
        card.cost
            .saturating_add(self.player.statuses.magnitude(StatusKind::CostModifier))
            .max(0)
    }

    pub fn can_afford(&self, card: &Card) -> bool {
        self.player.resource >= self.effective_cost(card)
    }

    /// Check the invariants a persisted battle must satisfy before resuming.
    pub fn validate(&self) -> GameResult<()> {
        let corrupt = |reason: CorruptionReason| -> GameResult<()> {
            Err(GameError::CorruptBattleState { reason })
        };

        if !self.rng.is_valid() {
            return corrupt(CorruptionReason::InvalidRng);
        }
        if self.player.health < 0 || self.enemies.iter().any(|e| e.health < 0) {
            return corrupt(CorruptionReason::NegativeHealth);
        }
        if self.player.health > self.player.max_health
            || self.enemies.iter().any(|e| e.health > e.max_health)
        {
            return corrupt(CorruptionReason::HealthAboveMax);
        }
        if self.player.resource < 0 || self.player.max_resource < 0 {
            return corrupt(CorruptionReason::NegativeResource);
        }
        if self.enemies.is_empty() {
            return corrupt(CorruptionReason::NoEnemies);
        }
        for enemy in &self.enemies {
            let phase = match enemy.active_phase() {
                Some(phase) => phase,
                None => return corrupt(CorruptionReason::PhaseOutOfRange),
            };
            if enemy.phases.iter().any(|p| p.pattern.entries.is_empty()) {
                return corrupt(CorruptionReason::EmptyPattern);
            }
            if let Some(intent) = enemy.intent {
                if intent as usize >= phase.pattern.entries.len() {
                    return corrupt(CorruptionReason::IntentOutOfRange);
                }
            }
        }

        let statuses = self
            .player
            .statuses
            .iter()
            .chain(self.enemies.iter().flat_map(|e| e.statuses.iter()));
        for status in statuses {
            if status.duration == 0 {
                return corrupt(CorruptionReason::ExpiredStatus);
            }
        }

        let mut seen = BTreeSet::new();
        for card in self.zones.all() {
            if !seen.insert(card.id) || card.id.0 >= self.next_instance_id {
                return corrupt(CorruptionReason::DuplicateCardInstance);
            }
        }

        let any_alive = self.living_enemy_count() > 0;
        let consistent = match self.phase {
            BattlePhase::PlayerTurn | BattlePhase::EnemyTurn => {
                self.player.is_alive() && any_alive
            }
            BattlePhase::Victory => !any_alive,
            BattlePhase::Defeat => !self.player.is_alive() || self.turn > crate::limits::MAX_TURNS,
            BattlePhase::Aborted => true,
        };
        if !consistent {
            return corrupt(CorruptionReason::PhaseMismatch);
        }
        Ok(())
    }
}

use alloc::string::{String, ToString};
use alloc::vec::Vec;

use parity_scale_codec::{Decode, Encode, MaxEncodedLen};
use scale_info::TypeInfo;
use serde::{Deserialize, Serialize};

use crate::status::StatusEffect;

/// Unique identifier for card definitions in the catalog
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Encode, Decode, MaxEncodedLen,
    TypeInfo, Serialize, Deserialize,
)]
pub struct CardId(pub u32);

/// Unique identifier for one copy of a card inside a battle
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Encode, Decode, MaxEncodedLen,
    TypeInfo, Serialize, Deserialize,
)]
pub struct CardInstanceId(pub u32);

/// Unique identifier for enemy and boss definitions
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Encode, Decode, MaxEncodedLen,
    TypeInfo, Serialize, Deserialize,
)]
pub struct EnemyId(pub u32);

/// Unique identifier for one enemy on the battle roster
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Encode, Decode, MaxEncodedLen,
    TypeInfo, Serialize, Deserialize,
)]
pub struct EnemyInstanceId(pub u32);

/// Unique identifier for relic definitions
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Encode, Decode, MaxEncodedLen,
    TypeInfo, Serialize, Deserialize,
)]
pub struct RelicId(pub u32);

// ==========================================
// CARDS
// ==========================================

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Encode, Decode, TypeInfo, Serialize,
    Deserialize,
)]
#[serde(rename_all = "camelCase")]
pub enum CardType {
    /// Contributes `weight` as base damage
    Evidence,
    /// Contributes `multiplier`, combined multiplicatively
    Logic,
    /// Structural support; usually applies statuses
    Framework,
    /// Manipulates the turn itself (resource, draw)
    Meta,
    /// Harmless in a coherent argument, punishing in an incoherent one
    Flaw,
}

/// Who a card effect lands on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Encode, Decode, TypeInfo, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum EffectTarget {
    Player,
    /// The enemy targeted by the play
    Target,
    AllEnemies,
}

/// Non-damage effects carried by a card
#[derive(Debug, Clone, PartialEq, Eq, Encode, Decode, TypeInfo, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum CardEffect {
    ApplyStatus {
        target: EffectTarget,
        status: StatusEffect,
    },
    GainResource {
        amount: i32,
    },
    DrawCards {
        count: u8,
    },
    Heal {
        amount: i32,
    },
}

/// A card definition from the content catalog
#[derive(Debug, Clone, PartialEq, Eq, Encode, Decode, TypeInfo, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Card {
    pub id: CardId,
    pub name: String,
    pub kind: CardType,
    pub cost: i32,
    /// Base damage contribution (evidence cards)
    #[serde(default)]
    pub weight: Option<i32>,
    /// Damage scaling in percent, 150 = 1.5x (logic cards)
    #[serde(default)]
    pub multiplier: Option<u32>,
    #[serde(default)]
    pub upgraded: bool,
    /// Single-use: goes to the exhaust pile instead of discard
    #[serde(default)]
    pub exhaust: bool,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub effects: Vec<CardEffect>,
}

impl Card {
    pub fn new(id: CardId, name: &str, kind: CardType, cost: i32) -> Self {
        Self {
            id,
            name: name.to_string(),
            kind,
            cost,
            weight: None,
            multiplier: None,
            upgraded: false,
            exhaust: false,
            description: String::new(),
            effects: Vec::new(),
        }
    }

    pub fn with_weight(mut self, weight: i32) -> Self {
        self.weight = Some(weight);
        self
    }

    pub fn with_multiplier(mut self, percent: u32) -> Self {
        self.multiplier = Some(percent);
        self
    }

    pub fn with_effect(mut self, effect: CardEffect) -> Self {
        self.effects.push(effect);
        self
    }

    pub fn exhausting(mut self) -> Self {
        self.exhaust = true;
        self
    }

    /// Whether playing this card needs a living enemy to aim at.
    pub fn is_targeted(&self) -> bool {
        self.kind == CardType::Evidence
            || self.effects.iter().any(|e| {
                matches!(
                    e,
                    CardEffect::ApplyStatus {
                        target: EffectTarget::Target,
                        ..
                    }
                )
            })
    }
}

/// One copy of a card inside a battle
#[derive(Debug, Clone, PartialEq, Eq, Encode, Decode, TypeInfo, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CardInstance {
    pub id: CardInstanceId,
    pub card: Card,
}

// ==========================================
// ENEMIES
// ==========================================

/// Non-damage effects of an enemy action
#[derive(Debug, Clone, PartialEq, Eq, Encode, Decode, TypeInfo, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum ActionEffect {
    DebuffPlayer { status: StatusEffect },
    BuffSelf { status: StatusEffect },
    Heal { amount: i32 },
}

/// A discrete enemy action
#[derive(Debug, Clone, PartialEq, Eq, Encode, Decode, TypeInfo, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EnemyAction {
    pub name: String,
    /// Damage per hit before scaling and modifiers; 0 for pure effects
    #[serde(default)]
    pub damage: i32,
    #[serde(default = "default_hits")]
    pub hits: u8,
    #[serde(default)]
    pub effects: Vec<ActionEffect>,
}

fn default_hits() -> u8 {
    1
}

impl EnemyAction {
    pub fn attack(name: &str, damage: i32) -> Self {
        Self {
            name: name.to_string(),
            damage,
            hits: 1,
            effects: Vec::new(),
        }
    }

    pub fn with_hits(mut self, hits: u8) -> Self {
        self.hits = hits;
        self
    }

    pub fn with_effect(mut self, effect: ActionEffect) -> Self {
        self.effects.push(effect);
        self
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Encode, Decode, TypeInfo, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum PatternMode {
    /// Actions in listed order, looping
    Sequential,
    /// Weighted random choice among eligible actions
    Weighted,
}

#[derive(Debug, Clone, PartialEq, Eq, Encode, Decode, TypeInfo, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PatternEntry {
    pub action: EnemyAction,
    /// Relative weight for weighted patterns; ignored by sequential ones
    #[serde(default = "default_weight")]
    pub weight: u32,
    /// Consecutive uses after which the entry is ineligible
    #[serde(default)]
    pub max_streak: Option<u8>,
}

fn default_weight() -> u32 {
    1
}

impl PatternEntry {
    pub fn new(action: EnemyAction) -> Self {
        Self {
            action,
            weight: 1,
            max_streak: None,
        }
    }

    pub fn weighted(action: EnemyAction, weight: u32, max_streak: Option<u8>) -> Self {
        Self {
            action,
            weight,
            max_streak,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Encode, Decode, TypeInfo, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AttackPattern {
    pub mode: PatternMode,
    pub entries: Vec<PatternEntry>,
}

impl AttackPattern {
    pub fn sequential(actions: Vec<EnemyAction>) -> Self {
        Self {
            mode: PatternMode::Sequential,
            entries: actions.into_iter().map(PatternEntry::new).collect(),
        }
    }

    pub fn weighted(entries: Vec<PatternEntry>) -> Self {
        Self {
            mode: PatternMode::Weighted,
            entries,
        }
    }
}

/// One phase of an enemy. Normal enemies have exactly one.
#[derive(Debug, Clone, PartialEq, Eq, Encode, Decode, TypeInfo, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PhaseDef {
    pub name: String,
    /// Entered once health is at or below this percent of max health
    pub threshold_percent: u8,
    /// Flat reduction to incoming player damage while active
    #[serde(default)]
    pub resistance: i32,
    pub pattern: AttackPattern,
    /// Applied once when the phase is entered
    #[serde(default)]
    pub on_enter: Vec<ActionEffect>,
}

impl PhaseDef {
    pub fn new(name: &str, threshold_percent: u8, pattern: AttackPattern) -> Self {
        Self {
            name: name.to_string(),
            threshold_percent,
            resistance: 0,
            pattern,
            on_enter: Vec::new(),
        }
    }

    pub fn with_resistance(mut self, resistance: i32) -> Self {
        self.resistance = resistance;
        self
    }

    pub fn with_on_enter(mut self, effect: ActionEffect) -> Self {
        self.on_enter.push(effect);
        self
    }
}

/// An enemy or boss definition from the content catalog
#[derive(Debug, Clone, PartialEq, Eq, Encode, Decode, TypeInfo, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EnemyDef {
    pub id: EnemyId,
    pub name: String,
    pub max_health: i32,
    #[serde(default)]
    pub is_boss: bool,
    /// Ordered phases; the first is active at battle start
    pub phases: Vec<PhaseDef>,
    /// Enemies that join this one on the roster
    #[serde(default)]
    pub companions: Vec<EnemyId>,
}

impl EnemyDef {
    pub fn new(id: EnemyId, name: &str, max_health: i32, pattern: AttackPattern) -> Self {
        Self {
            id,
            name: name.to_string(),
            max_health,
            is_boss: false,
            phases: alloc::vec![PhaseDef::new("default", 100, pattern)],
            companions: Vec::new(),
        }
    }

    pub fn boss(id: EnemyId, name: &str, max_health: i32, phases: Vec<PhaseDef>) -> Self {
        Self {
            id,
            name: name.to_string(),
            max_health,
            is_boss: true,
            phases,
            companions: Vec::new(),
        }
    }
}

// ==========================================
// RELICS
// ==========================================

/// Passive hooks a relic installs for the whole run
#[derive(Debug, Clone, PartialEq, Eq, Encode, Decode, TypeInfo, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum RelicEffect {
    /// Extra weight for every evidence card in a play
    EvidenceWeightBonus { amount: i32 },
    /// Extra chain percent for every evidence card in a play
    ChainBonusPerEvidence { percent: u32 },
    /// Lowers the multiplier ceiling by `-delta` percent points; positive
    /// values have no effect
    MultiplierCeilingDelta { delta: i32 },
    /// Extra flat damage for coherent plays
    CoherenceBonus { amount: i32 },
    /// Extra resource each turn
    MaxResourceBonus { amount: i32 },
    /// Extra cards drawn each turn
    HandSizeBonus { amount: u8 },
    /// Status applied to the player when the battle starts
    StartingStatus { status: StatusEffect },
}

#[derive(Debug, Clone, PartialEq, Eq, Encode, Decode, TypeInfo, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RelicDef {
    pub id: RelicId,
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub effect: RelicEffect,
}

impl RelicDef {
    pub fn new(id: RelicId, name: &str, effect: RelicEffect) -> Self {
        Self {
            id,
            name: name.to_string(),
            description: String::new(),
            effect,
        }
    }
}

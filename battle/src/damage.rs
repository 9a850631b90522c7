//! Damage calculation
//!
//! Pure functions that turn a play into a [`DamageBreakdown`]. Nothing here
//! touches battle state; the state machine passes in the modifiers it owns and
//! applies the outcome itself.
//!
//! All factors are fixed-point percents (100 = 1.0x) so scoring is exact and
//! identical on every host.

use alloc::collections::BTreeSet;
use alloc::vec::Vec;

use parity_scale_codec::{Decode, Encode};
use scale_info::TypeInfo;
use serde::{Deserialize, Serialize};

use crate::config::{BalanceConfig, PERCENT};
use crate::limits::clamp_hit;
use crate::status::{StatusKind, Statuses};
use crate::types::{Card, CardEffect, CardType, RelicDef, RelicEffect};

/// Side effects produced by a play, applied by the state machine
pub type SideEffect = CardEffect;

/// How well the card types of a play fit together
#[derive(Debug, Clone, Copy, PartialEq, Eq, Encode, Decode, TypeInfo, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Coherence {
    /// No non-flaw cards
    Empty,
    /// Exactly one non-flaw card
    Single,
    /// Two or more non-flaw cards of one type
    Unified,
    /// Two types forming a documented pairing
    Paired,
    /// Anything else
    Incoherent,
}

impl Coherence {
    pub fn is_coherent(&self) -> bool {
        !matches!(self, Coherence::Incoherent)
    }
}

/// Output-only record of how a play was scored
#[derive(Debug, Clone, PartialEq, Eq, Encode, Decode, TypeInfo, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DamageBreakdown {
    /// Summed evidence weight
    pub base: i32,
    /// Combined logic multiplier after the ceiling, in percent
    pub multiplier: u32,
    /// Chain factor, in percent
    pub chain: u32,
    /// floor(base * multiplier * chain)
    pub scaled: i32,
    pub coherence: Coherence,
    /// A flaw met an incoherent play
    pub contradiction: bool,
    pub coherence_bonus: i32,
    /// Attacker amplification
    pub flat_bonus: i32,
    /// Damage removed by a contradiction
    pub contradiction_penalty: i32,
    /// Defender resistance subtracted at the end
    pub resistance: i32,
    pub final_damage: i32,
}

impl DamageBreakdown {
    pub fn zero() -> Self {
        Self {
            base: 0,
            multiplier: PERCENT,
            chain: PERCENT,
            scaled: 0,
            coherence: Coherence::Empty,
            contradiction: false,
            coherence_bonus: 0,
            flat_bonus: 0,
            contradiction_penalty: 0,
            resistance: 0,
            final_damage: 0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DamageOutcome {
    pub breakdown: DamageBreakdown,
    pub side_effects: Vec<SideEffect>,
}

/// Modifiers the state machine hands to [`calculate_play`]
#[derive(Debug, Clone, Copy)]
pub struct PlayContext<'a> {
    pub attacker: &'a Statuses,
    /// Statuses of the targeted enemy, if any
    pub defender: Option<&'a Statuses>,
    /// Resistance granted by the defender's active phase
    pub phase_resistance: i32,
    pub relics: &'a [RelicDef],
    pub config: &'a BalanceConfig,
    /// Distinct card ids played this turn, this play included
    pub distinct_this_turn: u32,
}

/// Relic hooks that feed the damage calculation
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
struct RelicHooks {
    weight_per_evidence: i32,
    chain_per_evidence: u32,
    ceiling_delta: i32,
    coherence_bonus: i32,
}

impl RelicHooks {
    fn collect(relics: &[RelicDef]) -> Self {
        let mut hooks = Self::default();
        for relic in relics {
            match &relic.effect {
                RelicEffect::EvidenceWeightBonus { amount } => {
                    hooks.weight_per_evidence = hooks.weight_per_evidence.saturating_add(*amount)
                }
                RelicEffect::ChainBonusPerEvidence { percent } => {
                    hooks.chain_per_evidence = hooks.chain_per_evidence.saturating_add(*percent)
                }
                RelicEffect::MultiplierCeilingDelta { delta } => {
                    hooks.ceiling_delta = hooks.ceiling_delta.saturating_add(*delta)
                }
                RelicEffect::CoherenceBonus { amount } => {
                    hooks.coherence_bonus = hooks.coherence_bonus.saturating_add(*amount)
                }
                RelicEffect::MaxResourceBonus { .. }
                | RelicEffect::HandSizeBonus { .. }
                | RelicEffect::StartingStatus { .. } => {}
            }
        }
        hooks
    }
}

/// Classify the non-flaw card types of a play.
pub fn classify_coherence(cards: &[&Card], config: &BalanceConfig) -> Coherence {
    let argument: Vec<CardType> = cards
        .iter()
        .map(|c| c.kind)
        .filter(|k| *k != CardType::Flaw)
        .collect();
    let kinds: BTreeSet<CardType> = argument.iter().copied().collect();

    match (argument.len(), kinds.len()) {
        (0, _) => Coherence::Empty,
        (1, _) => Coherence::Single,
        (_, 1) => Coherence::Unified,
        (_, 2) => {
            let mut pair = kinds.iter();
            match (pair.next(), pair.next()) {
                (Some(a), Some(b)) if config.is_paired(*a, *b) => Coherence::Paired,
                _ => Coherence::Incoherent,
            }
        }
        _ => Coherence::Incoherent,
    }
}

/// Combine logic multipliers by multiplication, then clamp to `ceiling`.
pub fn combine_multipliers(cards: &[&Card], ceiling: u32) -> u32 {
    let mut combined: u64 = PERCENT as u64;
    for card in cards.iter().filter(|c| c.kind == CardType::Logic) {
        let factor = card.multiplier.unwrap_or(PERCENT) as u64;
        // Stays far above any ceiling once saturated.
        combined = (combined.saturating_mul(factor) / PERCENT as u64).min(u32::MAX as u64);
    }
    (combined as u32).min(ceiling)
}

/// Score a play of one or more cards against a single defender.
pub fn calculate_play(cards: &[&Card], ctx: &PlayContext) -> DamageOutcome {
    if cards.is_empty() {
        return DamageOutcome {
            breakdown: DamageBreakdown::zero(),
            side_effects: Vec::new(),
        };
    }

    let side_effects: Vec<SideEffect> = cards
        .iter()
        .flat_map(|c| c.effects.iter().cloned())
        .collect();

    let hooks = RelicHooks::collect(ctx.relics);
    let config = ctx.config;

    // 1. Base weight from evidence
    let evidence: Vec<&&Card> = cards
        .iter()
        .filter(|c| c.kind == CardType::Evidence)
        .collect();
    let base: i64 = evidence
        .iter()
        .map(|c| c.weight.unwrap_or(0) as i64 + hooks.weight_per_evidence as i64)
        .sum::<i64>()
        .max(0);
    let base = base.min(i32::MAX as i64) as i32;

    // 2. Multiplier, clamped to the ceiling; relics can only lower it
    let ceiling = (config.multiplier_ceiling as i64 + hooks.ceiling_delta as i64)
        .clamp(PERCENT as i64, config.multiplier_ceiling.max(PERCENT) as i64) as u32;
    let multiplier = combine_multipliers(cards, ceiling);

    // 3. Chain over distinct cards this turn
    let chain = config
        .chain_bonus(ctx.distinct_this_turn)
        .saturating_add(hooks.chain_per_evidence.saturating_mul(evidence.len() as u32));

    // 4. Coherence and contradiction
    let coherence = classify_coherence(cards, config);
    let has_flaw = cards.iter().any(|c| c.kind == CardType::Flaw);
    let contradiction = has_flaw && coherence == Coherence::Incoherent;

    let mut breakdown = DamageBreakdown {
        base,
        multiplier,
        chain,
        scaled: 0,
        coherence,
        contradiction,
        coherence_bonus: 0,
        flat_bonus: 0,
        contradiction_penalty: 0,
        resistance: 0,
        final_damage: 0,
    };

    // Multiplying nothing is still nothing.
    if base == 0 {
        return DamageOutcome {
            breakdown,
            side_effects,
        };
    }

    let scaled = (base as i64)
        .saturating_mul(multiplier as i64)
        .saturating_mul(chain as i64)
        / (PERCENT as i64 * PERCENT as i64);
    let scaled = scaled.min(i32::MAX as i64) as i32;
    breakdown.scaled = scaled;

    let argued = if contradiction {
        let kept = (scaled as i64) * (config.contradiction_percent.min(PERCENT) as i64)
            / PERCENT as i64;
        let kept = (kept - config.contradiction_flat.max(0) as i64).max(0) as i32;
        breakdown.contradiction_penalty = scaled - kept;
        kept
    } else {
        breakdown.coherence_bonus = match coherence {
            Coherence::Unified => config.unified_bonus.saturating_add(hooks.coherence_bonus),
            Coherence::Paired => config.paired_bonus.saturating_add(hooks.coherence_bonus),
            Coherence::Empty | Coherence::Single | Coherence::Incoherent => 0,
        };
        scaled.saturating_add(breakdown.coherence_bonus)
    };

    // 5. Flat bonuses and resistance
    breakdown.flat_bonus = ctx.attacker.magnitude(StatusKind::Amplify);
    breakdown.resistance = ctx
        .defender
        .map(|d| d.magnitude(StatusKind::Resistance))
        .unwrap_or(0)
        .saturating_add(ctx.phase_resistance);

    // 6. Whole, non-negative, capped
    breakdown.final_damage = clamp_hit(
        argued as i64 + breakdown.flat_bonus as i64 - breakdown.resistance as i64,
    );

    DamageOutcome {
        breakdown,
        side_effects,
    }
}

/// Score one enemy hit against the player.
pub fn calculate_enemy_hit(damage: i32, attacker: &Statuses, defender: &Statuses) -> DamageBreakdown {
    let mut breakdown = DamageBreakdown::zero();
    if damage <= 0 {
        return breakdown;
    }
    breakdown.base = damage;
    breakdown.scaled = damage;
    breakdown.coherence = Coherence::Single;
    breakdown.flat_bonus = attacker.magnitude(StatusKind::Amplify);
    breakdown.resistance = defender.magnitude(StatusKind::Resistance);
    breakdown.final_damage = clamp_hit(
        damage as i64 + breakdown.flat_bonus as i64 - breakdown.resistance as i64,
    );
    breakdown
}

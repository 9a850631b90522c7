//! Balance configuration.
//!
//! The numeric curves are content, not law: defaults live here as constants
//! and can be overridden from the catalog's balance table. A battle keeps the
//! config it started with so a resumed battle scores plays identically.

use alloc::vec;
use alloc::vec::Vec;

use parity_scale_codec::{Decode, Encode};
use scale_info::TypeInfo;
use serde::{Deserialize, Serialize};

use crate::types::CardType;

/// Fixed-point unit for multipliers and chain factors (100 = 1.0x)
pub const PERCENT: u32 = 100;
/// Highest combined multiplier a play can reach (4.0x)
pub const MULTIPLIER_CEILING: u32 = 400;
/// Chain factor gained per distinct card played this turn
pub const CHAIN_STEP_PERCENT: u32 = 10;
/// Distinct cards per turn after which the chain stops growing
pub const CHAIN_CAP_CARDS: u32 = 6;
/// Flat bonus for a play made of one card type
pub const UNIFIED_BONUS: i32 = 2;
/// Flat bonus for a play made of a documented type pairing
pub const PAIRED_BONUS: i32 = 1;
/// Share of scaled damage kept when a flaw contradicts the play
pub const CONTRADICTION_PERCENT: u32 = 25;
/// Flat damage removed on top of the contradiction cut
pub const CONTRADICTION_FLAT: i32 = 2;
/// Resource refilled each turn
pub const STARTING_RESOURCE: i32 = 3;
/// Cards held after each draw
pub const HAND_SIZE: u8 = 5;

/// Two card types that reinforce each other
#[derive(Debug, Clone, Copy, PartialEq, Eq, Encode, Decode, TypeInfo, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TypePair {
    pub first: CardType,
    pub second: CardType,
}

impl TypePair {
    pub const fn new(first: CardType, second: CardType) -> Self {
        Self { first, second }
    }

    pub fn matches(&self, a: CardType, b: CardType) -> bool {
        (self.first == a && self.second == b) || (self.first == b && self.second == a)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Encode, Decode, TypeInfo, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct BalanceConfig {
    pub multiplier_ceiling: u32,
    pub chain_step_percent: u32,
    pub chain_cap_cards: u32,
    pub unified_bonus: i32,
    pub paired_bonus: i32,
    pub pairings: Vec<TypePair>,
    pub contradiction_percent: u32,
    pub contradiction_flat: i32,
    pub max_resource: i32,
    pub hand_size: u8,
    pub health_per_floor_percent: u32,
    pub damage_per_floor_percent: u32,
    pub elite_health_percent: u32,
    pub elite_damage_percent: u32,
    pub reward_gold_base: u32,
    pub reward_gold_per_floor: u32,
}

impl Default for BalanceConfig {
    fn default() -> Self {
        Self {
            multiplier_ceiling: MULTIPLIER_CEILING,
            chain_step_percent: CHAIN_STEP_PERCENT,
            chain_cap_cards: CHAIN_CAP_CARDS,
            unified_bonus: UNIFIED_BONUS,
            paired_bonus: PAIRED_BONUS,
            pairings: vec![
                TypePair::new(CardType::Evidence, CardType::Logic),
                TypePair::new(CardType::Evidence, CardType::Framework),
                TypePair::new(CardType::Logic, CardType::Framework),
            ],
            contradiction_percent: CONTRADICTION_PERCENT,
            contradiction_flat: CONTRADICTION_FLAT,
            max_resource: STARTING_RESOURCE,
            hand_size: HAND_SIZE,
            health_per_floor_percent: 8,
            damage_per_floor_percent: 5,
            elite_health_percent: 150,
            elite_damage_percent: 125,
            reward_gold_base: 15,
            reward_gold_per_floor: 2,
        }
    }
}

impl BalanceConfig {
    /// Chain factor in percent for `distinct` cards played this turn.
    ///
    /// Monotonic in `distinct` and flat after `chain_cap_cards`.
    pub fn chain_bonus(&self, distinct: u32) -> u32 {
        if distinct == 0 {
            return PERCENT;
        }
        let counted = distinct.min(self.chain_cap_cards.max(1));
        PERCENT.saturating_add(self.chain_step_percent.saturating_mul(counted - 1))
    }

    pub fn is_paired(&self, a: CardType, b: CardType) -> bool {
        self.pairings.iter().any(|p| p.matches(a, b))
    }

    /// Apply floor and elite scaling to a base value.
    pub fn scale_health(&self, base: i32, floor: u32, is_elite: bool) -> i32 {
        let mut percent = PERCENT as i64 + (self.health_per_floor_percent as i64) * (floor as i64);
        if is_elite {
            percent = percent * self.elite_health_percent as i64 / PERCENT as i64;
        }
        ((base.max(1) as i64) * percent / PERCENT as i64).clamp(1, i32::MAX as i64) as i32
    }

    pub fn scale_damage(&self, base: i32, floor: u32, is_elite: bool) -> i32 {
        let mut percent = PERCENT as i64 + (self.damage_per_floor_percent as i64) * (floor as i64);
        if is_elite {
            percent = percent * self.elite_damage_percent as i64 / PERCENT as i64;
        }
        ((base.max(0) as i64) * percent / PERCENT as i64).clamp(0, i32::MAX as i64) as i32
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_chain_curve_is_capped() {
        let config = BalanceConfig::default();
        assert_eq!(config.chain_bonus(1), 100);
        assert_eq!(config.chain_bonus(2), 110);
        assert_eq!(config.chain_bonus(6), 150);
        assert_eq!(config.chain_bonus(7), config.chain_bonus(6));
        assert_eq!(config.chain_bonus(40), config.chain_bonus(6));
    }

    #[test]
    fn test_chain_curve_is_monotonic() {
        let config = BalanceConfig::default();
        for n in 0..20 {
            assert!(config.chain_bonus(n + 1) >= config.chain_bonus(n));
        }
    }

    #[test]
    fn test_pairings_are_symmetric() {
        let config = BalanceConfig::default();
        assert!(config.is_paired(CardType::Logic, CardType::Evidence));
        assert!(config.is_paired(CardType::Evidence, CardType::Logic));
        assert!(!config.is_paired(CardType::Evidence, CardType::Meta));
    }

    #[test]
    fn test_floor_scaling() {
        let config = BalanceConfig::default();
        assert_eq!(config.scale_health(50, 0, false), 50);
        assert_eq!(config.scale_health(50, 5, false), 70);
        assert_eq!(config.scale_health(50, 0, true), 75);
        assert_eq!(config.scale_damage(10, 0, false), 10);
        assert_eq!(config.scale_damage(10, 4, true), 15);
    }
}

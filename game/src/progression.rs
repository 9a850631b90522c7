//! Meta-progression: what a run carries from one battle to the next.
//!
//! The store is read when a battle starts and written once when it is
//! concluded. Nothing inside a battle touches it.

use alloc::collections::BTreeMap;
use alloc::vec::Vec;

use parity_scale_codec::{Decode, Encode};
use scale_info::TypeInfo;
use serde::{Deserialize, Serialize};

use ma_battle::{
    BalanceConfig, BattleResult, CardId, EncounterRequest, GameResult, Loadout, RelicId,
};

/// Identifies one run of the game
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Encode, Decode, TypeInfo, Serialize,
    Deserialize,
)]
pub struct RunId(pub u64);

/// Persistent state of a run
#[derive(Debug, Clone, PartialEq, Eq, Encode, Decode, TypeInfo, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RunProfile {
    pub deck: Vec<CardId>,
    pub relics: Vec<RelicId>,
    pub gold: u32,
    pub floor: u32,
    pub health: i32,
    pub max_health: i32,
    /// Encounter in progress, so a lost battle can be restarted
    #[serde(default)]
    pub encounter: Option<EncounterRequest>,
}

impl RunProfile {
    /// A fresh run on floor 1 with the given starting kit
    pub fn new(starter: Loadout) -> Self {
        Self {
            deck: starter.deck,
            relics: starter.relics,
            gold: 0,
            floor: 1,
            health: starter.health,
            max_health: starter.max_health,
            encounter: None,
        }
    }

    pub fn loadout(&self) -> Loadout {
        Loadout {
            deck: self.deck.clone(),
            relics: self.relics.clone(),
            health: self.health,
            max_health: self.max_health,
        }
    }

    pub fn is_alive(&self) -> bool {
        self.health > 0
    }
}

/// What a concluded battle wrote back to the run
#[derive(Debug, Clone, PartialEq, Eq, Encode, Decode, TypeInfo, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BattleRewards {
    pub result: BattleResult,
    pub gold: u32,
    /// Player health carried out of the battle
    pub health: i32,
    /// Floor the run is on afterwards
    pub floor: u32,
}

/// Gold for winning an encounter on `floor`.
pub fn reward_gold(config: &BalanceConfig, floor: u32, is_elite: bool, is_boss: bool) -> u32 {
    let base = config
        .reward_gold_base
        .saturating_add(floor.saturating_mul(config.reward_gold_per_floor));
    let factor = if is_boss {
        3
    } else if is_elite {
        2
    } else {
        1
    };
    base.saturating_mul(factor)
}

/// Persistent store for run profiles
pub trait ProgressionStore {
    fn load_profile(&self, run: RunId) -> GameResult<RunProfile>;
    fn save_profile(&mut self, run: RunId, profile: RunProfile) -> GameResult<()>;
}

/// In-process store; unknown runs start from the starter kit.
#[derive(Debug, Clone)]
pub struct MemoryProgressionStore {
    starter: Loadout,
    profiles: BTreeMap<RunId, RunProfile>,
}

impl MemoryProgressionStore {
    pub fn new(starter: Loadout) -> Self {
        Self {
            starter,
            profiles: BTreeMap::new(),
        }
    }
}

impl ProgressionStore for MemoryProgressionStore {
    fn load_profile(&self, run: RunId) -> GameResult<RunProfile> {
        Ok(self
            .profiles
            .get(&run)
            .cloned()
            .unwrap_or_else(|| RunProfile::new(self.starter.clone())))
    }

    fn save_profile(&mut self, run: RunId, profile: RunProfile) -> GameResult<()> {
        log::debug!(target: "ma_game", "saving profile for run {}: floor={} gold={}", run.0, profile.floor, profile.gold);
        self.profiles.insert(run, profile);
        Ok(())
    }
}

//! Persistence of the battle in progress, keyed by run.
//!
//! A battle is stored as JSON. Loading decodes and then validates it; a
//! record that fails either step is reported as `CorruptBattleState` and the
//! caller decides what to do with it.

use alloc::collections::BTreeMap;
use alloc::string::String;

use ma_battle::{BattleState, CorruptionReason, GameError, GameResult};

use crate::progression::RunId;

pub trait BattleRepository {
    /// The stored battle for `run`, if any, already validated.
    fn load(&self, run: RunId) -> GameResult<Option<BattleState>>;
    fn save(&mut self, run: RunId, state: &BattleState) -> GameResult<()>;
    fn clear(&mut self, run: RunId);
}

/// Decode and validate a persisted battle.
pub fn decode_battle(json: &str) -> GameResult<BattleState> {
    let state: BattleState = serde_json::from_str(json).map_err(|_| GameError::CorruptBattleState {
        reason: CorruptionReason::Undecodable,
    })?;
    state.validate()?;
    Ok(state)
}

pub fn encode_battle(state: &BattleState) -> GameResult<String> {
    serde_json::to_string(state).map_err(|_| GameError::CorruptBattleState {
        reason: CorruptionReason::Undecodable,
    })
}

/// In-process repository holding the serialized form, so every load goes
/// through the same decode path as a real store.
#[derive(Debug, Clone, Default)]
pub struct MemoryBattleRepository {
    records: BTreeMap<RunId, String>,
}

impl MemoryBattleRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Raw record for a run.
    pub fn raw(&self, run: RunId) -> Option<&str> {
        self.records.get(&run).map(|s| s.as_str())
    }

    /// Replace the raw record for a run.
    pub fn put_raw(&mut self, run: RunId, json: String) {
        self.records.insert(run, json);
    }
}

impl BattleRepository for MemoryBattleRepository {
    fn load(&self, run: RunId) -> GameResult<Option<BattleState>> {
        match self.records.get(&run) {
            Some(json) => decode_battle(json).map(Some),
            None => Ok(None),
        }
    }

    fn save(&mut self, run: RunId, state: &BattleState) -> GameResult<()> {
        let json = encode_battle(state)?;
        self.records.insert(run, json);
        Ok(())
    }

    fn clear(&mut self, run: RunId) {
        self.records.remove(&run);
    }
}

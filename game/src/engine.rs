//! Game engine for browser WASM builds
//!
//! Exposes one battle session to JavaScript. Intents come in as plain
//! numbers, views and events go out as JSON-shaped `JsValue`s.

use std::format;
use std::string::String;
use std::vec::Vec;

use ma_battle::{CardInstanceId, EnemyId, EnemyInstanceId, GameError};
use serde::Serialize;
use wasm_bindgen::prelude::*;

use crate::progression::{MemoryProgressionStore, RunId};
use crate::repository::MemoryBattleRepository;
use crate::session::BattleSession;

type Session = BattleSession<MemoryProgressionStore, MemoryBattleRepository>;

fn to_js<T: Serialize>(value: &T) -> JsValue {
    match serde_wasm_bindgen::to_value(value) {
        Ok(js) => js,
        Err(e) => {
            web_sys::console::error_1(&JsValue::from_str(&format!("serialization failed: {e:?}")));
            JsValue::NULL
        }
    }
}

fn to_err(err: GameError) -> JsValue {
    to_js(&err)
}

fn random_seed() -> u64 {
    let mut bytes = [0u8; 8];
    if getrandom::getrandom(&mut bytes).is_err() {
        log::warn!(target: "ma_game", "no entropy available, using fixed seed");
        return 0x5EED;
    }
    u64::from_le_bytes(bytes)
}

/// The battle engine exposed to WASM
#[wasm_bindgen]
pub struct GameEngine {
    session: Session,
}

#[wasm_bindgen]
impl GameEngine {
    /// Create an engine for a run; a missing seed draws one from the browser
    #[wasm_bindgen(constructor)]
    pub fn new(run_id: u64, seed: Option<u64>) -> Self {
        log::info!(target: "ma_game", "=== MIND ARCHITECT ENGINE INITIALIZED ===");
        let seed = seed.unwrap_or_else(random_seed);
        let progression = MemoryProgressionStore::new(ma_assets::get_starter_loadout());
        Self {
            session: BattleSession::new(
                ma_assets::catalog(),
                progression,
                MemoryBattleRepository::new(),
                RunId(run_id),
                seed,
            ),
        }
    }

    #[wasm_bindgen(js_name = startBattle)]
    pub fn start_battle(
        &mut self,
        enemy_id: u32,
        floor: u32,
        is_elite: bool,
        is_boss: bool,
    ) -> Result<JsValue, JsValue> {
        self.session
            .start_battle(EnemyId(enemy_id), floor, is_elite, is_boss)
            .map_err(to_err)?;
        self.get_view()
    }

    #[wasm_bindgen(js_name = resumeBattle)]
    pub fn resume_battle(&mut self) -> Result<JsValue, JsValue> {
        let events = self.session.resume_battle().map_err(to_err)?;
        Ok(to_js(&events))
    }

    #[wasm_bindgen(js_name = playCard)]
    pub fn play_card(&mut self, instance: u32, target: Option<u32>) -> Result<JsValue, JsValue> {
        let outcome = self
            .session
            .play_card(CardInstanceId(instance), target.map(EnemyInstanceId))
            .map_err(to_err)?;
        Ok(to_js(&outcome))
    }

    /// Play several cards as one sequence
    #[wasm_bindgen(js_name = playCards)]
    pub fn play_cards(&mut self, instances: Vec<u32>, target: Option<u32>) -> Result<JsValue, JsValue> {
        let cards: Vec<CardInstanceId> = instances.into_iter().map(CardInstanceId).collect();
        let outcome = self
            .session
            .play_cards(&cards, target.map(EnemyInstanceId))
            .map_err(to_err)?;
        Ok(to_js(&outcome))
    }

    #[wasm_bindgen(js_name = endTurn)]
    pub fn end_turn(&mut self) -> Result<JsValue, JsValue> {
        let events = self.session.end_turn().map_err(to_err)?;
        Ok(to_js(&events))
    }

    #[wasm_bindgen]
    pub fn flee(&mut self) -> Result<JsValue, JsValue> {
        let events = self.session.flee().map_err(to_err)?;
        Ok(to_js(&events))
    }

    #[wasm_bindgen(js_name = getResult)]
    pub fn get_result(&self) -> Result<JsValue, JsValue> {
        let result = self.session.battle_result().map_err(to_err)?;
        Ok(to_js(&result))
    }

    #[wasm_bindgen(js_name = getView)]
    pub fn get_view(&self) -> Result<JsValue, JsValue> {
        let view = self.session.view().map_err(to_err)?;
        Ok(to_js(&view))
    }

    #[wasm_bindgen(js_name = getProfile)]
    pub fn get_profile(&self) -> Result<JsValue, JsValue> {
        let profile = self.session.profile().map_err(to_err)?;
        Ok(to_js(&profile))
    }

    #[wasm_bindgen]
    pub fn conclude(&mut self) -> Result<JsValue, JsValue> {
        let rewards = self.session.conclude().map_err(to_err)?;
        Ok(to_js(&rewards))
    }

    /// Persisted battle record for this run, as stored
    #[wasm_bindgen(js_name = exportBattle)]
    pub fn export_battle(&self) -> Option<String> {
        self.session
            .repository()
            .raw(self.session.run())
            .map(String::from)
    }

    /// Replace the persisted record, e.g. from browser storage. Takes effect
    /// on the next `resumeBattle`.
    #[wasm_bindgen(js_name = importBattle)]
    pub fn import_battle(&mut self, json: String) {
        let run = self.session.run();
        self.session.repository_mut().put_raw(run, json);
    }
}

//! Read-only lookup over the static content tables.

use alloc::collections::BTreeMap;
use alloc::vec::Vec;

use crate::config::BalanceConfig;
use crate::error::{GameError, GameResult};
use crate::types::{Card, CardId, EnemyDef, EnemyId, RelicDef, RelicId};

/// Cards, enemies, bosses and relics keyed by id, plus balance constants.
#[derive(Debug, Clone, Default)]
pub struct ContentCatalog {
    cards: BTreeMap<CardId, Card>,
    enemies: BTreeMap<EnemyId, EnemyDef>,
    relics: BTreeMap<RelicId, RelicDef>,
    balance: BalanceConfig,
}

impl ContentCatalog {
    pub fn new(
        cards: Vec<Card>,
        enemies: Vec<EnemyDef>,
        relics: Vec<RelicDef>,
        balance: BalanceConfig,
    ) -> Self {
        Self {
            cards: cards.into_iter().map(|c| (c.id, c)).collect(),
            enemies: enemies.into_iter().map(|e| (e.id, e)).collect(),
            relics: relics.into_iter().map(|r| (r.id, r)).collect(),
            balance,
        }
    }

    pub fn card(&self, id: CardId) -> GameResult<&Card> {
        self.cards.get(&id).ok_or(GameError::UnknownCard)
    }

    pub fn enemy(&self, id: EnemyId) -> GameResult<&EnemyDef> {
        self.enemies.get(&id).ok_or(GameError::UnknownEnemy)
    }

    /// Look up an encounter leader, checking it is a boss exactly when one
    /// was asked for.
    pub fn encounter_leader(&self, id: EnemyId, is_boss: bool) -> GameResult<&EnemyDef> {
        let def = self.enemy(id)?;
        if def.is_boss != is_boss {
            return Err(GameError::UnknownEnemy);
        }
        Ok(def)
    }

    pub fn relic(&self, id: RelicId) -> GameResult<&RelicDef> {
        self.relics.get(&id).ok_or(GameError::UnknownRelic)
    }

    pub fn balance(&self) -> &BalanceConfig {
        &self.balance
    }

    pub fn cards(&self) -> impl Iterator<Item = &Card> {
        self.cards.values()
    }

    pub fn enemies(&self) -> impl Iterator<Item = &EnemyDef> {
        self.enemies.values()
    }

    pub fn relics(&self) -> impl Iterator<Item = &RelicDef> {
        self.relics.values()
    }

    pub fn bosses(&self) -> impl Iterator<Item = &EnemyDef> {
        self.enemies.values().filter(|e| e.is_boss)
    }
}

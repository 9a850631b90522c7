//! Battle state machine
//!
//! Every transition validates its input before it mutates anything, so a
//! rejected transition leaves the [`BattleState`] exactly as it was.

use alloc::collections::BTreeSet;
use alloc::format;
use alloc::string::String;
use alloc::vec;
use alloc::vec::Vec;

use parity_scale_codec::{Decode, Encode};
use scale_info::TypeInfo;
use serde::{Deserialize, Serialize};

use crate::catalog::ContentCatalog;
use crate::config::{BalanceConfig, PERCENT};
use crate::damage::{calculate_enemy_hit, calculate_play, DamageBreakdown, PlayContext, SideEffect};
use crate::error::{GameError, GameResult};
use crate::limits::{
    check_play_budget, check_turn_budget, LimitReason, MAX_ENEMIES, MAX_HAND_SIZE,
    MAX_HITS_PER_ACTION, MAX_RESOURCE,
};
use crate::log;
use crate::pattern::{advance_pattern, check_phase_transition, get_next_pattern, plan_intent};
use crate::rng::{BattleRng, XorShiftRng};
use crate::state::*;
use crate::status::{StatusEffect, StatusKind, Statuses};
use crate::types::*;

/// A combatant that can carry statuses
#[derive(Debug, Clone, Copy, PartialEq, Eq, Encode, Decode, TypeInfo, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Combatant {
    Player,
    Enemy(EnemyInstanceId),
}

/// Events generated by transitions for UI playback.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "payload", rename_all = "camelCase")]
pub enum BattleEvent {
    #[serde(rename_all = "camelCase")]
    TurnStarted { turn: u32 },
    #[serde(rename_all = "camelCase")]
    TurnEnded { turn: u32 },
    #[serde(rename_all = "camelCase")]
    CardPlayed {
        instance: CardInstanceId,
        card_id: CardId,
        exhausted: bool,
    },
    #[serde(rename_all = "camelCase")]
    DamageDealt {
        target: EnemyInstanceId,
        amount: i32,
        remaining_health: i32,
    },
    #[serde(rename_all = "camelCase")]
    EnemyDefeated { target: EnemyInstanceId },
    #[serde(rename_all = "camelCase")]
    StatusApplied {
        target: Combatant,
        status: StatusEffect,
    },
    #[serde(rename_all = "camelCase")]
    StatusExpired { target: Combatant, kind: StatusKind },
    #[serde(rename_all = "camelCase")]
    StatusDamage {
        target: Combatant,
        amount: i32,
        remaining_health: i32,
    },
    #[serde(rename_all = "camelCase")]
    Healed { target: Combatant, amount: i32 },
    #[serde(rename_all = "camelCase")]
    ResourceGained { amount: i32 },
    #[serde(rename_all = "camelCase")]
    CardsDrawn { count: u32 },
    #[serde(rename_all = "camelCase")]
    DeckReshuffled { cards: u32 },
    #[serde(rename_all = "camelCase")]
    PhaseChanged {
        enemy: EnemyInstanceId,
        from: u32,
        to: u32,
    },
    #[serde(rename_all = "camelCase")]
    EnemyActed {
        enemy: EnemyInstanceId,
        action: String,
    },
    #[serde(rename_all = "camelCase")]
    PlayerDamaged {
        source: EnemyInstanceId,
        amount: i32,
        remaining_health: i32,
    },
    #[serde(rename_all = "camelCase")]
    LimitExceeded { reason: LimitReason },
    #[serde(rename_all = "camelCase")]
    BattleEnded { result: BattleResult },
}

/// Result of a successful play
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlayOutcome {
    /// Present when the play was aimed at an enemy
    pub breakdown: Option<DamageBreakdown>,
    pub events: Vec<BattleEvent>,
}

// ==========================================
// BATTLE SETUP
// ==========================================

/// Which encounter a map node asks for
#[derive(Debug, Clone, PartialEq, Eq, Encode, Decode, TypeInfo, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EncounterRequest {
    pub enemy_id: EnemyId,
    pub floor: u32,
    pub is_elite: bool,
    pub is_boss: bool,
}

/// What the player brings into a battle from the run
#[derive(Debug, Clone, PartialEq, Eq, Encode, Decode, TypeInfo, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Loadout {
    pub deck: Vec<CardId>,
    pub relics: Vec<RelicId>,
    pub health: i32,
    pub max_health: i32,
}

/// Everything needed to create a battle, resolved against the catalog
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EncounterSetup {
    pub deck: Vec<Card>,
    pub relics: Vec<RelicDef>,
    /// Encounter leader first, companions after
    pub enemies: Vec<EnemyDef>,
    pub player_health: i32,
    pub player_max_health: i32,
    pub floor: u32,
    pub is_elite: bool,
    pub config: BalanceConfig,
    pub seed: u64,
}

impl EncounterSetup {
    /// Resolve a request and loadout against the content catalog.
    pub fn build(
        catalog: &ContentCatalog,
        request: &EncounterRequest,
        loadout: &Loadout,
        seed: u64,
    ) -> GameResult<Self> {
        let leader = catalog.encounter_leader(request.enemy_id, request.is_boss)?;
        let mut enemies = vec![leader.clone()];
        for companion in &leader.companions {
            enemies.push(catalog.enemy(*companion)?.clone());
        }

        let deck = loadout
            .deck
            .iter()
            .map(|id| catalog.card(*id).cloned())
            .collect::<GameResult<Vec<_>>>()?;
        let relics = loadout
            .relics
            .iter()
            .map(|id| catalog.relic(*id).cloned())
            .collect::<GameResult<Vec<_>>>()?;

        Ok(Self {
            deck,
            relics,
            enemies,
            player_health: loadout.health,
            player_max_health: loadout.max_health,
            floor: request.floor,
            is_elite: request.is_elite,
            config: catalog.balance().clone(),
            seed,
        })
    }
}

fn enemy_from_def(
    def: &EnemyDef,
    id: EnemyInstanceId,
    floor: u32,
    is_elite: bool,
    config: &BalanceConfig,
) -> EnemyState {
    let max_health = config.scale_health(def.max_health, floor, is_elite);
    EnemyState {
        id,
        def_id: def.id,
        name: def.name.clone(),
        health: max_health,
        max_health,
        is_boss: def.is_boss,
        is_elite,
        damage_percent: config.scale_damage(PERCENT as i32, floor, is_elite).max(0) as u32,
        phases: def.phases.clone(),
        phase_index: 0,
        cursor: 0,
        intent: None,
        last_action: None,
        streak: 0,
        statuses: Statuses::new(),
    }
}

/// Create a battle in the player's first turn.
pub fn start_battle(setup: EncounterSetup) -> GameResult<BattleState> {
    let usable = setup
        .enemies
        .iter()
        .filter(|def| def.phases.iter().all(|p| !p.pattern.entries.is_empty()))
        .count();
    if setup.enemies.is_empty() || usable != setup.enemies.len() {
        return Err(GameError::UnknownEnemy);
    }

    let config = setup.config;
    let relic_resource: i32 = setup
        .relics
        .iter()
        .map(|r| match r.effect {
            RelicEffect::MaxResourceBonus { amount } => amount,
            _ => 0,
        })
        .sum();
    let max_resource = config
        .max_resource
        .saturating_add(relic_resource)
        .clamp(0, MAX_RESOURCE);
    let max_health = setup.player_max_health.max(1);

    let enemies = setup
        .enemies
        .iter()
        .take(MAX_ENEMIES)
        .enumerate()
        .map(|(i, def)| {
            enemy_from_def(def, EnemyInstanceId(i as u32 + 1), setup.floor, setup.is_elite, &config)
        })
        .collect();

    let mut state = BattleState {
        player: PlayerState {
            health: setup.player_health.clamp(1, max_health),
            max_health,
            resource: max_resource,
            max_resource,
            statuses: Statuses::new(),
        },
        zones: Zones::default(),
        relics: setup.relics,
        enemies,
        turn: 1,
        phase: BattlePhase::PlayerTurn,
        turn_log: Vec::new(),
        last_ticked_turn: 0,
        enemy_cursor: 0,
        floor: setup.floor,
        config,
        rng: XorShiftRng::seed_from_u64(setup.seed),
        next_instance_id: 1,
    };

    for card in setup.deck {
        let id = state.generate_instance_id();
        state.zones.deck.push(CardInstance { id, card });
    }
    state.rng.shuffle(&mut state.zones.deck);

    let starting: Vec<StatusEffect> = state
        .relics
        .iter()
        .filter_map(|r| match &r.effect {
            RelicEffect::StartingStatus { status } => Some(status.clone()),
            _ => None,
        })
        .collect();
    for status in &starting {
        state.player.statuses.apply(status);
    }

    for enemy in state.enemies.iter_mut() {
        plan_intent(enemy, &mut state.rng);
    }

    let mut events = Vec::new();
    let hand_size = state.hand_size();
    state.draw_cards(hand_size as u32, &mut events);

    log::info(&format!(
        "battle started: floor={} enemies={} deck={}",
        state.floor,
        state.enemies.len(),
        state.zones.len()
    ));
    log::state_summary(&state);
    Ok(state)
}

// ==========================================
// TRANSITIONS
// ==========================================

impl BattleState {
    /// Cards drawn up to at the end of each turn.
    pub fn hand_size(&self) -> usize {
        let bonus: u32 = self
            .relics
            .iter()
            .map(|r| match r.effect {
                RelicEffect::HandSizeBonus { amount } => amount as u32,
                _ => 0,
            })
            .sum();
        ((self.config.hand_size as u32).saturating_add(bonus) as usize).min(MAX_HAND_SIZE)
    }

    /// Play a single card from hand.
    pub fn play_card(
        &mut self,
        card: CardInstanceId,
        target: Option<EnemyInstanceId>,
    ) -> GameResult<PlayOutcome> {
        self.play_cards(&[card], target)
    }

    /// Play one or more cards together as a single argument.
    pub fn play_cards(
        &mut self,
        cards: &[CardInstanceId],
        target: Option<EnemyInstanceId>,
    ) -> GameResult<PlayOutcome> {
        log::action("play_cards", &format!("cards={cards:?} target={target:?}"));
        let result = self.try_play_cards(cards, target);
        if let Err(err) = &result {
            log::result(false, &format!("{err}"));
        }
        log::state_summary(self);
        result
    }

    fn try_play_cards(
        &mut self,
        cards: &[CardInstanceId],
        target: Option<EnemyInstanceId>,
    ) -> GameResult<PlayOutcome> {
        if self.phase != BattlePhase::PlayerTurn {
            return Err(GameError::WrongPhase);
        }
        if cards.is_empty() {
            return Err(GameError::InvalidCardState);
        }

        // 1. Every card must be in hand, once
        let mut seen = BTreeSet::new();
        let mut positions = Vec::with_capacity(cards.len());
        for id in cards {
            if !seen.insert(*id) {
                return Err(GameError::InvalidCardState);
            }
            let pos = self
                .zones
                .hand_position(*id)
                .ok_or(GameError::InvalidCardState)?;
            positions.push(pos);
        }
        let played: Vec<&Card> = positions.iter().map(|&p| &self.zones.hand[p].card).collect();

        // 2. Affordability
        let need: i32 = played
            .iter()
            .map(|c| self.effective_cost(c))
            .fold(0i32, |acc, c| acc.saturating_add(c));
        if need > self.player.resource {
            return Err(GameError::InsufficientResource {
                have: self.player.resource,
                need,
            });
        }
        check_play_budget(self.turn_log.len() as u32, played.len())
            .map_err(|reason| GameError::LimitExceeded { reason })?;

        // 3. Target
        let targeted = played.iter().any(|c| c.is_targeted());
        let target = match target {
            Some(id) => match self.enemy(id) {
                Some(enemy) if enemy.is_alive() => Some(id),
                _ => return Err(GameError::InvalidTarget),
            },
            None if targeted => Some(self.first_living_enemy().ok_or(GameError::InvalidTarget)?),
            None => None,
        };
        // Only targeted plays hit an enemy; an explicit target is ignored otherwise.
        let target_index = target
            .filter(|_| targeted)
            .and_then(|id| self.enemy_index(id));

        // 4. Score the play
        let played_ids: Vec<CardId> = played.iter().map(|c| c.id).collect();
        let distinct_this_turn = self
            .turn_log
            .iter()
            .chain(played_ids.iter())
            .collect::<BTreeSet<_>>()
            .len() as u32;
        let defender = target_index.map(|i| &self.enemies[i]);
        let ctx = PlayContext {
            attacker: &self.player.statuses,
            defender: defender.map(|e| &e.statuses),
            phase_resistance: defender
                .and_then(|e| e.active_phase())
                .map(|p| p.resistance)
                .unwrap_or(0),
            relics: &self.relics,
            config: &self.config,
            distinct_this_turn,
        };
        let outcome = calculate_play(&played, &ctx);

        // Validation is over; from here on the play happens.
        let mut events = Vec::new();
        for id in cards {
            if let Some(pos) = self.zones.hand_position(*id) {
                let instance = self.zones.hand.remove(pos);
                events.push(BattleEvent::CardPlayed {
                    instance: instance.id,
                    card_id: instance.card.id,
                    exhausted: instance.card.exhaust,
                });
                if instance.card.exhaust {
                    self.zones.exhaust.push(instance);
                } else {
                    self.zones.discard.push(instance);
                }
            }
        }
        self.player.resource -= need;
        self.turn_log.extend(played_ids);

        if let Some(index) = target_index {
            self.damage_enemy(index, outcome.breakdown.final_damage, &mut events);
        }
        for effect in &outcome.side_effects {
            self.apply_side_effect(effect, target_index, &mut events);
        }

        self.check_battle_end(&mut events);
        log::result(
            true,
            &format!("dealt {}", outcome.breakdown.final_damage),
        );

        Ok(PlayOutcome {
            breakdown: target_index.map(|_| outcome.breakdown),
            events,
        })
    }

    /// End the player's turn and resolve the enemy turn that follows.
    pub fn end_turn(&mut self) -> GameResult<Vec<BattleEvent>> {
        log::action("end_turn", &format!("turn={}", self.turn));
        if self.phase != BattlePhase::PlayerTurn {
            log::result(false, "end_turn outside player turn");
            return Err(GameError::WrongPhase);
        }

        let mut events = vec![BattleEvent::TurnEnded { turn: self.turn }];

        if self.last_ticked_turn < self.turn {
            self.tick_statuses(&mut events);
            self.last_ticked_turn = self.turn;
        }
        if self.check_battle_end(&mut events) {
            log::state_summary(self);
            return Ok(events);
        }

        self.player.resource = self.player.max_resource;
        let hand_size = self.hand_size();
        if self.zones.hand.len() < hand_size {
            let missing = (hand_size - self.zones.hand.len()) as u32;
            self.draw_cards(missing, &mut events);
        }
        self.turn_log.clear();

        self.phase = BattlePhase::EnemyTurn;
        self.enemy_cursor = 0;
        self.resolve_enemy_turn(&mut events);

        log::state_summary(self);
        Ok(events)
    }

    /// Finish an enemy turn that was interrupted (e.g. persisted mid-way).
    pub fn resume(&mut self) -> GameResult<Vec<BattleEvent>> {
        self.validate()?;
        let mut events = Vec::new();
        if self.phase == BattlePhase::EnemyTurn {
            log::info("resuming enemy turn");
            self.resolve_enemy_turn(&mut events);
        }
        Ok(events)
    }

    /// Abandon the battle. Only legal during the player's turn.
    pub fn flee(&mut self) -> GameResult<Vec<BattleEvent>> {
        log::action("flee", &format!("turn={}", self.turn));
        if self.phase != BattlePhase::PlayerTurn {
            return Err(GameError::WrongPhase);
        }
        let mut events = Vec::new();
        self.finish(BattlePhase::Aborted, &mut events);
        Ok(events)
    }

    pub fn can_end_turn(&self) -> bool {
        self.phase == BattlePhase::PlayerTurn
    }

    /// Hand cards that could be played right now.
    pub fn playable_cards(&self) -> Vec<CardInstanceId> {
        if self.phase != BattlePhase::PlayerTurn {
            return Vec::new();
        }
        self.zones
            .hand
            .iter()
            .filter(|c| self.can_afford(&c.card))
            .filter(|c| !c.card.is_targeted() || self.living_enemy_count() > 0)
            .map(|c| c.id)
            .collect()
    }

    // ==========================================
    // ENEMY TURN
    // ==========================================

    fn resolve_enemy_turn(&mut self, events: &mut Vec<BattleEvent>) {
        while (self.enemy_cursor as usize) < self.enemies.len() {
            let index = self.enemy_cursor as usize;
            if self.enemies[index].is_alive() {
                self.resolve_enemy(index, events);
                if !self.player.is_alive() {
                    self.enemy_cursor = 0;
                    self.finish(BattlePhase::Defeat, events);
                    return;
                }
            }
            self.enemy_cursor += 1;
        }
        self.enemy_cursor = 0;
        if self.check_battle_end(events) {
            return;
        }

        self.turn += 1;
        if let Err(reason) = check_turn_budget(self.turn) {
            log::warn(&format!("turn limit reached at turn {}", self.turn));
            events.push(BattleEvent::LimitExceeded { reason });
            self.finish(BattlePhase::Defeat, events);
            return;
        }

        self.phase = BattlePhase::PlayerTurn;
        for enemy in self.enemies.iter_mut().filter(|e| e.is_alive()) {
            plan_intent(enemy, &mut self.rng);
        }
        events.push(BattleEvent::TurnStarted { turn: self.turn });
    }

    fn resolve_enemy(&mut self, index: usize, events: &mut Vec<BattleEvent>) {
        let enemy_id = self.enemies[index].id;

        if let Some(transition) = check_phase_transition(&mut self.enemies[index]) {
            log::info(&format!(
                "{} enters phase {}",
                self.enemies[index].name, transition.to
            ));
            events.push(BattleEvent::PhaseChanged {
                enemy: enemy_id,
                from: transition.from,
                to: transition.to,
            });
            for effect in &transition.on_enter {
                self.apply_action_effect(index, effect, events);
            }
        }

        let action = match get_next_pattern(&mut self.enemies[index], &mut self.rng) {
            Some(action) => action.clone(),
            None => return,
        };
        events.push(BattleEvent::EnemyActed {
            enemy: enemy_id,
            action: action.name.clone(),
        });

        let damage = ((action.damage.max(0) as i64) * (self.enemies[index].damage_percent as i64)
            / PERCENT as i64)
            .min(i32::MAX as i64) as i32;
        if damage > 0 {
            for _ in 0..action.hits.clamp(1, MAX_HITS_PER_ACTION) {
                if !self.player.is_alive() {
                    break;
                }
                let hit = calculate_enemy_hit(
                    damage,
                    &self.enemies[index].statuses,
                    &self.player.statuses,
                );
                let dealt = self.player.take_damage(hit.final_damage);
                events.push(BattleEvent::PlayerDamaged {
                    source: enemy_id,
                    amount: dealt,
                    remaining_health: self.player.health,
                });
            }
        }

        for effect in &action.effects {
            self.apply_action_effect(index, effect, events);
        }
        advance_pattern(&mut self.enemies[index]);
    }

    fn apply_action_effect(&mut self, index: usize, effect: &ActionEffect, events: &mut Vec<BattleEvent>) {
        let enemy_id = self.enemies[index].id;
        match effect {
            ActionEffect::DebuffPlayer { status } => {
                self.player.statuses.apply(status);
                events.push(BattleEvent::StatusApplied {
                    target: Combatant::Player,
                    status: status.clone(),
                });
            }
            ActionEffect::BuffSelf { status } => {
                self.enemies[index].statuses.apply(status);
                events.push(BattleEvent::StatusApplied {
                    target: Combatant::Enemy(enemy_id),
                    status: status.clone(),
                });
            }
            ActionEffect::Heal { amount } => {
                let healed = self.enemies[index].heal(*amount);
                events.push(BattleEvent::Healed {
                    target: Combatant::Enemy(enemy_id),
                    amount: healed,
                });
            }
        }
    }

    // ==========================================
    // HELPERS
    // ==========================================

    fn damage_enemy(&mut self, index: usize, amount: i32, events: &mut Vec<BattleEvent>) {
        let enemy = &mut self.enemies[index];
        if !enemy.is_alive() {
            return;
        }
        let dealt = enemy.take_damage(amount);
        events.push(BattleEvent::DamageDealt {
            target: enemy.id,
            amount: dealt,
            remaining_health: enemy.health,
        });
        if !enemy.is_alive() {
            events.push(BattleEvent::EnemyDefeated { target: enemy.id });
        }
    }

    fn apply_side_effect(
        &mut self,
        effect: &SideEffect,
        target_index: Option<usize>,
        events: &mut Vec<BattleEvent>,
    ) {
        match effect {
            CardEffect::ApplyStatus { target, status } => {
                let recipients: Vec<Combatant> = match target {
                    EffectTarget::Player => vec![Combatant::Player],
                    EffectTarget::Target => target_index
                        .map(|i| &self.enemies[i])
                        .filter(|e| e.is_alive())
                        .map(|e| Combatant::Enemy(e.id))
                        .into_iter()
                        .collect(),
                    EffectTarget::AllEnemies => self
                        .enemies
                        .iter()
                        .filter(|e| e.is_alive())
                        .map(|e| Combatant::Enemy(e.id))
                        .collect(),
                };
                for recipient in recipients {
                    match recipient {
                        Combatant::Player => self.player.statuses.apply(status),
                        Combatant::Enemy(id) => {
                            if let Some(i) = self.enemy_index(id) {
                                self.enemies[i].statuses.apply(status);
                            }
                        }
                    }
                    events.push(BattleEvent::StatusApplied {
                        target: recipient,
                        status: status.clone(),
                    });
                }
            }
            CardEffect::GainResource { amount } => {
                let before = self.player.resource;
                self.player.resource = before
                    .saturating_add((*amount).max(0))
                    .min(MAX_RESOURCE);
                events.push(BattleEvent::ResourceGained {
                    amount: self.player.resource - before,
                });
            }
            CardEffect::DrawCards { count } => {
                self.draw_cards(*count as u32, events);
            }
            CardEffect::Heal { amount } => {
                let healed = self.player.heal(*amount);
                events.push(BattleEvent::Healed {
                    target: Combatant::Player,
                    amount: healed,
                });
            }
        }
    }

    /// Draw up to `count` cards, reshuffling the discard pile into an empty
    /// deck. Stops early when the hand is full or both piles are empty.
    fn draw_cards(&mut self, count: u32, events: &mut Vec<BattleEvent>) {
        let mut drawn = 0;
        for _ in 0..count {
            if self.zones.hand.len() >= MAX_HAND_SIZE {
                break;
            }
            if self.zones.deck.is_empty() {
                if self.zones.discard.is_empty() {
                    break;
                }
                let mut pile = core::mem::take(&mut self.zones.discard);
                self.rng.shuffle(&mut pile);
                events.push(BattleEvent::DeckReshuffled {
                    cards: pile.len() as u32,
                });
                self.zones.deck = pile;
            }
            if let Some(card) = self.zones.deck.pop() {
                self.zones.hand.push(card);
                drawn += 1;
            }
        }
        if drawn > 0 {
            events.push(BattleEvent::CardsDrawn { count: drawn });
        }
    }

    fn tick_statuses(&mut self, events: &mut Vec<BattleEvent>) {
        let report = self.player.statuses.tick();
        if report.dot_damage > 0 {
            self.player.take_damage(report.dot_damage);
            events.push(BattleEvent::StatusDamage {
                target: Combatant::Player,
                amount: report.dot_damage,
                remaining_health: self.player.health,
            });
        }
        for kind in report.expired {
            events.push(BattleEvent::StatusExpired {
                target: Combatant::Player,
                kind,
            });
        }

        for enemy in self.enemies.iter_mut().filter(|e| e.is_alive()) {
            let report = enemy.statuses.tick();
            if report.dot_damage > 0 {
                let dealt = enemy.take_damage(report.dot_damage);
                events.push(BattleEvent::StatusDamage {
                    target: Combatant::Enemy(enemy.id),
                    amount: dealt,
                    remaining_health: enemy.health,
                });
                if !enemy.is_alive() {
                    events.push(BattleEvent::EnemyDefeated { target: enemy.id });
                }
            }
            for kind in report.expired {
                events.push(BattleEvent::StatusExpired {
                    target: Combatant::Enemy(enemy.id),
                    kind,
                });
            }
        }
    }

    /// Move to a terminal phase if the battle is decided. Returns true when it
    /// ended.
    fn check_battle_end(&mut self, events: &mut Vec<BattleEvent>) -> bool {
        if self.phase.is_terminal() {
            return true;
        }
        if !self.player.is_alive() {
            self.finish(BattlePhase::Defeat, events);
            return true;
        }
        if self.living_enemy_count() == 0 {
            self.finish(BattlePhase::Victory, events);
            return true;
        }
        false
    }

    fn finish(&mut self, phase: BattlePhase, events: &mut Vec<BattleEvent>) {
        self.phase = phase;
        let result = self.result();
        log::info(&format!("battle ended: {result:?} on turn {}", self.turn));
        events.push(BattleEvent::BattleEnded { result });
    }
}

//! Battle session: the single long-lived owner of a battle.
//!
//! The session resolves encounters against the catalog and the run profile,
//! forwards player intents to the state machine, persists the battle after
//! every accepted transition and writes the outcome back to the run.

use alloc::vec::Vec;

use ma_battle::{
    start_battle, BattleEvent, BattleRng, BattlePhase, BattleResult, BattleState, BattleView,
    CardInstanceId, ContentCatalog, EncounterRequest, EncounterSetup, EnemyId, EnemyInstanceId,
    GameError, GameResult, PlayOutcome, XorShiftRng,
};

use crate::progression::{reward_gold, BattleRewards, ProgressionStore, RunId, RunProfile};
use crate::repository::BattleRepository;

pub struct BattleSession<P: ProgressionStore, R: BattleRepository> {
    catalog: ContentCatalog,
    progression: P,
    repository: R,
    run: RunId,
    battle: Option<BattleState>,
    /// Seeds for new battles
    seeds: XorShiftRng,
}

impl<P: ProgressionStore, R: BattleRepository> BattleSession<P, R> {
    pub fn new(catalog: ContentCatalog, progression: P, repository: R, run: RunId, seed: u64) -> Self {
        Self {
            catalog,
            progression,
            repository,
            run,
            battle: None,
            seeds: XorShiftRng::seed_from_u64(seed),
        }
    }

    pub fn run(&self) -> RunId {
        self.run
    }

    pub fn state(&self) -> Option<&BattleState> {
        self.battle.as_ref()
    }

    pub fn progression(&self) -> &P {
        &self.progression
    }

    pub fn repository(&self) -> &R {
        &self.repository
    }

    pub fn repository_mut(&mut self) -> &mut R {
        &mut self.repository
    }

    pub fn profile(&self) -> GameResult<RunProfile> {
        self.progression.load_profile(self.run)
    }

    fn next_seed(&mut self) -> u64 {
        ((self.seeds.next_u32() as u64) << 32) | self.seeds.next_u32() as u64
    }

    fn create_battle(&mut self, request: &EncounterRequest, profile: &RunProfile) -> GameResult<BattleState> {
        let seed = self.next_seed();
        let setup = EncounterSetup::build(&self.catalog, request, &profile.loadout(), seed)?;
        start_battle(setup)
    }

    /// Start an encounter for the run. Fails with `WrongPhase` while the run
    /// holds a battle that has not been concluded, in memory or in the
    /// repository, or when the run is over.
    pub fn start_battle(
        &mut self,
        enemy_id: EnemyId,
        floor: u32,
        is_elite: bool,
        is_boss: bool,
    ) -> GameResult<&BattleState> {
        if self.battle.is_some() {
            return Err(GameError::WrongPhase);
        }
        match self.repository.load(self.run) {
            Ok(None) => {}
            Ok(Some(_)) => return Err(GameError::WrongPhase),
            Err(GameError::CorruptBattleState { reason }) => {
                log::warn!(
                    target: "ma_game",
                    "run {}: discarding corrupt battle ({reason:?}) before a new encounter",
                    self.run.0
                );
                self.repository.clear(self.run);
            }
            Err(err) => return Err(err),
        }
        let mut profile = self.progression.load_profile(self.run)?;
        if !profile.is_alive() {
            return Err(GameError::WrongPhase);
        }

        let request = EncounterRequest {
            enemy_id,
            floor,
            is_elite,
            is_boss,
        };
        let state = self.create_battle(&request, &profile)?;
        log::info!(
            target: "ma_game",
            "run {}: starting encounter {} on floor {floor}",
            self.run.0,
            enemy_id.0
        );

        profile.encounter = Some(request);
        self.progression.save_profile(self.run, profile)?;
        self.repository.save(self.run, &state)?;
        Ok(&*self.battle.insert(state))
    }

    /// Pick up the persisted battle for the run. A corrupt record is
    /// discarded and the encounter restarts from scratch.
    pub fn resume_battle(&mut self) -> GameResult<Vec<BattleEvent>> {
        match self.repository.load(self.run) {
            Ok(Some(mut state)) => {
                let events = state.resume()?;
                self.repository.save(self.run, &state)?;
                self.battle = Some(state);
                Ok(events)
            }
            Ok(None) => Err(GameError::NoActiveBattle),
            Err(GameError::CorruptBattleState { reason }) => {
                log::warn!(
                    target: "ma_game",
                    "run {}: discarding corrupt battle ({reason:?}), restarting encounter",
                    self.run.0
                );
                self.repository.clear(self.run);
                let profile = self.progression.load_profile(self.run)?;
                let request = profile.encounter.clone().ok_or(GameError::NoActiveBattle)?;
                let state = self.create_battle(&request, &profile)?;
                self.repository.save(self.run, &state)?;
                self.battle = Some(state);
                Ok(Vec::new())
            }
            Err(err) => Err(err),
        }
    }

    pub fn play_card(
        &mut self,
        card: CardInstanceId,
        target: Option<EnemyInstanceId>,
    ) -> GameResult<PlayOutcome> {
        self.play_cards(&[card], target)
    }

    pub fn play_cards(
        &mut self,
        cards: &[CardInstanceId],
        target: Option<EnemyInstanceId>,
    ) -> GameResult<PlayOutcome> {
        let state = self.battle.as_mut().ok_or(GameError::NoActiveBattle)?;
        let outcome = state.play_cards(cards, target)?;
        self.repository.save(self.run, state)?;
        Ok(outcome)
    }

    pub fn end_turn(&mut self) -> GameResult<Vec<BattleEvent>> {
        let state = self.battle.as_mut().ok_or(GameError::NoActiveBattle)?;
        let events = state.end_turn()?;
        self.repository.save(self.run, state)?;
        Ok(events)
    }

    pub fn flee(&mut self) -> GameResult<Vec<BattleEvent>> {
        let state = self.battle.as_mut().ok_or(GameError::NoActiveBattle)?;
        let events = state.flee()?;
        self.repository.save(self.run, state)?;
        Ok(events)
    }

    pub fn battle_result(&self) -> GameResult<BattleResult> {
        self.battle
            .as_ref()
            .map(|b| b.result())
            .ok_or(GameError::NoActiveBattle)
    }

    pub fn view(&self) -> GameResult<BattleView> {
        self.battle
            .as_ref()
            .map(BattleView::from_state)
            .ok_or(GameError::NoActiveBattle)
    }

    /// Write a finished battle back to the run and forget it.
    pub fn conclude(&mut self) -> GameResult<BattleRewards> {
        let state = self.battle.as_ref().ok_or(GameError::NoActiveBattle)?;
        if !state.phase.is_terminal() {
            return Err(GameError::WrongPhase);
        }

        let result = state.result();
        let is_boss = state.enemies.iter().any(|e| e.is_boss);
        let is_elite = state.enemies.iter().any(|e| e.is_elite);
        let gold = match state.phase {
            BattlePhase::Victory => reward_gold(&state.config, state.floor, is_elite, is_boss),
            _ => 0,
        };

        let mut profile = self.progression.load_profile(self.run)?;
        profile.gold = profile.gold.saturating_add(gold);
        profile.health = state.player.health.clamp(0, profile.max_health);
        if result == BattleResult::Victory {
            profile.floor = state.floor.saturating_add(1);
        }
        profile.encounter = None;

        let rewards = BattleRewards {
            result,
            gold,
            health: profile.health,
            floor: profile.floor,
        };
        log::info!(
            target: "ma_game",
            "run {}: battle concluded {result:?}, +{gold} gold, floor {}",
            self.run.0,
            profile.floor
        );

        self.progression.save_profile(self.run, profile)?;
        self.repository.clear(self.run);
        self.battle = None;
        Ok(rewards)
    }
}

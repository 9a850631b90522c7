
use ma_battle::*;

use crate::progression::{MemoryProgressionStore, RunId};
use crate::repository::MemoryBattleRepository;
use crate::session::BattleSession;

// ==========================================
// HELPER FUNCTIONS (Boilerplate Reduction)
// ==========================================

const HAMMER: u32 = 1;
const PEBBLE: u32 = 2;

const SANDBAG: u32 = 1;
const BRUTE: u32 = 2;
const BOSS: u32 = 100;

const RUN: RunId = RunId(7);

type TestSession = BattleSession<MemoryProgressionStore, MemoryBattleRepository>;

/// Small catalog: one card that ends any fight, one that barely scratches,
/// an enemy that never hits back, one that kills in a single swing and a
/// harmless boss.
fn test_catalog() -> ContentCatalog {
    let cards = vec![
        Card::new(CardId(HAMMER), "Hammer", CardType::Evidence, 1).with_weight(500),
        Card::new(CardId(PEBBLE), "Pebble", CardType::Evidence, 1).with_weight(1),
    ];
    let enemies = vec![
        EnemyDef::new(
            EnemyId(SANDBAG),
            "Sandbag",
            20,
            AttackPattern::sequential(vec![EnemyAction::attack("Wait", 0)]),
        ),
        EnemyDef::new(
            EnemyId(BRUTE),
            "Brute",
            20,
            AttackPattern::sequential(vec![EnemyAction::attack("Crush", 200)]),
        ),
        EnemyDef::boss(
            EnemyId(BOSS),
            "Sophist",
            20,
            vec![PhaseDef::new(
                "Opening",
                100,
                AttackPattern::sequential(vec![EnemyAction::attack("Ponder", 0)]),
            )],
        ),
    ];
    ContentCatalog::new(cards, enemies, vec![], BalanceConfig::default())
}

fn loadout(card: u32) -> Loadout {
    Loadout {
        deck: vec![CardId(card)],
        relics: vec![],
        health: 30,
        max_health: 30,
    }
}

/// Session whose run starts with a one-card deck.
fn session_with(card: u32) -> TestSession {
    BattleSession::new(
        test_catalog(),
        MemoryProgressionStore::new(loadout(card)),
        MemoryBattleRepository::new(),
        RUN,
        99,
    )
}

/// Same stores, fresh session: what a reload looks like.
fn reopen(session: &TestSession) -> TestSession {
    BattleSession::new(
        test_catalog(),
        session.progression().clone(),
        session.repository().clone(),
        RUN,
        1234,
    )
}

fn only_card_in_hand(session: &TestSession) -> CardInstanceId {
    session.state().expect("battle is active").zones.hand[0].id
}

/// Start against the sandbag and win with the hammer.
fn win_on_floor(session: &mut TestSession, floor: u32) {
    session
        .start_battle(EnemyId(SANDBAG), floor, false, false)
        .expect("battle should start");
    let card = only_card_in_hand(session);
    session.play_card(card, None).expect("hammer should play");
    assert_eq!(session.battle_result(), Ok(BattleResult::Victory));
}

mod patterns;
mod transitions;

use crate::battle::{start_battle, EncounterSetup};
use crate::config::BalanceConfig;
use crate::damage::{calculate_play, DamageBreakdown, PlayContext};
use crate::state::BattleState;
use crate::status::Statuses;
use crate::types::*;

// ==========================================
// HELPER FUNCTIONS (Boilerplate Reduction)
// ==========================================

fn evidence(id: u32, weight: i32) -> Card {
    Card::new(CardId(id), "Evidence", CardType::Evidence, 1).with_weight(weight)
}

fn logic(id: u32, percent: u32) -> Card {
    Card::new(CardId(id), "Logic", CardType::Logic, 1).with_multiplier(percent)
}

fn framework(id: u32) -> Card {
    Card::new(CardId(id), "Framework", CardType::Framework, 1)
}

fn meta(id: u32) -> Card {
    Card::new(CardId(id), "Meta", CardType::Meta, 1)
}

fn flaw(id: u32) -> Card {
    Card::new(CardId(id), "Flaw", CardType::Flaw, 0)
}

fn score(cards: &[Card], distinct: u32) -> DamageBreakdown {
    score_with(cards, distinct, &Statuses::new(), None, &[])
}

fn score_with(
    cards: &[Card],
    distinct: u32,
    attacker: &Statuses,
    defender: Option<&Statuses>,
    relics: &[RelicDef],
) -> DamageBreakdown {
    let config = BalanceConfig::default();
    let refs: Vec<&Card> = cards.iter().collect();
    let ctx = PlayContext {
        attacker,
        defender,
        phase_resistance: 0,
        relics,
        config: &config,
        distinct_this_turn: distinct,
    };
    calculate_play(&refs, &ctx).breakdown
}

/// Enemy that never hurts anyone
fn sandbag(id: u32, health: i32) -> EnemyDef {
    EnemyDef::new(
        EnemyId(id),
        "Sandbag",
        health,
        AttackPattern::sequential(vec![EnemyAction::attack("Wait", 0)]),
    )
}

fn brute(id: u32, health: i32, damage: i32) -> EnemyDef {
    EnemyDef::new(
        EnemyId(id),
        "Brute",
        health,
        AttackPattern::sequential(vec![EnemyAction::attack("Strike", damage)]),
    )
}

fn setup(deck: Vec<Card>, enemies: Vec<EnemyDef>) -> EncounterSetup {
    EncounterSetup {
        deck,
        relics: vec![],
        enemies,
        player_health: 50,
        player_max_health: 50,
        floor: 0,
        is_elite: false,
        config: BalanceConfig::default(),
        seed: 42,
    }
}

/// Start a battle; decks of five cards or fewer start entirely in hand.
fn start(deck: Vec<Card>, enemies: Vec<EnemyDef>) -> BattleState {
    start_battle(setup(deck, enemies)).expect("battle should start")
}

fn in_hand(state: &BattleState, card: u32) -> CardInstanceId {
    state
        .zones
        .hand
        .iter()
        .find(|c| c.card.id == CardId(card))
        .map(|c| c.id)
        .expect("card should be in hand")
}

fn first_enemy(state: &BattleState) -> EnemyInstanceId {
    state.enemies[0].id
}

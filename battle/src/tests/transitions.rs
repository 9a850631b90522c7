use parity_scale_codec::Encode;

use crate::battle::{start_battle, BattleEvent, Combatant};
use crate::error::GameError;
use crate::limits::{LimitReason, MAX_PLAYS_PER_TURN, MAX_RESOURCE};
use crate::state::*;
use crate::status::{StatusEffect, StatusKind, Statuses};
use crate::tests::*;
use crate::types::*;

#[test]
fn test_start_battle() {
    let state = start(
        vec![evidence(1, 6), logic(2, 150), framework(3)],
        vec![brute(1, 30, 5)],
    );
    assert_eq!(state.phase, BattlePhase::PlayerTurn);
    assert_eq!(state.turn, 1);
    assert_eq!(state.zones.hand.len(), 3);
    assert!(state.zones.deck.is_empty());
    assert_eq!(state.player.resource, 3);
    assert_eq!(state.enemies[0].health, 30);
    assert_eq!(state.enemies[0].intent, Some(0));
    assert!(state.validate().is_ok());
}

#[test]
fn test_start_battle_draws_hand_size() {
    let deck = (1..=8).map(|i| evidence(i, 1)).collect();
    let state = start(deck, vec![sandbag(1, 20)]);
    assert_eq!(state.zones.hand.len(), 5);
    assert_eq!(state.zones.deck.len(), 3);
}

#[test]
fn test_start_battle_needs_enemies() {
    let result = start_battle(setup(vec![evidence(1, 1)], vec![]));
    assert_eq!(result, Err(GameError::UnknownEnemy));
}

#[test]
fn test_play_evidence_damages_target() {
    let mut state = start(vec![evidence(1, 6)], vec![sandbag(1, 20)]);
    let card = in_hand(&state, 1);
    let target = first_enemy(&state);

    let outcome = state.play_card(card, Some(target)).expect("play should succeed");

    let breakdown = outcome.breakdown.expect("targeted play has a breakdown");
    assert_eq!(breakdown.final_damage, 6);
    assert_eq!(state.enemies[0].health, 14);
    assert_eq!(state.player.resource, 2);
    assert!(state.zones.hand.is_empty());
    assert_eq!(state.zones.discard.len(), 1);
    assert_eq!(state.turn_log, vec![CardId(1)]);
    assert!(outcome.events.contains(&BattleEvent::DamageDealt {
        target,
        amount: 6,
        remaining_health: 14,
    }));
}

#[test]
fn test_play_defaults_to_first_living_enemy() {
    let mut state = start(vec![evidence(1, 6)], vec![sandbag(1, 20), sandbag(2, 20)]);
    let card = in_hand(&state, 1);
    state.play_card(card, None).expect("play should succeed");
    assert_eq!(state.enemies[0].health, 14);
    assert_eq!(state.enemies[1].health, 20);
}

#[test]
fn test_untargeted_play_has_no_breakdown() {
    let card = framework(3).with_effect(CardEffect::GainResource { amount: 2 });
    let mut state = start(vec![card], vec![sandbag(1, 20)]);
    let id = in_hand(&state, 3);
    let outcome = state.play_card(id, None).expect("play should succeed");
    assert!(outcome.breakdown.is_none());
    assert_eq!(state.player.resource, 4);
}

#[test]
fn test_explicit_target_on_untargeted_play_is_ignored() {
    let card = framework(3).with_effect(CardEffect::ApplyStatus {
        target: EffectTarget::Player,
        status: StatusEffect::new(StatusKind::Amplify, 1, 2),
    });
    let mut state = start(vec![card], vec![sandbag(1, 20)]);
    let enemy = first_enemy(&state);
    let id = in_hand(&state, 3);

    let outcome = state.play_card(id, Some(enemy)).expect("play should succeed");

    assert!(outcome.breakdown.is_none());
    assert!(!outcome
        .events
        .iter()
        .any(|e| matches!(e, BattleEvent::DamageDealt { .. })));
    assert!(outcome.events.contains(&BattleEvent::StatusApplied {
        target: Combatant::Player,
        status: StatusEffect::new(StatusKind::Amplify, 1, 2),
    }));
    assert_eq!(state.enemies[0].health, 20);
}

#[test]
fn test_card_not_in_hand_leaves_state_unchanged() {
    let mut state = start(vec![evidence(1, 6)], vec![sandbag(1, 20)]);
    let before = state.encode();

    let result = state.play_card(CardInstanceId(999), None);

    assert_eq!(result, Err(GameError::InvalidCardState));
    assert_eq!(state.encode(), before);
}

#[test]
fn test_insufficient_resource() {
    let expensive = Card::new(CardId(9), "Treatise", CardType::Evidence, 5).with_weight(20);
    let mut state = start(vec![expensive], vec![sandbag(1, 50)]);
    let before = state.encode();

    let result = state.play_card(in_hand(&state, 9), None);

    assert_eq!(result, Err(GameError::InsufficientResource { have: 3, need: 5 }));
    assert_eq!(state.encode(), before);
}

#[test]
fn test_multi_card_cost_is_summed() {
    let deck = (1..=4).map(|i| evidence(i, 1)).collect();
    let mut state = start(deck, vec![sandbag(1, 50)]);
    let ids: Vec<CardInstanceId> = state.zones.hand.iter().map(|c| c.id).collect();

    let result = state.play_cards(&ids, None);

    assert_eq!(result, Err(GameError::InsufficientResource { have: 3, need: 4 }));
    assert_eq!(state.zones.hand.len(), 4);
}

#[test]
fn test_same_card_twice_in_one_play() {
    let mut state = start(vec![evidence(1, 2)], vec![sandbag(1, 20)]);
    let id = in_hand(&state, 1);
    assert_eq!(state.play_cards(&[id, id], None), Err(GameError::InvalidCardState));
    assert_eq!(state.play_cards(&[], None), Err(GameError::InvalidCardState));
}

#[test]
fn test_invalid_target() {
    let mut state = start(vec![evidence(1, 6)], vec![sandbag(1, 20)]);
    let before = state.encode();
    let result = state.play_card(in_hand(&state, 1), Some(EnemyInstanceId(99)));
    assert_eq!(result, Err(GameError::InvalidTarget));
    assert_eq!(state.encode(), before);
}

#[test]
fn test_defeated_enemy_is_not_a_target() {
    let mut state = start(
        vec![evidence(1, 6), evidence(2, 6)],
        vec![sandbag(1, 5), sandbag(2, 20)],
    );
    let target = first_enemy(&state);
    state
        .play_card(in_hand(&state, 1), Some(target))
        .expect("first play should succeed");
    assert!(!state.enemies[0].is_alive());
    assert_eq!(state.phase, BattlePhase::PlayerTurn);

    let result = state.play_card(in_hand(&state, 2), Some(target));
    assert_eq!(result, Err(GameError::InvalidTarget));

    // Without a target the next living enemy is hit
    state
        .play_card(in_hand(&state, 2), None)
        .expect("default target should be the living enemy");
    assert_eq!(state.enemies[1].health, 14);
}

#[test]
fn test_victory() {
    let mut state = start(vec![evidence(1, 6), evidence(2, 1)], vec![sandbag(1, 5)]);
    let outcome = state
        .play_card(in_hand(&state, 1), None)
        .expect("play should succeed");

    assert_eq!(state.phase, BattlePhase::Victory);
    assert_eq!(state.result(), BattleResult::Victory);
    assert!(outcome.events.contains(&BattleEvent::EnemyDefeated {
        target: first_enemy(&state)
    }));
    assert!(outcome.events.contains(&BattleEvent::BattleEnded {
        result: BattleResult::Victory
    }));

    // Terminal phases accept nothing
    assert_eq!(
        state.play_card(in_hand(&state, 2), None),
        Err(GameError::WrongPhase)
    );
    assert_eq!(state.end_turn(), Err(GameError::WrongPhase));
    assert_eq!(state.flee(), Err(GameError::WrongPhase));
}

#[test]
fn test_exhausting_card() {
    let mut state = start(vec![evidence(1, 3).exhausting()], vec![sandbag(1, 20)]);
    state
        .play_card(in_hand(&state, 1), None)
        .expect("play should succeed");
    assert_eq!(state.zones.exhaust.len(), 1);
    assert!(state.zones.discard.is_empty());
}

#[test]
fn test_flee() {
    let mut state = start(vec![evidence(1, 3)], vec![sandbag(1, 20)]);
    let events = state.flee().expect("flee in player turn");
    assert_eq!(state.phase, BattlePhase::Aborted);
    assert_eq!(state.result(), BattleResult::Aborted);
    assert_eq!(
        events,
        vec![BattleEvent::BattleEnded {
            result: BattleResult::Aborted
        }]
    );
    assert_eq!(state.flee(), Err(GameError::WrongPhase));
}

#[test]
fn test_draw_effect() {
    let scholar = meta(6).with_effect(CardEffect::DrawCards { count: 2 });
    let deck = (0..7).map(|_| scholar.clone()).collect();
    let mut state = start(deck, vec![sandbag(1, 20)]);
    let id = state.zones.hand[0].id;

    state.play_card(id, None).expect("play should succeed");

    assert_eq!(state.zones.hand.len(), 6);
    assert!(state.zones.deck.is_empty());
    assert_eq!(state.zones.len(), 7);
}

#[test]
fn test_resource_gain_is_capped() {
    let card = framework(3).with_effect(CardEffect::GainResource { amount: 100 });
    let mut state = start(vec![card], vec![sandbag(1, 20)]);
    state
        .play_card(in_hand(&state, 3), None)
        .expect("play should succeed");
    assert_eq!(state.player.resource, MAX_RESOURCE);
}

#[test]
fn test_heal_effect() {
    let card = framework(3).with_effect(CardEffect::Heal { amount: 100 });
    let mut state = start(vec![card], vec![sandbag(1, 20)]);
    state.player.health = 30;
    let outcome = state
        .play_card(in_hand(&state, 3), None)
        .expect("play should succeed");
    assert_eq!(state.player.health, 50);
    assert!(outcome.events.contains(&BattleEvent::Healed {
        target: Combatant::Player,
        amount: 20
    }));
}

#[test]
fn test_status_on_all_enemies() {
    let smear = framework(3).with_effect(CardEffect::ApplyStatus {
        target: EffectTarget::AllEnemies,
        status: StatusEffect::new(StatusKind::DamageOverTime, 2, 2),
    });
    let mut state = start(vec![smear], vec![sandbag(1, 20), sandbag(2, 20)]);
    state
        .play_card(in_hand(&state, 3), None)
        .expect("play should succeed");
    for enemy in &state.enemies {
        assert_eq!(enemy.statuses.magnitude(StatusKind::DamageOverTime), 2);
    }
    assert_eq!(state.player.statuses.magnitude(StatusKind::DamageOverTime), 0);
}

#[test]
fn test_targeted_status() {
    let doubt = meta(4).with_effect(CardEffect::ApplyStatus {
        target: EffectTarget::Target,
        status: StatusEffect::new(StatusKind::Resistance, -2, 2),
    });
    let mut state = start(vec![doubt], vec![sandbag(1, 20), sandbag(2, 20)]);
    let second = state.enemies[1].id;
    state
        .play_card(in_hand(&state, 4), Some(second))
        .expect("play should succeed");
    assert_eq!(state.enemies[0].statuses.magnitude(StatusKind::Resistance), 0);
    assert_eq!(state.enemies[1].statuses.magnitude(StatusKind::Resistance), -2);
}

#[test]
fn test_plays_per_turn_limit() {
    let mut state = start(vec![evidence(1, 1)], vec![sandbag(1, 20)]);
    state.turn_log = vec![CardId(50); MAX_PLAYS_PER_TURN as usize];
    let result = state.play_card(in_hand(&state, 1), None);
    assert_eq!(
        result,
        Err(GameError::LimitExceeded {
            reason: LimitReason::PlaysPerTurn
        })
    );
}

#[test]
fn test_cost_modifier() {
    let mut state = start(vec![evidence(1, 2), evidence(2, 2)], vec![sandbag(1, 50)]);
    state
        .player
        .statuses
        .apply(&StatusEffect::new(StatusKind::CostModifier, -5, 1));
    state
        .play_card(in_hand(&state, 1), None)
        .expect("free play should succeed");
    assert_eq!(state.player.resource, 3);

    state.player.statuses = Statuses::new();
    state
        .player
        .statuses
        .apply(&StatusEffect::new(StatusKind::CostModifier, 1, 1));
    state
        .play_card(in_hand(&state, 2), None)
        .expect("play should succeed");
    assert_eq!(state.player.resource, 1);
}

use alloc::collections::BTreeSet;

use ma_battle::config::PERCENT;
use ma_battle::damage::{calculate_play, PlayContext};
use ma_battle::status::Statuses;
use ma_battle::*;

use crate::*;

#[test]
fn test_ids_are_unique() {
    let catalog = catalog();
    assert_eq!(catalog.cards().count(), get_all_cards().len());
    assert_eq!(catalog.enemies().count(), get_all_enemies().len());
    assert_eq!(catalog.relics().count(), get_all_relics().len());
}

#[test]
fn test_cards_carry_their_numbers() {
    for card in get_all_cards() {
        match card.kind {
            CardType::Evidence => assert!(card.weight.is_some(), "{} has no weight", card.name),
            CardType::Logic => {
                let multiplier = card.multiplier.expect("logic cards have a multiplier");
                assert!(multiplier >= PERCENT, "{} shrinks damage", card.name);
            }
            CardType::Framework | CardType::Meta | CardType::Flaw => {}
        }
        assert!(card.cost >= 0);
    }
}

#[test]
fn test_multiplier_factors_become_percents() {
    let catalog = catalog();
    let deduction = catalog.card(CardId(10)).expect("Deduction exists");
    assert_eq!(deduction.multiplier, Some(150));
}

#[test]
fn test_enemy_phases_are_well_formed() {
    let catalog = catalog();
    for enemy in get_all_enemies() {
        assert!(!enemy.phases.is_empty(), "{} has no phases", enemy.name);
        assert_eq!(enemy.phases[0].threshold_percent, 100);
        for phase in &enemy.phases {
            assert!(!phase.pattern.entries.is_empty(), "{} has an empty pattern", enemy.name);
        }
        for pair in enemy.phases.windows(2) {
            assert!(pair[0].threshold_percent > pair[1].threshold_percent);
        }
        if !enemy.is_boss {
            assert_eq!(enemy.phases.len(), 1, "{} is not a boss", enemy.name);
        }
        for companion in &enemy.companions {
            assert!(catalog.enemy(*companion).is_ok());
        }
    }
    assert!(catalog.bosses().count() >= 1);
}

#[test]
fn test_no_relic_lifts_the_multiplier_ceiling() {
    let catalog = catalog();
    let config = get_balance();
    let anecdote = catalog.card(CardId(1)).unwrap().clone();
    let syllogism = catalog.card(CardId(11)).unwrap().clone();
    let play = [&anecdote, &syllogism, &syllogism, &syllogism];
    let statuses = Statuses::new();

    for relic in get_all_relics() {
        let relics = [relic];
        let ctx = PlayContext {
            attacker: &statuses,
            defender: None,
            phase_resistance: 0,
            relics: &relics,
            config: &config,
            distinct_this_turn: 2,
        };
        let breakdown = calculate_play(&play, &ctx).breakdown;
        assert!(
            breakdown.multiplier <= config.multiplier_ceiling,
            "{} lifts the multiplier to {}",
            relics[0].name,
            breakdown.multiplier
        );
    }
}

#[test]
fn test_balance_matches_defaults() {
    assert_eq!(get_balance(), BalanceConfig::default());
}

#[test]
fn test_starter_loadout_resolves() {
    let catalog = catalog();
    let loadout = get_starter_loadout();
    let cards: BTreeSet<CardId> = catalog.cards().map(|c| c.id).collect();
    assert!(loadout.deck.iter().all(|id| cards.contains(id)));
    assert!(loadout.relics.iter().all(|id| catalog.relic(*id).is_ok()));
    assert_eq!(loadout.health, loadout.max_health);
}

#[test]
fn test_every_encounter_starts() {
    let catalog = catalog();
    let loadout = get_starter_loadout();
    for enemy in catalog.enemies() {
        let request = EncounterRequest {
            enemy_id: enemy.id,
            floor: 3,
            is_elite: false,
            is_boss: enemy.is_boss,
        };
        let setup = EncounterSetup::build(&catalog, &request, &loadout, 7)
            .expect("encounter should resolve");
        let state = start_battle(setup).expect("battle should start");
        assert_eq!(state.enemies.len(), 1 + enemy.companions.len());
        assert!(state.validate().is_ok());
    }
}

#[test]
fn test_boss_flag_must_match() {
    let catalog = catalog();
    let boss = catalog.bosses().next().expect("a boss exists").id;
    let request = EncounterRequest {
        enemy_id: boss,
        floor: 1,
        is_elite: false,
        is_boss: false,
    };
    let result = EncounterSetup::build(&catalog, &request, &get_starter_loadout(), 1);
    assert_eq!(result, Err(GameError::UnknownEnemy));
}

#[test]
fn test_starter_battle_runs_to_completion() {
    let catalog = catalog();
    let request = EncounterRequest {
        enemy_id: EnemyId(1),
        floor: 1,
        is_elite: false,
        is_boss: false,
    };
    let setup = EncounterSetup::build(&catalog, &request, &get_starter_loadout(), 2024)
        .expect("encounter should resolve");
    let mut state = start_battle(setup).expect("battle should start");

    for _ in 0..300 {
        if state.phase.is_terminal() {
            break;
        }
        while let Some(card) = state.playable_cards().first().copied() {
            state.play_card(card, None).expect("playable card should play");
            if state.phase.is_terminal() {
                break;
            }
        }
        if !state.phase.is_terminal() {
            state.end_turn().expect("end turn");
        }
        assert!(state.validate().is_ok());
    }
    assert_ne!(state.result(), BattleResult::InProgress);
}

use alloc::string::String;

use crate::battle::BattleEvent;
use crate::pattern::{advance_pattern, check_phase_transition, get_next_pattern};
use crate::rng::XorShiftRng;
use crate::state::*;
use crate::status::{StatusEffect, StatusKind};
use crate::tests::*;
use crate::types::*;

fn attack(name: &str) -> EnemyAction {
    EnemyAction::attack(name, 1)
}

fn enemy_with(pattern: AttackPattern) -> EnemyState {
    let def = EnemyDef::new(EnemyId(1), "Subject", 40, pattern);
    let mut state = start(vec![evidence(1, 1)], vec![def]);
    let mut enemy = state.enemies.remove(0);
    enemy.intent = None;
    enemy
}

fn run(enemy: &mut EnemyState, rng: &mut XorShiftRng, actions: usize) -> Vec<String> {
    (0..actions)
        .map(|_| {
            let name = get_next_pattern(enemy, rng)
                .map(|a| a.name.clone())
                .expect("pattern should yield an action");
            advance_pattern(enemy);
            name
        })
        .collect()
}

fn lecturer() -> EnemyDef {
    EnemyDef::boss(
        EnemyId(10),
        "Lecturer",
        100,
        vec![
            PhaseDef::new(
                "Opening",
                100,
                AttackPattern::sequential(vec![EnemyAction::attack("Jab", 1)]),
            ),
            PhaseDef::new(
                "Rebuttal",
                50,
                AttackPattern::sequential(vec![EnemyAction::attack("Smash", 9)]),
            )
            .with_on_enter(ActionEffect::BuffSelf {
                status: StatusEffect::new(StatusKind::Resistance, 2, 3),
            }),
        ],
    )
}

fn three_phase_boss() -> EnemyDef {
    EnemyDef::boss(
        EnemyId(11),
        "Dean",
        100,
        vec![
            PhaseDef::new("One", 100, AttackPattern::sequential(vec![attack("A")])),
            PhaseDef::new("Two", 60, AttackPattern::sequential(vec![attack("B")])).with_on_enter(
                ActionEffect::BuffSelf {
                    status: StatusEffect::new(StatusKind::Amplify, 1, 5),
                },
            ),
            PhaseDef::new("Three", 30, AttackPattern::sequential(vec![attack("C")])).with_on_enter(
                ActionEffect::BuffSelf {
                    status: StatusEffect::new(StatusKind::Resistance, 4, 5),
                },
            ),
        ],
    )
}

#[test]
fn test_sequential_pattern_cycles() {
    let mut enemy = enemy_with(AttackPattern::sequential(vec![
        attack("A"),
        attack("B"),
        attack("C"),
    ]));
    let mut rng = XorShiftRng::seed_from_u64(1);
    assert_eq!(run(&mut enemy, &mut rng, 4), vec!["A", "B", "C", "A"]);
}

#[test]
fn test_get_next_pattern_is_idempotent() {
    let mut enemy = enemy_with(AttackPattern::weighted(vec![
        PatternEntry::weighted(attack("A"), 1, None),
        PatternEntry::weighted(attack("B"), 1, None),
        PatternEntry::weighted(attack("C"), 1, None),
    ]));
    let mut rng = XorShiftRng::seed_from_u64(7);

    let first = get_next_pattern(&mut enemy, &mut rng).cloned();
    let rng_after_first = rng.clone();
    let second = get_next_pattern(&mut enemy, &mut rng).cloned();

    assert!(first.is_some());
    assert_eq!(first, second);
    assert_eq!(rng, rng_after_first);
}

#[test]
fn test_weighted_pattern_is_deterministic() {
    let pattern = AttackPattern::weighted(vec![
        PatternEntry::weighted(attack("A"), 3, None),
        PatternEntry::weighted(attack("B"), 2, None),
        PatternEntry::weighted(attack("C"), 1, None),
    ]);
    let mut first = enemy_with(pattern.clone());
    let mut second = enemy_with(pattern);
    let mut rng_a = XorShiftRng::seed_from_u64(99);
    let mut rng_b = XorShiftRng::seed_from_u64(99);

    let a = run(&mut first, &mut rng_a, 30);
    let b = run(&mut second, &mut rng_b, 30);
    assert_eq!(a, b);
    assert!(a.iter().any(|n| n == "A"));
}

#[test]
fn test_max_streak_blocks_repeats() {
    let mut enemy = enemy_with(AttackPattern::weighted(vec![
        PatternEntry::weighted(attack("A"), 100, Some(1)),
        PatternEntry::weighted(attack("B"), 1, None),
    ]));
    let mut rng = XorShiftRng::seed_from_u64(3);
    let names = run(&mut enemy, &mut rng, 60);
    for pair in names.windows(2) {
        assert!(!(pair[0] == "A" && pair[1] == "A"), "A repeated: {names:?}");
    }
}

#[test]
fn test_max_streak_allows_up_to_limit() {
    let mut enemy = enemy_with(AttackPattern::weighted(vec![
        PatternEntry::weighted(attack("A"), 100, Some(2)),
        PatternEntry::weighted(attack("B"), 1, None),
    ]));
    let mut rng = XorShiftRng::seed_from_u64(5);
    let names = run(&mut enemy, &mut rng, 60);
    for triple in names.windows(3) {
        assert!(!triple.iter().all(|n| n == "A"), "A three times: {names:?}");
    }
    assert!(names.windows(2).any(|p| p[0] == "A" && p[1] == "A"));
}

#[test]
fn test_zero_weights_still_act() {
    let mut enemy = enemy_with(AttackPattern::weighted(vec![
        PatternEntry::weighted(attack("A"), 0, None),
        PatternEntry::weighted(attack("B"), 0, None),
    ]));
    let mut rng = XorShiftRng::seed_from_u64(11);
    assert_eq!(run(&mut enemy, &mut rng, 5).len(), 5);
}

#[test]
fn test_phase_transition_at_threshold() {
    let mut state = start(vec![evidence(1, 1)], vec![lecturer()]);
    let boss = &mut state.enemies[0];

    boss.health = 51;
    assert!(check_phase_transition(boss).is_none());

    boss.health = 50;
    let transition = check_phase_transition(boss).expect("threshold reached");
    assert_eq!((transition.from, transition.to), (0, 1));
    assert_eq!(transition.on_enter.len(), 1);
    assert_eq!(boss.phase_index, 1);
    assert_eq!(boss.cursor, 0);
    assert_eq!(boss.intent, None);

    // Healing does not undo a phase
    boss.health = 100;
    assert!(check_phase_transition(boss).is_none());
    assert_eq!(boss.phase_index, 1);
}

#[test]
fn test_skipped_phase_effects_are_not_applied() {
    let mut state = start(vec![evidence(1, 1)], vec![three_phase_boss()]);
    let boss = &mut state.enemies[0];
    boss.health = 20;

    let transition = check_phase_transition(boss).expect("threshold reached");
    assert_eq!((transition.from, transition.to), (0, 2));
    assert_eq!(
        transition.on_enter,
        vec![ActionEffect::BuffSelf {
            status: StatusEffect::new(StatusKind::Resistance, 4, 5),
        }]
    );
}

#[test]
fn test_boss_acts_from_new_phase() {
    let mut state = start(vec![evidence(1, 50)], vec![lecturer()]);
    let boss = first_enemy(&state);
    state
        .play_card(in_hand(&state, 1), Some(boss))
        .expect("play should succeed");
    assert_eq!(state.enemies[0].health, 50);

    let events = state.end_turn().expect("end turn");

    assert!(events.contains(&BattleEvent::PhaseChanged {
        enemy: boss,
        from: 0,
        to: 1
    }));
    assert!(events.contains(&BattleEvent::EnemyActed {
        enemy: boss,
        action: "Smash".into()
    }));
    assert_eq!(state.player.health, 41);
    assert_eq!(state.enemies[0].statuses.magnitude(StatusKind::Resistance), 2);
    assert_eq!(state.enemies[0].phase_index, 1);
    assert_eq!(state.phase, BattlePhase::PlayerTurn);
}

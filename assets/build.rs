//! Build script: reads the JSON tables under data/ and generates Rust source
//! that statically constructs every card, enemy, boss and relic plus the
//! balance table. The crate embeds its content without any runtime JSON
//! parsing, keeping it fully no_std compatible.

use serde::Deserialize;
use std::collections::BTreeSet;
use std::env;
use std::fs;
use std::path::Path;

// ── JSON schema types (build-time only) ──────────────────────────────────────

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct JsonCard {
    id: u32,
    name: String,
    kind: String,
    cost: i32,
    weight: Option<i32>,
    /// Written as a factor (1.5), stored as a percent (150)
    multiplier: Option<f64>,
    #[serde(default)]
    upgraded: bool,
    #[serde(default)]
    exhaust: bool,
    #[serde(default)]
    description: String,
    #[serde(default)]
    effects: Vec<JsonEffect>,
}

#[derive(Deserialize)]
struct JsonStatus {
    kind: String,
    magnitude: i32,
    duration: u32,
}

/// Card, enemy action and phase effects share one shape
#[derive(Deserialize)]
struct JsonEffect {
    #[serde(rename = "type")]
    effect_type: String,
    // applyStatus
    target: Option<String>,
    // applyStatus, buffSelf, debuffPlayer
    status: Option<JsonStatus>,
    // gainResource, heal
    amount: Option<i32>,
    // drawCards
    count: Option<u8>,
}

fn one_hit() -> u8 {
    1
}

fn unit_weight() -> u32 {
    1
}

#[derive(Deserialize)]
struct JsonAction {
    name: String,
    #[serde(default)]
    damage: i32,
    #[serde(default = "one_hit")]
    hits: u8,
    #[serde(default)]
    effects: Vec<JsonEffect>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct JsonEntry {
    action: JsonAction,
    #[serde(default = "unit_weight")]
    weight: u32,
    max_streak: Option<u8>,
}

#[derive(Deserialize)]
struct JsonPattern {
    mode: String,
    entries: Vec<JsonEntry>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct JsonPhase {
    name: String,
    threshold_percent: u8,
    #[serde(default)]
    resistance: i32,
    pattern: JsonPattern,
    #[serde(default)]
    on_enter: Vec<JsonEffect>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct JsonEnemy {
    id: u32,
    name: String,
    max_health: i32,
    #[serde(default)]
    is_boss: bool,
    #[serde(default)]
    companions: Vec<u32>,
    /// Shorthand for a single-phase enemy
    pattern: Option<JsonPattern>,
    #[serde(default)]
    phases: Vec<JsonPhase>,
}

#[derive(Deserialize)]
struct JsonRelicEffect {
    #[serde(rename = "type")]
    effect_type: String,
    amount: Option<i32>,
    percent: Option<u32>,
    delta: Option<i32>,
    status: Option<JsonStatus>,
}

#[derive(Deserialize)]
struct JsonRelic {
    id: u32,
    name: String,
    #[serde(default)]
    description: String,
    effect: JsonRelicEffect,
}

#[derive(Deserialize)]
struct JsonStarter {
    deck: Vec<u32>,
    relics: Vec<u32>,
    health: i32,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct JsonBalance {
    multiplier_ceiling: f64,
    chain_step: f64,
    chain_cap_cards: u32,
    unified_bonus: i32,
    paired_bonus: i32,
    pairings: Vec<[String; 2]>,
    contradiction_factor: f64,
    contradiction_flat: i32,
    max_resource: i32,
    hand_size: u8,
    health_per_floor_percent: u32,
    damage_per_floor_percent: u32,
    elite_health: f64,
    elite_damage: f64,
    reward_gold_base: u32,
    reward_gold_per_floor: u32,
    starter: JsonStarter,
}

// ── Code generation helpers ──────────────────────────────────────────────────

/// JSON names are camelCase, Rust variants are PascalCase.
fn variant(name: &str) -> String {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => panic!("Empty variant name"),
    }
}

fn percent(factor: f64) -> u32 {
    (factor * 100.0).round() as u32
}

fn gen_option<T: std::fmt::Display>(value: Option<T>) -> String {
    match value {
        Some(v) => format!("Some({v})"),
        None => "None".to_string(),
    }
}

fn gen_status(status: &JsonStatus) -> String {
    format!(
        "StatusEffect {{ kind: StatusKind::{}, magnitude: {}, duration: {} }}",
        variant(&status.kind),
        status.magnitude,
        status.duration
    )
}

fn required_status(effect: &JsonEffect) -> String {
    gen_status(
        effect
            .status
            .as_ref()
            .unwrap_or_else(|| panic!("{} needs a status", effect.effect_type)),
    )
}

fn gen_card_effect(effect: &JsonEffect) -> String {
    match effect.effect_type.as_str() {
        "applyStatus" => {
            let target = effect.target.as_deref().expect("applyStatus needs a target");
            format!(
                "CardEffect::ApplyStatus {{ target: EffectTarget::{}, status: {} }}",
                variant(target),
                required_status(effect)
            )
        }
        "gainResource" => {
            let amount = effect.amount.expect("gainResource needs an amount");
            format!("CardEffect::GainResource {{ amount: {amount} }}")
        }
        "drawCards" => {
            let count = effect.count.expect("drawCards needs a count");
            format!("CardEffect::DrawCards {{ count: {count} }}")
        }
        "heal" => {
            let amount = effect.amount.expect("heal needs an amount");
            format!("CardEffect::Heal {{ amount: {amount} }}")
        }
        other => panic!("Unknown card effect: {other}"),
    }
}

fn gen_action_effect(effect: &JsonEffect) -> String {
    match effect.effect_type.as_str() {
        "debuffPlayer" => format!(
            "ActionEffect::DebuffPlayer {{ status: {} }}",
            required_status(effect)
        ),
        "buffSelf" => format!(
            "ActionEffect::BuffSelf {{ status: {} }}",
            required_status(effect)
        ),
        "heal" => {
            let amount = effect.amount.expect("heal needs an amount");
            format!("ActionEffect::Heal {{ amount: {amount} }}")
        }
        other => panic!("Unknown enemy effect: {other}"),
    }
}

fn gen_list<T>(items: &[T], gen: impl Fn(&T) -> String) -> String {
    if items.is_empty() {
        return "vec![]".to_string();
    }
    let parts: Vec<String> = items.iter().map(gen).collect();
    format!("vec![{}]", parts.join(", "))
}

fn gen_card(card: &JsonCard) -> String {
    format!(
        r#"        Card {{
            id: CardId({id}),
            name: String::from({name:?}),
            kind: CardType::{kind},
            cost: {cost},
            weight: {weight},
            multiplier: {multiplier},
            upgraded: {upgraded},
            exhaust: {exhaust},
            description: String::from({description:?}),
            effects: {effects},
        }}"#,
        id = card.id,
        name = card.name,
        kind = variant(&card.kind),
        cost = card.cost,
        weight = gen_option(card.weight),
        multiplier = gen_option(card.multiplier.map(percent)),
        upgraded = card.upgraded,
        exhaust = card.exhaust,
        description = card.description,
        effects = gen_list(&card.effects, gen_card_effect),
    )
}

fn gen_action(action: &JsonAction) -> String {
    format!(
        "EnemyAction {{ name: String::from({:?}), damage: {}, hits: {}, effects: {} }}",
        action.name,
        action.damage,
        action.hits,
        gen_list(&action.effects, gen_action_effect)
    )
}

fn gen_pattern(pattern: &JsonPattern) -> String {
    if pattern.entries.is_empty() {
        panic!("Attack patterns need at least one entry");
    }
    let entries = gen_list(&pattern.entries, |e| {
        format!(
            "PatternEntry {{ action: {}, weight: {}, max_streak: {} }}",
            gen_action(&e.action),
            e.weight,
            gen_option(e.max_streak)
        )
    });
    format!(
        "AttackPattern {{ mode: PatternMode::{}, entries: {entries} }}",
        variant(&pattern.mode)
    )
}

fn gen_phase(name: &str, threshold: u8, resistance: i32, pattern: &JsonPattern, on_enter: &[JsonEffect]) -> String {
    format!(
        "PhaseDef {{ name: String::from({name:?}), threshold_percent: {threshold}, resistance: {resistance}, pattern: {}, on_enter: {} }}",
        gen_pattern(pattern),
        gen_list(on_enter, gen_action_effect)
    )
}

fn gen_enemy(enemy: &JsonEnemy) -> String {
    let phases: Vec<String> = match (&enemy.pattern, enemy.phases.is_empty()) {
        (Some(pattern), true) => vec![gen_phase("default", 100, 0, pattern, &[])],
        (None, false) => enemy
            .phases
            .iter()
            .map(|p| gen_phase(&p.name, p.threshold_percent, p.resistance, &p.pattern, &p.on_enter))
            .collect(),
        _ => panic!("{} needs either a pattern or phases", enemy.name),
    };
    let companions = gen_list(&enemy.companions, |id| format!("EnemyId({id})"));
    format!(
        r#"        EnemyDef {{
            id: EnemyId({id}),
            name: String::from({name:?}),
            max_health: {max_health},
            is_boss: {is_boss},
            phases: vec![
                {phases}
            ],
            companions: {companions},
        }}"#,
        id = enemy.id,
        name = enemy.name,
        max_health = enemy.max_health,
        is_boss = enemy.is_boss,
        phases = phases.join(",\n                "),
    )
}

fn gen_relic(relic: &JsonRelic) -> String {
    let e = &relic.effect;
    let need = |field: &str| -> String { format!("{} needs {field}", e.effect_type) };
    let effect = match e.effect_type.as_str() {
        "evidenceWeightBonus" => format!(
            "RelicEffect::EvidenceWeightBonus {{ amount: {} }}",
            e.amount.unwrap_or_else(|| panic!("{}", need("amount")))
        ),
        "chainBonusPerEvidence" => format!(
            "RelicEffect::ChainBonusPerEvidence {{ percent: {} }}",
            e.percent.unwrap_or_else(|| panic!("{}", need("percent")))
        ),
        "multiplierCeilingDelta" => format!(
            "RelicEffect::MultiplierCeilingDelta {{ delta: {} }}",
            e.delta.unwrap_or_else(|| panic!("{}", need("delta")))
        ),
        "coherenceBonus" => format!(
            "RelicEffect::CoherenceBonus {{ amount: {} }}",
            e.amount.unwrap_or_else(|| panic!("{}", need("amount")))
        ),
        "maxResourceBonus" => format!(
            "RelicEffect::MaxResourceBonus {{ amount: {} }}",
            e.amount.unwrap_or_else(|| panic!("{}", need("amount")))
        ),
        "handSizeBonus" => format!(
            "RelicEffect::HandSizeBonus {{ amount: {} }}",
            e.amount.unwrap_or_else(|| panic!("{}", need("amount")))
        ),
        "startingStatus" => format!(
            "RelicEffect::StartingStatus {{ status: {} }}",
            gen_status(e.status.as_ref().unwrap_or_else(|| panic!("{}", need("status"))))
        ),
        other => panic!("Unknown relic effect: {other}"),
    };
    format!(
        "        RelicDef {{ id: RelicId({}), name: String::from({:?}), description: String::from({:?}), effect: {effect} }}",
        relic.id, relic.name, relic.description
    )
}

fn gen_balance(balance: &JsonBalance) -> String {
    let pairings = gen_list(&balance.pairings, |[a, b]| {
        format!(
            "TypePair::new(CardType::{}, CardType::{})",
            variant(a),
            variant(b)
        )
    });
    format!(
        r#"    BalanceConfig {{
        multiplier_ceiling: {},
        chain_step_percent: {},
        chain_cap_cards: {},
        unified_bonus: {},
        paired_bonus: {},
        pairings: {pairings},
        contradiction_percent: {},
        contradiction_flat: {},
        max_resource: {},
        hand_size: {},
        health_per_floor_percent: {},
        damage_per_floor_percent: {},
        elite_health_percent: {},
        elite_damage_percent: {},
        reward_gold_base: {},
        reward_gold_per_floor: {},
    }}"#,
        percent(balance.multiplier_ceiling),
        percent(balance.chain_step),
        balance.chain_cap_cards,
        balance.unified_bonus,
        balance.paired_bonus,
        percent(balance.contradiction_factor),
        balance.contradiction_flat,
        balance.max_resource,
        balance.hand_size,
        balance.health_per_floor_percent,
        balance.damage_per_floor_percent,
        percent(balance.elite_health),
        percent(balance.elite_damage),
        balance.reward_gold_base,
        balance.reward_gold_per_floor,
    )
}

fn check_unique(table: &str, ids: impl Iterator<Item = u32>) {
    let mut seen = BTreeSet::new();
    for id in ids {
        if !seen.insert(id) {
            panic!("Duplicate id {id} in {table}");
        }
    }
}

fn read_json<T: for<'de> Deserialize<'de>>(path: &Path) -> T {
    println!("cargo:rerun-if-changed={}", path.display());
    let text = fs::read_to_string(path)
        .unwrap_or_else(|e| panic!("Failed to read {}: {e}", path.display()));
    serde_json::from_str(&text).unwrap_or_else(|e| panic!("Failed to parse {}: {e}", path.display()))
}

// ── Main ─────────────────────────────────────────────────────────────────────

fn main() {
    let manifest_dir = env::var("CARGO_MANIFEST_DIR").unwrap();
    let data = Path::new(&manifest_dir).join("data");

    let cards: Vec<JsonCard> = read_json(&data.join("cards.json"));
    let enemies: Vec<JsonEnemy> = read_json(&data.join("enemies.json"));
    let relics: Vec<JsonRelic> = read_json(&data.join("relics.json"));
    let balance: JsonBalance = read_json(&data.join("balance.json"));

    check_unique("cards.json", cards.iter().map(|c| c.id));
    check_unique("enemies.json", enemies.iter().map(|e| e.id));
    check_unique("relics.json", relics.iter().map(|r| r.id));

    let card_ids: BTreeSet<u32> = cards.iter().map(|c| c.id).collect();
    let enemy_ids: BTreeSet<u32> = enemies.iter().map(|e| e.id).collect();
    let relic_ids: BTreeSet<u32> = relics.iter().map(|r| r.id).collect();
    for enemy in &enemies {
        for companion in &enemy.companions {
            if !enemy_ids.contains(companion) {
                panic!("{} lists unknown companion {companion}", enemy.name);
            }
        }
    }
    for id in &balance.starter.deck {
        if !card_ids.contains(id) {
            panic!("Starter deck lists unknown card {id}");
        }
    }
    for id in &balance.starter.relics {
        if !relic_ids.contains(id) {
            panic!("Starter kit lists unknown relic {id}");
        }
    }

    let card_entries: Vec<String> = cards.iter().map(gen_card).collect();
    let enemy_entries: Vec<String> = enemies.iter().map(gen_enemy).collect();
    let relic_entries: Vec<String> = relics.iter().map(gen_relic).collect();
    let starter = &balance.starter;
    let starter_deck = gen_list(&starter.deck, |id| format!("CardId({id})"));
    let starter_relics = gen_list(&starter.relics, |id| format!("RelicId({id})"));

    // ── Write output ─────────────────────────────────────────────────────────
    let out_dir = env::var("OUT_DIR").unwrap();
    let dest = Path::new(&out_dir).join("content_generated.rs");

    let generated = format!(
        r#"// Auto-generated from data/*.json by build.rs. Do not edit.
use alloc::string::String;
use alloc::vec;
use alloc::vec::Vec;
use ma_battle::config::TypePair;
use ma_battle::*;

/// Returns all cards defined in cards.json.
pub fn get_all_cards() -> Vec<Card> {{
    vec![
{}
    ]
}}

/// Returns all enemies and bosses defined in enemies.json.
pub fn get_all_enemies() -> Vec<EnemyDef> {{
    vec![
{}
    ]
}}

/// Returns all relics defined in relics.json.
pub fn get_all_relics() -> Vec<RelicDef> {{
    vec![
{}
    ]
}}

/// Returns the balance table from balance.json.
pub fn get_balance() -> BalanceConfig {{
{}
}}

/// Returns the deck, relics and health a new run starts with.
pub fn get_starter_loadout() -> Loadout {{
    Loadout {{
        deck: {starter_deck},
        relics: {starter_relics},
        health: {health},
        max_health: {health},
    }}
}}
"#,
        card_entries.join(",\n"),
        enemy_entries.join(",\n"),
        relic_entries.join(",\n"),
        gen_balance(&balance),
        health = starter.health,
    );

    fs::write(&dest, generated).expect("Failed to write generated content file");
}

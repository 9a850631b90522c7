//! Status effects attached to the player or an enemy.
//!
//! A combatant holds at most one entry per [`StatusKind`]; applying a kind that
//! is already present adds the magnitudes and keeps the longer duration.

use alloc::vec::Vec;

use parity_scale_codec::{Decode, Encode};
use scale_info::TypeInfo;
use serde::{Deserialize, Serialize};

use crate::limits::{MAX_STATUS_DURATION, MAX_STATUS_MAGNITUDE};

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Encode, Decode, TypeInfo, Serialize, Deserialize,
)]
#[serde(rename_all = "camelCase")]
pub enum StatusKind {
    /// Loses `magnitude` health at each status tick
    DamageOverTime,
    /// Adds `magnitude` to outgoing damage
    Amplify,
    /// Subtracts `magnitude` from incoming damage
    Resistance,
    /// Adds `magnitude` to the cost of every card (player only)
    CostModifier,
}

#[derive(Debug, Clone, PartialEq, Eq, Encode, Decode, TypeInfo, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StatusEffect {
    pub kind: StatusKind,
    pub magnitude: i32,
    /// Remaining turns; the effect is removed when this reaches zero
    pub duration: u32,
}

impl StatusEffect {
    pub fn new(kind: StatusKind, magnitude: i32, duration: u32) -> Self {
        Self {
            kind,
            magnitude,
            duration,
        }
    }
}

/// Result of one status tick on a combatant
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TickReport {
    /// Damage-over-time to deal before durations decrement
    pub dot_damage: i32,
    /// Kinds that expired during this tick
    pub expired: Vec<StatusKind>,
}

/// The set of active statuses on one combatant.
#[derive(Debug, Clone, Default, PartialEq, Eq, Encode, Decode, TypeInfo, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Statuses(pub Vec<StatusEffect>);

impl Statuses {
    pub fn new() -> Self {
        Self(Vec::new())
    }

    pub fn iter(&self) -> impl Iterator<Item = &StatusEffect> {
        self.0.iter()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Combined magnitude of a kind (0 when absent).
    pub fn magnitude(&self, kind: StatusKind) -> i32 {
        self.0
            .iter()
            .find(|s| s.kind == kind)
            .map(|s| s.magnitude)
            .unwrap_or(0)
    }

    /// Add an effect, merging with an existing entry of the same kind.
    ///
    /// Zero-duration or zero-magnitude applications are ignored. An entry whose
    /// combined magnitude cancels out to zero is dropped.
    pub fn apply(&mut self, effect: &StatusEffect) {
        if effect.duration == 0 || effect.magnitude == 0 {
            return;
        }
        let duration = effect.duration.min(MAX_STATUS_DURATION);
        if let Some(pos) = self.0.iter().position(|s| s.kind == effect.kind) {
            let existing = &mut self.0[pos];
            existing.magnitude = existing
                .magnitude
                .saturating_add(effect.magnitude)
                .clamp(-MAX_STATUS_MAGNITUDE, MAX_STATUS_MAGNITUDE);
            existing.duration = existing.duration.max(duration);
            if existing.magnitude == 0 {
                self.0.remove(pos);
            }
        } else {
            self.0.push(StatusEffect {
                kind: effect.kind,
                magnitude: effect
                    .magnitude
                    .clamp(-MAX_STATUS_MAGNITUDE, MAX_STATUS_MAGNITUDE),
                duration,
            });
            self.0.sort_by_key(|s| s.kind);
        }
    }

    /// Collect damage-over-time, decrement every duration and drop expired
    /// effects.
    pub fn tick(&mut self) -> TickReport {
        let mut report = TickReport {
            dot_damage: self.magnitude(StatusKind::DamageOverTime).max(0),
            expired: Vec::new(),
        };
        for status in self.0.iter_mut() {
            status.duration = status.duration.saturating_sub(1);
            if status.duration == 0 {
                report.expired.push(status.kind);
            }
        }
        self.0.retain(|s| s.duration > 0);
        report
    }
}

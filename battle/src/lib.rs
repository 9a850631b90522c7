//! Combat resolution engine for Mind Architect.
//!
//! The engine is a pure, single-threaded state machine. A [`BattleState`] is
//! created from an [`EncounterSetup`], mutated only through the transitions in
//! [`battle`], and can be persisted and resumed at any point between them.

#![cfg_attr(not(feature = "std"), no_std)]

extern crate alloc;

pub mod battle;
pub mod catalog;
pub mod config;
pub mod damage;
pub mod error;
pub mod limits;
pub mod log;
pub mod pattern;
pub mod rng;
pub mod state;
pub mod status;
pub mod types;
pub mod view;

#[cfg(test)]
mod tests;

pub use battle::*;
pub use catalog::ContentCatalog;
pub use config::BalanceConfig;
pub use damage::{Coherence, DamageBreakdown, DamageOutcome, SideEffect};
pub use error::{CorruptionReason, GameError, GameResult};
pub use limits::LimitReason;
pub use rng::{BattleRng, XorShiftRng};
pub use state::*;
pub use status::{StatusEffect, StatusKind};
pub use types::*;
pub use view::*;

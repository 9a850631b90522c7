//! Error types for battle operations
//!
//! Errors are plain enums without `String` payloads so they can be encoded
//! and surfaced to any caller (browser, native or tests) unchanged.

use core::fmt;

use parity_scale_codec::{Decode, Encode};
use scale_info::TypeInfo;
use serde::{Deserialize, Serialize};

use crate::limits::LimitReason;

/// Why a persisted or in-memory battle was rejected as corrupt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Encode, Decode, TypeInfo, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum CorruptionReason {
    /// Failed to decode the persisted bytes at all
    Undecodable,
    /// Player or enemy health below zero
    NegativeHealth,
    /// Health above the recorded maximum
    HealthAboveMax,
    /// Negative resource or maximum resource
    NegativeResource,
    /// Battle has no enemies
    NoEnemies,
    /// An enemy points at a phase it does not have
    PhaseOutOfRange,
    /// An enemy phase has an empty attack pattern
    EmptyPattern,
    /// A card instance id appears more than once across zones
    DuplicateCardInstance,
    /// A status effect with zero duration survived a tick
    ExpiredStatus,
    /// A cached enemy intent points past the end of its pattern
    IntentOutOfRange,
    /// RNG state can never produce values again
    InvalidRng,
    /// Phase does not agree with the health of the combatants
    PhaseMismatch,
}

/// Game errors that can occur during a battle
#[derive(Debug, Clone, PartialEq, Eq, Encode, Decode, TypeInfo, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum GameError {
    /// Card cost exceeds the remaining resource
    InsufficientResource { have: i32, need: i32 },
    /// Target enemy is missing or already defeated
    InvalidTarget,
    /// Card is not currently in hand (or listed twice in one play)
    InvalidCardState,
    /// Persisted state failed to decode or violates an invariant
    CorruptBattleState { reason: CorruptionReason },
    /// Action not allowed in the current battle phase
    WrongPhase,
    /// Card id not present in the content catalog
    UnknownCard,
    /// Enemy or boss id not present in the content catalog
    UnknownEnemy,
    /// Relic id not present in the content catalog
    UnknownRelic,
    /// No battle is active for the session
    NoActiveBattle,
    /// A runaway guard tripped
    LimitExceeded { reason: LimitReason },
}

impl GameError {
    /// Errors caused by player input; the transition was rejected and the
    /// battle can continue.
    pub fn is_recoverable(&self) -> bool {
        !matches!(self, GameError::CorruptBattleState { .. })
    }
}

impl fmt::Display for GameError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GameError::InsufficientResource { have, need } => {
                write!(f, "not enough resource: have {have}, need {need}")
            }
            GameError::InvalidTarget => write!(f, "target is missing or defeated"),
            GameError::InvalidCardState => write!(f, "card is not in hand"),
            GameError::CorruptBattleState { reason } => {
                write!(f, "battle state is corrupt: {reason:?}")
            }
            GameError::WrongPhase => write!(f, "action not allowed in this phase"),
            GameError::UnknownCard => write!(f, "unknown card"),
            GameError::UnknownEnemy => write!(f, "unknown enemy"),
            GameError::UnknownRelic => write!(f, "unknown relic"),
            GameError::NoActiveBattle => write!(f, "no active battle"),
            GameError::LimitExceeded { reason } => write!(f, "limit exceeded: {reason:?}"),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for GameError {}

/// Result type alias for battle operations
pub type GameResult<T> = Result<T, GameError>;

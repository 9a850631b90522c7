//! Battle limits that keep modifiers and loops from running away

use parity_scale_codec::{Decode, Encode};
use scale_info::TypeInfo;
use serde::{Deserialize, Serialize};

/// Cards a hand can hold; extra draws are skipped
pub const MAX_HAND_SIZE: usize = 10;
/// Enemies in one encounter, companions included
pub const MAX_ENEMIES: usize = 5;
/// Card plays in a single player turn
pub const MAX_PLAYS_PER_TURN: u32 = 64;
/// Turns before a battle is called against the player
pub const MAX_TURNS: u32 = 200;
/// Damage a single hit can deal
pub const MAX_HIT_DAMAGE: i32 = 9_999;
/// Magnitude a single status kind can stack to
pub const MAX_STATUS_MAGNITUDE: i32 = 999;
/// Turns a status can last
pub const MAX_STATUS_DURATION: u32 = 99;
/// Resource the player can hold at once
pub const MAX_RESOURCE: i32 = 20;
/// Hits in a single enemy action
pub const MAX_HITS_PER_ACTION: u8 = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Encode, Decode, TypeInfo, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum LimitReason {
    /// Too many plays in one turn
    PlaysPerTurn,
    /// Battle ran longer than [`MAX_TURNS`]
    TurnLimit,
}

/// Check that another play fits in the current turn.
pub fn check_play_budget(plays_this_turn: u32, cards_in_play: usize) -> Result<(), LimitReason> {
    let total = plays_this_turn.saturating_add(cards_in_play as u32);
    if total > MAX_PLAYS_PER_TURN {
        return Err(LimitReason::PlaysPerTurn);
    }
    Ok(())
}

/// Check that the battle may start another turn.
pub fn check_turn_budget(turn: u32) -> Result<(), LimitReason> {
    if turn > MAX_TURNS {
        return Err(LimitReason::TurnLimit);
    }
    Ok(())
}

/// Clamp a hit to the valid damage range.
pub fn clamp_hit(amount: i64) -> i32 {
    amount.clamp(0, MAX_HIT_DAMAGE as i64) as i32
}

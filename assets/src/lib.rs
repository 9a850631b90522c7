//! Default content for Mind Architect.
//!
//! Cards, enemies, bosses, relics and the balance table are compiled in from
//! `data/*.json` by the build script.

#![cfg_attr(not(feature = "std"), no_std)]

extern crate alloc;

mod content;

#[cfg(test)]
mod tests;

pub use content::*;

use ma_battle::ContentCatalog;

/// The default content catalog.
pub fn catalog() -> ContentCatalog {
    ContentCatalog::new(
        get_all_cards(),
        get_all_enemies(),
        get_all_relics(),
        get_balance(),
    )
}

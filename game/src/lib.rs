//! Battle sessions for Mind Architect.
//!
//! Wires the combat engine to run progression and battle persistence. The
//! `browser` feature adds a wasm-bindgen front end over the in-memory stores.

#![cfg_attr(not(feature = "std"), no_std)]

extern crate alloc;

pub mod progression;
pub mod repository;
pub mod session;

#[cfg(feature = "browser")]
pub mod engine;

#[cfg(test)]
mod tests;

pub use progression::*;
pub use repository::*;
pub use session::*;

#[cfg(feature = "browser")]
use wasm_bindgen::prelude::*;

#[cfg(feature = "browser")]
#[wasm_bindgen(start)]
pub fn init() {
    console_error_panic_hook::set_once();
    let _ = console_log::init_with_level(log::Level::Debug);
}

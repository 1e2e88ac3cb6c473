//! # Assignment Rules
//!
//! The data-model crate for download game assignments. Contains the game and
//! download identifier types, the discovered-games map, and the user-editable
//! rule store. This crate is the single source of truth for assignment state
//! and does not contain any reactive logic.

pub mod downloads;
pub mod games;
pub mod rules;

pub use downloads::*;
pub use games::*;
pub use rules::*;

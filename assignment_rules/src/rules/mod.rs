//! Assignment rules and the user-editable rule store.

mod rule;
mod store;

pub use rule::*;
pub use store::*;

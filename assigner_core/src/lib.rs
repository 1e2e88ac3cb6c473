//! # Assigner Core
//!
//! The reactive half of the download assigner. This crate interfaces with
//! `assignment_rules`, reads snapshots of the host's state tree, and reacts
//! to download-collection changes by issuing commands back to the host.
//!
//! ## Core Components
//!
//! - **snapshot**: Safe, once-per-batch reads of the host state tree
//! - **commands**: The command vocabulary dispatched back to the host
//! - **engine**: The assignment engine applied to newly-added downloads
//! - **observer**: The registration shape for host change notifications
//!
//! ## Design Philosophy
//!
//! - **Snapshot-Driven**: Rules and discovered games are read once per
//!   notification, never once per download
//! - **Command-Issuing**: Shared state is never mutated in place; every
//!   effect is a command the host serializes and applies
//! - **Never Fails**: Missing or malformed state degrades to "no assignment
//!   happens" - the host's notification pipeline is never broken

pub mod commands;
pub mod engine;
pub mod observer;
pub mod snapshot;

pub use commands::*;
pub use engine::*;
pub use observer::*;
pub use snapshot::*;

//! mindmend - terminal mood journal
//!
//! Journal entries and mood check-ins are kept newest first in a JSON list
//! under a single storage key and rewritten after every save. A simulated
//! analysis produces a canned insight after a short delay.

pub mod analysis;
pub mod app;
pub mod config;
pub mod entry;
pub mod entry_store;
pub mod error;
pub mod logging;
pub mod storage;
pub mod tips;
pub mod ui;

pub use error::MindMendError;

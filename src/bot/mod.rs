//! Bot module for handling Telegram interactions
//!
//! This module is split into several submodules:
//! - `message_handler`: Handles `/start`, `/help` and ignores other messages
//! - `callback_handler`: Routes inline keyboard callback queries
//! - `ui_builder`: Converts router keyboards and formats into Telegram types
//! - `delivery`: Executes render instructions against the Bot API

pub mod callback_handler;
pub mod delivery;
pub mod message_handler;
pub mod ui_builder;

// Re-export main handler functions for use in main.rs
pub use callback_handler::callback_handler;
pub use message_handler::message_handler;

// Re-export utility functions that might be used elsewhere
pub use delivery::{deliver, plan, Step, Target};
pub use message_handler::{parse_command, Command};
pub use ui_builder::{build_keyboard, caption_fits, link_preview_disabled};

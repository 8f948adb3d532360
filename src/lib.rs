//! # Moscow Art Guide Bot
//!
//! A Telegram bot presenting Moscow as an art capital: a fixed menu tree of
//! sections, artists, guide categories and places, rendered from a content
//! catalog compiled into the binary.

pub mod assets;
pub mod bot;
pub mod catalog;
pub mod config;
pub mod content_model;
pub mod errors;
pub mod localization;
pub mod navigation;
pub mod render;
pub mod router;

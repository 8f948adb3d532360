//! Message Handler module for processing incoming Telegram messages

use anyhow::Result;
use std::sync::Arc;
use teloxide::prelude::*;
use tracing::{debug, info};

use super::delivery::{deliver, Target};
use crate::config::BotConfig;
use crate::navigation::Delivery;
use crate::render::Response;
use crate::router::Router;

/// Commands understood by the bot
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Start,
    Help,
}

/// Recognize `/start` and `/help`, also when addressed as `/start@SomeBot`
pub fn parse_command(text: &str) -> Option<Command> {
    let first = text.split_whitespace().next()?;
    let name = first.strip_prefix('/')?;
    let name = name.split('@').next().unwrap_or(name);

    match name {
        "start" => Some(Command::Start),
        "help" => Some(Command::Help),
        _ => None,
    }
}

pub async fn message_handler(
    bot: Bot,
    msg: Message,
    router: Arc<Router>,
    config: Arc<BotConfig>,
) -> Result<()> {
    let Some(text) = msg.text() else {
        debug!(user_id = %msg.chat.id, "Ignoring non-text message");
        return Ok(());
    };

    let instruction = match parse_command(text) {
        Some(Command::Start) => {
            info!(user_id = %msg.chat.id, "User opened the main menu");
            router.main_menu()
        }
        Some(Command::Help) => {
            debug!(user_id = %msg.chat.id, "User requested help");
            router.help()
        }
        None => {
            debug!(user_id = %msg.chat.id, message_length = text.len(), "Ignoring text message");
            return Ok(());
        }
    };

    let response = Response {
        delivery: Delivery::SendNew,
        instruction,
    };
    deliver(&bot, &Target::new(msg.chat.id), &response, config.request_timeout).await
}

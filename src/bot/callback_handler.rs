//! Callback Handler module for processing inline keyboard callback queries

use anyhow::Result;
use std::sync::Arc;
use teloxide::prelude::*;
use teloxide::types::CallbackQuery;
use tracing::{debug, warn};

use super::delivery::{deliver, timed, Target};
use crate::config::BotConfig;
use crate::router::Router;

/// Handle callback queries from inline keyboards
pub async fn callback_handler(
    bot: Bot,
    q: CallbackQuery,
    router: Arc<Router>,
    config: Arc<BotConfig>,
) -> Result<()> {
    let token = q.data.as_deref().unwrap_or("");
    debug!(user_id = %q.from.id, token = %token, "Received callback query from user");

    // Answer first so the client stops showing the loading state
    if let Err(e) = timed(config.request_timeout, bot.answer_callback_query(q.id.clone())).await {
        warn!(user_id = %q.from.id, error = %e, "Failed to answer callback query");
    }

    let response = router.handle(token);

    let target = match &q.message {
        Some(msg) => Target::with_message(msg.chat().id, msg.id()),
        None => Target::new(ChatId::from(q.from.id)),
    };

    deliver(&bot, &target, &response, config.request_timeout).await
}

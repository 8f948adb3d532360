//! Delivery module: executes router responses against the Telegram Bot API
//!
//! A response is first turned into a list of [`Step`]s by [`plan`], which
//! decides everything that can be known up front: edit or send, photo or
//! text, single photo or media group. [`deliver`] then runs the steps, every
//! request bounded by the configured timeout. Presentation problems degrade
//! instead of failing the update: a message that cannot be edited is sent
//! anew, and a photo that cannot be uploaded is sent as text.

use anyhow::{bail, Result};
use std::future::IntoFuture;
use std::time::Duration;
use teloxide::prelude::*;
use teloxide::types::{InputFile, MessageId};
use teloxide::RequestError;
use tracing::{debug, error, warn};

use super::ui_builder::{
    build_keyboard, build_media_group, caption_fits, link_preview_disabled, parse_mode,
};
use crate::content_model::{ImageAsset, Keyboard};
use crate::navigation::Delivery;
use crate::render::{MediaItem, RenderInstruction, Response, TextFormat};

/// Where a response goes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Target {
    pub chat_id: ChatId,
    /// Message holding the pressed button, if any
    pub message_id: Option<MessageId>,
}

impl Target {
    pub fn new(chat_id: ChatId) -> Self {
        Self {
            chat_id,
            message_id: None,
        }
    }

    pub fn with_message(chat_id: ChatId, message_id: MessageId) -> Self {
        Self {
            chat_id,
            message_id: Some(message_id),
        }
    }
}

/// A text message with its keyboard
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextMessage {
    pub body: String,
    pub format: TextFormat,
    pub buttons: Keyboard,
}

impl TextMessage {
    fn new(body: &str, format: TextFormat, buttons: &Keyboard) -> Self {
        Self {
            body: body.to_string(),
            format,
            buttons: buttons.clone(),
        }
    }
}

/// One Bot API call of a delivery
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Step {
    SendText(TextMessage),
    /// Replace the text of `message_id`; sent as a new message if that fails
    EditText {
        message_id: MessageId,
        text: TextMessage,
    },
    /// Upload a photo; on failure `fallback` is sent as text, or the error is
    /// logged and delivery continues when there is none
    SendPhoto {
        image: ImageAsset,
        caption: Option<String>,
        format: TextFormat,
        buttons: Keyboard,
        fallback: Option<TextMessage>,
    },
    /// Failures are logged and delivery continues
    SendMediaGroup(Vec<MediaItem>),
}

impl Step {
    fn kind(&self) -> &'static str {
        match self {
            Step::SendText(_) => "send_text",
            Step::EditText { .. } => "edit_text",
            Step::SendPhoto { .. } => "send_photo",
            Step::SendMediaGroup(_) => "send_media_group",
        }
    }
}

/// Decide the Bot API calls for a response
pub fn plan(response: &Response, target: &Target) -> Vec<Step> {
    match &response.instruction {
        RenderInstruction::Text {
            body,
            format,
            buttons,
        } => {
            let text = TextMessage::new(body, *format, buttons);
            match (response.delivery, target.message_id) {
                (Delivery::EditInPlace, Some(message_id)) => vec![Step::EditText { message_id, text }],
                _ => vec![Step::SendText(text)],
            }
        }
        RenderInstruction::Photo {
            body,
            format,
            image,
            buttons,
        } => {
            let text = TextMessage::new(body, *format, buttons);
            if !caption_fits(body) {
                warn!(image = %image, "Caption too long for a photo, sending text only");
                return vec![Step::SendText(text)];
            }
            vec![Step::SendPhoto {
                image: image.clone(),
                caption: Some(body.clone()),
                format: *format,
                buttons: buttons.clone(),
                fallback: Some(text),
            }]
        }
        RenderInstruction::MediaGroup {
            items,
            followup_body,
            followup_buttons,
        } => {
            let mut steps = match items.as_slice() {
                [] => Vec::new(),
                // sendMediaGroup needs at least two photos
                [single] => vec![Step::SendPhoto {
                    image: single.image.clone(),
                    caption: single.caption.clone(),
                    format: TextFormat::Plain,
                    buttons: Keyboard::new(),
                    fallback: None,
                }],
                many => vec![Step::SendMediaGroup(many.to_vec())],
            };
            steps.push(Step::SendText(TextMessage::new(
                followup_body,
                TextFormat::Plain,
                followup_buttons,
            )));
            steps
        }
    }
}

/// Run a Bot API request with an upper time bound
pub async fn timed<F, T>(limit: Duration, request: F) -> Result<T>
where
    F: IntoFuture<Output = Result<T, RequestError>>,
{
    match tokio::time::timeout(limit, request).await {
        Ok(result) => Ok(result?),
        Err(_) => bail!("Telegram request timed out after {}s", limit.as_secs()),
    }
}

/// Execute a router response
pub async fn deliver(bot: &Bot, target: &Target, response: &Response, limit: Duration) -> Result<()> {
    let steps = plan(response, target);
    debug!(
        chat_id = %target.chat_id,
        kind = response.instruction.kind(),
        delivery = ?response.delivery,
        steps = steps.len(),
        "Delivering response"
    );

    for step in &steps {
        run_step(bot, target.chat_id, step, limit).await?;
    }
    Ok(())
}

async fn run_step(bot: &Bot, chat_id: ChatId, step: &Step, limit: Duration) -> Result<()> {
    debug!(chat_id = %chat_id, step = step.kind(), "Running delivery step");

    match step {
        Step::SendText(text) => send_text(bot, chat_id, text, limit).await,
        Step::EditText { message_id, text } => {
            if let Err(e) = edit_text(bot, chat_id, *message_id, text, limit).await {
                warn!(chat_id = %chat_id, error = %e, "Failed to edit message, sending a new one");
                return send_text(bot, chat_id, text, limit).await;
            }
            Ok(())
        }
        Step::SendPhoto {
            image,
            caption,
            format,
            buttons,
            fallback,
        } => {
            let sent = send_photo(bot, chat_id, image, caption.as_deref(), *format, buttons, limit).await;
            match (sent, fallback) {
                (Ok(()), _) => Ok(()),
                (Err(e), Some(text)) => {
                    warn!(image = %image, error = %e, "Failed to send photo, sending text only");
                    send_text(bot, chat_id, text, limit).await
                }
                (Err(e), None) => {
                    error!(image = %image, error = %e, "Failed to send photo");
                    Ok(())
                }
            }
        }
        Step::SendMediaGroup(items) => {
            if let Err(e) = timed(limit, bot.send_media_group(chat_id, build_media_group(items))).await {
                error!(chat_id = %chat_id, error = %e, "Failed to send media group");
            }
            Ok(())
        }
    }
}

async fn send_text(bot: &Bot, chat_id: ChatId, text: &TextMessage, limit: Duration) -> Result<()> {
    let mut request = bot
        .send_message(chat_id, text.body.as_str())
        .link_preview_options(link_preview_disabled());
    if let Some(mode) = parse_mode(text.format) {
        request = request.parse_mode(mode);
    }
    if let Some(keyboard) = build_keyboard(&text.buttons) {
        request = request.reply_markup(keyboard);
    }

    timed(limit, request).await?;
    Ok(())
}

async fn edit_text(
    bot: &Bot,
    chat_id: ChatId,
    message_id: MessageId,
    text: &TextMessage,
    limit: Duration,
) -> Result<()> {
    let mut request = bot
        .edit_message_text(chat_id, message_id, text.body.as_str())
        .link_preview_options(link_preview_disabled());
    if let Some(mode) = parse_mode(text.format) {
        request = request.parse_mode(mode);
    }
    if let Some(keyboard) = build_keyboard(&text.buttons) {
        request = request.reply_markup(keyboard);
    }

    timed(limit, request).await?;
    Ok(())
}

async fn send_photo(
    bot: &Bot,
    chat_id: ChatId,
    image: &ImageAsset,
    caption: Option<&str>,
    format: TextFormat,
    buttons: &Keyboard,
    limit: Duration,
) -> Result<()> {
    let mut request = bot.send_photo(chat_id, InputFile::file(image.path().to_path_buf()));
    if let Some(caption) = caption {
        request = request.caption(caption);
        if let Some(mode) = parse_mode(format) {
            request = request.parse_mode(mode);
        }
    }
    if let Some(keyboard) = build_keyboard(buttons) {
        request = request.reply_markup(keyboard);
    }

    timed(limit, request).await?;
    Ok(())
}

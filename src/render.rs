//! # Render Instructions
//!
//! The router's output: what to show next and which buttons to attach. The
//! Telegram transport turns these into `sendMessage`, `sendPhoto`,
//! `sendMediaGroup` and `editMessageText` calls.

use crate::content_model::{ImageAsset, Keyboard};
use crate::navigation::Delivery;

/// How a body should be interpreted by the client
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextFormat {
    /// Telegram legacy Markdown (`*bold*`)
    Markdown,
    Plain,
}

/// One photo of a media group
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MediaItem {
    pub image: ImageAsset,
    pub caption: Option<String>,
}

/// What the transport should present
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RenderInstruction {
    Text {
        body: String,
        format: TextFormat,
        buttons: Keyboard,
    },
    Photo {
        body: String,
        format: TextFormat,
        image: ImageAsset,
        buttons: Keyboard,
    },
    /// Never constructed with an empty `items` list
    MediaGroup {
        items: Vec<MediaItem>,
        followup_body: String,
        followup_buttons: Keyboard,
    },
}

impl RenderInstruction {
    pub fn text(body: impl Into<String>, format: TextFormat, buttons: Keyboard) -> Self {
        RenderInstruction::Text {
            body: body.into(),
            format,
            buttons,
        }
    }

    /// Photo when an image is available, text otherwise
    pub fn with_optional_image(
        body: impl Into<String>,
        format: TextFormat,
        image: Option<ImageAsset>,
        buttons: Keyboard,
    ) -> Self {
        let body = body.into();
        match image {
            Some(image) => RenderInstruction::Photo {
                body,
                format,
                image,
                buttons,
            },
            None => RenderInstruction::Text {
                body,
                format,
                buttons,
            },
        }
    }

    /// Body of a text or photo, the follow-up text of a media group
    pub fn body(&self) -> &str {
        match self {
            RenderInstruction::Text { body, .. } | RenderInstruction::Photo { body, .. } => body,
            RenderInstruction::MediaGroup { followup_body, .. } => followup_body,
        }
    }

    /// Buttons attached to the last message of the render
    pub fn buttons(&self) -> &Keyboard {
        match self {
            RenderInstruction::Text { buttons, .. } | RenderInstruction::Photo { buttons, .. } => {
                buttons
            }
            RenderInstruction::MediaGroup {
                followup_buttons, ..
            } => followup_buttons,
        }
    }

    /// Short name for structured logs
    pub fn kind(&self) -> &'static str {
        match self {
            RenderInstruction::Text { .. } => "text",
            RenderInstruction::Photo { .. } => "photo",
            RenderInstruction::MediaGroup { .. } => "media_group",
        }
    }
}

/// A render plus the way it should be delivered
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Response {
    pub delivery: Delivery,
    pub instruction: RenderInstruction,
}

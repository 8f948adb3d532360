//! UI Builder module for converting router output into Telegram types

use teloxide::types::{
    InlineKeyboardButton, InlineKeyboardMarkup, InputFile, InputMedia, InputMediaPhoto,
    LinkPreviewOptions, ParseMode,
};

use crate::config::{MAX_CAPTION_CHARS, MAX_MEDIA_GROUP_ITEMS};
use crate::content_model::Keyboard;
use crate::render::{MediaItem, TextFormat};

/// Create an inline keyboard from router buttons; `None` when there are no buttons
pub fn build_keyboard(buttons: &Keyboard) -> Option<InlineKeyboardMarkup> {
    let rows: Vec<Vec<InlineKeyboardButton>> = buttons
        .iter()
        .filter(|row| !row.is_empty())
        .map(|row| {
            row.iter()
                .map(|button| InlineKeyboardButton::callback(button.label.clone(), button.token.clone()))
                .collect()
        })
        .collect();

    if rows.is_empty() {
        None
    } else {
        Some(InlineKeyboardMarkup::new(rows))
    }
}

/// Bot API parse mode for a body format
// Guide texts are legacy Markdown (`*bold*`) and are not escaped for MarkdownV2
#[allow(deprecated)]
pub fn parse_mode(format: TextFormat) -> Option<ParseMode> {
    match format {
        TextFormat::Markdown => Some(ParseMode::Markdown),
        TextFormat::Plain => None,
    }
}

/// Link previews are disabled on every text message
pub fn link_preview_disabled() -> LinkPreviewOptions {
    LinkPreviewOptions {
        is_disabled: true,
        url: None,
        prefer_small_media: false,
        prefer_large_media: false,
        show_above_text: false,
    }
}

/// Whether a body can be sent as a photo caption
///
/// Counts characters of the Markdown source. Telegram measures the caption after
/// parsing the markup, so this never accepts a caption Telegram would reject.
pub fn caption_fits(body: &str) -> bool {
    body.chars().count() <= MAX_CAPTION_CHARS
}

/// Build the `sendMediaGroup` payload, capped at the Telegram group size
pub fn build_media_group(items: &[MediaItem]) -> Vec<InputMedia> {
    items
        .iter()
        .take(MAX_MEDIA_GROUP_ITEMS)
        .map(|item| {
            let photo = InputMediaPhoto::new(InputFile::file(item.image.path().to_path_buf()));
            let photo = match &item.caption {
                Some(caption) => photo.caption(caption.clone()),
                None => photo,
            };
            InputMedia::Photo(photo)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content_model::{Button, ImageAsset};

    #[test]
    fn test_build_keyboard_rows() {
        let buttons = vec![
            vec![
                Button::new("Пименов", "artist:pimenov"),
                Button::new("Плавинский", "artist:plavinskiy"),
            ],
            vec![],
            vec![Button::new("⬅️ В меню", "back")],
        ];

        let markup = build_keyboard(&buttons).unwrap();
        assert_eq!(markup.inline_keyboard.len(), 2);
        assert_eq!(markup.inline_keyboard[0].len(), 2);
        assert_eq!(markup.inline_keyboard[1][0].text, "⬅️ В меню");
    }

    #[test]
    fn test_build_keyboard_empty() {
        assert!(build_keyboard(&Keyboard::new()).is_none());
        assert!(build_keyboard(&vec![vec![]]).is_none());
    }

    #[test]
    fn test_caption_limit_counts_characters() {
        assert!(caption_fits(&"ж".repeat(MAX_CAPTION_CHARS)));
        assert!(!caption_fits(&"ж".repeat(MAX_CAPTION_CHARS + 1)));
    }

    #[test]
    fn test_caption_limit_counts_markup() {
        // Renders to 1023 characters, but the asterisks are counted too
        let body = format!("*{}*", "ж".repeat(MAX_CAPTION_CHARS - 1));
        assert!(!caption_fits(&body));
        assert!(caption_fits(&format!("*{}*", "ж".repeat(MAX_CAPTION_CHARS - 2))));
    }

    #[test]
    fn test_media_group_capped() {
        let items: Vec<MediaItem> = (0..12)
            .map(|i| MediaItem {
                image: ImageAsset::new(format!("/img/{i}.jpg")),
                caption: None,
            })
            .collect();
        assert_eq!(build_media_group(&items).len(), MAX_MEDIA_GROUP_ITEMS);
    }
}

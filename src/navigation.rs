//! # Navigation Module
//!
//! Parses the callback data of inline keyboard buttons into a typed [`View`].
//! Tokens are colon-separated, case-sensitive ASCII strings:
//!
//! | token                      | view                          |
//! |----------------------------|-------------------------------|
//! | `back`                     | `MainMenu`                    |
//! | `info:moscow`              | `InfoMoscow`                  |
//! | `artists`                  | `ArtistsMenu`                 |
//! | `artist:<key>`             | `ArtistGallery(key)`          |
//! | `guide`                    | `GuideMenu`                   |
//! | `guide:<category>`         | `GuideCategory(category)`     |
//! | `guide:<category>:<slug>`  | `GuideItemDetail(cat, slug)`  |
//! | `authors`                  | `AuthorsPage`                 |
//!
//! Anything else parses to `Unknown`; parsing never fails.

use crate::content_model::Category;
use crate::errors::CatalogError;

/// Telegram limits callback data to 64 bytes
pub const MAX_TOKEN_LEN: usize = 64;

/// Token of the main menu
pub const BACK_TOKEN: &str = "back";

/// A requested screen
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum View {
    MainMenu,
    InfoMoscow,
    ArtistsMenu,
    ArtistGallery(String),
    GuideMenu,
    GuideCategory(Category),
    GuideItemDetail(Category, String),
    AuthorsPage,
    /// Carries the raw token for logging
    Unknown(String),
}

/// How the transport should present a render
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Delivery {
    /// Replace the text of the message holding the pressed button
    EditInPlace,
    /// Send a fresh message below
    SendNew,
}

impl View {
    /// Parse a token; unrecognized input becomes `View::Unknown`
    pub fn parse(token: &str) -> Self {
        Self::try_parse(token).unwrap_or_else(|_| View::Unknown(token.to_string()))
    }

    /// Parse a token, reporting unrecognized input as `MalformedToken`
    pub fn try_parse(token: &str) -> Result<Self, CatalogError> {
        let malformed = || CatalogError::MalformedToken(token.to_string());

        if token.is_empty()
            || token.len() > MAX_TOKEN_LEN
            || !token.bytes().all(|b| b.is_ascii_graphic())
        {
            return Err(malformed());
        }

        let mut segments = token.splitn(3, ':');
        let head = segments.next().unwrap_or_default();
        let second = segments.next();
        let rest = segments.next();

        match (head, second, rest) {
            (BACK_TOKEN, None, None) => Ok(View::MainMenu),
            ("info", Some("moscow"), None) => Ok(View::InfoMoscow),
            ("artists", None, None) => Ok(View::ArtistsMenu),
            ("artist", Some(key), None) => Ok(View::ArtistGallery(key.to_string())),
            // "artist:a:b" keeps everything after the first colon as the key
            ("artist", Some(key), Some(tail)) => Ok(View::ArtistGallery(format!("{key}:{tail}"))),
            ("guide", None, None) => Ok(View::GuideMenu),
            ("guide", Some(category), slug) => {
                let category = Category::from_slug(category).ok_or_else(malformed)?;
                Ok(match slug {
                    None => View::GuideCategory(category),
                    Some(slug) => View::GuideItemDetail(category, slug.to_string()),
                })
            }
            ("authors", None, None) => Ok(View::AuthorsPage),
            _ => Err(malformed()),
        }
    }

    /// Edit-in-place vs new message, as the bot has always behaved
    pub fn delivery(&self) -> Delivery {
        match self {
            View::InfoMoscow | View::ArtistsMenu | View::AuthorsPage | View::Unknown(_) => {
                Delivery::EditInPlace
            }
            View::MainMenu
            | View::GuideMenu
            | View::GuideCategory(_)
            | View::GuideItemDetail(..)
            | View::ArtistGallery(_) => Delivery::SendNew,
        }
    }

    /// Short name for structured logs
    pub fn name(&self) -> &'static str {
        match self {
            View::MainMenu => "main_menu",
            View::InfoMoscow => "info_moscow",
            View::ArtistsMenu => "artists_menu",
            View::ArtistGallery(_) => "artist_gallery",
            View::GuideMenu => "guide_menu",
            View::GuideCategory(_) => "guide_category",
            View::GuideItemDetail(..) => "guide_item_detail",
            View::AuthorsPage => "authors_page",
            View::Unknown(_) => "unknown",
        }
    }
}

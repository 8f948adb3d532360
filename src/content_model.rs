//! # Content Data Model
//!
//! This module defines the data structures the guide is made of: menu screens,
//! keyboard buttons, guide categories with their places, the artist roster and
//! image assets.
//!
//! ## Core Concepts
//!
//! - **MenuNode**: A static screen (main menu, "about Moscow", artists, guide, authors)
//! - **Category**: One of the four thematic groupings of the guide
//! - **ContentItem**: A place inside a category, addressed by its slug
//! - **Artist**: A roster entry whose works live in a numbered image directory
//! - **ImageAsset**: A path to a picture; existence is checked at render time
//!
//! ## Usage
//!
//! ```rust
//! use moscow_art_bot::content_model::{Button, Category};
//!
//! let category = Category::from_slug("avant").unwrap();
//! assert_eq!(category, Category::Avant);
//! assert_eq!(category.token(), "guide:avant");
//!
//! let button = Button::new("Путеводитель", "guide");
//! assert_eq!(button.token, "guide");
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};

/// A single inline keyboard button: a visible label and the token it sends back
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Button {
    /// Text shown on the button
    pub label: String,
    /// Navigation token delivered as callback data when pressed
    pub token: String,
}

impl Button {
    pub fn new(label: impl Into<String>, token: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            token: token.into(),
        }
    }
}

/// Rows of buttons, in display order
pub type Keyboard = Vec<Vec<Button>>;

/// A navigable static screen
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MenuNode {
    /// Unique identifier (e.g. "main", "guide")
    pub id: String,

    /// Human-readable title, used in logs
    pub title: String,

    /// Markdown body shown to the user
    #[serde(default)]
    pub body: Option<String>,

    /// Optional picture, relative to the image root
    #[serde(default)]
    pub image: Option<String>,

    /// Keyboard rows
    #[serde(default)]
    pub buttons: Keyboard,

    /// Token of the screen "back" leads to
    #[serde(default)]
    pub parent: Option<String>,
}

/// Thematic grouping of the guide
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    /// Classic painting and realism
    Classic,
    /// Russian avant-garde and modernism
    Avant,
    /// Soviet art and socialist realism
    Soviet,
    /// Contemporary art
    Contemporary,
}

impl Category {
    /// All categories in their fixed display order
    pub const ALL: [Category; 4] = [
        Category::Classic,
        Category::Avant,
        Category::Soviet,
        Category::Contemporary,
    ];

    /// The token segment naming this category
    pub fn slug(&self) -> &'static str {
        match self {
            Category::Classic => "classic",
            Category::Avant => "avant",
            Category::Soviet => "soviet",
            Category::Contemporary => "contemporary",
        }
    }

    /// Look up a category by its token segment (case-sensitive)
    pub fn from_slug(slug: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|c| c.slug() == slug)
    }

    /// Token opening this category's overview
    pub fn token(&self) -> String {
        format!("guide:{}", self.slug())
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.slug())
    }
}

/// A place of the guide
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContentItem {
    /// Key of the item inside its category (e.g. "mmoma")
    pub slug: String,

    /// Full title shown on the detail card
    pub title: String,

    /// Title used in the numbered category overview
    pub short_title: String,

    /// One-line blurb used in the numbered category overview
    pub summary: String,

    /// Label of the keyboard button, without the number
    pub button_label: String,

    /// Detail card description
    pub description: String,

    /// Street address or meeting point
    pub address: String,

    /// Official site
    pub site_url: String,

    /// Optional picture, relative to the image root
    #[serde(default)]
    pub image: Option<String>,
}

impl ContentItem {
    /// Token opening this item's detail card
    pub fn token(&self, category: Category) -> String {
        format!("guide:{}:{}", category.slug(), self.slug)
    }
}

/// A member of the artist roster
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Artist {
    /// Token segment (e.g. "pimenov")
    pub key: String,

    /// Nominative name
    pub title: String,

    /// Genitive name, used in gallery captions ("Работы Пименова")
    pub title_genitive: String,

    /// Directory under the image root holding `1.jpg` .. `4.jpg`
    pub image_dir: String,
}

impl Artist {
    /// Token opening this artist's gallery
    pub fn token(&self) -> String {
        format!("artist:{}", self.key)
    }
}

/// A picture on disk bound to a node, item or artist
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ImageAsset(PathBuf);

impl ImageAsset {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self(path.into())
    }

    pub fn path(&self) -> &Path {
        &self.0
    }
}

impl fmt::Display for ImageAsset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.display())
    }
}

/// Keycap emoji for positions 1..=9 ("1️⃣", "2️⃣", ...)
pub fn keycap(position: usize) -> String {
    match position {
        1..=9 => format!("{position}\u{fe0f}\u{20e3}"),
        _ => format!("{position}."),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_category_slug_round_trip() {
        for category in Category::ALL {
            assert_eq!(Category::from_slug(category.slug()), Some(category));
        }
        assert_eq!(Category::from_slug("Classic"), None);
        assert_eq!(Category::from_slug(""), None);
    }

    #[test]
    fn test_category_tokens() {
        assert_eq!(Category::Soviet.token(), "guide:soviet");
        assert_eq!(Category::Contemporary.to_string(), "contemporary");
    }

    #[test]
    fn test_keycap_numbering() {
        assert_eq!(keycap(1), "1️⃣");
        assert_eq!(keycap(4), "4️⃣");
        assert_eq!(keycap(12), "12.");
    }

    #[test]
    fn test_category_deserializes_lowercase() {
        let category: Category = serde_json::from_str("\"avant\"").unwrap();
        assert_eq!(category, Category::Avant);
        assert!(serde_json::from_str::<Category>("\"Avant\"").is_err());
    }
}

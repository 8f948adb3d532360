//! # Content Catalog Module
//!
//! Read-only registry of everything the bot can show: static menu screens,
//! the four guide categories with their places, and the artist roster.
//!
//! The catalog is built once at startup from the JSON definition embedded in
//! the binary, validated, and then shared immutably. Image paths are stored
//! relative to an image root and only checked for existence when a screen is
//! rendered, through an [`AssetProbe`].

use serde::Deserialize;
use std::collections::{HashMap, HashSet};
use std::path::{Path, PathBuf};
use tracing::{debug, info};

use crate::assets::AssetProbe;
use crate::content_model::{Artist, Category, ContentItem, ImageAsset, MenuNode};
use crate::errors::CatalogError;
use crate::navigation::View;

/// Content definition compiled into the binary
pub const BUILTIN_CATALOG: &str = include_str!("../content/catalog.json");

/// Menu screens every catalog must define
pub const REQUIRED_MENUS: [&str; 5] = ["main", "info_moscow", "artists", "guide", "authors"];

/// Numbered works probed per artist (`1.jpg` .. `4.jpg`)
pub const MAX_ARTIST_IMAGES: usize = 4;

/// Preferred extension of artist works
pub const PRIMARY_EXTENSION: &str = "jpg";

/// Extension tried when the preferred one is missing
pub const FALLBACK_EXTENSION: &str = "jpeg";

/// Keycap numbering stops at 9
pub const MAX_ITEMS_PER_CATEGORY: usize = 9;

/// One category of the guide with its places in display order
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategorySection {
    pub category: Category,
    pub title: String,
    /// Cover picture, relative to the image root
    pub cover: Option<String>,
    items: Vec<ContentItem>,
    index: HashMap<String, usize>,
}

impl CategorySection {
    /// Places in their fixed display order
    pub fn items(&self) -> &[ContentItem] {
        &self.items
    }

    pub fn get(&self, slug: &str) -> Option<&ContentItem> {
        self.index.get(slug).map(|&i| &self.items[i])
    }
}

#[derive(Debug, Deserialize)]
struct RawCatalog {
    menus: Vec<MenuNode>,
    categories: Vec<RawCategory>,
    artists: Vec<Artist>,
}

#[derive(Debug, Deserialize)]
struct RawCategory {
    category: Category,
    title: String,
    #[serde(default)]
    cover: Option<String>,
    items: Vec<ContentItem>,
}

/// The static content registry
#[derive(Debug, Clone)]
pub struct Catalog {
    images_root: PathBuf,
    menus: HashMap<String, MenuNode>,
    sections: HashMap<Category, CategorySection>,
    artists: Vec<Artist>,
    artist_index: HashMap<String, usize>,
}

impl Catalog {
    /// Build the catalog from the definition embedded in the binary
    pub fn builtin(images_root: impl Into<PathBuf>) -> Result<Self, CatalogError> {
        Self::from_json(BUILTIN_CATALOG, images_root)
    }

    /// Build and validate a catalog from a JSON definition
    pub fn from_json(json: &str, images_root: impl Into<PathBuf>) -> Result<Self, CatalogError> {
        let raw: RawCatalog = serde_json::from_str(json)?;
        let images_root = images_root.into();

        let mut menus = HashMap::new();
        for menu in raw.menus {
            if menus.contains_key(&menu.id) {
                return Err(CatalogError::Invalid(format!("duplicate menu '{}'", menu.id)));
            }
            menus.insert(menu.id.clone(), menu);
        }
        for id in REQUIRED_MENUS {
            if !menus.contains_key(id) {
                return Err(CatalogError::Invalid(format!("missing menu '{id}'")));
            }
        }

        let mut sections = HashMap::new();
        for raw_section in raw.categories {
            let section = Self::build_section(raw_section)?;
            if sections.contains_key(&section.category) {
                return Err(CatalogError::Invalid(format!(
                    "duplicate category '{}'",
                    section.category
                )));
            }
            sections.insert(section.category, section);
        }
        for category in Category::ALL {
            if !sections.contains_key(&category) {
                return Err(CatalogError::Invalid(format!("missing category '{category}'")));
            }
        }

        let mut artist_index = HashMap::new();
        for (i, artist) in raw.artists.iter().enumerate() {
            if artist_index.insert(artist.key.clone(), i).is_some() {
                return Err(CatalogError::Invalid(format!("duplicate artist '{}'", artist.key)));
            }
        }

        let catalog = Self {
            images_root,
            menus,
            sections,
            artists: raw.artists,
            artist_index,
        };
        catalog.validate_buttons()?;

        info!(
            menus = catalog.menus.len(),
            places = catalog.sections.values().map(|s| s.items.len()).sum::<usize>(),
            artists = catalog.artists.len(),
            images_root = %catalog.images_root.display(),
            "Content catalog loaded"
        );

        Ok(catalog)
    }

    fn build_section(raw: RawCategory) -> Result<CategorySection, CatalogError> {
        if raw.items.is_empty() {
            return Err(CatalogError::Invalid(format!(
                "category '{}' has no items",
                raw.category
            )));
        }
        if raw.items.len() > MAX_ITEMS_PER_CATEGORY {
            return Err(CatalogError::Invalid(format!(
                "category '{}' has {} items, at most {MAX_ITEMS_PER_CATEGORY} allowed",
                raw.category,
                raw.items.len()
            )));
        }

        let mut index = HashMap::new();
        for (i, item) in raw.items.iter().enumerate() {
            if item.slug.is_empty() || item.slug.contains(':') {
                return Err(CatalogError::Invalid(format!(
                    "category '{}' has an invalid slug {:?}",
                    raw.category, item.slug
                )));
            }
            if index.insert(item.slug.clone(), i).is_some() {
                return Err(CatalogError::Invalid(format!(
                    "duplicate slug '{}' in category '{}'",
                    item.slug, raw.category
                )));
            }
        }

        Ok(CategorySection {
            category: raw.category,
            title: raw.title,
            cover: raw.cover,
            items: raw.items,
            index,
        })
    }

    /// Every menu button and parent must lead somewhere that exists, and
    /// every artist must be reachable from the artists menu
    fn validate_buttons(&self) -> Result<(), CatalogError> {
        let mut seen = HashSet::new();
        for menu in self.menus.values() {
            if let Some(parent) = &menu.parent {
                if let View::Unknown(_) = View::parse(parent) {
                    return Err(CatalogError::Invalid(format!(
                        "menu '{}' has an unknown parent '{parent}'",
                        menu.id
                    )));
                }
            }
            for button in menu.buttons.iter().flatten() {
                if !seen.insert(button.token.as_str()) {
                    continue;
                }
                let dangling = match View::parse(&button.token) {
                    View::Unknown(_) => true,
                    View::ArtistGallery(key) => self.artist(&key).is_err(),
                    View::GuideItemDetail(category, slug) => {
                        self.get_item(category, &slug).is_err()
                    }
                    _ => false,
                };
                if dangling {
                    return Err(CatalogError::Invalid(format!(
                        "menu '{}' has a button '{}' with dangling token '{}'",
                        menu.id, button.label, button.token
                    )));
                }
            }
        }

        let artists_menu = self.menu("artists")?;
        for artist in &self.artists {
            let token = artist.token();
            if !artists_menu.buttons.iter().flatten().any(|b| b.token == token) {
                return Err(CatalogError::Invalid(format!(
                    "artist '{}' has no button in the artists menu",
                    artist.key
                )));
            }
        }
        Ok(())
    }

    pub fn images_root(&self) -> &Path {
        &self.images_root
    }

    pub fn menu(&self, id: &str) -> Result<&MenuNode, CatalogError> {
        self.menus
            .get(id)
            .ok_or_else(|| CatalogError::not_found("menu", id))
    }

    pub fn section(&self, category: Category) -> &CategorySection {
        // Every category is present after validation
        &self.sections[&category]
    }

    /// Constant-time lookup of a place by category and slug
    pub fn get_item(&self, category: Category, slug: &str) -> Result<&ContentItem, CatalogError> {
        self.section(category)
            .get(slug)
            .ok_or_else(|| CatalogError::not_found(format!("{category} item"), slug))
    }

    /// Places of a category in their fixed display order
    pub fn list_items(&self, category: Category) -> &[ContentItem] {
        self.section(category).items()
    }

    pub fn artists(&self) -> &[Artist] {
        &self.artists
    }

    pub fn artist(&self, key: &str) -> Result<&Artist, CatalogError> {
        self.artist_index
            .get(key)
            .map(|&i| &self.artists[i])
            .ok_or_else(|| CatalogError::not_found("artist", key))
    }

    /// Resolve a catalog-relative path to an existing file
    pub fn resolve_image(
        &self,
        relative: &str,
        probe: &dyn AssetProbe,
    ) -> Result<ImageAsset, CatalogError> {
        let path = self.images_root.join(relative);
        if probe.is_file(&path) {
            Ok(ImageAsset::new(path))
        } else {
            Err(CatalogError::MissingAsset(path))
        }
    }

    /// Like [`Catalog::resolve_image`], treating a missing file as "no picture"
    pub fn image(&self, relative: &str, probe: &dyn AssetProbe) -> Option<ImageAsset> {
        match self.resolve_image(relative, probe) {
            Ok(asset) => Some(asset),
            Err(e) => {
                debug!(error = %e, "Rendering text only");
                None
            }
        }
    }

    /// Existing works of an artist, in order
    ///
    /// For each of `1..=4` the `.jpg` file is preferred and `.jpeg` is tried
    /// when it is missing. Unknown artists and absent directories yield an
    /// empty list.
    pub fn artist_assets(&self, key: &str, probe: &dyn AssetProbe) -> Vec<ImageAsset> {
        let Ok(artist) = self.artist(key) else {
            return Vec::new();
        };

        let base_dir = self.images_root.join(&artist.image_dir);
        if !probe.is_dir(&base_dir) {
            debug!(artist = %key, dir = %base_dir.display(), "Artist image directory missing");
            return Vec::new();
        }

        (1..=MAX_ARTIST_IMAGES)
            .filter_map(|n| {
                [PRIMARY_EXTENSION, FALLBACK_EXTENSION]
                    .into_iter()
                    .map(|ext| base_dir.join(format!("{n}.{ext}")))
                    .find(|path| probe.is_file(path))
                    .map(ImageAsset::new)
            })
            .collect()
    }
}

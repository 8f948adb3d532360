//! # Navigation Router
//!
//! Turns a callback token into a [`Response`]. The router is a pure function
//! of the token, the catalog and the image probe: it keeps no session state,
//! and every token, however malformed, maps to a render. Missing places,
//! artists or pictures degrade to polite text without surfacing any error.

use std::sync::Arc;
use tracing::{debug, warn};

use crate::assets::AssetProbe;
use crate::catalog::Catalog;
use crate::content_model::{keycap, Button, Category, Keyboard, MenuNode};
use crate::localization::LocalizationManager;
use crate::navigation::{View, BACK_TOKEN};
use crate::render::{MediaItem, RenderInstruction, Response, TextFormat};

/// Stateless dispatcher from tokens to render instructions
pub struct Router {
    catalog: Arc<Catalog>,
    probe: Arc<dyn AssetProbe>,
    messages: Arc<LocalizationManager>,
}

impl Router {
    pub fn new(
        catalog: Arc<Catalog>,
        probe: Arc<dyn AssetProbe>,
        messages: Arc<LocalizationManager>,
    ) -> Self {
        Self {
            catalog,
            probe,
            messages,
        }
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    /// Route a raw callback token
    pub fn handle(&self, token: &str) -> Response {
        let view = View::parse(token);
        if let View::Unknown(raw) = &view {
            debug!(token = ?raw, "Unrecognized navigation token");
        }

        let instruction = self.render(&view);
        debug!(
            token = %token,
            view = view.name(),
            kind = instruction.kind(),
            "Routed navigation token"
        );

        Response {
            delivery: view.delivery(),
            instruction,
        }
    }

    /// Render a parsed view
    pub fn render(&self, view: &View) -> RenderInstruction {
        match view {
            View::MainMenu => self.render_menu("main"),
            View::InfoMoscow => self.render_menu("info_moscow"),
            View::ArtistsMenu => self.render_menu("artists"),
            View::ArtistGallery(key) => self.render_artist_gallery(key),
            View::GuideMenu => self.render_menu("guide"),
            View::GuideCategory(category) => self.render_category(*category),
            View::GuideItemDetail(category, slug) => self.render_item_detail(*category, slug),
            View::AuthorsPage => self.render_menu("authors"),
            View::Unknown(_) => self.render_unknown(),
        }
    }

    /// Start screen, shown for `/start` and `back`
    pub fn main_menu(&self) -> RenderInstruction {
        self.render(&View::MainMenu)
    }

    /// Static `/help` text
    pub fn help(&self) -> RenderInstruction {
        RenderInstruction::text(self.messages.t("help-text"), TextFormat::Plain, Keyboard::new())
    }

    /// Numbered place buttons of a category plus the way back to the guide
    pub fn category_keyboard(&self, category: Category) -> Keyboard {
        let mut rows: Keyboard = self
            .catalog
            .list_items(category)
            .iter()
            .enumerate()
            .map(|(i, item)| {
                vec![Button {
                    label: format!("{} {}", keycap(i + 1), item.button_label),
                    token: item.token(category),
                }]
            })
            .collect();

        rows.push(vec![Button {
            label: self.messages.t("button-back-to-guide"),
            token: "guide".to_string(),
        }]);
        rows
    }

    /// Buttons of a menu, plus a way back to its parent when none of them leads there
    fn menu_keyboard(&self, menu: &MenuNode) -> Keyboard {
        let mut rows = menu.buttons.clone();
        if let Some(parent) = &menu.parent {
            if !rows.iter().flatten().any(|b| &b.token == parent) {
                let label = if parent == BACK_TOKEN {
                    self.messages.t("button-back-to-menu")
                } else {
                    self.messages.t("button-back")
                };
                rows.push(vec![Button::new(label, parent.clone())]);
            }
        }
        rows
    }

    fn menu_buttons(&self, id: &str) -> Keyboard {
        match self.catalog.menu(id) {
            Ok(menu) => self.menu_keyboard(menu),
            Err(_) => vec![vec![Button {
                label: self.messages.t("button-back-to-menu"),
                token: BACK_TOKEN.to_string(),
            }]],
        }
    }

    fn render_menu(&self, id: &str) -> RenderInstruction {
        let menu = match self.catalog.menu(id) {
            Ok(menu) => menu,
            Err(e) => {
                warn!(menu = %id, error = %e, "Menu missing from catalog");
                return self.render_unknown();
            }
        };

        let body = menu.body.clone().unwrap_or_else(|| format!("*{}*", menu.title));
        let image = menu
            .image
            .as_deref()
            .and_then(|relative| self.catalog.image(relative, self.probe.as_ref()));

        RenderInstruction::with_optional_image(body, TextFormat::Markdown, image, self.menu_keyboard(menu))
    }

    fn render_unknown(&self) -> RenderInstruction {
        RenderInstruction::text(
            self.messages.t("unknown-action"),
            TextFormat::Plain,
            self.menu_buttons("main"),
        )
    }

    fn render_category(&self, category: Category) -> RenderInstruction {
        let section = self.catalog.section(category);

        let mut caption = format!("*{}*", section.title);
        for (i, item) in section.items().iter().enumerate() {
            caption.push_str(&format!(
                "\n\n{} {}\n{}",
                keycap(i + 1),
                item.short_title,
                item.summary
            ));
        }

        let image = section
            .cover
            .as_deref()
            .and_then(|relative| self.catalog.image(relative, self.probe.as_ref()));

        RenderInstruction::with_optional_image(
            caption,
            TextFormat::Markdown,
            image,
            self.category_keyboard(category),
        )
    }

    fn render_item_detail(&self, category: Category, slug: &str) -> RenderInstruction {
        let item = match self.catalog.get_item(category, slug) {
            Ok(item) => item,
            Err(e) => {
                debug!(error = %e, "Guide item requested but not in catalog");
                return RenderInstruction::text(
                    self.messages.t("details-unavailable"),
                    TextFormat::Plain,
                    self.category_keyboard(category),
                );
            }
        };

        let body = format!(
            "*{}*\n\n{}\n{}\n{}",
            item.title,
            item.description,
            self.messages
                .get_message_with_args("detail-address", &[("address", item.address.as_str())]),
            self.messages
                .get_message_with_args("detail-site", &[("site", item.site_url.as_str())]),
        );
        let image = item
            .image
            .as_deref()
            .and_then(|relative| self.catalog.image(relative, self.probe.as_ref()));

        RenderInstruction::with_optional_image(
            body,
            TextFormat::Markdown,
            image,
            self.category_keyboard(category),
        )
    }

    fn render_artist_gallery(&self, key: &str) -> RenderInstruction {
        let artists_keyboard = self.menu_buttons("artists");

        let artist = match self.catalog.artist(key) {
            Ok(artist) => artist,
            Err(e) => {
                debug!(error = %e, "Artist requested but not in roster");
                return RenderInstruction::text(
                    self.messages.t("artist-not-found"),
                    TextFormat::Plain,
                    artists_keyboard,
                );
            }
        };

        let assets = self.catalog.artist_assets(key, self.probe.as_ref());
        if assets.is_empty() {
            return RenderInstruction::text(
                self.messages.t("artist-no-images"),
                TextFormat::Plain,
                artists_keyboard,
            );
        }

        let caption = self
            .messages
            .get_message_with_args("artist-gallery-caption", &[("name", artist.title_genitive.as_str())]);
        let items = assets
            .into_iter()
            .enumerate()
            .map(|(i, image)| MediaItem {
                image,
                caption: (i == 0).then(|| caption.clone()),
            })
            .collect();

        RenderInstruction::MediaGroup {
            items,
            followup_body: self.messages.t("artist-followup"),
            followup_buttons: artists_keyboard,
        }
    }
}

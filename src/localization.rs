use anyhow::{anyhow, Result};
use fluent_bundle::concurrent::FluentBundle;
use fluent_bundle::{FluentArgs, FluentResource, FluentValue};
use std::collections::HashMap;
use tracing::warn;
use unic_langid::LanguageIdentifier;

/// Locale of the interface strings
pub const DEFAULT_LOCALE: &str = "ru";

/// Interface strings compiled into the binary
const RU_MESSAGES: &str = include_str!("../locales/ru/main.ftl");

/// Localization manager for the guide bot's fixed interface strings
pub struct LocalizationManager {
    locale: LanguageIdentifier,
    bundle: FluentBundle<FluentResource>,
}

impl LocalizationManager {
    /// Create a manager from the embedded Russian resource
    pub fn new() -> Result<Self> {
        Self::from_source(DEFAULT_LOCALE, RU_MESSAGES)
    }

    /// Create a manager from Fluent source text
    pub fn from_source(locale: &str, source: &str) -> Result<Self> {
        let locale: LanguageIdentifier = locale.parse()?;
        let mut bundle = FluentBundle::new_concurrent(vec![locale.clone()]);
        // Captions are sent verbatim, no bidi isolation marks around arguments
        bundle.set_use_isolating(false);

        let resource = FluentResource::try_new(source.to_string())
            .map_err(|(_, errors)| anyhow!("Failed to parse Fluent resource: {errors:?}"))?;
        bundle
            .add_resource(resource)
            .map_err(|errors| anyhow!("Failed to add Fluent resource: {errors:?}"))?;

        Ok(Self { locale, bundle })
    }

    pub fn locale(&self) -> &LanguageIdentifier {
        &self.locale
    }

    /// Get a localized message
    pub fn get_message(&self, key: &str, args: Option<&HashMap<&str, &str>>) -> String {
        let msg = match self.bundle.get_message(key) {
            Some(msg) => msg,
            None => {
                warn!(key = %key, "Missing translation");
                return format!("Missing translation: {}", key);
            }
        };

        let pattern = match msg.value() {
            Some(pattern) => pattern,
            None => return format!("Missing value for key: {}", key),
        };

        let fluent_args = args.map(|args| {
            args.iter()
                .map(|(k, v)| (*k, FluentValue::from(*v)))
                .collect::<FluentArgs>()
        });

        let mut errors = vec![];
        let value = self
            .bundle
            .format_pattern(pattern, fluent_args.as_ref(), &mut errors);
        if !errors.is_empty() {
            warn!(key = %key, errors = ?errors, "Errors while formatting message");
        }

        value.into_owned()
    }

    /// Get a localized message with simple string arguments
    pub fn get_message_with_args(&self, key: &str, args: &[(&str, &str)]) -> String {
        let args_map: HashMap<&str, &str> = args.iter().cloned().collect();
        self.get_message(key, Some(&args_map))
    }

    /// Shorthand for a message without arguments
    pub fn t(&self, key: &str) -> String {
        self.get_message(key, None)
    }
}

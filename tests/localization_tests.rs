//! # Localization Tests
//!
//! This module contains unit tests for the interface strings, testing message
//! retrieval and argument formatting with various edge cases.

use moscow_art_bot::localization::{LocalizationManager, DEFAULT_LOCALE};
use std::collections::HashMap;

#[cfg(test)]
mod tests {
    use super::*;

    fn setup_localization() -> LocalizationManager {
        // Create a new localization manager for each test
        LocalizationManager::new().expect("Failed to create localization manager")
    }

    #[test]
    fn test_default_locale() {
        let manager = setup_localization();
        assert_eq!(manager.locale().to_string(), DEFAULT_LOCALE);
    }

    #[test]
    fn test_get_message_existing_key() {
        let manager = setup_localization();

        let message = manager.t("unknown-action");
        assert_eq!(message, "Неизвестное действие. Вернитесь в меню.");
    }

    #[test]
    fn test_get_message_nonexistent_key() {
        let manager = setup_localization();

        let message = manager.t("nonexistent-key");
        assert_eq!(message, "Missing translation: nonexistent-key");
    }

    #[test]
    fn test_get_message_with_args() {
        let manager = setup_localization();

        let mut args = HashMap::new();
        args.insert("name", "Пименова");

        let message = manager.get_message("artist-gallery-caption", Some(&args));
        // No bidi isolation marks around the argument
        assert_eq!(message, "Работы Пименова");
    }

    #[test]
    fn test_get_message_with_args_slice() {
        let manager = setup_localization();

        assert_eq!(
            manager.get_message_with_args("detail-address", &[("address", "ул. Волхонка, 12")]),
            "Адрес: ул. Волхонка, 12"
        );
        assert_eq!(
            manager.get_message_with_args("detail-site", &[("site", "https://garagemca.org/")]),
            "Сайт: https://garagemca.org/"
        );
    }

    #[test]
    fn test_get_message_missing_args() {
        let manager = setup_localization();

        // Missing arguments are reported by Fluent but still produce text
        let message = manager.t("detail-address");
        assert!(message.starts_with("Адрес: "));
    }

    #[test]
    fn test_help_text_is_multiline() {
        let manager = setup_localization();

        let help = manager.t("help-text");
        let lines: Vec<&str> = help.lines().collect();
        assert_eq!(lines.len(), 4);
        assert_eq!(lines[0], "Доступные команды:");
        assert!(lines[1].starts_with("/start"));
        assert!(lines[2].starts_with("/help"));
    }

    #[test]
    fn test_all_interface_keys_present() {
        let manager = setup_localization();

        let keys = [
            "help-text",
            "unknown-action",
            "details-unavailable",
            "detail-address",
            "detail-site",
            "button-back-to-guide",
            "artist-not-found",
            "artist-no-images",
            "artist-gallery-caption",
            "artist-followup",
            "button-back-to-menu",
            "button-back",
        ];

        for key in keys {
            let message = manager.t(key);
            assert!(!message.is_empty(), "Message for key '{}' should not be empty", key);
            assert!(
                !message.starts_with("Missing translation:"),
                "Key '{}' should be translated",
                key
            );
        }
    }

    #[test]
    fn test_from_source_custom_resource() {
        let manager = LocalizationManager::from_source("en", "greeting = Hello, { $name }!")
            .expect("Valid resource should load");

        assert_eq!(manager.locale().to_string(), "en");
        assert_eq!(
            manager.get_message_with_args("greeting", &[("name", "Moscow")]),
            "Hello, Moscow!"
        );
        assert!(manager.t("unknown-action").starts_with("Missing translation:"));
    }

    #[test]
    fn test_from_source_rejects_invalid_input() {
        assert!(LocalizationManager::from_source("ru", "broken = { $").is_err());
        assert!(LocalizationManager::from_source("not a locale!", "key = value").is_err());
    }
}

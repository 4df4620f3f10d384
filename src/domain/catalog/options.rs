//! The static option sets consumed by the flow engine.

use std::collections::HashMap;

use once_cell::sync::Lazy;

use super::entry::{Catalog, CatalogEntry};

/// Audience groups a communication can target.
pub const AUDIENCE: Catalog = Catalog::new(
    "audience",
    &[
        CatalogEntry::new("Users", "👥 Users"),
        CatalogEntry::new("Drivers", "🚗 Drivers"),
        CatalogEntry::new("Partner park", "🏢 Partner park"),
    ],
);

/// Stable value of the audience entry that selects the user-facing
/// communication-type catalog.
pub const AUDIENCE_USERS: &str = "Users";

/// Regions a communication can run in.
pub const REGIONS: Catalog = Catalog::new(
    "region",
    &[
        CatalogEntry::new("All regions", "🌎 All regions"),
        CatalogEntry::new("South&Central Africa", "🌍 South&Central Africa"),
        CatalogEntry::new("West Africa", "🌍 West Africa"),
        CatalogEntry::new("EMEA&Eur", "🌍 EMEA&Eur"),
        CatalogEntry::new("MENAP", "🌏 MENAP"),
        CatalogEntry::new("LatAm", "🌎 LatAm"),
        CatalogEntry::new("CIS", "🌍 CIS"),
        CatalogEntry::new("I don't know", "❓ I don't know"),
    ],
);

/// Stable value of the region entry that skips the country/city prompts.
pub const ALL_REGIONS: &str = "All regions";

/// Communication types offered when the audience includes Users.
pub const USER_COMMUNICATION_TYPES: Catalog = Catalog::new(
    "communication types",
    &[
        CatalogEntry::new("Push", "📱 Push"),
        CatalogEntry::new("SMS", "💬 SMS"),
        CatalogEntry::new("WhatsApp", "📲 WhatsApp"),
        CatalogEntry::new("Banner", "🖼️ Banner"),
        CatalogEntry::new("Stories", "📖 Stories"),
        CatalogEntry::new("Fullscreen", "📺 Fullscreen"),
        CatalogEntry::new("Plashka", "🎯 Plashka"),
        CatalogEntry::new("Object over the map", "🗺️ Object over the map"),
        CatalogEntry::new("Promo button", "🔘 Promo button"),
        CatalogEntry::new("Promo card", "🎫 Promo card"),
        CatalogEntry::new("Upsell card", "🎴 Upsell card"),
        CatalogEntry::new("Splashscreen", "✨ Splashscreen"),
        CatalogEntry::new("I don't know", "❓ I don't know"),
    ],
);

/// Communication types offered for driver-only audiences.
pub const DRIVER_COMMUNICATION_TYPES: Catalog = Catalog::new(
    "communication types",
    &[
        CatalogEntry::new("Push", "📱 Push"),
        CatalogEntry::new("SMS", "💬 SMS"),
        CatalogEntry::new("WhatsApp", "📲 WhatsApp"),
        CatalogEntry::new("Stories", "📖 Stories"),
        CatalogEntry::new("Fullscreen", "📺 Fullscreen"),
        CatalogEntry::new("Feed", "📰 Feed"),
        CatalogEntry::new("Object over the map", "🗺️ Object over the map"),
        CatalogEntry::new("I don't know", "❓ I don't know"),
    ],
);

/// Sentinel ending a multi-select phase.
pub const DONE_LABEL: &str = "✅ Done";

/// Navigation sentinel restoring the previous step.
pub const GO_BACK_LABEL: &str = "⬅️ Go back";

/// Navigation sentinel discarding the conversation.
pub const CANCEL_LABEL: &str = "❌ Cancel";

/// Entry action starting the full survey flow.
pub const CREATE_TASK_LABEL: &str = "📝 Create Task";

/// Entry action starting the minimal ticket flow.
pub const EMPTY_TICKET_LABEL: &str = "📄 Empty ticket";

/// Navigation labels appended to every prompt keyboard.
pub fn navigation_labels() -> Vec<String> {
    vec![GO_BACK_LABEL.to_string(), CANCEL_LABEL.to_string()]
}

static COUNTRY_FLAGS: Lazy<HashMap<&'static str, &'static str>> = Lazy::new(|| {
    HashMap::from([
        ("Russia", "🇷🇺"),
        ("Kazakhstan", "🇰🇿"),
        ("Belarus", "🇧🇾"),
        ("Ukraine", "🇺🇦"),
        ("Germany", "🇩🇪"),
        ("France", "🇫🇷"),
        ("Spain", "🇪🇸"),
        ("Italy", "🇮🇹"),
        ("United Kingdom", "🇬🇧"),
    ])
});

/// Flag glyph for a country name, if known.
pub fn country_flag(name: &str) -> Option<&'static str> {
    COUNTRY_FLAGS.get(name).copied()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn audience_resolves_label_to_value() {
        let entry = AUDIENCE.resolve("🚗 Drivers").unwrap();
        assert_eq!(entry.value(), "Drivers");
    }

    #[test]
    fn regions_include_all_regions_sentinel() {
        assert!(REGIONS.by_value(ALL_REGIONS).is_some());
    }

    #[test]
    fn user_catalog_is_wider_than_driver_catalog() {
        assert!(USER_COMMUNICATION_TYPES.entries().len() > DRIVER_COMMUNICATION_TYPES.entries().len());
    }

    #[test]
    fn driver_catalog_has_feed_but_not_banner() {
        assert!(DRIVER_COMMUNICATION_TYPES.by_value("Feed").is_some());
        assert!(DRIVER_COMMUNICATION_TYPES.by_value("Banner").is_none());
    }

    #[test]
    fn known_country_has_flag() {
        assert_eq!(country_flag("Germany"), Some("🇩🇪"));
    }

    #[test]
    fn unknown_country_has_no_flag() {
        assert_eq!(country_flag("Atlantis"), None);
    }

    #[test]
    fn navigation_labels_in_fixed_order() {
        assert_eq!(navigation_labels(), vec![GO_BACK_LABEL, CANCEL_LABEL]);
    }
}

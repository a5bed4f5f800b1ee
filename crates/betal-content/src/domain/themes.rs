//! Built-in story themes.

use serde::Serialize;

/// Descriptor shown by the theme picker.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Theme {
    /// Identifier used to query the catalog.
    pub id: &'static str,
    /// Display title.
    pub title: &'static str,
    /// One-line description.
    pub description: &'static str,
}

/// The themes offered by the bundled catalog.
pub const BUILTIN_THEMES: [Theme; 4] = [
    Theme {
        id: "wisdom",
        title: "Tales of Wisdom",
        description: "Stories that teach valuable life lessons",
    },
    Theme {
        id: "courage",
        title: "Tales of Courage",
        description: "Adventures of brave hearts and bold spirits",
    },
    Theme {
        id: "kindness",
        title: "Tales of Kindness",
        description: "Stories of compassion and good deeds",
    },
    Theme {
        id: "justice",
        title: "Tales of Justice",
        description: "Stories where truth and fairness prevail",
    },
];

/// Canonical form of a theme name: trimmed and lowercased (full Unicode).
/// Stories, tags and requested themes all go through this before comparison.
#[must_use]
pub fn normalize_theme(raw: &str) -> String {
    raw.trim().to_lowercase()
}

/// Looks up a built-in theme by id (case-insensitive).
#[must_use]
pub fn builtin_theme(id: &str) -> Option<&'static Theme> {
    let id = normalize_theme(id);
    BUILTIN_THEMES.iter().find(|t| t.id == id)
}

//! Domain types representing spending categories.

use std::borrow::Cow;

use serde::{Deserialize, Serialize};

use crate::domain::common::{Displayable, Identifiable};

pub type CategoryId = String;

/// Prefix carried by every user-defined category id.
pub const CUSTOM_ID_PREFIX: &str = "custom_";

pub const FALLBACK_ICON: &str = "📌";
pub const FALLBACK_COLOR: &str = "#888888";
pub const FALLBACK_LABEL: &str = "Transaction";

pub const DEFAULT_CUSTOM_ICON: &str = "📂";
pub const DEFAULT_CUSTOM_COLOR: &str = "#A78BFA";

/// Icons offered when creating a custom category.
pub const CUSTOM_ICONS: [&str; 18] = [
    "📂", "🏠", "✈️", "🐾", "🎮", "🎵", "💼", "🏋️", "🍺", "🎁", "💇", "🚿", "🌿", "🔧", "📱", "👗",
    "🎯", "💈",
];

/// Colors offered when creating a custom category.
pub const CUSTOM_COLORS: [&str; 15] = [
    "#FF6B6B", "#4ECDC4", "#FFE66D", "#A8E6CF", "#FF8B94", "#B4A7D6", "#78C8E6", "#98D8C8",
    "#A78BFA", "#F97316", "#34D399", "#60A5FA", "#F472B6", "#FBBF24", "#D4A5A5",
];

const BUILT_IN: [(&str, &str, &str, &str); 9] = [
    ("food", "Food & Dining", "🍽️", "#FF6B6B"),
    ("transport", "Transport", "🚗", "#4ECDC4"),
    ("shopping", "Shopping", "🛍️", "#FFE66D"),
    ("bills", "Bills & Utilities", "💡", "#A8E6CF"),
    ("health", "Health", "💊", "#FF8B94"),
    ("entertainment", "Entertainment", "🎬", "#B4A7D6"),
    ("education", "Education", "📚", "#78C8E6"),
    ("groceries", "Groceries", "🛒", "#98D8C8"),
    ("other", "Other", "📌", "#D4A5A5"),
];

/// Groups transactions for rollups and display.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Category {
    pub id: CategoryId,
    pub label: String,
    pub icon: String,
    pub color: String,
    #[serde(default)]
    pub custom: bool,
}

impl Category {
    /// The fixed built-in set, in display order.
    pub fn built_ins() -> Vec<Category> {
        BUILT_IN
            .iter()
            .map(|(id, label, icon, color)| Category {
                id: (*id).into(),
                label: (*label).into(),
                icon: (*icon).into(),
                color: (*color).into(),
                custom: false,
            })
            .collect()
    }

    pub fn is_built_in_id(id: &str) -> bool {
        BUILT_IN.iter().any(|(built_in, ..)| *built_in == id)
    }
}

impl Identifiable for Category {
    fn id(&self) -> &str {
        &self.id
    }
}

impl Displayable for Category {
    fn display_label(&self) -> String {
        format!("{} {}", self.icon, self.label)
    }
}

/// Input for a new custom category.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewCategory {
    pub label: String,
    pub icon: String,
    pub color: String,
}

impl NewCategory {
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            ..Self::default()
        }
    }

    pub fn with_icon(mut self, icon: impl Into<String>) -> Self {
        self.icon = icon.into();
        self
    }

    pub fn with_color(mut self, color: impl Into<String>) -> Self {
        self.color = color.into();
        self
    }
}

impl Default for NewCategory {
    fn default() -> Self {
        Self {
            label: String::new(),
            icon: DEFAULT_CUSTOM_ICON.into(),
            color: DEFAULT_CUSTOM_COLOR.into(),
        }
    }
}

/// Presentation view of a category id. Unknown ids resolve to the fallback
/// icon, color and label instead of failing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryView<'a> {
    pub id: Cow<'a, str>,
    pub label: Cow<'a, str>,
    pub icon: Cow<'a, str>,
    pub color: Cow<'a, str>,
    pub known: bool,
}

impl<'a> CategoryView<'a> {
    pub fn of(category: &'a Category) -> Self {
        Self {
            id: Cow::Borrowed(&category.id),
            label: Cow::Borrowed(&category.label),
            icon: Cow::Borrowed(&category.icon),
            color: Cow::Borrowed(&category.color),
            known: true,
        }
    }

    pub fn fallback(id: &'a str) -> Self {
        Self {
            id: Cow::Borrowed(id),
            label: Cow::Borrowed(FALLBACK_LABEL),
            icon: Cow::Borrowed(FALLBACK_ICON),
            color: Cow::Borrowed(FALLBACK_COLOR),
            known: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn built_ins_are_nine_with_unique_ids() {
        let cats = Category::built_ins();
        assert_eq!(cats.len(), 9);
        let mut ids: Vec<_> = cats.iter().map(|c| c.id.as_str()).collect();
        ids.sort_unstable();
        ids.dedup();
        assert_eq!(ids.len(), 9);
        assert!(cats.iter().all(|c| !c.custom));
        assert_eq!(cats[0].id, "food");
        assert_eq!(cats[8].id, "other");
    }

    #[test]
    fn custom_flag_defaults_to_false_when_missing() {
        let json = r##"{"id":"food","label":"Food","icon":"x","color":"#fff"}"##;
        let cat: Category = serde_json::from_str(json).unwrap();
        assert!(!cat.custom);
    }

    #[test]
    fn fallback_view_is_marked_unknown() {
        let view = CategoryView::fallback("custom_gone");
        assert!(!view.known);
        assert_eq!(view.icon, FALLBACK_ICON);
        assert_eq!(view.label, FALLBACK_LABEL);
    }
}

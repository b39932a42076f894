//! Committed preferences and the scratch draft edited by the settings surface.

use serde::{Deserialize, Serialize};

use crate::domain::common::{de_optional_amount, parse_amount_text};
use crate::errors::{Result, SpendError};

/// Values the rest of the application reads. Only changed by saving a draft
/// or by signing in with a budget.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Settings {
    #[serde(default = "default_notifications")]
    pub notifications: bool,
    #[serde(default, deserialize_with = "de_optional_amount")]
    pub budget: Option<f64>,
}

fn default_notifications() -> bool {
    true
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            notifications: default_notifications(),
            budget: None,
        }
    }
}

/// Scratch copy of settings plus the editable profile fields.
#[derive(Debug, Clone, PartialEq)]
pub struct SettingsDraft {
    pub notifications: bool,
    pub budget: Option<f64>,
    pub name: String,
    pub email: String,
}

/// One edit applied to an open draft.
#[derive(Debug, Clone, PartialEq)]
pub enum SettingsField {
    Name(String),
    Email(String),
    Budget(Option<f64>),
    Notifications(bool),
    ToggleNotifications,
}

impl SettingsDraft {
    pub fn apply(&mut self, field: SettingsField) {
        match field {
            SettingsField::Name(name) => self.name = name,
            SettingsField::Email(email) => self.email = email,
            SettingsField::Budget(budget) => self.budget = budget,
            SettingsField::Notifications(on) => self.notifications = on,
            SettingsField::ToggleNotifications => self.notifications = !self.notifications,
        }
    }

    pub fn settings(&self) -> Settings {
        Settings {
            notifications: self.notifications,
            budget: self.budget,
        }
    }
}

/// Persisted shape of the settings record: committed values plus the
/// denormalized profile fields.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SettingsRecord {
    #[serde(flatten)]
    pub settings: Settings,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
}

/// Parses budget input: blank disables the budget, anything else must be numeric.
pub fn parse_budget(raw: &str) -> Result<Option<f64>> {
    if raw.trim().is_empty() {
        return Ok(None);
    }
    parse_amount_text(raw)
        .map(Some)
        .ok_or_else(|| SpendError::validation(format!("Budget `{}` is not a number", raw.trim())))
}

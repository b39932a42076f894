//! Two-phase editing of preferences and profile fields.

use crate::domain::profile::UserProfile;
use crate::domain::settings::{Settings, SettingsDraft, SettingsField, SettingsRecord};
use crate::errors::{Result, SpendError};
use crate::storage::{load_record, save_record, KeyValueStore, Loaded, StorageKey};

/// Reads the committed settings. The boolean reports a corrupt record.
pub fn hydrate_settings(store: &dyn KeyValueStore) -> Result<(Settings, bool)> {
    let loaded: Loaded<SettingsRecord> = load_record(store, StorageKey::Settings)?;
    let corrupt = loaded.is_corrupt();
    let settings = loaded
        .into_option()
        .map(|record| record.settings)
        .unwrap_or_default();
    Ok((settings, corrupt))
}

/// Edits happen on a draft; committed values change only on `save`.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum SettingsEditor {
    #[default]
    Closed,
    Open(SettingsDraft),
}

impl SettingsEditor {
    /// Snapshots committed values into a fresh draft, replacing any open one.
    pub fn open(&mut self, settings: &Settings, profile: &UserProfile) {
        *self = SettingsEditor::Open(SettingsDraft {
            notifications: settings.notifications,
            budget: settings.budget,
            name: profile.name.clone(),
            email: profile.email.clone(),
        });
    }

    pub fn is_open(&self) -> bool {
        matches!(self, SettingsEditor::Open(_))
    }

    pub fn draft(&self) -> Option<&SettingsDraft> {
        match self {
            SettingsEditor::Open(draft) => Some(draft),
            SettingsEditor::Closed => None,
        }
    }

    /// Applies `field` to the draft. Returns `false` when the editor is closed.
    pub fn edit(&mut self, field: SettingsField) -> bool {
        match self {
            SettingsEditor::Open(draft) => {
                draft.apply(field);
                true
            }
            SettingsEditor::Closed => false,
        }
    }

    /// Validates the draft, persists profile and settings, then commits both
    /// in memory and closes. On error nothing in memory changes and the
    /// draft stays open.
    pub fn save(
        &mut self,
        store: &dyn KeyValueStore,
        settings: &mut Settings,
        profile: &mut UserProfile,
    ) -> Result<()> {
        let draft = match self {
            SettingsEditor::Open(draft) => draft,
            SettingsEditor::Closed => {
                return Err(SpendError::InvalidOperation(
                    "settings are not open".to_string(),
                ))
            }
        };
        let name = draft.name.trim();
        let email = draft.email.trim();
        if name.is_empty() || email.is_empty() {
            return Err(SpendError::validation("Name and email can't be empty"));
        }

        let mut next_profile = profile.clone();
        next_profile.rename(name);
        next_profile.email = email.to_string();
        let next_settings = draft.settings();
        let record = SettingsRecord {
            settings: next_settings.clone(),
            name: next_profile.name.clone(),
            email: next_profile.email.clone(),
        };
        save_record(store, StorageKey::Profile, &next_profile)?;
        save_record(store, StorageKey::Settings, &record)?;

        *profile = next_profile;
        *settings = next_settings;
        *self = SettingsEditor::Closed;
        tracing::info!(
            notifications = settings.notifications,
            budget = ?settings.budget,
            "settings saved"
        );
        Ok(())
    }

    /// Discards the draft. Returns whether a draft was open.
    pub fn cancel(&mut self) -> bool {
        let was_open = self.is_open();
        *self = SettingsEditor::Closed;
        was_open
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStore;

    fn committed() -> (Settings, UserProfile) {
        (
            Settings {
                notifications: true,
                budget: Some(1000.0),
            },
            UserProfile::new("Asha Rao", "asha@example.com"),
        )
    }

    #[test]
    fn cancelled_draft_does_not_leak_into_next_open() {
        let (settings, profile) = committed();
        let mut editor = SettingsEditor::default();
        editor.open(&settings, &profile);
        assert!(editor.edit(SettingsField::Budget(Some(5.0))));
        assert!(editor.edit(SettingsField::Name("Someone".into())));
        assert!(editor.cancel());

        editor.open(&settings, &profile);
        let draft = editor.draft().unwrap();
        assert_eq!(draft.budget, Some(1000.0));
        assert_eq!(draft.name, "Asha Rao");
    }

    #[test]
    fn edit_while_closed_is_ignored() {
        let mut editor = SettingsEditor::Closed;
        assert!(!editor.edit(SettingsField::ToggleNotifications));
        assert!(!editor.cancel());
    }

    #[test]
    fn save_with_empty_email_leaves_everything_unchanged() {
        let store = MemoryStore::new();
        let (mut settings, mut profile) = committed();
        let before = (settings.clone(), profile.clone());
        let mut editor = SettingsEditor::default();
        editor.open(&settings, &profile);
        editor.edit(SettingsField::Email("   ".into()));
        editor.edit(SettingsField::Budget(None));

        let err = editor.save(&store, &mut settings, &mut profile).unwrap_err();
        assert_eq!(err.to_string(), "Name and email can't be empty");
        assert_eq!((settings, profile), before);
        assert!(editor.is_open());
        assert_eq!(editor.draft().map(|d| d.budget), Some(None));
        assert!(store.is_empty());
    }

    #[test]
    fn save_while_closed_is_invalid() {
        let store = MemoryStore::new();
        let (mut settings, mut profile) = committed();
        let err = SettingsEditor::Closed
            .save(&store, &mut settings, &mut profile)
            .unwrap_err();
        assert!(matches!(err, SpendError::InvalidOperation(_)));
    }

    #[test]
    fn save_commits_profile_and_settings() {
        let store = MemoryStore::new();
        let (mut settings, mut profile) = committed();
        let mut editor = SettingsEditor::default();
        editor.open(&settings, &profile);
        editor.edit(SettingsField::Name(" bela ".into()));
        editor.edit(SettingsField::ToggleNotifications);
        editor.save(&store, &mut settings, &mut profile).unwrap();

        assert_eq!(editor, SettingsEditor::Closed);
        assert_eq!(profile.name, "bela");
        assert_eq!(profile.avatar, "B");
        assert!(!settings.notifications);

        let (reloaded, corrupt) = hydrate_settings(&store).unwrap();
        assert!(!corrupt);
        assert_eq!(reloaded, settings);
    }
}

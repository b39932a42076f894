use crate::domain::profile::UserProfile;
use crate::domain::upi::UpiApp;
use crate::errors::{Result, SpendError};
use crate::storage::{load_record, remove_record, save_record, KeyValueStore, Loaded, StorageKey};

/// Fields collected by the sign-in and sign-up forms.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Credentials {
    pub name: String,
    pub email: String,
    /// Checked for presence only; never stored.
    pub password: String,
    pub budget: Option<f64>,
    pub upi_app: Option<UpiApp>,
}

impl Credentials {
    pub fn new(
        name: impl Into<String>,
        email: impl Into<String>,
        password: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            email: email.into(),
            password: password.into(),
            ..Self::default()
        }
    }

    pub fn with_budget(mut self, budget: Option<f64>) -> Self {
        self.budget = budget;
        self
    }

    pub fn with_upi_app(mut self, app: UpiApp) -> Self {
        self.upi_app = Some(app);
        self
    }

    fn validate(&self) -> Result<()> {
        let blank = [&self.name, &self.email, &self.password]
            .iter()
            .any(|field| field.trim().is_empty());
        if blank {
            return Err(SpendError::validation("Fill all fields"));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub enum Session {
    #[default]
    SignedOut,
    SignedIn(UserProfile),
}

impl Session {
    /// A stored profile means the user is already signed in.
    pub fn hydrate(store: &dyn KeyValueStore) -> Result<(Self, bool)> {
        let loaded: Loaded<UserProfile> = load_record(store, StorageKey::Profile)?;
        let corrupt = loaded.is_corrupt();
        let session = match loaded.into_option() {
            Some(mut profile) => {
                // Older records may lack the avatar.
                let name = profile.name.clone();
                profile.rename(name);
                Session::SignedIn(profile)
            }
            None => Session::SignedOut,
        };
        Ok((session, corrupt))
    }

    pub fn profile(&self) -> Option<&UserProfile> {
        match self {
            Session::SignedIn(profile) => Some(profile),
            Session::SignedOut => None,
        }
    }

    pub fn profile_mut(&mut self) -> Option<&mut UserProfile> {
        match self {
            Session::SignedIn(profile) => Some(profile),
            Session::SignedOut => None,
        }
    }

    pub fn is_signed_in(&self) -> bool {
        matches!(self, Session::SignedIn(_))
    }

    /// Validates the form, persists a fresh profile and signs in. Any
    /// existing profile is replaced.
    pub fn sign_in(
        &mut self,
        store: &dyn KeyValueStore,
        credentials: &Credentials,
    ) -> Result<UserProfile> {
        credentials.validate()?;
        let profile = UserProfile::new(credentials.name.trim(), credentials.email.trim());
        save_record(store, StorageKey::Profile, &profile)?;
        tracing::info!(email = %profile.email, "signed in");
        *self = Session::SignedIn(profile.clone());
        Ok(profile)
    }

    /// Removes the stored profile. Signing out twice is harmless.
    pub fn sign_out(&mut self, store: &dyn KeyValueStore) -> Result<()> {
        remove_record(store, StorageKey::Profile)?;
        if self.is_signed_in() {
            tracing::info!("signed out");
        }
        *self = Session::SignedOut;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStore;

    #[test]
    fn blank_fields_are_rejected() {
        let store = MemoryStore::new();
        let mut session = Session::default();
        for creds in [
            Credentials::new("", "a@x", "pw"),
            Credentials::new("Asha", " ", "pw"),
            Credentials::new("Asha", "a@x", ""),
        ] {
            let err = session.sign_in(&store, &creds).unwrap_err();
            assert_eq!(err.to_string(), "Fill all fields");
        }
        assert!(!session.is_signed_in());
        assert!(store.is_empty());
    }

    #[test]
    fn sign_in_persists_profile_without_password() {
        let store = MemoryStore::new();
        let mut session = Session::default();
        let profile = session
            .sign_in(&store, &Credentials::new("asha rao", "asha@x", "hunter2"))
            .unwrap();
        assert_eq!(profile.avatar, "A");

        let raw = store.load(StorageKey::Profile.as_str()).unwrap().unwrap();
        assert!(!raw.contains("hunter2"));

        let (restored, corrupt) = Session::hydrate(&store).unwrap();
        assert!(!corrupt);
        assert_eq!(restored, session);
    }

    #[test]
    fn sign_out_removes_profile() {
        let store = MemoryStore::new();
        let mut session = Session::default();
        session
            .sign_in(&store, &Credentials::new("Asha", "a@x", "pw"))
            .unwrap();
        session.sign_out(&store).unwrap();
        assert_eq!(session, Session::SignedOut);
        assert!(store.is_empty());
        session.sign_out(&store).unwrap();
    }
}

use serde::{Deserialize, Serialize};

/// The single local user. `avatar` is derived from `name` and recomputed on
/// every rename.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct UserProfile {
    pub name: String,
    pub email: String,
    #[serde(default)]
    pub avatar: String,
}

impl UserProfile {
    pub fn new(name: impl Into<String>, email: impl Into<String>) -> Self {
        let name = name.into();
        Self {
            avatar: avatar_for(&name),
            name,
            email: email.into(),
        }
    }

    pub fn rename(&mut self, name: impl Into<String>) {
        self.name = name.into();
        self.avatar = avatar_for(&self.name);
    }

    pub fn first_name(&self) -> &str {
        self.name.split_whitespace().next().unwrap_or("")
    }
}

/// First non-whitespace character of `name`, uppercased.
pub fn avatar_for(name: &str) -> String {
    name.trim_start()
        .chars()
        .next()
        .map(|c| c.to_uppercase().collect())
        .unwrap_or_default()
}

/// Time-of-day salutation for the header greeting.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Greeting {
    Morning,
    Afternoon,
    Evening,
}

impl Greeting {
    pub fn for_hour(hour: u32) -> Self {
        match hour {
            0..=11 => Greeting::Morning,
            12..=16 => Greeting::Afternoon,
            _ => Greeting::Evening,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Greeting::Morning => "Morning",
            Greeting::Afternoon => "Afternoon",
            Greeting::Evening => "Evening",
        }
    }

    pub fn render(self, profile: &UserProfile) -> String {
        format!("Good {}, {} 👋", self.as_str(), profile.first_name())
    }
}

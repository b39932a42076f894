pub mod category;
pub mod common;
pub mod profile;
pub mod settings;
pub mod transaction;
pub mod upi;

pub use category::{Category, CategoryId, CategoryView, NewCategory};
pub use common::{Displayable, Identifiable};
pub use profile::{Greeting, UserProfile};
pub use settings::{Settings, SettingsDraft, SettingsField, SettingsRecord};
pub use transaction::{Transaction, TransactionDraft, TransactionId, TransactionKind};
pub use upi::UpiApp;

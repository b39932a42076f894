pub mod category_service;
pub mod session_service;
pub mod settings_service;
pub mod summary_service;
pub mod transaction_service;

pub use category_service::CategoryRegistry;
pub use session_service::{Credentials, Session};
pub use settings_service::{hydrate_settings, SettingsEditor};
pub use summary_service::{
    BudgetProgress, CategoryBreakdown, CategoryTotal, DailyTotals, DashboardSummary,
    SelectionTotals, SummaryService, TopCategory,
};
pub use transaction_service::TransactionStore;

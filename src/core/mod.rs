pub mod app;
pub mod ids;
pub mod notifications;
pub mod services;
pub mod time;
pub mod utils;

pub use app::{HydrationReport, PendingUpi, SpendWise, TransactionRow};
pub use ids::{IdGenerator, RandomIds, SequentialIds};
pub use notifications::{Notice, NoticeKind, Notifier};
pub use time::{Clock, FixedClock, SystemClock};

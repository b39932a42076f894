use chrono::NaiveDate;

use crate::config::Config;
use crate::core::ids::{IdGenerator, RandomIds};
use crate::core::notifications::{Notice, Notifier};
use crate::core::services::{
    hydrate_settings, CategoryRegistry, Credentials, DashboardSummary, Session, SettingsEditor,
    SummaryService, TransactionStore,
};
use crate::core::time::{Clock, SystemClock};
use crate::currency::CurrencyFormat;
use crate::domain::category::{Category, CategoryId, NewCategory};
use crate::domain::common::parse_amount_text;
use crate::domain::profile::{Greeting, UserProfile};
use crate::domain::settings::{Settings, SettingsDraft, SettingsField};
use crate::domain::transaction::{Transaction, TransactionDraft, TransactionKind};
use crate::domain::upi::UpiApp;
use crate::errors::{Result, SpendError};
use crate::storage::{KeyValueStore, StorageKey};

/// Records that failed to decode at startup and were treated as absent.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HydrationReport {
    pub corrupt: Vec<StorageKey>,
}

impl HydrationReport {
    pub fn is_clean(&self) -> bool {
        self.corrupt.is_empty()
    }

    pub fn warnings(&self) -> Vec<String> {
        self.corrupt
            .iter()
            .map(|key| format!("stored record `{key}` was unreadable and has been ignored"))
            .collect()
    }
}

/// An imported UPI payment waiting for a category before it is recorded.
#[derive(Debug, Clone, PartialEq)]
pub struct PendingUpi {
    pub app: UpiApp,
    pub amount: f64,
    pub category: Option<CategoryId>,
}

impl PendingUpi {
    pub fn note(&self) -> String {
        self.app.payment_note()
    }
}

/// A transaction resolved against the category registry for display.
#[derive(Debug, Clone, PartialEq)]
pub struct TransactionRow {
    pub id: String,
    pub title: String,
    pub icon: String,
    pub color: String,
    pub category_label: String,
    pub kind: TransactionKind,
    pub amount: f64,
    /// Signed and formatted, e.g. `-₹120`.
    pub amount_text: String,
    pub date: NaiveDate,
    pub time: String,
}

/// Facade that owns application state and mirrors mutations to storage.
pub struct SpendWise {
    store: Box<dyn KeyValueStore>,
    clock: Box<dyn Clock>,
    ids: Box<dyn IdGenerator>,
    categories: CategoryRegistry,
    transactions: TransactionStore,
    settings: Settings,
    session: Session,
    editor: SettingsEditor,
    notifier: Notifier,
    pending: Option<PendingUpi>,
    preferred_upi: Option<UpiApp>,
    currency: CurrencyFormat,
    hydration: HydrationReport,
}

impl SpendWise {
    /// Hydrates from `store` using the system clock, random ids and default config.
    pub fn open(store: Box<dyn KeyValueStore>) -> Result<Self> {
        Self::open_with(
            store,
            Box::new(SystemClock),
            Box::new(RandomIds),
            &Config::default(),
        )
    }

    pub fn open_with(
        store: Box<dyn KeyValueStore>,
        clock: Box<dyn Clock>,
        ids: Box<dyn IdGenerator>,
        config: &Config,
    ) -> Result<Self> {
        let (session, profile_bad) = Session::hydrate(&*store)?;
        let (transactions, tx_bad) = TransactionStore::hydrate(&*store)?;
        let (settings, settings_bad) = hydrate_settings(&*store)?;
        let (categories, cats_bad) = CategoryRegistry::hydrate(&*store)?;

        let corrupt = [
            (StorageKey::Profile, profile_bad),
            (StorageKey::Transactions, tx_bad),
            (StorageKey::Settings, settings_bad),
            (StorageKey::CustomCategories, cats_bad),
        ]
        .into_iter()
        .filter_map(|(key, bad)| bad.then_some(key))
        .collect();
        let hydration = HydrationReport { corrupt };
        if !hydration.is_clean() {
            tracing::warn!(corrupt = ?hydration.corrupt, "hydrated with unreadable records");
        }
        tracing::info!(
            signed_in = session.is_signed_in(),
            transactions = transactions.len(),
            custom_categories = categories.custom().len(),
            "state hydrated"
        );

        Ok(Self {
            store,
            clock,
            ids,
            categories,
            transactions,
            settings,
            session,
            editor: SettingsEditor::Closed,
            notifier: Notifier::new(config.notice_ttl_secs),
            pending: None,
            preferred_upi: None,
            currency: config.currency_format(),
            hydration,
        })
    }

    pub fn hydration(&self) -> &HydrationReport {
        &self.hydration
    }

    // ----- session -----

    pub fn sign_in(&mut self, credentials: Credentials) -> Result<UserProfile> {
        self.enter(credentials, false)
    }

    /// Like [`Self::sign_in`], also remembering the preferred UPI app for
    /// this session.
    pub fn sign_up(&mut self, credentials: Credentials) -> Result<UserProfile> {
        self.enter(credentials, true)
    }

    fn enter(&mut self, credentials: Credentials, remember_upi: bool) -> Result<UserProfile> {
        let result = self.session.sign_in(&*self.store, &credentials);
        if result.is_ok() {
            self.settings.budget = credentials.budget;
            self.editor.cancel();
            if remember_upi {
                self.preferred_upi = credentials.upi_app;
            }
        }
        self.report(result, |profile| Some(format!("Welcome, {}! 🎉", profile.name)))
    }

    /// Forgets the profile and empties the transaction list, on disk too.
    pub fn sign_out(&mut self) -> Result<()> {
        let result = self.leave();
        self.report(result, |_| None)
    }

    fn leave(&mut self) -> Result<()> {
        let previous = self.transactions.list_all().to_vec();
        self.transactions.clear(&*self.store)?;
        if let Err(err) = self.session.sign_out(&*self.store) {
            self.transactions.restore(&*self.store, previous)?;
            return Err(err);
        }
        self.editor.cancel();
        self.pending = None;
        self.preferred_upi = None;
        Ok(())
    }

    pub fn profile(&self) -> Option<&UserProfile> {
        self.session.profile()
    }

    pub fn is_signed_in(&self) -> bool {
        self.session.is_signed_in()
    }

    pub fn greeting(&self) -> Option<String> {
        let profile = self.session.profile()?;
        Some(Greeting::for_hour(self.clock.hour()).render(profile))
    }

    // ----- transactions -----

    /// Records a transaction as given. Amount is not validated.
    pub fn add_transaction(
        &mut self,
        amount: f64,
        note: Option<String>,
        category: CategoryId,
        kind: TransactionKind,
    ) -> Result<Transaction> {
        let result = self.record(amount, note, category, kind);
        self.report(result, |txn| Some(added_message(txn.kind)))
    }

    /// Validates form input and records it.
    pub fn add_manual(&mut self, draft: TransactionDraft) -> Result<Transaction> {
        let result = self.record_draft(draft);
        self.report(result, |txn| Some(added_message(txn.kind)))
    }

    fn record_draft(&mut self, draft: TransactionDraft) -> Result<Transaction> {
        let category = draft
            .category
            .filter(|id| !id.trim().is_empty())
            .filter(|_| !draft.amount.trim().is_empty())
            .ok_or_else(|| SpendError::validation("Fill amount & category"))?;
        let amount = parse_amount_text(&draft.amount)
            .ok_or_else(|| SpendError::validation("Enter valid amount"))?;
        self.record(amount, Some(draft.note), category, draft.kind)
    }

    fn record(
        &mut self,
        amount: f64,
        note: Option<String>,
        category: CategoryId,
        kind: TransactionKind,
    ) -> Result<Transaction> {
        self.require_signed_in()?;
        self.transactions.add(
            &*self.store,
            &*self.clock,
            &*self.ids,
            amount,
            note,
            category,
            kind,
        )
    }

    /// Opens a pending expense for a simulated UPI payment. `app` defaults to
    /// the preferred app chosen at sign-up.
    pub fn import_upi(&mut self, app: Option<UpiApp>, amount_text: &str) -> Result<PendingUpi> {
        let result = self.stage_upi(app, amount_text);
        self.report(result, |_| None)
    }

    fn stage_upi(&mut self, app: Option<UpiApp>, amount_text: &str) -> Result<PendingUpi> {
        self.require_signed_in()?;
        let amount = parse_amount_text(amount_text)
            .ok_or_else(|| SpendError::validation("Enter valid amount"))?;
        let pending = PendingUpi {
            app: app.or(self.preferred_upi).unwrap_or_default(),
            amount,
            category: None,
        };
        tracing::debug!(app = %pending.app, amount, "UPI payment staged");
        self.pending = Some(pending.clone());
        Ok(pending)
    }

    pub fn pending_upi(&self) -> Option<&PendingUpi> {
        self.pending.as_ref()
    }

    pub fn preferred_upi(&self) -> Option<UpiApp> {
        self.preferred_upi
    }

    pub fn choose_pending_category(&mut self, id: impl Into<CategoryId>) -> Result<()> {
        let id = id.into();
        let result = match self.pending.as_mut() {
            Some(pending) => self.categories.require(&id).map(|_| {
                pending.category = Some(id);
            }),
            None => Err(no_pending_payment()),
        };
        self.report(result, |_| None)
    }

    /// Records the pending payment. Without a category the draft is kept and
    /// an error is returned.
    pub fn confirm_pending(&mut self) -> Result<Transaction> {
        let result = self.commit_pending();
        self.report(result, |txn| Some(added_message(txn.kind)))
    }

    fn commit_pending(&mut self) -> Result<Transaction> {
        let pending = self.pending.clone().ok_or_else(no_pending_payment)?;
        let category = pending
            .category
            .clone()
            .ok_or_else(|| SpendError::validation("Pick a category"))?;
        let txn = self.record(
            pending.amount,
            Some(pending.note()),
            category,
            TransactionKind::Expense,
        )?;
        self.pending = None;
        Ok(txn)
    }

    /// Drops the pending payment. Returns whether one existed.
    pub fn discard_pending(&mut self) -> bool {
        self.pending.take().is_some()
    }

    pub fn delete_transaction(&mut self, id: &str) -> Result<bool> {
        let result = self
            .require_signed_in()
            .and_then(|_| self.transactions.remove(&*self.store, id));
        self.report(result, |_| Some("Transaction removed".into()))
    }

    pub fn clear_transactions(&mut self) -> Result<usize> {
        let result = self
            .require_signed_in()
            .and_then(|_| self.transactions.clear(&*self.store));
        if result.is_ok() {
            self.editor.cancel();
        }
        self.report(result, |_| Some("All transactions cleared".into()))
    }

    pub fn transactions(&self) -> &[Transaction] {
        self.transactions.list_all()
    }

    // ----- categories -----

    pub fn categories(&self) -> &CategoryRegistry {
        &self.categories
    }

    pub fn add_category(&mut self, new: NewCategory) -> Result<Category> {
        let result = self
            .require_signed_in()
            .and_then(|_| self.categories.add(&*self.store, &*self.ids, new));
        self.report(result, |cat| Some(format!("Category \"{}\" added!", cat.label)))
    }

    /// Removes a custom category; transactions that use it keep their id.
    pub fn remove_category(&mut self, id: &str) -> Result<bool> {
        let result = self
            .require_signed_in()
            .and_then(|_| self.categories.remove(&*self.store, id));
        self.report(result, |_| Some("Category removed".into()))
    }

    // ----- settings -----

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Opens the editor on a fresh snapshot of committed values.
    pub fn open_settings(&mut self) -> Result<SettingsDraft> {
        let result = match self.session.profile() {
            Some(profile) => {
                self.editor.open(&self.settings, profile);
                self.editor
                    .draft()
                    .cloned()
                    .ok_or_else(|| SpendError::InvalidOperation("settings did not open".into()))
            }
            None => Err(signed_out()),
        };
        self.report(result, |_| None)
    }

    pub fn settings_draft(&self) -> Option<&SettingsDraft> {
        self.editor.draft()
    }

    pub fn edit_settings(&mut self, field: SettingsField) -> bool {
        self.editor.edit(field)
    }

    pub fn save_settings(&mut self) -> Result<()> {
        let result = match self.session.profile_mut() {
            Some(profile) => self.editor.save(&*self.store, &mut self.settings, profile),
            None => Err(signed_out()),
        };
        self.report(result, |_| Some("Settings saved ✓".into()))
    }

    pub fn cancel_settings(&mut self) -> bool {
        self.editor.cancel()
    }

    // ----- reporting -----

    pub fn today(&self) -> NaiveDate {
        self.clock.today()
    }

    /// Dashboard rollups. `selected` narrows the multi-select totals; an
    /// empty slice means every category.
    pub fn dashboard(&self, selected: &[CategoryId]) -> DashboardSummary {
        SummaryService::dashboard(
            self.transactions.list_all(),
            &self.categories,
            self.clock.today(),
            self.settings.budget,
            selected,
        )
    }

    /// "Most spent on <icon> <label> (<total> total)", absent until something
    /// has been spent.
    pub fn insight(&self) -> Option<String> {
        let top = self.dashboard(&[]).top?;
        Some(format!(
            "Most spent on {} {} ({} total)",
            top.icon,
            top.label,
            self.currency.format(top.total)
        ))
    }

    pub fn row(&self, txn: &Transaction) -> TransactionRow {
        let view = self.categories.resolve(&txn.category);
        let title = txn.title(&view);
        TransactionRow {
            id: txn.id.clone(),
            title,
            icon: view.icon.into_owned(),
            color: view.color.into_owned(),
            category_label: view.label.into_owned(),
            kind: txn.kind,
            amount: txn.amount,
            amount_text: self.currency.format_signed(txn.kind.sign(), txn.amount),
            date: txn.date,
            time: txn.time.clone(),
        }
    }

    pub fn rows(&self) -> Vec<TransactionRow> {
        self.transactions
            .list_all()
            .iter()
            .map(|txn| self.row(txn))
            .collect()
    }

    pub fn currency(&self) -> &CurrencyFormat {
        &self.currency
    }

    // ----- notices -----

    /// The notice still visible now, if any.
    pub fn active_notice(&self) -> Option<&Notice> {
        self.notifier.active(self.clock.now())
    }

    pub fn take_notice(&mut self) -> Option<Notice> {
        self.notifier.take()
    }

    fn require_signed_in(&self) -> Result<()> {
        if self.session.is_signed_in() {
            Ok(())
        } else {
            Err(signed_out())
        }
    }

    /// Posts the outcome of an operation as a notice and passes it through.
    fn report<T>(&mut self, result: Result<T>, success: impl FnOnce(&T) -> Option<String>) -> Result<T> {
        let now = self.clock.now();
        match &result {
            Ok(value) => {
                if let Some(message) = success(value) {
                    self.notifier.success(message, now);
                }
            }
            Err(err) => {
                if err.is_user_facing() {
                    tracing::debug!(error = %err, "operation rejected");
                } else {
                    tracing::error!(error = %err, "operation failed");
                }
                self.notifier.error(err.to_string(), now);
            }
        }
        result
    }
}

fn added_message(kind: TransactionKind) -> String {
    match kind {
        TransactionKind::Expense => "Expense added!".into(),
        TransactionKind::Income => "Income added!".into(),
    }
}

fn signed_out() -> SpendError {
    SpendError::InvalidOperation("sign in first".into())
}

fn no_pending_payment() -> SpendError {
    SpendError::InvalidOperation("no pending UPI payment".into())
}

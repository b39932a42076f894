//! The ordered transaction collection and its query helpers.

use chrono::NaiveDate;

use crate::core::ids::IdGenerator;
use crate::core::time::Clock;
use crate::domain::category::CategoryId;
use crate::domain::transaction::{Transaction, TransactionKind};
use crate::errors::Result;
use crate::storage::{load_record, save_record, KeyValueStore, Loaded, StorageKey};

/// Owns the transactions, newest first. That order is also the display order.
#[derive(Debug, Clone, Default)]
pub struct TransactionStore {
    items: Vec<Transaction>,
}

impl TransactionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reads the persisted collection. The boolean reports a corrupt record.
    pub fn hydrate(store: &dyn KeyValueStore) -> Result<(Self, bool)> {
        let loaded: Loaded<Vec<Transaction>> = load_record(store, StorageKey::Transactions)?;
        let corrupt = loaded.is_corrupt();
        Ok((
            Self {
                items: loaded.into_option().unwrap_or_default(),
            },
            corrupt,
        ))
    }

    /// Stamps and prepends a new record, then persists the whole collection.
    /// Amount sign and format are the caller's concern.
    #[allow(clippy::too_many_arguments)]
    pub fn add(
        &mut self,
        store: &dyn KeyValueStore,
        clock: &dyn Clock,
        ids: &dyn IdGenerator,
        amount: f64,
        note: Option<String>,
        category: CategoryId,
        kind: TransactionKind,
    ) -> Result<Transaction> {
        let txn = Transaction::stamped(ids.new_id(), amount, note, category, kind, clock.now());
        let mut updated = Vec::with_capacity(self.items.len() + 1);
        updated.push(txn.clone());
        updated.extend(self.items.iter().cloned());
        self.replace(store, updated)?;
        tracing::info!(id = %txn.id, kind = %txn.kind, amount = txn.amount, "transaction added");
        Ok(txn)
    }

    /// Drops the record with `id`. Returns whether anything was removed.
    pub fn remove(&mut self, store: &dyn KeyValueStore, id: &str) -> Result<bool> {
        let updated: Vec<Transaction> = self
            .items
            .iter()
            .filter(|txn| txn.id != id)
            .cloned()
            .collect();
        let removed = updated.len() != self.items.len();
        self.replace(store, updated)?;
        if removed {
            tracing::info!(id, "transaction removed");
        }
        Ok(removed)
    }

    pub fn clear(&mut self, store: &dyn KeyValueStore) -> Result<usize> {
        let count = self.items.len();
        self.replace(store, Vec::new())?;
        tracing::info!(count, "transactions cleared");
        Ok(count)
    }

    /// Writes `items` back as the whole collection, e.g. to undo a clear.
    pub fn restore(&mut self, store: &dyn KeyValueStore, items: Vec<Transaction>) -> Result<()> {
        self.replace(store, items)
    }

    pub fn list_all(&self) -> &[Transaction] {
        &self.items
    }

    pub fn get(&self, id: &str) -> Option<&Transaction> {
        self.items.iter().find(|txn| txn.id == id)
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    fn replace(&mut self, store: &dyn KeyValueStore, updated: Vec<Transaction>) -> Result<()> {
        save_record(store, StorageKey::Transactions, &updated)?;
        self.items = updated;
        Ok(())
    }
}

pub fn filter_by_date(txns: &[Transaction], date: NaiveDate) -> Vec<&Transaction> {
    txns.iter().filter(|txn| txn.date == date).collect()
}

pub fn filter_by_type(txns: &[Transaction], kind: TransactionKind) -> Vec<&Transaction> {
    txns.iter().filter(|txn| txn.kind == kind).collect()
}

/// Transactions whose category is in `selected`. An empty selection is not
/// special here; see `summary_service::multi_select_totals` for that rule.
pub fn filter_by_categories<'a, S>(txns: &'a [Transaction], selected: &[S]) -> Vec<&'a Transaction>
where
    S: AsRef<str>,
{
    txns.iter()
        .filter(|txn| selected.iter().any(|id| id.as_ref() == txn.category))
        .collect()
}

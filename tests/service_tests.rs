mod common;

use chrono::Duration;
use common::setup_test_env;
use spendwise_core::{
    core::services::Credentials,
    domain::{
        category::{NewCategory, FALLBACK_ICON},
        settings::SettingsField,
        transaction::{TransactionDraft, TransactionKind},
    },
    SpendError,
};

fn signed_in() -> (spendwise_core::SpendWise, std::path::PathBuf, spendwise_core::core::FixedClock) {
    let (mut app, dir, clock) = setup_test_env();
    app.sign_in(Credentials::new("Asha Rao", "asha@example.com", "secret"))
        .expect("sign in");
    app.take_notice();
    (app, dir, clock)
}

#[test]
fn transactions_stay_newest_first_across_adds_and_removes() {
    let (mut app, _dir, clock) = signed_in();
    let mut ids = Vec::new();
    for amount in [10.0, 20.0, 30.0] {
        let txn = app
            .add_transaction(amount, None, "food".into(), TransactionKind::Expense)
            .unwrap();
        ids.push(txn.id);
        clock.advance(Duration::minutes(1));
    }
    assert!(app.delete_transaction(&ids[1]).unwrap());
    let amounts: Vec<f64> = app.transactions().iter().map(|t| t.amount).collect();
    assert_eq!(amounts, [30.0, 10.0]);

    // Unknown ids are a silent no-op.
    assert!(!app.delete_transaction("missing").unwrap());
    assert_eq!(app.transactions().len(), 2);
}

#[test]
fn dashboard_excludes_income_from_category_totals() {
    let (mut app, _dir, _clock) = signed_in();
    app.add_transaction(100.0, None, "food".into(), TransactionKind::Expense)
        .unwrap();
    app.add_transaction(50.0, None, "transport".into(), TransactionKind::Expense)
        .unwrap();
    app.add_transaction(200.0, None, "food".into(), TransactionKind::Income)
        .unwrap();

    let all = app.dashboard(&[]);
    assert_eq!(all.total_expenses, 150.0);
    assert_eq!(all.breakdown[0].category, "food");
    assert_eq!(all.breakdown[0].total, 100.0);
    assert_eq!(all.selection.spent, 150.0);
    assert_eq!(all.selection.received, 200.0);

    let food = app.dashboard(&["food".to_string()]);
    assert_eq!(food.selection.spent, 100.0);
    assert_eq!(food.selection.received, 200.0);
    assert_eq!(food.selection.net, 100.0);
    assert_eq!(food.selection.net_sign(), '+');
    assert!(food.breakdown[0].selected);
}

#[test]
fn budget_progress_caps_when_over() {
    let (mut app, _dir, _clock) = setup_test_env();
    app.sign_up(
        Credentials::new("Asha", "a@x", "pw").with_budget(Some(100.0)),
    )
    .unwrap();
    app.add_transaction(120.0, None, "food".into(), TransactionKind::Expense)
        .unwrap();
    let budget = app.dashboard(&[]).budget.expect("budget active");
    assert!(budget.over_budget);
    assert_eq!(budget.percent, 100.0);
}

#[test]
fn manual_entry_validates_before_recording() {
    let (mut app, _dir, _clock) = signed_in();
    let err = app
        .add_manual(TransactionDraft {
            amount: "".into(),
            note: String::new(),
            category: Some("food".into()),
            kind: TransactionKind::Expense,
        })
        .unwrap_err();
    assert_eq!(err.to_string(), "Fill amount & category");
    assert!(app.take_notice().is_some_and(|n| n.is_error()));

    let err = app
        .add_manual(TransactionDraft::expense("12abc", "food"))
        .unwrap_err();
    assert_eq!(err.to_string(), "Enter valid amount");
    assert!(app.transactions().is_empty());

    app.add_manual(TransactionDraft::income("2500", "other").with_note("refund"))
        .unwrap();
    assert_eq!(app.take_notice().unwrap().message, "Income added!");
}

#[test]
fn removing_a_category_keeps_its_transactions() {
    let (mut app, _dir, _clock) = signed_in();
    let pets = app
        .add_category(NewCategory::new("Pets").with_icon("🐾"))
        .unwrap();
    let txn = app
        .add_transaction(80.0, None, pets.id.clone(), TransactionKind::Expense)
        .unwrap();
    assert_eq!(app.row(&txn).title, "Pets");

    assert!(app.remove_category(&pets.id).unwrap());
    assert_eq!(app.transactions().len(), 1);
    let row = app.row(&app.transactions()[0]);
    assert_eq!(row.icon, FALLBACK_ICON);
    assert_eq!(row.title, "Transaction");
}

#[test]
fn cancelled_settings_draft_does_not_leak() {
    let (mut app, _dir, _clock) = signed_in();
    app.open_settings().unwrap();
    assert!(app.edit_settings(SettingsField::Budget(Some(999.0))));
    assert!(app.cancel_settings());

    let draft = app.open_settings().unwrap();
    assert_eq!(draft.budget, None);
    assert_eq!(app.settings().budget, None);
}

#[test]
fn settings_save_with_empty_email_changes_nothing() {
    let (mut app, _dir, _clock) = signed_in();
    let before_settings = app.settings().clone();
    let before_profile = app.profile().cloned();

    app.open_settings().unwrap();
    app.edit_settings(SettingsField::Email("  ".into()));
    app.edit_settings(SettingsField::Notifications(false));
    let err = app.save_settings().unwrap_err();
    assert!(matches!(err, SpendError::Validation(_)));

    assert_eq!(app.settings(), &before_settings);
    assert_eq!(app.profile().cloned(), before_profile);
    assert!(app.settings_draft().is_some());
}

#[test]
fn upi_import_defaults_to_the_sign_up_app() {
    let (mut app, _dir, _clock) = setup_test_env();
    app.sign_up(
        Credentials::new("Asha", "a@x", "pw")
            .with_upi_app(spendwise_core::domain::upi::UpiApp::Paytm),
    )
    .unwrap();
    let pending = app.import_upi(None, "199").unwrap();
    assert_eq!(pending.note(), "Paid via Paytm");

    assert!(app.confirm_pending().is_err());
    assert!(app.pending_upi().is_some());
    app.choose_pending_category("bills").unwrap();
    let txn = app.confirm_pending().unwrap();
    assert_eq!(txn.category, "bills");
    assert!(app.pending_upi().is_none());
}

#[test]
fn mutations_require_a_profile() {
    let (mut app, _dir, _clock) = setup_test_env();
    let err = app
        .add_transaction(5.0, None, "food".into(), TransactionKind::Expense)
        .unwrap_err();
    assert!(matches!(err, SpendError::InvalidOperation(_)));
    assert!(app.open_settings().is_err());
    assert!(app.transactions().is_empty());
}

#[test]
fn notices_expire_after_their_ttl() {
    let (mut app, _dir, clock) = signed_in();
    app.add_transaction(5.0, None, "food".into(), TransactionKind::Expense)
        .unwrap();
    assert_eq!(app.active_notice().unwrap().message, "Expense added!");
    clock.advance(Duration::seconds(4));
    assert!(app.active_notice().is_none());
}

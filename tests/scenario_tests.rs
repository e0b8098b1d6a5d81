//! End-to-end checks over one seeded store: aggregation, filtering, chart
//! layout and CSV export working together.

mod common;

use chrono::NaiveDate;
use common::{draft, seed_scenario, store_in_temp_dir};
use money_manager::core::{chart, export, filter, summary};
use money_manager::core::filter::{KindFilter, MonthFilter};
use money_manager::domain::{CategoryRegistry, TransactionKind};

#[test]
fn the_reference_month_balances_out() {
    let (mut store, _) = store_in_temp_dir();
    seed_scenario(&mut store);

    assert_eq!(summary::overall_balance(store.records()), 255000.0);
    let monthly = summary::monthly_summary(store.records(), 2024, 1);
    assert_eq!(monthly.income, 300000.0);
    assert_eq!(monthly.expense, 45000.0);
    assert_eq!(monthly.balance(), 255000.0);

    let breakdown = summary::category_breakdown(
        store.records(),
        TransactionKind::Expense,
        2024,
        1,
        CategoryRegistry::global(),
    );
    assert_eq!(breakdown, vec![("食費".to_string(), 45000.0)]);
}

#[test]
fn deleting_the_expense_moves_the_balance_up() {
    let (mut store, _) = store_in_temp_dir();
    seed_scenario(&mut store);
    let expense_id = store.records()[1].id;

    store.remove(expense_id).expect("remove expense");
    assert_eq!(summary::overall_balance(store.records()), 300000.0);
    let breakdown = summary::category_breakdown(
        store.records(),
        TransactionKind::Expense,
        2024,
        1,
        CategoryRegistry::global(),
    );
    assert!(breakdown.is_empty());
    assert!(chart::sectors(&breakdown).is_empty());
}

#[test]
fn filters_narrow_the_visible_rows_without_touching_totals() {
    let (mut store, _) = store_in_temp_dir();
    seed_scenario(&mut store);
    store
        .add(draft(TransactionKind::Expense, "transport", 8000.0, "", (2024, 2, 3)))
        .expect("add february expense");

    let visible = filter::apply(
        store.records(),
        KindFilter::Only(TransactionKind::Expense),
        MonthFilter::Month { year: 2024, month: 1 },
    );
    assert_eq!(visible.len(), 1);
    assert_eq!(visible[0].category, "food");

    // Overall balance ignores the active filter.
    assert_eq!(summary::overall_balance(store.records()), 247000.0);
}

#[test]
fn month_list_tracks_the_data() {
    let (mut store, _) = store_in_temp_dir();
    seed_scenario(&mut store);
    store
        .add(draft(TransactionKind::Expense, "housing", 70000.0, "", (2023, 12, 28)))
        .expect("add december expense");

    let today = NaiveDate::from_ymd_opt(2024, 2, 15).unwrap();
    let months = filter::available_months(store.records(), today);
    assert_eq!(months, vec![(2024, 2), (2024, 1), (2023, 12)]);
}

#[test]
fn chart_sectors_share_the_month_total() {
    let (mut store, _) = store_in_temp_dir();
    seed_scenario(&mut store);
    store
        .add(draft(TransactionKind::Expense, "transport", 15000.0, "", (2024, 1, 12)))
        .expect("add transport expense");

    let breakdown = summary::category_breakdown(
        store.records(),
        TransactionKind::Expense,
        2024,
        1,
        CategoryRegistry::global(),
    );
    let sectors = chart::sectors(&breakdown);
    assert_eq!(sectors.len(), 2);
    let fraction_sum: f64 = sectors.iter().map(|s| s.fraction).sum();
    assert!((fraction_sum - 1.0).abs() < 1e-9);
    assert_eq!(sectors[0].label, "食費");
    assert_eq!(sectors[0].color, chart::PALETTE[0]);
    assert_eq!(sectors[1].color, chart::PALETTE[1]);
}

#[test]
fn export_reflects_insertion_order_not_the_filtered_view() {
    let (mut store, _) = store_in_temp_dir();
    seed_scenario(&mut store);

    let bytes = export::csv_bytes(store.records(), CategoryRegistry::global()).expect("export");
    let text = String::from_utf8(bytes[3..].to_vec()).expect("utf-8 body");
    let lines: Vec<&str> = text.lines().collect();
    assert_eq!(lines.len(), 3);
    // Insertion order: income first even though the list view sorts by date.
    assert!(lines[1].contains("給与"));
    assert!(lines[2].contains("食費"));
}

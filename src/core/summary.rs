//! Balance and per-category aggregation.

use chrono::Datelike;

use crate::domain::{CategoryRegistry, Transaction, TransactionKind};

/// Income and expense totals for one calendar month.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct MonthlySummary {
    pub income: f64,
    pub expense: f64,
}

impl MonthlySummary {
    pub fn balance(&self) -> f64 {
        self.income - self.expense
    }
}

/// Net balance across every record, regardless of active filters.
pub fn overall_balance(records: &[Transaction]) -> f64 {
    records.iter().map(Transaction::signed_amount).sum()
}

/// Totals for records dated inside `year`/`month`.
pub fn monthly_summary(records: &[Transaction], year: i32, month: u32) -> MonthlySummary {
    let mut summary = MonthlySummary::default();
    for t in records {
        if t.date.year() != year || t.date.month() != month {
            continue;
        }
        match t.kind {
            TransactionKind::Income => summary.income += t.amount,
            TransactionKind::Expense => summary.expense += t.amount,
        }
    }
    summary
}

/// Per-category totals for `kind` within one month, keyed by display label.
///
/// Labels appear in first-seen order. Codes missing from the registry keep
/// their raw code, and codes sharing a label merge into one entry.
pub fn category_breakdown(
    records: &[Transaction],
    kind: TransactionKind,
    year: i32,
    month: u32,
    registry: &CategoryRegistry,
) -> Vec<(String, f64)> {
    let mut totals: Vec<(String, f64)> = Vec::new();
    for t in records {
        if t.kind != kind || t.date.year() != year || t.date.month() != month {
            continue;
        }
        let label = registry.label_for(kind, &t.category).to_string();
        match totals.iter_mut().find(|(existing, _)| *existing == label) {
            Some((_, total)) => *total += t.amount,
            None => totals.push((label, t.amount)),
        }
    }
    totals
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use super::*;
    use crate::domain::TransactionDraft;

    fn record(kind: TransactionKind, category: &str, amount: f64, ymd: (i32, u32, u32)) -> Transaction {
        Transaction::new(
            0,
            TransactionDraft {
                kind,
                category: category.to_string(),
                amount,
                description: String::new(),
                date: NaiveDate::from_ymd_opt(ymd.0, ymd.1, ymd.2).unwrap(),
            },
        )
    }

    fn sample() -> Vec<Transaction> {
        vec![
            record(TransactionKind::Income, "salary", 300000.0, (2024, 1, 5)),
            record(TransactionKind::Expense, "food", 45000.0, (2024, 1, 10)),
            record(TransactionKind::Expense, "transport", 8000.0, (2024, 2, 2)),
        ]
    }

    #[test]
    fn overall_balance_spans_all_months() {
        assert_eq!(overall_balance(&sample()), 247000.0);
        assert_eq!(overall_balance(&[]), 0.0);
    }

    #[test]
    fn monthly_summary_only_counts_the_requested_month() {
        let summary = monthly_summary(&sample(), 2024, 1);
        assert_eq!(summary.income, 300000.0);
        assert_eq!(summary.expense, 45000.0);
        assert_eq!(summary.balance(), 255000.0);
    }

    #[test]
    fn empty_month_sums_to_zero() {
        let summary = monthly_summary(&sample(), 2023, 6);
        assert_eq!(summary, MonthlySummary::default());
    }

    #[test]
    fn breakdown_labels_totals_in_first_seen_order() {
        let records = vec![
            record(TransactionKind::Expense, "food", 30000.0, (2024, 1, 3)),
            record(TransactionKind::Expense, "transport", 8000.0, (2024, 1, 4)),
            record(TransactionKind::Expense, "food", 15000.0, (2024, 1, 20)),
            record(TransactionKind::Income, "salary", 300000.0, (2024, 1, 5)),
        ];
        let breakdown = category_breakdown(
            &records,
            TransactionKind::Expense,
            2024,
            1,
            CategoryRegistry::global(),
        );
        assert_eq!(
            breakdown,
            vec![("食費".to_string(), 45000.0), ("交通費".to_string(), 8000.0)]
        );
    }

    #[test]
    fn breakdown_keeps_unregistered_codes_visible() {
        let records = vec![record(TransactionKind::Expense, "retired", 100.0, (2024, 1, 1))];
        let breakdown = category_breakdown(
            &records,
            TransactionKind::Expense,
            2024,
            1,
            CategoryRegistry::global(),
        );
        assert_eq!(breakdown, vec![("retired".to_string(), 100.0)]);
    }
}

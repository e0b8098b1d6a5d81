//! Kind and month view filters over the transaction collection.

use chrono::{Datelike, NaiveDate};

use crate::domain::{Transaction, TransactionKind};

/// Kind half of the list filter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum KindFilter {
    #[default]
    All,
    Only(TransactionKind),
}

impl KindFilter {
    pub fn matches(&self, kind: TransactionKind) -> bool {
        match self {
            KindFilter::All => true,
            KindFilter::Only(wanted) => *wanted == kind,
        }
    }

    pub fn parse(value: &str) -> Result<Self, String> {
        let value = value.trim();
        if value.is_empty() || value.eq_ignore_ascii_case("all") {
            return Ok(KindFilter::All);
        }
        value
            .parse::<TransactionKind>()
            .map(KindFilter::Only)
            .map_err(|_| format!("expected all, income or expense, got `{value}`"))
    }

    pub fn label(&self) -> &'static str {
        match self {
            KindFilter::All => "すべて",
            KindFilter::Only(kind) => kind.label(),
        }
    }
}

/// Month half of the list filter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MonthFilter {
    #[default]
    All,
    Month { year: i32, month: u32 },
}

impl MonthFilter {
    pub fn matches(&self, date: NaiveDate) -> bool {
        match self {
            MonthFilter::All => true,
            MonthFilter::Month { year, month } => date.year() == *year && date.month() == *month,
        }
    }

    pub fn parse(value: &str) -> Result<Self, String> {
        let value = value.trim();
        if value.is_empty() || value.eq_ignore_ascii_case("all") {
            return Ok(MonthFilter::All);
        }
        parse_month_key(value)
            .map(|(year, month)| MonthFilter::Month { year, month })
            .ok_or_else(|| format!("expected a month like 2024-01, got `{value}`"))
    }

    pub fn label(&self) -> String {
        match self {
            MonthFilter::All => "すべて".to_string(),
            MonthFilter::Month { year, month } => format!("{year}年{month}月"),
        }
    }
}

/// Parses a `YYYY-MM` key into year and month parts.
pub fn parse_month_key(value: &str) -> Option<(i32, u32)> {
    let (year, month) = value.split_once('-')?;
    let year: i32 = year.parse().ok()?;
    let month: u32 = month.parse().ok()?;
    if (1..=12).contains(&month) {
        Some((year, month))
    } else {
        None
    }
}

/// Returns the visible slice of `records`: both filters applied, newest date
/// first. The sort is stable, so records sharing a date keep insertion order.
pub fn apply(records: &[Transaction], kind: KindFilter, month: MonthFilter) -> Vec<Transaction> {
    let mut rows: Vec<Transaction> = records
        .iter()
        .filter(|t| kind.matches(t.kind) && month.matches(t.date))
        .cloned()
        .collect();
    rows.sort_by(|a, b| b.date.cmp(&a.date));
    rows
}

/// Distinct `(year, month)` pairs present in the data, newest first, with
/// the current month prepended when it has no records yet.
pub fn available_months(records: &[Transaction], today: NaiveDate) -> Vec<(i32, u32)> {
    let mut months: Vec<(i32, u32)> = Vec::new();
    for t in records {
        let key = (t.date.year(), t.date.month());
        if !months.contains(&key) {
            months.push(key);
        }
    }
    months.sort_unstable();
    months.reverse();
    let current = (today.year(), today.month());
    if !months.contains(&current) {
        months.insert(0, current);
    }
    months
}

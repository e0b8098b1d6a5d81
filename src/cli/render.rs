//! Builds the text panels the shell prints: summary block, transaction
//! table, chart legend, month list and the notification footer.

use chrono::{Datelike, NaiveDate};
use colored::Colorize;

use crate::cli::notify::{Notification, Severity};
use crate::cli::output;
use crate::core::chart::Sector;
use crate::core::filter::MonthFilter;
use crate::core::summary;
use crate::currency::{format_signed_yen, format_yen};
use crate::domain::{CategoryRegistry, Transaction, TransactionKind};

/// Placeholder when the filtered list has no rows.
pub const EMPTY_LIST_PLACEHOLDER: &str = "取引履歴がありません";
/// Placeholder when the chart has nothing to draw.
pub const EMPTY_CHART_PLACEHOLDER: &str = "データがありません";

const DESCRIPTION_MAX_WIDTH: usize = 24;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Alignment {
    Left,
    Right,
}

/// Column spec for the plain-text table renderer.
pub struct TableColumn {
    pub header: &'static str,
    pub alignment: Alignment,
    /// Cells longer than this are truncated with an ellipsis.
    pub max_width: Option<usize>,
}

/// Character width of `text` with ANSI escape sequences skipped.
fn visible_width(text: &str) -> usize {
    let mut width = 0;
    let mut in_escape = false;
    for ch in text.chars() {
        if in_escape {
            if ch.is_ascii_alphabetic() {
                in_escape = false;
            }
        } else if ch == '\u{1b}' {
            in_escape = true;
        } else {
            width += 1;
        }
    }
    width
}

/// Truncation for uncolored cells only; escape sequences would be cut.
fn truncate_cell(text: &str, max_width: usize) -> String {
    if visible_width(text) <= max_width {
        return text.to_string();
    }
    let keep = max_width.saturating_sub(1);
    let mut out: String = text.chars().take(keep).collect();
    out.push('…');
    out
}

fn pad_cell(text: &str, width: usize, alignment: Alignment) -> String {
    let pad = width.saturating_sub(visible_width(text));
    match alignment {
        Alignment::Left => format!("{}{}", text, " ".repeat(pad)),
        Alignment::Right => format!("{}{}", " ".repeat(pad), text),
    }
}

/// Renders `rows` under `columns` with a rule between header and body.
pub fn render_table(columns: &[TableColumn], rows: &[Vec<String>]) -> String {
    let prefs = output::current_preferences();
    let mut widths: Vec<usize> = columns.iter().map(|c| visible_width(c.header)).collect();
    let mut cells: Vec<Vec<String>> = Vec::with_capacity(rows.len());
    for row in rows {
        let mut prepared = Vec::with_capacity(columns.len());
        for (idx, column) in columns.iter().enumerate() {
            let raw = row.get(idx).cloned().unwrap_or_default();
            let cell = match column.max_width {
                Some(max) => truncate_cell(&raw, max),
                None => raw,
            };
            widths[idx] = widths[idx].max(visible_width(&cell));
            prepared.push(cell);
        }
        cells.push(prepared);
    }

    let mut lines = Vec::with_capacity(cells.len() + 2);
    let header: Vec<String> = columns
        .iter()
        .zip(&widths)
        .map(|(column, width)| pad_cell(column.header, *width, column.alignment))
        .collect();
    lines.push(header.join("  ").trim_end().to_string());

    let rule = if prefs.plain_mode { "-" } else { "─" };
    let rule_width = widths.iter().sum::<usize>() + widths.len().saturating_sub(1) * 2;
    lines.push(rule.repeat(rule_width));

    for row in &cells {
        let rendered: Vec<String> = row
            .iter()
            .zip(columns.iter().zip(&widths))
            .map(|(cell, (column, width))| pad_cell(cell, *width, column.alignment))
            .collect();
        lines.push(rendered.join("  ").trim_end().to_string());
    }
    lines.join("\n")
}

/// `2024/1/5` style date, as the browser's ja-JP locale rendered it.
pub fn format_date_ja(date: NaiveDate) -> String {
    format!("{}/{}/{}", date.year(), date.month(), date.day())
}

/// Top summary block: overall balance plus the given month's totals.
pub fn summary_panel(records: &[Transaction], today: NaiveDate) -> String {
    let prefs = output::current_preferences();
    let overall = summary::overall_balance(records);
    let monthly = summary::monthly_summary(records, today.year(), today.month());

    let overall_text = format_signed_yen(overall);
    let overall_text = if prefs.plain_mode {
        overall_text
    } else if overall < 0.0 {
        overall_text.bright_red().bold().to_string()
    } else {
        overall_text.bright_green().bold().to_string()
    };

    let mut lines = Vec::with_capacity(2);
    lines.push(format!("総残高: {overall_text}"));
    lines.push(format!(
        "{}年{}月: 収入 {} / 支出 {} / 収支 {}",
        today.year(),
        today.month(),
        format_yen(monthly.income),
        format_yen(monthly.expense),
        format_signed_yen(monthly.balance()),
    ));
    lines.join("\n")
}

/// Transaction table, one row per record in the order supplied.
pub fn transaction_panel(rows: &[Transaction], registry: &CategoryRegistry) -> String {
    if rows.is_empty() {
        return EMPTY_LIST_PLACEHOLDER.to_string();
    }
    let prefs = output::current_preferences();
    let columns = [
        TableColumn { header: "日付", alignment: Alignment::Left, max_width: None },
        TableColumn { header: "種別", alignment: Alignment::Left, max_width: None },
        TableColumn { header: "カテゴリ", alignment: Alignment::Left, max_width: None },
        TableColumn { header: "金額", alignment: Alignment::Right, max_width: None },
        TableColumn {
            header: "説明",
            alignment: Alignment::Left,
            max_width: Some(DESCRIPTION_MAX_WIDTH),
        },
        TableColumn { header: "ID", alignment: Alignment::Right, max_width: None },
    ];
    let data: Vec<Vec<String>> = rows
        .iter()
        .map(|t| {
            let amount = match t.kind {
                TransactionKind::Income => format!("+{}", format_yen(t.amount)),
                TransactionKind::Expense => format!("-{}", format_yen(t.amount)),
            };
            let amount = if prefs.plain_mode {
                amount
            } else if t.kind == TransactionKind::Income {
                amount.bright_green().to_string()
            } else {
                amount.bright_red().to_string()
            };
            vec![
                format_date_ja(t.date),
                t.kind.label().to_string(),
                registry.label_for(t.kind, &t.category).to_string(),
                amount,
                t.description.clone(),
                t.id.to_string(),
            ]
        })
        .collect();
    render_table(&columns, &data)
}

/// Chart legend: one swatch line per sector with its share of the total.
pub fn chart_panel(sectors: &[Sector]) -> String {
    if sectors.is_empty() {
        return EMPTY_CHART_PLACEHOLDER.to_string();
    }
    let prefs = output::current_preferences();
    let mut lines = Vec::with_capacity(sectors.len());
    for sector in sectors {
        let swatch = if prefs.plain_mode {
            "#".to_string()
        } else {
            match parse_hex_color(sector.color) {
                Some((r, g, b)) => "■".truecolor(r, g, b).to_string(),
                None => "■".to_string(),
            }
        };
        lines.push(format!(
            "{} {} {} ({:.1}%)",
            swatch,
            sector.label,
            format_yen(sector.value),
            sector.fraction * 100.0,
        ));
    }
    lines.join("\n")
}

/// One line per selectable month, the active filter marked.
pub fn months_panel(months: &[(i32, u32)], active: MonthFilter) -> String {
    months
        .iter()
        .map(|&(year, month)| {
            let marker = if active == (MonthFilter::Month { year, month }) {
                "*"
            } else {
                " "
            };
            format!("{marker} {year}年{month}月")
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Footer listing notifications still inside their display window.
pub fn notifications_panel(live: &[&Notification]) -> Option<String> {
    if live.is_empty() {
        return None;
    }
    let prefs = output::current_preferences();
    let lines: Vec<String> = live
        .iter()
        .map(|n| {
            let marker = match (n.severity, prefs.plain_mode) {
                (Severity::Success, true) => "*",
                (Severity::Success, false) => "✓",
                (Severity::Info, true) => "-",
                (Severity::Info, false) => "・",
            };
            format!("{} {}", marker, n.message)
        })
        .collect();
    Some(lines.join("\n"))
}

/// Parses `#rrggbb` into byte components.
pub fn parse_hex_color(color: &str) -> Option<(u8, u8, u8)> {
    let hex = color.strip_prefix('#')?;
    if hex.len() != 6 {
        return None;
    }
    let r = u8::from_str_radix(&hex[0..2], 16).ok()?;
    let g = u8::from_str_radix(&hex[2..4], 16).ok()?;
    let b = u8::from_str_radix(&hex[4..6], 16).ok()?;
    Some((r, g, b))
}

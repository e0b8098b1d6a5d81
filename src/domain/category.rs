//! Fixed category vocabulary for classifying transactions.

use once_cell::sync::Lazy;

use crate::domain::transaction::TransactionKind;

/// One selectable category: a stable code plus its display label.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Category {
    pub code: &'static str,
    pub label: &'static str,
}

/// Maps category codes to Japanese labels, split by transaction kind.
#[derive(Debug, Clone)]
pub struct CategoryRegistry {
    income: Vec<Category>,
    expense: Vec<Category>,
}

static REGISTRY: Lazy<CategoryRegistry> = Lazy::new(CategoryRegistry::with_defaults);

impl CategoryRegistry {
    /// The built-in category set. Codes match what stored data uses.
    pub fn with_defaults() -> Self {
        Self {
            income: vec![
                Category { code: "salary", label: "給与" },
                Category { code: "bonus", label: "ボーナス" },
                Category { code: "investment", label: "投資収益" },
                Category { code: "other-income", label: "その他収入" },
            ],
            expense: vec![
                Category { code: "food", label: "食費" },
                Category { code: "transport", label: "交通費" },
                Category { code: "housing", label: "住居費" },
                Category { code: "utilities", label: "光熱費" },
                Category { code: "entertainment", label: "娯楽費" },
                Category { code: "other-expense", label: "その他支出" },
            ],
        }
    }

    /// Shared registry instance.
    pub fn global() -> &'static CategoryRegistry {
        &REGISTRY
    }

    /// Categories selectable for `kind`, in presentation order.
    pub fn categories_for(&self, kind: TransactionKind) -> &[Category] {
        match kind {
            TransactionKind::Income => &self.income,
            TransactionKind::Expense => &self.expense,
        }
    }

    pub fn contains(&self, kind: TransactionKind, code: &str) -> bool {
        self.categories_for(kind).iter().any(|c| c.code == code)
    }

    /// Display label for `code`, falling back to the raw code for stored
    /// records whose category is no longer registered.
    pub fn label_for<'a>(&'a self, kind: TransactionKind, code: &'a str) -> &'a str {
        self.categories_for(kind)
            .iter()
            .find(|c| c.code == code)
            .map(|c| c.label)
            .unwrap_or(code)
    }
}

pub mod category;
pub mod transaction;

pub use category::{Category, CategoryRegistry};
pub use transaction::{Transaction, TransactionDraft, TransactionKind};

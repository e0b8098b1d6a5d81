pub mod chart;
pub mod export;
pub mod filter;
pub mod store;
pub mod summary;

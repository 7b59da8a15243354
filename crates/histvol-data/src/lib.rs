//! I/O collaborators for histvol.
//!
//! The numerical core stays pure; this crate owns the three edges of the
//! pipeline: CSV ingest of daily OHLC bars, flat-file export of the
//! per-year summary table, and PNG rendering of the dashboard.

pub mod chart;
pub mod error;
pub mod export;
pub mod load;

pub use chart::render_dashboard;
pub use error::DataError;
pub use export::{read_summary, write_summary};
pub use load::load_price_series;

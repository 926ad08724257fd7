//! The consolidated long-form table and its projections.

mod consolidate;
mod record;

pub use consolidate::{ConsolidatedTable, DetailedRow, DetailedTable, SummaryRow, SummaryTable};
pub use record::{CanonicalRecord, FactorValues};

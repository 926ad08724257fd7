//! Canonical schema and year-by-year reconciliation.
//!
//! The five yearly source files each use their own column-naming
//! convention. This module maps every known raw header onto the
//! canonical schema and reshapes one year's table into canonical
//! records.

mod aliases;
mod reconcile;
mod resolve;

pub use aliases::{canonical_for, CanonicalColumn, Factor, ALIASES};
pub use reconcile::{derive_ranks, reconcile_year};
pub use resolve::{resolve_columns, ColumnMap, Resolution};

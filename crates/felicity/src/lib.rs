//! Felicity: data core for a World Happiness Report dashboard.
//!
//! Felicity loads the five 2015-2019 survey files, reconciles their
//! inconsistent year-over-year schemas into one canonical long-form
//! table, classifies countries by continent, and serves predictions
//! from a pre-trained regression model. Chart rendering and page
//! layout are the host's concern; this crate only produces the tables
//! and numbers behind them.
//!
//! # Example
//!
//! ```no_run
//! use felicity::{Dashboard, YearFile};
//!
//! let files: Vec<YearFile> = (2015u16..=2019)
//!     .map(|year| YearFile::new(year, format!("data/{year}.csv")))
//!     .collect();
//!
//! let dashboard = Dashboard::load(&files).unwrap();
//! println!("Rows: {}", dashboard.summary().rows.len());
//! println!("Countries: {}", dashboard.table().countries().len());
//! ```

pub mod error;
pub mod geo;
pub mod input;
pub mod predict;
pub mod schema;
pub mod table;

mod dashboard;

pub use crate::dashboard::{Dashboard, DashboardConfig, YearFile};
pub use error::{FelicityError, Result};
pub use geo::{aggregate_by_continent, continent_of, Continent, ContinentBreakdown};
pub use input::{DataTable, Parser, ParserConfig, SourceMetadata};
pub use predict::{ArtifactSource, FileSource, HttpSource, LinearModel, Prediction, Predictor, Scorer};
pub use schema::{derive_ranks, reconcile_year, Factor};
pub use table::{CanonicalRecord, ConsolidatedTable, DetailedTable, FactorValues, SummaryTable};

//! The dashboard context: everything the presentation layer reads.
//!
//! Built once at session start and passed by reference afterwards; no
//! ambient global state. The consolidated table and its projections
//! are immutable after construction, so concurrent readers are safe by
//! construction.

use std::path::PathBuf;

use indexmap::IndexMap;
use tracing::info;

use crate::error::{FelicityError, Result};
use crate::geo::{aggregate_by_continent, ContinentBreakdown};
use crate::input::{Parser, ParserConfig, SourceMetadata};
use crate::predict::{Prediction, Predictor};
use crate::schema::reconcile_year;
use crate::table::{ConsolidatedTable, DetailedTable, SummaryTable};

/// One yearly source file to load.
#[derive(Debug, Clone)]
pub struct YearFile {
    pub year: u16,
    pub path: PathBuf,
}

impl YearFile {
    pub fn new(year: u16, path: impl Into<PathBuf>) -> Self {
        Self {
            year,
            path: path.into(),
        }
    }
}

/// Configuration for building a dashboard.
#[derive(Debug, Clone, Default)]
pub struct DashboardConfig {
    /// Parser configuration shared by every yearly file.
    pub parser: ParserConfig,
}

/// The loaded session context.
#[derive(Debug)]
pub struct Dashboard {
    table: ConsolidatedTable,
    summary: SummaryTable,
    detailed: DetailedTable,
    sources: Vec<SourceMetadata>,
    predictor: Option<Predictor>,
}

impl Dashboard {
    /// Load and reconcile the yearly files with default configuration.
    pub fn load(files: &[YearFile]) -> Result<Self> {
        Self::load_with_config(files, DashboardConfig::default())
    }

    /// Load and reconcile the yearly files.
    ///
    /// Each year is reconciled in isolation; a schema error in any
    /// year aborts the whole load, since downstream aggregates depend
    /// on a complete canonical table.
    pub fn load_with_config(files: &[YearFile], config: DashboardConfig) -> Result<Self> {
        if files.is_empty() {
            return Err(FelicityError::EmptyData("no year files given".to_string()));
        }

        let parser = Parser::with_config(config.parser);
        let mut years = Vec::with_capacity(files.len());
        let mut sources = Vec::with_capacity(files.len());

        for file in files {
            let (table, metadata) = parser.parse_file(&file.path)?;
            let records = reconcile_year(&table, file.year)?;
            years.push(records);
            sources.push(metadata);
        }

        let table = ConsolidatedTable::from_years(years);
        // Both projections are memoized for the session lifetime.
        let summary = table.summary();
        let detailed = table.detailed();

        info!(
            years = files.len(),
            summary_rows = summary.rows.len(),
            detailed_rows = detailed.rows.len(),
            detailed_dropped = detailed.dropped_rows,
            "dashboard loaded"
        );

        Ok(Self {
            table,
            summary,
            detailed,
            sources,
            predictor: None,
        })
    }

    /// Attach a predictor (already loaded, success or cached failure).
    pub fn with_predictor(mut self, predictor: Predictor) -> Self {
        self.predictor = Some(predictor);
        self
    }

    /// The consolidated long-form table.
    pub fn table(&self) -> &ConsolidatedTable {
        &self.table
    }

    /// The summary projection (country, score, rank, year).
    pub fn summary(&self) -> &SummaryTable {
        &self.summary
    }

    /// The detailed projection (all six factors, complete rows only).
    pub fn detailed(&self) -> &DetailedTable {
        &self.detailed
    }

    /// Metadata for each loaded source file.
    pub fn sources(&self) -> &[SourceMetadata] {
        &self.sources
    }

    /// Per-continent mean scores for one year.
    pub fn continent_breakdown(&self, year: u16) -> ContinentBreakdown {
        aggregate_by_continent(&self.table, year)
    }

    /// Whether the predictor is attached and its model loaded.
    pub fn predictor_available(&self) -> bool {
        self.predictor.as_ref().is_some_and(Predictor::available)
    }

    /// Predict a score for a feature vector.
    pub fn predict(&self, features: &IndexMap<String, f64>) -> Result<Prediction> {
        match &self.predictor {
            Some(predictor) => predictor.predict(features),
            None => Err(FelicityError::ModelUnavailable(
                "no predictor attached to this session".to_string(),
            )),
        }
    }
}

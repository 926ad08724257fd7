//! Concatenates reconciled per-year record sets into one table.

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::schema::Factor;

use super::record::CanonicalRecord;

/// The consolidated long-form table: one record per (country, year),
/// covering every loaded year.
///
/// Built once at session start and never mutated afterward; the two
/// projections below are pure functions of the frozen records, so
/// rebuilding them from the same inputs is byte-identical.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConsolidatedTable {
    records: Vec<CanonicalRecord>,
}

/// One row of the summary projection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SummaryRow {
    pub country: String,
    pub score: f64,
    pub rank: u32,
    pub year: u16,
}

/// Summary projection: country, score, rank, year. Tolerant of missing
/// factors (they are not present here), so its row count always equals
/// the sum of per-year input counts.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SummaryTable {
    pub rows: Vec<SummaryRow>,
}

/// One row of the detailed projection, with all six factors present.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DetailedRow {
    pub country: String,
    pub year: u16,
    pub score: f64,
    pub gdp: f64,
    pub social_support: f64,
    pub life_expectancy: f64,
    pub freedom: f64,
    pub generosity: f64,
    pub corruption: f64,
}

impl DetailedRow {
    /// One factor's value.
    pub fn factor(&self, factor: Factor) -> f64 {
        match factor {
            Factor::Gdp => self.gdp,
            Factor::SocialSupport => self.social_support,
            Factor::LifeExpectancy => self.life_expectancy,
            Factor::Freedom => self.freedom,
            Factor::Generosity => self.generosity,
            Factor::Corruption => self.corruption,
        }
    }
}

/// Detailed projection: country, year, score and all six factors.
///
/// Strict completeness policy: a record with any missing factor is
/// dropped entirely, which silently shrinks country coverage per year.
/// `dropped_rows` reports how many records the policy removed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DetailedTable {
    pub rows: Vec<DetailedRow>,
    pub dropped_rows: usize,
}

impl DetailedTable {
    /// Maximum value over every factor cell. Used by the presentation
    /// layer as a shared radar-axis range.
    pub fn factor_max(&self) -> f64 {
        self.rows
            .iter()
            .flat_map(|row| Factor::ALL.iter().map(|f| row.factor(*f)))
            .fold(0.0, f64::max)
    }
}

impl ConsolidatedTable {
    /// Build the table from per-year record sets.
    ///
    /// Years are ordered ascending; original row order is preserved
    /// within each year. The design tolerates fewer than five years.
    pub fn from_years(mut years: Vec<Vec<CanonicalRecord>>) -> Self {
        years.sort_by_key(|records| records.first().map(|r| r.year).unwrap_or_default());
        let records: Vec<CanonicalRecord> = years.into_iter().flatten().collect();
        info!(rows = records.len(), "consolidated table built");
        Self { records }
    }

    /// All records, year ascending.
    pub fn records(&self) -> &[CanonicalRecord] {
        &self.records
    }

    /// Total row count across all years.
    pub fn row_count(&self) -> usize {
        self.records.len()
    }

    /// The summary projection (country, score, rank, year).
    pub fn summary(&self) -> SummaryTable {
        let rows = self
            .records
            .iter()
            .map(|r| SummaryRow {
                country: r.country.clone(),
                score: r.score,
                rank: r.rank,
                year: r.year,
            })
            .collect();
        SummaryTable { rows }
    }

    /// The detailed projection, dropping any record with a missing
    /// factor value.
    pub fn detailed(&self) -> DetailedTable {
        let mut rows = Vec::new();
        let mut dropped_rows = 0;
        for record in &self.records {
            match record.factors.complete() {
                Some([gdp, social_support, life_expectancy, freedom, generosity, corruption]) => {
                    rows.push(DetailedRow {
                        country: record.country.clone(),
                        year: record.year,
                        score: record.score,
                        gdp,
                        social_support,
                        life_expectancy,
                        freedom,
                        generosity,
                        corruption,
                    });
                }
                None => dropped_rows += 1,
            }
        }
        DetailedTable { rows, dropped_rows }
    }

    /// Sorted, deduplicated list of every country name in the table.
    pub fn countries(&self) -> Vec<String> {
        let mut names: Vec<String> = self.records.iter().map(|r| r.country.clone()).collect();
        names.sort();
        names.dedup();
        names
    }

    /// Records for one year, in original row order.
    pub fn year_slice(&self, year: u16) -> Vec<&CanonicalRecord> {
        self.records.iter().filter(|r| r.year == year).collect()
    }

    /// The `n` best-ranked countries for a year, rank ascending.
    pub fn top_n(&self, year: u16, n: usize) -> Vec<&CanonicalRecord> {
        let mut slice = self.year_slice(year);
        slice.sort_by_key(|r| r.rank);
        slice.truncate(n);
        slice
    }

    /// The `n` lowest-scoring countries for a year, score ascending.
    pub fn bottom_n(&self, year: u16, n: usize) -> Vec<&CanonicalRecord> {
        let mut slice = self.year_slice(year);
        slice.sort_by(|a, b| {
            a.score
                .partial_cmp(&b.score)
                .unwrap_or(std::cmp::Ordering::Equal)
        });
        slice.truncate(n);
        slice
    }

    /// Score trajectory for one country, as (year, score) pairs.
    pub fn country_series(&self, country: &str) -> Vec<(u16, f64)> {
        self.records
            .iter()
            .filter(|r| r.country == country)
            .map(|r| (r.year, r.score))
            .collect()
    }

    /// Mean score per year, year ascending.
    pub fn global_mean_by_year(&self) -> Vec<(u16, f64)> {
        let mut out: Vec<(u16, f64, usize)> = Vec::new();
        for record in &self.records {
            match out.iter_mut().find(|(year, _, _)| *year == record.year) {
                Some((_, sum, count)) => {
                    *sum += record.score;
                    *count += 1;
                }
                None => out.push((record.year, record.score, 1)),
            }
        }
        out.sort_by_key(|(year, _, _)| *year);
        out.into_iter()
            .map(|(year, sum, count)| (year, sum / count as f64))
            .collect()
    }
}

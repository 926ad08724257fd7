//! Reshapes one year's raw table into canonical records.

use tracing::{debug, warn};

use crate::error::{FelicityError, Result};
use crate::input::DataTable;
use crate::table::{CanonicalRecord, FactorValues};

use super::aliases::Factor;
use super::resolve::{resolve_columns, Resolution};

/// Reconcile one year's raw table against the canonical schema.
///
/// Pure transform over the in-memory table: renames via the alias
/// dictionary, attaches the literal `year` to every row, and derives
/// ranks when the source has none. Fails with a schema error if the
/// score or country column cannot be resolved, or if any score cell is
/// unparseable; there is no partial-row recovery.
pub fn reconcile_year(table: &DataTable, year: u16) -> Result<Vec<CanonicalRecord>> {
    let map = resolve_columns(&table.headers);

    let country_idx = map.country.index().ok_or_else(|| FelicityError::Schema {
        year,
        message: "country column could not be resolved from any known alias".to_string(),
    })?;
    let score_idx = map.score.index().ok_or_else(|| FelicityError::Schema {
        year,
        message: "score column could not be resolved from any known alias".to_string(),
    })?;

    let mut records = Vec::with_capacity(table.row_count());
    for (row_idx, row) in table.rows.iter().enumerate() {
        let country = row
            .get(country_idx)
            .map(|s| s.trim().to_string())
            .unwrap_or_default();
        if country.is_empty() {
            return Err(FelicityError::Schema {
                year,
                message: format!("row {}: empty country name", row_idx + 1),
            });
        }

        let score = parse_cell(row, score_idx).ok_or_else(|| FelicityError::Schema {
            year,
            message: format!("row {} ({}): unparseable score", row_idx + 1, country),
        })?;

        let mut factors = FactorValues::default();
        for factor in Factor::ALL {
            if let Some(idx) = map.factor(factor).index() {
                // Missing markers and unparseable cells are simply
                // absent, not an error and not zero.
                factors.set(factor, parse_cell(row, idx));
            }
        }

        records.push(CanonicalRecord {
            country,
            year,
            score,
            rank: 0,
            factors,
        });
    }

    match map.rank {
        Resolution::Present(rank_idx) => {
            for (row_idx, (record, row)) in records.iter_mut().zip(&table.rows).enumerate() {
                let cell = row.get(rank_idx).map(|s| s.trim()).unwrap_or_default();
                record.rank = cell.parse().map_err(|_| FelicityError::Schema {
                    year,
                    message: format!("row {}: unparseable rank '{}'", row_idx + 1, cell),
                })?;
            }
        }
        Resolution::Derived => {
            let scores: Vec<f64> = records.iter().map(|r| r.score).collect();
            for (record, rank) in records.iter_mut().zip(derive_ranks(&scores)) {
                record.rank = rank;
            }
            debug!(year, rows = records.len(), "derived ranks from scores");
        }
        Resolution::Missing => unreachable!("rank is derivable whenever score resolves"),
    }

    if records.is_empty() {
        warn!(year, "year reconciled to an empty record set");
    }
    Ok(records)
}

fn parse_cell(row: &[String], idx: usize) -> Option<f64> {
    let cell = row.get(idx)?;
    if DataTable::is_null_value(cell) {
        return None;
    }
    cell.trim().parse().ok()
}

/// Assign 1-based ranks by descending score.
///
/// Tie-break and gap policy: stable sort, so ties keep their input
/// order (first seen ranks higher) and ranks are always the
/// permutation 1..N with no gaps. This is deliberately simpler than a
/// statistical tie-break.
pub fn derive_ranks(scores: &[f64]) -> Vec<u32> {
    let mut order: Vec<usize> = (0..scores.len()).collect();
    order.sort_by(|&a, &b| {
        scores[b]
            .partial_cmp(&scores[a])
            .unwrap_or(std::cmp::Ordering::Equal)
    });

    let mut ranks = vec![0u32; scores.len()];
    for (rank, &row) in order.iter().enumerate() {
        ranks[row] = rank as u32 + 1;
    }
    ranks
}

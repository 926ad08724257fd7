//! Property-based tests for rank derivation, alias resolution, and
//! consolidation.
//!
//! These use proptest to verify the core invariants hold for any
//! input, not just the fixtures:
//!
//! 1. **No panics**: resolution and ranking never crash
//! 2. **Determinism**: same input always produces same output
//! 3. **Invariants**: ranks are a permutation, projections are pure

use proptest::prelude::*;

use felicity::table::{CanonicalRecord, ConsolidatedTable, FactorValues};
use felicity::{derive_ranks, schema};

// =============================================================================
// Test Strategies
// =============================================================================

/// Plausible happiness scores.
fn scores() -> impl Strategy<Value = Vec<f64>> {
    prop::collection::vec(0.0f64..10.0, 1..200)
}

/// Arbitrary header names, some real aliases mixed with noise.
fn header() -> impl Strategy<Value = String> {
    prop_oneof![
        Just("Country".to_string()),
        Just("Happiness Score".to_string()),
        Just("Overall rank".to_string()),
        Just("GDP per capita".to_string()),
        "[a-zA-Z0-9 .()]{0,30}",
    ]
}

fn records_for_year(year: u16) -> impl Strategy<Value = Vec<CanonicalRecord>> {
    prop::collection::vec((0.0f64..10.0, "[A-Z][a-z]{2,12}"), 0..40).prop_map(move |rows| {
        rows.into_iter()
            .enumerate()
            .map(|(i, (score, country))| CanonicalRecord {
                country,
                year,
                score,
                rank: i as u32 + 1,
                factors: FactorValues::default(),
            })
            .collect()
    })
}

// =============================================================================
// Rank Derivation Properties
// =============================================================================

proptest! {
    /// Derived ranks are always the permutation 1..N.
    #[test]
    fn derived_ranks_are_a_permutation(scores in scores()) {
        let mut ranks = derive_ranks(&scores);
        ranks.sort_unstable();
        let expected: Vec<u32> = (1..=scores.len() as u32).collect();
        prop_assert_eq!(ranks, expected);
    }

    /// The maximum score always receives rank 1, and ties go to the
    /// first-seen row.
    #[test]
    fn max_score_gets_rank_one(scores in scores()) {
        let ranks = derive_ranks(&scores);
        let max = scores.iter().cloned().fold(f64::NEG_INFINITY, f64::max);
        let first_max = scores.iter().position(|&s| s == max).unwrap();
        prop_assert_eq!(ranks[first_max], 1);
    }

    /// Ranking is deterministic.
    #[test]
    fn ranking_is_deterministic(scores in scores()) {
        prop_assert_eq!(derive_ranks(&scores), derive_ranks(&scores));
    }

    /// A strictly better score always ranks strictly better.
    #[test]
    fn higher_score_never_ranks_worse(scores in scores()) {
        let ranks = derive_ranks(&scores);
        for i in 0..scores.len() {
            for j in 0..scores.len() {
                if scores[i] > scores[j] {
                    prop_assert!(ranks[i] < ranks[j]);
                }
            }
        }
    }
}

// =============================================================================
// Alias Resolution Properties
// =============================================================================

proptest! {
    /// Resolution never panics and any resolved index is in bounds.
    #[test]
    fn resolution_indices_in_bounds(headers in prop::collection::vec(header(), 0..20)) {
        let map = schema::resolve_columns(&headers);
        for resolution in [map.country, map.score, map.rank] {
            if let schema::Resolution::Present(i) = resolution {
                prop_assert!(i < headers.len());
            }
        }
    }

    /// Rank is derivable exactly when a score column resolves.
    #[test]
    fn rank_derivable_iff_score_present(headers in prop::collection::vec(header(), 0..20)) {
        let map = schema::resolve_columns(&headers);
        match (map.score, map.rank) {
            (schema::Resolution::Missing, rank) => {
                prop_assert!(!matches!(rank, schema::Resolution::Derived));
            }
            (schema::Resolution::Present(_), rank) => {
                prop_assert!(!matches!(rank, schema::Resolution::Missing));
            }
            _ => {}
        }
    }
}

// =============================================================================
// Consolidation Properties
// =============================================================================

proptest! {
    /// The summary projection keeps every input row; consolidating the
    /// same inputs twice is identical.
    #[test]
    fn consolidation_is_lossless_and_idempotent(
        y2015 in records_for_year(2015),
        y2019 in records_for_year(2019),
    ) {
        let expected = y2015.len() + y2019.len();
        let years = vec![y2019.clone(), y2015.clone()];

        let a = ConsolidatedTable::from_years(years.clone());
        let b = ConsolidatedTable::from_years(years);

        prop_assert_eq!(a.summary().rows.len(), expected);
        prop_assert_eq!(a.records(), b.records());
        prop_assert_eq!(a.summary(), b.summary());
        prop_assert_eq!(a.detailed(), b.detailed());
    }

    /// The detailed projection never exceeds the summary projection,
    /// and dropped rows account for the difference.
    #[test]
    fn detailed_never_exceeds_summary(y2018 in records_for_year(2018)) {
        let table = ConsolidatedTable::from_years(vec![y2018]);
        let summary = table.summary();
        let detailed = table.detailed();
        prop_assert!(detailed.rows.len() <= summary.rows.len());
        prop_assert_eq!(detailed.rows.len() + detailed.dropped_rows, summary.rows.len());
    }
}

//! Pure alias resolution from a raw header set to a column map.
//!
//! Resolution is independent of any table contents, so it can be
//! tested against bare header lists.

use super::aliases::{canonical_for, CanonicalColumn, Factor};

/// How one canonical column resolves against a raw header set.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resolution {
    /// The column is present at this raw-header index.
    Present(usize),
    /// The column is absent but can be derived (rank from score).
    Derived,
    /// The column is absent and cannot be derived.
    Missing,
}

impl Resolution {
    /// The raw-header index, when present.
    pub fn index(&self) -> Option<usize> {
        match self {
            Resolution::Present(i) => Some(*i),
            _ => None,
        }
    }
}

/// Resolution of every canonical column against one year's headers.
#[derive(Debug, Clone)]
pub struct ColumnMap {
    pub country: Resolution,
    pub score: Resolution,
    pub rank: Resolution,
    factors: [Resolution; 6],
}

impl ColumnMap {
    /// Resolution for one factor column.
    pub fn factor(&self, factor: Factor) -> Resolution {
        self.factors[factor_slot(factor)]
    }
}

fn factor_slot(factor: Factor) -> usize {
    Factor::ALL
        .iter()
        .position(|f| *f == factor)
        .unwrap_or_default()
}

/// Resolve a raw header list against the alias dictionary.
///
/// First match wins if a source ever repeats an alias. Rank resolves to
/// [`Resolution::Derived`] when absent but a score column is present;
/// a missing score is left as [`Resolution::Missing`] for the caller to
/// reject.
pub fn resolve_columns(headers: &[String]) -> ColumnMap {
    let mut country = Resolution::Missing;
    let mut score = Resolution::Missing;
    let mut rank = Resolution::Missing;
    let mut factors = [Resolution::Missing; 6];

    for (index, raw) in headers.iter().enumerate() {
        let Some(canonical) = canonical_for(raw) else {
            continue;
        };
        let slot = match canonical {
            CanonicalColumn::Country => &mut country,
            CanonicalColumn::Score => &mut score,
            CanonicalColumn::Rank => &mut rank,
            CanonicalColumn::Factor(f) => &mut factors[factor_slot(f)],
        };
        if matches!(slot, Resolution::Missing) {
            *slot = Resolution::Present(index);
        }
    }

    if matches!(rank, Resolution::Missing) && matches!(score, Resolution::Present(_)) {
        rank = Resolution::Derived;
    }

    ColumnMap {
        country,
        score,
        rank,
        factors,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn headers(raw: &[&str]) -> Vec<String> {
        raw.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_resolve_2015_style_headers() {
        let map = resolve_columns(&headers(&[
            "Country",
            "Region",
            "Happiness Rank",
            "Happiness Score",
            "Economy (GDP per Capita)",
            "Family",
            "Health (Life Expectancy)",
            "Freedom",
            "Trust (Government Corruption)",
            "Generosity",
        ]));

        assert_eq!(map.country, Resolution::Present(0));
        assert_eq!(map.rank, Resolution::Present(2));
        assert_eq!(map.score, Resolution::Present(3));
        assert_eq!(map.factor(Factor::Gdp), Resolution::Present(4));
        assert_eq!(map.factor(Factor::SocialSupport), Resolution::Present(5));
        assert_eq!(map.factor(Factor::Corruption), Resolution::Present(8));
    }

    #[test]
    fn test_rank_derived_when_absent() {
        let map = resolve_columns(&headers(&["Country name", "Life Ladder"]));
        assert_eq!(map.score, Resolution::Present(1));
        assert_eq!(map.rank, Resolution::Derived);
    }

    #[test]
    fn test_rank_not_derivable_without_score() {
        let map = resolve_columns(&headers(&["Country", "Region"]));
        assert_eq!(map.score, Resolution::Missing);
        assert_eq!(map.rank, Resolution::Missing);
    }

    #[test]
    fn test_unknown_columns_ignored() {
        let map = resolve_columns(&headers(&[
            "Overall rank",
            "Country or region",
            "Score",
            "Standard Error",
        ]));
        assert_eq!(map.rank, Resolution::Present(0));
        assert_eq!(map.country, Resolution::Present(1));
        assert_eq!(map.score, Resolution::Present(2));
        assert_eq!(map.factor(Factor::Freedom), Resolution::Missing);
    }

    #[test]
    fn test_first_match_wins_on_duplicate_alias() {
        let map = resolve_columns(&headers(&["Score", "Happiness Score"]));
        assert_eq!(map.score, Resolution::Present(0));
    }
}

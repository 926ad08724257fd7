//! Static country -> continent classification and score aggregation.
//!
//! Country names in the survey drift between years ("Hong Kong" vs
//! "Hong Kong S.A.R., China", three Cyprus variants), so the table
//! keeps every variant spelling, lookups are normalized (trimmed,
//! case-folded), and countries that still fail to match are reported
//! explicitly rather than dropped in silence.

use std::collections::{BTreeMap, HashMap};

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::table::ConsolidatedTable;

/// The five continents countries are grouped into.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub enum Continent {
    Africa,
    Americas,
    Asia,
    Europe,
    Oceania,
}

impl Continent {
    /// Display name.
    pub fn name(&self) -> &'static str {
        match self {
            Continent::Africa => "Africa",
            Continent::Americas => "Americas",
            Continent::Asia => "Asia",
            Continent::Europe => "Europe",
            Continent::Oceania => "Oceania",
        }
    }
}

impl std::fmt::Display for Continent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

const AFRICA: &[&str] = &[
    "Algeria", "Angola", "Benin", "Botswana", "Burkina Faso", "Burundi", "Cameroon",
    "Central African Republic", "Chad", "Comoros", "Congo (Brazzaville)", "Congo (Kinshasa)",
    "Ivory Coast", "Djibouti", "Egypt", "Ethiopia", "Gabon", "Gambia", "Ghana", "Guinea",
    "Kenya", "Lesotho", "Liberia", "Libya", "Madagascar", "Malawi", "Mali", "Mauritania",
    "Mauritius", "Morocco", "Mozambique", "Namibia", "Niger", "Nigeria", "Rwanda", "Senegal",
    "Sierra Leone", "Somalia", "Somaliland Region", "South Africa", "South Sudan", "Sudan",
    "Swaziland", "Tanzania", "Togo", "Tunisia", "Uganda", "Zambia", "Zimbabwe",
];

const ASIA: &[&str] = &[
    "Afghanistan", "Armenia", "Azerbaijan", "Bahrain", "Bangladesh", "Bhutan", "Cambodia",
    "China", "Hong Kong", "Hong Kong S.A.R., China", "India", "Indonesia", "Iran", "Iraq",
    "Israel", "Japan", "Jordan", "Kazakhstan", "Kuwait", "Kyrgyzstan", "Laos", "Lebanon",
    "Malaysia", "Mongolia", "Myanmar", "Nepal", "Oman", "Pakistan", "Palestinian Territories",
    "Philippines", "Qatar", "Saudi Arabia", "Singapore", "South Korea", "Sri Lanka", "Syria",
    "Taiwan", "Taiwan Province of China", "Tajikistan", "Thailand", "Turkey", "Turkmenistan",
    "United Arab Emirates", "Uzbekistan", "Vietnam", "Yemen",
];

const EUROPE: &[&str] = &[
    "Albania", "Austria", "Belarus", "Belgium", "Bosnia and Herzegovina", "Bulgaria",
    "Croatia", "Cyprus", "Czech Republic", "Denmark", "Estonia", "Finland", "France",
    "Georgia", "Germany", "Greece", "Hungary", "Iceland", "Ireland", "Italy", "Kosovo",
    "Latvia", "Lithuania", "Luxembourg", "Macedonia", "Malta", "Moldova", "Montenegro",
    "Netherlands", "North Cyprus", "North Macedonia", "Northern Cyprus", "Norway", "Poland",
    "Portugal", "Romania", "Russia", "Serbia", "Slovakia", "Slovenia", "Spain", "Sweden",
    "Switzerland", "Ukraine", "United Kingdom",
];

const AMERICAS: &[&str] = &[
    "Argentina", "Belize", "Bolivia", "Brazil", "Canada", "Chile", "Colombia", "Costa Rica",
    "Dominican Republic", "Ecuador", "El Salvador", "Guatemala", "Haiti", "Honduras",
    "Jamaica", "Mexico", "Nicaragua", "Panama", "Paraguay", "Peru", "Puerto Rico",
    "Suriname", "Trinidad & Tobago", "Trinidad and Tobago", "United States", "Uruguay",
    "Venezuela",
];

const OCEANIA: &[&str] = &["Australia", "New Zealand"];

/// Normalized country name -> continent. Case variants of the same
/// name ("Somaliland Region"/"Somaliland region") collapse into one
/// entry here.
static LOOKUP: Lazy<HashMap<String, Continent>> = Lazy::new(|| {
    let groups = [
        (Continent::Africa, AFRICA),
        (Continent::Asia, ASIA),
        (Continent::Europe, EUROPE),
        (Continent::Americas, AMERICAS),
        (Continent::Oceania, OCEANIA),
    ];

    let mut map = HashMap::new();
    for (continent, names) in groups {
        for name in names {
            map.insert(normalize(name), continent);
        }
    }
    map
});

fn normalize(name: &str) -> String {
    name.trim().to_lowercase()
}

/// Look up the continent for a country display name.
///
/// The lookup is tolerant of case and surrounding whitespace; a name
/// not in the table has no continent.
pub fn continent_of(country: &str) -> Option<Continent> {
    LOOKUP.get(&normalize(country)).copied()
}

/// Per-continent mean scores for one year.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContinentBreakdown {
    /// Mean score per continent. A continent with no matched country
    /// is absent, not zero.
    pub means: BTreeMap<Continent, f64>,
    /// Country names that matched no continent, in first-seen order.
    /// Explicit so callers can surface the coverage gap.
    pub unmatched: Vec<String>,
}

/// Group one year's records by continent and average their scores.
pub fn aggregate_by_continent(table: &ConsolidatedTable, year: u16) -> ContinentBreakdown {
    let mut sums: BTreeMap<Continent, (f64, usize)> = BTreeMap::new();
    let mut unmatched: Vec<String> = Vec::new();

    for record in table.year_slice(year) {
        match continent_of(&record.country) {
            Some(continent) => {
                let entry = sums.entry(continent).or_insert((0.0, 0));
                entry.0 += record.score;
                entry.1 += 1;
            }
            None => {
                if !unmatched.iter().any(|name| name == &record.country) {
                    unmatched.push(record.country.clone());
                }
            }
        }
    }

    if !unmatched.is_empty() {
        warn!(year, countries = ?unmatched, "countries excluded from continent aggregate");
    }

    let means = sums
        .into_iter()
        .map(|(continent, (sum, count))| (continent, sum / count as f64))
        .collect();

    ContinentBreakdown { means, unmatched }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::table::{CanonicalRecord, FactorValues};

    fn record(country: &str, year: u16, score: f64) -> CanonicalRecord {
        CanonicalRecord {
            country: country.to_string(),
            year,
            score,
            rank: 0,
            factors: FactorValues::default(),
        }
    }

    #[test]
    fn test_continent_of_known_countries() {
        assert_eq!(continent_of("Brazil"), Some(Continent::Americas));
        assert_eq!(continent_of("Finland"), Some(Continent::Europe));
        assert_eq!(continent_of("New Zealand"), Some(Continent::Oceania));
        assert_eq!(continent_of("Hong Kong S.A.R., China"), Some(Continent::Asia));
    }

    #[test]
    fn test_continent_of_unknown_country() {
        assert_eq!(continent_of("Atlantis"), None);
    }

    #[test]
    fn test_lookup_is_case_and_whitespace_tolerant() {
        assert_eq!(continent_of("somaliland region"), Some(Continent::Africa));
        assert_eq!(continent_of("  Brazil "), Some(Continent::Americas));
        assert_eq!(continent_of("NORTHERN CYPRUS"), Some(Continent::Europe));
    }

    #[test]
    fn test_aggregate_means_by_continent() {
        let table = ConsolidatedTable::from_years(vec![vec![
            record("Brazil", 2019, 6.0),
            record("Canada", 2019, 7.0),
            record("Finland", 2019, 7.769),
        ]]);

        let breakdown = aggregate_by_continent(&table, 2019);
        assert_eq!(breakdown.means.get(&Continent::Americas), Some(&6.5));
        assert_eq!(breakdown.means.get(&Continent::Europe), Some(&7.769));
        // No African record that year: continent absent, not zero.
        assert_eq!(breakdown.means.get(&Continent::Africa), None);
        assert!(breakdown.unmatched.is_empty());
    }

    #[test]
    fn test_aggregate_reports_unmatched_countries() {
        let table = ConsolidatedTable::from_years(vec![vec![
            record("Brazil", 2019, 6.0),
            record("Atlantis", 2019, 9.9),
            record("Atlantis", 2019, 9.8),
        ]]);

        let breakdown = aggregate_by_continent(&table, 2019);
        assert_eq!(breakdown.unmatched, vec!["Atlantis"]);
        assert_eq!(breakdown.means.len(), 1);
    }

    #[test]
    fn test_aggregate_filters_by_year() {
        let table = ConsolidatedTable::from_years(vec![
            vec![record("Brazil", 2015, 4.0)],
            vec![record("Brazil", 2019, 6.0)],
        ]);
        let breakdown = aggregate_by_continent(&table, 2019);
        assert_eq!(breakdown.means.get(&Continent::Americas), Some(&6.0));
    }
}

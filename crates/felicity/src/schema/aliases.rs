//! Canonical column names and the alias dictionary.
//!
//! Every raw header that appears in the 2015-2019 source files is
//! listed here. Raw headers not in the dictionary are dropped during
//! reconciliation.

use serde::{Deserialize, Serialize};

/// One of the six named factor indicators contributing to the score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Factor {
    Gdp,
    SocialSupport,
    LifeExpectancy,
    Freedom,
    Generosity,
    Corruption,
}

impl Factor {
    /// All factors, in canonical display order.
    pub const ALL: [Factor; 6] = [
        Factor::Gdp,
        Factor::SocialSupport,
        Factor::LifeExpectancy,
        Factor::Freedom,
        Factor::Generosity,
        Factor::Corruption,
    ];

    /// The canonical display name used in feature vectors and exports.
    pub fn display_name(&self) -> &'static str {
        match self {
            Factor::Gdp => "GDP",
            Factor::SocialSupport => "Social support",
            Factor::LifeExpectancy => "Life expectancy",
            Factor::Freedom => "Freedom",
            Factor::Generosity => "Generosity",
            Factor::Corruption => "Corruption",
        }
    }

    /// Look up a factor by its canonical display name.
    pub fn from_display_name(name: &str) -> Option<Factor> {
        Factor::ALL.iter().copied().find(|f| f.display_name() == name)
    }
}

impl std::fmt::Display for Factor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.display_name())
    }
}

/// A column of the canonical schema.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CanonicalColumn {
    Country,
    Score,
    Rank,
    Factor(Factor),
}

/// Alias dictionary: raw source header -> canonical column.
///
/// Covers the naming drift across the five years: the 2015/2016 files
/// use long parenthesized names, 2017 uses dotted names, 2018/2019 use
/// short names, and "Family" became "Social support" in 2018.
pub const ALIASES: &[(&str, CanonicalColumn)] = &[
    // Country
    ("Country", CanonicalColumn::Country),
    ("Country or region", CanonicalColumn::Country),
    ("Country name", CanonicalColumn::Country),
    // Score
    ("Score", CanonicalColumn::Score),
    ("Happiness Score", CanonicalColumn::Score),
    ("Happiness.Score", CanonicalColumn::Score),
    ("Life Ladder", CanonicalColumn::Score),
    // Rank
    ("Rank", CanonicalColumn::Rank),
    ("Happiness Rank", CanonicalColumn::Rank),
    ("Happiness.Rank", CanonicalColumn::Rank),
    ("Overall rank", CanonicalColumn::Rank),
    // GDP
    ("GDP", CanonicalColumn::Factor(Factor::Gdp)),
    ("GDP per capita", CanonicalColumn::Factor(Factor::Gdp)),
    ("Economy (GDP per Capita)", CanonicalColumn::Factor(Factor::Gdp)),
    ("Economy..GDP.per.Capita.", CanonicalColumn::Factor(Factor::Gdp)),
    // Social support
    ("Social support", CanonicalColumn::Factor(Factor::SocialSupport)),
    ("Family", CanonicalColumn::Factor(Factor::SocialSupport)),
    // Life expectancy
    ("Life expectancy", CanonicalColumn::Factor(Factor::LifeExpectancy)),
    ("Healthy life expectancy", CanonicalColumn::Factor(Factor::LifeExpectancy)),
    ("Health (Life Expectancy)", CanonicalColumn::Factor(Factor::LifeExpectancy)),
    ("Health..Life.Expectancy.", CanonicalColumn::Factor(Factor::LifeExpectancy)),
    // Freedom
    ("Freedom", CanonicalColumn::Factor(Factor::Freedom)),
    ("Freedom to make life choices", CanonicalColumn::Factor(Factor::Freedom)),
    // Generosity
    ("Generosity", CanonicalColumn::Factor(Factor::Generosity)),
    // Corruption
    ("Corruption", CanonicalColumn::Factor(Factor::Corruption)),
    ("Perceptions of corruption", CanonicalColumn::Factor(Factor::Corruption)),
    ("Trust (Government Corruption)", CanonicalColumn::Factor(Factor::Corruption)),
    ("Trust..Government.Corruption.", CanonicalColumn::Factor(Factor::Corruption)),
];

/// Resolve a raw header to its canonical column, if it has one.
pub fn canonical_for(raw: &str) -> Option<CanonicalColumn> {
    ALIASES
        .iter()
        .find(|(alias, _)| *alias == raw)
        .map(|(_, canonical)| *canonical)
}

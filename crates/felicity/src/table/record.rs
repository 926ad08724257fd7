//! The reconciled per-country-per-year record.

use serde::{Deserialize, Serialize};

use crate::schema::Factor;

/// Values of the six factor indicators for one record.
///
/// A factor absent from a year's source (or marked as missing in the
/// data) is `None`, never zero.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FactorValues {
    pub gdp: Option<f64>,
    pub social_support: Option<f64>,
    pub life_expectancy: Option<f64>,
    pub freedom: Option<f64>,
    pub generosity: Option<f64>,
    pub corruption: Option<f64>,
}

impl FactorValues {
    /// Get one factor's value.
    pub fn get(&self, factor: Factor) -> Option<f64> {
        match factor {
            Factor::Gdp => self.gdp,
            Factor::SocialSupport => self.social_support,
            Factor::LifeExpectancy => self.life_expectancy,
            Factor::Freedom => self.freedom,
            Factor::Generosity => self.generosity,
            Factor::Corruption => self.corruption,
        }
    }

    /// Set one factor's value.
    pub fn set(&mut self, factor: Factor, value: Option<f64>) {
        let slot = match factor {
            Factor::Gdp => &mut self.gdp,
            Factor::SocialSupport => &mut self.social_support,
            Factor::LifeExpectancy => &mut self.life_expectancy,
            Factor::Freedom => &mut self.freedom,
            Factor::Generosity => &mut self.generosity,
            Factor::Corruption => &mut self.corruption,
        };
        *slot = value;
    }

    /// Whether all six factors carry a value.
    pub fn is_complete(&self) -> bool {
        Factor::ALL.iter().all(|f| self.get(*f).is_some())
    }

    /// All six values in canonical factor order, when complete.
    pub fn complete(&self) -> Option<[f64; 6]> {
        let mut out = [0.0; 6];
        for (slot, factor) in out.iter_mut().zip(Factor::ALL) {
            *slot = self.get(factor)?;
        }
        Some(out)
    }
}

/// One reconciled (country, year) entity with canonical fields.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CanonicalRecord {
    /// Free-text display name, not normalized to an ISO code.
    pub country: String,
    /// One of 2015-2019.
    pub year: u16,
    /// The happiness score. Required.
    pub score: f64,
    /// 1-based ordinal by descending score within the year. Derived
    /// when the source has no rank column; taken verbatim otherwise.
    pub rank: u32,
    /// The six factor indicators, each optional.
    pub factors: FactorValues,
}

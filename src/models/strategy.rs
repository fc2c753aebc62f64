//! Strategy catalogue and screening results

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::profile::{ProfileField, StockProfile};
use crate::error::{Result, ScreenerError};

/// Rows shown per strategy result
pub const DISPLAY_LIMIT: usize = 15;

pub const GROWTH_MIN_REVENUE_GROWTH: f64 = 0.15;
pub const VALUE_MAX_PE: f64 = 25.0;
pub const VALUE_MAX_PB: f64 = 3.0;
pub const MOMENTUM_MAX_RSI: f64 = 75.0;

/// The four supported screening strategies
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum StrategyKind {
    QualityInvesting,
    GrowthInvesting,
    ValueInvesting,
    TechnicalMomentum,
}

impl StrategyKind {
    pub const ALL: [StrategyKind; 4] = [
        StrategyKind::QualityInvesting,
        StrategyKind::GrowthInvesting,
        StrategyKind::ValueInvesting,
        StrategyKind::TechnicalMomentum,
    ];

    pub fn id(self) -> &'static str {
        match self {
            StrategyKind::QualityInvesting => "quality-investing",
            StrategyKind::GrowthInvesting => "growth-investing",
            StrategyKind::ValueInvesting => "value-investing",
            StrategyKind::TechnicalMomentum => "technical-momentum",
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            StrategyKind::QualityInvesting => "Quality Investing",
            StrategyKind::GrowthInvesting => "Growth Investing",
            StrategyKind::ValueInvesting => "Value Investing",
            StrategyKind::TechnicalMomentum => "Technical Momentum",
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            StrategyKind::QualityInvesting => {
                "Focuses on financially healthy companies with strong, stable performance."
            }
            StrategyKind::GrowthInvesting => {
                "Focuses on companies with strong growth in revenue and earnings."
            }
            StrategyKind::ValueInvesting => {
                "Focuses on finding undervalued stocks trading below their intrinsic value."
            }
            StrategyKind::TechnicalMomentum => {
                "Focuses on stocks that are in a strong uptrend."
            }
        }
    }

    pub fn sort_key(self) -> SortKey {
        match self {
            StrategyKind::QualityInvesting => SortKey::descending(ProfileField::Roe),
            StrategyKind::GrowthInvesting => SortKey::descending(ProfileField::RevenueGrowth),
            StrategyKind::ValueInvesting => SortKey::ascending(ProfileField::PeRatio),
            StrategyKind::TechnicalMomentum => SortKey::descending(ProfileField::Rsi),
        }
    }

    /// Fields the predicate reads; a run where none of the candidates
    /// reports one of these yields an empty result
    pub fn required_fields(self) -> &'static [ProfileField] {
        match self {
            StrategyKind::QualityInvesting => &[ProfileField::DebtToEquity, ProfileField::Roe],
            StrategyKind::GrowthInvesting => &[ProfileField::RevenueGrowth],
            StrategyKind::ValueInvesting => &[ProfileField::PeRatio, ProfileField::PbRatio],
            StrategyKind::TechnicalMomentum => &[
                ProfileField::CurrentPrice,
                ProfileField::Sma50,
                ProfileField::Sma200,
                ProfileField::Rsi,
            ],
        }
    }

    pub fn display_columns(self) -> &'static [DisplayColumn] {
        use DisplayColumn::{CompanyName, Field, Symbol};
        match self {
            StrategyKind::QualityInvesting => &[
                Symbol,
                CompanyName,
                Field(ProfileField::CurrentPrice),
                Field(ProfileField::Roe),
                Field(ProfileField::DebtToEquity),
                Field(ProfileField::PeRatio),
                Field(ProfileField::MarketCap),
            ],
            StrategyKind::GrowthInvesting => &[
                Symbol,
                CompanyName,
                Field(ProfileField::CurrentPrice),
                Field(ProfileField::RevenueGrowth),
                Field(ProfileField::PeRatio),
                Field(ProfileField::MarketCap),
            ],
            StrategyKind::ValueInvesting => &[
                Symbol,
                CompanyName,
                Field(ProfileField::CurrentPrice),
                Field(ProfileField::PeRatio),
                Field(ProfileField::PbRatio),
                Field(ProfileField::DebtToEquity),
                Field(ProfileField::MarketCap),
            ],
            StrategyKind::TechnicalMomentum => &[
                Symbol,
                CompanyName,
                Field(ProfileField::CurrentPrice),
                Field(ProfileField::Rsi),
                Field(ProfileField::Sma50),
                Field(ProfileField::Sma200),
            ],
        }
    }

    /// Columns of the unfiltered view used to tune filter thresholds
    pub fn raw_columns(self) -> &'static [DisplayColumn] {
        use DisplayColumn::{Field, Symbol};
        match self {
            StrategyKind::QualityInvesting => &[
                Symbol,
                Field(ProfileField::DebtToEquity),
                Field(ProfileField::Roe),
            ],
            StrategyKind::GrowthInvesting => &[Symbol, Field(ProfileField::RevenueGrowth)],
            StrategyKind::ValueInvesting => &[
                Symbol,
                Field(ProfileField::PeRatio),
                Field(ProfileField::PbRatio),
            ],
            StrategyKind::TechnicalMomentum => &[
                Symbol,
                Field(ProfileField::CurrentPrice),
                Field(ProfileField::Sma50),
                Field(ProfileField::Sma200),
                Field(ProfileField::Rsi),
            ],
        }
    }
}

impl fmt::Display for StrategyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for StrategyKind {
    type Err = ScreenerError;

    fn from_str(s: &str) -> Result<Self> {
        let normalized = s.trim().to_ascii_lowercase().replace(['_', ' '], "-");
        match normalized.as_str() {
            "quality" | "quality-investing" => Ok(StrategyKind::QualityInvesting),
            "growth" | "growth-investing" => Ok(StrategyKind::GrowthInvesting),
            "value" | "value-investing" => Ok(StrategyKind::ValueInvesting),
            "momentum" | "technical" | "technical-momentum" => {
                Ok(StrategyKind::TechnicalMomentum)
            }
            _ => Err(ScreenerError::UnknownStrategy(s.to_string())),
        }
    }
}

/// Caller-tunable thresholds of the Quality strategy
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct QualityParams {
    pub max_debt_to_equity: f64,
    /// Fraction, e.g. 0.12 for 12%
    pub min_roe: f64,
}

impl QualityParams {
    pub const MAX_DEBT_TO_EQUITY_RANGE: (f64, f64) = (0.0, 5.0);
    pub const MIN_ROE_PCT_RANGE: (f64, f64) = (0.0, 50.0);

    /// Build from user-facing controls where ROE is a whole percent
    pub fn from_percent(max_debt_to_equity: f64, min_roe_pct: f64) -> Result<Self> {
        let (de_lo, de_hi) = Self::MAX_DEBT_TO_EQUITY_RANGE;
        if !(de_lo..=de_hi).contains(&max_debt_to_equity) {
            return Err(ScreenerError::InvalidParameter(format!(
                "max debt to equity must be within {}..={}, got {}",
                de_lo, de_hi, max_debt_to_equity
            )));
        }
        let (roe_lo, roe_hi) = Self::MIN_ROE_PCT_RANGE;
        if !(roe_lo..=roe_hi).contains(&min_roe_pct) {
            return Err(ScreenerError::InvalidParameter(format!(
                "min ROE % must be within {}..={}, got {}",
                roe_lo, roe_hi, min_roe_pct
            )));
        }
        Ok(Self {
            max_debt_to_equity,
            min_roe: min_roe_pct / 100.0,
        })
    }
}

impl Default for QualityParams {
    fn default() -> Self {
        Self {
            max_debt_to_equity: 1.5,
            min_roe: 0.12,
        }
    }
}

/// A strategy together with its parameters
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "strategy", rename_all = "kebab-case")]
pub enum Strategy {
    QualityInvesting(QualityParams),
    GrowthInvesting,
    ValueInvesting,
    TechnicalMomentum,
}

impl Strategy {
    /// Strategy with default parameters for `kind`
    pub fn from_kind(kind: StrategyKind) -> Self {
        match kind {
            StrategyKind::QualityInvesting => Strategy::QualityInvesting(QualityParams::default()),
            StrategyKind::GrowthInvesting => Strategy::GrowthInvesting,
            StrategyKind::ValueInvesting => Strategy::ValueInvesting,
            StrategyKind::TechnicalMomentum => Strategy::TechnicalMomentum,
        }
    }

    pub fn kind(&self) -> StrategyKind {
        match self {
            Strategy::QualityInvesting(_) => StrategyKind::QualityInvesting,
            Strategy::GrowthInvesting => StrategyKind::GrowthInvesting,
            Strategy::ValueInvesting => StrategyKind::ValueInvesting,
            Strategy::TechnicalMomentum => StrategyKind::TechnicalMomentum,
        }
    }

    /// Human-readable filter criteria
    pub fn criteria(&self) -> String {
        match self {
            Strategy::QualityInvesting(params) => format!(
                "Debt to Equity < {} and Return on Equity > {:.0}%",
                params.max_debt_to_equity,
                params.min_roe * 100.0
            ),
            Strategy::GrowthInvesting => format!(
                "Revenue Growth > {:.0}%",
                GROWTH_MIN_REVENUE_GROWTH * 100.0
            ),
            Strategy::ValueInvesting => format!(
                "P/E Ratio < {}, P/B Ratio < {}",
                VALUE_MAX_PE, VALUE_MAX_PB
            ),
            Strategy::TechnicalMomentum => format!(
                "Current Price > 50-Day SMA, 50-Day SMA > 200-Day SMA, RSI < {}",
                MOMENTUM_MAX_RSI
            ),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    Ascending,
    Descending,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SortKey {
    pub field: ProfileField,
    pub order: SortOrder,
}

impl SortKey {
    pub fn ascending(field: ProfileField) -> Self {
        Self {
            field,
            order: SortOrder::Ascending,
        }
    }

    pub fn descending(field: ProfileField) -> Self {
        Self {
            field,
            order: SortOrder::Descending,
        }
    }
}

impl fmt::Display for SortKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let order = match self.order {
            SortOrder::Ascending => "ascending",
            SortOrder::Descending => "descending",
        };
        write!(f, "{} ({})", self.field.label(), order)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DisplayColumn {
    Symbol,
    CompanyName,
    Field(ProfileField),
}

impl DisplayColumn {
    pub fn label(self) -> &'static str {
        match self {
            DisplayColumn::Symbol => "Symbol",
            DisplayColumn::CompanyName => "Company Name",
            DisplayColumn::Field(field) => field.label(),
        }
    }
}

/// Survivors of one strategy, in ranked order
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StrategyResult {
    pub strategy: StrategyKind,
    pub sort_key: SortKey,
    /// Profiles that were evaluated
    pub candidates: usize,
    pub survivors: Vec<StockProfile>,
    /// Required fields no candidate reported
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub missing_fields: Vec<ProfileField>,
}

impl StrategyResult {
    /// Ranked survivors truncated to the display limit
    pub fn top(&self) -> &[StockProfile] {
        let end = self.survivors.len().min(DISPLAY_LIMIT);
        &self.survivors[..end]
    }

    pub fn is_empty(&self) -> bool {
        self.survivors.is_empty()
    }

    pub fn len(&self) -> usize {
        self.survivors.len()
    }
}

/// Outcome of one full screening run
#[derive(Debug, Clone, PartialEq)]
pub enum ScreenOutcome {
    /// No profile could be built for any ticker in the universe
    NoData,
    /// The run was aborted; nothing partial is kept
    Cancelled,
    /// Evaluation ran; the result may still have zero survivors
    Completed(StrategyResult),
}

impl ScreenOutcome {
    pub fn result(&self) -> Option<&StrategyResult> {
        match self {
            ScreenOutcome::Completed(result) => Some(result),
            _ => None,
        }
    }

    pub fn status(&self) -> &'static str {
        match self {
            ScreenOutcome::NoData => "no_data",
            ScreenOutcome::Cancelled => "cancelled",
            ScreenOutcome::Completed(result) if result.is_empty() => "no_matches",
            ScreenOutcome::Completed(_) => "ranked",
        }
    }

    pub fn message(&self) -> Option<&'static str> {
        match self {
            ScreenOutcome::NoData => {
                Some("Could not fetch data for any stocks. Please try again later.")
            }
            ScreenOutcome::Cancelled => Some("Analysis cancelled."),
            ScreenOutcome::Completed(result) if result.is_empty() => Some(
                "No stocks met the criteria for this strategy. Please try relaxing your criteria.",
            ),
            ScreenOutcome::Completed(_) => None,
        }
    }
}

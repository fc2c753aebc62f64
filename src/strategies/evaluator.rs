//! Strategy evaluation: filter predicates and ranking over stock profiles

use crate::models::profile::{ProfileField, StockProfile};
use crate::models::strategy::{
    QualityParams, SortKey, SortOrder, Strategy, StrategyKind, StrategyResult,
    GROWTH_MIN_REVENUE_GROWTH, MOMENTUM_MAX_RSI, VALUE_MAX_PB, VALUE_MAX_PE,
};
use std::cmp::Ordering;
use tracing::{debug, warn};

pub struct StrategyEvaluator;

impl StrategyEvaluator {
    /// Filter `profiles` with the strategy predicate and rank the survivors.
    ///
    /// No display cap is applied here. Ties keep their input order.
    pub fn evaluate(profiles: &[StockProfile], strategy: &Strategy) -> StrategyResult {
        let kind = strategy.kind();
        let sort_key = kind.sort_key();

        let missing_fields = Self::missing_fields(profiles, kind);
        if !missing_fields.is_empty() {
            warn!(
                strategy = %kind,
                missing = ?missing_fields,
                "Required fields unavailable for every candidate, returning empty result"
            );
            return StrategyResult {
                strategy: kind,
                sort_key,
                candidates: profiles.len(),
                survivors: Vec::new(),
                missing_fields,
            };
        }

        let mut survivors: Vec<StockProfile> = profiles
            .iter()
            .filter(|p| Self::passes(p, strategy))
            .cloned()
            .collect();
        Self::sort(&mut survivors, sort_key);

        debug!(
            strategy = %kind,
            candidates = profiles.len(),
            survivors = survivors.len(),
            "Evaluated {}: {} of {} passed",
            kind,
            survivors.len(),
            profiles.len()
        );

        StrategyResult {
            strategy: kind,
            sort_key,
            candidates: profiles.len(),
            survivors,
            missing_fields,
        }
    }

    /// Whether `profile` survives `strategy`. Unknown values never pass.
    pub fn passes(profile: &StockProfile, strategy: &Strategy) -> bool {
        match strategy {
            Strategy::QualityInvesting(params) => Self::passes_quality(profile, params),
            Strategy::GrowthInvesting => profile
                .revenue_growth
                .is_some_and(|g| g > GROWTH_MIN_REVENUE_GROWTH),
            Strategy::ValueInvesting => {
                let pe_ok = profile.pe_ratio.is_some_and(|pe| pe > 0.0 && pe < VALUE_MAX_PE);
                let pb_ok = profile.pb_ratio.is_some_and(|pb| pb > 0.0 && pb < VALUE_MAX_PB);
                pe_ok && pb_ok
            }
            Strategy::TechnicalMomentum => match (profile.sma_50, profile.sma_200, profile.rsi) {
                (Some(fast), Some(slow), Some(rsi)) => {
                    profile.current_price > fast && fast > slow && rsi < MOMENTUM_MAX_RSI
                }
                _ => false,
            },
        }
    }

    fn passes_quality(profile: &StockProfile, params: &QualityParams) -> bool {
        let de_ok = profile
            .debt_to_equity
            .is_some_and(|de| de < params.max_debt_to_equity);
        let roe_ok = profile.roe.is_some_and(|roe| roe > params.min_roe);
        de_ok && roe_ok
    }

    /// Every profile ranked by the strategy's sort key, without filtering.
    ///
    /// Profiles with an unknown key come last.
    pub fn rank_all(profiles: &[StockProfile], kind: StrategyKind) -> Vec<StockProfile> {
        let mut ranked = profiles.to_vec();
        Self::sort(&mut ranked, kind.sort_key());
        ranked
    }

    fn sort(profiles: &mut [StockProfile], key: SortKey) {
        profiles.sort_by(|a, b| Self::compare(a, b, key));
    }

    fn compare(a: &StockProfile, b: &StockProfile, key: SortKey) -> Ordering {
        match (key.field.value(a), key.field.value(b)) {
            (Some(x), Some(y)) => match key.order {
                SortOrder::Ascending => x.total_cmp(&y),
                SortOrder::Descending => y.total_cmp(&x),
            },
            (Some(_), None) => Ordering::Less,
            (None, Some(_)) => Ordering::Greater,
            (None, None) => Ordering::Equal,
        }
    }

    fn missing_fields(profiles: &[StockProfile], kind: StrategyKind) -> Vec<ProfileField> {
        if profiles.is_empty() {
            return Vec::new();
        }
        kind.required_fields()
            .iter()
            .copied()
            .filter(|field| profiles.iter().all(|p| field.value(p).is_none()))
            .collect()
    }
}

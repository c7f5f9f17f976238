//! # Ranking Strategy
//!
//! Strategies for ranking providers.
//!
//! This module provides the [`RankingStrategy`] trait and the
//! [`CompositeScoreStrategy`] implementation, which blends a financial
//! sub-score with five normalised quality metrics using the resolved
//! [`CriteriaWeights`].

use crate::domain::entities::provider::Provider;
use crate::domain::services::fee_model::FeeModelResult;
use crate::domain::services::financial_score::{FeeBaselines, FinancialScorer};
use crate::domain::services::normalizer::MetricNormalizer;
use crate::domain::value_objects::enums::Criterion;
use crate::domain::value_objects::weights::CriteriaWeights;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Decimal places kept on scores in responses and in rank ordering.
pub const SCORE_DECIMALS: i32 = 6;

/// Rounds a score to [`SCORE_DECIMALS`] places.
///
/// Ranking orders on the rounded composite, so two candidates that print the
/// same score keep their input order.
#[must_use]
pub fn round_score(score: f64) -> f64 {
    let factor = 10f64.powi(SCORE_DECIMALS);
    (score * factor).round() / factor
}

/// A provider paired with its fee model outcome for the current request.
#[derive(Debug, Clone, PartialEq)]
pub struct RankingCandidate {
    /// The provider.
    pub provider: Provider,
    /// Fee model result for this request's amount and rate.
    pub fee_result: FeeModelResult,
}

impl RankingCandidate {
    /// Creates a candidate.
    #[must_use]
    pub fn new(provider: Provider, fee_result: FeeModelResult) -> Self {
        Self {
            provider,
            fee_result,
        }
    }
}

/// Per-criterion scores, each in `[0, 1]`.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct ComponentScores {
    /// Financial sub-score.
    pub fees_fx: f64,
    /// Normalised trust.
    pub trust: f64,
    /// Normalised service quality.
    pub service: f64,
    /// Normalised customer satisfaction.
    pub customer_satisfaction: f64,
    /// Normalised reliability.
    pub reliability: f64,
    /// Normalised speed.
    pub speed: f64,
}

impl ComponentScores {
    /// Returns the score for a criterion.
    #[must_use]
    pub const fn get(&self, criterion: Criterion) -> f64 {
        match criterion {
            Criterion::FeesFx => self.fees_fx,
            Criterion::Trust => self.trust,
            Criterion::Service => self.service,
            Criterion::CustomerSatisfaction => self.customer_satisfaction,
            Criterion::Reliability => self.reliability,
            Criterion::Speed => self.speed,
        }
    }

    fn slot_mut(&mut self, criterion: Criterion) -> &mut f64 {
        match criterion {
            Criterion::FeesFx => &mut self.fees_fx,
            Criterion::Trust => &mut self.trust,
            Criterion::Service => &mut self.service,
            Criterion::CustomerSatisfaction => &mut self.customer_satisfaction,
            Criterion::Reliability => &mut self.reliability,
            Criterion::Speed => &mut self.speed,
        }
    }

    /// Weighted sum of the components.
    #[must_use]
    pub fn weighted(&self, weights: &CriteriaWeights) -> f64 {
        weights.iter().map(|(c, w)| w * self.get(c)).sum()
    }
}

/// A provider with its ranking information.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScoredCandidate {
    /// The provider being ranked.
    pub provider: Provider,
    /// Fee model result.
    pub fee_result: FeeModelResult,
    /// Component scores.
    pub components: ComponentScores,
    /// Composite score (higher = better).
    pub composite: f64,
    /// The rank (1 = best).
    pub rank: usize,
}

impl ScoredCandidate {
    /// Returns true if this candidate is the best (rank 1).
    #[must_use]
    pub fn is_best(&self) -> bool {
        self.rank == 1
    }
}

impl fmt::Display for ScoredCandidate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "ScoredCandidate(#{} score={:.4} provider={})",
            self.rank,
            self.composite,
            self.provider.code()
        )
    }
}

/// Trait for ranking strategies.
pub trait RankingStrategy: Send + Sync + fmt::Debug {
    /// Ranks the candidates under the given weights.
    ///
    /// # Returns
    ///
    /// At most `top_n` scored candidates sorted by rank (best first).
    fn rank(
        &self,
        candidates: &[RankingCandidate],
        weights: &CriteriaWeights,
        top_n: usize,
    ) -> Vec<ScoredCandidate>;

    /// Returns the name of this ranking strategy.
    fn name(&self) -> &'static str;
}

/// Weighted composite of the financial sub-score and quality metrics.
///
/// Fee baselines are computed once per call from the whole pool, before
/// truncation, so a provider's financial score never depends on `top_n`.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct CompositeScoreStrategy {
    normalizer: MetricNormalizer,
    scorer: FinancialScorer,
}

impl CompositeScoreStrategy {
    /// Creates a composite strategy.
    #[must_use]
    pub const fn new(normalizer: MetricNormalizer, scorer: FinancialScorer) -> Self {
        Self { normalizer, scorer }
    }

    fn components(&self, candidate: &RankingCandidate, baselines: &FeeBaselines) -> ComponentScores {
        let metrics = candidate.provider.metrics();
        let mut scores = ComponentScores {
            fees_fx: self.scorer.score(
                candidate.fee_result.landing,
                candidate.fee_result.total_fees,
                baselines,
            ),
            ..ComponentScores::default()
        };
        for criterion in Criterion::ALL.into_iter().filter(|c| c.is_quality()) {
            if let Some(raw) = metrics.get(criterion) {
                *scores.slot_mut(criterion) = self.normalizer.normalize(raw);
            }
        }
        scores
    }
}

impl RankingStrategy for CompositeScoreStrategy {
    fn rank(
        &self,
        candidates: &[RankingCandidate],
        weights: &CriteriaWeights,
        top_n: usize,
    ) -> Vec<ScoredCandidate> {
        if candidates.is_empty() || top_n == 0 {
            return Vec::new();
        }

        let baselines = FeeBaselines::from_results(
            candidates.iter().map(|c| &c.fee_result),
            self.scorer.config().fee_baseline_fallback,
        );
        if baselines.landing_is_degenerate() {
            tracing::warn!(
                candidates = candidates.len(),
                "no provider lands a positive amount, using neutral landing ratio"
            );
        }

        let mut scored: Vec<(usize, ComponentScores, f64)> = candidates
            .iter()
            .enumerate()
            .map(|(i, c)| {
                let components = self.components(c, &baselines);
                let composite = components.weighted(weights);
                tracing::debug!(
                    provider = %c.provider.code(),
                    landing = %c.fee_result.landing,
                    fees = %c.fee_result.total_fees,
                    financial = components.fees_fx,
                    composite,
                    "scored candidate"
                );
                (i, components, composite)
            })
            .collect();

        // Stable: composites equal after rounding keep input order
        scored.sort_by(|a, b| {
            round_score(b.2)
                .partial_cmp(&round_score(a.2))
                .unwrap_or(std::cmp::Ordering::Equal)
        });

        scored
            .into_iter()
            .take(top_n)
            .enumerate()
            .filter_map(|(rank, (idx, components, composite))| {
                candidates.get(idx).map(|c| ScoredCandidate {
                    provider: c.provider.clone(),
                    fee_result: c.fee_result.clone(),
                    components,
                    composite,
                    rank: rank + 1,
                })
            })
            .collect()
    }

    fn name(&self) -> &'static str {
        "CompositeScore"
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use super::*;
    use crate::domain::entities::provider::{ProviderId, QualityMetrics};
    use crate::domain::services::fee_model::FeeModelEvaluator;
    use crate::domain::value_objects::{Amount, FeeRule, FeeRuleSet, SpotRate};
    use rust_decimal::Decimal;

    fn dec(s: &str) -> Decimal {
        s.parse().unwrap()
    }

    fn candidate(id: u64, code: &str, rules: Vec<FeeRule>, metric: f64) -> RankingCandidate {
        candidate_at("1000", "1.10", id, code, rules, metric)
    }

    fn candidate_at(
        amount: &str,
        rate: &str,
        id: u64,
        code: &str,
        rules: Vec<FeeRule>,
        metric: f64,
    ) -> RankingCandidate {
        let rules = FeeRuleSet::new(rules).unwrap();
        let fee_result = FeeModelEvaluator::new()
            .evaluate(
                Amount::new(dec(amount)).unwrap(),
                SpotRate::new(dec(rate)).unwrap(),
                &rules,
            )
            .unwrap();
        let provider = Provider::new(ProviderId::new(id), code, code, "US")
            .with_fee_rules(rules)
            .with_metrics(QualityMetrics::uniform(metric));
        RankingCandidate::new(provider, fee_result)
    }

    mod scored_candidate {
        use super::*;

        #[test]
        fn is_best_only_for_rank_one() {
            let ranked = CompositeScoreStrategy::default().rank(
                &[
                    candidate(1, "A", vec![], 90.0),
                    candidate(2, "B", vec![], 10.0),
                ],
                &CriteriaWeights::default(),
                5,
            );
            assert!(ranked[0].is_best());
            assert!(!ranked[1].is_best());
            assert!(ranked[0].to_string().starts_with("ScoredCandidate(#1"));
        }

        #[test]
        fn components_weighted_sum() {
            let components = ComponentScores {
                fees_fx: 1.0,
                trust: 0.5,
                service: 0.5,
                customer_satisfaction: 0.0,
                reliability: 0.0,
                speed: 1.0,
            };
            let w = components.weighted(&CriteriaWeights::default());
            assert!((w - (0.5 + 0.075 + 0.075 + 0.04)).abs() < 1e-12);
        }
    }

    mod composite {
        use super::*;

        #[test]
        fn fixed_fee_vs_margin_scenario() {
            let pool = [
                candidate(1, "P1", vec![FeeRule::fixed(dec("5"))], 80.0),
                candidate(2, "P2", vec![FeeRule::fx_margin(dec("0.01"))], 60.0),
            ];
            let ranked =
                CompositeScoreStrategy::default().rank(&pool, &CriteriaWeights::default(), 3);

            assert_eq!(ranked.len(), 2);
            assert_eq!(ranked[0].provider.code(), "P1");
            assert_eq!(ranked[0].fee_result.landing, dec("1094.5"));
            assert_eq!(ranked[1].fee_result.landing, dec("1089"));

            // P1 holds the best landing and the lowest positive fee.
            assert!((ranked[0].components.fees_fx - 1.0).abs() < 1e-12);
            assert!((ranked[0].composite - 0.9).abs() < 1e-9);

            let landing_ratio = 1089.0 / 1094.5;
            let p2_financial = (landing_ratio + 1.0) / 2.0;
            assert!((ranked[1].components.fees_fx - p2_financial).abs() < 1e-9);
            assert!((ranked[1].composite - (0.5 * p2_financial + 0.5 * 0.6)).abs() < 1e-9);
        }

        #[test]
        fn all_zero_fees_uses_fallback_baseline() {
            let pool = [
                candidate(1, "A", vec![], 50.0),
                candidate(2, "B", vec![FeeRule::fx_margin(dec("0.02"))], 50.0),
            ];
            let ranked =
                CompositeScoreStrategy::default().rank(&pool, &CriteriaWeights::default(), 3);
            assert_eq!(ranked.len(), 2);
            for r in &ranked {
                assert!(r.composite.is_finite());
                assert!((0.0..=1.0).contains(&r.composite));
                assert!(r.components.fees_fx > 0.0);
            }
            assert_eq!(ranked[0].provider.code(), "A");
        }

        #[test]
        fn zero_landing_everywhere_is_neutral() {
            let pool = [
                candidate_at("10", "1", 1, "A", vec![FeeRule::fixed(dec("20"))], 70.0),
                candidate_at("10", "1", 2, "B", vec![FeeRule::fixed(dec("40"))], 70.0),
            ];
            let ranked =
                CompositeScoreStrategy::default().rank(&pool, &CriteriaWeights::default(), 3);
            // landing ratio 0.5 for both; A has the lower fee.
            assert!((ranked[0].components.fees_fx - 0.75).abs() < 1e-9);
            assert!((ranked[1].components.fees_fx - 0.5).abs() < 1e-9);
            assert_eq!(ranked[0].provider.code(), "A");
        }

        #[test]
        fn ties_keep_input_order() {
            let pool = [
                candidate(3, "C", vec![], 70.0),
                candidate(1, "A", vec![], 70.0),
                candidate(2, "B", vec![], 70.0),
            ];
            let ranked =
                CompositeScoreStrategy::default().rank(&pool, &CriteriaWeights::default(), 3);
            let codes: Vec<&str> = ranked.iter().map(|r| r.provider.code()).collect();
            assert_eq!(codes, vec!["C", "A", "B"]);
            let ranks: Vec<usize> = ranked.iter().map(|r| r.rank).collect();
            assert_eq!(ranks, vec![1, 2, 3]);
        }

        #[test]
        fn near_ties_below_display_precision_keep_input_order() {
            // B is ahead by 5e-8, which rounds away at six places.
            let pool = [
                candidate(1, "A", vec![], 70.0),
                candidate(2, "B", vec![], 70.000_01),
            ];
            let ranked =
                CompositeScoreStrategy::default().rank(&pool, &CriteriaWeights::default(), 2);
            assert!(ranked[1].composite > ranked[0].composite);
            assert_eq!(round_score(ranked[0].composite), round_score(ranked[1].composite));
            assert_eq!(ranked[0].provider.code(), "A");
            assert_eq!(ranked[1].provider.code(), "B");

            let pool = [
                candidate(1, "A", vec![], 70.0),
                candidate(2, "B", vec![], 70.01),
            ];
            let ranked =
                CompositeScoreStrategy::default().rank(&pool, &CriteriaWeights::default(), 2);
            assert_eq!(ranked[0].provider.code(), "B");
        }

        #[test]
        fn quality_components_follow_their_metric() {
            let rules = FeeRuleSet::new(vec![]).unwrap();
            let fee_result = FeeModelEvaluator::new()
                .evaluate(
                    Amount::new(dec("100")).unwrap(),
                    SpotRate::new(dec("1")).unwrap(),
                    &rules,
                )
                .unwrap();
            let provider = Provider::new(ProviderId::new(1), "A", "A", "US").with_metrics(
                QualityMetrics {
                    trust: 10.0,
                    service: 20.0,
                    customer_satisfaction: 30.0,
                    reliability: 40.0,
                    speed: 150.0,
                },
            );
            let ranked = CompositeScoreStrategy::default().rank(
                &[RankingCandidate::new(provider, fee_result)],
                &CriteriaWeights::default(),
                1,
            );
            let c = ranked[0].components;
            assert!((c.trust - 0.1).abs() < 1e-12);
            assert!((c.service - 0.2).abs() < 1e-12);
            assert!((c.customer_satisfaction - 0.3).abs() < 1e-12);
            assert!((c.reliability - 0.4).abs() < 1e-12);
            assert_eq!(c.speed, 1.0);
        }

        #[test]
        fn truncates_to_top_n() {
            let pool: Vec<RankingCandidate> = (0..6u32)
                .map(|i| candidate(u64::from(i), &format!("P{i}"), vec![], f64::from(i) * 10.0))
                .collect();
            let strategy = CompositeScoreStrategy::default();
            let weights = CriteriaWeights::default();

            assert_eq!(strategy.rank(&pool, &weights, 2).len(), 2);
            assert_eq!(strategy.rank(&pool, &weights, 6).len(), 6);
            assert_eq!(strategy.rank(&pool, &weights, 50).len(), 6);
            assert!(strategy.rank(&pool, &weights, 0).is_empty());

            let top = strategy.rank(&pool, &weights, 2);
            assert_eq!(top[0].provider.code(), "P5");
            assert_eq!(top[1].provider.code(), "P4");
        }

        #[test]
        fn truncation_does_not_change_scores() {
            let pool = [
                candidate(1, "A", vec![FeeRule::fixed(dec("1"))], 40.0),
                candidate(2, "B", vec![FeeRule::fixed(dec("9"))], 95.0),
                candidate(3, "C", vec![FeeRule::percentage(dec("0.003"))], 60.0),
            ];
            let strategy = CompositeScoreStrategy::default();
            let weights = CriteriaWeights::default();
            let all = strategy.rank(&pool, &weights, 3);
            let top = strategy.rank(&pool, &weights, 1);
            assert_eq!(top[0], all[0]);
        }

        #[test]
        fn empty_pool() {
            let ranked =
                CompositeScoreStrategy::default().rank(&[], &CriteriaWeights::default(), 3);
            assert!(ranked.is_empty());
        }

        #[test]
        fn deterministic() {
            let pool = [
                candidate(1, "A", vec![FeeRule::fixed(dec("2.5"))], 66.0),
                candidate(2, "B", vec![FeeRule::fx_margin(dec("0.004"))], 71.0),
                candidate(3, "C", vec![FeeRule::percentage(dec("0.01"))], 80.0),
            ];
            let strategy = CompositeScoreStrategy::default();
            let weights = CriteriaWeights::default();
            assert_eq!(
                strategy.rank(&pool, &weights, 3),
                strategy.rank(&pool, &weights, 3)
            );
        }

        #[test]
        fn sorted_descending() {
            let pool = [
                candidate(1, "A", vec![FeeRule::fixed(dec("12"))], 20.0),
                candidate(2, "B", vec![FeeRule::fx_margin(dec("0.03"))], 85.0),
                candidate(3, "C", vec![], 55.0),
                candidate(4, "D", vec![FeeRule::percentage(dec("0.02"))], 99.0),
            ];
            let ranked =
                CompositeScoreStrategy::default().rank(&pool, &CriteriaWeights::default(), 4);
            assert!(
                ranked
                    .windows(2)
                    .all(|w| round_score(w[0].composite) >= round_score(w[1].composite))
            );
        }
    }

    #[test]
    fn ranking_strategy_name() {
        assert_eq!(CompositeScoreStrategy::default().name(), "CompositeScore");
    }
}

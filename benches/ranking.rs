//! Ranking throughput over a realistic provider pool.

#![allow(clippy::unwrap_used, missing_docs)]

use criterion::{Criterion as Bench, criterion_group, criterion_main};
use remit_rank::application::services::{
    CompositeScoreStrategy, RankingCandidate, RankingStrategy,
};
use remit_rank::domain::entities::{Provider, ProviderId, QualityMetrics};
use remit_rank::domain::services::{FeeModelEvaluator, WeightResolver};
use remit_rank::domain::value_objects::{Amount, CriteriaWeights, FeeRule, FeeRuleSet, SpotRate};
use rust_decimal::Decimal;
use std::collections::BTreeMap;
use std::hint::black_box;

fn provider(i: u32) -> Provider {
    let n = i64::from(i);
    let rules = FeeRuleSet::new(vec![
        FeeRule::fixed(Decimal::new(n % 7 * 100, 2)),
        FeeRule::clamped(
            FeeRule::percentage(Decimal::new(n % 5 * 10, 4)),
            Some(Decimal::new(99, 2)),
            Some(Decimal::new(1999, 2)),
        ),
        FeeRule::fx_margin(Decimal::new(n % 11 * 5, 4)),
    ])
    .unwrap();
    let base = f64::from(i % 40) + 55.0;
    Provider::new(ProviderId::new(u64::from(i)), format!("P{i}"), format!("Provider {i}"), "US")
        .with_fee_rules(rules)
        .with_metrics(QualityMetrics {
            trust: base,
            service: base - 5.0,
            customer_satisfaction: base + 3.0,
            reliability: base - 2.0,
            speed: 100.0 - base,
        })
}

fn pool(n: u32) -> Vec<RankingCandidate> {
    let amount = Amount::new(Decimal::new(1000, 0)).unwrap();
    let rate = SpotRate::new(Decimal::new(110, 2)).unwrap();
    let evaluator = FeeModelEvaluator::new();
    (0..n)
        .map(|i| {
            let p = provider(i);
            let fee_result = evaluator.evaluate(amount, rate, p.fee_rules()).unwrap();
            RankingCandidate::new(p, fee_result)
        })
        .collect()
}

fn bench_fee_model(c: &mut Bench) {
    let amount = Amount::new(Decimal::new(1000, 0)).unwrap();
    let rate = SpotRate::new(Decimal::new(110, 2)).unwrap();
    let p = provider(3);
    let evaluator = FeeModelEvaluator::new();

    c.bench_function("fee_model_evaluate", |b| {
        b.iter(|| evaluator.evaluate(black_box(amount), black_box(rate), p.fee_rules()))
    });
}

fn bench_rank(c: &mut Bench) {
    let candidates = pool(50);
    let strategy = CompositeScoreStrategy::default();
    let weights = CriteriaWeights::default();

    c.bench_function("rank_50_top_3", |b| {
        b.iter(|| strategy.rank(black_box(&candidates), &weights, 3))
    });
    c.bench_function("rank_50_all", |b| {
        b.iter(|| strategy.rank(black_box(&candidates), &weights, 50))
    });
}

fn bench_weight_resolution(c: &mut Bench) {
    let resolver = WeightResolver::default();
    let overrides = BTreeMap::from([
        ("fees_fx".to_string(), 0.7),
        ("speed".to_string(), 0.3),
        ("unknown".to_string(), 1.0),
    ]);

    c.bench_function("resolve_weights", |b| {
        b.iter(|| resolver.resolve(black_box(Some(&overrides))))
    });
}

criterion_group!(benches, bench_fee_model, bench_rank, bench_weight_resolution);
criterion_main!(benches);

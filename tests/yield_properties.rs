use proptest::prelude::*;
use pyrolysis_yield::{
    classify, compute, FeedstockCategory, MemoizedYieldModel, YieldClassifier, YieldDistribution,
    YieldModel,
};

fn arb_feedstock() -> impl Strategy<Value = FeedstockCategory> {
    prop_oneof![Just(FeedstockCategory::PlasticWaste), Just(FeedstockCategory::Biomass)]
}

/// Temperatures spread over the physical range plus a band around each breakpoint.
fn arb_temperature() -> impl Strategy<Value = f64> {
    prop_oneof![
        -1.0e4f64..1.0e4,
        395.0f64..405.0,
        445.0f64..455.0,
        595.0f64..605.0,
        any::<f64>().prop_filter("finite", |t| t.is_finite()),
    ]
}

/// Regimes whose defining condition holds for `t`, written as the closed/open
/// intervals of the reference tables.
fn matching_regimes(feedstock: FeedstockCategory, t: f64) -> Vec<YieldDistribution> {
    let table = match feedstock {
        FeedstockCategory::PlasticWaste => vec![
            (t < 450.0, YieldDistribution::new(0.60, 0.30, 0.10)),
            ((450.0..=600.0).contains(&t), YieldDistribution::new(0.80, 0.10, 0.10)),
            (t > 600.0, YieldDistribution::new(0.40, 0.05, 0.55)),
        ],
        FeedstockCategory::Biomass => vec![
            (t < 400.0, YieldDistribution::new(0.30, 0.50, 0.20)),
            (t >= 400.0, YieldDistribution::new(0.60, 0.20, 0.20)),
        ],
    };
    table.into_iter().filter(|(holds, _)| *holds).map(|(_, d)| d).collect()
}

proptest! {
    #[test]
    fn test_fractions_sum_to_one(feedstock in arb_feedstock(), t in arb_temperature()) {
        let d = classify(feedstock, t);
        prop_assert!(d.is_normalized());
        for f in [d.oil, d.char, d.gas] {
            prop_assert!((0.0..=1.0).contains(&f));
        }
    }

    #[test]
    fn test_exactly_one_regime_applies(feedstock in arb_feedstock(), t in arb_temperature()) {
        let matches = matching_regimes(feedstock, t);
        prop_assert_eq!(matches.len(), 1);
        prop_assert_eq!(classify(feedstock, t), matches[0]);
    }

    #[test]
    fn test_mass_balance_is_linear(
        feedstock in arb_feedstock(),
        t in arb_temperature(),
        m in 1.0e-3f64..1.0e6,
    ) {
        let d = classify(feedstock, t);
        let once = compute(&d, m);
        let twice = compute(&d, 2.0 * m);
        // Doubling is exact in binary floating point.
        prop_assert_eq!(twice.oil_mass_kg, 2.0 * once.oil_mass_kg);
        prop_assert_eq!(twice.char_mass_kg, 2.0 * once.char_mass_kg);
        prop_assert_eq!(twice.gas_mass_kg, 2.0 * once.gas_mass_kg);
        prop_assert_eq!(twice.co2_avoided_kg, 2.0 * once.co2_avoided_kg);
    }

    #[test]
    fn test_products_conserve_input_mass(
        feedstock in arb_feedstock(),
        t in arb_temperature(),
        m in 1.0e-3f64..1.0e6,
    ) {
        let r = compute(&classify(feedstock, t), m);
        prop_assert!((r.total_product_mass_kg() - m).abs() <= m * 1e-9);
    }

    #[test]
    fn test_evaluation_is_idempotent(
        feedstock in arb_feedstock(),
        t in arb_temperature(),
        m in 1.0f64..1.0e4,
    ) {
        let a = classify(feedstock, t);
        let b = classify(feedstock, t);
        prop_assert_eq!(a, b);
        prop_assert_eq!(compute(&a, m), compute(&b, m));
    }

    #[test]
    fn test_memoized_model_is_transparent(feedstock in arb_feedstock(), t in arb_temperature()) {
        let memo = MemoizedYieldModel::new(YieldModel::default());
        let first = memo.classify(feedstock, t);
        let second = memo.classify(feedstock, t);
        prop_assert_eq!(first, classify(feedstock, t));
        prop_assert_eq!(first, second);
        prop_assert_eq!(memo.len(), 1);
    }
}

#[test]
fn test_reference_scenarios() {
    use FeedstockCategory::{Biomass, PlasticWaste};

    assert_eq!(classify(PlasticWaste, 300.0), YieldDistribution::new(0.60, 0.30, 0.10));
    assert_eq!(classify(PlasticWaste, 500.0), YieldDistribution::new(0.80, 0.10, 0.10));
    assert_eq!(classify(PlasticWaste, 700.0), YieldDistribution::new(0.40, 0.05, 0.55));
    assert_eq!(classify(Biomass, 350.0), YieldDistribution::new(0.30, 0.50, 0.20));
    assert_eq!(classify(PlasticWaste, 450.0), classify(PlasticWaste, 500.0));
    assert_eq!(classify(PlasticWaste, 600.0), classify(PlasticWaste, 500.0));

    let r = compute(&YieldDistribution::new(0.80, 0.10, 0.10), 100.0);
    assert!((r.oil_mass_kg - 80.0).abs() < 1e-9);
    assert!((r.char_mass_kg - 10.0).abs() < 1e-9);
    assert!((r.gas_mass_kg - 10.0).abs() < 1e-9);
    assert!((r.co2_avoided_kg - 150.0).abs() < 1e-9);
    assert!((r.net_profit_usd - 33.0).abs() < 1e-9);
}

//! Engine integration tests

use chrono::{Duration, Utc};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use strike_edge::engine::{Engine, Readiness, SharedEngine};
use strike_edge::model::MarketDirection;
use strike_edge::signal::{Recommendation, Side, Strategy};

fn push_series(engine: &mut Engine, prices: impl IntoIterator<Item = Decimal>) {
    let start = Utc::now();
    for (i, price) in prices.into_iter().enumerate() {
        engine
            .push_price(start + Duration::seconds(30 * i as i64), price)
            .unwrap();
    }
}

fn steady_uptrend() -> impl Iterator<Item = Decimal> {
    (0..30).map(|i| dec!(94000) + Decimal::from(10 * i))
}

#[test]
fn test_uptrend_favours_yes_at_or_below_spot() {
    let mut engine = Engine::with_defaults();
    push_series(&mut engine, steady_uptrend());

    let models = engine.models().copied().unwrap();
    assert!(models.trend > 50.0, "trend {}", models.trend);
    assert!(models.feature > 50.0, "feature {}", models.feature);
    assert_eq!(models.direction(), MarketDirection::Rising);

    let spot = engine.spot().unwrap();
    assert_eq!(spot, dec!(94290));

    let signal = engine.signal().unwrap();
    assert_eq!(signal.contract.side, Side::Yes);
    assert!(signal.contract.strike <= spot);
    assert_eq!(signal.contract.strike, dec!(94250));
    assert_eq!(signal.recommendation, Recommendation::Buy);
    assert_eq!(signal.strategy, Strategy::Enter);
}

#[test]
fn test_single_point_produces_no_signal() {
    let mut engine = Engine::with_defaults();
    push_series(&mut engine, [dec!(94250)]);

    assert_eq!(engine.indicators().rsi, 50.0);
    assert_eq!(engine.indicators().volume, 1.0);
    assert_eq!(engine.readiness(), Readiness::NotReady { have: 1, need: 10 });
    assert!(engine.signal().is_none());
    assert!(engine.contracts().is_empty());
}

#[test]
fn test_market_prices_sum_to_one_every_cycle() {
    let mut engine = Engine::with_defaults();
    let start = Utc::now();
    let walk = [
        94250, 94310, 94280, 94190, 94220, 94400, 94350, 94330, 94500, 94460, 94380, 94300,
        94150, 94120, 94200, 94260,
    ];

    for (i, price) in walk.iter().enumerate() {
        engine
            .push_price(start + Duration::seconds(i as i64), Decimal::from(*price))
            .unwrap();

        for pair in engine.contracts().chunks(2) {
            assert_eq!(pair[0].strike, pair[1].strike);
            assert_eq!(pair[0].market_price + pair[1].market_price, Decimal::ONE);
        }
    }
}

#[test]
fn test_override_pairs_opposite_side() {
    let mut engine = Engine::with_defaults();
    push_series(&mut engine, steady_uptrend());

    engine.set_manual_override(dec!(94500), Side::Yes, 30).unwrap();
    let at_strike: Vec<_> = engine
        .contracts()
        .iter()
        .filter(|c| c.strike == dec!(94500))
        .collect();
    assert_eq!(at_strike.len(), 2);
    assert_eq!(at_strike[0].market_price, dec!(0.30));
    assert_eq!(at_strike[1].market_price, dec!(0.70));

    engine.set_manual_override(dec!(94500), Side::No, 45).unwrap();
    let yes = engine
        .contracts()
        .iter()
        .find(|c| c.strike == dec!(94500) && c.side == Side::Yes)
        .unwrap();
    assert_eq!(yes.market_price, dec!(0.55));
}

#[test]
fn test_short_expiry_changes_strategy() {
    let mut engine = Engine::with_defaults();
    push_series(&mut engine, steady_uptrend());

    engine.set_time_to_expiry(20.0).unwrap();
    assert_eq!(engine.signal().unwrap().strategy, Strategy::HoldAndMonitor);

    engine.set_time_to_expiry(10.0).unwrap();
    assert_eq!(
        engine.signal().unwrap().strategy,
        Strategy::ExitOrHoldThroughExpiry
    );
}

#[test]
fn test_signal_ev_matches_size() {
    let mut engine = Engine::with_defaults();
    push_series(&mut engine, steady_uptrend());
    engine.set_bankroll(dec!(250)).unwrap();

    let signal = engine.signal().unwrap();
    let expected = ((signal.contract.true_prob - signal.contract.market_price)
        * signal.position_size)
        .round_dp_with_strategy(2, rust_decimal::RoundingStrategy::MidpointAwayFromZero);
    assert_eq!(signal.expected_value, expected);
    assert_eq!(signal.position_size.fract(), Decimal::ZERO);
    assert!(signal.confidence >= 0.0 && signal.confidence <= 95.0);
}

#[tokio::test]
async fn test_shared_engine_snapshot_serializes() {
    let shared = SharedEngine::new(Engine::with_defaults());
    let start = Utc::now();
    for (i, price) in steady_uptrend().enumerate() {
        shared
            .push_price(start + Duration::seconds(i as i64), price)
            .await
            .unwrap();
    }

    let snapshot = shared.snapshot().await;
    let json = serde_json::to_value(&snapshot).unwrap();
    assert_eq!(json["readiness"]["state"], "ready");
    assert!(json["signal"]["contract"]["strike"].is_string());
    assert_eq!(
        json["contracts"].as_array().unwrap().len(),
        snapshot.contracts.len()
    );
}

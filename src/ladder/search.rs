//! Contract search over the strike ladder

use super::strikes::{build_ladder, extend_above};
use crate::config::LadderConfig;
use crate::edge::{compressed_edge, is_saturated, profit_multiplier, ProfitWeighting};
use crate::error::Result;
use crate::model::{DecayPricer, MarketDirection, ModelOutputs, OverrideStore};
use crate::signal::{ContractOption, Side};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

/// Price distance over which in-the-money true probability rises by 1.0
const ITM_DISTANCE_SCALE: f64 = 2000.0;
/// Price distance per e-fold of out-of-the-money true probability
const OTM_DISTANCE_SCALE: f64 = 500.0;

/// Every option generated this cycle plus the selection
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchResult {
    /// YES/NO pairs in strike order, extension strikes last
    pub options: Vec<ContractOption>,
    /// Best candidate, `None` only when no options exist
    pub best: Option<ContractOption>,
    /// Strikes appended above the core ladder
    pub extension_strikes: Vec<Decimal>,
}

/// Builds, prices and ranks the strike ladder around spot
pub struct ContractSearch<'a> {
    pricer: &'a DecayPricer,
    overrides: &'a OverrideStore,
    ladder: &'a LadderConfig,
    min_edge: f64,
}

impl<'a> ContractSearch<'a> {
    pub fn new(
        pricer: &'a DecayPricer,
        overrides: &'a OverrideStore,
        ladder: &'a LadderConfig,
        min_edge: f64,
    ) -> Self {
        Self {
            pricer,
            overrides,
            ladder,
            min_edge,
        }
    }

    /// Score the ladder for `spot` and pick the best candidate
    pub fn run(&self, spot: Decimal, minutes_to_expiry: f64, models: &ModelOutputs) -> Result<SearchResult> {
        let direction = models.direction();
        let model_avg = models.average();
        let strikes = build_ladder(spot, self.ladder.increment, self.ladder.range);

        let mut options = Vec::with_capacity((strikes.len() + self.ladder.extension_steps as usize) * 2);
        for &strike in &strikes {
            options.extend(self.evaluate_strike(
                strike,
                spot,
                minutes_to_expiry,
                model_avg,
                direction,
                ProfitWeighting::Proximity,
            )?);
        }

        // The top of the core ladder decides whether more strikes are worth pricing
        let top_yes = options
            .iter()
            .filter(|o| o.side == Side::Yes)
            .max_by(|a, b| a.strike.cmp(&b.strike));

        let mut extension_strikes = Vec::new();
        if let Some(top) = top_yes {
            if !top.is_saturated && top.market_price < dec!(0.95) {
                extension_strikes = extend_above(top.strike, self.ladder.increment, self.ladder.extension_steps);
            }
        }

        for &strike in &extension_strikes {
            options.extend(self.evaluate_strike(
                strike,
                spot,
                minutes_to_expiry,
                model_avg,
                direction,
                ProfitWeighting::Flat,
            )?);
        }

        let best = select_best(&options, self.min_edge).cloned();
        tracing::debug!(
            options = options.len(),
            extended = extension_strikes.len(),
            best_strike = ?best.as_ref().map(|b| b.strike),
            best_side = ?best.as_ref().map(|b| b.side),
            "Contract search complete"
        );

        Ok(SearchResult {
            options,
            best,
            extension_strikes,
        })
    }

    /// YES and NO options for one strike
    fn evaluate_strike(
        &self,
        strike: Decimal,
        spot: Decimal,
        minutes_to_expiry: f64,
        model_avg: f64,
        direction: MarketDirection,
        weighting: ProfitWeighting,
    ) -> Result<[ContractOption; 2]> {
        let quote = self
            .pricer
            .quote(spot, strike, minutes_to_expiry, self.overrides)?;
        let yes_prob = true_prob_above(strike, spot, model_avg);
        let no_prob = Decimal::ONE - yes_prob;

        let build = |side: Side, true_prob: Decimal, market_price: Decimal| {
            let edge = compressed_edge(true_prob, market_price);
            let multiplier = profit_multiplier(
                side,
                strike,
                spot,
                direction,
                weighting,
                self.ladder.proximity_window,
            );
            ContractOption {
                strike,
                side,
                true_prob,
                market_price,
                edge,
                profit_potential: edge * multiplier,
                is_saturated: is_saturated(market_price),
            }
        };

        Ok([
            build(Side::Yes, yes_prob, quote.yes),
            build(Side::No, no_prob, quote.no),
        ])
    }
}

/// Modelled probability that spot settles at or above `strike`
///
/// Below spot it climbs linearly with distance toward 0.99, nudged by the
/// model average; at or above spot it decays exponentially with distance.
pub fn true_prob_above(strike: Decimal, spot: Decimal, model_avg: f64) -> Decimal {
    let distance: f64 = (strike - spot).try_into().unwrap_or(0.0);

    let prob = if strike < spot {
        (0.5 + (-distance) / ITM_DISTANCE_SCALE + (model_avg - 50.0) / 200.0).min(0.99)
    } else {
        let volatility_adjustment = distance.abs() / OTM_DISTANCE_SCALE;
        ((model_avg / 100.0) * (-volatility_adjustment).exp()).max(0.01)
    };

    Decimal::try_from(prob).unwrap_or(dec!(0.5))
}

/// Highest profit potential among non-saturated options with edge above
/// `min_edge`, falling back to the highest overall. Ties keep the earliest.
pub fn select_best(options: &[ContractOption], min_edge: f64) -> Option<&ContractOption> {
    let candidates = options
        .iter()
        .filter(|o| !o.is_saturated && o.edge > min_edge);
    first_max(candidates).or_else(|| first_max(options.iter()))
}

fn first_max<'o>(options: impl Iterator<Item = &'o ContractOption>) -> Option<&'o ContractOption> {
    options.fold(None, |best: Option<&'o ContractOption>, current| match best {
        Some(b) if current.profit_potential <= b.profit_potential => Some(b),
        _ => Some(current),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn models(trend: f64, feature: f64) -> ModelOutputs {
        ModelOutputs { trend, feature }
    }

    fn option(strike: Decimal, profit_potential: f64, edge: f64, is_saturated: bool) -> ContractOption {
        ContractOption {
            strike,
            side: Side::Yes,
            true_prob: dec!(0.5),
            market_price: dec!(0.5),
            edge,
            profit_potential,
            is_saturated,
        }
    }

    fn run(spot: Decimal, minutes: f64, outputs: &ModelOutputs) -> SearchResult {
        let pricer = DecayPricer::default();
        let overrides = OverrideStore::new();
        let ladder = LadderConfig::default();
        ContractSearch::new(&pricer, &overrides, &ladder, 3.0)
            .run(spot, minutes, outputs)
            .unwrap()
    }

    #[test]
    fn test_true_prob_below_spot() {
        // 0.5 + 500 / 2000 + 10 / 200
        let prob = true_prob_above(dec!(93750), dec!(94250), 60.0);
        assert!((f64::try_from(prob).unwrap() - 0.8).abs() < 1e-9);

        let deep = true_prob_above(dec!(90000), dec!(94250), 90.0);
        assert_eq!(deep, dec!(0.99));
    }

    #[test]
    fn test_true_prob_at_and_above_spot() {
        let at = true_prob_above(dec!(94250), dec!(94250), 60.0);
        assert!((f64::try_from(at).unwrap() - 0.6).abs() < 1e-9);

        let above = true_prob_above(dec!(94750), dec!(94250), 60.0);
        let expected = 0.6 * (-1.0f64).exp();
        assert!((f64::try_from(above).unwrap() - expected).abs() < 1e-9);

        let far = true_prob_above(dec!(104250), dec!(94250), 30.0);
        assert_eq!(far, dec!(0.01));
    }

    #[test]
    fn test_pairs_are_complementary() {
        let result = run(dec!(94317.42), 45.0, &models(62.0, 55.0));
        for pair in result.options.chunks(2) {
            assert_eq!(pair[0].strike, pair[1].strike);
            assert_eq!(pair[0].side, Side::Yes);
            assert_eq!(pair[1].side, Side::No);
            assert_eq!(pair[0].market_price + pair[1].market_price, Decimal::ONE);
            assert_eq!(pair[0].true_prob + pair[1].true_prob, Decimal::ONE);
        }
    }

    #[test]
    fn test_ladder_extends_by_two_when_top_is_live() {
        // 45 minutes out the top strike is floored at 15¢, never saturated
        let result = run(dec!(94250), 45.0, &models(60.0, 60.0));
        assert_eq!(result.extension_strikes, vec![dec!(95500), dec!(95750)]);
        assert_eq!(result.options.len(), (9 + 2) * 2);
    }

    #[test]
    fn test_low_spot_prices_only_positive_strikes() {
        let result = run(dec!(809), 45.0, &models(60.0, 60.0));
        assert!(result.options.iter().all(|o| o.strike > Decimal::ZERO));
        assert_eq!(result.options[0].strike, dec!(250));
        assert!(result.best.is_some());
    }

    #[test]
    fn test_ladder_not_extended_when_top_saturated() {
        // Three minutes out, 1% above spot prices at 1¢
        let result = run(dec!(94250), 3.0, &models(60.0, 60.0));
        assert!(result.extension_strikes.is_empty());
        assert_eq!(result.options.len(), 9 * 2);
    }

    #[test]
    fn test_extension_uses_flat_weighting() {
        let result = run(dec!(94250), 45.0, &models(70.0, 70.0));
        for option in result.options.iter().skip(18) {
            let expected = match option.side {
                Side::Yes => 0.6,
                Side::No => 0.4,
            };
            assert!((option.profit_potential - option.edge * expected).abs() < 1e-9);
        }
    }

    #[test]
    fn test_best_is_not_saturated_when_candidates_exist() {
        let result = run(dec!(94250), 45.0, &models(70.0, 65.0));
        let best = result.best.unwrap();
        assert!(!best.is_saturated);
        assert!(best.edge > 3.0);
        assert!(result
            .options
            .iter()
            .filter(|o| !o.is_saturated && o.edge > 3.0)
            .all(|o| o.profit_potential <= best.profit_potential));
    }

    #[test]
    fn test_select_best_filters_and_keeps_first_max() {
        let options = vec![
            option(dec!(1), 5.0, 10.0, false),
            option(dec!(2), 9.0, 10.0, true),
            option(dec!(3), 7.0, 2.0, false),
            option(dec!(4), 5.0, 10.0, false),
        ];
        assert_eq!(select_best(&options, 3.0).unwrap().strike, dec!(1));
    }

    #[test]
    fn test_select_best_falls_back_to_unfiltered_max() {
        let options = vec![
            option(dec!(1), 5.0, 1.0, false),
            option(dec!(2), 9.0, 10.0, true),
        ];
        assert_eq!(select_best(&options, 3.0).unwrap().strike, dec!(2));
        assert!(select_best(&[], 3.0).is_none());
    }
}

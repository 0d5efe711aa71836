use anyhow::{anyhow, Result};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use std::ops::Range;

use crate::config::{to_cents, SessionConfig};
use crate::ticker::Ticker;

/// Source of initial prices and per-tick price moves.
pub trait PriceModel {
    fn initial_price(&mut self) -> Decimal;
    fn next_price(&mut self, ticker: &Ticker, current: Decimal) -> Decimal;
}

/// Uniform random walk at cent resolution, clamped from below by a floor.
#[derive(Clone, Debug)]
pub struct RandomWalk<R: Rng> {
    rng: R,
    initial_cents: Range<i64>,
    max_delta_cents: i64,
    floor: Decimal,
}

impl<R: Rng> RandomWalk<R> {
    pub fn new(rng: R, config: &SessionConfig) -> Result<Self> {
        config.validate()?;
        let initial_cents =
            to_cents(config.min_initial_price)?..to_cents(config.max_initial_price)?;
        if initial_cents.is_empty() {
            return Err(anyhow!("Empty initial price range {:?}", initial_cents));
        }
        Ok(Self {
            rng,
            initial_cents,
            max_delta_cents: to_cents(config.max_delta)?,
            floor: config.price_floor,
        })
    }

    fn delta(&mut self) -> Decimal {
        if self.max_delta_cents == 0 {
            return dec!(0);
        }
        let cents = self
            .rng
            .random_range(-self.max_delta_cents..self.max_delta_cents);
        Decimal::new(cents, 2)
    }
}

impl RandomWalk<StdRng> {
    /// Seeded from `config.seed` when present, from the OS otherwise.
    pub fn from_config(config: &SessionConfig) -> Result<Self> {
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        };
        Self::new(rng, config)
    }
}

impl<R: Rng> PriceModel for RandomWalk<R> {
    fn initial_price(&mut self) -> Decimal {
        Decimal::new(self.rng.random_range(self.initial_cents.clone()), 2)
    }

    fn next_price(&mut self, _ticker: &Ticker, current: Decimal) -> Decimal {
        (current + self.delta()).max(self.floor)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ticker() -> Ticker {
        Ticker::try_from("AAPL").unwrap()
    }

    fn walk(seed: u64) -> RandomWalk<StdRng> {
        RandomWalk::from_config(&SessionConfig::default().with_seed(Some(seed))).unwrap()
    }

    #[test]
    fn test_initial_price_range() {
        let mut walk = walk(7);
        for _ in 0..1000 {
            let price = walk.initial_price();
            assert!(price >= dec!(100) && price < dec!(1000), "{}", price);
            assert!(price.scale() <= 2);
        }
    }

    #[test]
    fn test_next_price_bounded_move() {
        let mut walk = walk(42);
        let mut price = dec!(500);
        for _ in 0..1000 {
            let next = walk.next_price(&ticker(), price);
            assert!((next - price).abs() <= dec!(10));
            assert!(next >= dec!(1));
            price = next;
        }
    }

    #[test]
    fn test_floor_clamps_low_prices() {
        let mut walk = walk(3);
        let mut price = dec!(1);
        for _ in 0..1000 {
            price = walk.next_price(&ticker(), price);
            assert!(price >= dec!(1));
        }
    }

    #[test]
    fn test_same_seed_same_walk() {
        let mut a = walk(11);
        let mut b = walk(11);
        for _ in 0..50 {
            assert_eq!(a.initial_price(), b.initial_price());
            assert_eq!(
                a.next_price(&ticker(), dec!(300)),
                b.next_price(&ticker(), dec!(300))
            );
        }
    }

    #[test]
    fn test_sub_cent_range_is_an_error() {
        let config = SessionConfig {
            min_initial_price: dec!(100.001),
            max_initial_price: dec!(100.004),
            ..Default::default()
        }
        .with_seed(Some(9));
        assert!(RandomWalk::from_config(&config).is_err());
        assert!(crate::state::Session::from_config(&config).is_err());
    }

    #[test]
    fn test_zero_drift_is_flat() {
        let config = SessionConfig {
            max_delta: dec!(0),
            ..Default::default()
        };
        let mut walk = RandomWalk::new(StdRng::seed_from_u64(1), &config).unwrap();
        assert_eq!(walk.next_price(&ticker(), dec!(250)), dec!(250));
    }
}

use anyhow::{anyhow, Result};
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use std::collections::HashSet;

use crate::ticker::Ticker;

pub const DEFAULT_SYMBOLS: [&str; 4] = ["AAPL", "TSLA", "AMZN", "GOOG"];

#[derive(Clone, Debug)]
pub struct SessionConfig {
    /// Symbols listed at startup, in display order.
    pub symbols: Vec<String>,
    /// Initial prices are drawn from `min_initial_price..max_initial_price`.
    pub min_initial_price: Decimal,
    pub max_initial_price: Decimal,
    /// Per tick, a price moves by a delta in `-max_delta..max_delta`.
    pub max_delta: Decimal,
    pub price_floor: Decimal,
    pub seed: Option<u64>,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            symbols: DEFAULT_SYMBOLS.iter().map(|s| s.to_string()).collect(),
            min_initial_price: dec!(100),
            max_initial_price: dec!(1000),
            max_delta: dec!(10),
            price_floor: dec!(1),
            seed: None,
        }
    }
}

impl SessionConfig {
    pub fn with_symbols<I, S>(mut self, symbols: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.symbols = symbols.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_seed(mut self, seed: Option<u64>) -> Self {
        self.seed = seed;
        self
    }

    pub fn tickers(&self) -> Result<Vec<Ticker>> {
        let mut seen = HashSet::new();
        let mut tickers = Vec::with_capacity(self.symbols.len());
        for symbol in self.symbols.iter() {
            let ticker = Ticker::try_from(symbol).map_err(|err| anyhow!(err))?;
            if !seen.insert(ticker.clone()) {
                return Err(anyhow!("Symbol {} is listed twice", ticker));
            }
            tickers.push(ticker);
        }
        Ok(tickers)
    }

    pub fn validate(&self) -> Result<()> {
        if self.symbols.is_empty() {
            return Err(anyhow!("At least one symbol must be listed"));
        }
        self.tickers()?;
        if self.price_floor <= dec!(0) {
            return Err(anyhow!("Price floor must be positive"));
        }
        if self.min_initial_price < self.price_floor {
            return Err(anyhow!(
                "Minimum initial price {} is below the price floor {}",
                self.min_initial_price,
                self.price_floor
            ));
        }
        // prices are drawn in whole cents
        let min_cents = to_cents(self.min_initial_price)?;
        if min_cents <= 0 || min_cents >= to_cents(self.max_initial_price)? {
            return Err(anyhow!(
                "Initial price range {}..{} holds no whole cent",
                self.min_initial_price,
                self.max_initial_price
            ));
        }
        if self.max_delta < dec!(0) {
            return Err(anyhow!("Price drift must not be negative"));
        }
        to_cents(self.max_delta)?;
        Ok(())
    }
}

/// Converts an amount to whole cents, rounding to the nearest cent.
pub fn to_cents(value: Decimal) -> Result<i64> {
    (value * dec!(100))
        .round()
        .to_i64()
        .ok_or_else(|| anyhow!("{} is out of range", value))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_valid() {
        let config = SessionConfig::default();
        assert!(config.validate().is_ok());
        let tickers = config.tickers().unwrap();
        assert_eq!(
            tickers.iter().map(|t| t.as_str()).collect::<Vec<_>>(),
            vec!["AAPL", "TSLA", "AMZN", "GOOG"]
        );
    }

    #[test]
    fn test_rejects_bad_symbols() {
        assert!(SessionConfig::default()
            .with_symbols(Vec::<String>::new())
            .validate()
            .is_err());
        assert!(SessionConfig::default()
            .with_symbols(["aapl", "AAPL"])
            .validate()
            .is_err());
        assert!(SessionConfig::default()
            .with_symbols(["AAPL", " "])
            .validate()
            .is_err());
    }

    #[test]
    fn test_rejects_bad_prices() {
        let config = SessionConfig {
            price_floor: dec!(0),
            ..Default::default()
        };
        assert!(config.validate().is_err());

        let config = SessionConfig {
            min_initial_price: dec!(1000),
            ..Default::default()
        };
        assert!(config.validate().is_err());

        let config = SessionConfig {
            max_delta: dec!(-1),
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_rejects_range_narrower_than_a_cent() {
        let config = SessionConfig {
            min_initial_price: dec!(100.001),
            max_initial_price: dec!(100.004),
            ..Default::default()
        };
        assert!(config.validate().is_err());

        let config = SessionConfig {
            min_initial_price: dec!(100.001),
            max_initial_price: dec!(100.02),
            ..Default::default()
        };
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_to_cents() {
        assert_eq!(to_cents(dec!(10)).unwrap(), 1000);
        assert_eq!(to_cents(dec!(0.015)).unwrap(), 2);
    }
}

use anyhow::{anyhow, Result};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use std::collections::HashMap;
use std::fmt::Display;
use tracing::{debug, warn};

use crate::ticker::Ticker;

pub mod simulation;

pub use simulation::{PriceModel, RandomWalk};

#[derive(Clone, Debug, PartialEq)]
pub struct Stock {
    ticker: Ticker,
    price: Decimal,
}

impl Stock {
    pub fn ticker(&self) -> &Ticker {
        &self.ticker
    }

    pub fn price(&self) -> Decimal {
        self.price
    }
}

/// Current price table, kept in listing order with a symbol index for lookups.
#[derive(Clone, Debug, Default)]
pub struct Market {
    stocks: Vec<Stock>,
    index: HashMap<Ticker, usize>,
}

impl Market {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn list(&mut self, ticker: Ticker, price: Decimal) -> Result<()> {
        if price <= dec!(0) {
            return Err(anyhow!("Price of {} must be positive, got {}", ticker, price));
        }
        if self.index.contains_key(&ticker) {
            return Err(anyhow!("{} is already listed", ticker));
        }
        self.index.insert(ticker.clone(), self.stocks.len());
        self.stocks.push(Stock { ticker, price });
        Ok(())
    }

    pub fn get(&self, ticker: &Ticker) -> Option<&Stock> {
        self.index.get(ticker).map(|&i| &self.stocks[i])
    }

    pub fn price(&self, ticker: &Ticker) -> Option<Decimal> {
        self.get(ticker).map(|stock| stock.price)
    }

    /// Resolves raw user input to a listed ticker.
    pub fn lookup(&self, symbol: &str) -> Option<&Ticker> {
        let ticker = Ticker::try_from(symbol).ok()?;
        self.get(&ticker).map(|stock| &stock.ticker)
    }

    pub fn stocks(&self) -> impl Iterator<Item = &Stock> {
        self.stocks.iter()
    }

    pub fn len(&self) -> usize {
        self.stocks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stocks.is_empty()
    }

    /// Moves every listed price one step with the given model. A
    /// non-positive step result is discarded and the price is kept.
    pub fn update_prices<M: PriceModel + ?Sized>(&mut self, model: &mut M) {
        for stock in self.stocks.iter_mut() {
            let previous = stock.price;
            let next = model.next_price(&stock.ticker, previous);
            if next <= dec!(0) {
                warn!("{} : ignoring non-positive price {}", stock.ticker, next);
                continue;
            }
            stock.price = next;
            debug!("{} : {} -> {}", stock.ticker, previous, stock.price);
        }
    }
}

/// Market reporter.
pub struct MarketView<'a>(pub &'a Market);

impl Display for MarketView<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f)?;
        writeln!(f, "--- Market Prices ---")?;
        for stock in self.0.stocks() {
            writeln!(f, "{}: {:.2}", stock.ticker, stock.price)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ticker(s: &str) -> Ticker {
        Ticker::try_from(s).unwrap()
    }

    struct Shift(Decimal);

    impl PriceModel for Shift {
        fn initial_price(&mut self) -> Decimal {
            dec!(100)
        }

        fn next_price(&mut self, _ticker: &Ticker, current: Decimal) -> Decimal {
            current + self.0
        }
    }

    #[test]
    fn test_list_and_lookup() {
        let mut market = Market::new();
        market.list(ticker("AAPL"), dec!(500)).unwrap();
        market.list(ticker("TSLA"), dec!(250.5)).unwrap();

        assert_eq!(market.len(), 2);
        assert_eq!(market.lookup(" aapl "), Some(&ticker("AAPL")));
        assert_eq!(market.lookup("MSFT"), None);
        assert_eq!(market.lookup(""), None);
        assert_eq!(market.price(&ticker("TSLA")), Some(dec!(250.5)));
    }

    #[test]
    fn test_list_rejects_duplicates_and_non_positive() {
        let mut market = Market::new();
        market.list(ticker("AAPL"), dec!(500)).unwrap();
        assert!(market.list(ticker("aapl"), dec!(10)).is_err());
        assert!(market.list(ticker("GOOG"), dec!(0)).is_err());
        assert_eq!(market.len(), 1);
    }

    #[test]
    fn test_update_prices_applies_model_to_every_stock() {
        let mut market = Market::new();
        market.list(ticker("AAPL"), dec!(500)).unwrap();
        market.list(ticker("AMZN"), dec!(120)).unwrap();

        market.update_prices(&mut Shift(dec!(2.5)));

        assert_eq!(market.price(&ticker("AAPL")), Some(dec!(502.5)));
        assert_eq!(market.price(&ticker("AMZN")), Some(dec!(122.5)));
    }

    #[test]
    fn test_update_prices_keeps_prices_positive() {
        let mut market = Market::new();
        market.list(ticker("AAPL"), dec!(5)).unwrap();
        market.list(ticker("GOOG"), dec!(20)).unwrap();

        market.update_prices(&mut Shift(dec!(-10)));

        assert_eq!(market.price(&ticker("AAPL")), Some(dec!(5)));
        assert_eq!(market.price(&ticker("GOOG")), Some(dec!(10)));
        assert!(market.stocks().all(|stock| stock.price() > dec!(0)));
    }

    #[test]
    fn test_market_view_keeps_listing_order() {
        let mut market = Market::new();
        market.list(ticker("TSLA"), dec!(753.19)).unwrap();
        market.list(ticker("AAPL"), dec!(536.4)).unwrap();

        assert_eq!(
            MarketView(&market).to_string(),
            "\n--- Market Prices ---\nTSLA: 753.19\nAAPL: 536.40\n"
        );
    }
}

use itertools::Itertools;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use std::{collections::HashMap, fmt::Display};
use tracing::warn;

use crate::{marketplace::Market, order::TradeError, ticker::Ticker};

/// Holdings ledger. A ticker present in `assets` always has a positive quantity.
#[derive(Clone, Debug, Default)]
pub struct Portfolio {
    assets: HashMap<Ticker, u64>,
}

impl Portfolio {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn quantity(&self, ticker: &Ticker) -> u64 {
        self.assets.get(ticker).copied().unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.assets.is_empty()
    }

    pub fn len(&self) -> usize {
        self.assets.len()
    }

    /// Holdings sorted by symbol.
    pub fn holdings(&self) -> impl Iterator<Item = (&Ticker, u64)> {
        self.assets
            .iter()
            .map(|(ticker, quantity)| (ticker, *quantity))
            .sorted_by(|a, b| a.0.cmp(b.0))
    }

    /// Adds `quantity` shares and returns the new holding.
    pub fn add(&mut self, ticker: &Ticker, quantity: u64) -> Result<u64, TradeError> {
        let total = self
            .quantity(ticker)
            .checked_add(quantity)
            .ok_or_else(|| TradeError::QuantityOverflow(ticker.clone()))?;
        if total > 0 {
            self.assets.insert(ticker.clone(), total);
        }
        Ok(total)
    }

    /// Removes up to `quantity` shares, clamping to the owned amount.
    /// Returns `(removed, remaining)`.
    pub fn remove(&mut self, ticker: &Ticker, quantity: u64) -> Result<(u64, u64), TradeError> {
        let owned = self.quantity(ticker);
        if owned == 0 {
            return Err(TradeError::NotOwned(ticker.clone()));
        }
        let removed = quantity.min(owned);
        let remaining = owned - removed;
        if remaining == 0 {
            self.assets.remove(ticker);
        } else {
            self.assets.insert(ticker.clone(), remaining);
        }
        Ok((removed, remaining))
    }

    /// Values every holding at the current market price.
    pub fn valuation(&self, market: &Market) -> Valuation {
        let positions: Vec<PositionValue> = self
            .holdings()
            .filter_map(|(ticker, quantity)| match market.price(ticker) {
                Some(price) => Some(PositionValue {
                    ticker: ticker.clone(),
                    quantity,
                    price,
                    value: price * Decimal::from(quantity),
                }),
                None => {
                    warn!("No market price for held {}", ticker);
                    None
                }
            })
            .collect();
        let total = positions.iter().fold(dec!(0), |acc, p| acc + p.value);
        Valuation { positions, total }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct PositionValue {
    pub ticker: Ticker,
    pub quantity: u64,
    pub price: Decimal,
    pub value: Decimal,
}

/// Point-in-time portfolio value; renders as the portfolio view.
#[derive(Clone, Debug, PartialEq)]
pub struct Valuation {
    pub positions: Vec<PositionValue>,
    pub total: Decimal,
}

impl Display for Valuation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f)?;
        writeln!(f, "--- Your Portfolio ---")?;
        if self.positions.is_empty() {
            return writeln!(f, "No holdings yet.");
        }
        for position in self.positions.iter() {
            writeln!(
                f,
                "{}: {} shares | Value: {:.2}",
                position.ticker, position.quantity, position.value
            )?;
        }
        writeln!(f, "Total Portfolio Value: {:.2}", self.total)
    }
}

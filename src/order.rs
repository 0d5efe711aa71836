use std::fmt::Display;

use strum_macros::Display as StrumDisplay;

use crate::ticker::Ticker;

#[derive(Clone, Debug, PartialEq, Eq, Copy, StrumDisplay)]
#[strum(serialize_all = "UPPERCASE")]
pub enum OrderSide {
    Buy,
    Sell,
}

/// A trade request as typed by the user, before validation.
#[derive(Clone, Debug)]
pub struct Order {
    pub side: OrderSide,
    pub symbol: String,
    pub quantity: i64,
}

impl Order {
    pub fn buy(symbol: &str, quantity: i64) -> Self {
        Self {
            side: OrderSide::Buy,
            symbol: symbol.to_owned(),
            quantity,
        }
    }

    pub fn sell(symbol: &str, quantity: i64) -> Self {
        Self {
            side: OrderSide::Sell,
            symbol: symbol.to_owned(),
            quantity,
        }
    }
}

/// Settlement of an accepted order against the holdings.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Fill {
    pub side: OrderSide,
    pub ticker: Ticker,
    pub requested: u64,
    pub filled: u64,
    /// Holding left for the ticker after settlement, 0 when the entry was removed.
    pub remaining: u64,
}

impl Fill {
    pub fn is_clamped(&self) -> bool {
        self.filled < self.requested
    }
}

impl Display for Fill {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.side {
            OrderSide::Buy => write!(f, "Bought {} of {}", self.filled, self.ticker),
            OrderSide::Sell => write!(
                f,
                "Sold {} of {}{}",
                self.filled,
                self.ticker,
                if self.is_clamped() {
                    " (clamped to owned)"
                } else {
                    ""
                }
            ),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum TradeError {
    UnknownSymbol(String),
    InvalidQuantity(i64),
    NotOwned(Ticker),
    QuantityOverflow(Ticker),
}

impl Display for TradeError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TradeError::UnknownSymbol(_) => write!(f, "Stock not found!"),
            TradeError::InvalidQuantity(_) => write!(f, "Quantity must be positive."),
            TradeError::NotOwned(ticker) => write!(f, "You don't own {}", ticker),
            TradeError::QuantityOverflow(_) => write!(f, "Quantity too large."),
        }
    }
}

impl std::error::Error for TradeError {}

use anyhow::Result;
use rand::rngs::StdRng;
use tracing::{info, warn};

use crate::{
    config::SessionConfig,
    marketplace::{Market, PriceModel, RandomWalk},
    order::{Fill, Order, OrderSide, TradeError},
    portfolio::{Portfolio, Valuation},
};

/// One independent simulation: a market, a holdings ledger and the model
/// moving the prices.
pub struct Session<M = RandomWalk<StdRng>> {
    market: Market,
    portfolio: Portfolio,
    model: M,
}

impl Session {
    pub fn from_config(config: &SessionConfig) -> Result<Self> {
        let model = RandomWalk::from_config(config)?;
        Self::with_model(config, model)
    }
}

impl<M: PriceModel> Session<M> {
    /// Lists every configured symbol at an initial price drawn from `model`.
    pub fn with_model(config: &SessionConfig, mut model: M) -> Result<Self> {
        let mut market = Market::new();
        for ticker in config.tickers()? {
            let price = model.initial_price();
            market.list(ticker, price)?;
        }
        Ok(Self::new(market, model))
    }

    pub fn new(market: Market, model: M) -> Self {
        Self {
            market,
            portfolio: Portfolio::new(),
            model,
        }
    }

    pub fn market(&self) -> &Market {
        &self.market
    }

    pub fn portfolio(&self) -> &Portfolio {
        &self.portfolio
    }

    /// Advances every price by one step.
    pub fn tick(&mut self) {
        self.market.update_prices(&mut self.model);
    }

    pub fn buy(&mut self, symbol: &str, quantity: i64) -> Result<Fill, TradeError> {
        self.execute(Order::buy(symbol, quantity))
    }

    pub fn sell(&mut self, symbol: &str, quantity: i64) -> Result<Fill, TradeError> {
        self.execute(Order::sell(symbol, quantity))
    }

    /// Validates and settles an order. A rejected order leaves the session untouched.
    pub fn execute(&mut self, order: Order) -> Result<Fill, TradeError> {
        let result = self.settle(&order);
        match &result {
            Ok(fill) => info!(
                "{} {} {}/{} remaining {}",
                fill.side, fill.ticker, fill.filled, fill.requested, fill.remaining
            ),
            Err(err) => warn!(
                "{} {} x{} rejected : {:?}",
                order.side, order.symbol, order.quantity, err
            ),
        }
        result
    }

    fn settle(&mut self, order: &Order) -> Result<Fill, TradeError> {
        let ticker = self
            .market
            .lookup(&order.symbol)
            .cloned()
            .ok_or_else(|| TradeError::UnknownSymbol(order.symbol.trim().to_owned()))?;

        let requested = u64::try_from(order.quantity)
            .ok()
            .filter(|q| *q > 0)
            .ok_or(TradeError::InvalidQuantity(order.quantity))?;

        let (filled, remaining) = match order.side {
            OrderSide::Buy => (requested, self.portfolio.add(&ticker, requested)?),
            OrderSide::Sell => self.portfolio.remove(&ticker, requested)?,
        };

        Ok(Fill {
            side: order.side,
            ticker,
            requested,
            filled,
            remaining,
        })
    }

    /// Fresh valuation at the current prices.
    pub fn valuation(&self) -> Valuation {
        self.portfolio.valuation(&self.market)
    }
}

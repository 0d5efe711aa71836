pub mod config;
pub mod marketplace;
pub mod order;
pub mod portfolio;
pub mod state;
pub mod ticker;
pub mod tui;
pub mod utils;

pub use config::SessionConfig;
pub use marketplace::{Market, MarketView, PriceModel, RandomWalk, Stock};
pub use order::{Fill, Order, OrderSide, TradeError};
pub use portfolio::{Portfolio, PositionValue, Valuation};
pub use state::Session;
pub use ticker::Ticker;

use anyhow::Result;
use colored::Colorize;
use std::io::{BufRead, Write};
use tracing::{debug, info};

use crate::{
    marketplace::{MarketView, PriceModel},
    order::{Order, OrderSide},
    state::Session,
    tui::menu::MenuChoice,
    utils::{prompt_parse, TokenReader},
};

const RETRY_NUMBER: &str = "Enter a number: ";

/// Console menu loop over one trading session.
pub struct App<M, R, W> {
    should_quit: bool,
    session: Session<M>,
    input: TokenReader<R>,
    out: W,
}

impl<M, R, W> App<M, R, W>
where
    M: PriceModel,
    R: BufRead,
    W: Write,
{
    pub fn new(session: Session<M>, input: R, out: W) -> Self {
        Self {
            should_quit: false,
            session,
            input: TokenReader::new(input),
            out,
        }
    }

    pub fn session(&self) -> &Session<M> {
        &self.session
    }

    pub fn into_parts(self) -> (Session<M>, W) {
        (self.session, self.out)
    }

    pub fn run(&mut self) -> Result<()> {
        while !self.should_quit {
            self.session.tick();

            writeln!(self.out)?;
            writeln!(self.out, "{}", MenuChoice::menu_line())?;
            let number: Option<i64> =
                prompt_parse(&mut self.input, &mut self.out, "Choose: ", RETRY_NUMBER)?;

            match number {
                Some(number) => self.handle_choice(number)?,
                None => self.end_of_input()?,
            }
        }

        Ok(())
    }

    fn handle_choice(&mut self, number: i64) -> Result<()> {
        debug!("menu choice {}", number);
        match MenuChoice::from_number(number) {
            Some(MenuChoice::ViewMarket) => {
                write!(self.out, "{}", MarketView(self.session.market()))?;
            }
            Some(MenuChoice::Buy) => self.trade(OrderSide::Buy)?,
            Some(MenuChoice::Sell) => self.trade(OrderSide::Sell)?,
            Some(MenuChoice::Portfolio) => {
                write!(self.out, "{}", self.session.valuation())?;
            }
            Some(MenuChoice::Exit) => {
                writeln!(self.out, "Thank you for trading!")?;
                self.should_quit = true;
            }
            None => writeln!(self.out, "Invalid choice.")?,
        }
        Ok(())
    }

    fn trade(&mut self, side: OrderSide) -> Result<()> {
        write!(self.out, "Enter stock symbol: ")?;
        self.out.flush()?;
        let Some(symbol) = self.input.next_token()? else {
            return self.end_of_input();
        };

        // unknown symbols are rejected before asking for a quantity
        if self.session.market().lookup(&symbol).is_none() {
            debug!("unknown symbol {:?}", symbol);
            writeln!(self.out, "Stock not found!")?;
            return Ok(());
        }

        let quantity = prompt_parse::<i64, _, _>(
            &mut self.input,
            &mut self.out,
            "Enter quantity: ",
            RETRY_NUMBER,
        )?;
        let Some(quantity) = quantity else {
            return self.end_of_input();
        };

        match self.session.execute(Order {
            side,
            symbol,
            quantity,
        }) {
            Ok(fill) => {
                let message = fill.to_string();
                match side {
                    OrderSide::Buy => writeln!(self.out, "{}", message.green())?,
                    OrderSide::Sell => writeln!(self.out, "{}", message.red())?,
                }
            }
            Err(err) => writeln!(self.out, "{}", err)?,
        }
        Ok(())
    }

    fn end_of_input(&mut self) -> Result<()> {
        info!("input closed");
        writeln!(self.out)?;
        writeln!(self.out, "Thank you for trading!")?;
        self.should_quit = true;
        Ok(())
    }
}

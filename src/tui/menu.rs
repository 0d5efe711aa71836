use itertools::Itertools;
use strum::IntoEnumIterator;
use strum_macros::{Display, EnumIter, FromRepr};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Display, EnumIter, FromRepr)]
#[repr(u8)]
pub enum MenuChoice {
    #[strum(to_string = "View Market")]
    ViewMarket = 1,
    Buy = 2,
    Sell = 3,
    Portfolio = 4,
    Exit = 5,
}

impl MenuChoice {
    pub fn from_number(number: i64) -> Option<Self> {
        u8::try_from(number).ok().and_then(Self::from_repr)
    }

    /// `1. View Market  2. Buy  3. Sell  4. Portfolio  5. Exit`
    pub fn menu_line() -> String {
        Self::iter()
            .map(|choice| format!("{}. {}", choice as u8, choice))
            .join("  ")
    }
}

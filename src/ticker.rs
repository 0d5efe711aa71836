use std::fmt::Display;

/// Normalized stock symbol: trimmed, upper-cased and never empty.
#[derive(Clone, Debug, Eq, PartialEq, Hash, PartialOrd, Ord)]
pub struct Ticker(String);

impl Ticker {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<&str> for Ticker {
    type Error = String;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        let symbol = value.trim();
        match symbol {
            "" => Err("Could not convert an empty symbol to ticker".to_string()),
            s if s.chars().any(char::is_whitespace) => {
                Err(format!("Could not convert {} to ticker", s))
            }
            s => Ok(Self(s.to_uppercase())),
        }
    }
}

impl TryFrom<&String> for Ticker {
    type Error = String;

    fn try_from(value: &String) -> Result<Self, Self::Error> {
        Self::try_from(value.as_str())
    }
}

impl TryFrom<String> for Ticker {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::try_from(&value)
    }
}

impl Display for Ticker {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// How much of the HMM a match location covers
///
/// Written in lookup dumps and reports using the HMMER bracket notation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HmmBounds {
    /// `[]` - both ends of the model matched
    Complete,
    /// `[.` - N-terminal end of the model matched
    NTerminalComplete,
    /// `.]` - C-terminal end of the model matched
    CTerminalComplete,
    /// `..` - neither end matched
    #[default]
    Incomplete,
}

impl HmmBounds {
    pub fn symbol(self) -> &'static str {
        match self {
            Self::Complete => "[]",
            Self::NTerminalComplete => "[.",
            Self::CTerminalComplete => ".]",
            Self::Incomplete => "..",
        }
    }
}

impl fmt::Display for HmmBounds {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.symbol())
    }
}

impl FromStr for HmmBounds {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "[]" => Ok(Self::Complete),
            "[." => Ok(Self::NTerminalComplete),
            ".]" => Ok(Self::CTerminalComplete),
            ".." => Ok(Self::Incomplete),
            _ => Err(format!("Invalid HMM bounds: '{s}'")),
        }
    }
}

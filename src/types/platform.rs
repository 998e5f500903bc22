use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::Error;

/// Liquidity-pool protocols the service can describe. A single variant
/// today; adding one means a new variant and a new match arm in the pools
/// controller, not a string comparison.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum Platform {
    Uniswap,
}

impl Platform {
    pub fn as_str(&self) -> &'static str {
        match self {
            Platform::Uniswap => "uniswap",
        }
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Platform {
    type Err = Error;

    fn from_str(value: &str) -> Result<Platform, Error> {
        match value {
            "uniswap" => Ok(Platform::Uniswap),
            _ => Err(Error::UnsupportedPlatform(value.to_owned())),
        }
    }
}

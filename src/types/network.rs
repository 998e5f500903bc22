use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::Error;

/// Networks the service knows about. Which of them are actually served
/// depends on the RPC endpoints configured at startup.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum Network {
    Ethereum,
    Polygon,
    Optimism,
    Arbitrum,
}

impl Network {
    pub fn as_str(&self) -> &'static str {
        match self {
            Network::Ethereum => "ethereum",
            Network::Polygon => "polygon",
            Network::Optimism => "optimism",
            Network::Arbitrum => "arbitrum",
        }
    }
}

impl fmt::Display for Network {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Network {
    type Err = Error;

    fn from_str(value: &str) -> Result<Network, Error> {
        match value {
            "ethereum" => Ok(Network::Ethereum),
            "polygon" => Ok(Network::Polygon),
            "optimism" => Ok(Network::Optimism),
            "arbitrum" => Ok(Network::Arbitrum),
            _ => Err(Error::UnsupportedNetwork(value.to_owned())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_supported_identifiers() {
        assert_eq!("ethereum".parse::<Network>().unwrap(), Network::Ethereum);
        assert_eq!("polygon".parse::<Network>().unwrap(), Network::Polygon);
        assert_eq!("optimism".parse::<Network>().unwrap(), Network::Optimism);
        assert_eq!("arbitrum".parse::<Network>().unwrap(), Network::Arbitrum);
    }

    #[test]
    fn rejects_unknown_identifiers() {
        assert!(matches!(
            "bsc".parse::<Network>(),
            Err(Error::UnsupportedNetwork(value)) if value == "bsc"
        ));
        assert!("Ethereum".parse::<Network>().is_err());
        assert!("".parse::<Network>().is_err());
    }

    #[test]
    fn round_trips_through_display() {
        for network in [
            Network::Ethereum,
            Network::Polygon,
            Network::Optimism,
            Network::Arbitrum,
        ] {
            assert_eq!(
                network.to_string().parse::<Network>().unwrap(),
                network
            );
        }
    }
}

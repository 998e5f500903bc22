use alloy::primitives::Address;
use serde::{Deserialize, Serialize};

/// Uniswap V3 pool configuration, immutable after deployment. The fee is the
/// raw contract value in hundredths of a basis point.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pool {
    pub contract_address: Address,
    pub token_left: Address,
    pub token_right: Address,
    pub fee: u32,
}

/// ERC20 metadata, immutable after deployment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Token {
    pub name: String,
    pub symbol: String,
    pub decimals: u8,
    pub contract_address: Address,
}

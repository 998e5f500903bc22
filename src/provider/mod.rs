pub use self::{
    ethereum::ChainClients,
    thegraph::{TheGraph, DEFAULT_GRAPH_ENDPOINT},
};

mod ethereum;
mod thegraph;

use alloy::primitives::Address;

use crate::{
    error::Error,
    model::{Pool, Token},
    types::{Network, PoolDayData},
};

/// Read-only contract calls against one of the configured networks.
#[allow(async_fn_in_trait)]
pub trait ChainReader {
    async fn get_pool(
        &self,
        network: Network,
        address: Address,
    ) -> Result<Pool, Error>;

    async fn get_token(
        &self,
        network: Network,
        address: Address,
    ) -> Result<Token, Error>;
}

/// The daily aggregate window the indexing service holds for one pool.
#[allow(async_fn_in_trait)]
pub trait AnalyticsReader {
    async fn pool_day_data(
        &self,
        network: Network,
        address: Address,
    ) -> Result<Vec<PoolDayData>, Error>;
}

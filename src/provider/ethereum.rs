use std::collections::HashMap;
use std::time::Duration;

use alloy::{
    primitives::Address,
    providers::{DynProvider, ProviderBuilder},
};
use tokio::time::timeout;
use url::Url;

use crate::{
    abis::{IUniswapV3Pool, IERC20},
    configuration::Config,
    error::Error,
    model::{Pool, Token},
    provider::ChainReader,
    types::Network,
};

/// One long-lived HTTP provider per configured network, shared read-only by
/// every request for the process lifetime.
pub struct ChainClients {
    clients: HashMap<Network, DynProvider>,
    timeout: Duration,
}

impl std::fmt::Debug for ChainClients {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ChainClients")
            .field("networks", &self.clients.keys().collect::<Vec<_>>())
            .field("timeout", &self.timeout)
            .finish()
    }
}

impl ChainClients {
    /// A malformed endpoint URL fails here, before the server binds.
    pub fn new(config: &Config) -> Result<ChainClients, Error> {
        let mut clients = HashMap::new();

        for (network, endpoint) in &config.rpc_endpoints {
            let url = Url::parse(endpoint)?;
            let provider = ProviderBuilder::new().connect_http(url);

            clients.insert(*network, DynProvider::new(provider));
        }

        Ok(ChainClients {
            clients,
            timeout: Duration::from_secs(config.timeout),
        })
    }

    fn provider(&self, network: Network) -> Result<&DynProvider, Error> {
        self.clients
            .get(&network)
            .ok_or_else(|| Error::UnsupportedNetwork(network.to_string()))
    }
}

impl ChainReader for ChainClients {
    async fn get_pool(
        &self,
        network: Network,
        address: Address,
    ) -> Result<Pool, Error> {
        let provider = self.provider(network)?;
        let contract = IUniswapV3Pool::new(address, provider);

        let token_left =
            timeout(self.timeout, contract.token0().call()).await??;
        let token_right =
            timeout(self.timeout, contract.token1().call()).await??;
        let fee = timeout(self.timeout, contract.fee().call()).await??;

        Ok(Pool {
            contract_address: address,
            token_left,
            token_right,
            fee: fee.to::<u32>(),
        })
    }

    async fn get_token(
        &self,
        network: Network,
        address: Address,
    ) -> Result<Token, Error> {
        let provider = self.provider(network)?;
        let contract = IERC20::new(address, provider);

        let name = timeout(self.timeout, contract.name().call()).await??;
        let symbol =
            timeout(self.timeout, contract.symbol().call()).await??;
        let decimals =
            timeout(self.timeout, contract.decimals().call()).await??;

        Ok(Token {
            name,
            symbol,
            decimals,
            contract_address: address,
        })
    }
}

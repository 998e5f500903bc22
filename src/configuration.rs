use std::{env, ops::Deref, sync::Arc};

use crate::{
    cache::ResponseCache,
    error::Error,
    provider::{ChainClients, TheGraph, DEFAULT_GRAPH_ENDPOINT},
    types::Network,
};

#[derive(Debug)]
pub struct AppState<T>(Arc<T>);

impl<T> AppState<T> {
    pub fn new(state: T) -> AppState<T> {
        AppState(Arc::new(state))
    }
}

impl<T> Clone for AppState<T> {
    fn clone(&self) -> AppState<T> {
        AppState(Arc::clone(&self.0))
    }
}

impl<T> Deref for AppState<T> {
    type Target = Arc<T>;

    fn deref(&self) -> &Arc<T> {
        &self.0
    }
}

#[derive(Debug)]
pub struct State {
    pub config: Config,
    pub ethereum: ChainClients,
    pub thegraph: TheGraph,
    pub cache: ResponseCache,
}

impl State {
    pub fn new(
        config: Config,
        ethereum: ChainClients,
        thegraph: TheGraph,
    ) -> State {
        State {
            config,
            ethereum,
            thegraph,
            cache: ResponseCache::new(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Config {
    pub server_host: String,
    pub port: u16,
    pub allowed_origins: Vec<String>,
    pub timeout: u64,
    pub graph_endpoint: String,
    pub rpc_endpoints: Vec<(Network, String)>,
}

pub fn get_configuration() -> Result<Config, Error> {
    let server_host = env::var("SERVER_HOST")?;
    let port: u16 = env::var("PORT")?.parse()?;
    let allowed_origins = env::var("ALLOWED_ORIGINS")?
        .split(',')
        .map(|item| item.to_owned())
        .collect::<Vec<String>>();
    let timeout: u64 = env::var("TIMEOUT")?.parse()?;

    let graph_endpoint = env::var("GRAPH_ENDPOINT")
        .unwrap_or_else(|_| DEFAULT_GRAPH_ENDPOINT.to_owned());

    let mut rpc_endpoints = vec![
        (Network::Ethereum, env::var("RPC_ETHEREUM_HTTP")?),
        (Network::Polygon, env::var("RPC_POLYGON_HTTP")?),
    ];

    if let Ok(endpoint) = env::var("RPC_OPTIMISM_HTTP") {
        rpc_endpoints.push((Network::Optimism, endpoint));
    }

    if let Ok(endpoint) = env::var("RPC_ARBITRUM_HTTP") {
        rpc_endpoints.push((Network::Arbitrum, endpoint));
    }

    Ok(Config {
        server_host,
        port,
        allowed_origins,
        timeout,
        graph_endpoint,
        rpc_endpoints,
    })
}

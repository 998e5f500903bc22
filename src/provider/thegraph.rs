use std::time::Duration;

use alloy::primitives::Address;
use reqwest::Client;
use serde::Deserialize;
use serde_json::json;

use crate::{
    configuration::Config,
    error::Error,
    provider::AnalyticsReader,
    types::{Network, PoolDayData},
};

pub const DEFAULT_GRAPH_ENDPOINT: &str =
    "https://api.thegraph.com/subgraphs/name/";

const SUBGRAPH_ETHEREUM: &str = "ianlapham/uniswap-v3-subgraph";
const SUBGRAPH_POLYGON: &str = "ianlapham/uniswap-v3-polygon";

// Newest first, capped at the indexer's page size; partial indexer errors
// are tolerated via subgraphError: allow.
const POOL_DAY_DATA_QUERY: &str = "\
query poolDayDatas($address: String!, $startTime: Int!, $skip: Int!) {
  poolDayDatas(first: 1000, skip: $skip, where: {pool: $address, date_gt: $startTime}, orderBy: date, orderDirection: desc, subgraphError: allow) {
    date
    volumeUSD
    tvlUSD
    feesUSD
  }
}";

#[derive(Debug)]
pub struct TheGraph {
    endpoint: String,
    http: Client,
}

#[derive(Debug, Deserialize)]
struct GraphResponse {
    data: Option<PoolDayDataList>,
    errors: Option<Vec<GraphResponseError>>,
}

#[derive(Debug, Deserialize)]
struct PoolDayDataList {
    #[serde(rename = "poolDayDatas")]
    pool_day_datas: Vec<PoolDayData>,
}

#[derive(Debug, Deserialize)]
struct GraphResponseError {
    message: String,
}

impl TheGraph {
    pub fn new(config: &Config) -> Result<TheGraph, Error> {
        let http = Client::builder()
            .timeout(Duration::from_secs(config.timeout))
            .build()?;

        Ok(TheGraph {
            endpoint: config.graph_endpoint.to_owned(),
            http,
        })
    }

    fn subgraph_name(network: Network) -> Result<&'static str, Error> {
        match network {
            Network::Ethereum => Ok(SUBGRAPH_ETHEREUM),
            Network::Polygon => Ok(SUBGRAPH_POLYGON),
            _ => Err(Error::UnsupportedNetwork(network.to_string())),
        }
    }

    fn request_body(address: Address) -> serde_json::Value {
        json!({
            "operationName": "poolDayDatas",
            "query": POOL_DAY_DATA_QUERY,
            "variables": {
                // the indexer stores addresses in canonical lower case
                "address": address.to_string().to_lowercase(),
                "startTime": 0,
                "skip": 0,
            },
        })
    }
}

impl AnalyticsReader for TheGraph {
    async fn pool_day_data(
        &self,
        network: Network,
        address: Address,
    ) -> Result<Vec<PoolDayData>, Error> {
        let name = TheGraph::subgraph_name(network)?;
        let url = format!("{}{}", self.endpoint, name);

        let response = self
            .http
            .post(url)
            .json(&TheGraph::request_body(address))
            .send()
            .await?
            .json::<GraphResponse>()
            .await?;

        // rows alongside indexer errors are usable, a reply without data
        // is not
        match response.data {
            Some(data) => Ok(data.pool_day_datas),
            None => {
                let message = response
                    .errors
                    .unwrap_or_default()
                    .into_iter()
                    .map(|e| e.message)
                    .collect::<Vec<String>>()
                    .join("; ");

                Err(Error::SubgraphError(message))
            },
        }
    }
}

use std::str::FromStr;

use actix_web::{
    get, http::header::ContentType, web, HttpRequest, HttpResponse,
};
use alloy::primitives::Address;
use bigdecimal::BigDecimal;
use chrono::DateTime;
use serde::{Deserialize, Serialize};

use crate::{
    cache::ResponseCache,
    configuration::{AppState, State},
    error::Error,
    helpers,
    model::{Pool, PoolMetric, Token},
    provider::{AnalyticsReader, ChainReader},
    types::{Network, Platform, PoolDayData},
};

#[derive(Debug, Serialize, Deserialize)]
pub struct Response {
    pub contract_address: String,
    pub token_left: TokenResponse,
    pub token_right: TokenResponse,
    pub fee: String,
    pub metrics: Vec<PoolMetric>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct TokenResponse {
    pub name: String,
    pub symbol: String,
    pub decimals: u8,
    pub contract_address: String,
}

#[get("/pools/{platform}/{network}/{contract_address}")]
async fn index(
    state: web::Data<AppState<State>>,
    path: web::Path<(String, String, String)>,
    request: HttpRequest,
) -> Result<HttpResponse, Error> {
    let (platform, network, contract_address) = path.into_inner();

    // reject bad input before any outbound call
    let platform = Platform::from_str(&platform)?;
    let network = Network::from_str(&network)?;
    let address = Address::from_str(&contract_address)
        .map_err(|_| Error::InvalidAddress(contract_address))?;

    let response = match platform {
        Platform::Uniswap => {
            build_pool_response(
                &state.ethereum,
                &state.thegraph,
                &state.cache,
                network,
                address,
                request.path(),
            )
            .await?
        },
    };

    Ok(HttpResponse::Ok()
        .content_type(ContentType::json())
        .body(serde_json::to_string_pretty(&response)?))
}

/// The whole lookup: analytics window and chain metadata resolve as two
/// independent tasks joined before assembly. Either failure fails the
/// request, partial responses are never returned.
async fn build_pool_response(
    chain: &impl ChainReader,
    analytics: &impl AnalyticsReader,
    cache: &ResponseCache,
    network: Network,
    address: Address,
    path: &str,
) -> Result<Response, Error> {
    let (day_data, (pool, token_left, token_right)) = futures::try_join!(
        resolve_day_data(analytics, cache, network, address, path),
        resolve_pool(chain, cache, network, address),
    )?;

    let mut metrics = Vec::with_capacity(day_data.len());

    for data in day_data {
        metrics.push(to_metric(&address, data)?);
    }

    Ok(Response {
        contract_address: address.to_checksum(None),
        token_left: to_token_response(token_left),
        token_right: to_token_response(token_right),
        fee: helpers::fee_percentage(pool.fee),
        metrics,
    })
}

async fn resolve_day_data(
    analytics: &impl AnalyticsReader,
    cache: &ResponseCache,
    network: Network,
    address: Address,
    path: &str,
) -> Result<Vec<PoolDayData>, Error> {
    if let Some(value) = cache.get_analytics(path).await {
        return Ok(serde_json::from_slice(&value)?);
    }

    let day_data = analytics.pool_day_data(network, address).await?;

    cache
        .set_analytics(path, serde_json::to_vec(&day_data)?)
        .await;

    Ok(day_data)
}

async fn resolve_pool(
    chain: &impl ChainReader,
    cache: &ResponseCache,
    network: Network,
    address: Address,
) -> Result<(Pool, Token, Token), Error> {
    let pool: Pool = match cache.get_metadata(&address).await {
        Some(value) => serde_json::from_slice(&value)?,
        None => {
            let pool = chain.get_pool(network, address).await?;

            cache
                .set_metadata(&address, serde_json::to_vec(&pool)?)
                .await;

            pool
        },
    };

    let (token_left, token_right) = futures::try_join!(
        resolve_token(chain, cache, network, pool.token_left),
        resolve_token(chain, cache, network, pool.token_right),
    )?;

    Ok((pool, token_left, token_right))
}

async fn resolve_token(
    chain: &impl ChainReader,
    cache: &ResponseCache,
    network: Network,
    address: Address,
) -> Result<Token, Error> {
    if let Some(value) = cache.get_metadata(&address).await {
        return Ok(serde_json::from_slice(&value)?);
    }

    let token = chain.get_token(network, address).await?;

    cache
        .set_metadata(&address, serde_json::to_vec(&token)?)
        .await;

    Ok(token)
}

fn to_metric(address: &Address, data: PoolDayData) -> Result<PoolMetric, Error> {
    let timestamp = DateTime::from_timestamp(data.date, 0)
        .ok_or_else(|| Error::DecodeDateTimeError(data.date.to_string()))?;

    // a single unparseable row fails the whole request
    let total_value_locked =
        BigDecimal::from_str(&data.total_value_locked)?;
    let volume = BigDecimal::from_str(&data.volume)?;
    let fee = BigDecimal::from_str(&data.fees)?;

    let annual_percentage_rate =
        helpers::annual_percentage_rate(&total_value_locked, &fee);

    Ok(PoolMetric {
        timestamp,
        contract_address: address.to_checksum(None),
        total_value_locked,
        volume,
        fee,
        annual_percentage_rate,
    })
}

fn to_token_response(token: Token) -> TokenResponse {
    TokenResponse {
        name: token.name,
        symbol: token.symbol,
        decimals: token.decimals,
        contract_address: token.contract_address.to_checksum(None),
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};

    use actix_web::{http::StatusCode, test, App};

    use super::*;
    use crate::configuration::Config;
    use crate::provider::{ChainClients, TheGraph};

    struct MockChain {
        pool: Pool,
        pool_calls: AtomicUsize,
        token_calls: AtomicUsize,
    }

    impl MockChain {
        fn new(pool: Pool) -> MockChain {
            MockChain {
                pool,
                pool_calls: AtomicUsize::new(0),
                token_calls: AtomicUsize::new(0),
            }
        }
    }

    impl ChainReader for MockChain {
        async fn get_pool(
            &self,
            _network: Network,
            _address: Address,
        ) -> Result<Pool, Error> {
            self.pool_calls.fetch_add(1, Ordering::SeqCst);
            Ok(self.pool.clone())
        }

        async fn get_token(
            &self,
            _network: Network,
            address: Address,
        ) -> Result<Token, Error> {
            self.token_calls.fetch_add(1, Ordering::SeqCst);
            Ok(Token {
                name: format!("Token {}", address),
                symbol: String::from("TKN"),
                decimals: 18,
                contract_address: address,
            })
        }
    }

    struct MockAnalytics {
        rows: Vec<PoolDayData>,
        calls: AtomicUsize,
    }

    impl MockAnalytics {
        fn new(rows: Vec<PoolDayData>) -> MockAnalytics {
            MockAnalytics {
                rows,
                calls: AtomicUsize::new(0),
            }
        }
    }

    impl AnalyticsReader for MockAnalytics {
        async fn pool_day_data(
            &self,
            _network: Network,
            _address: Address,
        ) -> Result<Vec<PoolDayData>, Error> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(self.rows.clone())
        }
    }

    fn pool(address: Address) -> Pool {
        Pool {
            contract_address: address,
            token_left: Address::repeat_byte(0xBB),
            token_right: Address::repeat_byte(0xCC),
            fee: 3000,
        }
    }

    fn day_data() -> Vec<PoolDayData> {
        vec![PoolDayData {
            date: 1700000000,
            volume: String::from("1000"),
            total_value_locked: String::from("500000"),
            fees: String::from("3"),
        }]
    }

    #[tokio::test]
    async fn assembles_the_full_response() {
        let address = Address::repeat_byte(0xAA);
        let chain = MockChain::new(pool(address));
        let analytics = MockAnalytics::new(day_data());
        let cache = ResponseCache::new();

        let response = build_pool_response(
            &chain,
            &analytics,
            &cache,
            Network::Ethereum,
            address,
            "/pools/uniswap/ethereum/0xaa",
        )
        .await
        .unwrap();

        assert_eq!(response.contract_address, address.to_checksum(None));
        assert_eq!(response.fee, "0.3%");
        assert_eq!(
            response.token_left.contract_address,
            Address::repeat_byte(0xBB).to_checksum(None)
        );
        assert_eq!(
            response.token_right.contract_address,
            Address::repeat_byte(0xCC).to_checksum(None)
        );

        assert_eq!(response.metrics.len(), 1);
        let metric = &response.metrics[0];
        assert_eq!(
            metric.timestamp,
            DateTime::from_timestamp(1700000000, 0).unwrap()
        );
        assert_eq!(metric.contract_address, address.to_checksum(None));
        // 3 / 500000 * 365, shifted to percent, two digits
        assert_eq!(metric.annual_percentage_rate, "0.22%");
    }

    #[tokio::test]
    async fn repeated_lookups_hit_the_cache() {
        let address = Address::repeat_byte(0xAA);
        let chain = MockChain::new(pool(address));
        let analytics = MockAnalytics::new(day_data());
        let cache = ResponseCache::new();
        let path = "/pools/uniswap/ethereum/0xaa";

        for _ in 0..3 {
            build_pool_response(
                &chain,
                &analytics,
                &cache,
                Network::Ethereum,
                address,
                path,
            )
            .await
            .unwrap();
        }

        assert_eq!(chain.pool_calls.load(Ordering::SeqCst), 1);
        assert_eq!(chain.token_calls.load(Ordering::SeqCst), 2);
        assert_eq!(analytics.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn empty_analytics_window_yields_empty_metrics() {
        let address = Address::repeat_byte(0xAA);
        let chain = MockChain::new(pool(address));
        let analytics = MockAnalytics::new(vec![]);
        let cache = ResponseCache::new();

        let response = build_pool_response(
            &chain,
            &analytics,
            &cache,
            Network::Ethereum,
            address,
            "/pools/uniswap/ethereum/0xaa",
        )
        .await
        .unwrap();

        assert!(response.metrics.is_empty());
        assert_eq!(chain.token_calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn unparseable_indexer_decimals_fail_the_request() {
        let address = Address::repeat_byte(0xAA);
        let chain = MockChain::new(pool(address));
        let analytics = MockAnalytics::new(vec![PoolDayData {
            date: 1700000000,
            volume: String::from("not-a-number"),
            total_value_locked: String::from("500000"),
            fees: String::from("3"),
        }]);
        let cache = ResponseCache::new();

        let result = build_pool_response(
            &chain,
            &analytics,
            &cache,
            Network::Ethereum,
            address,
            "/pools/uniswap/ethereum/0xaa",
        )
        .await;

        assert!(matches!(result, Err(Error::BigDecimalError(_))));
    }

    #[tokio::test]
    async fn zero_value_rows_report_flat_zero_rate() {
        let address = Address::repeat_byte(0xAA);
        let chain = MockChain::new(pool(address));
        let analytics = MockAnalytics::new(vec![PoolDayData {
            date: 1700000000,
            volume: String::from("0"),
            total_value_locked: String::from("0"),
            fees: String::from("0"),
        }]);
        let cache = ResponseCache::new();

        let response = build_pool_response(
            &chain,
            &analytics,
            &cache,
            Network::Ethereum,
            address,
            "/pools/uniswap/ethereum/0xaa",
        )
        .await
        .unwrap();

        assert_eq!(response.metrics[0].annual_percentage_rate, "0%");
    }

    // HTTP-level validation: rejected requests never reach a backend, so
    // unreachable endpoints in the state are never dialed.
    fn test_state() -> AppState<State> {
        let config = Config {
            server_host: String::from("127.0.0.1"),
            port: 0,
            allowed_origins: vec![String::from("*")],
            timeout: 1,
            graph_endpoint: String::from("http://localhost:1/"),
            rpc_endpoints: vec![
                (Network::Ethereum, String::from("http://localhost:1/")),
                (Network::Polygon, String::from("http://localhost:1/")),
            ],
        };

        let ethereum = ChainClients::new(&config).unwrap();
        let thegraph = TheGraph::new(&config).unwrap();

        AppState::new(State::new(config, ethereum, thegraph))
    }

    #[actix_web::test]
    async fn unknown_platform_is_a_client_error() {
        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(test_state()))
                .service(index),
        )
        .await;

        let request = test::TestRequest::get()
            .uri("/pools/sushiswap/ethereum/0xc02aaa39b223fe8d0a0e5c4f27ead9083c756cc2")
            .to_request();
        let response = test::call_service(&app, request).await;

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let body: serde_json::Value =
            test::read_body_json(response).await;
        assert_eq!(body["error"], "unsupported platform: sushiswap");
    }

    #[actix_web::test]
    async fn unknown_network_is_a_client_error() {
        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(test_state()))
                .service(index),
        )
        .await;

        let request = test::TestRequest::get()
            .uri("/pools/uniswap/bsc/0xc02aaa39b223fe8d0a0e5c4f27ead9083c756cc2")
            .to_request();
        let response = test::call_service(&app, request).await;

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let body: serde_json::Value =
            test::read_body_json(response).await;
        assert_eq!(body["error"], "unsupported network: bsc");
    }

    #[actix_web::test]
    async fn malformed_address_is_a_client_error() {
        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(test_state()))
                .service(index),
        )
        .await;

        let request = test::TestRequest::get()
            .uri("/pools/uniswap/ethereum/not-an-address")
            .to_request();
        let response = test::call_service(&app, request).await;

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let body: serde_json::Value =
            test::read_body_json(response).await;
        assert_eq!(
            body["error"],
            "invalid contract address: not-an-address"
        );
    }
}

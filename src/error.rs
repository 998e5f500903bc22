use actix_web::{http::StatusCode, HttpResponse, ResponseError};
use alloy::contract::Error as CONTRACT_ERROR;
use anyhow::Error as ANYHOW_ERROR;
use bigdecimal::ParseBigDecimalError as BIG_DECIMAL_ERROR;
use reqwest::Error as REQWEST_ERROR;
use serde::Serialize;
use serde_json::Error as JSON_ERROR;
use std::{env::VarError, io::Error as IO_ERROR, num::ParseIntError};
use thiserror::Error;
use tokio::task::JoinError;
use tokio::time::error::Elapsed;
use tracing::subscriber::SetGlobalDefaultError as TRACING_GLOBAL_DEFAULT_ERROR;
use url::ParseError as URL_ERROR;

#[derive(Error, Debug)]
pub enum Error {
    #[error("{0}")]
    Io(#[from] IO_ERROR),

    #[error("{0}")]
    URL(#[from] URL_ERROR),

    #[error("{0}")]
    INT(#[from] ParseIntError),

    #[error("{0}")]
    VAR(#[from] VarError),

    #[error("{0}")]
    TokioJoinError(#[from] JoinError),

    #[error("{0}")]
    TokioElapsedError(#[from] Elapsed),

    #[error("{0}")]
    JsonError(#[from] JSON_ERROR),

    #[error("{0}")]
    BigDecimalError(#[from] BIG_DECIMAL_ERROR),

    #[error("{0}")]
    ReqwestError(#[from] REQWEST_ERROR),

    #[error("{0}")]
    ContractError(#[from] CONTRACT_ERROR),

    #[error("Tracing error: {0}")]
    SetGlobalDefaultError(#[from] TRACING_GLOBAL_DEFAULT_ERROR),

    #[error("{0}")]
    AnyHowError(#[from] ANYHOW_ERROR),

    #[error("Configuration error: {0}")]
    ConfigurationError(String),

    #[error("unsupported network: {0}")]
    UnsupportedNetwork(String),

    #[error("unsupported platform: {0}")]
    UnsupportedPlatform(String),

    #[error("invalid contract address: {0}")]
    InvalidAddress(String),

    #[error("subgraph error: {0}")]
    SubgraphError(String),

    #[error("Decode datetime: {0}")]
    DecodeDateTimeError(String),
}

#[derive(Debug, Serialize)]
struct ErrorResponse {
    error: String,
}

impl ResponseError for Error {
    fn status_code(&self) -> StatusCode {
        match self {
            // client sent a platform, network or address we will never serve
            Error::UnsupportedNetwork(_)
            | Error::UnsupportedPlatform(_)
            | Error::InvalidAddress(_) => StatusCode::BAD_REQUEST,

            // upstream chain node or indexer failed
            Error::ContractError(_)
            | Error::SubgraphError(_)
            | Error::ReqwestError(_) => StatusCode::BAD_GATEWAY,

            // upstream call exceeded the configured deadline
            Error::TokioElapsedError(_) => StatusCode::GATEWAY_TIMEOUT,

            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(self.status_code()).json(ErrorResponse {
            error: self.to_string(),
        })
    }
}

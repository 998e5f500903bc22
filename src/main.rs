use tracing::{error, Level};

use poolapi::{
    configuration::{get_configuration, AppState, State},
    error::Error,
    provider::{ChainClients, TheGraph},
    server,
};

#[tokio::main]
async fn main() -> Result<(), Error> {
    let result = app_main().await;

    if let Err(err) = &result {
        error!("{}", err);
    }

    result
}

async fn app_main() -> Result<(), Error> {
    let subscriber = tracing_subscriber::fmt()
        .compact()
        .with_level(true)
        .with_max_level(Level::INFO)
        .with_file(true)
        .with_line_number(true)
        .finish();

    tracing::subscriber::set_global_default(subscriber)?;

    let config = match get_configuration() {
        Ok(config) => config,
        Err(e) => return Err(Error::ConfigurationError(e.to_string())),
    };

    // a bad RPC endpoint or unreachable configuration is fatal here, never
    // retried lazily per request
    let ethereum = ChainClients::new(&config)?;
    let thegraph = TheGraph::new(&config)?;

    let state = State::new(config, ethereum, thegraph);
    let app_state = AppState::new(state);

    server::server_task(&app_state).await
}

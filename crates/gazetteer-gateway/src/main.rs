use std::net::SocketAddr;
use std::sync::Arc;

use clap::Parser;
use gazetteer_core::CityRepository;
use gazetteer_gateway::app::App;
use gazetteer_gateway::cli::{StorageBackendArg, CLI};
use gazetteer_gateway::state::AppState;
use gazetteer_service::CityService;
use gazetteer_storage::{InMemoryRepository, MySqlRepository};
use tracing::info;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt::init();

    let config = CLI::try_parse()?;

    info!(
        listen_addr = %config.listen_addr,
        storage_backend = %config.storage,
        "starting gazetteer gateway"
    );

    match config.storage {
        StorageBackendArg::InMemory => {
            run_server(config.listen_addr, InMemoryRepository::new()).await?;
        }
        StorageBackendArg::Mysql => {
            let mysql_dsn = config
                .mysql_dsn
                .ok_or("mysql dsn is required when storage backend is mysql")?;
            let repository = MySqlRepository::connect(&mysql_dsn).await?;
            run_server(config.listen_addr, repository).await?;
        }
    }

    Ok(())
}

async fn run_server<R: CityRepository>(
    listen_addr: SocketAddr,
    repository: R,
) -> Result<(), Box<dyn std::error::Error>> {
    let service = CityService::new(repository);
    let state = AppState::new(Arc::new(service));

    let listener = tokio::net::TcpListener::bind(listen_addr).await?;
    info!(listen_addr = %listener.local_addr()?, "listening");

    axum::serve(listener, App::router(state)).await?;
    Ok(())
}

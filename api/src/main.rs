use std::sync::Arc;

use clap::Parser;
use glycoload_api::{
    application::{
        http::server::http_server::{router, state},
        logging::init_logging,
    },
    args::Args,
};
use tracing::info;

#[tokio::main]
async fn main() -> Result<(), anyhow::Error> {
    dotenv::dotenv().ok();

    let args = Arc::new(Args::parse());
    init_logging(&args.log)?;

    let app_state = state(args.clone()).await?;
    let router = router(app_state)?;

    let addr = format!("{}:{}", args.server.host, args.server.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!("Glycoload API listening on {}", addr);

    axum::serve(listener, router).await?;
    Ok(())
}

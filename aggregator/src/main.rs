#![allow(clippy::must_use_candidate, clippy::missing_errors_doc)]

mod args;

use aggregator_client::{CustomerServiceClient, StockTradeRequest};
use aggregator_config::{Config, CustomerServiceConfig};
use args::{Args, Command};
use clap::Parser;
use tokio_util::sync::CancellationToken;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let config = Config::load(&args.config)?;

    aggregator_telemetry::init(&config.telemetry)?;

    tracing::info!(
        config_path = %args.config.display(),
        base_url = %config.customer_service.base_url,
        "starting aggregator"
    );

    let client = build_client(&config.customer_service)?;

    // Abandon the in-flight call on shutdown
    let shutdown = CancellationToken::new();
    let shutdown_clone = shutdown.clone();

    tokio::spawn(async move {
        shutdown_signal().await;
        shutdown_clone.cancel();
    });

    tokio::select! {
        () = shutdown.cancelled() => {
            tracing::info!("call cancelled before the customer service answered");
            Ok(())
        }
        result = run(&client, args.command) => result,
    }
}

fn build_client(config: &CustomerServiceConfig) -> anyhow::Result<CustomerServiceClient> {
    let mut builder = CustomerServiceClient::builder(config.base_url.clone())
        .timeout(config.timeout)
        .connect_timeout(config.connect_timeout);

    if let Some(user_agent) = &config.user_agent {
        builder = builder.user_agent(user_agent.clone());
    }

    Ok(builder.build()?)
}

async fn run(client: &CustomerServiceClient, command: Command) -> anyhow::Result<()> {
    let output = match command {
        Command::Customer { customer_id } => {
            let customer = client.customer_information(customer_id.into()).await?;
            serde_json::to_string_pretty(&customer)?
        }
        Command::Trade {
            customer_id,
            ticker,
            action,
            quantity,
            price,
        } => {
            let request = StockTradeRequest {
                ticker: ticker.into(),
                price,
                quantity,
                action: action.into(),
            };

            let Some(total_price) = request.total_price() else {
                anyhow::bail!("trade total for {quantity} shares at {price} is out of range");
            };

            tracing::info!(%customer_id, total_price, "placing trade");

            let response = client.trade(customer_id.into(), &request).await?;
            serde_json::to_string_pretty(&response)?
        }
    };

    println!("{output}");
    Ok(())
}

/// Wait for a shutdown signal (`SIGINT` or `SIGTERM`)
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c().await.expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {}
        () = terminate => {}
    }

    tracing::info!("shutdown signal received");
}

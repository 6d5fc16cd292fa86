// Copyright (c) 2025 Erick Bourgeois, firestoned
// SPDX-License-Identifier: MIT

use std::net::SocketAddr;

use anyhow::Result;
use elby::{
    catalog::KubeCatalog,
    config::Config,
    constants::{METRICS_SERVER_BIND_ADDRESS, METRICS_SERVER_PORT, TOKIO_WORKER_THREADS},
    elb::ElbLoadBalancers,
    metrics,
    reconciler::Reconciler,
    route53::Route53Dns,
};
use tracing::{debug, error, info};

fn main() -> Result<()> {
    // Build Tokio runtime with custom thread names
    let runtime = tokio::runtime::Builder::new_multi_thread()
        .worker_threads(TOKIO_WORKER_THREADS)
        .thread_name("elby-reconciler")
        .enable_all()
        .build()?;

    runtime.block_on(async_main())
}

async fn async_main() -> Result<()> {
    // Initialize logging with custom format
    // Format: timestamp file:line LEVEL message
    //
    // Respects RUST_LOG environment variable if set, otherwise defaults to INFO level
    // Example: RUST_LOG=debug cargo run
    //
    // Respects RUST_LOG_FORMAT environment variable for output format
    // Example: RUST_LOG_FORMAT=json cargo run
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));

    let log_format = std::env::var("RUST_LOG_FORMAT").unwrap_or_else(|_| "text".to_string());

    match log_format.to_lowercase().as_str() {
        "json" => {
            tracing_subscriber::fmt()
                .with_env_filter(env_filter)
                .with_file(true)
                .with_line_number(true)
                .with_thread_names(true)
                .with_target(false)
                .json()
                .init();
        }
        _ => {
            tracing_subscriber::fmt()
                .with_env_filter(env_filter)
                .with_file(true)
                .with_line_number(true)
                .with_thread_names(true)
                .with_target(false)
                .with_ansi(true)
                .compact()
                .init();
        }
    }

    info!("Starting Route53 service sync");

    let config = Config::from_env()?;
    debug!(
        namespace = %config.namespace,
        tld = %config.tld,
        interval_secs = config.poll_interval.as_secs(),
        "Configuration loaded"
    );

    debug!("Initializing Kubernetes client");
    let client = kube::Client::try_default().await?;
    debug!("Kubernetes client initialized successfully");

    // AWS credentials and region come from the ambient environment
    // (AWS_ACCESS_KEY_ID, AWS_SECRET_ACCESS_KEY, AWS_REGION)
    debug!("Loading AWS configuration from the environment");
    let sdk_config = aws_config::load_defaults(aws_config::BehaviorVersion::latest()).await;

    let catalog = KubeCatalog::new(client, &config.namespace, &config.label_selector);
    let load_balancers = ElbLoadBalancers::new(&sdk_config);
    let dns = Route53Dns::new(&sdk_config);

    let reconciler = Reconciler::new(catalog, load_balancers, dns.clone(), dns, &config);

    let metrics_addr: SocketAddr =
        format!("{METRICS_SERVER_BIND_ADDRESS}:{METRICS_SERVER_PORT}").parse()?;

    let shutdown = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            error!("Failed to listen for shutdown signal: {e}");
        }
    };

    // The reconciler runs until shutdown or a fatal error; the metrics
    // server should never exit on its own.
    tokio::select! {
        result = reconciler.run(shutdown) => {
            if let Err(ref e) = result {
                error!("CRITICAL: reconcile cycle failed: {e}");
            }
            result?;
        }
        result = metrics::serve(metrics_addr) => {
            error!("CRITICAL: metrics server exited unexpectedly: {result:?}");
            result?;
            anyhow::bail!("metrics server exited unexpectedly without error")
        }
    }

    info!("Shutdown complete");
    Ok(())
}

// Standard library
use std::error::Error;
use std::path::PathBuf;
use std::{env, fs};

// 3rd party crates
use futures::{stream::FuturesUnordered, StreamExt};
use tokio::signal::ctrl_c;
use tokio::sync::broadcast::{self, error::TryRecvError};
use tracing::{error, info, warn};
use tracing_subscriber::{filter::LevelFilter, EnvFilter};

// Project imports
use crpt_client::settings::ConfigManager;
use crpt_client::{CrptClient, Document, Signature};

/// Submits documents to the registry without exceeding the configured rate.
///
/// Usage: `crpt-client <signature-file> <document.json>...`
///
/// All documents are submitted concurrently; the shared rate limiter spreads
/// them out so the registry never sees more than `rate_limit.max_requests`
/// requests within any `rate_limit.window_ms` span. Ctrl+C cancels every
/// submission still waiting for a slot.
#[tokio::main]
async fn main() {
    // loads the .env file from the current directory or parents.
    dotenvy::dotenv_override().ok();

    let config: ConfigManager = match ConfigManager::new() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Failed to initialize configuration: {}", e);
            std::process::exit(1);
        }
    };

    // setup logging.
    let log_level: String = config.get_log_level();

    let filter: EnvFilter = EnvFilter::builder()
        .with_default_directive(LevelFilter::ERROR.into())
        .parse_lossy(log_level)
        .add_directive("hyper_util=error".parse().unwrap())
        .add_directive("reqwest=error".parse().unwrap())
        .add_directive("rustls=error".parse().unwrap())
        .add_directive("hyper=error".parse().unwrap());

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_level(true)
        .init();

    info!("⚙️ Settings have been loaded from {:?}.", config.config_path);

    // Create a broadcast channel for shutdown signal
    // Held until the per-document receivers exist so an early Ctrl+C is not lost.
    let (shutdown_tx, mut startup_rx) = broadcast::channel(1);
    let shutdown_tx_clone = shutdown_tx.clone();

    // Handle Ctrl+C
    tokio::spawn(async move {
        if let Err(e) = ctrl_c().await {
            error!("Failed to listen for Ctrl+C: {}", e);
            return;
        }
        info!("Received shutdown signal, cancelling pending submissions...");
        let _ = shutdown_tx_clone.send(());
    });

    if let Err(e) = run(&config, &shutdown_tx, &mut startup_rx).await {
        error!("Application error: {}", e);
        std::process::exit(1);
    }
}

/// Loads the signature and documents named on the command line and submits them.
async fn run(
    config: &ConfigManager,
    shutdown_tx: &broadcast::Sender<()>,
    startup_rx: &mut broadcast::Receiver<()>,
) -> Result<(), Box<dyn Error>> {
    let mut args = env::args().skip(1);
    let signature_path: PathBuf = args
        .next()
        .map(PathBuf::from)
        .ok_or("usage: crpt-client <signature-file> <document.json>...")?;
    let document_paths: Vec<PathBuf> = args.map(PathBuf::from).collect();
    if document_paths.is_empty() {
        return Err("no documents given".into());
    }

    let signature = Signature::new(fs::read_to_string(&signature_path)?.trim());

    let mut documents: Vec<(PathBuf, Document)> = Vec::with_capacity(document_paths.len());
    for path in document_paths {
        let document: Document = serde_json::from_slice(&fs::read(&path)?)?;
        documents.push((path, document));
    }

    let client = CrptClient::from_settings(config.get_settings())?;
    info!("📄 Submitting {} documents", documents.len());

    let receivers = shutdown_receivers(shutdown_tx, startup_rx, documents.len())?;

    let mut futures = FuturesUnordered::new();
    for ((path, document), mut shutdown_rx) in documents.iter().zip(receivers) {
        let client = &client;
        let signature = &signature;
        futures.push(async move {
            let result = client
                .submit_until(document, signature, &mut shutdown_rx)
                .await;
            (path, result)
        });
    }

    let mut failed = 0usize;
    while let Some((path, result)) = futures.next().await {
        match result {
            Ok(response) => info!(
                file = %path.display(),
                registered_as = ?response.value,
                "Document accepted"
            ),
            Err(e) if e.is_cancelled() => {
                warn!(file = %path.display(), "Submission cancelled");
                failed += 1;
            }
            Err(e) => {
                error!(file = %path.display(), "Submission failed: {}", e);
                failed += 1;
            }
        }
    }

    let metrics = client.metrics().get_snapshot().await;
    info!(
        attempts = metrics.attempts,
        successes = metrics.successes,
        throttled = metrics.throttled,
        throttled_wait_ms = metrics.throttled_wait.as_millis() as u64,
        "Submission run finished"
    );

    if failed > 0 {
        return Err(format!("{} of {} submissions failed", failed, documents.len()).into());
    }

    Ok(())
}

/// Subscribes one shutdown receiver per submission.
///
/// `startup_rx` must have been subscribed before the Ctrl+C listener started.
/// A signal it already holds means shutdown came in during startup, which the
/// fresh receivers would never see.
fn shutdown_receivers(
    shutdown_tx: &broadcast::Sender<()>,
    startup_rx: &mut broadcast::Receiver<()>,
    count: usize,
) -> Result<Vec<broadcast::Receiver<()>>, Box<dyn Error>> {
    let receivers: Vec<_> = (0..count).map(|_| shutdown_tx.subscribe()).collect();

    match startup_rx.try_recv() {
        Err(TryRecvError::Empty) => Ok(receivers),
        _ => Err("shutdown requested before submission started".into()),
    }
}

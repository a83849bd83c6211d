use crate::api::HttpEventApi;
use crate::commands::{self, Outcome};
use crate::config::Config;
use crate::controller::EventController;
use crate::error::Error;
use crate::shutdown;
use std::io::Write;
use std::sync::Arc;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::{oneshot, RwLock};
use tracing::{error, info};
use tracing_subscriber::{EnvFilter, FmtSubscriber};

/// Initialize logging with environment-based configuration
pub fn init_logging() -> miette::Result<()> {
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .finish();

    tracing::subscriber::set_global_default(subscriber)
        .map_err(|e| Error::Other(format!("Failed to set up logging: {}", e)))?;

    Ok(())
}

/// Load and initialize the application config
pub async fn load_config() -> miette::Result<Arc<RwLock<Config>>> {
    match Config::load() {
        Ok(config) => Ok(Arc::new(RwLock::new(config))),
        Err(e) => {
            error!("Failed to load configuration: {:?}", e);
            Err(e.into())
        }
    }
}

/// Composition root: construct and wire the api, store, renderer, and
/// controller, then run the input loop until quit or a signal.
pub async fn run_app(config: Arc<RwLock<Config>>) -> miette::Result<()> {
    let base_url = {
        let config_read = config.read().await;
        config_read.api_base_url.clone()
    };
    info!("Fetching events from {}/events", base_url);

    let api = Arc::new(HttpEventApi::new(Arc::clone(&config)).await?);

    // The initial list is the one remote call made before any input is
    // accepted; its failure propagates straight to the miette report.
    let mut controller = EventController::initialize(api).await?;
    info!("Loaded {} events", controller.store().events().len());

    println!("{}", controller.renderer().to_text());
    println!("{}", commands::help_text());

    // Create shutdown channel and spawn the signal handler task
    let (shutdown_send, mut shutdown_recv) = oneshot::channel();
    tokio::spawn(async move {
        shutdown::handle_signals(shutdown_send).await;
    });

    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    loop {
        print!("> ");
        let _ = std::io::stdout().flush();

        tokio::select! {
            maybe_line = lines.next_line() => {
                let Ok(Some(line)) = maybe_line else {
                    info!("Input closed, shutting down");
                    break;
                };
                if line.trim().is_empty() {
                    continue;
                }
                let command = match commands::parse(&line) {
                    Ok(command) => command,
                    Err(message) => {
                        println!("{}", message);
                        continue;
                    }
                };
                match commands::execute(&mut controller, command).await {
                    Ok(Outcome::Quit) => break,
                    Ok(Outcome::Continue) => {}
                    Err(e) => {
                        // The designated sink for failures the controller
                        // does not contain (the create path).
                        error!(target: "unhandled", "{:?}", e);
                    }
                }
                println!("{}", controller.renderer().to_text());
            }
            _ = &mut shutdown_recv => {
                break;
            }
        }
    }

    info!("Shutting down");
    Ok(())
}

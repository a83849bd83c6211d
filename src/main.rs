use eventlist::startup;
use tracing::info;

#[tokio::main]
async fn main() -> miette::Result<()> {
    // Initialize logging
    startup::init_logging()?;

    info!("Starting eventlist");

    // Load configuration
    let config = startup::load_config().await?;

    // Run the application
    startup::run_app(config).await
}

use std::sync::Arc;

use clap::Parser;
use navkit::{ActionBot, ChromeDriver, Config, Navigator, StatsRegistry};
use tracing::info;

#[derive(Parser)]
#[command(about = "Scripted demo session for the navkit helpers")]
struct Args {
    /// Page to drive the demo against
    #[arg(long, default_value = "https://example.com")]
    url: String,

    /// Run with a visible browser window
    #[arg(long)]
    headful: bool,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,navkit=debug".into()),
        )
        .init();

    let args = Args::parse();

    let mut config = Config::default();
    config.browser.headless = !args.headful;
    config.waits.implicit_wait_ms = 2000;

    let registry = StatsRegistry::with_default_plugins();
    registry.enable_all();
    let registry = Arc::new(registry);

    info!(
        "Starting demo session against {} at {}",
        args.url,
        navkit::utils::timestamp::timestamp()
    );
    let navigator = Navigator::new(ChromeDriver::new(), config, Arc::clone(&registry)).await?;
    let navigator = Arc::new(navigator);
    let bot = ActionBot::new(Arc::clone(&navigator));

    navigator.navigate(&args.url).await?;
    navigator.wait_until_present("body").await?;

    info!("Page title: {}", navigator.title().await?);

    if let Ok(heading) = navigator.describe_element("h1").await {
        info!("Main heading: {}", heading);
    }

    bot.move_to_element("a").await?;
    bot.click_and_wait("a").await?;
    info!("Now at: {}", navigator.url().await?);

    navigator.navigate_back().await?;
    navigator.wait_for_page_loaded().await?;

    for summary in registry.summaries() {
        info!("{}", summary);
    }

    Ok(())
}

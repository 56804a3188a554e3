//! Print today's picture title and the last week of DONKI events
//!
//! ```bash
//! NASA_API_KEY=... RUST_LOG=nasa_client=debug cargo run -p nasa-client --example space_weather
//! ```

use chrono::{Duration, Local};
use nasa_client::{NasaClient, NasaConfig};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "nasa_client=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = NasaConfig::load()?;
    let mut client = NasaClient::from_config(&config)?;

    let apod = client.picture_of_the_day(None, false).await?;
    println!("APOD: {}", apod["title"]);

    let end = Local::now().date_naive();
    let start = end - Duration::days(7);

    let flares = client.solar_flare(Some(start), Some(end)).await?;
    let storms = client.geomagnetic_storm(Some(start), Some(end)).await?;
    println!(
        "{} solar flares, {} geomagnetic storms since {}",
        flares.as_array().map_or(0, Vec::len),
        storms.as_array().map_or(0, Vec::len),
        start
    );

    tracing::info!(
        remaining = ?client.limit_remaining(),
        "Done"
    );
    Ok(())
}

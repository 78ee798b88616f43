use anyhow::{Context, Result};
use listing_browser::seed::{BundledSeed, DirectorySeed, SeedSource};
use listing_browser::services::{PropertyFilters, SortOrder};
use listing_browser::{Config, ListingBrowser};
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    let config = Config::from_env();

    // Initialize logging
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&config.log_filter))
        .context("Invalid log filter")?;
    tracing_subscriber::fmt().with_env_filter(filter).init();

    info!("🏠 Listing Browser");

    let source: Box<dyn SeedSource> = match &config.seed_dir {
        Some(dir) => Box::new(DirectorySeed::new(dir)),
        None => Box::new(BundledSeed::new()),
    };
    info!("Loading seed data from {} source", source.source_name());
    let seed = source.load().await?;

    let browser = ListingBrowser::from_seed(seed, config.simulate_latency);

    let listings = browser
        .browse(&PropertyFilters::new(), SortOrder::Newest)
        .await;
    info!("✅ {} listings, newest first\n", listings.len());

    for (i, property) in listings.iter().enumerate() {
        println!("{}. {} (${})", i + 1, property.title, property.price);
        println!(
            "   {} bd, {} ba, {} sqft, {}",
            property.bedrooms, property.bathrooms, property.square_feet, property.property_type
        );
        println!(
            "   {}, {}, {}",
            property.address.street, property.address.neighborhood, property.address.city
        );
        println!("   Listed: {}", property.listing_date.format("%b %d, %Y"));
        println!("   Agent: {}", property.agent.name);
        println!();
    }

    let saved = browser.saved_listings().await;
    info!("💾 {} saved listings", saved.len());
    for item in &saved {
        println!("* {} (saved {})", item.property.title, item.entry.saved_date.format("%Y-%m-%d"));
        if !item.entry.notes.is_empty() {
            println!("  Notes: {}", item.entry.notes);
        }
    }

    Ok(())
}

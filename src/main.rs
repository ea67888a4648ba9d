use clap::Parser;
use color_eyre::eyre::Result;
use tokio::sync::mpsc;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

use event_catalog::application::{EventDetails, EventFeed, ListingSummary};
use event_catalog::domain::SortOption;
use event_catalog::infrastructure::{AppConfig, AppContext, CliArgs, Command};

fn init_logging(config: &AppConfig) -> Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(config.log_level.to_string()));

    if let Some(log_path) = &config.log_path {
        if let Some(parent) = log_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let file = std::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(log_path)?;

        let file_layer = fmt::layer()
            .with_writer(file)
            .with_ansi(false)
            .with_target(true)
            .with_thread_ids(false);

        tracing_subscriber::registry()
            .with(filter)
            .with(file_layer)
            .init();

        info!(path = %log_path.display(), "Logging initialized");
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(fmt::layer().with_writer(std::io::stderr))
            .init();
    }

    Ok(())
}

fn print_listings(listings: &[event_catalog::domain::Listing]) {
    for listing in listings {
        let summary = ListingSummary::from(listing);
        println!("{}  {}  {}", summary.date, summary.id, summary.name);
        if let Some(place) = &summary.place {
            println!("    {place}");
        }
        if let Some(cover) = &summary.cover_url {
            println!("    {cover}");
        }
    }
}

async fn list(
    context: &AppContext,
    sort: Option<SortOption>,
    pages: u32,
    images: bool,
) -> Result<()> {
    let mut feed = EventFeed::new(context.catalog());

    feed.refresh(sort).await?;
    print_listings(feed.listings());

    for _ in 1..pages {
        if !feed.can_load_more().await {
            break;
        }
        let before = feed.listings().len();
        feed.load_more().await?;
        print_listings(&feed.listings()[before..]);
    }

    if images {
        let urls: Vec<String> = feed
            .listings()
            .iter()
            .filter_map(|listing| ListingSummary::from(listing).cover_url)
            .collect();

        let (tx, mut rx) = mpsc::unbounded_channel();
        context.image_loader().prefetch(urls, &tx);
        drop(tx);

        while let Some(event) = rx.recv().await {
            match event.result {
                Ok(loaded) => println!(
                    "image {}x{}  {}",
                    loaded.image.width(),
                    loaded.image.height(),
                    event.url
                ),
                Err(e) => warn!(url = %event.url, error = %e, "Image unavailable"),
            }
        }
        info!(stats = %context.image_cache().stats(), "Images loaded");
    }

    Ok(())
}

async fn detail(context: &AppContext, id: &str) -> Result<()> {
    let view = EventDetails::new(context.catalog()).load(id).await?;

    println!("{}", view.name);
    for field in &view.fields {
        println!("  {field}");
    }
    if let Some(hero) = &view.hero_image_url {
        println!("  Hero image: {hero}");
    }
    for url in &view.image_urls {
        println!("  Image: {url}");
    }
    if let Some(seat_map) = &view.seat_map_url {
        println!("  Seat map: {seat_map}");
    }

    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    color_eyre::install()?;
    dotenvy::dotenv().ok();

    let args = CliArgs::parse();
    let mut config = AppConfig::load(args.config.as_deref())?;
    config.merge_with_args(&args);
    config.validate()?;

    init_logging(&config)?;

    info!(version = event_catalog::VERSION, "Starting {}", event_catalog::NAME);

    let context = AppContext::new(&config)?;

    match args.command {
        Command::List {
            sort,
            pages,
            images,
        } => list(&context, sort.or(config.default_sort), pages, images).await,
        Command::Detail { id } => detail(&context, &id).await,
    }
}

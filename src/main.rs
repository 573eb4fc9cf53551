use anyhow::Context;
use clap::Parser;
use suburb_scout::client::{FixtureTransport, HttpSearchClient, SearchTransport};
use suburb_scout::config::Config;
use suburb_scout::render::{html, text};
use suburb_scout::session::{Resolution, SearchSession};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

/// Load-more rounds when `--pages` is not given
const DEFAULT_MAX_LOAD_MORE: usize = 5;

#[derive(Debug, Parser)]
#[command(name = "suburb-scout", about = "Search and rank property listings in a suburb")]
struct Args {
    /// Suburb to search
    suburb: String,

    /// Number of load-more rounds after the first page
    #[arg(long)]
    pages: Option<usize>,

    /// Serve built-in demo listings instead of calling the endpoint
    #[arg(long)]
    demo: bool,

    /// Show the detail view of card N (1-based); may be repeated
    #[arg(long = "expand", value_name = "N")]
    expand: Vec<usize>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let args = Args::parse();
    let config = Config::from_env()?;

    info!("🏠 Suburb Scout");
    info!("===============");

    let transport: Box<dyn SearchTransport> = if args.demo {
        Box::new(FixtureTransport::demo(args.suburb.trim(), 28))
    } else {
        Box::new(HttpSearchClient::with_timeout(&config.api_url, config.request_timeout)?)
    };
    info!("Searching '{}' via {} backend", args.suburb, transport.source_name());

    let mut session = SearchSession::new(config.policy);
    match session.search(transport.as_ref(), &args.suburb).await? {
        Resolution::Replaced { loaded } => info!("✅ First page: {} properties", loaded),
        _ => {
            let message = session.notice().unwrap_or("Search failed").to_string();
            anyhow::bail!(message);
        }
    }

    // Cards are numbered from 1 on the command line
    let requested: Vec<usize> = args
        .expand
        .iter()
        .filter_map(|n| n.checked_sub(1))
        .collect();
    let mut expanded = session.expand_within(&requested, 0..session.listings().len());

    print!("{}", text::overview(&session));
    println!();
    for card in session.cards() {
        println!("{}", text::card(&card));
    }

    let rounds = args.pages.unwrap_or(DEFAULT_MAX_LOAD_MORE);
    for _ in 0..rounds {
        match session.load_more_from(transport.as_ref()).await {
            Some(Resolution::Appended { range }) => {
                expanded += session.expand_within(&requested, range.clone());
                for card in session.cards_in(range) {
                    println!("{}", text::card(&card));
                }
            }
            Some(_) => {
                if let Some(message) = session.notice() {
                    warn!("{}", message);
                }
                session.dismiss_notice();
                break;
            }
            None => break,
        }
    }

    for index in &args.expand {
        if *index == 0 || !session.is_expanded(index - 1) {
            warn!("No card {} to expand", index);
        }
    }
    if expanded > 0 {
        info!("Expanded {} card(s)", expanded);
    }

    if let Some(hint) = text::load_more_hint(&session) {
        println!("{}", hint);
    }
    if let Some(insights) = session.insights() {
        info!("{}", insights.breakdown_text());
    }

    // Save loaded listings and the rendered page
    tokio::fs::create_dir_all(&config.output_dir)
        .await
        .with_context(|| format!("Failed to create {}", config.output_dir.display()))?;

    let json = serde_json::to_string_pretty(session.results())?;
    let json_path = config.output_dir.join("search_results.json");
    tokio::fs::write(&json_path, json).await?;
    info!("💾 Saved {} listings to {}", session.listings().len(), json_path.display());

    let html_path = config.output_dir.join("search_results.html");
    tokio::fs::write(&html_path, html::results_page(&session).into_string()).await?;
    info!("💾 Saved rendered results to {}", html_path.display());

    Ok(())
}

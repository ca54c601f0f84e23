use clap::Parser;
use listing_recommender::{RecommenderConfig, RecommenderContext};
use std::path::PathBuf;
use tracing_subscriber::{filter::EnvFilter, fmt, prelude::*};

/// Recommend listings whose descriptions resemble a chosen listing.
#[derive(Parser, Debug)]
#[command(name = "recommend_listings")]
struct Args {
    /// JSON config file; command-line flags override its values
    #[arg(long)]
    config: Option<PathBuf>,

    /// Listings CSV file
    #[arg(long)]
    data: Option<PathBuf>,

    /// 1-based id of the listing to start from
    #[arg(long, default_value_t = 1, allow_negative_numbers = true)]
    id: i64,

    /// Number of recommendations
    #[arg(long)]
    top_n: Option<usize>,

    /// Print the first rows of the catalog before recommending
    #[arg(long, default_value_t = 0)]
    preview: usize,

    /// Emit the listing and its recommendations as JSON
    #[arg(long)]
    json: bool,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("listing_recommender=info,warn"));
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .init();

    let args = Args::parse();

    let mut config = match &args.config {
        Some(path) => RecommenderConfig::from_file(path)?,
        None => RecommenderConfig::default(),
    };
    if let Some(data) = args.data {
        config.data_path = data;
    }
    if let Some(top_n) = args.top_n {
        config.top_n = top_n;
    }

    let context = RecommenderContext::from_config(&config)?;

    if args.preview > 0 && !args.json {
        println!("First {} listings:", args.preview);
        for record in context.catalog().head(args.preview) {
            println!("  {:>5}  {}  ({})", record.id(), record.name, record.price);
        }
        println!();
    }

    let listing = context.listing(args.id)?;
    let recommendations = context.recommend_records(args.id, config.top_n)?;

    if args.json {
        let ranked: Vec<serde_json::Value> = recommendations
            .iter()
            .map(|(record, score)| {
                serde_json::json!({ "id": record.id(), "name": record.name, "score": score })
            })
            .collect();
        let output = serde_json::json!({ "listing": listing, "recommendations": ranked });
        println!("{}", serde_json::to_string_pretty(&output)?);
        return Ok(());
    }

    println!("Listing Name:  {}", listing.name);
    println!("Listing Price: {}", listing.price);
    println!("Image:         {}", listing.image_reference);
    println!("\n{}\n", listing.description);

    println!("Recommended Listings:");
    for (rank, (record, score)) in recommendations.iter().enumerate() {
        println!("  {:>2}. {} (#{}, similarity {:.4})", rank + 1, record.name, record.id(), score);
    }

    Ok(())
}

use anyhow::Result;
use clap::Parser;
use slidesmith_engine::{BatchConfig, generate_all, images::ImageResolver};
use slidesmith_llm::{CompletionClient, generate_outline};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Generate a slide deck for a topic and print it as JSON.
///
/// Reads `GEMINI_API_KEY` for text generation and, optionally,
/// `REPLICATE_API_TOKEN` / `UNSPLASH_ACCESS_KEY` for image resolution;
/// missing image keys simply degrade those steps to the next source.
#[derive(Parser)]
#[command(name = "slidesmith")]
struct Args {
    /// Topic to build the deck around.
    topic: String,

    /// Leave image placeholders untouched instead of resolving them.
    #[arg(long)]
    no_images: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "info,slidesmith=debug".to_string()),
        ))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let args = Args::parse();
    let client = CompletionClient::from_env();

    let outlines = generate_outline(&client, &args.topic).await?;
    let mut layouts = generate_all(&client, &outlines, &BatchConfig::default()).await;

    if !args.no_images {
        let resolver = ImageResolver::from_env();
        resolver.resolve_batch(&mut layouts).await;
    }

    info!("deck ready: {} slides", layouts.len());
    println!("{}", serde_json::to_string_pretty(&layouts)?);
    Ok(())
}

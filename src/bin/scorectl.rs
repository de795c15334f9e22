use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine as _;
use clap::{Args, Parser, Subcommand};
use layout_aesthetics::api::client::ScorerClient;
use layout_aesthetics::api::types::{EventData, ScoreResponse, Variant};
use layout_aesthetics::scoring::{
    generate_reasoning, score_balance, score_color_harmony, score_composition, to_score,
    FALLBACK_AESTHETIC_SCORE,
};
use layout_aesthetics::{Config, ScoreRequest};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "scorectl", about = "CLI for the layout aesthetics scoring server", version)]
struct Cli {
    /// Override SCORER_URL
    #[arg(global = true, long)]
    server_url: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Check that the server is up and which model it runs
    Health,
    /// Score a layout on the server
    Score {
        /// Screenshot of the rendered layout
        #[arg(long, value_name = "PATH")]
        image: Option<PathBuf>,
        #[command(flatten)]
        layout: LayoutArgs,
        /// Output raw JSON instead of pretty lines
        #[arg(long)]
        json: bool,
    },
    /// Run the layout heuristics locally, without a server or image
    Local {
        #[command(flatten)]
        layout: LayoutArgs,
        /// Output raw JSON instead of pretty lines
        #[arg(long)]
        json: bool,
    },
}

#[derive(Args, Debug)]
struct LayoutArgs {
    /// Gradient classes, e.g. "from-purple-500 to-pink-500"
    #[arg(long)]
    gradient: Option<String>,
    /// Font family
    #[arg(long)]
    font: Option<String>,
    /// Layout: centered, left-aligned, split or overlay
    #[arg(long)]
    layout: Option<String>,
    /// Event title
    #[arg(long)]
    title: Option<String>,
    /// Event description
    #[arg(long)]
    description: Option<String>,
}

impl LayoutArgs {
    fn into_parts(self) -> (Variant, EventData) {
        (
            Variant { gradient: self.gradient, font: self.font, layout: self.layout },
            EventData { title: self.title, description: self.description },
        )
    }
}

fn print_scores(scores: &ScoreResponse, json: bool) -> Result<(), Box<dyn std::error::Error>> {
    if json {
        println!("{}", serde_json::to_string(scores)?);
    } else {
        println!("aesthetic:      {}", scores.aesthetic_score);
        println!("composition:    {}", scores.composition_score);
        println!("color harmony:  {}", scores.color_harmony_score);
        println!("balance:        {}", scores.balance_score);
        println!("reasoning:      {}", scores.reasoning);
    }
    Ok(())
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load env and parse CLI
    Config::dotenv_load();
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(std::io::stderr)
        .init();
    let cli = Cli::parse();

    let scorer_url = cli.server_url.unwrap_or_else(Config::scorer_url);

    match cli.command {
        Commands::Health => {
            let client = ScorerClient::new(scorer_url);
            let v = client.health().await.map_err(|e| {
                eprintln!("Error: {}", e);
                e
            })?;
            println!("{}", serde_json::to_string_pretty(&v)?);
            Ok(())
        }
        Commands::Score { image, layout, json } => {
            let image = match image {
                Some(path) => Some(BASE64.encode(tokio::fs::read(&path).await?)),
                None => None,
            };
            let (variant, event_data) = layout.into_parts();
            let request = ScoreRequest { image, variant, event_data };

            let client = ScorerClient::new(scorer_url);
            match client.score(&request).await {
                Ok(scores) => print_scores(&scores, json),
                Err(e) => {
                    eprintln!("Error: {}", e);
                    std::process::exit(1);
                }
            }
        }
        Commands::Local { layout, json } => {
            let (variant, event_data) = layout.into_parts();
            let composition = score_composition(&variant);
            let color_harmony = score_color_harmony(&variant);
            let balance = score_balance(&variant, &event_data);
            let scores = ScoreResponse {
                aesthetic_score: to_score(FALLBACK_AESTHETIC_SCORE),
                composition_score: composition,
                color_harmony_score: color_harmony,
                balance_score: balance,
                reasoning: generate_reasoning(FALLBACK_AESTHETIC_SCORE, composition, color_harmony, balance),
            };
            print_scores(&scores, json)
        }
    }
}

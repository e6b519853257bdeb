//! Wallet Scanner
//!
//! Scores a single wallet's on-chain complexity and prints its persona.

use anyhow::Result;
use chain_core::api::AlchemyClient;
use chain_core::config::Config;
use clap::Parser;
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use wallet_analyzer::{analyze_wallet, Persona, WalletStats};

#[derive(Debug, Parser)]
#[command(name = "wallet-scanner", about = "Score a wallet's on-chain complexity")]
struct Args {
    /// Wallet address to analyze.
    address: String,

    /// Print the raw stats as JSON instead of a summary.
    #[arg(long)]
    json: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                "wallet_scanner=info,wallet_analyzer=info,chain_core=info".into()
            }),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let args = Args::parse();

    // Load configuration
    let config = Config::from_env()?;
    let client = AlchemyClient::from_config(&config.alchemy)?;
    info!("Using Alchemy network {}", config.alchemy.network);

    let stats = match analyze_wallet(&client, &args.address).await {
        Ok(stats) => stats,
        Err(e) => {
            error!("Error analyzing wallet {}: {}", args.address, e);
            anyhow::bail!("Failed to analyze wallet. Please try again later.");
        }
    };

    if args.json {
        println!("{}", serde_json::to_string_pretty(&stats)?);
    } else {
        print_summary(&args.address, &stats);
    }

    Ok(())
}

fn print_summary(address: &str, stats: &WalletStats) {
    let persona = Persona::for_complexity(stats.complexity);

    println!("Wallet: {}", address);
    println!();
    println!("{} {} (level {})", persona.emoji, persona.title, persona.level);
    println!("  {}", persona.description);
    println!();
    println!("  Complexity:      {}/10", stats.complexity);
    println!("  Transactions:    {}", stats.transactions);
    println!("  Contracts:       {}", stats.contracts);
    println!("  Tokens:          {}", stats.tokens);
    println!("  NFTs:            {}", stats.nfts);
    println!("  Experience:      {}", stats.experience);
    println!("  Recent activity: {}", stats.recent_activity);
}

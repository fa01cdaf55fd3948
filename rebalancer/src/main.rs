use std::{path::PathBuf, process, sync::Arc};

use clap::{Parser, Subcommand};
use dotenv::dotenv;
use env_logger::Env;
use log::{error, info};
use rebalancer::{
    bot::{log_startup, RebalancerBot},
    config::{BotConfig, DEFAULT_CONFIG_PATH},
    error::BotResult,
    price_feed::PriceFeed,
};
use sdk::{jupiter::JupiterClient, RpcChainClient, Wallet};

#[derive(Parser)]
#[command(version, about, long_about = None)]
struct Cli {
    /// Path to the JSON config file
    #[arg(short, long, default_value = DEFAULT_CONFIG_PATH)]
    config: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the SOL/USDC rebalancing loop
    Run {},

    /// Print the current SOL price and exit
    Price {},
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    dotenv().ok();
    env_logger::Builder::from_env(Env::default().default_filter_or("info")).init();

    if let Err(e) = run(cli).await {
        error!("{e}");
        process::exit(1);
    }
}

async fn run(cli: Cli) -> BotResult<()> {
    let config = BotConfig::load(&cli.config)?;
    let router = Arc::new(JupiterClient::new(config.jupiter_url.clone()));

    match cli.command {
        Commands::Price {} => {
            let price = PriceFeed::new(router, config.slippage_bps).sample().await?;
            info!("Current SOL price: ${price:.2}");
        }
        Commands::Run {} => {
            let wallet = Wallet::new(config.keypair()?);
            let owner = config.wallet_pubkey(wallet.authority())?;
            log_startup(&config, &wallet, &owner);

            let chain = Arc::new(RpcChainClient::new(config.rpc_url.clone()));
            let mut bot = RebalancerBot::new(&config, router, chain, wallet, owner);
            bot.start_interval_loop().await;
        }
    }

    Ok(())
}

mod cli;
mod clock;
mod config;
mod grid;
mod sheets;
mod store;
mod weather;

use anyhow::{Error, Result};
use clap::Parser;
use cli::{command, Cli, Commands};
use env_logger::Env;

#[tokio::main]
async fn main() -> Result<(), Error> {
    // Credentials and API keys may live in an untracked `.env`
    dotenvy::dotenv().ok();
    env_logger::Builder::from_env(Env::default().default_filter_or("warn")).init();

    let cli = Cli::parse();
    let config = cli.config();

    let output = match &cli.command {
        Commands::Create { title } => command::create(&config, title).await?,
        Commands::Exists { sheet } => command::exists(&config, sheet).await?,
        Commands::Find { sheet, title } => command::find(&config, sheet, title).await?,
        Commands::Tabs { sheet } => command::tabs(&config, sheet).await?,
        Commands::Get { sheet, range } => command::get(&config, sheet, range).await?,
        Commands::Set { sheet, range, file } => {
            command::set(&config, sheet, range, file.as_deref()).await?
        }
        Commands::Append { sheet, range, file } => {
            command::append(&config, sheet, range, file.as_deref()).await?
        }
        Commands::Weather {
            city,
            keys,
            sheet,
            range,
        } => command::weather(&config, city, keys, sheet.as_deref(), range).await?,
        Commands::People { count, sheet } => {
            command::people(&config, *count, sheet.as_deref()).await?
        }
        Commands::Store {} => command::store(&config)?,
    };

    println!("{}", output);

    Ok(())
}

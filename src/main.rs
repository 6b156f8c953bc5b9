use clap::Parser;

use emoji_mosaic::cli::Args;
use emoji_mosaic::config::{Config, Settings};
use emoji_mosaic::server;

#[tokio::main]
async fn main() {
    // A missing .env file is fine; real deployments set the environment.
    dotenv::dotenv().ok();

    let args = Args::parse();
    let env = env_logger::Env::default().default_filter_or(args.log_level.as_str());
    env_logger::Builder::from_env(env).init();

    if let Err(e) = run(args).await {
        log::error!("{}", e);
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

async fn run(args: Args) -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::load(args.config.as_deref())?;
    let settings = Settings::resolve(config, &args, |key| std::env::var(key).ok())?;
    server::serve(settings).await?;
    Ok(())
}

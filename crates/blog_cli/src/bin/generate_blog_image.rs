use std::process::ExitCode;

use blog_cli::generate::{run, GenerateArgs};
use blog_inference::Config;
use clap::Parser;
use tracing::{error, info};

#[tokio::main]
async fn main() -> ExitCode {
    blog_cli::init_logging();
    let args = GenerateArgs::parse();

    match run(args, Config::from_env).await {
        Ok(report) => {
            info!("🖼️ Published {}", report.public_image);
            ExitCode::SUCCESS
        }
        Err(e) => {
            error!("❌ Error: {:#}", e);
            ExitCode::FAILURE
        }
    }
}

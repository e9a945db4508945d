use std::process::ExitCode;

use blog_cli::site::{optimize_images, resolve_site_url, seo, update_paths, SiteCli, SiteCommands, SITE_URL_VAR};
use clap::Parser;
use tracing::{error, info};

fn main() -> ExitCode {
    blog_cli::init_logging();
    if let Ok(path) = dotenvy::dotenv() {
        info!("Loaded environment from {}", path.display());
    }
    let cli = SiteCli::parse();

    let result = match cli.command {
        SiteCommands::Seo { content_dir, public_dir, site_url } => {
            let site_url = resolve_site_url(site_url, std::env::var(SITE_URL_VAR).ok());
            seo(&content_dir, &public_dir, &site_url).map(|_| ())
        }
        SiteCommands::OptimizeImages { images_dir } => optimize_images(&images_dir).map(|_| ()),
        SiteCommands::UpdatePaths { content_dir, images_dir } => {
            update_paths(&content_dir, &images_dir);
            Ok(())
        }
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("❌ Error: {:#}", e);
            ExitCode::FAILURE
        }
    }
}

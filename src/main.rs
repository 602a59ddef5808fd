// Site migration runner
//
// Reads its configuration from the environment (SITE_URL, CONTENT_DIR,
// ASSETS_DIR, SITEMAP_URL, CMS_API_TOKEN, CMS_SITE_ID, CMS_API_BASE_URL),
// runs the full pipeline and exits nonzero when validation blocks publication.

use anyhow::{Context, Result};
use kodegen_tools_sitemigrate::{MigrationConfig, run_migration};

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = MigrationConfig::from_env().context("Invalid migration configuration")?;
    log::info!("Migrating {}", config.site_url());

    let summary = run_migration(&config)
        .await
        .with_context(|| format!("Migration of {} failed", config.site_url()))?;

    let stats = &summary.asset_stats;
    log::info!(
        "Scraped {} pages; {} images ({} optimized, {} reused, {} failed)",
        summary.pages_scraped,
        stats.unique_images,
        stats.optimized,
        summary.assets_reused,
        summary.asset_failures.len()
    );

    if summary.is_blocking() {
        log::error!(
            "{} blocking validation errors, content was not published",
            summary.validation.blocking_count()
        );
        std::process::exit(1);
    }

    Ok(())
}

//! Bookshelf server binary
//!
//! ```text
//! bookshelf [CONFIG.yaml]
//! ```
//!
//! Without an argument the file named by `BOOKSHELF_CONFIG` is used, and
//! without that the built-in defaults.

use anyhow::Result;
use bookshelf::prelude::*;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config_path = std::env::args().nth(1);
    let config = AppConfig::load(config_path.as_deref())?;

    if config.uses_development_secret() {
        tracing::warn!("auth.jwt_secret is the development default; set it before deploying");
    }

    let addr = config.bind_address();
    tracing::info!(
        page_size = config.pagination.page_size,
        media_root = %config.media.root.display(),
        "starting bookshelf"
    );

    ServerBuilder::new().with_config(config).serve(&addr).await
}

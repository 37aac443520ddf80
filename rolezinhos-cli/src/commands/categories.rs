use anyhow::Result;
use rolezinhos_core::config::RolezinhosConfig;

use super::open_catalog;
use crate::render::Render;

pub async fn run(config: &RolezinhosConfig) -> Result<()> {
    let catalog = open_catalog(config).await;

    for category in catalog.categories() {
        let count = catalog.by_category(&category.id)?.len();
        println!("{}  ({})", category.render(), count);
    }

    Ok(())
}

use anyhow::Result;
use owo_colors::OwoColorize;
use rolezinhos_core::config::RolezinhosConfig;

use super::open_catalog;

/// Copy the baseline into local storage on first use.
pub async fn run(config: &RolezinhosConfig) -> Result<()> {
    let catalog = open_catalog(config).await;
    let count = catalog.baseline().events.len();

    if catalog.seed_if_empty()? {
        println!("{}", format!("{} rolês copiados para o armazenamento local", count).green());
    } else {
        println!("{}", "O armazenamento local já tem dados, nada foi copiado".dimmed());
    }

    Ok(())
}

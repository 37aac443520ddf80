use anyhow::Result;
use owo_colors::OwoColorize;
use rolezinhos_core::config::RolezinhosConfig;

use super::{cards, open_catalog};
use crate::render::{Render, empty_message};

pub async fn run(config: &RolezinhosConfig, limit: Option<usize>) -> Result<()> {
    let catalog = open_catalog(config).await;
    let roles = catalog.featured(limit.unwrap_or(config.featured_limit))?;

    println!("{}", "Em alta".bold());

    if roles.is_empty() {
        println!("{}", empty_message("Nenhum destaque encontrado."));
        return Ok(());
    }

    for card in cards(&catalog, &roles)? {
        println!("{}", card.render());
    }

    Ok(())
}

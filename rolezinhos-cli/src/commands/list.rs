use anyhow::Result;
use owo_colors::OwoColorize;
use rolezinhos_core::RecordId;
use rolezinhos_core::config::RolezinhosConfig;

use super::{cards, open_catalog};
use crate::render::{Render, empty_message};

pub async fn run(
    config: &RolezinhosConfig,
    category: Option<RecordId>,
    search: Option<String>,
) -> Result<()> {
    let catalog = open_catalog(config).await;

    let roles = catalog.browse(category.as_ref(), search.as_deref())?;

    let title = match (&category, search.as_deref().map(str::trim)) {
        (Some(id), _) => match catalog.category(id) {
            Some(c) => c.name.clone(),
            None => "Categoria não encontrada".to_string(),
        },
        (None, Some(term)) if !term.is_empty() => format!("Busca: \"{}\"", term),
        _ => "Todos os Rolês".to_string(),
    };
    println!("{}", title.bold());

    if roles.is_empty() {
        let message = if category.is_some() {
            "Ainda não há rolês cadastrados nesta categoria."
        } else {
            "Nenhum evento encontrado."
        };
        println!("{}", empty_message(message));
        return Ok(());
    }

    for card in cards(&catalog, &roles)? {
        println!("{}", card.render());
    }

    Ok(())
}

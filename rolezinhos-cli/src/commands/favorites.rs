use anyhow::Result;
use owo_colors::OwoColorize;
use rolezinhos_core::config::RolezinhosConfig;
use rolezinhos_core::{Favorites, RecordId};

use super::{cards, open_catalog};
use crate::render::{Render, empty_message};

/// List favorited events.
pub async fn list(config: &RolezinhosConfig) -> Result<()> {
    let catalog = open_catalog(config).await;

    println!("{}", "Favoritos".bold());

    match catalog.favorited()? {
        Favorites::NoneYet => {
            println!(
                "{}",
                empty_message("Você ainda não favoritou nenhum rolê. Use `rolezinhos fav <id>`.")
            );
        }
        Favorites::Found(roles) if roles.is_empty() => {
            println!(
                "{}",
                empty_message("Seus rolês favoritos não estão mais disponíveis.")
            );
        }
        Favorites::Found(roles) => {
            for card in cards(&catalog, &roles)? {
                println!("{}", card.render());
            }
        }
    }

    Ok(())
}

/// Toggle an event in or out of favorites.
pub async fn toggle(config: &RolezinhosConfig, id: RecordId) -> Result<()> {
    let catalog = open_catalog(config).await;

    let name = match catalog.by_id(&id)? {
        Some(role) => role.name,
        None => anyhow::bail!("Rolê '{}' não encontrado", id),
    };

    if catalog.toggle_favorite(&id)? {
        println!("{} {}", "★".yellow(), format!("{} adicionado aos favoritos", name).green());
    } else {
        println!("{}", format!("{} removido dos favoritos", name).dimmed());
    }

    Ok(())
}

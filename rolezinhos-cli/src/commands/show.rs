use anyhow::Result;
use owo_colors::OwoColorize;
use rolezinhos_core::{RecordId, Session};
use rolezinhos_core::config::RolezinhosConfig;

use super::open_catalog;
use crate::render::{Render, RoleDetail};

pub async fn run(config: &RolezinhosConfig, session: &Session, id: RecordId) -> Result<()> {
    let catalog = open_catalog(config).await;

    let Some(role) = catalog.by_id(&id)? else {
        println!("{}", "Rolê não encontrado!".red().bold());
        println!("Parece que o rolê que você procura não existe.");
        return Ok(());
    };

    let detail = RoleDetail {
        role: &role,
        category: catalog.category_name(role.category_id.as_ref()),
        favorite: catalog.is_favorite(&role.id)?,
        editable: session.can_modify(&role),
    };
    println!("{}", detail.render());

    Ok(())
}

use anyhow::Result;
use owo_colors::OwoColorize;
use rolezinhos_core::config::RolezinhosConfig;
use rolezinhos_core::{RecordId, Session};

use super::{RoleFields, open_catalog};

pub async fn run(
    config: &RolezinhosConfig,
    session: &Session,
    id: RecordId,
    fields: RoleFields,
) -> Result<()> {
    let catalog = open_catalog(config).await;

    // Start from the stored record so untouched fields (gallery, sub-categories) survive
    let Some(mut role) = catalog.by_id(&id)? else {
        anyhow::bail!("Rolê '{}' não encontrado", id);
    };
    fields.apply(&mut role);

    match catalog.update(session, role)? {
        Some(updated) => println!("{}", format!("  Rolê atualizado: {}", updated.name).green()),
        None => anyhow::bail!("Rolê '{}' não encontrado", id),
    }

    Ok(())
}

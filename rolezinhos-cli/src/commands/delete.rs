use anyhow::Result;
use dialoguer::Confirm;
use owo_colors::OwoColorize;
use rolezinhos_core::config::RolezinhosConfig;
use rolezinhos_core::{RecordId, Session};

use super::open_catalog;

pub async fn run(config: &RolezinhosConfig, session: &Session, id: RecordId, force: bool) -> Result<()> {
    let catalog = open_catalog(config).await;

    let Some(role) = catalog.by_id(&id)? else {
        anyhow::bail!("Rolê '{}' não encontrado", id);
    };

    // Refuse before asking for confirmation
    session.ensure_can_modify(&role, "delete events")?;

    if !force {
        let confirmed = Confirm::new()
            .with_prompt(format!("Tem certeza que deseja excluir \"{}\"?", role.name))
            .default(false)
            .interact()?;

        if !confirmed {
            return Ok(());
        }
    }

    if catalog.delete(session, &id)? {
        println!("{}", format!("  Rolê excluído: {}", role.name).red());
    }

    Ok(())
}

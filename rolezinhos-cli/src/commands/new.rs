use anyhow::Result;
use dialoguer::{Input, Select};
use owo_colors::OwoColorize;
use rolezinhos_core::config::RolezinhosConfig;
use rolezinhos_core::storage::FileStorage;
use rolezinhos_core::{Catalog, RecordId, Role, Session};

use super::{RoleFields, open_catalog};

pub async fn run(config: &RolezinhosConfig, session: &Session, mut fields: RoleFields) -> Result<()> {
    // Fail before prompting if nobody is signed in
    session.require_user("create events")?;

    let catalog = open_catalog(config).await;
    let interactive = fields.name.is_none();

    // --- Name ---
    let name = match fields.name.take() {
        Some(n) => n,
        None => Input::<String>::new()
            .with_prompt("  Nome do rolê")
            .interact_text()?,
    };

    // --- Category ---
    if fields.category.is_none() && interactive {
        fields.category = prompt_category(&catalog)?;
    }

    let mut role = Role::new(name);
    fields.apply(&mut role);

    let created = catalog.create(session, role)?;

    if interactive {
        println!();
    }
    println!(
        "{} {}",
        format!("  Rolê cadastrado: {}", created.name).green(),
        format!("#{}", created.id).dimmed()
    );

    Ok(())
}

fn prompt_category(catalog: &Catalog<FileStorage>) -> Result<Option<RecordId>> {
    let categories = catalog.categories();
    if categories.is_empty() {
        return Ok(None);
    }

    let mut items: Vec<&str> = categories.iter().map(|c| c.name.as_str()).collect();
    items.push("(sem categoria)");

    let selection = Select::new()
        .with_prompt("  Categoria")
        .items(&items)
        .default(0)
        .interact()?;

    Ok(categories.get(selection).map(|c| c.id.clone()))
}

use anyhow::Result;
use owo_colors::OwoColorize;
use rolezinhos_core::Session;
use rolezinhos_core::config::RolezinhosConfig;

pub fn run(config: &RolezinhosConfig, session: &Session) -> Result<()> {
    let config_path = RolezinhosConfig::config_path()?;

    println!("{}", "Caminhos".bold());
    println!("  Config:    {}", config_path.display());
    println!("  Dados:     {}", config.data_path().display());

    println!("{}", "Fontes".bold());
    println!("  Base:      {}", config.baseline_source());

    println!("{}", "Sessão".bold());
    match &session.user {
        Some(user) => println!("  Usuário:   {}", user),
        None => println!("  Usuário:   {}", "não conectado".dimmed()),
    }

    Ok(())
}

/// Remember `email` as the signed-in user.
pub fn login(mut config: RolezinhosConfig, email: String) -> Result<()> {
    let email = email.trim().to_string();
    if email.is_empty() {
        anyhow::bail!("Informe um email");
    }

    config.user = Some(email.clone());
    config.save()?;

    println!("{}", format!("  Conectado como {}", email).green());
    Ok(())
}

pub fn logout(mut config: RolezinhosConfig) -> Result<()> {
    if config.user.take().is_none() {
        println!("{}", "Nenhum usuário conectado".dimmed());
        return Ok(());
    }

    config.save()?;
    println!("{}", "  Sessão encerrada".dimmed());
    Ok(())
}

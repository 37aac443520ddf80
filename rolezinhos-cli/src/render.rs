//! Terminal rendering for listing view-models.
//!
//! Commands build a view-model from catalog results (record plus resolved
//! category name, favorite flag, edit permission) and render it here; the
//! core crate never produces display text.

use owo_colors::OwoColorize;
use rolezinhos_core::{Category, Role};

pub trait Render {
    fn render(&self) -> String;
}

/// One line in a listing.
pub struct RoleCard<'a> {
    pub role: &'a Role,
    pub category: &'a str,
    pub favorite: bool,
}

/// Full detail page for a single record.
pub struct RoleDetail<'a> {
    pub role: &'a Role,
    pub category: &'a str,
    pub favorite: bool,
    pub editable: bool,
}

impl Render for RoleCard<'_> {
    fn render(&self) -> String {
        let star = if self.favorite { "★".yellow().to_string() } else { " ".to_string() };
        let badge = if self.role.featured {
            format!(" {}", "EM ALTA".black().on_yellow())
        } else {
            String::new()
        };
        let mut line = format!(
            "{} {} {}{} {}",
            star,
            format!("{:>14}", self.role.id).dimmed(),
            self.role.name.bold(),
            badge,
            format!("[{}]", self.category).blue()
        );
        if let Some(description) = &self.role.description {
            line.push_str(&format!("\n{:>17}{}", "", description.dimmed()));
        }
        line
    }
}

impl Render for RoleDetail<'_> {
    fn render(&self) -> String {
        let role = self.role;
        let mut lines = vec![format!("{}  {}", role.name.bold(), format!("#{}", role.id).dimmed())];

        let mut tags = vec![self.category.blue().to_string()];
        if role.featured {
            tags.push("EM ALTA".yellow().to_string());
        }
        if self.favorite {
            tags.push("★ favorito".yellow().to_string());
        }
        lines.push(tags.join("  "));
        lines.push(String::new());

        push_field(&mut lines, "Descrição", role.description.as_deref());
        push_field(&mut lines, "Local", role.venue.as_deref());
        let date = role.date.map(|d| d.format("%d/%m/%Y").to_string());
        push_field(&mut lines, "Data", date.as_deref());
        push_field(&mut lines, "Horário", role.schedule.as_deref());
        push_field(&mut lines, "Atrações", role.attractions.as_deref());
        push_field(&mut lines, "Ingressos", role.tickets.as_deref());
        push_field(&mut lines, "Imagem", role.image.as_deref());
        if let Some((lat, lng)) = role.coordinates() {
            let map = format!(
                "https://www.openstreetmap.org/?mlat={lat}&mlon={lng}#map=15/{lat}/{lng}"
            );
            push_field(&mut lines, "Mapa", Some(map.as_str()));
        }
        push_field(&mut lines, "Criado por", role.creator.as_deref());

        if let Some(content) = &role.content {
            lines.push(String::new());
            lines.push(content.clone());
        }

        if !role.gallery.is_empty() {
            lines.push(String::new());
            lines.push("Fotos".bold().to_string());
            for photo in &role.gallery {
                match &photo.caption {
                    Some(caption) => lines.push(format!("  {} {}", photo.image, caption.dimmed())),
                    None => lines.push(format!("  {}", photo.image)),
                }
            }
        }

        if self.editable {
            lines.push(String::new());
            lines.push(
                format!("rolezinhos edit {0}  ·  rolezinhos delete {0}", role.id)
                    .dimmed()
                    .to_string(),
            );
        }

        lines.join("\n")
    }
}

impl Render for Category {
    fn render(&self) -> String {
        let mut line = format!("{} {}", format!("{:>3}", self.id).dimmed(), self.name.bold());
        if let Some(description) = &self.description {
            line.push_str(&format!("  {}", description.dimmed()));
        }
        line
    }
}

fn push_field(lines: &mut Vec<String>, label: &str, value: Option<&str>) {
    if let Some(value) = value.filter(|v| !v.is_empty()) {
        lines.push(format!("{} {}", format!("{:<11}", label).dimmed(), value));
    }
}

/// Copy shown in place of an empty listing.
pub fn empty_message(text: &str) -> String {
    text.dimmed().to_string()
}

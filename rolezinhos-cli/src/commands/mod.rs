pub mod categories;
pub mod config;
pub mod delete;
pub mod edit;
pub mod favorites;
pub mod featured;
pub mod list;
pub mod new;
pub mod seed;
pub mod show;

use chrono::NaiveDate;
use clap::Args;
use rolezinhos_core::config::RolezinhosConfig;
use rolezinhos_core::storage::FileStorage;
use rolezinhos_core::{Catalog, Photo, RecordId, Role};

use crate::render::RoleCard;
use crate::utils::tui;

/// Fetch the baseline and open the catalog over local storage.
pub async fn open_catalog(config: &RolezinhosConfig) -> Catalog<FileStorage> {
    let source = config.baseline_source();
    let spinner = tui::create_spinner(format!("Carregando rolês ({})", source));
    let baseline = source.load().await;
    spinner.finish_and_clear();

    Catalog::new(baseline, config.storage())
}

/// Build listing cards, resolving category names and favorite marks.
pub fn cards<'a>(
    catalog: &'a Catalog<FileStorage>,
    roles: &'a [Role],
) -> anyhow::Result<Vec<RoleCard<'a>>> {
    let favorites = catalog.favorite_ids()?;

    Ok(roles
        .iter()
        .map(|role| RoleCard {
            role,
            category: catalog.category_name(role.category_id.as_ref()),
            favorite: favorites.contains(&role.id),
        })
        .collect())
}

/// Event fields settable from the command line.
#[derive(Args, Debug, Default, Clone)]
pub struct RoleFields {
    /// Event name
    #[arg(long)]
    pub name: Option<String>,

    /// Short description shown on cards
    #[arg(long)]
    pub description: Option<String>,

    /// Long-form text for the detail page
    #[arg(long)]
    pub content: Option<String>,

    /// Venue or address
    #[arg(long)]
    pub venue: Option<String>,

    /// Schedule text (e.g. "Sábado, 22h")
    #[arg(long)]
    pub schedule: Option<String>,

    /// Date (YYYY-MM-DD)
    #[arg(long)]
    pub date: Option<NaiveDate>,

    /// Main attractions
    #[arg(long)]
    pub attractions: Option<String>,

    /// Ticket info
    #[arg(long)]
    pub tickets: Option<String>,

    /// Category id (see `rolezinhos categories`)
    #[arg(short, long)]
    pub category: Option<RecordId>,

    /// Show in the featured carousel
    #[arg(long)]
    pub featured: Option<bool>,

    /// Main image URL
    #[arg(long)]
    pub image: Option<String>,

    #[arg(long, allow_negative_numbers = true)]
    pub lat: Option<f64>,

    #[arg(long, allow_negative_numbers = true)]
    pub lng: Option<f64>,

    /// Extra photo URL (repeatable); replaces the gallery when given
    #[arg(long = "photo")]
    pub photos: Vec<String>,
}

impl RoleFields {
    /// Overwrite the fields that were given, leaving the rest untouched.
    pub fn apply(self, role: &mut Role) {
        if let Some(name) = self.name {
            role.name = name;
        }
        set_text(&mut role.description, self.description);
        set_text(&mut role.content, self.content);
        set_text(&mut role.venue, self.venue);
        set_text(&mut role.schedule, self.schedule);
        set_text(&mut role.attractions, self.attractions);
        set_text(&mut role.tickets, self.tickets);
        set_text(&mut role.image, self.image);
        if let Some(date) = self.date {
            role.date = Some(date);
        }
        if let Some(category) = self.category {
            role.category_id = Some(category).filter(|c| !c.is_empty());
        }
        if let Some(featured) = self.featured {
            role.featured = featured;
        }
        if let Some(lat) = self.lat {
            role.lat = Some(lat);
        }
        if let Some(lng) = self.lng {
            role.lng = Some(lng);
        }
        if !self.photos.is_empty() {
            role.gallery = self
                .photos
                .into_iter()
                .map(|image| Photo {
                    image,
                    caption: None,
                })
                .collect();
        }
    }
}

/// An empty string clears the field.
fn set_text(field: &mut Option<String>, value: Option<String>) {
    if let Some(value) = value {
        *field = if value.is_empty() { None } else { Some(value) };
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn apply_only_touches_given_fields() {
        let mut role = Role::new("Festa");
        role.venue = Some("Ginásio".to_string());
        role.gallery = vec![Photo {
            image: "a.jpg".to_string(),
            caption: Some("Palco".to_string()),
        }];

        RoleFields {
            description: Some("Open bar".to_string()),
            featured: Some(true),
            category: Some(RecordId::from("1")),
            ..Default::default()
        }
        .apply(&mut role);

        assert_eq!(role.name, "Festa");
        assert_eq!(role.venue.as_deref(), Some("Ginásio"));
        assert_eq!(role.description.as_deref(), Some("Open bar"));
        assert_eq!(role.category_id, Some(RecordId::from(1)));
        assert!(role.featured);
        assert_eq!(role.gallery.len(), 1);
    }

    #[test]
    fn empty_text_clears_field() {
        let mut role = Role::new("Festa");
        role.venue = Some("Ginásio".to_string());

        RoleFields {
            venue: Some(String::new()),
            category: Some(RecordId::from("")),
            ..Default::default()
        }
        .apply(&mut role);

        assert_eq!(role.venue, None);
        assert_eq!(role.category_id, None);
    }

    #[test]
    fn photos_replace_gallery() {
        let mut role = Role::new("Festa");
        role.gallery = vec![Photo {
            image: "old.jpg".to_string(),
            caption: None,
        }];

        RoleFields {
            photos: vec!["a.jpg".to_string(), "b.jpg".to_string()],
            ..Default::default()
        }
        .apply(&mut role);

        let images: Vec<_> = role.gallery.iter().map(|p| p.image.as_str()).collect();
        assert_eq!(images, vec!["a.jpg", "b.jpg"]);
    }
}

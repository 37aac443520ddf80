//! Event records ("rolês") and categories.
//!
//! Field names on the wire follow the site's JSON documents, so a baseline
//! exported from the site deserializes without a mapping layer.

use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Deserializer, Serialize};

use crate::id::RecordId;

/// An event listing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Role {
    pub id: RecordId,
    #[serde(rename = "nome")]
    pub name: String,
    #[serde(rename = "descricao", default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Long-form body shown on the detail page
    #[serde(rename = "conteudo", default, skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    #[serde(rename = "local", default, skip_serializing_if = "Option::is_none")]
    pub venue: Option<String>,
    /// Free-text schedule ("Sábado, 22h")
    #[serde(rename = "horario", default, skip_serializing_if = "Option::is_none")]
    pub schedule: Option<String>,
    #[serde(rename = "data", default, skip_serializing_if = "Option::is_none")]
    pub date: Option<NaiveDate>,
    #[serde(
        rename = "atracoes_principais",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub attractions: Option<String>,
    #[serde(rename = "ingressos", default, skip_serializing_if = "Option::is_none")]
    pub tickets: Option<String>,
    #[serde(
        rename = "categoria_principal_id",
        default,
        deserialize_with = "de_optional_id",
        skip_serializing_if = "Option::is_none"
    )]
    pub category_id: Option<RecordId>,
    #[serde(rename = "subcategoria_ids", default, skip_serializing_if = "Vec::is_empty")]
    pub subcategory_ids: Vec<RecordId>,
    #[serde(rename = "destaque", default)]
    pub featured: bool,
    #[serde(rename = "imagem_principal", default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    #[serde(
        default,
        deserialize_with = "de_coordinate",
        skip_serializing_if = "Option::is_none"
    )]
    pub lat: Option<f64>,
    #[serde(
        default,
        deserialize_with = "de_coordinate",
        skip_serializing_if = "Option::is_none"
    )]
    pub lng: Option<f64>,
    /// Email of the user who created the record (owner)
    #[serde(rename = "criado_por", default, skip_serializing_if = "Option::is_none")]
    pub creator: Option<String>,
    #[serde(rename = "fotos_extras", default, skip_serializing_if = "Vec::is_empty")]
    pub gallery: Vec<Photo>,
}

/// An extra photo attached to an event.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Photo {
    #[serde(rename = "imagem")]
    pub image: String,
    #[serde(rename = "legenda", default, skip_serializing_if = "Option::is_none")]
    pub caption: Option<String>,
}

/// Reference data grouping events on the home page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Category {
    pub id: RecordId,
    #[serde(rename = "nome")]
    pub name: String,
    #[serde(rename = "descricao", default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// Name shown for events whose category cannot be resolved.
pub const UNCATEGORIZED: &str = "Geral";

impl Role {
    /// A record with only a name set. The id is left empty until the record
    /// is created through the catalog.
    pub fn new(name: impl Into<String>) -> Self {
        Role {
            id: RecordId::from(""),
            name: name.into(),
            description: None,
            content: None,
            venue: None,
            schedule: None,
            date: None,
            attractions: None,
            tickets: None,
            category_id: None,
            subcategory_ids: Vec::new(),
            featured: false,
            image: None,
            lat: None,
            lng: None,
            creator: None,
            gallery: Vec::new(),
        }
    }

    pub fn coordinates(&self) -> Option<(f64, f64)> {
        Some((self.lat?, self.lng?))
    }

    /// Case-insensitive substring match on name and description.
    pub fn matches(&self, term: &str) -> bool {
        let term = term.to_lowercase();
        self.name.to_lowercase().contains(&term)
            || self
                .description
                .as_ref()
                .is_some_and(|d| d.to_lowercase().contains(&term))
    }

    /// Whether `user` created this record. Records without a creator are owned by nobody.
    pub fn is_owned_by(&self, user: &str) -> bool {
        self.creator.as_deref() == Some(user)
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)
    }
}

impl Category {
    pub fn new(id: impl Into<RecordId>, name: &str) -> Self {
        Category {
            id: id.into(),
            name: name.to_string(),
            description: None,
        }
    }
}

/// Categories used when the baseline document carries none.
pub fn fixed_categories() -> Vec<Category> {
    vec![
        Category::new(1, "Festas e Vida Noturna"),
        Category::new(2, "Cultura e Arte"),
        Category::new(3, "Ao Ar Livre"),
        Category::new(4, "Gastronomia"),
        Category::new(5, "Jogos e Geek"),
    ]
}

/// Accept `null`, a missing field, an empty string, a number, or a string id.
fn de_optional_id<'de, D: Deserializer<'de>>(d: D) -> Result<Option<RecordId>, D::Error> {
    let id = Option::<RecordId>::deserialize(d)?;
    Ok(id.filter(|id| !id.is_empty()))
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawCoordinate {
    Number(f64),
    Text(String),
}

/// Form submissions store coordinates as text, seed data as numbers.
fn de_coordinate<'de, D: Deserializer<'de>>(d: D) -> Result<Option<f64>, D::Error> {
    Ok(match Option::<RawCoordinate>::deserialize(d)? {
        Some(RawCoordinate::Number(n)) => Some(n),
        Some(RawCoordinate::Text(s)) => s.trim().parse().ok(),
        None => None,
    })
}

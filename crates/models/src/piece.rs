use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

use crate::errors::ModelError;

pub const NAME_MAX: usize = 100;
pub const INSTRUMENT_MAX: usize = 100;
pub const STYLE_MAX: usize = 50;
pub const IMAGE_URL_MAX: usize = 200;
pub const DIFFICULTY_MIN: i32 = 1;
pub const DIFFICULTY_MAX: i32 = 6;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "piece")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub piece_name: String,
    pub compositor_name: String,
    #[sea_orm(column_type = "Double")]
    pub duration_minutes: f64,
    pub date_of_release: Date,
    pub compositor_is_alive: bool,
    pub instruments: Vec<String>,
    pub difficulty_level: i32,
    pub styles: Vec<String>,
    pub compositor_image_url: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

fn too_long(s: &str, max: usize) -> bool {
    s.chars().count() > max
}

fn has_duplicates(items: &[String]) -> bool {
    let mut seen = std::collections::HashSet::with_capacity(items.len());
    !items.iter().all(|i| seen.insert(i.as_str()))
}

/// Storage-side re-check of the row invariants. Mirrors the table constraints
/// for backends that have none (the in-memory store).
pub fn check_constraints(m: &Model) -> Result<(), ModelError> {
    let violation = if m.piece_name.is_empty() || too_long(&m.piece_name, NAME_MAX) {
        Some("piece_name")
    } else if m.compositor_name.is_empty() || too_long(&m.compositor_name, NAME_MAX) {
        Some("compositor_name")
    } else if !(m.duration_minutes >= 0.0) {
        Some("duration_minutes")
    } else if !(DIFFICULTY_MIN..=DIFFICULTY_MAX).contains(&m.difficulty_level) {
        Some("difficulty_level")
    } else if m.instruments.iter().any(|i| too_long(i, INSTRUMENT_MAX)) || has_duplicates(&m.instruments) {
        Some("instruments")
    } else if m.styles.iter().any(|s| too_long(s, STYLE_MAX)) || has_duplicates(&m.styles) {
        Some("styles")
    } else if m.compositor_image_url.is_empty() || too_long(&m.compositor_image_url, IMAGE_URL_MAX) {
        Some("compositor_image_url")
    } else {
        None
    };
    match violation {
        Some(col) => Err(ModelError::Validation(format!("piece.{col}"))),
        None => Ok(()),
    }
}

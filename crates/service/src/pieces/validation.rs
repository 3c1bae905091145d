//! Field-by-field validation of an incoming piece.
//!
//! Every violated rule yields one message; the caller gets all of them at once
//! instead of the first failure. Messages are the user-facing French strings.

use std::collections::HashSet;
use std::fmt;

use chrono::{DateTime, NaiveDate, Utc};
use models::piece::{DIFFICULTY_MAX, DIFFICULTY_MIN, IMAGE_URL_MAX, INSTRUMENT_MAX, NAME_MAX, STYLE_MAX};
use serde::Serialize;
use serde_json::{Map, Value};

use super::domain::NewPiece;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldError {
    pub field: &'static str,
    pub message: &'static str,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
#[serde(transparent)]
pub struct ValidationErrors(Vec<FieldError>);

impl ValidationErrors {
    pub fn single(field: &'static str, message: &'static str) -> Self {
        Self(vec![FieldError { field, message }])
    }

    fn push(&mut self, field: &'static str, message: &'static str) {
        self.0.push(FieldError { field, message });
    }

    pub fn is_empty(&self) -> bool { self.0.is_empty() }

    pub fn errors(&self) -> &[FieldError] { &self.0 }

    pub fn messages(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.0.iter().map(|e| e.message)
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let joined: Vec<&str> = self.messages().collect();
        f.write_str(&joined.join("; "))
    }
}

/// Validate against today's UTC date.
pub fn validate_piece(raw: &Value) -> Result<NewPiece, ValidationErrors> {
    validate_piece_at(raw, Utc::now().date_naive())
}

/// Pure validator: `today` is the latest acceptable release date.
pub fn validate_piece_at(raw: &Value, today: NaiveDate) -> Result<NewPiece, ValidationErrors> {
    let empty = Map::new();
    let obj = raw.as_object().unwrap_or(&empty);
    let mut errs = ValidationErrors::default();

    let piece_name = bounded_string(
        obj, "pieceName", NAME_MAX,
        "Le nom de la pièce est requis",
        "La longueur du nom de la pièce ne doit pas dépasser 100 caractères",
        &mut errs,
    );
    let compositor_name = bounded_string(
        obj, "compositorName", NAME_MAX,
        "Le nom du compositeur est requis",
        "La longueur du nom du compositeur ne doit pas dépasser 100 caractères",
        &mut errs,
    );

    let duration_minutes = match obj.get("durationMinutes").and_then(Value::as_f64) {
        None => { errs.push("durationMinutes", "La durée est requise"); None }
        Some(d) if d < 0.0 => { errs.push("durationMinutes", "La durée doit être positive"); None }
        Some(d) => Some(d),
    };

    let date_of_release = match obj.get("dateOfRelease").and_then(Value::as_str).and_then(parse_date) {
        None => { errs.push("dateOfRelease", "La date de sortie est requise"); None }
        Some(d) if d > today => {
            errs.push("dateOfRelease", "La date de sortie ne peut pas être dans le futur");
            None
        }
        Some(d) => Some(d),
    };

    let compositor_is_alive = obj.get("compositorIsAlive").and_then(Value::as_bool);
    if compositor_is_alive.is_none() {
        errs.push("compositorIsAlive", "Le statut du compositeur est requis");
    }

    let instruments = bounded_list(
        obj, "instruments", INSTRUMENT_MAX,
        "Les instruments sont requis",
        "Chaque instrument ne doit pas dépasser 100 caractères",
        "Les instruments ne doivent pas être en double",
        &mut errs,
    );

    let difficulty_level = match obj.get("difficultyLevel").and_then(as_integer) {
        None => { errs.push("difficultyLevel", "Le niveau de difficulté est requis"); None }
        Some(n) if n < i64::from(DIFFICULTY_MIN) => {
            errs.push("difficultyLevel", "La difficulté minimale est 1");
            None
        }
        Some(n) if n > i64::from(DIFFICULTY_MAX) => {
            errs.push("difficultyLevel", "La difficulté maximale est 6");
            None
        }
        Some(n) => i32::try_from(n).ok(),
    };

    let styles = bounded_list(
        obj, "styles", STYLE_MAX,
        "Les styles sont requis",
        "Chaque style ne doit pas dépasser 50 caractères",
        "Les styles ne doivent pas être en double",
        &mut errs,
    );

    let compositor_image_url = bounded_string(
        obj, "compositorImageUrl", IMAGE_URL_MAX,
        "L'url de la photo du compositeur est requise.",
        "La longueur de l'url de la photo du compositeur ne doit pas dépasser 200 caractères",
        &mut errs,
    );

    match (
        piece_name, compositor_name, duration_minutes, date_of_release, compositor_is_alive,
        instruments, difficulty_level, styles, compositor_image_url,
    ) {
        (
            Some(piece_name), Some(compositor_name), Some(duration_minutes), Some(date_of_release),
            Some(compositor_is_alive), Some(instruments), Some(difficulty_level), Some(styles),
            Some(compositor_image_url),
        ) if errs.is_empty() => Ok(NewPiece {
            piece_name,
            compositor_name,
            duration_minutes,
            date_of_release,
            compositor_is_alive,
            instruments,
            difficulty_level,
            styles,
            compositor_image_url,
        }),
        _ => Err(errs),
    }
}

fn bounded_string(
    obj: &Map<String, Value>,
    field: &'static str,
    max: usize,
    missing: &'static str,
    too_long: &'static str,
    errs: &mut ValidationErrors,
) -> Option<String> {
    match obj.get(field).and_then(Value::as_str) {
        None | Some("") => { errs.push(field, missing); None }
        Some(s) if s.chars().count() > max => { errs.push(field, too_long); None }
        Some(s) => Some(s.to_owned()),
    }
}

fn bounded_list(
    obj: &Map<String, Value>,
    field: &'static str,
    max: usize,
    missing: &'static str,
    too_long: &'static str,
    duplicated: &'static str,
    errs: &mut ValidationErrors,
) -> Option<Vec<String>> {
    let items: Option<Vec<String>> = obj
        .get(field)
        .and_then(Value::as_array)
        .and_then(|arr| arr.iter().map(|v| v.as_str().map(str::to_owned)).collect());
    let Some(items) = items else {
        errs.push(field, missing);
        return None;
    };

    let mut ok = true;
    if items.iter().any(|s| s.chars().count() > max) {
        errs.push(field, too_long);
        ok = false;
    }
    let mut seen = HashSet::with_capacity(items.len());
    if !items.iter().all(|s| seen.insert(s.as_str())) {
        errs.push(field, duplicated);
        ok = false;
    }
    ok.then_some(items)
}

fn as_integer(v: &Value) -> Option<i64> {
    if let Some(n) = v.as_i64() {
        return Some(n);
    }
    let f = v.as_f64()?;
    (f.fract() == 0.0 && f.abs() < i64::MAX as f64).then_some(f as i64)
}

/// `YYYY-MM-DD`, or an RFC 3339 timestamp reduced to its UTC date.
fn parse_date(s: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .ok()
        .or_else(|| DateTime::parse_from_rfc3339(s).ok().map(|dt| dt.with_timezone(&Utc).date_naive()))
}

use chrono::NaiveDate;
use models::piece;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Validated piece content, without identifier.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewPiece {
    pub piece_name: String,
    pub compositor_name: String,
    pub duration_minutes: f64,
    pub date_of_release: NaiveDate,
    pub compositor_is_alive: bool,
    pub instruments: Vec<String>,
    pub difficulty_level: i32,
    pub styles: Vec<String>,
    pub compositor_image_url: String,
}

/// A stored piece as exposed over the API.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Piece {
    #[serde(rename = "_id")]
    pub id: Uuid,
    #[serde(flatten)]
    pub fields: NewPiece,
}

impl NewPiece {
    pub fn into_model(self, id: Uuid) -> piece::Model {
        piece::Model {
            id,
            piece_name: self.piece_name,
            compositor_name: self.compositor_name,
            duration_minutes: self.duration_minutes,
            date_of_release: self.date_of_release,
            compositor_is_alive: self.compositor_is_alive,
            instruments: self.instruments,
            difficulty_level: self.difficulty_level,
            styles: self.styles,
            compositor_image_url: self.compositor_image_url,
        }
    }
}

impl From<piece::Model> for Piece {
    fn from(m: piece::Model) -> Self {
        Piece {
            id: m.id,
            fields: NewPiece {
                piece_name: m.piece_name,
                compositor_name: m.compositor_name,
                duration_minutes: m.duration_minutes,
                date_of_release: m.date_of_release,
                compositor_is_alive: m.compositor_is_alive,
                instruments: m.instruments,
                difficulty_level: m.difficulty_level,
                styles: m.styles,
                compositor_image_url: m.compositor_image_url,
            },
        }
    }
}

/// Identifiers are opaque to callers; anything that is not one of ours simply
/// does not resolve.
pub fn parse_id(raw: &str) -> Option<Uuid> {
    Uuid::parse_str(raw.trim()).ok()
}

/// Inclusive date bounds `start-01-01 ..= end-12-31`, or `None` when a year is
/// outside the calendar range.
pub fn year_bounds(start: i32, end: i32) -> Option<(NaiveDate, NaiveDate)> {
    let from = NaiveDate::from_ymd_opt(start, 1, 1)?;
    let to = NaiveDate::from_ymd_opt(end, 12, 31)?;
    Some((from, to))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn piece_serializes_with_mongo_style_id_and_camel_case() {
        let id = Uuid::new_v4();
        let p = Piece {
            id,
            fields: NewPiece {
                piece_name: "Gymnopédie No.1".into(),
                compositor_name: "Satie".into(),
                duration_minutes: 3.5,
                date_of_release: NaiveDate::from_ymd_opt(1888, 1, 1).unwrap(),
                compositor_is_alive: false,
                instruments: vec!["Piano".into()],
                difficulty_level: 2,
                styles: vec!["Romantique".into()],
                compositor_image_url: "https://example.com/satie.jpg".into(),
            },
        };
        let v = serde_json::to_value(&p).unwrap();
        assert_eq!(v["_id"], json!(id.to_string()));
        assert_eq!(v["pieceName"], "Gymnopédie No.1");
        assert_eq!(v["dateOfRelease"], "1888-01-01");
        assert_eq!(v["difficultyLevel"], 2);
        assert!(v.get("fields").is_none());
    }

    #[test]
    fn year_bounds_cover_whole_calendar_years() {
        let (from, to) = year_bounds(2020, 2022).unwrap();
        assert_eq!(from, NaiveDate::from_ymd_opt(2020, 1, 1).unwrap());
        assert_eq!(to, NaiveDate::from_ymd_opt(2022, 12, 31).unwrap());
        assert!(year_bounds(i32::MAX, 2022).is_none());
    }

    #[test]
    fn foreign_ids_do_not_parse() {
        assert!(parse_id("507f1f77bcf86cd799439011").is_none());
        assert!(parse_id(&Uuid::new_v4().to_string()).is_some());
    }
}

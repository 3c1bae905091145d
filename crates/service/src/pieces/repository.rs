use async_trait::async_trait;
use uuid::Uuid;

use super::domain::{NewPiece, Piece};
use crate::errors::ServiceError;

/// Storage accessor for pieces.
///
/// Never reports "not found" as an error: lookups return `None`, deletes of
/// unknown ids are no-ops. Existence rules live in the service.
#[async_trait]
pub trait PieceRepository: Send + Sync {
    async fn get_one(&self, id: Uuid) -> Result<Option<Piece>, ServiceError>;
    async fn get_all(&self) -> Result<Vec<Piece>, ServiceError>;
    async fn get_by_alive_status(&self, is_alive: bool) -> Result<Vec<Piece>, ServiceError>;
    /// Inclusive on both ends: Jan 1 of `start` through Dec 31 of `end`.
    async fn get_by_year_range(&self, start: i32, end: i32) -> Result<Vec<Piece>, ServiceError>;
    /// Persist and return the record with its newly assigned identifier.
    async fn add(&self, piece: NewPiece) -> Result<Piece, ServiceError>;
    /// Overwrite every field of an existing record; errors if it is gone.
    async fn update(&self, piece: Piece) -> Result<Piece, ServiceError>;
    async fn delete(&self, id: Uuid) -> Result<(), ServiceError>;
}

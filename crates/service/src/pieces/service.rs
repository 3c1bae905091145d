use std::sync::Arc;

use tracing::{debug, info, instrument};

use super::domain::{parse_id, year_bounds, NewPiece, Piece};
use super::repository::PieceRepository;
use super::validation::ValidationErrors;
use crate::errors::ServiceError;

pub const PIECE_NOT_FOUND_ERR: &str = "Piece not found";

/// Application service for pieces.
/// Owns the one business rule: updates and deletes must target an existing record.
pub struct PieceService<R: PieceRepository + ?Sized> {
    repo: Arc<R>,
}

impl<R: PieceRepository + ?Sized> PieceService<R> {
    pub fn new(repo: Arc<R>) -> Self { Self { repo } }

    /// # Examples
    /// ```
    /// use std::sync::Arc;
    /// use service::pieces::{PieceService, repo::MemoryPieceRepository};
    /// use service::errors::ServiceError;
    /// let svc = PieceService::new(Arc::new(MemoryPieceRepository::new()));
    /// let res = tokio_test::block_on(svc.get_one("does-not-exist"));
    /// assert!(matches!(res, Err(ServiceError::NotFound(_))));
    /// ```
    #[instrument(skip(self))]
    pub async fn get_one(&self, id: &str) -> Result<Piece, ServiceError> {
        let Some(id) = parse_id(id) else { return Err(ServiceError::not_found(PIECE_NOT_FOUND_ERR)) };
        self.repo
            .get_one(id)
            .await?
            .ok_or_else(|| ServiceError::not_found(PIECE_NOT_FOUND_ERR))
    }

    #[instrument(skip(self))]
    pub async fn get_all(&self) -> Result<Vec<Piece>, ServiceError> {
        self.repo.get_all().await
    }

    #[instrument(skip(self))]
    pub async fn get_by_alive_status(&self, is_alive: bool) -> Result<Vec<Piece>, ServiceError> {
        self.repo.get_by_alive_status(is_alive).await
    }

    /// Years outside the calendar range are a validation error, any other
    /// pair (including `start > end`) just matches what it matches.
    #[instrument(skip(self))]
    pub async fn get_by_year_range(&self, start: i32, end: i32) -> Result<Vec<Piece>, ServiceError> {
        if year_bounds(start, end).is_none() {
            return Err(ValidationErrors::single("years", "Année invalide").into());
        }
        let found = self.repo.get_by_year_range(start, end).await?;
        debug!(count = found.len(), "pieces in year range");
        Ok(found)
    }

    /// Expects a piece that already went through validation.
    #[instrument(skip(self, piece), fields(piece_name = %piece.piece_name))]
    pub async fn add(&self, piece: NewPiece) -> Result<Piece, ServiceError> {
        let created = self.repo.add(piece).await?;
        info!(id = %created.id, "piece_created");
        Ok(created)
    }

    /// Replace every field of an existing piece. A missing or unknown id is NotFound.
    #[instrument(skip(self, piece))]
    pub async fn update(&self, id: Option<&str>, piece: NewPiece) -> Result<Piece, ServiceError> {
        let id = id
            .and_then(parse_id)
            .ok_or_else(|| ServiceError::not_found(PIECE_NOT_FOUND_ERR))?;
        if self.repo.get_one(id).await?.is_none() {
            return Err(ServiceError::not_found(PIECE_NOT_FOUND_ERR));
        }
        let updated = self.repo.update(Piece { id, fields: piece }).await?;
        info!(id = %id, "piece_updated");
        Ok(updated)
    }

    #[instrument(skip(self))]
    pub async fn delete(&self, id: &str) -> Result<(), ServiceError> {
        let id = parse_id(id).ok_or_else(|| ServiceError::not_found(PIECE_NOT_FOUND_ERR))?;
        if self.repo.get_one(id).await?.is_none() {
            return Err(ServiceError::not_found(PIECE_NOT_FOUND_ERR));
        }
        self.repo.delete(id).await?;
        info!(id = %id, "piece_deleted");
        Ok(())
    }
}

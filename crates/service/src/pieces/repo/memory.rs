use std::collections::HashMap;

use async_trait::async_trait;
use models::piece;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::errors::ServiceError;
use crate::pieces::domain::{year_bounds, NewPiece, Piece};
use crate::pieces::repository::PieceRepository;

/// In-process repository for tests and `storage.backend = "memory"`.
#[derive(Default)]
pub struct MemoryPieceRepository {
    rows: RwLock<HashMap<Uuid, piece::Model>>,
}

impl MemoryPieceRepository {
    pub fn new() -> Self { Self::default() }

    pub async fn len(&self) -> usize { self.rows.read().await.len() }

    pub async fn is_empty(&self) -> bool { self.rows.read().await.is_empty() }

    async fn select<F>(&self, keep: F) -> Vec<Piece>
    where
        F: Fn(&piece::Model) -> bool,
    {
        let rows = self.rows.read().await;
        let mut out: Vec<&piece::Model> = rows.values().filter(|m| keep(*m)).collect();
        out.sort_by(|a, b| a.date_of_release.cmp(&b.date_of_release).then(a.id.cmp(&b.id)));
        out.into_iter().cloned().map(Piece::from).collect()
    }
}

#[async_trait]
impl PieceRepository for MemoryPieceRepository {
    async fn get_one(&self, id: Uuid) -> Result<Option<Piece>, ServiceError> {
        let rows = self.rows.read().await;
        Ok(rows.get(&id).cloned().map(Piece::from))
    }

    async fn get_all(&self) -> Result<Vec<Piece>, ServiceError> {
        Ok(self.select(|_| true).await)
    }

    async fn get_by_alive_status(&self, is_alive: bool) -> Result<Vec<Piece>, ServiceError> {
        Ok(self.select(|m| m.compositor_is_alive == is_alive).await)
    }

    async fn get_by_year_range(&self, start: i32, end: i32) -> Result<Vec<Piece>, ServiceError> {
        let Some((from, to)) = year_bounds(start, end) else { return Ok(Vec::new()) };
        Ok(self.select(|m| (from..=to).contains(&m.date_of_release)).await)
    }

    async fn add(&self, new: NewPiece) -> Result<Piece, ServiceError> {
        let model = new.into_model(Uuid::new_v4());
        piece::check_constraints(&model)?;
        let mut rows = self.rows.write().await;
        rows.insert(model.id, model.clone());
        Ok(Piece::from(model))
    }

    async fn update(&self, record: Piece) -> Result<Piece, ServiceError> {
        let model = record.fields.into_model(record.id);
        piece::check_constraints(&model)?;
        let mut rows = self.rows.write().await;
        let slot = rows
            .get_mut(&model.id)
            .ok_or_else(|| ServiceError::Db(format!("piece {} no longer exists", model.id)))?;
        *slot = model.clone();
        Ok(Piece::from(model))
    }

    async fn delete(&self, id: Uuid) -> Result<(), ServiceError> {
        self.rows.write().await.remove(&id);
        Ok(())
    }
}

use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, QueryFilter, QueryOrder, Select, Set,
};
use uuid::Uuid;

use models::piece::{self, Entity as PieceEntity};

use crate::errors::ServiceError;
use crate::pieces::domain::{year_bounds, NewPiece, Piece};
use crate::pieces::repository::PieceRepository;

/// PostgreSQL-backed repository.
pub struct SeaOrmPieceRepository {
    pub db: DatabaseConnection,
}

impl SeaOrmPieceRepository {
    pub fn new(db: DatabaseConnection) -> Self { Self { db } }

    async fn fetch(&self, finder: Select<PieceEntity>) -> Result<Vec<Piece>, ServiceError> {
        let rows = finder
            .order_by_asc(piece::Column::DateOfRelease)
            .order_by_asc(piece::Column::Id)
            .all(&self.db)
            .await?;
        Ok(rows.into_iter().map(Piece::from).collect())
    }
}

fn active(m: piece::Model) -> piece::ActiveModel {
    piece::ActiveModel {
        id: Set(m.id),
        piece_name: Set(m.piece_name),
        compositor_name: Set(m.compositor_name),
        duration_minutes: Set(m.duration_minutes),
        date_of_release: Set(m.date_of_release),
        compositor_is_alive: Set(m.compositor_is_alive),
        instruments: Set(m.instruments),
        difficulty_level: Set(m.difficulty_level),
        styles: Set(m.styles),
        compositor_image_url: Set(m.compositor_image_url),
    }
}

#[async_trait::async_trait]
impl PieceRepository for SeaOrmPieceRepository {
    async fn get_one(&self, id: Uuid) -> Result<Option<Piece>, ServiceError> {
        let found = PieceEntity::find_by_id(id).one(&self.db).await?;
        Ok(found.map(Piece::from))
    }

    async fn get_all(&self) -> Result<Vec<Piece>, ServiceError> {
        self.fetch(PieceEntity::find()).await
    }

    async fn get_by_alive_status(&self, is_alive: bool) -> Result<Vec<Piece>, ServiceError> {
        self.fetch(PieceEntity::find().filter(piece::Column::CompositorIsAlive.eq(is_alive))).await
    }

    async fn get_by_year_range(&self, start: i32, end: i32) -> Result<Vec<Piece>, ServiceError> {
        let Some((from, to)) = year_bounds(start, end) else { return Ok(Vec::new()) };
        self.fetch(PieceEntity::find().filter(piece::Column::DateOfRelease.between(from, to))).await
    }

    async fn add(&self, new: NewPiece) -> Result<Piece, ServiceError> {
        let model = new.into_model(Uuid::new_v4());
        piece::check_constraints(&model)?;
        let created = active(model).insert(&self.db).await?;
        Ok(Piece::from(created))
    }

    async fn update(&self, record: Piece) -> Result<Piece, ServiceError> {
        let model = record.fields.into_model(record.id);
        piece::check_constraints(&model)?;
        let id = model.id;
        match active(model).update(&self.db).await {
            Ok(updated) => Ok(Piece::from(updated)),
            Err(DbErr::RecordNotUpdated) => Err(ServiceError::Db(format!("piece {id} no longer exists"))),
            Err(e) => Err(e.into()),
        }
    }

    async fn delete(&self, id: Uuid) -> Result<(), ServiceError> {
        PieceEntity::delete_by_id(id).exec(&self.db).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::get_db;
    use chrono::NaiveDate;

    fn sample(name: &str, date: NaiveDate, alive: bool) -> NewPiece {
        NewPiece {
            piece_name: name.into(),
            compositor_name: "Composer".into(),
            duration_minutes: 6.25,
            date_of_release: date,
            compositor_is_alive: alive,
            instruments: vec!["Piano".into(), "Violin".into()],
            difficulty_level: 4,
            styles: vec!["Baroque".into()],
            compositor_image_url: "https://example.com/c.jpg".into(),
        }
    }

    #[tokio::test]
    async fn piece_crud_against_postgres() -> Result<(), anyhow::Error> {
        if std::env::var("SKIP_DB_TESTS").is_ok() || std::env::var("DATABASE_URL").is_err() { return Ok(()); }
        let repo = SeaOrmPieceRepository::new(get_db().await?);

        // A far-past year keeps the range query isolated from other rows.
        let date = NaiveDate::from_ymd_opt(1603, 6, 15).unwrap();
        let created = repo.add(sample("pg piece", date, true)).await?;
        let found = repo.get_one(created.id).await?.expect("inserted row");
        assert_eq!(found, created);
        assert_eq!(found.fields.instruments, vec!["Piano", "Violin"]);

        let in_range = repo.get_by_year_range(1603, 1603).await?;
        assert!(in_range.iter().any(|p| p.id == created.id));
        assert!(!repo.get_by_year_range(1604, 1605).await?.iter().any(|p| p.id == created.id));

        let alive = repo.get_by_alive_status(true).await?;
        assert!(alive.iter().any(|p| p.id == created.id));

        let mut changed = created.clone();
        changed.fields.piece_name = "pg piece renamed".into();
        changed.fields.compositor_is_alive = false;
        let updated = repo.update(changed).await?;
        assert_eq!(updated.fields.piece_name, "pg piece renamed");
        assert!(!repo.get_by_alive_status(true).await?.iter().any(|p| p.id == created.id));

        repo.delete(created.id).await?;
        assert!(repo.get_one(created.id).await?.is_none());

        let gone = repo.update(updated).await;
        assert!(matches!(gone, Err(ServiceError::Db(_))));
        Ok(())
    }
}

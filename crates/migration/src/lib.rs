//! Migrator for the `piece` collection table.
//! Indexes are applied last.
pub use sea_orm_migration::prelude::*;

mod m20240101_000001_create_piece;
mod m20240101_000002_add_piece_indexes;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20240101_000001_create_piece::Migration),
            // Indexes should always be applied last
            Box::new(m20240101_000002_add_piece_indexes::Migration),
        ]
    }
}

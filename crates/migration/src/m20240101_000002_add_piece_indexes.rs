//! Indexes backing the year-range and alive-status queries.
use sea_orm_migration::prelude::*;

use crate::m20240101_000001_create_piece::Piece;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_piece_date_of_release")
                    .table(Piece::Table)
                    .col(Piece::DateOfRelease)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_piece_compositor_is_alive")
                    .table(Piece::Table)
                    .col(Piece::CompositorIsAlive)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_index(Index::drop().name("idx_piece_compositor_is_alive").table(Piece::Table).to_owned())
            .await?;
        manager
            .drop_index(Index::drop().name("idx_piece_date_of_release").table(Piece::Table).to_owned())
            .await
    }
}

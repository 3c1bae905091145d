//! Create `piece` table.
//! Column lengths and the difficulty CHECK mirror the request validator so the
//! store rejects anything that slipped past it.
use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Piece::Table)
                    .if_not_exists()
                    .col(uuid(Piece::Id).primary_key())
                    .col(string_len(Piece::PieceName, 100).not_null())
                    .col(string_len(Piece::CompositorName, 100).not_null())
                    .col(
                        double(Piece::DurationMinutes)
                            .not_null()
                            .check(Expr::col(Piece::DurationMinutes).gte(0)),
                    )
                    .col(date(Piece::DateOfRelease).not_null())
                    .col(boolean(Piece::CompositorIsAlive).not_null())
                    .col(array(Piece::Instruments, ColumnType::Text).not_null())
                    .col(
                        integer(Piece::DifficultyLevel)
                            .not_null()
                            .check(Expr::col(Piece::DifficultyLevel).between(1, 6)),
                    )
                    .col(array(Piece::Styles, ColumnType::Text).not_null())
                    .col(string_len(Piece::CompositorImageUrl, 200).not_null())
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(Piece::Table).to_owned()).await
    }
}

#[derive(DeriveIden)]
pub(crate) enum Piece {
    Table,
    Id,
    PieceName,
    CompositorName,
    DurationMinutes,
    DateOfRelease,
    CompositorIsAlive,
    Instruments,
    DifficultyLevel,
    Styles,
    CompositorImageUrl,
}

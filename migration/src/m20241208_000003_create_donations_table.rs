//! Migration to create the donations table
//!
//! Donations reference one user and one event; deleting either parent
//! cascades to its donations, so no orphaned rows survive.

use sea_orm_migration::{prelude::*, schema::*};

use crate::m20241208_000001_create_users_table::Users;
use crate::m20241208_000002_create_events_table::Events;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Donations::Table)
                    .if_not_exists()
                    .col(pk_auto(Donations::Id))
                    .col(integer(Donations::UserId))
                    .col(integer(Donations::EventId))
                    .col(decimal_len(Donations::Amount, 10, 2))
                    .col(date(Donations::Date))
                    // pending | paid | failed
                    .col(string_len(Donations::Status, 16).default("pending"))
                    .col(timestamp(Donations::CreatedAt).default(Expr::current_timestamp()))
                    .col(timestamp(Donations::UpdatedAt).default(Expr::current_timestamp()))
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_donations_user_id")
                            .from(Donations::Table, Donations::UserId)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_donations_event_id")
                            .from(Donations::Table, Donations::EventId)
                            .to(Events::Table, Events::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_donations_event_id")
                    .table(Donations::Table)
                    .col(Donations::EventId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_donations_user_id")
                    .table(Donations::Table)
                    .col(Donations::UserId)
                    .to_owned(),
            )
            .await?;

        // The callback handler's conditional transition filters on status
        manager
            .create_index(
                Index::create()
                    .name("idx_donations_status")
                    .table(Donations::Table)
                    .col(Donations::Status)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Donations::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum Donations {
    Table,
    Id,
    UserId,
    EventId,
    Amount,
    Date,
    Status,
    CreatedAt,
    UpdatedAt,
}

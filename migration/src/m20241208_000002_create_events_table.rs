//! Migration to create the events table (fundraising campaigns)

use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Events::Table)
                    .if_not_exists()
                    .col(pk_auto(Events::Id))
                    .col(string(Events::Title))
                    .col(text(Events::Description))
                    .col(date(Events::Date))
                    .col(string_null(Events::Image))
                    .col(decimal_len(Events::DonationGoal, 12, 2))
                    .col(string(Events::Location))
                    // community | charity | environment
                    .col(string_len(Events::Category, 16))
                    .col(timestamp(Events::CreatedAt).default(Expr::current_timestamp()))
                    .col(timestamp(Events::UpdatedAt).default(Expr::current_timestamp()))
                    .to_owned(),
            )
            .await?;

        // Dashboard queries filter upcoming events by date
        manager
            .create_index(
                Index::create()
                    .name("idx_events_date")
                    .table(Events::Table)
                    .col(Events::Date)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Events::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum Events {
    Table,
    Id,
    Title,
    Description,
    Date,
    Image,
    DonationGoal,
    Location,
    Category,
    CreatedAt,
    UpdatedAt,
}

pub use sea_orm_migration::prelude::*;

mod m20241208_000001_create_users_table;
mod m20241208_000002_create_events_table;
mod m20241208_000003_create_donations_table;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20241208_000001_create_users_table::Migration),
            Box::new(m20241208_000002_create_events_table::Migration),
            Box::new(m20241208_000003_create_donations_table::Migration),
        ]
    }
}

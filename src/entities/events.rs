//! SeaORM Entity for the events table (fundraising campaigns)

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(16))")]
#[serde(rename_all = "lowercase")]
pub enum EventCategory {
    #[sea_orm(string_value = "community")]
    Community,
    #[sea_orm(string_value = "charity")]
    Charity,
    #[sea_orm(string_value = "environment")]
    Environment,
}

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "events")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub title: String,
    #[sea_orm(column_type = "Text")]
    pub description: String,
    /// Campaign deadline; events dated before today count as completed
    pub date: Date,
    /// Cover image URL supplied by the external file storage
    pub image: Option<String>,
    /// Fundraising target; non-negative
    #[sea_orm(column_type = "Decimal(Some((12, 2)))")]
    pub donation_goal: Decimal,
    pub location: String,
    pub category: EventCategory,
    pub created_at: DateTime,
    pub updated_at: DateTime,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::donations::Entity")]
    Donations,
}

impl Related<super::donations::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Donations.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

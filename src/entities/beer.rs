use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Persisted beer stock row
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "beers")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    #[sea_orm(unique)]
    pub name: String,
    pub brand: String,
    pub max_capacity: i32,
    pub quantity: i32,
    pub category: BeerType,
    pub version: i32,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

/// Beer style enumeration
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    EnumIter,
    DeriveActiveEnum,
    ToSchema,
)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(20))")]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum BeerType {
    #[sea_orm(string_value = "LAGER")]
    Lager,
    #[sea_orm(string_value = "MALZBIER")]
    Malzbier,
    #[sea_orm(string_value = "WITBIER")]
    Witbier,
    #[sea_orm(string_value = "WEISS")]
    Weiss,
    #[sea_orm(string_value = "ALE")]
    Ale,
    #[sea_orm(string_value = "IPA")]
    Ipa,
    #[sea_orm(string_value = "STOUT")]
    Stout,
}

use sea_orm::entity::prelude::*;

use super::enums::TripStatus;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "trips")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub tourist_id: Uuid,
    pub destination_id: Uuid,
    pub start_date: DateTimeWithTimeZone,
    pub end_date: DateTimeWithTimeZone,
    pub participants: i32,
    pub total_price: i64,
    pub status: TripStatus,
    pub notes: Option<String>,
    pub special_requests: Option<String>,
    pub rating: Option<i32>,
    pub review: Option<String>,
    pub created_by_id: Uuid,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::tourists::Entity",
        from = "Column::TouristId",
        to = "super::tourists::Column::Id",
        on_delete = "Cascade"
    )]
    Tourists,
    #[sea_orm(
        belongs_to = "super::destinations::Entity",
        from = "Column::DestinationId",
        to = "super::destinations::Column::Id"
    )]
    Destinations,
    #[sea_orm(
        belongs_to = "super::users::Entity",
        from = "Column::CreatedById",
        to = "super::users::Column::Id"
    )]
    CreatedBy,
    #[sea_orm(has_one = "super::payments::Entity")]
    Payments,
}

impl Related<super::tourists::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Tourists.def()
    }
}

impl Related<super::destinations::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Destinations.def()
    }
}

impl Related<super::payments::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Payments.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

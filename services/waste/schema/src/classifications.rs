use sea_orm::entity::prelude::*;

/// Classification result for one image. At most one row per image
/// (unique index on `image_id`); inserted only when classification
/// succeeds and never updated in place.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "classifications")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    #[sea_orm(unique)]
    pub image_id: Uuid,
    pub result: String,
    pub confidence: f64,
    pub waste_count: Option<i32>,
    pub created_at: chrono::DateTime<chrono::Utc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::submission_images::Entity",
        from = "Column::ImageId",
        to = "super::submission_images::Column::Id"
    )]
    Image,
}

impl Related<super::submission_images::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Image.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

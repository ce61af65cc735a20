//! Post entity for SeaORM.

use sea_orm::Set;
use sea_orm::entity::prelude::*;

use lostfound_core::domain::{BlobHandle, Location, PostStatus};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "posts")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    #[sea_orm(indexed)]
    pub owner_id: Uuid,
    pub title: String,
    #[sea_orm(column_type = "Text")]
    pub body_text: String,
    pub category: String,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub reward: Option<f64>,
    pub status: Status,
    pub image: Option<String>,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
    pub resolved_at: Option<DateTimeWithTimeZone>,
}

/// Stored post status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter, DeriveActiveEnum)]
#[sea_orm(rs_type = "String", db_type = "Text")]
pub enum Status {
    #[sea_orm(string_value = "active")]
    Active,
    #[sea_orm(string_value = "resolved")]
    Resolved,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl From<PostStatus> for Status {
    fn from(status: PostStatus) -> Self {
        match status {
            PostStatus::Active => Status::Active,
            PostStatus::Resolved => Status::Resolved,
        }
    }
}

impl From<Status> for PostStatus {
    fn from(status: Status) -> Self {
        match status {
            Status::Active => PostStatus::Active,
            Status::Resolved => PostStatus::Resolved,
        }
    }
}

/// Conversion from SeaORM Model to Domain Post.
impl From<Model> for lostfound_core::domain::Post {
    fn from(model: Model) -> Self {
        let location = match (model.latitude, model.longitude) {
            (Some(latitude), Some(longitude)) => Some(Location {
                latitude,
                longitude,
            }),
            _ => None,
        };

        Self {
            id: model.id,
            owner_id: model.owner_id,
            title: model.title,
            body_text: model.body_text,
            category: model.category,
            location,
            reward: model.reward,
            status: model.status.into(),
            image: model.image.map(BlobHandle::new),
            created_at: model.created_at.into(),
            updated_at: model.updated_at.into(),
            resolved_at: model.resolved_at.map(Into::into),
        }
    }
}

/// Conversion from Domain Post to SeaORM ActiveModel.
impl From<lostfound_core::domain::Post> for ActiveModel {
    fn from(post: lostfound_core::domain::Post) -> Self {
        Self {
            id: Set(post.id),
            owner_id: Set(post.owner_id),
            title: Set(post.title),
            body_text: Set(post.body_text),
            category: Set(post.category),
            latitude: Set(post.location.map(|l| l.latitude)),
            longitude: Set(post.location.map(|l| l.longitude)),
            reward: Set(post.reward),
            status: Set(post.status.into()),
            image: Set(post.image.map(BlobHandle::into_inner)),
            created_at: Set(post.created_at.into()),
            updated_at: Set(post.updated_at.into()),
            resolved_at: Set(post.resolved_at.map(Into::into)),
        }
    }
}

pub mod entity;
pub mod events;
pub mod repository;
pub mod rich_text;
pub mod value_objects;

pub use entity::{
    Article, ArticleExtra, ArticleUpdate, Dateline, EditLock, GeoPoint, Located, Subject,
};
pub use events::ArticleEvent;
pub use repository::{ArticleReadRepository, ArticleWriteRepository};
pub use rich_text::FieldsMeta;
pub use value_objects::{ArticleId, ContentType, FamilyId, UserId};

//! Domain model (posts, categories, excerpts, drafts, errors).

pub mod category;
pub mod draft;
pub mod errors;
pub mod excerpt;
pub mod post;

pub use self::category::{Category, CategoryFilter};
pub use self::draft::{ImageFile, PostDraft, ValidatedDraft};
pub use self::errors::{ConfigError, PublishError, StoreError, UploadError, ValidationError};
pub use self::post::{Post, PostId, PostRecord};

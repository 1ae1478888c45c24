//! Application logic - repository, authoring flow, builder.

pub mod builder;
pub mod publish;
pub mod repository;

pub use self::builder::{App, AppBuilder, BuildError};
pub use self::publish::Publisher;
pub use self::repository::PostRepository;

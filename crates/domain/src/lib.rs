mod error;
mod events;
mod models;

pub use error::CleanupError;
pub use events::CleanupEvent;
pub use models::{PostId, Role, SiteId, UserId, UserRecord};

pub mod errors;
pub mod id;

pub use errors::{ConfigError, TechxyError};
pub use id::{new_correlation_id, new_id, MessageId};

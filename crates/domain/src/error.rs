use crate::models::UserId;
use thiserror::Error;

/// 致命错误：任何一个都会在发生改动之前终止本次运行。
/// 平台调用本身的失败不在这里建模，直接以 anyhow 向上传播。
#[derive(Debug, Error)]
pub enum CleanupError {
    #[error("Please provide a valid user ID using --to=<user_id>.")]
    MissingPlaceholder,

    #[error("Invalid placeholder user ID: {0}")]
    InvalidPlaceholder(String),

    #[error("Placeholder user {0} does not exist in the network")]
    PlaceholderNotFound(UserId),
}

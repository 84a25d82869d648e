use gift_exchange_backend::DirectoryError;
use gift_exchange_config::ConfigError;

#[derive(thiserror::Error, Debug)]
pub enum AppError {
    #[error("{0}")]
    Config(#[from] ConfigError),
    #[error("directory error: {0}")]
    Directory(#[from] DirectoryError),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
}

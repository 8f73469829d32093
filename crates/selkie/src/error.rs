pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Invalid style definition at {path}: {message}")]
    InvalidStyleDefinition { path: String, message: String },
}

#[derive(Debug, thiserror::Error)]
pub enum RepositoryError {
    #[error("session storage unavailable: {0}")]
    Unavailable(String),
}

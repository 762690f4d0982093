#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("no route matches `{path}`")]
    UnknownRoute { path: String },
}

pub type Result<T> = std::result::Result<T, Error>;

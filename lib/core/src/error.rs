use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Malformed catalog source: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Catalog source contained no usable property records")]
    EmptyCatalog,

    #[error("Sampler returned index {index} for a population of {population}")]
    InvalidSample { index: usize, population: usize },

    #[error("Sampler returned {returned} indices, {requested} were requested")]
    ShortSample { returned: usize, requested: usize },
}

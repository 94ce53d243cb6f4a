use tesserae_core::{GridError, ProfileError};
use tesserae_game::{HintError, InteractionError};
use tesserae_generator::ParseSeedError;

#[derive(Debug, derive_more::Display, derive_more::Error, derive_more::From)]
pub enum AppError {
    #[display("I/O error: {_0}")]
    Io(#[from] std::io::Error),
    #[display("malformed save file: {_0}")]
    Json(#[from] serde_json::Error),
    #[display("malformed profile file: {_0}")]
    Toml(#[from] toml::de::Error),
    #[display("invalid grid: {_0}")]
    Grid(#[from] GridError),
    #[display("invalid difficulty profile: {_0}")]
    Profile(#[from] ProfileError),
    #[display("invalid seed: {_0}")]
    Seed(#[from] ParseSeedError),
    #[display("{_0}")]
    Interaction(#[from] InteractionError),
    #[display("{_0}")]
    Hint(#[from] HintError),
}

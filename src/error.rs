//! Error types.

use crate::backend::{FontError, RenderError, TextureError};
use crate::config::ConfigError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("font backend: {0}")]
    Font(#[from] FontError),

    #[error("texture backend: {0}")]
    Texture(#[from] TextureError),

    #[error("render backend: {0}")]
    Render(#[from] RenderError),

    #[error(transparent)]
    Config(#[from] ConfigError),
}

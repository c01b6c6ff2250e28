use super::*;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("failed to create the window: {0}")]
    Creation(#[from] glutin::CreationError),

    #[error("OpenGL context error: {0}")]
    Context(#[from] glutin::ContextError),

    #[error(transparent)]
    Glsl(#[from] GlslError),

    #[error("OpenGL error: {0}")]
    Gl(#[from] GlError),
}

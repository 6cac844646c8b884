use crate::gl::ShaderStage;

pub type Result<T> = std::result::Result<T, Error>;

/// Everything that can go wrong while building or reconfiguring an animation.
///
/// The first five variants only occur during construction and abort it; the
/// controller is never handed out half-built.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum Error {
    #[error("surface not found: {0}")]
    SurfaceNotFound(String),

    #[error("hardware-accelerated rendering context unavailable")]
    ContextUnavailable,

    #[error("failed to compile {stage} shader: {log}")]
    ShaderCompile { stage: ShaderStage, log: String },

    #[error("failed to link shader program: {log}")]
    ProgramLink { log: String },

    #[error("driver refused to allocate a {0}")]
    OutOfResources(&'static str),

    #[error("invalid color {0:?}: expected #rgb or #rrggbb")]
    InvalidColor(String),

    #[error("invalid options: {0}")]
    InvalidOptions(String),
}

impl Error {
    /// Name given to the `Error` object thrown on the JavaScript side.
    pub fn js_name(&self) -> &'static str {
        match self {
            Error::SurfaceNotFound(_) => "SurfaceNotFoundError",
            Error::ContextUnavailable => "ContextUnavailableError",
            Error::ShaderCompile { .. } => "ShaderCompileError",
            Error::ProgramLink { .. } => "ProgramLinkError",
            Error::OutOfResources(_) => "OutOfResourcesError",
            Error::InvalidColor(_) => "InvalidColorError",
            Error::InvalidOptions(_) => "InvalidOptionsError",
        }
    }
}

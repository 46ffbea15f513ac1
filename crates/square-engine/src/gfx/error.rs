use std::path::PathBuf;

use super::shader_source::ShaderStage;

/// Render-resource creation failures.
///
/// A resource that fails to build is never handed out; the error propagates
/// to whoever asked for it (usually an `on_enter` hook).
#[derive(thiserror::Error, Debug)]
pub enum GfxError {
    #[error("unable to read shader source {path}")]
    ShaderSource {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("unrecognised shader extension on {0}")]
    UnknownShaderExtension(PathBuf),

    #[error("shader program '{0}' has no stages")]
    EmptyProgram(String),

    #[error("failed to compile {stage:?} stage of shader '{name}': {log}")]
    Compile {
        name: String,
        stage: ShaderStage,
        log: String,
    },

    #[error("failed to link shader '{name}': {log}")]
    Link { name: String, log: String },

    #[error("could not read image {path}")]
    ImageDecode {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },
}

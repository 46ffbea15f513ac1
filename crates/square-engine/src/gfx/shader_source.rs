use std::path::Path;

use anyhow::{Context, Result};

use super::error::GfxError;

/// Programmable pipeline stage.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum ShaderStage {
    Vertex,
    TessControl,
    TessEvaluation,
    Geometry,
    Fragment,
    Compute,
}

impl ShaderStage {
    pub const ALL: [ShaderStage; 6] = [
        ShaderStage::Vertex,
        ShaderStage::TessControl,
        ShaderStage::TessEvaluation,
        ShaderStage::Geometry,
        ShaderStage::Fragment,
        ShaderStage::Compute,
    ];

    /// File extension (without the dot) used for this stage's source.
    pub const fn extension(self) -> &'static str {
        match self {
            ShaderStage::Vertex => "vert",
            ShaderStage::TessControl => "tesc",
            ShaderStage::TessEvaluation => "tese",
            ShaderStage::Geometry => "geom",
            ShaderStage::Fragment => "frag",
            ShaderStage::Compute => "comp",
        }
    }

    pub fn from_extension(ext: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|s| s.extension() == ext)
    }
}

/// Source text for one stage.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct ShaderSource {
    pub stage: ShaderStage,
    pub src: String,
}

impl ShaderSource {
    pub fn new(stage: ShaderStage, src: impl Into<String>) -> Self {
        Self {
            stage,
            src: src.into(),
        }
    }

    /// Reads one source file; the stage comes from its extension.
    pub fn from_file(path: &Path) -> Result<Self> {
        let stage = path
            .extension()
            .and_then(|e| e.to_str())
            .and_then(ShaderStage::from_extension)
            .ok_or_else(|| GfxError::UnknownShaderExtension(path.to_path_buf()))?;

        let src = std::fs::read_to_string(path).map_err(|source| GfxError::ShaderSource {
            path: path.to_path_buf(),
            source,
        })?;

        Ok(Self { stage, src })
    }
}

/// Loads every stage source in `dir`, ordered by file name.
///
/// Any file with an unrecognised extension is an error.
pub fn read_shader_dir(dir: &Path) -> Result<Vec<ShaderSource>> {
    let entries = std::fs::read_dir(dir)
        .with_context(|| format!("failed to list shader directory {}", dir.display()))?;

    let mut paths = Vec::new();
    for entry in entries {
        let entry = entry.with_context(|| format!("failed to list shader directory {}", dir.display()))?;
        let path = entry.path();
        if path.is_file() {
            paths.push(path);
        }
    }
    paths.sort();

    paths.iter().map(|p| ShaderSource::from_file(p)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn scratch_dir(name: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!("square-shader-{}-{}", name, std::process::id()));
        let _ = std::fs::remove_dir_all(&dir);
        std::fs::create_dir_all(&dir).unwrap();
        dir
    }

    #[test]
    fn extensions_round_trip() {
        for stage in ShaderStage::ALL {
            assert_eq!(ShaderStage::from_extension(stage.extension()), Some(stage));
        }
        assert_eq!(ShaderStage::from_extension("glsl"), None);
    }

    #[test]
    fn reads_directory_sorted_by_name() {
        let dir = scratch_dir("sorted");
        std::fs::write(dir.join("shader.vert"), "void main() {}").unwrap();
        std::fs::write(dir.join("shader.frag"), "void main() { frag }").unwrap();

        let sources = read_shader_dir(&dir).unwrap();

        let stages: Vec<_> = sources.iter().map(|s| s.stage).collect();
        assert_eq!(stages, vec![ShaderStage::Fragment, ShaderStage::Vertex]);
        assert!(sources[0].src.contains("frag"));

        std::fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn unknown_extension_is_an_error() {
        let dir = scratch_dir("unknown");
        std::fs::write(dir.join("notes.txt"), "hello").unwrap();

        let err = read_shader_dir(&dir).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<GfxError>(),
            Some(GfxError::UnknownShaderExtension(_))
        ));

        std::fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn missing_directory_is_an_error() {
        let dir = std::env::temp_dir().join("square-shader-does-not-exist");
        assert!(read_shader_dir(&dir).is_err());
    }
}

//! Configuration structures for the inparse pipeline.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::InparseError;

/// Environment variable selecting the listening port.
pub const PORT_ENV: &str = "PORT";

/// Main configuration for the inparse pipeline.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct InparseConfig {
    /// HTTP upload server configuration.
    pub server: ServerConfig,

    /// PDF processing configuration.
    pub pdf: PdfConfig,

    /// OCR engine configuration.
    pub ocr: OcrConfig,

    /// Model configuration.
    pub models: ModelConfig,
}

/// HTTP upload server configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Address to bind.
    pub host: String,

    /// Port to listen on.
    pub port: u16,

    /// Largest accepted file, in bytes.
    pub max_upload_bytes: usize,

    /// Multipart form field carrying the file.
    pub upload_field: String,

    /// Directory served as static files (index.html as directory index).
    pub static_dir: Option<PathBuf>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 3000,
            max_upload_bytes: 10 * 1024 * 1024,
            upload_field: "invoice".to_string(),
            static_dir: None,
        }
    }
}

impl ServerConfig {
    /// Override the port from the `PORT` environment variable, if set.
    pub fn apply_env(&mut self) {
        let value = std::env::var(PORT_ENV).ok();
        self.apply_port_override(value.as_deref());
    }

    /// Override the port from a raw value. Unparseable values are ignored.
    pub fn apply_port_override(&mut self, value: Option<&str>) {
        if let Some(port) = value.and_then(|v| v.trim().parse::<u16>().ok()) {
            self.port = port;
        }
    }
}

/// PDF processing configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PdfConfig {
    /// Try the empty password on encrypted PDFs.
    pub allow_empty_password: bool,
}

impl Default for PdfConfig {
    fn default() -> Self {
        Self {
            allow_empty_password: true,
        }
    }
}

/// OCR engine configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OcrConfig {
    /// Keep `[UNK]` markers for unrecognized glyphs instead of blanking them.
    pub keep_unk: bool,

    /// Vertical distance, in pixels, within which boxes share a line.
    pub line_tolerance: f32,
}

impl Default for OcrConfig {
    fn default() -> Self {
        Self {
            keep_unk: false,
            line_tolerance: 20.0,
        }
    }
}

/// Model file paths and download location.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ModelConfig {
    /// Directory containing model files.
    pub model_dir: PathBuf,

    /// Text detection model file name.
    pub detection_model: String,

    /// Text recognition model file name.
    pub recognition_model: String,

    /// Character dictionary file name.
    pub dictionary: String,

    /// Base URL the model files are downloaded from.
    pub source_url: String,
}

impl Default for ModelConfig {
    fn default() -> Self {
        Self {
            model_dir: PathBuf::from("models"),
            detection_model: "det.onnx".to_string(),
            recognition_model: "latin_rec.onnx".to_string(),
            dictionary: "latin_dict.txt".to_string(),
            source_url: "https://github.com/jakubmatias/incr/raw/main/models/mobile".to_string(),
        }
    }
}

impl ModelConfig {
    /// File names of every model this configuration needs.
    pub fn files(&self) -> [&str; 3] {
        [
            self.detection_model.as_str(),
            self.recognition_model.as_str(),
            self.dictionary.as_str(),
        ]
    }

    /// The same configuration pointed at another directory.
    pub fn with_model_dir(mut self, model_dir: impl Into<PathBuf>) -> Self {
        self.model_dir = model_dir.into();
        self
    }
}

impl InparseConfig {
    /// Load configuration from a JSON file.
    pub fn from_file(path: &Path) -> Result<Self, InparseError> {
        let content = std::fs::read_to_string(path)?;
        serde_json::from_str(&content)
            .map_err(|e| InparseError::Config(format!("{}: {}", path.display(), e)))
    }

    /// Save configuration to a JSON file.
    pub fn save(&self, path: &Path) -> Result<(), InparseError> {
        let content = serde_json::to_string_pretty(self)
            .map_err(|e| InparseError::Config(e.to_string()))?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Get full path to a model file.
    pub fn model_path(&self, model_name: &str) -> PathBuf {
        self.models.model_dir.join(model_name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_defaults() {
        let config = InparseConfig::default();
        assert_eq!(config.server.port, 3000);
        assert_eq!(config.server.max_upload_bytes, 10 * 1024 * 1024);
        assert_eq!(config.server.upload_field, "invoice");
        assert!(config.pdf.allow_empty_password);
        assert_eq!(
            config.model_path("det.onnx"),
            PathBuf::from("models").join("det.onnx")
        );
    }

    #[test]
    fn test_partial_file() {
        let config: InparseConfig =
            serde_json::from_str(r#"{"server": {"port": 8080}}"#).unwrap();
        assert_eq!(config.server.port, 8080);
        assert_eq!(config.server.upload_field, "invoice");
        assert_eq!(config.models.detection_model, "det.onnx");
    }

    #[test]
    fn test_port_override() {
        let mut server = ServerConfig::default();
        server.apply_port_override(Some("8081"));
        assert_eq!(server.port, 8081);

        server.apply_port_override(Some("not-a-port"));
        assert_eq!(server.port, 8081);

        server.apply_port_override(None);
        assert_eq!(server.port, 8081);
    }

    #[test]
    fn test_save_and_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");

        let mut config = InparseConfig::default();
        config.server.static_dir = Some(PathBuf::from("public"));
        config.save(&path).unwrap();

        let loaded = InparseConfig::from_file(&path).unwrap();
        assert_eq!(loaded.server.static_dir, Some(PathBuf::from("public")));
    }

    #[test]
    fn test_invalid_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        std::fs::write(&path, "{ not json").unwrap();

        assert!(matches!(
            InparseConfig::from_file(&path),
            Err(InparseError::Config(_))
        ));
    }
}

//! Model asset management
//!
//! Handles downloading, caching, and locating the ONNX models and the
//! AudioSet class-name table. Assets are fetched on first use and cached in
//! `~/.cache/earshot/models/`. A failed fetch at startup is fatal: the
//! service refuses to come up without its models.

use std::fs;
use std::io::{Read, Write};
use std::path::{Path, PathBuf};

use crate::error::{ModelError, ModelResult};

/// Downloadable model assets
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModelAsset {
    /// emotion2vec classification head (~90 MB), 9-class utterance emotion
    EmotionHead,
    /// YAMNet audio-event model (~17 MB), 521 AudioSet classes with per-frame scores
    SceneEvents,
    /// AudioSet class-name table (CSV: index,mid,display_name)
    SceneClassMap,
}

impl ModelAsset {
    /// Filename for caching
    pub fn filename(&self) -> &'static str {
        match self {
            ModelAsset::EmotionHead => "emotion2vec-plus-base.onnx",
            ModelAsset::SceneEvents => "yamnet.onnx",
            ModelAsset::SceneClassMap => "yamnet_class_map.csv",
        }
    }

    /// Download URL
    pub fn download_url(&self) -> &'static str {
        match self {
            ModelAsset::EmotionHead => "https://huggingface.co/emotion2vec/emotion2vec_plus_base/resolve/main/emotion2vec_plus_base.onnx",
            ModelAsset::SceneEvents => "https://huggingface.co/onnx-community/yamnet/resolve/main/onnx/model.onnx",
            ModelAsset::SceneClassMap => "https://raw.githubusercontent.com/tensorflow/models/master/research/audioset/yamnet/yamnet_class_map.csv",
        }
    }

    /// Human-readable name for logs
    pub fn display_name(&self) -> &'static str {
        match self {
            ModelAsset::EmotionHead => "Emotion2vec Head",
            ModelAsset::SceneEvents => "YAMNet Events",
            ModelAsset::SceneClassMap => "AudioSet Class Map",
        }
    }
}

/// Manages model asset downloads and caching
pub struct ModelManager {
    cache_dir: PathBuf,
}

impl ModelManager {
    /// Create with the default cache directory: `~/.cache/earshot/models/`
    pub fn new() -> ModelResult<Self> {
        let base = dirs::cache_dir().ok_or(ModelError::NoCacheDir)?;
        Ok(Self {
            cache_dir: base.join("earshot").join("models"),
        })
    }

    /// Create with a custom cache directory (config override, tests)
    pub fn with_cache_dir(cache_dir: PathBuf) -> Self {
        Self { cache_dir }
    }

    /// Local path for an asset
    pub fn asset_path(&self, asset: ModelAsset) -> PathBuf {
        self.cache_dir.join(asset.filename())
    }

    /// Check if an asset is already downloaded
    pub fn is_available(&self, asset: ModelAsset) -> bool {
        self.asset_path(asset).exists()
    }

    /// Get an asset's path, downloading it if necessary.
    pub fn ensure(&self, asset: ModelAsset) -> ModelResult<PathBuf> {
        let path = self.asset_path(asset);

        if path.exists() {
            log::info!("{} found at {:?}", asset.display_name(), path);
            return Ok(path);
        }

        log::info!(
            "Downloading {} from {}",
            asset.display_name(),
            asset.download_url()
        );
        self.download(asset.download_url(), &path)?;
        Ok(path)
    }

    /// Load the class-name table, downloading it first if missing.
    pub fn load_class_map(&self) -> ModelResult<Vec<String>> {
        let path = self.ensure(ModelAsset::SceneClassMap)?;
        let text = fs::read_to_string(&path)?;
        parse_class_map(&text)
    }

    /// Download a file to the target path with atomic rename and size check.
    fn download(&self, url: &str, target_path: &Path) -> ModelResult<()> {
        fs::create_dir_all(&self.cache_dir)?;

        let temp_path = target_path.with_extension("tmp");

        let response = ureq::get(url).call().map_err(|e| ModelError::DownloadFailed {
            url: url.to_string(),
            reason: e.to_string(),
        })?;

        let content_length: Option<u64> = response
            .header("Content-Length")
            .and_then(|s| s.parse().ok());

        let mut file = fs::File::create(&temp_path)?;
        let mut reader = response.into_reader();
        let mut buffer = [0u8; 8192];
        let mut downloaded: u64 = 0;

        loop {
            let bytes_read = reader.read(&mut buffer)?;
            if bytes_read == 0 {
                break;
            }
            file.write_all(&buffer[..bytes_read])?;
            downloaded += bytes_read as u64;
        }

        file.flush()?;
        drop(file);

        if let Some(expected) = content_length {
            if downloaded != expected {
                fs::remove_file(&temp_path).ok();
                return Err(ModelError::DownloadFailed {
                    url: url.to_string(),
                    reason: format!("incomplete: expected {} bytes, got {}", expected, downloaded),
                });
            }
        }

        fs::rename(&temp_path, target_path)?;
        log::info!("Downloaded {:?} ({} bytes)", target_path.file_name().unwrap_or_default(), downloaded);

        Ok(())
    }
}

/// Parse the AudioSet class map CSV (`index,mid,display_name`).
///
/// The first line is a header. Display names may be quoted and contain
/// commas ("Child speech, kid speaking"); the first two fields never do.
pub fn parse_class_map(text: &str) -> ModelResult<Vec<String>> {
    let mut names = Vec::new();
    for (lineno, line) in text.lines().enumerate() {
        if lineno == 0 || line.trim().is_empty() {
            continue;
        }
        let name = line
            .splitn(3, ',')
            .nth(2)
            .ok_or_else(|| ModelError::ClassMapParse {
                line: lineno + 1,
                reason: "expected 3 comma-separated fields".to_string(),
            })?;
        names.push(unquote(name.trim()).to_string());
    }
    Ok(names)
}

/// Strip surrounding double quotes from a CSV field, if present.
fn unquote(field: &str) -> &str {
    field
        .strip_prefix('"')
        .and_then(|s| s.strip_suffix('"'))
        .unwrap_or(field)
}

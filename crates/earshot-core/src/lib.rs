//! Earshot core library
//!
//! Everything the HTTP service needs apart from the server itself:
//!
//! - **PCM decoding** (`pcm`): raw little-endian float32 request bodies
//! - **Label tables** (`labels`): emotion vocabulary + scene bucket taxonomy
//! - **Classifiers** (`emotion`, `scene`): post-processing around the
//!   pretrained models (label collapse, renormalization, argmax)
//! - **Model layer** (`model`): `UtteranceModel`/`FrameModel` seams, the
//!   ort-backed implementations, and asset download/caching
//! - **Configuration** (`config`): YAML service config

pub mod config;
pub mod emotion;
pub mod error;
pub mod labels;
pub mod model;
pub mod pcm;
pub mod result;
pub mod scene;

pub use config::ServiceConfig;
pub use emotion::EmotionClassifier;
pub use error::{ModelError, ModelResult};
pub use model::{FrameModel, ModelAsset, ModelManager, Utterance, UtteranceModel};
pub use result::Classification;
pub use scene::SceneClassifier;

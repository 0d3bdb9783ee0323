//! Model abstractions and backends
//!
//! The pretrained models are opaque collaborators. `UtteranceModel` and
//! `FrameModel` are the seams between them and the score post-processing
//! layer: the ort-backed implementations live in `onnx`, asset download and
//! caching in `manager`, and tests drive the classifiers through canned
//! implementations of the same traits.

pub mod manager;
pub mod onnx;

use crate::error::ModelResult;

pub use manager::{ModelAsset, ModelManager};
pub use onnx::{OnnxFrameModel, OnnxUtteranceModel};

/// One utterance-level prediction: parallel label and score lists.
///
/// The two lists are not guaranteed to have equal length; the emotion
/// classifier defaults missing scores to 0.0.
#[derive(Debug, Clone)]
pub struct Utterance {
    pub labels: Vec<String>,
    pub scores: Vec<f32>,
}

/// Utterance-level model: one prediction set for an entire clip.
pub trait UtteranceModel: Send + Sync {
    fn infer(&self, samples: &[f32]) -> ModelResult<Vec<Utterance>>;
}

/// Frame-level model: a score matrix with one row per frame and one column
/// per fine-grained class.
pub trait FrameModel: Send + Sync {
    fn infer(&self, samples: &[f32]) -> ModelResult<Vec<Vec<f32>>>;
}

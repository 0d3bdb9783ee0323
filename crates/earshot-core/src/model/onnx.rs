//! ort-backed model implementations
//!
//! Sessions are created once at startup and shared read-only for the life of
//! the process. `Session::run` takes `&mut self`, so each session sits behind
//! a `Mutex` and concurrent calls against the same model serialize on the
//! lock; the service does not add parallelism the runtime can't deliver.

use std::path::Path;
use std::sync::Mutex;

use ndarray::{Array1, Array2};
use ort::session::Session;
use ort::value::Tensor;

use crate::error::{ModelError, ModelResult};
use crate::model::{FrameModel, Utterance, UtteranceModel};

/// Input tensor name of the emotion2vec ONNX export
const EMOTION_INPUT: &str = "input";

/// Input tensor name of the YAMNet ONNX export
const EVENTS_INPUT: &str = "waveform";

/// emotion2vec head output labels (exact model output order)
fn emotion_head_labels() -> Vec<String> {
    [
        "angry", "disgusted", "fearful", "happy", "neutral",
        "other", "sad", "surprised", "unknown",
    ]
    .iter()
    .map(|s| s.to_string())
    .collect()
}

fn load_session(path: &Path) -> ModelResult<Session> {
    Session::builder()
        .and_then(|b| b.with_intra_threads(1))
        .and_then(|b| b.commit_from_file(path))
        .map_err(|e| ModelError::SessionLoad(e.to_string()))
}

/// Utterance-level emotion model: waveform in, one score per emotion class
/// out. The head emits logits; they are converted to probabilities here so
/// downstream code always sees a distribution.
pub struct OnnxUtteranceModel {
    session: Mutex<Session>,
    labels: Vec<String>,
}

impl OnnxUtteranceModel {
    pub fn load(path: &Path) -> ModelResult<Self> {
        Ok(Self {
            session: Mutex::new(load_session(path)?),
            labels: emotion_head_labels(),
        })
    }
}

impl UtteranceModel for OnnxUtteranceModel {
    fn infer(&self, samples: &[f32]) -> ModelResult<Vec<Utterance>> {
        // Model expects [batch=1, samples] mono float32 at 16 kHz
        let input = Array2::from_shape_vec((1, samples.len()), samples.to_vec())
            .map_err(|e| ModelError::Tensor(e.to_string()))?;
        let tensor = Tensor::from_array(input).map_err(|e| ModelError::Tensor(e.to_string()))?;

        let mut session = self
            .session
            .lock()
            .map_err(|_| ModelError::Inference("session mutex poisoned".to_string()))?;
        let outputs = session
            .run(ort::inputs![EMOTION_INPUT => tensor])
            .map_err(|e| ModelError::Inference(e.to_string()))?;

        let (_, value) = outputs
            .iter()
            .next()
            .ok_or_else(|| ModelError::Inference("model produced no output".to_string()))?;
        let (_shape, logits) = value
            .try_extract_tensor::<f32>()
            .map_err(|e| ModelError::Tensor(e.to_string()))?;

        Ok(vec![Utterance {
            labels: self.labels.clone(),
            scores: softmax(logits),
        }])
    }
}

/// Frame-level audio-event model: waveform in, [frames, classes] scores out.
pub struct OnnxFrameModel {
    session: Mutex<Session>,
}

impl OnnxFrameModel {
    pub fn load(path: &Path) -> ModelResult<Self> {
        Ok(Self {
            session: Mutex::new(load_session(path)?),
        })
    }
}

impl FrameModel for OnnxFrameModel {
    fn infer(&self, samples: &[f32]) -> ModelResult<Vec<Vec<f32>>> {
        // YAMNet takes a bare [samples] waveform, mono float32 at 16 kHz
        let input = Array1::from_vec(samples.to_vec());
        let tensor = Tensor::from_array(input).map_err(|e| ModelError::Tensor(e.to_string()))?;

        let mut session = self
            .session
            .lock()
            .map_err(|_| ModelError::Inference("session mutex poisoned".to_string()))?;
        let outputs = session
            .run(ort::inputs![EVENTS_INPUT => tensor])
            .map_err(|e| ModelError::Inference(e.to_string()))?;

        // First output is the per-frame class score matrix
        let (_, value) = outputs
            .iter()
            .next()
            .ok_or_else(|| ModelError::Inference("model produced no output".to_string()))?;
        let (shape, data) = value
            .try_extract_tensor::<f32>()
            .map_err(|e| ModelError::Tensor(e.to_string()))?;

        let dims: Vec<i64> = shape.iter().copied().collect();
        let (n_frames, n_classes) = match dims.as_slice() {
            [frames, classes] => (*frames as usize, *classes as usize),
            // Some exports squeeze a single frame down to one dimension
            [classes] => (1, *classes as usize),
            _ => {
                return Err(ModelError::OutputShape(format!(
                    "expected [frames, classes], got {:?}",
                    dims
                )))
            }
        };

        if n_frames * n_classes != data.len() {
            return Err(ModelError::OutputShape(format!(
                "shape {:?} does not match {} values",
                dims,
                data.len()
            )));
        }

        Ok(data.chunks(n_classes.max(1)).map(|row| row.to_vec()).collect())
    }
}

/// Convert logits to probabilities (numerically stable softmax).
fn softmax(logits: &[f32]) -> Vec<f32> {
    let max = logits.iter().copied().fold(f32::NEG_INFINITY, f32::max);
    if !max.is_finite() {
        return Vec::new();
    }
    let exps: Vec<f32> = logits.iter().map(|&v| (v - max).exp()).collect();
    let sum: f32 = exps.iter().sum();
    if sum > 0.0 {
        exps.iter().map(|&e| e / sum).collect()
    } else {
        exps
    }
}

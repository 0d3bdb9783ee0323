//! Acoustic scene/event classification
//!
//! Wraps a pretrained multi-class audio-event model. The model scores
//! several hundred fine-grained classes per frame; the classifier averages
//! those scores across time, collapses the taxonomy into the five
//! application buckets by keyword-set membership, and renormalizes.

use std::collections::BTreeMap;
use std::time::Instant;

use crate::error::ModelResult;
use crate::labels::{bucket_for, SCENE_BUCKETS};
use crate::model::FrameModel;
use crate::result::{round2, round4, Classification};

/// Scene classifier holding one pretrained audio-event model and the class
/// name table loaded at startup.
pub struct SceneClassifier {
    model: Box<dyn FrameModel>,
    class_names: Vec<String>,
}

impl SceneClassifier {
    pub fn new(model: Box<dyn FrameModel>, class_names: Vec<String>) -> Self {
        Self { model, class_names }
    }

    /// Classify the full waveform.
    ///
    /// `latency_ms` covers the model call only. An all-zero distribution is
    /// left all-zero rather than renormalized.
    pub fn classify(&self, samples: &[f32]) -> ModelResult<Classification> {
        let t0 = Instant::now();
        let frames = self.model.infer(samples)?;
        let latency_ms = t0.elapsed().as_secs_f64() * 1000.0;

        let class_scores = average_frames(&frames);

        // Collapse the fine-grained taxonomy into buckets, keeping the
        // declared bucket order for a deterministic argmax.
        let mut buckets: Vec<(&'static str, f32)> =
            SCENE_BUCKETS.iter().map(|b| (*b, 0.0f32)).collect();
        for (i, &score) in class_scores.iter().enumerate() {
            let name = self.class_names.get(i).map(String::as_str).unwrap_or("");
            let bucket = bucket_for(name).unwrap_or("other");
            if let Some(entry) = buckets.iter_mut().find(|(b, _)| *b == bucket) {
                entry.1 += score;
            }
        }

        let total: f32 = buckets.iter().map(|(_, s)| s).sum();
        if total > 0.0 {
            for (_, score) in &mut buckets {
                *score /= total;
            }
        }

        let mut best = buckets[0];
        for &entry in &buckets[1..] {
            if entry.1 > best.1 {
                best = entry;
            }
        }

        let scores: BTreeMap<String, f32> = buckets
            .iter()
            .map(|(bucket, score)| (bucket.to_string(), round4(*score)))
            .collect();

        Ok(Classification {
            label: best.0.to_string(),
            confidence: round4(best.1),
            scores,
            latency_ms: round2(latency_ms),
        })
    }
}

/// Average frame-level scores across time: one score per class.
fn average_frames(frames: &[Vec<f32>]) -> Vec<f32> {
    if frames.is_empty() {
        return Vec::new();
    }
    let dim = frames[0].len();
    let n = frames.len() as f32;
    let mut avg = vec![0.0f32; dim];
    for frame in frames {
        for (i, &v) in frame.iter().enumerate() {
            if i < dim {
                avg[i] += v;
            }
        }
    }
    for v in &mut avg {
        *v /= n;
    }
    avg
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Model returning a canned score matrix
    struct FixedModel(Vec<Vec<f32>>);

    impl FrameModel for FixedModel {
        fn infer(&self, _samples: &[f32]) -> ModelResult<Vec<Vec<f32>>> {
            Ok(self.0.clone())
        }
    }

    fn classify_with(frames: Vec<Vec<f32>>, class_names: &[&str]) -> Classification {
        let names = class_names.iter().map(|s| s.to_string()).collect();
        let classifier = SceneClassifier::new(Box::new(FixedModel(frames)), names);
        classifier.classify(&[0.0; 16]).unwrap()
    }

    #[test]
    fn test_engine_accrues_to_noise() {
        let result = classify_with(vec![vec![0.6, 0.2]], &["Engine", "Speech"]);
        assert_eq!(result.label, "noise");
        assert_eq!(result.scores.get("noise"), Some(&0.75));
        assert_eq!(result.scores.get("speech"), Some(&0.25));
    }

    #[test]
    fn test_singing_accrues_to_music() {
        let result = classify_with(vec![vec![1.0]], &["Singing"]);
        assert_eq!(result.label, "music");
        assert_eq!(result.scores.get("music"), Some(&1.0));
    }

    #[test]
    fn test_unrecognized_class_accrues_to_other() {
        let result = classify_with(vec![vec![1.0]], &["Dog barking"]);
        assert_eq!(result.label, "other");
        assert_eq!(result.scores.get("other"), Some(&1.0));
    }

    #[test]
    fn test_scores_sum_to_one() {
        let result = classify_with(
            vec![vec![0.4, 0.3, 0.2, 0.1]],
            &["Speech", "Music", "Engine", "Dog barking"],
        );
        let sum: f32 = result.scores.values().sum();
        assert!((sum - 1.0).abs() < 1e-3, "bucket scores should sum to ~1, got {}", sum);
    }

    #[test]
    fn test_all_zero_stays_all_zero() {
        let result = classify_with(vec![vec![0.0, 0.0]], &["Speech", "Engine"]);
        for (bucket, score) in &result.scores {
            assert_eq!(*score, 0.0, "bucket {} should stay zero", bucket);
            assert!(!score.is_nan());
        }
        // Argmax over all-zero resolves to the first declared bucket
        assert_eq!(result.label, "speech");
        assert_eq!(result.confidence, 0.0);
    }

    #[test]
    fn test_frame_scores_averaged_over_time() {
        let result = classify_with(
            vec![vec![1.0, 0.0], vec![0.0, 1.0]],
            &["Speech", "Engine"],
        );
        assert_eq!(result.scores.get("speech"), Some(&0.5));
        assert_eq!(result.scores.get("noise"), Some(&0.5));
    }

    #[test]
    fn test_empty_frames_yield_zero_distribution() {
        let result = classify_with(Vec::new(), &["Speech"]);
        assert_eq!(result.scores.len(), SCENE_BUCKETS.len());
        assert!(result.scores.values().all(|&s| s == 0.0));
    }

    #[test]
    fn test_all_buckets_present_in_scores() {
        let result = classify_with(vec![vec![1.0]], &["Speech"]);
        for bucket in SCENE_BUCKETS {
            assert!(result.scores.contains_key(bucket), "{} missing", bucket);
        }
    }

    #[test]
    fn test_class_beyond_name_table_counts_as_other() {
        // Two scores but only one known class name
        let result = classify_with(vec![vec![0.5, 0.5]], &["Speech"]);
        assert_eq!(result.scores.get("speech"), Some(&0.5));
        assert_eq!(result.scores.get("other"), Some(&0.5));
    }

    #[test]
    fn test_average_frames_empty() {
        assert!(average_frames(&[]).is_empty());
    }
}

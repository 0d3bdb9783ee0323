//! Utterance-level emotion classification
//!
//! Wraps a pretrained emotion model and repackages its raw output into the
//! fixed application vocabulary. The model is opaque: it hands back parallel
//! label and score lists whose ordering contract is unspecified, so labels
//! are matched literally first and by output position second. The positional
//! fallback silently misaligns if the model's label ordering ever changes;
//! kept as-is for wire compatibility with the upstream gateway.

use std::collections::BTreeMap;
use std::time::Instant;

use crate::error::ModelResult;
use crate::labels::EMOTION_LABELS;
use crate::model::UtteranceModel;
use crate::result::{round2, round4, Classification};

/// Emotion classifier holding one pretrained utterance-level model.
pub struct EmotionClassifier {
    model: Box<dyn UtteranceModel>,
}

impl EmotionClassifier {
    pub fn new(model: Box<dyn UtteranceModel>) -> Self {
        Self { model }
    }

    /// Classify one utterance.
    ///
    /// `latency_ms` covers the model call only, not decoding or
    /// post-processing. An empty model result falls back to
    /// `{neutral: 1.0}`.
    pub fn classify(&self, samples: &[f32]) -> ModelResult<Classification> {
        let t0 = Instant::now();
        let predictions = self.model.infer(samples)?;
        let latency_ms = t0.elapsed().as_secs_f64() * 1000.0;

        let (labels, raw_scores) = match predictions.into_iter().next() {
            Some(utterance) => (utterance.labels, utterance.scores),
            None => (Vec::new(), Vec::new()),
        };

        let mut scores = BTreeMap::new();
        for (i, label) in labels.iter().enumerate() {
            // Literal match first; otherwise map the output position onto the
            // vocabulary. Out-of-range positions keep the model's own label.
            let mapped = if EMOTION_LABELS.contains(&label.as_str()) {
                label.clone()
            } else if i < EMOTION_LABELS.len() {
                EMOTION_LABELS[i].to_string()
            } else {
                label.clone()
            };
            let score = raw_scores.get(i).copied().unwrap_or(0.0);
            scores.insert(mapped, round4(score));
        }

        if scores.is_empty() {
            log::debug!("emotion model returned no usable output, falling back to neutral");
            scores.insert("neutral".to_string(), 1.0);
        }

        let (label, confidence) =
            argmax(&scores).unwrap_or_else(|| ("neutral".to_string(), 1.0));

        Ok(Classification {
            label,
            confidence,
            scores,
            latency_ms: round2(latency_ms),
        })
    }
}

/// Highest-scoring entry; ties resolve to the first in map order.
fn argmax(scores: &BTreeMap<String, f32>) -> Option<(String, f32)> {
    let mut best: Option<(&String, f32)> = None;
    for (label, &score) in scores {
        if best.map_or(true, |(_, b)| score > b) {
            best = Some((label, score));
        }
    }
    best.map(|(label, score)| (label.clone(), score))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Utterance;

    /// Model returning a canned prediction list
    struct FixedModel(Vec<Utterance>);

    impl UtteranceModel for FixedModel {
        fn infer(&self, _samples: &[f32]) -> ModelResult<Vec<Utterance>> {
            Ok(self.0.clone())
        }
    }

    fn classify_with(predictions: Vec<Utterance>) -> Classification {
        let classifier = EmotionClassifier::new(Box::new(FixedModel(predictions)));
        classifier.classify(&[0.0; 16]).unwrap()
    }

    #[test]
    fn test_literal_labels_pass_through() {
        let result = classify_with(vec![Utterance {
            labels: vec!["happy".to_string(), "angry".to_string()],
            scores: vec![0.3, 0.7],
        }]);
        assert_eq!(result.label, "angry");
        assert_eq!(result.confidence, 0.7);
        assert_eq!(result.scores.get("happy"), Some(&0.3));
        assert_eq!(result.scores.get("angry"), Some(&0.7));
        // Unlisted vocabulary entries stay absent
        assert_eq!(result.scores.len(), 2);
        assert!(!result.scores.contains_key("neutral"));
    }

    #[test]
    fn test_empty_output_falls_back_to_neutral() {
        let result = classify_with(Vec::new());
        assert_eq!(result.label, "neutral");
        assert_eq!(result.confidence, 1.0);
        assert_eq!(result.scores.len(), 1);
        assert_eq!(result.scores.get("neutral"), Some(&1.0));
    }

    #[test]
    fn test_positional_fallback_for_unknown_labels() {
        // "elated" is not in the vocabulary; position 0 maps to "neutral"
        let result = classify_with(vec![Utterance {
            labels: vec!["elated".to_string(), "angry".to_string()],
            scores: vec![0.6, 0.4],
        }]);
        assert_eq!(result.scores.get("neutral"), Some(&0.6));
        assert_eq!(result.scores.get("angry"), Some(&0.4));
        assert_eq!(result.label, "neutral");
    }

    #[test]
    fn test_out_of_range_position_keeps_model_label() {
        let labels: Vec<String> = (0..7).map(|i| format!("cls{}", i)).collect();
        let scores: Vec<f32> = vec![0.1; 7];
        let result = classify_with(vec![Utterance { labels, scores }]);
        // Position 6 is past the vocabulary; the literal label survives
        assert!(result.scores.contains_key("cls6"));
    }

    #[test]
    fn test_missing_scores_default_to_zero() {
        let result = classify_with(vec![Utterance {
            labels: vec!["happy".to_string(), "sad".to_string()],
            scores: vec![0.9],
        }]);
        assert_eq!(result.scores.get("happy"), Some(&0.9));
        assert_eq!(result.scores.get("sad"), Some(&0.0));
        assert_eq!(result.label, "happy");
    }

    #[test]
    fn test_only_first_prediction_is_used() {
        let result = classify_with(vec![
            Utterance {
                labels: vec!["sad".to_string()],
                scores: vec![1.0],
            },
            Utterance {
                labels: vec!["happy".to_string()],
                scores: vec![1.0],
            },
        ]);
        assert_eq!(result.label, "sad");
        assert!(!result.scores.contains_key("happy"));
    }

    #[test]
    fn test_scores_rounded_to_four_decimals() {
        let result = classify_with(vec![Utterance {
            labels: vec!["happy".to_string()],
            scores: vec![0.123_456_7],
        }]);
        assert_eq!(result.scores.get("happy"), Some(&0.1235));
    }

    #[test]
    fn test_latency_reported() {
        let result = classify_with(Vec::new());
        assert!(result.latency_ms >= 0.0);
    }
}

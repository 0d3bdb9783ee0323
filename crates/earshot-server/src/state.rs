//! Process-lifetime application context
//!
//! One immutable context built during startup and injected into every
//! handler. Classifiers are optional (a deployment can serve emotion,
//! scene, or both) and the semaphore bounds how many blocking inference
//! calls run at once.

use std::sync::Arc;

use tokio::sync::Semaphore;

use earshot_core::{EmotionClassifier, SceneClassifier};

/// Shared, read-only service state
pub struct AppContext {
    pub emotion: Option<Arc<EmotionClassifier>>,
    pub scene: Option<Arc<SceneClassifier>>,
    /// Bounds concurrent blocking inference calls
    pub inference_permits: Arc<Semaphore>,
}

impl AppContext {
    pub fn new(
        emotion: Option<EmotionClassifier>,
        scene: Option<SceneClassifier>,
        max_concurrent_inference: usize,
    ) -> Self {
        Self {
            emotion: emotion.map(Arc::new),
            scene: scene.map(Arc::new),
            inference_permits: Arc::new(Semaphore::new(max_concurrent_inference.max(1))),
        }
    }
}

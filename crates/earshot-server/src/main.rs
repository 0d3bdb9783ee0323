//! Earshot service binary
//!
//! Startup order: logging, config, model assets (downloaded on first run),
//! classifier construction, bind, serve. Any failure before the bind aborts
//! the process; the service never comes up without its models.

use std::path::Path;
use std::sync::Arc;

use anyhow::{Context, Result};

use earshot_core::model::{OnnxFrameModel, OnnxUtteranceModel};
use earshot_core::{
    EmotionClassifier, ModelAsset, ModelManager, SceneClassifier, ServiceConfig,
};
use earshot_server::{router, AppContext};

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = match std::env::args().nth(1) {
        Some(path) => ServiceConfig::load(Path::new(&path)),
        None => match ServiceConfig::default_path() {
            Some(path) => ServiceConfig::load(&path),
            None => ServiceConfig::default(),
        },
    };

    let manager = match &config.model_dir {
        Some(dir) => ModelManager::with_cache_dir(dir.clone()),
        None => ModelManager::new()?,
    };

    let emotion = if config.emotion {
        let path = manager.ensure(ModelAsset::EmotionHead)?;
        let model = OnnxUtteranceModel::load(&path)?;
        Some(EmotionClassifier::new(Box::new(model)))
    } else {
        None
    };

    let scene = if config.scene {
        let path = manager.ensure(ModelAsset::SceneEvents)?;
        let class_names = manager.load_class_map()?;
        log::info!("Loaded {} event class names", class_names.len());
        let model = OnnxFrameModel::load(&path)?;
        Some(SceneClassifier::new(Box::new(model), class_names))
    } else {
        None
    };

    if emotion.is_none() && scene.is_none() {
        anyhow::bail!("no classifier enabled; set emotion and/or scene in the config");
    }

    let ctx = Arc::new(AppContext::new(
        emotion,
        scene,
        config.max_concurrent_inference,
    ));
    let app = router(ctx);

    let listener = tokio::net::TcpListener::bind(&config.listen_addr)
        .await
        .with_context(|| format!("failed to bind {}", config.listen_addr))?;
    log::info!("earshot listening on {}", config.listen_addr);

    axum::serve(listener, app).await.context("server failed")?;
    Ok(())
}

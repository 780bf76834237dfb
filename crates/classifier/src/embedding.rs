//! Embedding-based binary classifier.
//!
//! Embeds the input with a local sentence-embedding model (ONNX runtime,
//! downloaded once and cached on disk) and scores it against fixed
//! per-label prototype centroids. Output index 0 maps to `coding`,
//! index 1 to `research`.

use crate::truncate_tokens;
use async_trait::async_trait;
use fastembed::{EmbeddingModel, TextEmbedding, TextInitOptions};
use janus_common::{JanusError, Label, Result, TextClassifier};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::sync::{Arc, Mutex};
use tracing::{debug, info};

/// Seed phrases whose embedding centroid anchors the `coding` label.
const CODING_PROTOTYPES: &[&str] = &[
    "write code to implement a feature",
    "create a new HTML page with interactive elements",
    "fix a bug in the program and run the tests",
    "build a function or script for this task",
    "refactor and debug the application source code",
];

/// Seed phrases whose embedding centroid anchors the `research` label.
const RESEARCH_PROTOTYPES: &[&str] = &[
    "research a topic and gather information",
    "look up best practices and tutorials for this subject",
    "find out what the current state of the art is",
    "search the web and summarize the findings",
    "compare approaches and collect background material",
];

fn default_max_input_tokens() -> usize {
    512
}

/// Configuration for the embedding classifier.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClassifierConfig {
    /// Where the model weights are cached. Absent: `~/.janus/cache/fastembed`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cache_dir: Option<PathBuf>,

    /// Whitespace-token cap applied to input before inference.
    #[serde(default = "default_max_input_tokens")]
    pub max_input_tokens: usize,
}

impl Default for ClassifierConfig {
    fn default() -> Self {
        Self {
            cache_dir: None,
            max_input_tokens: default_max_input_tokens(),
        }
    }
}

impl ClassifierConfig {
    fn resolve_cache_dir(&self) -> PathBuf {
        self.cache_dir.clone().unwrap_or_else(|| {
            dirs::home_dir().map_or_else(
                || PathBuf::from(".fastembed_cache"),
                |home| home.join(".janus").join("cache").join("fastembed"),
            )
        })
    }
}

/// Binary classifier over a pretrained embedding model.
///
/// Construction loads (and on first run downloads) the model; it is slow
/// and happens once at process start, off any hot path. After that the
/// model is only ever read. The ONNX runtime itself wants `&mut self`, so
/// inference serializes through a mutex and runs on the blocking pool.
pub struct EmbeddingClassifier {
    engine: Arc<Mutex<TextEmbedding>>,
    /// Prototype centroids, indexed by label: 0 = coding, 1 = research.
    prototypes: [Vec<f32>; 2],
    max_input_tokens: usize,
}

impl EmbeddingClassifier {
    /// Load the model from the cache directory, downloading it there first
    /// when absent, and precompute the label centroids.
    pub fn new(config: &ClassifierConfig) -> Result<Self> {
        let cache_dir = config.resolve_cache_dir();
        info!(cache_dir = %cache_dir.display(), "Loading classifier model");

        let mut engine = TextEmbedding::try_new(
            TextInitOptions::new(EmbeddingModel::AllMiniLML6V2)
                .with_cache_dir(cache_dir)
                .with_show_download_progress(false),
        )
        .map_err(|e| JanusError::Classification(format!("model init failed: {e}")))?;

        let coding = Self::centroid_of(&mut engine, CODING_PROTOTYPES)?;
        let research = Self::centroid_of(&mut engine, RESEARCH_PROTOTYPES)?;

        info!("Classifier model ready");
        Ok(Self {
            engine: Arc::new(Mutex::new(engine)),
            prototypes: [coding, research],
            max_input_tokens: config.max_input_tokens,
        })
    }

    fn centroid_of(engine: &mut TextEmbedding, phrases: &[&str]) -> Result<Vec<f32>> {
        let texts: Vec<String> = phrases.iter().map(|p| (*p).to_string()).collect();
        let embeddings = engine
            .embed(texts, None)
            .map_err(|e| JanusError::Classification(format!("prototype embedding failed: {e}")))?;
        centroid(&embeddings)
            .ok_or_else(|| JanusError::Classification("empty prototype set".into()))
    }
}

#[async_trait]
impl TextClassifier for EmbeddingClassifier {
    async fn classify(&self, text: &str) -> Result<Label> {
        let input = truncate_tokens(text, self.max_input_tokens);

        let engine = Arc::clone(&self.engine);
        let embedding = tokio::task::spawn_blocking(move || {
            let mut engine = engine
                .lock()
                .map_err(|_| JanusError::Classification("classifier mutex poisoned".into()))?;
            engine
                .embed(vec![input], None)
                .map_err(|e| JanusError::Classification(format!("inference failed: {e}")))
        })
        .await
        .map_err(|e| JanusError::Classification(format!("inference task failed: {e}")))??;

        let embedding = embedding
            .into_iter()
            .next()
            .ok_or_else(|| JanusError::Classification("model returned no embedding".into()))?;

        let scores: Vec<f32> = self
            .prototypes
            .iter()
            .map(|prototype| cosine_similarity(&embedding, prototype))
            .collect();
        let index = argmax(&scores)
            .ok_or_else(|| JanusError::Classification("empty score vector".into()))?;

        let label = Label::from_index(index).ok_or_else(|| {
            JanusError::Classification(format!("model output index {index} out of range"))
        })?;

        debug!(label = %label, coding = scores[0], research = scores[1], "Classified input");
        Ok(label)
    }
}

/// Element-wise mean of a set of equal-length vectors.
fn centroid(vectors: &[Vec<f32>]) -> Option<Vec<f32>> {
    let first = vectors.first()?;
    let mut sum = vec![0.0f32; first.len()];
    for vector in vectors {
        for (acc, value) in sum.iter_mut().zip(vector.iter()) {
            *acc += value;
        }
    }
    let n = vectors.len() as f32;
    sum.iter_mut().for_each(|v| *v /= n);
    Some(sum)
}

fn cosine_similarity(a: &[f32], b: &[f32]) -> f32 {
    let dot: f32 = a.iter().zip(b.iter()).map(|(x, y)| x * y).sum();
    let norm_a: f32 = a.iter().map(|x| x * x).sum::<f32>().sqrt();
    let norm_b: f32 = b.iter().map(|x| x * x).sum::<f32>().sqrt();
    if norm_a == 0.0 || norm_b == 0.0 {
        return 0.0;
    }
    dot / (norm_a * norm_b)
}

fn argmax(scores: &[f32]) -> Option<usize> {
    scores
        .iter()
        .enumerate()
        .max_by(|(_, a), (_, b)| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal))
        .map(|(index, _)| index)
}

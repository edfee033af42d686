//! Inference Batcher

use feature_engine::FeatureExtractor;
use tokio::sync::{mpsc, oneshot};
use tokio::time::{timeout, Duration};
use tracing::{debug, info};

use crate::classifier::Classifier;
use crate::engine::{InferenceEngine, InferenceResult};
use crate::InferenceError;

/// One ciphertext awaiting classification
#[derive(Debug)]
pub struct BatchRequest {
    /// Ciphertext to classify
    pub cipher_text: String,
    /// Where the result is delivered
    pub respond_to: oneshot::Sender<Result<InferenceResult, InferenceError>>,
}

impl BatchRequest {
    /// Create a request and the receiver for its result
    pub fn new(
        cipher_text: impl Into<String>,
    ) -> (Self, oneshot::Receiver<Result<InferenceResult, InferenceError>>) {
        let (respond_to, rx) = oneshot::channel();
        (
            Self {
                cipher_text: cipher_text.into(),
                respond_to,
            },
            rx,
        )
    }
}

/// Inference batcher for batching multiple ciphertexts
pub struct InferenceBatcher {
    /// Channel receiver for incoming requests
    receiver: mpsc::Receiver<BatchRequest>,
    /// Batch size threshold
    batch_size: usize,
    /// Timeout for batch collection (ms)
    timeout_ms: u64,
}

impl InferenceBatcher {
    /// Create a new batcher
    pub fn new(receiver: mpsc::Receiver<BatchRequest>, batch_size: usize, timeout_ms: u64) -> Self {
        info!("Creating inference batcher: batch_size={}, timeout={}ms", batch_size, timeout_ms);
        Self {
            receiver,
            batch_size: batch_size.max(1),
            timeout_ms,
        }
    }

    /// Create a channel pair for the batcher
    pub fn channel(batch_size: usize, timeout_ms: u64) -> (mpsc::Sender<BatchRequest>, Self) {
        let (tx, rx) = mpsc::channel(batch_size.max(1) * 2);
        (tx, Self::new(rx, batch_size, timeout_ms))
    }

    /// Run the batcher loop until every sender is dropped
    pub async fn run<C: Classifier>(&mut self, engine: &InferenceEngine<C>) -> Result<(), InferenceError> {
        info!("Starting inference batcher");
        let mut extractor = FeatureExtractor::new();

        while let Some(batch) = self.next_batch().await {
            debug!("Processing batch of {} ciphertexts", batch.len());

            for request in batch {
                let result = engine.predict_with(&mut extractor, &request.cipher_text);
                if let Err(e) = &result {
                    debug!("Inference error: {}", e);
                }
                // Caller may have stopped waiting
                let _ = request.respond_to.send(result);
            }
        }

        info!("Inference batcher stopped");
        Ok(())
    }

    /// Wait for one request, then collect more until full or timed out.
    /// `None` once the channel is closed and drained.
    async fn next_batch(&mut self) -> Option<Vec<BatchRequest>> {
        let first = match self.receiver.recv().await {
            Some(request) => request,
            None => {
                debug!("Batcher channel closed");
                return None;
            }
        };

        let mut batch = Vec::with_capacity(self.batch_size);
        batch.push(first);
        let timeout_duration = Duration::from_millis(self.timeout_ms);

        while batch.len() < self.batch_size {
            match timeout(timeout_duration, self.receiver.recv()).await {
                Ok(Some(request)) => batch.push(request),
                Ok(None) => break, // Channel closed
                Err(_) => break,   // Timeout
            }
        }

        Some(batch)
    }
}

/// Submit a ciphertext through a batcher channel and await its result
pub async fn submit(
    sender: &mpsc::Sender<BatchRequest>,
    cipher_text: impl Into<String>,
) -> Result<InferenceResult, InferenceError> {
    let (request, rx) = BatchRequest::new(cipher_text);
    sender
        .send(request)
        .await
        .map_err(|_| InferenceError::ChannelClosed)?;
    rx.await.map_err(|_| InferenceError::ChannelClosed)?
}

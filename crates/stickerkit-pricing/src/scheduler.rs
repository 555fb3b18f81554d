//! Debounced price recomputation.
//!
//! Shape, dimension, quantity, and material changes arrive much faster
//! than a price is worth recomputing (slider drags). Each request arms a
//! fresh debounce timer and bumps a generation counter; when a timer
//! fires it only publishes if its generation is still current, so a stale
//! timer firing after the inputs moved on is ignored rather than applied
//! (last-write-wins). Results stream through a watch channel.

use crate::engine::{PricingEngine, PricingResult};
use serde::{Deserialize, Serialize};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;
use stickerkit_core::{Dimensions, Material, StickerShape};
use tokio::sync::watch;

/// Settle time before a recompute actually runs.
pub const PRICING_DEBOUNCE: Duration = Duration::from_millis(300);

/// One complete set of pricing inputs.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PricingInputs {
    pub shape: StickerShape,
    pub dimensions: Dimensions,
    pub quantity: u32,
    pub material: Material,
}

/// Debounces pricing input changes and publishes the latest result.
#[derive(Debug)]
pub struct PricingScheduler {
    engine: Arc<PricingEngine>,
    generation: Arc<AtomicU64>,
    results: watch::Sender<Option<PricingResult>>,
}

impl PricingScheduler {
    /// Creates a scheduler over an engine.
    pub fn new(engine: PricingEngine) -> Self {
        let (results, _) = watch::channel(None);
        Self {
            engine: Arc::new(engine),
            generation: Arc::new(AtomicU64::new(0)),
            results,
        }
    }

    /// A receiver for published pricing results.
    pub fn results(&self) -> watch::Receiver<Option<PricingResult>> {
        self.results.subscribe()
    }

    /// Notes changed inputs. Supersedes any recompute still waiting on its
    /// debounce timer; the stale timer exits without publishing, so
    /// nothing leaks across rapid input bursts.
    ///
    /// Inputs are expected to be pre-validated; a computation error here
    /// is logged and the previous published result stays in place.
    pub fn request(&self, inputs: PricingInputs) {
        let token = self.generation.fetch_add(1, Ordering::SeqCst) + 1;
        let engine = Arc::clone(&self.engine);
        let generation = Arc::clone(&self.generation);
        let results = self.results.clone();

        tokio::spawn(async move {
            tokio::time::sleep(PRICING_DEBOUNCE).await;
            if generation.load(Ordering::SeqCst) != token {
                // Superseded while waiting
                return;
            }
            match engine.price(inputs.shape, &inputs.dimensions, inputs.quantity, inputs.material)
            {
                Ok(result) => {
                    // Re-check after computing so a result computed against
                    // stale inputs is never applied
                    if generation.load(Ordering::SeqCst) == token {
                        let _ = results.send(Some(result));
                    }
                }
                Err(e) => {
                    tracing::warn!(error = %e, "debounced price computation failed");
                }
            }
        });
    }

    /// Invalidates any pending recompute without scheduling a new one
    /// (editor unmount).
    pub fn cancel(&self) {
        self.generation.fetch_add(1, Ordering::SeqCst);
    }
}

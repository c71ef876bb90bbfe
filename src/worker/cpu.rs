//! CPU-based worker for vanity address search.

use std::sync::Arc;

use secp256k1::Secp256k1;

use crate::crypto::Keypair;
use crate::matcher::Pattern;

use super::{SearchState, VanityResult};

/// A CPU worker that generates and tests keypairs.
pub struct CpuWorker {
    /// Worker ID
    id: usize,
    /// The pattern to match against
    pattern: Arc<Pattern>,
    /// Shared counters, admission and stop flag
    state: Arc<SearchState>,
}

impl CpuWorker {
    /// Creates a new CPU worker.
    pub fn new(id: usize, pattern: Arc<Pattern>, state: Arc<SearchState>) -> Self {
        Self { id, pattern, state }
    }

    /// Runs the worker loop.
    ///
    /// Generates keypairs and tests them against the pattern until:
    /// - The search state refuses another attempt (goal reached or stopped)
    /// - Key generation fails, which is recorded and stops every worker
    pub fn run(&self) {
        let secp = Secp256k1::signing_only();

        while self.state.begin_attempt() {
            let keypair = match Keypair::generate(&secp) {
                Ok(keypair) => keypair,
                Err(e) => {
                    tracing::error!(worker = self.id, error = %e, "key generation failed");
                    self.state.fail(e.into());
                    break;
                }
            };

            let outcome = self.pattern.matches(keypair.address());
            if outcome.is_match() {
                let score = outcome.score();
                let admitted = self
                    .state
                    .admit(score, || VanityResult::new(&keypair, score, self.id));
                if admitted {
                    tracing::debug!(
                        worker = self.id,
                        address = %keypair.address(),
                        "result emitted"
                    );
                }
            }

            self.state.finish_attempt();
        }
    }

    /// Returns the worker ID.
    pub fn id(&self) -> usize {
        self.id
    }
}

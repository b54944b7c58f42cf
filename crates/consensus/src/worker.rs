//! Sealing off the caller's thread.
//!
//! Sealing signs and verifies (PoA) or searches nonces (PoW), so it runs on a
//! dedicated thread. The returned handle can cancel the attempt, e.g. when a
//! competing block arrives or the node shuts down.

use crate::sealer::{CancelToken, ConsensusSealer, Result, SealError};
use sealchain_core::Sealable;
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use tracing::debug;

/// Spawns sealing jobs for one consensus variant.
#[derive(Clone)]
pub struct SealingWorker {
    sealer: Arc<dyn ConsensusSealer>,
}

impl SealingWorker {
    pub fn new(sealer: Arc<dyn ConsensusSealer>) -> Self {
        Self { sealer }
    }

    /// Seal `block` on a new thread. The block is returned through the handle.
    pub fn spawn<B>(&self, mut block: B) -> Result<SealHandle<B>>
    where
        B: Sealable + Send + 'static,
    {
        let cancel = CancelToken::new();
        let token = cancel.clone();
        let sealer = Arc::clone(&self.sealer);
        let name = format!("seal-{}", sealer.name());

        let handle = thread::Builder::new()
            .name(name)
            .spawn(move || {
                debug!(variant = sealer.name(), "sealing started");
                sealer.seal(&mut block, &token).map(|()| block)
            })
            .map_err(SealError::Spawn)?;

        Ok(SealHandle { cancel, handle })
    }
}

/// Handle to an in-flight sealing job.
pub struct SealHandle<B> {
    cancel: CancelToken,
    handle: JoinHandle<Result<B>>,
}

impl<B> SealHandle<B> {
    /// Ask the job to stop at its next cancellation check.
    pub fn cancel(&self) {
        self.cancel.cancel();
    }

    /// A token that cancels this job, for handing to other components.
    pub fn cancel_token(&self) -> CancelToken {
        self.cancel.clone()
    }

    pub fn is_finished(&self) -> bool {
        self.handle.is_finished()
    }

    /// Wait for the job and return the sealed block.
    pub fn join(self) -> Result<B> {
        self.handle.join().map_err(|_| SealError::WorkerPanicked)?
    }
}

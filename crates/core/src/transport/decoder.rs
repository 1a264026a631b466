//! Long-running stream decoder task
//!
//! Owns the read side of the client: opens the listening stream, feeds every
//! chunk through a [`PositionDecoder`], publishes results into [`GridState`],
//! and reconnects after a fixed delay whenever the stream fails or ends.
//!
//! # Lifecycle
//! - `start()` spawns exactly one task; a second `start()` while it lives fails.
//! - `stop()` raises a flag and flips the state to `Disconnected`. The task
//!   notices the flag before its next open, read, or retry and exits. A read
//!   already in flight is not interrupted.
//! - A clean end of body counts as a dropped connection: the state goes to
//!   `Disconnected` and the usual delayed reconnect follows. This deliberately
//!   differs from the browser client, which stopped reading and kept showing
//!   `Conectado`.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

use super::reconnect::{ReconnectConfig, Reconnector};
use super::{HttpStreamSource, StreamSource};
use crate::protocol::PositionDecoder;
use crate::state::GridState;
use crate::types::ConnectionState;
use crate::{ClientConfig, CoreError, Result};

/// Handle to the decode task
pub struct StreamDecoder {
    source: Arc<dyn StreamSource>,
    state: GridState,
    reconnect: ReconnectConfig,
    stop: Arc<AtomicBool>,
    task: Option<JoinHandle<()>>,
}

impl StreamDecoder {
    /// Decoder publishing into a fresh [`GridState`]
    pub fn new(source: Arc<dyn StreamSource>, reconnect: ReconnectConfig) -> Self {
        Self::with_state(source, reconnect, GridState::new())
    }

    /// Decoder publishing into an existing state handle
    pub fn with_state(
        source: Arc<dyn StreamSource>,
        reconnect: ReconnectConfig,
        state: GridState,
    ) -> Self {
        Self {
            source,
            state,
            reconnect,
            stop: Arc::new(AtomicBool::new(false)),
            task: None,
        }
    }

    /// HTTP decoder for the configured server
    pub fn from_config(config: &ClientConfig) -> Result<Self> {
        let source = HttpStreamSource::from_config(config)?;
        Ok(Self::new(Arc::new(source), config.reconnect))
    }

    /// Shared state this decoder writes
    pub fn state(&self) -> GridState {
        self.state.clone()
    }

    /// Spawn the decode task on the current tokio runtime
    pub fn start(&mut self) -> Result<()> {
        if self.is_running() {
            return Err(CoreError::AlreadyRunning);
        }

        // Fresh flag: a previous stop() must not cancel this run
        self.stop = Arc::new(AtomicBool::new(false));

        let worker = Worker {
            source: Arc::clone(&self.source),
            state: self.state.clone(),
            reconnector: Reconnector::new(self.reconnect),
            stop: Arc::clone(&self.stop),
        };

        self.task = Some(tokio::spawn(worker.run()));
        Ok(())
    }

    /// Stop reconnecting and mark the stream `Disconnected`
    ///
    /// Safe to call repeatedly or before `start()`.
    pub fn stop(&mut self) {
        self.stop.store(true, Ordering::SeqCst);
        self.state.set_connection(ConnectionState::Disconnected);
    }

    /// Task spawned and not yet exited
    pub fn is_running(&self) -> bool {
        self.task.as_ref().is_some_and(|task| !task.is_finished())
    }

    /// Wait for the task to exit
    ///
    /// Only returns after `stop()` once the task reaches a suspension point
    /// that checks the flag.
    pub async fn join(&mut self) {
        if let Some(task) = self.task.take() {
            if let Err(e) = task.await {
                warn!("Decoder task failed: {}", e);
            }
        }
    }
}

impl Drop for StreamDecoder {
    fn drop(&mut self) {
        self.stop.store(true, Ordering::SeqCst);
    }
}

/// How one connection ended without an error
enum SessionEnd {
    /// Server closed the body; handled like a failure (reconnect)
    Ended,
    /// Stop flag seen
    Stopped,
}

struct Worker {
    source: Arc<dyn StreamSource>,
    state: GridState,
    reconnector: Reconnector,
    stop: Arc<AtomicBool>,
}

impl Worker {
    fn stopped(&self) -> bool {
        self.stop.load(Ordering::SeqCst)
    }

    async fn run(mut self) {
        while !self.stopped() {
            match self.session().await {
                Ok(SessionEnd::Stopped) => break,
                Ok(SessionEnd::Ended) => info!("Stream from {} ended", self.source.describe()),
                Err(e) => warn!("Connection error: {}", e),
            }

            self.state.set_connection(ConnectionState::Disconnected);
            if self.stopped() {
                break;
            }

            self.reconnector.wait().await;
        }

        self.state.set_connection(ConnectionState::Disconnected);
        debug!("Stream decoder stopped");
    }

    /// One connection from open to end; any partial line dies with it
    async fn session(&mut self) -> Result<SessionEnd> {
        let mut stream = self.source.open().await?;
        if self.stopped() {
            return Ok(SessionEnd::Stopped);
        }

        self.reconnector.reset();
        self.state.set_connection(ConnectionState::Connected);
        info!("Connected to {}", self.source.describe());

        let mut decoder = PositionDecoder::new();
        let result = loop {
            if self.stopped() {
                break Ok(SessionEnd::Stopped);
            }

            match stream.next_chunk().await {
                Ok(Some(chunk)) => {
                    for position in decoder.feed(&chunk) {
                        debug!("Position update: ({}, {})", position.x, position.y);
                        self.state.set_position(position);
                    }
                }
                Ok(None) => break Ok(SessionEnd::Ended),
                Err(e) => break Err(e),
            }
        };

        if !decoder.buffered().is_empty() {
            debug!("Discarding {} bytes of unterminated line", decoder.buffered().len());
        }
        debug!("Session stats: {:?}", decoder.stats());

        result
    }
}

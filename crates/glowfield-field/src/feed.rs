use std::panic::{self, AssertUnwindSafe};
use std::sync::Arc;
use std::thread;
use std::time::Duration;

use crossbeam_channel::{Receiver, TryRecvError, bounded};

use crate::{FieldData, FieldDims, WaveParams, simulate};

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum FeedError {
    #[error("field dimensions {dims:?} do not match {len} values")]
    InvalidDimensions { dims: FieldDims, len: usize },
    #[error("field feed disabled")]
    Disabled,
    #[error("field loader panicked")]
    LoaderPanicked,
    #[error("field loader went away without publishing")]
    Disconnected,
}

#[derive(Clone, Debug, PartialEq)]
pub struct FeedConfig {
    pub start_delay: Duration,
    pub dims: FieldDims,
    pub wave: WaveParams,
}

impl Default for FeedConfig {
    fn default() -> Self {
        Self {
            start_delay: Duration::from_millis(5000),
            dims: FieldDims::new(500, 100, 2, 100),
            wave: WaveParams::default(),
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum FeedState {
    Pending,
    Ready,
    Failed(FeedError),
}

impl FeedState {
    pub fn label(&self) -> &'static str {
        match self {
            FeedState::Pending => "loading",
            FeedState::Ready => "ready",
            FeedState::Failed(_) => "unavailable",
        }
    }
}

/// One-shot background delivery of a [`FieldData`].
///
/// The loader thread publishes a single result through a capacity-1 channel; the
/// frame loop calls [`FieldFeed::poll`] each frame and keeps the data once it lands.
/// Failure is permanent.
pub struct FieldFeed {
    rx: Option<Receiver<Result<FieldData, FeedError>>>,
    data: Option<Arc<FieldData>>,
    state: FeedState,
}

impl FieldFeed {
    /// Run `loader` on its own thread after `delay`.
    pub fn spawn<F>(delay: Duration, loader: F) -> Self
    where
        F: FnOnce() -> Result<FieldData, FeedError> + Send + 'static,
    {
        let (tx, rx) = bounded(1);
        let spawned = thread::Builder::new()
            .name("glowfield-field".into())
            .spawn(move || {
                if !delay.is_zero() {
                    thread::sleep(delay);
                }
                let out = panic::catch_unwind(AssertUnwindSafe(loader))
                    .unwrap_or(Err(FeedError::LoaderPanicked));
                let _ = tx.send(out);
            });
        match spawned {
            Ok(_) => Self {
                rx: Some(rx),
                data: None,
                state: FeedState::Pending,
            },
            Err(e) => {
                log::warn!(target: "events", "field loader thread failed to start: {e}");
                Self::failed(FeedError::Disconnected)
            }
        }
    }

    /// Simulate the default wave field in the background.
    pub fn wave(cfg: &FeedConfig) -> Self {
        let dims = cfg.dims;
        let params = cfg.wave;
        Self::spawn(cfg.start_delay, move || simulate(dims, &params))
    }

    pub fn disabled() -> Self {
        Self::failed(FeedError::Disabled)
    }

    fn failed(e: FeedError) -> Self {
        Self {
            rx: None,
            data: None,
            state: FeedState::Failed(e),
        }
    }

    /// Already-loaded data, no thread.
    pub fn ready(data: FieldData) -> Self {
        Self {
            rx: None,
            data: Some(Arc::new(data)),
            state: FeedState::Ready,
        }
    }

    /// Non-blocking check for the loader's result.
    pub fn poll(&mut self) -> &FeedState {
        let Some(rx) = &self.rx else {
            return &self.state;
        };
        let outcome = match rx.try_recv() {
            Ok(res) => res,
            Err(TryRecvError::Empty) => return &self.state,
            Err(TryRecvError::Disconnected) => Err(FeedError::Disconnected),
        };
        self.rx = None;
        match outcome {
            Ok(data) => {
                let d = data.dims();
                log::info!(
                    target: "events",
                    "field ready: {}x{}x{}x{}",
                    d.t,
                    d.x,
                    d.y,
                    d.z
                );
                self.data = Some(Arc::new(data));
                self.state = FeedState::Ready;
            }
            Err(e) => {
                log::warn!(target: "events", "field unavailable: {e}");
                self.state = FeedState::Failed(e);
            }
        }
        &self.state
    }

    #[inline]
    pub fn state(&self) -> &FeedState {
        &self.state
    }

    #[inline]
    pub fn data(&self) -> Option<&Arc<FieldData>> {
        self.data.as_ref()
    }
}

// amaya_cart/src/storage/queued.rs

//! Background persistence with a single writer.
//!
//! `set` returns as soon as the value is queued. One blocking writer drains the
//! queue in order and applies each write to the wrapped backend. Every write
//! carries a sequence number; the writer never applies a job whose sequence is
//! older than what it already wrote (or has queued) for the same key, so a stale
//! snapshot cannot overwrite a newer one.

use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use anyhow::anyhow;
use parking_lot::Mutex;
use tokio::sync::{mpsc, oneshot};
use tracing::{event, Level};

use super::KeyValueStorage;
use crate::error::{CartError, CartResult};

enum Job {
  /// `value: None` removes the key.
  Write { key: String, seq: u64, value: Option<String> },
  Flush(oneshot::Sender<()>),
}

#[derive(Clone)]
struct Pending {
  seq: u64,
  value: Option<String>,
}

#[derive(Default)]
struct QueueState {
  next_seq: AtomicU64,
  /// Newest queued-but-unwritten value per key.
  pending: Mutex<HashMap<String, Pending>>,
  /// Sequence of the last write applied per key.
  written: Mutex<HashMap<String, u64>>,
  last_error: Mutex<Option<(String, String)>>,
}

/// Write-behind adapter around another `KeyValueStorage`.
pub struct QueuedStorage {
  inner: Arc<dyn KeyValueStorage>,
  state: Arc<QueueState>,
  tx: mpsc::UnboundedSender<Job>,
}

impl QueuedStorage {
  /// Starts the writer on the current tokio runtime's blocking pool.
  ///
  /// Panics if called outside a tokio runtime.
  pub fn spawn(inner: Arc<dyn KeyValueStorage>) -> Self {
    let (tx, rx) = mpsc::unbounded_channel();
    let state = Arc::new(QueueState::default());
    let writer_inner = Arc::clone(&inner);
    let writer_state = Arc::clone(&state);
    tokio::task::spawn_blocking(move || run_writer(writer_inner, writer_state, rx));
    Self { inner, state, tx }
  }

  /// Waits until every write queued before this call has been applied.
  ///
  /// Returns the most recent background write failure since the last flush, if any.
  pub async fn flush(&self) -> CartResult<()> {
    let (done_tx, done_rx) = oneshot::channel();
    self
      .tx
      .send(Job::Flush(done_tx))
      .map_err(|_| CartError::Internal("storage writer has stopped".to_string()))?;
    done_rx
      .await
      .map_err(|_| CartError::Internal("storage writer dropped a flush request".to_string()))?;

    match self.state.last_error.lock().take() {
      Some((key, message)) => Err(CartError::storage(&key, anyhow!(message))),
      None => Ok(()),
    }
  }

  /// The last background write failure as `(key, message)`, without clearing it.
  pub fn last_error(&self) -> Option<(String, String)> {
    self.state.last_error.lock().clone()
  }

  /// Number of keys with a queued value not yet written.
  pub fn pending_len(&self) -> usize {
    self.state.pending.lock().len()
  }

  fn enqueue(&self, key: &str, value: Option<String>) -> CartResult<()> {
    let seq = self.state.next_seq.fetch_add(1, Ordering::SeqCst) + 1;
    // Record as pending before sending so the writer always finds it.
    record_pending(&self.state, key, seq, value.clone());
    self
      .tx
      .send(Job::Write {
        key: key.to_string(),
        seq,
        value,
      })
      .map_err(|_| CartError::storage(key, anyhow!("storage writer has stopped")))
  }
}

impl KeyValueStorage for QueuedStorage {
  fn get(&self, key: &str) -> CartResult<Option<String>> {
    if let Some(pending) = self.state.pending.lock().get(key) {
      return Ok(pending.value.clone());
    }
    self.inner.get(key)
  }

  fn set(&self, key: &str, value: &str) -> CartResult<()> {
    self.enqueue(key, Some(value.to_string()))
  }

  fn remove(&self, key: &str) -> CartResult<()> {
    self.enqueue(key, None)
  }
}

fn run_writer(inner: Arc<dyn KeyValueStorage>, state: Arc<QueueState>, mut rx: mpsc::UnboundedReceiver<Job>) {
  event!(Level::DEBUG, "Storage writer started.");
  while let Some(job) = rx.blocking_recv() {
    match job {
      Job::Flush(done) => {
        let _ = done.send(());
      }
      Job::Write { key, seq, value } => apply_write(inner.as_ref(), &state, key, seq, value),
    }
  }
  event!(Level::DEBUG, "Storage writer stopped.");
}

/// Keeps the newest value per key. A caller that drew an older sequence but
/// reached the lock second must not replace a newer pending value.
fn record_pending(state: &QueueState, key: &str, seq: u64, value: Option<String>) {
  let mut pending = state.pending.lock();
  if pending.get(key).is_some_and(|p| p.seq >= seq) {
    return;
  }
  pending.insert(key.to_string(), Pending { seq, value });
}

/// Drops the pending entry for `key` once storage holds `written_seq` or newer.
fn evict_written(state: &QueueState, key: &str, written_seq: u64) {
  let mut pending = state.pending.lock();
  if pending.get(key).is_some_and(|p| p.seq <= written_seq) {
    pending.remove(key);
  }
}

fn apply_write(inner: &dyn KeyValueStorage, state: &QueueState, key: String, seq: u64, value: Option<String>) {
  let last_written = state.written.lock().get(&key).copied().unwrap_or(0);
  let newest_queued = state.pending.lock().get(&key).map(|p| p.seq).unwrap_or(0);
  if seq <= last_written || seq < newest_queued {
    event!(Level::TRACE, key = %key, seq, last_written, newest_queued, "Skipping superseded write.");
    evict_written(state, &key, last_written);
    return;
  }

  let result = match &value {
    Some(v) => inner.set(&key, v),
    None => inner.remove(&key),
  };
  if let Err(e) = result {
    event!(Level::ERROR, key = %key, seq, error = %e, "Background storage write failed.");
    *state.last_error.lock() = Some((key.clone(), e.to_string()));
  }

  state.written.lock().insert(key.clone(), seq);
  evict_written(state, &key, seq);
}

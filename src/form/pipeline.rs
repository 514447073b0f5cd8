//! Per-field debounced value stream.
//!
//! Each field gets a background task that owns a [`Debouncer`] and waits on
//! either the next keystroke or the pending deadline. Values surviving the
//! debounce and distinct stages are handed to the sink in keystroke order.

use std::time::Duration;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio::time::{sleep_until, Instant};

use super::debounce::Debouncer;

/// Spawns field streams.
pub struct FieldPipeline;

impl FieldPipeline {
    /// Start a stream for `field`, delivering stabilized values to `sink`.
    ///
    /// Must be called from within a tokio runtime.
    pub fn spawn<F>(field: &'static str, quiet: Duration, sink: F) -> FieldSubscription
    where
        F: FnMut(String) + Send + 'static,
    {
        let (tx, rx) = mpsc::unbounded_channel();
        let handle = tokio::spawn(run(field, Debouncer::new(quiet), rx, sink));
        tracing::debug!(field, quiet_ms = quiet.as_millis() as u64, "Field stream started");
        FieldSubscription {
            field,
            tx: Some(tx),
            handle: Some(handle),
        }
    }
}

async fn run<F>(
    field: &'static str,
    mut debouncer: Debouncer,
    mut rx: mpsc::UnboundedReceiver<String>,
    mut sink: F,
) where
    F: FnMut(String),
{
    loop {
        let deadline = debouncer.deadline();
        tokio::select! {
            biased;
            _ = wait_for(deadline) => commit(field, &mut debouncer, &mut sink),
            received = rx.recv() => match received {
                Some(value) => {
                    // A value already quiet for the full period is committed
                    // before the new keystroke replaces it.
                    commit(field, &mut debouncer, &mut sink);
                    debouncer.push(value, Instant::now());
                }
                // Closed: pending value is dropped, not flushed
                None => break,
            },
        }
    }
    tracing::debug!(field, "Field stream stopped");
}

fn commit<F>(field: &'static str, debouncer: &mut Debouncer, sink: &mut F)
where
    F: FnMut(String),
{
    if let Some(value) = debouncer.fire(Instant::now()) {
        tracing::trace!(field, "Field value committed");
        sink(value);
    }
}

async fn wait_for(deadline: Option<Instant>) {
    match deadline {
        Some(deadline) => sleep_until(deadline).await,
        None => std::future::pending().await,
    }
}

/// Handle to a running field stream.
///
/// Dropping the handle unsubscribes.
#[derive(Debug)]
pub struct FieldSubscription {
    field: &'static str,
    tx: Option<mpsc::UnboundedSender<String>>,
    handle: Option<JoinHandle<()>>,
}

impl FieldSubscription {
    pub fn field(&self) -> &'static str {
        self.field
    }

    /// Feed one raw keystroke value. Ignored after unsubscribe.
    pub fn push(&self, value: impl Into<String>) {
        if let Some(tx) = &self.tx {
            let _ = tx.send(value.into());
        }
    }

    pub fn is_active(&self) -> bool {
        self.tx.is_some()
    }

    /// Stop delivery and cancel any pending debounce timer.
    pub fn unsubscribe(&mut self) {
        self.tx = None;
        if let Some(handle) = self.handle.take() {
            handle.abort();
        }
    }
}

impl Drop for FieldSubscription {
    fn drop(&mut self) {
        self.unsubscribe();
    }
}

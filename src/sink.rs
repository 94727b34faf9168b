//! Thread-safe, order-preserving diagnostic buffer.
//!
//! Workers run concurrently, and letting each one print directly produces
//! torn, interleaved lines. The sink buffers everything during a batch and
//! prints only on [`flush`](DiagnosticSink::flush), which the orchestrator
//! calls after all workers have joined. A worker appends its lines for one
//! file in a single [`extend`](DiagnosticSink::extend) call, so they stay
//! contiguous and causally ordered in the flushed output.

use std::sync::Mutex;

/// Append-only message buffer shared across batch workers.
#[derive(Debug, Default)]
pub struct DiagnosticSink {
    messages: Mutex<Vec<String>>,
}

impl DiagnosticSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a single message. Safe from any worker.
    pub fn append(&self, message: impl Into<String>) {
        self.messages.lock().unwrap().push(message.into());
    }

    /// Append a group of messages under one lock so they are never
    /// interleaved with another worker's group.
    pub fn extend(&self, messages: Vec<String>) {
        self.messages.lock().unwrap().extend(messages);
    }

    /// Take the buffered messages, leaving the sink empty.
    pub fn drain(&self) -> Vec<String> {
        std::mem::take(&mut *self.messages.lock().unwrap())
    }

    /// Print buffered messages in append order and clear the buffer.
    ///
    /// Only called after all writers have finished; the orchestrator's join
    /// enforces that, not the sink.
    pub fn flush(&self) {
        for line in self.drain() {
            println!("{}", line);
        }
    }
}

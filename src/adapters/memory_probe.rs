//! In-memory probe
//!
//! Collects every event into a shared buffer. The block owns the probe, the
//! caller keeps a handle to the buffer and inspects it afterwards.

use std::sync::{Arc, Mutex};

use crate::ports::Probe;

/// Probe that appends every event to a shared `Vec`
pub struct MemoryProbe<E> {
    events: Arc<Mutex<Vec<E>>>,
}

impl<E: Clone + Send> MemoryProbe<E> {
    /// Create a probe and the handle used to read its events back
    pub fn new() -> (Self, Arc<Mutex<Vec<E>>>) {
        let events = Arc::new(Mutex::new(Vec::new()));
        (
            Self {
                events: Arc::clone(&events),
            },
            events,
        )
    }
}

impl<E: Clone + Send> Probe<E> for MemoryProbe<E> {
    fn record(&mut self, event: &E) {
        // A poisoned buffer only means a reader panicked; keep recording.
        let mut events = match self.events.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };
        events.push(event.clone());
    }
}

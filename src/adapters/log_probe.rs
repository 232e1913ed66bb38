//! Probe that forwards events to the `log` facade at trace level

use std::fmt::Debug;

use crate::ports::Probe;

/// Logs every event with a fixed target label
pub struct LogProbe {
    label: &'static str,
}

impl LogProbe {
    pub fn new(label: &'static str) -> Self {
        Self { label }
    }
}

impl<E: Debug> Probe<E> for LogProbe {
    fn record(&mut self, event: &E) {
        log::trace!("[{}] {event:?}", self.label);
    }
}

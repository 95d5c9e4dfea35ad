#![allow(dead_code)]

use insight::presentation::view::{ViewEvent, ViewObserver};
use std::sync::{Arc, Mutex};

/// Collects every event the controllers emit.
#[derive(Default)]
pub struct RecordingObserver {
    events: Mutex<Vec<ViewEvent>>,
}

impl RecordingObserver {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn events(&self) -> Vec<ViewEvent> {
        self.events.lock().unwrap().clone()
    }

    pub fn take(&self) -> Vec<ViewEvent> {
        std::mem::take(&mut *self.events.lock().unwrap())
    }
}

impl ViewObserver for RecordingObserver {
    fn notify(&self, event: ViewEvent) {
        self.events.lock().unwrap().push(event);
    }
}

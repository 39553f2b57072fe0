// SPDX-License-Identifier: Apache-2.0

//! Pooled record objects.
//!
//! Tailing emits one event per line, millions over a process lifetime, so
//! events are recycled through a free-list pool: [`EventPool::get`] hands out
//! an event whose body buffer keeps its previous allocation, and the consumer
//! returns it with [`EventPool::put`] once delivered.

use serde_json::{Map, Value};
use std::sync::Mutex;

use crate::source::state::{State, SYSTEM_STATE_KEY};

/// One emitted record: a line body plus its positional/identity snapshot.
#[derive(Debug, Default)]
pub struct LogEvent {
    state: Option<State>,
    body: Vec<u8>,
}

impl LogEvent {
    /// Fill the event with a state snapshot and a COPY of the line body.
    /// The caller's read buffer is reused between lines and must not be
    /// aliased.
    pub fn fill(&mut self, state: State, body: &[u8]) {
        self.state = Some(state);
        self.body.clear();
        self.body.extend_from_slice(body);
    }

    pub fn state(&self) -> Option<&State> {
        self.state.as_ref()
    }

    pub fn body(&self) -> &[u8] {
        &self.body
    }

    /// Render the structured-metadata header: the state snapshot under
    /// [`SYSTEM_STATE_KEY`].
    pub fn header(&self) -> Map<String, Value> {
        let mut header = Map::new();
        if let Some(state) = &self.state {
            if let Ok(value) = serde_json::to_value(state) {
                header.insert(SYSTEM_STATE_KEY.to_string(), value);
            }
        }
        header
    }

    fn reset(&mut self) {
        self.state = None;
        self.body.clear();
    }
}

/// Free-list pool of [`LogEvent`]s.
pub struct EventPool {
    free: Mutex<Vec<LogEvent>>,
    capacity: usize,
}

impl EventPool {
    pub fn new(capacity: usize) -> Self {
        Self {
            free: Mutex::new(Vec::new()),
            capacity,
        }
    }

    /// Take an event from the pool, or allocate a fresh one if empty.
    pub fn get(&self) -> LogEvent {
        self.free.lock().unwrap().pop().unwrap_or_default()
    }

    /// Return an event for reuse. Dropped instead if the pool is full.
    pub fn put(&self, mut event: LogEvent) {
        event.reset();
        let mut free = self.free.lock().unwrap();
        if free.len() < self.capacity {
            free.push(event);
        }
    }

    pub fn pooled(&self) -> usize {
        self.free.lock().unwrap().len()
    }
}

// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Decision log implementation.

use crate::record::{DecisionPoint, DecisionRecord, RecordedDecision};
use chrono::Utc;
use parking_lot::Mutex;
use std::fs::{File, OpenOptions};
use std::io::BufWriter;
use std::path::Path;
use std::sync::Arc;
use std::time::Instant;

/// Decision log shared between the gate and its observers.
///
/// Clones share the same underlying storage.
pub struct DecisionLog {
    start: Instant,
    decisions: Arc<Mutex<Vec<RecordedDecision>>>,
    file_writer: Option<Arc<Mutex<BufWriter<File>>>>,
}

impl DecisionLog {
    /// Create a new in-memory decision log
    pub fn new() -> Self {
        Self {
            start: Instant::now(),
            decisions: Arc::new(Mutex::new(Vec::new())),
            file_writer: None,
        }
    }

    /// Create a decision log that also appends to a file (JSONL format)
    pub fn with_file(path: &Path) -> std::io::Result<Self> {
        let file = OpenOptions::new().create(true).append(true).open(path)?;
        Ok(Self {
            start: Instant::now(),
            decisions: Arc::new(Mutex::new(Vec::new())),
            file_writer: Some(Arc::new(Mutex::new(BufWriter::new(file)))),
        })
    }

    /// Record a decision
    pub fn record(&self, record: DecisionRecord) {
        let mut decisions = self.decisions.lock();
        let seq = decisions.len() as u64;
        let recorded = RecordedDecision {
            seq,
            timestamp: Utc::now(),
            elapsed: self.start.elapsed(),
            record,
        };

        decisions.push(recorded.clone());

        if let Some(ref writer) = self.file_writer {
            use std::io::Write;
            let mut w = writer.lock();
            if let Ok(json) = serde_json::to_string(&recorded) {
                let _ = writeln!(w, "{}", json);
                let _ = w.flush();
            }
        }
    }

    /// Get all recorded decisions
    pub fn decisions(&self) -> Vec<RecordedDecision> {
        self.decisions.lock().clone()
    }

    /// Get the last N decisions
    pub fn last(&self, n: usize) -> Vec<RecordedDecision> {
        let all = self.decisions.lock();
        all.iter().rev().take(n).rev().cloned().collect()
    }

    /// Count decisions matching a predicate
    pub fn count<F: Fn(&RecordedDecision) -> bool>(&self, pred: F) -> usize {
        self.decisions.lock().iter().filter(|d| pred(d)).count()
    }

    /// Find decisions taken for a page
    pub fn find_by_page(&self, page: &str) -> Vec<RecordedDecision> {
        self.decisions
            .lock()
            .iter()
            .filter(|d| d.record.page == page)
            .cloned()
            .collect()
    }

    /// Find decisions taken at one integration point
    pub fn find_by_point(&self, point: DecisionPoint) -> Vec<RecordedDecision> {
        self.decisions
            .lock()
            .iter()
            .filter(|d| d.record.point == point)
            .cloned()
            .collect()
    }

    /// Find decisions that denied the operation
    pub fn denials(&self) -> Vec<RecordedDecision> {
        self.decisions
            .lock()
            .iter()
            .filter(|d| d.record.outcome.is_denial())
            .cloned()
            .collect()
    }

    /// Get the total number of decisions
    pub fn len(&self) -> usize {
        self.decisions.lock().len()
    }

    /// Check if the log is empty
    pub fn is_empty(&self) -> bool {
        self.decisions.lock().is_empty()
    }

    /// Clear all recorded decisions
    pub fn clear(&self) {
        self.decisions.lock().clear();
    }
}

impl Default for DecisionLog {
    fn default() -> Self {
        Self::new()
    }
}

impl Clone for DecisionLog {
    fn clone(&self) -> Self {
        Self {
            start: self.start,
            decisions: Arc::clone(&self.decisions),
            file_writer: self.file_writer.as_ref().map(Arc::clone),
        }
    }
}

impl std::fmt::Debug for DecisionLog {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DecisionLog")
            .field("len", &self.len())
            .field("file", &self.file_writer.is_some())
            .finish()
    }
}

#[cfg(test)]
#[path = "log_tests.rs"]
mod tests;

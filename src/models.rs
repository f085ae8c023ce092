//! Data models for the triage system.
//!
//! This module defines the core data structures used throughout the system:
//! - Patient: registered patient information
//! - Doctor / ScheduleSlot: doctor registry and appointment-slot schedule
//! - EmergencyEntry: an entry in the emergency heap
//! - ServedEntry: an identifier in the served log
//! - TriageReport: pending/served counts
//! - TriageError: every recoverable failure the engine can report

use chrono::NaiveTime;
use std::cmp::Ordering;
use thiserror::Error;
use uuid::Uuid;

/// Errors reported by the triage engine.
///
/// All of these are expected, recoverable outcomes. None of them should
/// terminate the process; the caller decides how to present them.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TriageError {
    /// The routine queue is at capacity.
    #[error("routine queue is full")]
    QueueFull,
    /// A dequeue or peek was attempted on an empty queue.
    #[error("queue is empty")]
    QueueEmpty,
    /// Neither queue holds anyone to serve.
    #[error("no patient waiting")]
    NoPatient,
    /// The undo log is empty.
    #[error("nothing to undo")]
    NothingToUndo,
    /// The heap entry an undo tried to remove is no longer present.
    #[error("emergency entry not found")]
    EntryNotFound,
    /// An undo referenced a patient that was never registered.
    #[error("unknown patient: {0}")]
    UnknownPatient(u32),
    /// A schedule operation referenced a doctor that does not exist.
    #[error("unknown doctor: {0}")]
    UnknownDoctor(u32),
    /// A schedule slot failed validation.
    #[error("invalid slot: {0}")]
    InvalidSlot(String),
}

/// A registered patient.
///
/// Registration has upsert semantics: re-registering an id replaces the
/// record. Patients are never deleted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Patient {
    pub id: u32,
    pub name: String,
    pub age: u32,
    /// Urgency rank; lower value is served first.
    pub severity: u32,
}

impl Patient {
    pub fn new(id: u32, name: String, age: u32, severity: u32) -> Self {
        Patient {
            id,
            name,
            age,
            severity,
        }
    }
}

/// An appointment slot in a doctor's schedule.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScheduleSlot {
    pub slot_id: String,
    pub start: NaiveTime,
    pub end: NaiveTime,
}

impl ScheduleSlot {
    /// Create a new slot with validation.
    pub fn new(start: NaiveTime, end: NaiveTime) -> Result<Self, TriageError> {
        if end <= start {
            return Err(TriageError::InvalidSlot(
                "end time must be after start time".to_string(),
            ));
        }

        Ok(ScheduleSlot {
            slot_id: Uuid::new_v4().to_string(),
            start,
            end,
        })
    }
}

/// A doctor with an append-only schedule of slots.
#[derive(Debug, Clone)]
pub struct Doctor {
    pub id: u32,
    pub name: String,
    pub specialization: String,
    pub schedule: Vec<ScheduleSlot>,
}

impl Doctor {
    pub fn new(id: u32, name: String, specialization: String) -> Self {
        Doctor {
            id,
            name,
            specialization,
            schedule: Vec::new(),
        }
    }
}

/// An entry waiting in the emergency heap.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EmergencyEntry {
    pub severity: u32,
    pub patient_id: u32,
}

impl EmergencyEntry {
    pub fn new(severity: u32, patient_id: u32) -> Self {
        EmergencyEntry {
            severity,
            patient_id,
        }
    }
}

impl PartialOrd for EmergencyEntry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for EmergencyEntry {
    /// Compare entries for priority queue ordering.
    ///
    /// `BinaryHeap` pops its greatest element, so the comparison is
    /// inverted: the entry with the lexicographically smallest
    /// (severity, patient_id) pair compares greatest. Ties on severity go
    /// to the lower patient id.
    fn cmp(&self, other: &Self) -> Ordering {
        (other.severity, other.patient_id).cmp(&(self.severity, self.patient_id))
    }
}

/// An identifier recorded in the served log.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ServedEntry {
    /// An emergency patient, by patient id.
    Emergency(u32),
    /// A routine visit, by token.
    Routine(String),
}

impl std::fmt::Display for ServedEntry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ServedEntry::Emergency(pid) => write!(f, "Emergency Served: {}", pid),
            ServedEntry::Routine(token) => write!(f, "Routine Served: {}", token),
        }
    }
}

/// Pending and served counts, formatted by the caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TriageReport {
    pub pending_routine: usize,
    pub pending_emergency: usize,
    pub served: usize,
}

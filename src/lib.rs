//! Priority-based hospital triage and patient intake system.
//!
//! Routine patients wait in arrival order in a bounded circular queue;
//! emergency patients are served by urgency from a min-heap; the single
//! most recent mutating action can be undone. The engine is purely
//! in-memory for the lifetime of one process run.

pub mod models;
pub mod queue;
pub mod triage;
pub mod undo;

pub use models::{
    Doctor, EmergencyEntry, Patient, ScheduleSlot, ServedEntry, TriageError, TriageReport,
};
pub use triage::{TriageService, DEFAULT_CAPACITY};
pub use undo::UndoAction;

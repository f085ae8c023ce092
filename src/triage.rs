//! Triage orchestration.
//!
//! `TriageService` owns both waiting lines, the undo log, the served log
//! and the patient/doctor registries, and is the only type callers touch.
//! Every mutating call touches exactly one queue and then records one
//! undo action; `undo` pops one record and applies its exact inverse.
//! Emergencies preempt routine patients unconditionally.

use crate::models::{
    Doctor, EmergencyEntry, Patient, ScheduleSlot, ServedEntry, TriageError, TriageReport,
};
use crate::queue::{BoundedFifoQueue, EmergencyHeap};
use crate::undo::{UndoAction, UndoLog};
use chrono::NaiveTime;
use std::collections::HashMap;

/// Routine-queue capacity used when none is given.
pub const DEFAULT_CAPACITY: usize = 50;

/// The in-memory triage engine.
///
/// A plain value with no ambient state; construct one and pass it by
/// mutable reference to whoever drives it. Single-threaded: every call
/// runs to completion before the next is accepted.
#[derive(Debug, Clone)]
pub struct TriageService {
    patients: HashMap<u32, Patient>,
    doctors: HashMap<u32, Doctor>,
    routine: BoundedFifoQueue,
    emergencies: EmergencyHeap,
    undo_log: UndoLog,
    served: Vec<ServedEntry>,
}

impl TriageService {
    /// Create an engine with the given routine-queue capacity.
    pub fn new(capacity: usize) -> Self {
        TriageService {
            patients: HashMap::new(),
            doctors: HashMap::new(),
            routine: BoundedFifoQueue::new(capacity),
            emergencies: EmergencyHeap::new(),
            undo_log: UndoLog::new(),
            served: Vec::new(),
        }
    }

    /// Register a patient, replacing any existing record for the id.
    ///
    /// Not undoable: registration is administrative, not a queue
    /// mutation.
    pub fn register_patient(&mut self, id: u32, name: String, age: u32, severity: u32) {
        self.patients.insert(id, Patient::new(id, name, age, severity));
    }

    /// Look up a registered patient.
    pub fn patient(&self, id: u32) -> Option<&Patient> {
        self.patients.get(&id)
    }

    /// Register a doctor, replacing any existing record for the id.
    pub fn add_doctor(&mut self, id: u32, name: String, specialization: String) {
        self.doctors.insert(id, Doctor::new(id, name, specialization));
    }

    /// Look up a registered doctor.
    pub fn doctor(&self, id: u32) -> Option<&Doctor> {
        self.doctors.get(&id)
    }

    /// Append a validated slot to a doctor's schedule.
    ///
    /// Returns the generated slot id. The schedule is an inert ordered
    /// list; nothing ever books against it.
    pub fn schedule_slot(
        &mut self,
        doctor_id: u32,
        start: NaiveTime,
        end: NaiveTime,
    ) -> Result<String, TriageError> {
        let slot = ScheduleSlot::new(start, end)?;
        let doctor = self
            .doctors
            .get_mut(&doctor_id)
            .ok_or(TriageError::UnknownDoctor(doctor_id))?;
        let slot_id = slot.slot_id.clone();
        doctor.schedule.push(slot);
        Ok(slot_id)
    }

    /// Queue a routine visit token.
    ///
    /// The token is opaque and need not reference a registered patient.
    pub fn book_routine(&mut self, token: String) -> Result<(), TriageError> {
        self.routine.enqueue(token.clone())?;
        self.undo_log.record(UndoAction::Book { token });
        Ok(())
    }

    /// Admit an emergency case. The heap is unbounded, so this never
    /// fails, registered patient or not.
    pub fn emergency_in(&mut self, patient_id: u32, severity: u32) {
        self.emergencies.push(EmergencyEntry::new(severity, patient_id));
        self.undo_log.record(UndoAction::EmergencyAdd {
            severity,
            patient_id,
        });
    }

    /// Dispatch the next patient.
    ///
    /// A non-empty emergency heap is always drained before any routine
    /// token is considered, regardless of arrival order or queue age.
    pub fn serve_next(&mut self) -> Result<ServedEntry, TriageError> {
        if !self.emergencies.is_empty() {
            let entry = self.emergencies.pop()?;
            let served = ServedEntry::Emergency(entry.patient_id);
            self.served.push(served.clone());
            self.undo_log.record(UndoAction::ServeEmergency {
                patient_id: entry.patient_id,
            });
            return Ok(served);
        }
        if self.routine.is_empty() {
            return Err(TriageError::NoPatient);
        }
        let token = self.routine.dequeue()?;
        let served = ServedEntry::Routine(token.clone());
        self.served.push(served.clone());
        self.undo_log.record(UndoAction::ServeRoutine { token });
        Ok(served)
    }

    /// Revert the single most recent mutating action.
    ///
    /// Returns the reverted action. The record is consumed whether or not
    /// its inverse succeeds; a failed inverse leaves the queues and the
    /// served log untouched.
    pub fn undo(&mut self) -> Result<UndoAction, TriageError> {
        let action = self
            .undo_log
            .pop_last()
            .ok_or(TriageError::NothingToUndo)?;

        match &action {
            UndoAction::Book { .. } => {
                // The rear slot is the booking being undone; the token is
                // not re-validated (single-level undo guarantees the
                // match).
                self.routine.unenqueue_last();
            }
            UndoAction::EmergencyAdd {
                severity,
                patient_id,
            } => {
                self.emergencies
                    .remove_by_value(&EmergencyEntry::new(*severity, *patient_id))?;
            }
            UndoAction::ServeEmergency { patient_id } => {
                // Re-queued at the registered severity, not the severity
                // the entry was admitted with.
                let severity = self
                    .patients
                    .get(patient_id)
                    .map(|p| p.severity)
                    .ok_or(TriageError::UnknownPatient(*patient_id))?;
                self.emergencies
                    .push(EmergencyEntry::new(severity, *patient_id));
                self.strike_served(&ServedEntry::Emergency(*patient_id));
            }
            UndoAction::ServeRoutine { token } => {
                self.routine.enqueue(token.clone())?;
                self.strike_served(&ServedEntry::Routine(token.clone()));
            }
        }

        Ok(action)
    }

    /// Remove the most recent matching entry from the served log.
    fn strike_served(&mut self, entry: &ServedEntry) {
        if let Some(pos) = self.served.iter().rposition(|e| e == entry) {
            self.served.remove(pos);
        }
    }

    /// Pending and served counts.
    pub fn report(&self) -> TriageReport {
        TriageReport {
            pending_routine: self.routine.len(),
            pending_emergency: self.emergencies.len(),
            served: self.served.len(),
        }
    }

    /// Identifiers dispatched so far, oldest first.
    pub fn served(&self) -> &[ServedEntry] {
        &self.served
    }

    pub fn capacity(&self) -> usize {
        self.routine.capacity()
    }
}

impl Default for TriageService {
    fn default() -> Self {
        Self::new(DEFAULT_CAPACITY)
    }
}

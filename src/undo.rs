//! Undo log: a LIFO stack of reversible action records.
//!
//! Every mutating call on the service pushes exactly one record here.
//! Only the single most recent record is ever revertible; reverting it
//! does not re-open the one before it unless a later mutation is itself
//! undone first. No peeking, no redo.

/// A recorded mutating action, carrying exactly the fields its inverse
/// needs. Consumed exactly once by undo.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UndoAction {
    /// A routine booking; inverse rewinds the queue's rear slot.
    Book { token: String },
    /// An emergency admission; inverse removes the exact heap entry.
    EmergencyAdd { severity: u32, patient_id: u32 },
    /// An emergency serve; inverse re-queues the patient at their
    /// registered severity and strikes them from the served log.
    ServeEmergency { patient_id: u32 },
    /// A routine serve; inverse re-enqueues the token and strikes it
    /// from the served log.
    ServeRoutine { token: String },
}

/// Unbounded stack of undo records.
#[derive(Debug, Clone, Default)]
pub struct UndoLog {
    stack: Vec<UndoAction>,
}

impl UndoLog {
    pub fn new() -> Self {
        UndoLog { stack: Vec::new() }
    }

    /// Push a record on top of the stack. Never fails.
    pub fn record(&mut self, action: UndoAction) {
        self.stack.push(action);
    }

    /// Remove and return the most recent record, if any.
    pub fn pop_last(&mut self) -> Option<UndoAction> {
        self.stack.pop()
    }

    pub fn len(&self) -> usize {
        self.stack.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stack.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pop_returns_records_last_in_first_out() {
        let mut log = UndoLog::new();
        log.record(UndoAction::Book {
            token: "T1".to_string(),
        });
        log.record(UndoAction::EmergencyAdd {
            severity: 2,
            patient_id: 7,
        });
        assert_eq!(
            log.pop_last(),
            Some(UndoAction::EmergencyAdd {
                severity: 2,
                patient_id: 7
            })
        );
        assert_eq!(
            log.pop_last(),
            Some(UndoAction::Book {
                token: "T1".to_string()
            })
        );
        assert_eq!(log.pop_last(), None);
    }
}

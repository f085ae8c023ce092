//! Property tests for the queue and heap guarantees: capacity bounds,
//! FIFO order, heap ordering, and undo as an exact inverse.

use easytriage::queue::EmergencyHeap;
use easytriage::{EmergencyEntry, ServedEntry, TriageError, TriageService};
use proptest::prelude::*;

proptest! {
    #[test]
    fn fifo_order_matches_booking_order(
        tokens in prop::collection::vec("[A-Z][0-9]{1,3}", 1..40)
    ) {
        let mut svc = TriageService::new(64);
        for t in &tokens {
            svc.book_routine(t.clone()).unwrap();
        }
        for t in &tokens {
            prop_assert_eq!(svc.serve_next().unwrap(), ServedEntry::Routine(t.clone()));
        }
        prop_assert_eq!(svc.serve_next(), Err(TriageError::NoPatient));
    }

    #[test]
    fn capacity_bound_holds_for_any_capacity(
        cap in 1usize..24,
        extra in 1usize..8
    ) {
        let mut svc = TriageService::new(cap);
        for i in 0..cap {
            svc.book_routine(format!("T{}", i)).unwrap();
        }
        for i in 0..extra {
            prop_assert_eq!(
                svc.book_routine(format!("X{}", i)),
                Err(TriageError::QueueFull)
            );
        }
        // One serve frees exactly one slot.
        svc.serve_next().unwrap();
        prop_assert!(svc.book_routine("Y".to_string()).is_ok());
        prop_assert_eq!(svc.report().pending_routine, cap);
    }

    #[test]
    fn heap_pops_in_nondecreasing_key_order(
        cases in prop::collection::vec((0u32..10, 0u32..100), 1..50)
    ) {
        let mut heap = EmergencyHeap::new();
        for (severity, patient_id) in &cases {
            heap.push(EmergencyEntry::new(*severity, *patient_id));
        }

        let mut popped = Vec::with_capacity(cases.len());
        while !heap.is_empty() {
            let entry = heap.pop().unwrap();
            popped.push((entry.severity, entry.patient_id));
        }

        let mut expected: Vec<(u32, u32)> = cases.clone();
        expected.sort();
        prop_assert_eq!(popped, expected);
    }

    #[test]
    fn undo_restores_counts_after_any_single_action(
        seed_tokens in prop::collection::vec("[a-z]{2,5}", 0..5),
        seed_emergencies in prop::collection::vec((1u32..5, 1u32..20), 0..5),
        action in 0u8..4
    ) {
        let mut svc = TriageService::new(16);
        for (severity, pid) in &seed_emergencies {
            // Registered severity matches the admitted one so a serve
            // undo restores the same heap entry.
            svc.register_patient(*pid, format!("p{}", pid), 30, *severity);
            svc.emergency_in(*pid, *severity);
        }
        for t in &seed_tokens {
            svc.book_routine(t.clone()).unwrap();
        }

        let report_before = svc.report();
        let served_before = svc.served().to_vec();

        let mutated = match action {
            0 => svc.book_routine("probe".to_string()).is_ok(),
            1 => {
                svc.register_patient(99, "probe".to_string(), 50, 1);
                svc.emergency_in(99, 1);
                true
            }
            _ => svc.serve_next().is_ok(),
        };

        if mutated {
            svc.undo().unwrap();
        }

        prop_assert_eq!(svc.report(), report_before);
        prop_assert_eq!(svc.served(), served_before.as_slice());
    }
}

//! Command-line interface for the triage system.
//!
//! Interactive menu loop over a single `TriageService` value. The loop
//! owns all prompting and formatting; the engine itself never prints.

use chrono::NaiveTime;
use easytriage::{TriageError, TriageService, UndoAction};
use std::io::{self, Write};

struct TriageCli {
    service: TriageService,
    running: bool,
}

impl TriageCli {
    fn new() -> Self {
        TriageCli {
            service: TriageService::default(),
            running: true,
        }
    }

    fn print_header(&self) {
        println!("\n{}", "=".repeat(60));
        println!("       HOSPITAL TRIAGE SYSTEM");
        println!("{}", "=".repeat(60));
    }

    fn print_menu(&self) {
        println!("\n--- Main Menu ---");
        println!("1. Register patient");
        println!("2. Book routine appointment");
        println!("3. Add emergency case");
        println!("4. Serve next");
        println!("5. Undo last action");
        println!("6. Report");
        println!("7. Add doctor");
        println!("8. Schedule doctor slot");
        println!("9. Exit");
        println!("{}", "-".repeat(20));
    }

    fn get_input(&self, prompt: &str, default: Option<&str>) -> String {
        if let Some(def) = default {
            print!("{} [{}]: ", prompt, def);
        } else {
            print!("{}: ", prompt);
        }
        io::stdout().flush().unwrap();

        let mut input = String::new();
        io::stdin().read_line(&mut input).unwrap();
        let input = input.trim();

        if input.is_empty() {
            default.unwrap_or("").to_string()
        } else {
            input.to_string()
        }
    }

    fn get_int_input(&self, prompt: &str, default: Option<u32>) -> u32 {
        loop {
            let default_str = default.map(|d| d.to_string());
            let input = self.get_input(prompt, default_str.as_deref());

            if let Ok(value) = input.parse::<u32>() {
                return value;
            }
            println!("Please enter a valid number");
        }
    }

    fn get_time_input(&self, prompt: &str, default: &str) -> NaiveTime {
        loop {
            let input = self.get_input(prompt, Some(default));
            if let Ok(time) = NaiveTime::parse_from_str(&input, "%H:%M") {
                return time;
            }
            println!("Please enter a time as HH:MM");
        }
    }

    fn register_patient(&mut self) {
        println!("\n--- Register Patient ---");
        let id = self.get_int_input("Patient ID", None);
        let name = self.get_input("Name", None);
        let age = self.get_int_input("Age", None);
        let severity = self.get_int_input("Severity (lower = more urgent)", Some(5));

        self.service.register_patient(id, name, age, severity);
        println!("Registered");
    }

    fn book_routine(&mut self) {
        println!("\n--- Book Routine Appointment ---");
        let token = self.get_input("Token", None);

        match self.service.book_routine(token) {
            Ok(()) => println!("Booked"),
            Err(e) => println!("Could not book: {}", e),
        }
    }

    fn add_emergency(&mut self) {
        println!("\n--- Add Emergency Case ---");
        let patient_id = self.get_int_input("Patient ID", None);
        let severity = self.get_int_input("Severity (lower = more urgent)", Some(1));

        self.service.emergency_in(patient_id, severity);
        println!("Emergency added");
    }

    fn serve_next(&mut self) {
        match self.service.serve_next() {
            Ok(served) => println!("\n{}", served),
            Err(TriageError::NoPatient) => println!("\nNo patient waiting"),
            Err(e) => println!("\nCould not serve: {}", e),
        }
    }

    fn undo(&mut self) {
        match self.service.undo() {
            Ok(action) => {
                let what = match action {
                    UndoAction::Book { token } => format!("booking of {}", token),
                    UndoAction::EmergencyAdd { patient_id, .. } => {
                        format!("emergency admission of {}", patient_id)
                    }
                    UndoAction::ServeEmergency { patient_id } => {
                        format!("emergency serve of {}", patient_id)
                    }
                    UndoAction::ServeRoutine { token } => format!("routine serve of {}", token),
                };
                println!("\nReverted {}", what);
            }
            Err(TriageError::NothingToUndo) => println!("\nNothing to undo"),
            Err(e) => println!("\nCould not undo: {}", e),
        }
    }

    fn report(&self) {
        let report = self.service.report();
        println!("\n-----REPORT-----");
        println!("Pending Routine:   {}", report.pending_routine);
        println!("Pending Emergency: {}", report.pending_emergency);
        println!("Served:            {}", report.served);
        println!("----------------");
    }

    fn add_doctor(&mut self) {
        println!("\n--- Add Doctor ---");
        let id = self.get_int_input("Doctor ID", None);
        let name = self.get_input("Name", None);
        let specialization = self.get_input("Specialization", Some("General"));

        self.service.add_doctor(id, name, specialization);
        println!("Doctor added");
    }

    fn schedule_slot(&mut self) {
        println!("\n--- Schedule Doctor Slot ---");
        let doctor_id = self.get_int_input("Doctor ID", None);
        let start = self.get_time_input("Start time", "10:00");
        let end = self.get_time_input("End time", "10:30");

        match self.service.schedule_slot(doctor_id, start, end) {
            Ok(slot_id) => println!("Slot scheduled ({})", &slot_id[..8]),
            Err(e) => println!("Could not schedule: {}", e),
        }
    }

    fn run(&mut self) {
        self.print_header();

        while self.running {
            self.print_menu();

            let choice = self.get_int_input("Enter choice", Some(6));

            match choice {
                1 => self.register_patient(),
                2 => self.book_routine(),
                3 => self.add_emergency(),
                4 => self.serve_next(),
                5 => self.undo(),
                6 => self.report(),
                7 => self.add_doctor(),
                8 => self.schedule_slot(),
                9 => {
                    self.running = false;
                    println!("\nGoodbye!");
                }
                _ => println!("Invalid choice"),
            }
        }
    }
}

fn main() {
    let mut cli = TriageCli::new();
    cli.run();
}

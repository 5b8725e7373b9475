//! Interactive text menu driving a [`TreatmentController`].
//!
//! The driver owns no domain state beyond the controller it drives. It collects intake fields,
//! allocates ids, maps menu numbers onto admit/complete/exit and prints the outcome.

use crate::render::{SnapshotView, CLEAR_SCREEN};
use er_core::{Admission, NonEmptyText, Patient, TreatmentController, TreatmentError};
use er_ids::PatientIdGenerator;
use std::io::{self, BufRead, Write};

/// A parsed menu line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Selection {
    Admit,
    Complete,
    Exit,
    /// A number that is not on the menu.
    Unknown,
    /// Not a number at all.
    Invalid,
}

impl Selection {
    pub fn parse(line: &str) -> Self {
        match line.trim().parse::<i64>() {
            Ok(1) => Selection::Admit,
            Ok(2) => Selection::Complete,
            Ok(3) => Selection::Exit,
            Ok(_) => Selection::Unknown,
            Err(_) => Selection::Invalid,
        }
    }
}

pub struct MenuDriver<R, W, G> {
    input: R,
    output: W,
    ids: G,
    controller: TreatmentController,
    clear_screen: bool,
}

impl<R: BufRead, W: Write, G: PatientIdGenerator> MenuDriver<R, W, G> {
    pub fn new(input: R, output: W, ids: G, controller: TreatmentController) -> Self {
        Self {
            input,
            output,
            ids,
            controller,
            clear_screen: true,
        }
    }

    pub fn clear_screen(mut self, clear: bool) -> Self {
        self.clear_screen = clear;
        self
    }

    pub fn controller(&self) -> &TreatmentController {
        &self.controller
    }

    /// Runs until the operator picks exit or input ends.
    pub fn run(&mut self) -> io::Result<()> {
        loop {
            self.draw()?;

            let Some(line) = self.read_line()? else {
                return Ok(());
            };
            match Selection::parse(&line) {
                Selection::Invalid => continue,
                Selection::Exit => return Ok(()),
                Selection::Admit => self.admit()?,
                Selection::Complete => self.complete()?,
                Selection::Unknown => {}
            }

            write!(self.output, "\n Press Enter...")?;
            self.output.flush()?;
            if self.read_line()?.is_none() {
                return Ok(());
            }
        }
    }

    fn draw(&mut self) -> io::Result<()> {
        if self.clear_screen {
            write!(self.output, "{CLEAR_SCREEN}")?;
        }
        write!(self.output, "{}", SnapshotView(&self.controller.snapshot()))?;
        writeln!(self.output)?;
        writeln!(self.output, " 1. New Emergency Patient (PUSH)")?;
        writeln!(self.output, " 2. Treatment Complete (POP)")?;
        writeln!(self.output, " 3. Exit")?;
        write!(self.output, " Select: ")?;
        self.output.flush()
    }

    /// Reads one line without its terminator, or `None` at end of input.
    fn read_line(&mut self) -> io::Result<Option<String>> {
        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        Ok(Some(line.trim_end_matches(['\r', '\n']).to_string()))
    }

    fn prompt(&mut self, label: &str) -> io::Result<Option<String>> {
        write!(self.output, " {label}: ")?;
        self.output.flush()?;
        self.read_line()
    }

    fn admit(&mut self) -> io::Result<()> {
        writeln!(self.output, "\n >>> INCOMING EMERGENCY <<<")?;
        let Some(name) = self.prompt("Enter Patient Name")? else {
            return Ok(());
        };
        let Some(condition) = self.prompt("Enter Condition")? else {
            return Ok(());
        };
        let Some(severity) = self.prompt("Severity (Critical/Severe)")? else {
            return Ok(());
        };

        let name = match NonEmptyText::new(&name) {
            Ok(name) => name,
            Err(_) => {
                writeln!(self.output, " [ERROR] Patient name cannot be empty.")?;
                return Ok(());
            }
        };
        let previous = self.controller.active().map(|p| p.name().to_string());
        if !self.controller.can_admit() {
            return self.refuse(previous.as_deref(), name.as_str());
        }

        let id = match self.ids.next_id() {
            Ok(id) => id,
            Err(e) => {
                writeln!(self.output, " [ERROR] {e}")?;
                return Ok(());
            }
        };

        let patient = Patient::new(id, name, condition.trim(), severity.trim());
        let incoming = patient.name().to_string();

        match self.controller.admit(patient) {
            Ok(admission) => {
                if let Admission::InterruptedWithEviction { evicted, .. } = &admission {
                    writeln!(
                        self.output,
                        "\n [!] HOLD ZONE FULL: {} (#{}) moved out to make room.",
                        evicted.name(),
                        evicted.id()
                    )?;
                }
                if let (Some(_), Some(previous)) = (admission.suspended(), previous) {
                    writeln!(self.output, "\n [!] INTERRUPTION: Suspending {previous}...")?;
                }
                writeln!(self.output, " [SUCCESS] Doctor now treating {incoming}.")?;
            }
            Err(TreatmentError::CapacityExceeded { .. }) => {
                self.refuse(previous.as_deref(), &incoming)?;
            }
            Err(e) => writeln!(self.output, " [ERROR] {e}")?,
        }
        Ok(())
    }

    /// Reports an admission turned away because the hold zone is full. No id is spent on it.
    fn refuse(&mut self, previous: Option<&str>, incoming: &str) -> io::Result<()> {
        writeln!(
            self.output,
            "\n [ERROR] Hold Zone Full ({})! Cannot suspend {}; {incoming} was not admitted.",
            self.controller.capacity(),
            previous.unwrap_or("the active patient")
        )
    }

    fn complete(&mut self) -> io::Result<()> {
        match self.controller.complete_treatment() {
            Ok(discharge) => {
                writeln!(
                    self.output,
                    "\n [DONE] COMPLETED: Discharging {}.",
                    discharge.discharged.name()
                )?;
                match self.controller.active() {
                    Some(p) if discharge.resumed.is_some() => writeln!(
                        self.output,
                        " [RESUME] Retrieved {} from stack.",
                        p.name()
                    )?,
                    _ => writeln!(self.output, " [INFO] No suspended patients.")?,
                }
            }
            Err(TreatmentError::NoActivePatient) => {
                writeln!(self.output, "\n [INFO] No active patient.")?
            }
            Err(e) => writeln!(self.output, " [ERROR] {e}")?,
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use er_core::{CoreConfig, OverflowPolicy, TreatmentState};
    use er_ids::{RandomIdGenerator, SequentialIdGenerator};
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use std::io::Cursor;

    fn admit_lines(name: &str, condition: &str, severity: &str) -> String {
        format!("1\n{name}\n{condition}\n{severity}\n\n")
    }

    fn run_script(
        script: &str,
        controller: TreatmentController,
    ) -> (TreatmentController, String) {
        let mut out = Vec::new();
        let mut driver = MenuDriver::new(
            Cursor::new(script.to_string()),
            &mut out,
            SequentialIdGenerator::default(),
            controller,
        )
        .clear_screen(false);
        driver.run().unwrap();
        let controller = driver.controller().clone();
        drop(driver);
        (controller, String::from_utf8(out).unwrap())
    }

    #[test]
    fn parses_menu_selections() {
        assert_eq!(Selection::parse("1"), Selection::Admit);
        assert_eq!(Selection::parse(" 2 "), Selection::Complete);
        assert_eq!(Selection::parse("3"), Selection::Exit);
        assert_eq!(Selection::parse("7"), Selection::Unknown);
        assert_eq!(Selection::parse("-1"), Selection::Unknown);
        assert_eq!(Selection::parse("admit"), Selection::Invalid);
        assert_eq!(Selection::parse(""), Selection::Invalid);
    }

    #[test]
    fn admit_interrupt_and_resume() {
        let script = [
            admit_lines("Alice", "broken arm", "Severe"),
            admit_lines("Bob", "cardiac arrest", "Critical"),
            "2\n\n".to_string(),
            "3\n".to_string(),
        ]
        .concat();

        let (c, out) = run_script(&script, TreatmentController::with_capacity(5));
        assert!(out.contains("[SUCCESS] Doctor now treating Alice."));
        assert!(out.contains("[!] INTERRUPTION: Suspending Alice..."));
        assert!(out.contains("[DONE] COMPLETED: Discharging Bob."));
        assert!(out.contains("[RESUME] Retrieved Alice from stack."));
        assert_eq!(c.active().map(Patient::name), Some("Alice"));
        assert_eq!(c.active().map(|p| p.id().get()), Some(1000));
    }

    #[test]
    fn complete_while_idle_reports_no_active_patient() {
        let (c, out) = run_script("2\n\n2\n\n3\n", TreatmentController::with_capacity(5));
        assert_eq!(out.matches("[INFO] No active patient.").count(), 2);
        assert_eq!(c.state(), TreatmentState::Idle);
    }

    #[test]
    fn invalid_input_redraws_menu_without_waiting() {
        let (_, out) = run_script("abc\n3\n", TreatmentController::with_capacity(5));
        assert_eq!(out.matches(" Select: ").count(), 2);
        assert!(!out.contains("Press Enter"));
    }

    #[test]
    fn blank_name_is_refused() {
        let script = [admit_lines("   ", "x", "y"), "3\n".to_string()].concat();
        let (c, out) = run_script(&script, TreatmentController::with_capacity(5));
        assert!(out.contains("[ERROR] Patient name cannot be empty."));
        assert_eq!(c.state(), TreatmentState::Idle);
    }

    #[test]
    fn full_hold_zone_refuses_admission() {
        let script = [
            admit_lines("A", "a", "Severe"),
            admit_lines("B", "b", "Severe"),
            admit_lines("C", "c", "Critical"),
            "3\n".to_string(),
        ]
        .concat();

        let (c, out) = run_script(&script, TreatmentController::with_capacity(1));
        assert!(out.contains("Cannot suspend B; C was not admitted."));
        assert_eq!(c.active().map(Patient::name), Some("B"));
        assert_eq!(c.stack_view().map(Patient::name).collect::<Vec<_>>(), ["A"]);
    }

    #[test]
    fn refused_admissions_leave_ids_for_later_patients() {
        let script = [
            admit_lines("A", "a", "Severe"),
            admit_lines("B", "b", "Severe"),
            admit_lines("C", "c", "Critical"),
            admit_lines("C", "c", "Critical"),
            admit_lines("C", "c", "Critical"),
            "2\n\n".to_string(),
            admit_lines("D", "d", "Critical"),
            "3\n".to_string(),
        ]
        .concat();

        let (c, out) = run_script(&script, TreatmentController::with_capacity(1));
        assert_eq!(out.matches("C was not admitted.").count(), 3);
        assert_eq!(c.active().map(Patient::name), Some("D"));
        assert_eq!(c.active().map(|p| p.id().get()), Some(1002));
    }

    #[test]
    fn evict_oldest_is_announced() {
        let cfg = CoreConfig::new(1, OverflowPolicy::EvictOldest).unwrap();
        let script = [
            admit_lines("A", "a", "Severe"),
            admit_lines("B", "b", "Severe"),
            admit_lines("C", "c", "Critical"),
        ]
        .concat();

        let (c, out) = run_script(&script, TreatmentController::new(&cfg));
        assert!(out.contains("HOLD ZONE FULL: A (#1000) moved out"));
        assert_eq!(c.active().map(Patient::name), Some("C"));
    }

    #[test]
    fn end_of_input_exits_cleanly() {
        let (c, out) = run_script("1\nHalf", TreatmentController::with_capacity(5));
        assert!(out.contains("Enter Condition"));
        assert_eq!(c.state(), TreatmentState::Idle);
    }

    #[test]
    fn clears_screen_when_enabled() {
        let mut out = Vec::new();
        let mut driver = MenuDriver::new(
            Cursor::new("3\n"),
            &mut out,
            RandomIdGenerator::with_rng(StdRng::seed_from_u64(3)),
            TreatmentController::with_capacity(5),
        );
        driver.run().unwrap();
        drop(driver);
        assert!(String::from_utf8(out).unwrap().starts_with(CLEAR_SCREEN));
    }
}

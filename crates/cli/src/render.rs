//! Text rendering of a treatment snapshot.

use er_core::{Patient, Snapshot};
use std::fmt;

/// ANSI sequence that clears the terminal and homes the cursor.
pub const CLEAR_SCREEN: &str = "\x1b[2J\x1b[1;1H";

const RULE: &str = "==============================================";
const BOX_WIDTH: usize = 26;
const STACK_WIDTH: usize = 30;

/// Pads or truncates `text` to exactly `width` characters.
fn fit(text: &str, width: usize) -> String {
    let mut out: String = text.chars().take(width).collect();
    let len = out.chars().count();
    out.extend(std::iter::repeat(' ').take(width - len));
    out
}

fn doctor_box(f: &mut fmt::Formatter<'_>, active: Option<&Patient>) -> fmt::Result {
    let lines: [String; 3] = match active {
        Some(p) => [
            "Currently Treating:".to_string(),
            format!("{} (#{})", p.name(), p.id()),
            p.severity().to_string(),
        ],
        None => [
            "DOCTOR IS IDLE".to_string(),
            "Waiting for new patient".to_string(),
            String::new(),
        ],
    };

    writeln!(f, "      {}", "_".repeat(BOX_WIDTH + 2))?;
    writeln!(f, "     /{}\\", " ".repeat(BOX_WIDTH + 2))?;
    for line in &lines {
        writeln!(f, "     | {} |", fit(line, BOX_WIDTH))?;
    }
    writeln!(f, "     \\{}/", "_".repeat(BOX_WIDTH + 2))
}

fn stack_panel(f: &mut fmt::Formatter<'_>, suspended: &[Patient], capacity: usize) -> fmt::Result {
    let border = format!("  ||{}||", "=".repeat(STACK_WIDTH));
    let divider = format!("  ||{}||", "-".repeat(STACK_WIDTH));
    let row = |text: &str| format!("  || {} ||", fit(text, STACK_WIDTH - 2));

    writeln!(
        f,
        "{}",
        row(&format!("SUSPENDED PATIENTS {}/{}", suspended.len(), capacity))
    )?;
    writeln!(f, "{border}")?;
    if suspended.is_empty() {
        writeln!(f, "{}", row("        (Empty)"))?;
    } else {
        // Numbered from the bottom, so the top record carries the highest number.
        for (depth, p) in suspended.iter().enumerate() {
            let position = suspended.len() - depth;
            writeln!(f, "{}", row(&format!("[{}] {}", position, p.name())))?;
            writeln!(f, "{}", row(&format!("Reason: {}", p.condition())))?;
            writeln!(f, "{divider}")?;
        }
    }
    writeln!(f, "{border}")
}

/// Screen view of a snapshot: the doctor box followed by the holding area, top first.
pub struct SnapshotView<'a>(pub &'a Snapshot);

impl fmt::Display for SnapshotView<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{RULE}")?;
        writeln!(f, "     ER DOCTOR STACK INTERRUPTION SYSTEM")?;
        writeln!(f, "{RULE}")?;
        writeln!(f)?;
        doctor_box(f, self.0.active.as_ref())?;
        writeln!(f)?;
        stack_panel(f, &self.0.suspended, self.0.capacity)?;
        writeln!(f)?;
        writeln!(f, "{RULE}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use er_core::{PatientId, TreatmentController};

    fn patient(id: u32, name: &str, condition: &str) -> Patient {
        Patient::from_intake(PatientId::new(id), name, condition, "Critical").unwrap()
    }

    #[test]
    fn fit_pads_and_truncates() {
        assert_eq!(fit("ab", 4), "ab  ");
        assert_eq!(fit("abcdef", 4), "abcd");
        assert_eq!(fit("åäö", 3), "åäö");
    }

    #[test]
    fn idle_doctor_and_empty_stack() {
        let c = TreatmentController::with_capacity(5);
        let text = SnapshotView(&c.snapshot()).to_string();
        assert!(text.contains("DOCTOR IS IDLE"));
        assert!(text.contains("(Empty)"));
        assert!(text.contains("SUSPENDED PATIENTS 0/5"));
    }

    #[test]
    fn shows_active_patient_and_stack_top_first() {
        let mut c = TreatmentController::with_capacity(3);
        c.admit(patient(1001, "Alice", "broken arm")).unwrap();
        c.admit(patient(1002, "Bob", "burns")).unwrap();
        c.admit(patient(1003, "Cara", "cardiac arrest")).unwrap();

        let text = SnapshotView(&c.snapshot()).to_string();
        assert!(text.contains("Currently Treating:"));
        assert!(text.contains("Cara (#1003)"));
        assert!(text.contains("Critical"));

        let bob = text.find("[2] Bob").unwrap();
        let alice = text.find("[1] Alice").unwrap();
        assert!(bob < alice);
        assert!(text.contains("Reason: broken arm"));
    }

    #[test]
    fn view_writes_every_section_in_order() {
        let c = TreatmentController::with_capacity(1);
        let text = SnapshotView(&c.snapshot()).to_string();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.first(), Some(&RULE));
        assert_eq!(lines.last(), Some(&RULE));
        assert_eq!(text.matches(RULE).count(), 3);
        assert_eq!(lines.len(), 17);
    }

    #[test]
    fn every_line_in_a_panel_has_the_same_width() {
        let mut c = TreatmentController::with_capacity(2);
        c.admit(patient(1, "A name far too long to fit inside the box", "x")).unwrap();
        c.admit(patient(2, "B", "a very long reason that overflows the panel")).unwrap();

        let text = SnapshotView(&c.snapshot()).to_string();
        let widths: Vec<usize> = text
            .lines()
            .filter(|l| l.starts_with("  ||"))
            .map(|l| l.chars().count())
            .collect();
        assert!(!widths.is_empty());
        assert!(widths.iter().all(|w| *w == widths[0]));
    }
}

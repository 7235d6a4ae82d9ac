use super::super::app::App;
use installer_core::{StepDescriptor, StepSequence};

/// Step tree as text: groups as headings, hidden children omitted, visible
/// leaves numbered for jumping.
pub(crate) fn build_step_sidebar(app: &App) -> String {
    let sequence = app.wizard.sequence();
    let current = sequence.index_of(app.current_step());
    let mut lines = Vec::new();
    for step in app.wizard.steps() {
        if step.children().is_empty() {
            lines.push(leaf_line(&step, &sequence, current, ""));
            continue;
        }
        lines.push(format!("  {}", step.label));
        for child in step.children().iter().filter(|child| !child.is_hidden) {
            lines.push(leaf_line(child, &sequence, current, "  "));
        }
    }
    lines.join("\n")
}

fn leaf_line(
    step: &StepDescriptor,
    sequence: &StepSequence,
    current: Option<usize>,
    indent: &str,
) -> String {
    let index = sequence.index_of(step.id);
    let marker = match (index, current) {
        (Some(i), Some(c)) if i == c => "▶",
        (Some(i), Some(c)) if i < c => "✓",
        _ => " ",
    };
    let number = index.map(|i| format!("{}.", i + 1)).unwrap_or_default();
    format!("{} {}{} {}", marker, indent, number, step.label)
}

#[cfg(test)]
mod tests {
    use super::*;
    use installer_core::session::MemorySession;
    use installer_core::{Wizard, WizardInputs};

    #[test]
    fn sidebar_numbers_visible_steps_only() {
        let wizard = Wizard::new(
            WizardInputs {
                is_boot_iso: true,
                ..WizardInputs::default()
            },
            Box::new(MemorySession::new()),
        );
        let sidebar = build_step_sidebar(&App::new(wizard));
        let lines: Vec<&str> = sidebar.lines().collect();
        assert_eq!(lines[0], "▶ 1. Welcome");
        assert_eq!(lines[2], "  Disk configuration");
        assert_eq!(lines[3], "    3. Disk encryption");
        assert!(!sidebar.contains("Mount point mapping"));
        assert_eq!(lines.len(), 5);
    }
}

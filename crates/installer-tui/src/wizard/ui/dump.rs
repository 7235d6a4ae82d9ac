use super::super::app::App;
use super::content::{expected_actions, step_lines};
use installer_core::steps::find_step;
use installer_core::StepId;

pub fn dump_step(app: &App, step: StepId) -> String {
    let steps = app.wizard.steps();
    let data = find_step(&steps, step).and_then(|descriptor| descriptor.data());
    let body = step_lines(app, step, data).join("\n");
    format!(
        "STEP: {} ({})\n\n{}\n\nKeys: {}\n",
        step.label(),
        step,
        body,
        expected_actions(step)
    )
}

/// Every visible step, in navigation order.
pub fn dump_all(app: &App) -> String {
    app.wizard
        .sequence()
        .ids()
        .iter()
        .map(|step| dump_step(app, *step))
        .collect::<Vec<_>>()
        .join("\n")
}

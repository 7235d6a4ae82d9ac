//! Terminal front-end for the installer wizard.
//!
//! Renders the step tree built by `installer-core`, maps key presses onto
//! wizard actions, and runs storage effects on a worker thread.

pub mod input;
pub mod widgets;
pub mod wizard;

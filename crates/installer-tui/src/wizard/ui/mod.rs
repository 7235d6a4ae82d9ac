//! Screen rendering for the wizard.

mod content;
mod dump;
mod render;
mod sidebar;

pub use dump::{dump_all, dump_step};
pub use render::draw;

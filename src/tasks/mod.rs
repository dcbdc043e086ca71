//! Task capture: short task ids and the inbox file

pub mod id;
pub mod inbox;

pub use id::{generate_issue_id, normalize_prefix};
pub use inbox::{append_task, read_checklist_lines};

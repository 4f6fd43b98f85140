//! Service layer: the selection policy, the `auto_linear` chain and the
//! file writer.

pub mod auto_linear;
pub mod file_writer;
pub mod issue_selector;
pub mod prompt;

pub use auto_linear::{AutoLinearService, LIST_COMMENTS_TOOL, LIST_ISSUES_TOOL};
pub use file_writer::write_file;
pub use issue_selector::select;

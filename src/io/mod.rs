pub mod real;
pub mod traits;
pub mod walker;

pub use real::ProcessRunner;
pub use traits::{CommandOutput, ToolRunner};
pub use walker::{find_source_files, FileWalker};

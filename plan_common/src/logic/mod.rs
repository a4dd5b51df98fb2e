mod api_diff;
mod assembly;
mod selection;
mod walker;

pub use api_diff::{diff_stacks, exit_code, DiffOptions};
pub use assembly::{CloudAssembly, MANIFEST_FILE};
pub use selection::select_stacks;
pub use walker::NestedDiffWalker;

mod interface;
mod logic;

pub use interface::{DeployedStateGateway, NoBackendGateway};
pub use logic::{
    diff_stacks, exit_code, select_stacks, CloudAssembly, DiffOptions, NestedDiffWalker,
    MANIFEST_FILE,
};

mod deployed;
mod diff;
pub mod errors;
mod manifest;
mod provider;
mod stack;
mod template;

pub use deployed::{DeployedStack, DeployedState};
pub use diff::{DiffNode, DiffReport, PathSegment, StackDiffResult};
pub use manifest::{AssemblyManifest, MetadataEntry, StackManifest};
pub use provider::{AssemblySource, RemoteFetchGateway};
pub use stack::{Diagnostic, DiagnosticLevel, StackArtifact, StackIdentifier, StackNode};
pub use template::{Scalar, TemplateDocument};

/// Resource type marking a nested stack.
pub const NESTED_STACK_RESOURCE_TYPE: &str = "AWS::CloudFormation::Stack";

/// Resource metadata key holding where the nested template was written.
pub const ASSET_PATH_METADATA_KEY: &str = "aws:asset:path";

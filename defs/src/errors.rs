use thiserror::Error;

#[derive(Error, Debug)]
pub enum DiffError {
    #[error("No stacks match the name(s) {}", .0.join(","))]
    NoStacksMatch(Vec<String>),

    #[error("Found errors in stack(s): {}", .0.join(", "))]
    FoundErrors(Vec<String>),

    #[error("Failed to diff stack {stack}: {source}")]
    Fetch {
        stack: String,
        #[source]
        source: anyhow::Error,
    },

    #[error("Failed to write diff output: {0}")]
    Output(#[from] std::io::Error),
}

impl DiffError {
    pub fn fetch(stack: &str, source: anyhow::Error) -> Self {
        DiffError::Fetch {
            stack: stack.to_string(),
            source,
        }
    }
}

#[derive(Error, Debug)]
pub enum AssemblyError {
    #[error("Cloud assembly manifest not found: {0}")]
    ManifestMissing(String),

    #[error("Stack {0} has neither a template nor a templateFile")]
    MissingTemplate(String),

    #[error("Stack {0} depends on unknown stack {1}")]
    UnknownDependency(String, String),

    #[error(transparent)]
    Template(#[from] TemplateError),
}

#[derive(Error, Debug)]
pub enum TemplateError {
    #[error("Failed to read {0}: {1}")]
    Read(String, std::io::Error),

    #[error("Failed to parse {0}: {1}")]
    Parse(String, String),
}

mod deployed_state;
mod no_backend;

pub use deployed_state::DeployedStateGateway;
pub use no_backend::NoBackendGateway;

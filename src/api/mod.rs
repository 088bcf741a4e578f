// HTTP API adapters over the registry dispatch surface

pub mod connectors;
pub mod workflows;

pub use connectors::{create_connector_router, ConnectorAppState};
pub use workflows::create_workflow_router;

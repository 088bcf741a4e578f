// Core data model (descriptors, actions, auth fields, results)
pub mod types;

// Connector contract
pub mod connector;

// Built-in connector implementations
pub mod connectors;

// Registry and dispatch
pub mod registry;

// Error taxonomy
pub mod error;

// Credential encryption and storage
pub mod credentials;

// HTTP API
pub mod api;

// Configuration
pub mod config;

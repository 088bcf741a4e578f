//! Connector registry — owns the set of available connectors and mediates
//! all access to them.
//!
//! Registration happens at startup; after that the map is read-mostly, so a
//! lock-free concurrent map plus a small mutex around the registration-order
//! list is all the synchronization needed.

use crate::connector::Connector;
use crate::connectors::{
    AhrefsConnector, DataForSeoConnector, GoogleAdsConnector, GoogleAnalyticsConnector,
    OpenAiConnector, RankMathConnector,
};
use crate::error::HubError;
use crate::types::{ActionParams, ActionResult, ConnectorDescriptor, Credentials};
use dashmap::mapref::entry::Entry;
use dashmap::DashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use tracing::{debug, info};

/// In-memory mapping from connector id to connector instance.
///
/// Duplicate ids are rejected at registration — silent overwrite would mask
/// integration bugs. `list()` preserves registration order.
pub struct Registry {
    connectors: DashMap<String, Arc<dyn Connector>>,
    order: Mutex<Vec<String>>,
    defaults_loaded: AtomicBool,
}

impl Registry {
    /// Creates an empty registry. Call [`initialize_defaults`](Self::initialize_defaults)
    /// to load the built-in connector set.
    pub fn new() -> Self {
        Self {
            connectors: DashMap::new(),
            order: Mutex::new(Vec::new()),
            defaults_loaded: AtomicBool::new(false),
        }
    }

    /// Registers a connector under its descriptor id.
    ///
    /// # Errors
    /// `HubError::DuplicateConnector` when the id is already taken.
    pub fn register(&self, connector: Arc<dyn Connector>) -> Result<(), HubError> {
        let id = connector.descriptor().id;
        // Insert via entry, then record order with the shard guard released.
        match self.connectors.entry(id.clone()) {
            Entry::Occupied(_) => return Err(HubError::DuplicateConnector(id)),
            Entry::Vacant(entry) => {
                entry.insert(connector);
            }
        }
        self.order.lock().unwrap().push(id.clone());
        debug!(connector = %id, "Registered connector");
        Ok(())
    }

    /// Pure lookup. Returns `None` for unknown ids, never an error.
    pub fn get(&self, id: &str) -> Option<Arc<dyn Connector>> {
        self.connectors.get(id).map(|entry| Arc::clone(entry.value()))
    }

    /// Descriptors for all registered connectors, in registration order.
    pub fn list(&self) -> Vec<ConnectorDescriptor> {
        let order = self.order.lock().unwrap();
        order
            .iter()
            .filter_map(|id| self.connectors.get(id).map(|e| e.value().descriptor()))
            .collect()
    }

    /// Registers the built-in connector set.
    ///
    /// Idempotent: the second and later calls are deterministic no-ops, so
    /// the duplicate-id policy never fires for built-ins.
    pub fn initialize_defaults(&self) -> Result<(), HubError> {
        if self.defaults_loaded.swap(true, Ordering::SeqCst) {
            debug!("Default connectors already loaded, skipping");
            return Ok(());
        }

        self.register(Arc::new(AhrefsConnector::new()))?;
        self.register(Arc::new(GoogleAdsConnector::new()))?;
        self.register(Arc::new(GoogleAnalyticsConnector::new()))?;
        self.register(Arc::new(RankMathConnector::new()))?;
        self.register(Arc::new(OpenAiConnector::new()))?;
        self.register(Arc::new(DataForSeoConnector::new()))?;

        info!(connector_count = self.connectors.len(), "Loaded default connectors");
        Ok(())
    }

    /// Validates credentials through the named connector.
    ///
    /// Returns `Ok(false)` for rejected credentials; `Err(Transport)` only
    /// for transport-level failures inside the connector.
    pub async fn dispatch_validate_auth(
        &self,
        id: &str,
        credentials: &Credentials,
    ) -> Result<bool, HubError> {
        let connector = self
            .get(id)
            .ok_or_else(|| HubError::ConnectorNotFound(id.to_string()))?;
        Ok(connector.validate_auth(credentials).await?)
    }

    /// Executes a connector action after validating the call contract.
    ///
    /// Contract checks happen here, centrally, so connector implementations
    /// can assume the action is declared and required params are present.
    pub async fn dispatch_execute_action(
        &self,
        id: &str,
        action_id: &str,
        params: &ActionParams,
        auth: &Credentials,
    ) -> Result<ActionResult, HubError> {
        let connector = self
            .get(id)
            .ok_or_else(|| HubError::ConnectorNotFound(id.to_string()))?;

        let spec = connector
            .action(action_id)
            .ok_or_else(|| HubError::UnknownAction {
                connector: id.to_string(),
                action: action_id.to_string(),
            })?;

        let missing: Vec<String> = spec
            .required_params
            .iter()
            .filter(|key| !params.contains_key(*key))
            .cloned()
            .collect();
        if !missing.is_empty() {
            return Err(HubError::MissingParameters { missing });
        }

        debug!(connector = %id, action = %action_id, "Dispatching action");
        Ok(connector.execute_action(action_id, params, auth).await?)
    }
}

impl Default for Registry {
    fn default() -> Self {
        Self::new()
    }
}

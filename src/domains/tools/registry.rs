//! Tool Registry - central registration and lookup for all tools.
//!
//! This module provides:
//! - Name-unique registration with schema checks
//! - Shared read access to registered specs
//! - Tool metadata for listing, in registration order
//!
//! Registration normally happens once during startup; the registry can still
//! be mutated afterwards. Writers take the lock exclusively, lookups share it.

use std::collections::HashMap;
use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use tracing::info;

use super::binder::convert;
use super::error::RegistryError;
use super::spec::{ToolSpec, ToolSummary};

#[derive(Default)]
struct Entries {
    by_name: HashMap<String, Arc<ToolSpec>>,
    order: Vec<String>,
}

/// Tool registry - owns every registered [`ToolSpec`].
#[derive(Default)]
pub struct ToolRegistry {
    inner: RwLock<Entries>,
}

impl std::fmt::Debug for ToolRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ToolRegistry")
            .field("registered", &self.read().order)
            .finish()
    }
}

impl ToolRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a tool.
    ///
    /// Fails without touching the existing entry when the name is taken.
    pub fn register(&self, spec: ToolSpec) -> Result<(), RegistryError> {
        check_spec(&spec)?;

        let mut entries = self.write();
        if entries.by_name.contains_key(spec.name()) {
            return Err(RegistryError::DuplicateTool(spec.name().to_string()));
        }

        info!("Registering tool: {}", spec.name());
        let name = spec.name().to_string();
        entries.order.push(name.clone());
        entries.by_name.insert(name, Arc::new(spec));
        Ok(())
    }

    /// Remove a tool. Invocations already running keep their `ToolSpec` and finish normally.
    pub fn unregister(&self, name: &str) -> Option<Arc<ToolSpec>> {
        let mut entries = self.write();
        let removed = entries.by_name.remove(name)?;
        entries.order.retain(|n| n != name);
        info!("Unregistered tool: {}", name);
        Some(removed)
    }

    /// Look up a tool by name.
    pub fn lookup(&self, name: &str) -> Option<Arc<ToolSpec>> {
        self.read().by_name.get(name).cloned()
    }

    /// Whether a tool with this name is registered.
    pub fn contains(&self, name: &str) -> bool {
        self.read().by_name.contains_key(name)
    }

    /// Discovery metadata for every tool, in registration order.
    pub fn list(&self) -> Vec<ToolSummary> {
        self.specs().iter().map(|spec| spec.summary()).collect()
    }

    /// Every registered spec, in registration order.
    pub fn specs(&self) -> Vec<Arc<ToolSpec>> {
        let entries = self.read();
        entries
            .order
            .iter()
            .filter_map(|name| entries.by_name.get(name).cloned())
            .collect()
    }

    /// Get all tool names, in registration order.
    pub fn tool_names(&self) -> Vec<String> {
        self.read().order.clone()
    }

    pub fn len(&self) -> usize {
        self.read().order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    // Entries are only mutated after every check passes, so a poisoned lock
    // still guards a consistent map.
    fn read(&self) -> RwLockReadGuard<'_, Entries> {
        self.inner.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, Entries> {
        self.inner.write().unwrap_or_else(PoisonError::into_inner)
    }
}

/// Reject specs the binder could not serve.
fn check_spec(spec: &ToolSpec) -> Result<(), RegistryError> {
    if spec.name().trim().is_empty() {
        return Err(RegistryError::EmptyName);
    }

    for (index, param) in spec.parameters().iter().enumerate() {
        if spec.parameters()[..index].iter().any(|p| p.name == param.name) {
            return Err(RegistryError::DuplicateParameter {
                tool: spec.name().to_string(),
                parameter: param.name.clone(),
            });
        }

        if let Some(default) = &param.default {
            convert(param, default).map_err(|e| RegistryError::InvalidDefault {
                tool: spec.name().to_string(),
                parameter: param.name.clone(),
                reason: e.to_string(),
            })?;
        }
    }

    Ok(())
}

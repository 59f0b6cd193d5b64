//! Thread-safe operator registry (§4.1).
//!
//! Generalizes the teacher's `CtnStrategyRegistry` (a plain `HashMap`
//! wrapper) to a shared, concurrently-mutable table: handlers are looked up
//! from every worker thread spawned by the specification evaluator (§4.5),
//! so reads and writes both go through an `RwLock`.

pub mod builtins;

use crate::types::error::RegistryError;
use crate::types::Value;
use std::collections::HashMap;
use std::fmt;
use std::sync::{Arc, RwLock};

/// A pure operator handler: given the document value at the matched path
/// and the operator's operand, report whether it matches.
///
/// Handlers never panic and never observe anything but their two
/// arguments — no shared mutable state, no I/O.
pub type OperatorHandler = dyn Fn(&Value, &Value) -> bool + Send + Sync;

#[derive(Clone)]
struct RegisteredOperator {
    handler: Arc<OperatorHandler>,
}

impl fmt::Debug for RegisteredOperator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RegisteredOperator").finish_non_exhaustive()
    }
}

/// Registry of named query operators, safe to share across the evaluator's
/// worker threads via `Arc<OperatorRegistry>`.
#[derive(Debug, Clone)]
pub struct OperatorRegistry {
    operators: Arc<RwLock<HashMap<String, RegisteredOperator>>>,
}

impl OperatorRegistry {
    /// An empty registry with no operators registered.
    pub fn empty() -> Self {
        Self {
            operators: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    /// A registry preloaded with the 14 built-in operators (§4.3).
    pub fn with_defaults() -> Self {
        let registry = Self::empty();
        builtins::register_all(&registry);
        registry
    }

    /// Register (or replace) the handler for `name`.
    pub fn register<F>(&self, name: impl Into<String>, handler: F) -> Result<(), RegistryError>
    where
        F: Fn(&Value, &Value) -> bool + Send + Sync + 'static,
    {
        let name = name.into();
        if name.is_empty() {
            return Err(RegistryError::EmptyName);
        }
        let mut operators = self.operators.write().expect("registry lock poisoned");
        operators.insert(
            name,
            RegisteredOperator {
                handler: Arc::new(handler),
            },
        );
        Ok(())
    }

    /// Remove a previously registered operator. Returns `true` if it was
    /// present.
    pub fn unregister(&self, name: &str) -> bool {
        let mut operators = self.operators.write().expect("registry lock poisoned");
        operators.remove(name).is_some()
    }

    /// Fetch the handler for `name`, if registered.
    pub fn get(&self, name: &str) -> Option<Arc<OperatorHandler>> {
        let operators = self.operators.read().expect("registry lock poisoned");
        operators.get(name).map(|op| op.handler.clone())
    }

    pub fn contains(&self, name: &str) -> bool {
        let operators = self.operators.read().expect("registry lock poisoned");
        operators.contains_key(name)
    }

    pub fn size(&self) -> usize {
        let operators = self.operators.read().expect("registry lock poisoned");
        operators.len()
    }

    pub fn is_empty(&self) -> bool {
        self.size() == 0
    }

    /// Snapshot of currently registered operator names, sorted for
    /// deterministic display.
    pub fn available_operators(&self) -> Vec<String> {
        let operators = self.operators.read().expect("registry lock poisoned");
        let mut names: Vec<String> = operators.keys().cloned().collect();
        names.sort();
        names
    }

    /// Point-in-time snapshot of the full name→handler map. Like
    /// [`Self::available_operators`], later registry mutations are not
    /// reflected in a previously returned snapshot.
    pub fn get_all(&self) -> HashMap<String, Arc<OperatorHandler>> {
        let operators = self.operators.read().expect("registry lock poisoned");
        operators
            .iter()
            .map(|(name, op)| (name.clone(), op.handler.clone()))
            .collect()
    }

    /// The shared backing map, for operators (like `$elemMatch`) that need
    /// to recurse back through the registry without holding a strong `Arc`
    /// cycle on themselves — see [`builtins::register_all`].
    pub(crate) fn operators_handle(&self) -> Arc<RwLock<HashMap<String, RegisteredOperator>>> {
        self.operators.clone()
    }

    pub(crate) fn from_handle(operators: Arc<RwLock<HashMap<String, RegisteredOperator>>>) -> Self {
        Self { operators }
    }
}

impl Default for OperatorRegistry {
    fn default() -> Self {
        Self::with_defaults()
    }
}

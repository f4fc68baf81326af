//! The Rhai scripting engine for in-process plugins
//!
//! Provides the `lark` namespace over a shared [`VariableStore`]:
//! - `lark::vars::*` - scoped variables

use std::path::Path;
use std::sync::{Arc, RwLock};

use rhai::{Engine, Scope};

use super::api;
use crate::config;
use crate::error::ScriptError;
use crate::store::VariableStore;

/// Runs scripts against the same variables a [`MemoryHost`](crate::host::MemoryHost) serves
pub struct ScriptEngine {
    engine: Engine,
    store: Arc<RwLock<VariableStore>>,
}

impl ScriptEngine {
    /// Create a new script engine with a fresh store
    pub fn new() -> Self {
        Self::with_store(Arc::new(RwLock::new(VariableStore::new())))
    }

    pub fn with_store(store: Arc<RwLock<VariableStore>>) -> Self {
        let engine = Self::create_engine(Arc::clone(&store));
        Self { engine, store }
    }

    /// Create the Rhai engine with the `lark` namespace
    fn create_engine(store: Arc<RwLock<VariableStore>>) -> Engine {
        let mut engine = Engine::new();

        // Safety limits
        engine.set_max_expr_depths(64, 64);
        engine.set_max_operations(100_000);

        let mut lark_module = rhai::Module::new();
        lark_module.set_sub_module("vars", api::vars::create_module(store));
        engine.register_static_module("lark", lark_module.into());

        engine.on_print(|msg| tracing::info!(target: "lark_vars::script", "{}", msg));
        engine.on_debug(|msg, _, pos| {
            tracing::debug!(target: "lark_vars::script", %pos, "{}", msg)
        });

        engine
    }

    /// Load and execute a script file
    pub fn load_file(&mut self, path: &Path) -> Result<(), ScriptError> {
        let content = std::fs::read_to_string(path).map_err(|source| ScriptError::Read {
            path: path.to_path_buf(),
            source,
        })?;

        self.eval(&content)
    }

    /// Evaluate a Rhai script string
    pub fn eval(&mut self, script: &str) -> Result<(), ScriptError> {
        let ast = self
            .engine
            .compile(script)
            .map_err(|e| ScriptError::Parse(e.to_string()))?;

        let mut scope = Scope::new();
        self.engine
            .run_ast_with_scope(&mut scope, &ast)
            .map_err(|e| ScriptError::Runtime(e.to_string()))
    }

    /// Get a reference to the store for sharing
    pub fn store(&self) -> Arc<RwLock<VariableStore>> {
        Arc::clone(&self.store)
    }

    /// Load the default init script if it exists
    pub fn load_default(&mut self) -> Result<(), ScriptError> {
        if let Some(init) = config::config_file() {
            if init.exists() {
                return self.load_file(&init).inspect_err(|e| {
                    tracing::warn!(path = %init.display(), error = %e, "init script failed");
                });
            }
        }
        Ok(()) // No init script is fine
    }
}

impl Default for ScriptEngine {
    fn default() -> Self {
        Self::new()
    }
}

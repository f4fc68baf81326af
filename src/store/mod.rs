//! Host-side variable storage
//!
//! ```text
//! VariableStore
//! ├── global: g:
//! ├── vim: v: (fixed set of names, some read-only)
//! ├── buffers: HashMap<BufferId, b:>
//! ├── windows: HashMap<WindowId, w:>
//! ├── tabs: HashMap<TabId, t:>
//! └── current_buffer / current_window / current_tab
//! ```
//!
//! `b:`, `w:` and `t:` always resolve against the focused buffer, window and
//! tab. Dictionaries are created lazily on first assignment.

use std::collections::{BTreeMap, HashMap};

use serde_json::Value;
use thiserror::Error;

use crate::config::{Settings, VimVariable};
use crate::vars::{Scope, is_valid_name};

/// Unique identifier for a buffer
pub type BufferId = usize;

/// Unique identifier for a window
pub type WindowId = usize;

/// Unique identifier for a tab page
pub type TabId = usize;

/// The variables of one scope instance
pub type Namespace = serde_json::Map<String, Value>;

/// Errors raised by the editor when a variable operation is refused
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    #[error("E108: No such variable: \"{0}\"")]
    NoSuchVariable(String),

    #[error("E461: Illegal variable name: {0}")]
    IllegalName(String),

    #[error("E46: Cannot change read-only variable \"{0}\"")]
    ReadOnly(String),

    #[error("E795: Cannot delete variable {0}")]
    CannotDelete(String),
}

pub struct VariableStore {
    global: Namespace,
    vim: BTreeMap<String, VimVariable>,
    buffers: HashMap<BufferId, Namespace>,
    windows: HashMap<WindowId, Namespace>,
    tabs: HashMap<TabId, Namespace>,
    current_buffer: BufferId,
    current_window: WindowId,
    current_tab: TabId,
}

impl VariableStore {
    pub fn new() -> Self {
        Self::with_settings(&Settings::default())
    }

    pub fn with_settings(settings: &Settings) -> Self {
        Self {
            global: Namespace::new(),
            vim: settings.vim_variables.clone(),
            buffers: HashMap::new(),
            windows: HashMap::new(),
            tabs: HashMap::new(),
            current_buffer: settings.initial_buffer,
            current_window: settings.initial_window,
            current_tab: settings.initial_tab,
        }
    }

    pub fn get(&self, scope: Scope, name: &str) -> Option<&Value> {
        match scope {
            Scope::Global => self.global.get(name),
            Scope::Buffer => self.buffers.get(&self.current_buffer)?.get(name),
            Scope::Window => self.windows.get(&self.current_window)?.get(name),
            Scope::Tab => self.tabs.get(&self.current_tab)?.get(name),
            Scope::Vim => self.vim.get(name).map(|v| &v.value),
        }
    }

    pub fn contains(&self, scope: Scope, name: &str) -> bool {
        self.get(scope, name).is_some()
    }

    /// Assign a variable, creating it if needed
    pub fn set(&mut self, scope: Scope, name: &str, value: Value) -> Result<(), StoreError> {
        if !is_valid_name(name) {
            return Err(StoreError::IllegalName(scope.qualify(name)));
        }

        if scope == Scope::Vim {
            let var = self
                .vim
                .get_mut(name)
                .ok_or_else(|| StoreError::IllegalName(scope.qualify(name)))?;
            if var.read_only {
                return Err(StoreError::ReadOnly(scope.qualify(name)));
            }
            var.value = value;
            return Ok(());
        }

        if let Some(ns) = self.namespace_mut(scope) {
            ns.insert(name.to_string(), value);
        }
        Ok(())
    }

    /// Delete a variable, returning its last value
    pub fn unlet(&mut self, scope: Scope, name: &str) -> Result<Value, StoreError> {
        if scope == Scope::Vim {
            return Err(if self.vim.contains_key(name) {
                StoreError::CannotDelete(scope.qualify(name))
            } else {
                StoreError::NoSuchVariable(scope.qualify(name))
            });
        }

        self.namespace_mut(scope)
            .and_then(|ns| ns.remove(name))
            .ok_or_else(|| StoreError::NoSuchVariable(scope.qualify(name)))
    }

    /// Snapshot of every variable visible under `scope`
    pub fn namespace(&self, scope: Scope) -> Namespace {
        let ns = match scope {
            Scope::Global => Some(&self.global),
            Scope::Buffer => self.buffers.get(&self.current_buffer),
            Scope::Window => self.windows.get(&self.current_window),
            Scope::Tab => self.tabs.get(&self.current_tab),
            Scope::Vim => {
                return self
                    .vim
                    .iter()
                    .map(|(k, v)| (k.clone(), v.value.clone()))
                    .collect();
            }
        };
        ns.cloned().unwrap_or_default()
    }

    /// `v:` is not a free-form dictionary and has no namespace here
    fn namespace_mut(&mut self, scope: Scope) -> Option<&mut Namespace> {
        match scope {
            Scope::Global => Some(&mut self.global),
            Scope::Buffer => Some(self.buffers.entry(self.current_buffer).or_default()),
            Scope::Window => Some(self.windows.entry(self.current_window).or_default()),
            Scope::Tab => Some(self.tabs.entry(self.current_tab).or_default()),
            Scope::Vim => None,
        }
    }

    pub fn current_buffer(&self) -> BufferId {
        self.current_buffer
    }

    pub fn current_window(&self) -> WindowId {
        self.current_window
    }

    pub fn current_tab(&self) -> TabId {
        self.current_tab
    }

    pub fn focus_buffer(&mut self, id: BufferId) {
        self.current_buffer = id;
    }

    pub fn focus_window(&mut self, id: WindowId) {
        self.current_window = id;
    }

    pub fn focus_tab(&mut self, id: TabId) {
        self.current_tab = id;
    }

    /// Drop every `b:` variable of a buffer
    pub fn wipe_buffer(&mut self, id: BufferId) -> Option<Namespace> {
        self.buffers.remove(&id)
    }

    pub fn close_window(&mut self, id: WindowId) -> Option<Namespace> {
        self.windows.remove(&id)
    }

    pub fn close_tab(&mut self, id: TabId) -> Option<Namespace> {
        self.tabs.remove(&id)
    }
}

impl Default for VariableStore {
    fn default() -> Self {
        Self::new()
    }
}

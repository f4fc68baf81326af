use std::collections::BTreeMap;

use serde_json::{Value, json};

use crate::store::{BufferId, TabId, WindowId};

/// A predefined `v:` variable
#[derive(Debug, Clone, PartialEq)]
pub struct VimVariable {
    pub value: Value,
    pub read_only: bool,
}

impl VimVariable {
    pub fn read_only(value: Value) -> Self {
        Self {
            value,
            read_only: true,
        }
    }

    pub fn writable(value: Value) -> Self {
        Self {
            value,
            read_only: false,
        }
    }
}

/// Host settings that shape the initial variable store
#[derive(Debug, Clone)]
pub struct Settings {
    // Editor-internal variables, the only names `v:` accepts
    pub vim_variables: BTreeMap<String, VimVariable>,

    // Focus at start-up
    pub initial_buffer: BufferId,
    pub initial_window: WindowId,
    pub initial_tab: TabId,
}

impl Default for Settings {
    fn default() -> Self {
        let mut vim_variables = BTreeMap::new();
        vim_variables.insert("count".to_string(), VimVariable::read_only(json!(0)));
        vim_variables.insert("version".to_string(), VimVariable::read_only(json!(900)));
        vim_variables.insert("progname".to_string(), VimVariable::read_only(json!("lark")));
        vim_variables.insert("errmsg".to_string(), VimVariable::writable(json!("")));
        vim_variables.insert("searchforward".to_string(), VimVariable::writable(json!(1)));

        Self {
            vim_variables,
            initial_buffer: 1,
            initial_window: 1000,
            initial_tab: 1,
        }
    }
}

impl Settings {
    pub fn new() -> Self {
        Self::default()
    }
}

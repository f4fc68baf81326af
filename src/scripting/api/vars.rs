//! lark::vars - Scoped variables
//!
//! Usage in Rhai:
//! ```rhai
//! lark::vars::set("g", "myFlag", 42);
//! let indent = lark::vars::get("b", "indent", 4);
//! if lark::vars::exists("w", "winVar") {
//!     lark::vars::remove("w", "winVar");
//! }
//! lark::vars::focus_buffer(2);
//! ```

use std::sync::{Arc, RwLock};

use rhai::plugin::*;
use serde_json::Value;

use crate::store::VariableStore;
use crate::vars::Scope;

type ApiResult<T> = Result<T, Box<EvalAltResult>>;

fn scope(prefix: &str) -> ApiResult<Scope> {
    prefix.parse::<Scope>().map_err(|e| e.to_string().into())
}

fn poisoned() -> Box<EvalAltResult> {
    "variable store poisoned".into()
}

fn to_dynamic(value: &Value) -> ApiResult<Dynamic> {
    rhai::serde::to_dynamic(value)
}

fn from_dynamic(value: &Dynamic) -> ApiResult<Value> {
    rhai::serde::from_dynamic(value)
}

fn id(value: i64) -> ApiResult<usize> {
    usize::try_from(value).map_err(|_| format!("invalid id: {}", value).into())
}

/// Create the vars module over a shared store
pub fn create_module(store: Arc<RwLock<VariableStore>>) -> rhai::Module {
    let mut module = rhai::Module::new();

    // get(scope: &str, name: &str) -> Dynamic, () when unset
    {
        let s = Arc::clone(&store);
        module.set_native_fn("get", move |prefix: &str, name: &str| -> ApiResult<Dynamic> {
            let store = s.read().map_err(|_| poisoned())?;
            match store.get(scope(prefix)?, name) {
                Some(value) => to_dynamic(value),
                None => Ok(Dynamic::UNIT),
            }
        });
    }

    // get(scope: &str, name: &str, default: Dynamic) -> Dynamic
    {
        let s = Arc::clone(&store);
        module.set_native_fn(
            "get",
            move |prefix: &str, name: &str, default: Dynamic| -> ApiResult<Dynamic> {
                let store = s.read().map_err(|_| poisoned())?;
                match store.get(scope(prefix)?, name) {
                    Some(value) => to_dynamic(value),
                    None => Ok(default),
                }
            },
        );
    }

    // set(scope: &str, name: &str, value: Dynamic)
    {
        let s = Arc::clone(&store);
        module.set_native_fn(
            "set",
            move |prefix: &str, name: &str, value: Dynamic| -> ApiResult<()> {
                let value = from_dynamic(&value)?;
                let mut store = s.write().map_err(|_| poisoned())?;
                store
                    .set(scope(prefix)?, name, value)
                    .map_err(|e| e.to_string().into())
            },
        );
    }

    // remove(scope: &str, name: &str)
    {
        let s = Arc::clone(&store);
        module.set_native_fn("remove", move |prefix: &str, name: &str| -> ApiResult<()> {
            let mut store = s.write().map_err(|_| poisoned())?;
            store
                .unlet(scope(prefix)?, name)
                .map(|_| ())
                .map_err(|e| e.to_string().into())
        });
    }

    // exists(scope: &str, name: &str) -> bool
    {
        let s = Arc::clone(&store);
        module.set_native_fn("exists", move |prefix: &str, name: &str| -> ApiResult<bool> {
            let store = s.read().map_err(|_| poisoned())?;
            Ok(store.contains(scope(prefix)?, name))
        });
    }

    // focus_buffer(id: i64)
    {
        let s = Arc::clone(&store);
        module.set_native_fn("focus_buffer", move |buffer: i64| -> ApiResult<()> {
            let buffer = id(buffer)?;
            s.write().map_err(|_| poisoned())?.focus_buffer(buffer);
            Ok(())
        });
    }

    // focus_window(id: i64)
    {
        let s = Arc::clone(&store);
        module.set_native_fn("focus_window", move |window: i64| -> ApiResult<()> {
            let window = id(window)?;
            s.write().map_err(|_| poisoned())?.focus_window(window);
            Ok(())
        });
    }

    // focus_tab(id: i64)
    {
        let s = Arc::clone(&store);
        module.set_native_fn("focus_tab", move |tab: i64| -> ApiResult<()> {
            let tab = id(tab)?;
            s.write().map_err(|_| poisoned())?.focus_tab(tab);
            Ok(())
        });
    }

    module
}

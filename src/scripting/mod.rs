//! Scripting module - Rhai runtime for in-process plugins and the init script
//!
//! Editor functions are exposed under the `lark` namespace:
//! - `lark::vars::*` - read, write and remove scoped variables

mod api;
mod engine;

pub use engine::ScriptEngine;

//! Scoped editor variables for lark plugins
//!
//! - **[`vars`]** - `Scope`, `get_var`/`set_var`/`remove_var` and `VariableHelper`
//! - **[`host`]** - the `Host` bridge trait and the in-process `MemoryHost`
//! - **[`store`]** - host-side variable namespaces
//! - **[`scripting`]** - Rhai `lark::vars` API over the same store
//! - **[`config`]** - host settings and init-script location
//!
//! ```no_run
//! # async fn demo() -> lark_vars::VarResult<()> {
//! use lark_vars::{MemoryHost, Scope, VariableHelper};
//!
//! let host = MemoryHost::new();
//! let global = VariableHelper::new(&host, Scope::Global);
//! global.set("myFlag", &42).await?;
//! assert_eq!(global.get("myFlag").await?, serde_json::json!(42));
//! # Ok(())
//! # }
//! ```

pub mod config;
mod error;
pub mod host;
pub mod scripting;
pub mod store;
pub mod vars;

pub use error::{HostError, HostResult, ScriptError, VarError, VarResult};
pub use host::{Host, MemoryHost, Params};
pub use scripting::ScriptEngine;
pub use store::VariableStore;
pub use vars::{Scope, VariableHelper, get_var, remove_var, set_var};

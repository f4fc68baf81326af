//! Scoped editor variables
//!
//! ```text
//! g:  global            b:  buffer-local      w:  window-local
//! t:  tab-local         v:  editor-internal
//! ```
//!
//! Each operation is exactly one request to the [`Host`](crate::host::Host).
//! Nothing is cached and host errors come back untouched.

mod accessor;
mod name;
mod scope;

pub use accessor::{VariableHelper, get_var, remove_var, set_var};
pub use name::is_valid_name;
pub use scope::{ParseScopeError, Scope};

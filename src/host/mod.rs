//! Host module - the bridge to the editor process
//!
//! Plugin code never touches editor state directly. Everything goes through a
//! [`Host`], which sends an expression or command to the editor together with
//! named parameters and hands back the result:
//! - [`Host::eval`] - evaluate an expression, returning its value
//! - [`Host::cmd`] - run a command for its side effect
//!
//! Parameters are substituted by the host, never spliced into the text.

mod memory;
mod request;

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::Value;

use crate::error::HostResult;

pub use memory::{MemoryHost, RecordedRequest, RequestKind};

/// Named request parameters
pub type Params = serde_json::Map<String, Value>;

/// Remote-execution capability set of an editor process
#[async_trait]
pub trait Host: Send + Sync {
    /// Evaluate `expr` in the editor with `params` bound by name
    async fn eval(&self, expr: &str, params: Params) -> HostResult<Value>;

    /// Execute `command` in the editor with `params` bound by name
    async fn cmd(&self, command: &str, params: Params) -> HostResult<()>;
}

#[async_trait]
impl<'a, H: Host + ?Sized> Host for &'a H {
    async fn eval(&self, expr: &str, params: Params) -> HostResult<Value> {
        (**self).eval(expr, params).await
    }

    async fn cmd(&self, command: &str, params: Params) -> HostResult<()> {
        (**self).cmd(command, params).await
    }
}

#[async_trait]
impl<H: Host + ?Sized> Host for Arc<H> {
    async fn eval(&self, expr: &str, params: Params) -> HostResult<Value> {
        (**self).eval(expr, params).await
    }

    async fn cmd(&self, command: &str, params: Params) -> HostResult<()> {
        (**self).cmd(command, params).await
    }
}

#[async_trait]
impl<H: Host + ?Sized> Host for Box<H> {
    async fn eval(&self, expr: &str, params: Params) -> HostResult<Value> {
        (**self).eval(expr, params).await
    }

    async fn cmd(&self, command: &str, params: Params) -> HostResult<()> {
        (**self).cmd(command, params).await
    }
}

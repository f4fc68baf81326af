use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, RwLock};

use async_trait::async_trait;
use serde_json::Value;

use super::request::{self, Command, Expression};
use super::{Host, Params};
use crate::error::{HostError, HostResult};
use crate::store::{StoreError, VariableStore};

/// Whether a request was sent through `eval` or `cmd`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RequestKind {
    Eval,
    Cmd,
}

/// A request as received by [`MemoryHost`]
#[derive(Debug, Clone, PartialEq)]
pub struct RecordedRequest {
    pub kind: RequestKind,
    pub text: String,
    pub params: Params,
}

/// An in-process editor host backed by a [`VariableStore`]
///
/// Understands the lookup, assignment and deletion requests issued by the
/// variable accessors and keeps a log of every request it receives.
pub struct MemoryHost {
    store: Arc<RwLock<VariableStore>>,
    requests: Mutex<Vec<RecordedRequest>>,
    connected: AtomicBool,
}

impl MemoryHost {
    pub fn new() -> Self {
        Self::with_store(Arc::new(RwLock::new(VariableStore::new())))
    }

    /// Serve an existing store, e.g. one shared with a script engine
    pub fn with_store(store: Arc<RwLock<VariableStore>>) -> Self {
        Self {
            store,
            requests: Mutex::new(Vec::new()),
            connected: AtomicBool::new(true),
        }
    }

    /// Get a reference to the store for sharing
    pub fn store(&self) -> Arc<RwLock<VariableStore>> {
        Arc::clone(&self.store)
    }

    /// Every request received so far, oldest first
    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.requests.lock().map(|r| r.clone()).unwrap_or_default()
    }

    pub fn clear_requests(&self) {
        if let Ok(mut requests) = self.requests.lock() {
            requests.clear();
        }
    }

    /// Fail every following request as if the channel had closed
    pub fn disconnect(&self) {
        self.connected.store(false, Ordering::SeqCst);
    }

    pub fn reconnect(&self) {
        self.connected.store(true, Ordering::SeqCst);
    }

    pub fn is_connected(&self) -> bool {
        self.connected.load(Ordering::SeqCst)
    }

    fn receive(&self, kind: RequestKind, text: &str, params: &Params) -> HostResult<()> {
        if !self.is_connected() {
            return Err(HostError::Transport("channel closed".to_string()));
        }

        tracing::trace!(?kind, request = text, "host received request");
        let mut requests = self
            .requests
            .lock()
            .map_err(|_| HostError::Transport("request log poisoned".to_string()))?;
        requests.push(RecordedRequest {
            kind,
            text: text.to_string(),
            params: params.clone(),
        });
        Ok(())
    }

    fn evaluate(&self, expr: Expression, params: &Params) -> HostResult<Value> {
        match expr {
            Expression::Get {
                scope,
                key_param,
                default_param,
            } => {
                let key = param(params, &key_param)?;
                let default = param(params, &default_param)?;
                // Lookup keys are dictionary keys, so non-strings use their text form
                let key = match key {
                    Value::String(s) => s.clone(),
                    other => other.to_string(),
                };

                let store = self.read_store()?;
                Ok(store.get(scope, &key).cloned().unwrap_or_else(|| default.clone()))
            }
        }
    }

    fn execute(&self, command: Command, params: &Params) -> HostResult<()> {
        match command {
            Command::Let {
                scope,
                name,
                value_param,
            } => {
                let value = param(params, &value_param)?.clone();
                self.write_store()?
                    .set(scope, &name, value)
                    .map_err(evaluation_error)
            }
            Command::Unlet { scope, name, force } => {
                match self.write_store()?.unlet(scope, &name) {
                    Ok(_) => Ok(()),
                    Err(StoreError::NoSuchVariable(_)) if force => Ok(()),
                    Err(e) => Err(evaluation_error(e)),
                }
            }
        }
    }

    fn read_store(&self) -> HostResult<std::sync::RwLockReadGuard<'_, VariableStore>> {
        self.store
            .read()
            .map_err(|_| HostError::Transport("host state poisoned".to_string()))
    }

    fn write_store(&self) -> HostResult<std::sync::RwLockWriteGuard<'_, VariableStore>> {
        self.store
            .write()
            .map_err(|_| HostError::Transport("host state poisoned".to_string()))
    }
}

impl Default for MemoryHost {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Host for MemoryHost {
    async fn eval(&self, expr: &str, params: Params) -> HostResult<Value> {
        self.receive(RequestKind::Eval, expr, &params)?;
        let parsed = request::parse_expression(expr)
            .ok_or_else(|| HostError::Evaluation(format!("E15: Invalid expression: \"{}\"", expr)))?;
        self.evaluate(parsed, &params)
    }

    async fn cmd(&self, command: &str, params: Params) -> HostResult<()> {
        self.receive(RequestKind::Cmd, command, &params)?;
        let parsed = request::parse_command(command).ok_or_else(|| {
            HostError::Evaluation(format!("E492: Not an editor command: {}", command))
        })?;
        self.execute(parsed, &params)
    }
}

fn param<'a>(params: &'a Params, name: &str) -> HostResult<&'a Value> {
    params
        .get(name)
        .ok_or_else(|| HostError::Evaluation(format!("E121: Undefined variable: {}", name)))
}

fn evaluation_error(err: StoreError) -> HostError {
    HostError::Evaluation(err.to_string())
}

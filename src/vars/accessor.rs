use serde::Serialize;
use serde_json::Value;

use super::Scope;
use super::name::check_name;
use crate::error::VarResult;
use crate::host::{Host, Params};

/// Read `prop` from `scope`, falling back to `default` (or null) when unset.
///
/// The property and default travel as parameters, so any property text is
/// looked up literally.
pub async fn get_var<H: Host + ?Sized>(
    host: &H,
    scope: Scope,
    prop: &str,
    default: Option<Value>,
) -> VarResult<Value> {
    tracing::debug!(%scope, prop, "get variable");

    let mut params = Params::new();
    params.insert("name".to_string(), Value::String(prop.to_string()));
    params.insert("value".to_string(), default.unwrap_or(Value::Null));

    let expr = format!("get({}:, name, value)", scope);
    Ok(host.eval(&expr, params).await?)
}

/// Assign `value` to `scope:prop`. The value is passed as a parameter.
pub async fn set_var<H, T>(host: &H, scope: Scope, prop: &str, value: &T) -> VarResult<()>
where
    H: Host + ?Sized,
    T: Serialize + ?Sized,
{
    let name = scope.qualify(check_name(prop)?);
    tracing::debug!(variable = %name, "set variable");

    let mut params = Params::new();
    params.insert("value".to_string(), serde_json::to_value(value)?);

    host.cmd(&format!("let {} = value", name), params).await?;
    Ok(())
}

/// Delete `scope:prop`. A missing variable is reported by the host.
pub async fn remove_var<H: Host + ?Sized>(host: &H, scope: Scope, prop: &str) -> VarResult<()> {
    let name = scope.qualify(check_name(prop)?);
    tracing::debug!(variable = %name, "remove variable");

    host.cmd(&format!("unlet {}", name), Params::new()).await?;
    Ok(())
}

/// Variables of one scope, accessed through a borrowed host
pub struct VariableHelper<'h, H: Host + ?Sized> {
    host: &'h H,
    scope: Scope,
}

impl<'h, H: Host + ?Sized> VariableHelper<'h, H> {
    pub fn new(host: &'h H, scope: Scope) -> Self {
        Self { host, scope }
    }

    pub fn scope(&self) -> Scope {
        self.scope
    }

    /// Returns null when unset
    pub async fn get(&self, prop: &str) -> VarResult<Value> {
        get_var(self.host, self.scope, prop, None).await
    }

    pub async fn get_or<T: Serialize + ?Sized>(&self, prop: &str, default: &T) -> VarResult<Value> {
        let default = serde_json::to_value(default)?;
        get_var(self.host, self.scope, prop, Some(default)).await
    }

    pub async fn set<T: Serialize + ?Sized>(&self, prop: &str, value: &T) -> VarResult<()> {
        set_var(self.host, self.scope, prop, value).await
    }

    pub async fn remove(&self, prop: &str) -> VarResult<()> {
        remove_var(self.host, self.scope, prop).await
    }
}

impl<H: Host + ?Sized> Clone for VariableHelper<'_, H> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<H: Host + ?Sized> Copy for VariableHelper<'_, H> {}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use serde_json::json;

    use super::*;
    use crate::error::{HostError, VarError};
    use crate::host::{MemoryHost, RecordedRequest, RequestKind};

    #[tokio::test]
    async fn test_get_unset_returns_default() {
        let host = MemoryHost::new();
        for scope in Scope::ALL {
            let value = get_var(&host, scope, "neverSet", Some(json!("dflt")))
                .await
                .unwrap();
            assert_eq!(value, json!("dflt"));
        }
    }

    #[tokio::test]
    async fn test_get_unset_without_default_is_null() {
        let host = MemoryHost::new();
        for scope in Scope::ALL {
            let value = get_var(&host, scope, "neverSet", None).await.unwrap();
            assert_eq!(value, Value::Null);
        }
    }

    #[tokio::test]
    async fn test_set_then_get_global_flag() {
        let host = MemoryHost::new();
        set_var(&host, Scope::Global, "myFlag", &42).await.unwrap();
        let value = get_var(&host, Scope::Global, "myFlag", None).await.unwrap();
        assert_eq!(value, json!(42));
    }

    #[tokio::test]
    async fn test_get_buffer_fallback() {
        let host = MemoryHost::new();
        let value = get_var(&host, Scope::Buffer, "undefinedProp", Some(json!("fallback")))
            .await
            .unwrap();
        assert_eq!(value, json!("fallback"));
    }

    #[tokio::test]
    async fn test_round_trip_in_every_writable_scope() {
        let host = MemoryHost::new();
        let value = json!({"list": [1, 2.5, "three"], "nested": {"ok": true}});
        for scope in [Scope::Global, Scope::Buffer, Scope::Window, Scope::Tab] {
            set_var(&host, scope, "payload", &value).await.unwrap();
            let got = get_var(&host, scope, "payload", None).await.unwrap();
            assert_eq!(got, value);
        }
    }

    #[tokio::test]
    async fn test_remove_makes_default_visible_again() {
        let host = MemoryHost::new();
        set_var(&host, Scope::Tab, "tabVar", "here").await.unwrap();
        remove_var(&host, Scope::Tab, "tabVar").await.unwrap();
        let value = get_var(&host, Scope::Tab, "tabVar", Some(json!(0)))
            .await
            .unwrap();
        assert_eq!(value, json!(0));
    }

    #[tokio::test]
    async fn test_remove_unset_propagates_host_error() {
        let host = MemoryHost::new();
        let err = remove_var(&host, Scope::Window, "winVar").await.unwrap_err();
        assert!(matches!(err, VarError::Host(HostError::Evaluation(_))));
        assert_eq!(err.to_string(), "E108: No such variable: \"w:winVar\"");
    }

    #[tokio::test]
    async fn test_awkward_values_stay_out_of_command_text() {
        let host = MemoryHost::new();
        let weird = "it's \"quoted\" | weird";
        set_var(&host, Scope::Global, "weird", weird).await.unwrap();

        let value = get_var(&host, Scope::Global, "weird", None).await.unwrap();
        assert_eq!(value, json!(weird));

        let requests = host.requests();
        assert_eq!(requests[0].text, "let g:weird = value");
        assert_eq!(requests[0].params.get("value"), Some(&json!(weird)));
        assert_eq!(requests[1].text, "get(g:, name, value)");
    }

    #[tokio::test]
    async fn test_awkward_property_is_looked_up_literally() {
        let host = MemoryHost::new();
        let prop = "x | unlet g:victim";
        set_var(&host, Scope::Global, "victim", &1).await.unwrap();

        let value = get_var(&host, Scope::Global, prop, Some(json!("none")))
            .await
            .unwrap();
        assert_eq!(value, json!("none"));
        assert_eq!(
            get_var(&host, Scope::Global, "victim", None).await.unwrap(),
            json!(1)
        );
    }

    #[tokio::test]
    async fn test_illegal_property_never_reaches_host() {
        let host = MemoryHost::new();
        set_var(&host, Scope::Global, "victim", &1).await.unwrap();
        host.clear_requests();

        let err = set_var(&host, Scope::Global, "x = 1 | unlet g:victim", &2)
            .await
            .unwrap_err();
        assert!(matches!(err, VarError::InvalidName(_)));

        let err = remove_var(&host, Scope::Global, "victim | echo 1")
            .await
            .unwrap_err();
        assert!(matches!(err, VarError::InvalidName(_)));

        assert!(host.requests().is_empty());
        assert_eq!(
            host.store().read().unwrap().get(Scope::Global, "victim"),
            Some(&json!(1))
        );
    }

    #[tokio::test]
    async fn test_one_request_per_operation() {
        let host = MemoryHost::new();
        set_var(&host, Scope::Window, "w1", &[1, 2, 3]).await.unwrap();
        get_var(&host, Scope::Window, "w1", None).await.unwrap();
        remove_var(&host, Scope::Window, "w1").await.unwrap();

        let kinds: Vec<RequestKind> = host.requests().iter().map(|r| r.kind).collect();
        assert_eq!(kinds, vec![RequestKind::Cmd, RequestKind::Eval, RequestKind::Cmd]);
        assert_eq!(
            host.requests()[2],
            RecordedRequest {
                kind: RequestKind::Cmd,
                text: "unlet w:w1".to_string(),
                params: Params::new(),
            }
        );
    }

    #[tokio::test]
    async fn test_transport_failure_propagates() {
        let host = MemoryHost::new();
        host.disconnect();

        let err = get_var(&host, Scope::Global, "x", None).await.unwrap_err();
        assert!(matches!(err, VarError::Host(HostError::Transport(_))));
        let err = set_var(&host, Scope::Global, "x", &1).await.unwrap_err();
        assert!(matches!(err, VarError::Host(HostError::Transport(_))));
        let err = remove_var(&host, Scope::Global, "x").await.unwrap_err();
        assert!(matches!(err, VarError::Host(HostError::Transport(_))));
    }

    #[tokio::test]
    async fn test_helper_binds_scope() {
        let host = MemoryHost::new();
        let buffer = VariableHelper::new(&host, Scope::Buffer);
        assert_eq!(buffer.scope(), Scope::Buffer);

        assert_eq!(buffer.get("indent").await.unwrap(), Value::Null);
        assert_eq!(buffer.get_or("indent", &4).await.unwrap(), json!(4));

        buffer.set("indent", &2).await.unwrap();
        assert_eq!(buffer.get_or("indent", &4).await.unwrap(), json!(2));
        assert_eq!(
            get_var(&host, Scope::Global, "indent", None).await.unwrap(),
            Value::Null
        );

        buffer.remove("indent").await.unwrap();
        assert!(buffer.remove("indent").await.is_err());
    }

    #[tokio::test]
    async fn test_helper_over_dyn_host() {
        let host: Arc<dyn Host> = Arc::new(MemoryHost::new());
        let global = VariableHelper::new(host.as_ref(), Scope::Global);
        global.set("name", "lark").await.unwrap();
        assert_eq!(global.get("name").await.unwrap(), json!("lark"));
    }

    #[tokio::test]
    async fn test_concurrent_callers() {
        let host = MemoryHost::new();
        let global = VariableHelper::new(&host, Scope::Global);

        let writes = (0..16).map(|i| {
            let name = format!("var{}", i);
            async move { global.set(&name, &i).await }
        });
        for result in futures::future::join_all(writes).await {
            result.unwrap();
        }

        for i in 0..16 {
            let value = global.get(&format!("var{}", i)).await.unwrap();
            assert_eq!(value, json!(i));
        }
        assert_eq!(host.requests().len(), 32);
    }

    #[tokio::test]
    async fn test_vim_scope_is_readable() {
        let host = MemoryHost::new();
        let vim = VariableHelper::new(&host, Scope::Vim);
        assert_eq!(vim.get("progname").await.unwrap(), json!("lark"));
        vim.set("errmsg", "boom").await.unwrap();
        assert_eq!(vim.get("errmsg").await.unwrap(), json!("boom"));
        assert!(vim.set("version", &1).await.is_err());
    }
}

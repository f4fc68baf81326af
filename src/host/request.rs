//! The request forms understood by [`MemoryHost`](super::MemoryHost)
//!
//! ```text
//! get(g:, key, default)    lookup with a fallback, key and default are param names
//! let g:name = value       assignment, value is a param name
//! unlet g:name             deletion
//! unlet! g:name            deletion, silent when missing
//! ```

use crate::vars::{Scope, is_valid_name};

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Expression {
    Get {
        scope: Scope,
        key_param: String,
        default_param: String,
    },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Command {
    Let {
        scope: Scope,
        name: String,
        value_param: String,
    },
    Unlet {
        scope: Scope,
        name: String,
        force: bool,
    },
}

pub(crate) fn parse_expression(text: &str) -> Option<Expression> {
    let args = text
        .trim()
        .strip_prefix("get(")?
        .strip_suffix(')')?;

    let mut parts = args.split(',').map(str::trim);
    let (namespace, key, default) = (parts.next()?, parts.next()?, parts.next()?);
    if parts.next().is_some() {
        return None;
    }

    let scope = parse_namespace(namespace)?;
    if !is_valid_name(key) || !is_valid_name(default) {
        return None;
    }

    Some(Expression::Get {
        scope,
        key_param: key.to_string(),
        default_param: default.to_string(),
    })
}

pub(crate) fn parse_command(text: &str) -> Option<Command> {
    let text = text.trim();

    if let Some(rest) = text.strip_prefix("let ") {
        let (target, value) = rest.split_once('=')?;
        let (scope, name) = parse_qualified(target.trim())?;
        let value = value.trim();
        if !is_valid_name(value) {
            return None;
        }
        return Some(Command::Let {
            scope,
            name: name.to_string(),
            value_param: value.to_string(),
        });
    }

    let (force, target) = if let Some(rest) = text.strip_prefix("unlet! ") {
        (true, rest)
    } else {
        (false, text.strip_prefix("unlet ")?)
    };
    let (scope, name) = parse_qualified(target.trim())?;
    Some(Command::Unlet {
        scope,
        name: name.to_string(),
        force,
    })
}

/// `g:` -> Global
fn parse_namespace(text: &str) -> Option<Scope> {
    let mut chars = text.chars();
    match (chars.next(), chars.next(), chars.next()) {
        (Some(prefix), Some(':'), None) => Scope::from_prefix(prefix),
        _ => None,
    }
}

/// `g:name` -> (Global, "name")
fn parse_qualified(text: &str) -> Option<(Scope, &str)> {
    let split = text.find(':')? + 1;
    let scope = parse_namespace(&text[..split])?;
    let name = &text[split..];
    is_valid_name(name).then_some((scope, name))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_get() {
        assert_eq!(
            parse_expression("get(b:, name, value)"),
            Some(Expression::Get {
                scope: Scope::Buffer,
                key_param: "name".to_string(),
                default_param: "value".to_string(),
            })
        );
    }

    #[test]
    fn test_parse_get_rejects_other_expressions() {
        assert_eq!(parse_expression("get(x:, name, value)"), None);
        assert_eq!(parse_expression("get(g:, name)"), None);
        assert_eq!(parse_expression("get(g:, a, b, c)"), None);
        assert_eq!(parse_expression("g:foo"), None);
        assert_eq!(parse_expression("get(g:, 'lit', value)"), None);
    }

    #[test]
    fn test_parse_let() {
        assert_eq!(
            parse_command("let g:myFlag = value"),
            Some(Command::Let {
                scope: Scope::Global,
                name: "myFlag".to_string(),
                value_param: "value".to_string(),
            })
        );
    }

    #[test]
    fn test_parse_unlet() {
        assert_eq!(
            parse_command("unlet w:winVar"),
            Some(Command::Unlet {
                scope: Scope::Window,
                name: "winVar".to_string(),
                force: false,
            })
        );
        assert_eq!(
            parse_command("unlet! t:tabVar"),
            Some(Command::Unlet {
                scope: Scope::Tab,
                name: "tabVar".to_string(),
                force: true,
            })
        );
    }

    #[test]
    fn test_parse_command_rejects_garbage() {
        assert_eq!(parse_command("let g:x = 'literal'"), None);
        assert_eq!(parse_command("let g:x"), None);
        assert_eq!(parse_command("unlet g:x | echo 1"), None);
        assert_eq!(parse_command("quit"), None);
        assert_eq!(parse_command("unlet foo"), None);
    }
}

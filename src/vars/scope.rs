use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Variable namespace in the editor
///
/// g - Global variables
/// b - Buffer local variables
/// w - Window local variables
/// t - Tab page local variables
/// v - Editor-internal variables
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Scope {
    #[serde(rename = "g")]
    Global,
    #[serde(rename = "b")]
    Buffer,
    #[serde(rename = "w")]
    Window,
    #[serde(rename = "t")]
    Tab,
    #[serde(rename = "v")]
    Vim,
}

impl Scope {
    pub const ALL: [Scope; 5] = [
        Scope::Global,
        Scope::Buffer,
        Scope::Window,
        Scope::Tab,
        Scope::Vim,
    ];

    /// One-letter prefix used in fully-qualified names (`g` in `g:foo`)
    pub fn prefix(self) -> char {
        match self {
            Scope::Global => 'g',
            Scope::Buffer => 'b',
            Scope::Window => 'w',
            Scope::Tab => 't',
            Scope::Vim => 'v',
        }
    }

    pub fn from_prefix(prefix: char) -> Option<Self> {
        Self::ALL.into_iter().find(|s| s.prefix() == prefix)
    }

    /// Fully-qualified variable name, e.g. `b:myVar`
    pub fn qualify(self, name: &str) -> String {
        format!("{}:{}", self.prefix(), name)
    }
}

impl fmt::Display for Scope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.prefix())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown variable scope: {0:?}")]
pub struct ParseScopeError(pub String);

impl FromStr for Scope {
    type Err = ParseScopeError;

    /// Accepts `g` as well as `g:`
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.strip_suffix(':').unwrap_or(s);
        let mut chars = trimmed.chars();
        let scope = match (chars.next(), chars.next()) {
            (Some(c), None) => Self::from_prefix(c),
            _ => None,
        };
        scope.ok_or_else(|| ParseScopeError(s.to_string()))
    }
}

//! Named scopes
//!
//! A scope is a named row predicate. Every scope set has exactly one default
//! scope, applied when the caller names none. Until another default is
//! declared, the default is a passthrough scope named `""`.

use std::fmt;
use std::sync::Arc;

use crate::descriptor::{DescriptorError, DescriptorResult};

/// Name of the built-in passthrough scope.
pub const DEFAULT_SCOPE: &str = "";

type ScopePredicate<C> = Arc<dyn Fn(&C) -> bool + Send + Sync>;

/// A named predicate over candidate rows.
pub struct Scope<C> {
    name: String,
    default: bool,
    builtin: bool,
    predicate: ScopePredicate<C>,
}

impl<C> Scope<C> {
    /// Creates a scope from a predicate.
    pub fn new(name: impl Into<String>, predicate: impl Fn(&C) -> bool + Send + Sync + 'static) -> Self {
        Self {
            name: name.into(),
            default: false,
            builtin: false,
            predicate: Arc::new(predicate),
        }
    }

    /// A scope that accepts every row.
    pub fn passthrough(name: impl Into<String>) -> Self {
        Self::new(name, |_| true)
    }

    fn builtin() -> Self {
        Self {
            builtin: true,
            default: true,
            ..Self::passthrough(DEFAULT_SCOPE)
        }
    }

    /// Marks the scope as the default.
    pub fn as_default(mut self) -> Self {
        self.default = true;
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn is_default(&self) -> bool {
        self.default
    }

    /// Evaluates the predicate.
    pub fn matches(&self, row: &C) -> bool {
        (self.predicate)(row)
    }
}

impl<C> Clone for Scope<C> {
    fn clone(&self) -> Self {
        Self {
            name: self.name.clone(),
            default: self.default,
            builtin: self.builtin,
            predicate: Arc::clone(&self.predicate),
        }
    }
}

impl<C> fmt::Debug for Scope<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Scope")
            .field("name", &self.name)
            .field("default", &self.default)
            .finish()
    }
}

/// Scopes of one selector.
#[derive(Debug, Clone)]
pub struct ScopeSet<C> {
    scopes: Vec<Scope<C>>,
}

impl<C> Default for ScopeSet<C> {
    fn default() -> Self {
        Self {
            scopes: vec![Scope::builtin()],
        }
    }
}

impl<C> ScopeSet<C> {
    /// Creates a set holding only the passthrough default.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a scope.
    ///
    /// A scope named `""` replaces the built-in passthrough. Declaring a
    /// default demotes the built-in one; declaring two defaults is an error.
    pub fn add(&mut self, resource: &'static str, scope: Scope<C>) -> DescriptorResult<()> {
        if let Some(pos) = self.scopes.iter().position(|s| s.name == scope.name) {
            if !self.scopes[pos].builtin {
                return Err(DescriptorError::DuplicateScope {
                    resource,
                    scope: scope.name,
                });
            }
            self.scopes.remove(pos);
        }

        if scope.default {
            if self.scopes.iter().any(|s| s.default && !s.builtin) {
                return Err(DescriptorError::MultipleDefaultScopes { resource });
            }
            for existing in &mut self.scopes {
                existing.default = false;
            }
        }
        self.scopes.push(scope);

        if !self.scopes.iter().any(|s| s.default) {
            match self.scopes.iter_mut().find(|s| s.name == DEFAULT_SCOPE) {
                Some(unnamed) => unnamed.default = true,
                None => self.scopes.insert(0, Scope::builtin()),
            }
        }
        Ok(())
    }

    /// The scope applied when none is named.
    pub fn default_scope(&self) -> &Scope<C> {
        // `add` keeps exactly one default; the fallback covers an empty set
        self.scopes
            .iter()
            .find(|s| s.default)
            .unwrap_or(&self.scopes[0])
    }

    /// Resolves a requested scope name; `None` selects the default.
    pub fn resolve(&self, name: Option<&str>) -> Option<&Scope<C>> {
        match name {
            None => Some(self.default_scope()),
            Some(name) => self.scopes.iter().find(|s| s.name == name),
        }
    }

    /// Scope names in declaration order.
    pub fn names(&self) -> Vec<&str> {
        self.scopes.iter().map(|s| s.name.as_str()).collect()
    }
}

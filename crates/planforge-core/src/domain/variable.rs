//! Context-relative probes into external state.

use std::cell::RefCell;
use std::fmt;
use std::marker::PhantomData;

use tracing::trace;

use super::handle::VariableId;
use crate::value::Value;

pub(crate) type Provider<C> = Box<dyn Fn(&C) -> Value>;

/// A registered variable: a named value provider with a one-slot cache.
///
/// The cache holds the value computed for the most recent context. It stays
/// valid until [`Domain::invalidate_cached_values`](super::Domain::invalidate_cached_values)
/// is called, so callers must invalidate once per planning episode.
pub struct VariableInfo<C> {
    id: VariableId,
    name: String,
    provider: Provider<C>,
    cache: RefCell<Option<(C, Value)>>,
}

impl<C> VariableInfo<C> {
    pub(crate) fn new(id: VariableId, name: String, provider: Provider<C>) -> Self {
        Self {
            id,
            name,
            provider,
            cache: RefCell::new(None),
        }
    }

    #[inline]
    pub fn id(&self) -> VariableId {
        self.id
    }

    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns true if a value is cached for some context.
    pub fn is_cached(&self) -> bool {
        self.cache.borrow().is_some()
    }

    pub(crate) fn invalidate(&self) {
        self.cache.borrow_mut().take();
    }
}

impl<C: PartialEq + Clone> VariableInfo<C> {
    /// Returns the value of this variable for `context`.
    ///
    /// Recomputes only when the cached value belongs to a different context.
    pub fn value_for(&self, context: &C) -> Value {
        if let Some((cached_for, value)) = self.cache.borrow().as_ref() {
            if cached_for == context {
                return value.clone();
            }
        }

        trace!(event = "cache_miss", variable = %self.name);
        let value = (self.provider)(context);
        *self.cache.borrow_mut() = Some((context.clone(), value.clone()));
        value
    }
}

impl<C> fmt::Debug for VariableInfo<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("VariableInfo")
            .field("id", &self.id)
            .field("name", &self.name)
            .field("cached", &self.is_cached())
            .finish()
    }
}

/// Typed handle to a variable whose provider returns `T`.
///
/// Goals on the variable can only be built from values of the same type.
pub struct Variable<T> {
    id: VariableId,
    _marker: PhantomData<fn() -> T>,
}

impl<T> Variable<T> {
    pub(crate) fn new(id: VariableId) -> Self {
        Self {
            id,
            _marker: PhantomData,
        }
    }

    #[inline]
    pub fn id(self) -> VariableId {
        self.id
    }
}

impl<T> Clone for Variable<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for Variable<T> {}

impl<T> PartialEq for Variable<T> {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl<T> Eq for Variable<T> {}

impl<T> fmt::Debug for Variable<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Variable").field(&self.id).finish()
    }
}

impl<T> From<Variable<T>> for VariableId {
    fn from(variable: Variable<T>) -> Self {
        variable.id
    }
}

//! Explicit dispatch tables for listeners given by method name.
//!
//! An application registers its handler methods by name; a listener written
//! as a plain string calls the method with the prefix of `(view, new, old)`
//! the method declares.

use alloc::collections::BTreeMap;
use alloc::rc::Rc;
use core::any::Any;
use core::fmt::{self, Debug};

use crate::error::BindingError;
use crate::view::View;

type Method = Rc<dyn Fn(&View, &[&dyn Any]) -> Result<(), BindingError>>;

/// One named method.
#[derive(Clone)]
pub struct BindingMethod {
    params: usize,
    func: Method,
}

fn arg<'a, E: 'static>(args: &[&'a dyn Any], index: usize) -> Result<&'a E, BindingError> {
    let arg: &'a dyn Any = *args
        .get(index)
        .ok_or_else(|| BindingError::ArgumentType(core::any::type_name::<E>().to_string()))?;
    arg.downcast_ref::<E>()
        .ok_or_else(|| BindingError::ArgumentType(core::any::type_name::<E>().to_string()))
}

impl BindingMethod {
    /// A method without parameters.
    pub fn new(func: impl Fn() + 'static) -> Self {
        Self {
            params: 0,
            func: Rc::new(move |_, _| {
                func();
                Ok(())
            }),
        }
    }

    /// A method taking the view.
    pub fn with_view(func: impl Fn(&View) + 'static) -> Self {
        Self {
            params: 1,
            func: Rc::new(move |view, _| {
                func(view);
                Ok(())
            }),
        }
    }

    /// A method taking the view and one event argument.
    pub fn with_event<E: 'static>(func: impl Fn(&View, &E) + 'static) -> Self {
        Self {
            params: 2,
            func: Rc::new(move |view, args| {
                func(view, arg::<E>(args, 0)?);
                Ok(())
            }),
        }
    }

    /// A method taking the view, the new and the old value.
    pub fn with_values<E: 'static>(func: impl Fn(&View, &E, &E) + 'static) -> Self {
        Self {
            params: 3,
            func: Rc::new(move |view, args| {
                func(view, arg::<E>(args, 0)?, arg::<E>(args, 1)?);
                Ok(())
            }),
        }
    }

    /// Number of parameters, counting the view.
    #[must_use]
    pub const fn params(&self) -> usize {
        self.params
    }
}

impl Debug for BindingMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BindingMethod")
            .field("params", &self.params)
            .finish_non_exhaustive()
    }
}

/// Methods by name.
#[derive(Debug, Clone, Default)]
pub struct BindingTable {
    methods: BTreeMap<String, BindingMethod>,
}

impl PartialEq for BindingTable {
    fn eq(&self, other: &Self) -> bool {
        self.methods.len() == other.methods.len()
            && self
                .methods
                .iter()
                .zip(&other.methods)
                .all(|((a, ma), (b, mb))| a == b && Rc::ptr_eq(&ma.func, &mb.func))
    }
}

impl BindingTable {
    /// An empty table.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a method.
    #[must_use]
    pub fn with(mut self, name: impl Into<String>, method: BindingMethod) -> Self {
        self.methods.insert(name.into(), method);
        self
    }

    /// Registers a method in place.
    pub fn insert(&mut self, name: impl Into<String>, method: BindingMethod) {
        self.methods.insert(name.into(), method);
    }

    /// Calls a method with the prefix of `(view, args...)` it declares.
    ///
    /// # Errors
    ///
    /// Fails when the method is missing, declares more parameters than the event
    /// provides, or an argument has another type.
    pub fn call(&self, name: &str, view: &View, args: &[&dyn Any]) -> Result<(), BindingError> {
        let method = self
            .methods
            .get(name)
            .ok_or_else(|| BindingError::MissingMethod(name.to_string()))?;
        let available = 1 + args.len();
        if method.params > available {
            return Err(BindingError::Arity {
                name: name.to_string(),
                expected: method.params,
                got: available,
            });
        }
        (method.func)(view, args)
    }
}

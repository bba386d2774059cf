use crate::core;
use crate::types::{Arity, BadArgCount, Symbol, Value};
use std::cell::RefCell;
use std::collections::HashMap;
use std::fmt;
use std::rc::Rc;

#[derive(Debug, PartialEq)]
pub struct UnknownSymbol(pub Symbol);

impl fmt::Display for UnknownSymbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Undefined symbol {}", self.0)
    }
}

/// One scope of bindings. Lookups that miss here continue in the parent;
/// the global environment is the only one without a parent.
#[derive(Default)]
pub struct Environment {
    data: RefCell<HashMap<Symbol, Value>>,
    parent: Option<Rc<Environment>>,
}

impl Environment {
    /// The top-level environment, holding every primitive procedure and the
    /// constants `nil`, `true` and `false`.
    pub fn global() -> Rc<Self> {
        let env = Self::default();
        for (&name, &func) in core::CORE.iter() {
            env.define(name.into(), Value::Primitive(func));
        }
        env.define("nil".into(), Value::Nil);
        env.define("true".into(), Value::Bool(true));
        env.define("false".into(), Value::Bool(false));
        Rc::new(env)
    }

    /// An empty scope whose lookups fall through to `parent`.
    pub(crate) fn spawn_from(parent: &Rc<Self>) -> Rc<Self> {
        Rc::new(Self {
            data: RefCell::new(HashMap::new()),
            parent: Some(parent.clone()),
        })
    }

    /// A child of `parent` binding each parameter to the matching argument.
    pub fn extend(
        parameters: &[Symbol],
        args: &[Value],
        parent: &Rc<Self>,
    ) -> Result<Rc<Self>, BadArgCount> {
        Arity::exactly(parameters.len()).validate_for(args.len(), "lambda")?;
        let env = Self::spawn_from(parent);
        for (param, arg) in parameters.iter().zip(args) {
            env.define(param.clone(), arg.clone());
        }
        Ok(env)
    }

    pub fn get(&self, key: &Symbol) -> Option<Value> {
        match self.data.borrow().get(key) {
            Some(value) => Some(value.clone()),
            None => self.parent.as_ref().and_then(|parent| parent.get(key)),
        }
    }

    pub fn fetch(&self, key: &Symbol) -> Result<Value, UnknownSymbol> {
        self.get(key).ok_or_else(|| UnknownSymbol(key.clone()))
    }

    /// Binds `key` in this scope only, shadowing any outer binding.
    pub fn define(&self, key: Symbol, value: Value) -> Option<Value> {
        self.data.borrow_mut().insert(key, value)
    }

    /// Overwrites the nearest existing binding of `key`.
    pub fn assign(&self, key: &Symbol, value: Value) -> Result<(), UnknownSymbol> {
        if let Some(slot) = self.data.borrow_mut().get_mut(key) {
            *slot = value;
            return Ok(());
        }
        match &self.parent {
            Some(parent) => parent.assign(key, value),
            None => Err(UnknownSymbol(key.clone())),
        }
    }

    pub fn depth(&self) -> usize {
        match &self.parent {
            Some(parent) => 1 + parent.depth(),
            None => 0,
        }
    }
}

impl fmt::Display for Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Environment{{depth: {}, bindings: {}}}",
            self.depth(),
            self.data.borrow().len()
        )
    }
}

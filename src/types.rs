use crate::environment::Environment;
use crate::evaluator;
use derive_more::Deref;
use itertools::Itertools;

use std::cmp::Ordering;
use std::fmt;
use std::fmt::Formatter;
use std::ops::{RangeFrom, RangeInclusive};
use std::rc::Rc;

#[derive(Deref, Debug, Default, PartialEq)]
pub struct List(pub Vec<Value>);

pub type Int = i64;
pub type Float = f64;

#[derive(Deref, Debug, PartialEq, Eq, Hash, Clone)]
pub struct Symbol(pub String);

impl AsRef<str> for Symbol {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl From<&str> for Symbol {
    fn from(name: &str) -> Self {
        Symbol(name.into())
    }
}

impl fmt::Display for Symbol {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Arity {
    Between(RangeInclusive<usize>),
    AtLeast(RangeFrom<usize>),
}

#[derive(Debug, PartialEq)]
pub struct BadArgCount {
    name: String,
    expected: Arity,
    got: usize,
}

impl BadArgCount {
    pub fn got(&self) -> usize {
        self.got
    }
}

impl fmt::Display for BadArgCount {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "When evaluating {} expected {} arguments, but received {} arguments",
            self.name, self.expected, self.got
        )
    }
}

impl Arity {
    pub(crate) const fn exactly(n: usize) -> Self {
        Self::Between(n..=n)
    }

    pub(crate) const fn at_least(n: usize) -> Self {
        Self::AtLeast(n..)
    }

    pub(crate) fn contains(&self, n: usize) -> bool {
        match self {
            Self::Between(range) => range.contains(&n),
            Self::AtLeast(range) => range.contains(&n),
        }
    }

    pub(crate) fn validate_for(&self, n: usize, name: &str) -> Result<(), BadArgCount> {
        match self.contains(n) {
            true => Ok(()),
            false => Err(BadArgCount {
                name: name.to_string(),
                expected: self.clone(),
                got: n,
            }),
        }
    }
}

impl fmt::Display for Arity {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Arity::Between(r) => {
                if r.start() == r.end() {
                    write!(f, "exactly {}", r.start())
                } else {
                    write!(f, "from {} to {}", r.start(), r.end())
                }
            }
            Arity::AtLeast(r) => write!(f, "at least {}", r.start),
        }
    }
}

pub struct PrimitiveFn {
    pub name: &'static str,
    pub arity: Arity,
    pub fn_ptr: fn(&[Value]) -> evaluator::Result,
}

impl fmt::Debug for PrimitiveFn {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "primitive function #<{}>", self.name)
    }
}

pub struct Closure {
    pub parameters: Vec<Symbol>,
    pub body: Value,
    pub parent: Rc<Environment>,
}

impl fmt::Debug for Closure {
    // Skips the parent: it may well contain this Closure.
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Closure{{parameters: {:?}, body: {:?}}}",
            self.parameters, self.body
        )
    }
}

#[derive(Debug, Clone)]
pub enum Value {
    Nil,
    Bool(bool),
    Integer(Int),
    Float(Float),
    Symbol(Symbol),
    List(Rc<List>),
    Primitive(&'static PrimitiveFn),
    Closure(Rc<Closure>),
}

pub(crate) fn truthy(obj: &Value) -> bool {
    match obj {
        Value::Nil => false,
        Value::Bool(t) => *t,
        _ => true,
    }
}

pub(crate) fn callable(obj: &Value) -> bool {
    match obj {
        Value::Primitive(_) | Value::Closure(_) => true,
        _ => false,
    }
}

#[derive(Debug, PartialEq)]
pub enum TypeMismatch {
    NotANumber,
    NotAnInt,
    NotAList,
}

impl fmt::Display for TypeMismatch {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let expected = match self {
            TypeMismatch::NotANumber => "a number",
            TypeMismatch::NotAnInt => "an integer",
            TypeMismatch::NotAList => "a list",
        };
        write!(f, "expected {}", expected)
    }
}

/// A numeric argument, with floats contaminating any integer arithmetic they
/// take part in.
#[derive(Debug, Clone, Copy)]
pub enum Number {
    Integer(Int),
    Float(Float),
}

impl Number {
    pub(crate) fn as_float(self) -> Float {
        match self {
            Number::Integer(x) => x as Float,
            Number::Float(x) => x,
        }
    }
}

impl PartialEq for Number {
    fn eq(&self, other: &Self) -> bool {
        self.partial_cmp(other) == Some(Ordering::Equal)
    }
}

impl PartialOrd for Number {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        match (self, other) {
            (Number::Integer(x), Number::Integer(y)) => Some(x.cmp(y)),
            (x, y) => x.as_float().partial_cmp(&y.as_float()),
        }
    }
}

impl From<Number> for Value {
    fn from(n: Number) -> Self {
        match n {
            Number::Integer(x) => Value::Integer(x),
            Number::Float(x) => Value::Float(x),
        }
    }
}

impl Value {
    pub(crate) fn as_number(&self) -> Result<Number, TypeMismatch> {
        match self {
            Value::Integer(x) => Ok(Number::Integer(*x)),
            Value::Float(x) => Ok(Number::Float(*x)),
            _ => Err(TypeMismatch::NotANumber),
        }
    }

    pub(crate) fn as_int(&self) -> Result<Int, TypeMismatch> {
        match self {
            Value::Integer(x) => Ok(*x),
            _ => Err(TypeMismatch::NotAnInt),
        }
    }

    pub(crate) fn as_list(&self) -> Result<&List, TypeMismatch> {
        match self {
            Value::List(x) => Ok(x),
            _ => Err(TypeMismatch::NotAList),
        }
    }

    pub(crate) fn as_symbol(&self) -> Option<&Symbol> {
        match self {
            Value::Symbol(s) => Some(s),
            _ => None,
        }
    }

    pub(crate) fn is_list(&self) -> bool {
        matches!(self, Value::List(_))
    }

    pub(crate) fn is_symbol(&self) -> bool {
        matches!(self, Value::Symbol(_))
    }

    pub(crate) fn is_number(&self) -> bool {
        matches!(self, Value::Integer(_) | Value::Float(_))
    }
}

impl Value {
    pub(crate) fn new_list() -> Self {
        Self::List(Rc::new(List(Vec::new())))
    }
    pub fn wrap_list(elements: Vec<Value>) -> Self {
        Self::List(Rc::new(List(elements)))
    }
    pub fn new_symbol(name: &str) -> Self {
        Self::Symbol(Symbol(name.into()))
    }
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        use Value as V;
        match [self, other] {
            [V::Nil, V::Nil] => true,
            [V::Bool(x), V::Bool(y)] => x == y,
            [V::Integer(x), V::Integer(y)] => x == y,
            [V::Float(x), V::Float(y)] => x == y,
            [V::Symbol(x), V::Symbol(y)] => x == y,
            [V::List(x), V::List(y)] => x == y,
            [V::Primitive(x), V::Primitive(y)] => std::ptr::eq(*x, *y),
            [V::Closure(x), V::Closure(y)] => Rc::ptr_eq(x, y),
            [_, _] => false,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}",
            crate::printer::pr_str(self, crate::printer::PrintMode::Readable)
        )
    }
}

pub(crate) fn parameter_list(params: &[Symbol]) -> String {
    format!("({})", params.iter().join(" "))
}

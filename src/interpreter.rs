use crate::environment::Environment;
use crate::{evaluator, reader, Value};
use std::fmt;
use std::rc::Rc;

pub type Result = std::result::Result<Value, Error>;

#[derive(Debug, PartialEq)]
pub enum Error {
    Read(reader::Error),
    Eval(evaluator::Error),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Read(e) => write!(f, "{}", e),
            Error::Eval(e) => write!(f, "{}", e),
        }
    }
}

impl From<reader::Error> for Error {
    fn from(e: reader::Error) -> Self {
        Self::Read(e)
    }
}

impl From<evaluator::Error> for Error {
    fn from(e: evaluator::Error) -> Self {
        Self::Eval(e)
    }
}

pub fn read(line: &str) -> Result {
    reader::read_str(line).map_err(Error::Read)
}

pub fn eval(obj: &Value, env: &Rc<Environment>) -> Result {
    evaluator::eval(obj, env).map_err(Error::Eval)
}

/// Reads one line and evaluates it against `env`.
pub fn rep(line: &str, env: &Rc<Environment>) -> Result {
    eval(&read(line)?, env)
}

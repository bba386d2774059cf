use crate::environment::Environment;
use crate::evaluator::{eval, Error, Result};
use crate::types::{truthy, Closure, Symbol, Value};
use std::fmt;
use std::rc::Rc;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpecialForm {
    Quote,
    If,
    Set,
    Define,
    Lambda,
    Begin,
}

impl SpecialForm {
    pub fn from_symbol(symbol: &Symbol) -> Option<Self> {
        match symbol.as_str() {
            "quote" | "'" => Some(Self::Quote),
            "if" => Some(Self::If),
            "set!" => Some(Self::Set),
            "define" => Some(Self::Define),
            "lambda" => Some(Self::Lambda),
            "begin" => Some(Self::Begin),
            _ => None,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::Quote => "quote",
            Self::If => "if",
            Self::Set => "set!",
            Self::Define => "define",
            Self::Lambda => "lambda",
            Self::Begin => "begin",
        }
    }

    /// Evaluates the form whose operands (everything after the keyword) are
    /// `args`.
    pub fn apply(self, args: &[Value], env: &Rc<Environment>) -> Result {
        match self {
            Self::Quote => Ok(apply_quote(args)),
            Self::If => apply_if(args, env),
            Self::Set => apply_set(args, env),
            Self::Define => apply_define(args, env),
            Self::Lambda => apply_lambda(args, env),
            Self::Begin => apply_begin(args, env),
        }
    }
}

#[derive(Debug, PartialEq)]
pub enum FormError {
    WrongArgCount(SpecialForm, usize),
    TargetNotASymbol(SpecialForm),
    ParametersNotGivenAsList,
    ParameterNotASymbol,
}

impl fmt::Display for FormError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FormError::WrongArgCount(form, n) => {
                write!(f, "{}: malformed, got {} operands", form.name(), n)
            }
            FormError::TargetNotASymbol(form) => {
                write!(f, "{}: can only bind a symbol", form.name())
            }
            FormError::ParametersNotGivenAsList => {
                write!(f, "lambda: parameters must be given as a list")
            }
            FormError::ParameterNotASymbol => write!(f, "lambda: every parameter must be a symbol"),
        }
    }
}

fn target_and_value<'a>(
    form: SpecialForm,
    args: &'a [Value],
) -> std::result::Result<(&'a Symbol, &'a Value), FormError> {
    match args {
        [target, value] => target
            .as_symbol()
            .map(|s| (s, value))
            .ok_or(FormError::TargetNotASymbol(form)),
        _ => Err(FormError::WrongArgCount(form, args.len())),
    }
}

pub fn apply_quote(args: &[Value]) -> Value {
    match args {
        [single] => single.clone(),
        _ => Value::wrap_list(args.to_vec()),
    }
}

pub fn apply_if(args: &[Value], env: &Rc<Environment>) -> Result {
    let (test, consequent, alternative) = match args {
        [test, consequent] => (test, consequent, None),
        [test, consequent, alternative] => (test, consequent, Some(alternative)),
        _ => return Err(FormError::WrongArgCount(SpecialForm::If, args.len()).into()),
    };
    if truthy(&eval(test, env)?) {
        eval(consequent, env)
    } else {
        match alternative {
            Some(alternative) => eval(alternative, env),
            None => Ok(Value::Nil),
        }
    }
}

pub fn apply_set(args: &[Value], env: &Rc<Environment>) -> Result {
    let (key, value) = target_and_value(SpecialForm::Set, args)?;
    let value = eval(value, env)?;
    env.assign(key, value.clone())?;
    log::debug!("set! {} to {}", key, value);
    Ok(value)
}

pub fn apply_define(args: &[Value], env: &Rc<Environment>) -> Result {
    let (key, value) = target_and_value(SpecialForm::Define, args)?;
    let value = eval(value, env)?;
    env.define(key.clone(), value.clone());
    log::debug!("define {} as {}", key, value);
    Ok(value)
}

pub fn apply_lambda(args: &[Value], env: &Rc<Environment>) -> Result {
    let (parameters, body) = match args {
        [parameters, body] => (parameters, body),
        _ => return Err(FormError::WrongArgCount(SpecialForm::Lambda, args.len()).into()),
    };
    let parameters = parameters
        .as_list()
        .map_err(|_| FormError::ParametersNotGivenAsList)?;
    let parameters = parameters
        .iter()
        .map(|p| p.as_symbol().cloned().ok_or(FormError::ParameterNotASymbol))
        .collect::<std::result::Result<Vec<Symbol>, _>>()?;
    let closure = Closure {
        parameters,
        body: body.clone(),
        parent: env.clone(),
    };
    Ok(Value::Closure(Rc::new(closure)))
}

pub fn apply_begin(args: &[Value], env: &Rc<Environment>) -> Result {
    let mut last = Value::Nil;
    for obj in args {
        last = eval(obj, env)?;
    }
    Ok(last)
}

impl From<FormError> for Error {
    fn from(e: FormError) -> Self {
        Error::Form(e)
    }
}

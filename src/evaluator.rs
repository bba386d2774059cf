use crate::environment::{Environment, UnknownSymbol};
use crate::special_forms::{FormError, SpecialForm};
use crate::types::{BadArgCount, Closure, PrimitiveFn, TypeMismatch, Value};

use itertools::Itertools;
use std::fmt;
use std::rc::Rc;

pub type Result<T = Value> = std::result::Result<T, Error>;

#[derive(Debug, PartialEq)]
pub enum Error {
    UnknownSymbol(UnknownSymbol),
    NotCallable(Value),
    BadArgCount(BadArgCount),
    Form(FormError),
    TypeMismatch(TypeMismatch),
    DivideByZero,
    /// Raised by `quit`; carries the requested process exit code.
    Exit(i32),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::UnknownSymbol(e) => write!(f, "{}", e),
            Error::NotCallable(obj) => write!(f, "cannot apply {}: not a procedure", obj),
            Error::BadArgCount(e) => write!(f, "{}", e),
            Error::Form(e) => write!(f, "{}", e),
            Error::TypeMismatch(e) => write!(f, "type mismatch: {}", e),
            Error::DivideByZero => write!(f, "cannot divide by zero!"),
            Error::Exit(code) => write!(f, "exit requested with code {}", code),
        }
    }
}

impl From<TypeMismatch> for Error {
    fn from(t: TypeMismatch) -> Self {
        Self::TypeMismatch(t)
    }
}

impl From<UnknownSymbol> for Error {
    fn from(e: UnknownSymbol) -> Self {
        Self::UnknownSymbol(e)
    }
}

impl From<BadArgCount> for Error {
    fn from(e: BadArgCount) -> Self {
        Self::BadArgCount(e)
    }
}

/// Evaluates `ast` in `env`. Closure calls recurse on the host stack; there
/// is no tail-call optimisation.
pub fn eval(ast: &Value, env: &Rc<Environment>) -> Result {
    log::trace!("eval {}", ast);
    match ast {
        Value::Symbol(s) => Ok(env.fetch(s)?),
        Value::List(argv) => match argv.split_first() {
            None => Ok(ast.clone()),
            Some((head, rest)) => {
                if let Some(form) = head.as_symbol().and_then(SpecialForm::from_symbol) {
                    return form.apply(rest, env);
                }
                let callable = eval(head, env)?;
                let args = evaluate_sequence_elementwise(rest, env)?;
                apply(&callable, &args)
            }
        },
        _ => Ok(ast.clone()),
    }
}

pub fn apply(callable: &Value, args: &[Value]) -> Result {
    match callable {
        Value::Primitive(f) => call_primitive(f, args),
        Value::Closure(f) => call_closure(f, args),
        _ => Err(Error::NotCallable(callable.clone())),
    }
}

pub fn evaluate_sequence_elementwise(seq: &[Value], env: &Rc<Environment>) -> Result<Vec<Value>> {
    seq.iter().map(|obj| eval(obj, env)).collect()
}

pub(crate) fn pretty_print_args(args: &[Value]) -> String {
    match args.len() {
        0 => "no args".into(),
        1 => args[0].to_string(),
        _ => format!("\n\t{}", args.iter().join("\n\t")),
    }
}

pub fn call_primitive(func: &PrimitiveFn, args: &[Value]) -> Result {
    func.arity.validate_for(args.len(), func.name)?;
    log::trace!("Call {} with {}", func.name, pretty_print_args(args));
    let result = (func.fn_ptr)(args);
    match &result {
        Ok(val) => log::trace!("Call to {} resulted in {}", func.name, val),
        Err(e) => log::trace!("Call to {} failed: {}", func.name, e),
    }
    result
}

fn call_closure(func: &Closure, args: &[Value]) -> Result {
    log::trace!("Call {:?} with {}", func, pretty_print_args(args));
    let env = Environment::extend(&func.parameters, args, &func.parent)?;
    log::trace!("entered {}", env);
    eval(&func.body, &env)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reader::read_str;

    fn run(src: &str, env: &Rc<Environment>) -> Result {
        eval(&read_str(src).unwrap(), env)
    }

    #[test]
    fn literals_evaluate_to_themselves() {
        let env = Environment::global();
        for literal in &[Value::Integer(3), Value::Float(-1.5), Value::Nil, Value::Bool(false)] {
            assert_eq!(eval(literal, &env).as_ref(), Ok(literal));
        }
        let child = Environment::spawn_from(&env);
        assert_eq!(eval(&Value::Integer(9), &child), Ok(Value::Integer(9)));
    }

    #[test]
    fn empty_list_evaluates_to_itself() {
        let env = Environment::global();
        assert_eq!(run("()", &env), Ok(Value::new_list()));
    }

    #[test]
    fn unbound_symbol() {
        let env = Environment::global();
        assert_eq!(
            run("undefined", &env),
            Err(Error::UnknownSymbol(UnknownSymbol("undefined".into())))
        );
    }

    #[test]
    fn operator_must_be_callable() {
        let env = Environment::global();
        assert_eq!(run("(1 2 3)", &env), Err(Error::NotCallable(Value::Integer(1))));
        assert_eq!(
            run("((quote f) 2)", &env),
            Err(Error::NotCallable(Value::new_symbol("f")))
        );
    }

    #[test]
    fn operands_evaluated_before_callability_check() {
        let env = Environment::global();
        assert!(matches!(run("(1 missing)", &env), Err(Error::UnknownSymbol(_))));
    }

    #[test]
    fn closure_arity_is_exact() {
        let env = Environment::global();
        run("(define f (lambda (a b) a))", &env).unwrap();
        assert_eq!(run("(f 1 2)", &env), Ok(Value::Integer(1)));
        for call in &["(f 1)", "(f 1 2 3)"] {
            match run(call, &env) {
                Err(Error::BadArgCount(e)) => assert_ne!(e.got(), 2),
                other => panic!("{} gave {:?}", call, other),
            }
        }
    }

    #[test]
    fn primitive_arity_is_checked() {
        let env = Environment::global();
        assert!(matches!(run("(car)", &env), Err(Error::BadArgCount(_))));
    }

    #[test]
    fn shadowing_leaves_global_alone() {
        let env = Environment::global();
        run("(define x 1)", &env).unwrap();
        assert_eq!(run("((lambda (x) x) 2)", &env), Ok(Value::Integer(2)));
        assert_eq!(run("x", &env), Ok(Value::Integer(1)));
    }

    #[test]
    fn set_reaches_outer_scope() {
        let env = Environment::global();
        run("(define x 1)", &env).unwrap();
        run("((lambda (y) (set! x y)) 7)", &env).unwrap();
        assert_eq!(run("x", &env), Ok(Value::Integer(7)));
        assert!(matches!(run("(set! nowhere 1)", &env), Err(Error::UnknownSymbol(_))));
    }

    #[test]
    fn define_inside_call_is_local() {
        let env = Environment::global();
        run("(define f (lambda (v) (begin (define local v) local)))", &env).unwrap();
        assert_eq!(run("(f 4)", &env), Ok(Value::Integer(4)));
        assert!(matches!(run("local", &env), Err(Error::UnknownSymbol(_))));
    }

    #[test]
    fn closures_share_captured_environment() {
        let env = Environment::global();
        run(
            "(define make-counter (lambda (n) (lambda () (begin (set! n (+ n 1)) n))))",
            &env,
        )
        .unwrap();
        run("(define c (make-counter 10))", &env).unwrap();
        run("(define d (make-counter 0))", &env).unwrap();
        assert_eq!(run("(c)", &env), Ok(Value::Integer(11)));
        assert_eq!(run("(c)", &env), Ok(Value::Integer(12)));
        assert_eq!(run("(d)", &env), Ok(Value::Integer(1)));
    }

    #[test]
    fn if_short_circuits() {
        let env = Environment::global();
        assert_eq!(run("(if 1 10 (error))", &env), Ok(Value::Integer(10)));
        assert_eq!(run("(if false (error) 20)", &env), Ok(Value::Integer(20)));
    }

    #[test]
    fn recursion() {
        let env = Environment::global();
        run(
            "(define fact (lambda (n) (if (<= n 1) 1 (* n (fact (- n 1))))))",
            &env,
        )
        .unwrap();
        assert_eq!(run("(fact 10)", &env), Ok(Value::Integer(3_628_800)));
    }
}

use crate::evaluator;
use crate::printer::{pr_str, PrintMode};
use crate::types::{callable, truthy, Arity, Int, Number, PrimitiveFn, Value};
use std::collections::HashMap;
use std::convert::TryFrom;

fn grab_numbers(args: &[Value]) -> evaluator::Result<Vec<Number>> {
    let type_check: Result<Vec<_>, _> = args.iter().map(|o| o.as_number()).collect();
    type_check.map_err(evaluator::Error::TypeMismatch)
}

fn fold_numbers(
    args: &[Value],
    identity: Int,
    int_op: fn(Int, Int) -> Int,
    float_op: fn(f64, f64) -> f64,
) -> evaluator::Result {
    let value = grab_numbers(args)?
        .into_iter()
        .fold(Number::Integer(identity), |acc, x| match (acc, x) {
            (Number::Integer(a), Number::Integer(b)) => Number::Integer(int_op(a, b)),
            (a, b) => Number::Float(float_op(a.as_float(), b.as_float())),
        });
    Ok(value.into())
}

const SUM: PrimitiveFn = PrimitiveFn {
    name: "+",
    fn_ptr: sum_,
    arity: Arity::at_least(0),
};

fn sum_(args: &[Value]) -> evaluator::Result {
    fold_numbers(args, 0, Int::wrapping_add, |a, b| a + b)
}

const MUL: PrimitiveFn = PrimitiveFn {
    name: "*",
    fn_ptr: mul_,
    arity: Arity::at_least(0),
};

fn mul_(args: &[Value]) -> evaluator::Result {
    fold_numbers(args, 1, Int::wrapping_mul, |a, b| a * b)
}

const SUB: PrimitiveFn = PrimitiveFn {
    name: "-",
    fn_ptr: sub_,
    arity: Arity::exactly(2),
};

fn sub_(args: &[Value]) -> evaluator::Result {
    match grab_numbers(args)?.as_slice() {
        [Number::Integer(x), Number::Integer(y)] => Ok(Value::Integer(x.wrapping_sub(*y))),
        [x, y] => Ok(Value::Float(x.as_float() - y.as_float())),
        _ => unreachable!(),
    }
}

const DIV: PrimitiveFn = PrimitiveFn {
    name: "/",
    fn_ptr: div_,
    arity: Arity::exactly(2),
};

fn div_(args: &[Value]) -> evaluator::Result {
    match grab_numbers(args)?.as_slice() {
        [Number::Integer(_), Number::Integer(0)] => Err(evaluator::Error::DivideByZero),
        [Number::Integer(x), Number::Integer(y)] => Ok(Value::Integer(x.wrapping_div(*y))),
        [x, y] => Ok(Value::Float(x.as_float() / y.as_float())),
        _ => unreachable!(),
    }
}

fn comparison_(args: &[Value], comp: fn(&Number, &Number) -> bool) -> evaluator::Result {
    match grab_numbers(args)?.as_slice() {
        [x, y] => Ok(Value::Bool(comp(x, y))),
        _ => unreachable!(),
    }
}

// Number::lt and friends come from PartialOrd.
macro_rules! comparison_primitive {
    ($SYMBOL:tt, $NAME:ident) => {
        paste::item! {
            const $NAME: PrimitiveFn = PrimitiveFn {
                name: stringify!($SYMBOL),
                fn_ptr: |args: &[Value]| comparison_(args, Number:: [<$NAME:lower>]),
                arity: Arity::exactly(2),
            };
        }
    };
}

comparison_primitive!(<, LT);
comparison_primitive!(<=, LE);
comparison_primitive!(>, GT);
comparison_primitive!(>=, GE);

fn equal_(args: &[Value]) -> evaluator::Result {
    let equal = match (args[0].as_number(), args[1].as_number()) {
        (Ok(x), Ok(y)) => x == y,
        _ => args[0] == args[1],
    };
    Ok(Value::Bool(equal))
}

const EQUAL: PrimitiveFn = PrimitiveFn {
    name: "=",
    fn_ptr: equal_,
    arity: Arity::exactly(2),
};

const DOUBLE_EQUAL: PrimitiveFn = PrimitiveFn {
    name: "==",
    fn_ptr: equal_,
    arity: Arity::exactly(2),
};

const LENGTH: PrimitiveFn = PrimitiveFn {
    name: "length",
    fn_ptr: length_,
    arity: Arity::exactly(1),
};

fn length_(args: &[Value]) -> evaluator::Result {
    let list = args[0].as_list()?;
    Ok(Value::Integer(Int::try_from(list.len()).unwrap_or(Int::MAX)))
}

const CONS: PrimitiveFn = PrimitiveFn {
    name: "cons",
    fn_ptr: cons_,
    arity: Arity::exactly(2),
};

fn cons_(args: &[Value]) -> evaluator::Result {
    let head = &args[0];
    let tail = args[1].as_list()?;

    let mut elements = Vec::with_capacity(tail.len() + 1);
    elements.push(head.clone());
    elements.extend(tail.iter().cloned());
    Ok(Value::wrap_list(elements))
}

const CAR: PrimitiveFn = PrimitiveFn {
    name: "car",
    fn_ptr: car_,
    arity: Arity::exactly(1),
};

fn car_(args: &[Value]) -> evaluator::Result {
    let list = args[0].as_list()?;
    Ok(list.first().cloned().unwrap_or(Value::Nil))
}

const CDR: PrimitiveFn = PrimitiveFn {
    name: "cdr",
    fn_ptr: cdr_,
    arity: Arity::exactly(1),
};

fn cdr_(args: &[Value]) -> evaluator::Result {
    let list = args[0].as_list()?;
    match list.split_first() {
        Some((_, rest)) => Ok(Value::wrap_list(rest.to_vec())),
        None => Ok(Value::new_list()),
    }
}

const APPEND: PrimitiveFn = PrimitiveFn {
    name: "append",
    fn_ptr: append_,
    arity: Arity::at_least(0),
};

fn append_(args: &[Value]) -> evaluator::Result {
    let mut output = Vec::new();
    for arg in args {
        output.extend(arg.as_list()?.iter().cloned());
    }
    Ok(Value::wrap_list(output))
}

const LIST: PrimitiveFn = PrimitiveFn {
    name: "list",
    fn_ptr: list_,
    arity: Arity::at_least(0),
};

fn list_(args: &[Value]) -> evaluator::Result {
    Ok(Value::wrap_list(args.to_vec()))
}

const LIST_TEST: PrimitiveFn = PrimitiveFn {
    name: "list?",
    fn_ptr: list_test_,
    arity: Arity::exactly(1),
};

fn list_test_(args: &[Value]) -> evaluator::Result {
    Ok(Value::Bool(args[0].is_list()))
}

const NULL_TEST: PrimitiveFn = PrimitiveFn {
    name: "null?",
    fn_ptr: null_test_,
    arity: Arity::exactly(1),
};

fn null_test_(args: &[Value]) -> evaluator::Result {
    let null = match &args[0] {
        Value::Nil => true,
        Value::List(list) => list.is_empty(),
        _ => false,
    };
    Ok(Value::Bool(null))
}

const SYMBOL_TEST: PrimitiveFn = PrimitiveFn {
    name: "symbol?",
    fn_ptr: symbol_test_,
    arity: Arity::exactly(1),
};

fn symbol_test_(args: &[Value]) -> evaluator::Result {
    Ok(Value::Bool(args[0].is_symbol()))
}

const NUMBER_TEST: PrimitiveFn = PrimitiveFn {
    name: "number?",
    fn_ptr: number_test_,
    arity: Arity::exactly(1),
};

fn number_test_(args: &[Value]) -> evaluator::Result {
    Ok(Value::Bool(args[0].is_number()))
}

const PROCEDURE_TEST: PrimitiveFn = PrimitiveFn {
    name: "procedure?",
    fn_ptr: procedure_test_,
    arity: Arity::exactly(1),
};

fn procedure_test_(args: &[Value]) -> evaluator::Result {
    Ok(Value::Bool(callable(&args[0])))
}

const NOT: PrimitiveFn = PrimitiveFn {
    name: "not",
    fn_ptr: not_,
    arity: Arity::exactly(1),
};

fn not_(args: &[Value]) -> evaluator::Result {
    Ok(Value::Bool(!truthy(&args[0])))
}

const DISPLAY: PrimitiveFn = PrimitiveFn {
    name: "display",
    fn_ptr: display_,
    arity: Arity::exactly(1),
};

fn display_(args: &[Value]) -> evaluator::Result {
    // Bypasses the linefeed interface in cmdline.rs.
    println!("{}", pr_str(&args[0], PrintMode::Readable));
    Ok(Value::Nil)
}

const QUIT: PrimitiveFn = PrimitiveFn {
    name: "quit",
    fn_ptr: quit_,
    arity: Arity::Between(0..=1),
};

fn quit_(args: &[Value]) -> evaluator::Result {
    let code = match args.first() {
        Some(code) => code.as_int()?,
        None => 0,
    };
    Err(evaluator::Error::Exit(
        i32::try_from(code).unwrap_or(i32::MAX),
    ))
}

static PRIMITIVES: &[PrimitiveFn] = &[
    // Arithmetic
    SUM,
    SUB,
    MUL,
    DIV,
    // Comparisons
    GT,
    GE,
    LT,
    LE,
    EQUAL,
    DOUBLE_EQUAL,
    // Working with lists
    LENGTH,
    CONS,
    CAR,
    CDR,
    APPEND,
    LIST,
    // Testing
    LIST_TEST,
    NULL_TEST,
    SYMBOL_TEST,
    NUMBER_TEST,
    PROCEDURE_TEST,
    NOT,
    // Other
    DISPLAY,
    QUIT,
];

type Namespace = HashMap<&'static str, &'static PrimitiveFn>;
lazy_static! {
    pub static ref CORE: Namespace = {
        let mut map = Namespace::new();
        for func in PRIMITIVES.iter() {
            map.insert(func.name, func);
        }
        map
    };
}

use crate::types::{parameter_list, Value};
use itertools::Itertools;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PrintMode {
    /// The language's own notation, which the reader accepts back.
    Readable,
    /// Shows the shape of a parsed tree: lists as `[a, b]`, symbols as `:name`.
    Inspect,
}

pub fn pr_str(object: &Value, mode: PrintMode) -> String {
    match object {
        Value::List(elements) => match mode {
            PrintMode::Readable => format!(
                "({})",
                elements.iter().map(|obj| pr_str(obj, mode)).join(" ")
            ),
            PrintMode::Inspect => format!(
                "[{}]",
                elements.iter().map(|obj| pr_str(obj, mode)).join(", ")
            ),
        },
        Value::Symbol(name) => match mode {
            PrintMode::Readable => name.to_string(),
            PrintMode::Inspect => format!(":{}", name),
        },
        Value::Integer(value) => value.to_string(),
        // Debug keeps the trailing ".0", so floats read back as floats.
        Value::Float(value) => format!("{:?}", value),
        Value::Nil => String::from("nil"),
        Value::Bool(true) => String::from("true"),
        Value::Bool(false) => String::from("false"),
        Value::Primitive(f) => format!("#<primitive {}>", f.name),
        Value::Closure(c) => format!("#<closure {}>", parameter_list(&c.parameters)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reader::read_str;

    fn readable(src: &str) -> String {
        pr_str(&read_str(src).unwrap(), PrintMode::Readable)
    }

    #[test]
    fn lists_are_space_separated_in_parens() {
        assert_eq!(readable("(a   (b 1)\t2.5 ())"), "(a (b 1) 2.5 ())");
    }

    #[test]
    fn floats_keep_their_point() {
        assert_eq!(pr_str(&Value::Float(3.0), PrintMode::Readable), "3.0");
        assert_eq!(pr_str(&Value::Float(-0.25), PrintMode::Readable), "-0.25");
    }

    #[test]
    fn inspect_shows_structure() {
        let tree = read_str("(define square (lambda (x) (* x x)))").unwrap();
        assert_eq!(
            pr_str(&tree, PrintMode::Inspect),
            "[:define, :square, [:lambda, [:x], [:*, :x, :x]]]"
        );
        assert_eq!(pr_str(&Value::Integer(5), PrintMode::Inspect), "5");
    }

    #[test]
    fn constants() {
        assert_eq!(pr_str(&Value::Nil, PrintMode::Readable), "nil");
        assert_eq!(pr_str(&Value::Bool(true), PrintMode::Readable), "true");
        assert_eq!(pr_str(&Value::Bool(false), PrintMode::Inspect), "false");
    }
}

use regex::Regex;

#[derive(Debug, Eq, PartialEq, Clone, Copy)]
pub enum Token<'a> {
    OpenRoundBracket,
    CloseRoundBracket,
    PlainChars(&'a str),
}

fn create_token(captured: &str) -> Token<'_> {
    match captured {
        "(" => Token::OpenRoundBracket,
        ")" => Token::CloseRoundBracket,
        _ => Token::PlainChars(captured),
    }
}

/// Splits a line into brackets and the runs of non-whitespace between them.
/// This is the same as padding every bracket with spaces and splitting on
/// whitespace.
pub fn tokenize(input: &str) -> Vec<Token<'_>> {
    lazy_static! {
        static ref TOKEN_RE: Regex = Regex::new(
            r#"(?x)           # ignore whitespace in this pattern & allow comments
                [()]          # a single bracket
                |[^\s()]+     # or one or more plain characters
            "#
        )
        .expect("token regex is valid");
    }
    TOKEN_RE
        .find_iter(input)
        .map(|m| create_token(m.as_str()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use Token::*;

    #[test]
    fn brackets_split_from_atoms() {
        assert_eq!(
            tokenize("(+ 1 (f x))"),
            vec![
                OpenRoundBracket,
                PlainChars("+"),
                PlainChars("1"),
                OpenRoundBracket,
                PlainChars("f"),
                PlainChars("x"),
                CloseRoundBracket,
                CloseRoundBracket,
            ]
        );
    }

    #[test]
    fn whitespace_of_any_kind_separates() {
        assert_eq!(
            tokenize("  a\tb\n c  "),
            vec![PlainChars("a"), PlainChars("b"), PlainChars("c")]
        );
    }

    #[test]
    fn no_special_casing_of_quotes_or_semicolons() {
        assert_eq!(
            tokenize("'x \"y;z\""),
            vec![PlainChars("'x"), PlainChars("\"y;z\"")]
        );
    }

    #[test]
    fn empty_input_has_no_tokens() {
        assert!(tokenize("").is_empty());
        assert!(tokenize("   ").is_empty());
    }
}

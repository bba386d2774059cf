use crate::environment::Environment;
use crate::printer::{pr_str, PrintMode};
use crate::types::truthy;
use crate::{evaluator, interpreter};
use ansi_term::Colour;
use linefeed::{DefaultTerminal, Interface, ReadResult, Terminal};
use std::fmt;
use std::path::PathBuf;
use std::rc::Rc;

const USAGE: &str = "usage: lispy [-q|--quiet] [--no-history] [-h|--help]";

#[derive(Debug)]
pub enum Error {
    Io(std::io::Error),
    Usage(String),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Io(e) => write!(f, "io error: {}", e),
            Error::Usage(arg) => write!(f, "unrecognised argument {}\n{}", arg, USAGE),
        }
    }
}

impl From<std::io::Error> for Error {
    fn from(e: std::io::Error) -> Self {
        Self::Io(e)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Options {
    /// Show the parsed form of each line before its value.
    pub echo: bool,
    pub history: bool,
    pub help: bool,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            echo: true,
            history: true,
            help: false,
        }
    }
}

impl Options {
    /// Parses everything after the program name.
    pub fn from_args(args: &[String]) -> Result<Self, Error> {
        let mut options = Self::default();
        for arg in args {
            match arg.as_str() {
                "-q" | "--quiet" => options.echo = false,
                "--no-history" => options.history = false,
                "-h" | "--help" => options.help = true,
                _ => return Err(Error::Usage(arg.clone())),
            }
        }
        Ok(options)
    }
}

/// What the driver shows for one line of input.
#[derive(Debug, PartialEq)]
pub enum Output {
    Echo(String),
    Value(String),
    Error(String),
}

#[derive(Debug, PartialEq)]
pub enum Outcome {
    Continue(Vec<Output>),
    Exit(i32),
}

pub fn process_line(line: &str, env: &Rc<Environment>, options: &Options) -> Outcome {
    let mut outputs = Vec::new();
    if line.trim().is_empty() {
        return Outcome::Continue(outputs);
    }
    let ast = match interpreter::read(line) {
        Ok(ast) => ast,
        Err(e) => {
            outputs.push(Output::Error(e.to_string()));
            return Outcome::Continue(outputs);
        }
    };
    if options.echo {
        outputs.push(Output::Echo(pr_str(&ast, PrintMode::Inspect)));
    }
    match interpreter::eval(&ast, env) {
        Ok(value) if !truthy(&value) => {}
        Ok(value) => outputs.push(Output::Value(pr_str(&value, PrintMode::Readable))),
        Err(interpreter::Error::Eval(evaluator::Error::Exit(code))) => {
            log::info!("quit requested with code {}", code);
            return Outcome::Exit(code);
        }
        Err(e) => outputs.push(Output::Error(e.to_string())),
    }
    Outcome::Continue(outputs)
}

pub fn banner() -> String {
    format!(
        "Welcome to lispy version {}, a Scheme interpreter after Peter Norvig's lis.py\n{}",
        env!("CARGO_PKG_VERSION"),
        chrono::Local::now().format("%Y-%m-%d %H:%M:%S %z")
    )
}

pub fn setup(options: &Options) -> std::io::Result<Interface<DefaultTerminal>> {
    let interface = linefeed::Interface::new("lispy")?;
    interface.set_prompt("lispy> ")?;
    if options.history {
        if let Some(path) = history_path() {
            if let Err(e) = interface.load_history(&path) {
                log::debug!("no history loaded from {}: {}", path.display(), e);
            }
        };
    }
    Ok(interface)
}

fn history_path() -> Option<PathBuf> {
    match dirs::data_dir() {
        Some(mut path) => {
            path.push(".lispy_history");
            Some(path)
        }
        None => None,
    }
}

pub fn save_history<T: Terminal>(interface: &Interface<T>) -> std::io::Result<()> {
    match history_path() {
        Some(path) => interface.save_history(path),
        None => Ok(()),
    }
}

fn paint_error(message: &str) -> String {
    if atty::is(atty::Stream::Stdout) {
        Colour::Red.paint(message).to_string()
    } else {
        message.to_string()
    }
}

/// Runs the read-eval-print loop until end of input or `quit`, returning the
/// process exit code.
pub fn repl<T: Terminal>(
    interface: &Interface<T>,
    env: &Rc<Environment>,
    options: &Options,
) -> i32 {
    loop {
        match interface.read_line() {
            Ok(ReadResult::Eof) => return 0,
            Ok(ReadResult::Signal(sig)) => {
                writeln!(interface, "Received signal {:?}", sig).ok();
            }
            Ok(ReadResult::Input(line)) => {
                interface.add_history_unique(line.clone());
                let outputs = match process_line(&line, env, options) {
                    Outcome::Continue(outputs) => outputs,
                    Outcome::Exit(code) => return code,
                };
                for output in outputs {
                    match output {
                        Output::Echo(text) | Output::Value(text) => {
                            writeln!(interface, "{}", text).ok()
                        }
                        Output::Error(text) => writeln!(interface, "{}", paint_error(&text)).ok(),
                    };
                }
            }
            Err(e) => {
                writeln!(interface, "Error: {}", e).ok();
                return 1;
            }
        }
    }
}

/// Entry point for the binary: `args` is the full argument vector including
/// the program name.
pub fn launch(args: Vec<String>, env: &Rc<Environment>) -> Result<i32, Error> {
    let options = Options::from_args(args.get(1..).unwrap_or(&[]))?;
    if options.help {
        println!("{}", USAGE);
        return Ok(0);
    }
    let interface = setup(&options)?;
    writeln!(interface, "{}", banner())?;
    let code = repl(&interface, env, &options);
    if options.history {
        save_history(&interface)?;
    }
    Ok(code)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn options_from_flags() {
        assert_eq!(Options::from_args(&[]).unwrap(), Options::default());
        let quiet = Options::from_args(&args(&["-q", "--no-history"])).unwrap();
        assert!(!quiet.echo);
        assert!(!quiet.history);
        assert!(Options::from_args(&args(&["--help"])).unwrap().help);
        assert!(matches!(
            Options::from_args(&args(&["--load", "f.scm"])),
            Err(Error::Usage(_))
        ));
    }

    #[test]
    fn echoes_parse_then_prints_value() {
        let env = Environment::global();
        let options = Options::default();
        assert_eq!(
            process_line("(+ 1 2)", &env, &options),
            Outcome::Continue(vec![
                Output::Echo("[:+, 1, 2]".into()),
                Output::Value("3".into()),
            ])
        );
    }

    #[test]
    fn false_results_and_blank_lines_print_nothing() {
        let env = Environment::global();
        let options = Options {
            echo: false,
            ..Options::default()
        };
        assert_eq!(
            process_line("(if false 1)", &env, &options),
            Outcome::Continue(vec![])
        );
        assert_eq!(process_line("(< 2 1)", &env, &options), Outcome::Continue(vec![]));
        assert_eq!(
            process_line("(< 1 2)", &env, &options),
            Outcome::Continue(vec![Output::Value("true".into())])
        );
        assert_eq!(process_line("   ", &env, &options), Outcome::Continue(vec![]));
    }

    #[test]
    fn errors_are_reported_and_state_survives() {
        let env = Environment::global();
        let options = Options {
            echo: false,
            ..Options::default()
        };
        process_line("(define x 5)", &env, &options);
        assert_eq!(
            process_line("(+ x", &env, &options),
            Outcome::Continue(vec![Output::Error(
                "syntax error: unexpected EOF while reading".into()
            )])
        );
        assert_eq!(
            process_line("y", &env, &options),
            Outcome::Continue(vec![Output::Error("Undefined symbol y".into())])
        );
        assert_eq!(
            process_line("x", &env, &options),
            Outcome::Continue(vec![Output::Value("5".into())])
        );
    }

    #[test]
    fn quit_ends_the_session() {
        let env = Environment::global();
        let options = Options::default();
        assert_eq!(process_line("(quit 2)", &env, &options), Outcome::Exit(2));
    }
}

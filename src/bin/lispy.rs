use lispy::{cmdline, Environment};

fn main() {
    pretty_env_logger::init();
    let env = Environment::global();
    let args = std::env::args().collect();
    match cmdline::launch(args, &env) {
        Ok(code) => std::process::exit(code),
        Err(e) => {
            eprintln!("{}", e);
            std::process::exit(2);
        }
    }
}

#![forbid(unsafe_code)]

//! gridmenu demo binary entry point.

use gridmenu::RuntimeConfig;
use gridmenu_demo::{app, cli};

fn main() {
    let opts = cli::Opts::parse();
    gridmenu_core::logging::init(opts.json_log);

    match app::run(&opts, RuntimeConfig::from_env()) {
        Ok(session) => print!("{}", session.transcript()),
        Err(e) => {
            eprintln!("Demo error: {e}");
            std::process::exit(1);
        }
    }
}

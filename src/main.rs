use std::env;
use std::process::ExitCode;

fn main() -> ExitCode {
    init_logging();
    match wsaw::cli::run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("wsaw: {e:#}");
            ExitCode::FAILURE
        }
    }
}

/// Alfred's debugger sets `alfred_debug=1`; RUST_LOG still wins.
fn init_logging() {
    let level = match env::var("alfred_debug").as_deref() {
        Ok("1") => "debug",
        _ => "warn",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level))
        .format_timestamp(None)
        .init();
}

use std::process::ExitCode;

fn main() -> ExitCode {
    depmap::cli::run()
}

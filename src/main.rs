use std::process::ExitCode;

fn main() -> ExitCode {
    match agent_session_explorer::cli::run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            ExitCode::FAILURE
        }
    }
}

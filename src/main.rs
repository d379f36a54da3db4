use std::process::ExitCode;

fn main() -> ExitCode {
    match vessel_baselines::app::run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("{err}");
            ExitCode::from(err.exit_code())
        }
    }
}

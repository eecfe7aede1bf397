use std::process::ExitCode;

fn main() -> ExitCode {
    match lsv_tuner_cli::run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            lsv_tuner_cli::report_error(&err);
            ExitCode::FAILURE
        }
    }
}

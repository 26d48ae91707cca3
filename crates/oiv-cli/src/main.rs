use std::process;

fn main() -> process::ExitCode {
    match oiv_cli::run() {
        Ok(code) => process::ExitCode::from(code as u8),
        Err(err) => {
            eprintln!("oiv-package error: {err:#}");
            process::ExitCode::from(oiv_cli::ExitCode::Failure as u8)
        }
    }
}

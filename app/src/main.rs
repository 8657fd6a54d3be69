use std::process::ExitCode;

use polywire_app::ShellArgs;

fn main() -> ExitCode {
    match polywire_app::run(ShellArgs::parse()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            log::error!("{err}");
            eprintln!("error: {err}");
            ExitCode::FAILURE
        }
    }
}

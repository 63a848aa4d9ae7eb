/*!
`verify <task-file> <certificate-file> [--timeout=<seconds>] [--discard_formulas]`

Replays a certificate against a task and exits with the stable exit
code contract of §6: 0 valid, 2 certificate invalid, 3/4 missing files,
5 parsing error, 6 out of memory, 7 timeout, 1 any other internal error.
*/

use std::path::Path;
use std::process::ExitCode;

use planproof::cli::parse_args;
use planproof::driver::{self, Verdict};
use planproof::task::parse::read_task_file;
use planproof::types::err::{ErrorKind, ResourceError};

fn main() -> ExitCode {
    #[cfg(feature = "log")]
    env_logger::init();

    let args: Vec<String> = std::env::args().skip(1).collect();
    ExitCode::from(run(&args))
}

fn run(args: &[String]) -> u8 {
    let cli = match parse_args(args) {
        Ok(cli) => cli,
        Err(_) => return 5,
    };

    let task = match read_task_file(Path::new(&cli.task_path)) {
        Ok(task) => task,
        Err(_) => return 3,
    };

    let certificate_text = match std::fs::read_to_string(&cli.certificate_path) {
        Ok(text) => text,
        Err(_) => return 4,
    };

    match driver::run(&task, &certificate_text, &cli.config) {
        Ok(Verdict::UnsolvableProven) => 0,
        Ok(Verdict::NotProven) => 2,
        Err(ErrorKind::Parse(_)) | Err(ErrorKind::Store(_)) => 5,
        Err(ErrorKind::Resource(ResourceError::Timeout)) => 7,
        Err(ErrorKind::Resource(ResourceError::OutOfMemory)) => 6,
        Err(ErrorKind::Rule(_)) | Err(ErrorKind::Engine(_)) => 1,
    }
}

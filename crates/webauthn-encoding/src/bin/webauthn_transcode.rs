//! `webauthn-transcode` — transcode a WebAuthn envelope (stdin) to JSON (stdout).
//!
//! Usage:
//!   webauthn-transcode <operation> [--safe] [--no-padding]
//!
//! Operations: decode-creation-request, encode-creation-response,
//! decode-credential-request, encode-credential-response.
//!
//! Set `RUST_LOG=debug` to see which fields were transcoded.

use std::io::{self, Read, Write};

use webauthn_encoding::cli::{parse_args, run, CliError, Operation};

fn main() {
    env_logger::init();

    let (operation, options) = match parse_args(std::env::args().skip(1)) {
        Ok(parsed) => parsed,
        Err(CliError::UnknownOperation(name)) if name.is_empty() => {
            eprintln!("First argument must be one of: {}", Operation::NAMES.join(", "));
            std::process::exit(1);
        }
        Err(e) => {
            eprintln!("{e}");
            std::process::exit(1);
        }
    };

    let mut buf = String::new();
    if let Err(e) = io::stdin().read_to_string(&mut buf) {
        eprintln!("{e}");
        std::process::exit(1);
    }

    match run(operation, &buf, options) {
        Ok(result) => {
            let mut stdout = io::stdout();
            if let Err(e) = writeln!(stdout, "{result}") {
                eprintln!("{e}");
                std::process::exit(1);
            }
        }
        Err(e) => {
            eprintln!("{e}");
            std::process::exit(1);
        }
    }
}

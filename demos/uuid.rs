//! Simple command that prints one or '-n count' UUID strings of version '-v 1' or '-v 4'

use std::{env, io, io::Write, process::ExitCode};

#[derive(Debug, Default)]
struct Options {
    version: Option<u8>,
    count: Option<usize>,
}

fn main() -> io::Result<ExitCode> {
    let opts = {
        let mut args = env::args();
        let program = args.next();
        match parse_args(args) {
            Ok(opts) => opts,
            Err(message) => {
                eprintln!("Error: {}", message);
                eprintln!(
                    "Usage: {} [-v 1|4] [-n count]",
                    program.as_deref().unwrap_or("uuid")
                );
                return Ok(ExitCode::FAILURE);
            }
        }
    };

    let mut buf = io::BufWriter::new(io::stdout());
    for _ in 0..opts.count.unwrap_or(1) {
        match opts.version.unwrap_or(4) {
            1 => writeln!(buf, "{}", rfc4122::uuid1())?,
            _ => writeln!(buf, "{}", rfc4122::uuid4())?,
        }
    }

    Ok(ExitCode::SUCCESS)
}

fn parse_args(mut args: impl Iterator<Item = String>) -> Result<Options, String> {
    let mut opts = Options::default();
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "-n" => {
                if opts.count.is_some() {
                    return Err("option 'n' given more than once".to_owned());
                }
                let Some(n_arg) = args.next() else {
                    return Err("argument to option 'n' missing".to_owned());
                };
                let Ok(c) = n_arg.parse() else {
                    return Err(format!("invalid argument to option 'n': '{}'", n_arg));
                };
                opts.count.replace(c);
            }
            "-v" => {
                if opts.version.is_some() {
                    return Err("option 'v' given more than once".to_owned());
                }
                let Some(v_arg) = args.next() else {
                    return Err("argument to option 'v' missing".to_owned());
                };
                match v_arg.as_str() {
                    "1" => opts.version.replace(1),
                    "4" => opts.version.replace(4),
                    _ => return Err(format!("unsupported version: '{}'", v_arg)),
                };
            }
            _ => return Err(format!("unrecognized argument '{}'", arg)),
        }
    }
    Ok(opts)
}

//! Command-line front end: `chordsheet-cli INPUT OUTPUT [--chords FILE] [--strict]`.

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use chordsheet::{
    load_chord_library, read_file, render_str, sheet_to_json, sheet_to_svg, ChordLibrary,
    RenderOptions,
};

const USAGE: &str = "usage: chordsheet-cli INPUT OUTPUT [--chords LIBRARY.json] [--strict]";

#[derive(Debug)]
enum CliError {
    Usage(String),
    Io { path: PathBuf, source: std::io::Error },
    Sheet(chordsheet::Error),
}

impl std::fmt::Display for CliError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CliError::Usage(msg) => write!(f, "{msg}\n{USAGE}"),
            CliError::Io { path, source } => {
                write!(f, "failed to write '{}': {source}", path.display())
            }
            CliError::Sheet(err) => write!(f, "{err}"),
        }
    }
}

impl From<chordsheet::Error> for CliError {
    fn from(value: chordsheet::Error) -> Self {
        Self::Sheet(value)
    }
}

#[derive(Debug, Default)]
struct Args {
    input: PathBuf,
    output: PathBuf,
    chords: Option<PathBuf>,
    strict: bool,
}

fn parse_args(mut args: impl Iterator<Item = String>) -> Result<Args, CliError> {
    let mut positional = Vec::new();
    let mut parsed = Args::default();

    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--chords" => {
                let path = args
                    .next()
                    .ok_or_else(|| CliError::Usage("--chords needs a file".into()))?;
                parsed.chords = Some(PathBuf::from(path));
            }
            "--strict" => parsed.strict = true,
            "-h" | "--help" => return Err(CliError::Usage("help requested".into())),
            flag if flag.starts_with("--") => {
                return Err(CliError::Usage(format!("unknown option {flag}")));
            }
            _ => positional.push(PathBuf::from(arg)),
        }
    }

    match <[PathBuf; 2]>::try_from(positional) {
        Ok([input, output]) => {
            parsed.input = input;
            parsed.output = output;
            Ok(parsed)
        }
        Err(_) => Err(CliError::Usage("expected INPUT and OUTPUT paths".into())),
    }
}

fn is_json(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case("json"))
}

fn run(args: Args) -> Result<(), CliError> {
    let library = match &args.chords {
        Some(path) => load_chord_library(path)?,
        None => ChordLibrary::builtin().clone(),
    };
    let options = RenderOptions {
        strict: args.strict,
        ..RenderOptions::default()
    };

    let text = read_file(&args.input)?;
    let sheet = render_str(&text, &library, &options)?;
    let output = if is_json(&args.output) {
        sheet_to_json(&sheet)?
    } else {
        sheet_to_svg(&sheet)
    };

    std::fs::write(&args.output, output).map_err(|source| CliError::Io {
        path: args.output.clone(),
        source,
    })?;
    log::info!("wrote {}", args.output.display());
    Ok(())
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let args = match parse_args(std::env::args().skip(1)) {
        Ok(args) => args,
        Err(err) => {
            eprintln!("{err}");
            return ExitCode::from(2);
        }
    };

    match run(args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {err}");
            ExitCode::FAILURE
        }
    }
}

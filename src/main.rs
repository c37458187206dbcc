use std::env;
use std::fs;
use std::path;
use std::process::ExitCode;

use log::{error, info};

use mzident::io::MzIdentMLWriterBuilder;
use mzident::MzIdentMLDocument;

fn main() -> ExitCode {
    env_logger::init();
    let args: Vec<String> = env::args().collect();
    if args.len() < 3 {
        eprintln!("Usage: {} <document.json> <output.mzid>", args[0]);
        return ExitCode::FAILURE;
    }
    let source = path::Path::new(&args[1]);
    let dest = path::Path::new(&args[2]);

    let text = match fs::read_to_string(source) {
        Ok(text) => text,
        Err(e) => {
            error!("Failed to read {}: {e}", source.display());
            return ExitCode::FAILURE;
        }
    };
    let document: MzIdentMLDocument = match serde_json::from_str(&text) {
        Ok(doc) => doc,
        Err(e) => {
            error!("Failed to parse {}: {e}", source.display());
            return ExitCode::FAILURE;
        }
    };

    match MzIdentMLWriterBuilder::new().write_path(dest, &document) {
        Ok(()) => {
            info!("Wrote {}", dest.display());
            ExitCode::SUCCESS
        }
        // The writer has already logged the failure
        Err(_) => ExitCode::FAILURE,
    }
}

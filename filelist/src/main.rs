//! `filelist`: write the path of every file under a directory to a manifest.

use std::path::PathBuf;

use clap::Parser;
use filelist::exit_codes;
use filelist::io::config::{ConfigOverrides, resolve_config};
use filelist::list::list_with_config;
use filelist::logging;

#[derive(Parser, Debug)]
#[command(
    name = "filelist",
    version,
    about = "Recursively scan a directory and list all file paths to an output file"
)]
struct Cli {
    /// Directory to scan for files (absolute or relative path).
    #[arg(short, long)]
    directory: Option<PathBuf>,

    /// Output file to write the list of file paths to [default: temp/file_list.txt].
    #[arg(short, long = "output_file", visible_alias = "output-file")]
    output_file: Option<PathBuf>,

    /// Text encoding for the output file [default: utf-8].
    #[arg(short, long)]
    encoding: Option<String>,

    /// Visit entries in file-name order for a reproducible manifest.
    #[arg(long)]
    sort: bool,

    /// TOML file with `directory`, `output_file`, `encoding` and `sort` keys.
    /// Flags override its values.
    #[arg(long)]
    config: Option<PathBuf>,
}

impl Cli {
    fn overrides(&self) -> ConfigOverrides {
        ConfigOverrides {
            directory: self.directory.clone(),
            output_file: self.output_file.clone(),
            encoding: self.encoding.clone(),
            sort: self.sort,
        }
    }
}

fn main() {
    logging::init();
    let code = run(&Cli::parse());
    std::process::exit(code);
}

fn run(cli: &Cli) -> i32 {
    let cfg = match resolve_config(cli.config.as_deref(), cli.overrides()) {
        Ok(cfg) => cfg,
        Err(err) => {
            eprintln!("filelist: {:#}", err);
            return exit_codes::USAGE;
        }
    };

    match list_with_config(&cfg) {
        Ok(outcome) => {
            println!(
                "File paths have been written to {}",
                outcome.output_file.display()
            );
            exit_codes::OK
        }
        Err(err) => {
            eprintln!("An error occurred: {:#}", err);
            exit_codes::FAILED
        }
    }
}

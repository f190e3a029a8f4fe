//! Extracts related images from a rendered (`opm render`) operator index.
//!
//! Usage:
//!   parse-index <rendered_index> <operators_spec_file> <img_list_file>
//!
//! Every `package:channel` line of the operators file resolves to the head bundle
//! of that channel; the bundle's related images are appended to the image
//! list file.

use anyhow::Result;
use clap::{CommandFactory, Parser};
use precache_images::{
    ExtractError, append_image_list, extract_from_rendered_index, load_selection_spec, logging,
    parse_cli_or_exit, report_failure,
};
use std::path::{Path, PathBuf};

#[derive(Parser, Debug)]
#[command(name = "parse-index")]
#[command(about = "Extract list of related images from operator index.")]
struct Cli {
    /// Path where the opm index is exported (concatenated JSON).
    rendered_index: Option<PathBuf>,
    /// Path to the list of packages, one <package>:<channel> record per line.
    operators_spec_file: Option<PathBuf>,
    /// Path to the image list file (appended).
    img_list_file: Option<PathBuf>,
}

fn main() {
    logging::init();
    let cli: Cli = parse_cli_or_exit();

    let (Some(index), Some(spec), Some(img_list)) =
        (&cli.rendered_index, &cli.operators_spec_file, &cli.img_list_file)
    else {
        usage_and_exit(&cli);
    };

    if let Err(err) = run(index, spec, img_list) {
        report_failure(&err);
        std::process::exit(1);
    }
}

fn run(rendered_index: &Path, operators_spec_file: &Path, img_list_file: &Path) -> Result<()> {
    let spec = load_selection_spec(operators_spec_file)?;
    let images = extract_from_rendered_index(rendered_index, &spec)?;
    append_image_list(img_list_file, &images)
}

fn usage_and_exit(cli: &Cli) -> ! {
    let got = [
        cli.rendered_index.is_some(),
        cli.operators_spec_file.is_some(),
        cli.img_list_file.is_some(),
    ]
    .into_iter()
    .filter(|present| *present)
    .count();
    println!("{}", ExtractError::ArgumentCount { expected: 3, got });
    let _ = Cli::command().print_help();
    std::process::exit(1);
}

//! Extracts related images from an operator index downloaded as a directory
//! tree (`<root>/<package>/package.yaml` plus one directory per bundle).
//!
//! Usage:
//!   parse-catalog-dir [--min-score <0..1>] <index_download_path> <operators_spec_file> <img_list_file>

use anyhow::Result;
use clap::{CommandFactory, Parser};
use precache_images::config::ENV_MIN_MATCH_SCORE;
use precache_images::{
    ExtractError, ExtractOptions, append_image_list, extract_from_directory, load_selection_spec,
    logging, parse_cli_or_exit, report_failure,
};
use std::path::{Path, PathBuf};

#[derive(Parser, Debug)]
#[command(name = "parse-catalog-dir")]
#[command(about = "Extract list of related images from a downloaded operator index tree.")]
struct Cli {
    /// Directory containing one subdirectory per package.
    index_download_path: Option<PathBuf>,
    /// Path to the list of packages, one <package>:<channel> record per line.
    operators_spec_file: Option<PathBuf>,
    /// Path to the image list file (appended).
    img_list_file: Option<PathBuf>,
    /// Reject bundle directory matches scoring below this similarity.
    #[arg(long, value_name = "SCORE")]
    min_score: Option<f64>,
}

fn main() {
    logging::init();
    let cli: Cli = parse_cli_or_exit();

    let (Some(root), Some(spec), Some(img_list)) = (
        &cli.index_download_path,
        &cli.operators_spec_file,
        &cli.img_list_file,
    ) else {
        usage_and_exit(&cli);
    };

    if let Err(err) = run(root, spec, img_list, cli.min_score) {
        report_failure(&err);
        std::process::exit(1);
    }
}

fn run(
    index_download_path: &Path,
    operators_spec_file: &Path,
    img_list_file: &Path,
    min_score: Option<f64>,
) -> Result<()> {
    let options = ExtractOptions::resolve(min_score)?;
    let spec = load_selection_spec(operators_spec_file)?;
    let images = extract_from_directory(index_download_path, &spec, &options)?;
    append_image_list(img_list_file, &images)
}

fn usage_and_exit(cli: &Cli) -> ! {
    let got = [
        cli.index_download_path.is_some(),
        cli.operators_spec_file.is_some(),
        cli.img_list_file.is_some(),
    ]
    .into_iter()
    .filter(|present| *present)
    .count();
    println!("{}", ExtractError::ArgumentCount { expected: 3, got });
    let _ = Cli::command().print_help();
    println!("\nEnvironment:\n  {ENV_MIN_MATCH_SCORE}  default for --min-score");
    std::process::exit(1);
}

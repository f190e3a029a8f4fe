//! Shared library for the operator pre-caching helpers.
//!
//! The crate turns a list of `package:channel` selections plus a rendered
//! operator catalog into the flat list of related images a pre-caching
//! workload has to pull. Two catalog shapes are supported: the concatenated
//! JSON stream produced by `opm render` (see [`index`]) and a directory tree
//! with one folder per package (see [`catalog`]). The binaries under
//! `src/bin/` are thin wrappers that parse arguments, call one pipeline, and
//! append the result with [`output::append_image_list`].

pub mod catalog;
pub mod config;
pub mod error;
pub mod index;
pub mod logging;
pub mod manifest;
pub mod output;
pub mod selection;
pub mod similarity;

pub use catalog::{ClusterServiceVersion, PackageManifest, extract_from_directory};
pub use config::ExtractOptions;
pub use error::ExtractError;
pub use index::{CatalogObject, decode_json_stream, extract_from_rendered_index};
pub use output::{append_image_list, render_image_list};
pub use selection::{Selection, SelectionSpec, load_selection_spec, parse_selection_lines};
pub use similarity::sequence_ratio;

use clap::Parser;
use std::io::Write;
use tracing::error;

/// Print a fatal error the way the helper binaries report it.
///
/// Diagnostics go to stdout so a wrapping job log captures them next to the
/// tool's own output. The `Debug` form of an `anyhow::Error` carries the cause
/// chain and, when `RUST_BACKTRACE` is set, the backtrace.
pub fn report_failure(err: &anyhow::Error) {
    if let Some(kind) = err.downcast_ref::<ExtractError>() {
        error!(reason = kind.reason_code(), "extraction failed");
    }
    let stdout = std::io::stdout();
    let mut handle = stdout.lock();
    let _ = writeln!(handle, "{err:?}");
    let _ = handle.flush();
}

/// Parse the helper's arguments or exit.
///
/// `--help` and `--version` exit 0; every other clap error exits 1, matching
/// the exit status used for runtime failures.
pub fn parse_cli_or_exit<C: Parser>() -> C {
    C::try_parse().unwrap_or_else(|err| {
        let code = if err.use_stderr() { 1 } else { 0 };
        let _ = err.print();
        std::process::exit(code);
    })
}

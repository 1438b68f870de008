use anyhow::{bail, ensure, Context, Result};
use indicatif::ProgressIterator;
use log::warn;
use std::{env, fs, path::PathBuf};

use umr_json::{
    umr::{
        corpus::find_umr_files,
        export::write_json,
        filter::FileFilter,
        parser::parse_umr_file,
    },
    utility::progress::create_progress_bar,
};

const DEFAULT_OUTPUT: &str = "umr_data.json";

struct Args {
    root_dir: PathBuf,
    output: PathBuf,
    filter: FileFilter,
    pretty: bool,
}

fn options() -> getopts::Options {
    let mut opts = getopts::Options::new();
    opts.optopt(
        "",
        "root-dir",
        "Root directory containing language subdirectories (default: current directory)",
        "PATH",
    );
    opts.optopt(
        "",
        "output",
        "Output JSON file path (default: umr_data.json)",
        "PATH",
    );
    opts.optopt("", "language", "Only include files of this language", "NAME");
    opts.optflag(
        "",
        "partial-conversion",
        "Only include files with type = partial_conversion",
    );
    opts.optflag(
        "",
        "no-partial-conversion",
        "Exclude files with type = partial_conversion",
    );
    opts.optflag(
        "",
        "has-document-annotation",
        "Only include files with document level annotation",
    );
    opts.optflag(
        "",
        "no-document-annotation",
        "Only include files without document level annotation",
    );
    opts.optflag("", "pretty", "Output pretty-printed JSON");
    opts.optflag("h", "help", "Print this help");
    opts
}

fn get_args() -> Result<Option<Args>> {
    let args: Vec<String> = env::args().skip(1).collect();

    let opts = options();

    let matches = match opts.parse(&args) {
        Ok(m) => m,
        Err(f) => bail!(f),
    };

    if matches.opt_present("help") {
        print!("{}", opts.usage("Usage: umr-json [options]"));
        return Ok(None);
    }

    let has_partial_conversion = exclusive_flags(
        &matches,
        "partial-conversion",
        "no-partial-conversion",
    )?;
    let has_document_annotation = exclusive_flags(
        &matches,
        "has-document-annotation",
        "no-document-annotation",
    )?;

    Ok(Some(Args {
        root_dir: PathBuf::from(matches.opt_str("root-dir").unwrap_or_else(|| ".".to_owned())),
        output: PathBuf::from(
            matches
                .opt_str("output")
                .unwrap_or_else(|| DEFAULT_OUTPUT.to_owned()),
        ),
        filter: FileFilter {
            language: matches.opt_str("language"),
            has_partial_conversion,
            has_document_annotation,
        },
        pretty: matches.opt_present("pretty"),
    }))
}

// `Some(true)` for `yes`, `Some(false)` for `no`, both is an error
fn exclusive_flags(matches: &getopts::Matches, yes: &str, no: &str) -> Result<Option<bool>> {
    match (matches.opt_present(yes), matches.opt_present(no)) {
        (true, true) => bail!("--{} and --{} cannot be used together", yes, no),
        (true, false) => Ok(Some(true)),
        (false, true) => Ok(Some(false)),
        (false, false) => Ok(None),
    }
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = match get_args()? {
        Some(args) => args,
        None => return Ok(()),
    };

    ensure!(
        args.root_dir.is_dir(),
        "Directory not found: {}",
        args.root_dir.display()
    );
    let root_dir = fs::canonicalize(&args.root_dir)
        .with_context(|| format!("Failed to resolve {}", args.root_dir.display()))?;

    println!("Looking for UMR files in {}...", root_dir.display());

    let umr_files = find_umr_files(&root_dir)?;
    println!("Found {} UMR files", umr_files.len());

    let mut parsed_files = Vec::with_capacity(umr_files.len());
    let pb = create_progress_bar(umr_files.len() as u64);
    for path in umr_files.iter().progress_with(pb) {
        match parse_umr_file(path) {
            Ok(parsed) => parsed_files.push(parsed),
            Err(err) => warn!("Error parsing {}: {:#}", path.display(), err),
        }
    }

    let filtered_files = args.filter.apply(parsed_files);
    println!("After filtering: {} files", filtered_files.len());

    write_json(&args.output, &filtered_files, args.pretty)
        .with_context(|| format!("Failed to write {}", args.output.display()))?;

    println!("Output written to {}", args.output.display());

    Ok(())
}

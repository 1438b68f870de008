use anyhow::{bail, ensure, Context, Result};
use chrono::Local;
use std::{env, path::PathBuf};

use umr_json::statistics::{
    aggregator::{CorpusStats, LanguageStats},
    block_analyzer::BlockAnalyzer,
    collector::{analyze_language, find_language_dirs, UMR_DATA_DIRECTORY},
    report::{
        explanation_tables, language_tables, summary_table, ConsoleSink, Reporter, Table,
        WriterSink,
    },
};

struct Args {
    root_dir: PathBuf,
    explain: bool,
}

fn options() -> getopts::Options {
    let mut opts = getopts::Options::new();
    opts.optopt(
        "",
        "root-dir",
        "Directory holding one folder per language (default: the executable's directory, \
         which under cargo is target/<profile> and lists build folders as languages)",
        "PATH",
    );
    opts.optflag("", "explain", "Print what every metric means and exit");
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
        print!("{}", opts.usage("Usage: umr-statistics [options]"));
        return Ok(None);
    }

    let root_dir = match matches.opt_str("root-dir") {
        Some(root_dir) => PathBuf::from(root_dir),
        None => env::current_exe()
            .context("Failed to locate the executable")?
            .parent()
            .context("Executable has no parent directory")?
            .to_path_buf(),
    };

    Ok(Some(Args {
        root_dir,
        explain: matches.opt_present("explain"),
    }))
}

fn report_tables(reporter: &mut Reporter, tables: &[(&str, Table)]) -> Result<()> {
    for (i, (title, table)) in tables.iter().enumerate() {
        if 0 < i {
            reporter.line("")?;
        }
        reporter.table(title, table)?;
    }
    Ok(())
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = match get_args()? {
        Some(args) => args,
        None => return Ok(()),
    };

    if args.explain {
        let mut reporter = Reporter::new();
        reporter.add_sink(ConsoleSink);
        report_tables(&mut reporter, &explanation_tables())?;
        return reporter.finish();
    }

    let root = args.root_dir;
    ensure!(root.is_dir(), "Directory not found: {}", root.display());

    let output_path = root.join(format!(
        "umr_statistics_{}.txt",
        Local::now().format("%Y%m%d_%H%M%S")
    ));

    let mut reporter = Reporter::new();
    reporter.add_sink(ConsoleSink);
    reporter.add_sink(WriterSink::create(&output_path)?);

    let languages = find_language_dirs(&root)?;
    reporter.line(&format!("Detected language folders: {:?}", languages))?;

    let analyzer = BlockAnalyzer::default();
    let mut corpus = CorpusStats::default();

    for language in &languages {
        reporter.line(&format!(
            "\n\n======== STATISTICS FOR {} ========",
            language.to_uppercase()
        ))?;

        let stats = match analyze_language(&root, language, &analyzer)? {
            Some(stats) => {
                report_tables(&mut reporter, &language_tables(&stats))?;
                stats
            }
            None => {
                reporter.line(&format!("No {} folder found for {}", UMR_DATA_DIRECTORY, language))?;
                LanguageStats::default()
            }
        };

        corpus.add_language(language, &stats);
    }

    reporter.line("\n\n======== SUMMARY ACROSS ALL LANGUAGES ========")?;
    reporter.line(&summary_table(&corpus.summary_rows()).render())?;
    reporter.line(&format!(
        "\nStatistics have been saved to: {}",
        output_path.display()
    ))?;

    reporter.finish()
}

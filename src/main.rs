use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

use verbatim::{
    format_confusions, format_instance, format_length_breakdown, format_summary, open_lines,
    render_diff, write_json_report, DiffOptions, EvalConfig, EvalRun, IdMode,
};

#[derive(Parser)]
#[command(name = "verbatim")]
#[command(author, version, about = "Score ASR output against reference transcripts", long_about = None)]
struct Cli {
    /// Reference transcript file, one sentence per line
    ref_file: PathBuf,

    /// Hypothesis transcript file, one sentence per line
    hyp_file: PathBuf,

    /// Fold tokens to lowercase before comparison
    #[arg(short = 'i', long)]
    case_insensitive: bool,

    /// Skip line pairs whose reference is empty
    #[arg(short = 'r', long)]
    remove_empty_refs: bool,

    /// Lines begin with an utterance ID (Kaldi convention)
    #[arg(long, conflicts_with = "tail_ids")]
    head_ids: bool,

    /// Lines end with an utterance ID (Sphinx convention)
    #[arg(long)]
    tail_ids: bool,

    /// Print tables of which words get inserted, dropped, and confused
    #[arg(short = 'c', long)]
    confusions: bool,

    /// Hide confusion entries seen fewer than this many times
    #[arg(long, default_value = "1")]
    min_word_count: u64,

    /// Print the mean WER for each reference sentence length
    #[arg(short = 'w', long)]
    wer_vs_length: bool,

    /// Print the aligned diff for every sentence pair
    #[arg(short = 'p', long)]
    print_instances: bool,

    /// Print the aligned diff only for sentence pairs with errors
    #[arg(short = 'e', long)]
    print_errors: bool,

    /// Write the full report to this path as JSON
    #[arg(long)]
    json: Option<PathBuf>,

    /// Verbose output
    #[arg(short, long)]
    verbose: bool,
}

impl Cli {
    fn id_mode(&self) -> IdMode {
        if self.head_ids {
            IdMode::Head
        } else if self.tail_ids {
            IdMode::Tail
        } else {
            IdMode::None
        }
    }

    fn eval_config(&self) -> EvalConfig {
        EvalConfig {
            case_insensitive: self.case_insensitive,
            remove_empty_refs: self.remove_empty_refs,
            id_mode: self.id_mode(),
            track_confusions: self.confusions,
            track_length_bins: self.wer_vs_length,
            min_confusion_count: self.min_word_count,
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    setup_logging(cli.verbose);

    info!("Scoring {:?} against {:?}", cli.hyp_file, cli.ref_file);
    let ref_lines = open_lines(&cli.ref_file)?;
    let hyp_lines = open_lines(&cli.hyp_file)?;

    let mut run = EvalRun::new(cli.eval_config());
    let diff_options = DiffOptions::default();

    for (ref_line, hyp_line) in ref_lines.zip(hyp_lines) {
        let outcome = run.process_pair(&ref_line?, &hyp_line?)?;
        let Some(outcome) = outcome else {
            continue;
        };
        if cli.print_instances || (cli.print_errors && outcome.stats.errors > 0) {
            let diff = render_diff(
                &outcome.alignment,
                &outcome.ref_tokens,
                &outcome.hyp_tokens,
                &diff_options,
            );
            print!("{}", format_instance(&outcome, &diff));
        }
    }

    let report = run.finish();
    info!("Processed {} sentence pairs", report.totals.sentence_count);

    if cli.confusions {
        print!("{}", format_confusions(&report));
    }
    if cli.wer_vs_length {
        print!("{}", format_length_breakdown(&report));
    }
    print!("{}", format_summary(&report));

    if let Some(path) = &cli.json {
        write_json_report(&report, path)?;
        info!("JSON report written to {:?}", path);
    }

    Ok(())
}

fn setup_logging(verbose: bool) {
    let level = if verbose { Level::DEBUG } else { Level::INFO };
    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber).ok();
}

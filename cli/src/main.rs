//! ocreval CLI - OCR accuracy evaluation tool

use std::fs;
use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand, ValueEnum};
use colored::Colorize;

use ocreval::{
    CandidateDocumentBuilder, ErrorMode, Evaluator, JsonFormat, Metric, ReferenceDocumentBuilder,
    DEFAULT_IOU_THRESHOLD,
};

#[derive(Parser)]
#[command(name = "ocreval")]
#[command(version)]
#[command(about = "Score OCR output against reference transcriptions", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Compare a candidate document against a reference document
    Compare {
        /// Reference document (JSON)
        #[arg(value_name = "REFERENCE")]
        reference: PathBuf,

        /// Candidate document (JSON)
        #[arg(value_name = "CANDIDATE")]
        candidate: PathBuf,

        /// IOU a word pair must exceed to be scored for character errors
        #[arg(long, env = "OCREVAL_THRESHOLD", default_value_t = DEFAULT_IOU_THRESHOLD)]
        threshold: f64,

        /// Drop malformed nodes (whole words at most) instead of failing
        #[arg(long)]
        lenient: bool,

        /// Fail when the documents have different page counts
        #[arg(long)]
        fail_on_mismatch: bool,

        /// Score pages on a single thread
        #[arg(long)]
        sequential: bool,

        /// Apply Unicode NFC to word text before scoring
        #[arg(long)]
        nfc: bool,

        /// Output format
        #[arg(long, value_enum, default_value = "text")]
        format: OutputFormat,

        /// Output compact JSON
        #[arg(long)]
        compact: bool,

        /// Output file (stdout if not specified)
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,
    },

    /// Show page and word counts of a document
    Info {
        /// Document file (JSON)
        #[arg(value_name = "FILE")]
        input: PathBuf,

        /// Read the file as a candidate document instead of a reference
        #[arg(long)]
        candidate: bool,

        /// Drop malformed nodes instead of failing
        #[arg(long)]
        lenient: bool,
    },

    /// Show version information
    Version,
}

#[derive(Copy, Clone, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    /// Human-readable summary
    Text,
    /// Full report as JSON
    Json,
}

struct CompareArgs {
    threshold: f64,
    lenient: bool,
    fail_on_mismatch: bool,
    sequential: bool,
    nfc: bool,
    format: OutputFormat,
    compact: bool,
}

fn main() {
    env_logger::init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Compare {
            reference,
            candidate,
            threshold,
            lenient,
            fail_on_mismatch,
            sequential,
            nfc,
            format,
            compact,
            output,
        } => cmd_compare(
            &reference,
            &candidate,
            CompareArgs {
                threshold,
                lenient,
                fail_on_mismatch,
                sequential,
                nfc,
                format,
                compact,
            },
            output.as_deref(),
        ),
        Commands::Info {
            input,
            candidate,
            lenient,
        } => cmd_info(&input, candidate, lenient),
        Commands::Version => {
            cmd_version();
            Ok(())
        }
    };

    if let Err(e) = result {
        eprintln!("{}: {}", "Error".red().bold(), e);
        std::process::exit(1);
    }
}

fn evaluator(args: &CompareArgs) -> Evaluator {
    let mut evaluator = Evaluator::new()
        .with_threshold(args.threshold)
        .with_unicode_normalization(args.nfc);

    evaluator = if args.lenient {
        evaluator.lenient()
    } else {
        evaluator.strict()
    };
    if args.fail_on_mismatch {
        evaluator = evaluator.fail_on_page_mismatch();
    }
    if args.sequential {
        evaluator = evaluator.sequential();
    }
    evaluator
}

fn cmd_compare(
    reference: &Path,
    candidate: &Path,
    args: CompareArgs,
    output: Option<&Path>,
) -> Result<(), Box<dyn std::error::Error>> {
    log::info!(
        "Comparing {} against {}",
        candidate.display(),
        reference.display()
    );

    let reference_json = fs::read_to_string(reference)?;
    let candidate_json = fs::read_to_string(candidate)?;
    let report = evaluator(&args).compare_json(&reference_json, &candidate_json)?;

    let rendered = match args.format {
        OutputFormat::Text => ocreval::render::to_text(&report)?,
        OutputFormat::Json => {
            let format = if args.compact {
                JsonFormat::Compact
            } else {
                JsonFormat::Pretty
            };
            ocreval::render::to_json(&report, format)?
        }
    };

    if let Some(path) = output {
        fs::write(path, &rendered)?;
        println!("{} {}", "Saved to".green(), path.display());
        return Ok(());
    }

    if args.format == OutputFormat::Text {
        println!("{}", "Accuracy Report".cyan().bold());
        println!("{}", "─".repeat(40).dimmed());
    }
    println!("{}", rendered.trim_end());

    if args.format == OutputFormat::Text {
        let undefined = report
            .pages
            .iter()
            .filter(|p| p.average_iou == Metric::Undefined)
            .count();
        if undefined > 0 {
            println!(
                "\n{} {} pages have no reference words",
                "Note:".yellow(),
                undefined
            );
        }
    }

    Ok(())
}

fn cmd_info(
    input: &Path,
    candidate: bool,
    lenient: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let json = fs::read_to_string(input)?;

    let mode = if lenient {
        ErrorMode::Lenient
    } else {
        ErrorMode::Strict
    };
    let (kind, pages, words) = if candidate {
        let doc = CandidateDocumentBuilder::from_json(&json)?.build(mode)?;
        ("Candidate", doc.page_count(), doc.word_count())
    } else {
        let doc = ReferenceDocumentBuilder::from_json(&json)?.build(mode)?;
        ("Reference", doc.page_count(), doc.word_count())
    };

    println!("{}", "Document Information".cyan().bold());
    println!("{}", "─".repeat(40).dimmed());

    println!("{}: {}", "File".bold(), input.display());
    println!("{}: {}", "Kind".bold(), kind);
    println!("{}: {}", "Pages".bold(), pages);
    println!("{}: {}", "Words".bold(), words);

    Ok(())
}

fn cmd_version() {
    println!("{} {}", "ocreval".cyan().bold(), env!("CARGO_PKG_VERSION"));
    println!("OCR accuracy evaluation tool");
    println!();
    println!("License: MIT");
}

use crate::assemble;
use crate::config::{AddressWidth, DelimiterPolicy, EstimatorConfig, DEFAULT_MESSAGE_LENGTH_BINS};
use crate::error::LbmsError;
use crate::estimator::CompressionEstimator;
use crate::report::{JsonReport, ReportSink, TableReport};
use crate::shelf::Shelf;
use crate::storage::{load_pages, JsonDirSink};
use crate::vocabulary::Vocabulary;
use clap::{Parser, Subcommand};
use log::{info, warn};
use std::io;
use std::path::{Path, PathBuf};
use std::time::Instant;

#[derive(Parser)]
#[command(author, version, about, long_about = "Word-reference dictionaries for low-bit-rate messaging")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Splits a frequency-ordered word list into dictionary page files
    Assemble {
        /// CSV word list, most frequent word first
        #[arg(short, long, value_name = "FILE")]
        input: PathBuf,

        /// Directory for the dict<NN>.json page files
        #[arg(short, long, value_name = "DIR")]
        output: PathBuf,

        /// Reference split as <page selector bits>:<index bits>
        #[arg(short, long, default_value = "4:16")]
        width: AddressWidth,
    },
    /// Estimates dictionary vs raw message sizes by simulation
    Estimate {
        /// CSV word list, most frequent word first
        #[arg(short, long, value_name = "FILE")]
        input: PathBuf,

        /// Reference split as <page selector bits>:<index bits>
        #[arg(short, long, default_value = "4:16")]
        width: AddressWidth,

        /// Random messages per length bin
        #[arg(short = 'n', long, default_value_t = 100_000)]
        iterations: usize,

        /// Message lengths to simulate, in words
        #[arg(short, long, value_delimiter = ',', default_values_t = DEFAULT_MESSAGE_LENGTH_BINS)]
        bins: Vec<usize>,

        /// Seed for the message sampler
        #[arg(short, long)]
        seed: Option<u64>,

        /// Number of threads to use (default: all available cores)
        #[arg(short, long)]
        threads: Option<usize>,

        /// Charge the raw baseline for spaces between words
        #[arg(long)]
        count_delimiters: bool,

        /// Print the report as JSON
        #[arg(long)]
        json: bool,
    },
    /// Encodes words as packed hex references
    Encode {
        /// Directory holding dict<NN>.json page files
        #[arg(short, long, value_name = "DIR")]
        dicts: PathBuf,

        /// Reference split the pages were assembled with
        #[arg(short, long, default_value = "4:16")]
        width: AddressWidth,

        /// Message words
        #[arg(required = true)]
        words: Vec<String>,
    },
    /// Decodes packed hex references back into words
    Decode {
        /// Directory holding dict<NN>.json page files
        #[arg(short, long, value_name = "DIR")]
        dicts: PathBuf,

        /// Reference split the pages were assembled with
        #[arg(short, long, default_value = "4:16")]
        width: AddressWidth,

        /// Hex payload
        payload: String,
    },
}

fn load_vocabulary(path: &Path) -> Result<Vocabulary, LbmsError> {
    let vocabulary = Vocabulary::from_csv_path(path)?;
    info!("Loaded {} words from {}", vocabulary.len(), path.display());
    let duplicates = vocabulary.duplicate_count();
    if duplicates > 0 {
        warn!("{} duplicate words in {}; lookups resolve the first copy", duplicates, path.display());
    }
    Ok(vocabulary)
}

pub fn run() -> Result<(), LbmsError> {
    let cli = Cli::parse();

    match &cli.command {
        Commands::Assemble { input, output, width } => {
            println!("Assembling {} into {}...", input.display(), output.display());
            let vocabulary = load_vocabulary(input)?;

            let start = Instant::now();
            let mut sink = JsonDirSink::create(output)?;
            let pages = assemble(&vocabulary, width, &mut sink)?;
            let duration = start.elapsed();

            println!("Assembly successful!");
            println!("  Words:            {}", vocabulary.len());
            println!("  Pages:            {} of {}", pages.len(), width.max_pages());
            println!("  Page Capacity:    {}", width.page_capacity());
            println!("  Reference Width:  {} bits", width.reference_bits());
            println!("  Elapsed Time:     {:.2?}", duration);
        }
        Commands::Estimate { input, width, iterations, bins, seed, threads, count_delimiters, json } => {
            let vocabulary = load_vocabulary(input)?;
            let defaults = EstimatorConfig::default();
            let config = EstimatorConfig {
                width: *width,
                iterations: *iterations,
                message_length_bins: bins.clone(),
                seed: seed.unwrap_or(defaults.seed),
                threads: threads.unwrap_or_else(num_cpus::get),
                delimiters: if *count_delimiters { DelimiterPolicy::Count } else { DelimiterPolicy::Ignore },
                show_progress: !*json,
            };
            info!("Estimator seed {}", config.seed);

            let start = Instant::now();
            let estimator = CompressionEstimator::new(&vocabulary, config)?;
            let reports = estimator.run_configured()?;
            info!("Estimation finished in {:.2?}", start.elapsed());

            let stdout = io::stdout().lock();
            if *json {
                JsonReport::new(stdout).emit(&reports)?;
            } else {
                TableReport::new(stdout).emit(&reports)?;
            }
        }
        Commands::Encode { dicts, width, words } => {
            let shelf = Shelf::from_pages(load_pages(dicts)?, *width)?;
            println!("{}", shelf.encode_message(&words.join(" "))?);
        }
        Commands::Decode { dicts, width, payload } => {
            let shelf = Shelf::from_pages(load_pages(dicts)?, *width)?;
            println!("{}", shelf.decode_message(payload)?);
        }
    }

    Ok(())
}

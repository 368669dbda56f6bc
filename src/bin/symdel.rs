//! Line-oriented spelling correction driver.
//!
//! Reads one query per stdin line until EOF or an empty line and prints, for
//! each returned suggestion, one line of `term distance count`.

use std::io::{self, BufRead, Write};

use anyhow::Context;
use clap::Parser;
use env_logger::Builder;
use log::LevelFilter;

use symdel::{Config, SymSpell, Verbosity};

#[derive(Parser)]
#[command(name = "symdel")]
#[command(about = "Compound-aware spelling correction over a frequency dictionary")]
#[command(version)]
struct Args {
    /// Frequency dictionary file (term and count columns per line)
    dictionary: std::path::PathBuf,

    /// Treat the dictionary file as a free-text corpus instead of
    /// term/count records
    #[arg(long)]
    free_text: bool,

    /// 0-based column of the term in the dictionary file
    #[arg(long, default_value_t = 0)]
    term_index: usize,

    /// 0-based column of the frequency count in the dictionary file
    #[arg(long, default_value_t = 1)]
    count_index: usize,

    /// Language tag the entries are indexed under
    #[arg(short, long, default_value = "en")]
    language: String,

    /// Maximum edit distance for index precalculation and lookup
    #[arg(short = 'd', long, default_value_t = 2)]
    max_edit_distance: i64,

    /// Suggestion verbosity: 0 top only, 1 all at smallest distance,
    /// 2 all within the maximum distance
    #[arg(long, default_value_t = 0, value_parser = clap::value_parser!(u8).range(0..=2))]
    verbosity: u8,

    /// Correct each line as a single term instead of running the
    /// compound corrector
    #[arg(long)]
    no_compound: bool,

    /// Minimum observed count before a term is indexed
    #[arg(long, default_value_t = 1)]
    count_threshold: i64,

    /// Count above which a term always passes the noise filter
    #[arg(long, default_value_t = 100)]
    noise_count_floor: i64,

    /// Length above which a term always passes the noise filter
    #[arg(long, default_value_t = 2)]
    noise_len_floor: i64,

    /// Optional bigram dictionary (reserved for future ranking)
    #[arg(long)]
    bigrams: Option<std::path::PathBuf>,

    /// Increase log output (-v info, -vv debug)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let log_level = match args.verbose {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Info,
        _ => LevelFilter::Debug,
    };
    Builder::new()
        .filter_level(log_level)
        .format(|buf, record| writeln!(buf, "[{}] {}", record.level(), record.args()))
        .init();

    let compound = !args.no_compound;
    let verbosity = match args.verbosity {
        0 => Verbosity::Top,
        1 => Verbosity::Closest,
        _ => Verbosity::All,
    };
    // the compound path is only defined for top-suggestion verbosity
    let verbosity = if compound && verbosity != Verbosity::Top {
        log::warn!("compound correction forces verbosity 0");
        Verbosity::Top
    } else {
        verbosity
    };

    let config = Config {
        max_edit_distance: args.max_edit_distance,
        verbosity,
        compound_check: compound,
        count_threshold: args.count_threshold,
        noise_count_floor: args.noise_count_floor,
        noise_len_floor: args.noise_len_floor,
    };

    let mut speller = SymSpell::with_config(config);
    if args.free_text {
        speller
            .create_dictionary(&args.dictionary, &args.language)
            .context("reading corpus")?;
    } else {
        speller
            .load_dictionary(
                &args.dictionary,
                args.term_index,
                args.count_index,
                &args.language,
            )
            .context("reading frequency dictionary")?;
    }
    if let Some(bigrams) = &args.bigrams {
        speller
            .load_bigram_dictionary(bigrams, 0, 2)
            .context("reading bigram dictionary")?;
        log::info!("loaded {} bigrams", speller.bigram_count());
    }
    log::info!(
        "indexed {} words across {} keys",
        speller.word_count(),
        speller.entry_count()
    );

    let mut stdin = io::stdin().lock();
    let mut stdout = io::stdout().lock();
    let mut line = String::new();
    loop {
        line.clear();
        if stdin.read_line(&mut line)? == 0 {
            break;
        }
        let input = line.trim_end_matches(['\r', '\n']);
        if input.is_empty() {
            break;
        }

        let suggestions = if compound {
            speller.lookup_compound(input, &args.language, args.max_edit_distance)?
        } else {
            speller.lookup(input, &args.language, args.max_edit_distance)?
        };
        for suggestion in suggestions {
            writeln!(
                stdout,
                "{} {} {}",
                suggestion.term, suggestion.distance, suggestion.count
            )?;
        }
        stdout.flush()?;
    }

    Ok(())
}

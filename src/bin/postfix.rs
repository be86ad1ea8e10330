//! Command-line interface for the postfix engine
//!
//! Converts and evaluates integer expressions, and runs the sorting benchmark and
//! word-frequency counters.

use anyhow::{Context, Result};
use clap::{ArgAction, Parser, Subcommand};
use colored::*;
use comfy_table::{Table, presets::UTF8_FULL};
use postfix_engine::sorting::{Benchmark, BenchmarkConfig};
use postfix_engine::wordcount::{CounterKind, Word, count_words};
use postfix_engine::{EngineConfig, NumericBounds, PostfixEngine};
use serde::Serialize;
use std::fs::File;
use std::io::{self, BufRead, BufReader, BufWriter, Write};
use std::path::PathBuf;
use std::process;

#[derive(Parser)]
#[command(name = "postfix")]
#[command(about = "Convert and evaluate integer expressions in postfix notation")]
#[command(version)]
struct Cli {
    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    /// Numeric domain results must fit (i8, i16 or i32)
    #[arg(long, global = true, default_value = "i32")]
    bounds: NumericBounds,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Evaluate an infix expression, or a postfix one with --postfix
    Eval {
        /// Expression to evaluate
        expression: String,
        /// Treat the expression as postfix
        #[arg(long)]
        postfix: bool,
    },
    /// Convert an infix expression to postfix notation
    Convert {
        /// Infix expression to convert
        expression: String,
    },
    /// Validate an infix expression and print its simplified form
    Validate {
        /// Infix expression to validate
        expression: String,
    },
    /// List the registered operators
    Operators,
    /// Benchmark the instrumented sorting algorithms on random data
    SortBench {
        /// Also write the report to this file
        #[arg(long)]
        out_file: Option<PathBuf>,
        /// Column delimiter
        #[arg(long, default_value = "\t")]
        delimiter: String,
        /// Smallest generated value
        #[arg(long, default_value_t = 0, allow_hyphen_values = true)]
        gen_min: i32,
        /// Largest generated value
        #[arg(long, default_value_t = 9_999_999, allow_hyphen_values = true)]
        gen_max: i32,
        /// First data size
        #[arg(long, default_value_t = 100)]
        initial_size: usize,
        /// Last data size
        #[arg(long, default_value_t = 20_000)]
        max_size: usize,
        /// Size increment
        #[arg(long, default_value_t = 100)]
        step: usize,
        /// Rounds per size for the quadratic sorts
        #[arg(long, default_value_t = 10)]
        slow_rounds: usize,
        /// Rounds per size for the fast sorts
        #[arg(long, default_value_t = 100)]
        fast_rounds: usize,
        /// Warmup rounds per algorithm
        #[arg(long, default_value_t = 30_000)]
        warmup: usize,
        /// Seed for reproducible data
        #[arg(long)]
        seed: Option<u64>,
    },
    /// Count word frequencies in a file (stdin if omitted)
    WordCount {
        /// Text file to read
        file: Option<PathBuf>,
        /// Counter strategy
        #[arg(long, value_enum, default_value_t = CounterKind::Unsorted)]
        counter: CounterKind,
        /// Show only the N most frequent words
        #[arg(long)]
        top: Option<usize>,
        /// Print JSON instead of a table
        #[arg(long)]
        json: bool,
    },
}

fn main() {
    human_panic::setup_panic!();

    let cli = Cli::parse();
    init_logging(cli.verbose);

    if let Err(e) = run(cli) {
        eprintln!("{} {e:#}", "error:".red().bold());
        process::exit(1);
    }
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => log::LevelFilter::Warn,
        1 => log::LevelFilter::Debug,
        _ => log::LevelFilter::Trace,
    };
    env_logger::Builder::new().filter_level(level).init();
}

fn run(cli: Cli) -> Result<()> {
    let engine = PostfixEngine::with_config(EngineConfig::default().with_bounds(cli.bounds))?;

    match cli.command {
        Commands::Eval {
            expression,
            postfix,
        } => handle_eval(&engine, &expression, postfix),
        Commands::Convert { expression } => {
            println!("{}", engine.convert_infix_expression(&expression)?);
            Ok(())
        }
        Commands::Validate { expression } => {
            let simplified = engine.validate_and_simplify(&expression)?;
            println!("{} {simplified}", "valid:".green());
            Ok(())
        }
        Commands::Operators => {
            handle_operators(&engine);
            Ok(())
        }
        Commands::SortBench {
            out_file,
            delimiter,
            gen_min,
            gen_max,
            initial_size,
            max_size,
            step,
            slow_rounds,
            fast_rounds,
            warmup,
            seed,
        } => {
            let config = BenchmarkConfig {
                gen_min,
                gen_max,
                initial_size,
                max_size,
                step,
                slow_rounds,
                fast_rounds,
                warmup,
                delimiter,
                seed,
            };
            handle_sort_bench(config, out_file)
        }
        Commands::WordCount {
            file,
            counter,
            top,
            json,
        } => handle_word_count(file, counter, top, json),
    }
}

fn handle_eval(engine: &PostfixEngine, expression: &str, postfix: bool) -> Result<()> {
    if postfix {
        println!("{}", engine.evaluate(expression)?);
        return Ok(());
    }

    let converted = engine.convert_infix_expression(expression)?;
    let value = engine.evaluate(&converted)?;
    println!("{} {}", "postfix:".dimmed(), converted);
    println!("{value}");
    Ok(())
}

fn handle_operators(engine: &PostfixEngine) {
    let mut table = Table::new();
    table.load_preset(UTF8_FULL);
    table.set_header(vec!["Operator", "Arity"]);
    for (token, arity) in engine.operator_table() {
        table.add_row(vec![token, arity.to_string()]);
    }
    println!("{table}");
}

/// Writes everything to both sinks
struct Tee<A: Write, B: Write> {
    primary: A,
    secondary: Option<B>,
}

impl<A: Write, B: Write> Write for Tee<A, B> {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.primary.write_all(buf)?;
        if let Some(secondary) = self.secondary.as_mut() {
            secondary.write_all(buf)?;
        }
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        self.primary.flush()?;
        if let Some(secondary) = self.secondary.as_mut() {
            secondary.flush()?;
        }
        Ok(())
    }
}

fn handle_sort_bench(config: BenchmarkConfig, out_file: Option<PathBuf>) -> Result<()> {
    let file = out_file
        .as_ref()
        .map(|path| {
            File::create(path)
                .map(BufWriter::new)
                .with_context(|| format!("failed to create {}", path.display()))
        })
        .transpose()?;

    let mut out = Tee {
        primary: io::stdout().lock(),
        secondary: file,
    };
    let mut benchmark = Benchmark::new(config)?;
    eprintln!("{}", "Warming up...".dimmed());
    let report = benchmark.run(&mut out)?;
    eprintln!("Warmup took {}ms", report.warmup.as_millis());

    let mut table = Table::new();
    table.load_preset(UTF8_FULL);
    table.set_header(vec!["Algorithm", "Total runtime (ms)"]);
    for (algorithm, total) in &report.totals {
        table.add_row(vec![
            algorithm.to_string(),
            format!("{:.3}", total.as_secs_f64() * 1000.0),
        ]);
    }
    eprintln!("{table}");
    Ok(())
}

#[derive(Serialize)]
struct WordCountOutput {
    counter: CounterKind,
    words: u64,
    distinct_words: usize,
    comparisons: u64,
    reference_assignments: u64,
    frequencies: Vec<Word>,
}

fn handle_word_count(
    file: Option<PathBuf>,
    kind: CounterKind,
    top: Option<usize>,
    json: bool,
) -> Result<()> {
    let mut reader: Box<dyn BufRead> = match &file {
        Some(path) => Box::new(BufReader::new(
            File::open(path).with_context(|| format!("failed to open {}", path.display()))?,
        )),
        None => Box::new(io::stdin().lock()),
    };

    let mut counter = kind.build();
    count_words(&mut reader, counter.as_mut()).context("failed to read input")?;

    let mut frequencies = counter.words();
    frequencies.sort_by(|a, b| {
        b.occurrences
            .cmp(&a.occurrences)
            .then_with(|| a.text.cmp(&b.text))
    });
    if let Some(n) = top {
        frequencies.truncate(n);
    }

    let output = WordCountOutput {
        counter: kind,
        words: counter.word_count(),
        distinct_words: counter.distinct_word_count(),
        comparisons: counter.comparison_count(),
        reference_assignments: counter.reference_assignment_count(),
        frequencies,
    };

    if json {
        println!("{}", serde_json::to_string_pretty(&output)?);
        return Ok(());
    }

    let mut table = Table::new();
    table.load_preset(UTF8_FULL);
    table.set_header(vec!["Word", "Occurrences"]);
    for word in &output.frequencies {
        table.add_row(vec![word.text.clone(), word.occurrences.to_string()]);
    }
    println!("{table}");
    println!(
        "{} {} counter: {} words, {} distinct, {} comparisons, {} reference assignments",
        "summary:".bold(),
        output.counter,
        output.words,
        output.distinct_words,
        output.comparisons,
        output.reference_assignments
    );
    Ok(())
}

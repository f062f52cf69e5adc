//! `sri` — build, query, and inspect subsampled r-index artifacts.
//!
//! Subcommands: `build`, `count`, `locate`, `breakdown`. Pattern files
//! use the Pizza&Chili header format, ported from
//! `sri_cli_utils.h::file2pat_list`.

use std::fs;
use std::io::{BufReader, BufWriter, Read};
use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand, ValueEnum};

use sri::build::Variant;
use sri::index::Index;

#[derive(Parser)]
#[command(name = "sri", version = sri::VERSION, about = "Subsampled r-index CLI")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum VariantArg {
    Plain,
    ValidMark,
    ValidArea,
}

impl From<VariantArg> for Variant {
    fn from(v: VariantArg) -> Self {
        match v {
            VariantArg::Plain => Variant::Plain,
            VariantArg::ValidMark => Variant::ValidMark,
            VariantArg::ValidArea => Variant::ValidArea,
        }
    }
}

#[derive(Subcommand)]
enum Command {
    /// Build an index from a text file.
    Build {
        /// Input text to be indexed.
        text: PathBuf,
        /// Subsampling rate.
        #[arg(short = 's', long, default_value_t = 4)]
        subsample: usize,
        /// Index variant to construct.
        #[arg(short = 'i', long, value_enum, default_value_t = VariantArg::ValidArea)]
        variant: VariantArg,
        /// Output artifact path.
        #[arg(short = 'o', long)]
        output: PathBuf,
        /// Scratch directory. Accepted for CLI-contract parity with the
        /// original tool; this build has no on-disk construction phase,
        /// so the directory is only checked to exist.
        #[arg(short = 'T', long = "tmp-dir")]
        tmp_dir: Option<PathBuf>,
    },
    /// Count occurrences of every pattern in a pattern file.
    Count {
        index: PathBuf,
        pattern_file: PathBuf,
    },
    /// Locate occurrences of every pattern in a pattern file.
    Locate {
        index: PathBuf,
        pattern_file: PathBuf,
    },
    /// Print a space breakdown of an index artifact.
    Breakdown { index: PathBuf },
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();
    match cli.command {
        Command::Build {
            text,
            subsample,
            variant,
            output,
            tmp_dir,
        } => cmd_build(&text, subsample, variant.into(), &output, tmp_dir.as_deref()),
        Command::Count { index, pattern_file } => cmd_count(&index, &pattern_file),
        Command::Locate { index, pattern_file } => cmd_locate(&index, &pattern_file),
        Command::Breakdown { index } => cmd_breakdown(&index),
    }
}

fn cmd_build(
    text_path: &std::path::Path,
    subsample: usize,
    variant: Variant,
    output: &std::path::Path,
    tmp_dir: Option<&std::path::Path>,
) -> Result<()> {
    if let Some(dir) = tmp_dir {
        if !dir.is_dir() {
            bail!("tmp dir {} does not exist", dir.display());
        }
    }

    let text = fs::read(text_path).with_context(|| format!("reading {}", text_path.display()))?;
    let index = Index::build(&text, subsample, variant, 256)?;

    let file = fs::File::create(output).with_context(|| format!("creating {}", output.display()))?;
    let mut w = BufWriter::new(file);
    index.serialize(&mut w)?;

    println!(
        "built index: n={} runs={} rate={}",
        index.text_len() + 1,
        index.num_runs(),
        index.subsample_rate()
    );
    Ok(())
}

/// Pizza&Chili pattern file: a `# number=N length=L ...` header line
/// followed by `N` concatenated patterns of `L` bytes each.
fn read_pattern_file(path: &std::path::Path) -> Result<Vec<Vec<u8>>> {
    let mut contents = Vec::new();
    fs::File::open(path)
        .with_context(|| format!("opening {}", path.display()))?
        .read_to_end(&mut contents)?;

    let newline = contents
        .iter()
        .position(|&b| b == b'\n')
        .context("pattern file missing header line")?;
    let header = std::str::from_utf8(&contents[..newline]).context("pattern file header is not UTF-8")?;

    let n_pats = header_field(header, "number=")?;
    let pat_len = header_field(header, "length=")?;

    let body = &contents[newline + 1..];
    if body.len() < n_pats * pat_len {
        bail!("pattern file body shorter than header declares");
    }

    Ok((0..n_pats)
        .map(|i| body[i * pat_len..(i + 1) * pat_len].to_vec())
        .collect())
}

fn header_field(header: &str, key: &str) -> Result<usize> {
    let start = header.find(key).with_context(|| format!("missing '{key}' in pattern header"))? + key.len();
    let rest = &header[start..];
    let end = rest.find(' ').unwrap_or(rest.len());
    rest[..end].trim().parse::<usize>().with_context(|| format!("malformed '{key}' field"))
}

fn load_index(path: &std::path::Path) -> Result<Index> {
    let file = fs::File::open(path).with_context(|| format!("opening {}", path.display()))?;
    let mut r = BufReader::new(file);
    let index = Index::load(&mut r)?;
    Ok(index)
}

fn cmd_count(index_path: &std::path::Path, pattern_file: &std::path::Path) -> Result<()> {
    let index = load_index(index_path)?;
    let patterns = read_pattern_file(pattern_file)?;

    let mut total = 0usize;
    for p in &patterns {
        total += index.occurrences(p);
    }
    println!("total occurrences: {total}");
    println!("patterns: {}", patterns.len());
    Ok(())
}

fn cmd_locate(index_path: &std::path::Path, pattern_file: &std::path::Path) -> Result<()> {
    let index = load_index(index_path)?;
    let patterns = read_pattern_file(pattern_file)?;

    let mut total = 0usize;
    for p in &patterns {
        total += index.locate(p).len();
    }
    println!("total occurrences: {total}");
    println!("patterns: {}", patterns.len());
    Ok(())
}

fn cmd_breakdown(index_path: &std::path::Path) -> Result<()> {
    let index = load_index(index_path)?;
    let b = index.breakdown();
    println!("runs:              {}", b.num_runs);
    println!("text length:       {}", b.text_len);
    println!("rlbwt (approx):    {} bytes", b.rlbwt_bytes);
    println!("samples:           {} bytes", b.samples_bytes);
    println!("mark_to_sample:    {} bytes", b.mark_to_sample_bytes);
    Ok(())
}

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use family_precision::batch::score_directory;
use family_precision::config::{MatchMode, NoPairsPolicy, OutgroupFreePolicy, ScoringConfig};
use family_precision::io::{open_score_writer, write_score_line};
use family_precision::logger;
use family_precision::matcher::LeafClassifier;
use family_precision::profile::SpeciesProfile;
use log::{LevelFilter, info};
use std::path::PathBuf;
use std::time::Instant;

/// Score gene-family trees by the fraction of ingroup leaf pairs whose
/// common ancestor has no outgroup sequence below it.
#[derive(Parser, Debug)]
#[command(name = "family-precision", version, about = "Pair-based precision for gene-family trees")]
struct Args {
    /// Directory of Newick tree files, one family per file
    tree_dir: PathBuf,

    /// Species profile: `<species_id> <sequence_count>` per line, 0 marks an outgroup
    profile: PathBuf,

    /// Output path for the score table (`-` for stdout, `.gz` to compress)
    #[arg(short = 'o', long = "output", default_value = "-")]
    output: PathBuf,

    /// How leaf names are matched to species ids
    #[arg(long = "match", value_enum, default_value_t = MatchArg::Substring)]
    match_mode: MatchArg,

    /// Separator between species id and sequence id for `--match prefix`
    #[arg(long = "delimiter", default_value_t = '_')]
    delimiter: char,

    /// Precision reported for trees without any outgroup sequence
    #[arg(long = "outgroup-free", value_enum, default_value_t = OutgroupFreeArg::Zero)]
    outgroup_free: OutgroupFreeArg,

    /// Precision reported for trees with fewer than two ingroup sequences
    #[arg(long = "no-pairs", value_enum, default_value_t = NoPairsArg::Nan)]
    no_pairs: NoPairsArg,

    /// Log unreadable tree files and continue with the next one
    #[arg(short = 'k', long = "keep-going", default_value_t = false)]
    keep_going: bool,

    /// Quiet mode: only warnings and errors on stderr
    #[arg(short = 'q', long = "quiet", default_value_t = false, conflicts_with = "verbose")]
    quiet: bool,

    /// Verbose mode: per-tree pair counts on stderr
    #[arg(short = 'v', long = "verbose", default_value_t = false)]
    verbose: bool,
}

#[derive(Copy, Clone, Debug, ValueEnum)]
enum MatchArg { Substring, Prefix }

#[derive(Copy, Clone, Debug, ValueEnum)]
enum OutgroupFreeArg { Zero, Skip }

#[derive(Copy, Clone, Debug, ValueEnum)]
enum NoPairsArg { Nan, Zero, Skip }

impl Args {
    fn scoring_config(&self) -> ScoringConfig {
        ScoringConfig {
            match_mode: match self.match_mode {
                MatchArg::Substring => MatchMode::Substring,
                MatchArg::Prefix => MatchMode::Prefix { delimiter: self.delimiter },
            },
            outgroup_free: match self.outgroup_free {
                OutgroupFreeArg::Zero => OutgroupFreePolicy::Zero,
                OutgroupFreeArg::Skip => OutgroupFreePolicy::Skip,
            },
            no_pairs: match self.no_pairs {
                NoPairsArg::Nan => NoPairsPolicy::Nan,
                NoPairsArg::Zero => NoPairsPolicy::Zero,
                NoPairsArg::Skip => NoPairsPolicy::Skip,
            },
            keep_going: self.keep_going,
        }
    }

    fn log_level(&self) -> LevelFilter {
        if self.quiet {
            LevelFilter::Warn
        } else if self.verbose {
            LevelFilter::Debug
        } else {
            LevelFilter::Info
        }
    }
}

fn main() -> Result<()> {
    let args = Args::parse();
    logger::init(args.log_level());
    let config = args.scoring_config();

    let profile = SpeciesProfile::from_path(&args.profile)
        .with_context(|| format!("Failed to read profile {:?}", args.profile))?;
    info!(
        "Read {} species ({} outgroup, {} ingroup, {} sequences)",
        profile.len(),
        profile.outgroup_species().count(),
        profile.ingroup_species().count(),
        profile.total_sequences()
    );

    let classifier = LeafClassifier::new(&profile, config.match_mode)
        .context("Failed to build species matcher")?;

    let mut out = open_score_writer(&args.output)
        .with_context(|| format!("Failed to open output {:?}", args.output))?;

    let t0 = Instant::now();
    let result = score_directory(&args.tree_dir, &classifier, &config, |score| {
        write_score_line(&mut out, &score.family, score.precision)
    });
    let finished = out.finish();
    let summary = result.with_context(|| format!("Failed scoring trees in {:?}", args.tree_dir))?;
    finished.with_context(|| format!("Failed to finish output {:?}", args.output))?;

    info!(
        "Scored {} of {} tree files in {:.3}s ({} without outgroups, {} without pairs, {} skipped, {} failed)",
        summary.scored,
        summary.files,
        t0.elapsed().as_secs_f64(),
        summary.outgroup_free,
        summary.without_pairs,
        summary.skipped,
        summary.failed
    );
    Ok(())
}

use clap::{Parser, Subcommand};

mod args;

pub use args::{AggregateArgs, CanonicalizeArgs, FlattenArgs, InputSourceArgs, MatchArgs};

#[derive(Debug, Parser)]
#[command(name = "trellis")]
#[command(about = "Hierarchical tag-path aggregation toolkit", version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Merge a batch of candidate tag paths under an L1/L2 prefix.
    Aggregate(AggregateArgs),
    /// Flatten a nested branching document into candidate tag paths.
    Flatten(FlattenArgs),
    /// Match flat tag candidates against an evolving allow-list.
    Match(MatchArgs),
    /// Normalize a URL into its canonical dedupe key.
    Canonicalize(CanonicalizeArgs),
}

use std::path::PathBuf;

use clap::Args;

fn parse_positive_usize(raw: &str) -> Result<usize, String> {
    let parsed = raw
        .parse::<usize>()
        .map_err(|_| format!("invalid integer value: {raw}"))?;
    if parsed == 0 {
        return Err("value must be >= 1".to_string());
    }
    Ok(parsed)
}

/// Shared document-input trio. Exactly one source must be selected.
#[derive(Debug, Args)]
pub struct InputSourceArgs {
    #[arg(long)]
    pub input_json: Option<String>,
    #[arg(long)]
    pub input_file: Option<PathBuf>,
    #[arg(long, default_value_t = false)]
    pub input_stdin: bool,
}

#[derive(Debug, Args)]
pub struct AggregateArgs {
    /// Coarse domain label shared by every path in the batch.
    #[arg(long)]
    pub l1: String,
    /// Sub-domain label shared by every path in the batch.
    #[arg(long)]
    pub l2: String,
    #[command(flatten)]
    pub input: InputSourceArgs,
    /// TOML document overriding the builtin plausibility hint rules.
    #[arg(long)]
    pub hints_file: Option<PathBuf>,
    /// Skip the advisory plausibility check entirely.
    #[arg(long, default_value_t = false)]
    pub no_plausibility: bool,
}

#[derive(Debug, Args)]
pub struct FlattenArgs {
    #[command(flatten)]
    pub input: InputSourceArgs,
}

#[derive(Debug, Args)]
pub struct MatchArgs {
    /// Allow-list as a JSON array of strings (or a single string).
    #[arg(long)]
    pub allowed: Option<String>,
    #[arg(long, default_value_t = 12, value_parser = parse_positive_usize)]
    pub max_k: usize,
    #[command(flatten)]
    pub input: InputSourceArgs,
}

#[derive(Debug, Args)]
pub struct CanonicalizeArgs {
    #[arg(long)]
    pub url: String,
}

use std::io::Read;
use std::{fs, io};

use anyhow::{Context, Result};
use trellis_core::taxonomy::{AggregateOptions, HintRules, LevelPrefix, aggregate};
use trellis_core::{canonical, ingest, matching};

use crate::cli::{AggregateArgs, CanonicalizeArgs, Commands, FlattenArgs, InputSourceArgs, MatchArgs};

mod support;

use self::support::print_json;

pub(crate) fn run(command: Commands) -> Result<()> {
    match command {
        Commands::Aggregate(args) => handle_aggregate(args),
        Commands::Flatten(args) => handle_flatten(args),
        Commands::Match(args) => handle_match(args),
        Commands::Canonicalize(args) => handle_canonicalize(args),
    }
}

fn handle_aggregate(args: AggregateArgs) -> Result<()> {
    let raw = read_input_document(&args.input)?;
    let candidates = parse_lenient(&raw, ingest::parse_candidates)
        .context("invalid candidate document")?;

    let mut options = AggregateOptions::from_env();
    if args.no_plausibility {
        options.check_plausibility = false;
    }
    if let Some(path) = &args.hints_file {
        let rules_raw = fs::read_to_string(path)
            .with_context(|| format!("failed to read hints file {}", path.display()))?;
        options.hints = HintRules::from_toml_str(&rules_raw)?;
    }

    let prefix = LevelPrefix::new(args.l1, args.l2);
    let outcome = aggregate(&prefix, &candidates, &options);
    print_json(&serde_json::json!({
        "status": "ok",
        "prefix": prefix,
        "complete_paths": outcome.complete_paths,
        "levels": outcome.levels,
        "relationships": outcome.relationships,
        "report": outcome.report
    }))
}

fn handle_flatten(args: FlattenArgs) -> Result<()> {
    let raw = read_input_document(&args.input)?;
    let branching = parse_lenient(&raw, trellis_core::taxonomy::parse_branching_v1)
        .context("invalid branching document")?;
    let candidates = branching.flatten();
    print_json(&serde_json::json!({
        "status": "ok",
        "candidate_count": candidates.len(),
        "candidates": candidates
    }))
}

fn handle_match(args: MatchArgs) -> Result<()> {
    let raw = read_input_document(&args.input)?;
    let candidates =
        parse_lenient(&raw, ingest::parse_string_list).context("invalid candidate document")?;
    let allowed = match &args.allowed {
        Some(raw_allowed) => {
            ingest::parse_string_list(raw_allowed).context("invalid --allowed document")?
        }
        None => Vec::new(),
    };
    let outcome = matching::match_against_allowed(&candidates, &allowed, args.max_k);
    print_json(&serde_json::json!({
        "status": "ok",
        "matches": outcome.matches,
        "updated_allowed": outcome.updated_allowed
    }))
}

fn handle_canonicalize(args: CanonicalizeArgs) -> Result<()> {
    let url_canonical = canonical::canonicalize_url(&args.url)?;
    print_json(&serde_json::json!({
        "status": "ok",
        "url": args.url,
        "url_canonical": url_canonical
    }))
}

/// Parses a document directly, then retries on the first JSON fragment
/// embedded in it; model output often arrives fenced or wrapped in prose.
fn parse_lenient<T>(
    raw: &str,
    parse: impl Fn(&str) -> trellis_core::Result<T>,
) -> trellis_core::Result<T> {
    match parse(raw) {
        Ok(parsed) => Ok(parsed),
        Err(err) => match ingest::extract_json_fragment(raw) {
            Some(fragment) => parse(&fragment),
            None => Err(err),
        },
    }
}

fn read_input_document(args: &InputSourceArgs) -> Result<String> {
    validate_input_source_selection(args)?;

    if let Some(inline) = &args.input_json {
        return Ok(inline.clone());
    }
    if let Some(path) = &args.input_file {
        return fs::read_to_string(path)
            .with_context(|| format!("failed to read input file {}", path.display()));
    }
    let mut buffer = String::new();
    io::stdin()
        .read_to_string(&mut buffer)
        .context("failed to read stdin")?;
    Ok(buffer)
}

fn validate_input_source_selection(args: &InputSourceArgs) -> Result<()> {
    let selected = usize::from(args.input_json.is_some())
        + usize::from(args.input_file.is_some())
        + usize::from(args.input_stdin);
    if selected != 1 {
        anyhow::bail!(
            "select exactly one input source: --input-json, --input-file, or --input-stdin"
        );
    }
    Ok(())
}

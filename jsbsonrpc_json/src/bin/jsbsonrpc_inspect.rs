use anyhow::{anyhow, Context, Result};
use jsbsonrpc_json::document_to_json_with_limits;
use jsbsonrpc_types::object::read_metadata;
use jsbsonrpc_types::wire::{DecodeLimits, DEFAULT_MAX_DEPTH};
use std::env;
use std::fs;
use std::io;
use tracing::debug;
use tracing_subscriber::EnvFilter;

const ENV_VAR_MAX_DEPTH: &str = "JSBSONRPC_MAX_DEPTH";

const USAGE: &str = "usage: jsbsonrpc_inspect <file> [offset]";

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .init();

    let mut args = env::args().skip(1);
    let path = args.next().ok_or_else(|| anyhow!(USAGE))?;
    let offset = match args.next() {
        None => 0,
        Some(s) => s.parse::<usize>().with_context(|| format!("bad offset {s:?}"))?,
    };

    let max_depth = env::var(ENV_VAR_MAX_DEPTH).map_or(Ok(DEFAULT_MAX_DEPTH), |s| {
        s.parse::<usize>()
            .with_context(|| format!("bad {ENV_VAR_MAX_DEPTH} {s:?}"))
    })?;

    let buf = fs::read(&path).with_context(|| format!("cannot read {path}"))?;

    if let Ok(meta) = read_metadata(&buf, offset) {
        debug!(
            name = meta.name.as_deref(),
            version = meta.version,
            doc_len = meta.doc_len,
            "object identity"
        );
    }

    let json = document_to_json_with_limits(&buf, offset, DecodeLimits { max_depth })?;
    println!("{}", serde_json::to_string_pretty(&json)?);

    Ok(())
}

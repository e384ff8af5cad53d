use std::env;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::PathBuf;

use anyhow::Context;
use serde::Deserialize;
use tracing::info;

use recall_core::config::Config;
use recall_core::traits::VectorIndex;
use recall_core::types::{Metric, VectorId};
use recall_index::{index_factory, io};

/// One vector per line: {"id": 7, "vector": [0.1, 0.2, ...]}
#[derive(Deserialize)]
struct VectorRecord {
    id: VectorId,
    vector: Vec<f32>,
}

/// Parse a JSONL stream into parallel id/value buffers. Every record
/// must match the dimension set by the first one.
fn load_records<R: BufRead>(reader: R, source: &str) -> anyhow::Result<(Vec<VectorId>, Vec<f32>, usize)> {
    let mut ids: Vec<VectorId> = Vec::new();
    let mut data: Vec<f32> = Vec::new();
    let mut dim = 0usize;
    for (lineno, line) in reader.lines().enumerate() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }
        let rec: VectorRecord = serde_json::from_str(&line)
            .with_context(|| format!("{}:{}", source, lineno + 1))?;
        if dim == 0 {
            dim = rec.vector.len();
        }
        if rec.vector.len() != dim {
            anyhow::bail!(
                "{}:{}: expected dimension {}, got {}",
                source,
                lineno + 1,
                dim,
                rec.vector.len()
            );
        }
        ids.push(rec.id);
        data.extend_from_slice(&rec.vector);
    }
    Ok((ids, data, dim))
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let args: Vec<String> = env::args().collect();
    if args.len() < 2 {
        eprintln!(
            "Usage: {} <vectors.jsonl> [--out PATH] [--factory DESC] [--metric l2|ip]",
            args[0]
        );
        eprintln!("Example: {} embeddings.jsonl --out embeddings.index", args[0]);
        std::process::exit(1);
    }
    let input = &args[1];
    let config = Config::load()?;
    let mut out: PathBuf = config
        .get::<String>("index.path")
        .map(recall_core::config::expand_path)
        .unwrap_or_else(|_| PathBuf::from("embeddings.index"));
    let mut factory = "IDMap,Flat".to_string();
    let mut metric = Metric::L2;
    let mut i = 2;
    while i < args.len() {
        match args[i].as_str() {
            "--out" if i + 1 < args.len() => { out = PathBuf::from(&args[i + 1]); i += 1; }
            "--factory" if i + 1 < args.len() => { factory = args[i + 1].clone(); i += 1; }
            "--metric" if i + 1 < args.len() => {
                metric = match args[i + 1].as_str() {
                    "l2" => Metric::L2,
                    "ip" => Metric::InnerProduct,
                    other => { eprintln!("Unknown metric: {}", other); std::process::exit(1); }
                };
                i += 1;
            }
            other => { eprintln!("Unknown flag: {}", other); std::process::exit(1); }
        }
        i += 1;
    }

    let reader = BufReader::new(File::open(input)?);
    let (ids, data, dim) = load_records(reader, input)?;
    if dim == 0 {
        eprintln!("No vectors in {}", input);
        std::process::exit(1);
    }
    info!(count = ids.len(), dim, %factory, "building index");

    let mut index = index_factory(dim, &factory, metric)?;
    match index.as_id_map_mut() {
        Some(idmap) => idmap.add_with_ids(&data, &ids)?,
        None => index.add(&data)?,
    }
    io::write_index(&index, &out)?;
    println!("📦 recall-index-build\n=====================");
    println!("Indexed {} vectors of dimension {} into {}", ids.len(), dim, out.display());
    Ok(())
}

use std::env;
use std::path::PathBuf;

use recall_core::traits::VectorIndex;
use recall_index::io;

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let args: Vec<String> = env::args().collect();
    if args.len() < 3 {
        eprintln!("Usage: {} <index_file> <v1,v2,...> [--k N]", args[0]);
        eprintln!("Example: {} embeddings.index 0.1,0.4,0.2,0.9 --k 8", args[0]);
        std::process::exit(1);
    }
    let index_path = PathBuf::from(&args[1]);
    let mut k = 8usize;
    let mut i = 3;
    while i < args.len() {
        match args[i].as_str() {
            "--k" if i + 1 < args.len() => {
                k = args[i + 1].parse().map_err(|_| anyhow::anyhow!("--k requires a number"))?;
                i += 1;
            }
            other => { eprintln!("Unknown flag: {}", other); std::process::exit(1); }
        }
        i += 1;
    }
    let query: Vec<f32> = args[2]
        .split(',')
        .map(|s| s.trim().parse::<f32>())
        .collect::<Result<_, _>>()
        .map_err(|e| anyhow::anyhow!("bad query vector: {}", e))?;

    let index = io::read_index(&index_path)?;
    println!("🔍 recall-index-search\n======================");
    println!("Index: {} ({} vectors, dim {})", index_path.display(), index.ntotal(), index.dim());
    let results = index.search(&query, k)?;
    for (rank, hit) in results[0].iter().enumerate() {
        println!("  {}. id={}  distance={:.6}", rank + 1, hit.id, hit.distance);
    }
    Ok(())
}

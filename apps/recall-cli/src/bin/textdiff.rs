use std::env;
use std::fs;

use recall_diff::{cleanup, diff, diff_lines, levenshtein, EditKind};

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let args: Vec<String> = env::args().collect();
    if args.len() < 3 {
        eprintln!("Usage: {} <old_file> <new_file> [--lines] [--semantic]", args[0]);
        eprintln!("Example: {} capture_001.txt capture_002.txt --lines", args[0]);
        std::process::exit(1);
    }
    let old_path = &args[1];
    let new_path = &args[2];
    let mut line_mode = false;
    let mut semantic = false;
    for arg in &args[3..] {
        match arg.as_str() {
            "--lines" => line_mode = true,
            "--semantic" => semantic = true,
            other => {
                eprintln!("Unknown flag: {}", other);
                std::process::exit(1);
            }
        }
    }

    let old = fs::read_to_string(old_path)?;
    let new = fs::read_to_string(new_path)?;
    let mut edits = if line_mode { diff_lines(&old, &new) } else { diff(&old, &new) };
    if semantic {
        cleanup::cleanup_semantic(&mut edits);
    }

    println!("📝 recall-textdiff\n==================");
    println!("Old: {}  New: {}  ({} edits)", old_path, new_path, edits.len());
    for e in &edits {
        let tag = match e.kind {
            EditKind::Equal => '=',
            EditKind::Delete => '-',
            EditKind::Insert => '+',
        };
        println!("{} {:?}", tag, e.text);
    }
    println!("\nLevenshtein distance: {}", levenshtein(&edits));
    Ok(())
}

use std::path::Path;

use recall_core::config::{expand_path, resolve_with_base};
use recall_core::error::Error;

#[test]
fn expand_path_passes_plain_paths_through() {
    let p = expand_path("data/indexes");
    assert_eq!(p, Path::new("data/indexes"));
}

#[test]
fn expand_path_substitutes_env_vars() {
    std::env::set_var("RECALL_CORE_TEST_DIR", "/tmp/recall-test");
    let p = expand_path("${RECALL_CORE_TEST_DIR}/embeddings.index");
    assert_eq!(p, Path::new("/tmp/recall-test/embeddings.index"));
}

#[test]
fn resolve_with_base_keeps_absolute_paths() {
    let base = Path::new("/var/lib/recall");
    assert_eq!(resolve_with_base(base, "/etc/recall.toml"), Path::new("/etc/recall.toml"));
    assert_eq!(resolve_with_base(base, "indexes/main"), Path::new("/var/lib/recall/indexes/main"));
}

#[test]
fn error_messages_carry_context() {
    let e = Error::DimensionMismatch { expected: 1536, got: 512 };
    assert_eq!(e.to_string(), "Dimension mismatch: expected 1536, got 512");
    let e = Error::InvalidFactory("PQ16".to_string());
    assert!(e.to_string().contains("PQ16"));
}

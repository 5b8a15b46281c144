//! Stamps wildwatch-api with the revision it was compiled from
//!
//! Exposes `WILDWATCH_COMMIT`, `WILDWATCH_PROFILE` and `WILDWATCH_BUILT_AT`
//! to the crate; the startup log and `GET /health` report them.

use std::env;
use std::process::Command;

/// Trimmed stdout of a successful git invocation
fn git(args: &[&str]) -> Option<String> {
    let output = Command::new("git").args(args).output().ok()?;
    if !output.status.success() {
        return None;
    }
    String::from_utf8(output.stdout)
        .ok()
        .map(|text| text.trim().to_string())
}

/// Short commit id, suffixed `-dirty` when tracked files have local edits
fn commit_id() -> String {
    let Some(hash) = git(&["rev-parse", "--short=8", "HEAD"]) else {
        return "unknown".to_string();
    };
    match git(&["status", "--porcelain", "--untracked-files=no"]) {
        Some(changes) if !changes.is_empty() => format!("{hash}-dirty"),
        _ => hash,
    }
}

fn main() {
    // Same layout as the API's timestamps
    let built_at = chrono::Utc::now().format("%Y-%m-%d %H:%M:%S").to_string();
    let profile = env::var("PROFILE").unwrap_or_else(|_| "unknown".to_string());

    for (key, value) in [
        ("WILDWATCH_COMMIT", commit_id()),
        ("WILDWATCH_PROFILE", profile),
        ("WILDWATCH_BUILT_AT", built_at),
    ] {
        println!("cargo:rustc-env={key}={value}");
    }

    println!("cargo:rerun-if-changed=build.rs");
    if let Some(head) = git(&["rev-parse", "--git-path", "HEAD"]) {
        println!("cargo:rerun-if-changed={head}");
    }
    if let Some(index) = git(&["rev-parse", "--git-path", "index"]) {
        println!("cargo:rerun-if-changed={index}");
    }
}

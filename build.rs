use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;

// Exposes the short commit hash to `--version` output.
fn main() {
    let hash = git_short_hash().unwrap_or_else(|| "unknown".into());
    println!("cargo:rustc-env=DOODLE_ENGINE_GIT_HASH={hash}");

    if let Some(git_dir) = locate_git_dir() {
        for tracked in ["HEAD", "refs", "packed-refs"] {
            rerun_if_exists(&git_dir.join(tracked));
        }
    }
}

fn git_short_hash() -> Option<String> {
    let output = Command::new("git")
        .args(["rev-parse", "--short", "HEAD"])
        .output()
        .ok()?;
    if !output.status.success() {
        return None;
    }
    let hash = String::from_utf8_lossy(&output.stdout).trim().to_string();
    (!hash.is_empty()).then_some(hash)
}

fn locate_git_dir() -> Option<PathBuf> {
    if let Some(from_env) = env::var_os("GIT_DIR") {
        return Some(PathBuf::from(from_env));
    }

    let dot_git = PathBuf::from(".git");
    if dot_git.is_dir() {
        return Some(dot_git);
    }

    // worktrees and submodules use a `gitdir:` pointer file
    let contents = fs::read_to_string(&dot_git).ok()?;
    let target = PathBuf::from(contents.strip_prefix("gitdir:")?.trim());
    if target.is_relative() {
        Some(dot_git.parent().unwrap_or(Path::new(".")).join(target))
    } else {
        Some(target)
    }
}

fn rerun_if_exists(path: &Path) {
    if path.exists()
        && let Some(display) = path.to_str()
    {
        println!("cargo:rerun-if-changed={display}");
    }
}

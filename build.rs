//! Embeds build metadata consumed through `env!()`: the short git commit
//! (health output and startup log) and the build profile and time.
//!
//! Every value falls back to `"unknown"` when git is unavailable, e.g. in
//! container builds without `.git`.

use std::process::Command;

fn command_output(program: &str, args: &[&str]) -> Option<String> {
    Command::new(program)
        .args(args)
        .output()
        .ok()
        .filter(|o| o.status.success())
        .and_then(|o| String::from_utf8(o.stdout).ok())
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
}

fn emit(key: &str, value: Option<String>) {
    let value = value.unwrap_or_else(|| "unknown".into());
    println!("cargo:rustc-env=GENAI_RESOLVER_{key}={value}");
}

fn main() {
    println!("cargo:rerun-if-changed=.git/HEAD");
    println!("cargo:rerun-if-changed=.git/refs");
    println!("cargo:rerun-if-env-changed=GENAI_RESOLVER_GIT_SHORT_OVERRIDE");

    // An override wins so container builds can pass the commit in
    let commit = std::env::var("GENAI_RESOLVER_GIT_SHORT_OVERRIDE")
        .ok()
        .filter(|s| !s.is_empty() && s != "unknown")
        .or_else(|| command_output("git", &["rev-parse", "--short", "HEAD"]));
    emit("GIT_SHORT", commit);

    emit("BUILD_PROFILE", std::env::var("PROFILE").ok());
    emit(
        "BUILD_TIME",
        command_output("date", &["-u", "+%Y-%m-%dT%H:%M:%SZ"]),
    );
}

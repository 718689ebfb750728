use std::process::Command;

fn main() {
    // embeds `git describe --always --dirty`, if git is around
    let git_hash = Command::new("git")
        .args(["describe", "--always", "--dirty"])
        .output()
        .ok()
        .filter(|output| output.status.success())
        .and_then(|output| String::from_utf8(output.stdout).ok())
        .map(|hash| hash.trim().to_string())
        .unwrap_or_else(|| "UNKNOWN".to_string());
    println!("cargo:rustc-env=GIT_HASH={git_hash}");
}

//! Building a year workspace into a loadable library

use crate::error::BuildError;
use serde::Deserialize;
use std::env::consts::DLL_EXTENSION;
use std::ffi::OsString;
use std::path::{Path, PathBuf};
use std::process::Command;
use tracing::{debug, info};

/// One line of cargo's `--message-format=json` output
#[derive(Debug, Deserialize)]
#[serde(tag = "reason", rename_all = "kebab-case")]
enum Message {
    CompilerArtifact(Artifact),
    #[serde(other)]
    Other,
}

#[derive(Debug, Deserialize)]
struct Artifact {
    target: Target,
    filenames: Vec<PathBuf>,
}

#[derive(Debug, Deserialize)]
struct Target {
    kind: Vec<String>,
}

/// Cargo binary to invoke, honouring `$CARGO`
fn cargo_program() -> OsString {
    std::env::var_os("CARGO").unwrap_or_else(|| OsString::from("cargo"))
}

/// Release build of the library in `workspace`, with outputs under `target_dir`
fn build_command(workspace: &Path, target_dir: &Path) -> Command {
    let mut command = Command::new(cargo_program());
    command
        .args([
            "build",
            "--release",
            "--lib",
            "--message-format=json-render-diagnostics",
        ])
        .arg("--target-dir")
        .arg(target_dir)
        .current_dir(workspace);
    command
}

/// Compile `workspace` and return the path of the produced shared library
pub fn build_year(workspace: &Path, target_dir: &Path) -> Result<PathBuf, BuildError> {
    let mut command = build_command(workspace, target_dir);
    info!(workspace = %workspace.display(), target_dir = %target_dir.display(), "building solutions");
    debug!(?command, "running build");

    let output = command.output().map_err(|source| BuildError::Spawn {
        program: cargo_program().to_string_lossy().into_owned(),
        source,
    })?;

    if !output.status.success() {
        return Err(BuildError::Failed {
            status: output.status,
            diagnostics: String::from_utf8_lossy(&output.stderr).trim_end().to_string(),
        });
    }

    let stdout = String::from_utf8_lossy(&output.stdout);
    let artifact = find_cdylib(&stdout).ok_or_else(|| BuildError::NoArtifact {
        workspace: workspace.to_path_buf(),
    })?;
    debug!(artifact = %artifact.display(), "build finished");
    Ok(artifact)
}

/// Last cdylib reported in cargo's JSON messages
fn find_cdylib(messages: &str) -> Option<PathBuf> {
    messages
        .lines()
        .filter_map(|line| serde_json::from_str::<Message>(line).ok())
        .filter_map(|message| match message {
            Message::CompilerArtifact(artifact) => Some(artifact),
            Message::Other => None,
        })
        .filter(|artifact| artifact.target.kind.iter().any(|kind| kind == "cdylib"))
        .flat_map(|artifact| artifact.filenames)
        .filter(|path| path.extension().is_some_and(|ext| ext == DLL_EXTENSION))
        .last()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn artifact_line(kind: &str, filenames: &[String]) -> String {
        serde_json::json!({
            "reason": "compiler-artifact",
            "package_id": "solutions 0.1.0 (path+file:///w/2015)",
            "target": { "kind": [kind], "crate_types": [kind], "name": "solutions" },
            "profile": { "opt_level": "3" },
            "filenames": filenames,
            "fresh": false
        })
        .to_string()
    }

    fn lib_path(stem: &str) -> String {
        format!("/cache/builds/2015/release/{}.{}", stem, DLL_EXTENSION)
    }

    #[test]
    fn test_finds_cdylib_among_messages() {
        let messages = [
            r#"{"reason":"build-script-executed","package_id":"x","linked_libs":[]}"#.to_string(),
            artifact_line("lib", &["/cache/builds/2015/release/deps/libdep.rlib".to_string()]),
            artifact_line(
                "cdylib",
                &[
                    lib_path("libsolutions"),
                    "/cache/builds/2015/release/libsolutions.d".to_string(),
                ],
            ),
            r#"{"reason":"build-finished","success":true}"#.to_string(),
        ]
        .join("\n");

        assert_eq!(find_cdylib(&messages), Some(PathBuf::from(lib_path("libsolutions"))));
    }

    #[test]
    fn test_ignores_rlibs_and_noise() {
        let messages = [
            "Compiling solutions v0.1.0".to_string(),
            artifact_line("lib", &["/cache/builds/2015/release/libsolutions.rlib".to_string()]),
            r#"{"reason":"build-finished","success":true}"#.to_string(),
        ]
        .join("\n");

        assert_eq!(find_cdylib(&messages), None);
        assert_eq!(find_cdylib(""), None);
    }

    #[test]
    fn test_build_command_arguments() {
        let command = build_command(Path::new("/w/2015"), Path::new("/cache/builds/2015"));
        let args: Vec<_> = command.get_args().map(|a| a.to_string_lossy().into_owned()).collect();

        assert_eq!(
            args,
            vec![
                "build",
                "--release",
                "--lib",
                "--message-format=json-render-diagnostics",
                "--target-dir",
                "/cache/builds/2015",
            ]
        );
        assert_eq!(command.get_current_dir(), Some(Path::new("/w/2015")));
    }
}

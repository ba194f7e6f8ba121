//! Convenience helpers for input, output and file naming.

use std::ffi::OsString;
use std::fs;
use std::io::{self, Read, Write};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use srecasm::OutputFormat;
use tracing::warn;

fn is_stdio(path: &Path) -> bool {
    path.as_os_str() == "-"
}

/// Read the whole input, from a file or stdin when `from` is absent or `-`.
pub fn read_input(from: Option<&Path>) -> Result<Vec<u8>> {
    match from {
        Some(path) if !is_stdio(path) => {
            fs::read(path).with_context(|| format!("failed to read {}", path.display()))
        }
        _ => read_stdin(),
    }
}

/// Read the entire stdin stream into memory.
pub fn read_stdin() -> Result<Vec<u8>> {
    let mut buffer = Vec::new();
    io::stdin()
        .read_to_end(&mut buffer)
        .context("failed to read from stdin")?;
    Ok(buffer)
}

/// Cut `data` down to `max` bytes. Returns whether anything was dropped.
pub fn apply_limit(data: &mut Vec<u8>, max: Option<usize>) -> bool {
    match max {
        Some(max) if data.len() > max => {
            warn!(
                input_bytes = data.len(),
                max_bytes = max,
                "input exceeds byte limit, truncating"
            );
            data.truncate(max);
            true
        }
        _ => false,
    }
}

/// Decide where output goes. `None` means stdout.
///
/// An explicit output wins; otherwise an input file name gets the format's
/// extension appended (`image.bin` becomes `image.bin.srec`).
pub fn resolve_output_path(
    input: Option<&Path>,
    output: Option<&Path>,
    format: OutputFormat,
) -> Option<PathBuf> {
    if let Some(out) = output {
        return (!is_stdio(out)).then(|| out.to_path_buf());
    }
    let input = input.filter(|p| !is_stdio(p))?;
    let mut name = OsString::from(input.as_os_str());
    name.push(".");
    name.push(format.file_extension());
    Some(PathBuf::from(name))
}

/// Persist a string either to a file or stdout when no path is given.
pub fn write_output(path: Option<&Path>, content: &str) -> Result<()> {
    match path {
        Some(path) => {
            fs::write(path, content).with_context(|| format!("failed to write {}", path.display()))
        }
        None => {
            let mut stdout = io::stdout().lock();
            stdout
                .write_all(content.as_bytes())
                .context("failed to write to stdout")?;
            stdout.flush().context("failed to flush stdout")
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn output_name_appends_extension() {
        let path = resolve_output_path(Some(Path::new("dir/image.bin")), None, OutputFormat::Srec);
        assert_eq!(path, Some(PathBuf::from("dir/image.bin.srec")));
        let path = resolve_output_path(Some(Path::new("image")), None, OutputFormat::Assembly);
        assert_eq!(path, Some(PathBuf::from("image.asm")));
    }

    #[test]
    fn explicit_output_wins() {
        let path = resolve_output_path(
            Some(Path::new("image.bin")),
            Some(Path::new("out.s19")),
            OutputFormat::Srec,
        );
        assert_eq!(path, Some(PathBuf::from("out.s19")));
    }

    #[test]
    fn stdio_markers_mean_stdout() {
        assert_eq!(resolve_output_path(None, None, OutputFormat::Srec), None);
        assert_eq!(
            resolve_output_path(Some(Path::new("-")), None, OutputFormat::Srec),
            None
        );
        assert_eq!(
            resolve_output_path(Some(Path::new("a.bin")), Some(Path::new("-")), OutputFormat::Srec),
            None
        );
    }

    #[test]
    fn limit_truncates_only_when_exceeded() {
        let mut data = vec![0u8; 10];
        assert!(!apply_limit(&mut data, None));
        assert!(!apply_limit(&mut data, Some(10)));
        assert!(apply_limit(&mut data, Some(4)));
        assert_eq!(data.len(), 4);
    }

    #[test]
    fn file_round_trip_through_helpers() {
        let dir = std::env::temp_dir().join(format!("srecasm-utils-{}", std::process::id()));
        fs::create_dir_all(&dir).unwrap();
        let input = dir.join("data.bin");
        fs::write(&input, [1u8, 2, 3]).unwrap();
        assert_eq!(read_input(Some(&input)).unwrap(), vec![1, 2, 3]);

        let out = dir.join("data.txt");
        write_output(Some(&out), "dc.b\t$01\n").unwrap();
        assert_eq!(fs::read_to_string(&out).unwrap(), "dc.b\t$01\n");

        assert!(read_input(Some(&dir.join("missing.bin"))).is_err());
        fs::remove_dir_all(&dir).ok();
    }
}

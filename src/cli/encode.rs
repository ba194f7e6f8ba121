//! The conversion itself: read, encode, write, optionally record a manifest.

use anyhow::{Context, Result};
use srecasm::{
    AssemblyEncoder, EncodeManifest, OutputFormat, SrecEncoder, TextEncoder, encode_with,
};
use tracing::{info, warn};

use crate::cli::Cli;
use crate::cli::utils::{apply_limit, read_input, resolve_output_path, write_output};

/// Execute a conversion described by the parsed command line.
pub fn handle(cli: Cli) -> Result<()> {
    let format = OutputFormat::from(cli.format);
    let encoder = build_encoder(&cli, format)?;

    let mut data = read_input(cli.input.as_deref())?;
    let truncated = apply_limit(&mut data, cli.max_bytes);

    let encoded = encode_with(encoder.as_ref(), &data)
        .with_context(|| format!("failed to encode input as {}", encoder.name()))?;

    let output = resolve_output_path(cli.input.as_deref(), cli.output.as_deref(), format);
    write_output(output.as_deref(), &encoded.text)?;
    if let Some(path) = &output {
        info!(
            path = %path.display(),
            lines = encoded.lines,
            format = %format,
            "wrote output"
        );
    }

    if let Some(manifest_path) = &cli.manifest {
        EncodeManifest::new(&data, &encoded)
            .with_paths(cli.input.as_deref(), output.as_deref())
            .with_truncated(truncated)
            .save(manifest_path)?;
        info!(path = %manifest_path.display(), "wrote manifest");
    }
    Ok(())
}

fn build_encoder(cli: &Cli, format: OutputFormat) -> Result<Box<dyn TextEncoder>> {
    match format {
        OutputFormat::Srec => {
            if cli.directive.is_some() {
                warn!("--directive only applies to assembly output; ignoring");
            }
            let encoder = match &cli.header {
                Some(header) => SrecEncoder::with_header(header.as_bytes())
                    .context("invalid S0 header label")?,
                None => SrecEncoder::new(),
            };
            Ok(Box::new(encoder))
        }
        OutputFormat::Assembly => {
            if cli.header.is_some() {
                warn!("--header only applies to S-Record output; ignoring");
            }
            let encoder = match &cli.directive {
                Some(directive) => AssemblyEncoder::with_directive(directive),
                None => AssemblyEncoder::new(),
            };
            Ok(Box::new(encoder))
        }
    }
}

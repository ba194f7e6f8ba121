//! Shared clap helper types for CLI options.

use clap::ValueEnum;
use srecasm::OutputFormat;

/// Output formats accepted by `-s` / `--format`.
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormatArg {
    #[value(name = "asm", alias = "assembly")]
    Asm,
    #[value(name = "rec", alias = "srec")]
    Rec,
}

impl From<FormatArg> for OutputFormat {
    fn from(value: FormatArg) -> OutputFormat {
        match value {
            FormatArg::Asm => OutputFormat::Assembly,
            FormatArg::Rec => OutputFormat::Srec,
        }
    }
}

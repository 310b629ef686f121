//! Defines the command-line arguments for the heliumt runner.
//!
//! This module uses the `clap` crate with its "derive" feature. Every flag
//! is optional; the defaults match a toolchain checkout that has built the
//! compiler into `bin/`.

use clap::Parser;
use std::path::PathBuf;

use crate::config::SuiteConfig;

/// The main CLI argument structure.
#[derive(Debug, Parser)]
#[command(
    name = "heliumt",
    version,
    about = "Conformance test runner for the Helium compiler toolchain."
)]
pub struct HeliumtArgs {
    /// Path to the Helium compiler binary.
    #[arg(long, default_value = "bin/heliumc")]
    pub compiler: PathBuf,

    /// Directory scanned for test files.
    #[arg(long = "tests", default_value = "tests")]
    pub test_dir: PathBuf,

    /// Test file extension, without the leading dot.
    #[arg(long, default_value = "he")]
    pub ext: String,

    /// Assembler executable.
    #[arg(long, default_value = "nasm")]
    pub assembler: String,

    /// Object format passed to the assembler via -f.
    #[arg(long = "obj-format", default_value = "elf64")]
    pub object_format: String,

    /// Linker executable.
    #[arg(long, default_value = "ld")]
    pub linker: String,

    /// Disable colored output.
    #[arg(long)]
    pub no_color: bool,
}

impl HeliumtArgs {
    /// Folds the parsed arguments into a suite configuration.
    pub fn into_config(self) -> SuiteConfig {
        let defaults = SuiteConfig::default();
        SuiteConfig {
            compiler: self.compiler,
            test_dir: self.test_dir,
            extension: self.ext,
            assembler: self.assembler,
            object_format: self.object_format,
            linker: self.linker,
            use_colors: !self.no_color && defaults.use_colors,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_the_conventional_layout() {
        let args = HeliumtArgs::parse_from(["heliumt"]);
        let cfg = args.into_config();
        assert_eq!(cfg.compiler, PathBuf::from("bin/heliumc"));
        assert_eq!(cfg.test_dir, PathBuf::from("tests"));
        assert_eq!(cfg.extension, "he");
        assert_eq!(cfg.assembler, "nasm");
        assert_eq!(cfg.object_format, "elf64");
        assert_eq!(cfg.linker, "ld");
    }

    #[test]
    fn no_color_disables_colors() {
        let args = HeliumtArgs::parse_from(["heliumt", "--no-color"]);
        assert!(!args.into_config().use_colors);
    }

    #[test]
    fn tool_overrides_are_honored() {
        let args = HeliumtArgs::parse_from([
            "heliumt",
            "--compiler",
            "target/debug/heliumc",
            "--obj-format",
            "macho64",
        ]);
        let cfg = args.into_config();
        assert_eq!(cfg.compiler, PathBuf::from("target/debug/heliumc"));
        assert_eq!(cfg.object_format, "macho64");
    }
}

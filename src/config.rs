//! Suite configuration: where the toolchain lives and where tests are found.

use std::path::PathBuf;

/// Configuration for one suite run.
///
/// Every field has a conventional default so the runner works with no
/// arguments from a checkout that has built the compiler into `bin/`.
#[derive(Debug, Clone)]
pub struct SuiteConfig {
    /// Path to the Helium compiler binary.
    pub compiler: PathBuf,
    /// Directory scanned (recursively) for test files.
    pub test_dir: PathBuf,
    /// Extension of test files, without the leading dot.
    pub extension: String,
    /// Assembler invoked on the compiler's output.
    pub assembler: String,
    /// Object format handed to the assembler via `-f`.
    pub object_format: String,
    /// Linker invoked on the assembled object.
    pub linker: String,
    /// Whether the reporter colorizes its output.
    pub use_colors: bool,
}

impl Default for SuiteConfig {
    fn default() -> Self {
        Self {
            compiler: PathBuf::from("bin/heliumc"),
            test_dir: PathBuf::from("tests"),
            extension: "he".to_string(),
            assembler: "nasm".to_string(),
            object_format: "elf64".to_string(),
            linker: "ld".to_string(),
            use_colors: atty::is(atty::Stream::Stdout),
        }
    }
}

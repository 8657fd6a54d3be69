//! Command line arguments.
//!
//! Uses clap for CLI parsing with:
//! - Help text (`--help`)
//! - Validation and clear error messages

use std::path::{Path, PathBuf};

/// Shell configuration.
///
/// # Examples
///
/// ```bash
/// # Interactive menu, blobs in the current directory
/// ./polywire
///
/// # Keep blobs under ./out
/// ./polywire --data-dir out
///
/// # Run operation 17 (JSON devices save) once and exit
/// ./polywire --op 17
///
/// # Debug logging (RUST_LOG still wins when set)
/// ./polywire --verbose
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShellArgs {
    data_dir: PathBuf,
    op: Option<u32>,
    verbose: bool,
}

impl Default for ShellArgs {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from("."),
            op: None,
            verbose: false,
        }
    }
}

impl ShellArgs {
    /// Parse the process arguments.
    pub fn parse() -> Self {
        use clap::Parser;
        native::ClapArgs::parse().into()
    }

    /// Set the directory blobs are read from and written to.
    pub fn with_data_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.data_dir = dir.into();
        self
    }

    /// Run a single operation instead of the menu.
    pub fn with_op(mut self, op: u32) -> Self {
        self.op = Some(op);
        self
    }

    pub fn with_verbose(mut self, verbose: bool) -> Self {
        self.verbose = verbose;
        self
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    pub fn op(&self) -> Option<u32> {
        self.op
    }

    pub fn verbose(&self) -> bool {
        self.verbose
    }

    /// Default log filter when `RUST_LOG` is not set.
    pub fn log_filter(&self) -> &'static str {
        if self.verbose { "debug" } else { "info" }
    }
}

// ============================================================================
// clap definition
// ============================================================================

mod native {
    use super::*;
    use clap::Parser;

    /// polywire serialization shell arguments.
    #[derive(Parser, Debug)]
    #[command(
        name = "polywire",
        about = "Save and load sample data in envelope, markup and JSON formats",
        long_about = "Save and load sample data in three wire formats.\n\n\
            FORMATS:\n\
            \n\
            • envelope: SOAP-style XML with a header describing the body.\n\
            • markup: plain XML named after the declared types.\n\
            • json: pretty-printed JSON; storage devices carry a 'kind' field.\n\
            \n\
            Without --op the numbered menu is shown and operations run until\n\
            you answer anything but 'y' to 'Continue?'.",
        version
    )]
    pub(super) struct ClapArgs {
        /// Directory that holds the blobs.
        #[arg(long, default_value = ".")]
        pub data_dir: PathBuf,

        /// Run one menu operation (1-22) and exit.
        #[arg(long, value_parser = clap::value_parser!(u32).range(1..=22))]
        pub op: Option<u32>,

        /// Log at debug level unless RUST_LOG says otherwise.
        #[arg(long, short)]
        pub verbose: bool,
    }

    impl From<ClapArgs> for ShellArgs {
        fn from(args: ClapArgs) -> Self {
            Self {
                data_dir: args.data_dir,
                op: args.op,
                verbose: args.verbose,
            }
        }
    }
}

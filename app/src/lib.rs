//! # polywire app
//!
//! Console shell that saves and loads the sample data through every codec.
//!
//! ## Overview
//!
//! - [`ShellArgs`] - Command line configuration
//! - [`MenuOp`] - The 22 numbered operations and the blob each one uses
//! - [`Session`] - Runs an operation against a blob store
//! - [`run_interactive`] - The menu loop over any reader and writer
//! - [`run`] - Entry point used by the `polywire` binary
//!
//! ## Example
//!
//! ```
//! use std::sync::Arc;
//! use polywire_app::{MenuOp, Session};
//! use polywire_codec::TypeRegistry;
//! use polywire_vfs::MemoryStore;
//!
//! let session = Session::new(Arc::new(MemoryStore::new()), Arc::new(TypeRegistry::standard()));
//! session.run(MenuOp::from_number(13).unwrap()).unwrap();
//! let report = session.run(MenuOp::from_number(14).unwrap()).unwrap();
//! assert_eq!(report.to_string(), "1,2,3,4,5,6,7,8,9,10");
//! ```

mod args;
mod error;
mod interactive;
mod menu;
mod session;

use std::sync::Arc;

use polywire_codec::TypeRegistry;
use polywire_vfs::FileSystemStore;

pub use args::ShellArgs;
pub use error::AppError;
pub use interactive::run_interactive;
pub use menu::{Action, MenuOp, Subject};
pub use session::{Report, Session};

/// App library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Log the app version.
pub fn init() {
    log::info!("polywire app v{} initialized", VERSION);
}

/// Run the shell with the given arguments.
///
/// Installs the logger, builds the type registry once and serves either a
/// single `--op` or the interactive menu on stdin/stdout.
pub fn run(args: ShellArgs) -> Result<(), AppError> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(args.log_filter()))
        .init();

    polywire_core::init();
    crate::init();

    let registry = Arc::new(TypeRegistry::standard());
    log::debug!("registered storage types: {:?}", registry.storage());
    let store = Arc::new(FileSystemStore::new(args.data_dir()));
    log::info!("blobs live in {}", args.data_dir().display());
    let session = Session::new(store, registry);

    match args.op() {
        Some(number) => {
            let op = MenuOp::from_number(number).ok_or(AppError::UnknownOperation(number))?;
            let report = session.run(op)?;
            println!("{report}");
            Ok(())
        }
        None => {
            let stdin = std::io::stdin();
            let stdout = std::io::stdout();
            run_interactive(&session, stdin.lock(), stdout.lock())
        }
    }
}

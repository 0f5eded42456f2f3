//! # optbind
//!
//! **Register once, parse twice** - a small option registry that fills
//! host-owned variables from the command line or from a `key = value`
//! configuration file, with one error route and generated help.
//!
//! ## Features
//!
//! - **Typed bindings** - flags, integers, strings, secrets and callbacks
//! - **Two engines, one table** - `-x` / `--name` on argv, `name = value` in files
//! - **Secret hygiene** - secret argv values are copied out and zeroed in place
//! - **Pluggable reporting** - replace the default "error + help" handler
//!
//! ## Quick Start
//!
//! ```rust
//! use optbind::{App, Opt};
//!
//! let mut verbose = false;
//! let mut name: Option<String> = None;
//! {
//!     let mut app = App::with_description("greets people");
//!     app.add(Opt::flag(&mut verbose).short('v').long("verbose").describe("talk more"))
//!         .unwrap();
//!     app.add(Opt::text(&mut name).short('n').long("name").describe("who to greet"))
//!         .unwrap();
//!     app.add_help();
//!
//!     app.parse_config_str("# defaults\nname = Alice\n").unwrap();
//!
//!     let mut args: Vec<String> = vec!["greet".into(), "-v".into()];
//!     app.parse_args(&mut args).unwrap();
//! }
//! assert!(verbose);
//! assert_eq!(name.as_deref(), Some("Alice"));
//! ```

// ============================================================================
// Core Modules
// ============================================================================

/// Application context and parse entry points.
pub mod app;

/// Option descriptors, bindings and the ordered registry.
pub mod registry;

/// Token / key to descriptor lookup.
pub mod matcher;

/// Text to value conversion (boolean vocabulary, integers).
pub mod coerce;

/// Argument-vector engine.
pub mod argv;

/// `key = value` config-file engine.
pub mod config_file;

/// Help rendering and error reporting.
pub mod report;

mod session;

// ============================================================================
// Support Modules
// ============================================================================

pub mod error;
pub mod secret;
pub mod settings;
pub mod term;

// ============================================================================
// Re-exports
// ============================================================================

pub use app::App;
pub use error::{Error, Result};
pub use registry::{Binding, Opt, OptKind, OptSpec, Registry};
pub use report::{ErrorHandler, Usage, auto_help, default_error_handler};
pub use secret::SecretString;
pub use settings::ParserSettings;

//! The application context: program identity, option registry, error route
//! and parser settings, plus the public parse entry points.

use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::Path;

use crate::argv;
use crate::config_file;
use crate::error::Result;
use crate::registry::{Binding, Opt, Registry};
use crate::report::{ErrorHandler, Usage, auto_help};
use crate::session::Session;
use crate::settings::ParserSettings;

/// One per host program. Borrows the host's storage cells for `'a`; read
/// them back once the `App` is dropped.
///
/// ```
/// use optbind::{App, Opt};
///
/// let mut verbose = false;
/// let mut count = 0;
/// {
///     let mut app = App::with_description("counts things");
///     app.add(Opt::flag(&mut verbose).short('v').long("verbose")).unwrap();
///     app.add(Opt::integer(&mut count).long("count")).unwrap();
///
///     let mut args: Vec<String> = ["tool", "-v", "--count", "3"]
///         .iter()
///         .map(|s| s.to_string())
///         .collect();
///     app.parse_args(&mut args).unwrap();
/// }
/// assert!(verbose);
/// assert_eq!(count, 3);
/// ```
pub struct App<'a> {
    program_name: String,
    description: Option<String>,
    registry: Registry<'a>,
    on_error: Option<ErrorHandler<'a>>,
    settings: ParserSettings,
}

impl Default for App<'_> {
    fn default() -> Self {
        Self::new()
    }
}

impl<'a> App<'a> {
    pub fn new() -> Self {
        Self {
            program_name: String::new(),
            description: None,
            registry: Registry::new(),
            on_error: None,
            settings: ParserSettings::default(),
        }
    }

    pub fn with_description(description: impl Into<String>) -> Self {
        let mut app = Self::new();
        app.set_description(description);
        app
    }

    pub fn set_description(&mut self, description: impl Into<String>) {
        self.description = Some(description.into());
    }

    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    /// Basename of `argv[0]` from the last argv parse; empty before that.
    pub fn program_name(&self) -> &str {
        &self.program_name
    }

    pub fn set_program_name(&mut self, name: impl Into<String>) {
        self.program_name = name.into();
    }

    pub fn registry(&self) -> &Registry<'a> {
        &self.registry
    }

    pub fn settings(&self) -> &ParserSettings {
        &self.settings
    }

    pub fn set_settings(&mut self, settings: ParserSettings) {
        self.settings = settings;
    }

    // ------------------------------------------------------------------------
    // Registration
    // ------------------------------------------------------------------------

    pub fn add(&mut self, opt: Opt<'a>) -> Result<&mut Self> {
        self.registry.add(opt)?;
        Ok(self)
    }

    pub fn add_short(&mut self, name: char, binding: Binding<'a>) -> Result<&mut Self> {
        self.registry.add_short(name, binding)?;
        Ok(self)
    }

    /// Register `-h` / `--help`, bound to [`auto_help`].
    pub fn add_help(&mut self) -> &mut Self {
        let help = Opt::callback(auto_help)
            .short('h')
            .long("help")
            .describe("(show this help message)");
        // The descriptor is named, so registration cannot be rejected.
        let _ = self.registry.add(help);
        self
    }

    /// Replace the default error handler. The handler sees every parse
    /// failure: unknown options, missing arguments and bad values.
    pub fn on_error(&mut self, handler: impl FnMut(&Usage<'_>, &crate::Error) + 'a) -> &mut Self {
        self.on_error = Some(Box::new(handler));
        self
    }

    // ------------------------------------------------------------------------
    // Help
    // ------------------------------------------------------------------------

    pub fn usage(&self) -> Usage<'_> {
        Usage {
            program_name: &self.program_name,
            description: self.description.as_deref(),
            options: self.registry.specs(),
        }
    }

    pub fn help_text(&self) -> String {
        self.usage().help_text()
    }

    pub fn print_help(&self) {
        auto_help(&self.usage(), "");
    }

    // ------------------------------------------------------------------------
    // Parsing
    // ------------------------------------------------------------------------

    /// Parse a full argument vector (`args[0]` is the program name).
    ///
    /// Secret values are zeroed in `args` once captured.
    pub fn parse_args(&mut self, args: &mut [String]) -> Result<()> {
        if let Some(arg0) = args.first() {
            self.program_name = argv::program_name(arg0);
        }
        tracing::debug!(
            program = %self.program_name,
            tokens = args.len(),
            options = self.registry.len(),
            "parsing arguments"
        );
        let result = argv::parse(&mut self.session(), args);
        tracing::debug!(ok = result.is_ok(), "argument parse finished");
        result
    }

    /// Parse the process arguments.
    ///
    /// Arguments are copied into owned strings first, so wiping a secret
    /// only clears that copy. The operating system's view of the command
    /// line (`/proc/<pid>/cmdline`, `ps`) still shows it.
    pub fn parse_env(&mut self) -> Result<()> {
        let mut args = argv::os_args();
        self.parse_args(&mut args)
    }

    /// Parse `key = value` lines from a reader until end of stream.
    pub fn parse_config<R: BufRead + ?Sized>(&mut self, reader: &mut R) -> Result<()> {
        tracing::debug!(options = self.registry.len(), "parsing config stream");
        let result = config_file::parse(&mut self.session(), reader);
        tracing::debug!(ok = result.is_ok(), "config parse finished");
        result
    }

    pub fn parse_config_str(&mut self, content: &str) -> Result<()> {
        self.parse_config(&mut io::Cursor::new(content))
    }

    pub fn parse_config_file(&mut self, path: &Path) -> Result<()> {
        let file = File::open(path)?;
        tracing::debug!(path = %path.display(), "opened config file");
        self.parse_config(&mut BufReader::new(file))
    }

    fn session(&mut self) -> Session<'_, 'a> {
        Session {
            usage: Usage {
                program_name: &self.program_name,
                description: self.description.as_deref(),
                options: &self.registry.specs,
            },
            bindings: &mut self.registry.bindings,
            on_error: &mut self.on_error,
            settings: &self.settings,
        }
    }
}

//! optbind-demo - a small host program wired through optbind.
//!
//! Reads options from the command line, then from the file named by
//! `--config` (applied after the command line, so file values win), and
//! prints what it ended up with.

use std::cell::Cell;
use std::path::Path;
use std::process::ExitCode;

use anyhow::{Context, Result};
use tracing::debug;

use optbind::{App, Opt, SecretString, argv, auto_help, term};

/// Exit status when the user's input was rejected.
const EXIT_USAGE: u8 = 2;

const DESCRIPTION: &str = "prints the options it was given";

/// Options shared by the command line and the config file.
#[derive(Debug, Default)]
struct Greeting {
    verbose: bool,
    count: i64,
    name: Option<String>,
    password: Option<SecretString>,
}

fn init_tracing() {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .init();
}

fn register<'a>(app: &mut App<'a>, greeting: &'a mut Greeting) -> optbind::Result<()> {
    app.add(
        Opt::flag(&mut greeting.verbose)
            .short('v')
            .long("verbose")
            .describe("talk more"),
    )?
    .add(
        Opt::integer(&mut greeting.count)
            .short('n')
            .long("count")
            .describe("how many times"),
    )?
    .add(
        Opt::text(&mut greeting.name)
            .short('N')
            .long("name")
            .describe("who to greet"),
    )?
    .add(
        Opt::secret(&mut greeting.password)
            .short('p')
            .long("password")
            .describe("secret token"),
    )?;
    Ok(())
}

/// Command-line pass. `Ok(false)` means the input was rejected (and reported).
fn parse_command_line(
    greeting: &mut Greeting,
    config: &mut Option<String>,
    ask_password: &mut bool,
    help: &Cell<bool>,
) -> optbind::Result<bool> {
    let mut args = argv::os_args();
    let mut app = App::with_description(DESCRIPTION);
    register(&mut app, greeting)?;
    app.add(
        Opt::text(config)
            .short('c')
            .long("config")
            .describe("read more options from a key = value file"),
    )?
    .add(
        Opt::flag(ask_password)
            .short('a')
            .long("ask-password")
            .describe("prompt for the password"),
    )?
    .add(
        Opt::callback(|usage, token| {
            auto_help(usage, token);
            help.set(true);
        })
        .short('h')
        .long("help")
        .describe("(show this help message)"),
    )?;
    Ok(app.parse_args(&mut args).is_ok())
}

fn parse_config_file(greeting: &mut Greeting, path: &Path) -> optbind::Result<()> {
    let mut app = App::with_description(DESCRIPTION);
    app.set_program_name(env!("CARGO_BIN_NAME"));
    register(&mut app, greeting)?;
    app.parse_config_file(path)
}

fn print_greeting(greeting: &Greeting) {
    println!("verbose={}", greeting.verbose);
    println!("count={}", greeting.count);
    println!("name={}", greeting.name.as_deref().unwrap_or("<unset>"));
    println!(
        "password={}",
        if greeting.password.is_some() {
            "<set>"
        } else {
            "<unset>"
        }
    );
}

fn run() -> Result<ExitCode> {
    let mut greeting = Greeting::default();
    let mut config = None;
    let mut ask_password = false;
    let help = Cell::new(false);

    if !parse_command_line(&mut greeting, &mut config, &mut ask_password, &help)? {
        return Ok(ExitCode::from(EXIT_USAGE));
    }
    if help.get() {
        return Ok(ExitCode::SUCCESS);
    }

    if let Some(path) = config {
        debug!(path = %path, "applying config file");
        match parse_config_file(&mut greeting, Path::new(&path)) {
            Ok(()) => {}
            Err(err) if err.is_parse_failure() => return Ok(ExitCode::from(EXIT_USAGE)),
            Err(err) => {
                return Err(err).with_context(|| format!("failed to read config file {path}"));
            }
        }
    }

    if ask_password {
        greeting.password = Some(term::ask_password("Password:").context("password prompt")?);
    }

    print_greeting(&greeting);
    Ok(ExitCode::SUCCESS)
}

fn main() -> ExitCode {
    init_tracing();

    match run() {
        Ok(code) => code,
        Err(e) => {
            eprintln!("[optbind-demo] Error: {:#}", e);
            ExitCode::FAILURE
        }
    }
}

mod error;

use std::{path::PathBuf, process::ExitCode};

use bindargs::{Arguments, Banner, LoadedArguments, Parser, Value};
use indexmap::IndexMap;
use lazy_format::lazy_format;
use tracing_subscriber::{EnvFilter, fmt};

use crate::error::DemoError;

#[derive(Value, Debug, Default, Clone, Copy, PartialEq, Eq)]
enum Level {
    Quiet,
    #[default]
    Normal,
    Verbose,
    Debug,
}

#[derive(Arguments, Debug, Default)]
struct Options {
    /// Use the given build file.
    #[bindargs(short = "f")]
    buildfile: Option<PathBuf>,

    /// Use a value for the given property.
    #[bindargs(long = "D")]
    properties: IndexMap<String, String>,

    /// Displays more information during the build process.
    #[bindargs(short = "v")]
    verbose: bool,

    /// Displays only error or warning messages.
    #[bindargs(short = "q")]
    quiet: bool,

    /// Use the given type as the logger.
    #[bindargs]
    logger: Option<String>,

    /// Add an instance of the given type to the listeners.
    #[bindargs(multiple)]
    listener: Vec<String>,

    /// Write the build log to the given file.
    #[bindargs(short = "l")]
    logfile: Option<PathBuf>,

    /// The indentation level of the build output.
    #[bindargs]
    indent: u32,

    /// The level of detail to log.
    #[bindargs]
    level: Level,

    /// Suppresses display of the logo banner.
    #[bindargs]
    nologo: bool,

    #[bindargs(obsolete = "Use the -verbose argument instead.")]
    debug: bool,

    /// Prints this message.
    #[bindargs(short = "h", exclusive)]
    help: bool,

    #[bindargs(default)]
    targets: Vec<String>,
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    fmt().with_env_filter(filter).with_target(false).compact().init();
}

fn parser() -> Result<Parser<Options>, DemoError> {
    let banner = Banner::new("bindargs-demo")
        .with_version(env!("CARGO_PKG_VERSION"))
        .with_copyright("Copyright (C) the bindargs developers");

    Ok(Parser::<Options>::new()?
        .with_response_files(true)
        .with_program("bindargs-demo")
        .with_banner(banner))
}

fn run() -> Result<(), DemoError> {
    let parser = parser()?;
    let arguments = LoadedArguments::from_env();
    let mut options = Options::default();

    let parsed = arguments.parse(&parser, &mut options)?;

    if !options.nologo {
        println!("{}", parser.logo_banner());
    }

    if options.help || parsed.no_args() {
        print!("{}", parser.usage());
        return Ok(());
    }

    if options.verbose && options.quiet {
        return Err(DemoError::Conflict);
    }

    let buildfile_opt = &options.buildfile;
    let buildfile = lazy_format!(match (buildfile_opt) {
        Some(path) => ("{}", path.display()),
        None => "(search the current directory)",
    });

    println!("Build file: {buildfile}");
    println!("Targets:    {}", options.targets.join(", "));
    println!("Level:      {:?}", options.level);
    println!("Indent:     {}", options.indent);

    if let Some(logger) = &options.logger {
        println!("Logger:     {logger}");
    }

    if let Some(logfile) = &options.logfile {
        println!("Log file:   {}", logfile.display());
    }

    options
        .listener
        .iter()
        .for_each(|listener| println!("Listener:   {listener}"));

    options
        .properties
        .iter()
        .for_each(|(name, value)| println!("Property:   {name} = {value}"));

    tracing::debug!(?options, "parsed options");
    Ok(())
}

fn main() -> ExitCode {
    init_tracing();

    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            let code = err.exit_code();
            eprintln!("{:#}", anyhow::Error::new(err));
            ExitCode::from(code)
        }
    }
}

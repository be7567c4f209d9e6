use std::path::Path;

use bindargs_parser::{
    ArgumentsParser,
    response::{self, Encoding},
};

use crate::{
    Arguments, build,
    errors::{ArgumentError, ConfigurationError},
    help::Banner,
    printers,
    spec::SpecTable,
    state::ParseState,
};

/// The outcome of a successful parse.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Parsed {
    no_args: bool,
    warnings: Vec<String>,
}

impl Parsed {
    /// True if the command line contained no arguments at all (after
    /// response file expansion).
    #[inline]
    #[must_use]
    pub fn no_args(&self) -> bool {
        self.no_args
    }

    /// Warnings produced during the parse, such as uses of obsolete arguments.
    #[inline]
    #[must_use]
    pub fn warnings(&self) -> &[String] {
        &self.warnings
    }
}

/**
Parses command lines into a destination of type `D`.

A `Parser` owns the [`SpecTable`] for `D` along with some configuration,
and is immutable once built: it can be used to parse any number of command
lines, from any number of threads.
*/
#[derive(Debug)]
pub struct Parser<D> {
    table: SpecTable<D>,
    response_files: bool,
    encoding: Encoding,
    program: Option<String>,
    banner: Banner,
}

impl<D: Arguments> Parser<D> {
    /// Create a parser from the declarations on `D`.
    pub fn new() -> Result<Self, ConfigurationError> {
        D::spec_table().map(Self::from_table)
    }
}

impl<D> Parser<D> {
    /// Create a parser from an explicit table.
    #[must_use]
    pub fn from_table(table: SpecTable<D>) -> Self {
        Self {
            table,
            response_files: false,
            encoding: Encoding::default(),
            program: None,
            banner: Banner::default(),
        }
    }

    /// Treat `@path` arguments as references to response files.
    #[must_use]
    pub fn with_response_files(self, enabled: bool) -> Self {
        Self {
            response_files: enabled,
            ..self
        }
    }

    /// The encoding used for response files without a byte order mark.
    #[must_use]
    pub fn with_encoding(self, encoding: Encoding) -> Self {
        Self { encoding, ..self }
    }

    /// The program name shown in usage messages.
    #[must_use]
    pub fn with_program(self, program: impl Into<String>) -> Self {
        Self {
            program: Some(program.into()),
            ..self
        }
    }

    #[must_use]
    pub fn with_banner(self, banner: Banner) -> Self {
        Self { banner, ..self }
    }

    #[inline]
    #[must_use]
    pub fn table(&self) -> &SpecTable<D> {
        &self.table
    }

    #[inline]
    #[must_use]
    pub fn banner(&self) -> &Banner {
        &self.banner
    }

    /// The program name: whatever was configured, or else the banner's
    /// product name.
    #[must_use]
    pub fn program(&self) -> &str {
        match self.program.as_deref() {
            Some(program) => program,
            None if !self.banner.product.is_empty() => &self.banner.product,
            None => "program",
        }
    }

    /**
    Parse a command line into `destination`.

    `args` should exclude the program name. Only fields whose arguments
    appear are written; everything else keeps its current value. On error,
    some fields may already have been written.
    */
    pub fn parse<I>(&self, args: I, destination: &mut D) -> Result<Parsed, ArgumentError>
    where
        I: IntoIterator,
        I::Item: AsRef<str>,
    {
        let args: Vec<I::Item> = args.into_iter().collect();
        let mut state = ParseState::new(&self.table);

        tracing::debug!(count = args.len(), "parsing command line");
        self.load(&mut state, args.iter().map(AsRef::as_ref), args.len())?;

        let parsed = Parsed {
            no_args: !state.any_seen(),
            warnings: core::mem::take(&mut state.warnings),
        };

        build::finish(state, destination)?;
        Ok(parsed)
    }

    /// The usage message: a synopsis, followed by every argument.
    #[must_use]
    pub fn usage(&self) -> String {
        let mut out = String::new();
        // Writing into a String can't fail
        let _ = printers::print_usage(&mut out, self.program(), &self.table, self.response_files);
        out
    }

    /// The banner: product, version, copyright, and homepage.
    #[must_use]
    pub fn logo_banner(&self) -> String {
        self.banner.to_string()
    }

    /// Process a list of arguments. `count` is the length of the list, which
    /// exclusive arguments are checked against.
    fn load<'p, 'arg>(
        &'p self,
        state: &mut ParseState<'p, D>,
        args: impl Iterator<Item = &'arg str>,
        count: usize,
    ) -> Result<(), ArgumentError> {
        let mut arguments = ArgumentsParser::new(args).with_response_files(self.response_files);

        while let Some(result) = arguments.next_arg(Visitor {
            parser: self,
            state: &mut *state,
            count,
        }) {
            result?;
        }

        Ok(())
    }

    fn expand<'p>(
        &'p self,
        state: &mut ParseState<'p, D>,
        path: &Path,
    ) -> Result<(), ArgumentError> {
        if !path.exists() {
            return Err(ArgumentError::ResponseFileMissing {
                path: path.to_owned(),
            });
        }

        let tokens = response::read_tokens(path, self.encoding).map_err(|source| {
            ArgumentError::ResponseFile {
                path: path.to_owned(),
                source,
            }
        })?;

        tracing::debug!(
            path = %path.display(),
            count = tokens.len(),
            "expanding response file",
        );

        self.load(state, tokens.iter().map(String::as_str), tokens.len())
    }
}

struct Visitor<'a, 'p, D> {
    parser: &'p Parser<D>,
    state: &'a mut ParseState<'p, D>,
    count: usize,
}

impl<'arg, D> bindargs_parser::Visitor<'arg> for Visitor<'_, '_, D> {
    type Value = Result<(), ArgumentError>;

    fn visit_named(
        self,
        token: &'arg str,
        option: &'arg str,
        argument: Option<&'arg str>,
    ) -> Self::Value {
        tracing::trace!(token, option, argument, "named argument");

        let Some(index) = self.parser.table.position(option) else {
            return Err(ArgumentError::Unknown {
                token: token.to_owned(),
            });
        };

        let spec = self.state.named[index].spec();
        let name = spec.long_name();

        if let Some(obsolete) = spec.obsolete() {
            if obsolete.fatal {
                return Err(ArgumentError::Obsolete {
                    name: name.to_owned(),
                    message: obsolete.message.clone(),
                });
            }

            let warning = format!(
                "Command-line argument '-{name}' is obsolete. {}",
                obsolete.message
            );
            tracing::warn!("{warning}");
            self.state.warnings.push(warning);
        }

        if spec.is_exclusive() && self.count > 1 {
            return Err(ArgumentError::Exclusive {
                name: name.to_owned(),
            });
        }

        self.state.named[index].accept(argument)
    }

    fn visit_response_file(self, path: &'arg str) -> Self::Value {
        self.parser.expand(self.state, Path::new(path))
    }

    fn visit_positional(self, argument: &'arg str) -> Self::Value {
        tracing::trace!(argument, "positional argument");

        match self.state.default.as_mut() {
            Some(value) => value.accept(Some(argument)),
            None => Err(ArgumentError::Unknown {
                token: argument.to_owned(),
            }),
        }
    }
}

use crate::{
    errors::ArgumentError,
    from_args::{Parsed, Parser},
};

/// Helper type for loading arguments from the environment.
///
/// Arguments that aren't valid unicode are decoded lossily. The first argument
/// is taken to be the program name, and is never parsed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LoadedArguments {
    arguments: Vec<String>,
}

impl LoadedArguments {
    pub fn from_env() -> Self {
        std::env::args_os()
            .map(|arg| arg.to_string_lossy().into_owned())
            .collect()
    }

    /// The program name, if the command line had one.
    #[must_use]
    pub fn argv0(&self) -> Option<&str> {
        self.arguments.first().map(String::as_str)
    }

    /// Everything after the program name.
    #[must_use]
    pub fn args(&self) -> &[String] {
        self.arguments.get(1..).unwrap_or(&[])
    }

    pub fn parse<D>(&self, parser: &Parser<D>, destination: &mut D) -> Result<Parsed, ArgumentError> {
        parser.parse(self.args(), destination)
    }
}

impl FromIterator<String> for LoadedArguments {
    fn from_iter<I: IntoIterator<Item = String>>(iter: I) -> Self {
        Self {
            arguments: iter.into_iter().collect(),
        }
    }
}

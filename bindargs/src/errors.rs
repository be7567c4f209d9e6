/*!
Error types for everything that can go wrong in [`bindargs`][crate].

There are two families of errors. [`ConfigurationError`] is raised while
building a [`SpecTable`][crate::spec::SpecTable], and indicates a mistake in
the declarations of the destination type. [`ArgumentError`] is raised while
parsing, and indicates bad user input (or, rarely, a collection that refused
a value). Either kind aborts the whole operation.
 */

use std::{fmt::Display, io, path::PathBuf};

use joinery::JoinableIterator;
use lazy_format::lazy_format;

use crate::slot::ValueKind;

/// The declarations for a destination type are malformed. This is a
/// programming error, not bad user input.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[non_exhaustive]
pub enum ConfigurationError {
    #[error("command-line arguments must have a non-empty long name")]
    EmptyLongName,

    #[error("command-line argument name {name:?} {reason}")]
    InvalidName { name: String, reason: &'static str },

    #[error("command-line argument '-{name}' is unique, but doesn't hold multiple values")]
    UniqueWithoutMultiple { name: String },

    #[error("command-line argument '-{name}' allows multiple values, but its slot is {kind}")]
    MultipleOnSingleValue { name: String, kind: ValueKind },

    #[error("only one default argument is allowed, but both '{first}' and '{second}' are")]
    DuplicateDefault { first: String, second: String },

    #[error("command-line argument '-{name}' is declared more than once")]
    DuplicateLongName { name: String },

    #[error("short name '/{name}' is used by more than one command-line argument")]
    DuplicateShortName { name: String },
}

/// A collection refused a value while its argument was being bound.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{message}")]
pub struct AppendError {
    message: String,
}

impl AppendError {
    pub fn new(message: impl Display) -> Self {
        Self {
            message: message.to_string(),
        }
    }
}

/**
A single command-line value couldn't be converted into the type of its
destination. These always arrive wrapped in an [`ArgumentError::InvalidValue`],
available as its [`source`][std::error::Error::source].
 */
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[non_exhaustive]
pub enum ValueError {
    /// The empty string is never a valid value
    #[error("the value is empty")]
    Empty,

    /// No value was given, and the type isn't a boolean toggle
    #[error("a value is required")]
    NeedsValue,

    /// The value failed to parse
    #[error("{message}")]
    Parse { message: String },

    /// The value should have been one of these (case-insensitively)
    #[error("expected one of {}", .expected.iter().join_with(", "))]
    ShouldBe { expected: &'static [&'static str] },

    /// A key/value argument wasn't of the form `name=value`
    #[error("expected a value of the form name=value")]
    MalformedPair,

    /// A boolean toggle got something other than `+` or `-`
    #[error("expected '+' or '-'")]
    NotAToggle,
}

impl ValueError {
    pub fn parse(message: impl Display) -> Self {
        Self::Parse {
            message: message.to_string(),
        }
    }
}

fn valid_values_hint(error: &ValueError) -> impl Display + '_ {
    lazy_format!(match (error) {
        ValueError::ShouldBe { expected } => (
            " Valid values are: {values}.",
            values = expected.iter().join_with(", "),
        ),
        _ => "",
    })
}

/**
Errors that occur while parsing command-line arguments into a destination.
The first one encountered aborts the parse. Fields that were already bound
when it happened stay bound.
 */
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum ArgumentError {
    /// A named option didn't match any argument, or a positional appeared
    /// without a default argument to receive it
    #[error("Unknown argument '{token}'")]
    Unknown { token: String },

    /// A single-valued argument appeared more than once
    #[error("Duplicate argument '-{name}'")]
    Duplicate { name: String },

    /// A unique multi-valued argument got the same value (or key) twice
    #[error("Duplicate value '{value}' for command-line argument '-{name}'.")]
    DuplicateValue { name: String, value: String },

    /// The value couldn't be converted to the destination type
    #[error(
        "Invalid value '{token}' for command-line argument '-{name}'.{}",
        valid_values_hint(.source)
    )]
    InvalidValue {
        name: String,
        token: String,
        source: ValueError,
    },

    /// A required argument never appeared
    #[error("Missing required argument '-{name}'.")]
    Missing { name: String },

    /// An exclusive argument appeared alongside other arguments
    #[error("Command-line argument '-{name}' cannot be combined with other arguments.")]
    Exclusive { name: String },

    /// An `@file` reference named a file that doesn't exist
    #[error("Response file '{}' does not exist.", .path.display())]
    ResponseFileMissing { path: PathBuf },

    /// An `@file` reference couldn't be read or decoded
    #[error("Unable to read response file '{}'.", .path.display())]
    ResponseFile { path: PathBuf, source: io::Error },

    /// An obsolete argument was used, and its obsolescence is fatal
    #[error("Command-line argument '-{name}' is obsolete. {message}")]
    Obsolete { name: String, message: String },

    /// A collection-based argument couldn't be bound into its destination
    #[error("Command-line argument '-{name}' could not be bound into its collection.")]
    NotSupported { name: String, source: AppendError },
}

impl ArgumentError {
    /// The long name of the argument this error is about, if there is one.
    #[must_use]
    pub fn argument_name(&self) -> Option<&str> {
        match self {
            Self::Duplicate { name }
            | Self::DuplicateValue { name, .. }
            | Self::InvalidValue { name, .. }
            | Self::Missing { name }
            | Self::Exclusive { name }
            | Self::Obsolete { name, .. }
            | Self::NotSupported { name, .. } => Some(name),
            Self::Unknown { .. } | Self::ResponseFileMissing { .. } | Self::ResponseFile { .. } => {
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::error::Error as _;

    use super::*;

    #[test]
    fn invalid_value_lists_legal_names() {
        let error = ArgumentError::InvalidValue {
            name: "level".to_owned(),
            token: "loud".to_owned(),
            source: ValueError::ShouldBe {
                expected: &["Quiet", "Normal", "Verbose"],
            },
        };

        assert_eq!(
            error.to_string(),
            "Invalid value 'loud' for command-line argument '-level'. \
            Valid values are: Quiet, Normal, Verbose."
        );
        assert!(error.source().is_some());
    }

    #[test]
    fn invalid_value_without_hint() {
        let error = ArgumentError::InvalidValue {
            name: "indent".to_owned(),
            token: "x".to_owned(),
            source: ValueError::parse("invalid digit found in string"),
        };

        assert_eq!(
            error.to_string(),
            "Invalid value 'x' for command-line argument '-indent'."
        );
        assert_eq!(
            error.source().map(|source| source.to_string()),
            Some("invalid digit found in string".to_owned())
        );
    }
}

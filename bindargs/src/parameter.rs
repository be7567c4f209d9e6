use core::{any, fmt, str::FromStr};

use crate::errors::ValueError;

/**
The value syntax of an argument, as shown in usage messages. Each variant
renders as the suffix that follows the option name, so `-out` with a
[`Placeholder::File`] is shown as `-out:<filename>`.
*/
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Placeholder {
    /// `[+|-]`: a boolean toggle
    Toggle,

    /// `:<text>`
    Text,

    /// `:<filename>`
    File,

    /// `:<number>`
    Number,

    /// `:<n>=<v>`: a key/value pair
    Pair,

    /// `:<Name>`, for everything else
    Named(&'static str),
}

impl Placeholder {
    /// The fallback placeholder for a type: its unqualified type name.
    #[must_use]
    pub fn of<T: ?Sized>() -> Self {
        let name = any::type_name::<T>();
        let name = name.split('<').next().unwrap_or(name);

        Self::Named(name.rsplit("::").next().unwrap_or(name))
    }
}

impl fmt::Display for Placeholder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            Placeholder::Toggle => f.write_str("[+|-]"),
            Placeholder::Text => f.write_str(":<text>"),
            Placeholder::File => f.write_str(":<filename>"),
            Placeholder::Number => f.write_str(":<number>"),
            Placeholder::Pair => f.write_str(":<n>=<v>"),
            Placeholder::Named(name) => write!(f, ":<{name}>"),
        }
    }
}

/**
A type that can be converted from a single command-line value.

Types that implement [`Value`] can be used directly as argument fields, as
[`Option`]s, or as the elements of collections and arrays. Most types will
want to implement [`ParsedValue`] instead, which derives a [`Value`] from a
[`FromStr`] implementation, or use `#[derive(Value)]` for enums and newtypes.
*/
pub trait Value: Sized {
    /// Set for types that act as `+`/`-` toggles and accept a missing value.
    /// This is what makes a field a boolean argument.
    const TOGGLE: bool = false;

    /// Convert a value from the command line. The value is never empty.
    fn from_arg(arg: &str) -> Result<Self, ValueError>;

    /// The argument appeared without any value, like `-verbose`. Only
    /// toggles should accept this.
    #[inline]
    fn from_absent() -> Result<Self, ValueError> {
        Err(ValueError::NeedsValue)
    }

    /// The value syntax shown in usage messages.
    #[inline]
    fn placeholder() -> Placeholder {
        Placeholder::of::<Self>()
    }
}

/// For types with a [`FromStr`] implementation, [`ParsedValue`] automatically
/// gives them a [`Value`] implementation so that they can be used as
/// command line arguments.
pub trait ParsedValue: FromStr {
    #[inline]
    fn placeholder() -> Placeholder {
        Placeholder::of::<Self>()
    }
}

impl<T> Value for T
where
    T: ParsedValue,
    T::Err: fmt::Display,
{
    #[inline]
    fn from_arg(arg: &str) -> Result<Self, ValueError> {
        arg.parse().map_err(ValueError::parse)
    }

    #[inline]
    fn placeholder() -> Placeholder {
        <T as ParsedValue>::placeholder()
    }
}

/// Convert a possibly-absent value.
#[inline]
pub(crate) fn coerce<T: Value>(value: Option<&str>) -> Result<T, ValueError> {
    match value {
        None => T::from_absent(),
        Some(value) => T::from_arg(value),
    }
}

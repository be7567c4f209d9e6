#![no_std]

/*!
Low-level implementation of argument handling. Takes care of distinguishing
named options, response file references, and positionals, and of splitting
raw text into tokens. No type handling happens here. Usually this is too low
level to use directly.
*/

extern crate alloc;

#[cfg(feature = "std")]
extern crate std;

mod split;

#[cfg(feature = "std")]
pub mod response;

pub use split::{Split, split};

/**
The [`ArgumentsParser`] type operates by passing arguments it finds into a
[`Visitor`], to be handled.
 */
pub trait Visitor<'arg> {
    type Value;

    /**
    A named option, such as `-verbose`, `/out:file.txt`, or `-debug+`.

    `token` is the complete argument as it appeared on the command line.
    `option` is the name, without the leading `-` or `/`. `argument` is the
    value, if any: everything after a `:` directly following the name, or
    otherwise whatever followed the name verbatim (so `-debug+` has the
    argument `+`).
    */
    fn visit_named(
        self,
        token: &'arg str,
        option: &'arg str,
        argument: Option<&'arg str>,
    ) -> Self::Value;

    /// A response file reference, such as `@options.rsp`. The path excludes
    /// the leading `@`. Only produced when response files are enabled.
    fn visit_response_file(self, path: &'arg str) -> Self::Value;

    /// A positional parameter.
    fn visit_positional(self, argument: &'arg str) -> Self::Value;
}

/**
An `ArgumentsParser` is the main entry point into `bindargs_parser`. It
classifies arguments in each call to `next_arg`, sending them to the given
[`Visitor`]. Empty arguments are skipped entirely.

[bindargs-parser][crate] operates entirely on borrowed data. The ubiquitous
`'arg` lifetime refers to this borrowed command line data.
*/
#[derive(Debug, Clone)]
pub struct ArgumentsParser<I> {
    args: I,
    response_files: bool,
}

impl<'arg, I> ArgumentsParser<I>
where
    I: Iterator<Item = &'arg str>,
{
    /**
    Create a new [`ArgumentsParser`] from an iterator of string slices, where
    each one is a single argument. This list should *exclude* the name of the
    program. Response file references are not recognized unless enabled with
    [`with_response_files`][Self::with_response_files].
     */
    #[inline]
    #[must_use]
    pub fn new(args: impl IntoIterator<IntoIter = I>) -> Self {
        Self {
            args: args.into_iter(),
            response_files: false,
        }
    }

    /// Treat arguments starting with `@` as response file references. When
    /// disabled, they're ordinary positionals.
    #[inline]
    #[must_use]
    pub fn with_response_files(self, enabled: bool) -> Self {
        Self {
            response_files: enabled,
            ..self
        }
    }

    pub fn next_arg<V>(&mut self, visitor: V) -> Option<V::Value>
    where
        V: Visitor<'arg>,
    {
        let argument = loop {
            match self.args.next()? {
                "" => continue,
                argument => break argument,
            }
        };

        Some(match argument.as_bytes() {
            [b'-' | b'/', ..] => {
                let (option, value) = split_option(argument);
                visitor.visit_named(argument, option, value)
            }
            [b'@', ..] if self.response_files => visitor.visit_response_file(&argument[1..]),
            _ => visitor.visit_positional(argument),
        })
    }
}

/**
Split a named option token (which must start with `-` or `/`) into the option
name and its argument.

The name runs up to the first `:`, `+`, or `-` after the prefix. A `:`
directly after the name introduces the argument; any other trailing text is
the argument verbatim.
*/
#[must_use]
pub fn split_option(token: &str) -> (&str, Option<&str>) {
    debug_assert!(token.starts_with(['-', '/']));

    let body = &token[1..];

    match memchr::memchr3(b':', b'+', b'-', body.as_bytes()) {
        None => (body, None),
        Some(end) => {
            let (option, rest) = body.split_at(end);
            match rest.strip_prefix(':') {
                Some(argument) => (option, Some(argument)),
                None => (option, Some(rest)),
            }
        }
    }
}

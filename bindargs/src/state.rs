/*!
The in-progress state of a single parse: which arguments have been seen, and
the values buffered for each of them.
*/

use crate::{
    errors::{ArgumentError, ValueError},
    slot::AcceptError,
    spec::{ArgumentSpec, Buffer, SpecTable},
};

/// The state of one argument during a parse.
pub struct ArgumentValue<'a, D> {
    spec: &'a ArgumentSpec<D>,
    seen: bool,
    buffer: Box<dyn Buffer<D>>,
}

impl<'a, D> ArgumentValue<'a, D> {
    pub(crate) fn new(spec: &'a ArgumentSpec<D>) -> Self {
        Self {
            spec,
            seen: false,
            buffer: spec.new_buffer(),
        }
    }

    #[inline]
    #[must_use]
    pub fn spec(&self) -> &'a ArgumentSpec<D> {
        self.spec
    }

    /// True once the argument has appeared at least once.
    #[inline]
    #[must_use]
    pub fn seen(&self) -> bool {
        self.seen
    }

    /// Accept one occurrence of this argument. `value` is `None` if it
    /// appeared with no value at all.
    pub fn accept(&mut self, value: Option<&str>) -> Result<(), ArgumentError> {
        let spec = self.spec;
        let name = spec.long_name();

        if self.seen && !spec.allows_multiple() {
            return Err(ArgumentError::Duplicate {
                name: name.to_owned(),
            });
        }

        self.seen = true;

        let result = match value {
            Some("") => Err(AcceptError::Invalid(ValueError::Empty)),
            value => self.buffer.accept(value, spec.is_unique()),
        };

        result.map_err(|error| match error {
            AcceptError::Invalid(source) => ArgumentError::InvalidValue {
                name: name.to_owned(),
                token: value.unwrap_or_default().to_owned(),
                source,
            },
            AcceptError::DuplicateValue(value) => ArgumentError::DuplicateValue {
                name: name.to_owned(),
                value,
            },
        })
    }

    pub(crate) fn into_parts(self) -> (&'a ArgumentSpec<D>, bool, Box<dyn Buffer<D>>) {
        (self.spec, self.seen, self.buffer)
    }
}

/// The state of every argument in a [`SpecTable`] during a parse.
pub struct ParseState<'a, D> {
    pub(crate) named: Vec<ArgumentValue<'a, D>>,
    pub(crate) default: Option<ArgumentValue<'a, D>>,
    pub(crate) warnings: Vec<String>,
}

impl<'a, D> ParseState<'a, D> {
    #[must_use]
    pub fn new(table: &'a SpecTable<D>) -> Self {
        Self {
            named: table.named().iter().map(ArgumentValue::new).collect(),
            default: table.default_argument().map(ArgumentValue::new),
            warnings: Vec::new(),
        }
    }

    /// True if any argument, named or positional, has been seen.
    #[must_use]
    pub fn any_seen(&self) -> bool {
        self.named.iter().chain(&self.default).any(ArgumentValue::seen)
    }

    /// Warnings produced so far, such as uses of obsolete arguments.
    #[inline]
    #[must_use]
    pub fn warnings(&self) -> &[String] {
        &self.warnings
    }
}

/*!
Slots are the destination fields that arguments are bound into.

Every field type that can hold an argument implements [`Slot`], which
describes how the field's values are buffered during a parse and how that
buffer is finally written into the field. Plain [`Value`] types, `Option`s
of them, boxed slices, the standard sequence and set collections, and
string-keyed maps are all slots.

User-defined collections can become slots by implementing [`Sequence`] or
[`PairMap`] and delegating to the helpers in [`sequence`] or [`pairs`].
*/

use core::fmt;

use crate::{
    errors::{AppendError, ValueError},
    parameter::{Placeholder, Value, coerce},
};

/// The shape of a slot, which decides how many values its argument accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueKind {
    /// A single value
    Scalar,

    /// A single `+`/`-` toggle, which also accepts no value at all
    Boolean,

    /// A fixed-size array, replaced wholesale at the end of a parse
    Array,

    /// A growable collection, appended to in command-line order
    OrderedCollection,

    /// A string map, populated from `name=value` pairs
    KeyValueMap,
}

impl ValueKind {
    /// True for the kinds that can receive more than one value.
    #[inline]
    #[must_use]
    pub const fn is_multi_valued(self) -> bool {
        matches!(
            self,
            ValueKind::Array | ValueKind::OrderedCollection | ValueKind::KeyValueMap
        )
    }
}

impl fmt::Display for ValueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            ValueKind::Scalar => "a single value",
            ValueKind::Boolean => "a boolean toggle",
            ValueKind::Array => "an array",
            ValueKind::OrderedCollection => "a collection",
            ValueKind::KeyValueMap => "a key/value map",
        })
    }
}

/// Errors from buffering a single value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AcceptError {
    /// The value couldn't be converted
    Invalid(ValueError),

    /// The slot is unique, and already holds this value (or, for maps, this
    /// key)
    DuplicateValue(String),
}

impl From<ValueError> for AcceptError {
    #[inline]
    fn from(error: ValueError) -> Self {
        Self::Invalid(error)
    }
}

/**
A field type that arguments can be bound into.

Values are collected into a [`Buffer`][Slot::Buffer] while the command line
is processed, and only written into the field by [`bind`][Slot::bind] once
every argument has been accepted. A slot whose argument never appeared is
never bound, so it keeps whatever value it had before the parse.
*/
pub trait Slot: Sized + 'static {
    const KIND: ValueKind;

    type Buffer: Default + 'static;

    /// The value syntax shown in usage messages.
    fn placeholder() -> Placeholder;

    /// For multi-valued slots, the name of the element type.
    #[inline]
    fn element_type() -> Option<&'static str> {
        None
    }

    /// Convert and buffer a single value. `value` is `None` when the argument
    /// appeared without one, and is otherwise never empty.
    fn accept(
        buffer: &mut Self::Buffer,
        value: Option<&str>,
        unique: bool,
    ) -> Result<(), AcceptError>;

    /// Write the buffered values into the field.
    fn bind(&mut self, buffer: Self::Buffer) -> Result<(), AppendError>;
}

impl<T: Value + 'static> Slot for T {
    const KIND: ValueKind = if T::TOGGLE {
        ValueKind::Boolean
    } else {
        ValueKind::Scalar
    };

    type Buffer = Option<T>;

    #[inline]
    fn placeholder() -> Placeholder {
        T::placeholder()
    }

    #[inline]
    fn accept(buffer: &mut Option<T>, value: Option<&str>, _unique: bool) -> Result<(), AcceptError> {
        *buffer = Some(coerce(value)?);
        Ok(())
    }

    #[inline]
    fn bind(&mut self, buffer: Option<T>) -> Result<(), AppendError> {
        if let Some(value) = buffer {
            *self = value;
        }

        Ok(())
    }
}

impl<T: Value + 'static> Slot for Option<T> {
    const KIND: ValueKind = <T as Slot>::KIND;

    type Buffer = Option<T>;

    #[inline]
    fn placeholder() -> Placeholder {
        T::placeholder()
    }

    #[inline]
    fn accept(buffer: &mut Option<T>, value: Option<&str>, _unique: bool) -> Result<(), AcceptError> {
        *buffer = Some(coerce(value)?);
        Ok(())
    }

    #[inline]
    fn bind(&mut self, buffer: Option<T>) -> Result<(), AppendError> {
        if let Some(value) = buffer {
            *self = Some(value);
        }

        Ok(())
    }
}

impl<T: Value + PartialEq + 'static> Slot for Box<[T]> {
    const KIND: ValueKind = ValueKind::Array;

    type Buffer = Vec<T>;

    #[inline]
    fn placeholder() -> Placeholder {
        T::placeholder()
    }

    #[inline]
    fn element_type() -> Option<&'static str> {
        Some(core::any::type_name::<T>())
    }

    #[inline]
    fn accept(buffer: &mut Vec<T>, value: Option<&str>, unique: bool) -> Result<(), AcceptError> {
        sequence::accept(buffer, value, unique)
    }

    /// Arrays are always replaced by exactly the values that were given.
    #[inline]
    fn bind(&mut self, buffer: Vec<T>) -> Result<(), AppendError> {
        *self = buffer.into_boxed_slice();
        Ok(())
    }
}

/// A growable collection of values, such as a [`Vec`] or a set.
pub trait Sequence: 'static {
    type Item: Value + PartialEq;

    fn append(&mut self, item: Self::Item) -> Result<(), AppendError>;
}

/// A collection of string key/value pairs, such as a [`HashMap`][std::collections::HashMap].
pub trait PairMap: 'static {
    /// Insert a pair. Inserting an existing name replaces its value.
    fn append_pair(&mut self, name: String, value: String) -> Result<(), AppendError>;
}

/// Helpers for implementing [`Slot`] on a [`Sequence`].
pub mod sequence {
    use super::*;

    pub fn accept<T: Value + PartialEq>(
        buffer: &mut Vec<T>,
        value: Option<&str>,
        unique: bool,
    ) -> Result<(), AcceptError> {
        let item: T = coerce(value)?;

        if unique && buffer.contains(&item) {
            return Err(AcceptError::DuplicateValue(value.unwrap_or_default().to_owned()));
        }

        buffer.push(item);
        Ok(())
    }

    /// Append the buffered items in the order they appeared. Existing
    /// contents of the collection are kept.
    pub fn bind<S: Sequence>(slot: &mut S, buffer: Vec<S::Item>) -> Result<(), AppendError> {
        buffer.into_iter().try_for_each(|item| slot.append(item))
    }
}

/// Helpers for implementing [`Slot`] on a [`PairMap`].
pub mod pairs {
    use super::*;

    /// Split a `name=value` pair at the first `=`. The name must not be
    /// empty, but the value may be.
    pub fn split_pair(raw: &str) -> Result<(&str, &str), ValueError> {
        match raw.split_once('=') {
            Some(("", _)) | None => Err(ValueError::MalformedPair),
            Some(pair) => Ok(pair),
        }
    }

    pub fn accept(
        buffer: &mut Vec<(String, String)>,
        value: Option<&str>,
        unique: bool,
    ) -> Result<(), AcceptError> {
        let raw = value.ok_or(ValueError::NeedsValue)?;
        let (name, value) = split_pair(raw)?;

        if unique && buffer.iter().any(|(existing, _)| existing == name) {
            return Err(AcceptError::DuplicateValue(name.to_owned()));
        }

        buffer.push((name.to_owned(), value.to_owned()));
        Ok(())
    }

    pub fn bind<M: PairMap>(map: &mut M, buffer: Vec<(String, String)>) -> Result<(), AppendError> {
        buffer
            .into_iter()
            .try_for_each(|(name, value)| map.append_pair(name, value))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kinds() {
        assert_eq!(<bool as Slot>::KIND, ValueKind::Boolean);
        assert_eq!(<Option<bool> as Slot>::KIND, ValueKind::Boolean);
        assert_eq!(<i32 as Slot>::KIND, ValueKind::Scalar);
        assert_eq!(<Box<[i32]> as Slot>::KIND, ValueKind::Array);
        assert!(!ValueKind::Boolean.is_multi_valued());
        assert!(ValueKind::KeyValueMap.is_multi_valued());
    }

    #[test]
    fn pairs_split_at_first_equals() {
        assert_eq!(pairs::split_pair("a=b=c"), Ok(("a", "b=c")));
        assert_eq!(pairs::split_pair("a="), Ok(("a", "")));
        assert_eq!(pairs::split_pair("=b"), Err(ValueError::MalformedPair));
        assert_eq!(pairs::split_pair("ab"), Err(ValueError::MalformedPair));
    }

    #[test]
    fn unique_sequence_rejects_repeats() {
        let mut buffer: Vec<String> = Vec::new();

        sequence::accept(&mut buffer, Some("a"), true).unwrap();
        sequence::accept(&mut buffer, Some("b"), true).unwrap();
        assert_eq!(
            sequence::accept(&mut buffer, Some("a"), true),
            Err(AcceptError::DuplicateValue("a".to_owned()))
        );
        sequence::accept(&mut buffer, Some("a"), false).unwrap();

        assert_eq!(buffer, ["a", "b", "a"]);
    }

    #[test]
    fn untouched_scalar_keeps_its_value() {
        let mut slot = 7_u32;
        slot.bind(None).unwrap();
        assert_eq!(slot, 7);

        slot.bind(Some(3)).unwrap();
        assert_eq!(slot, 3);
    }

    #[test]
    fn arrays_are_replaced() {
        let mut slot: Box<[u8]> = Box::new([1, 2, 3]);
        slot.bind(vec![9]).unwrap();
        assert_eq!(&*slot, [9]);
    }
}

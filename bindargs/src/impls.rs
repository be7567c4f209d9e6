/*!
Implementations of the [`parameter`][crate::parameter] and
[`slot`][crate::slot] traits for various primitive and standard library types
 */

use core::hash::Hash;

use crate::{
    errors::{AppendError, ValueError},
    parameter::{ParsedValue, Placeholder, Value},
    slot::{AcceptError, PairMap, Sequence, Slot, ValueKind, pairs, sequence},
};

macro_rules! from_str {
    ($(
        $placeholder:ident: $(
            $type:ident $($(::$path:ident)*,)?
        )*
    );* $(;)?) => {
        $($(
            impl ParsedValue for $type $($(:: $path)*)? {
                #[inline]
                fn placeholder() -> Placeholder {
                    from_str!(@placeholder $placeholder $type $($(:: $path)*)?)
                }
            }
        )*)*
    };

    (@placeholder Named $($type:tt)*) => { Placeholder::of::<$($type)*>() };
    (@placeholder $placeholder:ident $($type:tt)*) => { Placeholder::$placeholder };
}

from_str! {
    Number:
        u8 u16 u32 u64 u128 usize
        i8 i16 i32 i64 i128 isize
        f32 f64;

    Named:
        char

        std::net::Ipv4Addr,
        std::net::Ipv6Addr,
        std::net::IpAddr,
        std::net::SocketAddrV4,
        std::net::SocketAddrV6,
        std::net::SocketAddr,;

    Text: std::string::String,;

    File: std::path::PathBuf,;
}

impl Value for bool {
    const TOGGLE: bool = true;

    #[inline]
    fn from_arg(arg: &str) -> Result<Self, ValueError> {
        match arg {
            "+" => Ok(true),
            "-" => Ok(false),
            _ => Err(ValueError::NotAToggle),
        }
    }

    #[inline]
    fn from_absent() -> Result<Self, ValueError> {
        Ok(true)
    }

    #[inline]
    fn placeholder() -> Placeholder {
        Placeholder::Toggle
    }
}

macro_rules! collections {
    (
        $($type:ident $(:: $path:ident)* [T $(: $($bounds:tt)+)?] .$insert:ident),+ $(,)?
    ) => {
        $(
            impl<T> Sequence for $type $(::$path)* <T>
            where
                T: Value + PartialEq + 'static $(+ $($bounds)+)?,
            {
                type Item = T;

                #[inline]
                fn append(&mut self, item: T) -> Result<(), AppendError> {
                    self.$insert(item);
                    Ok(())
                }
            }

            impl<T> Slot for $type $(::$path)* <T>
            where
                T: Value + PartialEq + 'static $(+ $($bounds)+)?,
            {
                const KIND: ValueKind = ValueKind::OrderedCollection;

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

                #[inline]
                fn bind(&mut self, buffer: Vec<T>) -> Result<(), AppendError> {
                    sequence::bind(self, buffer)
                }
            }
        )+
    }
}

collections! {
    std::vec::Vec[T] .push,
    std::collections::VecDeque[T] .push_back,
    std::collections::LinkedList[T] .push_back,
    std::collections::BTreeSet[T: Ord] .insert,
    std::collections::HashSet[T: Eq + Hash] .insert,
    indexmap::IndexSet[T: Eq + Hash] .insert,
}

macro_rules! maps {
    ($($type:ident $(:: $path:ident)*),+ $(,)?) => {
        $(
            impl PairMap for $type $(::$path)* <String, String> {
                #[inline]
                fn append_pair(&mut self, name: String, value: String) -> Result<(), AppendError> {
                    self.insert(name, value);
                    Ok(())
                }
            }

            impl Slot for $type $(::$path)* <String, String> {
                const KIND: ValueKind = ValueKind::KeyValueMap;

                type Buffer = Vec<(String, String)>;

                #[inline]
                fn placeholder() -> Placeholder {
                    Placeholder::Pair
                }

                #[inline]
                fn element_type() -> Option<&'static str> {
                    Some(core::any::type_name::<String>())
                }

                #[inline]
                fn accept(buffer: &mut Self::Buffer, value: Option<&str>, unique: bool) -> Result<(), AcceptError> {
                    pairs::accept(buffer, value, unique)
                }

                #[inline]
                fn bind(&mut self, buffer: Self::Buffer) -> Result<(), AppendError> {
                    pairs::bind(self, buffer)
                }
            }
        )+
    };
}

maps! {
    std::collections::BTreeMap,
    std::collections::HashMap,
    indexmap::IndexMap,
}

#[cfg(test)]
mod tests {
    use std::{collections::BTreeSet, net::Ipv4Addr, path::PathBuf};

    use indexmap::IndexMap;

    use super::*;

    #[test]
    fn toggles() {
        assert_eq!(bool::from_absent(), Ok(true));
        assert_eq!(bool::from_arg("+"), Ok(true));
        assert_eq!(bool::from_arg("-"), Ok(false));
        assert_eq!(bool::from_arg("true"), Err(ValueError::NotAToggle));
    }

    #[test]
    fn parsed_values() {
        assert_eq!(i32::from_arg("-12"), Ok(-12));
        assert!(matches!(u8::from_arg("300"), Err(ValueError::Parse { .. })));
        assert_eq!(String::from_absent(), Err(ValueError::NeedsValue));
        assert_eq!(
            Ipv4Addr::from_arg("127.0.0.1"),
            Ok(Ipv4Addr::new(127, 0, 0, 1))
        );
    }

    #[test]
    fn placeholders() {
        assert_eq!(<bool as Value>::placeholder(), Placeholder::Toggle);
        assert_eq!(<u16 as Value>::placeholder(), Placeholder::Number);
        assert_eq!(<String as Value>::placeholder(), Placeholder::Text);
        assert_eq!(<PathBuf as Value>::placeholder(), Placeholder::File);
        assert_eq!(
            <Ipv4Addr as Value>::placeholder(),
            Placeholder::Named("Ipv4Addr")
        );
        assert_eq!(
            <Vec<PathBuf> as Slot>::placeholder(),
            Placeholder::File
        );
        assert_eq!(
            <IndexMap<String, String> as Slot>::placeholder(),
            Placeholder::Pair
        );
    }

    #[test]
    fn sets_bind_in_order() {
        let mut set = BTreeSet::from([5]);
        let mut buffer = Vec::new();

        for value in ["3", "1", "3"] {
            <BTreeSet<u32> as Slot>::accept(&mut buffer, Some(value), false).unwrap();
        }

        set.bind(buffer).unwrap();
        assert_eq!(set.into_iter().collect::<Vec<_>>(), [1, 3, 5]);
    }

    #[test]
    fn maps_reject_repeated_keys_when_unique() {
        let mut buffer = Vec::new();
        type Map = IndexMap<String, String>;

        Map::accept(&mut buffer, Some("a=1"), true).unwrap();
        Map::accept(&mut buffer, Some("b=x=y"), true).unwrap();
        assert_eq!(
            Map::accept(&mut buffer, Some("a=2"), true),
            Err(AcceptError::DuplicateValue("a".to_owned()))
        );
        assert_eq!(
            Map::accept(&mut buffer, Some("novalue"), true),
            Err(AcceptError::Invalid(ValueError::MalformedPair))
        );

        let mut map = Map::new();
        map.bind(buffer).unwrap();
        assert_eq!(map["a"], "1");
        assert_eq!(map["b"], "x=y");
        assert_eq!(map.keys().collect::<Vec<_>>(), ["a", "b"]);
    }
}

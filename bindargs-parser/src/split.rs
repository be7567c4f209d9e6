use alloc::string::String;
use core::{iter::FusedIterator, str::Chars};

/**
Split `raw` into tokens at any of the `delimiters`.

A `"` toggles a quoted run, inside of which delimiters are ordinary
characters. The quotes themselves are dropped. Empty tokens are discarded, and
an unmatched quote simply leaves the rest of the input quoted.

```
use bindargs_parser::split;

let tokens: Vec<String> = split(r#""a b" c"#, &[' ']).collect();
assert_eq!(tokens, ["a b", "c"]);
```
*/
#[inline]
#[must_use]
pub fn split<'a>(raw: &'a str, delimiters: &'a [char]) -> Split<'a> {
    Split {
        chars: raw.chars(),
        delimiters,
    }
}

/// Iterator over the tokens of a string. Created by [`split`].
#[derive(Debug, Clone)]
pub struct Split<'a> {
    chars: Chars<'a>,
    delimiters: &'a [char],
}

impl Iterator for Split<'_> {
    type Item = String;

    fn next(&mut self) -> Option<String> {
        let mut token = String::new();
        let mut quoted = false;

        // A token never ends inside a quoted run, so `quoted` is per token
        for c in self.chars.by_ref() {
            match c {
                '"' => quoted = !quoted,
                c if !quoted && self.delimiters.contains(&c) => {
                    if !token.is_empty() {
                        return Some(token);
                    }
                }
                c => token.push(c),
            }
        }

        (!token.is_empty()).then_some(token)
    }
}

impl FusedIterator for Split<'_> {}

/*!
A declarative command-line binder. Declare a plain struct, annotate its
fields, and `bindargs` fills it in from `-name:value` style command lines.

```
use bindargs::{Arguments, Parser};

#[derive(Arguments, Default)]
struct Options {
    /// Print more output
    #[bindargs(short = "v")]
    verbose: bool,

    #[bindargs(long = "inc")]
    include: Vec<String>,

    #[bindargs(default)]
    files: Vec<String>,
}

let parser = Parser::<Options>::new().unwrap();
let mut options = Options::default();

parser
    .parse(["-v", "-inc:lib", "main.src", "-inc:vendor"], &mut options)
    .unwrap();

assert!(options.verbose);
assert_eq!(options.include, ["lib", "vendor"]);
assert_eq!(options.files, ["main.src"]);
```

Options are written `-name`, `-name:value`, `-name+` or `-name-` (with `/`
working as well as `-`), and anything that doesn't start with `-` or `/` is a
positional parameter, which goes to the struct's default argument. Response
files, enabled with [`Parser::with_response_files`], are referenced as
`@path` and contain more arguments, one or more per line.

The type of each field decides how its argument behaves:

- [`bool`] fields are toggles: `-name` and `-name+` set them, `-name-` clears
  them.
- Fields of any [`Value`][parameter::Value] type take exactly one value.
- Boxed slices, [`Vec`]s, sets, and other sequences take any number of
  values. By default each value may appear only once.
- String maps take `-name:key=value` pairs.

Fields whose arguments don't appear keep whatever value they already had, so
defaults are just the initial values of the struct. Boxed slices are the
exception: they always end up holding exactly the values that were given.
*/

pub mod arguments;
pub mod build;
pub mod errors;
pub mod from_args;
pub mod help;
mod impls;
pub mod parameter;
mod printers;
pub mod slot;
pub mod spec;
pub mod state;

pub use bindargs_derive::{Arguments, Value};
pub use bindargs_parser::response::Encoding;

pub use crate::{
    arguments::LoadedArguments,
    errors::{ArgumentError, ConfigurationError},
    from_args::{Parsed, Parser},
    help::Banner,
};

use crate::spec::{SpecTable, SpecTableBuilder};

/**
A type whose fields can be bound to command-line arguments. Usually this is
derived with `#[derive(Arguments)]`.

Implementations add one [`ArgumentSpec`][spec::ArgumentSpec] per field to the
table, in declaration order.
*/
pub trait Arguments: Sized + 'static {
    fn declare(table: &mut SpecTableBuilder<Self>) -> Result<(), ConfigurationError>;

    /// Build the complete argument table for this type.
    fn spec_table() -> Result<SpecTable<Self>, ConfigurationError> {
        let mut table = SpecTable::builder();
        Self::declare(&mut table)?;
        Ok(table.build())
    }
}

use core::fmt::{self, Display, Write};

use indent_write::fmt::IndentWriter;
use lazy_format::lazy_format;

use crate::{
    help::Banner,
    spec::{ArgumentSpec, SpecTable},
};

/// Width of the column holding option names, not counting the leading `-`.
const TAG_WIDTH: usize = 30;

/// Wrapping width for descriptions.
const DESCRIPTION_WIDTH: usize = 47;

/*
Overall structure:

Usage : command [options] <target> <target> ...
Options :

  -option:<text>                 Description, which wraps onto
                                 more lines if it's long.
  -v[erbose]                     Another description.
  @<file>                        Insert command-line settings from a text file.

 */
pub fn print_usage<D>(
    out: &mut impl Write,
    program: &str,
    table: &SpecTable<D>,
    response_files: bool,
) -> fmt::Result {
    let default = table
        .default_argument()
        .map(|spec| (spec.long_name(), spec.allows_multiple()));

    let synopsis = lazy_format!(match (default) {
        None => "",
        Some((name, false)) => " <{name}>",
        Some((name, true)) => " <{name}> <{name}> ...",
    });

    writeln!(out, "Usage : {program} [options]{synopsis}")?;

    section(out, "Options :", |mut out| {
        table
            .named()
            .iter()
            .try_for_each(|spec| print_option(&mut out, spec))?;

        if response_files {
            describe(
                &mut out,
                "@<file>",
                "Insert command-line settings from a text file.",
            )?;
        }

        Ok(())
    })
}

/// Write a section by writing the `header`, a blank line, and then an
/// indented `body`.
fn section<O: Write + ?Sized, T>(
    out: &mut O,
    header: &str,
    body: impl FnOnce(IndentWriter<&mut O>) -> Result<T, fmt::Error>,
) -> Result<T, fmt::Error> {
    writeln!(out, "{header}\n")?;
    body(IndentWriter::new("  ", out))
}

fn print_option<D>(out: &mut (impl Write + ?Sized), spec: &ArgumentSpec<D>) -> fmt::Result {
    let long = spec.long_name();
    let short = spec.short_name();

    // `-v[erbose]` when the short name is a prefix of the long one
    let prefix = short.filter(|&short| short != long && long.starts_with(short));

    let name = lazy_format!(match (prefix) {
        Some(short) => ("{short}[{rest}]", rest = &long[short.len()..]),
        None => "{long}",
    });

    let placeholder = spec.placeholder();
    let tag = lazy_format!("-{name}{placeholder}");

    let description = spec.description().unwrap_or_default();
    let separator = if description.is_empty() { "" } else { " " };
    let short_format = lazy_format!(match ((prefix, short)) {
        (None, Some(short)) => "{separator}(Short format: /{short})",
        _ => "",
    });

    describe(out, tag, lazy_format!("{description}{short_format}"))
}

/// Print an item in the tag column, followed by its wrapped description.
/// Items too wide for the column put their description on the next line.
fn describe(
    out: &mut (impl Write + ?Sized),
    item: impl Display,
    description: impl Display,
) -> fmt::Result {
    let item = item.to_string();
    let description = description.to_string();
    let mut lines = textwrap::wrap(&description, DESCRIPTION_WIDTH).into_iter();

    let Some(first) = lines.next() else {
        return writeln!(out, "{item}");
    };

    if item.len() <= TAG_WIDTH {
        writeln!(out, "{item:<width$}{first}", width = TAG_WIDTH + 1)?;
    } else {
        writeln!(out, "{item}")?;
        writeln!(out, "{:width$}{first}", "", width = TAG_WIDTH + 1)?;
    }

    lines.try_for_each(|line| writeln!(out, "{:width$}{line}", "", width = TAG_WIDTH + 1))
}

pub fn print_banner(out: &mut (impl Write + ?Sized), banner: &Banner) -> fmt::Result {
    match &banner.version {
        Some(version) => writeln!(out, "{} {version}", banner.product)?,
        None => writeln!(out, "{}", banner.product)?,
    }

    [&banner.copyright, &banner.homepage]
        .into_iter()
        .flatten()
        .try_for_each(|line| writeln!(out, "{line}"))
}

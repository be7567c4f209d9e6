use std::path::PathBuf;

use bindargs::{
    ArgumentError, Arguments, Banner, ConfigurationError, Parser,
    errors::AppendError,
    parameter::Placeholder,
    slot::{AcceptError, Sequence, Slot, ValueKind, sequence},
    spec::{ArgumentSpec, SpecTable, SpecTableBuilder},
};

#[derive(Debug, Default)]
struct Manual {
    verbose: bool,
    out: Option<PathBuf>,
    target: String,
    files: Vec<String>,
}

fn verbose(manual: &mut Manual) -> &mut bool {
    &mut manual.verbose
}

fn out(manual: &mut Manual) -> &mut Option<PathBuf> {
    &mut manual.out
}

fn target(manual: &mut Manual) -> &mut String {
    &mut manual.target
}

fn files(manual: &mut Manual) -> &mut Vec<String> {
    &mut manual.files
}

impl Arguments for Manual {
    fn declare(table: &mut SpecTableBuilder<Self>) -> Result<(), ConfigurationError> {
        table
            .argument(
                ArgumentSpec::builder("verbose", verbose)
                    .short("v")
                    .description("Print more output."),
            )?
            .argument(ArgumentSpec::builder("out", out).description("Where to write."))?
            .argument(
                ArgumentSpec::builder("target", target)
                    .short("x")
                    .description("The target."),
            )?
            .argument(ArgumentSpec::builder("files", files).default_argument())?;

        Ok(())
    }
}

fn usage_line(tag: &str, description: &str) -> String {
    format!("  {tag:<31}{description}\n")
}

#[test]
fn hand_written_declarations_parse() {
    let parser = Parser::<Manual>::new().unwrap();
    let mut manual = Manual::default();

    parser
        .parse(["-v", "/x:arm", "a.src", "-out:a.bin", "b.src"], &mut manual)
        .unwrap();

    assert!(manual.verbose);
    assert_eq!(manual.target, "arm");
    assert_eq!(manual.out, Some(PathBuf::from("a.bin")));
    assert_eq!(manual.files, ["a.src", "b.src"]);
}

#[test]
fn usage_layout() {
    let parser = Parser::<Manual>::new()
        .unwrap()
        .with_program("manual")
        .with_response_files(true);

    let expected = [
        "Usage : manual [options] <files> <files> ...\n".to_owned(),
        "Options :\n\n".to_owned(),
        usage_line("-v[erbose][+|-]", "Print more output."),
        usage_line("-out:<filename>", "Where to write."),
        usage_line("-target:<text>", "The target. (Short format: /x)"),
        usage_line("@<file>", "Insert command-line settings from a text file."),
    ]
    .concat();

    assert_eq!(parser.usage(), expected);
    assert_eq!(parser.usage(), parser.usage());
}

#[test]
fn usage_omits_response_files_when_disabled() {
    let parser = Parser::<Manual>::new().unwrap();
    assert!(!parser.usage().contains("@<file>"));
}

#[test]
fn program_name_falls_back_to_the_banner() {
    let parser = Parser::<Manual>::new().unwrap();
    assert!(parser.usage().starts_with("Usage : program [options]"));

    let parser = parser.with_banner(Banner::new("Tool"));
    assert_eq!(parser.program(), "Tool");
    assert!(parser.usage().starts_with("Usage : Tool [options]"));
}

#[test]
fn logo_banner() {
    let parser = Parser::<Manual>::new().unwrap().with_banner(
        Banner::new("Tool")
            .with_version("2.0")
            .with_copyright("Copyright (C) The Tool Authors"),
    );

    let banner = parser.logo_banner();
    assert_eq!(banner, "Tool 2.0\nCopyright (C) The Tool Authors\n");
    assert_eq!(parser.logo_banner(), banner);
}

#[test]
fn invalid_declarations() {
    assert_eq!(
        ArgumentSpec::builder("", verbose).build().unwrap_err(),
        ConfigurationError::EmptyLongName
    );

    for name in ["a:b", "a+b", "a-b", "a b", "a\"b", "@file", "/x"] {
        assert!(matches!(
            ArgumentSpec::builder(name, verbose).build(),
            Err(ConfigurationError::InvalidName { name: ref bad, .. }) if bad == name
        ));
    }

    assert!(matches!(
        ArgumentSpec::builder("verbose", verbose).short("").build(),
        Err(ConfigurationError::InvalidName { reason: "is empty", .. })
    ));

    assert!(matches!(
        ArgumentSpec::builder("target", target).unique().build(),
        Err(ConfigurationError::UniqueWithoutMultiple { .. })
    ));

    assert!(matches!(
        ArgumentSpec::builder("verbose", verbose).multiple().build(),
        Err(ConfigurationError::MultipleOnSingleValue {
            kind: ValueKind::Boolean,
            ..
        })
    ));
}

#[test]
fn multi_valued_policies() {
    let spec = ArgumentSpec::builder("files", files).build().unwrap();
    assert!(spec.is_unique() && spec.allows_multiple());

    let spec = ArgumentSpec::builder("files", files).multiple().build().unwrap();
    assert!(!spec.is_unique() && spec.allows_multiple());

    let spec = ArgumentSpec::builder("files", files).unique().build().unwrap();
    assert!(spec.is_unique() && spec.allows_multiple());
}

#[derive(Debug, Default)]
struct Clashing {
    first: String,
    second: String,
}

fn first(clashing: &mut Clashing) -> &mut String {
    &mut clashing.first
}

fn second(clashing: &mut Clashing) -> &mut String {
    &mut clashing.second
}

impl Arguments for Clashing {
    fn declare(table: &mut SpecTableBuilder<Self>) -> Result<(), ConfigurationError> {
        table
            .argument(ArgumentSpec::builder("first", first).short("f"))?
            .argument(ArgumentSpec::builder("second", second).short("f"))?;

        Ok(())
    }
}

#[test]
fn conflicting_declarations_fail_parser_construction() {
    let error = Parser::<Clashing>::new().unwrap_err();

    assert_eq!(
        error,
        ConfigurationError::DuplicateShortName {
            name: "f".to_owned()
        }
    );
    assert_eq!(
        error.to_string(),
        "short name '/f' is used by more than one command-line argument"
    );
}

#[test]
fn table_conflicts() {
    let mut table = SpecTable::<Clashing>::builder();

    table.argument(ArgumentSpec::builder("first", first)).unwrap();
    assert!(matches!(
        table.argument(ArgumentSpec::builder("first", second)),
        Err(ConfigurationError::DuplicateLongName { .. })
    ));

    table
        .argument(ArgumentSpec::builder("rest", second).default_argument())
        .unwrap();
    assert!(matches!(
        table.argument(ArgumentSpec::builder("more", first).default_argument()),
        Err(ConfigurationError::DuplicateDefault { ref first, ref second })
            if first == "rest" && second == "more"
    ));
}

/// A sequence that refuses to hold more than two items.
#[derive(Debug, Default)]
struct Capped(Vec<String>);

impl Sequence for Capped {
    type Item = String;

    fn append(&mut self, item: String) -> Result<(), AppendError> {
        if self.0.len() >= 2 {
            return Err(AppendError::new("at most two values fit"));
        }

        self.0.push(item);
        Ok(())
    }
}

impl Slot for Capped {
    const KIND: ValueKind = ValueKind::OrderedCollection;

    type Buffer = Vec<String>;

    fn placeholder() -> Placeholder {
        Placeholder::Text
    }

    fn accept(
        buffer: &mut Vec<String>,
        value: Option<&str>,
        unique: bool,
    ) -> Result<(), AcceptError> {
        sequence::accept(buffer, value, unique)
    }

    fn bind(&mut self, buffer: Vec<String>) -> Result<(), AppendError> {
        sequence::bind(self, buffer)
    }
}

#[derive(Arguments, Debug, Default)]
struct Keeper {
    #[bindargs]
    keep: Capped,
}

#[test]
fn custom_sequences_can_refuse_values() {
    let parser = Parser::<Keeper>::new().unwrap();

    let mut keeper = Keeper::default();
    parser.parse(["-keep:a", "-keep:b"], &mut keeper).unwrap();
    assert_eq!(keeper.keep.0, ["a", "b"]);

    let mut keeper = Keeper::default();
    let error = parser
        .parse(["-keep:a", "-keep:b", "-keep:c"], &mut keeper)
        .unwrap_err();

    assert!(matches!(
        error,
        ArgumentError::NotSupported { ref name, ref source }
            if name == "keep" && source.to_string() == "at most two values fit"
    ));
    assert_eq!(
        error.to_string(),
        "Command-line argument '-keep' could not be bound into its collection."
    );
}

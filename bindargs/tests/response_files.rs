use std::{
    fs,
    path::{Path, PathBuf},
    time::{SystemTime, UNIX_EPOCH},
};

use bindargs::{ArgumentError, Arguments, Encoding, Parser};

#[derive(Arguments, Debug, Default, PartialEq, Eq)]
struct Build {
    #[bindargs(long = "inc")]
    includes: Vec<String>,

    #[bindargs(short = "v")]
    verbose: bool,

    #[bindargs]
    out: Option<String>,

    #[bindargs(exclusive)]
    help: bool,

    #[bindargs(default)]
    sources: Vec<String>,
}

/// A scratch directory that's removed when dropped.
struct Scratch {
    root: PathBuf,
}

impl Scratch {
    fn new(name: &str) -> Self {
        let nanos = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap()
            .as_nanos();

        let root = std::env::temp_dir().join(format!(
            "bindargs-{name}-{}-{nanos}",
            std::process::id()
        ));

        fs::create_dir_all(&root).unwrap();
        Self { root }
    }

    fn file(&self, name: &str, contents: impl AsRef<[u8]>) -> PathBuf {
        let path = self.root.join(name);
        fs::write(&path, contents).unwrap();
        path
    }
}

impl Drop for Scratch {
    fn drop(&mut self) {
        let _ = fs::remove_dir_all(&self.root);
    }
}

fn reference(path: &Path) -> String {
    format!("@{}", path.display())
}

fn parser() -> Parser<Build> {
    Parser::<Build>::new().unwrap().with_response_files(true)
}

fn parse(args: &[String]) -> Result<Build, ArgumentError> {
    let mut options = Build::default();
    parser().parse(args, &mut options).map(|_| options)
}

#[test]
fn response_file_matches_inline_arguments() {
    let scratch = Scratch::new("inline");
    let file = scratch.file(
        "build.rsp",
        "# the includes\n\
        -inc:lib  -inc:\"vendor dir\"\n\
        \n\
        \t-v main.src\t\n",
    );

    let from_file = parse(&[reference(&file), "other.src".to_owned()]).unwrap();

    let inline = parse(&[
        "-inc:lib".to_owned(),
        "-inc:vendor dir".to_owned(),
        "-v".to_owned(),
        "main.src".to_owned(),
        "other.src".to_owned(),
    ])
    .unwrap();

    assert_eq!(from_file, inline);
    assert_eq!(from_file.includes, ["lib", "vendor dir"]);
    assert_eq!(from_file.sources, ["main.src", "other.src"]);
}

#[test]
fn nested_response_files() {
    let scratch = Scratch::new("nested");
    let inner = scratch.file("inner.rsp", "-out:result.bin\n");
    let outer = scratch.file("outer.rsp", format!("-v\n{}\n", reference(&inner)));

    let options = parse(&[reference(&outer)]).unwrap();

    assert!(options.verbose);
    assert_eq!(options.out.as_deref(), Some("result.bin"));
}

#[test]
fn missing_response_file() {
    let scratch = Scratch::new("missing");
    let path = scratch.root.join("nowhere.rsp");

    let error = parse(&[reference(&path)]).unwrap_err();

    assert!(matches!(
        error,
        ArgumentError::ResponseFileMissing { path: ref missing } if *missing == path
    ));
    assert_eq!(
        error.to_string(),
        format!("Response file '{}' does not exist.", path.display())
    );
}

#[test]
fn unreadable_response_file() {
    let scratch = Scratch::new("unreadable");
    let file = scratch.file("bad.rsp", [0x2D_u8, 0xFF, 0xFE, 0xFD]);

    // Undecodable as UTF-8, and no byte order mark says otherwise
    let error = parse(&[reference(&file)]).unwrap_err();
    assert!(matches!(error, ArgumentError::ResponseFile { .. }));
}

#[test]
fn byte_order_marks_choose_the_encoding() {
    let scratch = Scratch::new("bom");

    let mut contents = vec![0xFF, 0xFE];
    contents.extend("-inc:wide\n".encode_utf16().flat_map(u16::to_le_bytes));
    let file = scratch.file("wide.rsp", contents);

    let options = parse(&[reference(&file)]).unwrap();
    assert_eq!(options.includes, ["wide"]);
}

#[test]
fn configured_encoding_applies_without_a_byte_order_mark() {
    let scratch = Scratch::new("encoding");
    let contents: Vec<u8> = "-inc:big\n"
        .encode_utf16()
        .flat_map(u16::to_be_bytes)
        .collect();
    let file = scratch.file("big.rsp", contents);

    let parser = parser().with_encoding(Encoding::Utf16Be);
    let mut options = Build::default();
    parser.parse([reference(&file)], &mut options).unwrap();

    assert_eq!(options.includes, ["big"]);
}

#[test]
fn disabled_response_files_are_positionals() {
    let mut options = Build::default();
    Parser::<Build>::new()
        .unwrap()
        .parse(["@file.rsp"], &mut options)
        .unwrap();

    assert_eq!(options.sources, ["@file.rsp"]);
}

#[test]
fn exclusive_arguments_count_the_response_file() {
    let scratch = Scratch::new("exclusive");

    let alone = scratch.file("alone.rsp", "-help\n");
    assert!(parse(&[reference(&alone)]).unwrap().help);

    let crowded = scratch.file("crowded.rsp", "-help -v\n");
    let error = parse(&[reference(&crowded)]).unwrap_err();
    assert!(matches!(error, ArgumentError::Exclusive { ref name } if name == "help"));
}

#[test]
fn response_file_with_only_comments_is_no_args() {
    let scratch = Scratch::new("comments");
    let file = scratch.file("empty.rsp", "# nothing here\n   \n");

    let mut options = Build::default();
    let parsed = parser().parse([reference(&file)], &mut options).unwrap();

    assert!(parsed.no_args());
}

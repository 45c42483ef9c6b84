//! Compilation of path segments into command lines.
//!
//! Every entry below the scan root maps to an invocation. The directory
//! segments between the root and the entry name the program and its flags:
//!
//! ```text
//! testpath/foo.bar/baz.qux/sub/target.txt
//!          ^^^^^^^ ^^^^^^^ ^^^ ^^^^^^^^^^
//!          |       |       |   target, appended verbatim as a full path
//!          |       |       positional token "sub"
//!          |       "--baz" "qux"
//!          program "foo", flag "--bar"
//! ```

use std::fmt;

use serde::{Deserialize, Serialize};

/// Separates a segment's base from its suffix. Only the first occurrence splits.
pub const DELIMITER: char = '.';

/// Prefix of a long-form flag.
pub const LONG_FLAG_PREFIX: &str = "--";

/// Prefix of a short-form flag.
pub const SHORT_FLAG_PREFIX: &str = "-";

/// An ordered argument vector. The first token names the program.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CommandLine(Vec<String>);

impl CommandLine {
    /// Create a command line from raw tokens.
    pub fn new(tokens: Vec<String>) -> Self {
        Self(tokens)
    }

    /// The empty command line carried by the root node.
    pub fn empty() -> Self {
        Self(Vec::new())
    }

    /// Program name (argv[0]).
    pub fn program(&self) -> Option<&str> {
        self.0.first().map(String::as_str)
    }

    /// Arguments after the program name.
    pub fn args(&self) -> &[String] {
        self.0.get(1..).unwrap_or(&[])
    }

    /// All tokens including the program name.
    pub fn tokens(&self) -> &[String] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Rewrite long-form flags to short-form ones for a retry.
    ///
    /// Every token after the program name that starts with `--` loses one
    /// leading `-`. The last token is the launch target and is never touched,
    /// and neither is the program name.
    pub fn with_short_flags(&self) -> Self {
        let last = self.0.len().saturating_sub(1);
        let tokens = self
            .0
            .iter()
            .enumerate()
            .map(|(i, token)| {
                if i == 0 || i == last {
                    return token.clone();
                }
                match token.strip_prefix(LONG_FLAG_PREFIX) {
                    Some(rest) => format!("{SHORT_FLAG_PREFIX}{rest}"),
                    None => token.clone(),
                }
            })
            .collect();
        Self(tokens)
    }
}

impl fmt::Display for CommandLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0.join(" "))
    }
}

impl From<Vec<String>> for CommandLine {
    fn from(tokens: Vec<String>) -> Self {
        Self(tokens)
    }
}

impl<'a> From<&[&'a str]> for CommandLine {
    fn from(tokens: &[&'a str]) -> Self {
        Self(tokens.iter().map(|t| t.to_string()).collect())
    }
}

/// Split a segment at the first delimiter into `(base, suffix)`.
fn split_segment(segment: &str) -> Option<(&str, &str)> {
    segment.split_once(DELIMITER)
}

/// Compile directory segments and a target path into a command line.
///
/// `segments` are the directory components between the scan root and the
/// entry, outermost first. `target` is the entry's full path.
///
/// The first segment is special: `foo.bar` yields the program `foo` and the
/// flag `--bar`. Later segments yield a flag/value pair (`baz.qux` gives
/// `--baz qux`) or a single positional token when they have no delimiter.
/// An empty base or suffix produces an empty token; nothing is dropped.
pub fn compile<S: AsRef<str>>(segments: &[S], target: &str) -> CommandLine {
    let mut argv = Vec::with_capacity(segments.len() * 2 + 1);

    if let Some((first, rest)) = segments.split_first() {
        match split_segment(first.as_ref()) {
            Some((program, flag)) => {
                argv.push(program.to_string());
                argv.push(format!("{LONG_FLAG_PREFIX}{flag}"));
            }
            None => argv.push(first.as_ref().to_string()),
        }

        for segment in rest {
            match split_segment(segment.as_ref()) {
                Some((flag, value)) => {
                    argv.push(format!("{LONG_FLAG_PREFIX}{flag}"));
                    argv.push(value.to_string());
                }
                None => argv.push(segment.as_ref().to_string()),
            }
        }
    }

    argv.push(target.to_string());
    CommandLine(argv)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tokens(cmd: &CommandLine) -> Vec<&str> {
        cmd.tokens().iter().map(String::as_str).collect()
    }

    #[test]
    fn test_first_segment_with_flag() {
        let cmd = compile(&["foo.bar"], "testpath/foo.bar/target.txt");
        assert_eq!(tokens(&cmd), ["foo", "--bar", "testpath/foo.bar/target.txt"]);
    }

    #[test]
    fn test_flag_value_pair() {
        let cmd = compile(&["foo.bar", "baz.qux"], "t/foo.bar/baz.qux/f");
        assert_eq!(tokens(&cmd), ["foo", "--bar", "--baz", "qux", "t/foo.bar/baz.qux/f"]);
    }

    #[test]
    fn test_plain_segments_are_positional() {
        let cmd = compile(&["nano", "sub", "dir"], "t/nano/sub/dir/notes.txt");
        assert_eq!(tokens(&cmd), ["nano", "sub", "dir", "t/nano/sub/dir/notes.txt"]);
        assert_eq!(cmd.program(), Some("nano"));
        assert_eq!(cmd.args().len(), 3);
    }

    #[test]
    fn test_no_segments_runs_target() {
        let cmd = compile::<&str>(&[], "t/script.sh");
        assert_eq!(tokens(&cmd), ["t/script.sh"]);
    }

    #[test]
    fn test_only_first_delimiter_splits() {
        let cmd = compile(&["a.b.c", "d.e.f"], "x");
        assert_eq!(tokens(&cmd), ["a", "--b.c", "--d", "e.f", "x"]);
    }

    #[test]
    fn test_empty_base_and_suffix() {
        let cmd = compile(&[".hidden", "flag."], "x");
        assert_eq!(tokens(&cmd), ["", "--hidden", "--flag", "", "x"]);

        let cmd = compile(&["prog.", ".val"], "x");
        assert_eq!(tokens(&cmd), ["prog", "--", "--", "val", "x"]);
    }

    #[test]
    fn test_target_is_verbatim() {
        let cmd = compile(&["cat"], "t/cat/--weird.name");
        assert_eq!(cmd.tokens().last().map(String::as_str), Some("t/cat/--weird.name"));
    }

    #[test]
    fn test_deterministic() {
        let segments = ["foo.bar", "baz.qux", "plain"];
        assert_eq!(compile(&segments, "t/f"), compile(&segments, "t/f"));
    }

    #[test]
    fn test_short_flags() {
        let cmd = compile(&["foo.bar", "baz.qux"], "t/--target");
        let short = cmd.with_short_flags();
        assert_eq!(tokens(&short), ["foo", "-bar", "-baz", "qux", "t/--target"]);
    }

    #[test]
    fn test_short_flags_keeps_program() {
        let cmd = CommandLine::from(&["--prog", "--x", "file"][..]);
        assert_eq!(tokens(&cmd.with_short_flags()), ["--prog", "-x", "file"]);
    }

    #[test]
    fn test_display() {
        let cmd = compile(&["foo.bar"], "t/f");
        assert_eq!(cmd.to_string(), "foo --bar t/f");
        assert_eq!(CommandLine::empty().to_string(), "");
    }
}

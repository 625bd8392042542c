//! Shell quoting primitives.
//!
//! Every piece of user-controlled text that ends up in a rendered command or
//! setup script goes through one of the functions here. Commands are built as
//! a program plus a structured argument list ([`ShellCommand`]) and only
//! turned into text at the end.

use std::fmt;

/// Escape `text` for use between double quotes in a POSIX shell.
///
/// Backslash, double quote, dollar sign and backtick are each prefixed with a
/// backslash. The input is scanned once, so an inserted backslash is never
/// escaped a second time.
pub fn escape_double_quoted(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        if matches!(c, '\\' | '"' | '$' | '`') {
            out.push('\\');
        }
        out.push(c);
    }
    out
}

/// Wrap `text` in single quotes, escaping embedded single quotes as `'\''`.
pub fn quote_single(text: &str) -> String {
    if text.is_empty() {
        "''".into()
    } else {
        format!("'{}'", text.replace('\'', "'\\''"))
    }
}

/// Render `text` as a bare word when it only contains characters the shell
/// treats literally, otherwise single-quote it.
pub fn quote_word(text: &str) -> String {
    if !text.is_empty() && text.chars().all(is_literal_char) {
        text.to_string()
    } else {
        quote_single(text)
    }
}

/// Render a program path. A leading `~/` stays unquoted so the shell expands
/// it to `$HOME`; the rest of the path goes through [`quote_word`].
pub fn quote_program(path: &str) -> String {
    match path.strip_prefix("~/") {
        Some("") => "~/".to_string(),
        Some(rest) => format!("~/{}", quote_word(rest)),
        None => quote_word(path),
    }
}

fn is_literal_char(c: char) -> bool {
    c.is_ascii_alphanumeric()
        || matches!(c, '-' | '_' | '.' | '/' | ':' | '@' | '%' | '+' | '=' | ',')
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum ShellArg {
    /// A fixed token such as a flag or subcommand, emitted verbatim.
    Flag(&'static str),
    /// A value emitted through [`quote_word`].
    Word(String),
    /// A value emitted inside double quotes through [`escape_double_quoted`].
    Text(String),
}

/// A shell command line assembled from typed arguments.
///
/// ```
/// use scaffolds_core::shell::ShellCommand;
///
/// let cmd = ShellCommand::new("claude").flag("-p").text("say \"$HOME\"");
/// assert_eq!(cmd.render(), r#"claude -p "say \"\$HOME\"""#);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShellCommand {
    program: String,
    args: Vec<ShellArg>,
}

impl ShellCommand {
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
        }
    }

    /// Append a fixed token (flag or subcommand).
    pub fn flag(mut self, flag: &'static str) -> Self {
        self.args.push(ShellArg::Flag(flag));
        self
    }

    /// Append an identifier-like value, such as a model name.
    pub fn word(mut self, value: impl Into<String>) -> Self {
        self.args.push(ShellArg::Word(value.into()));
        self
    }

    /// Append free text, such as a user query.
    pub fn text(mut self, value: impl Into<String>) -> Self {
        self.args.push(ShellArg::Text(value.into()));
        self
    }

    /// Render the command line.
    pub fn render(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for ShellCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&quote_program(&self.program))?;
        for arg in &self.args {
            match arg {
                ShellArg::Flag(flag) => write!(f, " {flag}")?,
                ShellArg::Word(value) => write!(f, " {}", quote_word(value))?,
                ShellArg::Text(value) => write!(f, " \"{}\"", escape_double_quoted(value))?,
            }
        }
        Ok(())
    }
}

//! The prompting protocol and its implementations.
//!
//! [`PromptingFiller`](crate::form::PromptingFiller) talks to the user only
//! through the [`Prompter`] trait. Two implementations ship with the crate:
//!
//! - [`IoPrompter`] writes prompts to any [`Write`] and reads answers from
//!   any [`BufRead`]. [`IoPrompter::stdio`] wires it to the terminal, where
//!   secrets are read through [`console::Term::read_secure_line`] with echo
//!   off.
//! - [`ScriptedPrompter`] replays canned answers and records what it was
//!   asked, for tests and non-interactive callers.

use std::collections::{HashMap, VecDeque};
use std::io::{self, BufRead, IsTerminal, Stderr, StdinLock, Write};

use console::Term;
use toml::Value;
use tracing::debug;

use crate::env::{default_from_env, process_env};
use crate::error::{CoerceError, PromptError};
use crate::types::Attr;

/// Shows form titles and collects raw values for single attributes.
pub trait Prompter {
    /// Display a form title. Only called for non-empty titles.
    fn show_title(&mut self, title: &str) -> Result<(), PromptError>;

    /// Ask for the value of the named attribute.
    ///
    /// Returning a string is always acceptable; the caller coerces it to the
    /// attribute's type.
    fn prompt(&mut self, name: &str, attr: &Attr) -> Result<Value, PromptError>;

    /// Tell the user the last answer for `name` was rejected.
    ///
    /// Called before the same attribute is prompted for again.
    fn report_invalid(
        &mut self,
        _name: &str,
        _attr: &Attr,
        _err: &CoerceError,
    ) -> Result<(), PromptError> {
        Ok(())
    }
}

impl<P: Prompter + ?Sized> Prompter for &mut P {
    fn show_title(&mut self, title: &str) -> Result<(), PromptError> {
        (**self).show_title(title)
    }

    fn prompt(&mut self, name: &str, attr: &Attr) -> Result<Value, PromptError> {
        (**self).prompt(name, attr)
    }

    fn report_invalid(
        &mut self,
        name: &str,
        attr: &Attr,
        err: &CoerceError,
    ) -> Result<(), PromptError> {
        (**self).report_invalid(name, attr, err)
    }
}

/// Reads one secret answer, without echo and without the line break.
pub type SecretReader = fn() -> io::Result<String>;

/// A [`Prompter`] over a line-oriented reader and a writer.
///
/// Defaults shown in prompts come from the attribute's environment
/// variables (see [`default_from_env`]); secret defaults are masked.
pub struct IoPrompter<R, W> {
    input: R,
    output: W,
    secret_reader: Option<SecretReader>,
    env: Option<HashMap<String, String>>,
}

impl IoPrompter<StdinLock<'static>, Stderr> {
    /// Prompt on stderr and read from stdin.
    ///
    /// When both are terminals, secret answers are read with echo off.
    pub fn stdio() -> Self {
        let stdin = io::stdin();
        let interactive = stdin.is_terminal() && io::stderr().is_terminal();
        Self {
            input: stdin.lock(),
            output: io::stderr(),
            secret_reader: interactive.then_some(terminal_secret_line as SecretReader),
            env: None,
        }
    }
}

fn terminal_secret_line() -> io::Result<String> {
    Term::stderr().read_secure_line()
}

impl<R: BufRead, W: Write> IoPrompter<R, W> {
    /// Answers are read as lines from `input`, secrets included, unless a
    /// [`secret_reader`](Self::secret_reader) is set.
    pub fn new(input: R, output: W) -> Self {
        Self {
            input,
            output,
            secret_reader: None,
            env: None,
        }
    }

    /// Read secret answers with `reader` instead of from the input stream.
    pub fn secret_reader(mut self, reader: SecretReader) -> Self {
        self.secret_reader = Some(reader);
        self
    }

    /// Resolve environment defaults from `vars` instead of the process
    /// environment.
    pub fn with_env(mut self, vars: impl IntoIterator<Item = (String, String)>) -> Self {
        self.env = Some(vars.into_iter().collect());
        self
    }

    pub fn into_output(self) -> W {
        self.output
    }

    fn env_default(&self, attr: &Attr) -> String {
        match &self.env {
            Some(vars) => default_from_env(attr, |name| vars.get(name).cloned()),
            None => default_from_env(attr, process_env),
        }
    }

    fn write_prompt(&mut self, text: &str) -> Result<(), PromptError> {
        self.output
            .write_all(text.as_bytes())
            .and_then(|()| self.output.flush())
            .map_err(PromptError::WritePrompt)
    }

    /// Read one line, without its `\n` and at most one trailing `\r`.
    fn read_line(&mut self) -> Result<String, PromptError> {
        let mut buf = Vec::new();
        self.input
            .read_until(b'\n', &mut buf)
            .map_err(PromptError::ReadInput)?;
        if buf.pop() != Some(b'\n') {
            return Err(PromptError::UnexpectedEof);
        }
        if buf.last() == Some(&b'\r') {
            buf.pop();
        }
        into_string(buf)
    }
}

fn read_secret(read: SecretReader) -> Result<String, PromptError> {
    read().map_err(|e| match e.kind() {
        io::ErrorKind::UnexpectedEof => PromptError::UnexpectedEof,
        io::ErrorKind::Interrupted => PromptError::Interrupted,
        _ => PromptError::ReadInput(e),
    })
}

fn into_string(buf: Vec<u8>) -> Result<String, PromptError> {
    String::from_utf8(buf)
        .map_err(|e| PromptError::ReadInput(io::Error::new(io::ErrorKind::InvalidData, e)))
}

impl<R: BufRead, W: Write> Prompter for IoPrompter<R, W> {
    fn show_title(&mut self, title: &str) -> Result<(), PromptError> {
        writeln!(self.output, "{title}")
            .and_then(|()| self.output.flush())
            .map_err(PromptError::ShowTitle)
    }

    fn prompt(&mut self, name: &str, attr: &Attr) -> Result<Value, PromptError> {
        let default = self.env_default(attr);
        let text = if default.is_empty() {
            format!("{}: ", attr.description)
        } else if attr.secret {
            let masked = "*".repeat(default.chars().count());
            format!("{} ({masked}): ", attr.description)
        } else {
            format!("{} ({default}): ", attr.description)
        };
        debug!(field = name, secret = attr.secret, "prompting");
        self.write_prompt(&text)?;

        let input = match self.secret_reader {
            Some(read) if attr.secret => read_secret(read)?,
            _ => self.read_line()?,
        };
        if input.is_empty() {
            return Ok(Value::String(default));
        }
        Ok(Value::String(input))
    }

    fn report_invalid(
        &mut self,
        _name: &str,
        attr: &Attr,
        err: &CoerceError,
    ) -> Result<(), PromptError> {
        // The error text may quote the rejected answer.
        let message = if attr.secret {
            "invalid input\n".to_string()
        } else {
            format!("invalid input: {err}\n")
        };
        self.write_prompt(&message)
    }
}

/// A [`Prompter`] that replays canned responses.
///
/// Every prompt is recorded, even once the responses run out, in which case
/// the prompt fails.
#[derive(Debug, Default)]
pub struct ScriptedPrompter {
    responses: VecDeque<Result<Value, PromptError>>,
    title_error: Option<PromptError>,
    titles: Vec<String>,
    prompts: Vec<(String, Attr)>,
    rejected: Vec<(String, String)>,
}

impl ScriptedPrompter {
    pub fn new(responses: impl IntoIterator<Item = Result<Value, PromptError>>) -> Self {
        Self {
            responses: responses.into_iter().collect(),
            ..Self::default()
        }
    }

    /// Script that answers every prompt successfully, in order.
    pub fn answering<V: Into<Value>>(answers: impl IntoIterator<Item = V>) -> Self {
        Self::new(answers.into_iter().map(|a| Ok(a.into())))
    }

    /// Make [`show_title`](Prompter::show_title) fail with `err`.
    pub fn fail_title(mut self, err: PromptError) -> Self {
        self.title_error = Some(err);
        self
    }

    pub fn titles(&self) -> &[String] {
        &self.titles
    }

    /// Every `(name, attr)` prompted for, in order.
    pub fn prompts(&self) -> &[(String, Attr)] {
        &self.prompts
    }

    /// Every `(name, message)` passed to `report_invalid`, in order.
    pub fn rejected(&self) -> &[(String, String)] {
        &self.rejected
    }
}

impl Prompter for ScriptedPrompter {
    fn show_title(&mut self, title: &str) -> Result<(), PromptError> {
        if let Some(err) = self.title_error.take() {
            return Err(err);
        }
        self.titles.push(title.to_string());
        Ok(())
    }

    fn prompt(&mut self, name: &str, attr: &Attr) -> Result<Value, PromptError> {
        self.prompts.push((name.to_string(), attr.clone()));
        self.responses
            .pop_front()
            .unwrap_or_else(|| Err(PromptError::Failed("no more scripted responses".into())))
    }

    fn report_invalid(
        &mut self,
        name: &str,
        _attr: &Attr,
        err: &CoerceError,
    ) -> Result<(), PromptError> {
        self.rejected.push((name.to_string(), err.to_string()));
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures::test::FailingReader;
    use crate::types::FieldType;

    fn prompter<'a>(input: &'a str, env: &[(&str, &str)]) -> IoPrompter<&'a [u8], Vec<u8>> {
        IoPrompter::new(input.as_bytes(), Vec::new()).with_env(
            env.iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect::<Vec<_>>(),
        )
    }

    fn output(p: IoPrompter<&[u8], Vec<u8>>) -> String {
        String::from_utf8(p.into_output()).unwrap()
    }

    fn s(v: &str) -> Value {
        Value::String(v.into())
    }

    #[test]
    fn single_field_no_default() {
        let mut p = prompter("B\n", &[]);
        let got = p.prompt("a", &Attr::default().description("A")).unwrap();
        assert_eq!(got, s("B"));
        assert_eq!(output(p), "A: ");
    }

    #[test]
    fn single_field_with_default() {
        let mut p = prompter("B\n", &[("A", "C")]);
        let attr = Attr::default().description("A").env_var("A");
        assert_eq!(p.prompt("a", &attr).unwrap(), s("B"));
        assert_eq!(output(p), "A (C): ");
    }

    #[test]
    fn empty_input_takes_default() {
        let mut p = prompter("\n", &[("A", "C")]);
        let attr = Attr::default().description("A").env_var("A");
        assert_eq!(p.prompt("a", &attr).unwrap(), s("C"));
        assert_eq!(output(p), "A (C): ");
    }

    #[test]
    fn empty_input_without_default_is_empty_string() {
        let mut p = prompter("\n", &[]);
        assert_eq!(p.prompt("a", &Attr::default().description("A")).unwrap(), s(""));
    }

    #[test]
    fn secret_default_is_masked() {
        let mut p = prompter("\n", &[("PIN", "1234")]);
        let attr = Attr::default().description("PIN").env_var("PIN").secret();
        assert_eq!(p.prompt("pin", &attr).unwrap(), s("1234"));
        assert_eq!(output(p), "PIN (****): ");
    }

    #[test]
    fn secret_non_terminal_reads_plain_line() {
        let mut p = prompter("hunter2\n", &[]);
        let attr = Attr::default().description("Password").secret();
        assert_eq!(p.prompt("password", &attr).unwrap(), s("hunter2"));
        assert_eq!(output(p), "Password: ");
    }

    #[test]
    fn secret_reader_answers_secret_fields_only() {
        let mut p = prompter("alice\n", &[]).secret_reader(|| Ok("hunter2".to_string()));
        let secret = Attr::default().description("Password").secret();
        let plain = Attr::default().description("User");
        assert_eq!(p.prompt("password", &secret).unwrap(), s("hunter2"));
        assert_eq!(p.prompt("user", &plain).unwrap(), s("alice"));
        // nothing is written between the secret answer and the next prompt
        assert_eq!(output(p), "Password: User: ");
    }

    #[test]
    fn secret_reader_empty_answer_takes_default() {
        let mut p = prompter("", &[("PIN", "1234")]).secret_reader(|| Ok(String::new()));
        let attr = Attr::default().description("PIN").secret().env_var("PIN");
        assert_eq!(p.prompt("pin", &attr).unwrap(), s("1234"));
        assert_eq!(output(p), "PIN (****): ");
    }

    #[test]
    fn secret_reader_failures() {
        let attr = Attr::default().description("PIN").secret();

        let mut p = prompter("", &[]).secret_reader(|| Err(io::ErrorKind::UnexpectedEof.into()));
        assert!(matches!(p.prompt("pin", &attr), Err(PromptError::UnexpectedEof)));

        let mut p = prompter("", &[]).secret_reader(|| Err(io::ErrorKind::Interrupted.into()));
        assert!(matches!(p.prompt("pin", &attr), Err(PromptError::Interrupted)));

        let mut p = prompter("", &[]).secret_reader(|| Err(io::Error::other("tty gone")));
        let err = p.prompt("pin", &attr).unwrap_err();
        assert_eq!(err.to_string(), "cannot read input: tty gone");
    }

    #[test]
    fn fallback_env_var_default() {
        let mut p = prompter("\n", &[("B", "from-b")]);
        let attr = Attr::default()
            .description("X")
            .env_var("A")
            .fallback_env_var("B");
        assert_eq!(p.prompt("x", &attr).unwrap(), s("from-b"));
        assert_eq!(output(p), "X (from-b): ");
    }

    #[test]
    fn end_of_input_is_an_error() {
        let mut p = prompter("", &[]);
        let err = p.prompt("a", &Attr::default().description("A")).unwrap_err();
        assert!(matches!(err, PromptError::UnexpectedEof));
        assert_eq!(err.to_string(), "cannot read input: unexpected end of input");
        assert_eq!(output(p), "A: ");
    }

    #[test]
    fn partial_line_at_end_of_input_is_an_error() {
        let mut p = prompter("abc", &[]);
        let err = p.prompt("a", &Attr::default().description("A")).unwrap_err();
        assert!(matches!(err, PromptError::UnexpectedEof));
    }

    #[test]
    fn windows_line_endings() {
        let mut p = prompter("A\r\n", &[]);
        assert_eq!(p.prompt("a", &Attr::default().description("A")).unwrap(), s("A"));
    }

    #[test]
    fn only_one_carriage_return_is_stripped() {
        let mut p = prompter("A\r\r\n", &[]);
        assert_eq!(p.prompt("a", &Attr::default().description("A")).unwrap(), s("A\r"));
    }

    #[test]
    fn consecutive_prompts_read_consecutive_lines() {
        let mut p = prompter("one\ntwo\n", &[]);
        let attr = Attr::default().description("Q");
        assert_eq!(p.prompt("a", &attr).unwrap(), s("one"));
        assert_eq!(p.prompt("b", &attr).unwrap(), s("two"));
        assert_eq!(output(p), "Q: Q: ");
    }

    #[test]
    fn show_title_writes_line() {
        let mut p = prompter("", &[]);
        p.show_title("Credentials").unwrap();
        assert_eq!(output(p), "Credentials\n");
    }

    #[test]
    fn report_invalid_prints_error() {
        let mut p = prompter("", &[]);
        let err = crate::checker::expected("", "int", &s("one"));
        p.report_invalid("n", &Attr::new(FieldType::Int), &err).unwrap();
        assert_eq!(output(p), "invalid input: expected int, got string(\"one\")\n");
    }

    #[test]
    fn report_invalid_hides_secret_answers() {
        let mut p = prompter("", &[]);
        let err = crate::checker::expected("", "int", &s("s3cret"));
        p.report_invalid("pin", &Attr::new(FieldType::Int).secret(), &err)
            .unwrap();
        let out = output(p);
        assert_eq!(out, "invalid input\n");
        assert!(!out.contains("s3cret"));
    }

    struct FailingWriter;

    impl Write for FailingWriter {
        fn write(&mut self, _buf: &[u8]) -> io::Result<usize> {
            Err(io::Error::new(io::ErrorKind::BrokenPipe, "closed"))
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn write_failures_are_reported() {
        let mut p = IoPrompter::new("x\n".as_bytes(), FailingWriter).with_env(Vec::new());
        let err = p.prompt("a", &Attr::default().description("A")).unwrap_err();
        assert!(err.to_string().starts_with("cannot write prompt: "));
        let err = p.show_title("T").unwrap_err();
        assert!(err.to_string().starts_with("cannot show title: "));
    }

    #[test]
    fn read_failures_are_reported() {
        let mut p = IoPrompter::new(FailingReader, Vec::new()).with_env(Vec::new());
        let err = p.prompt("a", &Attr::default().description("A")).unwrap_err();
        assert!(matches!(err, PromptError::ReadInput(_)));
        assert_eq!(err.to_string(), "cannot read input: device gone");
    }

    #[test]
    fn invalid_utf8_is_a_read_error() {
        let mut p = IoPrompter::new(&b"\xff\xfe\n"[..], Vec::new()).with_env(Vec::new());
        let err = p.prompt("a", &Attr::default().description("A")).unwrap_err();
        assert!(matches!(err, PromptError::ReadInput(_)));
        assert!(err.to_string().starts_with("cannot read input: "));
    }

    #[test]
    fn scripted_prompter_records_prompts() {
        let mut p = ScriptedPrompter::answering(["x"]);
        let attr = Attr::new(FieldType::String).description("X");
        assert_eq!(p.prompt("x", &attr).unwrap(), s("x"));
        assert!(p.prompt("y", &attr).is_err());
        let names: Vec<&str> = p.prompts().iter().map(|(n, _)| n.as_str()).collect();
        assert_eq!(names, vec!["x", "y"]);
    }

    #[test]
    fn scripted_prompter_title_failure() {
        let mut p = ScriptedPrompter::default().fail_title(PromptError::Failed("boom".into()));
        assert!(p.show_title("T").is_err());
        assert!(p.show_title("T").is_ok());
        assert_eq!(p.titles(), &["T".to_string()]);
    }
}

//! The interactive REPL.
//!
//! Input is either a query document, printed back as JSON, or a
//! dot-command:
//!
//! ```text
//! .help            list commands
//! .schema <kind>   describe a kind's fields (Person, people, allPeople)
//! .stats           entity and edge counts
//! .quit            leave the REPL
//! ```

use std::io::{self, Write};

use holocron_foundation::{EntityKind, Error, Result};

use crate::config::RuntimeConfig;
use crate::editor::{BraceValidator, LineEditor, ReadResult, RustylineEditor};
use crate::session::Session;

const DOT_COMMANDS: [&str; 4] = [".help", ".schema", ".stats", ".quit"];

/// What one evaluated input produced.
#[derive(Debug, PartialEq, Eq)]
pub enum Outcome {
    /// Text to print.
    Output(String),
    /// Nothing to print.
    Silent,
    /// The user asked to leave.
    Quit,
}

/// The interactive REPL.
pub struct Repl<E: LineEditor = RustylineEditor> {
    /// The line editor for input.
    editor: E,

    /// The session answering queries.
    session: Session,

    /// Pretty-print JSON results.
    pretty: bool,

    /// Whether to show the welcome banner.
    show_banner: bool,

    /// Primary prompt.
    prompt: String,

    /// Continuation prompt (for multi-line input).
    continuation_prompt: String,
}

impl Repl<RustylineEditor> {
    /// Creates a REPL with the rustyline editor, configured by `config`.
    ///
    /// # Errors
    ///
    /// Returns an error if the editor fails to initialize.
    pub fn new(session: Session, config: &RuntimeConfig) -> Result<Self> {
        let editor = RustylineEditor::new(config.history_size)?;
        Ok(Self::with_editor(editor, session).with_pretty(config.pretty))
    }
}

impl<E: LineEditor> Repl<E> {
    /// Creates a REPL with the given editor.
    pub fn with_editor(mut editor: E, session: Session) -> Self {
        let mut words = session.vocabulary();
        words.extend(DOT_COMMANDS.iter().map(|c| (*c).to_string()));
        editor.set_vocabulary(words);
        Self {
            editor,
            session,
            pretty: true,
            show_banner: true,
            prompt: "holocron> ".to_string(),
            continuation_prompt: "       .. ".to_string(),
        }
    }

    /// Sets whether results are pretty-printed.
    #[must_use]
    pub const fn with_pretty(mut self, pretty: bool) -> Self {
        self.pretty = pretty;
        self
    }

    /// Disables the welcome banner.
    #[must_use]
    pub const fn without_banner(mut self) -> Self {
        self.show_banner = false;
        self
    }

    /// Returns a reference to the session.
    #[must_use]
    pub const fn session(&self) -> &Session {
        &self.session
    }

    /// Runs the REPL loop until EOF or `.quit`.
    ///
    /// # Errors
    ///
    /// Returns an error if reading input fails fatally.
    pub fn run(&mut self) -> Result<()> {
        if self.show_banner {
            self.print_banner();
        }

        while let Some(input) = self.read_input()? {
            let trimmed = input.trim();
            if trimmed.is_empty() {
                continue;
            }
            self.editor.add_history(&input);

            match self.eval(trimmed) {
                Ok(Outcome::Output(text)) => println!("{text}"),
                Ok(Outcome::Silent) => {}
                Ok(Outcome::Quit) => break,
                Err(e) => print_error(&e),
            }
        }

        println!("\nGoodbye!");
        Ok(())
    }

    /// Reads a potentially multi-line input; `None` at EOF.
    fn read_input(&mut self) -> Result<Option<String>> {
        let mut input = String::new();
        let mut first_line = true;

        loop {
            let prompt = if first_line {
                &self.prompt
            } else {
                &self.continuation_prompt
            };

            match self.editor.read_line(prompt)? {
                ReadResult::Line(line) => {
                    if !first_line {
                        input.push('\n');
                    }
                    input.push_str(&line);
                    if BraceValidator::is_complete(&input) {
                        return Ok(Some(input));
                    }
                    first_line = false;
                }
                ReadResult::Interrupted => {
                    if !first_line {
                        println!("\nInput cancelled.");
                    }
                    return Ok(Some(String::new()));
                }
                ReadResult::Eof => {
                    // EOF mid-document still evaluates, so the parser reports
                    // what is missing.
                    return Ok((!first_line).then_some(input));
                }
            }
        }
    }

    /// Evaluates one input: a dot-command or a query document.
    ///
    /// # Errors
    ///
    /// Returns the query's parse or validation error, or an error for an
    /// unknown command.
    pub fn eval(&self, input: &str) -> Result<Outcome> {
        let input = input.trim();
        if let Some(command) = input.strip_prefix('.') {
            return self.eval_command(command);
        }
        self.session
            .query_json(input, self.pretty)
            .map(Outcome::Output)
    }

    fn eval_command(&self, command: &str) -> Result<Outcome> {
        let mut words = command.split_whitespace();
        match (words.next(), words.next()) {
            (Some("help"), None) => Ok(Outcome::Output(help_text())),
            (Some("stats"), None) => Ok(Outcome::Output(self.session.stats().to_string())),
            (Some("quit" | "exit"), None) => Ok(Outcome::Quit),
            (Some("schema"), Some(name)) => {
                let kind = EntityKind::from_designator(name)
                    .ok_or_else(|| Error::unknown_kind(name))?;
                Ok(Outcome::Output(self.session.describe(kind)))
            }
            (Some("schema"), None) => Ok(Outcome::Output(
                EntityKind::ALL
                    .iter()
                    .map(|k| k.type_name())
                    .collect::<Vec<_>>()
                    .join("\n"),
            )),
            _ => Err(Error::invalid_argument(
                format!(".{command}"),
                "unknown command; try .help",
            )),
        }
    }

    /// Prints the welcome banner.
    #[allow(clippy::unused_self)]
    fn print_banner(&self) {
        println!("\x1b[1;36mHolocron\x1b[0m v{}", env!("CARGO_PKG_VERSION"));
        println!("Type a query such as `people(name: \"Luke\") {{ name }}`, or .help.");
        println!("Use Ctrl+D to exit.\n");
        let _ = io::stdout().flush();
    }
}

fn help_text() -> String {
    [
        "Queries:",
        "  people(name: \"Luke\") { name height(unit: METER) homeworld { name } }",
        "  { a: films { title } b: person(id: 1) { name } }",
        "",
        "Commands:",
        "  .help            show this help",
        "  .schema [kind]   list kinds, or describe one kind's fields",
        "  .stats           entity and edge counts",
        "  .quit            leave the REPL",
    ]
    .join("\n")
}

fn print_error(error: &Error) {
    eprintln!("\x1b[31mError: {error}\x1b[0m");
}

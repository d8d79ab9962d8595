use crate::error::MenuError;
use rustyline::DefaultEditor;
use rustyline::error::ReadlineError;
use std::io::{BufRead, Stdout, Write};

/// Line-oriented output and input used by a [`Menu`](crate::Menu).
///
/// The menu only ever emits whole lines and reads one line per attempt, so this is
/// all it needs from a terminal or a pair of streams.
pub trait Console {
    /// Emit one line of output.
    fn render(&mut self, line: &str) -> Result<(), MenuError>;

    /// Clear whatever is displayed before a new render pass.
    ///
    /// Defaults to doing nothing.
    fn clear(&mut self) -> Result<(), MenuError> {
        Ok(())
    }

    /// Show `prompt` and block until a full line is available.
    ///
    /// The returned line has no trailing line terminator. A closed input stream
    /// must be reported as [`MenuError::InputClosed`].
    fn read_line(&mut self, prompt: &str) -> Result<String, MenuError>;
}

/// Interactive console backed by `rustyline` for input and stdout for output.
pub struct TerminalConsole {
    editor: DefaultEditor,
    stdout: Stdout,
    clear_screen: bool,
}

impl TerminalConsole {
    /// Create a console talking to the controlling terminal.
    pub fn new(clear_screen: bool) -> Result<Self, MenuError> {
        Ok(Self {
            editor: DefaultEditor::new()?,
            stdout: std::io::stdout(),
            clear_screen,
        })
    }
}

impl Console for TerminalConsole {
    fn render(&mut self, line: &str) -> Result<(), MenuError> {
        writeln!(self.stdout, "{}", line)?;
        Ok(())
    }

    fn clear(&mut self) -> Result<(), MenuError> {
        if self.clear_screen {
            self.editor.clear_screen()?;
        }
        Ok(())
    }

    fn read_line(&mut self, prompt: &str) -> Result<String, MenuError> {
        self.stdout.flush()?;
        match self.editor.readline(prompt) {
            Ok(line) => {
                self.editor.add_history_entry(line.as_str())?;
                Ok(line)
            }
            Err(ReadlineError::Eof) => Err(MenuError::InputClosed),
            Err(ReadlineError::Interrupted) => Err(MenuError::Interrupted),
            Err(err) => Err(err.into()),
        }
    }
}

/// Console over an arbitrary reader and writer.
///
/// Rows and prompts go to `writer`, lines are read from `reader`. Used for piped
/// input and for driving a menu from a script.
pub struct StreamConsole<R, W> {
    reader: R,
    writer: W,
}

impl<R: BufRead, W: Write> StreamConsole<R, W> {
    pub fn new(reader: R, writer: W) -> Self {
        Self { reader, writer }
    }

    /// Give back the reader and writer, e.g. to inspect captured output.
    pub fn into_parts(self) -> (R, W) {
        (self.reader, self.writer)
    }
}

impl<R: BufRead, W: Write> Console for StreamConsole<R, W> {
    fn render(&mut self, line: &str) -> Result<(), MenuError> {
        writeln!(self.writer, "{}", line)?;
        Ok(())
    }

    fn read_line(&mut self, prompt: &str) -> Result<String, MenuError> {
        self.writer.write_all(prompt.as_bytes())?;
        self.writer.flush()?;

        let mut line = String::new();
        if self.reader.read_line(&mut line)? == 0 {
            return Err(MenuError::InputClosed);
        }
        if line.ends_with('\n') {
            line.pop();
            if line.ends_with('\r') {
                line.pop();
            }
        }
        Ok(line)
    }
}

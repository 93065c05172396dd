use std::fmt;
use std::io::{self, Write};

use anyhow::Error;
use log::{debug, info};

use crate::command::Command;
use crate::interpreter::Interpreter;
use crate::number;
use crate::symbols::is_variable_name;

const BANNER: &str =
    "The SNOL environment is now active, you may proceed with giving your commands.";

const FAREWELL: &str = "Interpreter is now terminated...";

const HELP: &str = "\
SNOL commands:
  BEG <var>           read a number from input and store it in <var>
  PRINT <var|number>  show the value of a variable or a number literal
  <var> = <expr>      evaluate <expr> and store the result in <var>
  <expr>              evaluate <expr> (use PRINT to see a stored value)
  HELP                show this message
  EXIT!               leave the interpreter

Expressions use + - * / % and parentheses. Integers (42) and floats (4.2)
cannot be mixed in one expression, and % only works on integers.
Variable names start with a letter followed by letters or digits.";

enum Flow {
    Continue,
    Exit,
}

/// A read/execute loop over input lines, writing `SNOL> ` messages to `out`.
pub struct Session<W: Write> {
    interpreter: Interpreter,
    out: W,
    interactive: bool,
}

impl<W: Write> Session<W> {
    /// Prompts and the banner are only written when `interactive` is set.
    pub fn new(out: W, interactive: bool) -> Self {
        Self {
            interpreter: Interpreter::new(),
            out,
            interactive,
        }
    }

    /// Runs until `EXIT!` or the end of `lines`. A `BEG` takes its value from
    /// the line that follows it.
    pub fn run<I>(&mut self, mut lines: I) -> Result<(), Error>
    where
        I: Iterator<Item = io::Result<String>>,
    {
        info!("session started, interactive: {}", self.interactive);
        if self.interactive {
            writeln!(self.out, "{}\n", BANNER)?;
        }

        loop {
            self.prompt("Command: ")?;
            let Some(line) = lines.next() else {
                break;
            };
            if let Flow::Exit = self.execute(&line?, &mut lines)? {
                break;
            }
        }

        for (name, value) in self.interpreter.symbols().iter() {
            debug!("{} = {:?}", name, value);
        }
        self.out.flush()?;
        Ok(())
    }

    fn execute<I>(&mut self, line: &str, lines: &mut I) -> io::Result<Flow>
    where
        I: Iterator<Item = io::Result<String>>,
    {
        match Command::parse(line) {
            Command::Empty => {}
            Command::Beg(name) => self.input(name, lines)?,
            Command::Print(target) => self.print(target)?,
            Command::Exit => {
                writeln!(self.out, "{}", FAREWELL)?;
                return Ok(Flow::Exit);
            }
            Command::Help => writeln!(self.out, "{}", HELP)?,
            // Results are discarded, PRINT shows stored values
            Command::Value(expr) | Command::Expression(expr) => {
                if let Err(e) = self.interpreter.evaluate(expr) {
                    self.report(e)?;
                }
            }
            Command::Assign { name, expr } => {
                if let Err(e) = self.interpreter.assign(name, expr) {
                    self.report(e)?;
                }
            }
            Command::Unknown => {
                self.report("Unknown command! Does not match any valid command of the language.")?
            }
        }

        Ok(Flow::Continue)
    }

    fn input<I>(&mut self, name: &str, lines: &mut I) -> io::Result<()>
    where
        I: Iterator<Item = io::Result<String>>,
    {
        if !is_variable_name(name) {
            return self.report(format_args!("[{}] is not a valid variable name!", name));
        }

        self.report(format_args!("Please enter value for [{}]", name))?;
        self.prompt("Input: ")?;
        let Some(value) = lines.next() else {
            return Ok(());
        };
        if let Err(e) = self.interpreter.capture(name, &value?) {
            self.report(e)?;
        }
        Ok(())
    }

    fn print(&mut self, target: &str) -> io::Result<()> {
        if number::is_literal(target) {
            self.report(target)
        } else if is_variable_name(target) {
            match self.interpreter.symbols().get(target) {
                Ok(value) => self.report(format_args!("[{}] = {}", target, value.literal())),
                Err(e) => self.report(e),
            }
        } else {
            self.report("Error! Invalid expression to print.")
        }
    }

    fn report(&mut self, message: impl fmt::Display) -> io::Result<()> {
        writeln!(self.out, "SNOL> {}", message)
    }

    fn prompt(&mut self, text: &str) -> io::Result<()> {
        if self.interactive {
            write!(self.out, "{}", text)?;
            self.out.flush()?;
        }
        Ok(())
    }
}

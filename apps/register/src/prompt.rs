//! Line-based prompting with retry on bad input.
//!
//! Every `ask_*` method returns `Ok(None)` once input is exhausted so the menu
//! can wind down cleanly instead of spinning on EOF.

use std::fmt::Display;
use std::io::{self, BufRead, Write};

use sprout_core::validation::{parse_price, parse_quantity, parse_yes_no, validate_product_name};
use sprout_core::{Money, ProductName, ValidationError};

/// Input and output for one menu session.
pub struct Prompter<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> Prompter<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Prompter { input, output }
    }

    /// Writes one line.
    pub fn say(&mut self, text: impl Display) -> io::Result<()> {
        writeln!(self.output, "{}", text)
    }

    /// Shows `prompt` and reads one trimmed line.
    pub fn ask(&mut self, prompt: &str) -> io::Result<Option<String>> {
        writeln!(self.output, "{}", prompt)?;
        self.output.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        Ok(Some(line.trim().to_string()))
    }

    /// Asks until `parse` accepts the answer.
    pub fn ask_parsed<T, F>(&mut self, prompt: &str, parse: F) -> io::Result<Option<T>>
    where
        F: Fn(&str) -> Result<T, ValidationError>,
    {
        loop {
            let Some(answer) = self.ask(prompt)? else {
                return Ok(None);
            };
            match parse(&answer) {
                Ok(value) => return Ok(Some(value)),
                Err(e) => self.say(format_args!("Invalid input: {e}. Please try again."))?,
            }
        }
    }

    pub fn ask_name(&mut self, prompt: &str) -> io::Result<Option<ProductName>> {
        self.ask_parsed(prompt, validate_product_name)
    }

    pub fn ask_quantity(&mut self, prompt: &str) -> io::Result<Option<i64>> {
        self.ask_parsed(prompt, parse_quantity)
    }

    pub fn ask_price(&mut self, prompt: &str) -> io::Result<Option<Money>> {
        self.ask_parsed(prompt, parse_price)
    }

    /// Asks a yes/no question until the answer is one of `y`, `yes`, `n`, `no`.
    pub fn ask_yes_no(&mut self, prompt: &str) -> io::Result<Option<bool>> {
        loop {
            let Some(answer) = self.ask(prompt)? else {
                return Ok(None);
            };
            match parse_yes_no(&answer) {
                Some(yes) => return Ok(Some(yes)),
                None => self.say("Invalid response! Please enter 'yes' or 'no'.")?,
            }
        }
    }

    #[cfg(test)]
    pub fn output(&self) -> &W {
        &self.output
    }
}

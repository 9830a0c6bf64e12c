// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Interactive page loop shared by the seller and admin pages.
//!
//! One input line is one user interaction. Handler errors are shown as an
//! alert line (`! ...`) and the page keeps running, so the user can retry.

use anyhow::Result;
use std::io::{BufRead, Write};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Flow {
    /// State changed; redraw the active page.
    Render,
    /// Print this message, no redraw.
    Message(String),
    /// Print this message, then redraw the active page.
    Notice(String),
    /// Ask a yes/no question; the answer goes to [`PageController::confirm`].
    Confirm(String),
    Logout,
    Quit,
}

pub trait PageController {
    fn grammar(&self) -> clap::Command;
    fn prompt(&self) -> String;
    /// Initial fetch. A failure is reported but does not prevent the page from opening.
    fn load(&mut self) -> Result<()>;
    fn render(&self) -> String;
    fn dispatch(&mut self, m: &clap::ArgMatches) -> Result<Flow>;
    fn confirm(&mut self, _yes: bool) -> Result<Flow> {
        Ok(Flow::Render)
    }
}

/// What ended the session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Exit {
    Quit,
    Logout,
    EndOfInput,
}

pub fn run<C, R, W>(page: &mut C, input: R, out: &mut W) -> Result<Exit>
where
    C: PageController + ?Sized,
    R: BufRead,
    W: Write,
{
    if let Err(e) = page.load() {
        alert(out, &e)?;
    }
    writeln!(out, "{}", page.render())?;

    let mut lines = input.lines();
    loop {
        write!(out, "{}> ", page.prompt())?;
        out.flush()?;
        let Some(line) = lines.next() else {
            return Ok(Exit::EndOfInput);
        };
        let line = line?;
        let words = split_words(&line);
        if words.is_empty() {
            continue;
        }
        let matches = match page.grammar().try_get_matches_from(&words) {
            Ok(m) => m,
            Err(e) => {
                writeln!(out, "{}", e.render().to_string().trim_end())?;
                continue;
            }
        };
        let mut flow = page.dispatch(&matches);
        while let Ok(Flow::Confirm(question)) = &flow {
            write!(out, "{} [y/N] ", question)?;
            out.flush()?;
            let answer = match lines.next() {
                Some(l) => l?,
                None => String::new(),
            };
            let yes = matches!(answer.trim().to_lowercase().as_str(), "y" | "yes" | "ya");
            flow = page.confirm(yes);
        }
        match flow {
            Ok(Flow::Render) => writeln!(out, "{}", page.render())?,
            Ok(Flow::Message(msg)) => writeln!(out, "{}", msg)?,
            Ok(Flow::Notice(msg)) => {
                writeln!(out, "{}", msg)?;
                writeln!(out, "{}", page.render())?;
            }
            Ok(Flow::Confirm(_)) => unreachable!("confirm loop exits only on other flows"),
            Ok(Flow::Logout) => return Ok(Exit::Logout),
            Ok(Flow::Quit) => return Ok(Exit::Quit),
            Err(e) => alert(out, &e)?,
        }
    }
}

fn alert<W: Write>(out: &mut W, e: &anyhow::Error) -> Result<()> {
    log::error!("{:#}", e);
    writeln!(out, "! {:#}", e)?;
    Ok(())
}

/// Whitespace split that keeps `"double quoted"` runs together.
pub fn split_words(line: &str) -> Vec<String> {
    let mut words = Vec::new();
    let mut cur = String::new();
    let mut quoted = false;
    let mut has_word = false;
    for ch in line.chars() {
        match ch {
            '"' => {
                quoted = !quoted;
                has_word = true;
            }
            c if c.is_whitespace() && !quoted => {
                if has_word {
                    words.push(std::mem::take(&mut cur));
                    has_word = false;
                }
            }
            c => {
                cur.push(c);
                has_word = true;
            }
        }
    }
    if has_word {
        words.push(cur);
    }
    words
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn split_words_honours_quotes() {
        assert_eq!(
            split_words(r#"add-product "Nasi Goreng" 15000  20"#),
            vec!["add-product", "Nasi Goreng", "15000", "20"]
        );
        assert_eq!(split_words("   "), Vec::<String>::new());
        assert_eq!(split_words(r#"go """#), vec!["go", ""]);
    }
}

//! Pretty-printing facility for loader diagnostics
//!
//! The hard part of the formatting (line extraction, span underlining)
//! is delegated to `pest::error::Error::new_from_span`; this module
//! adds aggregation of several reports, a fatal/nonfatal distinction,
//! and colored output.
//!
//! # Example
//!
//! ```rust
//! errs.make("Invalid month")
//!     .span(&loc, "provided here")
//!     .text("'Foo' is not a month name")
//!     .hint("use the 3-letter names Jan, Feb, Mar, ..., Dec");
//! ```

use std::fmt;

use crate::load::parse::Rule;

/// Location of an error
///
/// The file in which the error occured and the precise span within
/// that file
pub type Loc<'i> = (&'i str, pest::Span<'i>);

/// Report for a single error
///
/// All messages should fit in a single line; use several `text` items
/// rather than one with embedded newlines.
#[must_use]
#[derive(Debug)]
pub struct Error {
    /// determines the label (warning/error) and the color (yellow/red)
    fatal: bool,
    /// name of the error
    label: String,
    /// contents of the report, printed in insertion order
    items: Vec<Item>,
}

/// Kinds of items that can be added to an error report
#[derive(Debug)]
enum Item {
    /// code block with an underlined span
    Block(pest::error::Error<Rule>),
    /// important message
    Text(String),
    /// recommendation for a fix
    Hint(String),
}

/// A collection of errors
///
/// Typically one per loaded file, though nothing in the structure
/// assumes a relationship between the reports it holds
#[must_use]
#[derive(Debug, Default)]
pub struct Record {
    /// number of fatal reports among the settled ones; the last report
    /// is still open for modification and counted separately
    fatal: usize,
    contents: Vec<Error>,
}

impl Error {
    fn new<S>(msg: S) -> Self
    where
        S: ToString,
    {
        Self {
            fatal: true,
            label: msg.to_string(),
            items: Vec::new(),
        }
    }

    /// Mark as a warning rather than a fatal error
    pub fn nonfatal(&mut self) -> &mut Self {
        self.fatal = false;
        self
    }

    /// Absorb a pre-existing parsing error
    pub fn from(&mut self, err: pest::error::Error<Rule>) -> &mut Self {
        self.items.push(Item::Block(err.renamed_rules(rule_rename)));
        self
    }

    /// Add a code block and its associated message
    pub fn span<S>(&mut self, loc: &Loc, msg: S) -> &mut Self
    where
        S: ToString,
    {
        self.items.push(Item::Block(
            pest::error::Error::new_from_span(
                pest::error::ErrorVariant::CustomError {
                    message: msg.to_string(),
                },
                loc.1.clone(),
            )
            .with_path(loc.0),
        ));
        self
    }

    /// Add an important note
    pub fn text<S>(&mut self, msg: S) -> &mut Self
    where
        S: ToString,
    {
        self.items.push(Item::Text(msg.to_string()));
        self
    }

    /// Add a hint on how to fix
    pub fn hint<S>(&mut self, msg: S) -> &mut Self
    where
        S: ToString,
    {
        self.items.push(Item::Hint(msg.to_string()));
        self
    }
}

impl Record {
    /// Initialize a new pool of errors
    pub fn new() -> Self {
        Self {
            fatal: 0,
            contents: Vec::new(),
        }
    }

    /// Check if any of the recorded errors is fatal
    pub fn is_fatal(&self) -> bool {
        self.fatal > 0 || self.last_is_fatal()
    }

    fn last_is_fatal(&self) -> bool {
        self.contents.last().map(|e| e.fatal).unwrap_or(false)
    }

    /// Number of fatal errors
    pub fn count_errors(&self) -> usize {
        self.fatal + if self.last_is_fatal() { 1 } else { 0 }
    }

    /// Number of nonfatal errors
    pub fn count_warnings(&self) -> usize {
        self.contents.len() - self.count_errors()
    }

    /// Open a new report in the pool
    ///
    /// The returned handle is how callers attach spans, notes and
    /// hints; the report is fatal unless `nonfatal` is called on it.
    pub fn make<S>(&mut self, msg: S) -> &mut Error
    where
        S: ToString,
    {
        if self.last_is_fatal() {
            self.fatal += 1;
        }
        self.contents.push(Error::new(msg));
        self.contents.last_mut().unwrap()
    }
}

const RED: &str = "\x1b[0;91;1m";
const YELLOW: &str = "\x1b[0;93;1m";
const BLUE: &str = "\x1b[0;96;1m";
const WHITE: &str = "\x1b[0;1m";
const NONE: &str = "\x1b[0m";

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (color, header) = if self.fatal {
            (RED, "--> Error")
        } else {
            (YELLOW, "--> Warning")
        };
        writeln!(f, "{}{}:{} {}{}", color, header, WHITE, self.label, NONE)?;
        for item in &self.items {
            match item {
                Item::Block(err) => {
                    for line in format!("{}", err).split('\n') {
                        writeln!(f, " {}|{}  {}", color, NONE, line)?;
                    }
                }
                Item::Text(txt) => {
                    writeln!(f, " {}|  {}{}{}", color, WHITE, txt, NONE)?;
                }
                Item::Hint(txt) => {
                    writeln!(f, " {}|      {}? hint: {}{}", color, BLUE, NONE, txt)?;
                }
            }
        }
        Ok(())
    }
}

impl fmt::Display for Record {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.contents.is_empty() {
            return Ok(());
        }
        let fatal = self.is_fatal();
        let count = if fatal {
            self.count_errors()
        } else {
            self.count_warnings()
        };
        let color = if fatal { RED } else { YELLOW };
        let trunc = 10;
        // only print the reports with the maximum fatality
        for err in self
            .contents
            .iter()
            .filter(|err| err.fatal == fatal)
            .take(trunc)
        {
            writeln!(f, "{}", err)?;
        }
        if count > trunc {
            writeln!(f, "{} And {} more.", color, count - trunc)?;
        }
        let plural = if count > 1 { "s" } else { "" };
        if fatal {
            writeln!(
                f,
                "{}Fatal: {}{} error{} emitted{}",
                color, WHITE, count, plural, NONE
            )?;
        } else {
            writeln!(
                f,
                "{}Nonfatal: {}{} warning{} emitted{}",
                color, WHITE, count, plural, NONE
            )?;
        }
        Ok(())
    }
}

fn rule_rename(r: &Rule) -> String {
    String::from(match r {
        Rule::EOI => "EOF",
        Rule::WHITESPACE => "at least one whitespace",
        Rule::COMMENT => "a comment",
        Rule::digit => "a digit (0..9)",
        Rule::colon => "a colon (':') separator",
        Rule::semicolon => "a semicolon (';') separator",
        Rule::slash => "a slash ('/') separator",
        Rule::uppercase => "an uppercase letter (start of a month name)",
        Rule::lowercase => "a lowercase letter (rest of a month name)",
        Rule::identifier => "an identifier composed of a..zA..Z0..9-_",
        Rule::month_name => "a month name ('Jan' ... 'Dec')",
        Rule::marker_year => "a year marker ('YYYY:')",
        Rule::marker_month => "a month marker ('Jan:' ... 'Dec:')",
        Rule::marker_day => "a 1- or 2-digit day number",
        Rule::money_amount => "a monetary value ('XXX.XX')",
        Rule::string => "a string of non-'\"' characters",
        Rule::tag_text => "a tag ('\"foo\"')",
        Rule::account => "an account path ('Cat', 'Cat/Sub' or 'Cat/Sub/Detail')",
        Rule::entry => "a dated entry 'DD: Account XXX.XX;'",
        Rule::entries_month => "a sequence of entries for the same month",
        Rule::entries_year => "a sequence of entries for the same year",
        Rule::program => "a sequence of yearly entry blocks",
    })
}

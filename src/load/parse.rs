//! Convert the contents of a ledger file into dated entries

use pest::Parser;
use pest_derive::*;

/// Wrapper around Pest's `Pair`
type Pair<'i> = pest::iterators::Pair<'i, Rule>;
/// Wrapper around Pest's `Pairs`
type Pairs<'i> = pest::iterators::Pairs<'i, Rule>;

use crate::load::error;
use crate::util::{
    date::{Date, Month},
    entry::{Account, Amount, Entry, Tag},
};

/// Pest-generated parser
#[derive(Parser)]
#[grammar = "load/bilan.pest"]
pub struct BilanParser;

/// Extract the entries of file `path`
///
/// The return value may be non-empty even if some errors (including
/// fatal ones) occured: items that validated correctly survive a bad
/// sibling. Callers should determine success not through the return
/// value but by querying `errs` (e.g. `errs.is_fatal()`).
pub fn extract<'i>(path: &'i str, errs: &mut error::Record, contents: &'i str) -> Vec<Entry> {
    match BilanParser::parse(Rule::program, contents) {
        Ok(pairs) => validate(path, errs, pairs),
        Err(e) => {
            errs.make("Parsing failure").from(e.with_path(path));
            Vec::new()
        }
    }
}

// get first and rest of inner
macro_rules! decapitate {
    ( $node:expr ) => {{
        let mut items = $node.into_inner();
        let fst = items.next().unwrap_or_else(|| panic!("No head"));
        (fst, items)
    }};
}

// extract contents of wrapper rule
macro_rules! subrule {
    ( $node:expr ) => {{
        let mut items = $node.into_inner();
        let fst = items.next().unwrap_or_else(|| panic!("No subrule"));
        if items.next().is_some() {
            panic!("Several subrules");
        }
        fst
    }};
}

// pair to usize contents
macro_rules! parse_usize {
    ( $node:expr ) => {
        $node.as_str().parse::<usize>().unwrap()
    };
}

// pair to amount contents
macro_rules! parse_amount {
    ( $node:expr ) => {
        // safe to .unwrap() because the grammar validated it already
        Amount(($node.as_str().parse::<f64>().unwrap() * 100.0).round() as isize)
    };
}

/// Check all year blocks
///
/// Sequentially validates each block, records errors, accumulates the
/// correct entries into the return value.
fn validate<'i>(path: &'i str, errs: &mut error::Record, pairs: Pairs<'i>) -> Vec<Entry> {
    let mut entries = Vec::new();
    for pair in pairs {
        match pair.as_rule() {
            Rule::entries_year => {
                let (head, body) = decapitate!(pair);
                assert_eq!(head.as_rule(), Rule::marker_year);
                let year = parse_usize!(head);
                validate_year(path, errs, year, body, &mut entries);
            }
            Rule::EOI => break,
            _ => unreachable!(),
        }
    }
    entries
}

/// Check the month blocks of one year
///
/// The grammar accepts any `Xxx` as a month marker, the actual name
/// is only checked here so that the diagnostic carries a span.
fn validate_year<'i>(
    path: &'i str,
    errs: &mut error::Record,
    year: usize,
    months: Pairs<'i>,
    entries: &mut Vec<Entry>,
) {
    for pair in months {
        assert_eq!(pair.as_rule(), Rule::entries_month);
        let (head, body) = decapitate!(pair);
        assert_eq!(head.as_rule(), Rule::marker_month);
        let loc = (path, head.as_span());
        let month = match head.as_str().parse::<Month>() {
            Ok(month) => month,
            Err(()) => {
                errs.make("Invalid month")
                    .span(&loc, "provided here")
                    .text(format!("'{}' is not a month name", head.as_str()))
                    .hint("use the 3-letter names Jan, Feb, Mar, ..., Dec");
                continue;
            }
        };
        for sub in body {
            if let Some(entry) = validate_entry(path, errs, year, month, sub) {
                entries.push(entry);
            }
        }
    }
}

/// Check one dated entry
///
/// The grammar guarantees the shape; the date itself can still be
/// invalid (Feb 30, day 0) and is diagnosed with a fix hint.
fn validate_entry<'i>(
    path: &'i str,
    errs: &mut error::Record,
    year: usize,
    month: Month,
    pair: Pair<'i>,
) -> Option<Entry> {
    assert_eq!(pair.as_rule(), Rule::entry);
    let (day, mut items) = decapitate!(pair);
    assert_eq!(day.as_rule(), Rule::marker_day);
    let loc = (path, day.as_span());
    let date = match Date::from(year, month, parse_usize!(day)) {
        Ok(date) => date,
        Err(e) => {
            errs.make("Invalid date")
                .span(&loc, "provided here")
                .text(format!("{}", e))
                .hint(e.fix_hint());
            return None;
        }
    };
    let account = items.next().unwrap_or_else(|| panic!("No account"));
    assert_eq!(account.as_rule(), Rule::account);
    let account = read_account(account);
    let val_pair = items.next().unwrap_or_else(|| panic!("No amount"));
    assert_eq!(val_pair.as_rule(), Rule::money_amount);
    let val_loc = (path, val_pair.as_span());
    let value = parse_amount!(val_pair);
    if !value.nonzero() {
        errs.make("Entry has no effect")
            .nonfatal()
            .span(&val_loc, "zero amount")
            .hint("record the actual amount or remove the entry");
    }
    let tag = match items.next() {
        Some(t) => {
            assert_eq!(t.as_rule(), Rule::tag_text);
            Tag(subrule!(t).as_str().to_string())
        }
        None => Tag(String::new()),
    };
    Some(Entry {
        date,
        account,
        value,
        tag,
    })
}

/// Parse an account path into its segments
///
/// Grammar ensures this cannot fail and caps the depth at three
fn read_account(pair: Pair) -> Account {
    let parts: Vec<&str> = pair.into_inner().map(|p| p.as_str()).collect();
    Account::from_parts(&parts)
}

//! Reading ledger files into memory

pub mod error;
pub mod parse;

use crate::util::entry::Entry;

/// Read and validate a ledger file
///
/// `None` means the file is unreadable or fatally malformed. The
/// caller is responsible for displaying whatever `errs` collected,
/// including nonfatal diagnostics attached to a `Some` result.
pub fn read_entries(filename: &str, errs: &mut error::Record) -> Option<Vec<Entry>> {
    let contents = match std::fs::read_to_string(filename) {
        Ok(contents) => contents,
        Err(_) => {
            errs.make("File not found")
                .text(format!("Ledger file loaded is '{}'", filename))
                .hint("check the path or create the file");
            return None;
        }
    };
    let entries = parse::extract(filename, errs, &contents);
    if errs.is_fatal() {
        None
    } else {
        Some(entries)
    }
}

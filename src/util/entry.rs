//! Ledger entries and the accounts they belong to
//!
//! An `Account` is the hierarchical entity a report row describes:
//! a category, optionally refined by a subject, optionally refined
//! again by a detail (`Home`, `Home/Heating`, `Home/Heating/Wood`).

use std::fmt;
use std::ops;

use crate::util::date::Date;

/// A monetary value in hundredths of the ledger's currency unit
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Amount(pub isize);

impl Amount {
    pub fn nonzero(self) -> bool {
        self.0 != 0
    }
}

impl ops::AddAssign for Amount {
    fn add_assign(&mut self, other: Self) {
        self.0 += other.0;
    }
}

impl fmt::Display for Amount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        write!(f, "{}{}.{:02}", sign, self.0.abs() / 100, self.0.abs() % 100)
    }
}

/// Free-text annotation carried by an entry
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tag(pub String);

impl fmt::Display for Tag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// How deep into the account hierarchy a report should look
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Depth {
    Category,
    Subject,
    Detail,
}

/// A `category[/subject[/detail]]` path
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub struct Account {
    category: String,
    subject: Option<String>,
    detail: Option<String>,
}

impl Account {
    /// Build from up to three path segments
    ///
    /// A detail without a subject is not representable, extra segments
    /// are rejected by the grammar before this is reached.
    pub fn from_parts(parts: &[&str]) -> Self {
        Self {
            category: parts[0].to_string(),
            subject: parts.get(1).map(|s| s.to_string()),
            detail: parts.get(2).map(|s| s.to_string()),
        }
    }

    /// Split a `'/'`-separated path into an account
    pub fn from_path(path: &str) -> Self {
        Self::from_parts(&path.split('/').collect::<Vec<_>>())
    }

    /// Forget the components finer than `depth`
    ///
    /// Truncation is how one entry contributes to its parent rows:
    /// `Home/Heating/Wood` truncated to `Depth::Subject` is `Home/Heating`.
    pub fn truncate(&self, depth: Depth) -> Self {
        Self {
            category: self.category.clone(),
            subject: match depth {
                Depth::Category => None,
                _ => self.subject.clone(),
            },
            detail: match depth {
                Depth::Detail => self.detail.clone(),
                _ => None,
            },
        }
    }
}

impl fmt::Display for Account {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.category)?;
        if let Some(subject) = &self.subject {
            write!(f, "/{}", subject)?;
        }
        if let Some(detail) = &self.detail {
            write!(f, "/{}", detail)?;
        }
        Ok(())
    }
}

/// One expense recorded in the ledger
#[derive(Debug, Clone)]
pub struct Entry {
    pub date: Date,
    pub account: Account,
    pub value: Amount,
    pub tag: Tag,
}

#[cfg(test)]
mod test {
    use super::*;

    macro_rules! shows {
        ( $a:expr, $s:expr ) => {
            assert_eq!(format!("{}", $a), $s);
        };
    }

    #[test]
    fn amount_display() {
        shows!(Amount(0), "0.00");
        shows!(Amount(5), "0.05");
        shows!(Amount(50), "0.50");
        shows!(Amount(100), "1.00");
        shows!(Amount(12345), "123.45");
        shows!(Amount(-12345), "-123.45");
        shows!(Amount(-5), "-0.05");
    }

    #[test]
    fn amount_accumulates() {
        let mut a = Amount(100);
        a += Amount(250);
        assert_eq!(a, Amount(350));
        a += Amount(-400);
        assert_eq!(a, Amount(-50));
    }

    #[test]
    fn account_paths() {
        shows!(Account::from_path("Home"), "Home");
        shows!(Account::from_path("Home/Heating"), "Home/Heating");
        shows!(Account::from_path("Home/Heating/Wood"), "Home/Heating/Wood");
    }

    #[test]
    fn account_truncation() {
        let acc = Account::from_path("Home/Heating/Wood");
        shows!(acc.truncate(Depth::Category), "Home");
        shows!(acc.truncate(Depth::Subject), "Home/Heating");
        shows!(acc.truncate(Depth::Detail), "Home/Heating/Wood");
        let flat = Account::from_path("Food");
        shows!(flat.truncate(Depth::Detail), "Food");
    }
}

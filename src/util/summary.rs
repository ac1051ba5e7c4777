//! Aggregation of ledger entries into per-account monthly totals

use std::collections::BTreeMap;
use std::ops;

use num_traits::FromPrimitive;

use crate::util::{
    date::Month,
    entry::{Account, Amount, Depth, Entry},
};

/// Twelve month slots of expense totals for one account over one year
///
/// Slots accumulate signed amounts (refunds subtract), but are read
/// clamped to zero: a month that ends up negative counts as having no
/// expense recorded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Breakdown {
    months: [Amount; 12],
}

impl Breakdown {
    pub fn new() -> Self {
        Self {
            months: [Amount(0); 12],
        }
    }

    /// Accumulate a value into the slot of `month`
    pub fn add(&mut self, month: Month, value: Amount) {
        self.months[month as usize] += value;
    }

    /// Recorded expense for `month`, clamped to zero
    pub fn amount(&self, month: Month) -> Amount {
        Amount(self.months[month as usize].0.max(0))
    }

    /// Sum of all (clamped) month slots
    pub fn total(&self) -> Amount {
        let mut total = Amount(0);
        for n in 0..12 {
            total += self.amount(Month::from_usize(n).unwrap());
        }
        total
    }

    /// Months with a strictly positive recorded expense, in calendar order
    pub fn active(&self) -> Vec<(Month, Amount)> {
        (0..12)
            .map(|n| Month::from_usize(n).unwrap())
            .map(|m| (m, self.amount(m)))
            .filter(|(_, a)| a.0 > 0)
            .collect()
    }
}

impl ops::AddAssign<&Entry> for Breakdown {
    fn add_assign(&mut self, entry: &Entry) {
        self.add(entry.date.month(), entry.value);
    }
}

/// Ordered per-account breakdowns for a single report year
///
/// Rows are keyed by the entry accounts truncated to the report depth,
/// so one entry contributes to exactly one row.
#[derive(Debug)]
pub struct YearSummary {
    year: u16,
    depth: Depth,
    rows: BTreeMap<Account, Breakdown>,
}

impl YearSummary {
    pub fn new(year: u16, depth: Depth) -> Self {
        Self {
            year,
            depth,
            rows: BTreeMap::new(),
        }
    }

    pub fn year(&self) -> u16 {
        self.year
    }

    /// Accumulate all entries of the report year, ignore the rest
    pub fn register(&mut self, entries: &[Entry]) {
        for entry in entries {
            if entry.date.year() != self.year {
                continue;
            }
            let key = entry.account.truncate(self.depth);
            let row = self.rows.entry(key).or_insert_with(Breakdown::new);
            *row += entry;
        }
    }

    /// Rows in account order
    pub fn rows(&self) -> impl Iterator<Item = (&Account, &Breakdown)> {
        self.rows.iter()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::util::date::Date;
    use crate::util::entry::Tag;
    use Month::*;

    macro_rules! entry {
        ( $y:tt - $m:tt - $d:tt, $acc:expr, $val:expr ) => {
            Entry {
                date: Date::from($y, $m, $d).unwrap(),
                account: Account::from_path($acc),
                value: Amount($val),
                tag: Tag(String::new()),
            }
        };
    }

    #[test]
    fn monthly_binning() {
        let entries = vec![
            entry!(2024-Jan-5, "Home/Heating", 11840),
            entry!(2024-Jan-20, "Home/Heating", 3000),
            entry!(2024-Oct-3, "Home/Heating", 23000),
            entry!(2024-Mar-1, "Food", 5420),
        ];
        let mut summary = YearSummary::new(2024, Depth::Subject);
        summary.register(&entries);
        let rows: Vec<_> = summary.rows().collect();
        assert_eq!(rows.len(), 2);
        let (account, breakdown) = rows[1];
        assert_eq!(format!("{}", account), "Home/Heating");
        assert_eq!(breakdown.amount(Jan), Amount(14840));
        assert_eq!(breakdown.amount(Feb), Amount(0));
        assert_eq!(breakdown.amount(Oct), Amount(23000));
        assert_eq!(breakdown.total(), Amount(37840));
        assert_eq!(
            breakdown.active(),
            vec![(Jan, Amount(14840)), (Oct, Amount(23000))]
        );
    }

    #[test]
    fn other_years_ignored() {
        let entries = vec![
            entry!(2023-Dec-31, "Food", 1000),
            entry!(2024-Jan-1, "Food", 2000),
            entry!(2025-Jan-1, "Food", 4000),
        ];
        let mut summary = YearSummary::new(2024, Depth::Category);
        summary.register(&entries);
        let rows: Vec<_> = summary.rows().collect();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].1.total(), Amount(2000));
    }

    #[test]
    fn depth_grouping() {
        let entries = vec![
            entry!(2024-Jan-1, "Home/Heating/Gas", 100),
            entry!(2024-Jan-2, "Home/Heating/Wood", 200),
            entry!(2024-Jan-3, "Home/Repairs", 400),
        ];
        let mut by_category = YearSummary::new(2024, Depth::Category);
        by_category.register(&entries);
        assert_eq!(by_category.rows().count(), 1);
        assert_eq!(by_category.rows().next().unwrap().1.total(), Amount(700));

        let mut by_subject = YearSummary::new(2024, Depth::Subject);
        by_subject.register(&entries);
        assert_eq!(by_subject.rows().count(), 2);

        let mut by_detail = YearSummary::new(2024, Depth::Detail);
        by_detail.register(&entries);
        assert_eq!(by_detail.rows().count(), 3);
    }

    #[test]
    fn negative_months_count_as_silent() {
        let entries = vec![
            entry!(2024-Feb-1, "Food", 5000),
            entry!(2024-Feb-10, "Food", -8000),
            entry!(2024-Jun-1, "Food", 2000),
        ];
        let mut summary = YearSummary::new(2024, Depth::Category);
        summary.register(&entries);
        let breakdown = summary.rows().next().unwrap().1;
        assert_eq!(breakdown.amount(Feb), Amount(0));
        assert_eq!(breakdown.total(), Amount(2000));
        assert_eq!(breakdown.active(), vec![(Jun, Amount(2000))]);
    }

    #[test]
    fn empty_breakdown_has_no_active_month() {
        let breakdown = Breakdown::new();
        assert!(breakdown.active().is_empty());
        assert_eq!(breakdown.total(), Amount(0));
    }
}

//! Expense pattern classification and monthly-average estimation
//!
//! Given the annual total and the monthly breakdown of one account,
//! decide how its spending is best summarized as a single average
//! monthly figure: a steady year-round cost divides by 12, a seasonal
//! cost divides by its active window, irregular lump sums are spread
//! as a budget set-aside, and a year still in progress averages over
//! the elapsed months only.
//!
//! `estimate` is total and pure: every degenerate input maps to a
//! defined result instead of an error, and the "now" it compares the
//! target year against is the injected reference date, never the
//! wall clock.

use std::fmt;

use crate::util::{date::Date, entry::Amount, summary::Breakdown};

/// Patterns with at most this share of active months are occasional
const SPARSE_RATIO: f64 = 0.25;
/// Max/min spread beyond which few active months count as irregular
const VARIABILITY_RATIO: f64 = 2.5;
/// Multiple of the active mean beyond which an amount is an outlier
const OUTLIER_FACTOR: f64 = 2.0;
/// Minimum active months for a year-round classification
const FULL_YEAR_MONTHS: usize = 9;
/// Active-month count at or below which irregularity is inspected
const FEW_MONTHS: usize = 3;

/// How the monthly average was derived
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    /// nothing to estimate: no total, or no month with expenses
    NoData,
    /// annual total known but monthly detail unavailable
    NoBreakdown,
    /// expenses in (nearly) every month of a completed year
    FullYear,
    /// expenses confined to a known window of a completed year
    Seasonal,
    /// sparse or irregular expenses, spread as a set-aside
    OccasionalBudget,
    /// the target year is still unfolding
    CurrentPeriod,
    /// residual arm: few active months yet not flagged occasional
    ConcentratedBudget,
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        use Method::*;
        let label = match self {
            NoData => "no data",
            NoBreakdown => "no breakdown",
            FullYear => "full year",
            Seasonal => "seasonal",
            OccasionalBudget => "occasional",
            CurrentPeriod => "in progress",
            ConcentratedBudget => "concentrated",
        };
        write!(f, "{}", label)
    }
}

/// How well the chosen method's assumptions fit the observed pattern
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Reliability {
    None,
    Low,
    Medium,
    High,
}

impl fmt::Display for Reliability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        use Reliability::*;
        let label = match self {
            None => "none",
            Low => "low",
            Medium => "medium",
            High => "high",
        };
        write!(f, "{}", label)
    }
}

/// Knobs of a single estimation
#[derive(Debug, Clone, Copy)]
pub struct Options {
    /// Calendar year the breakdown belongs to
    pub target_year: u16,
    /// The "now" used to detect a year still in progress
    pub reference: Date,
    /// Skip automatic classification, apply this method's formula
    pub forced: Option<Method>,
}

impl Options {
    pub fn for_year(target_year: u16, reference: Date) -> Self {
        Self {
            target_year,
            reference,
            forced: None,
        }
    }

    pub fn force(mut self, method: Method) -> Self {
        self.forced = Some(method);
        self
    }
}

/// The summarized spending of one account over one year
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Estimate {
    /// average monthly expense, rounded to the hundredth, never negative
    pub monthly: Amount,
    pub method: Method,
    pub reliability: Reliability,
    /// the input pattern is sparse/irregular: the average is a
    /// set-aside for budgeting, not a forecast
    pub occasional: bool,
    /// rationale for the chosen method and its driving number
    pub explanation: String,
    /// active periods out of 12, in words
    pub pattern: String,
}

impl Estimate {
    /// The all-zero result for inputs with nothing to estimate
    fn void(explanation: &str, pattern: &str) -> Self {
        Self {
            monthly: Amount(0),
            method: Method::NoData,
            reliability: Reliability::None,
            occasional: false,
            explanation: explanation.to_string(),
            pattern: pattern.to_string(),
        }
    }
}

/// What the active months of a breakdown look like
///
/// Computed once, before method selection: whether the pattern is
/// occasional is a property of the input, not of the winning method.
struct Shape {
    /// number of months with expenses
    active: usize,
    /// calendar number (1..=12) of the latest active month
    last_active: usize,
    /// sparse or irregular enough that a flat average misleads
    occasional: bool,
}

impl Shape {
    /// `None` when no month has a positive amount
    fn of(breakdown: &Breakdown) -> Option<Self> {
        let active = breakdown.active();
        let (last, _) = *active.last()?;
        let amounts: Vec<f64> = active.iter().map(|(_, a)| a.0 as f64).collect();
        let mean = amounts.iter().sum::<f64>() / amounts.len() as f64;
        let mut min = f64::INFINITY;
        let mut max = 0.0_f64;
        for &a in &amounts {
            min = min.min(a);
            max = max.max(a);
        }
        let high_variability = amounts.len() > 1 && max / min > VARIABILITY_RATIO;
        let has_outlier = amounts.iter().any(|&a| a > OUTLIER_FACTOR * mean);
        let sparsity = amounts.len() as f64 / 12.0;
        Some(Self {
            active: amounts.len(),
            last_active: last.number(),
            occasional: sparsity <= SPARSE_RATIO
                || (amounts.len() <= FEW_MONTHS && (high_variability || has_outlier)),
        })
    }
}

/// Divide an amount into equal parts, rounded half-up to the hundredth
fn split(total: Amount, parts: usize) -> Amount {
    Amount((total.0 as f64 / parts as f64).round() as isize)
}

/// Summarize one account-year as an average monthly expense
///
/// Never errors: a missing or degenerate input yields the `NoData` or
/// `NoBreakdown` result with reliability to match. Classification is
/// first-match in a fixed priority order; an in-progress year wins
/// over everything because an annual-style average is meaningless for
/// a partial year, and occasional detection wins over the completed
/// year arms because a flat spread is the only honest summary of
/// irregular lump sums.
pub fn estimate(total: Amount, breakdown: Option<&Breakdown>, opts: &Options) -> Estimate {
    if total.0 <= 0 {
        return Estimate::void("no expense recorded", "no data");
    }
    let breakdown = match breakdown {
        Some(b) => b,
        None => {
            return Estimate {
                monthly: split(total, 12),
                method: Method::NoBreakdown,
                reliability: Reliability::Low,
                occasional: false,
                explanation: "annual total spread evenly over 12 months, monthly detail unavailable"
                    .to_string(),
                pattern: "monthly detail unavailable".to_string(),
            }
        }
    };
    let shape = match Shape::of(breakdown) {
        Some(shape) => shape,
        None => return Estimate::void("total has no positive month to attribute", "no active periods"),
    };

    let method = opts.forced.unwrap_or_else(|| {
        if opts.target_year == opts.reference.year() {
            Method::CurrentPeriod
        } else if shape.occasional {
            Method::OccasionalBudget
        } else if shape.active >= FULL_YEAR_MONTHS {
            Method::FullYear
        } else if shape.active >= FEW_MONTHS {
            Method::Seasonal
        } else {
            Method::ConcentratedBudget
        }
    });

    let pattern = format!("active in {} of 12 months", shape.active);
    match method {
        Method::NoData => Estimate::void("no expense recorded", &pattern),
        Method::NoBreakdown => Estimate {
            monthly: split(total, 12),
            method,
            reliability: Reliability::Low,
            occasional: false,
            explanation: "annual total spread evenly over 12 months, monthly detail unavailable"
                .to_string(),
            pattern,
        },
        Method::CurrentPeriod => {
            let elapsed = opts.reference.month().number();
            let window = elapsed.min(shape.last_active);
            let monthly = if window == 0 {
                Amount(0)
            } else {
                split(total, window)
            };
            let (reliability, explanation) = if shape.occasional {
                (
                    Reliability::Low,
                    format!(
                        "year in progress, averaged over {} elapsed months; \
                         sparse pattern, treat as a budget set-aside rather than a forecast",
                        window
                    ),
                )
            } else {
                (
                    Reliability::High,
                    format!("year in progress, averaged over {} elapsed months", window),
                )
            };
            Estimate {
                monthly,
                method,
                reliability,
                occasional: shape.occasional,
                explanation,
                pattern,
            }
        }
        Method::OccasionalBudget => Estimate {
            monthly: split(total, 12),
            method,
            reliability: Reliability::Medium,
            occasional: shape.occasional,
            explanation: format!(
                "irregular spending in {} of 12 months, spread as a monthly \
                 set-aside rather than a forecast",
                shape.active
            ),
            pattern,
        },
        Method::FullYear => Estimate {
            monthly: split(total, 12),
            method,
            reliability: Reliability::High,
            occasional: shape.occasional,
            explanation: format!("year-round expense, active in {} of 12 months", shape.active),
            pattern,
        },
        Method::Seasonal => Estimate {
            monthly: split(total, shape.last_active),
            method,
            reliability: Reliability::Medium,
            occasional: shape.occasional,
            explanation: format!(
                "seasonal expense, averaged over a {}-month window",
                shape.last_active
            ),
            pattern,
        },
        Method::ConcentratedBudget => Estimate {
            monthly: split(total, 12),
            method,
            reliability: Reliability::Medium,
            occasional: shape.occasional,
            explanation: format!(
                "expense concentrated in {} months, spread over the full year",
                shape.active
            ),
            pattern,
        },
    }
}

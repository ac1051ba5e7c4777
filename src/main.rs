mod cli;
mod estimate;
mod load;
mod util;

use clap::{App, Arg};
use num_traits::FromPrimitive;

use cli::table::{Row, Table};
use estimate::{estimate, Options};
use util::{
    date::{Date, Month},
    entry::Depth,
    summary::YearSummary,
};

fn main() {
    let matches = App::new("bilan")
        .version("0.1.0")
        .about("Bookkeeping reports with expense pattern estimation")
        .arg(
            Arg::with_name("FILE")
                .help("Ledger file to read")
                .required(true)
                .index(1),
        )
        .arg(
            Arg::with_name("year")
                .short("y")
                .long("year")
                .takes_value(true)
                .help("Report year (defaults to the year of the reference date)"),
        )
        .arg(
            Arg::with_name("depth")
                .short("d")
                .long("depth")
                .takes_value(true)
                .possible_values(&["category", "subject", "detail"])
                .default_value("category")
                .help("Granularity of the report rows"),
        )
        .arg(
            Arg::with_name("today")
                .long("today")
                .takes_value(true)
                .value_name("YYYY-MM-DD")
                .help("Override the reference date, for reproducible reports"),
        )
        .arg(
            Arg::with_name("explain")
                .long("explain")
                .help("Print the estimation rationale under the table"),
        )
        .get_matches();

    let filename = matches.value_of("FILE").unwrap();
    let mut errs = load::error::Record::new();
    let entries = load::read_entries(filename, &mut errs);
    print!("{}", errs);
    let entries = match entries {
        Some(entries) => entries,
        None => std::process::exit(1),
    };

    let reference = match matches.value_of("today") {
        Some(s) => match parse_reference(s) {
            Some(date) => date,
            None => {
                eprintln!("'{}' is not a valid reference date (expected YYYY-MM-DD)", s);
                std::process::exit(2);
            }
        },
        None => today(),
    };
    let year = match matches.value_of("year") {
        Some(s) => match s.parse::<u16>() {
            Ok(year) => year,
            Err(_) => {
                eprintln!("'{}' is not a valid year", s);
                std::process::exit(2);
            }
        },
        None => reference.year(),
    };
    let depth_name = matches.value_of("depth").unwrap();
    let depth = match depth_name {
        "subject" => Depth::Subject,
        "detail" => Depth::Detail,
        _ => Depth::Category,
    };

    let mut summary = YearSummary::new(year, depth);
    summary.register(&entries);
    if summary.is_empty() {
        println!("No entries recorded for {}", year);
        return;
    }

    let opts = Options::for_year(year, reference);
    let rows: Vec<Row> = summary
        .rows()
        .map(|(account, breakdown)| {
            let total = breakdown.total();
            let est = estimate(total, Some(breakdown), &opts);
            (account.clone(), total, est)
        })
        .collect();

    let table = Table::from(&rows).with_title(format!("{} by {}", summary.year(), depth_name));
    println!("{}", table);

    if matches.is_present("explain") {
        for (account, _, est) in &rows {
            println!("{}: {}", account, est.explanation);
        }
    }
}

/// Today according to the local wall clock
///
/// The only place the clock is read; everything downstream receives
/// the reference date as a value.
fn today() -> Date {
    use chrono::Datelike;
    let now = chrono::Local::now();
    Date::from(
        now.year() as usize,
        Month::from_u32(now.month0()).unwrap(),
        now.day() as usize,
    )
    .unwrap()
}

/// Parse a `YYYY-MM-DD` reference date override
fn parse_reference(s: &str) -> Option<Date> {
    let mut parts = s.split('-');
    let year = parts.next()?.parse::<usize>().ok()?;
    let month = parts.next()?.parse::<usize>().ok()?;
    let day = parts.next()?.parse::<usize>().ok()?;
    if parts.next().is_some() {
        return None;
    }
    let month = Month::from_usize(month.checked_sub(1)?)?;
    Date::from(year, month, day).ok()
}

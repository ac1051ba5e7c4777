//! Render per-account estimates as a box-drawing table

use std::fmt;

use crate::estimate::Estimate;
use crate::util::entry::{Account, Amount};

/// One report line: the account, its annual total, its estimate
pub type Row = (Account, Amount, Estimate);

pub struct Table<'d> {
    title: String,
    data: &'d [Row],
}

impl<'d> Table<'d> {
    pub fn from(data: &'d [Row]) -> Self {
        Self {
            title: String::new(),
            data,
        }
    }

    pub fn with_title<S>(mut self, title: S) -> Self
    where
        S: ToString,
    {
        self.title = title.to_string();
        self
    }

    fn to_formatter(&self) -> GridFmt {
        let mut grid = GridFmt::with_columns(vec![
            ColFmt::left("Account"),
            ColFmt::right("Total"),
            ColFmt::right("Monthly"),
            ColFmt::left("Method"),
            ColFmt::left("Reliability"),
            ColFmt::left("Pattern"),
        ]);
        for (account, total, est) in self.data {
            grid.push_line(vec![
                BoxFmt::from(format!("{}", account)),
                BoxFmt::amount(*total),
                BoxFmt::amount(est.monthly),
                BoxFmt::from(format!("{}", est.method)),
                BoxFmt::from(format!("{}", est.reliability)),
                BoxFmt::from(est.pattern.clone()),
            ]);
        }
        grid
    }
}

struct BoxFmt {
    width: usize,
    text: String,
}

struct ColFmt {
    width: usize,
    right: bool,
    label: BoxFmt,
    boxes: Vec<BoxFmt>,
}

struct GridFmt {
    columns: Vec<ColFmt>,
}

impl BoxFmt {
    fn from(text: String) -> Self {
        let width = text.chars().count();
        Self { text, width }
    }

    fn amount(a: Amount) -> Self {
        if a.nonzero() {
            Self::from(format!("{}", a))
        } else {
            Self::from(String::new())
        }
    }

    fn write(&self, f: &mut fmt::Formatter, width: usize, right: bool) -> fmt::Result {
        let pad = " ".repeat(width.saturating_sub(self.width));
        if right {
            write!(f, " {}{} ", pad, self.text)
        } else {
            write!(f, " {}{} ", self.text, pad)
        }
    }
}

impl ColFmt {
    fn left(label: &str) -> Self {
        Self::with_label(label, false)
    }

    fn right(label: &str) -> Self {
        Self::with_label(label, true)
    }

    fn with_label(label: &str, right: bool) -> Self {
        let label = BoxFmt::from(label.to_string());
        Self {
            width: label.width,
            right,
            label,
            boxes: Vec::new(),
        }
    }

    fn push(&mut self, b: BoxFmt) {
        self.width = self.width.max(b.width);
        self.boxes.push(b);
    }

    fn write_label(&self, f: &mut fmt::Formatter) -> fmt::Result {
        self.label.write(f, self.width, false)
    }

    fn write_item(&self, f: &mut fmt::Formatter, idx: usize) -> fmt::Result {
        self.boxes[idx].write(f, self.width, self.right)
    }

    fn hline(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", HLINE.repeat(self.width + 2))
    }
}

impl GridFmt {
    fn with_columns(columns: Vec<ColFmt>) -> Self {
        Self { columns }
    }

    fn push_line(&mut self, boxes: Vec<BoxFmt>) {
        for (i, b) in boxes.into_iter().enumerate() {
            self.columns[i].push(b);
        }
    }

    fn len(&self) -> usize {
        self.columns[0].boxes.len()
    }

    fn border(
        &self,
        f: &mut fmt::Formatter,
        start: &str,
        mid: &str,
        end: &str,
    ) -> fmt::Result {
        write!(f, "{}", start)?;
        for (i, c) in self.columns.iter().enumerate() {
            if i > 0 {
                write!(f, "{}", mid)?;
            }
            c.hline(f)?;
        }
        writeln!(f, "{}", end)
    }
}

impl fmt::Display for Table<'_> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        if !self.title.is_empty() {
            writeln!(f, "{}", self.title)?;
        }
        write!(f, "{}", self.to_formatter())
    }
}

impl fmt::Display for GridFmt {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        self.border(f, ULCORNER, LOJOIN, URCORNER)?;
        write!(f, "{}", VLINE)?;
        for c in &self.columns {
            c.write_label(f)?;
            write!(f, "{}", VLINE)?;
        }
        writeln!(f)?;
        self.border(f, RTJOIN, CROSS, LTJOIN)?;
        for idx in 0..self.len() {
            write!(f, "{}", VLINE)?;
            for c in &self.columns {
                c.write_item(f, idx)?;
                write!(f, "{}", VLINE)?;
            }
            writeln!(f)?;
        }
        self.border(f, DLCORNER, HIJOIN, DRCORNER)
    }
}

const HLINE: &str = "─";
const VLINE: &str = "│";
const ULCORNER: &str = "┌";
const URCORNER: &str = "┐";
const DLCORNER: &str = "└";
const DRCORNER: &str = "┘";
const LTJOIN: &str = "┤";
const RTJOIN: &str = "├";
const HIJOIN: &str = "┴";
const LOJOIN: &str = "┬";
const CROSS: &str = "┼";

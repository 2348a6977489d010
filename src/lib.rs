use std::{
    error,
    fmt::Display,
    fs::File,
    io::{self, BufRead, BufReader, BufWriter, Write},
    path::{Path, PathBuf},
};

use anyhow::{Context, Result};
use clap::Parser;
use log::debug;

pub mod logging;
mod mountain;

pub use mountain::{Mountain, MountainBuilder, Survey, END_MARKER, START_MARKER};

#[derive(Debug, PartialEq, Eq)]
pub enum Error {
    InconsistentRow(usize, usize),
    InvalidChar(char),
    DuplicateMarker(char, Location, Location),
    MissingMarker(char),
}

impl Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Error::InconsistentRow(expect_col_n, this_col_n) => write!(
                f,
                "Expect {} character(s) in one row, given {}.",
                expect_col_n, this_col_n
            ),
            Error::InvalidChar(c) => write!(f, "Invalid character({}) in height map text.", c),
            Error::DuplicateMarker(marker, first, second) => write!(
                f,
                "Marker({}) appears more than once, first at {}, again at {}.",
                marker, first, second
            ),
            Error::MissingMarker(marker) => {
                write!(f, "Marker({}) not found in height map text.", marker)
            }
        }
    }
}

impl error::Error for Error {}

#[derive(Debug, Parser)]
pub struct CLIArgs {
    /// Height map file, read from stdin if not given
    #[arg(short = 'i', long = "input")]
    pub input_path: Option<PathBuf>,
    /// File to write the answer to, stdout if not given
    #[arg(short = 'o', long = "output")]
    pub output_path: Option<PathBuf>,
    /// Print the found path over the height map to stderr
    #[arg(short = 'p', long)]
    pub show_path: bool,
    /// Enable debug logging
    #[arg(short, long)]
    pub verbose: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Right,
    Down,
    Left,
    Up,
}

impl Direction {
    /// Order of this slice decides which predecessor wins among equally short paths.
    pub fn all_dirs() -> &'static [Direction] {
        static ALL_DIRECTIONS: [Direction; 4] = [
            Direction::Right,
            Direction::Down,
            Direction::Left,
            Direction::Up,
        ];

        &ALL_DIRECTIONS
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Location {
    r: usize,
    c: usize,
}

impl Display for Location {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.r, self.c)
    }
}

impl Location {
    pub fn new(r: usize, c: usize) -> Self {
        Self { r, c }
    }

    pub fn row(&self) -> usize {
        self.r
    }

    pub fn col(&self) -> usize {
        self.c
    }

    pub fn neighbor(&self, dir: Direction) -> Option<Self> {
        match dir {
            Direction::Up if self.r > 0 => Some(Location::new(self.r - 1, self.c)),
            Direction::Right => Some(Location::new(self.r, self.c + 1)),
            Direction::Down => Some(Location::new(self.r + 1, self.c)),
            Direction::Left if self.c > 0 => Some(Location::new(self.r, self.c - 1)),
            _ => None,
        }
    }
}

pub fn read_survey<R: BufRead>(reader: R) -> Result<Survey> {
    let mut builder = MountainBuilder::new();
    for (ind, line) in reader.lines().enumerate() {
        let line =
            line.with_context(|| format!("Failed to read line {} of given input.", ind + 1))?;
        let line = line.trim_end();
        if line.is_empty() {
            continue;
        }

        builder
            .add_row(line)
            .with_context(|| format!("Invalid height map text in line {}.", ind + 1))?;
    }

    let survey = builder.build()?;
    debug!(
        "Read height map of {}x{}, start at {}, end at {}.",
        survey.mountain.row_n(),
        survey.mountain.col_n(),
        survey.start,
        survey.end
    );

    Ok(survey)
}

pub fn open_input(path: Option<&Path>) -> Result<Box<dyn BufRead>> {
    match path {
        Some(path) => {
            let file = File::open(path)
                .with_context(|| format!("Failed to open given file({}).", path.display()))?;
            Ok(Box::new(BufReader::new(file)))
        }
        None => Ok(Box::new(BufReader::new(io::stdin()))),
    }
}

pub fn open_output(path: Option<&Path>) -> Result<Box<dyn Write>> {
    match path {
        Some(path) => {
            let file = File::create(path)
                .with_context(|| format!("Failed to create given file({}).", path.display()))?;
            Ok(Box::new(BufWriter::new(file)))
        }
        None => Ok(Box::new(io::stdout())),
    }
}

/// Writes the bare number, without any trailing newline.
pub fn write_answer(output: &mut dyn Write, answer: usize) -> Result<()> {
    write!(output, "{}", answer).context("Failed to write answer.")?;
    output.flush().context("Failed to flush answer.")
}

pub fn print_path(mountain: &Mountain, path: &[Location]) {
    for line in mountain.render_path(path) {
        eprintln!("{}", line);
    }
}

//! Sources of raw (still unvalidated) size tokens.
//!
//! Everything here hands out `String`s (the prompter wraps them in a
//! `Result`, since reading a terminal can fail). Turning them into numbers is the
//! job of the scenario builders, which know the index of every token and
//! can report it if it is bad.

use crate::utils::*;
use clap::ValueEnum;

#[derive(Copy, Clone, PartialEq, Eq, ValueEnum, Debug)]
pub enum InputFormat {
    /// Sizes separated by whitespace, commas or newlines; `#` starts a comment
    List,
    /// A header line, then `id,size` rows
    Csv,
}

/// Defines the interface for reading process sizes from a file.
///
/// The user can implement their own types as needed.
pub trait SizeGen {
    fn new(path: PathBuf) -> Self where Self: Sized;
    /// Either the raw size tokens in file order, or some arbitrary
    /// type that implements [std::error::Error].
    fn read_sizes(&self) -> Result<Vec<String>, Box<dyn std::error::Error>>;
}

pub struct ListParser {
    pub path: PathBuf,
}

impl SizeGen for ListParser {
    fn new(path: PathBuf) -> Self {
        Self { path }
    }

    fn read_sizes(&self) -> Result<Vec<String>, Box<dyn std::error::Error>> {
        let reader = BufReader::new(std::fs::File::open(&self.path)?);
        let mut res = vec![];
        for line in reader.lines() {
            let line = line?;
            let content = match line.split_once('#') {
                Some((before, _))   => { before },
                None                => { line.as_str() }
            };
            res.extend(
                content.split(|c: char| c == ',' || c.is_whitespace())
                    .filter(|tok| !tok.is_empty())
                    .map(String::from)
            );
        }

        Ok(res)
    }
}

/// Same spirit as `minimalloc`'s CSV: first line is the header, first
/// column is an id we do not care about, second column is the size.
pub struct CsvParser {
    pub path: PathBuf,
}

impl SizeGen for CsvParser {
    fn new(path: PathBuf) -> Self {
        Self { path }
    }

    fn read_sizes(&self) -> Result<Vec<String>, Box<dyn std::error::Error>> {
        let reader = BufReader::new(std::fs::File::open(&self.path)?);
        let mut res = vec![];
        for (idx, line) in reader.lines()
            // First line is the header!
            .skip(1)
            .enumerate() {
            let line = line?;
            if line.trim().is_empty() { continue; }
            let tok = line.split(',')
                .nth(1)
                .map(|t| t.trim().to_string());
            match tok {
                Some(tok)   => { res.push(tok); },
                None        => {
                    return Err(Box::new(FragError::InvalidInput {
                        field:  Field::ProcessSize,
                        index:  idx,
                        raw:    line,
                        why:    "missing the size column",
                    }));
                }
            }
        }

        Ok(res)
    }
}

pub fn read_from_path(format: InputFormat, path: PathBuf) -> Result<Vec<String>, Box<dyn std::error::Error>> {
    match format {
        InputFormat::List   => { ListParser::new(path).read_sizes() },
        InputFormat::Csv    => { CsvParser::new(path).read_sizes() },
    }
}

/// Asks for one size at a time, lazily: a line is only read when the
/// consumer pulls the next item. Feed it to [`Scenario::build_external`]
/// and the questions stop as soon as the pool is full.
///
/// Answers are handed out trimmed but otherwise untouched, so a blank
/// answer reaches the builder and fails validation there. Iteration ends
/// at end of input. If prompting or reading fails, the failure is
/// handed out as a [`FragError::Io`] and nothing follows it.
pub struct Prompter<R, W> {
    input:  R,
    output: W,
    asked:  usize,
    done:   bool,
}

impl<R: BufRead, W: Write> Prompter<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self {
            input,
            output,
            asked:  0,
            done:   false,
        }
    }

    fn ask(&mut self) -> std::io::Result<Option<String>> {
        write!(self.output, "Enter memory requirement for process {}: ", self.asked)?;
        self.output.flush()?;
        let mut line = String::new();
        match self.input.read_line(&mut line)? {
            0   => { Ok(None) },
            _   => { Ok(Some(line.trim().to_string())) }
        }
    }
}

impl<R: BufRead, W: Write> Iterator for Prompter<R, W> {
    type Item = Result<String, FragError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done { return None; }
        self.asked += 1;
        match self.ask() {
            Ok(Some(answer))    => { Some(Ok(answer)) },
            Ok(None)            => {
                self.done = true;
                None
            },
            Err(e)              => {
                warn!("Could not get size of process {}: {e}", self.asked);
                self.done = true;
                Some(Err(FragError::Io(e)))
            }
        }
    }
}

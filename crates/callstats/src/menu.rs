//! Interactive text menu.
//!
//! Drives a [`CallStore`] from a line-oriented console. Input is read as
//! whitespace-separated tokens, so several answers may be typed on one line.
//! Store errors are printed and control returns to the menu; end of input
//! ends the session.

use std::collections::VecDeque;
use std::io::{BufRead, Write};
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::error::{Error, Result};
use crate::report;
use crate::store::CallStore;

/// Menu entries, numbered as shown to the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuChoice {
    /// Add one call record.
    Add,
    /// Remove all records for a number.
    Remove,
    /// Print the records and totals for a number.
    Search,
    /// Write the store to the export file.
    Export,
    /// Print every record.
    Display,
    /// Recalculate billing for every record.
    Process,
    /// Leave the menu.
    Exit,
}

impl MenuChoice {
    /// Parse a menu selection.
    #[must_use]
    pub fn parse(token: &str) -> Option<Self> {
        match token.trim() {
            "1" => Some(Self::Add),
            "2" => Some(Self::Remove),
            "3" => Some(Self::Search),
            "4" => Some(Self::Export),
            "5" => Some(Self::Display),
            "6" => Some(Self::Process),
            "7" => Some(Self::Exit),
            _ => None,
        }
    }
}

const MENU: &str = "\nPlease choose from the menu below\n\
                    \t(1) Add\n\
                    \t(2) Remove\n\
                    \t(3) Search for individual record\n\
                    \t(4) Output database to txt file\n\
                    \t(5) Print current database to screen\n\
                    \t(6) Process database\n\
                    \t(7) Exit program.";

/// An interactive console session over a store.
#[derive(Debug)]
pub struct Session<R, W> {
    input: R,
    output: W,
    store: CallStore,
    export_path: PathBuf,
    pending: VecDeque<String>,
}

impl<R: BufRead, W: Write> Session<R, W> {
    /// Create a session reading answers from `input` and writing to `output`.
    pub fn new(input: R, output: W, store: CallStore, export_path: impl Into<PathBuf>) -> Self {
        Self {
            input,
            output,
            store,
            export_path: export_path.into(),
            pending: VecDeque::new(),
        }
    }

    /// The store being edited.
    #[must_use]
    pub fn store(&self) -> &CallStore {
        &self.store
    }

    /// Consume the session, returning the store and the output sink.
    #[must_use]
    pub fn into_parts(self) -> (CallStore, W) {
        (self.store, self.output)
    }

    /// Ask whether to initialize the store from a file, then run the menu.
    ///
    /// # Errors
    ///
    /// Returns an error only if the console itself fails.
    pub fn run_with_init_prompt(&mut self) -> Result<()> {
        writeln!(
            self.output,
            "Hello! Would you like to initialize the database with a file?\n(Y or N)"
        )?;

        let Some(answer) = self.next_token()? else {
            return Ok(());
        };
        if answer.eq_ignore_ascii_case("y") {
            writeln!(self.output, "\nPlease enter the filename\n")?;
            let Some(filename) = self.next_token()? else {
                return Ok(());
            };
            self.initialize(Path::new(&filename))?;
        }

        self.run()
    }

    /// Run the menu loop until exit or end of input.
    ///
    /// # Errors
    ///
    /// Returns an error only if the console itself fails.
    pub fn run(&mut self) -> Result<()> {
        loop {
            writeln!(self.output, "{MENU}")?;
            self.output.flush()?;

            let Some(token) = self.next_token()? else {
                break;
            };
            writeln!(self.output)?;

            match MenuChoice::parse(&token) {
                Some(MenuChoice::Add) => self.add()?,
                Some(MenuChoice::Remove) => self.remove()?,
                Some(MenuChoice::Search) => self.search()?,
                Some(MenuChoice::Export) => self.export()?,
                Some(MenuChoice::Display) => self.display()?,
                Some(MenuChoice::Process) => self.process()?,
                Some(MenuChoice::Exit) => break,
                None => writeln!(self.output, "Incorrect value entered.")?,
            }
        }
        Ok(())
    }

    /// Bulk load a data file into the store, reporting the outcome.
    ///
    /// # Errors
    ///
    /// Returns an error only if the console itself fails.
    pub fn initialize(&mut self, path: &Path) -> Result<()> {
        match self.store.bulk_load(path) {
            Ok(report) => {
                writeln!(self.output, "\nInitialization complete.")?;
                if report.skipped > 0 {
                    writeln!(
                        self.output,
                        "Store is full; {} records were not loaded.",
                        report.skipped
                    )?;
                }
            }
            Err(err) => writeln!(self.output, "Unable to initialize: {err}")?,
        }
        Ok(())
    }

    fn add(&mut self) -> Result<()> {
        let Some(phone_number) = self.prompt("Please input the cell number of new record")? else {
            return Ok(());
        };
        let Some(relay_stations) = self.prompt_number("Please input number of relay stations")?
        else {
            return Ok(());
        };
        let Some(length_minutes) = self.prompt_number("Please input length of call")? else {
            return Ok(());
        };

        match self.store.add(phone_number, relay_stations, length_minutes) {
            Ok(_) => writeln!(self.output, "Add complete.")?,
            Err(err) => self.report(&err)?,
        }
        Ok(())
    }

    fn remove(&mut self) -> Result<()> {
        let Some(key) =
            self.prompt("Please enter the number you would like to remove from the database.")?
        else {
            return Ok(());
        };

        match self.store.remove(&key) {
            Ok(removed) => writeln!(
                self.output,
                "\nRemoval complete. {removed} record(s) removed."
            )?,
            Err(Error::EmptyStore) => {
                writeln!(self.output, "The store is empty; cannot remove {key}.")?;
            }
            Err(Error::NotFound { .. }) => {
                writeln!(self.output, "{key} is not in the store, unable to remove it.")?;
            }
            Err(err) => self.report(&err)?,
        }
        Ok(())
    }

    fn search(&mut self) -> Result<()> {
        let Some(number) = self.prompt("Please enter the number you wish to search for.")? else {
            return Ok(());
        };

        match self.store.summarize(&number) {
            Ok(totals) => {
                let stats = report::render_stats(self.store.matching(&number), &totals);
                write!(self.output, "{stats}")?;
            }
            Err(Error::EmptyStore) => {
                writeln!(self.output, "The store is empty; there is nothing to print.")?;
            }
            Err(Error::NotFound { .. }) => {
                writeln!(self.output, "{number} is not in the store, unable to print.")?;
            }
            Err(err) => self.report(&err)?,
        }
        Ok(())
    }

    fn export(&mut self) -> Result<()> {
        match self.store.export_all(&self.export_path) {
            Ok(_) => writeln!(
                self.output,
                "The database has been saved to {}",
                self.export_path.display()
            )?,
            Err(err) => self.report(&err)?,
        }
        Ok(())
    }

    fn display(&mut self) -> Result<()> {
        let table = report::render_table(self.store.records());
        write!(self.output, "{table}")?;
        Ok(())
    }

    fn process(&mut self) -> Result<()> {
        self.store.recalculate_all();
        writeln!(self.output, "\nProcessing complete.")?;
        Ok(())
    }

    fn report(&mut self, err: &Error) -> Result<()> {
        debug!("Reporting error to console: {}", err);
        writeln!(self.output, "{err}")?;
        Ok(())
    }

    fn prompt(&mut self, message: &str) -> Result<Option<String>> {
        writeln!(self.output, "{message}")?;
        self.output.flush()?;
        self.next_token()
    }

    fn prompt_number(&mut self, message: &str) -> Result<Option<f64>> {
        loop {
            let Some(token) = self.prompt(message)? else {
                return Ok(None);
            };
            match token.parse::<f64>() {
                Ok(value) => return Ok(Some(value)),
                Err(_) => writeln!(self.output, "{token:?} is not a number.")?,
            }
        }
    }

    fn next_token(&mut self) -> Result<Option<String>> {
        while self.pending.is_empty() {
            let mut line = String::new();
            if self.input.read_line(&mut line)? == 0 {
                return Ok(None);
            }
            self.pending
                .extend(line.split_whitespace().map(str::to_string));
        }
        Ok(self.pending.pop_front())
    }
}

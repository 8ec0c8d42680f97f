//! Interactive text menu.
//!
//! The shell reads choices line by line and drives a [`Session`]. Rejected
//! selections are logged and reported, then the menu is shown again. Only
//! event log failures and console I/O failures end the loop with an error.

use crate::core::{parse_index, GearTable, SelectionError, Vehicle};
use crate::engine::ShiftReport;
use crate::recorder::{EventSink, StorageError};
use crate::session::{Session, SessionError};
use rand::Rng;
use std::io::{self, BufRead, Write};
use thiserror::Error;
use tracing::{debug, error};

/// Errors that end the interactive loop
#[derive(Debug, Error)]
pub enum ShellError {
    #[error("Event log failure: {0}")]
    Storage(#[from] StorageError),

    #[error("Console I/O failed: {0}")]
    Console(#[from] io::Error),
}

/// A top-level menu entry.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MenuChoice {
    CreateCar,
    ListCars,
    ChangeGears,
    Quit,
}

impl MenuChoice {
    /// Parse a menu selection; blank input quits.
    ///
    /// # Example
    ///
    /// ```rust
    /// use gearshift::shell::MenuChoice;
    ///
    /// assert_eq!(MenuChoice::parse("3"), Some(MenuChoice::ChangeGears));
    /// assert_eq!(MenuChoice::parse(" "), Some(MenuChoice::Quit));
    /// assert_eq!(MenuChoice::parse("7"), None);
    /// ```
    pub fn parse(input: &str) -> Option<Self> {
        match input.trim() {
            "1" => Some(Self::CreateCar),
            "2" => Some(Self::ListCars),
            "3" => Some(Self::ChangeGears),
            "q" | "Q" | "" => Some(Self::Quit),
            _ => None,
        }
    }
}

const MENU: &str = "1. Create Car.\n2. Print car details\n3. Select car and change gears.\nQ. Quit.\n";

pub struct Shell<I: BufRead, O: Write, R: Rng, S: EventSink> {
    input: I,
    output: O,
    session: Session<R, S>,
}

impl<I: BufRead, O: Write, R: Rng, S: EventSink> Shell<I, O, R, S> {
    pub fn new(input: I, output: O, session: Session<R, S>) -> Self {
        Self {
            input,
            output,
            session,
        }
    }

    pub fn session(&self) -> &Session<R, S> {
        &self.session
    }

    pub fn into_parts(self) -> (O, Session<R, S>) {
        (self.output, self.session)
    }

    /// Run the menu until the user quits or input ends.
    pub fn run(&mut self) -> Result<(), ShellError> {
        loop {
            writeln!(self.output, "{MENU}")?;
            let Some(line) = self.prompt("Please make selection: ")? else {
                return Ok(());
            };

            let result = match MenuChoice::parse(&line) {
                Some(MenuChoice::Quit) => return Ok(()),
                Some(MenuChoice::CreateCar) => self.create_car(),
                Some(MenuChoice::ListCars) => {
                    debug!("printing menu.");
                    self.print_car_list().map_err(ShellError::from)
                }
                Some(MenuChoice::ChangeGears) => self.change_gears(),
                None => self.recover(SelectionError::UnknownMenuChoice { input: line }.into()),
            };

            match result {
                Ok(()) => {}
                Err(ShellError::Console(err)) if err.kind() == io::ErrorKind::UnexpectedEof => {
                    return Ok(());
                }
                Err(err) => return Err(err),
            }
        }
    }

    fn create_car(&mut self) -> Result<(), ShellError> {
        let car_type = self.require("Please enter type: ")?;
        let vin = self.require("Please enter vin: ")?;

        let created = self
            .session
            .create_car(&car_type, &vin)
            .map(|car| car_detail(car, None));
        match created {
            Ok(detail) => {
                write!(self.output, "{detail}")?;
                Ok(())
            }
            Err(err) => self.recover(err),
        }
    }

    fn change_gears(&mut self) -> Result<(), ShellError> {
        if self.session.fleet().is_empty() {
            writeln!(self.output, "No cars available.\n")?;
            return Ok(());
        }

        self.print_car_list()?;
        let car_input = self.require("Please choose car: ")?;
        let car_index = match parse_index(&car_input) {
            Ok(index) => index,
            Err(err) => return self.recover(err.into()),
        };
        let selected = self.session.select_car(car_index).map(|_| ());
        if let Err(err) = selected {
            return self.recover(err);
        }

        let gears = gear_list(self.session.table());
        write!(self.output, "{gears}")?;
        let gear_input = self.require("Please select gear: ")?;
        let gear_index = match parse_index(&gear_input) {
            Ok(index) => index,
            Err(err) => return self.recover(err.into()),
        };

        match self.session.change_gears(car_index, gear_index) {
            Ok(report) => self.print_report(&report, car_index),
            Err(err) => self.recover(err),
        }
    }

    fn print_report(&mut self, report: &ShiftReport, car_index: usize) -> Result<(), ShellError> {
        writeln!(
            self.output,
            "Shifted {} from gear {} to gear {} in {} steps.",
            report.vin,
            report.from_gear,
            report.to_gear,
            report.steps()
        )?;
        if let Some(car) = self.session.fleet().get(car_index) {
            let detail = car_detail(car, Some(car_index));
            write!(self.output, "{detail}")?;
        }
        Ok(())
    }

    fn print_car_list(&mut self) -> io::Result<()> {
        for (index, car) in self.session.fleet().iter().enumerate() {
            write!(self.output, "{}", car_detail(car, Some(index)))?;
        }
        Ok(())
    }

    /// Log and report a rejected request; storage failures stay fatal.
    fn recover(&mut self, err: SessionError) -> Result<(), ShellError> {
        error!("{err}");
        match err {
            SessionError::Storage(err) => Err(ShellError::Storage(err)),
            err => {
                writeln!(self.output, "Error: {err}\n")?;
                Ok(())
            }
        }
    }

    /// Prompt for a line, treating end of input as an error.
    fn require(&mut self, message: &str) -> Result<String, ShellError> {
        self.prompt(message)?
            .ok_or_else(|| io::Error::new(io::ErrorKind::UnexpectedEof, "input closed").into())
    }

    /// Prompt for a line; `None` once input is exhausted.
    fn prompt(&mut self, message: &str) -> io::Result<Option<String>> {
        writeln!(self.output, "{message}")?;
        self.output.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        Ok(Some(line.trim().to_string()))
    }
}

/// Format one car, prefixed with its list index when given.
pub fn car_detail(car: &Vehicle, index: Option<usize>) -> String {
    let line = match index {
        Some(index) => format!("{index}: {car}"),
        None => car.to_string(),
    };
    format!("------\n{line}\n------\n\n")
}

/// Format the gear table, one band per line.
pub fn gear_list(table: &GearTable) -> String {
    table.iter().map(|gear| format!("{gear}\n\n")).collect()
}

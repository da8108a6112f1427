//! # Service Booking Wizard
//!
//! A sequential form: `Vehicle → Schedule → Contact → Review`. Moving forward
//! validates the current step only; moving back never validates. Submitting from the
//! review step re-validates everything and produces the request body for
//! `POST /cars/public/book-service/`.

use chrono::{Datelike, NaiveDate};
use serde::Serialize;
use std::fmt;

use crate::model::ServiceBooking;

pub const SERVICE_TYPES: [&str; 5] = [
    "maintenance",
    "battery-check",
    "tire-service",
    "software-update",
    "repair",
];

const EARLIEST_MODEL_YEAR: i32 = 1990;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum BookingStep {
    Vehicle,
    Schedule,
    Contact,
    Review,
}

impl BookingStep {
    pub fn next(self) -> Option<Self> {
        match self {
            BookingStep::Vehicle => Some(BookingStep::Schedule),
            BookingStep::Schedule => Some(BookingStep::Contact),
            BookingStep::Contact => Some(BookingStep::Review),
            BookingStep::Review => None,
        }
    }

    pub fn previous(self) -> Option<Self> {
        match self {
            BookingStep::Vehicle => None,
            BookingStep::Schedule => Some(BookingStep::Vehicle),
            BookingStep::Contact => Some(BookingStep::Schedule),
            BookingStep::Review => Some(BookingStep::Contact),
        }
    }

    pub fn number(self) -> usize {
        match self {
            BookingStep::Vehicle => 1,
            BookingStep::Schedule => 2,
            BookingStep::Contact => 3,
            BookingStep::Review => 4,
        }
    }
}

impl fmt::Display for BookingStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            BookingStep::Vehicle => "Vehicle",
            BookingStep::Schedule => "Schedule",
            BookingStep::Contact => "Contact",
            BookingStep::Review => "Review",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldError {
    pub field: &'static str,
    pub message: String,
}

impl FieldError {
    fn new(field: &'static str, message: impl Into<String>) -> Self {
        Self {
            field,
            message: message.into(),
        }
    }
}

impl fmt::Display for FieldError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

/// Raw user input, as typed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BookingForm {
    pub car_model: String,
    pub car_year: String,
    pub service_type: String,
    pub preferred_date: String,
    pub full_name: String,
    pub email: String,
    pub phone: String,
    pub notes: String,
}

#[derive(Debug, Clone)]
pub struct BookingWizard {
    step: BookingStep,
    today: NaiveDate,
    pub form: BookingForm,
}

impl BookingWizard {
    pub fn new(today: NaiveDate) -> Self {
        Self {
            step: BookingStep::Vehicle,
            today,
            form: BookingForm::default(),
        }
    }

    pub fn with_form(today: NaiveDate, form: BookingForm) -> Self {
        Self {
            step: BookingStep::Vehicle,
            today,
            form,
        }
    }

    pub fn step(&self) -> BookingStep {
        self.step
    }

    /// Validate the current step and advance on success.
    pub fn next(&mut self) -> Result<BookingStep, Vec<FieldError>> {
        let errors = self.validate_step(self.step);
        if !errors.is_empty() {
            return Err(errors);
        }
        if let Some(next) = self.step.next() {
            self.step = next;
        }
        Ok(self.step)
    }

    pub fn back(&mut self) -> BookingStep {
        if let Some(previous) = self.step.previous() {
            self.step = previous;
        }
        self.step
    }

    /// Validate every step from the review step and build the request body.
    pub fn submit(&self) -> Result<ServiceBooking, Vec<FieldError>> {
        if self.step != BookingStep::Review {
            return Err(vec![FieldError::new(
                "step",
                format!("cannot submit from the {} step", self.step),
            )]);
        }

        let errors: Vec<FieldError> = [
            BookingStep::Vehicle,
            BookingStep::Schedule,
            BookingStep::Contact,
        ]
        .into_iter()
        .flat_map(|step| self.validate_step(step))
        .collect();
        if !errors.is_empty() {
            return Err(errors);
        }

        let form = &self.form;
        Ok(ServiceBooking {
            car_model: form.car_model.trim().to_string(),
            car_year: parse_year(&form.car_year).ok().flatten(),
            service_type: form.service_type.trim().to_string(),
            preferred_date: parse_date(&form.preferred_date).unwrap_or(self.today),
            full_name: form.full_name.trim().to_string(),
            email: form.email.trim().to_string(),
            phone: phone_digits(&form.phone),
            notes: form.notes.trim().to_string(),
        })
    }

    pub fn validate_step(&self, step: BookingStep) -> Vec<FieldError> {
        let form = &self.form;
        let mut errors = Vec::new();

        match step {
            BookingStep::Vehicle => {
                if form.car_model.trim().is_empty() {
                    errors.push(FieldError::new("car_model", "is required"));
                }
                let latest = self.today.year() + 1;
                match parse_year(&form.car_year) {
                    Ok(Some(year)) if !(EARLIEST_MODEL_YEAR..=latest).contains(&year) => {
                        errors.push(FieldError::new(
                            "car_year",
                            format!("must be between {} and {}", EARLIEST_MODEL_YEAR, latest),
                        ));
                    }
                    Ok(_) => {}
                    Err(()) => errors.push(FieldError::new("car_year", "must be a number")),
                }
            }
            BookingStep::Schedule => {
                let service = form.service_type.trim();
                if service.is_empty() {
                    errors.push(FieldError::new("service_type", "is required"));
                } else if !SERVICE_TYPES.contains(&service) {
                    errors.push(FieldError::new(
                        "service_type",
                        format!("must be one of {}", SERVICE_TYPES.join(", ")),
                    ));
                }
                match parse_date(&form.preferred_date) {
                    Some(date) if date < self.today => {
                        errors.push(FieldError::new("preferred_date", "cannot be in the past"));
                    }
                    Some(_) => {}
                    None => errors.push(FieldError::new(
                        "preferred_date",
                        "must be a date like 2026-05-14",
                    )),
                }
            }
            BookingStep::Contact => {
                if form.full_name.trim().is_empty() {
                    errors.push(FieldError::new("full_name", "is required"));
                }
                if !looks_like_email(form.email.trim()) {
                    errors.push(FieldError::new("email", "is not a valid address"));
                }
                let digits = form.phone.chars().filter(char::is_ascii_digit).count();
                if !(7..=15).contains(&digits) {
                    errors.push(FieldError::new("phone", "must have 7 to 15 digits"));
                }
            }
            BookingStep::Review => {}
        }

        errors
    }
}

fn parse_year(raw: &str) -> Result<Option<i32>, ()> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Ok(None);
    }
    raw.parse().map(Some).map_err(|_| ())
}

fn parse_date(raw: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d").ok()
}

fn looks_like_email(email: &str) -> bool {
    let Some((local, domain)) = email.split_once('@') else {
        return false;
    };
    !local.is_empty()
        && !domain.contains('@')
        && domain
            .split_once('.')
            .is_some_and(|(host, tld)| !host.is_empty() && !tld.is_empty())
}

/// Keep a leading `+` and the digits; drop spaces, dashes and parentheses.
fn phone_digits(raw: &str) -> String {
    raw.trim()
        .chars()
        .enumerate()
        .filter(|(i, c)| c.is_ascii_digit() || (*i == 0 && *c == '+'))
        .map(|(_, c)| c)
        .collect()
}

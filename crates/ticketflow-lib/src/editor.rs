//! Ticket editor form and its validation rules.
//!
//! A [`TicketForm`] carries raw text exactly as typed. [`TicketForm::validate`]
//! either turns it into a [`NewTicket`] or reports every failing field.

use chrono::{DateTime, NaiveDate, Utc};

use crate::error::ValidationError;
use crate::model::{Priority, Status, Ticket};
use crate::query::NewTicket;

const TITLE_MIN_CHARS: usize = 3;
const DESCRIPTION_MIN_CHARS: usize = 10;
const DATE_FORMAT: &str = "%Y-%m-%d";

/// Raw editor input.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TicketForm {
    pub title: String,
    pub description: String,
    pub status: String,
    pub priority: String,
    pub assignee: String,
    pub customer_name: String,
    pub due_date: String,
    pub estimated_hours: String,
    pub tags: String,
}

impl TicketForm {
    /// Prefill the form from an existing ticket, as the edit dialog does.
    #[must_use]
    pub fn from_ticket(ticket: &Ticket) -> Self {
        Self {
            title: ticket.title.clone(),
            description: ticket.description.clone(),
            status: ticket.status.as_str().to_string(),
            priority: ticket.priority.as_str().to_string(),
            assignee: ticket.assignee.clone().unwrap_or_default(),
            customer_name: ticket.customer_name.clone().unwrap_or_default(),
            due_date: ticket
                .due_date
                .map(|d| d.format(DATE_FORMAT).to_string())
                .unwrap_or_default(),
            estimated_hours: ticket
                .estimated_hours
                .map(|h| h.to_string())
                .unwrap_or_default(),
            tags: ticket.tags.join(", "),
        }
    }

    /// Validate against the calendar day `today`.
    ///
    /// # Errors
    ///
    /// Returns every field error found; nothing is partially accepted.
    pub fn validate(&self, today: NaiveDate) -> Result<NewTicket, Vec<ValidationError>> {
        self.check(today, None)
    }

    /// Validate an edit of a ticket whose stored due date is `stored_due`.
    ///
    /// A due date left on the stored day is kept as stored even when that day
    /// has passed; only a new or changed date must not be in the past.
    ///
    /// # Errors
    ///
    /// Returns every field error found; nothing is partially accepted.
    pub fn validate_edit(
        &self,
        today: NaiveDate,
        stored_due: Option<DateTime<Utc>>,
    ) -> Result<NewTicket, Vec<ValidationError>> {
        self.check(today, stored_due)
    }

    fn check(
        &self,
        today: NaiveDate,
        stored_due: Option<DateTime<Utc>>,
    ) -> Result<NewTicket, Vec<ValidationError>> {
        let mut errors = Vec::new();

        let title = self.title.trim();
        if title.is_empty() {
            errors.push(ValidationError::new("title", "Title is required"));
        } else if title.chars().count() < TITLE_MIN_CHARS {
            errors.push(ValidationError::new(
                "title",
                "Title must be at least 3 characters",
            ));
        }

        let description = self.description.trim();
        if description.is_empty() {
            errors.push(ValidationError::new(
                "description",
                "Description is required",
            ));
        } else if description.chars().count() < DESCRIPTION_MIN_CHARS {
            errors.push(ValidationError::new(
                "description",
                "Description must be at least 10 characters",
            ));
        }

        let due_date = match parse_due_date(&self.due_date) {
            Ok(Some(due)) => match stored_due {
                Some(stored) if stored.date_naive() == due.date_naive() => Some(stored),
                _ if due.date_naive() < today => {
                    errors.push(ValidationError::new(
                        "dueDate",
                        "Due date cannot be in the past",
                    ));
                    None
                }
                _ => Some(due),
            },
            Ok(None) => None,
            Err(e) => {
                errors.push(e);
                None
            }
        };

        let estimated_hours = parse_hours(&self.estimated_hours).unwrap_or_else(|e| {
            errors.push(e);
            None
        });

        let status = parse_choice(&self.status, "status").unwrap_or_else(|e| {
            errors.push(e);
            Status::default()
        });
        let priority = parse_choice(&self.priority, "priority").unwrap_or_else(|e| {
            errors.push(e);
            Priority::default()
        });

        if !errors.is_empty() {
            return Err(errors);
        }

        Ok(NewTicket {
            title: title.to_string(),
            description: description.to_string(),
            status,
            priority,
            assignee: non_empty(&self.assignee),
            customer_name: non_empty(&self.customer_name),
            due_date,
            estimated_hours,
            tags: parse_tags(&self.tags),
        })
    }
}

fn non_empty(value: &str) -> Option<String> {
    let trimmed = value.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}

fn parse_choice<T: std::str::FromStr>(value: &str, field: &str) -> Result<T, ValidationError>
where
    T: Default,
    T::Err: std::fmt::Display,
{
    if value.trim().is_empty() {
        return Ok(T::default());
    }
    value
        .parse()
        .map_err(|e: T::Err| ValidationError::new(field, e.to_string()))
}

/// Parse a due date as `YYYY-MM-DD` (midnight UTC) or RFC 3339.
///
/// # Errors
///
/// Returns a `dueDate` field error for anything else.
pub fn parse_due_date(value: &str) -> Result<Option<DateTime<Utc>>, ValidationError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Ok(None);
    }
    if let Ok(date) = NaiveDate::parse_from_str(trimmed, DATE_FORMAT) {
        return Ok(Some(date.and_time(chrono::NaiveTime::MIN).and_utc()));
    }
    DateTime::parse_from_rfc3339(trimmed)
        .map(|d| Some(d.with_timezone(&Utc)))
        .map_err(|_| ValidationError::new("dueDate", "Please enter a valid date"))
}

/// Parse estimated hours, truncating fractions.
///
/// # Errors
///
/// Returns an `estimatedHours` field error for negative, non-finite or
/// non-numeric input.
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub fn parse_hours(value: &str) -> Result<Option<u32>, ValidationError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Ok(None);
    }
    let invalid = || ValidationError::new("estimatedHours", "Please enter a valid number of hours");
    let hours: f64 = trimmed.parse().map_err(|_| invalid())?;
    if !hours.is_finite() || hours < 0.0 || hours > f64::from(u32::MAX) {
        return Err(invalid());
    }
    Ok(Some(hours.trunc() as u32))
}

/// Split a comma-separated tag list, dropping empty entries.
#[must_use]
pub fn parse_tags(value: &str) -> Vec<String> {
    value
        .split(',')
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .map(String::from)
        .collect()
}

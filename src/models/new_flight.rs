// src/models/new_flight.rs

use chrono::{DateTime, FixedOffset, NaiveDateTime, TimeZone, Timelike};

use super::{AddFlightBody, FlightStatus, NewFlight};
use crate::error::AddFlightError;

const MAX_FLIGHT_ID_LEN: usize = 10;

// Naive ETAs are read in the operator's display timezone.
const LOCAL_ETA_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%d %H:%M",
    "%Y-%m-%d %H:%M:%S",
];

impl AddFlightBody {
    /// Checks every field and converts the ETA to UTC.
    pub fn validate(
        &self,
        origins: &[String],
        display_offset: FixedOffset,
    ) -> Result<NewFlight, AddFlightError> {
        let flight_id = self.flight_id.trim().to_uppercase();
        if flight_id.is_empty() {
            return Err(AddFlightError::validation("flight_id", "must not be empty"));
        }
        if flight_id.len() > MAX_FLIGHT_ID_LEN {
            return Err(AddFlightError::validation(
                "flight_id",
                format!("at most {MAX_FLIGHT_ID_LEN} characters"),
            ));
        }
        if !flight_id.chars().all(|c| c.is_ascii_alphanumeric()) {
            return Err(AddFlightError::validation("flight_id", "letters and digits only"));
        }

        let origin = self.origin.trim().to_uppercase();
        if !origins.iter().any(|o| *o == origin) {
            return Err(AddFlightError::validation(
                "origin",
                format!("'{}' is not one of {}", self.origin.trim(), origins.join(", ")),
            ));
        }

        let status = FlightStatus::parse(&self.status).ok_or_else(|| {
            AddFlightError::validation("status", format!("unknown status '{}'", self.status.trim()))
        })?;

        let eta = parse_eta(&self.eta, display_offset)?;

        Ok(NewFlight { flight_id, origin, eta, status })
    }
}

/// Parses an ETA into a UTC timestamp truncated to whole seconds.
pub fn parse_eta(raw: &str, display_offset: FixedOffset) -> Result<NaiveDateTime, AddFlightError> {
    let raw = raw.trim();

    let utc = if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        dt.naive_utc()
    } else {
        let local = LOCAL_ETA_FORMATS
            .iter()
            .find_map(|fmt| NaiveDateTime::parse_from_str(raw, fmt).ok())
            .ok_or_else(|| {
                AddFlightError::validation("eta", format!("'{raw}' is not a date-time (YYYY-MM-DDTHH:MM)"))
            })?;
        display_offset
            .from_local_datetime(&local)
            .single()
            .map(|dt| dt.naive_utc())
            .ok_or_else(|| AddFlightError::validation("eta", format!("'{raw}' is out of range")))?
    };

    Ok(utc.with_nanosecond(0).unwrap_or(utc))
}

//! CSV import of the venue pool and of team registrations.

use crate::models::{GroupLabel, StoreError, Venue};
use serde::Deserialize;
use std::io::Read;

#[derive(Deserialize)]
struct VenueRow {
    country: String,
    ground: String,
}

/// One `team,group` line of a registrations CSV.
#[derive(Clone, Debug, Eq, PartialEq, Deserialize)]
pub struct RegistrationRow {
    pub team: String,
    pub group: GroupLabel,
}

fn csv_reader<R: Read>(input: R) -> csv::Reader<R> {
    csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(input)
}

fn import_error(e: csv::Error) -> StoreError {
    StoreError::Import(e.to_string())
}

/// Read venues from CSV with header `country,ground`, in file order.
pub fn read_venues_csv<R: Read>(input: R) -> Result<Vec<Venue>, StoreError> {
    let mut venues = Vec::new();
    for (line, row) in csv_reader(input).deserialize::<VenueRow>().enumerate() {
        let row = row.map_err(import_error)?;
        if row.country.is_empty() || row.ground.is_empty() {
            return Err(StoreError::Import(format!(
                "row {}: country and ground are required",
                line + 1
            )));
        }
        venues.push(Venue::new(row.country, row.ground));
    }
    Ok(venues)
}

/// Read registrations from CSV with header `team,group` (group is "Group A" or "Group B").
pub fn read_team_registrations_csv<R: Read>(input: R) -> Result<Vec<RegistrationRow>, StoreError> {
    let rows: Vec<RegistrationRow> = csv_reader(input)
        .deserialize()
        .collect::<Result<_, _>>()
        .map_err(import_error)?;
    if let Some(pos) = rows.iter().position(|r| r.team.is_empty()) {
        return Err(StoreError::Import(format!("row {}: team name is required", pos + 1)));
    }
    Ok(rows)
}

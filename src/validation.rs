//! Input validation for fleet planning scenarios.
//!
//! Checks structural integrity of airports and agent demands before
//! planning. Detects:
//! - Duplicate airport IDs
//! - Airports outside the grid
//! - Agent IDs that are not dense (`0..n` in order)
//! - Demands referencing unknown airports or disagreeing with their positions
//! - Demands whose origin equals the destination

use crate::models::{AgentDemand, Airport, AirportId, Grid};
use std::collections::HashMap;

/// Validation result.
pub type ValidationResult = Result<(), Vec<ValidationError>>;

/// A validation error.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidationError {
    /// Error category.
    pub kind: ValidationErrorKind,
    /// Human-readable description.
    pub message: String,
}

/// Categories of validation errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationErrorKind {
    /// Two airports share the same ID.
    DuplicateId,
    /// An airport lies outside the grid.
    OutOfBounds,
    /// Agent IDs are not `0, 1, 2, ...` in order.
    NonDenseAgentId,
    /// A demand references an airport that doesn't exist.
    InvalidAirportReference,
    /// A demand's endpoint differs from its airport's position.
    PositionMismatch,
    /// A demand starts and ends at the same airport.
    DegenerateDemand,
}

impl ValidationError {
    fn new(kind: ValidationErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

/// Validates the input data for a fleet planning problem.
///
/// Checks:
/// 1. No duplicate airport IDs
/// 2. All airports lie on the grid
/// 3. `demands[i].id == i`
/// 4. Every origin/destination airport exists and matches the demand's
///    stored position
/// 5. Origin and destination airports differ
///
/// # Returns
/// `Ok(())` if all checks pass, `Err(errors)` with all detected issues.
pub fn validate_scenario(
    grid: &Grid,
    airports: &[Airport],
    demands: &[AgentDemand],
) -> ValidationResult {
    let mut errors = Vec::new();

    let mut by_id: HashMap<AirportId, &Airport> = HashMap::new();
    for airport in airports {
        if by_id.insert(airport.id, airport).is_some() {
            errors.push(ValidationError::new(
                ValidationErrorKind::DuplicateId,
                format!("Duplicate airport ID: {}", airport.id),
            ));
        }
        if !grid.is_valid(airport.position) {
            errors.push(ValidationError::new(
                ValidationErrorKind::OutOfBounds,
                format!(
                    "Airport {} at {} is outside the {}x{} grid",
                    airport.id,
                    airport.position,
                    grid.size(),
                    grid.size()
                ),
            ));
        }
    }

    for (index, demand) in demands.iter().enumerate() {
        if demand.id != index {
            errors.push(ValidationError::new(
                ValidationErrorKind::NonDenseAgentId,
                format!("Agent at index {index} has ID {}", demand.id),
            ));
        }

        let endpoints = [
            ("origin", demand.origin_airport, demand.origin),
            ("destination", demand.destination_airport, demand.destination),
        ];
        for (role, airport_id, position) in endpoints {
            match by_id.get(&airport_id) {
                None => errors.push(ValidationError::new(
                    ValidationErrorKind::InvalidAirportReference,
                    format!(
                        "Agent {} references unknown {role} airport {airport_id}",
                        demand.id
                    ),
                )),
                Some(airport) if airport.position != position => {
                    errors.push(ValidationError::new(
                        ValidationErrorKind::PositionMismatch,
                        format!(
                            "Agent {} {role} {position} differs from airport {airport_id} at {}",
                            demand.id, airport.position
                        ),
                    ))
                }
                Some(_) => {}
            }
        }

        if demand.origin_airport == demand.destination_airport {
            errors.push(ValidationError::new(
                ValidationErrorKind::DegenerateDemand,
                format!(
                    "Agent {} departs from and returns to airport {}",
                    demand.id, demand.origin_airport
                ),
            ));
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

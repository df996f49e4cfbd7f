use anyhow::Result;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::errors::AgentResult;
use crate::providers::types::tool::Tool;

pub const NAME: &str = "get_coordinates";
const DESCRIPTION: &str =
    "Accepts a place as an address, then returns the latitude and longitude coordinates.";

#[derive(Debug, Deserialize, JsonSchema)]
pub struct GetCoordinatesInput {
    /// The location to look up.
    pub location: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub lat: f64,
    pub long: f64,
}

const SAN_FRANCISCO: Coordinates = Coordinates {
    lat: 37.7749,
    long: -122.4194,
};

/// Resolve a location to coordinates.
///
/// Placeholder: every location resolves to San Francisco.
pub fn get_coordinates(input: GetCoordinatesInput) -> AgentResult<Coordinates> {
    tracing::debug!(location = %input.location, "resolving coordinates");
    Ok(SAN_FRANCISCO)
}

pub fn tool() -> Result<Tool> {
    Tool::typed(NAME, DESCRIPTION, get_coordinates)
}

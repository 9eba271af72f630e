use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::OnceLock;

use crate::c_to_f;

// flat current conditions document served by an observation proxy, e.g.
// {"observed_at": "2024-07-04T18:53:00Z", "wind_speed_kt": 8, "wind_direction_deg": 200,
//  "temperature": "84 F", "humidity": 61, "heat_index": "88 F", "wind_chill": "N/A"}
#[derive(Default, Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProxyObservation {
    pub observed_at: Option<String>,
    pub wind_speed_kt: Option<Reading>,
    pub wind_direction_deg: Option<Reading>,
    pub temperature: Option<Reading>,
    pub humidity: Option<Reading>,
    pub heat_index: Option<Reading>,
    pub wind_chill: Option<Reading>,
    pub visibility_km: Option<Reading>,
}

/// A value that may arrive as a bare number or as text with a unit, like `"21.5 C"` or `"N/A"`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Reading {
    Number(f64),
    Text(String),
}

fn reading_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"^\s*(-?\d+(?:\.\d+)?)\s*°?\s*([A-Za-z%]*)\s*$")
            .expect("reading pattern compiles")
    })
}

impl Reading {
    /// Number and upper-cased unit annotation, `None` for "N/A" and other text.
    pub fn parts(&self) -> Option<(f64, Option<String>)> {
        match self {
            Reading::Number(value) => Some((*value, None)),
            Reading::Text(text) => {
                let captures = reading_pattern().captures(text)?;
                let value = captures[1].parse::<f64>().ok()?;
                let unit = captures
                    .get(2)
                    .map(|unit| unit.as_str().to_uppercase())
                    .filter(|unit| !unit.is_empty());
                Some((value, unit))
            }
        }
    }

    pub fn value(&self) -> Option<f64> {
        self.parts().map(|(value, _)| value)
    }

    /// Degrees Fahrenheit; Celsius readings are converted, unitless ones are taken as Fahrenheit.
    pub fn fahrenheit(&self) -> Option<f64> {
        match self.parts()? {
            (value, Some(unit)) if unit == "C" => Some(c_to_f(value)),
            (value, _) => Some(value),
        }
    }
}

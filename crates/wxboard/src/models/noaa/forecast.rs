use serde::{Deserialize, Serialize};
// hourly forecast payload
// https://api.weather.gov/gridpoints/MPX/107,71/forecast/hourly
#[derive(Default, Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ForecastRoot {
    #[serde(rename = "type")]
    pub type_field: Option<String>,
    #[serde(rename = "properties")]
    pub properties: ForecastProperties,
}

#[derive(Default, Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ForecastProperties {
    pub updated: Option<String>,
    pub units: Option<String>,
    pub generated_at: Option<String>,
    pub periods: Vec<Period>,
}

#[derive(Default, Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Period {
    pub number: Option<i64>,
    pub start_time: String,
    pub end_time: Option<String>,
    pub is_daytime: Option<bool>,
    pub temperature: Option<f64>,
    pub temperature_unit: Option<String>,
    pub probability_of_precipitation: Option<ProbabilityOfPrecipitation>,
    pub wind_speed: Option<String>,
    pub wind_direction: Option<String>,
    pub icon: Option<String>,
    pub short_forecast: Option<String>,
}

#[derive(Default, Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProbabilityOfPrecipitation {
    pub unit_code: Option<String>,
    pub value: Option<i64>,
}

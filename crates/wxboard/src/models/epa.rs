use serde::{Deserialize, Serialize};

// hourly uv index
// https://data.epa.gov/efservice/getEnvirofactsUVHourly/LATITUDE/44.98/LONGITUDE/-93.27/JSON
#[derive(Default, Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UvHour {
    #[serde(rename = "CITY")]
    pub city: Option<String>,
    #[serde(rename = "STATE")]
    pub state: Option<String>,
    /// `Mon/DD/YYYY HH AM|PM`
    #[serde(rename = "DATE_TIME")]
    pub date_time: String,
    #[serde(rename = "UV_VALUE")]
    pub uv_value: f64,
}

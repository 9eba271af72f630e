use serde::{Deserialize, Serialize};

// grid metadata for a coordinate
// https://api.weather.gov/points/44.98,-93.27
#[derive(Default, Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PointsRoot {
    pub id: Option<String>,
    #[serde(rename = "properties")]
    pub properties: PointProperties,
}

#[derive(Default, Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PointProperties {
    pub grid_id: Option<String>,
    pub grid_x: Option<i64>,
    pub grid_y: Option<i64>,
    pub forecast: Option<String>,
    pub forecast_hourly: String,
    pub time_zone: Option<String>,
    pub relative_location: Option<RelativeLocation>,
}

#[derive(Default, Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RelativeLocation {
    pub properties: RelativeLocationProperties,
}

#[derive(Default, Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RelativeLocationProperties {
    pub city: String,
    pub state: String,
}

use serde::{Deserialize, Serialize};

// current conditions for one ASOS station
// https://mesonet.agron.iastate.edu/json/current.py?network=MN_ASOS&station=MSP
#[derive(Default, Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CurrentRoot {
    pub id: Option<String>,
    pub network: Option<String>,
    pub last_ob: LastOb,
}

#[derive(Default, Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LastOb {
    pub utc_valid: Option<String>,
    #[serde(rename = "windspeed[kt]")]
    pub wind_speed_kt: Option<f64>,
    #[serde(rename = "winddirection[deg]")]
    pub wind_direction_deg: Option<f64>,
    #[serde(rename = "airtemp[F]")]
    pub air_temp_f: Option<f64>,
}

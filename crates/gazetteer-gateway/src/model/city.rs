use gazetteer_core::{City, CityDraft};
use serde::{Deserialize, Serialize};

/// Wire payload for create and update requests.
///
/// Required fields are optional at this layer so that presence is checked by
/// the service, which reports the missing field by name. The `id` field is
/// accepted but ignored; on update the path id wins.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CityPayload {
    pub id: Option<String>,
    pub ibge_id: Option<i32>,
    pub name: Option<String>,
    pub state: Option<String>,
    #[serde(default)]
    pub capital: bool,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
}

/// Wire representation of a stored city.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CityResponse {
    pub id: Option<String>,
    pub ibge_id: i32,
    pub name: String,
    pub state: String,
    pub capital: bool,
    pub latitude: f64,
    pub longitude: f64,
}

impl From<CityPayload> for CityDraft {
    fn from(payload: CityPayload) -> Self {
        Self {
            ibge_id: payload.ibge_id,
            name: payload.name,
            state: payload.state,
            capital: payload.capital,
            latitude: payload.latitude,
            longitude: payload.longitude,
        }
    }
}

impl From<City> for CityResponse {
    fn from(city: City) -> Self {
        Self {
            id: city.id,
            ibge_id: city.ibge_id,
            name: city.name,
            state: city.state,
            capital: city.capital,
            latitude: city.latitude,
            longitude: city.longitude,
        }
    }
}

use serde::{Deserialize, Serialize};

/// A persisted city record.
///
/// Every required field is guaranteed present; only validated records of this
/// shape ever reach a repository. `id` is `None` until the store assigns a key
/// on first save, and immutable afterwards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct City {
    /// Store-assigned key. `None` before the record is first persisted.
    pub id: Option<String>,
    /// External administrative (IBGE) identifier, unique across the registry.
    pub ibge_id: i32,
    pub name: String,
    /// Region code the city belongs to, e.g. `SP`.
    pub state: String,
    pub capital: bool,
    pub latitude: f64,
    pub longitude: f64,
}

/// A city as it arrives from the wire or a CSV row, before validation.
///
/// Required fields are optional here so the service can report exactly what
/// is missing instead of the deserializer rejecting the payload wholesale.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CityDraft {
    pub ibge_id: Option<i32>,
    pub name: Option<String>,
    pub state: Option<String>,
    pub capital: bool,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
}

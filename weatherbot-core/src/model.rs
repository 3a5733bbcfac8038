/// Geographic point the forecast is requested for. Supplied by config,
/// validated there (latitude [-90, 90], longitude [-180, 180]).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Coordinate {
    pub latitude: f64,
    pub longitude: f64,
}

/// One immutable weather observation/forecast bundle for a single run.
///
/// Numeric fields are rounded to the nearest integer from the provider's
/// floats. Values are passed through as reported: `temperature_min` is not
/// checked against `temperature_max` and humidity/UV are not clamped.
#[derive(Debug, Clone, PartialEq)]
pub struct WeatherSnapshot {
    pub temperature: i32,
    pub temperature_max: i32,
    pub temperature_min: i32,
    pub humidity: i32,
    pub uv_index: i32,
    pub weather_code: i32,
    pub condition: String,
}

/// A recipient that exhausted its retries, with the last failure reason.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeliveryFailure {
    pub chat_id: String,
    pub error: String,
}

/// Per-recipient outcome partition of one broadcast.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BroadcastResult {
    pub successful: Vec<String>,
    pub failed: Vec<DeliveryFailure>,
}

impl BroadcastResult {
    /// True when every recipient received the message.
    pub fn is_complete(&self) -> bool {
        self.failed.is_empty()
    }
}

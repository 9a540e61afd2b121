/// What clients need to know before composing an import request

use crate::import::driver::DatabaseEngine;
use serde::Serialize;

const MAIN_TIMEZONES: [&str; 4] = ["GMT", "UTC", "US", "Europe/Warsaw"];

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ConfigurationView {
    pub databases: Vec<DatabaseEngine>,
    pub timezones: Vec<String>,
    pub organization_directory: String,
    pub minimum_frequency_in_seconds: u64,
}

/// Timezone ids offered to clients, in database order
pub fn supported_timezones() -> Vec<String> {
    chrono_tz::TZ_VARIANTS
        .iter()
        .map(|tz| tz.name())
        .filter(|name| MAIN_TIMEZONES.iter().any(|main| name.contains(main)))
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn offers_main_timezones_only() {
        let zones = supported_timezones();

        assert!(zones.iter().any(|z| z == "UTC"));
        assert!(zones.iter().any(|z| z == "Europe/Warsaw"));
        assert!(zones.iter().any(|z| z == "US/Pacific"));
        assert!(zones.iter().any(|z| z == "Etc/GMT+5"));
        assert!(!zones.iter().any(|z| z == "Europe/Berlin"));
        assert!(!zones.iter().any(|z| z == "Asia/Tokyo"));
    }
}

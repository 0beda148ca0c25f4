use crate::adapters::memory::InMemoryBackend;
use crate::core::engine::AvailabilityEngine;
use crate::core::search::DEFAULT_SEARCH_LIMIT;
use crate::domain::model::{CarListing, Currency, UnavailabilityRecord};
use crate::utils::error::{BookingError, Result};
use crate::utils::validation::{self, Validate};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::Path;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TomlConfig {
    #[serde(default)]
    pub engine: EngineConfig,
    #[serde(default)]
    pub search: SearchConfig,
    pub logging: Option<LoggingConfig>,
    #[serde(default)]
    pub cars: Vec<CarListing>,
    #[serde(default)]
    pub unavailability: Vec<UnavailabilityRecord>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EngineConfig {
    pub currency: String,
    pub minor_units: u32,
}

impl Default for EngineConfig {
    fn default() -> Self {
        let currency = Currency::default();
        Self {
            currency: currency.code,
            minor_units: currency.minor_units,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchConfig {
    pub limit: usize,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            limit: DEFAULT_SEARCH_LIMIT,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    pub level: Option<String>,
    pub json: Option<bool>,
}

impl TomlConfig {
    /// 從 TOML 檔案載入配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(BookingError::IoError)?;
        Self::from_toml_str(&content)
    }

    /// 從 TOML 字串解析配置
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;

        toml::from_str(&processed_content).map_err(|e| BookingError::ConfigValidationError {
            field: "toml_parsing".to_string(),
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// 替換環境變數 (例如 ${RENTAL_CURRENCY})
    fn substitute_env_vars(content: &str) -> Result<String> {
        let re = Regex::new(r"\$\{([^}]+)\}").map_err(|e| BookingError::ConfigError {
            message: format!("invalid substitution pattern: {}", e),
        })?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.to_string())
    }

    pub fn validate_config(&self) -> Result<()> {
        validation::validate_currency_code("engine.currency", &self.engine.currency)?;
        validation::validate_range("engine.minor_units", self.engine.minor_units, 0, 4)?;
        validation::validate_positive_number("search.limit", self.search.limit, 1)?;

        let mut ids = HashSet::new();
        for car in &self.cars {
            if !ids.insert(car.id) {
                return Err(BookingError::ConfigValidationError {
                    field: "cars.id".to_string(),
                    message: format!("duplicate car id {}", car.id),
                });
            }
            validation::validate_non_empty_string("cars.name", &car.name)?;
            validation::validate_non_empty_string("cars.brand", &car.brand)?;
            validation::validate_positive_amount("cars.daily_rate", car.daily_rate)?;
            validation::validate_minor_units(
                "cars.daily_rate",
                car.daily_rate,
                self.engine.minor_units,
            )?;
        }

        for record in &self.unavailability {
            if !ids.contains(&record.car_id) {
                return Err(BookingError::ConfigValidationError {
                    field: "unavailability.car_id".to_string(),
                    message: format!("unknown car id {}", record.car_id),
                });
            }
            record.interval.validate()?;
        }

        Ok(())
    }

    pub fn currency(&self) -> Currency {
        Currency::new(self.engine.currency.clone(), self.engine.minor_units)
    }

    pub fn engine(&self) -> AvailabilityEngine {
        AvailabilityEngine::new(self.currency())
    }

    pub fn search_limit(&self) -> usize {
        self.search.limit
    }

    pub fn log_level(&self) -> Option<&str> {
        self.logging.as_ref().and_then(|l| l.level.as_deref())
    }

    pub fn json_logs(&self) -> bool {
        self.logging
            .as_ref()
            .and_then(|l| l.json)
            .unwrap_or(false)
    }

    /// Seeds an in-memory backend with the configured cars and blocks.
    pub fn build_backend(&self) -> InMemoryBackend {
        InMemoryBackend::with_catalog(
            self.engine(),
            self.cars.clone(),
            self.unavailability.clone(),
        )
    }
}

impl Validate for TomlConfig {
    fn validate(&self) -> Result<()> {
        self.validate_config()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::model::{AvailabilityStatus, City};
    use chrono::NaiveDate;
    use rust_decimal::Decimal;
    use std::io::Write;
    use tempfile::NamedTempFile;

    const CATALOG: &str = r#"
[engine]
currency = "MAD"
minor_units = 2

[search]
limit = 5

[logging]
level = "debug"

[[cars]]
id = 1
name = "Clio"
brand = "Renault"
daily_rate = "350.00"
city = "Casablanca"
owner_id = "owner-1"
created_at = "2024-05-01T10:00:00Z"

[[cars]]
id = 2
name = "Tucson"
brand = "Hyundai"
daily_rate = "720.50"
city = "MARRAKECH"

[[unavailability]]
car_id = 1
status = "maintenance"
interval = { start = "2024-06-10", end = "2024-06-15" }
"#;

    #[test]
    fn test_parse_catalog_config() {
        let config = TomlConfig::from_toml_str(CATALOG).unwrap();

        assert_eq!(config.engine.currency, "MAD");
        assert_eq!(config.search_limit(), 5);
        assert_eq!(config.log_level(), Some("debug"));
        assert!(!config.json_logs());
        assert_eq!(config.cars.len(), 2);
        assert_eq!(config.cars[1].city, City::Marrakech);
        assert_eq!(config.cars[1].daily_rate, Decimal::new(72050, 2));
        assert_eq!(config.unavailability[0].status, AvailabilityStatus::Maintenance);
        assert_eq!(
            config.unavailability[0].interval.start,
            NaiveDate::from_ymd_opt(2024, 6, 10).unwrap()
        );
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_defaults_for_empty_config() {
        let config = TomlConfig::from_toml_str("").unwrap();
        assert_eq!(config.currency(), Currency::default());
        assert_eq!(config.search_limit(), DEFAULT_SEARCH_LIMIT);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_env_var_substitution() {
        std::env::set_var("RENTAL_TEST_CURRENCY", "EUR");

        let toml_content = r#"
[engine]
currency = "${RENTAL_TEST_CURRENCY}"
minor_units = 2
"#;

        let config = TomlConfig::from_toml_str(toml_content).unwrap();
        assert_eq!(config.engine.currency, "EUR");

        std::env::remove_var("RENTAL_TEST_CURRENCY");
    }

    #[test]
    fn test_config_validation() {
        let bad_currency = TomlConfig::from_toml_str(
            r#"
[engine]
currency = "dirham"
minor_units = 2
"#,
        )
        .unwrap();
        assert!(bad_currency.validate().is_err());

        let orphan_block = TomlConfig::from_toml_str(
            r#"
[[unavailability]]
car_id = 9
status = "booked"
interval = { start = "2024-06-10", end = "2024-06-12" }
"#,
        )
        .unwrap();
        assert!(matches!(
            orphan_block.validate(),
            Err(BookingError::ConfigValidationError { .. })
        ));

        let zero_rate = TomlConfig::from_toml_str(
            r#"
[[cars]]
id = 1
name = "Clio"
brand = "Renault"
daily_rate = "0"
city = "RABAT"
"#,
        )
        .unwrap();
        assert!(zero_rate.validate().is_err());
    }

    #[test]
    fn test_rate_finer_than_minor_unit_is_rejected() {
        let config = TomlConfig::from_toml_str(
            r#"
[engine]
currency = "MAD"
minor_units = 2

[[cars]]
id = 1
name = "Clio"
brand = "Renault"
daily_rate = "350.005"
city = "RABAT"
"#,
        )
        .unwrap();
        assert!(matches!(
            config.validate(),
            Err(BookingError::InvalidConfigValueError { ref field, .. }) if field == "cars.daily_rate"
        ));

        // every rate that passes validation can be priced
        let ok = TomlConfig::from_toml_str(CATALOG).unwrap();
        ok.validate().unwrap();
        let engine = ok.engine();
        let interval = crate::domain::model::DateInterval::new(
            NaiveDate::from_ymd_opt(2024, 6, 1).unwrap(),
            NaiveDate::from_ymd_opt(2024, 6, 3).unwrap(),
        )
        .unwrap();
        for car in &ok.cars {
            assert!(engine.price(&interval, car.daily_rate).is_ok());
        }
    }

    #[test]
    fn test_inverted_seed_interval_is_rejected() {
        let config = TomlConfig::from_toml_str(
            r#"
[[cars]]
id = 1
name = "Clio"
brand = "Renault"
daily_rate = "300"
city = "FES"

[[unavailability]]
car_id = 1
status = "unavailable"
interval = { start = "2024-06-12", end = "2024-06-10" }
"#,
        )
        .unwrap();
        assert!(matches!(
            config.validate(),
            Err(BookingError::InvalidRangeError { .. })
        ));
    }

    #[test]
    fn test_config_from_file() {
        let mut temp_file = NamedTempFile::new().unwrap();
        temp_file.write_all(CATALOG.as_bytes()).unwrap();

        let config = TomlConfig::from_file(temp_file.path()).unwrap();
        assert_eq!(config.cars[0].name, "Clio");
    }

    #[test]
    fn test_missing_file_is_io_error() {
        assert!(matches!(
            TomlConfig::from_file("/definitely/not/here.toml"),
            Err(BookingError::IoError(_))
        ));
    }
}

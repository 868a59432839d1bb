use serde::Deserialize;

#[derive(Debug, Deserialize, Clone)]
pub struct Settings {
    pub host: String,
    pub port: u16,
    pub excel_path: String,
    #[serde(deserialize_with = "deserialize_log_level")]
    pub log_level: LogLevel,
}

impl Settings {
    pub fn get_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

fn deserialize_log_level<'de, D>(deserializer: D) -> Result<LogLevel, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let s = String::deserialize(deserializer)?;
    s.try_into().map_err(serde::de::Error::custom)
}

#[derive(Debug, Deserialize, Clone)]
pub enum LogLevel {
    Debug,
    Info,
}

impl LogLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            LogLevel::Debug => "debug",
            LogLevel::Info => "info",
        }
    }
}

impl TryFrom<String> for LogLevel {
    type Error = String;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        match s.to_lowercase().as_str() {
            "debug" => Ok(Self::Debug),
            "info" => Ok(Self::Info),
            other => Err(format!(
                "{} is not a supported minimum log level. Use either `debug` or `info`.",
                other
            )),
        }
    }
}

/// Settings come from the environment only: `EXCEL_PATH`, `PORT`, `HOST`
/// and `LOG_LEVEL`, each with a default suitable for local runs.
pub fn get_configuration() -> Result<Settings, config::ConfigError> {
    let settings = config::Config::builder()
        .set_default("host", "0.0.0.0")?
        .set_default("port", 5000)?
        .set_default("excel_path", "train.xlsx")?
        .set_default("log_level", "info")?
        .add_source(config::Environment::default())
        .build()?;

    let settings = settings.try_deserialize::<Settings>()?;

    Ok(settings)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_deserialize_into_settings() {
        let settings: Settings = config::Config::builder()
            .set_default("host", "0.0.0.0")
            .unwrap()
            .set_default("port", 5000)
            .unwrap()
            .set_default("excel_path", "train.xlsx")
            .unwrap()
            .set_default("log_level", "info")
            .unwrap()
            .build()
            .unwrap()
            .try_deserialize()
            .unwrap();

        assert_eq!(settings.port, 5000);
        assert_eq!(settings.excel_path, "train.xlsx");
        assert_eq!(settings.get_address(), "0.0.0.0:5000");
    }

    #[test]
    fn log_level_rejects_unknown_values() {
        let result: Result<LogLevel, String> = "verbose".to_string().try_into();
        assert!(result.is_err());
    }
}

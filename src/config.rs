
use navx::Port;

#[derive(Deserialize, Clone, Debug, Default)]
#[serde(default)]
pub struct Config {
    pub limelight: Limelight,
    pub navx: NavX,
    pub logging: Logging,
    pub run: Run,
}

#[derive(Deserialize, Clone, Debug)]
#[serde(default)]
pub struct Limelight {
    /// Table name set on the camera's configuration page.
    pub table: String,
    pub pipeline: Option<u32>,
}

#[derive(Deserialize, Clone, Debug, Default)]
#[serde(default)]
pub struct NavX {
    pub port: Port,
}

#[derive(Deserialize, Clone, Copy, Debug, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    Term,
    Json,
}

#[derive(Deserialize, Clone, Debug)]
#[serde(default)]
pub struct Logging {
    pub level: String,
    pub format: LogFormat,
}

#[derive(Deserialize, Clone, Debug)]
#[serde(default)]
pub struct Run {
    pub period_ms: u64,
    pub iterations: u32,
}

use std::default::Default;

impl Default for Limelight {
    fn default() -> Limelight {
        Limelight {
            table: String::from("limelight"),
            pipeline: None,
        }
    }
}

impl Default for Logging {
    fn default() -> Logging {
        Logging {
            level: String::from("info"),
            format: LogFormat::Term,
        }
    }
}

impl Default for Run {
    fn default() -> Run {
        Run {
            period_ms: 20,
            iterations: 250,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_file_gives_defaults() {
        let config: Config = ::toml::from_str("").unwrap();
        assert_eq!(config.limelight.table, "limelight");
        assert_eq!(config.limelight.pipeline, None);
        assert_eq!(config.navx.port, Port::SpiMxp);
        assert_eq!(config.logging.level, "info");
        assert_eq!(config.logging.format, LogFormat::Term);
        assert_eq!(config.run.period_ms, 20);
        assert_eq!(config.run.iterations, 250);
    }

    #[test]
    fn sections_override_defaults() {
        let config: Config = ::toml::from_str(r#"
            [limelight]
            table = "limelight-shooter"
            pipeline = 3

            [navx]
            port = "i2c-onboard"

            [logging]
            format = "json"

            [run]
            iterations = 10
        "#)
            .unwrap();
        assert_eq!(config.limelight.table, "limelight-shooter");
        assert_eq!(config.limelight.pipeline, Some(3));
        assert_eq!(config.navx.port, Port::I2cOnboard);
        assert_eq!(config.logging.level, "info");
        assert_eq!(config.logging.format, LogFormat::Json);
        assert_eq!(config.run.period_ms, 20);
        assert_eq!(config.run.iterations, 10);
    }
}

use std::fs::File;
use std::io::Read;
use std::path::Path;

use ::errors::*;
use config::Config;

pub fn load_config<P: AsRef<Path>>(path: P) -> Result<Config> {
    let path = path.as_ref();
    let mut file = File::open(path)
        .chain_err(|| format!("Failed to open config file {}", path.display()))?;
    let mut contents = String::new();
    file.read_to_string(&mut contents).chain_err(|| "Failed to read config file")?;

    let config = ::toml::de::from_str(&contents).chain_err(|| "Failed to deserialize config")?;

    Ok(config)
}

/// Renders an error and each of its causes, one per line.
pub fn error_trace(e: &Error) -> String {
    let mut trace = format!("Error: {}", e);
    for cause in e.iter().skip(1) {
        trace.push_str("\nCause: ");
        trace.push_str(&cause.to_string());
    }
    trace
}

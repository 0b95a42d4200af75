use std::{env, fmt::Display, str::FromStr};

use tracing::{info, warn};

#[derive(Clone, Debug)]
pub struct Config {
    pub port: u16,
    pub mongo_uri: String,
    pub mongo_db: String,
    pub production: bool,
}

impl Config {
    pub fn load() -> Self {
        Self {
            port: try_load("TUITER_PORT", "4000"),
            mongo_uri: try_load("MONGO_URI", "mongodb://localhost:27017"),
            mongo_db: try_load("MONGO_DB", "fse"),
            production: env::var("ENV").map(|v| v == "PRODUCTION").unwrap_or(false),
        }
    }
}

fn var(key: &str) -> Result<String, ()> {
    env::var(key).map_err(|_| {
        warn!("Environment variable {key} not found, using default");
    })
}

fn try_load<T: FromStr>(key: &str, default: &str) -> T
where
    T::Err: Display,
{
    var(key)
        .unwrap_or_else(|_| {
            info!("{key} not set, using default: {default}");
            default.to_string()
        })
        .parse()
        .map_err(|e| {
            warn!("Invalid {key} value: {e}");
        })
        .expect("Environment misconfigured!")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unset_variable_falls_back_to_default() {
        assert_eq!(try_load::<u16>("TUITER_TEST_UNSET_PORT", "4000"), 4000);
        assert_eq!(
            try_load::<String>("TUITER_TEST_UNSET_DB", "fse"),
            String::from("fse")
        );
    }
}

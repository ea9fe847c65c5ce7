//! Property-test run profile read from the environment.
//!
//! `PROGTEST_CASES` overrides the number of cases per property and
//! `HAMTOUGH_PBT_FORK` toggles forked execution. Unparseable values are
//! reported through `tracing` and fall back to the caller's defaults.

use std::env;

/// Environment variable controlling proptest case counts.
pub const PROGTEST_CASES_ENV_KEY: &str = "PROGTEST_CASES";
/// Environment variable controlling proptest process forking.
pub const HAMTOUGH_PBT_FORK_ENV_KEY: &str = "HAMTOUGH_PBT_FORK";

/// Runtime profile for property-test execution.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ProptestRunProfile {
    cases: u32,
    fork: bool,
}

impl ProptestRunProfile {
    /// Loads a profile, using the defaults for absent or invalid overrides.
    ///
    /// # Examples
    /// ```
    /// use hamtough_test_support::property::ProptestRunProfile;
    ///
    /// let profile = ProptestRunProfile::load(64, false);
    /// assert!(profile.cases() > 0);
    /// ```
    #[must_use]
    pub fn load(default_cases: u32, default_fork: bool) -> Self {
        Self {
            cases: read_override(PROGTEST_CASES_ENV_KEY, parse_cases).unwrap_or(default_cases),
            fork: read_override(HAMTOUGH_PBT_FORK_ENV_KEY, parse_bool).unwrap_or(default_fork),
        }
    }

    /// Number of cases to run per property.
    #[must_use]
    pub fn cases(&self) -> u32 {
        self.cases
    }

    /// Whether to run each case in a forked subprocess.
    #[must_use]
    pub fn fork(&self) -> bool {
        self.fork
    }
}

fn read_override<T>(key: &'static str, parse: fn(&str) -> Result<T, String>) -> Option<T> {
    let raw = env::var(key).ok()?;
    match parse(&raw) {
        Ok(value) => Some(value),
        Err(reason) => {
            tracing::warn!(
                env = key,
                raw = %raw,
                reason = %reason,
                "invalid property-test profile override; using default",
            );
            None
        }
    }
}

fn parse_cases(raw: &str) -> Result<u32, String> {
    match raw.trim().parse::<u32>() {
        Ok(0) => Err("cases must be > 0".to_owned()),
        Ok(cases) => Ok(cases),
        Err(error) => Err(format!("parse error: {error}")),
    }
}

fn parse_bool(raw: &str) -> Result<bool, String> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        _ => Err("expected one of: true/false/1/0/yes/no/on/off".to_owned()),
    }
}

//! Environment variable snapshot and `${VAR}` interpolation.

use std::collections::HashMap;
use std::path::Path;

/// Environment variable name for the deployer's private key.
pub const PRIVATE_KEY_ENV_VAR: &str = "PRIVATE_KEY";

/// An immutable view of the environment variables the deployer reads.
///
/// Taken once at startup so that configuration resolution is a pure function
/// of the config file and this snapshot.
#[derive(Clone, Default)]
pub struct Env {
    vars: HashMap<String, String>,
}

impl Env {
    /// Load `.env` (explicit path or the nearest one found) and snapshot the
    /// process environment. Variables already set in the process win.
    pub fn load(env_file: Option<&Path>) -> Result<Self, dotenvy::Error> {
        match env_file {
            Some(path) => {
                dotenvy::from_path(path)?;
                tracing::debug!(path = %path.display(), "Loaded environment file");
            }
            None => match dotenvy::dotenv() {
                Ok(path) => tracing::debug!(path = %path.display(), "Loaded environment file"),
                Err(e) if e.not_found() => tracing::debug!("No .env file found"),
                Err(e) => return Err(e),
            },
        }
        Ok(Self::from_process())
    }

    /// Snapshot the current process environment.
    pub fn from_process() -> Self {
        Self {
            vars: std::env::vars().collect(),
        }
    }

    /// Look up a variable. Empty values count as unset.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.vars
            .get(name)
            .map(String::as_str)
            .filter(|v| !v.trim().is_empty())
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for Env {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            vars: iter.into_iter().map(|(k, v)| (k.into(), v.into())).collect(),
        }
    }
}

// Values may be secrets; only names are printed.
impl std::fmt::Debug for Env {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut names: Vec<&String> = self.vars.keys().collect();
        names.sort();
        f.debug_struct("Env").field("vars", &names).finish()
    }
}

/// Replace every `${NAME}` in `template` with the variable's value, or the
/// empty string when it is unset. An unterminated `${` is kept verbatim.
pub fn interpolate(template: &str, env: &Env) -> String {
    let mut out = String::with_capacity(template.len());
    let mut rest = template;

    while let Some(start) = rest.find("${") {
        out.push_str(&rest[..start]);
        let after = &rest[start + 2..];
        match after.find('}') {
            Some(end) => {
                let name = &after[..end];
                out.push_str(env.get(name).unwrap_or(""));
                rest = &after[end + 1..];
            }
            None => {
                out.push_str(&rest[start..]);
                rest = "";
            }
        }
    }
    out.push_str(rest);
    out
}

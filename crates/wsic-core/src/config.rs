use figment::{
    providers::{Env, Format, Toml},
    Figment,
};
use serde::Deserialize;
use std::env;
use std::path::{Path, PathBuf};

/// Tunables for the reconciliation engine and search orchestration.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct SearchTuning {
    /// Vector results scoring above this land in the found tier
    /// (difficulty permitting).
    pub similarity_threshold: f32,
    pub lexical_limit: usize,
    pub vector_limit: usize,
    pub lexical_timeout_ms: u64,
    pub embed_timeout_ms: u64,
    pub vector_timeout_ms: u64,
}

impl Default for SearchTuning {
    fn default() -> Self {
        Self {
            similarity_threshold: 0.85,
            lexical_limit: 5,
            vector_limit: 10,
            lexical_timeout_ms: 2_000,
            embed_timeout_ms: 3_000,
            vector_timeout_ms: 4_000,
        }
    }
}

/// Tunables for the generation trigger.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct TriggerTuning {
    /// Retry policy metadata carried on the queue message.
    pub max_retries: u32,
    pub retry_backoff_secs: u64,
    /// Window for suppressing identical (query, difficulty, user) requests.
    /// 0 disables suppression.
    pub dedup_window_secs: u64,
    pub enqueue_timeout_ms: u64,
}

impl Default for TriggerTuning {
    fn default() -> Self {
        Self {
            max_retries: 3,
            retry_backoff_secs: 30,
            dedup_window_secs: 30,
            enqueue_timeout_ms: 2_000,
        }
    }
}

pub struct Config {
    figment: Figment,
}

impl Config {
    pub fn load() -> anyhow::Result<Self> {
        let env_name = env::var("RUST_ENV").unwrap_or_else(|_| "dev".to_string());

        let mut figment = Figment::new().merge(Toml::file("config.toml"));
        match env_name.as_str() {
            "dev" | "development" => figment = figment.merge(Toml::file("config.dev.toml")),
            "prod" | "production" => figment = figment.merge(Toml::file("config.prod.toml")),
            "test" | "testing" => figment = figment.merge(Toml::file("config.test.toml")),
            _ => {}
        }
        figment = figment.merge(Env::prefixed("APP_").split("__"));

        Ok(Self { figment })
    }

    pub fn get<T>(&self, key: &str) -> anyhow::Result<T>
    where
        T: serde::de::DeserializeOwned,
    {
        self.figment
            .extract_inner(key)
            .map_err(|e| anyhow::anyhow!("Failed to get '{}': {}", key, e))
    }

    /// Engine/orchestration tunables from the `[search]` table, with the
    /// documented defaults where unset.
    pub fn search_tuning(&self) -> SearchTuning {
        self.figment.extract_inner("search").unwrap_or_default()
    }

    /// Trigger tunables from the `[trigger]` table.
    pub fn trigger_tuning(&self) -> TriggerTuning {
        self.figment.extract_inner("trigger").unwrap_or_default()
    }
}

/// Expand a user-provided path string:
/// - Expands leading '~' to the user's home directory
/// - Expands ${VAR} and $VAR environment variables
/// - Returns a PathBuf without attempting to canonicalize
pub fn expand_path<S: AsRef<str>>(input: S) -> PathBuf {
    let s = input.as_ref();
    let expanded_env = shellexpand::env(s).unwrap_or(std::borrow::Cow::Borrowed(s));
    let expanded = shellexpand::tilde(&expanded_env);
    PathBuf::from(expanded.as_ref())
}

/// Resolve a possibly relative path against a given base directory after
/// expansion. If `p` is absolute, it's returned as-is.
pub fn resolve_with_base<S: AsRef<str>>(base: &Path, p: S) -> PathBuf {
    let p = expand_path(p);
    if p.is_absolute() {
        p
    } else {
        base.join(p)
    }
}

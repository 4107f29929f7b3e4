use std::{
    env, fs,
    path::{Path, PathBuf},
};

use crate::{domain::ChatId, errors::Error, Result};

/// Typed process configuration.
///
/// Two parameters are required and fatal when absent: the bot token and the
/// id of the admin group chat. Everything else has defaults.
#[derive(Clone, Debug)]
pub struct Config {
    pub bot_token: String,
    pub group_chat_id: ChatId,
    pub db_path: PathBuf,
    pub db_max_connections: u32,
}

impl Config {
    pub fn load() -> Result<Self> {
        load_dotenv_if_present(Path::new(".env"));
        Self::from_env(|key| env::var(key).ok())
    }

    /// Build a config from an arbitrary variable source (tests pass a map).
    pub fn from_env(get: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let bot_token = get("BOT_TOKEN").and_then(non_empty).ok_or_else(|| {
            Error::Config("BOT_TOKEN environment variable is required".to_string())
        })?;

        let group_raw = get("BOT_GROUPID").and_then(non_empty).ok_or_else(|| {
            Error::Config("BOT_GROUPID environment variable is required".to_string())
        })?;
        let group_chat_id = group_raw
            .trim()
            .parse::<i64>()
            .map(ChatId)
            .map_err(|_| Error::Config(format!("BOT_GROUPID is not a numeric chat id: {group_raw}")))?;

        let db_path = get("FORWARD_DB_PATH")
            .and_then(non_empty)
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from("forward.db"));

        let db_max_connections = get("DB_MAX_CONNECTIONS")
            .and_then(|s| s.trim().parse::<u32>().ok())
            .unwrap_or(5);

        Ok(Self {
            bot_token,
            group_chat_id,
            db_path,
            db_max_connections,
        })
    }
}

fn load_dotenv_if_present(path: &Path) {
    let Ok(contents) = fs::read_to_string(path) else {
        return;
    };

    for raw in contents.lines() {
        let line = raw.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        let Some((k, v)) = line.split_once('=') else {
            continue;
        };

        let key = k.trim();
        if key.is_empty() {
            continue;
        }
        if env::var_os(key).is_some() {
            continue; // do not override existing env
        }

        let mut val = v.trim().to_string();
        // Strip optional surrounding quotes.
        if val.len() >= 2
            && ((val.starts_with('"') && val.ends_with('"'))
                || (val.starts_with('\'') && val.ends_with('\'')))
        {
            val = val[1..val.len() - 1].to_string();
        }

        env::set_var(key, val);
    }
}

fn non_empty(s: String) -> Option<String> {
    if s.trim().is_empty() {
        None
    } else {
        Some(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn env(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    fn from_map(map: &HashMap<String, String>) -> Result<Config> {
        Config::from_env(|key| map.get(key).cloned())
    }

    #[test]
    fn full_config_parses() {
        let map = env(&[
            ("BOT_TOKEN", "123:abc"),
            ("BOT_GROUPID", "-100200300"),
            ("FORWARD_DB_PATH", "/tmp/relay.db"),
            ("DB_MAX_CONNECTIONS", "2"),
        ]);
        let cfg = from_map(&map).unwrap();
        assert_eq!(cfg.bot_token, "123:abc");
        assert_eq!(cfg.group_chat_id, ChatId(-100200300));
        assert_eq!(cfg.db_path, PathBuf::from("/tmp/relay.db"));
        assert_eq!(cfg.db_max_connections, 2);
    }

    #[test]
    fn defaults_apply() {
        let map = env(&[("BOT_TOKEN", "123:abc"), ("BOT_GROUPID", "42")]);
        let cfg = from_map(&map).unwrap();
        assert_eq!(cfg.db_path, PathBuf::from("forward.db"));
        assert_eq!(cfg.db_max_connections, 5);
    }

    #[test]
    fn missing_token_is_fatal() {
        let map = env(&[("BOT_GROUPID", "42")]);
        assert!(matches!(from_map(&map), Err(Error::Config(_))));
    }

    #[test]
    fn missing_group_is_fatal() {
        let map = env(&[("BOT_TOKEN", "123:abc")]);
        assert!(matches!(from_map(&map), Err(Error::Config(_))));
    }

    #[test]
    fn non_numeric_group_is_fatal() {
        let map = env(&[("BOT_TOKEN", "123:abc"), ("BOT_GROUPID", "admins")]);
        assert!(matches!(from_map(&map), Err(Error::Config(_))));
    }
}

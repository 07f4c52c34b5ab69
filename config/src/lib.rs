//! Process-wide configuration. Starts out holding our built-in defaults, and
//! can have a YAML file (or any JSON value) merged over the top of it.

#[macro_use]
extern crate lazy_static;
#[macro_use]
extern crate quick_error;

use ::std::env;
use ::std::fs;
use ::std::io::Error as IoError;
use ::std::path::Path;
use ::std::sync::RwLock;

use ::serde::de::DeserializeOwned;
use ::serde::ser::Serialize;
pub use ::serde_json::Value;
use ::serde_json::Map;

quick_error! {
    #[derive(Debug)]
    pub enum ConfigError {
        Io(err: IoError) {
            cause(err)
            display("config: io error: {}", err)
            from()
        }
        Yaml(err: serde_yaml::Error) {
            cause(err)
            display("config: yaml error: {}", err)
            from()
        }
        Json(err: serde_json::Error) {
            cause(err)
            display("config: bad value: {}", err)
            from()
        }
        MissingFile(path: String) {
            display("config: file not found: {}", path)
        }
        NotFound(key: String) {
            display("config: key not found: {}", key)
        }
        DeadEnd(key: String) {
            display("config: lookup dead end at: {}", key)
        }
        Poisoned {
            display("config: lock poisoned")
        }
    }
}

pub type CResult<T> = Result<T, ConfigError>;

/// The env var we check for a config file location
pub const CONFIG_ENV: &str = "TODOIST_SYNC_CONFIG_FILE";

/// Where we look for a config file if nobody tells us otherwise. Not having one
/// here is fine.
const DEFAULT_FILE: &str = "todoist.yaml";

const DEFAULTS: &str = r#"
api:
  endpoint: "https://todoist.com/API/v7/sync"
loglevel: warn
"#;

lazy_static! {
    static ref CONFIG: RwLock<Value> = RwLock::new(defaults());
}

fn defaults() -> Value {
    serde_yaml::from_str(DEFAULTS).unwrap_or_else(|_| Value::Object(Map::new()))
}

/// Load a config file and merge it over whatever we have. If no location is
/// given we try the env var, then the default file. An explicit location that
/// doesn't exist is an error, a missing default file is not.
pub fn load_config(location: Option<String>) -> CResult<()> {
    let (path, required) = match location {
        Some(x) => (x, true),
        None => match env::var(CONFIG_ENV) {
            Ok(x) => (x, true),
            Err(_) => (String::from(DEFAULT_FILE), false),
        },
    };
    if !Path::new(&path).exists() {
        if required {
            return Err(ConfigError::MissingFile(path));
        }
        return Ok(());
    }
    let contents = fs::read_to_string(&path)?;
    let data: Value = serde_yaml::from_str(&contents)?;
    merge(&data)
}

/// Recursively copy `from` into `into`. Objects merge key by key, anything else
/// overwrites.
fn merge_values(into: &mut Value, from: &Value) {
    if let (Value::Object(into_obj), Value::Object(from_obj)) = (&mut *into, from) {
        for (key, val) in from_obj {
            match into_obj.get_mut(key) {
                Some(existing) => merge_values(existing, val),
                None => {
                    into_obj.insert(key.clone(), val.clone());
                }
            }
        }
        return;
    }
    *into = from.clone();
}

/// Walk the given key path, returning the value at the end of it
fn walk<'a>(keys: &[&str], data: &'a Value) -> CResult<&'a Value> {
    let mut cur = data;
    for key in keys {
        cur = match *cur {
            Value::Object(ref obj) => match obj.get(*key) {
                Some(x) => x,
                None => return Err(ConfigError::NotFound(keys.join("."))),
            },
            _ => return Err(ConfigError::DeadEnd(String::from(*key))),
        };
    }
    Ok(cur)
}

/// Get a value from our config
pub fn get<T: DeserializeOwned>(keys: &[&str]) -> CResult<T> {
    let guard = CONFIG.read().map_err(|_| ConfigError::Poisoned)?;
    let val = walk(keys, &guard)?;
    Ok(serde_json::from_value(val.clone())?)
}

/// Set a value into our config, creating any objects along the way
pub fn set<T: Serialize>(keys: &[&str], val: &T) -> CResult<()> {
    let val = serde_json::to_value(val)?;
    let mut guard = CONFIG.write().map_err(|_| ConfigError::Poisoned)?;
    let mut cur: &mut Value = &mut guard;
    for key in keys {
        if !cur.is_object() {
            *cur = Value::Object(Map::new());
        }
        cur = match cur.as_object_mut() {
            Some(obj) => obj.entry(String::from(*key)).or_insert(Value::Null),
            None => return Err(ConfigError::DeadEnd(String::from(*key))),
        };
    }
    *cur = val;
    Ok(())
}

/// Merge a value (probably an object) over our config
pub fn merge(data: &Value) -> CResult<()> {
    let mut guard = CONFIG.write().map_err(|_| ConfigError::Poisoned)?;
    merge_values(&mut guard, data);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use ::serde_json::json;

    #[test]
    fn has_defaults() {
        let endpoint: String = get(&["api", "endpoint"]).unwrap();
        assert_eq!(endpoint, "https://todoist.com/API/v7/sync");
    }

    #[test]
    fn missing_keys() {
        match get::<String>(&["api", "nope"]) {
            Err(ConfigError::NotFound(key)) => assert_eq!(key, "api.nope"),
            x => panic!("expected NotFound, got {:?}", x),
        }
        match get::<String>(&["api", "endpoint", "deeper"]) {
            Err(ConfigError::DeadEnd(key)) => assert_eq!(key, "deeper"),
            x => panic!("expected DeadEnd, got {:?}", x),
        }
    }

    #[test]
    fn set_creates_path() {
        set(&["tests", "set", "depth"], &3).unwrap();
        let depth: u32 = get(&["tests", "set", "depth"]).unwrap();
        assert_eq!(depth, 3);
    }

    #[test]
    fn merges_deep() {
        set(&["tests", "merge", "keep"], &"me").unwrap();
        merge(&json!({"tests": {"merge": {"add": [1, 2]}}})).unwrap();
        let keep: String = get(&["tests", "merge", "keep"]).unwrap();
        let add: Vec<u8> = get(&["tests", "merge", "add"]).unwrap();
        assert_eq!(keep, "me");
        assert_eq!(add, vec![1, 2]);
    }

    #[test]
    fn explicit_missing_file_fails() {
        match load_config(Some(String::from("/nonexistent/todoist.yaml"))) {
            Err(ConfigError::MissingFile(_)) => {}
            x => panic!("expected MissingFile, got {:?}", x),
        }
    }

    #[test]
    fn loads_yaml_file() {
        let path = env::temp_dir().join(format!("todoist-config-{}.yaml", ::std::process::id()));
        fs::write(&path, "tests:\n  file:\n    loaded: true\n").unwrap();
        load_config(Some(path.to_string_lossy().into_owned())).unwrap();
        fs::remove_file(&path).unwrap();
        let loaded: bool = get(&["tests", "file", "loaded"]).unwrap();
        assert!(loaded);
        // the defaults survive the merge
        let level: String = get(&["loglevel"]).unwrap();
        assert_eq!(level, "warn");
    }
}

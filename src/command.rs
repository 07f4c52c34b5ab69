//! Commands are the unit of work the sync API understands. Each one carries a
//! type tag, a uuid the server uses to dedupe retries, an optional temp id for
//! things that don't exist server-side yet, and a bag of args.

use ::std::collections::HashMap;

use ::serde_json::{Map, Value};
use ::uuid::Uuid;

/// A single server-side operation. Built once, then serialized.
#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct Command {
    #[serde(rename = "type")]
    ty: String,
    uuid: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    temp_id: Option<String>,
    args: Map<String, Value>,
}

/// Generate a random (v4) uuid string
pub fn new_uuid() -> String {
    Uuid::new_v4().to_string()
}

/// Pull the object out of an args value. Anything that isn't an object gets
/// stored under "value" so it isn't silently dropped.
fn to_args(args: Value) -> Map<String, Value> {
    match args {
        Value::Object(x) => x,
        Value::Null => Map::new(),
        x => {
            let mut map = Map::new();
            map.insert(String::from("value"), x);
            map
        }
    }
}

impl Command {
    /// Build a command that operates on existing objects
    pub fn new(ty: &str, args: Value) -> Command {
        Command {
            ty: String::from(ty),
            uuid: new_uuid(),
            temp_id: None,
            args: to_args(args),
        }
    }

    /// Build a command that creates an object, and so needs a temp id the
    /// server can map back to a real one
    pub fn create(ty: &str, args: Value) -> Command {
        Command {
            temp_id: Some(new_uuid()),
            ..Command::new(ty, args)
        }
    }

    pub fn ty(&self) -> &str {
        &self.ty
    }

    pub fn uuid(&self) -> &str {
        &self.uuid
    }

    pub fn temp_id(&self) -> Option<&str> {
        self.temp_id.as_ref().map(|x| x.as_str())
    }

    pub fn args(&self) -> &Map<String, Value> {
        &self.args
    }
}

/// Build one create command per name. Returns the commands (in order) and a
/// name -> temp id lookup. Duplicate names get their own commands, but only the
/// last one survives in the lookup.
pub fn create_each<S, F>(ty: &str, names: &[S], args: F) -> (Vec<Command>, HashMap<String, String>)
    where S: AsRef<str>,
          F: Fn(&str) -> Value
{
    let mut commands = Vec::with_capacity(names.len());
    let mut temp_ids = HashMap::with_capacity(names.len());
    for name in names {
        let name = name.as_ref();
        let command = Command::create(ty, args(name));
        if let Some(temp_id) = command.temp_id() {
            temp_ids.insert(String::from(name), String::from(temp_id));
        }
        commands.push(command);
    }
    (commands, temp_ids)
}

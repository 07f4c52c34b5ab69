//! Turns raw HTTP responses into something callers can poke at. Decoding is
//! best effort: a body that isn't a JSON object becomes an empty map, and the
//! status always comes through untouched.

use ::std::collections::HashMap;

use ::api::{self, Response, Status};
use ::serde::de::DeserializeOwned;
use ::serde_json::{self, Map, Value};

use crate::command::Command;

/// The generic response envelope: decoded body plus HTTP status text
#[derive(Serialize, Debug, Clone, Default, PartialEq)]
pub struct SyncResponse {
    pub body: Map<String, Value>,
    pub status: String,
}

/// What we hand back from an add. `name_ids` maps each name we sent to the id
/// the server gave it.
#[derive(Serialize, Debug, Clone, Default, PartialEq)]
pub struct AddResponse {
    #[serde(flatten)]
    pub response: SyncResponse,
    pub name_ids: HashMap<String, i64>,
}

/// What we hand back from adding a note
#[derive(Serialize, Debug, Clone, Default, PartialEq)]
pub struct NoteResponse {
    #[serde(flatten)]
    pub response: SyncResponse,
    pub note_id: Option<i64>,
}

/// What we hand back from a commit. `id_mapping` maps the temp id of every
/// queued create the server resolved to its real id.
#[derive(Serialize, Debug, Clone, Default, PartialEq)]
pub struct CommitResponse {
    #[serde(flatten)]
    pub response: SyncResponse,
    pub id_mapping: HashMap<String, i64>,
}

/// Ids come back as numbers, but be lenient about floats and numeric strings.
fn to_id(val: &Value) -> Option<i64> {
    match *val {
        Value::Number(ref num) => num.as_i64().or_else(|| num.as_f64().map(|x| x as i64)),
        Value::String(ref s) => s.parse::<i64>().ok(),
        _ => None,
    }
}

impl SyncResponse {
    /// Build a response out of a status and whatever bytes came back
    pub fn from_parts(status: Status, bytes: &[u8]) -> SyncResponse {
        let body = match serde_json::from_slice::<Value>(bytes) {
            Ok(Value::Object(map)) => map,
            Ok(_) => {
                warn!("response::from_parts() -- body is not an object ({}), ignoring", status);
                Map::new()
            }
            Err(e) => {
                warn!("response::from_parts() -- could not decode body ({}): {}", status, e);
                Map::new()
            }
        };
        SyncResponse {
            body: body,
            status: api::status_text(status),
        }
    }

    /// Read a raw HTTP response. A body we can't read is treated like a body we
    /// can't parse.
    pub fn from_response(res: Response) -> SyncResponse {
        let status = res.status();
        match res.bytes() {
            Ok(bytes) => {
                trace!("  response::from_response() -- body: {}", String::from_utf8_lossy(&bytes));
                SyncResponse::from_parts(status, &bytes)
            }
            Err(e) => {
                warn!("response::from_response() -- problem reading body ({}): {}", status, e);
                SyncResponse::from_parts(status, &[])
            }
        }
    }

    /// Grab a top-level body value as a concrete type
    pub fn get<T: DeserializeOwned>(&self, key: &str) -> Option<T> {
        self.body.get(key)
            .and_then(|x| serde_json::from_value(x.clone()).ok())
    }

    /// The cursor the server wants us to send next time, if any
    pub fn sync_token(&self) -> Option<String> {
        self.get("sync_token")
    }

    /// Look up the server id for one of our temp ids
    pub fn resolve(&self, temp_id: &str) -> Option<i64> {
        self.body.get("temp_id_mapping")
            .and_then(|mapping| mapping.get(temp_id))
            .and_then(to_id)
    }

    /// Given a key -> temp id lookup, build key -> server id. Keys the server
    /// didn't map are left out.
    pub fn resolve_all(&self, temp_ids: &HashMap<String, String>) -> HashMap<String, i64> {
        let mut ids = HashMap::with_capacity(temp_ids.len());
        for (key, temp_id) in temp_ids {
            match self.resolve(temp_id) {
                Some(id) => {
                    ids.insert(key.clone(), id);
                }
                None => warn!("response::resolve_all() -- no id mapped for {} ({}) [{}]", key, temp_id, self.status),
            }
        }
        ids
    }

    /// Resolve the temp ids of every create in a batch of commands
    pub fn resolve_commands(&self, commands: &[Command]) -> HashMap<String, i64> {
        let temp_ids: HashMap<String, String> = commands.iter()
            .filter_map(|c| c.temp_id())
            .map(|t| (String::from(t), String::from(t)))
            .collect();
        self.resolve_all(&temp_ids)
    }
}

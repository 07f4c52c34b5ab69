//! The sync object owns everything needed to talk to the sync endpoint: the
//! auth token, the read cursor, and the queue of writes waiting for a commit.
//!
//! Writes either go out right away or sit in the queue until `commit()` sends
//! the whole batch in one request. The queue is only cleared once a commit
//! makes it to the server and back. What the server thought of each command is
//! in the response body.

use ::std::mem;

use ::api::{Api, ApiReq, Response};

use crate::command::Command;
use crate::error::TResult;
use crate::response::{SyncResponse, CommitResponse};

/// The sync token that asks the server for everything
pub const FULL_SYNC: &str = "*";

pub struct SyncObject {
    token: String,
    api: Api,
    sync_token: String,
    write_queue: Vec<Command>,
}

impl SyncObject {
    /// Create a sync object talking to the given endpoint
    pub fn new(token: &str, endpoint: &str) -> TResult<SyncObject> {
        let api = Api::new(endpoint)?;
        Ok(SyncObject {
            token: String::from(token),
            api: api,
            sync_token: String::from(FULL_SYNC),
            write_queue: Vec::new(),
        })
    }

    pub fn endpoint(&self) -> &str {
        self.api.endpoint()
    }

    pub fn sync_token(&self) -> &str {
        &self.sync_token
    }

    /// Forget our cursor. The next sync() is a full one.
    pub fn reset_sync_token(&mut self) {
        self.sync_token = String::from(FULL_SYNC);
    }

    /// The commands waiting on a commit, in the order they were queued
    pub fn pending(&self) -> &[Command] {
        &self.write_queue[..]
    }

    /// Send a batch of commands
    pub fn call_write_api(&self, commands: &[Command]) -> TResult<Response> {
        debug!("sync::call_write_api() -- sending {} commands", commands.len());
        let json = serde_json::to_string(commands)?;
        let req = ApiReq::new()
            .field("token", self.token.as_str())
            .field("commands", json);
        self.api.post_form(req).map_err(|e| toterr!(e))
    }

    /// Ask for the given resource types, using our current cursor
    pub fn call_read_api(&self, resource_types: &[&str]) -> TResult<Response> {
        self.read_from(&self.sync_token, resource_types)
    }

    fn read_from(&self, sync_token: &str, resource_types: &[&str]) -> TResult<Response> {
        debug!("sync::read_from() -- reading {:?} from {}", resource_types, sync_token);
        let json = serde_json::to_string(resource_types)?;
        let req = ApiReq::new()
            .field("token", self.token.as_str())
            .field("sync_token", sync_token)
            .field("resource_types", json);
        self.api.post_form(req).map_err(|e| toterr!(e))
    }

    /// Send commands now and decode what comes back
    pub fn write(&self, commands: &[Command]) -> TResult<SyncResponse> {
        let res = self.call_write_api(commands)?;
        Ok(SyncResponse::from_response(res))
    }

    /// Read everything of the given types, ignoring (and not touching) our
    /// cursor
    pub fn read_all(&self, resource_types: &[&str]) -> TResult<SyncResponse> {
        let res = self.read_from(FULL_SYNC, resource_types)?;
        Ok(SyncResponse::from_response(res))
    }

    /// Read the given types since our last sync, and move the cursor forward if
    /// the server gave us a new one
    pub fn sync(&mut self, resource_types: &[&str]) -> TResult<SyncResponse> {
        let res = self.call_read_api(resource_types)?;
        let response = SyncResponse::from_response(res);
        match response.sync_token() {
            Some(token) => {
                debug!("sync::sync() -- cursor {} -> {}", self.sync_token, token);
                self.sync_token = token;
            }
            None => warn!("sync::sync() -- no sync_token in response ({})", response.status),
        }
        Ok(response)
    }

    /// Add commands to the end of the write queue
    pub fn queue_commands(&mut self, commands: Vec<Command>) {
        trace!("sync::queue_commands() -- queueing {} (have {})", commands.len(), self.write_queue.len());
        self.write_queue.extend(commands);
    }

    /// Send everything in the write queue as one batch. If the request never
    /// makes it (or never comes back) the queue is left alone, otherwise it is
    /// emptied regardless of what the server said about each command.
    pub fn commit(&mut self) -> TResult<CommitResponse> {
        info!("sync::commit() -- committing {} commands", self.write_queue.len());
        let res = self.call_write_api(&self.write_queue)?;
        let committed = mem::replace(&mut self.write_queue, Vec::new());
        let response = SyncResponse::from_response(res);
        let id_mapping = response.resolve_commands(&committed);
        Ok(CommitResponse {
            response: response,
            id_mapping: id_mapping,
        })
    }
}

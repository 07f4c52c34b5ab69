//! The Todoist object is the front door. It owns the sync object and hands out
//! short-lived handles for project and item calls that share its write queue.

use crate::command::Command;
use crate::error::TResult;
use crate::items::Items;
use crate::projects::Projects;
use crate::response::{CommitResponse, SyncResponse};
use crate::sync::SyncObject;

pub struct Todoist {
    sync: SyncObject,
}

impl Todoist {
    /// Create a client for the given user token, using the endpoint from our
    /// config (`api.endpoint`)
    pub fn new(token: &str) -> TResult<Todoist> {
        let endpoint: String = config::get(&["api", "endpoint"])?;
        Todoist::with_endpoint(token, &endpoint)
    }

    /// Create a client that talks to a specific endpoint
    pub fn with_endpoint(token: &str, endpoint: &str) -> TResult<Todoist> {
        info!("todoist::with_endpoint() -- using {}", endpoint);
        Ok(Todoist {
            sync: SyncObject::new(token, endpoint)?,
        })
    }

    pub fn projects(&mut self) -> Projects<'_> {
        Projects::new(&mut self.sync)
    }

    pub fn items(&mut self) -> Items<'_> {
        Items::new(&mut self.sync)
    }

    /// Send every queued command in one call. See `SyncObject::commit()`.
    pub fn commit(&mut self) -> TResult<CommitResponse> {
        self.sync.commit()
    }

    /// Incremental read of the given resource types (eg "projects", "items",
    /// "notes", or "all")
    pub fn sync(&mut self, resource_types: &[&str]) -> TResult<SyncResponse> {
        self.sync.sync(resource_types)
    }

    pub fn sync_token(&self) -> &str {
        self.sync.sync_token()
    }

    pub fn reset_sync_token(&mut self) {
        self.sync.reset_sync_token()
    }

    pub fn pending(&self) -> &[Command] {
        self.sync.pending()
    }

    pub fn endpoint(&self) -> &str {
        self.sync.endpoint()
    }
}

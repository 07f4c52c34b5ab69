//! Project calls. Every write comes in two flavors: one that goes out right
//! away, and a `queue_*` one that waits for the next commit.

use ::std::collections::HashMap;

use ::serde_json::Value;

use crate::command::{self, Command};
use crate::error::TResult;
use crate::response::{AddResponse, NoteResponse, SyncResponse};
use crate::sync::SyncObject;

fn add_commands<S: AsRef<str>>(names: &[S]) -> (Vec<Command>, HashMap<String, String>) {
    command::create_each("project_add", names, |name| json!({"name": name}))
}

fn delete_command(project_ids: &[i64]) -> Command {
    Command::new("project_delete", json!({"ids": project_ids}))
}

fn collaborator_args(email: &str, project_id: i64) -> Value {
    json!({
        "email": email,
        "project_id": project_id,
    })
}

fn share_command(email: &str, project_id: i64) -> Command {
    Command::new("share_project", collaborator_args(email, project_id))
}

fn unshare_command(email: &str, project_id: i64) -> Command {
    Command::new("delete_collaborator", collaborator_args(email, project_id))
}

fn note_command(content: &str, project_id: i64) -> Command {
    Command::create("note_add", json!({
        "content": content,
        "project_id": project_id,
    }))
}

/// A handle for making project calls
pub struct Projects<'a> {
    sync: &'a mut SyncObject,
}

impl<'a> Projects<'a> {
    pub fn new(sync: &'a mut SyncObject) -> Self {
        Projects { sync: sync }
    }

    /// Add a project for each name. The response maps each name to its new
    /// project id.
    pub fn add<S: AsRef<str>>(&mut self, names: &[S]) -> TResult<AddResponse> {
        let (commands, temp_ids) = add_commands(names);
        let response = self.sync.write(&commands)?;
        let name_ids = response.resolve_all(&temp_ids);
        Ok(AddResponse {
            response: response,
            name_ids: name_ids,
        })
    }

    /// Queue a project add for each name. Returns name -> temp id, which
    /// lines up with the commit's `id_mapping`.
    pub fn queue_add<S: AsRef<str>>(&mut self, names: &[S]) -> HashMap<String, String> {
        let (commands, temp_ids) = add_commands(names);
        self.sync.queue_commands(commands);
        temp_ids
    }

    /// Delete the given projects
    pub fn delete(&mut self, project_ids: &[i64]) -> TResult<SyncResponse> {
        self.sync.write(&[delete_command(project_ids)])
    }

    pub fn queue_delete(&mut self, project_ids: &[i64]) {
        self.sync.queue_commands(vec![delete_command(project_ids)]);
    }

    /// Share a project with someone (adds them as a collaborator)
    pub fn share(&mut self, email: &str, project_id: i64) -> TResult<SyncResponse> {
        self.sync.write(&[share_command(email, project_id)])
    }

    pub fn queue_share(&mut self, email: &str, project_id: i64) {
        self.sync.queue_commands(vec![share_command(email, project_id)]);
    }

    /// Stop sharing a project with someone (removes the collaborator)
    pub fn unshare(&mut self, email: &str, project_id: i64) -> TResult<SyncResponse> {
        self.sync.write(&[unshare_command(email, project_id)])
    }

    pub fn queue_unshare(&mut self, email: &str, project_id: i64) {
        self.sync.queue_commands(vec![unshare_command(email, project_id)]);
    }

    /// Add a note to a project
    pub fn add_note(&mut self, content: &str, project_id: i64) -> TResult<NoteResponse> {
        let command = note_command(content, project_id);
        let response = self.sync.write(&[command.clone()])?;
        let note_id = command.temp_id().and_then(|t| response.resolve(t));
        Ok(NoteResponse {
            response: response,
            note_id: note_id,
        })
    }

    /// Queue a project note. Returns the note's temp id.
    pub fn queue_add_note(&mut self, content: &str, project_id: i64) -> String {
        let command = note_command(content, project_id);
        let temp_id = String::from(command.temp_id().unwrap_or_default());
        self.sync.queue_commands(vec![command]);
        temp_id
    }

    /// Grab every project
    pub fn get_all(&mut self) -> TResult<SyncResponse> {
        self.sync.read_all(&["projects"])
    }
}

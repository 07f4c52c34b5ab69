//! Item (task) calls. Same deal as projects: immediate and queued versions of
//! each write.

use ::std::collections::HashMap;

use crate::command::{self, Command};
use crate::error::TResult;
use crate::response::{AddResponse, NoteResponse, SyncResponse};
use crate::sync::SyncObject;

fn add_commands<S: AsRef<str>>(names: &[S], project_id: i64) -> (Vec<Command>, HashMap<String, String>) {
    command::create_each("item_add", names, |name| json!({
        "content": name,
        "project_id": project_id,
    }))
}

/// Commands that act on a list of item ids (delete/complete/uncomplete)
fn ids_command(ty: &str, item_ids: &[i64]) -> Command {
    Command::new(ty, json!({"ids": item_ids}))
}

fn close_command(item_id: i64) -> Command {
    Command::new("item_close", json!({"id": item_id}))
}

fn note_command(content: &str, item_id: i64) -> Command {
    Command::create("note_add", json!({
        "content": content,
        "item_id": item_id,
    }))
}

/// A handle for making item calls
pub struct Items<'a> {
    sync: &'a mut SyncObject,
}

impl<'a> Items<'a> {
    pub fn new(sync: &'a mut SyncObject) -> Self {
        Items { sync: sync }
    }

    /// Add an item to the given project for each name. The response maps each
    /// name to its new item id.
    pub fn add<S: AsRef<str>>(&mut self, names: &[S], project_id: i64) -> TResult<AddResponse> {
        let (commands, temp_ids) = add_commands(names, project_id);
        let response = self.sync.write(&commands)?;
        let name_ids = response.resolve_all(&temp_ids);
        Ok(AddResponse {
            response: response,
            name_ids: name_ids,
        })
    }

    /// Queue an item add for each name. Returns name -> temp id.
    pub fn queue_add<S: AsRef<str>>(&mut self, names: &[S], project_id: i64) -> HashMap<String, String> {
        let (commands, temp_ids) = add_commands(names, project_id);
        self.sync.queue_commands(commands);
        temp_ids
    }

    pub fn delete(&mut self, item_ids: &[i64]) -> TResult<SyncResponse> {
        self.sync.write(&[ids_command("item_delete", item_ids)])
    }

    pub fn queue_delete(&mut self, item_ids: &[i64]) {
        self.sync.queue_commands(vec![ids_command("item_delete", item_ids)]);
    }

    /// Mark items done
    pub fn complete(&mut self, item_ids: &[i64]) -> TResult<SyncResponse> {
        self.sync.write(&[ids_command("item_complete", item_ids)])
    }

    pub fn queue_complete(&mut self, item_ids: &[i64]) {
        self.sync.queue_commands(vec![ids_command("item_complete", item_ids)]);
    }

    /// Mark items not done
    pub fn uncomplete(&mut self, item_ids: &[i64]) -> TResult<SyncResponse> {
        self.sync.write(&[ids_command("item_uncomplete", item_ids)])
    }

    pub fn queue_uncomplete(&mut self, item_ids: &[i64]) {
        self.sync.queue_commands(vec![ids_command("item_uncomplete", item_ids)]);
    }

    /// Close an item. For recurring items this moves them to the next date,
    /// otherwise it completes them.
    pub fn close(&mut self, item_id: i64) -> TResult<SyncResponse> {
        self.sync.write(&[close_command(item_id)])
    }

    pub fn queue_close(&mut self, item_id: i64) {
        self.sync.queue_commands(vec![close_command(item_id)]);
    }

    /// Add a note to an item
    pub fn add_note(&mut self, content: &str, item_id: i64) -> TResult<NoteResponse> {
        let command = note_command(content, item_id);
        let response = self.sync.write(&[command.clone()])?;
        let note_id = command.temp_id().and_then(|t| response.resolve(t));
        Ok(NoteResponse {
            response: response,
            note_id: note_id,
        })
    }

    /// Queue an item note. Returns the note's temp id.
    pub fn queue_add_note(&mut self, content: &str, item_id: i64) -> String {
        let command = note_command(content, item_id);
        let temp_id = String::from(command.temp_id().unwrap_or_default());
        self.sync.queue_commands(vec![command]);
        temp_id
    }

    /// Grab every item
    pub fn get_all(&mut self) -> TResult<SyncResponse> {
        self.sync.read_all(&["items"])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sync() -> SyncObject {
        SyncObject::new("f00dcafe", "http://127.0.0.1:1/API/v7/sync").unwrap()
    }

    #[test]
    fn adds_carry_the_project() {
        let names = vec![String::from("wash car"), String::from("walk dog")];
        let (adds, temp_ids) = add_commands(&names, 1337);
        assert_eq!(adds.len(), 2);
        for (cmd, name) in adds.iter().zip(names.iter()) {
            assert_eq!(cmd.ty(), "item_add");
            assert_eq!(cmd.args()["content"], json!(name));
            assert_eq!(cmd.args()["project_id"], 1337);
            assert_eq!(&temp_ids[name], cmd.temp_id().unwrap());
        }
    }

    #[test]
    fn builds_id_commands() {
        for ty in &["item_delete", "item_complete", "item_uncomplete"] {
            let cmd = ids_command(ty, &[3, 4]);
            assert_eq!(cmd.ty(), *ty);
            assert_eq!(cmd.args()["ids"], json!([3, 4]));
            assert!(cmd.temp_id().is_none());
        }
        let close = close_command(8);
        assert_eq!(close.ty(), "item_close");
        assert_eq!(close.args()["id"], 8);
        let note = note_command("use the blue bucket", 8);
        assert_eq!(note.args()["item_id"], 8);
        assert!(note.temp_id().is_some());
    }

    #[test]
    fn queues_everything() {
        let mut sync = sync();
        let temp_ids = {
            let mut items = Items::new(&mut sync);
            let temp_ids = items.queue_add(&["one", "two"], 10);
            items.queue_delete(&[1]);
            items.queue_complete(&[2]);
            items.queue_uncomplete(&[3]);
            items.queue_close(4);
            items.queue_add_note("note", 5);
            temp_ids
        };
        let types: Vec<&str> = sync.pending().iter().map(|c| c.ty()).collect();
        assert_eq!(types, vec![
            "item_add",
            "item_add",
            "item_delete",
            "item_complete",
            "item_uncomplete",
            "item_close",
            "note_add",
        ]);
        assert_eq!(sync.pending()[0].args()["project_id"], 10);
        assert_eq!(temp_ids["two"], sync.pending()[1].temp_id().unwrap());
    }

    #[test]
    fn transport_errors_bubble_up() {
        let mut sync = sync();
        let mut items = Items::new(&mut sync);
        assert!(items.complete(&[1]).unwrap_err().is_transport());
        assert!(items.add_note("x", 1).unwrap_err().is_transport());
    }
}

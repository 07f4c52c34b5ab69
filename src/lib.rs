//! A client for the Todoist sync API. Writes can go out one call at a time, or
//! get queued up and sent as a single batch with `Todoist::commit()`.
//!
//! ```ignore
//! let mut todoist = Todoist::new("my-api-token")?;
//! let res = todoist.projects().add(&["groceries"])?;
//! let project_id = res.name_ids["groceries"];
//! todoist.items().queue_add(&["milk", "eggs"], project_id);
//! todoist.commit()?;
//! ```

extern crate api;
extern crate config;
extern crate fern;
#[macro_use]
extern crate log;
#[macro_use]
extern crate quick_error;
extern crate serde;
#[macro_use]
extern crate serde_derive;
#[macro_use]
extern crate serde_json;
extern crate time;
extern crate uuid;

#[macro_use]
pub mod error;
mod util;
pub mod command;
pub mod response;
pub mod sync;
pub mod projects;
pub mod items;
mod todoist;

pub use crate::command::Command;
pub use crate::error::{TError, TResult};
pub use crate::items::Items;
pub use crate::projects::Projects;
pub use crate::response::{AddResponse, CommitResponse, NoteResponse, SyncResponse};
pub use crate::sync::{SyncObject, FULL_SYNC};
pub use crate::todoist::Todoist;

/// Load our config (merging the given file, or whatever the environment points
/// at, over the defaults) and set up logging
pub fn init(config_location: Option<String>) -> TResult<()> {
    config::load_config(config_location)?;
    util::logger::setup_logger()?;
    debug!("main::init() -- config loaded, logging set up");
    Ok(())
}

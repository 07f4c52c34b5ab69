include!("./_lib.rs");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn commit_sends_the_whole_queue() {
        let harness = Harness::new();
        harness.respond_with_ids(100);
        let mut todoist = harness.client();

        let project_temps = todoist.projects().queue_add(&["garage", "attic"]);
        let item_temps = todoist.items().queue_add(&["sweep"], 1);
        todoist.items().queue_complete(&[5, 6]);
        let note_temp = todoist.items().queue_add_note("use the big broom", 5);
        todoist.projects().queue_share("sam@example.com", 1);
        assert_eq!(todoist.pending().len(), 6);
        let queued: Vec<String> = todoist.pending().iter().map(|c| String::from(c.uuid())).collect();

        // nothing goes out until we commit
        assert!(harness.requests().is_empty());

        let res = todoist.commit().unwrap();
        assert_eq!(res.response.status, "200 OK");
        assert!(todoist.pending().is_empty());

        // one request, every command in queue order
        assert_eq!(harness.requests().len(), 1);
        let commands = harness.commands(0);
        let sent: Vec<&str> = commands.iter().map(|c| c["uuid"].as_str().unwrap()).collect();
        assert_eq!(sent, queued.iter().map(|x| x.as_str()).collect::<Vec<_>>());

        // every queued create got a real id
        assert_eq!(res.id_mapping.len(), 4);
        assert_eq!(res.id_mapping[&project_temps["garage"]], 100);
        assert_eq!(res.id_mapping[&project_temps["attic"]], 101);
        assert_eq!(res.id_mapping[&item_temps["sweep"]], 102);
        assert_eq!(res.id_mapping[&note_temp], 103);
    }

    #[test]
    fn commit_clears_queue_even_when_server_complains() {
        let harness = Harness::new();
        harness.respond(400, json!({"error": "Invalid argument"}));
        let mut todoist = harness.client();

        todoist.projects().queue_delete(&[1]);
        let res = todoist.commit().unwrap();
        assert_eq!(res.response.status, "400 Bad Request");
        assert!(res.id_mapping.is_empty());
        assert!(todoist.pending().is_empty());
    }

    #[test]
    fn transport_failure_keeps_queue() {
        // nothing listens on port 1
        let mut todoist = Todoist::with_endpoint(TOKEN, "http://127.0.0.1:1/API/v7/sync").unwrap();
        todoist.projects().queue_add(&["one", "two"]);
        todoist.items().queue_close(3);
        let before: Vec<todoist_sync::Command> = todoist.pending().to_vec();

        let err = todoist.commit().unwrap_err();
        assert!(err.is_transport());
        assert_eq!(todoist.pending(), &before[..]);

        // and it's all still there for the next try
        let err = todoist.commit().unwrap_err();
        assert!(err.is_transport());
        assert_eq!(todoist.pending().len(), 3);
    }

    #[test]
    fn queue_survives_immediate_calls() {
        let harness = Harness::new();
        harness.respond_with_ids(1);
        let mut todoist = harness.client();

        todoist.items().queue_uncomplete(&[8]);
        todoist.projects().add(&["right now"]).unwrap();
        assert_eq!(todoist.pending().len(), 1);
        assert_eq!(harness.commands(0).len(), 1);

        todoist.commit().unwrap();
        let commands = harness.commands(1);
        assert_eq!(commands.len(), 1);
        assert_eq!(commands[0]["type"], "item_uncomplete");
    }

    #[test]
    fn empty_commit() {
        let harness = Harness::new();
        harness.respond(200, json!({"sync_status": {}}));
        let mut todoist = harness.client();

        let res = todoist.commit().unwrap();
        assert!(res.id_mapping.is_empty());
        assert_eq!(harness.form(0)["commands"], "[]");
    }
}

use analysis::players;
use analysis::timeline::{ActorId, Timeline};
use pretty_assertions::assert_eq;
use serde_json::json;

fn document(frames: Vec<serde_json::Value>) -> Vec<u8> {
    serde_json::to_vec(&json!({ "network_frames": { "frames": frames } })).unwrap()
}

fn naming(actor: i32, name: &str) -> serde_json::Value {
    json!({
        "actor_id": { "limit": 2046, "value": actor },
        "value": { "updated": [
            {
                "name": "Engine.PlayerReplicationInfo:PlayerName",
                "value": { "string": name }
            }
        ] }
    })
}

#[test]
fn names_across_frames() {
    let blob = document(vec![
        json!({ "replications": [naming(1, "Alice")] }),
        json!({ "replications": [naming(2, "Bob"), naming(3, "Cara")] }),
    ]);
    let timeline = Timeline::from_full_json(&blob).unwrap();

    let names = players::resolve(&timeline);

    assert_eq!(3, names.len());
    assert_eq!(Some("Alice"), names.get(ActorId(1)));
    assert_eq!(Some("Bob"), names.get(ActorId(2)));
    assert_eq!(Some("Cara"), names.get(ActorId(3)));
}

#[test]
fn last_write_wins() {
    let blob = document(vec![
        json!({ "replications": [naming(5, "Alice")] }),
        json!({ "replications": [naming(5, "Eve")] }),
    ]);
    let timeline = Timeline::from_full_json(&blob).unwrap();

    let names = players::resolve(&timeline);

    assert_eq!(1, names.len());
    assert_eq!(Some("Eve"), names.get(ActorId(5)));
}

#[test]
fn resolution_is_deterministic() {
    let blob = document(vec![
        json!({ "replications": [naming(1, "Alice"), naming(2, "Bob")] }),
        json!({ "replications": [naming(1, "Eve")] }),
    ]);
    let timeline = Timeline::from_full_json(&blob).unwrap();

    assert_eq!(players::resolve(&timeline), players::resolve(&timeline));
}

#[test]
fn unnamed_actors_render_placeholders() {
    let timeline = Timeline::from_full_json(b"{}").unwrap();

    let names = players::resolve(&timeline);

    assert!(names.is_empty());
    assert_eq!("Unknown(3)".to_owned(), names.display_name(ActorId(3)));
}

#[test]
fn unrelated_updates_are_ignored() {
    let blob = document(vec![json!({ "replications": [
        {
            "actor_id": { "limit": 2046, "value": 5 },
            "value": { "updated": [
                {
                    "name": "Engine.PlayerReplicationInfo:RemoteUserData",
                    "value": { "string": "not a player name" }
                },
                {
                    "name": "Engine.PlayerReplicationInfo:PlayerName",
                    "value": { "int": 55 }
                },
                {
                    "name": "Engine.PlayerReplicationInfo:PlayerName",
                    "value": { "string": "" }
                }
            ] }
        },
        {
            "value": { "updated": [
                {
                    "name": "Engine.PlayerReplicationInfo:PlayerName",
                    "value": { "string": "Nobody" }
                }
            ] }
        }
    ] })]);
    let timeline = Timeline::from_full_json(&blob).unwrap();

    let names = players::resolve(&timeline);

    assert!(names.is_empty());
}

use std::collections::HashMap;

use crate::timeline::{ActorId, AttributeValue, Timeline};

pub const PLAYER_NAME_UPDATE: &str = "Engine.PlayerReplicationInfo:PlayerName";

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct PlayerNames {
    names: HashMap<ActorId, String>,
}

impl PlayerNames {
    pub fn get(&self, id: ActorId) -> Option<&str> {
        self.names.get(&id).map(|name| name.as_str())
    }

    /// The name last replicated for the actor, or a placeholder carrying the
    /// raw id when no naming update was ever seen for it.
    pub fn display_name(&self, id: ActorId) -> String {
        match self.names.get(&id) {
            Some(name) => name.clone(),
            None => format!("Unknown({})", id.0),
        }
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}

pub fn resolve(timeline: &Timeline) -> PlayerNames {
    let mut names = HashMap::new();

    for frame in timeline.frames.iter() {
        for replication in frame.replications.iter() {
            let actor_id = match replication.actor_id {
                Some(handle) => handle.value,
                None => continue,
            };

            for update in replication.value.updated.iter() {
                if update.name != PLAYER_NAME_UPDATE {
                    continue;
                }

                let AttributeValue::Text { string } = &update.value else {
                    continue;
                };
                if string.is_empty() {
                    continue;
                }

                tracing::trace!("Actor {:?} named {:?}", actor_id, string);

                names.insert(actor_id, string.clone());
            }
        }
    }

    PlayerNames { names }
}

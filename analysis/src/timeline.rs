use serde::Deserialize;

#[derive(Debug)]
pub enum TimelineError {
    Malformed(serde_json::Error),
}

impl From<serde_json::Error> for TimelineError {
    fn from(value: serde_json::Error) -> Self {
        Self::Malformed(value)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(transparent)]
pub struct ActorId(pub i32);

#[derive(Debug, Clone, PartialEq)]
pub struct Timeline {
    pub frames: Vec<Frame>,
}

impl Timeline {
    /// Parses the full decoded replay document. Anything that is valid JSON is
    /// accepted, missing or differently shaped substructures just produce an
    /// empty timeline.
    pub fn from_full_json(blob: &[u8]) -> Result<Self, TimelineError> {
        let document: serde_json::Value = serde_json::from_slice(blob)?;

        let frames = match document
            .get("network_frames")
            .and_then(|value| value.get("frames"))
        {
            // a damaged element decays to an empty frame, frame numbers are
            // positions in the raw array and have to stay stable
            Some(serde_json::Value::Array(items)) => items
                .iter()
                .map(|item| serde_json::from_value(item.clone()).unwrap_or_default())
                .collect(),
            _ => Vec::new(),
        };

        Ok(Self { frames })
    }
}

#[derive(Debug, Default, Clone, PartialEq, serde::Deserialize)]
pub struct Frame {
    #[serde(default, deserialize_with = "lenient_array")]
    pub replications: Vec<Replication>,
}

#[derive(Debug, Clone, PartialEq, serde::Deserialize)]
pub struct Replication {
    #[serde(default, deserialize_with = "lenient")]
    pub actor_id: Option<ActorHandle>,
    #[serde(default, deserialize_with = "lenient")]
    pub value: ReplicationValue,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Deserialize)]
pub struct ActorHandle {
    pub value: ActorId,
}

#[derive(Debug, Default, Clone, PartialEq, serde::Deserialize)]
pub struct ReplicationValue {
    #[serde(default, deserialize_with = "lenient_array")]
    pub updated: Vec<AttributeUpdate>,
}

#[derive(Debug, Clone, PartialEq, serde::Deserialize)]
pub struct AttributeUpdate {
    #[serde(default, deserialize_with = "lenient")]
    pub name: String,
    #[serde(default)]
    pub value: AttributeValue,
}

#[derive(Debug, Clone, PartialEq, serde::Deserialize)]
#[serde(untagged)]
pub enum AttributeValue {
    Text { string: String },
    Demolition(DemolitionPayload),
    Other(serde_json::Value),
}

impl Default for AttributeValue {
    fn default() -> Self {
        Self::Other(serde_json::Value::Null)
    }
}

/// The demolition payload shows up in three shapes depending on the decoder
/// dialect. Variant order doubles as match priority for the rare value that
/// carries more than one of the keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Deserialize)]
#[serde(untagged)]
pub enum DemolitionPayload {
    Direct { demolish: DirectDemolition },
    Wrapped { demolish_extended: DemolitionActors },
    Extended { actor: DemolishedActor },
}

impl DemolitionPayload {
    /// Attacker and victim ids, independent of shape. An id of 0 marks a
    /// participant the decoder could not attribute, such payloads are dropped.
    pub fn participants(&self) -> Option<(ActorId, ActorId)> {
        let (attacker, victim) = match self {
            Self::Direct { demolish } => (demolish.attacker_actor_id, demolish.victim_actor_id),
            Self::Wrapped { demolish_extended } => {
                (demolish_extended.attacker.actor, demolish_extended.victim.actor)
            }
            Self::Extended { actor } => (
                actor.attribute.demolish_extended.attacker.actor,
                actor.attribute.demolish_extended.victim.actor,
            ),
        };

        (attacker.0 != 0 && victim.0 != 0).then_some((attacker, victim))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Deserialize)]
pub struct DirectDemolition {
    pub attacker_actor_id: ActorId,
    pub victim_actor_id: ActorId,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Deserialize)]
pub struct DemolitionActors {
    pub attacker: ActorRef,
    pub victim: ActorRef,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Deserialize)]
pub struct ActorRef {
    pub actor: ActorId,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Deserialize)]
pub struct DemolishedActor {
    pub attribute: DemolishedAttribute,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Deserialize)]
pub struct DemolishedAttribute {
    #[serde(rename = "DemolishExtended")]
    pub demolish_extended: DemolitionActors,
}

fn lenient<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: serde::Deserializer<'de>,
    T: Default + serde::de::DeserializeOwned,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    Ok(serde_json::from_value(value).unwrap_or_default())
}

fn lenient_array<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: serde::Deserializer<'de>,
    T: serde::de::DeserializeOwned,
{
    let value = serde_json::Value::deserialize(deserializer)?;

    let serde_json::Value::Array(items) = value else {
        return Ok(Vec::new());
    };

    Ok(items
        .into_iter()
        .filter_map(|item| serde_json::from_value(item).ok())
        .collect())
}

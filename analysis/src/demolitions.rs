use std::collections::HashMap;

use common::replay_analysis::DemolitionEvent;

use crate::players::{self, PlayerNames};
use crate::timeline::{AttributeValue, Timeline, TimelineError};

pub const DEMOLITION_MARKER: &str = "Demolish";

/// A rebroadcast of the same attacker/victim pair within this many frames is
/// the same physical demolition.
pub const DEMOLITION_COOLDOWN_FRAMES: usize = 120;

#[derive(Debug, PartialEq)]
pub struct Demolitions {
    pub names: PlayerNames,
    pub events: Vec<DemolitionEvent>,
}

#[tracing::instrument(skip(blob))]
pub fn parse(blob: &[u8]) -> Result<Demolitions, TimelineError> {
    let timeline = Timeline::from_full_json(blob)?;

    let names = players::resolve(&timeline);
    let events = extract(&timeline, &names);

    Ok(Demolitions { names, events })
}

pub fn extract(timeline: &Timeline, names: &PlayerNames) -> Vec<DemolitionEvent> {
    let mut events = Vec::new();
    let mut window = DedupWindow::default();

    for (frame_number, frame) in timeline.frames.iter().enumerate() {
        for replication in frame.replications.iter() {
            for update in replication.value.updated.iter() {
                if !update.name.contains(DEMOLITION_MARKER) {
                    continue;
                }

                let AttributeValue::Demolition(payload) = &update.value else {
                    continue;
                };
                let (attacker, victim) = match payload.participants() {
                    Some(pair) => pair,
                    None => continue,
                };

                let attacker_name = names.display_name(attacker);
                let victim_name = names.display_name(victim);

                if !window.emit((attacker_name.clone(), victim_name.clone()), frame_number) {
                    tracing::trace!(
                        "Suppressed rebroadcast {:?} -> {:?} at frame {}",
                        attacker_name,
                        victim_name,
                        frame_number
                    );
                    continue;
                }

                events.push(DemolitionEvent {
                    attacker_name,
                    victim_name,
                    frame_number,
                });
            }
        }
    }

    events
}

pub fn leaderboard(events: &[DemolitionEvent]) -> Vec<(String, usize)> {
    let mut counts: Vec<(String, usize)> = Vec::new();

    for event in events.iter() {
        match counts
            .iter_mut()
            .find(|(name, _)| name == &event.attacker_name)
        {
            Some((_, count)) => *count += 1,
            None => counts.push((event.attacker_name.clone(), 1)),
        };
    }

    // stable sort, ties keep first-seen order
    counts.sort_by(|(_, first), (_, second)| second.cmp(first));

    counts
}

#[derive(Debug, Default)]
struct DedupWindow {
    last_emitted: HashMap<(String, String), usize>,
}

impl DedupWindow {
    fn emit(&mut self, key: (String, String), frame_number: usize) -> bool {
        match self.last_emitted.get(&key) {
            Some(last) if frame_number - last <= DEMOLITION_COOLDOWN_FRAMES => false,
            _ => {
                self.last_emitted.insert(key, frame_number);
                true
            }
        }
    }
}

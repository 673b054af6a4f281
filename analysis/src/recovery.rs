use crate::timeline::{ActorId, DemolitionActors};

pub const WINDOW_BYTES: usize = 1024 * 1024;
pub const OVERLAP_BYTES: usize = 1023;

static BARE_KEYS: std::sync::LazyLock<regex::Regex> =
    std::sync::LazyLock::new(|| regex::Regex::new(r"([{,])\s*(\w+)\s*:").unwrap());

/// A frame element salvaged out of a damaged replay document. Only frames
/// carrying an extended demolition attribute are kept.
#[derive(Debug, Clone, PartialEq)]
pub struct RecoveredFragment {
    pub frame: serde_json::Value,
}

impl RecoveredFragment {
    pub fn participants(&self) -> Option<(ActorId, ActorId)> {
        let body = self.frame.get("attribute")?.get("DemolishExtended")?;
        let actors: DemolitionActors = serde_json::from_value(body.clone()).ok()?;

        (actors.attacker.actor.0 != 0 && actors.victim.actor.0 != 0)
            .then_some((actors.attacker.actor, actors.victim.actor))
    }
}

/// Scans a raw, possibly damaged replay byte stream for JSON documents that
/// still contain demolition frames. The stream is consumed in fixed windows,
/// decoded text is accumulated and every complete `{ .. }` candidate region is
/// parsed, repaired if needed or discarded.
#[derive(Debug, Default)]
pub struct RecoveryScanner {
    text: String,
    holdover: Vec<u8>,
    fragments: Vec<RecoveredFragment>,
}

impl RecoveryScanner {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn feed(&mut self, window: &[u8]) {
        self.decode(window);
        self.drain_candidate();
        self.truncate_overlap();
    }

    pub fn finish(self) -> Vec<RecoveredFragment> {
        self.fragments
    }

    fn decode(&mut self, window: &[u8]) {
        let carried;
        let mut input: &[u8] = if self.holdover.is_empty() {
            window
        } else {
            self.holdover.extend_from_slice(window);
            carried = std::mem::take(&mut self.holdover);
            &carried
        };

        loop {
            match std::str::from_utf8(input) {
                Ok(valid) => {
                    self.text.push_str(valid);
                    break;
                }
                Err(error) => {
                    let (valid, rest) = input.split_at(error.valid_up_to());
                    self.text.push_str(std::str::from_utf8(valid).unwrap_or(""));

                    match error.error_len() {
                        Some(invalid) => {
                            self.text.push('\u{FFFD}');
                            input = &rest[invalid..];
                        }
                        None => {
                            // incomplete sequence at the window edge, finish it
                            // with the bytes of the next window
                            self.holdover = rest.to_vec();
                            break;
                        }
                    }
                }
            }
        }
    }

    fn drain_candidate(&mut self) {
        let (Some(start), Some(end)) = (self.text.find('{'), self.text.rfind('}')) else {
            return;
        };
        if start >= end {
            return;
        }

        match recover_document(&self.text[start..=end]) {
            Some(document) => self.collect(&document),
            None => {
                tracing::debug!(
                    "Discarding unrecoverable candidate ({} bytes)",
                    end + 1 - start
                );
            }
        };

        // the region is consumed either way, never reparse it
        self.text.drain(..=end);
    }

    fn truncate_overlap(&mut self) {
        if self.text.len() <= OVERLAP_BYTES {
            return;
        }

        let mut cut = self.text.len() - OVERLAP_BYTES;
        while !self.text.is_char_boundary(cut) {
            cut += 1;
        }

        self.text.drain(..cut);
    }

    fn collect(&mut self, document: &serde_json::Value) {
        let frames = match document
            .get("network_frames")
            .and_then(|value| value.get("frames"))
            .and_then(|value| value.as_array())
        {
            Some(frames) => frames,
            None => {
                tracing::trace!("Recovered document carries no frame array");
                return;
            }
        };

        for frame in frames.iter() {
            if frame
                .get("attribute")
                .and_then(|attribute| attribute.get("DemolishExtended"))
                .is_none()
            {
                continue;
            }

            self.fragments.push(RecoveredFragment {
                frame: frame.clone(),
            });
        }
    }
}

#[tracing::instrument(skip(data), fields(len = data.len()))]
pub fn scan(data: &[u8]) -> Vec<RecoveredFragment> {
    let mut scanner = RecoveryScanner::new();

    for (index, window) in data.chunks(WINDOW_BYTES).enumerate() {
        let _tracing_guard = tracing::debug_span!("Window", index).entered();

        scanner.feed(window);
    }

    scanner.finish()
}

fn recover_document(candidate: &str) -> Option<serde_json::Value> {
    if let Ok(document) = serde_json::from_str(candidate) {
        return Some(document);
    }

    let repaired = repair_candidate(candidate);
    match serde_json::from_str(&repaired) {
        Ok(document) => Some(document),
        Err(error) => {
            tracing::debug!("Candidate still invalid after repair: {:?}", error);
            None
        }
    }
}

fn repair_candidate(candidate: &str) -> String {
    let mut repaired = String::with_capacity(candidate.len() + 2);

    if !candidate.starts_with('{') {
        repaired.push('{');
    }
    repaired.push_str(candidate);
    if !repaired.ends_with('}') {
        repaired.push('}');
    }

    BARE_KEYS.replace_all(&repaired, r#"${1}"${2}":"#).into_owned()
}

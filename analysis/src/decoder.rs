use common::{GoalRecord, PlayerStatRow, ReplayHeader};

#[derive(Debug, Clone, PartialEq)]
pub struct DecodedReplay {
    pub json: Vec<u8>,
    pub network_err: Option<String>,
}

/// Seam to the replay decoder, so the analysis can run against a stub in
/// tests and against other decoders in embedding applications.
pub trait ReplayDecoder: Send + Sync {
    fn decode_header(&self, data: &[u8]) -> Result<ReplayHeader, String>;
    fn decode_full(&self, data: &[u8], pretty: bool) -> Result<DecodedReplay, String>;
}

pub struct BoxcarsDecoder {}

impl BoxcarsDecoder {
    pub fn new() -> Self {
        Self {}
    }
}

impl ReplayDecoder for BoxcarsDecoder {
    #[tracing::instrument(name = "Header", skip(self, data))]
    fn decode_header(&self, data: &[u8]) -> Result<ReplayHeader, String> {
        let replay = boxcars::ParserBuilder::new(data)
            .never_parse_network_data()
            .on_error_check_crc()
            .parse()
            .map_err(|error| error.to_string())?;

        Ok(header_record(&replay))
    }

    #[tracing::instrument(name = "Full", skip(self, data))]
    fn decode_full(&self, data: &[u8], pretty: bool) -> Result<DecodedReplay, String> {
        let (replay, network_err) = match boxcars::ParserBuilder::new(data)
            .must_parse_network_data()
            .on_error_check_crc()
            .parse()
        {
            Ok(replay) => (replay, None),
            Err(error) => {
                tracing::debug!("Network data refused, retrying header-only: {:?}", error);

                let replay = boxcars::ParserBuilder::new(data)
                    .never_parse_network_data()
                    .on_error_check_crc()
                    .parse()
                    .map_err(|header_error| header_error.to_string())?;

                (replay, Some(error.to_string()))
            }
        };

        let json = if pretty {
            serde_json::to_vec_pretty(&replay)
        } else {
            serde_json::to_vec(&replay)
        }
        .map_err(|error| error.to_string())?;

        Ok(DecodedReplay { json, network_err })
    }
}

fn header_record(replay: &boxcars::Replay) -> ReplayHeader {
    let properties = replay.properties.as_slice();

    ReplayHeader {
        major_version: replay.major_version,
        minor_version: replay.minor_version,
        net_version: replay.net_version,
        game_type: replay.game_type.clone(),
        team_size: int_prop(properties, "TeamSize").unwrap_or(0),
        team0_score: int_prop(properties, "Team0Score"),
        team1_score: int_prop(properties, "Team1Score"),
        goals: goal_records(properties),
        player_stats: stat_rows(properties),
        date: str_prop(properties, "Date").unwrap_or_default(),
        record_fps: float_prop(properties, "RecordFPS").unwrap_or(0.0),
        num_frames: int_prop(properties, "NumFrames").unwrap_or(0),
    }
}

fn goal_records(properties: &[(String, boxcars::HeaderProp)]) -> Vec<GoalRecord> {
    let rows = match prop(properties, "Goals") {
        Some(boxcars::HeaderProp::Array(rows)) => rows,
        _ => return Vec::new(),
    };

    rows.iter()
        .map(|row| GoalRecord {
            player_name: str_prop(row, "PlayerName").unwrap_or_default(),
            frame: int_prop(row, "frame").unwrap_or(0),
            player_team: int_prop(row, "PlayerTeam").unwrap_or(0),
        })
        .collect()
}

fn stat_rows(properties: &[(String, boxcars::HeaderProp)]) -> Vec<PlayerStatRow> {
    let rows = match prop(properties, "PlayerStats") {
        Some(boxcars::HeaderProp::Array(rows)) => rows,
        _ => return Vec::new(),
    };

    rows.iter()
        .map(|row| PlayerStatRow {
            name: str_prop(row, "Name").unwrap_or_default(),
            team: int_prop(row, "Team").unwrap_or(0),
            score: int_prop(row, "Score").unwrap_or(0),
            goals: int_prop(row, "Goals").unwrap_or(0),
            assists: int_prop(row, "Assists").unwrap_or(0),
            saves: int_prop(row, "Saves").unwrap_or(0),
            shots: int_prop(row, "Shots").unwrap_or(0),
            bot: bool_prop(row, "bBot").unwrap_or(false),
            online_id: online_id_prop(row).unwrap_or_default(),
            platform: platform_prop(row),
        })
        .collect()
}

fn prop<'p>(
    properties: &'p [(String, boxcars::HeaderProp)],
    key: &str,
) -> Option<&'p boxcars::HeaderProp> {
    properties
        .iter()
        .find(|(name, _)| name == key)
        .map(|(_, value)| value)
}

fn int_prop(properties: &[(String, boxcars::HeaderProp)], key: &str) -> Option<i32> {
    match prop(properties, key) {
        Some(boxcars::HeaderProp::Int(value)) => Some(*value),
        _ => None,
    }
}

fn float_prop(properties: &[(String, boxcars::HeaderProp)], key: &str) -> Option<f32> {
    match prop(properties, key) {
        Some(boxcars::HeaderProp::Float(value)) => Some(*value),
        _ => None,
    }
}

fn bool_prop(properties: &[(String, boxcars::HeaderProp)], key: &str) -> Option<bool> {
    match prop(properties, key) {
        Some(boxcars::HeaderProp::Bool(value)) => Some(*value),
        _ => None,
    }
}

fn str_prop(properties: &[(String, boxcars::HeaderProp)], key: &str) -> Option<String> {
    match prop(properties, key) {
        Some(boxcars::HeaderProp::Str(value)) => Some(value.clone()),
        Some(boxcars::HeaderProp::Name(value)) => Some(value.clone()),
        _ => None,
    }
}

fn online_id_prop(row: &[(String, boxcars::HeaderProp)]) -> Option<String> {
    match prop(row, "OnlineID") {
        Some(boxcars::HeaderProp::QWord(value)) => Some(value.to_string()),
        Some(boxcars::HeaderProp::Str(value)) => Some(value.clone()),
        _ => None,
    }
}

fn platform_prop(row: &[(String, boxcars::HeaderProp)]) -> Option<String> {
    match prop(row, "Platform") {
        Some(boxcars::HeaderProp::Byte { value, .. }) => value.clone(),
        _ => None,
    }
}

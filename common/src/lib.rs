pub mod replay_analysis;

#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct ReplayHeader {
    pub major_version: i32,
    pub minor_version: i32,
    pub net_version: Option<i32>,
    pub game_type: String,
    pub team_size: i32,
    pub team0_score: Option<i32>,
    pub team1_score: Option<i32>,
    pub goals: Vec<GoalRecord>,
    pub player_stats: Vec<PlayerStatRow>,
    pub date: String,
    pub record_fps: f32,
    pub num_frames: i32,
}

#[derive(Debug, Default, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct GoalRecord {
    pub player_name: String,
    pub frame: i32,
    pub player_team: i32,
}

#[derive(Debug, Default, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct PlayerStatRow {
    pub name: String,
    pub team: i32,
    pub score: i32,
    pub goals: i32,
    pub assists: i32,
    pub saves: i32,
    pub shots: i32,
    pub bot: bool,
    pub online_id: String,
    pub platform: Option<String>,
}

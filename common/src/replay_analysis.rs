use std::collections::HashMap;

#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct DemolitionEvent {
    pub attacker_name: String,
    pub victim_name: String,
    pub frame_number: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct ReplaySummary {
    pub name: String,
    pub team0_score: Option<i32>,
    pub team1_score: Option<i32>,
    pub player_stats: Vec<crate::PlayerStatRow>,
    pub demolitions: Vec<DemolitionEvent>,
    pub network_err: Option<String>,
}

#[derive(Debug, Default, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct AggregateStats {
    pub total_games: usize,
    pub average_score: i32,
    pub total_goals: i32,
    pub win_percentage: u32,
    pub team0_wins: usize,
    pub team1_wins: usize,
    pub demolition_counts: HashMap<String, usize>,
}

#[derive(Debug, Default, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct TeamSeriesTotals {
    pub goals: i32,
    pub shots: i32,
    pub saves: i32,
    pub assists: i32,
    pub score: i32,
    pub player_names: Vec<String>,
}

impl TeamSeriesTotals {
    pub fn average_score(&self) -> i32 {
        if self.player_names.is_empty() {
            return 0;
        }
        (self.score as f64 / self.player_names.len() as f64).round() as i32
    }
}

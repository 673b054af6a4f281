use common::replay_analysis::{AggregateStats, ReplaySummary, TeamSeriesTotals};

use crate::decoder::ReplayDecoder;
use crate::timeline::{Timeline, TimelineError};
use crate::{demolitions, players};

pub const SERIES_CAPACITY: usize = 7;

#[derive(Debug)]
pub enum SummarizeError {
    Decode(String),
    Timeline(TimelineError),
}

impl From<TimelineError> for SummarizeError {
    fn from(value: TimelineError) -> Self {
        Self::Timeline(value)
    }
}

/// Decodes one replay and reduces it to the summary the series aggregation
/// works on. A replay whose network data can not be decoded still yields a
/// summary, just without demolition events and with the decoder error attached.
#[tracing::instrument(skip(decoder, data))]
pub fn summarize(
    decoder: &dyn ReplayDecoder,
    name: &str,
    data: &[u8],
) -> Result<ReplaySummary, SummarizeError> {
    let header = decoder.decode_header(data).map_err(SummarizeError::Decode)?;

    let (demolitions, network_err) = match decoder.decode_full(data, false) {
        Ok(decoded) => {
            let timeline = Timeline::from_full_json(&decoded.json)?;
            let names = players::resolve(&timeline);

            (demolitions::extract(&timeline, &names), decoded.network_err)
        }
        Err(error) => {
            tracing::warn!("Full decode unavailable: {:?}", error);
            (Vec::new(), Some(error))
        }
    };

    Ok(ReplaySummary {
        name: name.to_owned(),
        team0_score: header.team0_score,
        team1_score: header.team1_score,
        player_stats: header.player_stats,
        demolitions,
        network_err,
    })
}

#[derive(Debug, Default, Clone, PartialEq)]
pub struct ReplaySeries {
    summaries: Vec<ReplaySummary>,
    stats: AggregateStats,
}

impl ReplaySeries {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a replay to the series and recomputes the aggregate. A full
    /// series is left untouched and the append is reported as rejected.
    pub fn append(&mut self, summary: ReplaySummary) -> (bool, AggregateStats) {
        if self.summaries.len() >= SERIES_CAPACITY {
            tracing::debug!("Series is full, dropping {:?}", summary.name);
            return (false, self.stats.clone());
        }

        self.summaries.push(summary);
        self.stats = fold_stats(&self.summaries);

        (true, self.stats.clone())
    }

    pub fn clear(&mut self) {
        self.summaries.clear();
        self.stats = AggregateStats::default();
    }

    pub fn stats(&self) -> &AggregateStats {
        &self.stats
    }

    pub fn summaries(&self) -> &[ReplaySummary] {
        &self.summaries
    }

    pub fn len(&self) -> usize {
        self.summaries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.summaries.is_empty()
    }

    /// Cross-game totals per team, with the deduplicated roster that produced
    /// them. Rows with a team other than 0 count towards the second team.
    pub fn team_breakdown(&self) -> [TeamSeriesTotals; 2] {
        let mut teams = [TeamSeriesTotals::default(), TeamSeriesTotals::default()];

        for summary in self.summaries.iter() {
            for row in summary.player_stats.iter() {
                let team = &mut teams[if row.team == 0 { 0 } else { 1 }];

                if !team.player_names.iter().any(|name| name == &row.name) {
                    team.player_names.push(row.name.clone());
                }

                team.goals += row.goals;
                team.shots += row.shots;
                team.saves += row.saves;
                team.assists += row.assists;
                team.score += row.score;
            }
        }

        teams
    }
}

/// Full fold over the series. The viewing participant is the first stat row of
/// each replay, wins and scores are counted from that row's team.
fn fold_stats(summaries: &[ReplaySummary]) -> AggregateStats {
    let mut stats = AggregateStats {
        total_games: summaries.len(),
        ..AggregateStats::default()
    };

    if summaries.is_empty() {
        return stats;
    }

    let mut score_total = 0_i64;
    let mut wins = 0_usize;

    for summary in summaries.iter() {
        let team0 = summary.team0_score.unwrap_or(0);
        let team1 = summary.team1_score.unwrap_or(0);

        stats.total_goals += team0 + team1;

        if team0 > team1 {
            stats.team0_wins += 1;
        }
        if team1 > team0 {
            stats.team1_wins += 1;
        }

        if let Some(viewer) = summary.player_stats.first() {
            if viewer.team == 0 && team0 > team1 {
                wins += 1;
            }
            if viewer.team == 1 && team1 > team0 {
                wins += 1;
            }

            score_total += summary
                .player_stats
                .iter()
                .filter(|row| row.team == viewer.team)
                .map(|row| i64::from(row.score))
                .sum::<i64>();
        }

        for event in summary.demolitions.iter() {
            *stats
                .demolition_counts
                .entry(event.attacker_name.clone())
                .or_default() += 1;
        }
    }

    stats.average_score = (score_total as f64 / summaries.len() as f64).round() as i32;
    stats.win_percentage = (100.0 * wins as f64 / summaries.len() as f64).round() as u32;

    stats
}

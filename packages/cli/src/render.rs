use std::collections::HashMap;

use clap::ValueEnum;
use console::style;
use podium_common::RankAssignment;

use crate::client::{Entry, Leaderboard, OfficialResult, PredictionList};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum)]
pub enum EntrySort {
    /// Entry ID order.
    #[default]
    Id,
    /// Alphabetical by name.
    Name,
    /// By the rank shown beside each entry, unranked entries last.
    Rank,
}

/// Order entries for display. `ranks` maps entry ID to the caller's predicted rank.
pub fn sort_entries(entries: &mut [Entry], ranks: &HashMap<i32, i32>, sort: EntrySort) {
    match sort {
        EntrySort::Id => entries.sort_by_key(|e| e.id),
        EntrySort::Name => entries.sort_by_cached_key(|e| (e.name.to_lowercase(), e.id)),
        EntrySort::Rank => entries.sort_by_key(|e| (ranks.get(&e.id).copied().unwrap_or(i32::MAX), e.id)),
    }
}

/// Which rank set the entries view shows beside each entry.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RankColumn {
    /// The caller's own predictions.
    Predictions,
    /// The official results; the administrator's picker edits these.
    Results,
}

impl RankColumn {
    pub fn for_session(is_admin: bool) -> Self {
        if is_admin {
            RankColumn::Results
        } else {
            RankColumn::Predictions
        }
    }

    fn header(self) -> &'static str {
        match self {
            RankColumn::Predictions => "PICK",
            RankColumn::Results => "RESULT",
        }
    }
}

fn rank_cell(rank: Option<i32>) -> String {
    match rank {
        Some(r) => format!("{r:>6}"),
        None => format!("{:>6}", "-"),
    }
}

pub fn entries_table(entries: &[Entry], ranks: &HashMap<i32, i32>, column: RankColumn) -> String {
    let mut out = format!(
        "{}\n",
        style(format!(
            "{:>4}  {:<4} {:<24} {:>6}  {}",
            "ID",
            "FLAG",
            "NAME",
            column.header(),
            "SONG"
        ))
        .bold()
    );
    for e in entries {
        let song = match (&e.artist, &e.song) {
            (Some(a), Some(s)) => format!("{a} - {s}"),
            (Some(a), None) => a.clone(),
            (None, Some(s)) => s.clone(),
            (None, None) => String::new(),
        };
        out.push_str(&format!(
            "{:>4}  {:<4} {:<24} {}  {}\n",
            e.id,
            e.flag_code,
            e.name,
            rank_cell(ranks.get(&e.id).copied()),
            song
        ));
    }
    out
}

pub fn predictions_table(list: &PredictionList) -> String {
    let mut out = format!("Predictions of {}\n", style(&list.user.name).bold());
    if list.data.is_empty() {
        out.push_str("  (none yet)\n");
        return out;
    }
    for p in &list.data {
        let points = match p.points {
            Some(pts) => style(format!("{pts:>2} pts")).green().to_string(),
            None => style("   -  ").dim().to_string(),
        };
        out.push_str(&format!(
            "{:>3}. {:<4} {:<24} {} (#{})\n",
            p.rank, p.flag_code, p.entry_name, points, p.entry_id
        ));
    }
    out.push_str(&format!("Total: {} points\n", list.total_points));
    out
}

pub fn results_table(results: &[OfficialResult]) -> String {
    if results.is_empty() {
        return "No results published yet.\n".into();
    }
    results
        .iter()
        .map(|r| format!("{:>3}. {:<4} {} (#{})\n", r.rank, r.flag_code, r.entry_name, r.entry_id))
        .collect()
}

pub fn leaderboard_table(board: &Leaderboard) -> String {
    let mut out = String::new();
    if !board.results_published {
        out.push_str(&format!("{}\n", style("No results yet, every score is 0.").dim()));
    }
    for s in &board.standings {
        let line = format!("{:>3}. {:<24} {:>4}", s.place, s.name, s.score);
        if s.place == 1 && board.results_published {
            out.push_str(&format!("{}\n", style(line).yellow().bold()));
        } else {
            out.push_str(&format!("{line}\n"));
        }
    }
    out
}

/// One-line summary of a rank write, naming the entry that lost the rank.
pub fn assignment_line(outcome: &RankAssignment, names: &HashMap<i32, String>) -> String {
    let name = |id: i32| names.get(&id).cloned().unwrap_or_else(|| format!("#{id}"));
    let mut line = format!("{} -> rank {}", name(outcome.entry_id), outcome.rank);
    if let Some(evicted) = outcome.evicted_entry {
        line.push_str(&format!(" ({} is now unranked)", name(evicted)));
    }
    line
}

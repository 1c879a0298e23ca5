//! Fixed-width text scoreboard

use crate::ranking::builder::RankEntry;

/// Column names of the header line
pub const HEADER: [&str; 6] = ["pos", "name", "score", "won", "lost", "total"];

fn line(position: &str, name: &str, score: &str, won: &str, lost: &str, total: &str) -> String {
    format!("{position:>3}   {name:<15}{score:>6}{won:>8}{lost:>8}{total:>8}\n")
}

/// Header line with the literal column names
pub fn header_line() -> String {
    let [position, name, score, won, lost, total] = HEADER;
    line(position, name, score, won, lost, total)
}

/// One line for a ranked player; the score is rounded to a whole number
pub fn entry_line(entry: &RankEntry) -> String {
    line(
        &entry.position.to_string(),
        &entry.name,
        &format!("{}", entry.score.round() as i64),
        &entry.won.to_string(),
        &entry.lost.to_string(),
        &entry.total.to_string(),
    )
}

/// Header followed by every entry
pub fn render_scoreboard(ranking: &[RankEntry]) -> String {
    ranking
        .iter()
        .fold(header_line(), |mut text, entry| {
            text.push_str(&entry_line(entry));
            text
        })
}

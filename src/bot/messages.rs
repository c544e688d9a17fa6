use crate::database::models::MedicineHistory;
use crate::medicine::{HistoryAction, LEGEND};
use crate::utils::datetime::format_timestamp;

pub const TAKEN_ALREADY: &str = "今日はもう飲んでます";
pub const TODAY_YES: &str = "今日は既に飲みました ✅";
pub const TODAY_NO: &str = "今日はまだ飲んでません ❌";
pub const REMINDER: &str = "今日の薬をまだ飲んでいません 💊";
pub const HISTORY_EMPTY: &str = "履歴はまだありません";
pub const HISTORY_LIMIT: i64 = 10;

pub fn taken_success(remaining: i64) -> String {
    format!("偉い👏 残り {remaining} 個")
}

pub fn decreased(remaining: i64) -> String {
    format!("減らしました！残り {remaining} 個")
}

pub fn increased(remaining: i64) -> String {
    format!("増やしました！残り {remaining} 個")
}

pub fn status(remaining: i64) -> String {
    format!("残り {remaining} 個")
}

/// Headline, pill sheet and legend separated by blank lines
pub fn with_sheet(headline: &str, sheet: &str) -> String {
    format!("{headline}\n\n{sheet}\n\n{LEGEND}")
}

fn action_label(entry: &MedicineHistory) -> &str {
    match entry.action() {
        Some(HistoryAction::Take) => "飲んだ",
        Some(HistoryAction::Increase) => "増やした",
        Some(HistoryAction::Decrease) => "減らした",
        None => entry.action.as_str(),
    }
}

pub fn history(entries: &[MedicineHistory]) -> String {
    if entries.is_empty() {
        return HISTORY_EMPTY.to_string();
    }

    let mut text = format!("最近の履歴（{}件）", entries.len());
    for entry in entries {
        text.push('\n');
        text.push_str(&format!("{} {}", format_timestamp(&entry.taken_at), action_label(entry)));
    }
    text
}

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Kind of counter change recorded in the history log
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HistoryAction {
    Take,
    Increase,
    Decrease,
}

impl HistoryAction {
    pub fn as_str(&self) -> &'static str {
        match self {
            HistoryAction::Take => "take",
            HistoryAction::Increase => "increase",
            HistoryAction::Decrease => "decrease",
        }
    }
}

impl fmt::Display for HistoryAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for HistoryAction {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "take" => Ok(HistoryAction::Take),
            "increase" => Ok(HistoryAction::Increase),
            "decrease" => Ok(HistoryAction::Decrease),
            other => Err(format!("unknown history action '{other}'")),
        }
    }
}

/// The singleton counter: doses left on the current sheet and the last
/// day an automatic take succeeded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MedicineStatus {
    pub remaining: i64,
    pub last_taken_at: Option<NaiveDate>,
}

/// Result of a take attempt. Being blocked for the day is a normal outcome.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TakeOutcome {
    Taken { remaining: i64 },
    AlreadyTakenToday { remaining: i64 },
}

impl TakeOutcome {
    pub fn remaining(&self) -> i64 {
        match self {
            TakeOutcome::Taken { remaining } | TakeOutcome::AlreadyTakenToday { remaining } => {
                *remaining
            }
        }
    }

    pub fn is_taken(&self) -> bool {
        matches!(self, TakeOutcome::Taken { .. })
    }
}

/// Read-only view returned by [`MedicineStatus::report`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusReport {
    pub remaining: i64,
    pub taken_today: bool,
}

/// Decrement with refill: running out starts a new sheet.
fn decrement_with_wrap(remaining: i64, max: i64) -> i64 {
    let next = remaining - 1;
    if next <= 0 {
        max
    } else {
        next
    }
}

impl MedicineStatus {
    pub fn new(remaining: i64) -> Self {
        Self {
            remaining,
            last_taken_at: None,
        }
    }

    /// Pulls a stored count back into `[0, max]`, e.g. after `max` was
    /// lowered. Returns `None` when the status is already in range.
    pub fn clamped(&self, max: i64) -> Option<MedicineStatus> {
        let remaining = self.remaining.clamp(0, max.max(0));
        (remaining != self.remaining).then_some(MedicineStatus {
            remaining,
            last_taken_at: self.last_taken_at,
        })
    }

    pub fn taken_on(&self, day: NaiveDate) -> bool {
        self.last_taken_at == Some(day)
    }

    /// Once-per-day automatic dose.
    ///
    /// Returns the status to persist (`None` when nothing changes) and the
    /// outcome to report back.
    pub fn take(&self, today: NaiveDate, max: i64) -> (Option<MedicineStatus>, TakeOutcome) {
        if self.taken_on(today) {
            return (
                None,
                TakeOutcome::AlreadyTakenToday {
                    remaining: self.remaining,
                },
            );
        }

        let remaining = decrement_with_wrap(self.remaining, max);
        let next = MedicineStatus {
            remaining,
            last_taken_at: Some(today),
        };
        (Some(next), TakeOutcome::Taken { remaining })
    }

    /// Manual correction downwards. Floors at zero and keeps `last_taken_at`.
    pub fn decrease(&self, max: i64) -> Option<MedicineStatus> {
        if self.remaining <= 0 {
            return None;
        }

        Some(MedicineStatus {
            remaining: decrement_with_wrap(self.remaining, max),
            last_taken_at: self.last_taken_at,
        })
    }

    /// Manual correction upwards. Treated as undoing a take, so the
    /// once-per-day gate is released.
    pub fn increase(&self, max: i64) -> Option<MedicineStatus> {
        if self.remaining >= max {
            return None;
        }

        Some(MedicineStatus {
            remaining: self.remaining + 1,
            last_taken_at: None,
        })
    }

    pub fn report(&self, today: NaiveDate) -> StatusReport {
        StatusReport {
            remaining: self.remaining,
            taken_today: self.taken_on(today),
        }
    }
}

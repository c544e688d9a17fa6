pub mod history;
pub mod medicine;

/// Chat commands, matched against the whole message text
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// Record today's dose
    Take,
    /// Show the remaining count with the pill sheet
    Status,
    /// Show whether today's dose was taken, with the pill sheet
    Today,
    /// Manually remove one pill
    Decrease,
    /// Manually add one pill back
    Increase,
    /// List recent counter changes
    History,
}

impl Command {
    pub const ALL: [Command; 6] = [
        Command::Take,
        Command::Status,
        Command::Today,
        Command::Decrease,
        Command::Increase,
        Command::History,
    ];

    /// Exact text that triggers the command
    pub fn token(&self) -> &'static str {
        match self {
            Command::Take => "飲んだ",
            Command::Status => "残りの薬の個数",
            Command::Today => "今日の薬",
            Command::Decrease => "減らす",
            Command::Increase => "増やす",
            Command::History => "履歴",
        }
    }

    /// Short name for logs
    pub fn name(&self) -> &'static str {
        match self {
            Command::Take => "take",
            Command::Status => "status",
            Command::Today => "today",
            Command::Decrease => "decrease",
            Command::Increase => "increase",
            Command::History => "history",
        }
    }

    /// Resolves message text to a command. No trimming or case folding:
    /// only the exact token matches.
    pub fn parse(text: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|cmd| cmd.token() == text)
    }
}

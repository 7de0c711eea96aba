use super::CommandResult;

pub const MESSAGE_NO_HISTORY: &str = "You have not yet entered any commands.";

/// Every line the user entered, oldest first.
#[derive(Debug, Default, Clone)]
pub struct CommandHistory {
    entries: Vec<String>,
}

impl CommandHistory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, input: &str) {
        self.entries.push(input.to_string());
    }

    pub fn entries(&self) -> &[String] {
        &self.entries
    }

    /// Lists entries newest first.
    pub fn report(&self) -> CommandResult {
        if self.entries.is_empty() {
            return CommandResult::new(MESSAGE_NO_HISTORY);
        }
        let lines: Vec<&str> = self.entries.iter().rev().map(String::as_str).collect();
        CommandResult::new(format!("Entered commands (from most recent to earliest):\n{}", lines.join("\n")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_history_message() {
        assert_eq!(CommandHistory::new().report().feedback, MESSAGE_NO_HISTORY);
    }

    #[test]
    fn report_lists_newest_first() {
        let mut history = CommandHistory::new();
        history.add("list");
        history.add("undo");
        let feedback = history.report().feedback;
        assert!(feedback.ends_with("undo\nlist"));
    }
}

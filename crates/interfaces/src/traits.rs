use async_trait::async_trait;

#[async_trait]
pub trait Interface: Send + Sync {
    /// `None` on end of input.
    async fn receive_input(&self) -> Option<String>;
    async fn send_output(&self, message: &str);
    /// Asks a yes/no question; only an explicit `yes` approves.
    async fn request_approval(&self, action: &str) -> bool;
    async fn show_status(&self, status: &str);
    async fn show_error(&self, message: &str);

    /// Prints `label` without a newline and reads the answer.
    async fn prompt(&self, label: &str) -> Option<String>;
}

pub fn is_affirmative(answer: &str) -> bool {
    answer.trim().eq_ignore_ascii_case("yes")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_only_yes_confirms() {
        assert!(is_affirmative("yes"));
        assert!(is_affirmative(" YES\n"));
        assert!(!is_affirmative("y"));
        assert!(!is_affirmative("no"));
        assert!(!is_affirmative(""));
    }
}

//! Progress feedback for slow steps (weather lookups, chat requests).

use std::future::Future;
use std::time::Duration;

use indicatif::{ProgressBar, ProgressStyle};

const FRAMES: [&str; 4] = ["·  ", "·· ", "···", "   "];

fn spinner(message: &str) -> ProgressBar {
    let spinner = ProgressBar::new_spinner();
    if let Ok(style) = ProgressStyle::with_template("  {msg} {spinner}") {
        spinner.set_style(style.tick_strings(&FRAMES));
    }
    spinner.set_message(message.to_string());
    spinner.enable_steady_tick(Duration::from_millis(120));
    spinner
}

/// Run `work` behind a spinner, cleared once it returns.
pub fn while_spinning<T>(message: &str, work: impl FnOnce() -> T) -> T {
    let spinner = spinner(message);
    let value = work();
    spinner.finish_and_clear();
    value
}

/// Await `work` behind a spinner, cleared once it resolves.
pub async fn awaiting<T>(message: &str, work: impl Future<Output = T>) -> T {
    let spinner = spinner(message);
    let value = work.await;
    spinner.finish_and_clear();
    value
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_while_spinning_returns_value() {
        assert_eq!(while_spinning("Working", || 21 * 2), 42);
    }

    #[tokio::test]
    async fn test_awaiting_returns_value() {
        assert_eq!(awaiting("Waiting", async { "done" }).await, "done");
    }
}

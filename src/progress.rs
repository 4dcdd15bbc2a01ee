use indicatif::{ProgressBar, ProgressStyle};
use std::time::Duration;

/// Create a spinner for the browser scan.
pub fn create_spinner(message: &str) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    if let Ok(style) = ProgressStyle::default_spinner().template("{spinner:.green} {msg}") {
        pb.set_style(style);
    }
    pb.set_message(message.to_string());
    pb.enable_steady_tick(Duration::from_millis(100));
    pb
}

/// Remove the spinner line so the report prints cleanly.
pub fn finish_and_clear(pb: &ProgressBar) {
    pb.finish_and_clear();
}

use indicatif::{ProgressBar, ProgressStyle};

use crate::progress::ProgressEvent;

/// Percent-based progress bar for one operation.
pub struct Bar {
    bar: ProgressBar,
}

impl Bar {
    pub fn new(description: &str) -> Self {
        let bar = ProgressBar::new(100);
        let style = ProgressStyle::default_bar()
            .template("{msg} [{bar:40.cyan/blue}] {percent}%")
            .expect("valid template")
            .progress_chars("●○ ");

        bar.set_style(style);
        bar.set_message(description.to_string());

        Self { bar }
    }

    pub fn update(&self, event: &ProgressEvent) {
        self.bar.set_position(u64::from(event.percent));
        self.bar.set_message(event.label.clone());
    }

    pub fn finish(&self) {
        self.bar.finish_with_message("Done");
    }
}

impl Drop for Bar {
    fn drop(&mut self) {
        if !self.bar.is_finished() {
            self.bar.finish();
        }
    }
}

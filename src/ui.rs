use crate::models::{ScanEvent, ScanReport, Verdict};
use console::style;
use indicatif::{ProgressBar, ProgressDrawTarget, ProgressStyle};

const BAR_WIDTH: usize = 40;
const NAME_WIDTH: usize = 20;

/// Observer of scan progress. Implementations must not affect the scan.
pub trait ProgressSink: Send {
    fn on_start(&mut self, _total: usize) {}

    fn on_event(&mut self, event: &ScanEvent);

    fn on_finish(&mut self, _report: &ScanReport) {}

    /// Run `f` with any live display cleared, so lines it prints (logging)
    /// land above the progress line instead of inside it.
    fn suspend(&mut self, f: &mut dyn FnMut()) {
        f()
    }
}

/// Discards every event.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullSink;

impl ProgressSink for NullSink {
    fn on_event(&mut self, _event: &ScanEvent) {}
}

/// Single overwritten progress line, on stdout unless another draw target
/// is given.
pub struct TerminalProgress {
    bar: ProgressBar,
    quiet: bool,
    draw_target: Option<ProgressDrawTarget>,
}

impl TerminalProgress {
    pub fn new(quiet: bool) -> Self {
        Self {
            bar: ProgressBar::hidden(),
            quiet,
            draw_target: None,
        }
    }

    pub fn with_draw_target(draw_target: ProgressDrawTarget) -> Self {
        Self {
            draw_target: Some(draw_target),
            ..Self::new(false)
        }
    }

    pub fn is_hidden(&self) -> bool {
        self.bar.is_hidden()
    }

    fn build_bar(total: usize, draw_target: ProgressDrawTarget) -> ProgressBar {
        let bar = ProgressBar::with_draw_target(Some(total as u64), draw_target);
        let template = format!("[{{bar:{}.green}}] {{msg}}", BAR_WIDTH);
        match ProgressStyle::with_template(&template) {
            Ok(bar_style) => bar.set_style(bar_style.progress_chars("██░")),
            Err(e) => log::warn!("Invalid progress template: {}", e),
        }
        bar
    }
}

impl ProgressSink for TerminalProgress {
    fn on_start(&mut self, total: usize) {
        if self.quiet || total == 0 {
            return;
        }
        let draw_target = self.draw_target.take().unwrap_or_else(ProgressDrawTarget::stdout);
        self.bar = Self::build_bar(total, draw_target);
    }

    fn on_event(&mut self, event: &ScanEvent) {
        if self.bar.is_hidden() {
            return;
        }
        self.bar.set_position(event.completed as u64);
        self.bar.set_message(status_line(event));
    }

    fn on_finish(&mut self, report: &ScanReport) {
        if self.bar.is_hidden() {
            return;
        }
        if report.cancelled {
            self.bar.abandon_with_message(interrupted_line(report));
        } else {
            self.bar.finish_with_message(final_line(report));
        }
        println!();
    }

    fn suspend(&mut self, f: &mut dyn FnMut()) {
        if self.bar.is_hidden() {
            f();
        } else {
            self.bar.suspend(|| f());
        }
    }
}

fn status_icon(verdict: &Verdict) -> String {
    match verdict {
        Verdict::Found(_) => style("✓").green().to_string(),
        Verdict::NotFound => style("○").yellow().to_string(),
        Verdict::Error => style("✗").red().to_string(),
    }
}

fn display_name(name: &str) -> String {
    let truncated: String = name.chars().take(NAME_WIDTH).collect();
    format!("{:<width$}", truncated, width = NAME_WIDTH)
}

pub fn percentage(completed: usize, total: usize) -> f64 {
    if total == 0 {
        return 100.0;
    }
    completed as f64 * 100.0 / total as f64
}

/// Text after the bar for one completion.
pub fn status_line(event: &ScanEvent) -> String {
    format!(
        "{:.1}% | {} {} | Completed: {}/{} | Found: {}",
        percentage(event.completed, event.total),
        status_icon(&event.verdict),
        display_name(&event.platform),
        event.completed,
        event.total,
        style(event.found).green()
    )
}

pub fn final_line(report: &ScanReport) -> String {
    format!(
        "100.0% | Completed: {}/{} | Found: {}/{}",
        report.total,
        report.total,
        style(report.found_count()).green(),
        report.total
    )
}

fn interrupted_line(report: &ScanReport) -> String {
    format!(
        "{:.1}% | {} | Completed: {}/{} | Found: {}",
        percentage(report.completed, report.total),
        style("Interrupted").red().bold(),
        report.completed,
        report.total,
        style(report.found_count()).green()
    )
}

//! Output trait for rendering reports to different targets.

#[cfg(test)]
use std::fmt::Write as _;

/// Target output for reports.
///
/// Reports describe *what* to output using these semantic methods.
/// Implementations decide *how* to render it.
pub trait Output {
    /// Render a title/header.
    fn title(&mut self, text: &str);

    /// Start a new section with a heading.
    fn section(&mut self, name: &str);

    /// Render a bullet list item.
    fn list_item(&mut self, text: &str);

    /// Render a key-value pair nested under a list item.
    fn detail(&mut self, key: &str, value: &str);

    /// Render a warning message.
    fn warning(&mut self, msg: &str);

    /// Render a block of preformatted text.
    fn preformatted(&mut self, text: &str);

    /// Render a blank line.
    fn newline(&mut self);
}

/// A report that can render itself to an output.
pub trait Report {
    /// Render this report to the given output.
    fn render(&self, out: &mut dyn Output);
}

fn detail_line(key: &str, value: &str) -> String {
    format!("      {:<24} {}", key, value).trim_end().to_string()
}

/// Terminal output implementation.
pub struct TerminalOutput;

impl TerminalOutput {
    pub fn new() -> Self {
        Self
    }
}

impl Default for TerminalOutput {
    fn default() -> Self {
        Self::new()
    }
}

impl Output for TerminalOutput {
    fn title(&mut self, text: &str) {
        println!("{}", text);
        println!("{}", "=".repeat(text.len()));
    }

    fn section(&mut self, name: &str) {
        println!("{}:", name);
    }

    fn list_item(&mut self, text: &str) {
        println!("  - {}", text);
    }

    fn detail(&mut self, key: &str, value: &str) {
        println!("{}", detail_line(key, value));
    }

    fn warning(&mut self, msg: &str) {
        eprintln!("warning: {}", msg);
    }

    fn preformatted(&mut self, text: &str) {
        println!("{}", text);
    }

    fn newline(&mut self) {
        println!();
    }
}

/// Collects rendered text; warnings are kept inline.
#[cfg(test)]
#[derive(Default)]
pub struct BufferOutput {
    pub text: String,
}

#[cfg(test)]
impl Output for BufferOutput {
    fn title(&mut self, text: &str) {
        let _ = writeln!(self.text, "{}\n{}", text, "=".repeat(text.len()));
    }

    fn section(&mut self, name: &str) {
        let _ = writeln!(self.text, "{}:", name);
    }

    fn list_item(&mut self, text: &str) {
        let _ = writeln!(self.text, "  - {}", text);
    }

    fn detail(&mut self, key: &str, value: &str) {
        let _ = writeln!(self.text, "{}", detail_line(key, value));
    }

    fn warning(&mut self, msg: &str) {
        let _ = writeln!(self.text, "warning: {}", msg);
    }

    fn preformatted(&mut self, text: &str) {
        let _ = writeln!(self.text, "{}", text);
    }

    fn newline(&mut self) {
        self.text.push('\n');
    }
}

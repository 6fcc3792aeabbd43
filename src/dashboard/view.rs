//! Display Regions
//!
//! The controller writes to three regions (user line, role badge, raw
//! output) and can send the user elsewhere.

use std::io::Write;

use crate::session::RoleLabel;

/// Where the dashboard shows text
pub trait DashboardView {
    fn show_user(&mut self, text: &str);

    fn show_role(&mut self, role: RoleLabel);

    /// Replace the raw output region
    fn show_output(&mut self, text: &str);

    /// Leave the dashboard for `location`
    fn navigate(&mut self, location: &str);
}

/// View that prints each region update to a writer
pub struct TerminalView<W: Write> {
    out: W,
}

impl<W: Write> TerminalView<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    fn line(&mut self, text: &str) {
        if let Err(e) = writeln!(self.out, "{}", text).and_then(|_| self.out.flush()) {
            tracing::warn!("Failed to write to terminal: {}", e);
        }
    }
}

impl<W: Write> DashboardView for TerminalView<W> {
    fn show_user(&mut self, text: &str) {
        self.line(text);
    }

    fn show_role(&mut self, role: RoleLabel) {
        self.line(&format!("[{}]", role));
    }

    fn show_output(&mut self, text: &str) {
        self.line(text);
    }

    fn navigate(&mut self, location: &str) {
        self.line(&format!("-> {}", location));
    }
}

/// View that keeps the current content of each region
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RegionView {
    pub user: Option<String>,
    pub role: Option<RoleLabel>,
    pub role_class: Option<String>,
    pub output: Option<String>,
    /// Every text the output region has shown, oldest first
    pub output_history: Vec<String>,
    pub location: Option<String>,
}

impl RegionView {
    pub fn new() -> Self {
        Self::default()
    }
}

impl DashboardView for RegionView {
    fn show_user(&mut self, text: &str) {
        self.user = Some(text.to_string());
    }

    fn show_role(&mut self, role: RoleLabel) {
        self.role = Some(role);
        self.role_class = Some(role.css_class().to_string());
    }

    fn show_output(&mut self, text: &str) {
        self.output = Some(text.to_string());
        self.output_history.push(text.to_string());
    }

    fn navigate(&mut self, location: &str) {
        self.location = Some(location.to_string());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_terminal_view_writes_lines() {
        let mut view = TerminalView::new(Vec::new());
        view.show_user("Logged in as: bob");
        view.show_role(RoleLabel::User);
        view.show_output("Loading...");
        view.navigate("index.html");

        let text = String::from_utf8(view.into_inner()).unwrap();
        assert_eq!(text, "Logged in as: bob\n[USER]\nLoading...\n-> index.html\n");
    }

    #[test]
    fn test_region_view_keeps_latest_output() {
        let mut view = RegionView::new();
        view.show_output("Loading...");
        view.show_output("[]");
        view.show_role(RoleLabel::Guest);

        assert_eq!(view.output.as_deref(), Some("[]"));
        assert_eq!(view.output_history, vec!["Loading...", "[]"]);
        assert_eq!(view.role_class.as_deref(), Some("role-badge guest"));
    }
}

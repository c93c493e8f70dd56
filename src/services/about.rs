//! About screen: build metadata and the donation reveal gate.

use crate::models::{AboutConfig, BuildInfo};

/// Blur state of a masked panel.
///
/// Every time the panel opens it starts blurred, and closing it blurs it
/// again, so a reveal never carries over between openings.
#[derive(Debug, Clone, Default)]
pub struct RevealGate {
    open: bool,
    revealed: bool,
}

impl RevealGate {
    pub fn open(&mut self) {
        self.open = true;
        self.revealed = false;
    }

    pub fn reveal(&mut self) {
        if self.open {
            self.revealed = true;
        }
    }

    pub fn close(&mut self) {
        self.open = false;
        self.revealed = false;
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    pub fn is_blurred(&self) -> bool {
        !self.revealed
    }

    /// `content` when revealed, a same-length mask otherwise.
    pub fn mask(&self, content: &str) -> String {
        if self.is_blurred() {
            "*".repeat(content.chars().count())
        } else {
            content.to_string()
        }
    }
}

/// Everything the about screen shows.
pub struct About {
    pub build: BuildInfo,
    pub donation_url: Option<String>,
    pub gate: RevealGate,
}

impl About {
    /// Load build metadata, falling back to placeholders.
    pub fn load(config: &AboutConfig) -> Self {
        Self {
            build: BuildInfo::load_or_default(&config.build_info_path),
            donation_url: config.donation_url.clone(),
            gate: RevealGate::default(),
        }
    }

    /// Key/value lines for the version block.
    pub fn version_lines(&self) -> Vec<(&'static str, String)> {
        vec![
            ("版本", self.build.label()),
            ("构建时间", self.build.display_time()),
        ]
    }

    /// Donation link as currently visible through the gate.
    pub fn donation(&self) -> Option<String> {
        self.donation_url.as_deref().map(|url| self.gate.mask(url))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn opening_starts_blurred() {
        let mut gate = RevealGate::default();
        gate.open();
        assert!(gate.is_blurred());
        gate.reveal();
        assert!(!gate.is_blurred());

        gate.close();
        assert!(gate.is_blurred());
        gate.open();
        assert!(gate.is_blurred());
    }

    #[test]
    fn reveal_while_closed_is_ignored() {
        let mut gate = RevealGate::default();
        gate.reveal();
        assert!(gate.is_blurred());
        assert_eq!(gate.mask("abc"), "***");
    }

    #[test]
    fn missing_build_info_uses_placeholder() {
        let dir = tempfile::tempdir().unwrap();
        let about = About::load(&AboutConfig {
            build_info_path: dir.path().join("missing.json").display().to_string(),
            donation_url: Some("https://example.com/donate".to_string()),
        });

        assert_eq!(about.version_lines()[0].1, "beta.0.1-00000000");
        assert_eq!(about.version_lines()[1].1, "2024-01-20 15:30:00");
        assert_eq!(about.donation().unwrap(), "*".repeat(26));
    }

    #[test]
    fn donation_revealed_after_confirmation() {
        let mut about = About::load(&AboutConfig::default());
        about.donation_url = Some("https://example.com/d".to_string());
        about.gate.open();
        about.gate.reveal();
        assert_eq!(about.donation().as_deref(), Some("https://example.com/d"));
    }
}

//! Semantic styling on top of `console`
//!
//! Colors are decided once from the resolved color intent; symbols fall back
//! to ASCII on terminals that cannot render them.

use console::{Emoji, Style};

static CHECKMARK: Emoji<'_, '_> = Emoji("✓", "+");
static CROSS: Emoji<'_, '_> = Emoji("✗", "x");
static WARNING: Emoji<'_, '_> = Emoji("!", "!");
static INFO: Emoji<'_, '_> = Emoji("·", "-");
static ARROW: Emoji<'_, '_> = Emoji("→", ">");
static BULLET: Emoji<'_, '_> = Emoji("•", "*");

/// Style manager holding the semantic palette
pub struct StyleManager {
    success: Style,
    error: Style,
    warning: Style,
    info: Style,
    emphasis: Style,
    subtle: Style,
}

impl StyleManager {
    pub fn new(color: bool) -> Self {
        let base = Style::new().force_styling(color);
        Self {
            success: base.clone().green(),
            error: base.clone().red(),
            warning: base.clone().yellow(),
            info: base.clone().cyan(),
            emphasis: base.clone().bold(),
            subtle: base.dim(),
        }
    }

    /// Style text with semantic success intent
    pub fn style_success(&self, text: &str) -> String {
        self.success.apply_to(text).to_string()
    }

    /// Style text with semantic error intent
    pub fn style_error(&self, text: &str) -> String {
        self.error.apply_to(text).to_string()
    }

    /// Style text with semantic warning intent
    pub fn style_warning(&self, text: &str) -> String {
        self.warning.apply_to(text).to_string()
    }

    /// Style text with semantic info intent
    pub fn style_info(&self, text: &str) -> String {
        self.info.apply_to(text).to_string()
    }

    /// Style text with emphasis (bold)
    pub fn style_emphasis(&self, text: &str) -> String {
        self.emphasis.apply_to(text).to_string()
    }

    /// Style text as subtle/muted
    pub fn style_subtle(&self, text: &str) -> String {
        self.subtle.apply_to(text).to_string()
    }

    pub fn format_success(&self, message: &str) -> String {
        format!("{} {}", self.style_success(&CHECKMARK.to_string()), message)
    }

    pub fn format_error(&self, message: &str) -> String {
        format!("{} {}", self.style_error(&CROSS.to_string()), message)
    }

    pub fn format_warning(&self, message: &str) -> String {
        format!("{} {}", self.style_warning(&WARNING.to_string()), message)
    }

    pub fn format_info(&self, message: &str) -> String {
        format!("{} {}", self.style_info(&INFO.to_string()), message)
    }

    /// Format working/progress message (info color with arrow)
    pub fn format_working(&self, message: &str) -> String {
        format!("{} {}", self.style_info(&ARROW.to_string()), message)
    }

    /// Bullet symbol for lists
    pub fn bullet(&self) -> String {
        BULLET.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_styling_has_no_escape_codes() {
        let styling = StyleManager::new(false);
        assert_eq!(styling.style_success("done"), "done");
        assert_eq!(styling.style_subtle("quiet"), "quiet");
        assert!(styling.format_error("boom").ends_with(" boom"));
    }

    #[test]
    fn test_forced_styling_wraps_text() {
        let styling = StyleManager::new(true);
        let styled = styling.style_error("boom");
        assert!(styled.contains("\u{1b}["));
        assert!(styled.contains("boom"));
    }
}

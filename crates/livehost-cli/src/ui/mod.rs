//! Terminal output helpers.
//!
//! Status lines go to stderr so stdout stays clean for piping. Colour follows
//! `NO_COLOR` / `FORCE_COLOR` and falls back to terminal detection.
//!
//! ```no_run
//! use livehost_cli::ui;
//!
//! ui::init_colors(false);
//! ui::success("Serving ./site at http://127.0.0.1:8080/");
//! ui::warning("Root directory is empty");
//! ```

mod messages;

pub use messages::{error, info, success, warning};

/// Check if color output should be enabled.
///
/// `NO_COLOR` wins over `FORCE_COLOR`; with neither set, colour is used only
/// when stderr is a terminal.
pub fn should_use_color() -> bool {
    if std::env::var("NO_COLOR").is_ok() {
        return false;
    }

    if std::env::var("FORCE_COLOR").is_ok() {
        return true;
    }

    console::user_attended_stderr()
}

/// Apply the colour decision for the process.
///
/// `no_color` comes from the `--no-color` flag and always disables colour.
pub fn init_colors(no_color: bool) {
    let enabled = !no_color && should_use_color();
    owo_colors::set_override(enabled);
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    #[test]
    #[serial]
    fn test_should_use_color_no_color() {
        std::env::set_var("NO_COLOR", "1");
        std::env::remove_var("FORCE_COLOR");
        assert!(!should_use_color());
        std::env::remove_var("NO_COLOR");
    }

    #[test]
    #[serial]
    fn test_should_use_color_force_color() {
        std::env::remove_var("NO_COLOR");
        std::env::set_var("FORCE_COLOR", "1");
        assert!(should_use_color());
        std::env::remove_var("FORCE_COLOR");
    }

    #[test]
    #[serial]
    fn test_should_use_color_no_color_overrides_force() {
        std::env::set_var("NO_COLOR", "1");
        std::env::set_var("FORCE_COLOR", "1");
        assert!(!should_use_color());
        std::env::remove_var("NO_COLOR");
        std::env::remove_var("FORCE_COLOR");
    }
}

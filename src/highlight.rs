use std::io::IsTerminal;

use clap::ValueEnum;
use owo_colors::OwoColorize;
use serde::Deserialize;

/// Decorates values the report wants to draw attention to.
pub trait Highlighter {
    fn out_of_range(&self, text: &str) -> String;

    /// Section titles and summaries.
    fn heading(&self, text: &str) -> String {
        text.to_string()
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct Plain;

impl Highlighter for Plain {
    fn out_of_range(&self, text: &str) -> String {
        text.to_string()
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct Ansi;

impl Highlighter for Ansi {
    fn out_of_range(&self, text: &str) -> String {
        text.red().to_string()
    }

    fn heading(&self, text: &str) -> String {
        text.bold().cyan().to_string()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColorPolicy {
    Auto,
    Always,
    Never,
}

impl ColorPolicy {
    pub fn highlighter(self) -> Box<dyn Highlighter> {
        let tty = std::io::stdout().is_terminal();
        if self.enabled_with(tty, |key| std::env::var(key).ok()) {
            Box::new(Ansi)
        } else {
            Box::new(Plain)
        }
    }

    /// `Auto` honours NO_COLOR, CLICOLOR=0 and TERM=dumb, then
    /// CLICOLOR_FORCE/FORCE_COLOR, then falls back to whether stdout is a tty.
    pub fn enabled_with(self, stdout_is_tty: bool, env: impl Fn(&str) -> Option<String>) -> bool {
        match self {
            Self::Always => true,
            Self::Never => false,
            Self::Auto => {
                let is = |key: &str, value: &str| env(key).as_deref() == Some(value);
                if env("NO_COLOR").is_some() || is("CLICOLOR", "0") || is("TERM", "dumb") {
                    false
                } else if is("CLICOLOR_FORCE", "1") || is("FORCE_COLOR", "1") {
                    true
                } else {
                    stdout_is_tty
                }
            }
        }
    }
}

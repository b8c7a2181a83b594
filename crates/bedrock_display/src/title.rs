use std::fmt::{self, Display, Formatter};

use derive_setters::Setters;

use crate::color::enhanced;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Category {
    /// A step that is about to run
    Action,
    Info,
    Success,
    Warning,
    Error,
}

/// One status line of diagnostic output: an icon, a title and an optional
/// dimmed sub-title.
#[derive(Clone, Setters, Debug, PartialEq)]
#[setters(into, strip_option)]
pub struct TitleFormat {
    pub title: String,
    pub sub_title: Option<String>,
    pub category: Category,
}

impl TitleFormat {
    fn new(title: impl Into<String>, category: Category) -> Self {
        Self { title: title.into(), sub_title: None, category }
    }

    pub fn action(message: impl Into<String>) -> Self {
        Self::new(message, Category::Action)
    }

    pub fn info(message: impl Into<String>) -> Self {
        Self::new(message, Category::Info)
    }

    pub fn success(message: impl Into<String>) -> Self {
        Self::new(message, Category::Success)
    }

    pub fn warning(message: impl Into<String>) -> Self {
        Self::new(message, Category::Warning)
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self::new(message, Category::Error)
    }

    pub fn render(&self, with_timestamp: bool) -> String {
        let mut buf = String::new();

        let icon = match self.category {
            Category::Action => enhanced::cyan("⏺"),
            Category::Info => enhanced::white("•"),
            Category::Success => enhanced::green("✓"),
            Category::Warning => enhanced::yellow("!"),
            Category::Error => enhanced::red("✗"),
        };
        buf.push_str(&format!("{icon} "));

        if with_timestamp {
            use chrono::Local;

            buf.push_str(&enhanced::dimmed(&format!(
                "[{}] ",
                Local::now().format("%H:%M:%S")
            )));
        }

        let title = match self.category {
            Category::Action => enhanced::bold(&self.title),
            Category::Info | Category::Success => enhanced::white(&self.title),
            Category::Warning => enhanced::yellow(&self.title),
            Category::Error => enhanced::red(&self.title),
        };
        buf.push_str(&title);

        if let Some(ref sub_title) = self.sub_title {
            buf.push_str(&format!(" {}", enhanced::dimmed(sub_title)));
        }

        buf
    }
}

impl Display for TitleFormat {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.render(false))
    }
}

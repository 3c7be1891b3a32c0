use crossterm::style::{style, Color, Stylize};
use crossterm::tty::IsTty;

/// Semantic colors used by the report.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tone {
    Open,
    Completed,
    Cancelled,
    Note,
    PriorityA,
    PriorityB,
    PriorityC,
    Context,
    Project,
    Counter,
    Recurring,
    Effort,
    Due,
    Muted,
    Today,
    Filter,
}

impl Tone {
    pub fn color(&self) -> Color {
        match self {
            Tone::Open | Tone::PriorityA => Color::DarkRed,
            Tone::Completed | Tone::Effort => Color::DarkGreen,
            Tone::Cancelled | Tone::Counter | Tone::Muted => Color::Grey,
            Tone::Note | Tone::Context => Color::DarkBlue,
            Tone::PriorityB | Tone::Today | Tone::Filter => Color::DarkYellow,
            Tone::PriorityC | Tone::Recurring | Tone::Due => Color::DarkCyan,
            Tone::Project => Color::DarkMagenta,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Palette {
    #[default]
    Ansi,
    Plain,
}

impl Palette {
    /// ANSI colors when stdout is a terminal, plain text otherwise.
    pub fn for_stdout() -> Self {
        if std::io::stdout().is_tty() {
            Palette::Ansi
        } else {
            Palette::Plain
        }
    }

    pub fn paint(&self, tone: Tone, text: &str) -> String {
        match self {
            Palette::Ansi if text.is_empty() => String::new(),
            Palette::Ansi => style(text).with(tone.color()).to_string(),
            Palette::Plain => text.to_string(),
        }
    }
}

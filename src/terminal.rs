//! Simulated command terminal
//!
//! A scrollback of text lines plus a tiny command interpreter that answers
//! with canned text. The host owns input and decides what `Exit` means.

use chrono::{DateTime, Utc};

/// Prompt shown before every echoed command
pub const PROMPT: &str = "ATRIUM>";

const BANNER: [&str; 4] = [
    "ATRIUM TERMINAL SYSTEM INITIALIZED",
    "Welcome to the Cassette Futurism Experience",
    "Type 'help' for available commands",
    "",
];

const HELP: [&str; 11] = [
    "Available commands:",
    "  help     - Show this help message",
    "  clear    - Clear terminal",
    "  date     - Show current date/time",
    "  conan    - Conan the Barbarian info",
    "  wargames - WarGames movie info",
    "  galaga   - Galaga arcade game info",
    "  yuppie   - Yuppie culture info",
    "  frazetta - Frank Frazetta info",
    "  rockwell - Norman Rockwell info",
    "  exit     - Exit terminal",
];

/// Reference topics with canned write-ups
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Topic {
    Conan,
    WarGames,
    Galaga,
    Yuppie,
    Frazetta,
    Rockwell,
}

impl Topic {
    pub fn lines(self) -> &'static [&'static str] {
        match self {
            Topic::Conan => &[
                "CONAN THE BARBARIAN (1982)",
                "Directed by John Milius",
                "Starring Arnold Schwarzenegger",
                "Epic fantasy film based on Robert E. Howard's character",
                "Features the iconic 'Riddle of Steel' theme",
                "Inspired by Frank Frazetta's artwork",
            ],
            Topic::WarGames => &[
                "WARGAMES (1983)",
                "Directed by John Badham",
                "Starring Matthew Broderick",
                "Teenager accidentally hacks into NORAD",
                "Features iconic computer terminal scenes",
                "Inspired the 'hacker' aesthetic in popular culture",
            ],
            Topic::Galaga => &[
                "GALAGA (1981)",
                "Arcade game by Namco",
                "Space shooter with iconic enemy formations",
                "Featured in arcades throughout the 1980s",
                "Part of the golden age of arcade gaming",
            ],
            Topic::Yuppie => &[
                "YUPPIE CULTURE",
                "Young Urban Professional",
                "1980s cultural phenomenon",
                "Associated with materialism and career success",
                "Influenced fashion, music, and lifestyle trends",
            ],
            Topic::Frazetta => &[
                "FRANK FRAZETTA (1928-2010)",
                "American fantasy and science fiction artist",
                "Known for Conan the Barbarian covers",
                "Influenced generations of fantasy artists",
                "Iconic style defined sword and sorcery art",
            ],
            Topic::Rockwell => &[
                "NORMAN ROCKWELL (1894-1978)",
                "American illustrator and painter",
                "Known for Saturday Evening Post covers",
                "Captured American life and values",
                "Influenced 1980s nostalgia and Americana",
            ],
        }
    }
}

/// A parsed command line
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Help,
    Clear,
    Date,
    Topic(Topic),
    Exit,
    /// Blank input
    Empty,
    Unknown(String),
}

impl Command {
    /// Parse one line of input (trimmed, case-insensitive)
    pub fn parse(input: &str) -> Self {
        let trimmed = input.trim();
        match trimmed.to_lowercase().as_str() {
            "" => Command::Empty,
            "help" => Command::Help,
            "clear" => Command::Clear,
            "date" => Command::Date,
            "conan" => Command::Topic(Topic::Conan),
            "wargames" => Command::Topic(Topic::WarGames),
            "galaga" => Command::Topic(Topic::Galaga),
            "yuppie" => Command::Topic(Topic::Yuppie),
            "frazetta" => Command::Topic(Topic::Frazetta),
            "rockwell" => Command::Topic(Topic::Rockwell),
            "exit" | "quit" => Command::Exit,
            _ => Command::Unknown(trimmed.to_string()),
        }
    }
}

/// Terminal scrollback and interpreter
#[derive(Debug, Clone)]
pub struct Terminal {
    lines: Vec<String>,
}

impl Default for Terminal {
    fn default() -> Self {
        Self::new()
    }
}

impl Terminal {
    /// A fresh terminal showing the startup banner
    pub fn new() -> Self {
        let mut terminal = Self { lines: Vec::new() };
        for line in BANNER {
            terminal.push(line);
        }
        terminal
    }

    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    pub fn push(&mut self, line: impl Into<String>) {
        self.lines.push(line.into());
    }

    /// Lines added since `mark` (a previous `lines().len()`)
    pub fn since(&self, mark: usize) -> &[String] {
        self.lines.get(mark..).unwrap_or(&[])
    }

    /// Run one line of input, echoing it and appending the response
    pub fn execute(&mut self, input: &str, now: DateTime<Utc>) -> Command {
        let command = Command::parse(input);
        self.push(format!("{PROMPT} {}", input.trim()));

        match &command {
            Command::Help => self.push_lines(HELP),
            Command::Clear => self.lines.clear(),
            Command::Date => self.push(format_utc(now)),
            Command::Topic(topic) => self.push_lines(topic.lines().iter().copied()),
            Command::Exit => self.push("Terminal session ended. Goodbye!"),
            Command::Empty => {}
            Command::Unknown(text) => {
                self.push(format!("Command not recognized: {text}"));
                self.push("Type 'help' for available commands");
            }
        }
        command
    }

    fn push_lines<'a>(&mut self, lines: impl IntoIterator<Item = &'a str>) {
        self.lines.extend(lines.into_iter().map(str::to_string));
    }
}

/// Long-form UTC date, e.g. "Thursday, October 15, 2026 at 09:30:00 UTC"
pub fn format_utc(now: DateTime<Utc>) -> String {
    now.format("%A, %B %-d, %Y at %H:%M:%S UTC").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn at(secs: i64) -> DateTime<Utc> {
        DateTime::from_timestamp(secs, 0).unwrap()
    }

    #[test]
    fn test_banner() {
        let terminal = Terminal::new();
        assert_eq!(terminal.lines().len(), 4);
        assert_eq!(terminal.lines()[0], "ATRIUM TERMINAL SYSTEM INITIALIZED");
    }

    #[test]
    fn test_command_parse_is_forgiving() {
        assert_eq!(Command::parse("  HELP "), Command::Help);
        assert_eq!(Command::parse("Quit"), Command::Exit);
        assert_eq!(Command::parse("WarGames"), Command::Topic(Topic::WarGames));
        assert_eq!(Command::parse("   "), Command::Empty);
        assert_eq!(Command::parse(" Tron "), Command::Unknown("Tron".into()));
    }

    #[test]
    fn test_execute_echoes_and_answers() {
        let mut terminal = Terminal::new();
        let mark = terminal.lines().len();
        terminal.execute("galaga", at(0));
        let out = terminal.since(mark);
        assert_eq!(out[0], "ATRIUM> galaga");
        assert_eq!(out[1], "GALAGA (1981)");
        assert_eq!(out.len(), 1 + Topic::Galaga.lines().len());
    }

    #[test]
    fn test_unknown_command() {
        let mut terminal = Terminal::new();
        let mark = terminal.lines().len();
        terminal.execute("joshua", at(0));
        assert_eq!(
            terminal.since(mark),
            [
                "ATRIUM> joshua",
                "Command not recognized: joshua",
                "Type 'help' for available commands"
            ]
        );
    }

    #[test]
    fn test_blank_input_only_echoes() {
        let mut terminal = Terminal::new();
        let mark = terminal.lines().len();
        assert_eq!(terminal.execute("", at(0)), Command::Empty);
        assert_eq!(terminal.since(mark), ["ATRIUM> "]);
    }

    #[test]
    fn test_clear_wipes_scrollback() {
        let mut terminal = Terminal::new();
        terminal.execute("help", at(0));
        terminal.execute("clear", at(0));
        assert!(terminal.lines().is_empty());
    }

    #[test]
    fn test_date_command_prints_utc_line() {
        let mut terminal = Terminal::new();
        let mark = terminal.lines().len();
        assert_eq!(terminal.execute("DATE", at(86_400 * 3 + 61)), Command::Date);
        assert_eq!(
            terminal.since(mark),
            ["ATRIUM> DATE", "Sunday, January 4, 1970 at 00:01:01 UTC"]
        );
    }

    #[test]
    fn test_format_utc() {
        assert_eq!(format_utc(at(0)), "Thursday, January 1, 1970 at 00:00:00 UTC");
        assert_eq!(
            format_utc(at(1_792_056_600)),
            "Thursday, October 15, 2026 at 09:30:00 UTC"
        );
        // 2000-02-29 12:34:56
        assert_eq!(
            format_utc(at(951_827_696)),
            "Tuesday, February 29, 2000 at 12:34:56 UTC"
        );
    }
}

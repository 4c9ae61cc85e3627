//! Atrium entry point
//!
//! Runs the terminal over stdin. On top of the terminal's own commands the
//! host understands a few app commands: arcade sessions, the memory journal,
//! the games list, culture cards and settings.

use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};
use std::thread;
use std::time::Duration;

use chrono::Utc;

use atrium::culture::CultureSection;
use atrium::highscores::record_arcade_run;
use atrium::settings::{export_data, import_data};
use atrium::store::{GameKind, MemoryCategory, MemoryFilter, unix_millis};
use atrium::terminal::Command;
use atrium::{Result, SessionConfig, SessionHandle, Settings, Store, Terminal, ThemeVariant};

/// Where settings and records live unless overridden
const DEFAULT_DATA_DIR: &str = "atrium-data";
const DATA_DIR_ENV: &str = "ATRIUM_DATA_DIR";

const DEFAULT_ARCADE_SECONDS: u64 = 5;
/// How often the headless arcade moves the pointer and reports
const ARCADE_FRAME: Duration = Duration::from_millis(16);

const APP_HELP: [&str; 10] = [
    "App commands:",
    "  arcade [secs]              - Play a headless arcade session",
    "  scores                     - Show arcade leaderboard",
    "  games | addgame            - List games / add a game",
    "  memories [category]        - List memories",
    "  remember <cat> <title> | <text> - Add a memory",
    "  favorite <id> | forget <id> - Toggle favourite / delete",
    "  culture [section]          - 1980s culture cards",
    "  settings | set <key> <value> - Show / change settings",
    "  export <file> | import <file> - Move data in and out",
];

struct App {
    settings_path: PathBuf,
    settings: Settings,
    store: Store,
    terminal: Terminal,
}

impl App {
    fn open(data_dir: &Path) -> Result<Self> {
        let settings_path = data_dir.join("settings.json");
        let settings = Settings::load(&settings_path);
        let store = Store::open(data_dir.join("store.json"))?;
        Ok(Self {
            settings_path,
            settings,
            store,
            terminal: Terminal::new(),
        })
    }

    /// Persist records if the user asked for auto-save
    fn autosave(&self) -> Result<()> {
        if self.settings.auto_save {
            self.store.save()?;
        }
        Ok(())
    }

    /// Handle one input line. Returns false when the user exits.
    fn handle(&mut self, line: &str) -> Result<bool> {
        let trimmed = line.trim();
        let (head, rest) = trimmed.split_once(' ').unwrap_or((trimmed, ""));
        let rest = rest.trim();

        match head.to_lowercase().as_str() {
            "arcade" => self.arcade(rest)?,
            "scores" => self.scores(),
            "games" => self.games(),
            "addgame" => {
                let kind = GameKind::parse(rest).unwrap_or_default();
                let id = if rest.is_empty() {
                    self.store.new_game()
                } else {
                    self.store.add_game(&rest.to_uppercase(), kind)
                };
                println!("Added game #{id}");
                self.autosave()?;
            }
            "memories" => self.memories(rest),
            "remember" => self.remember(rest)?,
            "favorite" => {
                let state = self.store.toggle_favorite(parse_id(rest)?)?;
                println!("{}", if state { "Marked favourite" } else { "Unmarked" });
                self.autosave()?;
            }
            "forget" => {
                let memory = self.store.delete_memory(parse_id(rest)?)?;
                println!("Deleted \"{}\"", memory.title);
                self.autosave()?;
            }
            "culture" => culture(rest),
            "settings" => self.show_settings(),
            "set" => self.set(rest)?,
            "export" => export_data(&self.settings, &self.store, Path::new(rest))?,
            "import" => {
                let bundle = import_data(Path::new(rest))?;
                self.settings = bundle.settings;
                self.store = Store::from_records(self.store.path().map(Path::to_path_buf), bundle.records);
                self.settings.save(&self.settings_path)?;
                self.store.save()?;
                println!("Import complete");
            }
            "help" => {
                self.print_terminal(line);
                APP_HELP.iter().for_each(|l| println!("{l}"));
            }
            _ => return Ok(self.print_terminal(line) != Command::Exit),
        }
        Ok(true)
    }

    /// Pass a line to the terminal and print what it wrote
    fn print_terminal(&mut self, line: &str) -> Command {
        let mark = self.terminal.lines().len();
        let command = self.terminal.execute(line, Utc::now());
        for out in self.terminal.since(mark) {
            println!("{out}");
        }
        command
    }

    fn arcade(&mut self, arg: &str) -> Result<()> {
        let seconds = arg.parse().unwrap_or(DEFAULT_ARCADE_SECONDS);
        let config = SessionConfig::with_seed(unix_millis());
        let mut session = SessionHandle::start(config)?;
        println!("ARCADE ONLINE - {seconds}s of autopilot");

        // Sweep the ship back and forth like a player dragging across the screen
        let frames = Duration::from_secs(seconds).as_millis() / ARCADE_FRAME.as_millis();
        for frame in 0..frames {
            let phase = (frame as f64 * 0.02).sin();
            session.set_player_intent(0.5 + 0.4 * phase, 0.8);
            if frame % 60 == 0 {
                let snap = session.snapshot();
                println!(
                    "  SCORE {:>5}  ENEMIES {:>2}  SHOTS {:>2}",
                    snap.score,
                    snap.enemies.len(),
                    snap.projectiles.len()
                );
            }
            thread::sleep(ARCADE_FRAME);
        }
        session.stop();

        let state = session.finish();
        let outcome = record_arcade_run(
            &mut self.store,
            state.score,
            self.settings.display_name(),
            unix_millis(),
        );
        println!("GAME OVER - SCORE {}", outcome.score);
        if outcome.new_record {
            println!("NEW HIGH SCORE!");
        }
        if let Some(rank) = outcome.rank {
            println!("Leaderboard rank #{rank}");
        }
        self.autosave()
    }

    fn scores(&self) {
        let board = self.store.arcade_scores();
        if board.is_empty() {
            println!("No scores yet. Type 'arcade' to play.");
            return;
        }
        for (i, entry) in board.entries.iter().enumerate() {
            println!("{:>2}. {:>6}  {}", i + 1, entry.score, entry.player);
        }
    }

    fn games(&self) {
        for game in self.store.games() {
            println!(
                "#{:<3} {:<16} {:<14} HIGH SCORE: {}",
                game.id,
                game.name,
                game.game_type.as_str(),
                game.high_score
            );
        }
    }

    fn memories(&self, arg: &str) {
        let filter = match arg {
            "" | "all" => MemoryFilter::All,
            other => match MemoryCategory::parse(other) {
                Some(category) => MemoryFilter::Category(category),
                None => {
                    println!("Unknown category: {other}");
                    return;
                }
            },
        };
        for memory in self.store.memories(filter) {
            let star = if memory.is_favorite { "*" } else { " " };
            println!(
                "{star}#{:<3} [{}] {}",
                memory.id,
                memory.category.as_str().to_uppercase(),
                memory.title
            );
            println!("      {}", memory.content);
        }
    }

    fn remember(&mut self, arg: &str) -> Result<()> {
        let (category, rest) = arg.split_once(' ').unwrap_or((arg, ""));
        let (category, rest) = match MemoryCategory::parse(category) {
            Some(c) => (c, rest),
            None => (MemoryCategory::General, arg),
        };
        let (title, content) = rest.split_once('|').unwrap_or((rest, ""));
        let id = self
            .store
            .add_memory(title.trim(), content.trim(), category)?;
        println!("Saved memory #{id}");
        self.autosave()
    }

    fn show_settings(&self) {
        let s = &self.settings;
        println!("username            {}", s.display_name());
        println!("blink_rate          {:.1}s", s.terminal_blink_rate);
        println!("theme               {}", s.theme_variant.as_str().to_uppercase());
        println!("sound               {}", on_off(s.sound_enabled));
        println!("autosave            {}", on_off(s.auto_save));
    }

    fn set(&mut self, arg: &str) -> Result<()> {
        let (key, value) = arg.split_once(' ').unwrap_or((arg, ""));
        let value = value.trim();
        let s = &mut self.settings;
        match key {
            "username" => s.username = value.to_string(),
            "blink_rate" => match value.parse::<f64>() {
                Ok(v) => s.set_blink_rate(v),
                Err(_) => {
                    println!("blink_rate expects seconds, e.g. 0.5");
                    return Ok(());
                }
            },
            "theme" => match ThemeVariant::parse(value) {
                Some(theme) => s.theme_variant = theme,
                None => {
                    println!("Themes: classic, neon, retro, teenage");
                    return Ok(());
                }
            },
            "sound" => s.sound_enabled = parse_switch(value),
            "autosave" => s.auto_save = parse_switch(value),
            _ => {
                println!("Unknown setting: {key}");
                return Ok(());
            }
        }
        self.settings.save(&self.settings_path)?;
        self.show_settings();
        Ok(())
    }
}

fn culture(arg: &str) {
    let sections = match CultureSection::parse(arg) {
        Some(section) => vec![section],
        None => CultureSection::ALL.to_vec(),
    };
    for section in sections {
        println!("== {} ==", section.heading());
        for entry in section.entries() {
            println!("  {}", entry.title);
            println!("    {}", entry.description);
        }
    }
}

fn parse_id(arg: &str) -> Result<u64> {
    arg.parse()
        .map_err(|_| atrium::AtriumError::InvalidRecord(format!("not a record id: {arg:?}")))
}

fn parse_switch(value: &str) -> bool {
    matches!(value.to_lowercase().as_str(), "on" | "true" | "yes" | "1")
}

fn on_off(value: bool) -> &'static str {
    if value { "ON" } else { "OFF" }
}

fn run() -> Result<()> {
    let data_dir = std::env::var_os(DATA_DIR_ENV)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(DEFAULT_DATA_DIR));
    log::info!("Data directory: {}", data_dir.display());

    let mut app = App::open(&data_dir)?;
    for line in app.terminal.lines() {
        println!("{line}");
    }

    let stdin = io::stdin();
    loop {
        print!("{} ", atrium::terminal::PROMPT);
        io::stdout().flush().ok();

        let mut line = String::new();
        match stdin.lock().read_line(&mut line) {
            Ok(0) => break,
            Ok(_) => {}
            Err(e) => {
                log::error!("stdin: {e}");
                break;
            }
        }

        match app.handle(&line) {
            Ok(true) => {}
            Ok(false) => break,
            Err(e) => println!("ERROR: {e}"),
        }
    }

    // With auto-save off, unsaved changes are dropped on exit
    app.autosave()
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    if let Err(e) = run() {
        log::error!("{e}");
        std::process::exit(1);
    }
}

#[cfg(target_arch = "wasm32")]
fn main() {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exit_save_follows_auto_save() {
        let dir = tempfile::tempdir().unwrap();
        let store_path = dir.path().join("store.json");

        let mut app = App::open(dir.path()).unwrap();
        app.settings.auto_save = false;
        app.store.new_game();
        app.autosave().unwrap();
        assert!(!store_path.exists());

        app.settings.auto_save = true;
        app.autosave().unwrap();
        let reopened = Store::open(&store_path).unwrap();
        assert_eq!(reopened.games().len(), 1);
    }

    #[test]
    fn test_set_autosave_off_skips_store_writes() {
        let dir = tempfile::tempdir().unwrap();
        let mut app = App::open(dir.path()).unwrap();
        assert!(app.handle("set autosave off").unwrap());
        assert!(app.handle("addgame galaga").unwrap());
        assert!(!dir.path().join("store.json").exists());
        assert!(!Settings::load(&app.settings_path).auto_save);
    }
}

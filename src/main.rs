mod ai;
mod audio;
mod config;
mod debug;
mod game;
mod game_modes;
mod menu;
mod ui;

use anyhow::{Context, Result};
use crossterm::{
    event::{
        KeyboardEnhancementFlags, PopKeyboardEnhancementFlags, PushKeyboardEnhancementFlags,
    },
    execute,
    terminal::{
        disable_raw_mode, enable_raw_mode, supports_keyboard_enhancement, EnterAlternateScreen,
        LeaveAlternateScreen,
    },
};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io::{self, Stdout};
use tracing::{info, warn};

use audio::{AudioEngine, AudioSink, Silent};
use config::{AiSettings, Config, FileSettings};
use menu::{AppState, MenuAction, MenuKeys, MenuState};

const SETTINGS_FILE: &str = "settings.toml";

/// Command line options
#[derive(Debug, Default, PartialEq, Eq)]
struct Options {
    debug: bool,
    mute: bool,
}

/// Parse command line arguments. `Ok(None)` means usage was printed and we should exit.
fn parse_args(args: &[String]) -> Result<Option<Options>> {
    let mut options = Options::default();
    for arg in args.iter().skip(1) {
        match arg.as_str() {
            "--debug" | "-d" => options.debug = true,
            "--mute" | "-m" => options.mute = true,
            "--help" | "-h" => {
                print_usage(args.first().map(String::as_str).unwrap_or("tickpong"));
                return Ok(None);
            }
            other => anyhow::bail!("unknown argument: {} (try --help)", other),
        }
    }
    Ok(Some(options))
}

fn print_usage(program: &str) {
    println!("Tickpong - two-paddle terminal Pong, first to ten");
    println!();
    println!("Usage:");
    println!("  {} [--debug] [--mute]", program);
    println!();
    println!("Options:");
    println!("  -d, --debug   Write a log to {}", debug::log_file_path().display());
    println!("  -m, --mute    Start without sound");
    println!("  -h, --help    Show this message");
    println!();
    println!("Config: {}", config::loader::get_config_path().display());
}

/// Raw mode and the alternate screen, undone on drop even if the game loop errors
struct TerminalGuard {
    terminal: Terminal<CrosstermBackend<Stdout>>,
    enhanced_keys: bool,
}

impl TerminalGuard {
    fn enter() -> Result<Self> {
        enable_raw_mode().context("enabling raw mode")?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen)?;

        // Key release events make held paddles exact. Not every terminal has them.
        let enhanced_keys = matches!(supports_keyboard_enhancement(), Ok(true));
        if enhanced_keys {
            execute!(
                stdout,
                PushKeyboardEnhancementFlags(KeyboardEnhancementFlags::REPORT_EVENT_TYPES)
            )?;
        }
        info!(enhanced_keys, "terminal ready");

        let terminal = Terminal::new(CrosstermBackend::new(stdout))?;
        Ok(Self {
            terminal,
            enhanced_keys,
        })
    }
}

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        if self.enhanced_keys {
            let _ = execute!(self.terminal.backend_mut(), PopKeyboardEnhancementFlags);
        }
        let _ = disable_raw_mode();
        let _ = execute!(self.terminal.backend_mut(), LeaveAlternateScreen);
        let _ = self.terminal.show_cursor();
    }
}

fn audio_sink(config: &Config, mute: bool) -> Box<dyn AudioSink> {
    if mute || !config.audio.enabled {
        info!("sound off");
        Box::new(Silent)
    } else {
        Box::new(AudioEngine::new(config.audio.master_volume))
    }
}

fn main() -> Result<()> {
    let args: Vec<String> = std::env::args().collect();
    let Some(options) = parse_args(&args)? else {
        return Ok(());
    };

    debug::init(options.debug)?;
    info!(?options, "tickpong starting");

    let config = config::load_config().unwrap_or_else(|e| {
        warn!("failed to load config, using defaults: {:#}", e);
        Config::default()
    });
    let mut settings = FileSettings::open(config::get_config_dir().join(SETTINGS_FILE));
    let mut audio = audio_sink(&config, options.mute);

    let mut guard = TerminalGuard::enter()?;
    let result = run(&mut guard, &config, &mut settings, audio.as_mut());
    drop(guard);

    if let Err(e) = &result {
        warn!("exiting with error: {:#}", e);
    }
    result
}

/// Menu and match loop
fn run(
    guard: &mut TerminalGuard,
    config: &Config,
    settings: &mut FileSettings,
    audio: &mut dyn AudioSink,
) -> Result<()> {
    let keys = MenuKeys::from_bindings(&config.keybindings);
    let mut menu_state = MenuState::new(AiSettings::load(&*settings));
    let mut app_state = AppState::Menu;

    loop {
        app_state = match app_state {
            AppState::Menu => {
                guard
                    .terminal
                    .draw(|f| menu::render_menu(f, &menu_state))?;
                match menu::handle_menu_input(&mut menu_state, &keys, settings)? {
                    MenuAction::None => AppState::Menu,
                    MenuAction::StartGame => AppState::Game,
                    MenuAction::Quit => AppState::Exiting,
                }
            }
            AppState::Game => {
                game_modes::run_game_local(
                    &mut guard.terminal,
                    config,
                    menu_state.ai,
                    audio,
                    guard.enhanced_keys,
                )?;
                AppState::Menu
            }
            AppState::Exiting => {
                info!("goodbye");
                return Ok(());
            }
        };
    }
}

use anyhow::Result;
use clap::{Parser, ValueEnum};
use gridquest_core::environment::Environment;
use gridquest_core::{Action, ParseActionError, Ruleset};
use ratatui::{
    crossterm::{
        event::{self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEventKind},
        execute,
        terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
    },
    prelude::*,
    widgets::*,
};
use std::{
    io::{self, Stdout},
    path::PathBuf,
};

#[derive(Debug, Clone, Copy, ValueEnum)]
enum RulesArg {
    /// Traps end the episode; difficulty level selects active tiles.
    SingleLife,
    /// Traps send the player back to spawn; no coins.
    Respawn,
}

#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Map file to load
    #[arg(short, long, value_name = "MAP_FILE")]
    map: Option<PathBuf>,

    /// Which rule set to play under
    #[arg(short, long, value_enum, default_value_t = RulesArg::SingleLife)]
    rules: RulesArg,

    /// Difficulty level (single-life rules only): 0 = no coins or traps,
    /// 1 = coins, 2 = coins and traps
    #[arg(short, long, default_value_t = 2)]
    level: u8,
}

struct App {
    /// The core game environment.
    environment: Environment,
    /// Flag to control the main loop.
    should_quit: bool,
    /// Message shown in the status line (rejections, final score).
    status: String,
}

impl App {
    fn new(environment: Environment) -> Self {
        App {
            environment,
            should_quit: false,
            status: String::from("Arrow keys or wasd to move, 'q' to quit."),
        }
    }

    fn game_over(&self) -> bool {
        self.environment.finished() || self.environment.available_actions().is_empty()
    }

    /// Forwards one accepted action to the environment.
    fn step(&mut self, action: Action) {
        if self.game_over() {
            return;
        }
        self.environment.execute(action);
        if self.game_over() {
            self.status = format!("Game over! Final score: {}", self.environment.score());
        } else {
            self.status.clear();
        }
    }

    /// Reports an input that is not one of the four action tokens.
    fn reject(&mut self, token: String) {
        self.status = ParseActionError(token).to_string();
    }

    /// Sets the quit flag.
    fn quit(&mut self) {
        self.should_quit = true;
    }
}

fn main() -> Result<()> {
    // Parse command line arguments
    let args = Args::parse();
    let rules = match args.rules {
        RulesArg::SingleLife => Ruleset::single_life(args.level),
        RulesArg::Respawn => Ruleset::respawn(),
    };
    // If no map file is provided, use the default map
    let map_file = args.map.unwrap_or(PathBuf::from("maps/map01.txt"));

    let environment = Environment::from_map_file(&map_file, rules)?;

    // Set up the terminal
    let mut terminal = setup_terminal()?;

    // Create the application state
    let mut app = App::new(environment);

    // Run the main application loop
    let result = run_app(&mut terminal, &mut app);

    // Restore the terminal state
    restore_terminal(&mut terminal)?;

    result
}

/// Configures the terminal for TUI interaction.
fn setup_terminal() -> Result<Terminal<CrosstermBackend<Stdout>>> {
    let mut stdout = io::stdout();
    enable_raw_mode()?; // Put terminal in raw mode
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?; // Use alternate screen and enable mouse capture
    let backend = CrosstermBackend::new(stdout);
    Terminal::new(backend).map_err(Into::into) // Map io::Error to anyhow::Error
}

/// Restores the terminal to its original state.
fn restore_terminal(terminal: &mut Terminal<CrosstermBackend<Stdout>>) -> Result<()> {
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;
    Ok(())
}

/// Runs the main loop of the TUI application.
fn run_app(terminal: &mut Terminal<CrosstermBackend<Stdout>>, app: &mut App) -> Result<()> {
    loop {
        // Draw the UI
        terminal.draw(|f| ui(f, app))?;

        // One turn per key press: the game blocks until input arrives.
        if let Event::Key(key) = event::read()? {
            if key.kind != KeyEventKind::Press {
                continue;
            }
            match key.code {
                KeyCode::Char('q') | KeyCode::Esc => app.quit(),
                KeyCode::Up | KeyCode::Char('w') => app.step(Action::Up),
                KeyCode::Down | KeyCode::Char('s') => app.step(Action::Down),
                KeyCode::Left | KeyCode::Char('a') => app.step(Action::Left),
                KeyCode::Right | KeyCode::Char('d') => app.step(Action::Right),
                KeyCode::Char(other) => app.reject(other.to_string()),
                _ => {}
            }
        }

        // Exit loop if requested
        if app.should_quit {
            break;
        }
    }
    Ok(())
}

/// Renders the user interface.
fn ui(frame: &mut Frame, app: &App) {
    let main_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(3),    // Area for the map
            Constraint::Length(3), // Area for score and status
            Constraint::Length(1), // Area for help
        ])
        .split(frame.area());

    // Render the map
    render_map(frame, main_layout[0], &app.environment);

    // Render the score and status line
    render_status(frame, main_layout[1], app);

    // Render help text
    let help_text = Paragraph::new("Press 'q' or 'Esc' to quit.").alignment(Alignment::Center);
    frame.render_widget(help_text, main_layout[2]);
}

/// Renders the score line and any pending status message.
fn render_status(frame: &mut Frame, area: Rect, app: &App) {
    let env = &app.environment;
    let state = if env.finished() {
        Span::styled("finished", Style::default().fg(Color::Green).bold())
    } else if env.available_actions().is_empty() {
        Span::styled("stuck", Style::default().fg(Color::Red).bold())
    } else {
        Span::raw("playing")
    };
    let line = Line::from(vec![
        Span::raw(format!("Score: {}  ", env.score())),
        state,
        Span::raw(format!("  {}", app.status)),
    ]);
    let status_widget =
        Paragraph::new(line).block(Block::default().borders(Borders::ALL).title("Status"));
    frame.render_widget(status_widget, area);
}

/// Renders the game map onto the frame, player overlaid on its tile.
fn render_map(frame: &mut Frame, area: Rect, environment: &Environment) {
    let map = environment.map();

    let mut lines: Vec<Line> = Vec::with_capacity(map.height());
    for y in 0..map.height() {
        let mut spans: Vec<Span> = Vec::with_capacity(map.width());
        for x in 0..map.width() {
            let ch = environment.render_char(x, y);
            let style = match ch {
                'P' => Style::default().fg(Color::Red).bold(),
                '#' => Style::default().fg(Color::DarkGray),
                'C' => Style::default().fg(Color::Yellow),
                'X' => Style::default().fg(Color::Magenta),
                'G' => Style::default().fg(Color::Green),
                _ => Style::default(),
            };
            spans.push(Span::styled(ch.to_string(), style));
        }
        lines.push(Line::from(spans));
    }

    let map_paragraph = Paragraph::new(lines)
        .block(Block::default().title("Grid Quest").borders(Borders::ALL))
        .alignment(Alignment::Center);

    frame.render_widget(map_paragraph, area);
}

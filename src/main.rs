//! Terminal dashboard for browsing projects and their tasks.

mod app;
mod error;
mod project;
mod route;
mod store;
mod task;
mod theme;
mod ui;
mod view;

use std::{error::Error, fs, io, path::PathBuf, sync::Mutex};

use clap::Parser;
use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use tracing::info;
use tracing_subscriber::EnvFilter;

use app::App;
use error::DashboardError;
use route::Route;
use store::ProjectStore;

#[derive(Parser)]
#[command(name = "projdash")]
#[command(about = "Browse projects, their tasks, team and timeline")]
#[command(version)]
struct Cli {
    /// JSON dataset to browse instead of the built-in sample projects
    #[arg(short, long)]
    data: Option<PathBuf>,

    /// Initial route, e.g. "/" or "/project/3"
    #[arg(short, long, default_value = "/")]
    route: String,

    /// Where to write logs (the terminal is taken by the UI)
    #[arg(long, default_value = "/tmp/projdash.log")]
    log_file: PathBuf,

    /// Log filter, overridden by RUST_LOG
    #[arg(long, default_value = "projdash=info")]
    log_level: String,
}

fn main() -> Result<(), Box<dyn Error>> {
    let cli = Cli::parse();
    init_tracing(&cli)?;

    let store = match &cli.data {
        Some(path) => ProjectStore::load_from_file(path)?,
        None => ProjectStore::reference()?,
    };
    let source = cli
        .data
        .as_ref()
        .map_or_else(|| "built-in".to_string(), |p| p.display().to_string());
    info!(
        source = %source,
        projects = store.list_projects().len(),
        tasks = store.task_count(),
        "loaded projects"
    );

    // Terminal setup
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let mut app = App::new(&store, Route::parse(&cli.route));
    let result = ui::run_app(&mut terminal, &mut app);

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    info!("shutdown");
    result.map_err(DashboardError::Terminal)?;
    Ok(())
}

fn init_tracing(cli: &Cli) -> Result<(), DashboardError> {
    let file = fs::File::create(&cli.log_file).map_err(|source| DashboardError::LogFile {
        path: cli.log_file.clone(),
        source,
    })?;
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&cli.log_level));
    tracing_subscriber::fmt()
        .with_writer(Mutex::new(file))
        .with_env_filter(filter)
        .with_ansi(false)
        .init();
    Ok(())
}

use crate::app::App;
use crate::project::{initials, Project, TaskStats};
use crate::task::Task;
use crate::theme;
use crate::view::{DetailView, EmptyState};
use chrono::{DateTime, NaiveDate, Utc};
use crossterm::event::{self, Event, KeyEventKind};
use ratatui::{
    backend::Backend,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Gauge, List, ListItem, ListState, Paragraph, Wrap},
    Frame, Terminal,
};
use std::io;

const LIST_HELP: &str = " type: search | ↑/↓: select | Enter: open | Esc: clear/quit ";
const DETAIL_HELP: &str = " Esc/b: back | ↑/↓: scroll | q: quit ";

pub fn run_app<B: Backend>(terminal: &mut Terminal<B>, app: &mut App) -> io::Result<()> {
    loop {
        terminal.draw(|f| render(f, app, Utc::now()))?;

        if let Event::Key(key) = event::read()? {
            if key.kind == KeyEventKind::Press {
                app.handle_key(key);
            }
        }

        if app.should_quit() {
            return Ok(());
        }
    }
}

pub fn render(f: &mut Frame, app: &App, now: DateTime<Utc>) {
    let frame_block = Block::default()
        .title(format!(" {} ", app.title()))
        .title_style(Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD))
        .borders(Borders::ALL);
    let inner = frame_block.inner(f.area());
    f.render_widget(frame_block, f.area());

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints(vec![Constraint::Min(0), Constraint::Length(1)])
        .split(inner);

    if app.route().is_list() {
        render_list(f, chunks[0], app);
        render_footer(f, chunks[1], LIST_HELP);
    } else {
        match app.detail() {
            DetailView::Found { project, stats } => {
                render_detail(f, chunks[0], project, stats, app.detail_scroll(), now)
            }
            DetailView::NotFound => render_not_found(f, chunks[0]),
        }
        render_footer(f, chunks[1], DETAIL_HELP);
    }
}

fn render_footer(f: &mut Frame, area: Rect, help: &str) {
    f.render_widget(Paragraph::new(Span::styled(help, theme::muted())), area);
}

fn render_list(f: &mut Frame, area: Rect, app: &App) {
    let list = app.list();
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints(vec![Constraint::Length(2), Constraint::Length(3), Constraint::Min(0)])
        .split(area);

    let header = vec![
        Line::from(vec![
            Span::styled("Projects", Style::default().add_modifier(Modifier::BOLD)),
            Span::styled("   [+ New Project]", theme::muted()),
        ]),
        Line::from(Span::styled(format!("{} projects", list.count()), theme::muted())),
    ];
    f.render_widget(Paragraph::new(header), chunks[0]);

    let search = if list.query().is_empty() {
        Line::from(Span::styled("Search projects...", theme::muted()))
    } else {
        Line::from(list.query())
    };
    f.render_widget(
        Paragraph::new(search).block(
            Block::default()
                .title("Search")
                .borders(Borders::ALL)
                .border_style(theme::focused_border()),
        ),
        chunks[1],
    );

    if let Some(empty) = list.empty_state() {
        render_empty(f, chunks[2], &empty);
        return;
    }

    let items: Vec<ListItem> = list.projects().into_iter().map(project_card).collect();
    let cards = List::new(items)
        .block(Block::default().borders(Borders::ALL))
        .highlight_style(Style::default().add_modifier(Modifier::BOLD | Modifier::REVERSED))
        .highlight_symbol("> ");
    let mut state = ListState::default().with_selected(Some(list.selected()));
    f.render_stateful_widget(cards, chunks[2], &mut state);
}

fn project_card(project: &Project) -> ListItem<'_> {
    let stats = project.task_stats();
    ListItem::new(vec![
        Line::from(vec![
            Span::styled(&project.name, Style::default().add_modifier(Modifier::BOLD)),
            Span::raw(" "),
            Span::styled(
                format!(" {} ", theme::project_status_label(project.status)),
                theme::badge(theme::project_status_color(project.status)),
            ),
        ]),
        Line::from(Span::styled(&project.description, theme::muted())),
        Line::from(vec![
            Span::raw(format!("Progress {}%", project.progress)),
            Span::raw(format!("  {}/{} tasks", stats.completed, stats.total)),
            Span::raw(format!("  {} members", project.team.len())),
            Span::raw(format!("  Due {}", short_date(project.due_date))),
        ]),
        Line::from(""),
    ])
}

fn render_empty(f: &mut Frame, area: Rect, empty: &EmptyState) {
    let mut text = vec![
        Line::from(""),
        Line::from(Span::styled(empty.title(), Style::default().add_modifier(Modifier::BOLD))),
        Line::from(""),
        Line::from(empty.message()),
    ];
    if let Some(hint) = empty.hint() {
        text.push(Line::from(""));
        text.push(Line::from(Span::styled(hint, theme::muted())));
    }
    f.render_widget(
        Paragraph::new(text)
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: true })
            .block(Block::default().borders(Borders::ALL)),
        area,
    );
}

fn render_not_found(f: &mut Frame, area: Rect) {
    let text = vec![
        Line::from(""),
        Line::from(Span::styled(
            "Project Not Found",
            Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from("The project you're looking for doesn't exist or has been removed."),
        Line::from(""),
        Line::from(Span::styled(
            "[ Enter: Back to Projects ]",
            theme::focused_border().add_modifier(Modifier::BOLD),
        )),
    ];
    f.render_widget(
        Paragraph::new(text)
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: true })
            .block(Block::default().borders(Borders::ALL)),
        area,
    );
}

fn render_detail(
    f: &mut Frame,
    area: Rect,
    project: &Project,
    stats: TaskStats,
    scroll: u16,
    now: DateTime<Utc>,
) {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints(vec![Constraint::Length(3), Constraint::Min(0)])
        .split(area);

    let header = vec![
        Line::from(vec![
            Span::styled(&project.name, Style::default().add_modifier(Modifier::BOLD)),
            Span::raw("  "),
            Span::styled(
                format!(" {} ", theme::project_status_label(project.status)),
                theme::badge(theme::project_status_color(project.status)),
            ),
            Span::raw(" "),
            Span::styled(
                format!("{} priority", theme::priority_label(project.priority)),
                Style::default().fg(theme::priority_color(project.priority)),
            ),
        ]),
        Line::from(Span::styled(&project.description, theme::muted())),
    ];
    f.render_widget(Paragraph::new(header).wrap(Wrap { trim: true }), rows[0]);

    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints(vec![Constraint::Percentage(65), Constraint::Percentage(35)])
        .split(rows[1]);

    f.render_widget(
        Paragraph::new(task_pane_lines(project, stats))
            .scroll((scroll, 0))
            .block(Block::default().title("Tasks  [+ Add Task]").borders(Borders::ALL)),
        columns[0],
    );

    let sidebar = Layout::default()
        .direction(Direction::Vertical)
        .constraints(vec![
            Constraint::Length(3),
            Constraint::Length(5),
            Constraint::Length(4),
            Constraint::Min(0),
        ])
        .split(columns[1]);

    let gauge = Gauge::default()
        .block(Block::default().title("Progress").borders(Borders::ALL))
        .gauge_style(Style::default().fg(Color::Cyan))
        .percent(u16::from(project.progress));
    f.render_widget(gauge, sidebar[0]);

    let counts = vec![
        Line::from(format!("Completed    {} tasks", stats.completed)),
        Line::from(format!("In Progress  {} tasks", stats.in_progress)),
        Line::from(format!("To Do        {} tasks", stats.todo)),
    ];
    f.render_widget(
        Paragraph::new(counts).block(Block::default().title("Tasks by status").borders(Borders::ALL)),
        sidebar[1],
    );

    let timeline = vec![
        Line::from(format!("Due Date        {}", long_date(project.due_date))),
        Line::from(format!("Days Remaining  {} days", project.days_remaining(now))),
    ];
    f.render_widget(
        Paragraph::new(timeline).block(Block::default().title("Timeline").borders(Borders::ALL)),
        sidebar[2],
    );

    let team: Vec<ListItem> = project
        .team
        .iter()
        .map(|member| {
            ListItem::new(Line::from(vec![
                Span::styled(format!("{:>3} ", initials(member)), Style::default().fg(Color::Cyan)),
                Span::raw(member.as_str()),
            ]))
        })
        .collect();
    f.render_widget(
        List::new(team).block(
            Block::default()
                .title(format!("Team ({} members)", project.team.len()))
                .borders(Borders::ALL),
        ),
        sidebar[3],
    );
}

/// Contents of the scrollable task pane on the detail view.
pub fn task_pane_lines(project: &Project, stats: TaskStats) -> Vec<Line<'_>> {
    let mut lines = vec![Line::from(Span::styled(
        format!(
            "{} total • {} completed • {} in progress",
            stats.total, stats.completed, stats.in_progress
        ),
        theme::muted(),
    ))];
    lines.push(Line::from(""));
    if project.tasks.is_empty() {
        lines.push(Line::from("No tasks yet"));
    }
    for task in &project.tasks {
        lines.extend(task_lines(task));
    }
    lines
}

fn task_lines(task: &Task) -> Vec<Line<'_>> {
    let mut meta = vec![
        Span::styled(
            format!("  {} ", initials(&task.assignee)),
            Style::default().fg(Color::Cyan),
        ),
        Span::raw(task.assignee_first_name()),
        Span::raw(format!("  {}", short_date(task.due_date))),
    ];
    if let Some(tag) = task.primary_tag() {
        meta.push(Span::raw(format!("  #{tag}")));
        if task.extra_tag_count() > 0 {
            meta.push(Span::styled(format!(" +{}", task.extra_tag_count()), theme::muted()));
        }
    }

    vec![
        Line::from(vec![
            Span::styled(
                format!(" {} ", theme::task_status_label(task.status)),
                theme::badge(theme::task_status_color(task.status)),
            ),
            Span::raw(" "),
            Span::styled(&task.title, Style::default().add_modifier(Modifier::BOLD)),
            Span::raw(" "),
            Span::styled(
                format!("[{}]", theme::priority_label(task.priority)),
                Style::default().fg(theme::priority_color(task.priority)),
            ),
        ]),
        Line::from(Span::styled(format!("  {}", task.description), theme::muted())),
        Line::from(meta),
        Line::from(""),
    ]
}

/// "Dec 15"
fn short_date(date: NaiveDate) -> String {
    date.format("%b %-d").to_string()
}

/// "December 15, 2025"
fn long_date(date: NaiveDate) -> String {
    date.format("%B %-d, %Y").to_string()
}

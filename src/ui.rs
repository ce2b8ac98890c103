use anyhow::Result;
use crossterm::{
    event::{self, Event, KeyCode, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph},
    Frame, Terminal,
};
use sales_report::{ReportKind, Session, TableSource, TopN, DEFAULT_TOP_N};
use std::io;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuItem {
    LoadData,
    Overview,
    TopProducts,
    ByCategory,
    TopCustomers,
    PaymentMethods,
    ByMonth,
    FullAnalysis,
    Quit,
}

impl MenuItem {
    pub const ALL: [MenuItem; 9] = [
        MenuItem::LoadData,
        MenuItem::Overview,
        MenuItem::TopProducts,
        MenuItem::ByCategory,
        MenuItem::TopCustomers,
        MenuItem::PaymentMethods,
        MenuItem::ByMonth,
        MenuItem::FullAnalysis,
        MenuItem::Quit,
    ];

    pub fn title(&self) -> &str {
        match self {
            MenuItem::LoadData => "Load sales data",
            MenuItem::Overview => "Overview",
            MenuItem::TopProducts => "Best-selling products",
            MenuItem::ByCategory => "Sales by category",
            MenuItem::TopCustomers => "Most active customers",
            MenuItem::PaymentMethods => "Payment methods",
            MenuItem::ByMonth => "Sales by month",
            MenuItem::FullAnalysis => "Full analysis",
            MenuItem::Quit => "Quit",
        }
    }

    /// Menu entry for a 1-9 shortcut key
    pub fn from_digit(c: char) -> Option<MenuItem> {
        let n = c.to_digit(10)? as usize;
        n.checked_sub(1).and_then(|i| MenuItem::ALL.get(i).copied())
    }
}

/// A pending "how many rows?" question for a ranking report
#[derive(Debug, Clone, PartialEq)]
pub struct TopNPrompt {
    pub item: MenuItem,
    pub buffer: String,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Status {
    Info(String),
    Error(String),
}

pub struct App<S: TableSource> {
    pub source: S,
    pub session: Session,
    pub menu_state: ListState,
    pub output: String,
    pub scroll: u16,
    pub prompt: Option<TopNPrompt>,
    pub status: Status,
    pub should_quit: bool,
}

impl<S: TableSource> App<S> {
    pub fn new(source: S) -> Self {
        let mut menu_state = ListState::default();
        menu_state.select(Some(0));

        Self {
            source,
            session: Session::new(),
            menu_state,
            output: String::new(),
            scroll: 0,
            prompt: None,
            status: Status::Info("Select an option (1-9)".to_string()),
            should_quit: false,
        }
    }

    pub fn selected_item(&self) -> MenuItem {
        let i = self.menu_state.selected().unwrap_or(0);
        MenuItem::ALL[i.min(MenuItem::ALL.len() - 1)]
    }

    pub fn next(&mut self) {
        let len = MenuItem::ALL.len();
        let i = match self.menu_state.selected() {
            Some(i) if i >= len - 1 => 0,
            Some(i) => i + 1,
            None => 0,
        };
        self.menu_state.select(Some(i));
    }

    pub fn previous(&mut self) {
        let len = MenuItem::ALL.len();
        let i = match self.menu_state.selected() {
            Some(0) | None => len - 1,
            Some(i) => i - 1,
        };
        self.menu_state.select(Some(i));
    }

    pub fn scroll_down(&mut self) {
        let lines = self.output.lines().count() as u16;
        self.scroll = (self.scroll + 10).min(lines.saturating_sub(1));
    }

    pub fn scroll_up(&mut self) {
        self.scroll = self.scroll.saturating_sub(10);
    }

    /// Activate a menu entry
    pub fn activate(&mut self, item: MenuItem) {
        if let Some(i) = MenuItem::ALL.iter().position(|m| *m == item) {
            self.menu_state.select(Some(i));
        }

        match item {
            MenuItem::LoadData => self.load_data(),
            MenuItem::TopProducts | MenuItem::TopCustomers => {
                self.prompt = Some(TopNPrompt {
                    item,
                    buffer: String::new(),
                });
                self.status = Status::Info(format!(
                    "How many rows? (default {}) - Enter to confirm",
                    DEFAULT_TOP_N
                ));
            }
            MenuItem::Overview => self.show(ReportKind::Overview),
            MenuItem::ByCategory => self.show(ReportKind::ByCategory),
            MenuItem::PaymentMethods => self.show(ReportKind::PaymentMethods),
            MenuItem::ByMonth => self.show(ReportKind::ByMonth),
            MenuItem::FullAnalysis => self.full_analysis(),
            MenuItem::Quit => self.should_quit = true,
        }
    }

    /// Close the top-N prompt and run its report
    pub fn confirm_prompt(&mut self) {
        if let Some(prompt) = self.prompt.take() {
            let n = TopN::parse(&prompt.buffer);
            match prompt.item {
                MenuItem::TopCustomers => self.show(ReportKind::TopCustomers(n)),
                _ => self.show(ReportKind::TopProducts(n)),
            }
        }
    }

    fn load_data(&mut self) {
        match self.session.load(&self.source) {
            Ok(ready) => {
                self.status = Status::Info(format!(
                    "✓ Data loaded: {} sales, {} lines, {} products, {} customers",
                    ready.headers().len(),
                    ready.lines().len(),
                    ready.products().len(),
                    ready.customers().len()
                ));
            }
            Err(err) => self.status = Status::Error(format!("✗ Error loading data: {}", err)),
        }
    }

    fn show(&mut self, kind: ReportKind) {
        match self.session.run(kind) {
            Ok(text) => {
                self.output = text;
                self.scroll = 0;
                self.status = Status::Info(kind.title().to_string());
            }
            Err(err) => self.status = Status::Error(err.to_string()),
        }
    }

    fn full_analysis(&mut self) {
        match self.session.run_full_analysis(&self.source) {
            Ok(text) => {
                self.output = text;
                self.scroll = 0;
                self.status = Status::Info("Full analysis".to_string());
            }
            Err(err) => self.status = Status::Error(format!("✗ Error loading data: {}", err)),
        }
    }

    /// Apply one key press
    pub fn handle_key(&mut self, code: KeyCode) {
        if let Some(prompt) = self.prompt.as_mut() {
            match code {
                KeyCode::Enter => self.confirm_prompt(),
                KeyCode::Esc => {
                    self.prompt = None;
                    self.status = Status::Info("Cancelled".to_string());
                }
                KeyCode::Backspace => {
                    prompt.buffer.pop();
                }
                KeyCode::Char(c) => prompt.buffer.push(c),
                _ => {}
            }
            return;
        }

        match code {
            KeyCode::Char('q') | KeyCode::Esc => self.should_quit = true,
            KeyCode::Enter => self.activate(self.selected_item()),
            KeyCode::Char(c) if c.is_ascii_digit() => {
                if let Some(item) = MenuItem::from_digit(c) {
                    self.activate(item);
                }
            }
            KeyCode::Down | KeyCode::Char('j') => self.next(),
            KeyCode::Up | KeyCode::Char('k') => self.previous(),
            KeyCode::PageDown => self.scroll_down(),
            KeyCode::PageUp => self.scroll_up(),
            _ => {}
        }
    }
}

pub fn run_ui<S: TableSource>(app: &mut App<S>) -> Result<()> {
    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Run the app
    let res = run_app(&mut terminal, app);

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    res?;
    Ok(())
}

fn run_app<B: ratatui::backend::Backend, S: TableSource>(
    terminal: &mut Terminal<B>,
    app: &mut App<S>,
) -> io::Result<()> {
    while !app.should_quit {
        terminal.draw(|f| ui(f, app))?;

        if let Event::Key(key) = event::read()? {
            if key.kind == KeyEventKind::Press {
                app.handle_key(key.code);
            }
        }
    }
    Ok(())
}

fn ui<S: TableSource>(f: &mut Frame, app: &mut App<S>) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Header
            Constraint::Min(0),    // Menu + report
            Constraint::Length(3), // Status bar
        ])
        .split(f.size());

    render_header(f, chunks[0], app);

    let content_chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Length(32), Constraint::Min(0)])
        .split(chunks[1]);

    render_menu(f, content_chunks[0], app);
    render_report(f, content_chunks[1], app);
    render_status_bar(f, chunks[2], app);
}

fn render_header<S: TableSource>(f: &mut Frame, area: Rect, app: &App<S>) {
    let mut spans = vec![Span::styled(
        "SALES ANALYSIS SYSTEM",
        Style::default()
            .fg(Color::Yellow)
            .add_modifier(Modifier::BOLD),
    )];

    spans.push(Span::raw("  |  "));
    match app.session.ready() {
        Some(ready) => spans.push(Span::styled(
            format!(
                "{} sales · {} customers · {} products",
                ready.headers().len(),
                ready.customers().len(),
                ready.products().len()
            ),
            Style::default().fg(Color::Green),
        )),
        None => spans.push(Span::styled(
            "no data loaded",
            Style::default().fg(Color::DarkGray),
        )),
    }

    let header = Paragraph::new(vec![Line::from(spans)])
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Cyan)),
        );

    f.render_widget(header, area);
}

fn render_menu<S: TableSource>(f: &mut Frame, area: Rect, app: &mut App<S>) {
    let items: Vec<ListItem> = MenuItem::ALL
        .iter()
        .enumerate()
        .map(|(i, item)| {
            ListItem::new(Line::from(vec![
                Span::styled(format!("{}", i + 1), Style::default().fg(Color::Yellow)),
                Span::raw(format!(". {}", item.title())),
            ]))
        })
        .collect();

    let list = List::new(items)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::White))
                .title(" Menu "),
        )
        .highlight_style(
            Style::default()
                .bg(Color::DarkGray)
                .add_modifier(Modifier::BOLD),
        )
        .highlight_symbol("→ ");

    f.render_stateful_widget(list, area, &mut app.menu_state);
}

fn render_report<S: TableSource>(f: &mut Frame, area: Rect, app: &App<S>) {
    let text = match &app.prompt {
        Some(prompt) => format!(
            "\n  {}\n\n  How many rows? (default {}): {}_",
            prompt.item.title(),
            DEFAULT_TOP_N,
            prompt.buffer
        ),
        None => app.output.clone(),
    };

    let report = Paragraph::new(text)
        .scroll((app.scroll, 0))
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::White))
                .title(" Report "),
        );

    f.render_widget(report, area);
}

fn render_status_bar<S: TableSource>(f: &mut Frame, area: Rect, app: &App<S>) {
    let mut status_spans = match &app.status {
        Status::Info(msg) => vec![Span::styled(
            format!(" {} ", msg),
            Style::default().fg(Color::Cyan),
        )],
        Status::Error(msg) => vec![Span::styled(
            format!(" {} ", msg),
            Style::default().fg(Color::Red),
        )],
    };

    status_spans.push(Span::raw(" | "));
    status_spans.push(Span::styled("1-9", Style::default().fg(Color::Yellow)));
    status_spans.push(Span::raw(" Option | "));
    status_spans.push(Span::styled("↑/↓", Style::default().fg(Color::Yellow)));
    status_spans.push(Span::raw(" Nav | "));
    status_spans.push(Span::styled("PgUp/PgDn", Style::default().fg(Color::Yellow)));
    status_spans.push(Span::raw(" Scroll | "));
    status_spans.push(Span::styled("q", Style::default().fg(Color::Red)));
    status_spans.push(Span::raw(" Quit"));

    let status_bar = Paragraph::new(vec![Line::from(status_spans)]).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::White)),
    );

    f.render_widget(status_bar, area);
}

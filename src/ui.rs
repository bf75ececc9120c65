use anyhow::Result;
use crossterm::{
    event::{self, Event, KeyCode, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ideology_trends::{total, Dashboard, Ideology, TrendChart, YearlyCount};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    symbols,
    text::{Line, Span},
    widgets::{Axis, BarChart, Block, Borders, Chart, Dataset, GraphType, Paragraph},
    Frame, Terminal,
};
use std::io;

pub struct App {
    pub dashboard: Dashboard,
    pub selected: Ideology,
    pub counts: Vec<YearlyCount>,
    pub chart: TrendChart,
}

impl App {
    pub fn new(dashboard: Dashboard) -> Self {
        let selected = dashboard.default_selection();
        let (counts, chart) = dashboard.trend(selected.as_str());

        Self {
            dashboard,
            selected,
            counts,
            chart,
        }
    }

    /// Selector changed: recompute counts and chart.
    pub fn select(&mut self, ideology: Ideology) {
        let (counts, chart) = self.dashboard.trend(ideology.as_str());
        self.selected = ideology;
        self.counts = counts;
        self.chart = chart;
    }

    pub fn next(&mut self) {
        self.select(self.selected.next());
    }

    pub fn previous(&mut self) {
        self.select(self.selected.previous());
    }
}

pub fn run_ui(app: &mut App) -> Result<()> {
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

    if let Err(err) = res {
        println!("Error: {:?}", err);
    }

    Ok(())
}

fn run_app<B: ratatui::backend::Backend>(
    terminal: &mut Terminal<B>,
    app: &mut App,
) -> io::Result<()> {
    loop {
        terminal.draw(|f| ui(f, app))?;

        if let Event::Key(key) = event::read()? {
            if key.kind != KeyEventKind::Press {
                continue;
            }
            match key.code {
                KeyCode::Char('q') | KeyCode::Esc => return Ok(()),
                KeyCode::Right | KeyCode::Tab | KeyCode::Char('l') => app.next(),
                KeyCode::Left | KeyCode::BackTab | KeyCode::Char('h') => app.previous(),
                KeyCode::Char('1') => app.select(Ideology::Leftist),
                KeyCode::Char('2') => app.select(Ideology::Centrist),
                KeyCode::Char('3') => app.select(Ideology::Rightist),
                _ => {}
            }
        }
    }
}

fn ui(f: &mut Frame, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Heading
            Constraint::Length(3), // Selector
            Constraint::Min(0),    // Charts
            Constraint::Length(3), // Status bar
        ])
        .split(f.size());

    let heading = Paragraph::new(Line::from(Span::styled(
        app.dashboard.layout().heading,
        Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
    )))
    .alignment(Alignment::Center)
    .block(Block::default().borders(Borders::ALL));
    f.render_widget(heading, chunks[0]);

    render_selector(f, chunks[1], app);

    if app.chart.is_empty() {
        let empty = Paragraph::new("No data for this selection.")
            .alignment(Alignment::Center)
            .block(Block::default().title(app.chart.title.clone()).borders(Borders::ALL));
        f.render_widget(empty, chunks[2]);
    } else {
        let chart_chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Percentage(60), Constraint::Percentage(40)])
            .split(chunks[2]);

        render_bars(f, chart_chunks[0], app);
        render_trend_line(f, chart_chunks[1], app);
    }

    render_status_bar(f, chunks[3], app);
}

fn render_selector(f: &mut Frame, area: Rect, app: &App) {
    let layout = app.dashboard.layout();

    let mut spans = vec![Span::raw(format!("{} ", layout.selector_label))];
    for (i, ideology) in Ideology::ALL.iter().enumerate() {
        if i > 0 {
            spans.push(Span::raw(" │ "));
        }
        let label = format!("{} {}", i + 1, ideology.label());
        if *ideology == app.selected {
            spans.push(Span::styled(
                format!("[{}]", label),
                Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
            ));
        } else {
            spans.push(Span::styled(label, Style::default().fg(Color::Gray)));
        }
    }

    let selector = Paragraph::new(Line::from(spans)).block(Block::default().borders(Borders::ALL));
    f.render_widget(selector, area);
}

/// How the bar pane fits into the terminal width.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BarLayout {
    /// Oldest years left out when even 1-column bars do not fit
    pub skip: usize,
    pub width: u16,
    pub gap: u16,
}

pub fn bar_layout(bars: usize, inner_width: usize) -> BarLayout {
    if bars == 0 || inner_width == 0 {
        return BarLayout { skip: 0, width: 1, gap: 0 };
    }

    let gap = if bars * 2 <= inner_width { 1 } else { 0 };
    let visible = bars.min(inner_width);
    let width = (inner_width / visible).saturating_sub(gap).clamp(1, 6);

    BarLayout {
        skip: bars - visible,
        width: width as u16,
        gap: gap as u16,
    }
}

fn render_bars(f: &mut Frame, area: Rect, app: &App) {
    let inner_width = area.width.saturating_sub(2) as usize;
    let layout = bar_layout(app.chart.bar.x.len(), inner_width);

    let labels: Vec<String> = app.chart.bar.x.iter().map(|y| y.to_string()).collect();
    let data: Vec<(&str, u64)> = labels
        .iter()
        .zip(app.chart.bar.y.iter())
        .skip(layout.skip)
        .map(|(label, count)| (label.as_str(), *count as u64))
        .collect();

    let title = if layout.skip > 0 {
        format!("{} (last {} years)", app.chart.title, data.len())
    } else {
        app.chart.title.clone()
    };

    let bars = BarChart::default()
        .block(Block::default().title(title).borders(Borders::ALL))
        .data(data.as_slice())
        .bar_width(layout.width)
        .bar_gap(layout.gap)
        .bar_style(Style::default().fg(Color::Blue))
        .value_style(Style::default().fg(Color::White).bg(Color::Blue))
        .label_style(Style::default().fg(Color::Gray));
    f.render_widget(bars, area);
}

fn render_trend_line(f: &mut Frame, area: Rect, app: &App) {
    let points: Vec<(f64, f64)> = app
        .chart
        .line
        .x
        .iter()
        .zip(app.chart.line.y.iter())
        .map(|(x, y)| (*x as f64, *y as f64))
        .collect();

    let first_year = app.chart.line.x.first().copied().unwrap_or(0) as f64;
    let last_year = app.chart.line.x.last().copied().unwrap_or(0) as f64;
    let max = app.chart.max_count().max(1) as f64;

    let datasets = vec![Dataset::default()
        .name(app.chart.line.name.clone())
        .marker(symbols::Marker::Braille)
        .graph_type(GraphType::Line)
        .style(Style::default().fg(Color::Yellow))
        .data(&points)];

    let chart = Chart::new(datasets)
        .block(Block::default().title("Trend").borders(Borders::ALL))
        .x_axis(
            Axis::default()
                .title(app.chart.x_title.clone())
                .style(Style::default().fg(Color::Gray))
                .bounds([first_year, last_year.max(first_year + 1.0)])
                .labels(vec![
                    Span::raw(format!("{}", first_year as i32)),
                    Span::raw(format!("{}", last_year as i32)),
                ]),
        )
        .y_axis(
            Axis::default()
                .title(app.chart.y_title.clone())
                .style(Style::default().fg(Color::Gray))
                .bounds([0.0, max])
                .labels(vec![Span::raw("0"), Span::raw(format!("{}", max as usize))]),
        );
    f.render_widget(chart, area);
}

fn render_status_bar(f: &mut Frame, area: Rect, app: &App) {
    let status = Line::from(vec![
        Span::styled(
            format!(" {} ", app.selected.label()),
            Style::default().fg(Color::Black).bg(Color::Yellow),
        ),
        Span::raw(format!(
            "  {} leaders over {} years  │  {} records loaded  │  ←/→ or 1-3: select  q: quit",
            total(&app.counts),
            app.counts.len(),
            app.dashboard.dataset().len()
        )),
    ]);

    let bar = Paragraph::new(status).block(Block::default().borders(Borders::ALL));
    f.render_widget(bar, area);
}

use tui::backend::Backend;
use tui::layout::{Alignment, Rect};
use tui::style::{Color, Modifier, Style};
use tui::text::Line;
use tui::widgets::{Block, BorderType, Borders, Paragraph, Tabs};
use tui::{Frame, Terminal};
use tui_logger::TuiLoggerWidget;

use crate::app::{App, MenuItem};
use crate::state::network::{ERROR_CHAR, LoadingState};
use crate::ui::layout::LayoutAreas;
use mlb_api::translate::{position_kr, team_name_kr};
use mlb_api::{Game, PlayerGamePerformance, PlayerInfo};

static TABS: &[&str; 3] = &["선수", "일정", "경기 기록"];

pub fn draw<B>(terminal: &mut Terminal<B>, app: &mut App, loading: LoadingState)
where
    B: Backend,
{
    let current_size = terminal.size().unwrap_or_default();
    if current_size.width <= 10 || current_size.height <= 10 {
        return;
    }

    let mut layout = LayoutAreas::new(current_size);

    terminal
        .draw(|f| {
            layout.update(f.area(), app.settings.full_screen, app.state.show_logs);

            if !app.settings.full_screen {
                draw_tabs(f, layout.tab_bar, app);
            }

            match app.state.active_tab {
                MenuItem::Players => draw_players(f, layout.main, app),
                MenuItem::Schedule => draw_schedule(f, layout.main, app),
                MenuItem::GameDetail => draw_game_detail(f, layout.main, app),
                MenuItem::Help => draw_help(f, layout.main),
            }

            if let Some(logs) = layout.logs {
                draw_log_pane(f, logs);
            }

            draw_loading_spinner(f, f.area(), app, loading);
        })
        .unwrap();
}

pub fn default_border<'a>(color: Color) -> Block<'a> {
    Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(color))
}

fn draw_tabs(f: &mut Frame, tab_bar: [Rect; 2], app: &App) {
    let style = Style::default().fg(Color::White);
    let border_type = BorderType::Rounded;

    let tab_index = match app.state.active_tab {
        MenuItem::Players => 0,
        MenuItem::Schedule => 1,
        MenuItem::GameDetail => 2,
        MenuItem::Help => 0,
    };

    let titles: Vec<Line> = TABS.iter().map(|t| Line::from(*t)).collect();
    let tabs = Tabs::new(titles)
        .block(
            Block::default()
                .borders(Borders::LEFT | Borders::BOTTOM | Borders::TOP)
                .border_type(border_type),
        )
        .highlight_style(Style::default().add_modifier(Modifier::UNDERLINED))
        .select(tab_index)
        .style(style);
    f.render_widget(tabs, tab_bar[0]);

    let help = Paragraph::new("Help: ? ")
        .alignment(Alignment::Right)
        .block(
            Block::default()
                .borders(Borders::RIGHT | Borders::BOTTOM | Borders::TOP)
                .border_type(border_type),
        )
        .style(style);
    f.render_widget(help, tab_bar[1]);
}

fn draw_players(f: &mut Frame, area: Rect, app: &App) {
    let block = default_border(Color::White).title(" 선수 ");
    let inner = block.inner(area);
    f.render_widget(block, area);

    if app.state.players.grouped.is_empty() {
        let msg = if let Some(err) = app.state.last_error.as_deref() {
            format!("선수 정보를 불러오지 못했습니다:\n{err}")
        } else {
            "선수 정보를 불러오는 중...".to_string()
        };
        f.render_widget(
            Paragraph::new(msg)
                .style(Style::default().fg(Color::DarkGray))
                .alignment(Alignment::Center),
            inner,
        );
        return;
    }

    let mut lines: Vec<Line> = Vec::new();
    lines.push(Line::from("j/k 이동  r 새로고침  2 일정 보기").style(Style::default().fg(Color::DarkGray)));
    lines.push(Line::from(""));

    let mut flat_idx = 0usize;
    for (level, players) in &app.state.players.grouped {
        lines.push(Line::styled(
            format!("── {} ──", level.label()),
            Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
        ));
        for p in players {
            let marker = if flat_idx == app.state.players.selected { '>' } else { ' ' };
            let style = if flat_idx == app.state.players.selected {
                Style::default().fg(Color::White).add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(Color::Gray)
            };
            lines.push(Line::styled(format_player_row(marker, p), style));
            flat_idx += 1;
        }
        lines.push(Line::from(""));
    }

    render_scrolled(f, inner, lines, app.state.players.scroll_offset);
}

fn format_player_row(marker: char, p: &PlayerInfo) -> String {
    let jersey = if p.jersey_number > 0 {
        format!("#{}", p.jersey_number)
    } else {
        "#-".to_string()
    };
    format!(
        "{marker} {} ({})  {}  {}  {}  {}",
        p.name_kr,
        p.name_en,
        team_name_kr(&p.team),
        position_kr(&p.position),
        jersey,
        p.league,
    )
}

fn draw_schedule(f: &mut Frame, area: Rect, app: &App) {
    let block = default_border(Color::White).title(" 일정 ");
    let inner = block.inner(area);
    f.render_widget(block, area);

    let games = app.state.schedule.window.games();
    if games.is_empty() {
        let msg = if let Some(err) = app.state.last_error.as_deref() {
            format!("일정을 불러오지 못했습니다:\n{err}")
        } else {
            "표시할 경기가 없습니다. r로 새로고침하세요.".to_string()
        };
        f.render_widget(
            Paragraph::new(msg)
                .style(Style::default().fg(Color::DarkGray))
                .alignment(Alignment::Center),
            inner,
        );
        return;
    }

    let mut lines: Vec<Line> = Vec::new();
    lines.push(
        Line::from("j/k 이동  Enter 경기 기록  [ 이전 일정  ] 이후 일정  r 새로고침")
            .style(Style::default().fg(Color::DarkGray)),
    );
    lines.push(Line::from(""));

    let mut last_date = None;
    for (idx, game) in games.iter().enumerate() {
        let date = game.kst_time().map(|t| t.date_naive());
        if date != last_date || last_date.is_none() && idx == 0 {
            let header = match date {
                Some(d) => d.format("%-m월 %-d일").to_string(),
                None => "날짜 미정".to_string(),
            };
            lines.push(Line::styled(
                header,
                Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
            ));
            last_date = date;
        }

        let selected = idx == app.state.schedule.selected;
        let style = if selected {
            Style::default().fg(Color::White).add_modifier(Modifier::BOLD)
        } else if game.is_live() {
            Style::default().fg(Color::Green)
        } else {
            Style::default().fg(Color::Gray)
        };
        lines.push(Line::styled(format_game_row(selected, game), style));
    }

    render_scrolled(f, inner, lines, app.state.schedule.scroll_offset);
}

fn format_game_row(selected: bool, game: &Game) -> String {
    let marker = if selected { '>' } else { ' ' };
    let score = match (game.away.score, game.home.score) {
        (Some(a), Some(h)) => format!("{a} : {h}"),
        _ => "vs".to_string(),
    };
    format!(
        "{marker} {} {} {}  [{}] {}  {}",
        team_name_kr(&game.away.name),
        score,
        team_name_kr(&game.home.name),
        game.status.label_kr(),
        game.kst_label(),
        game.venue,
    )
}

fn draw_game_detail(f: &mut Frame, area: Rect, app: &App) {
    let block = default_border(Color::White).title(" 경기 기록 ");
    let inner = block.inner(area);
    f.render_widget(block, area);

    let Some(game_pk) = app.state.game_detail.game_pk else {
        f.render_widget(
            Paragraph::new("일정 탭에서 경기를 선택한 뒤 Enter를 누르세요")
                .style(Style::default().fg(Color::DarkGray))
                .alignment(Alignment::Center),
            inner,
        );
        return;
    };

    let mut lines: Vec<Line> = Vec::new();
    lines.push(
        Line::from(format!("경기 {game_pk}  |  j/k 스크롤  Esc 일정으로"))
            .style(Style::default().fg(Color::DarkGray)),
    );
    lines.push(Line::from(""));

    if app.state.game_detail.performances.is_empty() {
        lines.push(Line::styled(
            "이 경기에 출전한 등록 선수가 없습니다",
            Style::default().fg(Color::DarkGray),
        ));
    }

    for perf in &app.state.game_detail.performances {
        append_performance(&mut lines, perf);
    }

    render_scrolled(f, inner, lines, app.state.game_detail.scroll_offset);
}

fn append_performance(lines: &mut Vec<Line<'_>>, perf: &PlayerGamePerformance) {
    let order = perf
        .batting_order
        .map(|o| format!(" {o}번 타자"))
        .unwrap_or_default();
    lines.push(Line::styled(
        format!(
            "{} ({})  {}  {}{}",
            perf.name_kr,
            perf.name_en,
            team_name_kr(&perf.team),
            position_kr(&perf.position),
            order,
        ),
        Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
    ));

    if !perf.played {
        lines.push(Line::styled("  출전 기록 없음", Style::default().fg(Color::DarkGray)));
        lines.push(Line::from(""));
        return;
    }

    if let Some(b) = &perf.batting {
        lines.push(Line::from(format!(
            "  타격: {}타석 {}타수 {}안타 {}득점 {}타점 {}홈런 {}삼진 {}볼넷",
            b.plate_appearances, b.at_bats, b.hits, b.runs, b.rbi, b.home_runs, b.strikeouts, b.walks,
        )));
    }
    if let Some(p) = &perf.pitching {
        lines.push(Line::from(format!(
            "  투구: {}이닝 {}피안타 {}실점 {}자책 {}탈삼진 {}볼넷 {}피홈런",
            p.innings_pitched, p.hits, p.runs, p.earned_runs, p.strikeouts, p.walks, p.home_runs,
        )));
    }

    for ev in &perf.inning_events {
        let rbi = if ev.rbi > 0 { format!(" ({}타점)", ev.rbi) } else { String::new() };
        let opposing = if ev.opposing_player.is_empty() {
            String::new()
        } else {
            format!("  vs {}", ev.opposing_player)
        };
        lines.push(Line::styled(
            format!("  {}  {}{rbi}{opposing}", ev.inning_label(), ev.event_kr),
            Style::default().fg(Color::Gray),
        ));
    }
    lines.push(Line::from(""));
}

fn draw_help(f: &mut Frame, area: Rect) {
    let block = default_border(Color::DarkGray).title(" 도움말 ");
    let inner = block.inner(area);
    f.render_widget(block, area);
    let text = "q 종료   1 선수  2 일정  3 경기 기록
j/k 이동   Enter 경기 선택   Esc 뒤로
[ 이전 일정 불러오기   ] 이후 일정 불러오기
r 새로고침   f 전체 화면   \" 로그 창";
    f.render_widget(
        Paragraph::new(text)
            .style(Style::default().fg(Color::Gray))
            .alignment(Alignment::Center),
        inner,
    );
}

fn draw_log_pane(f: &mut Frame, area: Rect) {
    let widget = TuiLoggerWidget::default()
        .block(default_border(Color::DarkGray).title(" logs "))
        .style_error(Style::default().fg(Color::Red))
        .style_warn(Style::default().fg(Color::Yellow))
        .style_info(Style::default().fg(Color::Gray));
    f.render_widget(widget, area);
}

fn draw_loading_spinner(f: &mut Frame, area: Rect, app: &App, loading: LoadingState) {
    if !loading.is_loading && loading.spinner_char != ERROR_CHAR {
        return;
    }
    let style = match loading.spinner_char {
        ERROR_CHAR => Style::default().fg(Color::Red),
        _ => Style::default().fg(Color::White),
    };
    let spinner = Paragraph::new(loading.spinner_char.to_string())
        .alignment(Alignment::Right)
        .style(style);
    let area = if app.settings.full_screen {
        Rect::new(area.width.saturating_sub(3), area.height.saturating_sub(2), 1, 1)
    } else {
        Rect::new(area.width.saturating_sub(11), 1, 1, 1)
    };
    f.render_widget(spinner, area);
}

/// Clip a line list to the viewport with a vertical offset, clamped so the
/// last page stays full.
fn render_scrolled(f: &mut Frame, area: Rect, lines: Vec<Line<'_>>, offset: u16) {
    let visible = area.height as usize;
    let max_offset = lines.len().saturating_sub(visible);
    let start = (offset as usize).min(max_offset);
    let window: Vec<Line> = lines.into_iter().skip(start).take(visible).collect();
    f.render_widget(Paragraph::new(window), area);
}

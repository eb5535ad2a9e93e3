use tui::backend::Backend;
use tui::layout::{Alignment, Constraint, Direction, Layout, Rect};
use tui::style::{Color, Modifier, Style};
use tui::text::{Line, Span};
use tui::widgets::{Block, BorderType, Borders, Paragraph, Tabs};
use tui::{Frame, Terminal};
use tui_logger::TuiLoggerWidget;

use crate::app::{App, MenuItem};
use crate::components::compare::{comparison_chart, legend_line};
use crate::components::radar::RadarView;
use crate::state::network::{ERROR_CHAR, LoadingState};
use crate::ui::layout::LayoutAreas;
use statfut_api::Player;

static TABS: &[&str; 2] = &["Elenco", "Detalhes"];

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
                MenuItem::Roster => draw_roster(f, layout.main, app),
                MenuItem::Detail => draw_detail(f, layout.main, app),
                MenuItem::Help => draw_placeholder(
                    f,
                    layout.main,
                    "Help: q=sair  1=Elenco  2=Detalhes  /=buscar  t/p=filtros  s=ordenar  j/k=mover  Enter=selecionar  R=recarregar",
                ),
            }

            if layout.log_overlay.height > 0 {
                draw_logs(f, layout.log_overlay);
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
        MenuItem::Roster => 0,
        MenuItem::Detail => 1,
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

// ---------------------------------------------------------------------------
// Roster tab — filter sidebar + selectable table
// ---------------------------------------------------------------------------

fn draw_roster(f: &mut Frame, area: Rect, app: &App) {
    let block = default_border(Color::White).title(" Elenco ");
    let inner = block.inner(area);
    f.render_widget(block, area);

    if app.state.roster.players.is_empty() {
        let msg = if let Some(err) = app.state.last_error.as_deref() {
            format!("Erro ao buscar jogadores:\n{err}\n\nR para tentar novamente")
        } else {
            "Buscando jogadores...".to_string()
        };
        let style = if app.state.last_error.is_some() {
            Style::default().fg(Color::Red)
        } else {
            Style::default().fg(Color::DarkGray)
        };
        f.render_widget(
            Paragraph::new(msg).style(style).alignment(Alignment::Center),
            inner,
        );
        return;
    }

    if inner.width >= 70 {
        let [sidebar, table] =
            Layout::horizontal([Constraint::Length(28), Constraint::Fill(1)]).areas(inner);
        draw_filter_panel(f, sidebar, app);
        draw_roster_table(f, table, app);
    } else {
        let [filters, table] =
            Layout::vertical([Constraint::Length(6), Constraint::Fill(1)]).areas(inner);
        draw_filter_panel(f, filters, app);
        draw_roster_table(f, table, app);
    }
}

fn draw_filter_panel(f: &mut Frame, area: Rect, app: &App) {
    let block = default_border(Color::DarkGray).title(" Filtros ");
    let inner = block.inner(area);
    f.render_widget(block, area);

    if inner.width == 0 || inner.height == 0 {
        return;
    }

    let roster = &app.state.roster;
    let label = Style::default().fg(Color::DarkGray);
    let value = Style::default().fg(Color::White);

    let search_display = if roster.composing {
        format!("{}_", roster.filter.search)
    } else if roster.filter.search.is_empty() {
        "(/ para buscar)".to_string()
    } else {
        roster.filter.search.clone()
    };
    let search_style = if roster.composing {
        Style::default().fg(Color::Yellow)
    } else {
        value
    };

    let mut lines = vec![
        Line::from(vec![
            Span::styled("Busca    ", label),
            Span::styled(search_display, search_style),
        ]),
        Line::from(vec![
            Span::styled("Time     ", label),
            Span::styled(roster.filter.team.clone(), value),
        ]),
        Line::from(vec![
            Span::styled("Posição  ", label),
            Span::styled(roster.filter.position.clone(), value),
        ]),
        Line::from(vec![
            Span::styled("Ordenar  ", label),
            Span::styled(roster.sort.label(), value),
        ]),
        Line::from(""),
        Line::from(Span::styled(
            format!("{} de {} jogadores", roster.view.len(), roster.players.len()),
            label,
        )),
    ];

    if let Some(at) = roster.fetched_at.as_deref() {
        lines.push(Line::from(Span::styled(
            format!("atualizado às {at}"),
            label,
        )));
    }

    if let Some(err) = app.state.last_error.as_deref() {
        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled(
            err.to_string(),
            Style::default().fg(Color::Red),
        )));
    }

    f.render_widget(Paragraph::new(lines), inner);
}

fn roster_columns() -> [Constraint; 6] {
    [
        Constraint::Min(18),
        Constraint::Length(16),
        Constraint::Length(9),
        Constraint::Length(6),
        Constraint::Length(6),
        Constraint::Length(13),
    ]
}

fn draw_roster_table(f: &mut Frame, area: Rect, app: &App) {
    if area.height < 2 {
        return;
    }

    let [header, key_legend, list_area] = Layout::vertical([
        Constraint::Length(1),
        Constraint::Length(1),
        Constraint::Fill(1),
    ])
    .areas(area);

    let widths = roster_columns();
    let header_cols = Layout::default()
        .direction(Direction::Horizontal)
        .constraints(widths)
        .split(header);
    let header_style = Style::default().add_modifier(Modifier::BOLD);
    for (col, title) in ["  Nome", "Time", "Posição", "Idade", "Gols", "Assistências"]
        .iter()
        .enumerate()
    {
        f.render_widget(Paragraph::new(*title).style(header_style), header_cols[col]);
    }
    f.render_widget(
        Paragraph::new("j/k=mover  Enter=detalhes  t/p=filtros  s=ordenar")
            .style(Style::default().fg(Color::DarkGray)),
        key_legend,
    );

    let roster = &app.state.roster;
    if roster.view.is_empty() {
        f.render_widget(
            Paragraph::new("Nenhum jogador encontrado.")
                .style(Style::default().fg(Color::DarkGray))
                .alignment(Alignment::Center),
            list_area,
        );
        return;
    }

    let visible = list_area.height as usize;
    let (start, end) = visible_range(roster.selected, roster.view.len(), visible);

    for (i, idx) in (start..end).enumerate() {
        let row_area = Rect {
            x: list_area.x,
            y: list_area.y + i as u16,
            width: list_area.width,
            height: 1,
        };
        let cols = Layout::default()
            .direction(Direction::Horizontal)
            .constraints(widths)
            .split(row_area);

        let player = &roster.view[idx];
        let selected = idx == roster.selected;
        let marker = if selected { '>' } else { ' ' };
        let style = if selected {
            Style::default().fg(Color::White).add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Color::Gray)
        };

        f.render_widget(
            Paragraph::new(format!("{marker} {}", player.name)).style(style),
            cols[0],
        );
        f.render_widget(Paragraph::new(player.team.as_str()).style(style), cols[1]);
        f.render_widget(
            Paragraph::new(player.position.as_str()).style(style),
            cols[2],
        );
        f.render_widget(
            Paragraph::new(player.age.to_string()).style(style),
            cols[3],
        );
        f.render_widget(
            Paragraph::new(player.goals.to_string()).style(style),
            cols[4],
        );
        f.render_widget(
            Paragraph::new(player.assists.to_string()).style(style),
            cols[5],
        );
    }
}

/// Window of rows to show so the selection stays centered while scrolling.
fn visible_range(selected: usize, total: usize, visible: usize) -> (usize, usize) {
    if total == 0 || visible == 0 {
        return (0, 0);
    }
    if total <= visible {
        return (0, total);
    }

    let mut start = selected.saturating_sub(visible / 2);
    if start + visible > total {
        start = total - visible;
    }
    (start, start + visible)
}

// ---------------------------------------------------------------------------
// Detail tab — metric cards + the two charts
// ---------------------------------------------------------------------------

fn draw_detail(f: &mut Frame, area: Rect, app: &App) {
    let block = default_border(Color::White).title(" Detalhes ");
    let inner = block.inner(area);
    f.render_widget(block, area);

    let Some(player) = app.state.detail.player.as_ref() else {
        let msg = if let Some(err) = app.state.last_error.as_deref() {
            format!("Erro ao carregar jogador:\n{err}")
        } else {
            "Selecione um jogador na aba Elenco e pressione Enter".to_string()
        };
        f.render_widget(
            Paragraph::new(msg)
                .style(Style::default().fg(Color::DarkGray))
                .alignment(Alignment::Center),
            inner,
        );
        return;
    };

    // Taller terminals get the detailed statistics card row as well.
    let with_detailed = inner.height >= 28;
    let card_rows: u16 = 6;

    let (header, cards_area, detailed_area, charts_area) = if with_detailed {
        let [h, c, t, d, g] = Layout::vertical([
            Constraint::Length(1),
            Constraint::Length(card_rows),
            Constraint::Length(1),
            Constraint::Length(card_rows),
            Constraint::Fill(1),
        ])
        .areas(inner);
        f.render_widget(
            Paragraph::new("Estatísticas Detalhadas")
                .style(Style::default().add_modifier(Modifier::BOLD)),
            t,
        );
        (h, c, Some(d), g)
    } else {
        let [h, c, g] = Layout::vertical([
            Constraint::Length(1),
            Constraint::Length(card_rows),
            Constraint::Fill(1),
        ])
        .areas(inner);
        (h, c, None, g)
    };

    f.render_widget(
        Paragraph::new(format!("Detalhes do Jogador: {}", player.name))
            .style(Style::default().fg(Color::White).add_modifier(Modifier::BOLD)),
        header,
    );

    draw_card_grid(f, cards_area, &info_cards(player), 4);
    if let Some(detailed) = detailed_area {
        draw_card_grid(f, detailed, &detailed_cards(player), 3);
    }

    if charts_area.height >= 5 {
        let [radar_area, compare_area] =
            Layout::horizontal([Constraint::Percentage(50), Constraint::Percentage(50)])
                .areas(charts_area);
        draw_radar_panel(f, radar_area, app);
        draw_compare_panel(f, compare_area, app);
    }
}

fn info_cards(player: &Player) -> Vec<(&'static str, String)> {
    vec![
        ("Time", player.team.clone()),
        ("Posição", player.position.clone()),
        ("Idade", player.age.to_string()),
        ("Nacionalidade", player.nationality.clone()),
        ("Pé Dominante", player.preferred_foot.clone()),
        ("Altura", player.height.clone()),
        ("Peso", player.weight.clone()),
        ("Agência", player.agency.clone()),
        ("Gols", player.goals.to_string()),
        ("Assistências", player.assists.to_string()),
        ("Partidas", stat_text(player, "partidas", StatFormat::Count)),
        (
            "Minutos Jogados",
            stat_text(player, "minutos_jogados", StatFormat::Count),
        ),
    ]
}

fn detailed_cards(player: &Player) -> Vec<(&'static str, String)> {
    vec![
        (
            "Cartões Amarelos",
            stat_text(player, "cartoes_amarelos", StatFormat::Count),
        ),
        (
            "Cartões Vermelhos",
            stat_text(player, "cartoes_vermelhos", StatFormat::Count),
        ),
        (
            "Chutes a Gol",
            stat_text(player, "chutesagol", StatFormat::Count),
        ),
        (
            "Precisão de Chutes",
            stat_text(player, "percchutesagol", StatFormat::Percent),
        ),
        (
            "Gols por Chute",
            stat_text(player, "golsporchute", StatFormat::Rate),
        ),
        ("PRGR", stat_text(player, "prgr", StatFormat::Rate)),
        ("PRGC", stat_text(player, "prgc", StatFormat::Rate)),
        ("PRGP", stat_text(player, "prgp", StatFormat::Rate)),
        (
            "Total de Chutes",
            stat_text(player, "totaldechutes", StatFormat::Count),
        ),
    ]
}

#[derive(Copy, Clone)]
enum StatFormat {
    Count,
    Percent,
    Rate,
}

fn stat_text(player: &Player, key: &str, format: StatFormat) -> String {
    match player.stats.metric(key) {
        Ok(v) => match format {
            StatFormat::Count => format!("{v:.0}"),
            StatFormat::Percent => format!("{v:.1}%"),
            StatFormat::Rate => format!("{v:.2}"),
        },
        // Malformed upstream value; the pipeline reports the details.
        Err(_) => "inválido".to_string(),
    }
}

/// Label-over-value cards laid out column-major, two rows per card.
fn draw_card_grid(f: &mut Frame, area: Rect, cards: &[(&'static str, String)], columns: usize) {
    if area.width == 0 || area.height == 0 || columns == 0 {
        return;
    }
    let per_column = cards.len().div_ceil(columns);
    let col_width = area.width / columns as u16;
    let label_style = Style::default().fg(Color::DarkGray);
    let value_style = Style::default().fg(Color::White).add_modifier(Modifier::BOLD);

    for (idx, (label, value)) in cards.iter().enumerate() {
        let col = idx / per_column;
        let row = idx % per_column;
        let y = area.y + row as u16 * 2;
        if y + 1 >= area.y + area.height {
            continue;
        }
        let x = area.x + col as u16 * col_width;
        let cell = Rect::new(x, y, col_width.saturating_sub(1), 1);
        f.render_widget(Paragraph::new(*label).style(label_style), cell);
        let cell = Rect::new(x, y + 1, col_width.saturating_sub(1), 1);
        f.render_widget(Paragraph::new(value.as_str()).style(value_style), cell);
    }
}

fn draw_radar_panel(f: &mut Frame, area: Rect, app: &App) {
    let block = default_border(Color::DarkGray).title(" Estatísticas Principais ");
    let inner = block.inner(area);
    f.render_widget(block, area);

    let Some(series) = app.state.detail.radar.as_ref() else {
        f.render_widget(
            Paragraph::new("Sem estatísticas para exibir")
                .style(Style::default().fg(Color::DarkGray))
                .alignment(Alignment::Center),
            inner,
        );
        return;
    };

    f.render_widget(RadarView { series }, inner);
}

fn draw_compare_panel(f: &mut Frame, area: Rect, app: &App) {
    let block = default_border(Color::DarkGray).title(" Comparação com Outros Jogadores ");
    let inner = block.inner(area);
    f.render_widget(block, area);

    let Some(series) = app.state.detail.compare.as_ref() else {
        f.render_widget(
            Paragraph::new("Sem jogadores para comparar")
                .style(Style::default().fg(Color::DarkGray))
                .alignment(Alignment::Center),
            inner,
        );
        return;
    };

    if inner.height < 4 {
        return;
    }
    let [legend, chart_area] =
        Layout::vertical([Constraint::Length(1), Constraint::Fill(1)]).areas(inner);
    f.render_widget(Paragraph::new(legend_line(series)), legend);
    f.render_widget(comparison_chart(series), chart_area);
}

// ---------------------------------------------------------------------------
// Shared chrome
// ---------------------------------------------------------------------------

fn draw_placeholder(f: &mut Frame, area: Rect, msg: &str) {
    let block = default_border(Color::DarkGray);
    let inner = block.inner(area);
    f.render_widget(block, area);
    f.render_widget(
        Paragraph::new(msg)
            .style(Style::default().fg(Color::DarkGray))
            .alignment(Alignment::Center),
        inner,
    );
}

fn draw_logs(f: &mut Frame, area: Rect) {
    let widget = TuiLoggerWidget::default()
        .style_error(Style::default().fg(Color::Red))
        .style_warn(Style::default().fg(Color::Yellow))
        .style_info(Style::default().fg(Color::Gray))
        .style_debug(Style::default().fg(Color::DarkGray))
        .block(default_border(Color::DarkGray).title(" Logs "));
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

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn visible_range_shows_everything_when_it_fits() {
        assert_eq!(visible_range(0, 5, 10), (0, 5));
        assert_eq!(visible_range(4, 5, 5), (0, 5));
    }

    #[test]
    fn visible_range_centers_the_selection() {
        assert_eq!(visible_range(10, 50, 10), (5, 15));
    }

    #[test]
    fn visible_range_clamps_at_the_tail() {
        assert_eq!(visible_range(49, 50, 10), (40, 50));
        assert_eq!(visible_range(0, 50, 10), (0, 10));
    }

    #[test]
    fn visible_range_handles_empty_input() {
        assert_eq!(visible_range(0, 0, 10), (0, 0));
        assert_eq!(visible_range(3, 10, 0), (0, 0));
    }
}

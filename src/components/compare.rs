use statfut_api::chart::CompareSeries;
use tui::layout::Direction;
use tui::style::{Color, Style};
use tui::text::{Line, Span};
use tui::widgets::{Bar, BarChart, BarGroup};

/// One color per metric column, in metric order.
const METRIC_COLORS: [Color; 4] = [Color::Green, Color::Yellow, Color::Cyan, Color::Magenta];

/// Bar values are fixed-point hundredths: the widget's domain is integral,
/// and per-90 rates live well below 1.0.
fn scaled(value: f64) -> u64 {
    (value.max(0.0) * 100.0).round() as u64
}

fn metric_color(index: usize) -> Color {
    METRIC_COLORS[index % METRIC_COLORS.len()]
}

/// Grouped bar chart: one group per peer labeled with the player name,
/// one colored bar per metric, all groups sharing the series peak.
pub fn comparison_chart(series: &CompareSeries) -> BarChart<'_> {
    let mut chart = BarChart::default()
        .direction(Direction::Vertical)
        .bar_width(3)
        .bar_gap(1)
        .group_gap(3)
        .max(scaled(series.peak).max(1));

    for row in &series.rows {
        let bars: Vec<Bar> = row
            .values
            .iter()
            .enumerate()
            .map(|(i, value)| {
                Bar::default()
                    .value(scaled(*value))
                    .text_value(format!("{value:.2}"))
                    .style(Style::default().fg(metric_color(i)))
            })
            .collect();
        chart = chart.data(BarGroup::default().label(Line::from(row.name.clone())).bars(&bars));
    }

    chart
}

/// Color key for the chart, rendered above it.
pub fn legend_line(series: &CompareSeries) -> Line<'static> {
    let mut spans = Vec::with_capacity(series.metrics.len());
    for (i, metric) in series.metrics.iter().enumerate() {
        spans.push(Span::styled(
            format!("■ {}  ", metric.label),
            Style::default().fg(metric_color(i)),
        ));
    }
    Line::from(spans)
}

#[cfg(test)]
mod tests {
    use super::*;
    use statfut_api::chart::{COMPARE_METRICS, CompareRow};

    fn series() -> CompareSeries {
        CompareSeries {
            player: "Ana".to_owned(),
            metrics: COMPARE_METRICS.to_vec(),
            rows: vec![CompareRow {
                id: 2,
                name: "Bea".to_owned(),
                team: "Santos".to_owned(),
                position: "MF".to_owned(),
                values: vec![1.2, 0.3, 0.8, 0.0],
            }],
            peak: 1.2,
        }
    }

    #[test]
    fn values_scale_to_hundredths() {
        assert_eq!(scaled(0.5), 50);
        assert_eq!(scaled(1.2), 120);
        assert_eq!(scaled(0.0), 0);
        assert_eq!(scaled(0.005), 1);
    }

    #[test]
    fn negative_values_clamp_to_zero() {
        assert_eq!(scaled(-0.4), 0);
    }

    #[test]
    fn metric_colors_cycle() {
        assert_eq!(metric_color(0), Color::Green);
        assert_eq!(metric_color(4), Color::Green);
        assert_eq!(metric_color(5), Color::Yellow);
    }

    #[test]
    fn legend_has_one_span_per_metric() {
        let line = legend_line(&series());
        assert_eq!(line.spans.len(), 4);
        assert!(line.spans[0].content.contains("Gols/90"));
        assert!(line.spans[3].content.contains("xAG"));
    }
}

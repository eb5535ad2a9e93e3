use tui::layout::{Constraint, Layout, Rect, Size};

pub const TAB_BAR_HEIGHT: u16 = 3;
/// Rows of the log overlay carved off the bottom when it is visible.
pub const LOG_OVERLAY_HEIGHT: u16 = 10;

/// Pre-computed layout areas for the main draw loop.
pub struct LayoutAreas {
    pub tab_bar: [Rect; 2],
    pub main: Rect,
    /// Bottom strip for the tui-logger overlay; `Rect::ZERO` when hidden.
    pub log_overlay: Rect,
}

impl LayoutAreas {
    pub fn new(size: Size) -> Self {
        let rect = Rect::new(0, 0, size.width, size.height);
        Self::from_rect(rect, false, false)
    }

    pub fn update(&mut self, area: Rect, full_screen: bool, show_logs: bool) {
        *self = Self::from_rect(area, full_screen, show_logs);
    }

    fn from_rect(area: Rect, full_screen: bool, show_logs: bool) -> Self {
        let (content, tab_bar) = if full_screen {
            (area, [Rect::ZERO, Rect::ZERO])
        } else {
            let [tab, content] = Layout::vertical([
                Constraint::Length(TAB_BAR_HEIGHT),
                Constraint::Fill(1),
            ])
            .areas(area);
            (content, Self::split_tab_bar(tab))
        };

        let (main, log_overlay) = if show_logs && content.height > LOG_OVERLAY_HEIGHT {
            let [main, logs] = Layout::vertical([
                Constraint::Fill(1),
                Constraint::Length(LOG_OVERLAY_HEIGHT),
            ])
            .areas(content);
            (main, logs)
        } else {
            (content, Rect::ZERO)
        };

        LayoutAreas { tab_bar, main, log_overlay }
    }

    fn split_tab_bar(area: Rect) -> [Rect; 2] {
        Layout::horizontal([Constraint::Percentage(85), Constraint::Percentage(15)]).areas(area)
    }
}

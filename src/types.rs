use crate::matcher::MatchStatus;

/// What the status cell shows. `Incomplete` is the idle state before both
/// codes are long enough; the other two mirror `MatchStatus`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusView {
    Incomplete,
    Match,
    NoMatch,
}

impl StatusView {
    pub fn from_status(status: MatchStatus) -> Self {
        match status {
            MatchStatus::Match => StatusView::Match,
            MatchStatus::NoMatch => StatusView::NoMatch,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            StatusView::Incomplete => "incomplete",
            StatusView::Match => "Match",
            StatusView::NoMatch => "No match",
        }
    }

    pub fn color(self) -> slint::Color {
        match self {
            StatusView::Incomplete => slint::Color::from_rgb_u8(158, 158, 158), // Gray
            StatusView::Match => slint::Color::from_rgb_u8(46, 125, 50),        // Green
            StatusView::NoMatch => slint::Color::from_rgb_u8(198, 40, 40),      // Red
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn labels_match_the_archive_status_strings() {
        assert_eq!(StatusView::from_status(MatchStatus::Match).label(), "Match");
        assert_eq!(
            StatusView::from_status(MatchStatus::NoMatch).label(),
            MatchStatus::NoMatch.to_string()
        );
    }
}

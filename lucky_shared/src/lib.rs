use lucky_core::{GameResult, GameState, SelectionError, SLOT_COUNT};
use serde::{Deserialize, Serialize};

/// Where the front end runs. Only affects the backdrop.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Platform {
    Web,
    Native,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum Backdrop {
    Gradient { from: String, to: String },
    Solid { color: String },
    Image { source: String },
}

impl Backdrop {
    pub fn for_platform(platform: Platform) -> Self {
        match platform {
            Platform::Web => Backdrop::Gradient {
                from: "#1e1b4b".into(),
                to: "#7c3aed".into(),
            },
            Platform::Native => Backdrop::Solid {
                color: "#1e1b4b".into(),
            },
        }
    }

    /// Prefers the background image when it loaded, otherwise the platform fill.
    pub fn resolve(platform: Platform, image: Option<String>) -> Self {
        match image {
            Some(source) => Backdrop::Image { source },
            None => Self::for_platform(platform),
        }
    }

    pub fn css(&self) -> String {
        match self {
            Backdrop::Gradient { from, to } => {
                format!("background: linear-gradient(160deg, {from}, {to});")
            }
            Backdrop::Solid { color } => format!("background: {color};"),
            Backdrop::Image { source } => {
                format!("background: url('{source}') center / cover no-repeat;")
            }
        }
    }
}

/// Label of the primary action button for the current progress.
pub fn primary_action_label(state: &GameState) -> &'static str {
    if state.is_auto_mode {
        return "Rolling...";
    }
    match state.current_step {
        1 => "Roll 1st number",
        2 => "Roll 2nd number",
        3 => "Roll 3rd number",
        _ => "Show result",
    }
}

/// One slot as drawn: a digit, or `?` before it has rolled.
pub fn slot_face(digit: Option<u8>) -> String {
    digit.map_or_else(|| "?".to_string(), |d| d.to_string())
}

/// Contents of the result overlay.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResultModal {
    pub numbers: [u8; SLOT_COUNT],
    pub total: u8,
    pub pattern: String,
    pub pattern_label: String,
    pub message: String,
}

impl From<&GameResult> for ResultModal {
    fn from(result: &GameResult) -> Self {
        Self {
            numbers: result.numbers,
            total: result.total,
            pattern: result.pattern.as_str().to_string(),
            pattern_label: result.pattern.label().to_string(),
            message: result.message(),
        }
    }
}

impl ResultModal {
    pub fn numbers_line(&self) -> String {
        self.numbers
            .iter()
            .map(|n| n.to_string())
            .collect::<Vec<_>>()
            .join(" - ")
    }
}

/// A blocking notice shown to the player.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notice {
    pub title: String,
    pub body: String,
}

impl From<SelectionError> for Notice {
    fn from(err: SelectionError) -> Self {
        let title = match err {
            SelectionError::AutoRollInProgress => "Please wait",
            _ => "Invalid selection",
        };
        Self {
            title: title.to_string(),
            body: err.to_string(),
        }
    }
}

#[derive(thiserror::Error, Debug)]
pub enum FrontendError {
    #[error("invalid input: {0}")]
    Invalid(String),
    #[error(transparent)]
    Selection(#[from] SelectionError),
}

pub type FrontendResult<T> = Result<T, FrontendError>;

/// Parses a typed number the way the number pad accepts it.
pub fn parse_pick(input: &str) -> FrontendResult<u8> {
    input
        .trim()
        .parse::<u8>()
        .map_err(|_| FrontendError::Invalid(format!("'{}' is not a number 1-6", input.trim())))
}

#[cfg(test)]
mod tests {
    use super::*;
    use lucky_core::{classify, GameSession, SessionTiming};

    #[test]
    fn label_follows_progress() {
        let mut s = GameSession::with_seed(1, SessionTiming::default()).unwrap();
        assert_eq!(primary_action_label(s.state()), "Roll 1st number");
        s.select_number(2, 0).unwrap();
        assert_eq!(primary_action_label(s.state()), "Roll 2nd number");
        s.auto_select(0).unwrap();
        assert_eq!(primary_action_label(s.state()), "Rolling...");
        s.tick(5_000);
        assert_eq!(primary_action_label(s.state()), "Roll 3rd number");
        s.auto_select(5_000).unwrap();
        s.tick(10_000);
        assert_eq!(primary_action_label(s.state()), "Show result");
    }

    #[test]
    fn backdrop_depends_on_platform() {
        assert!(matches!(Backdrop::for_platform(Platform::Web), Backdrop::Gradient { .. }));
        assert!(matches!(Backdrop::for_platform(Platform::Native), Backdrop::Solid { .. }));
        assert_eq!(
            Backdrop::resolve(Platform::Web, Some("bg.png".into())),
            Backdrop::Image {
                source: "bg.png".into()
            }
        );
        assert!(Backdrop::resolve(Platform::Native, None).css().starts_with("background: #"));
    }

    #[test]
    fn modal_from_result() {
        let modal = ResultModal::from(&classify([2, 4, 6]).unwrap());
        assert_eq!(modal.numbers_line(), "2 - 4 - 6");
        assert_eq!(modal.total, 12);
        assert_eq!(modal.pattern, "all-even");
        assert_eq!(modal.pattern_label, "All even");
    }

    #[test]
    fn notice_uses_error_text() {
        let notice = Notice::from(SelectionError::AlreadySelected(3));
        assert_eq!(notice.title, "Invalid selection");
        assert_eq!(notice.body, "3 is already selected");
    }

    #[test]
    fn parse_pick_trims_and_rejects_garbage() {
        assert_eq!(parse_pick(" 4\n").unwrap(), 4);
        assert!(matches!(parse_pick("x"), Err(FrontendError::Invalid(_))));
    }
}

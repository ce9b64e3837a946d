use ratatui::style::Color;

/// Terminal palette for one theme. Only the identifier is ever persisted.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Theme {
    pub id: &'static str,
    pub name: &'static str,
    pub fg: Color,
    pub dim: Color,
    pub accent: Color,
    pub correct: Color,
    pub incorrect: Color,
}

pub const THEMES: &[Theme] = &[
    Theme {
        id: "dark",
        name: "Dark",
        fg: Color::White,
        dim: Color::DarkGray,
        accent: Color::Yellow,
        correct: Color::Green,
        incorrect: Color::Red,
    },
    Theme {
        id: "light",
        name: "Light",
        fg: Color::Black,
        dim: Color::Gray,
        accent: Color::Blue,
        correct: Color::Green,
        incorrect: Color::Red,
    },
    Theme {
        id: "ocean",
        name: "Ocean",
        fg: Color::Cyan,
        dim: Color::DarkGray,
        accent: Color::LightBlue,
        correct: Color::LightGreen,
        incorrect: Color::LightRed,
    },
    Theme {
        id: "forest",
        name: "Forest",
        fg: Color::Green,
        dim: Color::DarkGray,
        accent: Color::LightYellow,
        correct: Color::LightGreen,
        incorrect: Color::LightRed,
    },
    Theme {
        id: "sunset",
        name: "Sunset",
        fg: Color::LightMagenta,
        dim: Color::DarkGray,
        accent: Color::LightRed,
        correct: Color::LightGreen,
        incorrect: Color::Red,
    },
];

impl Theme {
    /// Look up a theme by identifier; unknown ids fall back to the default.
    pub fn by_id(id: &str) -> Theme {
        THEMES
            .iter()
            .find(|t| t.id == id)
            .copied()
            .unwrap_or(THEMES[0])
    }

    pub fn default_theme() -> Theme {
        THEMES[0]
    }
}

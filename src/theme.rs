use ratatui::style::Color;

#[derive(Debug, Clone, PartialEq)]
pub struct Theme {
    pub fg: Color,
    pub bg: Color,
    pub dim: Color,
    pub border: Color,
    pub highlight_bg: Color,
    pub highlight_fg: Color,
    pub active: Color,
    pub inactive: Color,
    pub badge: Color,
    pub chip_on: Color,
    pub input_accent: Color,
    pub title: Color,
    pub error: Color,
}

impl Default for Theme {
    fn default() -> Self {
        dark()
    }
}

pub fn by_name(name: &str) -> Theme {
    match name {
        "dark" => dark(),
        "light" => light(),
        "no-color" => no_color(),
        _ => dark(),
    }
}

pub const THEME_NAMES: &[&str] = &["dark", "light", "no-color"];

// -- Themes --

pub fn dark() -> Theme {
    Theme {
        fg: Color::Indexed(253),        // bright white
        bg: Color::Reset,
        dim: Color::Indexed(243),       // mid gray
        border: Color::Indexed(240),
        highlight_bg: Color::Indexed(237),
        highlight_fg: Color::Indexed(255),
        active: Color::Indexed(46),     // vivid green
        inactive: Color::Indexed(244),
        badge: Color::Indexed(220),     // gold
        chip_on: Color::Indexed(81),    // sky cyan
        input_accent: Color::Indexed(220),
        title: Color::Indexed(255),
        error: Color::Indexed(196),
    }
}

pub fn light() -> Theme {
    Theme {
        fg: Color::Indexed(234),        // near black
        bg: Color::Indexed(231),        // white
        dim: Color::Indexed(246),
        border: Color::Indexed(251),
        highlight_bg: Color::Indexed(253),
        highlight_fg: Color::Indexed(232),
        active: Color::Indexed(28),     // dark green
        inactive: Color::Indexed(248),
        badge: Color::Indexed(130),     // dark orange
        chip_on: Color::Indexed(25),    // dark blue
        input_accent: Color::Indexed(130),
        title: Color::Indexed(232),
        error: Color::Indexed(124),
    }
}

pub fn no_color() -> Theme {
    Theme {
        fg: Color::Reset,
        bg: Color::Reset,
        dim: Color::Reset,
        border: Color::Reset,
        highlight_bg: Color::Reset,
        highlight_fg: Color::Reset,
        active: Color::Reset,
        inactive: Color::Reset,
        badge: Color::Reset,
        chip_on: Color::Reset,
        input_accent: Color::Reset,
        title: Color::Reset,
        error: Color::Reset,
    }
}

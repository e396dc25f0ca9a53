// File: crates/chart-core/src/theme.rs
// Summary: Light/Dark theming plus deterministic series-to-colour assignment.

use log::warn;

/// 8-bit RGBA colour.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    pub const fn from_argb(a: u8, r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a }
    }

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    /// Parse a CSS colour: hex, named, `rgb()`/`rgba()` or `hsl()`.
    pub fn parse(s: &str) -> Option<Self> {
        let css = s.trim().parse::<css_color_parser::Color>().ok()?;
        let a = (css.a.clamp(0.0, 1.0) * 255.0).round() as u8;
        Some(Self::from_argb(a, css.r, css.g, css.b))
    }

    /// `#rrggbb`; alpha goes out separately through [`Color::opacity`].
    pub fn to_hex(&self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }

    pub fn opacity(&self) -> f64 {
        self.a as f64 / 255.0
    }

    pub fn is_opaque(&self) -> bool {
        self.a == u8::MAX
    }
}

/// d3 category10.
pub const CATEGORY10: [Color; 10] = [
    Color::rgb(0x1f, 0x77, 0xb4),
    Color::rgb(0xff, 0x7f, 0x0e),
    Color::rgb(0x2c, 0xa0, 0x2c),
    Color::rgb(0xd6, 0x27, 0x28),
    Color::rgb(0x94, 0x67, 0xbd),
    Color::rgb(0x8c, 0x56, 0x4b),
    Color::rgb(0xe3, 0x77, 0xc2),
    Color::rgb(0x7f, 0x7f, 0x7f),
    Color::rgb(0xbc, 0xbd, 0x22),
    Color::rgb(0x17, 0xbe, 0xcf),
];

#[derive(Clone, Copy, Debug)]
pub struct Theme {
    pub name: &'static str,
    pub background: Color,
    pub grid: Color,
    pub axis_label: Color,
    pub tick: Color,
    pub mark_fill: Color,
}

impl Theme {
    pub fn light() -> Self {
        Self {
            name: "light",
            background: Color::rgb(0xff, 0xff, 0xff),
            grid: Color::rgb(0xeb, 0xeb, 0xeb),
            axis_label: Color::rgb(0x33, 0x33, 0x33),
            tick: Color::rgb(0x66, 0x66, 0x66),
            mark_fill: Color::from_argb(204, 0x69, 0xb3, 0xa2),
        }
    }

    pub fn dark() -> Self {
        Self {
            name: "dark",
            background: Color::rgb(18, 18, 20),
            grid: Color::rgb(40, 40, 45),
            axis_label: Color::rgb(235, 235, 245),
            tick: Color::rgb(150, 150, 160),
            mark_fill: Color::from_argb(204, 64, 160, 255),
        }
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self::light()
    }
}

/// Return a list of built-in theme presets.
pub fn presets() -> Vec<Theme> {
    vec![Theme::light(), Theme::dark()]
}

/// Find a theme by its `name`, falling back to light.
pub fn find(name: &str) -> Theme {
    for t in presets() { if t.name.eq_ignore_ascii_case(name) { return t; } }
    Theme::light()
}

/// Maps series names to palette colours in first-seen order. A name keeps its
/// colour for the lifetime of the assigner.
#[derive(Clone, Debug)]
pub struct ColorAssigner {
    palette: Vec<Color>,
    assigned: Vec<(String, Color)>,
}

impl ColorAssigner {
    pub fn new(palette: Vec<Color>) -> Self {
        let palette = if palette.is_empty() { CATEGORY10.to_vec() } else { palette };
        Self { palette, assigned: Vec::new() }
    }

    pub fn color_for(&mut self, series: &str) -> Color {
        if let Some((_, c)) = self.assigned.iter().find(|(name, _)| name == series) {
            return *c;
        }
        let ix = self.assigned.len();
        if ix == self.palette.len() {
            warn!("palette of {} colours exhausted; colours will repeat", self.palette.len());
        }
        let c = self.palette[ix % self.palette.len()];
        self.assigned.push((series.to_string(), c));
        c
    }

    /// Already-assigned colour, without assigning.
    pub fn get(&self, series: &str) -> Option<Color> {
        self.assigned.iter().find(|(name, _)| name == series).map(|(_, c)| *c)
    }
}

impl Default for ColorAssigner {
    fn default() -> Self {
        Self::new(CATEGORY10.to_vec())
    }
}

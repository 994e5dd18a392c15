use crossterm::style::Color;

/// Color theme for the TUI
#[derive(Debug, Clone)]
pub struct Theme {
    pub name: &'static str,
    /// Background color
    pub bg: Color,
    /// Default text color
    pub fg: Color,
    /// Board frame color
    pub border: Color,
    /// Unopened cell color
    pub hidden: Color,
    /// Background of opened cells
    pub revealed_bg: Color,
    /// Selected cell background
    pub cursor_bg: Color,
    /// Player or AI flag
    pub flag: Color,
    /// Mine shown after the game ends
    pub mine: Color,
    /// Unopened cell the AI has proven safe
    pub safe_hint: Color,
    /// Unopened cell the AI has proven to be a mine
    pub mine_hint: Color,
    /// Colors for neighbor counts 1 through 8
    pub numbers: [Color; 8],
    /// Error color
    pub error: Color,
    /// Success color
    pub success: Color,
    /// Info text color
    pub info: Color,
    /// Key binding text color
    pub key: Color,
}

impl Default for Theme {
    fn default() -> Self {
        Self::dark()
    }
}

impl Theme {
    /// Dark theme (default)
    pub fn dark() -> Self {
        Self {
            name: "Dark",
            bg: Color::Rgb { r: 20, g: 22, b: 30 },
            fg: Color::Rgb { r: 230, g: 230, b: 240 },
            border: Color::Rgb { r: 130, g: 140, b: 170 },
            hidden: Color::Rgb { r: 90, g: 95, b: 115 },
            revealed_bg: Color::Rgb { r: 35, g: 40, b: 55 },
            cursor_bg: Color::Rgb { r: 70, g: 90, b: 140 },
            flag: Color::Rgb { r: 255, g: 210, b: 100 },
            mine: Color::Rgb { r: 255, g: 90, b: 90 },
            safe_hint: Color::Rgb { r: 90, g: 200, b: 130 },
            mine_hint: Color::Rgb { r: 230, g: 120, b: 120 },
            numbers: [
                Color::Rgb { r: 80, g: 180, b: 255 },
                Color::Rgb { r: 90, g: 220, b: 120 },
                Color::Rgb { r: 255, g: 110, b: 110 },
                Color::Rgb { r: 170, g: 130, b: 255 },
                Color::Rgb { r: 255, g: 160, b: 80 },
                Color::Rgb { r: 80, g: 220, b: 220 },
                Color::Rgb { r: 240, g: 240, b: 240 },
                Color::Rgb { r: 160, g: 165, b: 185 },
            ],
            error: Color::Rgb { r: 255, g: 90, b: 90 },
            success: Color::Rgb { r: 90, g: 255, b: 130 },
            info: Color::Rgb { r: 160, g: 165, b: 185 },
            key: Color::Rgb { r: 255, g: 210, b: 100 },
        }
    }

    /// Light theme, classic Windows number colors
    pub fn light() -> Self {
        Self {
            name: "Light",
            bg: Color::Rgb { r: 248, g: 248, b: 252 },
            fg: Color::Rgb { r: 30, g: 30, b: 40 },
            border: Color::Rgb { r: 60, g: 60, b: 80 },
            hidden: Color::Rgb { r: 150, g: 150, b: 165 },
            revealed_bg: Color::Rgb { r: 225, g: 228, b: 238 },
            cursor_bg: Color::Rgb { r: 180, g: 200, b: 255 },
            flag: Color::Rgb { r: 200, g: 120, b: 20 },
            mine: Color::Rgb { r: 220, g: 50, b: 50 },
            safe_hint: Color::Rgb { r: 40, g: 160, b: 60 },
            mine_hint: Color::Rgb { r: 190, g: 60, b: 60 },
            numbers: [
                Color::Rgb { r: 0, g: 0, b: 255 },
                Color::Rgb { r: 0, g: 128, b: 0 },
                Color::Rgb { r: 255, g: 0, b: 0 },
                Color::Rgb { r: 0, g: 0, b: 128 },
                Color::Rgb { r: 128, g: 0, b: 0 },
                Color::Rgb { r: 0, g: 128, b: 128 },
                Color::Rgb { r: 0, g: 0, b: 0 },
                Color::Rgb { r: 128, g: 128, b: 128 },
            ],
            error: Color::Rgb { r: 220, g: 50, b: 50 },
            success: Color::Rgb { r: 40, g: 160, b: 60 },
            info: Color::Rgb { r: 90, g: 90, b: 110 },
            key: Color::Rgb { r: 200, g: 120, b: 20 },
        }
    }

    /// High contrast theme
    pub fn high_contrast() -> Self {
        Self {
            name: "High contrast",
            bg: Color::Black,
            fg: Color::White,
            border: Color::White,
            hidden: Color::Grey,
            revealed_bg: Color::Rgb { r: 30, g: 30, b: 30 },
            cursor_bg: Color::Blue,
            flag: Color::Yellow,
            mine: Color::Red,
            safe_hint: Color::Green,
            mine_hint: Color::Magenta,
            numbers: [
                Color::Cyan,
                Color::Green,
                Color::Red,
                Color::Magenta,
                Color::Yellow,
                Color::Blue,
                Color::White,
                Color::Grey,
            ],
            error: Color::Red,
            success: Color::Green,
            info: Color::Grey,
            key: Color::Yellow,
        }
    }

    /// All built-in themes, in cycling order
    pub fn presets() -> Vec<Theme> {
        vec![Self::dark(), Self::light(), Self::high_contrast()]
    }

    /// Color for a neighbor count, `None` for zero
    pub fn number(&self, count: u8) -> Option<Color> {
        match count {
            1..=8 => Some(self.numbers[usize::from(count) - 1]),
            _ => None,
        }
    }
}

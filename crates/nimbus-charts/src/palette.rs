//! Light and dark chart palettes.
//!
//! Only presentation changes between the two palettes; series data is
//! identical in both modes.

use core::fmt;

/// An opaque RGB color that renders to CSS color strings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rgb(pub u8, pub u8, pub u8);

impl Rgb {
    /// CSS `rgb(...)` form.
    #[must_use]
    pub fn css(self) -> String {
        self.to_string()
    }

    /// CSS `rgba(...)` form with the given alpha (0.0 to 1.0).
    #[must_use]
    pub fn alpha(self, alpha: f64) -> String {
        format!("rgba({}, {}, {}, {})", self.0, self.1, self.2, alpha)
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "rgb({}, {}, {})", self.0, self.1, self.2)
    }
}

/// Alpha levels for fills and translucent surfaces.
#[derive(Debug, Clone, Copy)]
pub struct Opacity {
    /// Gradient fade-out end (0.0)
    pub clear: f64,
    /// Area fills under a line (0.2)
    pub fill: f64,
    /// Top of a gradient fill (0.4)
    pub gradient: f64,
    /// Bars (0.6)
    pub bar: f64,
    /// Tooltip background (0.95)
    pub tooltip: f64,
}

impl Default for Opacity {
    fn default() -> Self {
        Self {
            clear: 0.0,
            fill: 0.2,
            gradient: 0.4,
            bar: 0.6,
            tooltip: 0.95,
        }
    }
}

/// Colors used by every chart kind.
#[derive(Debug, Clone)]
pub struct ChartPalette {
    pub is_dark: bool,
    // Chrome
    pub text: Rgb,
    pub text_muted: Rgb,
    pub grid: String,
    pub surface: Rgb,
    pub tooltip_background: Rgb,
    pub tooltip_text: Rgb,
    pub tooltip_border: Rgb,
    // Series
    pub max_temp: Rgb,
    pub avg_temp: Rgb,
    pub min_temp: Rgb,
    pub humidity: Rgb,
    pub precipitation: Rgb,
    pub wind: Rgb,
    pub opacity: Opacity,
}

impl ChartPalette {
    /// Palette for the given mode.
    #[must_use]
    pub fn for_mode(dark_mode: bool) -> Self {
        if dark_mode { Self::dark() } else { Self::light() }
    }

    /// Light palette: dark text on white, saturated series colors.
    #[must_use]
    pub fn light() -> Self {
        Self {
            is_dark: false,
            text: Rgb(55, 65, 81),       // gray-700
            text_muted: Rgb(107, 114, 128), // gray-500
            grid: "rgba(0, 0, 0, 0.08)".to_string(),
            surface: Rgb(255, 255, 255),
            tooltip_background: Rgb(255, 255, 255),
            tooltip_text: Rgb(17, 24, 39),   // gray-900
            tooltip_border: Rgb(229, 231, 235), // gray-200
            max_temp: Rgb(239, 68, 68),      // red-500
            avg_temp: Rgb(245, 158, 11),     // amber-500
            min_temp: Rgb(59, 130, 246),     // blue-500
            humidity: Rgb(14, 165, 233),     // sky-500
            precipitation: Rgb(99, 102, 241), // indigo-500
            wind: Rgb(16, 185, 129),         // emerald-500
            opacity: Opacity::default(),
        }
    }

    /// Dark palette: light text on slate, lifted series colors.
    #[must_use]
    pub fn dark() -> Self {
        Self {
            is_dark: true,
            text: Rgb(229, 231, 235),       // gray-200
            text_muted: Rgb(156, 163, 175), // gray-400
            grid: "rgba(255, 255, 255, 0.1)".to_string(),
            surface: Rgb(31, 41, 55),            // gray-800
            tooltip_background: Rgb(17, 24, 39), // gray-900
            tooltip_text: Rgb(243, 244, 246),    // gray-100
            tooltip_border: Rgb(55, 65, 81),     // gray-700
            max_temp: Rgb(248, 113, 113),        // red-400
            avg_temp: Rgb(251, 191, 36),         // amber-400
            min_temp: Rgb(96, 165, 250),         // blue-400
            humidity: Rgb(56, 189, 248),         // sky-400
            precipitation: Rgb(129, 140, 248),   // indigo-400
            wind: Rgb(52, 211, 153),             // emerald-400
            opacity: Opacity::default(),
        }
    }
}

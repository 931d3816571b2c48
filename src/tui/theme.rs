use ratatui::style::Color;
use crate::{config::ThemeName, eligibility::EligibilityStatus};

pub struct Theme {
    pub primary: Color,
    pub secondary: Color,
    pub success: Color,
    pub warning: Color,
    pub error: Color,
    pub info: Color,
    pub foreground: Color,
    pub muted: Color,
    pub border: Color,
    pub eligible: Color,
    pub ineligible: Color,
    pub unknown: Color,
}

impl Theme {
    pub fn from_name(name: ThemeName) -> Self {
        match name {
            ThemeName::Default => Self::default(),
            ThemeName::Dark => Self::dark(),
        }
    }

    pub fn default() -> Self {
        Self {
            primary: Color::Cyan,
            secondary: Color::Blue,
            success: Color::Green,
            warning: Color::Yellow,
            error: Color::Red,
            info: Color::LightBlue,
            foreground: Color::White,
            muted: Color::DarkGray,
            border: Color::Gray,
            eligible: Color::Rgb(76, 175, 80),
            ineligible: Color::Rgb(214, 214, 218),
            unknown: Color::Rgb(236, 236, 236),
        }
    }

    pub fn dark() -> Self {
        Self {
            primary: Color::Rgb(100, 200, 255),
            secondary: Color::Rgb(150, 150, 255),
            success: Color::Rgb(100, 255, 100),
            warning: Color::Rgb(255, 200, 100),
            error: Color::Rgb(255, 100, 100),
            info: Color::Rgb(150, 200, 255),
            foreground: Color::Rgb(220, 220, 230),
            muted: Color::Rgb(110, 110, 130),
            border: Color::Rgb(60, 60, 80),
            eligible: Color::Rgb(76, 175, 80),
            ineligible: Color::Rgb(120, 120, 128),
            unknown: Color::Rgb(70, 70, 80),
        }
    }

    pub fn status_color(&self, status: EligibilityStatus) -> Color {
        match status {
            EligibilityStatus::Eligible => self.eligible,
            EligibilityStatus::Ineligible => self.ineligible,
            EligibilityStatus::Unknown => self.unknown,
        }
    }
}

// ABOUTME: Theme module for the slidegen application
// ABOUTME: Maps the five named presentation styles to their fixed color palettes

use crate::document::RgbColor;
use log::debug;
use std::fmt;

/// The four colors applied to every slide of a presentation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Palette {
    pub background: RgbColor,
    pub title: RgbColor,
    pub body: RgbColor,
    pub accent: RgbColor,
}

/// Named presentation styles
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Theme {
    #[default]
    BusinessProfessional,
    CreativeModern,
    Academic,
    Minimalist,
    BoldVibrant,
}

impl Theme {
    pub const ALL: [Theme; 5] = [
        Theme::BusinessProfessional,
        Theme::CreativeModern,
        Theme::Academic,
        Theme::Minimalist,
        Theme::BoldVibrant,
    ];

    /// Exact, case-sensitive lookup of a style name
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|theme| theme.name() == name)
    }

    pub fn name(&self) -> &'static str {
        match self {
            Theme::BusinessProfessional => "Business Professional",
            Theme::CreativeModern => "Creative & Modern",
            Theme::Academic => "Academic",
            Theme::Minimalist => "Minimalist",
            Theme::BoldVibrant => "Bold & Vibrant",
        }
    }

    pub fn palette(&self) -> Palette {
        match self {
            Theme::BusinessProfessional => Palette {
                background: RgbColor::new(255, 255, 255),
                title: RgbColor::new(31, 73, 125),
                body: RgbColor::new(0, 0, 0),
                accent: RgbColor::new(79, 129, 189),
            },
            Theme::CreativeModern => Palette {
                background: RgbColor::new(242, 242, 242),
                title: RgbColor::new(255, 0, 110),
                body: RgbColor::new(51, 51, 51),
                accent: RgbColor::new(131, 56, 236),
            },
            Theme::Academic => Palette {
                background: RgbColor::new(255, 255, 255),
                title: RgbColor::new(0, 51, 102),
                body: RgbColor::new(0, 0, 0),
                accent: RgbColor::new(0, 102, 204),
            },
            Theme::Minimalist => Palette {
                background: RgbColor::new(250, 250, 250),
                title: RgbColor::new(80, 80, 80),
                body: RgbColor::new(100, 100, 100),
                accent: RgbColor::new(200, 200, 200),
            },
            Theme::BoldVibrant => Palette {
                background: RgbColor::new(0, 0, 0),
                title: RgbColor::new(255, 190, 11),
                body: RgbColor::new(255, 255, 255),
                accent: RgbColor::new(251, 86, 7),
            },
        }
    }
}

impl fmt::Display for Theme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Resolve a style name to its palette.
///
/// Unknown names fall back to the Business Professional palette without error.
pub fn resolve(style_name: &str) -> Palette {
    match Theme::from_name(style_name) {
        Some(theme) => theme.palette(),
        None => {
            debug!(
                "Unknown style {:?}, falling back to {}",
                style_name,
                Theme::default()
            );
            Theme::default().palette()
        }
    }
}

//! Renderers a job can be submitted for

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::RendersubError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Renderer {
    Vray,
    MentalRay,
    Software,
}

impl Renderer {
    pub const ALL: [Renderer; 3] = [Renderer::Vray, Renderer::MentalRay, Renderer::Software];

    /// Service-side identifier
    pub fn key(self) -> &'static str {
        match self {
            Renderer::Vray => "vray",
            Renderer::MentalRay => "mentalray",
            Renderer::Software => "software",
        }
    }

    /// Human-readable menu label
    pub fn label(self) -> &'static str {
        match self {
            Renderer::Vray => "V-Ray",
            Renderer::MentalRay => "Mental Ray",
            Renderer::Software => "Maya Software",
        }
    }

    /// Settings node and attribute holding the image file prefix
    pub fn prefix_attribute(self) -> (&'static str, &'static str) {
        match self {
            Renderer::Vray => ("vraySettings", "fileNamePrefix"),
            Renderer::MentalRay | Renderer::Software => ("defaultRenderGlobals", "imageFilePrefix"),
        }
    }

    /// Settings node and attribute holding the frame number padding
    pub fn padding_attribute(self) -> (&'static str, &'static str) {
        match self {
            Renderer::Vray => ("vraySettings", "fileNamePadding"),
            Renderer::MentalRay | Renderer::Software => {
                ("defaultRenderGlobals", "extensionPadding")
            }
        }
    }

    /// Whether the V-Ray only submit options apply
    pub fn is_vray(self) -> bool {
        self == Renderer::Vray
    }
}

impl fmt::Display for Renderer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl FromStr for Renderer {
    type Err = RendersubError;

    /// Accepts either the key or the menu label, case-insensitively
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        Renderer::ALL
            .into_iter()
            .find(|r| r.key().eq_ignore_ascii_case(wanted) || r.label().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| RendersubError::UnknownRenderer(s.to_string()))
    }
}

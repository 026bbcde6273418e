use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use crate::utils::ConvertError;

/// Encoder selection for converted files.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TargetFormat {
    Png,
    Jpeg,
    Webp,
    WebpLossy,
    WebpLossless,
}

impl TargetFormat {
    pub const ALL: [TargetFormat; 5] = [
        Self::Png,
        Self::Jpeg,
        Self::Webp,
        Self::WebpLossy,
        Self::WebpLossless,
    ];

    /// Upper-case encoder name, e.g. `WEBP_LOSSLESS`
    pub fn name(&self) -> &'static str {
        match self {
            Self::Png => "PNG",
            Self::Jpeg => "JPEG",
            Self::Webp => "WEBP",
            Self::WebpLossy => "WEBP_LOSSY",
            Self::WebpLossless => "WEBP_LOSSLESS",
        }
    }

    /// Canonical short name used as the output file extension.
    ///
    /// Lower-cased name truncated at the first underscore.
    pub fn extension(&self) -> String {
        let name = self.name();
        let short = name.split('_').next().unwrap_or(name);
        short.to_lowercase()
    }

    /// MIME type handed to storage when creating the output file
    pub fn mime_type(&self) -> String {
        format!("image/{}", self.extension())
    }

    /// Whether output at `quality` is lossless.
    ///
    /// Plain `WEBP` is lossy below 100 and lossless at 100.
    pub fn is_lossless_at(&self, quality: u8) -> bool {
        match self {
            Self::Png | Self::WebpLossless => true,
            Self::Webp => quality >= 100,
            Self::Jpeg | Self::WebpLossy => false,
        }
    }
}

impl fmt::Display for TargetFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for TargetFormat {
    type Err = ConvertError;

    fn from_str(name: &str) -> Result<Self, Self::Err> {
        let wanted = name.trim().to_uppercase();
        Self::ALL
            .into_iter()
            .find(|format| format.name() == wanted)
            .ok_or_else(|| ConvertError::encode(format!(
                "Unsupported target format: {}", name
            )))
    }
}

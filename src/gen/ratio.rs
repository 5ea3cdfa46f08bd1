//! Internal aspect-ratio vocabulary and the provider's size-token mapping.
//!
//! Internally ratios are written "16:9"; the image endpoint expects "16x9".
//! The mapping is a fixed table in both directions so tokens round-trip.

use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum AspectRatio {
    #[default]
    Square,
    ThreeFour,
    FourThree,
    NineSixteen,
    SixteenNine,
    TwoThree,
    ThreeTwo,
    FourFive,
    FiveFour,
    UltraWide,
}

impl AspectRatio {
    pub const ALL: [AspectRatio; 10] = [
        AspectRatio::Square,
        AspectRatio::ThreeFour,
        AspectRatio::FourThree,
        AspectRatio::NineSixteen,
        AspectRatio::SixteenNine,
        AspectRatio::TwoThree,
        AspectRatio::ThreeTwo,
        AspectRatio::FourFive,
        AspectRatio::FiveFour,
        AspectRatio::UltraWide,
    ];

    /// The internal token, e.g. "16:9".
    pub fn as_str(self) -> &'static str {
        match self {
            AspectRatio::Square => "1:1",
            AspectRatio::ThreeFour => "3:4",
            AspectRatio::FourThree => "4:3",
            AspectRatio::NineSixteen => "9:16",
            AspectRatio::SixteenNine => "16:9",
            AspectRatio::TwoThree => "2:3",
            AspectRatio::ThreeTwo => "3:2",
            AspectRatio::FourFive => "4:5",
            AspectRatio::FiveFour => "5:4",
            AspectRatio::UltraWide => "21:9",
        }
    }

    /// The provider's size token, e.g. "16x9".
    pub fn provider_token(self) -> &'static str {
        match self {
            AspectRatio::Square => "1x1",
            AspectRatio::ThreeFour => "3x4",
            AspectRatio::FourThree => "4x3",
            AspectRatio::NineSixteen => "9x16",
            AspectRatio::SixteenNine => "16x9",
            AspectRatio::TwoThree => "2x3",
            AspectRatio::ThreeTwo => "3x2",
            AspectRatio::FourFive => "4x5",
            AspectRatio::FiveFour => "5x4",
            AspectRatio::UltraWide => "21x9",
        }
    }

    pub fn from_provider_token(token: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|ratio| ratio.provider_token() == token)
    }

    /// Parse an internal token. Unknown tokens fall back to square.
    pub fn parse_or_square(token: &str) -> Self {
        Self::ALL
            .into_iter()
            .find(|ratio| ratio.as_str() == token)
            .unwrap_or_default()
    }
}

impl fmt::Display for AspectRatio {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

//! Hull configuration and validation.
//!
//! The generator is driven by seven integers: the interior dimensions of
//! the main cuboid, the bow slope, and three armor thicknesses. Bad values
//! are configuration errors caught before any synthesis begins — the
//! builder itself never fails at runtime.
//!
//! ```
//! use hullwright_logic::hull_config::{validate_config, HullConfig};
//!
//! let config = HullConfig::default();
//! assert!(validate_config(&config).is_empty());
//! assert_eq!(config.target_width(), config.width + 2);
//! ```

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::depth::MAX_DEPTH;

/// Dimensions and armor for one hull.
///
/// `width`, `height` and `length` are interior measurements; the shell
/// walls and armor layers are added on top (see the `target_*` methods).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HullConfig {
    /// Interior width of the main cuboid, in blocks.
    pub width: i32,
    /// Interior height of the main cuboid.
    pub height: i32,
    /// Interior length of the main cuboid, stern to bow.
    pub length: i32,
    /// Bow rise-per-run: the bow advances `slope` blocks forward for every
    /// block it rises. 1 is the bluntest bow, 4 the longest.
    pub slope: i32,
    /// Additional side armor layers inside each wall.
    pub side_armor: i32,
    /// Additional deck armor layers under the top face.
    pub deck_armor: i32,
    /// Additional bottom armor layers above the floor.
    pub bottom_armor: i32,
}

impl Default for HullConfig {
    fn default() -> Self {
        Self {
            width: 7,
            height: 4,
            length: 20,
            slope: 2,
            side_armor: 0,
            deck_armor: 0,
            bottom_armor: 0,
        }
    }
}

impl HullConfig {
    /// Exterior width: interior plus both shell walls and side armor.
    pub fn target_width(&self) -> i32 {
        self.width + 2 + 2 * self.side_armor
    }

    /// Exterior height: interior plus floor, top face, and deck/bottom armor.
    pub fn target_height(&self) -> i32 {
        self.height + 2 + self.deck_armor + self.bottom_armor
    }

    /// Length of the main cuboid before the bow starts narrowing.
    pub fn target_length(&self) -> i32 {
        self.length + 1 + self.side_armor
    }
}

/// Most armor layers a single face can carry: depth 1 is the shell, so
/// layers 2..=[`MAX_DEPTH`] remain for armor.
pub const MAX_ARMOR_LAYERS: i32 = MAX_DEPTH as i32 - 1;

/// Configuration validation error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// Interior width must be positive.
    NonPositiveWidth(i32),
    /// Interior height must be positive.
    NonPositiveHeight(i32),
    /// Interior length must be positive.
    NonPositiveLength(i32),
    /// Slope outside 1..=4.
    SlopeOutOfRange(i32),
    /// Side armor outside 0..=[`MAX_ARMOR_LAYERS`].
    SideArmorOutOfRange(i32),
    /// Deck armor outside 0..=[`MAX_ARMOR_LAYERS`].
    DeckArmorOutOfRange(i32),
    /// Bottom armor outside 0..=[`MAX_ARMOR_LAYERS`].
    BottomArmorOutOfRange(i32),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::NonPositiveWidth(v) => write!(f, "width must be positive, got {v}"),
            ConfigError::NonPositiveHeight(v) => write!(f, "height must be positive, got {v}"),
            ConfigError::NonPositiveLength(v) => write!(f, "length must be positive, got {v}"),
            ConfigError::SlopeOutOfRange(v) => write!(f, "slope must be between 1 and 4, got {v}"),
            ConfigError::SideArmorOutOfRange(v) => {
                write!(f, "side armor must be between 0 and {MAX_ARMOR_LAYERS}, got {v}")
            }
            ConfigError::DeckArmorOutOfRange(v) => {
                write!(f, "deck armor must be between 0 and {MAX_ARMOR_LAYERS}, got {v}")
            }
            ConfigError::BottomArmorOutOfRange(v) => {
                write!(f, "bottom armor must be between 0 and {MAX_ARMOR_LAYERS}, got {v}")
            }
        }
    }
}

/// Validate a hull configuration, returning all errors found.
pub fn validate_config(config: &HullConfig) -> Vec<ConfigError> {
    let mut errors = Vec::new();

    if config.width <= 0 {
        errors.push(ConfigError::NonPositiveWidth(config.width));
    }
    if config.height <= 0 {
        errors.push(ConfigError::NonPositiveHeight(config.height));
    }
    if config.length <= 0 {
        errors.push(ConfigError::NonPositiveLength(config.length));
    }
    if !(1..=4).contains(&config.slope) {
        errors.push(ConfigError::SlopeOutOfRange(config.slope));
    }
    if !(0..=MAX_ARMOR_LAYERS).contains(&config.side_armor) {
        errors.push(ConfigError::SideArmorOutOfRange(config.side_armor));
    }
    if !(0..=MAX_ARMOR_LAYERS).contains(&config.deck_armor) {
        errors.push(ConfigError::DeckArmorOutOfRange(config.deck_armor));
    }
    if !(0..=MAX_ARMOR_LAYERS).contains(&config.bottom_armor) {
        errors.push(ConfigError::BottomArmorOutOfRange(config.bottom_armor));
    }

    errors
}

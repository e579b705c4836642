use std::{fmt, str::FromStr};

use thiserror::Error;

pub const MAX_LEVEL_OF_DETAIL: u8 = 23;

/// Address of a tile in the quadtree.
///
/// Only constructible through [`QuadKey::new`] or parsing, so the tile coordinates always fit
/// the level of detail and two unequal keys never share a canonical string. Ordering is
/// structural (level of detail first, then x, then y).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct QuadKey {
    level_of_detail: u8,
    tile_x: u32,
    tile_y: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum QuadKeyError {
    #[error("Invalid quadkey digit '{digit}' in '{quad_key}'")]
    InvalidDigit { quad_key: String, digit: char },

    #[error("Level of detail {0} is deeper than {max}", max = MAX_LEVEL_OF_DETAIL)]
    TooDeep(usize),

    #[error("Tile ({tile_x}, {tile_y}) is outside level of detail {level_of_detail}")]
    OutOfRange {
        level_of_detail: u8,
        tile_x: u32,
        tile_y: u32,
    },
}

impl QuadKey {
    pub fn new(level_of_detail: u8, tile_x: u32, tile_y: u32) -> Result<Self, QuadKeyError> {
        if level_of_detail > MAX_LEVEL_OF_DETAIL {
            return Err(QuadKeyError::TooDeep(level_of_detail as usize));
        }

        let tiles = 1u32 << level_of_detail;
        if tile_x >= tiles || tile_y >= tiles {
            return Err(QuadKeyError::OutOfRange {
                level_of_detail,
                tile_x,
                tile_y,
            });
        }

        Ok(Self {
            level_of_detail,
            tile_x,
            tile_y,
        })
    }

    pub fn level_of_detail(&self) -> u8 {
        self.level_of_detail
    }

    pub fn tile_x(&self) -> u32 {
        self.tile_x
    }

    pub fn tile_y(&self) -> u32 {
        self.tile_y
    }
}

/// Canonical form: one base-4 digit per level, most significant level first.
impl fmt::Display for QuadKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for level in (1..=self.level_of_detail).rev() {
            let mask = 1u32 << (level - 1);
            let mut digit = b'0';
            if self.tile_x & mask != 0 {
                digit += 1;
            }
            if self.tile_y & mask != 0 {
                digit += 2;
            }
            write!(f, "{}", digit as char)?;
        }
        Ok(())
    }
}

impl FromStr for QuadKey {
    type Err = QuadKeyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.len() > MAX_LEVEL_OF_DETAIL as usize {
            return Err(QuadKeyError::TooDeep(s.len()));
        }

        let (mut tile_x, mut tile_y) = (0u32, 0u32);
        for c in s.chars() {
            tile_x <<= 1;
            tile_y <<= 1;
            match c {
                '0' => {}
                '1' => tile_x |= 1,
                '2' => tile_y |= 1,
                '3' => {
                    tile_x |= 1;
                    tile_y |= 1;
                }
                digit => {
                    return Err(QuadKeyError::InvalidDigit {
                        quad_key: s.to_string(),
                        digit,
                    })
                }
            }
        }
        QuadKey::new(s.len() as u8, tile_x, tile_y)
    }
}

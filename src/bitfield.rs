use crate::tiles::{Tile, TileIterator};
use primitive_types::U256;
use std::fmt::Debug;
use std::ops::{BitAnd, BitOr, Not, Shl};

/// A trait for any integer type that can be used as a bitfield to store a set of tiles. See also
/// the [`crate::impl_bitfield!`] and [`crate::impl_bitfield_bigint!`] macros that can help to
/// implement this trait for a particular integer type.
pub trait BitField:
    Sized +
    Copy +
    From<u8> +
    BitAnd<Output=Self> +
    BitOr<Output=Self> +
    Not<Output=Self> +
    Shl<u32, Output=Self> +
    Eq +
    Default +
    Debug
{
    /// The number of bits used to represent a single row of the board. This number should, of
    /// course, be at least equal to the board length, and its square should not exceed the number
    /// of bits in the integer type.
    const ROW_WIDTH: u8;

    /// Returns the number of ones in the binary representation of `self`.
    fn count_ones(&self) -> u32;

    /// Create a bitmask for the given tile. Only the bit corresponding to the tile's position on
    /// the board will be set.
    fn tile_mask(t: Tile) -> Self {
        Self::from(1) << ((t.row as u32 * Self::ROW_WIDTH as u32) + t.col as u32)
    }

    /// Whether the bitfield is empty (ie, no set bits).
    fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

/// Implement the [`BitField`] trait for the given integer type. First argument should be the type
/// to implement the trait for; the second should be the value to use for
/// [`BitField::ROW_WIDTH`]. This macro is for use with the standard library integer types.
#[macro_export] macro_rules! impl_bitfield {
    ($t:ty, $row_width:expr) => {
        impl BitField for $t {
            const ROW_WIDTH: u8 = $row_width;

            fn count_ones(&self) -> u32 {
                <$t>::count_ones(*self)
            }
        }
    };
}

/// Implement the [`BitField`] trait for one of the big integer types provided by the
/// [`primitive_types`] crate, whose limbs are exposed as a `u64` array.
#[macro_export] macro_rules! impl_bitfield_bigint {
    ($t:ty, $row_width:expr) => {
        impl BitField for $t {
            const ROW_WIDTH: u8 = $row_width;

            fn count_ones(&self) -> u32 {
                self.0.iter().map(|w| w.count_ones()).sum()
            }
        }
    };
}

impl_bitfield!(u128, 11);
impl_bitfield_bigint!(U256, 15);

/// A set of tiles on a board, backed by a [`BitField`].
#[derive(Copy, Clone, Eq, PartialEq, Debug, Default)]
pub struct TileMask<T: BitField> {
    bits: T,
    side_len: u8
}

impl<T: BitField> TileMask<T> {
    /// Create an empty mask for a board with the given side length.
    pub fn new(side_len: u8) -> Self {
        assert!(side_len <= T::ROW_WIDTH, "board too large for bitfield");
        Self { bits: T::default(), side_len }
    }

    pub fn insert(&mut self, tile: Tile) {
        self.bits = self.bits | T::tile_mask(tile);
    }

    pub fn remove(&mut self, tile: Tile) {
        self.bits = self.bits & !T::tile_mask(tile);
    }

    pub fn contains(&self, tile: Tile) -> bool {
        !(self.bits & T::tile_mask(tile)).is_empty()
    }

    pub fn len(&self) -> usize {
        self.bits.count_ones() as usize
    }

    pub fn is_empty(&self) -> bool {
        self.bits.is_empty()
    }

    /// Tiles present in both masks.
    pub fn intersection(&self, other: &Self) -> Self {
        Self { bits: self.bits & other.bits, side_len: self.side_len }
    }

    /// Tiles present in either mask.
    pub fn union(&self, other: &Self) -> Self {
        Self { bits: self.bits | other.bits, side_len: self.side_len }
    }

    /// Iterate over the tiles in the mask, row by row starting at the top.
    pub fn iter(&self) -> impl Iterator<Item = Tile> + '_ {
        TileIterator::new(self.side_len).filter(|t| self.contains(*t))
    }
}

impl<T: BitField> Extend<Tile> for TileMask<T> {
    fn extend<I: IntoIterator<Item = Tile>>(&mut self, iter: I) {
        for tile in iter {
            self.insert(tile);
        }
    }
}

/// Tile mask large enough for any supported board.
pub type GridMask = TileMask<U256>;

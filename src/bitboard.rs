//! A fixed-size cell set using const generics.
//!
//! The type is `no_std` friendly and avoids heap allocations. A `W×H` grid is
//! packed into an unsigned integer `T`, one bit per [`GridLocation`], row by
//! row. The engine stores occupancy, attacked cells, ship masks and hit maps
//! in these.

use core::fmt;
use core::ops::{BitAnd, BitOr, BitOrAssign, Not};
use core::{any, mem};
use num_traits::{PrimInt, Unsigned, Zero};

use crate::common::GridLocation;

/// Errors returned by bitboard operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum BitBoardError {
    /// Requested board size W*H exceeds capacity of `T::BITS`.
    #[error("board of {cells} cells exceeds the {capacity} bits available")]
    SizeTooLarge { cells: usize, capacity: usize },
    /// Location lies outside the `W×H` board.
    #[error("location {0} is outside the board")]
    OutOfBounds(GridLocation),
}

/// A fixed-size `W×H` set of cells stored in the unsigned integer `T`.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct BitBoard<T, const W: usize, const H: usize>
where
    T: PrimInt + Unsigned + Zero,
{
    bits: T,
}

impl<T, const W: usize, const H: usize> BitBoard<T, W, H>
where
    T: PrimInt + Unsigned + Zero,
{
    /// Number of usable bits in the board (`W * H`).
    const BOARD_BITS: usize = W * H;

    #[inline]
    fn mask() -> T {
        if Self::BOARD_BITS == mem::size_of::<T>() * 8 {
            !T::zero()
        } else {
            (T::one() << Self::BOARD_BITS) - T::one()
        }
    }

    /// Create a new empty board without size check.
    #[inline]
    pub fn new() -> Self {
        BitBoard { bits: T::zero() }
    }

    /// Fallible constructor: returns `Err(SizeTooLarge)` if W*H > T::BITS.
    pub fn try_new() -> Result<Self, BitBoardError> {
        let capacity = mem::size_of::<T>() * 8;
        if Self::BOARD_BITS > capacity {
            Err(BitBoardError::SizeTooLarge {
                cells: Self::BOARD_BITS,
                capacity,
            })
        } else {
            Ok(Self::new())
        }
    }

    /// Creates a board from an iterator over locations.
    pub fn from_locations<I>(iter: I) -> Result<Self, BitBoardError>
    where
        I: IntoIterator<Item = GridLocation>,
    {
        let mut board = Self::new();
        for loc in iter {
            board.set(loc)?;
        }
        Ok(board)
    }

    /// Number of cells in the set.
    pub fn count_ones(&self) -> usize {
        self.bits.count_ones() as usize
    }

    /// Returns true if no cells are set.
    pub fn is_empty(&self) -> bool {
        self.bits.is_zero()
    }

    /// Returns true if every cell of the board is set.
    pub fn is_full(&self) -> bool {
        self.bits == Self::mask()
    }

    /// Returns true if the two boards share at least one cell.
    pub fn intersects(&self, other: &Self) -> bool {
        !(self.bits & other.bits).is_zero()
    }

    /// Returns true if every cell of `other` is also set here.
    pub fn is_superset(&self, other: &Self) -> bool {
        (self.bits & other.bits) == other.bits
    }

    /// Gets the cell at `loc`.
    pub fn get(&self, loc: GridLocation) -> Result<bool, BitBoardError> {
        let idx = Self::index(loc)?;
        Ok(((self.bits >> idx) & T::one()) != T::zero())
    }

    /// Like [`get`](Self::get), but out-of-bounds locations read as unset.
    #[inline]
    pub fn contains(&self, loc: GridLocation) -> bool {
        self.get(loc).unwrap_or(false)
    }

    /// Sets the cell at `loc`.
    pub fn set(&mut self, loc: GridLocation) -> Result<(), BitBoardError> {
        let idx = Self::index(loc)?;
        self.bits = self.bits | (T::one() << idx);
        Ok(())
    }

    /// Clears the cell at `loc`.
    pub fn clear(&mut self, loc: GridLocation) -> Result<(), BitBoardError> {
        let idx = Self::index(loc)?;
        self.bits = self.bits & !(T::one() << idx);
        Ok(())
    }

    /// Clears every cell.
    #[inline]
    pub fn clear_all(&mut self) {
        self.bits = T::zero();
    }

    #[inline]
    fn index(loc: GridLocation) -> Result<usize, BitBoardError> {
        if loc.x >= W || loc.y >= H {
            Err(BitBoardError::OutOfBounds(loc))
        } else {
            Ok(loc.y * W + loc.x)
        }
    }

    /// Iterator over the set cells, row by row.
    #[inline]
    pub fn iter(&self) -> SetCells<T, W, H> {
        SetCells {
            bits: self.bits,
            idx: 0,
        }
    }

    /// Iterator over every location of the board that is *not* set.
    pub fn iter_unset(&self) -> SetCells<T, W, H> {
        (!*self).iter()
    }
}

impl<T, const W: usize, const H: usize> Default for BitBoard<T, W, H>
where
    T: PrimInt + Unsigned + Zero,
{
    #[inline]
    fn default() -> Self {
        Self::new()
    }
}

impl<T, const W: usize, const H: usize> fmt::Debug for BitBoard<T, W, H>
where
    T: PrimInt + Unsigned + Zero,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "BitBoard<{}, {}x{}>:", any::type_name::<T>(), W, H)?;
        for y in 0..H {
            for x in 0..W {
                let bit = if self.contains(GridLocation::new(x, y)) {
                    '■'
                } else {
                    '□'
                };
                write!(f, "{} ", bit)?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

/// Iterator over the set cells of a bitboard.
#[derive(Clone, Copy)]
pub struct SetCells<T, const W: usize, const H: usize> {
    bits: T,
    idx: usize,
}

impl<T, const W: usize, const H: usize> Iterator for SetCells<T, W, H>
where
    T: PrimInt + Unsigned + Zero,
{
    type Item = GridLocation;

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        while self.idx < W * H {
            let idx = self.idx;
            self.idx += 1;
            if ((self.bits >> idx) & T::one()) != T::zero() {
                return Some(GridLocation::new(idx % W, idx / W));
            }
        }
        None
    }
}

impl<T, const W: usize, const H: usize> BitAnd for BitBoard<T, W, H>
where
    T: PrimInt + Unsigned + Zero,
{
    type Output = Self;
    fn bitand(self, rhs: Self) -> Self {
        BitBoard {
            bits: self.bits & rhs.bits,
        }
    }
}

impl<T, const W: usize, const H: usize> BitOr for BitBoard<T, W, H>
where
    T: PrimInt + Unsigned + Zero,
{
    type Output = Self;
    fn bitor(self, rhs: Self) -> Self {
        BitBoard {
            bits: self.bits | rhs.bits,
        }
    }
}

impl<T, const W: usize, const H: usize> BitOrAssign for BitBoard<T, W, H>
where
    T: PrimInt + Unsigned + Zero,
{
    #[inline]
    fn bitor_assign(&mut self, rhs: Self) {
        self.bits = self.bits | rhs.bits;
    }
}

/// Complement within the board bounds.
impl<T, const W: usize, const H: usize> Not for BitBoard<T, W, H>
where
    T: PrimInt + Unsigned + Zero,
{
    type Output = Self;
    #[inline]
    fn not(self) -> Self {
        BitBoard {
            bits: !self.bits & Self::mask(),
        }
    }
}

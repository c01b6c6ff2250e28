use std::ops::Index;
use std::slice;

/// Fixed-size 2D array, stored row-major by `i` then `j`, whose indexing wraps on both axes.
///
/// Cells are addressed as `(j, i)`: `j` runs along the width (longitude), `i` along the
/// height (latitude). Any integer pair is a valid index; it is reduced modulo the extents
/// so that `grid[(-1, 0)]` is the last cell of the first row.
#[derive(Clone, Debug, PartialEq)]
pub struct Grid<T> {
    elems:  Vec<T>,
    width:  usize,
    height: usize,
}

impl<T> Grid<T> {
    pub fn from_fn(width: usize, height: usize, mut f: impl FnMut(usize, usize) -> T) -> Self {
        if width == 0 || height == 0 { panic!("grid extents must be non-zero"); }

        let mut elems = Vec::with_capacity(width * height);
        for i in 0..height {
            for j in 0..width {
                elems.push(f(j, i));
            }
        }
        Grid { elems, width, height }
    }

    #[inline]
    pub fn width(&self) -> usize {
        self.width
    }

    #[inline]
    pub fn height(&self) -> usize {
        self.height
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.elems.len()
    }

    /// Reduces any `(j, i)` to the canonical cell it names.
    #[inline]
    pub fn wrap(&self, j: isize, i: isize) -> (usize, usize) {
        (
            j.rem_euclid(self.width as isize) as usize,
            i.rem_euclid(self.height as isize) as usize,
        )
    }

    #[inline]
    fn offset(&self, j: isize, i: isize) -> usize {
        let (j, i) = self.wrap(j, i);
        i * self.width + j
    }

    #[inline]
    pub fn get(&self, j: isize, i: isize) -> &T {
        &self.elems[self.offset(j, i)]
    }

    /// Cells in storage order, with their canonical `(j, i)`.
    pub fn iter_indexed(&self) -> impl Iterator<Item = ((usize, usize), &T)> {
        let width = self.width;
        self.elems.iter().enumerate().map(move |(k, elem)| ((k % width, k / width), elem))
    }

    pub fn iter(&self) -> slice::Iter<T> {
        self.elems.iter()
    }

    pub fn as_slice(&self) -> &[T] {
        &self.elems
    }
}

impl<T> Index<(isize, isize)> for Grid<T> {
    type Output = T;

    fn index(&self, (j, i): (isize, isize)) -> &T {
        self.get(j, i)
    }
}

impl<T> Index<(usize, usize)> for Grid<T> {
    type Output = T;

    fn index(&self, (j, i): (usize, usize)) -> &T {
        if j >= self.width || i >= self.height { panic!("index out of range"); }
        &self.elems[i * self.width + j]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_fn_visits_every_cell_once() {
        let grid = Grid::from_fn(4, 3, |j, i| (j, i));
        assert_eq!(grid.len(), 12);
        for ((j, i), &cell) in grid.iter_indexed() {
            assert_eq!(cell, (j, i));
        }
    }

    #[test]
    fn signed_indexing_wraps_both_axes() {
        let grid = Grid::from_fn(4, 3, |j, i| 10 * i + j);
        assert_eq!(grid[(-1_isize, 0_isize)], 3);
        assert_eq!(grid[(4_isize, 3_isize)], 0);
        assert_eq!(grid[(-5_isize, -4_isize)], grid[(3_usize, 2_usize)]);
        assert_eq!(grid[(9_isize, 7_isize)], grid[(1_usize, 1_usize)]);
    }

    #[test]
    #[should_panic(expected = "index out of range")]
    fn unsigned_indexing_is_bounds_checked() {
        let grid = Grid::from_fn(4, 3, |_, _| 0);
        let _ = grid[(4_usize, 0_usize)];
    }
}

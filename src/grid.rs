/// Row-major flat grid. Row index first, matching the `[row][col]` layout of the data files.
#[derive(Clone, Debug, PartialEq)]
pub struct Grid<T> {
    pub data: Vec<T>,
    pub rows: usize,
    pub cols: usize,
}

impl<T: Copy + Default> Grid<T> {
    pub fn new(rows: usize, cols: usize) -> Self {
        Self {
            data: vec![T::default(); rows * cols],
            rows,
            cols,
        }
    }

    #[inline]
    pub fn idx(&self, row: usize, col: usize) -> usize {
        debug_assert!(row < self.rows && col < self.cols);
        row * self.cols + col
    }

    #[inline]
    pub fn get(&self, row: usize, col: usize) -> T {
        self.data[self.idx(row, col)]
    }

    #[inline]
    pub fn set(&mut self, row: usize, col: usize, v: T) {
        let i = self.idx(row, col);
        self.data[i] = v;
    }

    #[inline]
    pub fn shape(&self) -> (usize, usize) {
        (self.rows, self.cols)
    }

    /// Iterate rows as slices.
    pub fn rows_iter(&self) -> impl Iterator<Item = &[T]> {
        // chunks(0) panics; an empty grid has no rows to yield anyway
        self.data.chunks(self.cols.max(1)).take(self.rows)
    }
}

impl Grid<f64> {
    #[inline]
    pub fn add(&mut self, row: usize, col: usize, v: f64) {
        let i = self.idx(row, col);
        self.data[i] += v;
    }

    /// Divide every cell by `divisor`.
    pub fn scale_down(&mut self, divisor: f64) {
        for v in self.data.iter_mut() {
            *v /= divisor;
        }
    }

    /// Largest cell value, never below `floor`.
    pub fn max_from(&self, floor: f64) -> f64 {
        self.data.iter().copied().fold(floor, f64::max)
    }

    /// (min, max) over all cells, or None when empty.
    pub fn min_max(&self) -> Option<(f64, f64)> {
        if self.data.is_empty() {
            return None;
        }
        let min = self.data.iter().copied().fold(f64::INFINITY, f64::min);
        let max = self.data.iter().copied().fold(f64::NEG_INFINITY, f64::max);
        Some((min, max))
    }
}

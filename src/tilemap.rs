use crate::hex::HexCoord;

/// Dense storage for a hexagon-shaped map of the given radius.
///
/// Backed by a `(2·radius+1)²` array indexed by `(r + radius, q + radius)`.
/// Cells outside the hexagon footprint stay empty. The shifted indexing never
/// leaves this type: callers only ever speak in `HexCoord`.
#[derive(Clone, Debug)]
pub struct HexTilemap<T> {
    radius: u32,
    side: usize,
    data: Vec<Option<T>>,
}

impl<T> HexTilemap<T> {
    pub fn new(radius: u32) -> Self {
        let side = 2 * radius as usize + 1;
        let mut data = Vec::with_capacity(side * side);
        data.resize_with(side * side, || None);
        Self { radius, side, data }
    }

    pub fn radius(&self) -> u32 {
        self.radius
    }

    /// True if `coord` lies inside the hexagon footprint.
    pub fn in_footprint(&self, coord: HexCoord) -> bool {
        coord.q.unsigned_abs() <= self.radius
            && coord.r.unsigned_abs() <= self.radius
            && coord.distance(HexCoord::ORIGIN) <= self.radius
    }

    /// Array index for `coord`, or `None` outside the footprint.
    fn index(&self, coord: HexCoord) -> Option<usize> {
        if !self.in_footprint(coord) {
            return None;
        }
        let n = self.radius as i32;
        let row = (coord.r + n) as usize;
        let col = (coord.q + n) as usize;
        Some(row * self.side + col)
    }

    /// Decode an array index back to its coordinate.
    fn coord_at(&self, index: usize) -> HexCoord {
        let n = self.radius as i32;
        let row = (index / self.side) as i32;
        let col = (index % self.side) as i32;
        HexCoord::new(col - n, row - n)
    }

    pub fn get(&self, coord: HexCoord) -> Option<&T> {
        self.index(coord).and_then(|idx| self.data[idx].as_ref())
    }

    pub fn get_mut(&mut self, coord: HexCoord) -> Option<&mut T> {
        let idx = self.index(coord)?;
        self.data[idx].as_mut()
    }

    /// Store `value` at `coord`, returning the previous occupant.
    ///
    /// # Panics
    /// If `coord` is outside the footprint.
    pub fn insert(&mut self, coord: HexCoord, value: T) -> Option<T> {
        let idx = match self.index(coord) {
            Some(idx) => idx,
            None => panic!("{} lies outside a radius-{} footprint", coord, self.radius),
        };
        self.data[idx].replace(value)
    }

    /// Number of occupied cells.
    pub fn len(&self) -> usize {
        self.data.iter().filter(|cell| cell.is_some()).count()
    }

    pub fn is_empty(&self) -> bool {
        self.data.iter().all(|cell| cell.is_none())
    }

    /// Occupied cells in row-major order (`r` ascending, then `q` ascending).
    pub fn iter(&self) -> impl Iterator<Item = (HexCoord, &T)> {
        self.data
            .iter()
            .enumerate()
            .filter_map(move |(idx, cell)| cell.as_ref().map(|v| (self.coord_at(idx), v)))
    }

    /// Mutable variant of [`HexTilemap::iter`], same order.
    pub fn iter_mut(&mut self) -> impl Iterator<Item = (HexCoord, &mut T)> {
        let side = self.side;
        let n = self.radius as i32;
        self.data.iter_mut().enumerate().filter_map(move |(idx, cell)| {
            let coord = HexCoord::new((idx % side) as i32 - n, (idx / side) as i32 - n);
            cell.as_mut().map(|v| (coord, v))
        })
    }
}

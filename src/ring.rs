use crate::geometry_utilities::types::*;

/// Stable identity of a coordinate within its geometry.
///
/// Survives insertions and removals around it, so handles can refer to
/// coordinates without tracking their index.
#[derive(Copy, Clone, Debug, Hash, Eq, PartialEq, Ord, PartialOrd)]
pub struct CoordinateId(u32);

impl CoordinateId {
    pub(crate) fn new(id: u32) -> CoordinateId {
        CoordinateId(id)
    }
}

#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Coordinate {
    pub id: CoordinateId,
    pub position: MapPoint,
}

/// Ordered coordinate sequence, either an open path or a closed ring.
///
/// A closed ring never stores its first coordinate again at the end,
/// the successor of the last coordinate is implicitly the first one.
#[derive(Clone, Debug)]
pub struct Ring {
    coordinates: Vec<Coordinate>,
    closed: bool,
}

impl Ring {
    pub fn open() -> Ring {
        Ring {
            coordinates: vec![],
            closed: false,
        }
    }

    pub fn closed() -> Ring {
        Ring {
            coordinates: vec![],
            closed: true,
        }
    }

    pub fn is_closed(&self) -> bool {
        self.closed
    }

    pub fn len(&self) -> usize {
        self.coordinates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.coordinates.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Coordinate> {
        self.coordinates.iter()
    }

    pub fn positions(&self) -> impl Iterator<Item = MapPoint> + '_ {
        self.coordinates.iter().map(|c| c.position)
    }

    pub fn get(&self, index: usize) -> Option<&Coordinate> {
        self.coordinates.get(index)
    }

    pub fn first(&self) -> Option<&Coordinate> {
        self.coordinates.first()
    }

    pub fn last(&self) -> Option<&Coordinate> {
        self.coordinates.last()
    }

    pub fn contains(&self, id: CoordinateId) -> bool {
        self.index_of(id).is_some()
    }

    pub fn index_of(&self, id: CoordinateId) -> Option<usize> {
        self.coordinates.iter().position(|c| c.id == id)
    }

    pub fn position_of(&self, id: CoordinateId) -> Option<MapPoint> {
        self.coordinates.iter().find(|c| c.id == id).map(|c| c.position)
    }

    /// Moves a coordinate in place. Returns false if the ring does not hold it.
    pub fn set_position(&mut self, id: CoordinateId, position: MapPoint) -> bool {
        match self.coordinates.iter_mut().find(|c| c.id == id) {
            Some(c) => {
                c.position = position;
                true
            }
            None => false,
        }
    }

    pub(crate) fn push(&mut self, coordinate: Coordinate) {
        self.coordinates.push(coordinate);
    }

    pub(crate) fn unshift(&mut self, coordinate: Coordinate) {
        self.coordinates.insert(0, coordinate);
    }

    pub(crate) fn insert(&mut self, index: usize, coordinate: Coordinate) {
        self.coordinates.insert(index.min(self.len()), coordinate);
    }

    pub(crate) fn remove(&mut self, id: CoordinateId) -> Option<Coordinate> {
        let index = self.index_of(id)?;
        Some(self.coordinates.remove(index))
    }

    pub fn last_index(&self) -> Option<usize> {
        self.len().checked_sub(1)
    }

    pub fn prev_index(&self, index: usize) -> Option<usize> {
        if self.len() < 2 || index >= self.len() {
            None
        } else if index == 0 {
            if self.closed {
                Some(self.len() - 1)
            } else {
                None
            }
        } else {
            Some(index - 1)
        }
    }

    pub fn next_index(&self, index: usize) -> Option<usize> {
        if self.len() < 2 || index >= self.len() {
            None
        } else if index + 1 == self.len() {
            if self.closed {
                Some(0)
            } else {
                None
            }
        } else {
            Some(index + 1)
        }
    }

    pub fn previous(&self, id: CoordinateId) -> Option<CoordinateId> {
        let index = self.prev_index(self.index_of(id)?)?;
        Some(self.coordinates[index].id)
    }

    pub fn next(&self, id: CoordinateId) -> Option<CoordinateId> {
        let index = self.next_index(self.index_of(id)?)?;
        Some(self.coordinates[index].id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry_utilities::map_point;

    fn ring(closed: bool, count: u32) -> Ring {
        let mut ring = if closed { Ring::closed() } else { Ring::open() };
        for i in 0..count {
            ring.push(Coordinate {
                id: CoordinateId::new(i),
                position: map_point(i as f64, 0.0),
            });
        }
        ring
    }

    #[test]
    fn test_closed_wraps_around() {
        let ring = ring(true, 4);
        assert_eq!(ring.prev_index(0), Some(3));
        assert_eq!(ring.next_index(3), Some(0));
        assert_eq!(ring.previous(CoordinateId::new(0)), Some(CoordinateId::new(3)));
        assert_eq!(ring.next(CoordinateId::new(3)), Some(CoordinateId::new(0)));
    }

    #[test]
    fn test_open_ends_have_no_neighbours() {
        let ring = ring(false, 4);
        assert_eq!(ring.prev_index(0), None);
        assert_eq!(ring.next_index(3), None);
        assert_eq!(ring.prev_index(2), Some(1));
        assert_eq!(ring.next_index(2), Some(3));
    }

    #[test]
    fn test_short_rings_have_no_neighbours() {
        for closed in [false, true] {
            let ring = ring(closed, 1);
            assert_eq!(ring.prev_index(0), None);
            assert_eq!(ring.next_index(0), None);
        }
        let empty = Ring::closed();
        assert_eq!(empty.last_index(), None);
        assert_eq!(empty.previous(CoordinateId::new(0)), None);
    }

    #[test]
    fn test_identity_survives_insert_and_remove() {
        let mut ring = ring(false, 3);
        let id = CoordinateId::new(2);
        ring.insert(
            1,
            Coordinate {
                id: CoordinateId::new(10),
                position: map_point(0.5, 0.0),
            },
        );
        assert_eq!(ring.index_of(id), Some(3));
        ring.remove(CoordinateId::new(0));
        assert_eq!(ring.index_of(id), Some(2));
        assert!(ring.set_position(id, map_point(7.0, 7.0)));
        assert_eq!(ring.position_of(id), Some(map_point(7.0, 7.0)));
        assert!(!ring.set_position(CoordinateId::new(0), map_point(1.0, 1.0)));
    }

    #[test]
    fn test_unshift_prepends() {
        let mut ring = ring(false, 2);
        ring.unshift(Coordinate {
            id: CoordinateId::new(5),
            position: map_point(-1.0, 0.0),
        });
        assert_eq!(ring.first().map(|c| c.id), Some(CoordinateId::new(5)));
        assert_eq!(ring.len(), 3);
    }
}

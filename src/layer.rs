/// Ordered container of things currently shown on the map.
///
/// Adding something twice keeps a single entry.
#[derive(Clone, Debug)]
pub struct LayerGroup<T: PartialEq> {
    items: Vec<T>,
}

impl<T: PartialEq> Default for LayerGroup<T> {
    fn default() -> Self {
        LayerGroup { items: vec![] }
    }
}

impl<T: PartialEq> LayerGroup<T> {
    pub fn add(&mut self, item: T) {
        if !self.contains(&item) {
            self.items.push(item);
        }
    }

    pub fn remove(&mut self, item: &T) -> bool {
        let before = self.items.len();
        self.items.retain(|x| x != item);
        before != self.items.len()
    }

    pub fn contains(&self, item: &T) -> bool {
        self.items.contains(item)
    }

    pub fn clear(&mut self) {
        self.items.clear();
    }

    pub fn iter(&self) -> impl Iterator<Item = &T> {
        self.items.iter()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

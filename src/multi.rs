use crate::editable::Editable;
use crate::geometry::GeometryReference;
use crate::surface::MapSurface;
use log::debug;

#[derive(Copy, Clone, Debug, Hash, Eq, PartialEq, Ord, PartialOrd)]
pub struct MultiReference {
    multi_index: u32,
}

impl MultiReference {
    pub fn index(&self) -> usize {
        self.multi_index as usize
    }
}

/// Geometries edited together. One of them is primary, the others are dimmed.
#[derive(Clone, Debug, Default)]
pub struct MultiGroup {
    members: Vec<GeometryReference>,
    primary: Option<GeometryReference>,
}

impl MultiGroup {
    pub fn members(&self) -> &[GeometryReference] {
        &self.members
    }

    pub fn primary(&self) -> Option<GeometryReference> {
        self.primary
    }

    pub fn contains(&self, geometry: GeometryReference) -> bool {
        self.members.contains(&geometry)
    }

    fn add(&mut self, geometry: GeometryReference) {
        if !self.contains(geometry) {
            self.members.push(geometry);
        }
    }

    fn remove(&mut self, geometry: GeometryReference) {
        self.members.retain(|&m| m != geometry);
        if self.primary == Some(geometry) {
            self.primary = None;
        }
    }
}

impl<S: MapSurface> Editable<S> {
    pub fn multi(&self, multi: MultiReference) -> Option<&MultiGroup> {
        self.multis.get(multi.index())
    }

    fn members(&self, multi: MultiReference) -> Vec<GeometryReference> {
        self.multi(multi).map(|m| m.members.clone()).unwrap_or_default()
    }

    /// Groups existing geometries. A geometry belongs to at most one group, the latest.
    pub fn create_multi(&mut self, members: &[GeometryReference]) -> MultiReference {
        let reference = MultiReference {
            multi_index: self.multis.len() as u32,
        };
        let mut group = MultiGroup::default();
        for &member in members {
            if let Some(geometry) = self.geometries.resolve_mut(&member) {
                if let Some(previous) = geometry.multi.replace(reference) {
                    if let Some(old) = self.multis.get_mut(previous.index()) {
                        old.remove(member);
                    }
                }
                group.add(member);
            }
        }
        self.multis.push(group);
        reference
    }

    /// Adds a new ring to the group, makes it primary and starts drawing it.
    pub fn extend_multi_ring(&mut self, multi: MultiReference) -> Option<GeometryReference> {
        self.multi(multi)?;
        let geometry = self.create_ring(vec![]);
        if let Some(g) = self.geometries.resolve_mut(&geometry) {
            g.multi = Some(multi);
        }
        if let Some(group) = self.multis.get_mut(multi.index()) {
            group.add(geometry);
        }
        self.edit(geometry, false);
        self.multi_set_primary(multi, geometry);
        self.start_drawing_forward(geometry);
        Some(geometry)
    }

    /// Restarts editing on every member, `target` as primary.
    pub fn edit_multi(&mut self, multi: MultiReference, target: GeometryReference) {
        for member in self.members(multi) {
            if let Some(g) = self.geometries.resolve_mut(&member) {
                g.multi = Some(multi);
            }
            self.end_edit(member);
            self.edit(member, member != target);
        }
        if let Some(group) = self.multis.get_mut(multi.index()) {
            group.primary = Some(target);
        }
        debug!("editing {:?} with primary {:?}", multi, target);
    }

    pub fn end_edit_multi(&mut self, multi: MultiReference) {
        for member in self.members(multi) {
            self.end_edit(member);
        }
    }

    pub fn toggle_edit_multi(&mut self, multi: MultiReference, target: GeometryReference) {
        let secondary_or_idle = self.editor(target).map_or(true, |e| e.is_secondary());
        if secondary_or_idle {
            self.edit_multi(multi, target);
        } else {
            self.end_edit_multi(multi);
        }
    }

    pub fn multi_set_primary(&mut self, multi: MultiReference, primary: GeometryReference) {
        for member in self.members(multi) {
            if let Some(editor) = self.editors.get_mut(&member) {
                if member == primary {
                    editor.set_primary(&self.options);
                } else {
                    editor.set_secondary(&self.options);
                }
            }
        }
        if let Some(group) = self.multis.get_mut(multi.index()) {
            group.primary = Some(primary);
        }
    }

    /// Dims every member except `except`.
    pub fn multi_set_secondary(&mut self, multi: MultiReference, except: GeometryReference) {
        for member in self.members(multi) {
            if member == except {
                continue;
            }
            if let Some(editor) = self.editors.get_mut(&member) {
                editor.set_secondary(&self.options);
            }
        }
        if let Some(group) = self.multis.get_mut(multi.index()) {
            group.primary = if group.contains(except) { Some(except) } else { None };
        }
    }
}

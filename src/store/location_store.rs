use std::cell::RefCell;
use std::collections::{BTreeSet, HashMap};
use std::rc::Rc;

use log::{debug, warn};

use crate::config::GalaxyBounds;
use crate::error::{Error, Result};
use crate::spatial::geometry::in_bounds;
use crate::{Location, LocationRef, Point};

/// Outcome of the advisory bounds check performed by [`LocationStore::add`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BoundsCheck {
    Within,
    OutOfBounds,
}

impl BoundsCheck {
    pub fn is_within(self) -> bool {
        self == BoundsCheck::Within
    }
}

/// Fields to change on an existing location. `None` (or an empty string)
/// leaves the field untouched.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct LocationEdit {
    pub name: Option<String>,
    pub category: Option<String>,
    pub position: Option<Point>,
}

impl LocationEdit {
    pub fn rename(name: impl Into<String>) -> Self {
        LocationEdit {
            name: Some(name.into()),
            ..Default::default()
        }
    }

    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    pub fn with_position(mut self, position: Point) -> Self {
        self.position = Some(position);
        self
    }
}

/// Name-keyed registry of locations.
#[derive(Clone, Debug, Default)]
pub struct LocationStore {
    locations: HashMap<String, LocationRef>,
    /// Every category label ever recorded, including ones whose locations were
    /// since removed.
    categories: BTreeSet<String>,
    bounds: GalaxyBounds,
}

impl LocationStore {
    pub fn new() -> Self {
        Self::with_bounds(GalaxyBounds::default())
    }

    pub fn with_bounds(bounds: GalaxyBounds) -> Self {
        LocationStore {
            locations: HashMap::new(),
            categories: BTreeSet::new(),
            bounds,
        }
    }

    pub fn bounds(&self) -> &GalaxyBounds {
        &self.bounds
    }

    pub fn len(&self) -> usize {
        self.locations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.locations.is_empty()
    }

    /// Registers `location`. Coordinates outside the galaxy are accepted; the
    /// returned [`BoundsCheck`] tells the caller whether to warn.
    pub fn add(&mut self, location: Location) -> Result<BoundsCheck> {
        if self.locations.contains_key(&location.name) {
            return Err(Error::DuplicateName {
                name: location.name,
            });
        }

        let check = if in_bounds(location.position, &self.bounds) {
            BoundsCheck::Within
        } else {
            warn!(
                "location '{}' at {:?} lies outside typical galaxy bounds",
                location.name, location.position
            );
            BoundsCheck::OutOfBounds
        };

        debug!("adding location '{}' ({})", location.name, location.category);
        self.categories.insert(location.category.clone());
        self.locations
            .insert(location.name.clone(), Rc::new(RefCell::new(location)));
        Ok(check)
    }

    /// Drops the location from the store. Routes already holding it keep
    /// their handle.
    pub fn remove(&mut self, name: &str) -> Result<Location> {
        let removed = self.locations.remove(name).ok_or_else(|| Error::NotFound {
            name: name.to_string(),
        })?;
        debug!("removed location '{}'", name);
        let location = removed.borrow().clone();
        Ok(location)
    }

    /// Applies `edit` in place to the location called `name`, so routes
    /// holding it see the change. Nothing changes when the edit fails.
    pub fn edit(&mut self, name: &str, edit: LocationEdit) -> Result<()> {
        let Some(handle) = self.locations.get(name).cloned() else {
            return Err(Error::NotFound {
                name: name.to_string(),
            });
        };

        let new_name = edit.name.filter(|n| !n.is_empty() && n != name);
        if let Some(new_name) = &new_name {
            if self.locations.contains_key(new_name) {
                return Err(Error::DuplicateName {
                    name: new_name.clone(),
                });
            }
        }

        let mut location = handle.try_borrow_mut().map_err(|_| {
            Error::invalid_input(format!("location '{name}' is borrowed elsewhere"))
        })?;

        if let Some(new_name) = new_name {
            debug!("renaming location '{}' to '{}'", name, new_name);
            self.locations.remove(name);
            self.locations.insert(new_name.clone(), Rc::clone(&handle));
            location.name = new_name;
        }
        if let Some(category) = edit.category.filter(|c| !c.is_empty()) {
            self.categories.insert(category.clone());
            location.category = category;
        }
        if let Some(position) = edit.position {
            location.position = position;
        }

        Ok(())
    }

    /// Snapshot of the location called `name`.
    pub fn get(&self, name: &str) -> Option<Location> {
        self.locations.get(name).map(|handle| handle.borrow().clone())
    }

    /// Shared handle to the location called `name`.
    pub fn handle(&self, name: &str) -> Option<LocationRef> {
        self.locations.get(name).cloned()
    }

    pub fn exists(&self, name: &str) -> bool {
        self.locations.contains_key(name)
    }

    /// Distinct category labels, sorted.
    pub fn categories(&self) -> impl Iterator<Item = &str> {
        self.categories.iter().map(String::as_str)
    }

    /// Registered names, sorted.
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.locations.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    pub fn iter(&self) -> impl Iterator<Item = &LocationRef> {
        self.locations.values()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn earth() -> Location {
        Location::new("Earth", "Planet", [0.0, 0.0, 0.0])
    }

    fn mars() -> Location {
        Location::new("Mars", "Planet", [1.5, 0.0, 0.0])
    }

    #[test]
    fn add_then_get() {
        let mut store = LocationStore::new();
        let check = store.add(earth()).expect("add");
        assert_eq!(check, BoundsCheck::Within);
        assert_eq!(store.get("Earth"), Some(earth()));
        assert!(store.exists("Earth"));
        assert!(!store.exists("earth"));
        assert_eq!(store.categories().collect::<Vec<_>>(), vec!["Planet"]);
    }

    #[test]
    fn duplicate_name_keeps_first() {
        let mut store = LocationStore::new();
        store.add(earth()).expect("first add");
        let err = store
            .add(Location::new("Earth", "Station", [5.0, 5.0, 5.0]))
            .expect_err("duplicate");
        assert!(matches!(err, Error::DuplicateName { ref name } if name == "Earth"));
        assert_eq!(store.len(), 1);
        assert_eq!(store.get("Earth"), Some(earth()));
        assert_eq!(store.categories().count(), 1);
    }

    #[test]
    fn out_of_bounds_is_advisory() {
        let mut store = LocationStore::new();
        let check = store
            .add(Location::new("Far Out", "Probe", [60_000.0, 0.0, 0.0]))
            .expect("still added");
        assert_eq!(check, BoundsCheck::OutOfBounds);
        assert!(store.exists("Far Out"));
    }

    #[test]
    fn advisory_check_uses_store_bounds() {
        let mut store = LocationStore::with_bounds(GalaxyBounds {
            radius_ly: 10.0,
            half_height_ly: 1.0,
        });
        assert_eq!(store.add(earth()).expect("add"), BoundsCheck::Within);
        let check = store
            .add(Location::new("Titan", "Moon", [3.0, 2.0, 0.0]))
            .expect("still added");
        assert_eq!(check, BoundsCheck::OutOfBounds);
        assert_eq!(store.len(), 2);
    }

    #[test]
    fn remove_missing_fails_without_side_effects() {
        let mut store = LocationStore::new();
        store.add(earth()).expect("add");
        let err = store.remove("Mars").expect_err("absent");
        assert!(matches!(err, Error::NotFound { .. }));
        assert_eq!(store.len(), 1);

        let removed = store.remove("Earth").expect("present");
        assert_eq!(removed, earth());
        assert!(store.get("Earth").is_none());
    }

    #[test]
    fn edit_renames_and_updates_fields() {
        let mut store = LocationStore::new();
        store.add(earth()).expect("add");
        store
            .edit(
                "Earth",
                LocationEdit::rename("Terra")
                    .with_category("Home")
                    .with_position([1.0, 2.0, 3.0]),
            )
            .expect("edit");

        assert!(!store.exists("Earth"));
        let terra = store.get("Terra").expect("renamed");
        assert_eq!(terra.name, "Terra");
        assert_eq!(terra.category, "Home");
        assert_eq!(terra.position, [1.0, 2.0, 3.0]);
        assert_eq!(store.categories().collect::<Vec<_>>(), vec!["Home", "Planet"]);
    }

    #[test]
    fn edits_reach_existing_handles() {
        let mut store = LocationStore::new();
        store.add(earth()).expect("add");
        let handle = store.handle("Earth").expect("handle");

        store
            .edit("Earth", LocationEdit::rename("Terra").with_position([4.0, 0.0, 0.0]))
            .expect("edit");
        assert_eq!(handle.borrow().name, "Terra");
        assert_eq!(handle.borrow().position, [4.0, 0.0, 0.0]);
        assert!(Rc::ptr_eq(&handle, &store.handle("Terra").expect("rekeyed")));

        store.remove("Terra").expect("remove");
        assert_eq!(handle.borrow().name, "Terra");
    }

    #[test]
    fn edit_fails_while_location_is_borrowed() {
        let mut store = LocationStore::new();
        store.add(earth()).expect("add");
        let handle = store.handle("Earth").expect("handle");
        let guard = handle.borrow();

        let err = store
            .edit("Earth", LocationEdit::rename("Terra"))
            .expect_err("borrowed");
        assert!(matches!(err, Error::InvalidInput { .. }));
        drop(guard);
        assert!(store.exists("Earth"));
        assert!(!store.exists("Terra"));
    }

    #[test]
    fn edit_rename_collision_changes_nothing() {
        let mut store = LocationStore::new();
        store.add(earth()).expect("add earth");
        store.add(mars()).expect("add mars");

        let err = store
            .edit("Earth", LocationEdit::rename("Mars").with_category("Moon"))
            .expect_err("collision");
        assert!(matches!(err, Error::DuplicateName { ref name } if name == "Mars"));
        assert_eq!(store.get("Earth"), Some(earth()));
        assert_eq!(store.get("Mars"), Some(mars()));
        assert!(!store.categories().any(|c| c == "Moon"));
    }

    #[test]
    fn edit_missing_fails() {
        let mut store = LocationStore::new();
        let err = store
            .edit("Pluto", LocationEdit::default().with_category("Dwarf"))
            .expect_err("absent");
        assert!(matches!(err, Error::NotFound { .. }));
        assert!(store.is_empty());
        assert_eq!(store.categories().count(), 0);
    }

    #[test]
    fn edit_with_same_or_empty_name_keeps_key() {
        let mut store = LocationStore::new();
        store.add(earth()).expect("add");
        store
            .edit("Earth", LocationEdit::rename("Earth").with_position([9.0, 9.0, 9.0]))
            .expect("same name");
        store
            .edit("Earth", LocationEdit::rename(""))
            .expect("empty name ignored");
        assert_eq!(store.get("Earth").map(|l| l.position), Some([9.0, 9.0, 9.0]));
        assert_eq!(store.names(), vec!["Earth"]);
    }
}

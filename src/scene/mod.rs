//! Scene registry: named parts with display metadata.
//!
//! A scene is assembled through a [`SceneBuilder`] that owns the shape
//! store for the duration of a build:
//!
//! ```text
//! SceneBuilder::open ─► add_part … set_color / set_display_mode ─► finalize ─► Scene
//! ```
//!
//! Objects cannot be changed once the scene is finalized.

mod object;

pub use object::{Color, DisplayMode, SceneObject};

use std::collections::HashSet;

use slotmap::SlotMap;

use crate::error::{Result, SceneError};
use crate::materials::MaterialTag;
use crate::shape::{ShapeId, ShapeStore};

slotmap::new_key_type! {
    /// Handle to an object registered in a [`SceneBuilder`].
    pub struct ObjectId;
}

/// A scene under construction.
#[derive(Debug)]
pub struct SceneBuilder {
    name: String,
    store: ShapeStore,
    objects: SlotMap<ObjectId, SceneObject>,
    order: Vec<ObjectId>,
    labels: HashSet<String>,
}

impl SceneBuilder {
    /// Opens an empty scene with its own shape store.
    #[must_use]
    pub fn open(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            store: ShapeStore::new(),
            objects: SlotMap::with_key(),
            order: Vec::new(),
            labels: HashSet::new(),
        }
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn store(&self) -> &ShapeStore {
        &self.store
    }

    pub fn store_mut(&mut self) -> &mut ShapeStore {
        &mut self.store
    }

    /// Registers a shape under `label`.
    ///
    /// A label already in use gets a numeric suffix (`Tank`, `Tank001`,
    /// `Tank002`, …). The object's color follows its material.
    ///
    /// # Errors
    ///
    /// Returns an error if the shape is not in the store.
    pub fn add_part(
        &mut self,
        label: &str,
        shape: ShapeId,
        material: Option<MaterialTag>,
    ) -> Result<ObjectId> {
        self.store.shape(shape)?;
        let label = self.unique_label(label);
        self.labels.insert(label.clone());
        tracing::debug!(scene = %self.name, %label, "registered part");
        let id = self.objects.insert(SceneObject::new(label, shape, material));
        self.order.push(id);
        Ok(id)
    }

    /// Overrides the material-derived color of an object.
    ///
    /// # Errors
    ///
    /// Returns an error if the object does not exist.
    pub fn set_color(&mut self, id: ObjectId, color: Color) -> Result<()> {
        self.object_mut(id)?.color = color;
        Ok(())
    }

    /// # Errors
    ///
    /// Returns an error if the object does not exist.
    pub fn set_display_mode(&mut self, id: ObjectId, mode: DisplayMode) -> Result<()> {
        self.object_mut(id)?.display_mode = mode;
        Ok(())
    }

    /// Returns a registered object.
    ///
    /// # Errors
    ///
    /// Returns an error if the object does not exist.
    pub fn object(&self, id: ObjectId) -> std::result::Result<&SceneObject, SceneError> {
        self.objects
            .get(id)
            .ok_or_else(|| SceneError::EntityNotFound("scene object".into()))
    }

    #[must_use]
    pub fn object_count(&self) -> usize {
        self.order.len()
    }

    /// Freezes the scene.
    #[must_use]
    pub fn finalize(mut self) -> Scene {
        let objects = self
            .order
            .iter()
            .filter_map(|id| self.objects.remove(*id))
            .collect::<Vec<_>>();
        tracing::info!(scene = %self.name, objects = objects.len(), "scene finalized");
        Scene {
            name: self.name,
            store: self.store,
            objects,
        }
    }

    fn object_mut(&mut self, id: ObjectId) -> std::result::Result<&mut SceneObject, SceneError> {
        self.objects
            .get_mut(id)
            .ok_or_else(|| SceneError::EntityNotFound("scene object".into()))
    }

    fn unique_label(&self, base: &str) -> String {
        if !self.labels.contains(base) {
            return base.to_owned();
        }
        (1..)
            .map(|n| format!("{base}{n:03}"))
            .find(|candidate| !self.labels.contains(candidate))
            .unwrap_or_else(|| base.to_owned())
    }
}

/// A finalized scene.
#[derive(Debug)]
pub struct Scene {
    name: String,
    store: ShapeStore,
    objects: Vec<SceneObject>,
}

impl Scene {
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn store(&self) -> &ShapeStore {
        &self.store
    }

    /// Objects in registration order.
    #[must_use]
    pub fn objects(&self) -> &[SceneObject] {
        &self.objects
    }

    /// Looks an object up by its label.
    ///
    /// # Errors
    ///
    /// Returns [`SceneError::ObjectNotFound`] if no object has that label.
    pub fn object(&self, label: &str) -> std::result::Result<&SceneObject, SceneError> {
        self.objects
            .iter()
            .find(|obj| obj.label == label)
            .ok_or_else(|| SceneError::ObjectNotFound(label.to_owned()))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::math::{Point3, Vector3};
    use crate::operations::creation::MakeBox;

    fn unit_box(scene: &mut SceneBuilder) -> ShapeId {
        MakeBox::new(Point3::origin(), Vector3::new(1.0, 1.0, 1.0))
            .execute(scene.store_mut())
            .unwrap()
    }

    #[test]
    fn duplicate_labels_get_suffixes() {
        let mut scene = SceneBuilder::open("test");
        let shape = unit_box(&mut scene);
        scene.add_part("Tank", shape, None).unwrap();
        scene.add_part("Tank", shape, None).unwrap();
        scene.add_part("Tank", shape, None).unwrap();
        let scene = scene.finalize();
        let labels: Vec<&str> = scene.objects().iter().map(|o| o.label.as_str()).collect();
        assert_eq!(labels, ["Tank", "Tank001", "Tank002"]);
    }

    #[test]
    fn material_sets_color() {
        let mut scene = SceneBuilder::open("test");
        let shape = unit_box(&mut scene);
        let id = scene.add_part("Shield", shape, Some(MaterialTag::Water)).unwrap();
        assert_eq!(scene.object(id).unwrap().color, Color::rgb(0.0, 0.5, 1.0));
        scene.set_display_mode(id, DisplayMode::Shaded).unwrap();
        let scene = scene.finalize();
        assert_eq!(scene.object("Shield").unwrap().display_mode, DisplayMode::Shaded);
    }

    #[test]
    fn missing_object_is_an_error() {
        let scene = SceneBuilder::open("empty").finalize();
        assert!(matches!(
            scene.object("Nope"),
            Err(SceneError::ObjectNotFound(_))
        ));
    }
}

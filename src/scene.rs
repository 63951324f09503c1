//! Scene store and read-only snapshots
//!
//! The router reads shapes through a [`Snapshot`], which layers an optional
//! overlay of changed elements on top of the stored scene. The scene itself
//! is never mutated by routing; the only write is the arrow update applied
//! at the end of a successful route.

use std::collections::HashMap;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::elements::{ElbowArrow, Element};
use crate::error::SceneError;

/// A diagram scene: elements in stacking order plus the elbow arrows that
/// connect them
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Scene {
    #[serde(default)]
    pub elements: Vec<Element>,
    #[serde(default)]
    pub arrows: Vec<ElbowArrow>,
}

impl Scene {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load a scene from a JSON string
    pub fn from_json(json: &str) -> Result<Self, SceneError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Load a scene from a JSON file
    pub fn from_file(path: &Path) -> Result<Self, SceneError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_json(&content)
    }

    /// Look up an element by id, deleted ones included
    pub fn get_element(&self, id: &str) -> Option<&Element> {
        self.elements.iter().find(|e| e.id == id)
    }

    /// All non-deleted elements in stacking order (later elements on top)
    pub fn non_deleted_elements(&self) -> impl Iterator<Item = &Element> {
        self.elements.iter().filter(|e| !e.is_deleted)
    }
}

/// Read-only view of a scene with an optional `changed_elements` overlay
/// stacked on top. Overlay entries shadow stored elements of the same id.
#[derive(Clone, Copy)]
pub struct Snapshot<'a> {
    scene: &'a Scene,
    overlay: Option<&'a HashMap<String, Element>>,
}

impl<'a> Snapshot<'a> {
    pub fn new(scene: &'a Scene, overlay: Option<&'a HashMap<String, Element>>) -> Self {
        Self { scene, overlay }
    }

    /// Look up a non-deleted element by id, overlay first
    pub fn element(&self, id: &str) -> Option<&'a Element> {
        if let Some(overlay) = self.overlay {
            if let Some(el) = overlay.get(id) {
                return (!el.is_deleted).then_some(el);
            }
        }
        self.scene.get_element(id).filter(|e| !e.is_deleted)
    }

    /// Non-deleted elements in stacking order, with overlay entries replacing
    /// their stored versions in place and unknown overlay ids stacked on top
    pub fn non_deleted_elements(&self) -> Vec<&'a Element> {
        let mut seen: Vec<&str> = Vec::new();
        let mut result: Vec<&'a Element> = Vec::new();
        for el in self.scene.non_deleted_elements() {
            let replacement = self.overlay.and_then(|o| o.get(&el.id));
            match replacement {
                Some(r) if !r.is_deleted => {
                    seen.push(&el.id);
                    result.push(r);
                }
                Some(_) => seen.push(&el.id),
                None => result.push(el),
            }
        }
        if let Some(overlay) = self.overlay {
            for (id, el) in overlay {
                if !el.is_deleted
                    && !seen.contains(&id.as_str())
                    && self.scene.get_element(id).is_none()
                {
                    result.push(el);
                }
            }
        }
        result
    }
}

//! Scene state: the primitive list, the selection and the fog transition
//!
//! Every view reads primitives from here and every selection change goes
//! through here. Handles carry the generation of the list they were taken
//! from, so a handle kept across a reload resolves to nothing.

use shatter_render::FogTransition;
use shatter_scene::{Fog, Primitive, Scene};
use std::collections::BTreeSet;

/// Generation-checked reference to one primitive
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PrimitiveHandle {
    pub generation: u64,
    pub index: usize,
}

/// Owner of the current primitive list and everything that refers into it
#[derive(Debug, Default)]
pub struct SceneState {
    scene: Option<Scene>,
    primitives: Vec<Primitive>,
    generation: u64,
    selection: BTreeSet<usize>,
    fog: FogTransition,
}

impl SceneState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the scene, rebuilding primitives and clearing the selection.
    /// A scene with its own fog starts a fog transition toward it.
    pub fn load(&mut self, scene: Scene) {
        let primitives = scene.flatten();
        if let Some(fog) = scene.fog() {
            self.fog.start(fog);
        }
        self.scene = Some(scene);
        self.replace_primitives(primitives);
    }

    /// Swap in a new primitive list. Old handles stop resolving.
    pub fn replace_primitives(&mut self, primitives: Vec<Primitive>) {
        self.primitives = primitives;
        self.generation += 1;
        self.selection.clear();
        log::debug!(
            "Primitive list rebuilt: {} boxes (generation {})",
            self.primitives.len(),
            self.generation
        );
    }

    pub fn scene(&self) -> Option<&Scene> {
        self.scene.as_ref()
    }

    pub fn primitives(&self) -> &[Primitive] {
        &self.primitives
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn handle(&self, index: usize) -> Option<PrimitiveHandle> {
        (index < self.primitives.len()).then_some(PrimitiveHandle {
            generation: self.generation,
            index,
        })
    }

    /// Primitive behind a handle, if the handle is from the current list
    pub fn resolve(&self, handle: PrimitiveHandle) -> Option<&Primitive> {
        if handle.generation != self.generation {
            return None;
        }
        self.primitives.get(handle.index)
    }

    pub fn is_selected(&self, index: usize) -> bool {
        self.selection.contains(&index)
    }

    /// Selected handles in primitive order
    pub fn selection(&self) -> Vec<PrimitiveHandle> {
        self.selection
            .iter()
            .map(|&index| PrimitiveHandle {
                generation: self.generation,
                index,
            })
            .collect()
    }

    pub fn selected_primitives(&self) -> impl Iterator<Item = &Primitive> {
        self.selection.iter().filter_map(|&i| self.primitives.get(i))
    }

    pub fn selection_len(&self) -> usize {
        self.selection.len()
    }

    pub fn clear_selection(&mut self) {
        self.selection.clear();
    }

    /// Make `index` the only selected primitive; None clears the selection
    pub fn select_only(&mut self, index: Option<usize>) {
        self.selection.clear();
        if let Some(i) = index.filter(|&i| i < self.primitives.len()) {
            self.selection.insert(i);
        }
    }

    /// Add primitives to the selection
    pub fn extend_selection(&mut self, indices: impl IntoIterator<Item = usize>) {
        let len = self.primitives.len();
        self.selection
            .extend(indices.into_iter().filter(|&i| i < len));
    }

    /// Flip one primitive's selection state
    pub fn toggle(&mut self, index: usize) {
        if index >= self.primitives.len() {
            return;
        }
        if !self.selection.remove(&index) {
            self.selection.insert(index);
        }
    }

    /// Remove the selected primitives from the list. Returns how many went.
    ///
    /// Indices shift, so this starts a new generation like any rebuild.
    pub fn delete_selected(&mut self) -> usize {
        if self.selection.is_empty() {
            return 0;
        }
        let selected = std::mem::take(&mut self.selection);
        let kept: Vec<Primitive> = self
            .primitives
            .drain(..)
            .enumerate()
            .filter(|(i, _)| !selected.contains(i))
            .map(|(_, p)| p)
            .collect();
        self.replace_primitives(kept);
        selected.len()
    }

    pub fn fog(&self) -> Fog {
        self.fog.current()
    }

    pub fn fog_transition(&self) -> &FogTransition {
        &self.fog
    }

    /// Advance the fog transition one 60 Hz tick
    pub fn tick(&mut self) -> bool {
        self.fog.tick()
    }
}

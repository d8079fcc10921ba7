// Copyright 2025 the Marionette Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Registry of the sprites a rig can bind to.

use alloc::string::String;
use alloc::vec::Vec;
use hashbrown::HashMap;

use crate::types::{DEFAULT_STATE, Sprite, SpriteState};

/// Reasons a sprite cannot be registered or renamed.
#[derive(thiserror::Error, Clone, Debug, PartialEq, Eq)]
#[non_exhaustive]
pub enum SpriteError {
    /// Sprites must have a non-empty name.
    #[error("sprite name must not be empty")]
    EmptyName,
    /// The sprite does not declare the rest state.
    #[error("sprite '{sprite}' is missing the required 'Normal' state")]
    MissingDefaultState {
        /// Name of the rejected sprite.
        sprite: String,
    },
    /// No sprite with this name is registered.
    #[error("no sprite named '{0}'")]
    UnknownSprite(String),
    /// Another sprite already uses this name.
    #[error("a sprite named '{0}' already exists")]
    NameTaken(String),
}

/// Sprites of a loaded rig, keyed by name.
#[derive(Clone, Debug, Default)]
pub struct SpriteSet {
    sprites: HashMap<String, Sprite>,
}

impl SpriteSet {
    /// Create an empty set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `sprite`, replacing and returning any sprite with the same name.
    pub fn insert(&mut self, sprite: Sprite) -> Result<Option<Sprite>, SpriteError> {
        if sprite.name.is_empty() {
            log::warn!("rejected sprite with an empty name");
            return Err(SpriteError::EmptyName);
        }
        if sprite.state(DEFAULT_STATE).is_none() {
            log::warn!(
                "rejected sprite '{}': no '{}' state",
                sprite.name,
                DEFAULT_STATE
            );
            return Err(SpriteError::MissingDefaultState {
                sprite: sprite.name,
            });
        }
        Ok(self.sprites.insert(sprite.name.clone(), sprite))
    }

    /// Look up a sprite by name.
    pub fn get(&self, name: &str) -> Option<&Sprite> {
        self.sprites.get(name)
    }

    /// Remove a sprite by name.
    pub fn remove(&mut self, name: &str) -> Option<Sprite> {
        self.sprites.remove(name)
    }

    /// Rename a registered sprite.
    ///
    /// Nodes bind to sprites by name, so callers should retarget those bindings as well.
    pub fn rename(&mut self, old: &str, new: &str) -> Result<(), SpriteError> {
        if new.is_empty() {
            return Err(SpriteError::EmptyName);
        }
        if old == new {
            return if self.sprites.contains_key(old) {
                Ok(())
            } else {
                Err(SpriteError::UnknownSprite(old.into()))
            };
        }
        if self.sprites.contains_key(new) {
            return Err(SpriteError::NameTaken(new.into()));
        }
        let mut sprite = self
            .sprites
            .remove(old)
            .ok_or_else(|| SpriteError::UnknownSprite(old.into()))?;
        sprite.name = new.into();
        self.sprites.insert(sprite.name.clone(), sprite);
        Ok(())
    }

    /// Number of registered sprites.
    pub fn len(&self) -> usize {
        self.sprites.len()
    }

    /// Whether no sprites are registered.
    pub fn is_empty(&self) -> bool {
        self.sprites.is_empty()
    }

    /// Iterate registered sprites in unspecified order.
    pub fn iter(&self) -> impl Iterator<Item = &Sprite> + '_ {
        self.sprites.values()
    }

    /// Sorted, de-duplicated names of every state declared by any sprite.
    pub fn available_states(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self
            .sprites
            .values()
            .flat_map(|s| s.states.keys().map(String::as_str))
            .collect();
        names.sort_unstable();
        names.dedup();
        names
    }

    /// Length of the longest non-link sequence named `state`, at least 1.
    ///
    /// This is the frame range a global timeline scrubs over for that state.
    pub fn max_frames(&self, state: &str) -> usize {
        self.sprites
            .values()
            .filter_map(|s| match s.state(state) {
                Some(SpriteState::Frames(seq)) => Some(seq.len()),
                _ => None,
            })
            .max()
            .unwrap_or(0)
            .max(1)
    }
}

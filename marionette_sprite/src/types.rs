// Copyright 2025 the Marionette Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Sprite data types: textures, frames, states, and sprites.

use alloc::string::String;
use alloc::vec::Vec;
use hashbrown::HashMap;

/// Name of the rest state every sprite must declare.
///
/// Its first frame defines the sprite's footprint for pivot geometry.
pub const DEFAULT_STATE: &str = "Normal";

/// Opaque handle to an uploaded texture, owned by the host renderer.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub struct TextureId(pub u32);

/// A single image of a sprite state.
#[derive(Clone, Debug, PartialEq)]
pub struct Frame {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
    /// Uploaded texture, or `None` if decoding or upload failed.
    pub texture: Option<TextureId>,
}

impl Frame {
    /// Create a frame with the given pixel size and texture.
    pub const fn new(width: u32, height: u32, texture: Option<TextureId>) -> Self {
        Self {
            width,
            height,
            texture,
        }
    }

    /// Whether the frame has a texture the renderer can draw.
    pub const fn is_drawable(&self) -> bool {
        self.texture.is_some()
    }
}

/// An ordered list of frames played back in sequence.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct FrameSequence {
    /// Frames in playback order.
    pub frames: Vec<Frame>,
}

impl FrameSequence {
    /// Create a sequence from frames in playback order.
    pub fn new(frames: impl IntoIterator<Item = Frame>) -> Self {
        Self {
            frames: frames.into_iter().collect(),
        }
    }

    /// First frame, if any.
    pub fn first(&self) -> Option<&Frame> {
        self.frames.first()
    }

    /// Number of frames.
    pub fn len(&self) -> usize {
        self.frames.len()
    }

    /// Whether the sequence has no frames.
    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }
}

/// A named state of a sprite.
#[derive(Clone, Debug, PartialEq)]
pub enum SpriteState {
    /// The state declares its own frames.
    Frames(FrameSequence),
    /// The state aliases another state of the same sprite by name.
    Link(String),
}

impl SpriteState {
    /// The frames of a non-link state.
    pub fn frames(&self) -> Option<&FrameSequence> {
        match self {
            Self::Frames(seq) => Some(seq),
            Self::Link(_) => None,
        }
    }

    /// Whether this state is a link to another state.
    pub fn is_link(&self) -> bool {
        matches!(self, Self::Link(_))
    }
}

/// A named collection of states.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Sprite {
    /// Sprite name, used by nodes to bind to it.
    pub name: String,
    /// States keyed by name.
    pub states: HashMap<String, SpriteState>,
}

impl Sprite {
    /// Create a sprite with no states.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            states: HashMap::new(),
        }
    }

    /// Add or replace a state, builder style.
    pub fn with_state(mut self, name: impl Into<String>, state: SpriteState) -> Self {
        self.states.insert(name.into(), state);
        self
    }

    /// Look up a state by name without following links.
    pub fn state(&self, name: &str) -> Option<&SpriteState> {
        self.states.get(name)
    }

    /// Whether the sprite declares no states at all.
    pub fn has_no_states(&self) -> bool {
        self.states.is_empty()
    }

    /// Resolve a state to its frames, following link entries.
    ///
    /// Returns the name of the state that owns the frames along with the sequence.
    /// Dangling links and link cycles resolve to `None`.
    pub fn resolve_state<'a>(&'a self, name: &'a str) -> Option<(&'a str, &'a FrameSequence)> {
        let mut current = name;
        // A chain longer than the number of states must revisit a state.
        for _ in 0..=self.states.len() {
            match self.states.get(current)? {
                SpriteState::Frames(seq) => return Some((current, seq)),
                SpriteState::Link(target) => current = target.as_str(),
            }
        }
        None
    }

    /// First frame of `state`, without following links.
    pub fn first_frame(&self, state: &str) -> Option<&Frame> {
        self.state(state)?.frames()?.first()
    }

    /// First frame of the [`DEFAULT_STATE`].
    pub fn rest_frame(&self) -> Option<&Frame> {
        self.first_frame(DEFAULT_STATE)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn seq(n: usize) -> SpriteState {
        SpriteState::Frames(FrameSequence::new(
            (0..n).map(|i| Frame::new(10 + i as u32, 5, Some(TextureId(i as u32 + 1)))),
        ))
    }

    #[test]
    fn resolve_follows_link_chain() {
        let sprite = Sprite::new("Turret")
            .with_state("Normal", seq(1))
            .with_state("Idle", seq(3))
            .with_state("Alert", SpriteState::Link("Wait".into()))
            .with_state("Wait", SpriteState::Link("Idle".into()));
        let (owner, frames) = sprite.resolve_state("Alert").unwrap();
        assert_eq!(owner, "Idle");
        assert_eq!(frames.len(), 3);
    }

    #[test]
    fn resolve_rejects_cycles_and_dangling_links() {
        let sprite = Sprite::new("Loop")
            .with_state("Normal", seq(1))
            .with_state("A", SpriteState::Link("B".into()))
            .with_state("B", SpriteState::Link("A".into()))
            .with_state("C", SpriteState::Link("Missing".into()));
        assert!(sprite.resolve_state("A").is_none(), "cycle must terminate");
        assert!(sprite.resolve_state("C").is_none());
        assert!(sprite.resolve_state("Nope").is_none());
    }

    #[test]
    fn first_frame_ignores_links() {
        let sprite = Sprite::new("Gun")
            .with_state("Normal", SpriteState::Link("Idle".into()))
            .with_state("Idle", seq(2));
        assert!(sprite.rest_frame().is_none());
        assert_eq!(sprite.first_frame("Idle").map(|f| f.width), Some(10));
    }

    #[test]
    fn empty_rest_state_has_no_rest_frame() {
        let sprite = Sprite::new("Ghost").with_state("Normal", seq(0));
        assert!(sprite.rest_frame().is_none());
        assert!(!sprite.has_no_states());
    }
}

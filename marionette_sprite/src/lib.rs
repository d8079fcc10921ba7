// Copyright 2025 the Marionette Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Marionette Sprite: read-only sprite data consumed by Marionette rigs.
//!
//! A [`Sprite`] is a named mapping from state names to [`SpriteState`]s. A state either
//! declares its own [`FrameSequence`] or is a link that aliases another state by name.
//! Frames carry pixel dimensions and an opaque [`TextureId`]; this crate never decodes
//! pixels or touches the GPU.
//!
//! The crate also owns the frame-selection rules shared by the rig crates:
//!
//! - [`Sprite::rest_frame`]: first frame of the [`DEFAULT_STATE`], the footprint used for
//!   pivot geometry regardless of what is playing.
//! - [`Sprite::first_frame`]: first frame of a named state, without following links.
//! - [`Sprite::display_frame`]: the frame shown on screen for an active state and frame
//!   index, with link resolution, fallback to the default state, and index clamping.
//!
//! ## Registry
//!
//! [`SpriteSet`] holds the sprites of a loaded rig, keyed by name. Registration is the only
//! fallible operation in this crate: a sprite without the required [`DEFAULT_STATE`] is
//! rejected with a [`SpriteError`].
//!
//! ```rust
//! use marionette_sprite::{Frame, FrameSequence, Sprite, SpriteSet, SpriteState, TextureId};
//!
//! let mut sprites = SpriteSet::new();
//! let gun = Sprite::new("Gun")
//!     .with_state(
//!         "Normal",
//!         SpriteState::Frames(FrameSequence::new([Frame::new(64, 32, Some(TextureId(1)))])),
//!     )
//!     .with_state("Fire", SpriteState::Link("Normal".into()));
//! sprites.insert(gun).unwrap();
//!
//! assert_eq!(sprites.available_states(), ["Fire", "Normal"]);
//! assert_eq!(sprites.max_frames("Normal"), 1);
//! ```
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

mod select;
mod set;
mod types;

pub use select::{DisplayFrame, FrameSource};
pub use set::{SpriteError, SpriteSet};
pub use types::{DEFAULT_STATE, Frame, FrameSequence, Sprite, SpriteState, TextureId};

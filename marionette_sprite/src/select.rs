// Copyright 2025 the Marionette Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Selection of the frame a sprite displays for an active state.

use crate::types::{Frame, Sprite, SpriteState};

/// Where a [`DisplayFrame`] came from.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum FrameSource {
    /// The active state declares its own frames.
    Active,
    /// The active state is a link that resolved to another state's frames.
    Linked,
    /// The active state could not be used; the default state's first frame is shown.
    Fallback,
}

/// The frame a sprite displays, with the index and state it was taken from.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct DisplayFrame<'a> {
    /// The selected frame.
    pub frame: &'a Frame,
    /// Index of `frame` within its state.
    pub index: usize,
    /// Name of the state that owns `frame`.
    pub state: &'a str,
    /// Which selection path produced the frame.
    pub source: FrameSource,
}

impl Sprite {
    /// Select the frame shown for `active` at `frame_index`.
    ///
    /// - A non-link active state clamps `frame_index` into its frame range. An active
    ///   state with no frames displays nothing.
    /// - A link active state, when `follow_links` is set, resolves to its target's frames
    ///   and clamps `frame_index` the same way.
    /// - Otherwise (missing active state, links not followed, dangling or cyclic link, link
    ///   to a state with no frames) the first frame of `default_state` is shown, with the
    ///   index forced to 0.
    pub fn display_frame<'a>(
        &'a self,
        active: &'a str,
        default_state: &'a str,
        frame_index: usize,
        follow_links: bool,
    ) -> Option<DisplayFrame<'a>> {
        match self.state(active) {
            Some(SpriteState::Frames(seq)) => {
                let index = frame_index.min(seq.len().checked_sub(1)?);
                Some(DisplayFrame {
                    frame: &seq.frames[index],
                    index,
                    state: active,
                    source: FrameSource::Active,
                })
            }
            Some(SpriteState::Link(_)) if follow_links => match self.resolve_state(active) {
                Some((owner, seq)) if !seq.is_empty() => {
                    let index = frame_index.min(seq.len() - 1);
                    Some(DisplayFrame {
                        frame: &seq.frames[index],
                        index,
                        state: owner,
                        source: FrameSource::Linked,
                    })
                }
                _ => self.fallback_frame(default_state),
            },
            _ => self.fallback_frame(default_state),
        }
    }

    fn fallback_frame<'a>(&'a self, default_state: &'a str) -> Option<DisplayFrame<'a>> {
        self.first_frame(default_state).map(|frame| DisplayFrame {
            frame,
            index: 0,
            state: default_state,
            source: FrameSource::Fallback,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{FrameSequence, TextureId};

    fn frames(widths: &[u32]) -> SpriteState {
        SpriteState::Frames(FrameSequence::new(
            widths
                .iter()
                .map(|&w| Frame::new(w, 8, Some(TextureId(w)))),
        ))
    }

    fn turret() -> Sprite {
        Sprite::new("Turret")
            .with_state("Normal", frames(&[10, 11]))
            .with_state("Idle", frames(&[20, 21, 22]))
            .with_state("Alert", SpriteState::Link("Idle".into()))
            .with_state("Broken", SpriteState::Link("Gone".into()))
            .with_state("Empty", frames(&[]))
    }

    #[test]
    fn active_state_clamps_frame_index() {
        let sprite = turret();
        let shown = sprite.display_frame("Idle", "Normal", 7, true).unwrap();
        assert_eq!(shown.index, 2);
        assert_eq!(shown.frame.width, 22);
        assert_eq!(shown.source, FrameSource::Active);
    }

    #[test]
    fn link_resolves_before_clamping() {
        let sprite = turret();
        let shown = sprite.display_frame("Alert", "Normal", 1, true).unwrap();
        assert_eq!(shown.state, "Idle");
        assert_eq!(shown.index, 1, "linked frames use the requested index");
        assert_eq!(shown.frame.width, 21);
        assert_eq!(shown.source, FrameSource::Linked);
    }

    #[test]
    fn link_without_following_uses_default_first_frame() {
        let sprite = turret();
        let shown = sprite.display_frame("Alert", "Normal", 1, false).unwrap();
        assert_eq!(shown.state, "Normal");
        assert_eq!(shown.index, 0);
        assert_eq!(shown.source, FrameSource::Fallback);
    }

    #[test]
    fn missing_state_forces_index_zero() {
        let sprite = turret();
        let shown = sprite.display_frame("Walk", "Normal", 1, true).unwrap();
        assert_eq!(shown.state, "Normal");
        assert_eq!(shown.index, 0, "fallback ignores the requested index");
        assert_eq!(shown.frame.width, 10);
    }

    #[test]
    fn dangling_link_falls_back() {
        let sprite = turret();
        let shown = sprite.display_frame("Broken", "Normal", 1, true).unwrap();
        assert_eq!(shown.source, FrameSource::Fallback);
        assert_eq!(shown.index, 0);
    }

    #[test]
    fn link_to_empty_state_falls_back() {
        let sprite = turret().with_state("Hollow", SpriteState::Link("Empty".into()));
        let shown = sprite.display_frame("Hollow", "Normal", 1, true).unwrap();
        assert_eq!(shown.source, FrameSource::Fallback);
        assert_eq!(shown.state, "Normal");
        assert_eq!(shown.index, 0);
        assert_eq!(shown.frame.width, 10);
    }

    #[test]
    fn sprite_without_states_shows_nothing() {
        let sprite = Sprite::new("Bare");
        assert!(sprite.has_no_states());
        assert!(sprite.display_frame("Normal", "Normal", 0, true).is_none());
        assert!(sprite.rest_frame().is_none());
    }

    #[test]
    fn empty_active_state_shows_nothing() {
        let sprite = turret();
        assert!(sprite.display_frame("Empty", "Normal", 0, true).is_none());
    }

    #[test]
    fn missing_default_state_shows_nothing() {
        let sprite = turret();
        assert!(sprite.display_frame("Walk", "Rest", 0, true).is_none());
    }
}

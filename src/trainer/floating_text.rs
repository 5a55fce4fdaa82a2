//! Floating combat text
//!
//! Short-lived labels ("Kill!", "No Hop", damage numbers). Purely cosmetic:
//! nothing in the simulation reads them back.

use bevy::math::Vec2;
use serde::Serialize;

use super::constants::{FCT_DRIFT_SPEED, FCT_LIFETIME};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FloatingText {
    pub text: String,
    pub position: Vec2,
    /// sRGB colour
    pub color: [u8; 3],
    /// Seconds left on screen
    pub lifetime: f32,
    /// Vertical drift in world units per second
    pub drift_speed: f32,
}

impl FloatingText {
    pub fn new(text: impl Into<String>, position: Vec2, color: [u8; 3]) -> Self {
        Self {
            text: text.into(),
            position,
            color,
            lifetime: FCT_LIFETIME,
            drift_speed: FCT_DRIFT_SPEED,
        }
    }
}

/// Drift every label and drop the expired ones.
pub fn decay_floating_texts(texts: &mut Vec<FloatingText>, dt: f32) {
    for text in texts.iter_mut() {
        text.position.y += text.drift_speed * dt;
        text.lifetime -= dt;
    }
    texts.retain(|text| text.lifetime > 0.0);
}

//! Frame tessellation
//!
//! Turns a [`FrameState`] into a flat triangle list in arena pixels. Draw
//! order: background balls, the showcase ball with its halo, then confetti.
//! Text (the empty-arena notice, the winner name) is left to the page.

use glam::Vec2;

use super::shapes::{push_circle, push_square, segments_for};
use super::vertex::{Vertex, colors};
use crate::sim::{BallSnapshot, FrameState};

/// Alpha of background balls while a winner is on stage
pub const DIMMED_ALPHA: f32 = 0.2;
/// Balls at or below this radius are drawn without a highlight
pub const SHINE_MIN_RADIUS: f32 = 6.0;
/// Spread of the showcase halo (pixels beyond the ball edge)
pub const HALO_SPREAD: f32 = 20.0;
const HALO_LAYERS: u32 = 4;

/// Scale the alpha channel
fn faded(color: [f32; 4], alpha: f32) -> [f32; 4] {
    [color[0], color[1], color[2], color[3] * alpha]
}

/// Ball body plus its highlight up and to the left
fn push_ball(out: &mut Vec<Vertex>, ball: &BallSnapshot, alpha: f32, force_shine: bool) {
    let segments = segments_for(ball.radius);
    push_circle(out, ball.pos, ball.radius, ball.color.to_rgba(alpha), segments);

    if force_shine || ball.radius > SHINE_MIN_RADIUS {
        let r = ball.radius / 3.0;
        let center = ball.pos - Vec2::splat(r);
        push_circle(out, center, r, faded(colors::SHINE, alpha), segments_for(r));
    }
}

/// Soft dark halo approximated by stacked translucent discs
fn push_halo(out: &mut Vec<Vertex>, ball: &BallSnapshot) {
    let layer_alpha = colors::SHADOW[3] / HALO_LAYERS as f32;
    for layer in (1..=HALO_LAYERS).rev() {
        let radius = ball.radius + HALO_SPREAD * layer as f32 / HALO_LAYERS as f32;
        let mut color = colors::SHADOW;
        color[3] = layer_alpha;
        push_circle(out, ball.pos, radius, color, segments_for(radius));
    }
}

/// Tessellate a whole frame
pub fn build_scene(frame: &FrameState) -> Vec<Vertex> {
    let mut out = Vec::with_capacity(frame.balls.len() * 40 + frame.particles.len() * 6);

    let alpha = if frame.background_dimmed() {
        DIMMED_ALPHA
    } else {
        1.0
    };
    for ball in frame.background_balls() {
        push_ball(&mut out, ball, alpha, false);
    }

    if let Some(view) = &frame.showcase {
        push_halo(&mut out, &view.ball);
        push_ball(&mut out, &view.ball, 1.0, true);
    }

    for p in &frame.particles {
        push_square(&mut out, p.pos, p.size, p.color.to_rgba(1.0));
    }

    out
}

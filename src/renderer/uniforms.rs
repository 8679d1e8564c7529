//! Per-frame shader inputs for the tunnel raymarcher

use bytemuck::{Pod, Zeroable};

use crate::settings::Settings;
use crate::sim::GameState;

// ============================================================================
// GPU DATA STRUCTURES (must match shader)
// ============================================================================

#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, Pod, Zeroable)]
pub struct FrameUniforms {
    resolution: [f32; 2],      // offset 0
    max_distance: f32,         // offset 8
    lights_stage: u32,         // offset 12
    camera_position: [f32; 3], // offset 16 (vec3 is 16-byte aligned)
    fov: f32,                  // offset 28
    camera_rotation: [f32; 3], // offset 32 - pitch, yaw, roll in degrees
    time: f32,                 // offset 44
}

impl FrameUniforms {
    /// Shader inputs for the current state, rendered at `resolution`
    pub fn new(state: &GameState, settings: &Settings, resolution: [f32; 2], time: f32) -> Self {
        let player = &state.player;
        Self {
            resolution,
            max_distance: state.max_distance,
            lights_stage: state.progress.lights_stage,
            camera_position: player.camera_position().to_array(),
            fov: settings.fov,
            camera_rotation: [player.pitch, player.yaw, 0.0],
            time,
        }
    }

    pub fn as_bytes(&self) -> &[u8] {
        bytemuck::bytes_of(self)
    }

    pub fn camera_position(&self) -> [f32; 3] {
        self.camera_position
    }

    pub fn lights_stage(&self) -> u32 {
        self.lights_stage
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_layout_is_48_bytes() {
        assert_eq!(std::mem::size_of::<FrameUniforms>(), 48);
    }

    #[test]
    fn test_includes_head_bob() {
        let mut state = GameState::default();
        state.player.bob_offset = 0.03;
        state.progress.lights_stage = 4;
        let u = FrameUniforms::new(&state, &Settings::default(), [360.0, 180.0], 1.0);
        assert!((u.camera_position()[1] - 1.78).abs() < 1e-6);
        assert_eq!(u.lights_stage(), 4);
        assert_eq!(u.as_bytes().len(), 48);
    }
}

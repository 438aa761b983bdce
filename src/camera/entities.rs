use bevy::ecs::system::SystemParam;
use bevy::input::mouse::{MouseMotion, MouseWheel};
use bevy::prelude::*;

use super::CameraConfig;
use crate::ViewerPos;

/// Marker component for the survey camera entity.
#[derive(Component, Reflect)]
pub struct TerrainCamera;

/// Set to `true` on frames where the cursor was warped back to center,
/// so [`super::systems::fly`] can discard the synthetic mouse-motion delta.
#[derive(Resource, Default)]
pub struct CursorRecentered(pub bool);

/// Bundled input state for the flight system.
#[derive(SystemParam)]
pub struct FlightInput<'w, 's> {
    /// Keyboard state.
    pub keys: Res<'w, ButtonInput<KeyCode>>,
    /// Raw mouse deltas since last frame.
    pub mouse_motion: MessageReader<'w, 's, MouseMotion>,
    /// Scroll wheel messages.
    pub scroll: MessageReader<'w, 's, MouseWheel>,
    /// Frame timing.
    pub time: Res<'w, Time>,
    /// Shared viewer position (terrain owns `.pos.y`).
    pub viewer: ResMut<'w, ViewerPos>,
    /// Camera configuration.
    pub cfg: Res<'w, CameraConfig>,
    /// Whether the cursor was warped this frame.
    pub recentered: Res<'w, CursorRecentered>,
}

//! Ground sensor gizmos (debug only)
//!
//! Красный круг sensor у выбранного персонажа. F1 — вкл/выкл.

use bevy::math::Isometry2d;
use bevy::prelude::*;
use sensei_simulation::{GroundSensor, LocomotionController};

/// Marker: персонаж выбран для diagnostics
#[derive(Component, Debug, Clone, Copy, Default)]
pub struct Selected;

#[derive(Resource, Debug)]
pub struct SensorGizmos {
    pub enabled: bool,
}

impl Default for SensorGizmos {
    fn default() -> Self {
        Self { enabled: cfg!(debug_assertions) }
    }
}

fn toggle_sensor_gizmos(keys: Res<ButtonInput<KeyCode>>, mut gizmo_state: ResMut<SensorGizmos>) {
    if keys.just_pressed(KeyCode::F1) {
        gizmo_state.enabled = !gizmo_state.enabled;
    }
}

fn draw_ground_sensors(
    mut gizmos: Gizmos,
    gizmo_state: Res<SensorGizmos>,
    selected: Query<(&LocomotionController, &Transform, &GroundSensor), With<Selected>>,
) {
    if !gizmo_state.enabled {
        return;
    }

    for (controller, transform, sensor) in selected.iter() {
        let circle = controller.ground_sensor_geometry(sensor.world_position(transform));
        let color = if controller.is_grounded() {
            Color::srgb(1.0, 0.0, 0.0)
        } else {
            Color::srgb(0.6, 0.0, 0.0)
        };
        gizmos.circle_2d(Isometry2d::from_translation(circle.center), circle.radius, color);
    }
}

pub struct DiagnosticsPlugin;

impl Plugin for DiagnosticsPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<SensorGizmos>()
            .add_systems(Update, (toggle_sensor_gizmos, draw_ground_sensors).chain());
    }
}

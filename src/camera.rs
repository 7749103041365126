use bevy::{
    input::mouse::{MouseMotion, MouseScrollUnit, MouseWheel},
    prelude::*,
    window::{CursorGrabMode, PrimaryWindow},
};

pub const MIN_ZOOM: f32 = 1.0;
pub const MAX_ZOOM: f32 = 90.0;
const PITCH_LIMIT: f32 = 89.0;
const NEAR_PLANE: f32 = 0.1;
const FAR_PLANE: f32 = 100.0;

pub enum MoveDirection {
    Forward,
    Backward,
    Left,
    Right,
}

/// Free-flying camera state. Angles are in degrees; `zoom` is the vertical
/// field of view. While `captured` is false the pointer is released to the
/// overlay and look/move input is ignored.
#[derive(Component, Clone, Debug)]
pub struct FlyCamera {
    pub position: Vec3,
    pub yaw: f32,
    pub pitch: f32,
    pub zoom: f32,
    pub sensitivity: f32,
    pub speed: f32,
    pub boost_speed: f32,
    pub captured: bool,
}

impl Default for FlyCamera {
    fn default() -> Self {
        Self {
            position: Vec3::new(5.0, 5.0, 5.0),
            yaw: -90.0,
            pitch: 0.0,
            zoom: 45.0,
            sensitivity: 0.1,
            speed: 4.0,
            boost_speed: 8.0,
            captured: true,
        }
    }
}

impl FlyCamera {
    /// Applies relative pointer motion. dy is screen-down positive, so it is
    /// subtracted: moving the mouse up tilts the view up. Pitch stays inside
    /// the gimbal-safe range.
    pub fn process_mouse(&mut self, dx: f32, dy: f32) {
        self.yaw += dx * self.sensitivity;
        self.pitch = (self.pitch - dy * self.sensitivity).clamp(-PITCH_LIMIT, PITCH_LIMIT);
    }

    pub fn process_scroll(&mut self, delta: f32) {
        self.zoom = (self.zoom - delta).clamp(MIN_ZOOM, MAX_ZOOM);
    }

    pub fn toggle_capture(&mut self) {
        self.captured = !self.captured;
    }

    pub fn forward(&self) -> Vec3 {
        let yaw = self.yaw.to_radians();
        let pitch = self.pitch.to_radians();
        Vec3::new(
            yaw.cos() * pitch.cos(),
            pitch.sin(),
            yaw.sin() * pitch.cos(),
        )
        .normalize()
    }

    pub fn right(&self) -> Vec3 {
        self.forward().cross(Vec3::Y).normalize()
    }

    pub fn displace(&mut self, direction: MoveDirection, boost: bool, dt: f32) {
        let speed = if boost { self.boost_speed } else { self.speed };
        let velocity = speed * dt;
        match direction {
            MoveDirection::Forward => self.position += self.forward() * velocity,
            MoveDirection::Backward => self.position -= self.forward() * velocity,
            MoveDirection::Left => self.position -= self.right() * velocity,
            MoveDirection::Right => self.position += self.right() * velocity,
        }
    }

    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_to_rh(self.position, self.forward(), Vec3::Y)
    }

    pub fn projection_matrix(&self, aspect: f32) -> Mat4 {
        Mat4::perspective_rh(self.zoom.to_radians(), aspect, NEAR_PLANE, FAR_PLANE)
    }
}

pub struct CameraControllerPlugin;

impl Plugin for CameraControllerPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(
            (
                toggle_cursor_grab,
                mouse_look,
                scroll_zoom,
                keyboard_move,
                sync_camera,
            )
                .chain(),
        );
    }
}

fn toggle_cursor_grab(
    keys: Res<Input<KeyCode>>,
    mut cameras: Query<&mut FlyCamera>,
    mut windows: Query<&mut Window, With<PrimaryWindow>>,
) {
    if !keys.just_pressed(KeyCode::Escape) {
        return;
    }
    let Ok(mut camera) = cameras.get_single_mut() else { return };
    camera.toggle_capture();

    if let Ok(mut window) = windows.get_single_mut() {
        apply_cursor_mode(&mut window, camera.captured);
    }
}

pub fn apply_cursor_mode(window: &mut Window, captured: bool) {
    if captured {
        window.cursor.grab_mode = CursorGrabMode::Locked;
        window.cursor.visible = false;
    } else {
        window.cursor.grab_mode = CursorGrabMode::None;
        window.cursor.visible = true;
    }
}

fn mouse_look(mut motion: EventReader<MouseMotion>, mut cameras: Query<&mut FlyCamera>) {
    let Ok(mut camera) = cameras.get_single_mut() else { return };
    if !camera.captured {
        motion.clear();
        return;
    }
    for event in motion.iter() {
        camera.process_mouse(event.delta.x, event.delta.y);
    }
}

fn scroll_zoom(mut wheel: EventReader<MouseWheel>, mut cameras: Query<&mut FlyCamera>) {
    let Ok(mut camera) = cameras.get_single_mut() else { return };
    for event in wheel.iter() {
        let delta = match event.unit {
            MouseScrollUnit::Line => event.y,
            MouseScrollUnit::Pixel => event.y / 100.0,
        };
        camera.process_scroll(delta);
    }
}

fn keyboard_move(
    keys: Res<Input<KeyCode>>,
    time: Res<Time>,
    mut cameras: Query<&mut FlyCamera>,
) {
    let Ok(mut camera) = cameras.get_single_mut() else { return };
    if !camera.captured {
        return;
    }

    let boost = keys.pressed(KeyCode::LShift);
    let dt = time.delta_seconds();

    if keys.pressed(KeyCode::W) {
        camera.displace(MoveDirection::Forward, boost, dt);
    }
    if keys.pressed(KeyCode::S) {
        camera.displace(MoveDirection::Backward, boost, dt);
    }
    if keys.pressed(KeyCode::A) {
        camera.displace(MoveDirection::Left, boost, dt);
    }
    if keys.pressed(KeyCode::D) {
        camera.displace(MoveDirection::Right, boost, dt);
    }
}

fn sync_camera(mut cameras: Query<(&FlyCamera, &mut Transform, &mut Projection)>) {
    for (camera, mut transform, mut projection) in cameras.iter_mut() {
        transform.translation = camera.position;
        transform.look_to(camera.forward(), Vec3::Y);

        if let Projection::Perspective(perspective) = projection.as_mut() {
            perspective.fov = camera.zoom.to_radians();
            perspective.near = NEAR_PLANE;
            perspective.far = FAR_PLANE;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pitch_clamps_under_sustained_motion() {
        let mut camera = FlyCamera::default();
        for _ in 0..10_000 {
            camera.process_mouse(0.0, -1.0);
        }
        assert_eq!(camera.pitch, PITCH_LIMIT);

        for _ in 0..10_000 {
            camera.process_mouse(0.0, 1.0);
        }
        assert_eq!(camera.pitch, -PITCH_LIMIT);
    }

    #[test]
    fn zoom_clamps_in_both_directions() {
        let mut camera = FlyCamera::default();
        for _ in 0..1_000 {
            camera.process_scroll(1.0);
        }
        assert_eq!(camera.zoom, MIN_ZOOM);

        for _ in 0..1_000 {
            camera.process_scroll(-1.0);
        }
        assert_eq!(camera.zoom, MAX_ZOOM);
    }

    #[test]
    fn capture_toggle_pair_is_identity() {
        let mut camera = FlyCamera::default();
        let original = camera.captured;
        camera.toggle_capture();
        assert_ne!(camera.captured, original);
        camera.toggle_capture();
        assert_eq!(camera.captured, original);
    }

    #[test]
    fn default_forward_looks_down_negative_z() {
        let camera = FlyCamera::default();
        let forward = camera.forward();
        assert!(forward.x.abs() < 1e-6);
        assert!(forward.y.abs() < 1e-6);
        assert!((forward.z + 1.0).abs() < 1e-6);
    }

    #[test]
    fn displacement_follows_forward_and_scales_with_boost() {
        let mut camera = FlyCamera {
            position: Vec3::ZERO,
            ..FlyCamera::default()
        };
        camera.displace(MoveDirection::Forward, false, 1.0);
        assert!((camera.position.z + camera.speed).abs() < 1e-4);

        let mut boosted = FlyCamera {
            position: Vec3::ZERO,
            ..FlyCamera::default()
        };
        boosted.displace(MoveDirection::Forward, true, 1.0);
        assert!((boosted.position.z + boosted.boost_speed).abs() < 1e-4);
    }

    #[test]
    fn projection_tightens_as_zoom_decreases() {
        let mut camera = FlyCamera::default();
        let wide = camera.projection_matrix(16.0 / 9.0);
        camera.process_scroll(20.0);
        let narrow = camera.projection_matrix(16.0 / 9.0);
        assert!(narrow.col(0).x > wide.col(0).x);
        assert!(narrow.col(1).y > wide.col(1).y);
    }

    #[test]
    fn view_matrix_centers_the_eye() {
        let camera = FlyCamera::default();
        let eye = camera.view_matrix() * camera.position.extend(1.0);
        assert!(eye.truncate().length() < 1e-4);
    }
}

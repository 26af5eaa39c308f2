use bevy::ecs::system::Resource;

/// Raw locomotion input for one tick.
///
/// Written each frame by whatever input backend the application wires up; the
/// controller only ever reads this resource, so tests and replays can drive
/// the traveler by writing it directly.
#[derive(Resource, Debug, Clone, Copy, Default)]
pub struct TravelerInput {
    /// Forward axis in `-1..=1`, positive walks forward.
    pub forward: f32,
    /// Strafe axis in `-1..=1`, positive walks right.
    pub right: f32,
    /// Turn axis in `-1..=1`, positive turns left (counter-clockwise about
    /// local up).
    pub yaw: f32,
    /// Hold to run instead of walk.
    pub running: bool,
    /// Set on the frame the jump key is pressed; consumed by the next fixed
    /// step that sees it.
    pub jump: bool,
}

impl TravelerInput {
    /// Consume a pending jump press.
    pub fn take_jump(&mut self) -> bool {
        std::mem::take(&mut self.jump)
    }
}

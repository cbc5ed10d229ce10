/// Opacity for a camera `distance` from the avatar: solid beyond `end`, fading to
/// invisible at `start`.
pub fn fade_opacity(distance: f32, start: f32, end: f32) -> f32 {
    if distance > end {
        return 1.0;
    }
    let span = end - start;
    if span <= 0.0 {
        return if distance >= end { 1.0 } else { 0.0 };
    }
    ((distance - start) / span).clamp(0.0, 1.0)
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum AvatarPartKind {
    Body,
    Head,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct AvatarPart {
    pub kind: AvatarPartKind,
    pub opacity: f32,
}

/// Renderable pieces of the player avatar.
#[derive(Clone, Debug)]
pub struct Avatar {
    pub parts: Vec<AvatarPart>,
    pub fade_start: f32,
    pub fade_end: f32,
}

impl Avatar {
    pub fn new(fade_start: f32, fade_end: f32) -> Self {
        let parts = [AvatarPartKind::Body, AvatarPartKind::Head]
            .into_iter()
            .map(|kind| AvatarPart { kind, opacity: 1.0 })
            .collect();
        Self {
            parts,
            fade_start,
            fade_end,
        }
    }

    /// Fade every part for the current camera distance.
    pub fn update_fade(&mut self, camera_distance: f32) {
        let o = fade_opacity(camera_distance, self.fade_start, self.fade_end);
        for part in &mut self.parts {
            part.opacity = o;
        }
    }

    pub fn opacity(&self, kind: AvatarPartKind) -> Option<f32> {
        self.parts.iter().find(|p| p.kind == kind).map(|p| p.opacity)
    }
}

impl Default for Avatar {
    fn default() -> Self {
        Self::new(1.0, 2.0)
    }
}

use std::path::Path;

use serde::Deserialize;

use crate::config::ConfigError;
use crate::input::Key;
use crate::mode::MenuAction;

/// Input for a stretch of frames. Keys are held for every frame of the step; the
/// one-shot fields fire on its first frame only.
#[derive(Clone, Debug, Default, Deserialize, PartialEq)]
pub struct ScriptStep {
    #[serde(default = "default_frames")] pub frames: u32,
    #[serde(default)] pub keys: Vec<Key>,
    /// Pointer delta `[dx, dy]` applied on every frame of the step.
    #[serde(default)] pub look: Option<[f32; 2]>,
    #[serde(default)] pub click: Option<u8>,
    #[serde(default)] pub scroll: Option<f32>,
    #[serde(default)] pub action: Option<MenuAction>,
    #[serde(default)] pub capture: Option<bool>,
    #[serde(default)] pub strafe_mode: Option<bool>,
    #[serde(default)] pub note: Option<String>,
}

fn default_frames() -> u32 { 1 }

#[derive(Clone, Debug, Default, Deserialize, PartialEq)]
pub struct Script {
    #[serde(default)] pub steps: Vec<ScriptStep>,
}

impl Script {
    pub fn load_from_path(path: &Path) -> Result<Self, ConfigError> {
        let s = std::fs::read_to_string(path)?;
        Ok(toml::from_str(&s)?)
    }

    /// Walk to the stairs, climb a few steps, then build and tear down a small stack.
    pub fn demo() -> Self {
        let step = |frames: u32, keys: &[Key]| ScriptStep {
            frames,
            keys: keys.to_vec(),
            ..Default::default()
        };
        Script {
            steps: vec![
                ScriptStep {
                    action: Some(MenuAction::Start),
                    note: Some("start".into()),
                    ..Default::default()
                },
                ScriptStep {
                    frames: 30,
                    look: Some([0.0, 8.0]),
                    ..Default::default()
                },
                ScriptStep { click: Some(0), ..Default::default() },
                step(10, &[]),
                ScriptStep { click: Some(0), ..Default::default() },
                step(10, &[]),
                ScriptStep { click: Some(2), ..Default::default() },
                ScriptStep { scroll: Some(-200.0), ..Default::default() },
                step(40, &[Key::J]),
                step(90, &[Key::W]),
                step(30, &[Key::W, Key::Space]),
                step(60, &[Key::W, Key::Shift]),
                ScriptStep {
                    capture: Some(false),
                    note: Some("pointer released".into()),
                    ..Default::default()
                },
                step(5, &[]),
                ScriptStep {
                    action: Some(MenuAction::CloseSettings),
                    ..Default::default()
                },
                step(60, &[]),
            ],
        }
    }

    pub fn total_frames(&self) -> u64 {
        self.steps.iter().map(|s| s.frames.max(1) as u64).sum()
    }
}

/// One frame of scripted input.
#[derive(Clone, Debug, PartialEq)]
pub struct ScriptFrame<'a> {
    pub step: &'a ScriptStep,
    /// True on the first frame of the step.
    pub first: bool,
}

/// Steps through a [`Script`] frame by frame.
#[derive(Debug)]
pub struct ScriptPlayer {
    script: Script,
    index: usize,
    frame_in_step: u32,
}

impl ScriptPlayer {
    pub fn new(script: Script) -> Self {
        Self {
            script,
            index: 0,
            frame_in_step: 0,
        }
    }

    pub fn is_finished(&self) -> bool {
        self.index >= self.script.steps.len()
    }

    pub fn next_frame(&mut self) -> Option<ScriptFrame<'_>> {
        let step = self.script.steps.get(self.index)?;
        let first = self.frame_in_step == 0;
        self.frame_in_step += 1;
        if self.frame_in_step >= step.frames.max(1) {
            self.index += 1;
            self.frame_in_step = 0;
        }
        Some(ScriptFrame { step, first })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_steps_with_defaults() {
        let s: Script = toml::from_str(
            r#"
            [[steps]]
            action = "start"

            [[steps]]
            frames = 3
            keys = ["w", "shift"]
            look = [2.0, -1.0]

            [[steps]]
            click = 2
            "#,
        )
        .unwrap();
        assert_eq!(s.steps.len(), 3);
        assert_eq!(s.steps[0].frames, 1);
        assert_eq!(s.steps[0].action, Some(MenuAction::Start));
        assert_eq!(s.steps[1].keys, vec![Key::W, Key::Shift]);
        assert_eq!(s.steps[2].click, Some(2));
        assert_eq!(s.total_frames(), 5);
    }

    #[test]
    fn player_marks_first_frames() {
        let s: Script = toml::from_str("[[steps]]\nframes = 2\n\n[[steps]]\n").unwrap();
        let mut p = ScriptPlayer::new(s);
        let firsts: Vec<bool> = std::iter::from_fn(|| p.next_frame().map(|f| f.first)).collect();
        assert_eq!(firsts, vec![true, false, true]);
        assert!(p.is_finished());
    }

    #[test]
    fn demo_script_is_nonempty() {
        let demo = Script::demo();
        assert!(demo.total_frames() > 100);
        assert_eq!(demo.steps[0].action, Some(MenuAction::Start));
    }

    #[test]
    fn bundled_script_loads() {
        let path = Path::new(env!("CARGO_MANIFEST_DIR")).join("assets/demo_script.toml");
        let s = Script::load_from_path(&path).unwrap();
        assert_eq!(s.steps[0].action, Some(MenuAction::Start));
        assert!(s.steps.iter().any(|st| st.keys.contains(&Key::Escape)));
        assert_eq!(s.steps.last().and_then(|st| st.strafe_mode), Some(true));
    }
}

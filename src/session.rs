use crate::models::CelebrationCue;

/// Per-session presentation state. Not persisted.
#[derive(Debug, Clone, Default)]
pub struct SessionState {
    celebrated: bool,
}

impl SessionState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Feeds the latest today-percentage. Confetti fires on every observation
    /// at 100%; the success sound only on the first one since the percentage
    /// was last below 100.
    pub fn observe(&mut self, percent: u8, task_count: usize) -> CelebrationCue {
        if percent == 100 && task_count > 0 {
            let sound = !self.celebrated;
            self.celebrated = true;
            CelebrationCue {
                confetti: true,
                sound,
            }
        } else {
            self.celebrated = false;
            CelebrationCue::default()
        }
    }

    pub fn celebrated(&self) -> bool {
        self.celebrated
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sound_plays_once_until_percent_drops() {
        let mut session = SessionState::new();

        let first = session.observe(100, 2);
        assert!(first.confetti && first.sound);

        let again = session.observe(100, 2);
        assert!(again.confetti);
        assert!(!again.sound);

        assert_eq!(session.observe(50, 2), CelebrationCue::default());
        assert!(!session.celebrated());

        assert!(session.observe(100, 2).sound);
    }

    #[test]
    fn no_celebration_without_tasks() {
        let mut session = SessionState::new();
        assert_eq!(session.observe(100, 0), CelebrationCue::default());
        assert_eq!(session.observe(0, 0), CelebrationCue::default());
    }
}

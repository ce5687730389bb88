//! Desktop alert - the expiry notification
//!
//! Implements the engine's [`Alert`] collaborator with a desktop
//! notification. The alert stays silent until `arm` has been called in
//! response to a user gesture, since some platforms refuse audio before
//! one has happened.

use notify_rust::{Notification, Urgency};
use shared::Alert;

pub struct DesktopAlert {
    armed: bool,
    sound_enabled: bool,
}

impl DesktopAlert {
    pub fn new(sound_enabled: bool) -> Self {
        Self {
            armed: false,
            sound_enabled,
        }
    }

    #[allow(dead_code)]
    pub fn is_armed(&self) -> bool {
        self.armed
    }

    pub fn set_sound_enabled(&mut self, enabled: bool) {
        self.sound_enabled = enabled;
    }
}

impl Alert for DesktopAlert {
    fn arm(&mut self) {
        self.armed = true;
    }

    fn play(&mut self) {
        if !self.armed {
            return;
        }
        let mut notification = Notification::new();
        notification
            .summary("Time's up!")
            .body("The countdown reached zero.")
            .appname("visual-timer")
            .icon("alarm-clock")
            .urgency(Urgency::Critical);
        if self.sound_enabled {
            notification.sound_name("alarm-clock-elapsed");
        }
        if let Err(e) = notification.show() {
            eprintln!("Failed to post expiry notification: {}", e);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_arm_latches() {
        let mut alert = DesktopAlert::new(true);
        assert!(!alert.is_armed());
        alert.arm();
        assert!(alert.is_armed());
        alert.arm();
        assert!(alert.is_armed());
    }

    #[test]
    fn test_unarmed_play_is_silent() {
        // Must not attempt a notification before the first gesture.
        let mut alert = DesktopAlert::new(true);
        alert.play();
        assert!(!alert.is_armed());
    }
}

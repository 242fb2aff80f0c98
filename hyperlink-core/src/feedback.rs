/// Post-copy feedback: sound and/or notification depending on the user's style
use crate::constants::APP_NAME;
use crate::settings::NotificationStyle;
use log::info;

/// Platform sound and notification output
pub trait Feedback {
    fn play_sound(&self, sound_name: &str);
    fn notify(&self, title: &str, body: &str);
}

/// Announce a copied URL the way `style` asks for
pub fn deliver<F: Feedback + ?Sized>(url: &str, style: NotificationStyle, sound_name: &str, feedback: &F) {
    if style.plays_sound() {
        feedback.play_sound(sound_name);
    }
    if style.shows_notification() {
        feedback.notify(APP_NAME, url);
    }
    info!("Copied {} ({})", url, style.display_name());
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;

    #[derive(Default)]
    struct Recorder {
        events: RefCell<Vec<String>>,
    }

    impl Feedback for Recorder {
        fn play_sound(&self, sound_name: &str) {
            self.events.borrow_mut().push(format!("sound:{}", sound_name));
        }

        fn notify(&self, title: &str, body: &str) {
            self.events.borrow_mut().push(format!("notify:{}:{}", title, body));
        }
    }

    #[test]
    fn test_each_style() {
        let cases = [
            (NotificationStyle::Silent, vec![]),
            (NotificationStyle::PlaySound, vec!["sound:Tink"]),
            (NotificationStyle::ShowNotification, vec!["notify:Hyperlink:https://a.b"]),
            (
                NotificationStyle::SoundAndNotification,
                vec!["sound:Tink", "notify:Hyperlink:https://a.b"],
            ),
        ];

        for (style, expected) in cases {
            let recorder = Recorder::default();
            deliver("https://a.b", style, "Tink", &recorder);
            assert_eq!(*recorder.events.borrow(), expected, "{:?}", style);
        }
    }
}

/// Sound and notification output for copied URLs. Main thread only.

use cocoa::base::{id, nil, BOOL, NO};
use hyperlink_core::Feedback;
use log::{debug, warn};
use objc::{class, msg_send, sel, sel_impl};
use std::ffi::CString;

#[link(name = "AppKit", kind = "framework")]
extern "C" {
    fn NSBeep();
}

unsafe fn nsstring(s: &str) -> id {
    let Ok(c) = CString::new(s) else {
        return nil;
    };
    msg_send![class!(NSString), stringWithUTF8String: c.as_ptr()]
}

/// `Feedback` using NSSound and NSUserNotificationCenter
#[derive(Debug, Default, Clone, Copy)]
pub struct MacFeedback;

impl Feedback for MacFeedback {
    fn play_sound(&self, sound_name: &str) {
        unsafe {
            let name = nsstring(sound_name);
            let sound: id = if name != nil {
                msg_send![class!(NSSound), soundNamed: name]
            } else {
                nil
            };

            if sound == nil {
                debug!("Sound '{}' not found, using system beep", sound_name);
                NSBeep();
                return;
            }

            let _: () = msg_send![sound, stop];
            let played: BOOL = msg_send![sound, play];
            if played == NO {
                NSBeep();
            }
        }
    }

    fn notify(&self, title: &str, body: &str) {
        unsafe {
            let center: id = msg_send![class!(NSUserNotificationCenter), defaultUserNotificationCenter];
            if center == nil {
                warn!("Notification center unavailable; is the app bundled?");
                return;
            }

            let notification: id = msg_send![class!(NSUserNotification), alloc];
            let notification: id = msg_send![notification, init];
            let _: () = msg_send![notification, setTitle: nsstring(title)];
            let _: () = msg_send![notification, setInformativeText: nsstring(body)];
            let _: () = msg_send![center, deliverNotification: notification];
            let _: () = msg_send![notification, release];
        }
    }
}

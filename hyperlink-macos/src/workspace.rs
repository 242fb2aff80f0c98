/// NSWorkspace queries: front-most application, opening files and URLs.

use cocoa::base::{id, nil};
use hyperlink_core::FrontApp;
use objc::{class, msg_send, sel, sel_impl};
use std::ffi::CStr;
use std::os::raw::c_char;
use std::path::Path;
use std::process::Command;

unsafe fn nsstring_to_string(s: id) -> Option<String> {
    if s == nil {
        return None;
    }
    let ptr: *const c_char = msg_send![s, UTF8String];
    if ptr.is_null() {
        return None;
    }
    Some(CStr::from_ptr(ptr).to_string_lossy().into_owned())
}

/// The application currently receiving keyboard focus. Must run on the main thread.
pub fn frontmost_app() -> Option<FrontApp> {
    unsafe {
        let workspace: id = msg_send![class!(NSWorkspace), sharedWorkspace];
        let app: id = msg_send![workspace, frontmostApplication];
        if app == nil {
            return None;
        }

        let bundle_id: id = msg_send![app, bundleIdentifier];
        let name: id = msg_send![app, localizedName];

        Some(FrontApp {
            bundle_id: nsstring_to_string(bundle_id).unwrap_or_default(),
            name: nsstring_to_string(name),
        })
    }
}

/// Open a file (or URL string) with its default application
pub fn open_path(target: impl AsRef<Path>) -> std::io::Result<()> {
    Command::new("open").arg(target.as_ref()).spawn()?;
    Ok(())
}

/// Open a text file in the default text editor
pub fn open_in_text_editor(path: impl AsRef<Path>) -> std::io::Result<()> {
    Command::new("open").arg("-t").arg(path.as_ref()).spawn()?;
    Ok(())
}

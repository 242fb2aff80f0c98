use anyhow::{bail, Result};
use cocoa::base::{id, nil, YES};
use cocoa::foundation::NSString;
use log::{info, warn};
use objc::declare::ClassDecl;
use objc::runtime::{Class, Object, Sel};
use objc::{class, msg_send, sel, sel_impl};
use std::cell::RefCell;
use std::sync::Once;

const NS_VARIABLE_STATUS_ITEM_LENGTH: f64 = -1.0;
const FALLBACK_SYMBOL: &str = "link";
const TARGET_CLASS: &str = "HyperlinkMenuTarget";

/// Actions reachable from the status bar menu
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuAction {
    Preferences,
    RecordShortcut,
    CheckForUpdates,
    Quit,
}

impl MenuAction {
    fn tag(self) -> isize {
        match self {
            Self::Preferences => 1,
            Self::RecordShortcut => 2,
            Self::CheckForUpdates => 3,
            Self::Quit => 4,
        }
    }

    fn from_tag(tag: isize) -> Option<Self> {
        match tag {
            1 => Some(Self::Preferences),
            2 => Some(Self::RecordShortcut),
            3 => Some(Self::CheckForUpdates),
            4 => Some(Self::Quit),
            _ => None,
        }
    }
}

thread_local! {
    // AppKit only calls menu targets on the main thread
    static MENU_HANDLER: RefCell<Option<Box<dyn FnMut(MenuAction)>>> = RefCell::new(None);
}

/// The menu bar status item and its menu
pub struct StatusBar {
    status_item: id,
    _target: id,
}

impl StatusBar {
    /// Create the status item; must be called on the main thread after the app has launched
    pub fn new<F>(icon_name: &str, handler: F) -> Result<Self>
    where
        F: FnMut(MenuAction) + 'static,
    {
        MENU_HANDLER.with(|slot| *slot.borrow_mut() = Some(Box::new(handler)));

        unsafe {
            let status_bar: id = msg_send![class!(NSStatusBar), systemStatusBar];
            let status_item: id = msg_send![status_bar, statusItemWithLength: NS_VARIABLE_STATUS_ITEM_LENGTH];
            if status_item == nil {
                bail!("Failed to create status bar item");
            }
            let _: id = msg_send![status_item, retain];

            let target: id = msg_send![target_class(), new];
            let menu = build_menu(target);
            let () = msg_send![status_item, setMenu: menu];
            let () = msg_send![menu, release];

            let bar = Self {
                status_item,
                _target: target,
            };
            bar.set_icon(icon_name);
            info!("Status bar item created");
            Ok(bar)
        }
    }

    /// Show the SF Symbol `name`, or the default link symbol if it does not exist
    pub fn set_icon(&self, name: &str) {
        unsafe {
            let button: id = msg_send![self.status_item, button];
            if button == nil {
                warn!("Status item has no button");
                return;
            }

            let mut image = symbol_image(name);
            if image == nil && name != FALLBACK_SYMBOL {
                warn!("Unknown menu bar symbol '{}', using '{}'", name, FALLBACK_SYMBOL);
                image = symbol_image(FALLBACK_SYMBOL);
            }
            if image == nil {
                let title = NsString::new("🔗");
                let () = msg_send![button, setTitle: title.0];
                return;
            }

            let () = msg_send![image, setTemplate: YES];
            let () = msg_send![button, setImage: image];
        }
    }

    /// Show the active shortcut in the status item tooltip
    pub fn set_shortcut_hint(&self, shortcut: &str) {
        unsafe {
            let button: id = msg_send![self.status_item, button];
            if button == nil {
                return;
            }
            let tip = NsString::new(&format!("Hyperlink: {} copies the current tab URL", shortcut));
            let () = msg_send![button, setToolTip: tip.0];
        }
    }
}

impl Drop for StatusBar {
    fn drop(&mut self) {
        unsafe {
            let status_bar: id = msg_send![class!(NSStatusBar), systemStatusBar];
            let () = msg_send![status_bar, removeStatusItem: self.status_item];
            let () = msg_send![self.status_item, release];
        }
        MENU_HANDLER.with(|slot| slot.borrow_mut().take());
    }
}

/// An owned NSString, released on drop. Receivers copy or retain what they keep.
struct NsString(id);

impl NsString {
    unsafe fn new(s: &str) -> Self {
        Self(NSString::alloc(nil).init_str(s))
    }
}

impl Drop for NsString {
    fn drop(&mut self) {
        unsafe {
            let () = msg_send![self.0, release];
        }
    }
}

unsafe fn symbol_image(name: &str) -> id {
    let name = NsString::new(name);
    let description = NsString::new("Hyperlink");
    msg_send![class!(NSImage), imageWithSystemSymbolName: name.0 accessibilityDescription: description.0]
}

unsafe fn build_menu(target: id) -> id {
    let menu: id = msg_send![class!(NSMenu), new];

    add_item(menu, target, "Preferences…", ",", MenuAction::Preferences);
    add_item(menu, target, "Record Shortcut…", "", MenuAction::RecordShortcut);
    add_item(menu, target, "Check for Updates…", "", MenuAction::CheckForUpdates);

    let separator: id = msg_send![class!(NSMenuItem), separatorItem];
    let () = msg_send![menu, addItem: separator];

    add_item(menu, target, "Quit", "q", MenuAction::Quit);
    menu
}

unsafe fn add_item(menu: id, target: id, title: &str, key: &str, action: MenuAction) {
    let title = NsString::new(title);
    let key = NsString::new(key);
    let action_sel = sel!(menuItemSelected:);
    let item: id = msg_send![class!(NSMenuItem), alloc];
    let item: id = msg_send![item, initWithTitle:title.0 action:action_sel keyEquivalent:key.0];
    let () = msg_send![item, setTarget: target];
    let () = msg_send![item, setTag: action.tag()];
    let () = msg_send![menu, addItem: item];
    // the menu holds the only reference we need
    let () = msg_send![item, release];
}

extern "C" fn menu_item_selected(_this: &Object, _cmd: Sel, sender: id) {
    let tag: isize = unsafe { msg_send![sender, tag] };
    let Some(action) = MenuAction::from_tag(tag) else {
        warn!("Menu item with unknown tag {}", tag);
        return;
    };

    MENU_HANDLER.with(|slot| {
        if let Some(handler) = slot.borrow_mut().as_mut() {
            handler(action);
        }
    });
}

fn target_class() -> &'static Class {
    static REGISTER: Once = Once::new();
    REGISTER.call_once(|| {
        let superclass = class!(NSObject);
        if let Some(mut decl) = ClassDecl::new(TARGET_CLASS, superclass) {
            unsafe {
                decl.add_method(
                    sel!(menuItemSelected:),
                    menu_item_selected as extern "C" fn(&Object, Sel, id),
                );
            }
            decl.register();
        }
    });
    Class::get(TARGET_CLASS).unwrap_or_else(|| class!(NSObject))
}

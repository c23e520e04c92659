use web_sys::window;

/// Yes/no prompt shown before destructive actions.
pub trait Dialog {
    fn confirm(&self, message: &str) -> bool;
}

/// `window.confirm`. Without a window there is nobody to say yes.
#[derive(Debug, Default, Clone, Copy)]
pub struct BrowserDialog;

impl Dialog for BrowserDialog {
    fn confirm(&self, message: &str) -> bool {
        window()
            .and_then(|w| w.confirm_with_message(message).ok())
            .unwrap_or(false)
    }
}

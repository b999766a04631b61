pub const KEY_UPLOAD: char = 'u';
pub const KEY_IMPORT_URL: char = 'i';
pub const KEY_CANCEL_UPLOAD: char = 'c';
pub const KEY_DISMISS_ERROR: char = 'x';
pub const KEY_CLOSE: char = 'q';

pub const LABEL_UPLOAD: &str = "[u] Upload a File";
pub const LABEL_IMPORT_URL: &str = "[i] Import From URL";
pub const LABEL_CANCEL_UPLOAD: &str = "[c] Cancel Upload";
pub const LABEL_CLOSE: &str = "[q] Close";
pub const LABEL_DISMISS_ERROR: &str = "[x] dismiss";
pub const URL_PLACEHOLDER: &str = "http://";
pub const URL_FORM_HINT: &str = "Enter: Import   Ctrl+U: upload   Esc: close";
pub const DROP_HINT: &str = "Paste or drop a .zip path here to upload it.";

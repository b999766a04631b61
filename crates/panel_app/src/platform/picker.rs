use std::sync::mpsc;
use std::thread;

use panel_core::Msg;
use panel_logging::panel_debug;

/// Opens the native file dialog off the UI thread; a pick arrives as `Msg::FileChosen`.
pub fn pick_archive(msg_tx: mpsc::Sender<Msg>) {
    thread::spawn(move || {
        let picked = rfd::FileDialog::new()
            .set_title("Upload a File")
            .add_filter("Zip archive", &["zip"])
            .pick_file();
        match picked {
            Some(path) => {
                let _ = msg_tx.send(Msg::FileChosen(path));
            }
            None => panel_debug!("File dialog closed without a selection"),
        }
    });
}

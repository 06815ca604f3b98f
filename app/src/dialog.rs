use std::path::PathBuf;

use inkling::UPLOAD_FILTERS;
use rfd::FileDialog;

/// Shows the native open-file dialog restricted to png/jpg files.
///
/// Blocks until the user picks a file or closes the dialog.
pub fn pick_upload_file() -> Option<PathBuf> {
    let mut dialog = FileDialog::new().set_title("Select an image");
    for (name, extensions) in UPLOAD_FILTERS {
        dialog = dialog.add_filter(name, extensions);
    }
    dialog.pick_file()
}

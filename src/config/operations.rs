// Config operations - settings file I/O

mod io;

pub use io::{load_settings_file, save_settings_file};

//! Platform helpers for the GLNomad editor: whole-file I/O with logged
//! byte counts, and lookup of `-name value` process parameters.

pub mod args;
pub mod fs;

pub use args::{get_parm, parm_value};
pub use fs::{build_os_path, file_exists, file_length, load_file, save_file};

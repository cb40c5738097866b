pub mod file_import;
pub mod output;

pub use file_import::{import_file, validate_file, MAX_FILE_SIZE};
pub use output::{mailto_link, save_download, Desktop, SystemDesktop};

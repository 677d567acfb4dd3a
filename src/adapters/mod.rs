mod archive;
mod multipart;
mod raw_text;
mod web_page;

pub use archive::{import_archive, read_archive};
pub use multipart::extract_file_part;
pub use raw_text::{resolve_pending, RawTextAdapter};
pub use web_page::WebPageAdapter;

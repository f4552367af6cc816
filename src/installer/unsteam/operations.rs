mod download;
mod extract;
mod files;

pub use download::{FixSource, HttpFixSource};
pub use extract::{default_extractor, list_archive_entries, Extractor, SevenZip, ZipExtractor};
pub use files::{patch_ini_file, remove_fix_files};

#[cfg(test)]
pub(crate) use extract::tests::write_zip;

use std::fs::{self, Metadata};
use std::io;
use std::path::Path;

use crate::entry::EntryKind;
use crate::flags::WalkFlags;

/// Fetch metadata for `path`, following links unless `PHYSICAL` is set.
pub(crate) fn fetch(path: &Path, flags: WalkFlags) -> io::Result<Metadata> {
    if flags.is_physical() {
        fs::symlink_metadata(path)
    } else {
        fs::metadata(path)
    }
}

/// Map a fetch outcome to the tag reported to the visitor.
pub(crate) fn classify(result: Option<&Metadata>) -> EntryKind {
    match result {
        None => EntryKind::NotStatable,
        Some(meta) if meta.is_dir() => EntryKind::Directory,
        Some(_) => EntryKind::RegularFile,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn classifies_files_and_dirs() {
        let temp = tempfile::tempdir().unwrap();
        let file = temp.path().join("f");
        fs::write(&file, b"x").unwrap();

        let meta = fetch(&file, WalkFlags::empty()).unwrap();
        assert_eq!(classify(Some(&meta)), EntryKind::RegularFile);

        let meta = fetch(temp.path(), WalkFlags::empty()).unwrap();
        assert_eq!(classify(Some(&meta)), EntryKind::Directory);

        assert!(fetch(&temp.path().join("missing"), WalkFlags::empty()).is_err());
        assert_eq!(classify(None), EntryKind::NotStatable);
    }

    #[cfg(unix)]
    #[test]
    fn physical_does_not_follow_links() {
        use std::os::unix::fs::symlink;

        let temp = tempfile::tempdir().unwrap();
        let target = temp.path().join("target");
        fs::create_dir(&target).unwrap();
        let link = temp.path().join("link");
        symlink(&target, &link).unwrap();

        let logical = fetch(&link, WalkFlags::empty()).unwrap();
        assert_eq!(classify(Some(&logical)), EntryKind::Directory);

        let physical = fetch(&link, WalkFlags::PHYSICAL).unwrap();
        assert!(physical.file_type().is_symlink());
        assert_eq!(classify(Some(&physical)), EntryKind::RegularFile);
    }

    #[cfg(unix)]
    #[test]
    fn dangling_link_is_statable_only_physically() {
        use std::os::unix::fs::symlink;

        let temp = tempfile::tempdir().unwrap();
        let link = temp.path().join("dangling");
        symlink(temp.path().join("nowhere"), &link).unwrap();

        assert!(fetch(&link, WalkFlags::empty()).is_err());
        assert!(fetch(&link, WalkFlags::PHYSICAL).is_ok());
    }
}

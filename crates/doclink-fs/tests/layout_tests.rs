use doclink_fs::layout::SourceFile;
use doclink_fs::{SourceDir, SourceLayout};
use pretty_assertions::assert_eq;
use rstest::rstest;
use std::fs;
use tempfile::TempDir;

fn media_root(archive: &[u64], originals: &[u64]) -> TempDir {
    let temp = TempDir::new().unwrap();
    for (dir, ids) in [("archive", archive), ("originals", originals)] {
        fs::create_dir_all(temp.path().join(dir)).unwrap();
        for id in ids {
            fs::write(temp.path().join(dir).join(format!("{id:07}.pdf")), format!("{dir}-{id}")).unwrap();
        }
    }
    temp
}

#[rstest]
#[case::archive_only(&[1], &[], Some(SourceDir::Archive))]
#[case::both_prefers_archive(&[1], &[1], Some(SourceDir::Archive))]
#[case::originals_fallback(&[], &[1], Some(SourceDir::Originals))]
#[case::neither(&[], &[], None)]
#[case::other_document_only(&[2], &[3], None)]
fn test_resolve_preference(
    #[case] archive: &[u64],
    #[case] originals: &[u64],
    #[case] expected: Option<SourceDir>,
) {
    let temp = media_root(archive, originals);
    let layout = SourceLayout::new(temp.path());

    let resolved = layout.resolve(1);

    assert_eq!(resolved.as_ref().map(|f| f.dir), expected);
    if let Some(SourceFile { dir, path }) = resolved {
        assert_eq!(path, temp.path().join(dir.as_str()).join("0000001.pdf"));
    }
}

#[test]
fn test_missing_source_root_resolves_nothing() {
    let temp = TempDir::new().unwrap();
    let layout = SourceLayout::new(temp.path().join("not-there"));

    assert_eq!(layout.resolve(1), None);
}

//! Dry-run must decide exactly like a real run and leave the tree untouched

use std::fs;

use doclink_core::{
    Action, Catalog, FolderTags, HydratedDocument, LinkSynchronizer, SyncOptions, SyncReport,
};
use doclink_fs::SourceLayout;
use doclink_test_utils::records::{DocumentBuilder, correspondent, document_type, tag};
use doclink_test_utils::tree::MirrorFixture;
use pretty_assertions::assert_eq;

fn docs() -> Vec<HydratedDocument> {
    let catalog = Catalog::from_records(
        [correspondent(1, "Acme")],
        [document_type(1, "Invoice")],
        [tag(10, "Tax")],
    );
    [
        DocumentBuilder::new(1, "March").correspondent(1).document_type(1),
        DocumentBuilder::new(2, "Also March").correspondent(1).document_type(1),
        DocumentBuilder::new(3, "Missing").document_type(1),
        DocumentBuilder::new(4, "Tagged")
            .document_type(1)
            .tags(&[10])
            .created("2024-05-01"),
    ]
    .iter()
    .map(|b| catalog.hydrate(b.build()).unwrap())
    .collect()
}

fn populate(fixture: &MirrorFixture) {
    fixture.add_archive(1, b"one");
    fixture.add_original(2, b"two");
    fixture.add_archive(4, b"four");
    fixture.add_dst_file("Letter/2020-01/2020-01-01 Unknown Old.pdf", b"stale");
    fixture.add_dst_file("Invoice/2024-03/gone.pdf", b"stale");
    fixture.add_dst_dir("Lonely");
}

fn run(fixture: &MirrorFixture, dry_run: bool) -> SyncReport {
    LinkSynchronizer::new(
        SourceLayout::new(fixture.src()),
        fixture.dst(),
        "10".parse::<FolderTags>().unwrap(),
        SyncOptions { dry_run },
    )
    .run(&docs())
    .unwrap()
}

#[test]
fn test_dry_run_leaves_tree_untouched() {
    let fixture = MirrorFixture::new();
    populate(&fixture);
    let before = fixture.snapshot_dst();

    let report = run(&fixture, true);

    assert!(report.dry_run);
    assert!(!report.is_noop());
    assert_eq!(fixture.snapshot_dst(), before);
}

#[test]
fn test_dry_run_predicts_the_real_run() {
    let predicted_fixture = MirrorFixture::new();
    populate(&predicted_fixture);
    let real_fixture = MirrorFixture::new();
    populate(&real_fixture);

    let predicted = run(&predicted_fixture, true);
    let real = run(&real_fixture, false);

    // Same decisions, expressed relative to each fixture's root
    let relative = |fixture: &MirrorFixture, report: &SyncReport| -> Vec<String> {
        report
            .actions
            .iter()
            .map(|a| {
                format!("{a:?}")
                    .replace(&fixture.root().display().to_string(), "<root>")
            })
            .collect()
    };
    assert_eq!(
        relative(&predicted_fixture, &predicted),
        relative(&real_fixture, &real)
    );
    assert_eq!(predicted.warnings.len(), real.warnings.len());
    assert_eq!(predicted.linked, real.linked);
    assert_eq!(predicted.unresolved, 1);
}

#[test]
fn test_dry_run_creates_shared_parent_once() {
    let fixture = MirrorFixture::new();
    fixture.add_archive(1, b"one");
    fixture.add_original(2, b"two");

    let report = run(&fixture, true);

    let created: Vec<_> = report
        .actions
        .iter()
        .filter(|a| matches!(a, Action::CreateDir { .. }))
        .collect();
    assert_eq!(
        created,
        vec![&Action::CreateDir {
            path: fixture.dst().join("Invoice/2024-03"),
        }]
    );
}

#[test]
fn test_dry_run_lines_are_predictions() {
    let fixture = MirrorFixture::new();
    let source = fixture.add_archive(1, b"one");

    let report = run(&fixture, true);
    let lines = report.action_lines();

    let dst = fixture.dst().join("Invoice/2024-03/2024-03-02 Acme March.pdf");
    assert!(lines.contains(&format!(
        "Would link {} to {}",
        source.display(),
        dst.display()
    )));
    assert!(lines.iter().all(|line| line.starts_with("Would ")));
}

#[test]
fn test_dry_run_with_missing_destination_root() {
    let fixture = MirrorFixture::new();
    fs::remove_dir(fixture.dst()).unwrap();
    fixture.add_archive(1, b"one");

    let report = run(&fixture, true);

    assert!(!fixture.dst().exists());
    assert_eq!(
        report.actions[0],
        Action::CreateDir {
            path: fixture.dst()
        }
    );
}

#[test]
fn test_dry_run_predicts_cascading_dir_removal() {
    let fixture = MirrorFixture::new();
    fixture.add_dst_file("a/b/old.pdf", b"stale");

    let report = LinkSynchronizer::new(
        SourceLayout::new(fixture.src()),
        fixture.dst(),
        FolderTags::default(),
        SyncOptions { dry_run: true },
    )
    .run(&[])
    .unwrap();

    assert_eq!(report.removed_files(), 1);
    assert_eq!(report.removed_dirs(), 2);
    assert!(fixture.dst().join("a/b/old.pdf").is_file());
}

#[test]
fn test_dry_run_reports_blocked_directory() {
    let predicted_fixture = MirrorFixture::new();
    populate(&predicted_fixture);
    let real_fixture = MirrorFixture::new();
    populate(&real_fixture);
    for fixture in [&predicted_fixture, &real_fixture] {
        fixture.add_dst_file("Tax", b"not a directory");
    }

    let predicted = run(&predicted_fixture, true);
    let real = run(&real_fixture, false);

    let failed = |report: &SyncReport| -> Vec<u64> {
        report
            .warnings
            .iter()
            .filter(|w| matches!(w, doclink_core::Warning::LinkFailed { .. }))
            .map(|w| w.document())
            .collect()
    };
    assert_eq!(failed(&predicted), vec![4]);
    assert_eq!(failed(&real), vec![4]);
    assert_eq!(predicted.linked, real.linked);
}

//! Full pipeline tests: recorded API responses -> fetch -> resolve -> link -> sweep
//!
//! Responses live in `test-fixtures/api/`. Documents are served in two pages
//! so every run exercises `next` following.

use std::fs;
use std::path::PathBuf;

use doclink_api::{Connection, ConnectionConfig, DocumentSelection, PaperlessClient};
use doclink_core::{
    Error, FolderTags, Mirror, MirrorConfig, ReferenceKind, SyncOptions, SyncReport, Warning,
};
use doclink_test_utils::records::{DocumentBuilder, page_json};
use doclink_test_utils::tree::MirrorFixture;
use pretty_assertions::assert_eq;
use serde_json::Value;
use url::Url;
use wiremock::matchers::{method, path, query_param, query_param_is_missing};
use wiremock::{Mock, MockServer, ResponseTemplate};

const ELECTRICITY: &str = "Invoice/2024-03/2024-03-02 Acme Energy Electricity March.pdf";
const PROPERTY_TAX: &str = "Letter/2024-01/2024-01-15 City Council Property tax.pdf";
const LEASE: &str = "Contract/2023-11/2023-11-30 Unknown Lease.pdf";
const REPAIR: &str = "Unknown/2024-02/2024-02-29 Dr. Weber Repair.pdf";

/// Load a recorded response, pointing its page links at `server`.
fn fixture_json(name: &str, server: &MockServer) -> Value {
    let file = PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("../../test-fixtures/api")
        .join(name);
    let raw = fs::read_to_string(&file)
        .unwrap_or_else(|e| panic!("cannot read {}: {e}", file.display()))
        .replace("{server}", &server.uri());
    serde_json::from_str(&raw).unwrap()
}

async fn mount_json(server: &MockServer, api_path: &str, body: Value) {
    Mock::given(method("GET"))
        .and(path(api_path))
        .respond_with(ResponseTemplate::new(200).set_body_json(body))
        .mount(server)
        .await;
}

async fn mount_support(server: &MockServer) {
    for (api_path, name) in [
        ("/api/correspondents/", "correspondents.json"),
        ("/api/document_types/", "document_types.json"),
        ("/api/tags/", "tags.json"),
    ] {
        mount_json(server, api_path, fixture_json(name, server)).await;
    }
}

async fn mount_documents(server: &MockServer) {
    Mock::given(method("GET"))
        .and(path("/api/documents/"))
        .and(query_param_is_missing("page"))
        .and(query_param("truncate_content", "true"))
        .and(query_param("page_size", "2"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(fixture_json("documents_page1.json", server)),
        )
        .mount(server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/documents/"))
        .and(query_param("page", "2"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(fixture_json("documents_page2.json", server)),
        )
        .mount(server)
        .await;
}

async fn recorded_server() -> MockServer {
    let server = MockServer::start().await;
    mount_support(&server).await;
    mount_documents(&server).await;
    server
}

/// Media for documents 1-3; document 4 has no file.
fn fixture_with_media() -> (MirrorFixture, Vec<PathBuf>) {
    let fixture = MirrorFixture::new();
    let sources = vec![
        fixture.add_archive(1, b"%PDF electricity"),
        fixture.add_original(2, b"%PDF property tax"),
        fixture.add_archive(3, b"%PDF lease"),
    ];
    (fixture, sources)
}

fn config(fixture: &MirrorFixture, folder_tags: &str, dry_run: bool) -> MirrorConfig {
    MirrorConfig {
        source_root: fixture.src(),
        destination_root: fixture.dst(),
        selection: DocumentSelection::All,
        folder_tags: folder_tags.parse::<FolderTags>().unwrap(),
        options: SyncOptions { dry_run },
    }
}

/// Run a mirror pass on a blocking thread.
async fn mirror(server: &MockServer, config: MirrorConfig) -> doclink_core::Result<SyncReport> {
    let uri = server.uri();
    tokio::task::spawn_blocking(move || {
        let connection =
            Connection::new(ConnectionConfig::new(Url::parse(&uri).unwrap())).unwrap();
        let client = PaperlessClient::new(connection).with_page_size(2);
        Mirror::new(&client, config).run()
    })
    .await
    .unwrap()
}

#[tokio::test(flavor = "multi_thread")]
async fn test_mirrors_recorded_store() {
    let server = recorded_server().await;
    let (fixture, sources) = fixture_with_media();

    let report = mirror(&server, config(&fixture, "", false)).await.unwrap();

    fixture.assert_linked(ELECTRICITY, &sources[0]);
    fixture.assert_linked(PROPERTY_TAX, &sources[1]);
    fixture.assert_linked(LEASE, &sources[2]);
    fixture.assert_dst_missing(REPAIR);
    assert_eq!(report.documents, 4);
    assert_eq!(report.linked, 3);
    assert_eq!(report.unresolved, 1);
    assert!(matches!(
        report.warnings.as_slice(),
        [Warning::MissingSource { document: 4, .. }]
    ));
}

#[tokio::test(flavor = "multi_thread")]
async fn test_rerun_converges_without_changes() {
    let server = recorded_server().await;
    let (fixture, _) = fixture_with_media();

    mirror(&server, config(&fixture, "", false)).await.unwrap();
    let before = fixture.snapshot_dst();
    let report = mirror(&server, config(&fixture, "", false)).await.unwrap();

    assert!(report.is_noop(), "unexpected actions: {:?}", report.actions);
    assert_eq!(report.unchanged, 3);
    assert_eq!(fixture.snapshot_dst(), before);
}

#[tokio::test(flavor = "multi_thread")]
async fn test_folder_tags_add_a_layer() {
    let server = recorded_server().await;
    let (fixture, sources) = fixture_with_media();

    mirror(&server, config(&fixture, "2,3", false)).await.unwrap();

    fixture.assert_linked(&format!("House-Tax/{ELECTRICITY}"), &sources[0]);
    fixture.assert_linked(&format!("Tax/{PROPERTY_TAX}"), &sources[1]);
    fixture.assert_linked(&format!("House/{LEASE}"), &sources[2]);
    fixture.assert_no_empty_dirs();
}

#[tokio::test(flavor = "multi_thread")]
async fn test_removing_folder_tags_moves_links_and_prunes() {
    let server = recorded_server().await;
    let (fixture, sources) = fixture_with_media();
    mirror(&server, config(&fixture, "2,3", false)).await.unwrap();

    let report = mirror(&server, config(&fixture, "", false)).await.unwrap();

    fixture.assert_linked(ELECTRICITY, &sources[0]);
    fixture.assert_dst_missing("House-Tax");
    fixture.assert_dst_missing("Tax");
    fixture.assert_dst_missing("House");
    fixture.assert_no_empty_dirs();
    assert_eq!(report.removed_files(), 3);
}

#[tokio::test(flavor = "multi_thread")]
async fn test_dry_run_is_pure() {
    let server = recorded_server().await;
    let (fixture, _) = fixture_with_media();
    fixture.add_dst_file("Old/2019-05/2019-05-05 Unknown Gone.pdf", b"stale");
    fixture.add_dst_dir("Empty");
    let before = fixture.snapshot_dst();

    let report = mirror(&server, config(&fixture, "2", true)).await.unwrap();

    assert_eq!(fixture.snapshot_dst(), before);
    assert_eq!(report.linked, 3);
    assert_eq!(report.removed_files(), 1);
    // Old/2019-05, Old, Empty
    assert_eq!(report.removed_dirs(), 3);
}

#[tokio::test(flavor = "multi_thread")]
async fn test_tag_selection_filters_server_side() {
    let server = MockServer::start().await;
    mount_support(&server).await;
    Mock::given(method("GET"))
        .and(path("/api/documents/"))
        .and(query_param("tags__id__all", "4"))
        .respond_with(ResponseTemplate::new(200).set_body_json(page_json(
            None,
            vec![
                DocumentBuilder::new(1, "Tyres")
                    .correspondent(3)
                    .tags(&[4])
                    .to_json(),
            ],
        )))
        .expect(1)
        .mount(&server)
        .await;
    let fixture = MirrorFixture::new();
    let source = fixture.add_archive(1, b"%PDF tyres");

    let mut cfg = config(&fixture, "", false);
    cfg.selection = DocumentSelection::Tag(4);
    mirror(&server, cfg).await.unwrap();

    fixture.assert_linked("Unknown/2024-03/2024-03-02 Dr. Weber Tyres.pdf", &source);
}

#[tokio::test(flavor = "multi_thread")]
async fn test_dangling_reference_aborts_before_mutation() {
    let server = MockServer::start().await;
    mount_support(&server).await;
    mount_json(
        &server,
        "/api/documents/",
        page_json(None, vec![DocumentBuilder::new(1, "Orphan").tags(&[2, 99]).to_json()]),
    )
    .await;
    let (fixture, _) = fixture_with_media();
    fixture.add_dst_file("Old/gone.pdf", b"stale");
    let before = fixture.snapshot_dst();

    let err = mirror(&server, config(&fixture, "", false)).await.unwrap_err();

    assert!(matches!(
        err,
        Error::ReferentialIntegrity {
            document: 1,
            kind: ReferenceKind::Tag,
            id: 99
        }
    ));
    assert_eq!(fixture.snapshot_dst(), before);
}

#[tokio::test(flavor = "multi_thread")]
async fn test_failed_page_aborts_before_mutation() {
    let server = MockServer::start().await;
    mount_support(&server).await;
    Mock::given(method("GET"))
        .and(path("/api/documents/"))
        .and(query_param_is_missing("page"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(fixture_json("documents_page1.json", &server)),
        )
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/documents/"))
        .and(query_param("page", "2"))
        .respond_with(ResponseTemplate::new(500).set_body_string("database is locked"))
        .mount(&server)
        .await;
    let (fixture, _) = fixture_with_media();
    let before = fixture.snapshot_dst();

    let err = mirror(&server, config(&fixture, "", false)).await.unwrap_err();

    match err {
        Error::Api(api) => {
            assert_eq!(api.status(), Some(500));
            assert!(api.to_string().contains("database is locked"));
        }
        other => panic!("expected an API error, got {other:?}"),
    }
    assert_eq!(fixture.snapshot_dst(), before);
}

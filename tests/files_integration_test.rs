use anyhow::Result;
use httpmock::prelude::*;
use kvdrive::{FileSource, FileStore, KvDriveError};
use serde_json::json;
use std::io::Write;
use tempfile::NamedTempFile;

fn probe_mock(server: &MockServer) -> httpmock::Mock<'_> {
    server.mock(|when, then| {
        when.method(GET)
            .path("/v1/test/icons/files")
            .query_param("limit", "1");
        then.status(200)
            .json_body(json!({"paging": {"size": 0}, "names": []}));
    })
}

async fn open_store(server: &MockServer) -> FileStore {
    FileStore::open(Some("test_key123"), Some("icons"), Some(&server.base_url()))
        .await
        .unwrap()
}

#[tokio::test]
async fn test_write_then_read_roundtrips_the_bytes() -> Result<()> {
    let server = MockServer::start();
    probe_mock(&server);
    let store = open_store(&server).await;

    let upload = server.mock(|when, then| {
        when.method(POST)
            .path("/v1/test/icons/files")
            .query_param("name", "f.txt")
            .body("hello");
        then.status(201).json_body(json!({"name": "f.txt"}));
    });
    let download = server.mock(|when, then| {
        when.method(GET)
            .path("/v1/test/icons/files/download")
            .query_param("name", "f.txt");
        then.status(200).body("hello");
    });

    let name = store
        .write("f.txt", FileSource::from(b"hello".to_vec()), Some("text/plain"))
        .await?;
    assert_eq!(name, "f.txt");

    let data = store.read("f.txt").await?.expect("file should exist");
    assert_eq!(&data[..], b"hello");

    upload.assert();
    download.assert();
    Ok(())
}

#[tokio::test]
async fn test_write_from_disk_then_list_shows_the_file() -> Result<()> {
    let server = MockServer::start();
    probe_mock(&server);
    let store = open_store(&server).await;

    let mut file = NamedTempFile::new()?;
    file.write_all(b"icon bytes")?;

    let upload = server.mock(|when, then| {
        when.method(POST)
            .path("/v1/test/icons/files")
            .query_param("name", "logo.png")
            .header("content-type", "image/png")
            .body("icon bytes");
        then.status(201).json_body(json!({"name": "logo.png"}));
    });
    let list = server.mock(|when, then| {
        when.method(GET)
            .path("/v1/test/icons/files")
            .query_param("limit", "1000");
        then.status(200).json_body(json!({
            "paging": {"size": 1},
            "names": ["logo.png"]
        }));
    });

    store
        .write(
            "logo.png",
            FileSource::Path(file.path().to_path_buf()),
            Some("image/png"),
        )
        .await?;

    let listing = store.list(None, None).await?;
    assert_eq!(listing.names, vec!["logo.png"]);
    assert!(listing.last.is_none());

    upload.assert();
    list.assert();
    Ok(())
}

#[tokio::test]
async fn test_delete_then_read_returns_none() -> Result<()> {
    let server = MockServer::start();
    probe_mock(&server);
    let store = open_store(&server).await;

    let delete = server.mock(|when, then| {
        when.method(DELETE)
            .path("/v1/test/icons/files")
            .json_body(json!({"names": ["f.txt"]}));
        then.status(200)
            .json_body(json!({"deleted": ["f.txt"], "failed": {}}));
    });
    let download = server.mock(|when, then| {
        when.method(GET)
            .path("/v1/test/icons/files/download")
            .query_param("name", "f.txt");
        then.status(404).json_body(json!({"errors": ["File not found"]}));
    });

    assert_eq!(store.delete("f.txt").await?, "f.txt");
    assert!(store.read("f.txt").await?.is_none());

    delete.assert();
    download.assert();
    Ok(())
}

#[tokio::test]
async fn test_rejected_credential_is_a_connection_error() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(GET).path("/v1/bad/icons/files");
        then.status(401).json_body(json!({"errors": ["Unauthorized"]}));
    });

    let result = FileStore::open(Some("bad_key"), Some("icons"), Some(&server.base_url())).await;
    assert!(matches!(
        result,
        Err(KvDriveError::ConnectionError { kind: "files store", .. })
    ));
}

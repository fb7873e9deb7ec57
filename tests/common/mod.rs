//! Shared fixtures for the integration tests.

#![allow(dead_code)]

use lum_bootstrap::{Dependency, ProjectLayout};
use std::io::{Cursor, Write};
use std::path::Path;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Build an in-memory zip. Names ending in `/` become directory entries.
pub fn zip_bytes(entries: &[(&str, &[u8])]) -> Vec<u8> {
    let mut zip = zip::ZipWriter::new(Cursor::new(Vec::new()));
    let options = zip::write::SimpleFileOptions::default();
    for (name, content) in entries {
        if name.ends_with('/') {
            zip.add_directory(*name, options).unwrap();
        } else {
            zip.start_file(*name, options).unwrap();
            zip.write_all(content).unwrap();
        }
    }
    zip.finish().unwrap().into_inner()
}

/// Serve `body` at `/<version>/<name>.zip` and return a matching descriptor.
pub async fn serve_archive(
    server: &MockServer,
    version: &str,
    name: &str,
    body: Vec<u8>,
) -> Dependency {
    let route = format!("/{}/{}.zip", version, name);
    Mock::given(method("GET"))
        .and(path(route.as_str()))
        .respond_with(ResponseTemplate::new(200).set_body_bytes(body))
        .mount(server)
        .await;
    Dependency::new(name, &format!("{}{}", server.uri(), route))
}

/// Layout rooted in a temp directory with the default engine dir.
pub fn layout(root: &Path) -> ProjectLayout {
    ProjectLayout::new(root, "LumEngine")
}

use std::io::{Read, Write};
use std::net::TcpListener;
use std::sync::mpsc;

use cardex::adapters::outbound::catalog::memory::MemoryCatalog;
use cardex::domain::set::SetType;
use cardex::ports::outbound::catalog::CatalogStore;
use cardex::scryfall::ScryfallClient;
use cardex::sync::sets::import_set;

/// Serves one canned JSON response on a random local port and hands
/// back the base url plus the raw request that arrived.
fn serve_once(body: &'static str) -> (String, mpsc::Receiver<String>) {
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    let (tx, rx) = mpsc::channel();
    std::thread::spawn(move || {
        let (mut stream, _) = listener.accept().unwrap();
        let mut buf = [0u8; 4096];
        let read = stream.read(&mut buf).unwrap();
        tx.send(String::from_utf8_lossy(&buf[..read]).into_owned())
            .unwrap();
        let response = format!(
            "HTTP/1.1 200 OK\r\ncontent-type: application/json\r\ncontent-length: {}\r\nconnection: close\r\n\r\n{}",
            body.len(),
            body
        );
        stream.write_all(response.as_bytes()).unwrap();
    });
    (format!("http://{addr}"), rx)
}

#[tokio::test]
async fn single_set_import_fetches_by_code_and_upserts() {
    let (base_url, request) = serve_once(
        r#"{
            "id": "b314f553-8f07-4ba9-96c8-16be7784eff3",
            "code": "neo",
            "name": "Kamigawa: Neon Dynasty",
            "set_type": "expansion",
            "released_at": "2022-02-18",
            "card_count": 302,
            "digital": false
        }"#,
    );
    let client = ScryfallClient::with_base_url(base_url);
    let store = MemoryCatalog::new();

    let imported = import_set(&client, &store, "neo").await.unwrap();
    assert_eq!(imported.code, "neo");
    assert_eq!(imported.set_type, SetType::Expansion);

    let stored = store
        .find_set_by_code("neo")
        .await
        .unwrap()
        .expect("set in catalog");
    assert_eq!(stored, imported);

    let raw = request.recv().unwrap();
    assert!(raw.starts_with("GET /sets/neo "));
    let version_header = format!("cardex/{}", env!("CARGO_PKG_VERSION"));
    assert!(raw.to_lowercase().contains(&version_header));
}

use protocol::{BackendClient, DeviceCommand, PidTerm, ProtocolError, DEFAULT_BAUD};
use std::io::{Read, Write};
use std::net::TcpListener;
use std::sync::mpsc::{self, Receiver};
use std::thread;
use std::time::Duration;

/// Serves exactly one HTTP request on a loopback port and hands the raw
/// request text back to the test. Returns the base URL to point the client
/// at.
fn spawn_stub(status: &str, body: &str) -> (String, Receiver<String>) {
    let listener = TcpListener::bind("127.0.0.1:0").expect("bind stub");
    let base_url = format!("http://{}", listener.local_addr().expect("stub addr"));
    let response = format!(
        "HTTP/1.1 {status}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
        body.len()
    );
    let (tx, rx) = mpsc::channel();
    thread::spawn(move || {
        let (mut stream, _) = listener.accept().expect("accept");
        let mut request = Vec::new();
        let mut buf = [0u8; 4096];
        while !request_complete(&request) {
            let read = stream.read(&mut buf).expect("read request");
            if read == 0 {
                break;
            }
            request.extend_from_slice(&buf[..read]);
        }
        stream.write_all(response.as_bytes()).expect("write response");
        let _ = tx.send(String::from_utf8_lossy(&request).into_owned());
    });
    (base_url, rx)
}

fn request_complete(request: &[u8]) -> bool {
    let text = String::from_utf8_lossy(request);
    let Some(head_end) = text.find("\r\n\r\n") else {
        return false;
    };
    let content_length = text[..head_end]
        .lines()
        .find_map(|line| {
            let (name, value) = line.split_once(':')?;
            if name.eq_ignore_ascii_case("content-length") {
                value.trim().parse::<usize>().ok()
            } else {
                None
            }
        })
        .unwrap_or(0);
    request.len() >= head_end + 4 + content_length
}

fn received(rx: &Receiver<String>) -> String {
    rx.recv_timeout(Duration::from_secs(2)).expect("request seen")
}

fn body_of(request: &str) -> serde_json::Value {
    let (_, body) = request.split_once("\r\n\r\n").expect("request body");
    serde_json::from_str(body).expect("json body")
}

#[test]
fn ports_hits_the_ports_route_and_parses_the_list() {
    let (base_url, rx) = spawn_stub("200 OK", r#"{"ports":["COM3","COM4"]}"#);
    let client = BackendClient::new(&base_url);

    let ports = client.ports().expect("port list");
    assert_eq!(ports, vec!["COM3".to_string(), "COM4".to_string()]);
    assert!(received(&rx).starts_with("GET /api/ports HTTP/1.1"));
}

#[test]
fn connect_posts_port_and_default_baud() {
    let (base_url, rx) = spawn_stub("200 OK", "{}");
    let client = BackendClient::new(&base_url);

    client.connect("COM3", DEFAULT_BAUD).expect("connect");
    let request = received(&rx);
    assert!(request.starts_with("POST /api/connect HTTP/1.1"));
    let body = body_of(&request);
    assert_eq!(body["port"], "COM3");
    assert_eq!(body["baud"], 115200);
}

#[test]
fn disconnect_posts_an_empty_object() {
    let (base_url, rx) = spawn_stub("200 OK", "{}");
    let client = BackendClient::new(&base_url);

    client.disconnect().expect("disconnect");
    let request = received(&rx);
    assert!(request.starts_with("POST /api/disconnect HTTP/1.1"));
    assert_eq!(body_of(&request), serde_json::json!({}));
}

#[test]
fn send_posts_the_rendered_command_string() {
    let (base_url, rx) = spawn_stub("200 OK", "{}");
    let client = BackendClient::new(&base_url);

    client
        .send(&DeviceCommand::PidSet {
            term: PidTerm::P,
            value: 1.5,
        })
        .expect("send");
    let request = received(&rx);
    assert!(request.starts_with("POST /api/send HTTP/1.1"));
    assert_eq!(body_of(&request)["cmd"], "pid set p 1.5");
}

#[test]
fn backend_failure_maps_to_a_request_error() {
    let (base_url, _rx) = spawn_stub("500 Internal Server Error", r#"{"error":"port busy"}"#);
    let client = BackendClient::new(&base_url);

    let err = client.connect("COM3", DEFAULT_BAUD).expect_err("status error");
    assert!(matches!(err, ProtocolError::Request(_)));
}

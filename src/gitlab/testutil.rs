//! Canned HTTP fixture for exercising the client against scripted responses.
//!
//! Binds a loopback listener and serves one scripted response per
//! connection (responses carry `Connection: close`, so the client opens a
//! fresh connection per request). The join handle yields the request lines
//! seen, in order, so tests can assert exactly which calls went out and
//! that none followed a failure.

use std::io::{Read, Write};
use std::net::{TcpListener, TcpStream};
use std::thread::JoinHandle;

use crate::config::Settings;
use crate::gitlab::GitLabClient;

/// Serve the scripted `(status, body)` responses, returning a client
/// pointed at the fixture and the handle collecting request lines.
pub(crate) fn serve(
    responses: Vec<(u16, &'static str)>,
) -> (GitLabClient, JoinHandle<Vec<String>>) {
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    let port = listener.local_addr().unwrap().port();

    let handle = std::thread::spawn(move || {
        let mut request_lines = Vec::new();
        for (status, body) in responses {
            let (mut stream, _) = listener.accept().unwrap();
            request_lines.push(read_request(&mut stream));
            let response = format!(
                "HTTP/1.1 {} Status\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
                status,
                body.len(),
                body
            );
            stream.write_all(response.as_bytes()).unwrap();
        }
        request_lines
    });

    let settings = Settings {
        base_url: format!("http://127.0.0.1:{}", port),
        token: "test-token".to_string(),
        public_key: String::new(),
        ssh_host: "gitlab.example.com".to_string(),
        access_level: 30,
    };
    let client = GitLabClient::new(&settings).unwrap();

    (client, handle)
}

/// Consume one full request (headers plus Content-Length body) and return
/// its request line. The body must be drained before responding or the
/// close can reset the connection under the client's feet.
fn read_request(stream: &mut TcpStream) -> String {
    let mut data = Vec::new();
    let mut buf = [0u8; 1024];

    let header_end = loop {
        if let Some(pos) = data.windows(4).position(|w| w == b"\r\n\r\n") {
            break pos + 4;
        }
        let n = stream.read(&mut buf).unwrap();
        if n == 0 {
            break data.len();
        }
        data.extend_from_slice(&buf[..n]);
    };

    let headers = String::from_utf8_lossy(&data[..header_end]).to_string();
    let content_length: usize = headers
        .lines()
        .find_map(|line| {
            let (name, value) = line.split_once(':')?;
            if name.eq_ignore_ascii_case("content-length") {
                value.trim().parse().ok()
            } else {
                None
            }
        })
        .unwrap_or(0);

    let mut body_read = data.len() - header_end;
    while body_read < content_length {
        let n = stream.read(&mut buf).unwrap();
        if n == 0 {
            break;
        }
        body_read += n;
    }

    headers.lines().next().unwrap_or_default().to_string()
}

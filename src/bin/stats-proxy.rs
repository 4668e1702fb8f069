//! Browser-facing pass-through proxy for the Stats API. Speaks just enough
//! HTTP/1.1 to serve `GET /proxy?url=…`, performs the upstream GET
//! server-side and relays the JSON body with permissive CORS headers.

use std::env;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, TcpStream};

const ALLOWED_HOST: &str = "statsapi.mlb.com";

const CORS_HEADERS: &str = "Access-Control-Allow-Origin: *\r\n\
    Access-Control-Allow-Methods: GET, OPTIONS\r\n\
    Access-Control-Allow-Headers: Content-Type\r\n";

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let addr = env::var("KMLB_PROXY_BIND").unwrap_or_else(|_| "0.0.0.0:8788".to_string());
    let listener = TcpListener::bind(&addr).await?;
    let client = reqwest::Client::new();

    eprintln!("stats proxy listening on {addr}");

    loop {
        let (stream, peer) = listener.accept().await?;
        let client = client.clone();
        tokio::spawn(async move {
            if let Err(e) = handle_client(stream, client).await {
                eprintln!("client {peer} dropped: {e}");
            }
        });
    }
}

async fn handle_client(mut stream: TcpStream, client: reqwest::Client) -> anyhow::Result<()> {
    let mut buf = vec![0u8; 8192];
    let n = stream.read(&mut buf).await?;
    let request = String::from_utf8_lossy(&buf[..n]);

    let mut parts = request.split_whitespace();
    let method = parts.next().unwrap_or("");
    let target = parts.next().unwrap_or("");

    // Preflight short-circuits before any routing.
    if method == "OPTIONS" {
        return write_response(&mut stream, 200, "OK", "").await;
    }

    if method != "GET" {
        return write_json(&mut stream, 405, "Method Not Allowed", r#"{"error":"GET only"}"#).await;
    }

    let Some(raw_url) = proxy_target(target) else {
        eprintln!("rejected request for {target}");
        return write_json(
            &mut stream,
            400,
            "Bad Request",
            r#"{"error":"missing url parameter"}"#,
        )
        .await;
    };

    let upstream_url = percent_decode(&raw_url);
    if !host_allowed(&upstream_url) {
        eprintln!("rejected upstream host in {upstream_url}");
        return write_json(&mut stream, 400, "Bad Request", r#"{"error":"host not allowed"}"#).await;
    }

    match client.get(&upstream_url).send().await {
        Ok(resp) if resp.status().is_success() => {
            let body = resp.text().await.unwrap_or_default();
            write_json(&mut stream, 200, "OK", &body).await
        }
        Ok(resp) => {
            eprintln!("upstream {upstream_url} answered {}", resp.status());
            write_json(
                &mut stream,
                502,
                "Bad Gateway",
                &format!(r#"{{"error":"upstream status {}"}}"#, resp.status().as_u16()),
            )
            .await
        }
        Err(e) => {
            eprintln!("upstream {upstream_url} unreachable: {e}");
            write_json(&mut stream, 500, "Internal Server Error", r#"{"error":"upstream fetch failed"}"#)
                .await
        }
    }
}

/// Extract the raw (still percent-encoded) `url` query value from a
/// `/proxy?url=…` request target.
fn proxy_target(target: &str) -> Option<String> {
    let (path, query) = target.split_once('?')?;
    if path != "/proxy" {
        return None;
    }
    query
        .split('&')
        .find_map(|pair| pair.strip_prefix("url="))
        .filter(|v| !v.is_empty())
        .map(str::to_owned)
}

fn host_allowed(url: &str) -> bool {
    let rest = url
        .strip_prefix("https://")
        .or_else(|| url.strip_prefix("http://"))
        .unwrap_or("");
    let host = rest.split(['/', ':', '?']).next().unwrap_or("");
    host == ALLOWED_HOST
}

/// Minimal percent-decoding; invalid escapes pass through literally.
fn percent_decode(input: &str) -> String {
    let bytes = input.as_bytes();
    let mut out = Vec::with_capacity(bytes.len());
    let mut i = 0;
    while i < bytes.len() {
        match bytes[i] {
            b'%' if i + 2 < bytes.len()
                && bytes[i + 1].is_ascii_hexdigit()
                && bytes[i + 2].is_ascii_hexdigit() =>
            {
                let hex = &input[i + 1..i + 3];
                // Both bytes are ASCII hex, so the slice and parse cannot fail.
                out.push(u8::from_str_radix(hex, 16).unwrap_or(b'%'));
                i += 3;
            }
            b'+' => {
                out.push(b' ');
                i += 1;
            }
            b => {
                out.push(b);
                i += 1;
            }
        }
    }
    String::from_utf8_lossy(&out).into_owned()
}

async fn write_json(stream: &mut TcpStream, code: u16, reason: &str, body: &str) -> anyhow::Result<()> {
    let response = format!(
        "HTTP/1.1 {code} {reason}\r\n{CORS_HEADERS}Content-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
        body.len(),
    );
    stream.write_all(response.as_bytes()).await?;
    Ok(())
}

async fn write_response(stream: &mut TcpStream, code: u16, reason: &str, body: &str) -> anyhow::Result<()> {
    let response = format!(
        "HTTP/1.1 {code} {reason}\r\n{CORS_HEADERS}Content-Length: {}\r\nConnection: close\r\n\r\n{body}",
        body.len(),
    );
    stream.write_all(response.as_bytes()).await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn proxy_target_requires_the_proxy_path_and_url_param() {
        assert_eq!(
            proxy_target("/proxy?url=https%3A%2F%2Fstatsapi.mlb.com%2Fapi"),
            Some("https%3A%2F%2Fstatsapi.mlb.com%2Fapi".to_string())
        );
        assert_eq!(proxy_target("/proxy?other=1"), None);
        assert_eq!(proxy_target("/proxy"), None);
        assert_eq!(proxy_target("/elsewhere?url=x"), None);
        assert_eq!(proxy_target("/proxy?url="), None);
    }

    #[test]
    fn percent_decode_unescapes_reserved_characters() {
        assert_eq!(
            percent_decode("https%3A%2F%2Fstatsapi.mlb.com%2Fapi%2Fv1%2Fpeople%2F673490"),
            "https://statsapi.mlb.com/api/v1/people/673490"
        );
        assert_eq!(percent_decode("a+b"), "a b");
        assert_eq!(percent_decode("100%"), "100%");
        assert_eq!(percent_decode("%zz"), "%zz");
    }

    #[test]
    fn host_allow_list_only_passes_the_stats_api() {
        assert!(host_allowed("https://statsapi.mlb.com/api/v1/schedule"));
        assert!(host_allowed("http://statsapi.mlb.com/api/v1.1/game/1/feed/live"));
        assert!(!host_allowed("https://statsapi.mlb.com.evil.example/api"));
        assert!(!host_allowed("https://example.com/?u=statsapi.mlb.com"));
        assert!(!host_allowed("ftp://statsapi.mlb.com/x"));
    }
}

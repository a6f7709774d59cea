use anyhow::{Context, Result};
use std::fs;
use std::net::SocketAddr;
use tempfile::TempDir;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpStream;

pub const ROOM_PAGE: &str = "<html><body>tandem room</body></html>";
pub const CLIENT_SCRIPT: &str = "console.log('tandem');";

/// Status line, `Location` header and body of a plain HTTP/1.1 response.
pub struct HttpReply {
    pub status: u16,
    pub location: Option<String>,
    pub body: String,
}

pub async fn http_get(addr: SocketAddr, path: &str) -> Result<HttpReply> {
    let mut stream = TcpStream::connect(addr).await?;
    let request = format!("GET {path} HTTP/1.1\r\nHost: localhost\r\nConnection: close\r\n\r\n");
    stream.write_all(request.as_bytes()).await?;

    let mut raw = String::new();
    stream.read_to_string(&mut raw).await?;

    let (head, body) = raw.split_once("\r\n\r\n").unwrap_or((raw.as_str(), ""));
    let status = head
        .split_whitespace()
        .nth(1)
        .context("No status line")?
        .parse()?;
    let location = head.lines().find_map(|line| {
        let (name, value) = line.split_once(':')?;
        name.eq_ignore_ascii_case("location")
            .then(|| value.trim().to_string())
    });

    Ok(HttpReply {
        status,
        location,
        body: body.to_string(),
    })
}

/// A web root with a room page and one static asset.
pub fn create_web_root() -> Result<TempDir> {
    let dir = tempfile::tempdir()?;
    fs::write(dir.path().join("index.html"), ROOM_PAGE)?;
    fs::create_dir(dir.path().join("static"))?;
    fs::write(dir.path().join("static").join("app.js"), CLIENT_SCRIPT)?;
    Ok(dir)
}

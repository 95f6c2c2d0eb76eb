use anyhow::{Context, Result, anyhow};
use std::collections::HashMap;
use tokio::io::{AsyncRead, AsyncReadExt};

const MAX_REQUEST: usize = 1024;

#[derive(Debug, PartialEq)]
pub enum Method {
    GET,
}

impl TryFrom<&str> for Method {
    type Error = anyhow::Error;

    fn try_from(value: &str) -> Result<Self> {
        match value {
            "GET" => Ok(Method::GET),
            other => Err(anyhow!("Method {} not supported", other)),
        }
    }
}

/// The parts of a GET request routing looks at. Headers and body are ignored.
#[derive(Debug)]
pub struct Request {
    pub method: Method,
    pub path: String,
    pub params: HashMap<String, String>,
}

impl Request {
    pub async fn read<Reader: AsyncRead + Unpin>(mut reader: Reader) -> Result<Self> {
        let mut buffer = [0; MAX_REQUEST];
        let size = reader
            .read(&mut buffer)
            .await
            .context("Failed to read stream")?;
        if size >= MAX_REQUEST {
            return Err(anyhow!("Request too large"));
        }
        Self::parse(&String::from_utf8_lossy(&buffer[..size]))
    }

    /// Parses the request line, e.g. `GET /products?start=1&end=4 HTTP/1.1`.
    pub fn parse(raw: &str) -> Result<Self> {
        let line = raw.lines().next().context("Empty Request")?;
        let mut parts = line.split_whitespace();
        let method = parts
            .next()
            .context("Missing Method")
            .and_then(Method::try_from)?;
        let target = parts.next().context("No Path")?;

        let (path, query) = target.split_once('?').unwrap_or((target, ""));
        let params = query
            .split('&')
            .filter_map(|pair| pair.split_once('='))
            .map(|(k, v)| (decode_component(k), decode_component(v)))
            .collect();

        Ok(Request {
            method,
            path: path.to_string(),
            params,
        })
    }

    pub fn param(&self, key: &str) -> Option<&str> {
        self.params.get(key).map(String::as_str)
    }
}

// `+` is a space in form-encoded query strings; invalid escapes are kept as-is
fn decode_component(raw: &str) -> String {
    let spaced = raw.replace('+', " ");
    match urlencoding::decode(&spaced) {
        Ok(decoded) => decoded.into_owned(),
        Err(_) => spaced,
    }
}

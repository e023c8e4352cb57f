// requests/multipart.rs
use crate::errors::ServerError;

/// One part of a `multipart/form-data` body.
#[derive(Debug, Clone)]
pub struct Part {
    pub name: String,
    pub filename: Option<String>,
    pub content_type: Option<String>,
    pub data: Vec<u8>,
}

/// Extracts the boundary from a `Content-Type` header value.
pub fn boundary(content_type: &str) -> Option<String> {
    let mime: mime::Mime = content_type.parse().ok()?;
    if mime.type_() != mime::MULTIPART || mime.subtype() != mime::FORM_DATA {
        return None;
    }
    mime.get_param(mime::BOUNDARY)
        .map(|b| b.as_str().to_string())
        .filter(|b| !b.is_empty())
}

/// Splits a buffered multipart body into its parts.
pub fn parse(body: &[u8], boundary: &str) -> Result<Vec<Part>, ServerError> {
    let delimiter = format!("--{boundary}");
    let delimiter = delimiter.as_bytes();

    let mut parts = Vec::new();
    let mut rest = match find(body, delimiter) {
        Some(i) => &body[i + delimiter.len()..],
        None => return Err(ServerError::BadRequest("multipart boundary not found".into())),
    };

    loop {
        if rest.starts_with(b"--") {
            break;
        }
        rest = rest
            .strip_prefix(b"\r\n")
            .ok_or_else(|| ServerError::BadRequest("malformed multipart body".into()))?;

        let end = find(rest, delimiter)
            .ok_or_else(|| ServerError::BadRequest("unterminated multipart part".into()))?;
        // Each part ends with CRLF before the next delimiter.
        let chunk = rest[..end].strip_suffix(b"\r\n").unwrap_or(&rest[..end]);
        parts.push(parse_part(chunk)?);

        rest = &rest[end + delimiter.len()..];
    }

    Ok(parts)
}

fn parse_part(chunk: &[u8]) -> Result<Part, ServerError> {
    let header_end = find(chunk, b"\r\n\r\n")
        .ok_or_else(|| ServerError::BadRequest("multipart part without headers".into()))?;
    let headers = std::str::from_utf8(&chunk[..header_end])
        .map_err(|_| ServerError::BadRequest("multipart headers are not UTF-8".into()))?;
    let data = chunk[header_end + 4..].to_vec();

    let mut name = None;
    let mut filename = None;
    let mut content_type = None;

    for line in headers.split("\r\n") {
        let Some((key, value)) = line.split_once(':') else {
            continue;
        };
        match key.trim().to_ascii_lowercase().as_str() {
            "content-disposition" => {
                for param in value.split(';').skip(1) {
                    if let Some((k, v)) = param.trim().split_once('=') {
                        let v = v.trim().trim_matches('"').to_string();
                        match k.trim() {
                            "name" => name = Some(v),
                            "filename" => filename = Some(v),
                            _ => {}
                        }
                    }
                }
            }
            "content-type" => content_type = Some(value.trim().to_string()),
            _ => {}
        }
    }

    Ok(Part {
        name: name.ok_or_else(|| ServerError::BadRequest("multipart part without name".into()))?,
        filename,
        content_type,
        data,
    })
}

fn find(haystack: &[u8], needle: &[u8]) -> Option<usize> {
    haystack
        .windows(needle.len())
        .position(|window| window == needle)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_body() -> Vec<u8> {
        let mut body = Vec::new();
        body.extend_from_slice(b"--XyZ\r\n");
        body.extend_from_slice(b"Content-Disposition: form-data; name=\"caption\"\r\n\r\n");
        body.extend_from_slice(b"Fachada\r\n");
        body.extend_from_slice(b"--XyZ\r\n");
        body.extend_from_slice(
            b"Content-Disposition: form-data; name=\"photo\"; filename=\"casa.jpg\"\r\n",
        );
        body.extend_from_slice(b"Content-Type: image/jpeg\r\n\r\n");
        body.extend_from_slice(&[0xFF, 0xD8, 0x0D, 0x0A, 0xFF, 0xD9]);
        body.extend_from_slice(b"\r\n--XyZ--\r\n");
        body
    }

    #[test]
    fn extracts_boundary_from_header() {
        assert_eq!(
            boundary("multipart/form-data; boundary=XyZ"),
            Some("XyZ".to_string())
        );
        assert_eq!(boundary("application/x-www-form-urlencoded"), None);
    }

    #[test]
    fn parses_text_and_file_parts() {
        let parts = parse(&sample_body(), "XyZ").unwrap();
        assert_eq!(parts.len(), 2);

        assert_eq!(parts[0].name, "caption");
        assert_eq!(parts[0].data, b"Fachada");
        assert!(parts[0].filename.is_none());

        assert_eq!(parts[1].name, "photo");
        assert_eq!(parts[1].filename.as_deref(), Some("casa.jpg"));
        assert_eq!(parts[1].content_type.as_deref(), Some("image/jpeg"));
        // Binary payload containing CRLF is preserved.
        assert_eq!(parts[1].data, vec![0xFF, 0xD8, 0x0D, 0x0A, 0xFF, 0xD9]);
    }

    #[test]
    fn rejects_body_without_boundary() {
        assert!(parse(b"garbage", "XyZ").is_err());
    }
}

use std::time::Duration;

use log::debug;
use mars_photos_application::{ApplicationError, FetchError, PhotoSource};
use mars_photos_domain::{FetchRequest, PhotoRecord};
use reqwest::blocking::Client;
use serde::Deserialize;

pub const DEFAULT_ENDPOINT: &str =
    "https://api.nasa.gov/mars-photos/api/v1/rovers/curiosity/photos";

#[derive(Debug, Deserialize)]
struct PhotoListing {
    #[serde(default)]
    photos: Option<Vec<ListedPhoto>>,
}

#[derive(Debug, Deserialize)]
struct ListedPhoto {
    img_src: String,
    rover: ListedRover,
}

#[derive(Debug, Deserialize)]
struct ListedRover {
    name: String,
}

impl From<ListedPhoto> for PhotoRecord {
    fn from(photo: ListedPhoto) -> Self {
        Self {
            image_url: photo.img_src,
            rover_name: photo.rover.name,
        }
    }
}

/// Keeps only `img_src` and `rover.name` of each listed photo.
pub fn parse_photo_listing(body: &str) -> Result<Vec<PhotoRecord>, FetchError> {
    let listing: PhotoListing = serde_json::from_str(body)
        .map_err(|error| FetchError::UnexpectedBody(error.to_string()))?;
    Ok(listing
        .photos
        .unwrap_or_default()
        .into_iter()
        .map(PhotoRecord::from)
        .collect())
}

#[derive(Debug, Clone)]
pub struct NasaPhotoSource {
    client: Client,
    endpoint: String,
}

impl NasaPhotoSource {
    pub fn new(endpoint: impl Into<String>, timeout: Duration) -> Result<Self, ApplicationError> {
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(concat!("mars-photos/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|error| ApplicationError::InvalidInput(error.to_string()))?;
        Ok(Self {
            client,
            endpoint: endpoint.into(),
        })
    }
}

impl PhotoSource for NasaPhotoSource {
    fn list_photos(&self, request: &FetchRequest) -> Result<Vec<PhotoRecord>, FetchError> {
        let earth_date = request.earth_date.to_string();
        debug!(
            "querying {} for {} / {}",
            self.endpoint, earth_date, request.camera
        );
        let response = self
            .client
            .get(&self.endpoint)
            .query(&[
                ("earth_date", earth_date.as_str()),
                ("camera", request.camera.as_str()),
                ("api_key", request.api_key.as_str()),
            ])
            .send()
            // the url carries the api key
            .map_err(|error| FetchError::Transport(error.without_url().to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::RequestFailed {
                status: status.as_u16(),
                reason: status.canonical_reason().unwrap_or("Unknown").to_string(),
            });
        }

        let body = response
            .text()
            .map_err(|error| FetchError::UnexpectedBody(error.without_url().to_string()))?;
        parse_photo_listing(&body)
    }

    fn download_image(&self, url: &str) -> Result<Vec<u8>, FetchError> {
        let failed = |cause: String| FetchError::ImageDownloadFailed {
            url: url.to_string(),
            cause,
        };

        let response = self
            .client
            .get(url)
            .send()
            .map_err(|error| failed(error.to_string()))?;
        let status = response.status();
        if !status.is_success() {
            return Err(failed(format!("status {status}")));
        }

        response
            .bytes()
            .map(|bytes| bytes.to_vec())
            .map_err(|error| failed(error.to_string()))
    }
}

#[cfg(test)]
pub(crate) mod test_server {
    use std::io::{Read, Write};
    use std::net::{SocketAddr, TcpListener};
    use std::thread::{self, JoinHandle};

    pub fn bind() -> (TcpListener, SocketAddr) {
        let listener = TcpListener::bind("127.0.0.1:0").expect("bind");
        let addr = listener.local_addr().expect("addr");
        (listener, addr)
    }

    pub fn response(status_line: &str, content_type: &str, body: &[u8]) -> Vec<u8> {
        let mut out = format!(
            "HTTP/1.1 {status_line}\r\nContent-Type: {content_type}\r\nContent-Length: {}\r\nConnection: close\r\n\r\n",
            body.len()
        )
        .into_bytes();
        out.extend_from_slice(body);
        out
    }

    /// Answers one connection per entry, in order, and returns the request lines it saw.
    pub fn serve(listener: TcpListener, responses: Vec<Vec<u8>>) -> JoinHandle<Vec<String>> {
        thread::spawn(move || {
            let mut request_lines = Vec::new();
            for reply in responses {
                let Ok((mut stream, _)) = listener.accept() else {
                    break;
                };
                let mut seen = Vec::new();
                let mut buf = [0_u8; 1024];
                while !seen.windows(4).any(|window| window == b"\r\n\r\n") {
                    match stream.read(&mut buf) {
                        Ok(0) | Err(_) => break,
                        Ok(read) => seen.extend_from_slice(&buf[..read]),
                    }
                }
                let text = String::from_utf8_lossy(&seen);
                request_lines.push(text.lines().next().unwrap_or_default().to_string());
                let _ = stream.write_all(&reply);
                let _ = stream.flush();
            }
            request_lines
        })
    }
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;
    use mars_photos_domain::{CalendarDate, CameraId};

    use super::test_server::{bind, response, serve};
    use super::*;

    fn request() -> FetchRequest {
        let today = NaiveDate::from_ymd_opt(2024, 1, 1).expect("date");
        FetchRequest {
            earth_date: CalendarDate::validate("2015-06-03", today).expect("date"),
            camera: CameraId::Fhaz,
            api_key: "DEMO_KEY".to_string(),
        }
    }

    fn source(endpoint: String) -> NasaPhotoSource {
        NasaPhotoSource::new(endpoint, Duration::from_secs(5)).expect("client")
    }

    #[test]
    fn listing_projects_url_and_rover_name() {
        let body = r#"{"photos":[{"id":102693,"sol":1000,"img_src":"http://mars.example/fcam/img001.jpg","earth_date":"2015-05-30","rover":{"id":5,"name":"Curiosity","status":"active"},"camera":{"name":"FHAZ"}}]}"#;
        let records = parse_photo_listing(body).expect("parse");
        assert_eq!(
            records,
            vec![PhotoRecord {
                image_url: "http://mars.example/fcam/img001.jpg".to_string(),
                rover_name: "Curiosity".to_string(),
            }]
        );
    }

    #[test]
    fn missing_or_empty_photo_list_is_empty() {
        assert!(parse_photo_listing(r#"{"photos":[]}"#).expect("empty").is_empty());
        assert!(parse_photo_listing("{}").expect("absent").is_empty());
        assert!(parse_photo_listing(r#"{"photos":null}"#).expect("null").is_empty());
    }

    #[test]
    fn malformed_listing_is_unexpected_body() {
        assert!(matches!(
            parse_photo_listing("<html>rate limited</html>"),
            Err(FetchError::UnexpectedBody(_))
        ));
        assert!(matches!(
            parse_photo_listing(r#"{"photos":[{"img_src":"x"}]}"#),
            Err(FetchError::UnexpectedBody(_))
        ));
    }

    #[test]
    fn list_photos_sends_query_parameters() {
        let (listener, addr) = bind();
        let server = serve(
            listener,
            vec![response(
                "200 OK",
                "application/json",
                br#"{"photos":[{"img_src":"http://mars.example/a.jpg","rover":{"name":"Curiosity"}}]}"#,
            )],
        );

        let records = source(format!("http://{addr}/photos"))
            .list_photos(&request())
            .expect("listing");
        assert_eq!(records.len(), 1);

        let lines = server.join().expect("server thread");
        assert_eq!(
            lines[0],
            "GET /photos?earth_date=2015-06-03&camera=FHAZ&api_key=DEMO_KEY HTTP/1.1"
        );
    }

    #[test]
    fn non_success_status_is_request_failed() {
        let (listener, addr) = bind();
        let server = serve(
            listener,
            vec![response("400 Bad Request", "application/json", b"{}")],
        );

        let result = source(format!("http://{addr}/photos")).list_photos(&request());
        assert_eq!(
            result,
            Err(FetchError::RequestFailed {
                status: 400,
                reason: "Bad Request".to_string(),
            })
        );
        server.join().expect("server thread");
    }

    #[test]
    fn download_image_returns_raw_bytes() {
        let (listener, addr) = bind();
        let server = serve(
            listener,
            vec![response("200 OK", "image/jpeg", &[0xFF, 0xD8, 0xFF, 0x00, 0x01])],
        );

        let bytes = source(DEFAULT_ENDPOINT.to_string())
            .download_image(&format!("http://{addr}/img001.jpg"))
            .expect("bytes");
        assert_eq!(bytes, vec![0xFF, 0xD8, 0xFF, 0x00, 0x01]);
        server.join().expect("server thread");
    }

    /// An address that refuses connections: bound once, then released.
    fn closed_port_addr() -> std::net::SocketAddr {
        let (listener, addr) = bind();
        drop(listener);
        addr
    }

    #[test]
    fn unreachable_image_host_is_download_failure() {
        let url = format!("http://{}/img001.jpg", closed_port_addr());
        let result = source(DEFAULT_ENDPOINT.to_string()).download_image(&url);
        assert!(matches!(
            result,
            Err(FetchError::ImageDownloadFailed { url: failed, .. }) if failed == url
        ));
    }

    #[test]
    fn unreachable_api_is_transport_error_without_key() {
        let endpoint = format!("http://{}/photos", closed_port_addr());
        let mut keyed = request();
        keyed.api_key = "secret-key-123".to_string();

        match source(endpoint).list_photos(&keyed) {
            Err(FetchError::Transport(message)) => {
                assert!(!message.contains("api_key"), "{message}");
                assert!(!message.contains("secret-key-123"), "{message}");
            }
            other => panic!("expected a transport error, got {other:?}"),
        }
    }

    #[test]
    fn missing_image_is_download_failure() {
        let (listener, addr) = bind();
        let server = serve(listener, vec![response("404 Not Found", "text/plain", b"")]);

        let url = format!("http://{addr}/gone.jpg");
        let result = source(DEFAULT_ENDPOINT.to_string()).download_image(&url);
        assert!(matches!(
            result,
            Err(FetchError::ImageDownloadFailed { url: failed, .. }) if failed == url
        ));
        server.join().expect("server thread");
    }
}

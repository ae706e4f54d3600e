use bytes::Bytes;
use request_as_curl::{CommandBuilder, CommandRecord, Platform, RawRequest};

/// ## curl command
/// ```bash
/// #
/// curl 'http://192.168.83.196:8081/test1' -H 'x: GET http://192.168.83.1:8080/admin.jsp HTTP/1.0' \
///  --data-binary $'\x7fELF\x01\x00\x02\x03' --compressed
/// #
/// ```
const RAW: &str = "POST /test1 HTTP/1.1
Host: 192.168.83.196:8081
Content-Length: 8
X: GET http://192.168.83.1:8080/admin.jsp HTTP/1.0

";

fn main() -> request_as_curl::Result<()> {
  let req = http::Request::builder()
    .uri("https://httpbin.org/post")
    .method("POST")
    .header("X", "X")
    .body(Bytes::from(b"\x7f\x45\x4c\x46\x01\x00\x02\x03".to_vec()))
    .map_err(|e| request_as_curl::Error::Other(e.to_string()))?;
  println!("{}", CommandBuilder::new().build_http(&req));
  // for cmd.exe
  println!(
    "{}",
    CommandBuilder::new()
      .platform(Platform::Windows)
      .build_http(&req)
  );
  let raw = [RAW.as_bytes(), b"\x7f\x45\x4c\x46\x01\x00\x02\x03"].concat();
  let (raw_req, body) = RawRequest::parse_http(raw)?;
  println!("{}", request_as_curl::serialize(&raw_req, body));
  // or from a canonical request
  let canonical = request_as_curl::normalize(&raw_req, None);
  println!("{}", CommandRecord::from(&canonical));
  Ok(())
}

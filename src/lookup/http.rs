use crate::core::suggestion::SuggestionSet;
use crate::error::LookupError;
use crate::lookup::{CancelToken, LookupRequest, LookupTransport};
use tracing::debug;

const QUERY_PARAM: &str = "q";

/// `GET <endpoint>?q=<query>` returning the JSON suggestion body.
///
/// A blocking request cannot be interrupted mid-flight; cancellation is
/// checked before sending and again before decoding.
pub struct HttpTransport {
    agent: ureq::Agent,
}

impl HttpTransport {
    pub fn new() -> Self {
        Self::with_agent(
            ureq::AgentBuilder::new()
                .user_agent(concat!("suggestions-search/", env!("CARGO_PKG_VERSION")))
                .build(),
        )
    }

    pub fn with_agent(agent: ureq::Agent) -> Self {
        Self { agent }
    }
}

impl Default for HttpTransport {
    fn default() -> Self {
        Self::new()
    }
}

impl LookupTransport for HttpTransport {
    fn lookup(
        &self,
        request: &LookupRequest,
        cancel: &CancelToken,
    ) -> Result<SuggestionSet, LookupError> {
        let endpoint = request
            .endpoint
            .as_deref()
            .filter(|endpoint| !endpoint.trim().is_empty())
            .ok_or(LookupError::MissingEndpoint)?;
        cancel.check()?;

        debug!(endpoint, query = %request.query, "sending suggestion request");
        let response = self
            .agent
            .get(endpoint)
            .query(QUERY_PARAM, request.query.as_str())
            .call()
            .map_err(|err| match err {
                ureq::Error::Status(code, response) => LookupError::Status {
                    code,
                    url: response.get_url().to_string(),
                },
                ureq::Error::Transport(transport) => LookupError::Transport(transport.to_string()),
            })?;

        cancel.check()?;
        SuggestionSet::from_reader(response.into_reader())
    }
}

#[cfg(test)]
mod tests {
    use super::HttpTransport;
    use crate::error::LookupError;
    use crate::lookup::{CancelToken, LookupRequest, LookupTransport};
    use std::io::{BufRead, BufReader, Write};
    use std::net::TcpListener;
    use std::thread::{self, JoinHandle};

    /// Answers exactly one request with `status` and `body`, returning the
    /// request line it saw.
    fn serve_once(status: &'static str, body: &'static str) -> (String, JoinHandle<String>) {
        let listener = TcpListener::bind("127.0.0.1:0").expect("bind");
        let url = format!("http://{}/suggest", listener.local_addr().expect("addr"));
        let handle = thread::spawn(move || {
            let (stream, _) = listener.accept().expect("accept");
            let mut reader = BufReader::new(stream.try_clone().expect("clone stream"));
            let mut request_line = String::new();
            reader.read_line(&mut request_line).expect("request line");
            let mut header = String::new();
            while reader.read_line(&mut header).expect("header") > 2 {
                header.clear();
            }
            let mut stream = stream;
            write!(
                stream,
                "HTTP/1.1 {status}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
                body.len()
            )
            .expect("write response");
            request_line
        });
        (url, handle)
    }

    #[test]
    fn fetches_and_decodes_suggestions() {
        let (url, server) = serve_once(
            "200 OK",
            r#"{"suggestions":[{"raw":"rust","formatted":"Rust"}]}"#,
        );
        let set = HttpTransport::new()
            .lookup(&LookupRequest::new(Some(url), "rus"), &CancelToken::new())
            .expect("lookup");

        assert_eq!(set.len(), 1);
        assert_eq!(set.get(0).map(|s| s.display_value.as_str()), Some("Rust"));
        let request_line = server.join().expect("server thread");
        assert!(request_line.starts_with("GET /suggest?q=rus "));
    }

    #[test]
    fn non_success_status_is_an_error() {
        let (url, server) = serve_once("503 Service Unavailable", "{}");
        let err = HttpTransport::new()
            .lookup(&LookupRequest::new(Some(url), "rus"), &CancelToken::new())
            .expect_err("status error");
        assert!(matches!(err, LookupError::Status { code: 503, .. }));
        server.join().expect("server thread");
    }

    #[test]
    fn missing_endpoint_fails_before_sending() {
        let err = HttpTransport::new()
            .lookup(&LookupRequest::new(None, "rus"), &CancelToken::new())
            .expect_err("no endpoint");
        assert!(matches!(err, LookupError::MissingEndpoint));

        let err = HttpTransport::new()
            .lookup(&LookupRequest::new(Some("  ".into()), "rus"), &CancelToken::new())
            .expect_err("blank endpoint");
        assert!(matches!(err, LookupError::MissingEndpoint));
    }

    #[test]
    fn cancelled_before_sending() {
        let token = CancelToken::new();
        token.cancel();
        let err = HttpTransport::new()
            .lookup(
                &LookupRequest::new(Some("http://127.0.0.1:9/never".into()), "rus"),
                &token,
            )
            .expect_err("cancelled");
        assert!(err.is_cancelled());
    }
}

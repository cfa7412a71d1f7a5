//! Status-code checks shared by every request.

use crate::error::ClientError;

/// Seconds to wait when a 429 carries no usable `Retry-After`.
const DEFAULT_RETRY_AFTER_SECS: u64 = 60;

/// Pass successful responses through; map 429 to
/// [`ClientError::RateLimited`] and any other failure status to
/// [`ClientError::Api`] carrying the response body.
pub async fn check_response(resp: reqwest::Response) -> Result<reqwest::Response, ClientError> {
    if resp.status() == reqwest::StatusCode::TOO_MANY_REQUESTS {
        return Err(ClientError::RateLimited {
            retry_after_secs: parse_retry_after(&resp),
        });
    }
    if !resp.status().is_success() {
        return Err(ClientError::Api {
            status: resp.status().as_u16(),
            message: resp.text().await.unwrap_or_default(),
        });
    }
    Ok(resp)
}

fn parse_retry_after(resp: &reqwest::Response) -> u64 {
    resp.headers()
        .get(reqwest::header::RETRY_AFTER)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.trim().parse::<u64>().ok())
        .unwrap_or(DEFAULT_RETRY_AFTER_SECS)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn response(status: u16, retry_after: Option<&str>, body: &'static str) -> reqwest::Response {
        let mut builder = ::http::Response::builder().status(status);
        if let Some(value) = retry_after {
            builder = builder.header("Retry-After", value);
        }
        reqwest::Response::from(builder.body(body).unwrap())
    }

    #[test]
    fn retry_after_is_parsed_or_defaulted() {
        assert_eq!(parse_retry_after(&response(429, Some("120"), "")), 120);
        assert_eq!(parse_retry_after(&response(429, None, "")), 60);
        assert_eq!(parse_retry_after(&response(429, Some("Wed, 21 Oct 2026 07:28:00 GMT"), "")), 60);
    }

    #[tokio::test]
    async fn too_many_requests_is_rate_limited() {
        let err = check_response(response(429, Some("30"), "")).await.unwrap_err();
        assert!(matches!(err, ClientError::RateLimited { retry_after_secs: 30 }));
    }

    #[tokio::test]
    async fn failure_status_keeps_the_body() {
        let err = check_response(response(503, None, "maintenance")).await.unwrap_err();
        match err {
            ClientError::Api { status, message } => {
                assert_eq!(status, 503);
                assert_eq!(message, "maintenance");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[tokio::test]
    async fn success_passes_through() {
        assert!(check_response(response(204, None, "")).await.is_ok());
    }
}

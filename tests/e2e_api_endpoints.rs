// End-to-end tests for the /totp endpoint


#[cfg(test)]
mod tests {
    use crate::test_utils::*;
    use axum::http::StatusCode;
    use serde_json::json;

    #[tokio::test]
    async fn test_get_generates_code() {
        let resp = get(test_app(59), &format!("/totp?base32={RFC_SECRET}&digits=8")).await;
        assert_eq!(resp.status, StatusCode::OK);

        let body = resp.json();
        assert_eq!(body["success"], true);
        assert_eq!(body["code"], "94287082");
        assert_eq!(body["remaining"], 1);
        assert_eq!(body["algorithm"], "SHA1");
        assert_eq!(body["period"], 30);
        assert_eq!(body["digits"], 8);
        assert_eq!(body["secret"], RFC_SECRET);
        assert_eq!(body["timestamp"], 59);
    }

    #[tokio::test]
    async fn test_get_defaults() {
        let resp = get(test_app(1234567890), "/totp?base32=GEZDGNBVGY3TQOJQ").await;
        assert_eq!(resp.status, StatusCode::OK);

        let body = resp.json();
        assert_eq!(body["code"], "919219");
        assert_eq!(body["period"], 30);
        assert_eq!(body["digits"], 6);
        assert_eq!(body["algorithm"], "SHA1");
        assert_eq!(body["remaining"], 30 - (1234567890 % 30));
    }

    #[tokio::test]
    async fn test_get_strips_whitespace_and_keeps_case() {
        let uri = "/totp?base32=H7TC%20EYBI%20A4I4%20SXHU%20Ziyo%20P22U%20KXXY%207QVB&period=30&digits=6&algorithm=SHA1";
        let resp = get(test_app(1_700_000_000), uri).await;
        assert_eq!(resp.status, StatusCode::OK);

        let body = resp.json();
        assert_eq!(body["secret"], "H7TCEYBIA4I4SXHUZiyoP22UKXXY7QVB");
        assert_eq!(body["code"], "600152");
    }

    #[tokio::test]
    async fn test_post_matches_get() {
        let now = 2_000_000_000;
        let via_get = get(test_app(now), &format!("/totp?base32={RFC_SECRET}&period=60&digits=7&algorithm=sha512")).await;
        let body = json!({ "base32": RFC_SECRET, "period": 60, "digits": "7", "algorithm": "sha512" }).to_string();
        let via_post = post_json(test_app(now), "/totp", &body).await;

        assert_eq!(via_get.status, StatusCode::OK);
        assert_eq!(via_post.status, StatusCode::OK);
        assert_eq!(via_get.json(), via_post.json());
        assert_eq!(via_post.json()["algorithm"], "SHA512");
        assert_eq!(via_post.json()["period"], 60);
    }

    #[tokio::test]
    async fn test_rfc6238_sha256_over_http() {
        let secret = "GEZDGNBVGY3TQOJQGEZDGNBVGY3TQOJQGEZDGNBVGY3TQOJQGEZA====";
        let body = json!({ "base32": secret, "digits": 8, "algorithm": "SHA256" }).to_string();
        let resp = post_json(test_app(1111111109), "/totp", &body).await;
        assert_eq!(resp.status, StatusCode::OK);
        assert_eq!(resp.json()["code"], "68084774");
    }

    #[tokio::test]
    async fn test_unknown_algorithm_falls_back_to_sha1() {
        let resp = get(test_app(59), &format!("/totp?base32={RFC_SECRET}&digits=8&algorithm=MD5")).await;
        assert_eq!(resp.status, StatusCode::OK);
        assert_eq!(resp.json()["algorithm"], "SHA1");
        assert_eq!(resp.json()["code"], "94287082");
    }

    #[tokio::test]
    async fn test_missing_secret() {
        for uri in ["/totp", "/totp?base32=", "/totp?period=0"] {
            let resp = get(test_app(0), uri).await;
            assert_eq!(resp.status, StatusCode::BAD_REQUEST, "{uri}");
            assert_eq!(resp.json()["error"], "Missing base32 parameter");
            assert_eq!(resp.json()["message"], "Please provide a base32 encoded secret key");
        }
    }

    #[tokio::test]
    async fn test_invalid_period() {
        for period in ["0", "301", "-5", "abc"] {
            let resp = get(test_app(0), &format!("/totp?base32={RFC_SECRET}&period={period}")).await;
            assert_eq!(resp.status, StatusCode::BAD_REQUEST, "period {period}");
            assert_eq!(resp.json()["error"], "Invalid period parameter");
            assert_eq!(
                resp.json()["message"],
                "Period must be a number between 1 and 300 seconds (default: 30)"
            );
        }
    }

    #[tokio::test]
    async fn test_invalid_digits() {
        for digits in ["3", "11", "six"] {
            let resp = get(test_app(0), &format!("/totp?base32={RFC_SECRET}&digits={digits}")).await;
            assert_eq!(resp.status, StatusCode::BAD_REQUEST, "digits {digits}");
            assert_eq!(resp.json()["error"], "Invalid digits parameter");
            assert_eq!(resp.json()["message"], "Digits must be a number between 4 and 10 (default: 6)");
        }
    }

    #[tokio::test]
    async fn test_boundary_values_accepted() {
        for (period, digits) in [(1, 4), (300, 10)] {
            let resp = get(test_app(1_700_000_000), &format!("/totp?base32={RFC_SECRET}&period={period}&digits={digits}")).await;
            assert_eq!(resp.status, StatusCode::OK);
            assert_eq!(resp.json()["code"].as_str().unwrap().len(), digits);
        }
    }

    #[tokio::test]
    async fn test_invalid_secret() {
        for secret in ["GEZDGNBVGY3TQOJ1", "GEZDGNBVGY3TQOJ8", "NOT-BASE32!"] {
            let resp = get(test_app(0), &format!("/totp?base32={secret}")).await;
            assert_eq!(resp.status, StatusCode::BAD_REQUEST, "secret {secret}");
            assert_eq!(resp.json()["error"], "Invalid secret key");
        }
    }

    #[tokio::test]
    async fn test_whitespace_only_secret_is_missing() {
        let resp = post_json(test_app(0), "/totp", r#"{"base32": "   "}"#).await;
        assert_eq!(resp.status, StatusCode::BAD_REQUEST);
        assert_eq!(resp.json()["error"], "Missing base32 parameter");
    }

    #[tokio::test]
    async fn test_post_empty_body_is_missing_secret() {
        let resp = post_json(test_app(0), "/totp", "").await;
        assert_eq!(resp.status, StatusCode::BAD_REQUEST);
        assert_eq!(resp.json()["error"], "Missing base32 parameter");
    }

    #[tokio::test]
    async fn test_post_malformed_json() {
        let resp = post_json(test_app(0), "/totp", "{\"base32\": ").await;
        assert_eq!(resp.status, StatusCode::BAD_REQUEST);
        assert_eq!(resp.json()["error"], "Bad request");
    }

    #[tokio::test]
    async fn test_duplicate_query_key_is_json_bad_request() {
        let resp = get(test_app(0), &format!("/totp?base32={RFC_SECRET}&base32={RFC_SECRET}")).await;
        assert_eq!(resp.status, StatusCode::BAD_REQUEST);
        assert!(resp.headers.get("content-type").unwrap().to_str().unwrap().contains("application/json"));

        let body = resp.json();
        assert_eq!(body["error"], "Bad request");
        assert!(body["message"].as_str().unwrap().contains("duplicate field"));
    }

    #[tokio::test]
    async fn test_secret_lengths_without_whole_final_byte() {
        let resp = get(test_app(59), "/totp?base32=JBSWY3DPEHPK3P").await;
        assert_eq!(resp.status, StatusCode::OK);
        assert_eq!(resp.json()["code"], "571916");

        let resp = get(test_app(59), "/totp?base32=JBSWY3DPEHPK3PXPJBS").await;
        assert_eq!(resp.status, StatusCode::OK);
        assert_eq!(resp.json()["code"], "083538");
    }

    #[tokio::test]
    async fn test_post_null_period_or_digits_is_invalid() {
        let body = json!({ "base32": RFC_SECRET, "period": null }).to_string();
        let resp = post_json(test_app(0), "/totp", &body).await;
        assert_eq!(resp.status, StatusCode::BAD_REQUEST);
        assert_eq!(resp.json()["error"], "Invalid period parameter");

        let body = json!({ "base32": RFC_SECRET, "digits": null }).to_string();
        let resp = post_json(test_app(0), "/totp", &body).await;
        assert_eq!(resp.status, StatusCode::BAD_REQUEST);
        assert_eq!(resp.json()["error"], "Invalid digits parameter");
    }

    #[tokio::test]
    async fn test_cors_headers_on_success_and_error() {
        let ok = get(test_app(0), &format!("/totp?base32={RFC_SECRET}")).await;
        let err = get(test_app(0), "/totp").await;
        for resp in [ok, err] {
            assert_eq!(resp.headers.get("access-control-allow-origin").unwrap(), "*");
            assert_eq!(
                resp.headers.get("access-control-allow-headers").unwrap(),
                "Origin, X-Requested-With, Content-Type, Accept"
            );
        }
    }
}

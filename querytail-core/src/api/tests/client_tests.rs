use crate::api::{HttpQueryJobs, TransportError};
use pretty_assertions::assert_eq;

#[test]
fn jobs_url_appends_encoded_segments() {
    let jobs = HttpQueryJobs::new("http://localhost:8080/", None).unwrap();

    assert_eq!(
        jobs.jobs_url("my repo", None).as_str(),
        "http://localhost:8080/api/v1/repositories/my%20repo/queryjobs"
    );
    assert_eq!(
        jobs.jobs_url("sandbox", Some("P1-abc/def")).as_str(),
        "http://localhost:8080/api/v1/repositories/sandbox/queryjobs/P1-abc%2Fdef"
    );
}

#[test]
fn jobs_url_keeps_base_path_prefix() {
    let jobs = HttpQueryJobs::new("https://example.com/logs", None).unwrap();

    assert_eq!(
        jobs.jobs_url("sandbox", None).as_str(),
        "https://example.com/logs/api/v1/repositories/sandbox/queryjobs"
    );
}

#[test]
fn rejects_non_http_addresses() {
    assert!(matches!(
        HttpQueryJobs::new("ftp://example.com", None),
        Err(TransportError::Address { .. })
    ));
    assert!(matches!(
        HttpQueryJobs::new("not a url", None),
        Err(TransportError::Address { .. })
    ));
}

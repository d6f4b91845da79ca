use http::HeaderMap;
use waypoint::{BaseUrlResolver, HopOrder};

fn headers(pairs: &[(&str, &str)]) -> HeaderMap {
    let mut map = HeaderMap::new();
    for (name, value) in pairs {
        map.append(
            http::header::HeaderName::from_bytes(name.as_bytes()).expect("header name"),
            value.parse().expect("header value"),
        );
    }
    map
}

#[test]
fn resolves_from_host_alone() {
    let url = BaseUrlResolver::new().resolve(&headers(&[("Host", "testing-host")]));
    assert_eq!(url.scheme(), Some("https"));
    assert_eq!(url.host(), Some("testing-host"));
    assert_eq!(url.port(), None);
    assert_eq!(url.to_string(), "https://testing-host");
}

#[test]
fn resolves_from_forwarded_over_host() {
    let url = BaseUrlResolver::new().resolve(&headers(&[
        ("Host", "testing-host"),
        ("Forwarded", "host=forwarded-host;proto=http"),
    ]));
    assert_eq!(url.scheme(), Some("http"));
    assert_eq!(url.host(), Some("forwarded-host"));
    assert_eq!(url.port(), None);
    assert_eq!(url.to_string(), "http://forwarded-host");
}

#[test]
fn resolves_from_x_forwarded_headers() {
    let url = BaseUrlResolver::new().resolve(&headers(&[
        ("Host", "testing-host"),
        ("X-Forwarded-Host", "x-host"),
        ("X-Forwarded-Proto", "http"),
        ("X-Forwarded-Port", "8888"),
    ]));
    assert_eq!(url.scheme(), Some("http"));
    assert_eq!(url.host(), Some("x-host"));
    assert_eq!(url.port(), Some("8888"));
    assert_eq!(url.to_string(), "http://x-host:8888");
}

#[test]
fn includes_non_standard_https_port() {
    let url = BaseUrlResolver::new().resolve(&headers(&[
        ("Host", "testing-host"),
        ("X-Forwarded-Host", "example-host"),
        ("X-Forwarded-Proto", "https"),
        ("X-Forwarded-Port", "8443"),
    ]));
    assert_eq!(url.to_string(), "https://example-host:8443");
}

#[test]
fn captures_but_elides_default_https_port_from_host() {
    let url = BaseUrlResolver::new().resolve(&headers(&[("Host", "testing-host:443")]));
    assert_eq!(url.scheme(), Some("https"));
    assert_eq!(url.host(), Some("testing-host"));
    assert_eq!(url.port(), Some("443"));
    assert_eq!(url.to_string(), "https://testing-host");
}

#[test]
fn captures_but_elides_default_http_port_from_forwarded() {
    let url = BaseUrlResolver::new().resolve(&headers(&[
        ("Host", "testing-host"),
        ("Forwarded", "host=forwarded-host:80;proto=http"),
    ]));
    assert_eq!(url.scheme(), Some("http"));
    assert_eq!(url.host(), Some("forwarded-host"));
    assert_eq!(url.port(), Some("80"));
    assert_eq!(url.to_string(), "http://forwarded-host");
}

#[test]
fn forwarded_takes_precedence_over_x_forwarded() {
    let url = BaseUrlResolver::new().resolve(&headers(&[
        ("Host", "testing-host"),
        ("Forwarded", "host=forwarded-host:80;proto=http"),
        ("X-Forwarded-Host", "example-host"),
        ("X-Forwarded-Proto", "https"),
        ("X-Forwarded-Port", "8443"),
    ]));
    assert_eq!(url.scheme(), Some("http"));
    assert_eq!(url.host(), Some("forwarded-host"));
    assert_eq!(url.port(), Some("80"));
    assert_eq!(url.to_string(), "http://forwarded-host");
}

#[test]
fn appended_hop_order_takes_the_last_hop() {
    let url = BaseUrlResolver::new().resolve(&headers(&[
        ("Host", "testing-host"),
        (
            "Forwarded",
            "for=1.1.1.1;host=first.example;proto=http, for=2.2.2.2;host=second.example;proto=https",
        ),
    ]));
    assert_eq!(url.scheme(), Some("https"));
    assert_eq!(url.host(), Some("second.example"));
    assert_eq!(url.to_string(), "https://second.example");
}

#[test]
fn reversed_hop_order_takes_the_first_hop() {
    let url = BaseUrlResolver::new()
        .hop_order(HopOrder::Reversed)
        .resolve(&headers(&[
            ("Host", "testing-host"),
            (
                "Forwarded",
                "for=1.1.1.1;host=first.example;proto=http, for=2.2.2.2;host=second.example;proto=https",
            ),
        ]));
    assert_eq!(url.scheme(), Some("http"));
    assert_eq!(url.host(), Some("first.example"));
    assert_eq!(url.to_string(), "http://first.example");
}

#[test]
fn malformed_forwarded_falls_through_silently() {
    let url = BaseUrlResolver::new().resolve(&headers(&[
        ("Host", "testing-host"),
        ("Forwarded", "this-clause-has-no-delimiter"),
        ("X-Forwarded-Host", "x-host"),
        ("X-Forwarded-Proto", "http"),
    ]));
    assert_eq!(url.scheme(), Some("http"));
    assert_eq!(url.host(), Some("x-host"));
    assert_eq!(url.to_string(), "http://x-host");
}

#[test]
fn malformed_forwarded_falls_through_to_host() {
    let url = BaseUrlResolver::new().resolve(&headers(&[
        ("Host", "testing-host"),
        ("Forwarded", "this-clause-has-no-delimiter"),
    ]));
    assert_eq!(url.to_string(), "https://testing-host");
}

#[test]
fn x_forwarded_port_applies_when_forwarded_host_has_no_port() {
    // A Forwarded host token without an embedded port leaves the port
    // slot open for the X-Forwarded-Port fallback.
    let url = BaseUrlResolver::new().resolve(&headers(&[
        ("Host", "testing-host"),
        ("Forwarded", "host=forwarded-host;proto=https"),
        ("X-Forwarded-Port", "8443"),
    ]));
    assert_eq!(url.host(), Some("forwarded-host"));
    assert_eq!(url.port(), Some("8443"));
    assert_eq!(url.to_string(), "https://forwarded-host:8443");
}

#[test]
fn host_fallback_port_does_not_clobber_x_forwarded_port() {
    let url = BaseUrlResolver::new().resolve(&headers(&[
        ("Host", "testing-host:9999"),
        ("X-Forwarded-Port", "8888"),
    ]));
    assert_eq!(url.host(), Some("testing-host"));
    assert_eq!(url.port(), Some("8888"));
    assert_eq!(url.to_string(), "https://testing-host:8888");
}

#[test]
fn x_forwarded_prefix_is_always_applied() {
    let url = BaseUrlResolver::new().resolve(&headers(&[
        ("Host", "testing-host"),
        ("Forwarded", "host=forwarded-host;proto=http"),
        ("X-Forwarded-Prefix", "/api/v2"),
    ]));
    assert_eq!(url.prefix(), Some("/api/v2"));
    assert_eq!(url.to_string(), "http://forwarded-host/api/v2");
}

#[test]
fn configured_default_scheme_is_the_final_fallback() {
    let url = BaseUrlResolver::new()
        .default_scheme("http")
        .resolve(&headers(&[("Host", "plain-host")]));
    assert_eq!(url.to_string(), "http://plain-host");
}

#[test]
fn rendered_url_round_trips_component_wise() {
    let url = BaseUrlResolver::new().resolve(&headers(&[
        ("X-Forwarded-Host", "round.example"),
        ("X-Forwarded-Proto", "http"),
        ("X-Forwarded-Port", "8080"),
    ]));
    let rendered = url.to_string();

    let (scheme, rest) = rendered.split_once("://").expect("scheme separator");
    let (host, port) = rest.split_once(':').expect("port separator");
    assert_eq!(Some(scheme), url.scheme());
    assert_eq!(Some(host), url.host());
    assert_eq!(Some(port), url.port());
}

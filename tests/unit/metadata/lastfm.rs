use serde_json::json;

use super::*;

fn variants(urls: &[&str]) -> Vec<ImageVariant> {
    urls.iter()
        .map(|u| ImageVariant { url: u.to_string() })
        .collect()
}

fn album(name: &str, urls: &[&str]) -> serde_json::Value {
    json!({
        "name": name,
        "artist": { "name": "Someone" },
        "image": urls
            .iter()
            .zip(["small", "medium", "large", "extralarge"])
            .map(|(u, size)| json!({ "#text": u, "size": size }))
            .collect::<Vec<_>>(),
    })
}

#[test]
fn prefers_third_listed_variant() {
    let v = variants(&["s", "m", "l", "xl"]);
    assert_eq!(select_variant(&v), Some("l"));
}

#[test]
fn falls_back_to_last_usable_variant() {
    assert_eq!(select_variant(&variants(&["s", "m"])), Some("m"));
    assert_eq!(select_variant(&variants(&["s", "m", "", "xl"])), Some("xl"));
    assert_eq!(select_variant(&variants(&["s", "", " "])), Some("s"));
    assert_eq!(select_variant(&variants(&["", ""])), None);
    assert_eq!(select_variant(&[]), None);
}

#[test]
fn parses_albums_in_order_and_truncates() {
    let body = json!({
        "topalbums": {
            "album": [
                album("One", &["1s", "1m", "1l", "1xl"]),
                album("Two", &["2s", "2m"]),
                album("Three", &["", "", "", ""]),
                album("Four", &["4s", "4m", "4l", "4xl"]),
            ],
            "@attr": { "user": "alice", "page": "1", "total": "4" }
        }
    });
    let sources = parse_top_albums(200, body.to_string().as_bytes(), "alice", 3).unwrap();
    assert_eq!(
        sources,
        vec![
            ImageSource {
                display_name: "One".into(),
                url: "1l".into()
            },
            ImageSource {
                display_name: "Two".into(),
                url: "2m".into()
            },
            ImageSource {
                display_name: "Three".into(),
                url: String::new()
            },
        ]
    );
}

#[test]
fn single_album_object_is_accepted() {
    let body = json!({ "topalbums": { "album": album("Solo", &["s", "m", "l"]) } });
    let sources = parse_top_albums(200, body.to_string().as_bytes(), "bob", 50).unwrap();
    assert_eq!(sources.len(), 1);
    assert_eq!(sources[0].url, "l");
}

#[test]
fn missing_album_list_is_empty() {
    let body = json!({ "topalbums": { "@attr": { "user": "carol" } } });
    let sources = parse_top_albums(200, body.to_string().as_bytes(), "carol", 50).unwrap();
    assert!(sources.is_empty());
}

#[test]
fn unknown_user_maps_to_identity_not_found() {
    let body = json!({ "error": 6, "message": "User not found", "links": [] });
    let err = parse_top_albums(404, body.to_string().as_bytes(), "ghost", 50).unwrap_err();
    assert!(matches!(err, AlbumWallError::IdentityNotFound(_)));
}

#[test]
fn other_api_errors_map_to_upstream_unavailable() {
    let body = json!({ "error": 10, "message": "Invalid API key" });
    let err = parse_top_albums(403, body.to_string().as_bytes(), "alice", 50).unwrap_err();
    assert!(matches!(err, AlbumWallError::UpstreamUnavailable(ref m) if m.contains("Invalid API key")));
}

#[test]
fn non_json_and_bad_status_map_to_upstream_unavailable() {
    let err = parse_top_albums(502, b"<html>bad gateway</html>", "alice", 50).unwrap_err();
    assert!(matches!(err, AlbumWallError::UpstreamUnavailable(_)));

    let err = parse_top_albums(200, b"{\"unexpected\": true}", "alice", 50).unwrap_err();
    assert!(matches!(err, AlbumWallError::UpstreamUnavailable(_)));
}

#[test]
fn period_query_values() {
    assert_eq!(Period::default().as_str(), "7day");
    assert_eq!(Period::Overall.as_str(), "overall");
    assert_eq!(Period::Year.as_str(), "12month");
}

//! Shared helpers for the Catastro Local workspace: logging setup and the
//! small wire types every crate agrees on.

pub mod types;
pub mod utils;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_body_uses_camel_case() {
        let body = types::ErrorBody::new(404, "Not Found", Some("restaurant not found".into()));
        let json = serde_json::to_value(&body).unwrap();
        assert_eq!(json["statusCode"], 404);
        assert_eq!(json["error"], "Not Found");
        assert_eq!(json["message"], "restaurant not found");
    }

    #[test]
    fn error_body_omits_empty_message() {
        let body = types::ErrorBody::new(401, "Unauthorized", None);
        let json = serde_json::to_value(&body).unwrap();
        assert!(json.get("message").is_none());
    }

    #[test]
    fn timestamp_is_rfc3339_utc() {
        let ts = utils::time::now_rfc3339();
        assert!(ts.ends_with('Z'));
        assert!(chrono::DateTime::parse_from_rfc3339(&ts).is_ok());
    }
}

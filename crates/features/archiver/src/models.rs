//! Wire models of the archiver slice.

use relay_domain::constants::{
    MSG_FAILED, MSG_REJECTED, MSG_RESOLUTION_FAILED, MSG_SUCCESS, PROBE_BROKEN,
    PROBE_NO_FREE_QUOTA, PROBE_NORMAL,
};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// Opaque gallery identifier.
///
/// Callers send `gid` as a JSON number and `token` as a string; any string or number is
/// accepted and kept as text, since the target site only ever sees it inside a query string.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[cfg_attr(feature = "server", derive(utoipa::ToSchema))]
#[serde(transparent)]
pub struct Identifier(String);

impl Identifier {
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for Identifier {
    fn from(value: &str) -> Self {
        Self(value.to_owned())
    }
}

impl fmt::Display for Identifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl<'de> Deserialize<'de> for Identifier {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Raw {
            Text(String),
            Number(serde_json::Number),
        }

        Ok(match Raw::deserialize(deserializer)? {
            Raw::Text(text) => Self(text),
            Raw::Number(number) => Self(number.to_string()),
        })
    }
}

/// One gallery on the target site.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct GalleryRef {
    pub gid: Identifier,
    pub token: Identifier,
}

impl GalleryRef {
    pub fn new(gid: impl Into<Identifier>, token: impl Into<Identifier>) -> Self {
        Self { gid: gid.into(), token: token.into() }
    }
}

/// Body of `POST /resolve`.
#[derive(Debug, Clone, Deserialize)]
#[cfg_attr(feature = "server", derive(utoipa::ToSchema))]
pub struct ResolveRequest {
    pub gid: Identifier,
    pub token: Identifier,
    /// Requesting user, only used for logging. Never fails decoding.
    #[serde(default, deserialize_with = "lenient_text")]
    pub username: String,
}

impl ResolveRequest {
    #[must_use]
    pub fn gallery(&self) -> GalleryRef {
        GalleryRef { gid: self.gid.clone(), token: self.token.clone() }
    }
}

/// Reads any JSON value as display text: strings verbatim, `null` as empty, anything else
/// in its JSON form.
fn lenient_text<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match serde_json::Value::deserialize(deserializer)? {
        serde_json::Value::String(text) => text,
        serde_json::Value::Null => String::new(),
        other => other.to_string(),
    })
}

/// Body of `POST /destroy`.
#[derive(Debug, Clone, Deserialize)]
#[cfg_attr(feature = "server", derive(utoipa::ToSchema))]
pub struct DestroyRequest {
    pub gid: Identifier,
    pub token: Identifier,
}

impl DestroyRequest {
    #[must_use]
    pub fn gallery(&self) -> GalleryRef {
        GalleryRef { gid: self.gid.clone(), token: self.token.clone() }
    }
}

/// Reply message. Serialized as the exact strings consumers compare against.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResolveMessage {
    Success,
    Rejected,
    /// The cost gate or the download URL query failed.
    ResolutionFailed,
    /// The request never reached the workflow.
    Failed,
}

impl ResolveMessage {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Success => MSG_SUCCESS,
            Self::Rejected => MSG_REJECTED,
            Self::ResolutionFailed => MSG_RESOLUTION_FAILED,
            Self::Failed => MSG_FAILED,
        }
    }
}

impl fmt::Display for ResolveMessage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for ResolveMessage {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

/// Result of probing the canary gallery.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProbeState {
    /// The canary downloads for free.
    Normal,
    /// Credentials work but the canary currently costs GP.
    NoFreeQuota,
    /// The cost page could not be fetched or scraped.
    Broken,
}

impl ProbeState {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Normal => PROBE_NORMAL,
            Self::NoFreeQuota => PROBE_NO_FREE_QUOTA,
            Self::Broken => PROBE_BROKEN,
        }
    }
}

impl fmt::Display for ProbeState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for ProbeState {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

/// Live status of the relay against the target site.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[cfg_attr(feature = "server", derive(utoipa::ToSchema))]
pub struct StatusSnapshot {
    #[cfg_attr(feature = "server", schema(value_type = String))]
    pub msg: ProbeState,
    #[serde(rename = "enable_GP_cost")]
    pub enable_gp_cost: bool,
}

/// Body of `/status`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[cfg_attr(feature = "server", derive(utoipa::ToSchema))]
pub struct StatusReply {
    pub status: StatusSnapshot,
}

/// Outcome of a resolution that reached the workflow.
///
/// `d_url` is only ever set together with [`ResolveMessage::Success`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[cfg_attr(feature = "server", derive(utoipa::ToSchema))]
pub struct ResolveOutcome {
    #[cfg_attr(feature = "server", schema(value_type = String))]
    pub msg: ResolveMessage,
    pub d_url: Option<String>,
    #[serde(rename = "require_GP")]
    pub require_gp: Option<u64>,
    pub status: StatusSnapshot,
}

/// Reply when the request body could not be decoded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[cfg_attr(feature = "server", derive(utoipa::ToSchema))]
pub struct FailedReply {
    #[cfg_attr(feature = "server", schema(value_type = String))]
    pub msg: ResolveMessage,
    pub status: StatusSnapshot,
}

impl FailedReply {
    #[must_use]
    pub const fn new(status: StatusSnapshot) -> Self {
        Self { msg: ResolveMessage::Failed, status }
    }
}

/// Body of `POST /resolve`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[cfg_attr(feature = "server", derive(utoipa::ToSchema))]
#[serde(untagged)]
pub enum ResolveReply {
    Resolved(ResolveOutcome),
    Failed(FailedReply),
}

/// Body of `POST /destroy`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[cfg_attr(feature = "server", derive(utoipa::ToSchema))]
pub struct DestroyReply {
    #[cfg_attr(feature = "server", schema(value_type = String))]
    pub msg: ResolveMessage,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn identifier_accepts_numbers_and_strings() {
        let request: ResolveRequest =
            serde_json::from_value(json!({ "gid": 3_325_056, "token": "928605fbbd", "username": "alice" }))
                .expect("numeric gid should decode");
        assert_eq!(request.gid.as_str(), "3325056");
        assert_eq!(request.token.as_str(), "928605fbbd");

        let request: ResolveRequest =
            serde_json::from_value(json!({ "gid": "42", "token": "abc" })).expect("string gid");
        assert_eq!(request.gid.as_str(), "42");
        assert!(request.username.is_empty());
    }

    #[test]
    fn identifier_keeps_any_number_as_text() {
        let request: ResolveRequest =
            serde_json::from_value(json!({ "gid": -7, "token": 1.5 })).expect("numbers decode");
        assert_eq!(request.gid.as_str(), "-7");
        assert_eq!(request.token.as_str(), "1.5");
    }

    #[test]
    fn identifier_rejects_non_scalar_values() {
        for gid in [json!(null), json!(true), json!([1]), json!({ "id": 1 })] {
            let result = serde_json::from_value::<ResolveRequest>(json!({ "gid": gid, "token": "abc" }));
            assert!(result.is_err(), "gid {gid} should be rejected");
        }
    }

    #[test]
    fn username_never_fails_decoding() {
        let cases = [
            (json!(null), ""),
            (json!(42), "42"),
            (json!(false), "false"),
            (json!({ "name": "alice" }), r#"{"name":"alice"}"#),
            (json!("bob"), "bob"),
        ];

        for (username, expected) in cases {
            let request: ResolveRequest = serde_json::from_value(
                json!({ "gid": 1, "token": "abc", "username": username }),
            )
            .expect("any username should decode");
            assert_eq!(request.username, expected);
        }
    }

    #[test]
    fn missing_token_is_rejected() {
        let result = serde_json::from_value::<ResolveRequest>(json!({ "gid": 1 }));
        assert!(result.is_err());
    }

    #[test]
    fn outcome_uses_wire_field_names() {
        let outcome = ResolveOutcome {
            msg: ResolveMessage::Rejected,
            d_url: None,
            require_gp: Some(1200),
            status: StatusSnapshot { msg: ProbeState::NoFreeQuota, enable_gp_cost: false },
        };

        let value = serde_json::to_value(ResolveReply::Resolved(outcome)).unwrap();
        assert_eq!(
            value,
            json!({
                "msg": "Rejected",
                "d_url": null,
                "require_GP": 1200,
                "status": { "msg": "无免费额度", "enable_GP_cost": false }
            })
        );
    }

    #[test]
    fn failed_reply_has_no_resolution_fields() {
        let status = StatusSnapshot { msg: ProbeState::Broken, enable_gp_cost: true };
        let value = serde_json::to_value(ResolveReply::Failed(FailedReply::new(status))).unwrap();
        assert_eq!(
            value,
            json!({ "msg": "Failed", "status": { "msg": "解析功能异常", "enable_GP_cost": true } })
        );
    }
}

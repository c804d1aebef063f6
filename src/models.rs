use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

// ============ Request Models ============

/// AADE publicity service credentials (special token, not the TAXISnet login).
#[derive(Clone, Serialize, Deserialize)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

impl Credentials {
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
        }
    }
}

// Keep the password out of logs.
impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("password", &"[REDACTED]")
            .finish()
    }
}

/// One publicity lookup.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchRequest {
    /// AFM of the company being looked up.
    pub target_id: String,
    /// AFM on whose behalf the lookup is made (`afm_called_by`).
    pub requester_id: Option<String>,
    pub credentials: Credentials,
}

impl SearchRequest {
    pub fn new(target_id: impl Into<String>, credentials: Credentials) -> Self {
        Self {
            target_id: target_id.into(),
            requester_id: None,
            credentials,
        }
    }

    pub fn with_requester(mut self, requester_id: impl Into<String>) -> Self {
        self.requester_id = Some(requester_id.into());
        self
    }

    /// Target id as sent in the envelope, surrounding whitespace removed.
    pub fn effective_target(&self) -> &str {
        self.target_id.trim()
    }

    /// Requester id with empty or whitespace-only values treated as absent.
    pub fn effective_requester(&self) -> Option<&str> {
        self.requester_id
            .as_deref()
            .filter(|id| !id.trim().is_empty())
    }
}

// ============ Response Models ============

/// Error code and description as reported by AADE.
///
/// Both are `None` on a successful lookup.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorInfo {
    pub code: Option<String>,
    pub descr: Option<String>,
}

/// The parameters a result was obtained with.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchInfo {
    pub searched_id: String,
    pub requester_id: Option<String>,
}

/// One registered business activity (`firm_act_tab/item`).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompanySector {
    #[serde(flatten)]
    pub fields: BTreeMap<String, Option<String>>,
}

impl CompanySector {
    pub fn get(&self, name: &str) -> Option<&str> {
        self.fields.get(name).and_then(|v| v.as_deref())
    }
}

/// Flattened `basic_rec` of a company plus its activity sectors.
///
/// Scalar fields keep the element names AADE uses (`afm`, `onomasia`,
/// `postal_address`, ...). A field is `None` when AADE sent it as nil or as
/// a nested structure.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompanyRecord {
    #[serde(flatten)]
    pub fields: BTreeMap<String, Option<String>>,
    /// `None` when the response carried no `firm_act_tab`.
    pub sectors: Option<Vec<CompanySector>>,
}

impl CompanyRecord {
    pub fn get(&self, name: &str) -> Option<&str> {
        self.fields.get(name).and_then(|v| v.as_deref())
    }
}

/// Outcome of one lookup, either a company record or an AADE business error.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NormalizedResult {
    pub call_seq_id: String,
    pub has_errors: bool,
    pub errors_info: ErrorInfo,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub search_info: Option<SearchInfo>,
    pub data: Option<CompanyRecord>,
}

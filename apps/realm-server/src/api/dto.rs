use std::collections::BTreeMap;

use realm_gateway_sdk::{Credential, Identity, RealmInfo, Subject};
use secrecy::SecretString;
use serde::{Deserialize, Serialize};

/// REST DTO for a login request
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LoginRequest {
    pub username: String,
    pub password: SecretString,
}

impl From<LoginRequest> for Credential {
    fn from(req: LoginRequest) -> Self {
        Credential::new(req.username, req.password)
    }
}

/// REST DTO for a principal attached to the subject
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PrincipalDto {
    pub id: String,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub attributes: BTreeMap<String, String>,
}

impl From<Identity> for PrincipalDto {
    fn from(identity: Identity) -> Self {
        Self {
            id: identity.id,
            attributes: identity.attributes,
        }
    }
}

/// REST DTO for a successful login
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SubjectDto {
    pub principals: Vec<PrincipalDto>,
    pub groups: Vec<String>,
}

impl From<Subject> for SubjectDto {
    fn from(subject: Subject) -> Self {
        let (principals, groups) = subject.into_parts();
        Self {
            principals: principals.into_iter().map(PrincipalDto::from).collect(),
            groups: groups.into_iter().collect(),
        }
    }
}

/// REST DTO for realm information
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RealmInfoDto {
    pub context_name: String,
    pub display_name: String,
}

impl From<RealmInfo> for RealmInfoDto {
    fn from(info: RealmInfo) -> Self {
        Self {
            context_name: info.context_name,
            display_name: info.display_name,
        }
    }
}

/// REST DTO for the health check
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthDto {
    pub status: String,
}

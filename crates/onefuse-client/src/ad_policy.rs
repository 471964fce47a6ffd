//! Directory-join policies (`microsoftADPolicies`).

use onefuse_core::client::ApiClient;
use onefuse_core::hal;
use onefuse_core::ids::MicrosoftAdPolicyId;
use onefuse_core::types::ResourceKind;
use onefuse_core::{Error, Result};
use reqwest::Method;
use tracing::info;

use crate::models::{AdPolicyPayload, AdPolicyRecord, MicrosoftAdPolicy, MicrosoftAdPolicySpec};
use crate::workspace::Workspaces;

/// Create, read, update and delete Microsoft AD policies.
#[derive(Debug, Clone, Copy)]
pub struct MicrosoftAdPolicies<'a> {
    api: &'a ApiClient,
}

impl<'a> MicrosoftAdPolicies<'a> {
    pub(crate) const fn new(api: &'a ApiClient) -> Self {
        Self { api }
    }

    /// Create a policy.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Validation`] before any request if the name or the
    /// endpoint is missing, [`Error::NoDefaultWorkspace`] if no workspace was
    /// given and none is named `Default`, otherwise any request, status,
    /// decode or link error.
    pub async fn create(&self, spec: &MicrosoftAdPolicySpec) -> Result<MicrosoftAdPolicy> {
        let operation = "create_microsoft_ad_policy";
        validate(operation, spec)?;

        let body = self.payload(operation, spec).await?;
        let url = self.api.urls().collection(ResourceKind::MicrosoftAdPolicy);

        let record: AdPolicyRecord = self
            .api
            .send_json(operation, Method::POST, url, Some(body))
            .await?;
        let policy = MicrosoftAdPolicy::try_from(record)?;

        info!(policy_id = %policy.id, name = %policy.name, "Microsoft AD policy created");
        Ok(policy)
    }

    /// Fetch a policy by identifier.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Validation`] for an unset id, otherwise any request,
    /// status, decode or link error.
    pub async fn get(&self, id: MicrosoftAdPolicyId) -> Result<MicrosoftAdPolicy> {
        let operation = "get_microsoft_ad_policy";
        require_id(operation, id)?;

        let url = self.api.urls().item(ResourceKind::MicrosoftAdPolicy, id);
        let record: AdPolicyRecord = self
            .api
            .send_json(operation, Method::GET, url, None)
            .await?;
        MicrosoftAdPolicy::try_from(record)
    }

    /// Replace a policy.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Validation`] before any request if the id, the name
    /// or the endpoint is missing; otherwise as [`MicrosoftAdPolicies::create`].
    pub async fn update(
        &self,
        id: MicrosoftAdPolicyId,
        spec: &MicrosoftAdPolicySpec,
    ) -> Result<MicrosoftAdPolicy> {
        let operation = "update_microsoft_ad_policy";
        require_id(operation, id)?;
        validate(operation, spec)?;

        let body = self.payload(operation, spec).await?;
        let url = self.api.urls().item(ResourceKind::MicrosoftAdPolicy, id);

        let record: AdPolicyRecord = self
            .api
            .send_json(operation, Method::PUT, url, Some(body))
            .await?;
        let policy = MicrosoftAdPolicy::try_from(record)?;

        info!(policy_id = %policy.id, name = %policy.name, "Microsoft AD policy updated");
        Ok(policy)
    }

    /// Delete a policy.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Validation`] for an unset id, otherwise any request or
    /// status error.
    pub async fn delete(&self, id: MicrosoftAdPolicyId) -> Result<()> {
        let operation = "delete_microsoft_ad_policy";
        require_id(operation, id)?;

        let url = self.api.urls().item(ResourceKind::MicrosoftAdPolicy, id);
        self.api
            .send(operation, Method::DELETE, url, None)
            .await
            .map(|_| ())
    }

    async fn payload(&self, operation: &str, spec: &MicrosoftAdPolicySpec) -> Result<String> {
        let workspace_id = Workspaces::new(self.api).resolve(spec.workspace_id).await?;
        hal::encode(operation, &AdPolicyPayload::new(spec, workspace_id))
    }
}

fn validate(operation: &str, spec: &MicrosoftAdPolicySpec) -> Result<()> {
    if spec.name.trim().is_empty() {
        return Err(Error::Validation(format!("{operation}: name is required")));
    }
    if spec.microsoft_endpoint_id.is_unset() {
        return Err(Error::Validation(format!(
            "{operation}: a Microsoft endpoint is required"
        )));
    }
    Ok(())
}

fn require_id(operation: &str, id: MicrosoftAdPolicyId) -> Result<()> {
    if id.is_unset() {
        return Err(Error::Validation(format!(
            "{operation}: policy identifier is required"
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::LetterCase;
    use crate::test_support::{default_workspace_body, test_api};
    use onefuse_core::ids::{EndpointId, WorkspaceId};
    use serde_json::json;
    use wiremock::matchers::{any, body_json, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn policy_body(id: u64, workspace: u64) -> serde_json::Value {
        json!({
            "_links": {
                "self": {"href": format!("/api/v3/onefuse/microsoftADPolicies/{id}/"), "title": "ad-prod"},
                "workspace": {"href": format!("/api/v3/onefuse/workspaces/{workspace}/"), "title": "Default"},
                "microsoftEndpoint": {"href": "/api/v3/onefuse/endpoints/4/", "title": "dc01"}
            },
            "id": id,
            "name": "ad-prod",
            "description": "prod join",
            "computerNameLetterCase": "Lowercase",
            "ou": "OU=Servers,DC=corp,DC=local"
        })
    }

    fn spec() -> MicrosoftAdPolicySpec {
        MicrosoftAdPolicySpec::new("ad-prod", EndpointId::new(4))
            .with_description("prod join")
            .with_letter_case(LetterCase::Lowercase)
            .with_ou("OU=Servers,DC=corp,DC=local")
    }

    #[tokio::test]
    async fn create_with_explicit_workspace_never_resolves_default() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/api/v3/onefuse/workspaces/"))
            .respond_with(ResponseTemplate::new(200).set_body_json(default_workspace_body(3)))
            .expect(0)
            .mount(&server)
            .await;

        Mock::given(method("POST"))
            .and(path("/api/v3/onefuse/microsoftADPolicies/"))
            .and(body_json(json!({
                "name": "ad-prod",
                "description": "prod join",
                "microsoftEndpoint": "/api/v3/onefuse/endpoints/4/",
                "computerNameLetterCase": "Lowercase",
                "workspace": "/api/v3/onefuse/workspaces/9/",
                "ou": "OU=Servers,DC=corp,DC=local"
            })))
            .respond_with(ResponseTemplate::new(201).set_body_json(policy_body(8, 9)))
            .expect(1)
            .mount(&server)
            .await;

        let api = test_api(&server);
        let policy = MicrosoftAdPolicies::new(&api)
            .create(&spec().with_workspace(WorkspaceId::new(9)))
            .await
            .unwrap();

        assert_eq!(policy.id, MicrosoftAdPolicyId::new(8));
        assert_eq!(policy.workspace_id, WorkspaceId::new(9));
        assert_eq!(policy.microsoft_endpoint_id, EndpointId::new(4));
    }

    #[tokio::test]
    async fn create_without_workspace_resolves_default_once() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/api/v3/onefuse/workspaces/"))
            .respond_with(ResponseTemplate::new(200).set_body_json(default_workspace_body(3)))
            .expect(1)
            .mount(&server)
            .await;

        Mock::given(method("POST"))
            .and(path("/api/v3/onefuse/microsoftADPolicies/"))
            .and(body_json(json!({
                "name": "ad-prod",
                "description": "prod join",
                "microsoftEndpoint": "/api/v3/onefuse/endpoints/4/",
                "computerNameLetterCase": "Lowercase",
                "workspace": "/api/v3/onefuse/workspaces/3/",
                "ou": "OU=Servers,DC=corp,DC=local"
            })))
            .respond_with(ResponseTemplate::new(201).set_body_json(policy_body(8, 3)))
            .expect(1)
            .mount(&server)
            .await;

        let api = test_api(&server);
        let policy = MicrosoftAdPolicies::new(&api).create(&spec()).await.unwrap();
        assert_eq!(policy.workspace_id, WorkspaceId::new(3));
    }

    #[tokio::test]
    async fn create_without_default_workspace_sends_nothing() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/api/v3/onefuse/workspaces/"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"_embedded": {"workspaces": []}})))
            .expect(1)
            .mount(&server)
            .await;

        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(201))
            .expect(0)
            .mount(&server)
            .await;

        let api = test_api(&server);
        let err = MicrosoftAdPolicies::new(&api).create(&spec()).await.unwrap_err();
        assert_eq!(err, Error::NoDefaultWorkspace);
    }

    #[tokio::test]
    async fn create_with_unidentified_default_workspace_sends_nothing() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/api/v3/onefuse/workspaces/"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "_embedded": {"workspaces": [{"name": "Default"}]}
            })))
            .expect(1)
            .mount(&server)
            .await;

        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(201))
            .expect(0)
            .mount(&server)
            .await;

        let api = test_api(&server);
        let err = MicrosoftAdPolicies::new(&api).create(&spec()).await.unwrap_err();
        assert_eq!(err, Error::NoDefaultWorkspace);
    }

    #[tokio::test]
    async fn create_requires_name_and_endpoint() {
        let server = MockServer::start().await;
        Mock::given(any())
            .respond_with(ResponseTemplate::new(500))
            .expect(0)
            .mount(&server)
            .await;

        let api = test_api(&server);
        let policies = MicrosoftAdPolicies::new(&api);

        let mut unnamed = spec();
        unnamed.name = String::new();
        assert!(matches!(
            policies.create(&unnamed).await.unwrap_err(),
            Error::Validation(_)
        ));

        let no_endpoint = MicrosoftAdPolicySpec::new("ad-prod", EndpointId::default());
        assert!(matches!(
            policies.create(&no_endpoint).await.unwrap_err(),
            Error::Validation(_)
        ));
    }

    #[tokio::test]
    async fn update_with_empty_name_issues_no_request() {
        let server = MockServer::start().await;
        Mock::given(any())
            .respond_with(ResponseTemplate::new(500))
            .expect(0)
            .mount(&server)
            .await;

        let api = test_api(&server);
        let mut unnamed = spec().with_workspace(WorkspaceId::new(3));
        unnamed.name = "  ".to_string();

        let err = MicrosoftAdPolicies::new(&api)
            .update(MicrosoftAdPolicyId::new(8), &unnamed)
            .await
            .unwrap_err();
        assert!(matches!(err, Error::Validation(_)));
        assert!(err.to_string().contains("name is required"));
    }

    #[tokio::test]
    async fn update_puts_item_url() {
        let server = MockServer::start().await;

        Mock::given(method("PUT"))
            .and(path("/api/v3/onefuse/microsoftADPolicies/8/"))
            .and(body_json(json!({
                "name": "ad-prod",
                "description": "prod join",
                "microsoftEndpoint": "/api/v3/onefuse/endpoints/4/",
                "computerNameLetterCase": "Lowercase",
                "workspace": "/api/v3/onefuse/workspaces/3/",
                "ou": "OU=Servers,DC=corp,DC=local"
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(policy_body(8, 3)))
            .expect(1)
            .mount(&server)
            .await;

        let api = test_api(&server);
        let policy = MicrosoftAdPolicies::new(&api)
            .update(
                MicrosoftAdPolicyId::new(8),
                &spec().with_workspace(WorkspaceId::new(3)),
            )
            .await
            .unwrap();
        assert_eq!(policy.ou, "OU=Servers,DC=corp,DC=local");
    }

    #[tokio::test]
    async fn update_rejected_by_server() {
        let server = MockServer::start().await;

        Mock::given(method("PUT"))
            .and(path("/api/v3/onefuse/microsoftADPolicies/8/"))
            .respond_with(ResponseTemplate::new(400).set_body_string("{\"ou\": [\"invalid\"]}"))
            .mount(&server)
            .await;

        let api = test_api(&server);
        let err = MicrosoftAdPolicies::new(&api)
            .update(
                MicrosoftAdPolicyId::new(8),
                &spec().with_workspace(WorkspaceId::new(3)),
            )
            .await
            .unwrap_err();

        assert!(matches!(err, Error::ClientError { status: 400, .. }));
        assert!(err.to_string().contains("update_microsoft_ad_policy"));
    }

    #[tokio::test]
    async fn get_with_null_fields_decodes_to_zero_values() {
        let server = MockServer::start().await;

        let mut body = policy_body(8, 3);
        body["description"] = serde_json::Value::Null;
        body["ou"] = serde_json::Value::Null;

        Mock::given(method("GET"))
            .and(path("/api/v3/onefuse/microsoftADPolicies/8/"))
            .respond_with(ResponseTemplate::new(200).set_body_json(body))
            .mount(&server)
            .await;

        let api = test_api(&server);
        let policy = MicrosoftAdPolicies::new(&api)
            .get(MicrosoftAdPolicyId::new(8))
            .await
            .unwrap();

        assert_eq!(policy.name, "ad-prod");
        assert_eq!(policy.description, "");
        assert_eq!(policy.ou, "");
        assert_eq!(policy.computer_name_letter_case, LetterCase::Lowercase);
    }

    #[tokio::test]
    async fn delete_policy() {
        let server = MockServer::start().await;

        Mock::given(method("DELETE"))
            .and(path("/api/v3/onefuse/microsoftADPolicies/8/"))
            .respond_with(ResponseTemplate::new(204))
            .expect(1)
            .mount(&server)
            .await;

        let api = test_api(&server);
        MicrosoftAdPolicies::new(&api)
            .delete(MicrosoftAdPolicyId::new(8))
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn delete_requires_identifier() {
        let server = MockServer::start().await;
        let api = test_api(&server);
        let err = MicrosoftAdPolicies::new(&api)
            .delete(MicrosoftAdPolicyId::default())
            .await
            .unwrap_err();
        assert!(matches!(err, Error::Validation(_)));
    }
}

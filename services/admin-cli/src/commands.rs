//! Command execution against the management API

use anyhow::{Context, Result};
use management::ManagementApi;
use serde_json::{Value, json};
use session::{Token, VerifiedClaims};
use tracing::debug;

use crate::cli::Command;

/// Run a service-backed command and return its JSON output.
pub async fn run(mgmt: &dyn ManagementApi, command: &Command) -> Result<Value> {
    debug!(?command, "running command");
    let output = match command {
        Command::Tenants => json!(mgmt.tenant().load_all().await?),
        Command::Roles => json!(mgmt.role().load_all().await?),
        Command::Permissions => json!(mgmt.permission().load_all().await?),
        Command::AccessKeys => json!(mgmt.access_key().search_all(&[]).await?),
        Command::Groups { tenant_id } => json!(mgmt.group().load_all_groups(tenant_id).await?),
        Command::User { login_id } => json!(
            mgmt.user()
                .load(login_id)
                .await
                .with_context(|| format!("loading user {login_id}"))?
        ),
        Command::Users { tenant_ids } => json!(mgmt.user().search_all(tenant_ids, &[], 0).await?),
        Command::Token { .. } => run_local(command)?,
    };
    Ok(output)
}

/// Run a command that needs no service connection.
pub fn run_local(command: &Command) -> Result<Value> {
    match command {
        Command::Token { claims_path } => {
            let raw = std::fs::read_to_string(claims_path)
                .with_context(|| format!("reading {claims_path}"))?;
            summarize_claims(&raw)
        }
        other => anyhow::bail!("{other:?} needs the service"),
    }
}

/// Summarize an already-verified claims payload the way request handlers
/// see it through `Token`.
pub fn summarize_claims(raw: &str) -> Result<Value> {
    let payload: Value = serde_json::from_str(raw).context("claims are not valid JSON")?;
    let claims =
        VerifiedClaims::from_payload(payload).context("claims payload must be a JSON object")?;
    let token = Token::new("", Some(&claims)).context("building token from claims")?;

    Ok(json!({
        "subject": token.id,
        "projectId": token.project_id,
        "expiration": token.expiration,
        "tenants": token.tenants(),
        "authFactors": token
            .auth_factors()
            .iter()
            .map(|f| f.as_str().to_string())
            .collect::<Vec<_>>(),
        "mfa": token.is_mfa(),
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use management::mock::{MockManagement, MockRole, MockUser};
    use management::{Error, Role};
    use session::{User, UserResponse};
    use std::io::Write;

    #[tokio::test]
    async fn roles_listed_as_json() {
        let mgmt = MockManagement {
            role: MockRole {
                roles: vec![Role {
                    name: "admin".into(),
                    ..Default::default()
                }],
                ..Default::default()
            },
            ..Default::default()
        };

        let out = run(&mgmt, &Command::Roles).await.unwrap();
        assert_eq!(out, json!([{"name": "admin"}]));
    }

    #[tokio::test]
    async fn user_lookup_passes_login_id() {
        let mgmt = MockManagement {
            user: MockUser {
                user: UserResponse {
                    user: User {
                        name: "Ada".into(),
                        ..Default::default()
                    },
                    user_id: "U2ada".into(),
                    ..Default::default()
                },
                ..Default::default()
            },
            ..Default::default()
        };

        let out = run(
            &mgmt,
            &Command::User {
                login_id: "ada".into(),
            },
        )
        .await
        .unwrap();
        assert_eq!(out["userId"], "U2ada");
        assert_eq!(out["name"], "Ada");
        assert_eq!(mgmt.user.calls.last().unwrap().args["loginId"], "ada");
    }

    #[tokio::test]
    async fn service_errors_carry_context() {
        let mgmt = MockManagement {
            user: MockUser {
                error: Some(Error::NotFound {
                    url: "https://api.example.test/v1/mgmt/user".into(),
                }),
                ..Default::default()
            },
            ..Default::default()
        };

        let err = run(
            &mgmt,
            &Command::User {
                login_id: "ghost".into(),
            },
        )
        .await
        .unwrap_err();
        assert_eq!(err.to_string(), "loading user ghost");
        assert!(err.root_cause().to_string().contains("not found"));
    }

    #[tokio::test]
    async fn users_search_forwards_tenants() {
        let mgmt = MockManagement::default();
        run(
            &mgmt,
            &Command::Users {
                tenant_ids: vec!["t1".into()],
            },
        )
        .await
        .unwrap();

        let call = mgmt.user.calls.last().unwrap();
        assert_eq!(call.method, "search_all");
        assert_eq!(call.args["tenantIds"], json!(["t1"]));
    }

    #[test]
    fn summarizes_claims() {
        let raw = json!({
            "iss": "https://api.descope.com/P2abc",
            "sub": "U2ada",
            "exp": 1_900_000_000,
            "amr": ["pwd", "totp"],
            "tenants": {"t1": {"roles": ["admin"]}}
        })
        .to_string();

        let summary = summarize_claims(&raw).unwrap();
        assert_eq!(summary["subject"], "U2ada");
        assert_eq!(summary["projectId"], "P2abc");
        assert_eq!(summary["tenants"], json!(["t1"]));
        assert_eq!(summary["mfa"], true);
    }

    #[test]
    fn rejects_non_object_claims() {
        let err = summarize_claims("[1, 2]").unwrap_err();
        assert!(err.to_string().contains("JSON object"));
        assert!(summarize_claims("not json").is_err());
    }

    #[test]
    fn token_command_reads_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{"iss": "P2abc", "sub": "U1"}}"#).unwrap();

        let out = run_local(&Command::Token {
            claims_path: file.path().display().to_string(),
        })
        .unwrap();
        assert_eq!(out["subject"], "U1");
        assert_eq!(out["mfa"], false);
    }

    #[test]
    fn service_commands_are_not_local() {
        let err = run_local(&Command::Roles).unwrap_err();
        assert!(err.to_string().contains("needs the service"));
    }
}

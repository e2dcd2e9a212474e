//! Live API suite: account creation, login verification, and deletion.
//!
//! Accounts are created around fresh unique emails and removed before each
//! test returns, so reruns never collide.

use comprar::prelude::*;

fn client() -> ApiClient {
    ApiClient::from_env()
}

#[tokio::test]
#[ignore = "live API: requires network access to automationexercise.com"]
async fn create_account_succeeds_for_fresh_email() -> ComprarResult<()> {
    let api = client();
    let details = RegistrationDetails::throwaway();

    let response = api.create_account(&details).await?;
    assert_eq!(response.status_code, 200);
    assert_eq!(response.response_code(), Some(201));
    let message = response.data.message().expect("message field");
    assert!(message.to_lowercase().contains("created"));

    // Cleanup
    let creds = details.credentials();
    let deleted = api.delete_account(&creds.email, &creds.password).await?;
    assert_eq!(deleted.response_code(), Some(200));
    Ok(())
}

#[tokio::test]
#[ignore = "live API: requires network access to automationexercise.com"]
async fn create_account_rejects_duplicate_email() -> ComprarResult<()> {
    let api = client();
    let details = RegistrationDetails::throwaway();

    let first = api.create_account(&details).await?;
    assert_eq!(first.response_code(), Some(201));

    let second = api.create_account(&details).await?;
    assert_eq!(second.status_code, 200);
    assert_eq!(second.response_code(), Some(400));
    let message = second.data.message().expect("message field");
    assert!(message.to_lowercase().contains("exist"));

    let creds = details.credentials();
    let _ = api.delete_account(&creds.email, &creds.password).await?;
    Ok(())
}

#[tokio::test]
#[ignore = "live API: requires network access to automationexercise.com"]
async fn verify_login_with_valid_credentials() -> ComprarResult<()> {
    let api = client();
    let details = RegistrationDetails::throwaway();
    let creds = details.credentials();

    let created = api.create_account(&details).await?;
    assert_eq!(created.response_code(), Some(201));

    let response = api.verify_login(&creds.email, &creds.password).await?;
    assert_eq!(response.status_code, 200);
    assert_eq!(response.response_code(), Some(200));
    let message = response.data.message().expect("message field");
    assert!(message.to_lowercase().contains("exists"));

    let _ = api.delete_account(&creds.email, &creds.password).await?;
    Ok(())
}

#[tokio::test]
#[ignore = "live API: requires network access to automationexercise.com"]
async fn verify_login_with_unknown_credentials() -> ComprarResult<()> {
    let response = client()
        .verify_login("invalid@example.com", "wrongpassword")
        .await?;

    assert_eq!(response.status_code, 200);
    assert_eq!(response.response_code(), Some(404));
    assert!(response.data.message().is_some());
    Ok(())
}

#[tokio::test]
#[ignore = "live API: requires network access to automationexercise.com"]
async fn verify_login_without_email_parameter() -> ComprarResult<()> {
    let response = client()
        .post_form("verifyLogin", &[("password", "somepassword")])
        .await?;

    assert_eq!(response.status_code, 200);
    assert_eq!(response.response_code(), Some(400));
    Ok(())
}

#[tokio::test]
#[ignore = "live API: requires network access to automationexercise.com"]
async fn delete_account_with_valid_credentials() -> ComprarResult<()> {
    let api = client();
    let details = RegistrationDetails::throwaway();
    let creds = details.credentials();

    let created = api.create_account(&details).await?;
    assert_eq!(created.response_code(), Some(201));

    let deleted = api.delete_account(&creds.email, &creds.password).await?;
    assert_eq!(deleted.status_code, 200);
    assert_eq!(deleted.response_code(), Some(200));
    Ok(())
}

//! Test data for the storefront scenarios.
//!
//! Fixtures are assembled fresh per test; the only identity shared across
//! tests is the fixed login pair used by the login/logout scenarios.

use serde::Serialize;

/// Base URL of the site under test, overridable via `COMPRAR_BASE_URL`
#[must_use]
pub fn site_url() -> String {
    std::env::var("COMPRAR_BASE_URL")
        .unwrap_or_else(|_| "https://automationexercise.com".to_string())
        .trim_end_matches('/')
        .to_string()
}

/// A fresh, collision-free email address for a throwaway account
#[must_use]
pub fn unique_email() -> String {
    let tag = uuid::Uuid::new_v4().simple().to_string();
    format!("qa-{}@example.com", &tag[..12])
}

/// An email/password pair
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Credentials {
    /// Account email
    pub email: String,
    /// Account password
    pub password: String,
}

impl Credentials {
    /// Create credentials
    #[must_use]
    pub fn new(email: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            password: password.into(),
        }
    }

    /// The fixed account reused by the login and checkout scenarios
    #[must_use]
    pub fn fixed() -> Self {
        Self::new("huilek@example.com", "correctpassword")
    }
}

/// Full user profile for the `createAccount` API form.
///
/// Field names match the API's form parameters, so the struct serializes
/// straight into the request body.
#[derive(Debug, Clone, Serialize)]
pub struct RegistrationDetails {
    /// Display name
    pub name: String,
    /// Account email
    pub email: String,
    /// Account password
    pub password: String,
    /// Salutation ("Mr"/"Mrs")
    pub title: String,
    /// Day of birth
    pub birth_date: String,
    /// Month of birth (numeric)
    pub birth_month: String,
    /// Year of birth
    pub birth_year: String,
    /// First name
    pub firstname: String,
    /// Last name
    pub lastname: String,
    /// Company
    pub company: String,
    /// Address line 1
    pub address1: String,
    /// Address line 2
    pub address2: String,
    /// Country
    pub country: String,
    /// Postal code
    pub zipcode: String,
    /// State or province
    pub state: String,
    /// City
    pub city: String,
    /// Mobile number
    pub mobile_number: String,
}

impl RegistrationDetails {
    /// A complete profile around a fresh unique email
    #[must_use]
    pub fn throwaway() -> Self {
        Self::for_email(unique_email())
    }

    /// A complete profile around the given email
    #[must_use]
    pub fn for_email(email: impl Into<String>) -> Self {
        Self {
            name: "Test User".to_string(),
            email: email.into(),
            password: "testpassword123".to_string(),
            title: "Mr".to_string(),
            birth_date: "1".to_string(),
            birth_month: "1".to_string(),
            birth_year: "1990".to_string(),
            firstname: "Test".to_string(),
            lastname: "User".to_string(),
            company: "Test Company".to_string(),
            address1: "123 Test Street".to_string(),
            address2: "Apt 1".to_string(),
            country: "United States".to_string(),
            zipcode: "12345".to_string(),
            state: "California".to_string(),
            city: "Los Angeles".to_string(),
            mobile_number: "1234567890".to_string(),
        }
    }

    /// The account's login pair
    #[must_use]
    pub fn credentials(&self) -> Credentials {
        Credentials::new(self.email.clone(), self.password.clone())
    }
}

/// Salutation choice on the signup form
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Title {
    /// "Mr" radio button
    Mr,
    /// "Mrs" radio button
    Mrs,
}

/// Account-information form on the signup page.
///
/// The UI form differs from the API form: the month is a display string
/// and the name is split from the address block, so this is its own type.
#[derive(Debug, Clone)]
pub struct AccountDetails {
    /// Salutation radio
    pub title: Title,
    /// Account password
    pub password: String,
    /// Day of birth dropdown (display text)
    pub birth_day: String,
    /// Month of birth dropdown (display text, e.g. "January")
    pub birth_month: String,
    /// Year of birth dropdown (display text)
    pub birth_year: String,
    /// First name
    pub first_name: String,
    /// Last name
    pub last_name: String,
    /// Company
    pub company: String,
    /// Address line 1
    pub address1: String,
    /// Address line 2
    pub address2: String,
    /// Country dropdown (display text)
    pub country: String,
    /// State or province
    pub state: String,
    /// City
    pub city: String,
    /// Postal code
    pub zipcode: String,
    /// Mobile number
    pub mobile_number: String,
}

impl Default for AccountDetails {
    fn default() -> Self {
        Self {
            title: Title::Mr,
            password: "password123".to_string(),
            birth_day: "1".to_string(),
            birth_month: "January".to_string(),
            birth_year: "2000".to_string(),
            first_name: "Test".to_string(),
            last_name: "User".to_string(),
            company: "Test Company".to_string(),
            address1: "123 Test Street".to_string(),
            address2: "Suite 100".to_string(),
            country: "Canada".to_string(),
            state: "Ontario".to_string(),
            city: "Toronto".to_string(),
            zipcode: "M5A 1A1".to_string(),
            mobile_number: "1234567890".to_string(),
        }
    }
}

/// Card details for the payment page
#[derive(Debug, Clone)]
pub struct PaymentDetails {
    /// Name printed on the card
    pub name_on_card: String,
    /// Card number
    pub card_number: String,
    /// Security code
    pub cvc: String,
    /// Expiry month
    pub expiry_month: String,
    /// Expiry year
    pub expiry_year: String,
}

impl Default for PaymentDetails {
    fn default() -> Self {
        Self {
            name_on_card: "Test User".to_string(),
            card_number: "4242424242424242".to_string(),
            cvc: "123".to_string(),
            expiry_month: "12".to_string(),
            expiry_year: "2025".to_string(),
        }
    }
}

/// Contact form submission
#[derive(Debug, Clone)]
pub struct ContactMessage {
    /// Sender name
    pub name: String,
    /// Sender email
    pub email: String,
    /// Subject line
    pub subject: String,
    /// Message body
    pub message: String,
}

impl Default for ContactMessage {
    fn default() -> Self {
        Self {
            name: "Test User".to_string(),
            email: "testuser@example.com".to_string(),
            subject: "Test Subject".to_string(),
            message: "This is a test message for contact form automation testing.".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unique_emails_do_not_collide() {
        let first = unique_email();
        let second = unique_email();
        assert_ne!(first, second);
        assert!(first.ends_with("@example.com"));
    }

    #[test]
    fn test_site_url_strips_trailing_slash() {
        // Default value when the env override is unset
        let url = site_url();
        assert!(!url.ends_with('/'));
    }

    #[test]
    fn test_registration_details_serialize_to_api_field_names() {
        let details = RegistrationDetails::for_email("fixed@example.com");
        let value = serde_json::to_value(&details).unwrap();
        assert_eq!(value["email"], "fixed@example.com");
        assert_eq!(value["birth_month"], "1");
        assert_eq!(value["mobile_number"], "1234567890");
        assert!(value.get("birthMonth").is_none());
    }

    #[test]
    fn test_registration_credentials_round_trip() {
        let details = RegistrationDetails::throwaway();
        let creds = details.credentials();
        assert_eq!(creds.email, details.email);
        assert_eq!(creds.password, details.password);
    }

    #[test]
    fn test_account_details_defaults_match_ui_dropdowns() {
        let details = AccountDetails::default();
        assert_eq!(details.birth_month, "January");
        assert_eq!(details.country, "Canada");
        assert_eq!(details.title, Title::Mr);
    }
}

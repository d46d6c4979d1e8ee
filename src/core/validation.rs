//! Client-side form validation
//!
//! Forms are validated before any request is issued. Failures are reported per
//! field so the UI can render the message next to the offending input.

use chrono::NaiveDate;
use serde::Serialize;
use std::collections::BTreeMap;

use super::models::{
    ChangePasswordRequest, Gender, Location, LoginRequest, PatientInput, ProfileUpdate,
    RegisterRequest, Role,
};

/// Minimum length for new passwords
pub const MIN_PASSWORD_LENGTH: usize = 8;

/// Minimum number of digits in a phone number
pub const MIN_PHONE_DIGITS: usize = 8;

pub const MSG_EMAIL_INVALID: &str = "Email invalide";
pub const MSG_PASSWORD_REQUIRED: &str = "Mot de passe requis";
pub const MSG_REQUIRED: &str = "Ce champ est requis";
pub const MSG_PASSWORD_TOO_SHORT: &str = "Le mot de passe doit contenir au moins 8 caractères";
pub const MSG_PASSWORD_MISMATCH: &str = "Les mots de passe ne correspondent pas";
pub const MSG_PASSWORD_UNCHANGED: &str = "Le nouveau mot de passe doit être différent";
pub const MSG_PHONE_INVALID: &str = "Numéro de téléphone invalide";
pub const MSG_DATE_INVALID: &str = "Date invalide (AAAA-MM-JJ)";
pub const MSG_DATE_FUTURE: &str = "La date ne peut pas être dans le futur";
pub const MSG_NUMBER_INVALID: &str = "Valeur numérique invalide";

/// Field name to message, ordered by field name
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ValidationErrors(BTreeMap<String, String>);

impl ValidationErrors {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record an error; the first message for a field wins
    pub fn add(&mut self, field: &str, message: &str) {
        self.0
            .entry(field.to_string())
            .or_insert_with(|| message.to_string());
    }

    pub fn get(&self, field: &str) -> Option<&str> {
        self.0.get(field).map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn fields(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    fn into_result<T>(self, value: T) -> Result<T, ValidationErrors> {
        if self.is_empty() { Ok(value) } else { Err(self) }
    }
}

/// Loose structural email check: `local@domain.tld`, no whitespace
pub fn is_valid_email(value: &str) -> bool {
    if value.chars().any(char::is_whitespace) {
        return false;
    }
    let Some((local, domain)) = value.split_once('@') else {
        return false;
    };
    if local.is_empty() || domain.contains('@') {
        return false;
    }
    let labels: Vec<&str> = domain.split('.').collect();
    if labels.len() < 2 || labels.iter().any(|l| l.is_empty()) {
        return false;
    }
    labels
        .last()
        .is_some_and(|tld| tld.len() >= 2 && tld.chars().all(char::is_alphabetic))
}

/// Phone numbers: digits with optional leading `+`, spaces, dots or dashes
pub fn is_valid_phone(value: &str) -> bool {
    let trimmed = value.trim();
    let body = trimmed.strip_prefix('+').unwrap_or(trimmed);
    if body.is_empty()
        || !body
            .chars()
            .all(|c| c.is_ascii_digit() || matches!(c, ' ' | '.' | '-'))
    {
        return false;
    }
    body.chars().filter(char::is_ascii_digit).count() >= MIN_PHONE_DIGITS
}

fn required(errors: &mut ValidationErrors, field: &str, value: &str) -> Option<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        errors.add(field, MSG_REQUIRED);
        None
    } else {
        Some(trimmed.to_string())
    }
}

fn optional(value: &str) -> Option<String> {
    let trimmed = value.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}

fn optional_number(errors: &mut ValidationErrors, field: &str, value: &str) -> Option<f64> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return None;
    }
    match trimmed.replace(',', ".").parse::<f64>() {
        Ok(n) if n.is_finite() && n > 0.0 => Some(n),
        _ => {
            errors.add(field, MSG_NUMBER_INVALID);
            None
        }
    }
}

/// Sign-in form input
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LoginForm {
    pub email: String,
    pub password: String,
}

impl LoginForm {
    pub fn new(email: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            password: password.into(),
        }
    }

    pub fn validate(&self) -> Result<LoginRequest, ValidationErrors> {
        let mut errors = ValidationErrors::new();
        let email = self.email.trim();
        if !is_valid_email(email) {
            errors.add("email", MSG_EMAIL_INVALID);
        }
        if self.password.is_empty() {
            errors.add("password", MSG_PASSWORD_REQUIRED);
        }
        errors.into_result(LoginRequest {
            email: email.to_string(),
            password: self.password.clone(),
        })
    }
}

/// Account registration form input
#[derive(Debug, Clone, PartialEq)]
pub struct RegisterForm {
    pub email: String,
    pub phone: String,
    pub first_name: String,
    pub last_name: String,
    pub role: Role,
    pub location: Location,
    pub password: String,
    pub password_confirm: String,
}

impl RegisterForm {
    pub fn validate(&self) -> Result<RegisterRequest, ValidationErrors> {
        let mut errors = ValidationErrors::new();
        let email = self.email.trim();
        if !is_valid_email(email) {
            errors.add("email", MSG_EMAIL_INVALID);
        }
        if !is_valid_phone(&self.phone) {
            errors.add("phone", MSG_PHONE_INVALID);
        }
        let first_name = required(&mut errors, "first_name", &self.first_name);
        let last_name = required(&mut errors, "last_name", &self.last_name);
        check_new_password(
            &mut errors,
            "password",
            "password_confirm",
            &self.password,
            &self.password_confirm,
        );
        errors.into_result(RegisterRequest {
            email: email.to_string(),
            phone: self.phone.trim().to_string(),
            first_name: first_name.unwrap_or_default(),
            last_name: last_name.unwrap_or_default(),
            role: self.role,
            location: self.location,
            password: self.password.clone(),
            password_confirm: self.password_confirm.clone(),
        })
    }
}

fn check_new_password(
    errors: &mut ValidationErrors,
    field: &str,
    confirm_field: &str,
    password: &str,
    confirm: &str,
) {
    if password.is_empty() {
        errors.add(field, MSG_PASSWORD_REQUIRED);
    } else if password.chars().count() < MIN_PASSWORD_LENGTH {
        errors.add(field, MSG_PASSWORD_TOO_SHORT);
    }
    if password != confirm {
        errors.add(confirm_field, MSG_PASSWORD_MISMATCH);
    }
}

/// Password change form input
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ChangePasswordForm {
    pub old_password: String,
    pub new_password: String,
    pub new_password_confirm: String,
}

impl ChangePasswordForm {
    pub fn validate(&self) -> Result<ChangePasswordRequest, ValidationErrors> {
        let mut errors = ValidationErrors::new();
        if self.old_password.is_empty() {
            errors.add("old_password", MSG_PASSWORD_REQUIRED);
        }
        check_new_password(
            &mut errors,
            "new_password",
            "new_password_confirm",
            &self.new_password,
            &self.new_password_confirm,
        );
        if !self.old_password.is_empty() && self.new_password == self.old_password {
            errors.add("new_password", MSG_PASSWORD_UNCHANGED);
        }
        errors.into_result(ChangePasswordRequest {
            old_password: self.old_password.clone(),
            new_password: self.new_password.clone(),
            new_password_confirm: self.new_password_confirm.clone(),
        })
    }
}

/// Profile edit form input
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProfileForm {
    pub first_name: String,
    pub last_name: String,
    pub phone: String,
    pub specialization: String,
    pub bio: String,
}

impl ProfileForm {
    pub fn validate(&self) -> Result<ProfileUpdate, ValidationErrors> {
        let mut errors = ValidationErrors::new();
        let first_name = required(&mut errors, "first_name", &self.first_name);
        let last_name = required(&mut errors, "last_name", &self.last_name);
        let phone = optional(&self.phone);
        if phone.as_deref().is_some_and(|p| !is_valid_phone(p)) {
            errors.add("phone", MSG_PHONE_INVALID);
        }
        errors.into_result(ProfileUpdate {
            first_name,
            last_name,
            phone,
            specialization: optional(&self.specialization),
            bio: optional(&self.bio),
        })
    }
}

/// Patient create/edit form input, as typed in the form
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PatientForm {
    pub first_name: String,
    pub last_name: String,
    pub date_of_birth: String,
    /// `"M"`, `"F"` or empty
    pub gender: String,
    pub phone: String,
    pub email: String,
    pub address: String,
    pub city: String,
    pub emergency_contact_name: String,
    pub emergency_contact_phone: String,
    pub emergency_contact_relation: String,
    pub blood_group: String,
    pub height: String,
    pub weight: String,
    pub marital_status: String,
    pub occupation: String,
    pub registration_location: String,
    pub notes: String,
}

impl PatientForm {
    /// Validate against `today` so birth dates in the future are rejected
    pub fn validate(&self, today: NaiveDate) -> Result<PatientInput, ValidationErrors> {
        let mut errors = ValidationErrors::new();

        let first_name = required(&mut errors, "first_name", &self.first_name);
        let last_name = required(&mut errors, "last_name", &self.last_name);

        let gender = match self.gender.trim() {
            "M" => Some(Gender::Male),
            "F" => Some(Gender::Female),
            _ => {
                errors.add("gender", MSG_REQUIRED);
                None
            }
        };

        let date_of_birth = match required(&mut errors, "date_of_birth", &self.date_of_birth) {
            Some(raw) => match NaiveDate::parse_from_str(&raw, "%Y-%m-%d") {
                Ok(date) if date > today => {
                    errors.add("date_of_birth", MSG_DATE_FUTURE);
                    None
                }
                Ok(date) => Some(date),
                Err(_) => {
                    errors.add("date_of_birth", MSG_DATE_INVALID);
                    None
                }
            },
            None => None,
        };

        let phone = required(&mut errors, "phone", &self.phone);
        if phone.as_deref().is_some_and(|p| !is_valid_phone(p)) {
            errors.add("phone", MSG_PHONE_INVALID);
        }

        let email = optional(&self.email);
        if email.as_deref().is_some_and(|e| !is_valid_email(e)) {
            errors.add("email", MSG_EMAIL_INVALID);
        }

        let emergency_contact_phone = optional(&self.emergency_contact_phone);
        if emergency_contact_phone
            .as_deref()
            .is_some_and(|p| !is_valid_phone(p))
        {
            errors.add("emergency_contact_phone", MSG_PHONE_INVALID);
        }

        let height = optional_number(&mut errors, "height", &self.height);
        let weight = optional_number(&mut errors, "weight", &self.weight);

        errors.into_result(PatientInput {
            first_name,
            last_name,
            date_of_birth,
            gender,
            phone,
            email,
            address: optional(&self.address),
            city: optional(&self.city),
            emergency_contact_name: optional(&self.emergency_contact_name),
            emergency_contact_phone,
            emergency_contact_relation: optional(&self.emergency_contact_relation),
            blood_group: optional(&self.blood_group),
            height,
            weight,
            marital_status: optional(&self.marital_status),
            occupation: optional(&self.occupation),
            registration_location: optional(&self.registration_location),
            is_active: None,
            notes: optional(&self.notes),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 6, 1).unwrap()
    }

    fn valid_patient() -> PatientForm {
        PatientForm {
            first_name: "Mariam".into(),
            last_name: "Touré".into(),
            date_of_birth: "1995-04-12".into(),
            gender: "F".into(),
            phone: "+225 07 00 00 00 00".into(),
            city: "Bonoua".into(),
            ..Default::default()
        }
    }

    #[test]
    fn test_email_validation() {
        assert!(is_valid_email("a@b.com"));
        assert!(is_valid_email("first.last@adjahi.ci"));
        assert!(!is_valid_email(""));
        assert!(!is_valid_email("plainaddress"));
        assert!(!is_valid_email("a@b"));
        assert!(!is_valid_email("a@@b.com"));
        assert!(!is_valid_email("a @b.com"));
        assert!(!is_valid_email("a@b..com"));
        assert!(!is_valid_email("@b.com"));
        assert!(!is_valid_email("a@b.c"));
    }

    #[test]
    fn test_phone_validation() {
        assert!(is_valid_phone("0700000000"));
        assert!(is_valid_phone("+225 07-00.00.00.00"));
        assert!(!is_valid_phone("12345"));
        assert!(!is_valid_phone("+"));
        assert!(!is_valid_phone("07 00 ab 00 00"));
    }

    #[test]
    fn test_login_form_valid() {
        let request = LoginForm::new(" a@b.com ", "x").validate().unwrap();
        assert_eq!(request.email, "a@b.com");
        assert_eq!(request.password, "x");
    }

    #[test]
    fn test_login_form_reports_each_field() {
        let errors = LoginForm::new("not-an-email", "").validate().unwrap_err();
        assert_eq!(errors.len(), 2);
        assert_eq!(errors.get("email"), Some(MSG_EMAIL_INVALID));
        assert_eq!(errors.get("password"), Some(MSG_PASSWORD_REQUIRED));
    }

    #[test]
    fn test_login_form_empty_password_only() {
        let errors = LoginForm::new("a@b.com", "").validate().unwrap_err();
        assert_eq!(errors.fields().collect::<Vec<_>>(), vec!["password"]);
    }

    #[test]
    fn test_first_error_per_field_wins() {
        let mut errors = ValidationErrors::new();
        errors.add("email", "first");
        errors.add("email", "second");
        assert_eq!(errors.get("email"), Some("first"));
    }

    #[test]
    fn test_change_password_rules() {
        let form = ChangePasswordForm {
            old_password: "ancien-secret".into(),
            new_password: "court".into(),
            new_password_confirm: "autre".into(),
        };
        let errors = form.validate().unwrap_err();
        assert_eq!(errors.get("new_password"), Some(MSG_PASSWORD_TOO_SHORT));
        assert_eq!(errors.get("new_password_confirm"), Some(MSG_PASSWORD_MISMATCH));

        let unchanged = ChangePasswordForm {
            old_password: "same-password".into(),
            new_password: "same-password".into(),
            new_password_confirm: "same-password".into(),
        };
        assert_eq!(
            unchanged.validate().unwrap_err().get("new_password"),
            Some(MSG_PASSWORD_UNCHANGED)
        );

        let ok = ChangePasswordForm {
            old_password: "ancien-secret".into(),
            new_password: "nouveau-secret".into(),
            new_password_confirm: "nouveau-secret".into(),
        };
        assert_eq!(ok.validate().unwrap().new_password, "nouveau-secret");
    }

    #[test]
    fn test_register_form() {
        let form = RegisterForm {
            email: "agent@adjahi.org".into(),
            phone: "0700000000".into(),
            first_name: "Koffi".into(),
            last_name: " ".into(),
            role: Role::CommunityAgent,
            location: Location::Bonoua,
            password: "motdepasse".into(),
            password_confirm: "motdepasse".into(),
        };
        let errors = form.validate().unwrap_err();
        assert_eq!(errors.fields().collect::<Vec<_>>(), vec!["last_name"]);
    }

    #[test]
    fn test_profile_form_trims_and_drops_empty() {
        let form = ProfileForm {
            first_name: " Awa ".into(),
            last_name: "Koné".into(),
            phone: "".into(),
            specialization: "Obstétrique".into(),
            bio: "   ".into(),
        };
        let update = form.validate().unwrap();
        assert_eq!(update.first_name.as_deref(), Some("Awa"));
        assert!(update.phone.is_none());
        assert!(update.bio.is_none());
    }

    #[test]
    fn test_patient_form_valid() {
        let input = valid_patient().validate(today()).unwrap();
        assert_eq!(input.gender, Some(Gender::Female));
        assert_eq!(input.date_of_birth, NaiveDate::from_ymd_opt(1995, 4, 12));
        assert_eq!(input.city.as_deref(), Some("Bonoua"));
        assert!(input.email.is_none());
    }

    #[test]
    fn test_patient_form_rejects_future_birth_date() {
        let form = PatientForm {
            date_of_birth: "2030-01-01".into(),
            ..valid_patient()
        };
        let errors = form.validate(today()).unwrap_err();
        assert_eq!(errors.get("date_of_birth"), Some(MSG_DATE_FUTURE));
    }

    #[test]
    fn test_patient_form_field_errors() {
        let form = PatientForm {
            first_name: "".into(),
            gender: "X".into(),
            date_of_birth: "12/04/1995".into(),
            email: "nope".into(),
            height: "abc".into(),
            weight: "62,5".into(),
            ..valid_patient()
        };
        let errors = form.validate(today()).unwrap_err();
        assert_eq!(errors.get("first_name"), Some(MSG_REQUIRED));
        assert_eq!(errors.get("gender"), Some(MSG_REQUIRED));
        assert_eq!(errors.get("date_of_birth"), Some(MSG_DATE_INVALID));
        assert_eq!(errors.get("email"), Some(MSG_EMAIL_INVALID));
        assert_eq!(errors.get("height"), Some(MSG_NUMBER_INVALID));
        assert!(errors.get("weight").is_none());
    }

    #[test]
    fn test_validation_errors_serialize_as_map() {
        let errors = LoginForm::new("", "").validate().unwrap_err();
        let value = serde_json::to_value(&errors).unwrap();
        assert_eq!(value["email"], MSG_EMAIL_INVALID);
    }
}

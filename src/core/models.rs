//! Data-transfer shapes exchanged with the health-record API
//!
//! Records are owned by the backend. Derived values (age, BMI, gestational age,
//! risk flags) are computed server-side and passed through unchanged.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use std::collections::HashMap;

/// Staff or patient role attached to an account
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Role {
    Admin,
    Doctor,
    Midwife,
    CommunityAgent,
    Psychologist,
    Nurse,
    Patient,
}

impl Role {
    pub fn label(&self) -> &'static str {
        match self {
            Role::Admin => "Administrateur",
            Role::Doctor => "Médecin",
            Role::Midwife => "Sage-femme",
            Role::CommunityAgent => "Agent communautaire",
            Role::Psychologist => "Psychologue",
            Role::Nurse => "Infirmier(ère)",
            Role::Patient => "Patient",
        }
    }

    /// Staff roles allowed to manage patient records
    pub fn can_manage_patients(&self) -> bool {
        !matches!(self, Role::Patient | Role::Psychologist)
    }
}

/// Site an account is attached to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Location {
    GrandBassam,
    Bonoua,
    Both,
}

impl Location {
    pub fn label(&self) -> &'static str {
        match self {
            Location::GrandBassam => "Grand-Bassam",
            Location::Bonoua => "Bonoua",
            Location::Both => "Grand-Bassam & Bonoua",
        }
    }
}

/// Authenticated account as returned by `/auth/users/me/`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: i64,
    pub email: String,
    #[serde(default)]
    pub phone: String,
    pub first_name: String,
    pub last_name: String,
    #[serde(default)]
    pub full_name: String,
    pub role: Role,
    pub location: Location,
    #[serde(default)]
    pub specialization: Option<String>,
    #[serde(default)]
    pub license_number: Option<String>,
    #[serde(default)]
    pub is_2fa_enabled: bool,
    #[serde(default = "default_true")]
    pub is_active: bool,
    #[serde(default)]
    pub avatar: Option<String>,
    #[serde(default)]
    pub bio: Option<String>,
    #[serde(default)]
    pub last_login: Option<DateTime<Utc>>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

impl User {
    /// Name to display, falling back to first + last when the backend omits it
    pub fn display_name(&self) -> String {
        if self.full_name.trim().is_empty() {
            format!("{} {}", self.first_name, self.last_name)
                .trim()
                .to_string()
        } else {
            self.full_name.clone()
        }
    }

    /// Two-letter avatar placeholder
    pub fn initials(&self) -> String {
        self.first_name
            .chars()
            .take(1)
            .chain(self.last_name.chars().take(1))
            .flat_map(char::to_uppercase)
            .collect()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Gender {
    #[serde(rename = "M")]
    Male,
    #[serde(rename = "F")]
    Female,
}

impl Gender {
    pub fn label(&self) -> &'static str {
        match self {
            Gender::Male => "Masculin",
            Gender::Female => "Féminin",
        }
    }

    pub fn code(&self) -> &'static str {
        match self {
            Gender::Male => "M",
            Gender::Female => "F",
        }
    }
}

/// Patient record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Patient {
    pub id: i64,
    pub patient_id: String,
    pub first_name: String,
    pub last_name: String,
    #[serde(default)]
    pub full_name: String,
    #[serde(default)]
    pub date_of_birth: Option<NaiveDate>,
    #[serde(default)]
    pub age: Option<u32>,
    pub gender: Gender,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub address: String,
    #[serde(default)]
    pub city: String,
    #[serde(default)]
    pub emergency_contact_name: String,
    #[serde(default)]
    pub emergency_contact_phone: String,
    #[serde(default)]
    pub emergency_contact_relation: String,
    #[serde(default)]
    pub blood_group: String,
    #[serde(default, deserialize_with = "decimal_opt")]
    pub height: Option<f64>,
    #[serde(default, deserialize_with = "decimal_opt")]
    pub weight: Option<f64>,
    #[serde(default, deserialize_with = "decimal_opt")]
    pub bmi: Option<f64>,
    #[serde(default)]
    pub marital_status: String,
    #[serde(default)]
    pub occupation: Option<String>,
    #[serde(default)]
    pub registration_location: String,
    #[serde(default = "default_true")]
    pub is_active: bool,
    #[serde(default)]
    pub notes: Option<String>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

impl Patient {
    pub fn display_name(&self) -> String {
        if self.full_name.trim().is_empty() {
            format!("{} {}", self.first_name, self.last_name)
        } else {
            self.full_name.clone()
        }
    }
}

/// Fields sent when creating or updating a patient.
///
/// Every field is optional so the same shape serves partial updates.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PatientInput {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date_of_birth: Option<NaiveDate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gender: Option<Gender>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub emergency_contact_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub emergency_contact_phone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub emergency_contact_relation: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub blood_group: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub height: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub weight: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub marital_status: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub occupation: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub registration_location: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_active: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PregnancyStatus {
    Ongoing,
    Completed,
    Miscarriage,
    Abortion,
}

impl PregnancyStatus {
    pub fn label(&self) -> &'static str {
        match self {
            PregnancyStatus::Ongoing => "En cours",
            PregnancyStatus::Completed => "Terminée",
            PregnancyStatus::Miscarriage => "Fausse couche",
            PregnancyStatus::Abortion => "Interruption",
        }
    }

    pub fn as_query(&self) -> &'static str {
        match self {
            PregnancyStatus::Ongoing => "ONGOING",
            PregnancyStatus::Completed => "COMPLETED",
            PregnancyStatus::Miscarriage => "MISCARRIAGE",
            PregnancyStatus::Abortion => "ABORTION",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RiskLevel {
    Low,
    Medium,
    High,
}

impl RiskLevel {
    pub fn label(&self) -> &'static str {
        match self {
            RiskLevel::Low => "Faible",
            RiskLevel::Medium => "Moyen",
            RiskLevel::High => "Élevé",
        }
    }

    pub fn as_query(&self) -> &'static str {
        match self {
            RiskLevel::Low => "LOW",
            RiskLevel::Medium => "MEDIUM",
            RiskLevel::High => "HIGH",
        }
    }
}

/// Pregnancy follow-up record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Pregnancy {
    pub id: i64,
    pub patient: i64,
    #[serde(default)]
    pub patient_name: String,
    pub pregnancy_number: u32,
    #[serde(default)]
    pub parity: u32,
    pub last_menstrual_period: NaiveDate,
    pub expected_delivery_date: NaiveDate,
    #[serde(default)]
    pub actual_delivery_date: Option<NaiveDate>,
    pub status: PregnancyStatus,
    pub risk_level: RiskLevel,
    #[serde(default)]
    pub blood_group_verified: bool,
    #[serde(default)]
    pub rh_factor: Option<String>,
    #[serde(default)]
    pub has_diabetes: bool,
    #[serde(default)]
    pub has_hypertension: bool,
    #[serde(default)]
    pub has_anemia: bool,
    #[serde(default)]
    pub other_risks: Option<String>,
    #[serde(default)]
    pub assigned_midwife: Option<i64>,
    #[serde(default)]
    pub assigned_midwife_name: Option<String>,
    #[serde(default)]
    pub notes: Option<String>,
    #[serde(default)]
    pub gestational_age_weeks: Option<u32>,
    #[serde(default)]
    pub gestational_age_display: Option<String>,
    #[serde(default)]
    pub trimester: Option<u8>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CpnType {
    #[serde(rename = "CPN1")]
    Cpn1,
    #[serde(rename = "CPN2")]
    Cpn2,
    #[serde(rename = "CPN3")]
    Cpn3,
    #[serde(rename = "CPN4")]
    Cpn4,
    #[serde(rename = "CPN_EXTRA")]
    Extra,
}

impl CpnType {
    pub fn label(&self) -> &'static str {
        match self {
            CpnType::Cpn1 => "CPN 1",
            CpnType::Cpn2 => "CPN 2",
            CpnType::Cpn3 => "CPN 3",
            CpnType::Cpn4 => "CPN 4",
            CpnType::Extra => "CPN supplémentaire",
        }
    }
}

/// Prenatal consultation (CPN) record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CpnConsultation {
    pub id: i64,
    pub pregnancy: i64,
    #[serde(default)]
    pub patient_name: String,
    pub cpn_type: CpnType,
    pub consultation_date: NaiveDate,
    pub gestational_age_weeks: u32,
    #[serde(deserialize_with = "decimal")]
    pub weight: f64,
    pub blood_pressure_systolic: u32,
    pub blood_pressure_diastolic: u32,
    #[serde(default, deserialize_with = "decimal_opt")]
    pub temperature: Option<f64>,
    #[serde(default, deserialize_with = "decimal_opt")]
    pub fundal_height: Option<f64>,
    #[serde(default)]
    pub fetal_heart_rate: Option<u32>,
    #[serde(default, deserialize_with = "decimal_opt")]
    pub hemoglobin: Option<f64>,
    #[serde(default, deserialize_with = "decimal_opt")]
    pub glucose: Option<f64>,
    #[serde(default)]
    pub protein_in_urine: bool,
    #[serde(default)]
    pub hiv_test_done: bool,
    #[serde(default)]
    pub hiv_test_result: Option<String>,
    #[serde(default)]
    pub syphilis_test_done: bool,
    #[serde(default)]
    pub syphilis_test_result: Option<String>,
    #[serde(default)]
    pub iron_supplement_given: bool,
    #[serde(default)]
    pub folic_acid_given: bool,
    #[serde(default)]
    pub antimalarial_given: bool,
    #[serde(default)]
    pub tetanus_vaccine_given: bool,
    #[serde(default)]
    pub next_appointment_date: Option<NaiveDate>,
    #[serde(default)]
    pub next_cpn_type: Option<String>,
    #[serde(default)]
    pub conducted_by: Option<i64>,
    #[serde(default)]
    pub conducted_by_name: Option<String>,
    #[serde(default)]
    pub complaints: Option<String>,
    #[serde(default)]
    pub examination_findings: Option<String>,
    #[serde(default)]
    pub diagnosis: Option<String>,
    #[serde(default)]
    pub treatment_plan: Option<String>,
    #[serde(default)]
    pub referral_needed: bool,
    #[serde(default)]
    pub referral_reason: Option<String>,
    #[serde(default)]
    pub notes: Option<String>,
    #[serde(default)]
    pub is_high_blood_pressure: bool,
    #[serde(default)]
    pub is_anemic: bool,
    #[serde(default, deserialize_with = "decimal_opt")]
    pub bmi: Option<f64>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

impl CpnConsultation {
    pub fn blood_pressure(&self) -> String {
        format!(
            "{}/{}",
            self.blood_pressure_systolic, self.blood_pressure_diastolic
        )
    }
}

// ============================================================================
// Auth request/response shapes
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoginResponse {
    pub access: String,
    pub refresh: String,
    pub user: User,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RefreshRequest {
    pub refresh: String,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct RefreshResponse {
    pub access: String,
    /// Present only when the backend rotates refresh tokens
    #[serde(default)]
    pub refresh: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RegisterRequest {
    pub email: String,
    pub phone: String,
    pub first_name: String,
    pub last_name: String,
    pub role: Role,
    pub location: Location,
    pub password: String,
    pub password_confirm: String,
}

/// Editable profile fields; omitted fields are left untouched
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ProfileUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub specialization: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bio: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChangePasswordRequest {
    pub old_password: String,
    pub new_password: String,
    pub new_password_confirm: String,
}

// ============================================================================
// Statistics
// ============================================================================

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PatientStats {
    #[serde(default)]
    pub total: u64,
    #[serde(default)]
    pub by_gender: HashMap<String, u64>,
    #[serde(default)]
    pub by_city: HashMap<String, u64>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PregnancyStats {
    #[serde(default)]
    pub total: u64,
    #[serde(default)]
    pub ongoing: u64,
    #[serde(default)]
    pub high_risk: u64,
    #[serde(default)]
    pub medium_risk: u64,
    #[serde(default)]
    pub low_risk: u64,
    #[serde(default)]
    pub due_this_month: u64,
    #[serde(default)]
    pub completed_this_year: u64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ConsultationStats {
    #[serde(default)]
    pub total: u64,
    #[serde(default)]
    pub by_type: HashMap<String, u64>,
    #[serde(default)]
    pub high_blood_pressure: u64,
    #[serde(default)]
    pub anemic: u64,
    #[serde(default)]
    pub hiv_positive: u64,
    #[serde(default)]
    pub referrals_needed: u64,
}

// ============================================================================
// List query parameters
// ============================================================================

/// Filters accepted by `GET /patients/`
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PatientQuery {
    pub search: Option<String>,
    pub gender: Option<Gender>,
    pub city: Option<String>,
    pub is_active: Option<bool>,
    pub blood_group: Option<String>,
    pub ordering: Option<String>,
}

impl PatientQuery {
    pub fn search(term: impl Into<String>) -> Self {
        Self {
            search: Some(term.into()),
            ..Self::default()
        }
    }

    pub fn to_params(&self) -> Vec<(String, String)> {
        let mut params = Vec::new();
        push_non_empty(&mut params, "search", self.search.as_deref());
        if let Some(gender) = self.gender {
            params.push(("gender".into(), gender.code().into()));
        }
        push_non_empty(&mut params, "city", self.city.as_deref());
        if let Some(active) = self.is_active {
            params.push(("is_active".into(), active.to_string()));
        }
        push_non_empty(&mut params, "blood_group", self.blood_group.as_deref());
        push_non_empty(&mut params, "ordering", self.ordering.as_deref());
        params
    }
}

/// Filters accepted by `GET /cpn/pregnancies/`
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PregnancyQuery {
    pub search: Option<String>,
    pub status: Option<PregnancyStatus>,
    pub risk_level: Option<RiskLevel>,
    pub patient: Option<i64>,
}

impl PregnancyQuery {
    pub fn to_params(&self) -> Vec<(String, String)> {
        let mut params = Vec::new();
        push_non_empty(&mut params, "search", self.search.as_deref());
        if let Some(status) = self.status {
            params.push(("status".into(), status.as_query().into()));
        }
        if let Some(risk) = self.risk_level {
            params.push(("risk_level".into(), risk.as_query().into()));
        }
        if let Some(patient) = self.patient {
            params.push(("patient".into(), patient.to_string()));
        }
        params
    }
}

/// Filters accepted by `GET /cpn/consultations/`
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ConsultationQuery {
    pub pregnancy: Option<i64>,
    pub cpn_type: Option<CpnType>,
}

impl ConsultationQuery {
    pub fn for_pregnancy(id: i64) -> Self {
        Self {
            pregnancy: Some(id),
            cpn_type: None,
        }
    }

    pub fn to_params(&self) -> Vec<(String, String)> {
        let mut params = Vec::new();
        if let Some(pregnancy) = self.pregnancy {
            params.push(("pregnancy".into(), pregnancy.to_string()));
        }
        if let Some(cpn_type) = self.cpn_type {
            if let Ok(serde_json::Value::String(code)) = serde_json::to_value(cpn_type) {
                params.push(("cpn_type".into(), code));
            }
        }
        params
    }
}

fn push_non_empty(params: &mut Vec<(String, String)>, key: &str, value: Option<&str>) {
    if let Some(v) = value.map(str::trim).filter(|v| !v.is_empty()) {
        params.push((key.to_string(), v.to_string()));
    }
}

fn default_true() -> bool {
    true
}

/// Accepts a decimal encoded either as a JSON number or as a string
#[derive(Deserialize)]
#[serde(untagged)]
enum NumberOrString {
    Number(f64),
    Text(String),
}

impl NumberOrString {
    fn into_f64<E: serde::de::Error>(self) -> Result<f64, E> {
        match self {
            NumberOrString::Number(n) => Ok(n),
            NumberOrString::Text(s) => s
                .trim()
                .parse()
                .map_err(|_| E::custom(format!("invalid decimal: {s}"))),
        }
    }
}

fn decimal<'de, D: Deserializer<'de>>(deserializer: D) -> Result<f64, D::Error> {
    NumberOrString::deserialize(deserializer)?.into_f64()
}

fn decimal_opt<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<f64>, D::Error> {
    match Option::<NumberOrString>::deserialize(deserializer)? {
        None => Ok(None),
        Some(NumberOrString::Text(s)) if s.trim().is_empty() => Ok(None),
        Some(value) => value.into_f64().map(Some),
    }
}

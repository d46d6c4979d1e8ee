//! Pregnancy follow-up and prenatal consultation (CPN) endpoints

use super::{ApiClient, ApiRequest, ListResponse, Transport};
use crate::core::error::ApiError;
use crate::core::models::{
    ConsultationQuery, ConsultationStats, CpnConsultation, Pregnancy, PregnancyQuery,
    PregnancyStats,
};
use crate::core::storage::TokenStorage;

impl<T: Transport, S: TokenStorage> ApiClient<T, S> {
    /// `GET /cpn/pregnancies/`
    pub async fn list_pregnancies(
        &self,
        query: &PregnancyQuery,
    ) -> Result<Vec<Pregnancy>, ApiError> {
        let list: ListResponse<Pregnancy> = self
            .send(ApiRequest::get("/cpn/pregnancies/").query(query.to_params()))
            .await?;
        Ok(list.into_items())
    }

    /// `GET /cpn/pregnancies/{id}/`
    pub async fn get_pregnancy(&self, id: i64) -> Result<Pregnancy, ApiError> {
        self.send(ApiRequest::get(format!("/cpn/pregnancies/{id}/")))
            .await
    }

    /// `GET /cpn/pregnancies/stats/`
    pub async fn pregnancy_stats(&self) -> Result<PregnancyStats, ApiError> {
        self.send(ApiRequest::get("/cpn/pregnancies/stats/")).await
    }

    /// `GET /cpn/consultations/`
    pub async fn list_consultations(
        &self,
        query: &ConsultationQuery,
    ) -> Result<Vec<CpnConsultation>, ApiError> {
        let list: ListResponse<CpnConsultation> = self
            .send(ApiRequest::get("/cpn/consultations/").query(query.to_params()))
            .await?;
        Ok(list.into_items())
    }

    /// `GET /cpn/consultations/stats/`
    pub async fn consultation_stats(&self) -> Result<ConsultationStats, ApiError> {
        self.send(ApiRequest::get("/cpn/consultations/stats/")).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::config::ClientConfig;
    use crate::core::models::{PregnancyStatus, RiskLevel};
    use crate::core::session::SessionStore;
    use crate::core::storage::MemoryStorage;
    use crate::core::test_support::{MockTransport, sample_user};
    use serde_json::json;
    use std::sync::Arc;

    fn client(transport: MockTransport) -> ApiClient<MockTransport, MemoryStorage> {
        let client = ApiClient::new(
            transport,
            Arc::new(SessionStore::new(MemoryStorage::new())),
            ClientConfig::new("http://api.test"),
        );
        client.session().login(sample_user(), "t1", "t2").unwrap();
        client
    }

    fn pregnancy_json() -> serde_json::Value {
        json!({
            "id": 2,
            "patient": 1,
            "patient_name": "Mariam Touré",
            "pregnancy_number": 2,
            "parity": 1,
            "last_menstrual_period": "2025-01-05",
            "expected_delivery_date": "2025-10-12",
            "status": "ONGOING",
            "risk_level": "HIGH",
            "has_hypertension": true,
            "gestational_age_weeks": 21,
            "gestational_age_display": "21 SA + 3 j",
            "trimester": 2
        })
    }

    #[tokio::test]
    async fn test_list_pregnancies_with_filters() {
        let client = client(MockTransport::with_json(200, json!([pregnancy_json()])));

        let query = PregnancyQuery {
            status: Some(PregnancyStatus::Ongoing),
            ..Default::default()
        };
        let pregnancies = client.list_pregnancies(&query).await.unwrap();

        assert_eq!(pregnancies.len(), 1);
        assert_eq!(pregnancies[0].risk_level, RiskLevel::High);
        assert_eq!(pregnancies[0].gestational_age_display.as_deref(), Some("21 SA + 3 j"));
        let sent = &client.transport().requests()[0];
        assert_eq!(sent.url, "http://api.test/cpn/pregnancies/");
        assert_eq!(sent.query, vec![("status".to_string(), "ONGOING".to_string())]);
    }

    #[tokio::test]
    async fn test_get_pregnancy_and_consultations() {
        let transport = MockTransport::new();
        transport.push_json(200, pregnancy_json());
        transport.push_json(
            200,
            json!([{
                "id": 10,
                "pregnancy": 2,
                "cpn_type": "CPN1",
                "consultation_date": "2025-02-10",
                "gestational_age_weeks": 12,
                "weight": "60.50",
                "blood_pressure_systolic": 120,
                "blood_pressure_diastolic": 80
            }]),
        );
        let client = client(transport);

        let pregnancy = client.get_pregnancy(2).await.unwrap();
        let consultations = client
            .list_consultations(&ConsultationQuery::for_pregnancy(pregnancy.id))
            .await
            .unwrap();

        assert_eq!(consultations[0].weight, 60.5);
        let requests = client.transport().requests();
        assert_eq!(requests[0].url, "http://api.test/cpn/pregnancies/2/");
        assert_eq!(requests[1].url, "http://api.test/cpn/consultations/");
        assert_eq!(requests[1].query, vec![("pregnancy".to_string(), "2".to_string())]);
    }

    #[tokio::test]
    async fn test_stats_endpoints() {
        let transport = MockTransport::new();
        transport.push_json(
            200,
            json!({ "total": 30, "ongoing": 24, "high_risk": 8, "due_this_month": 3 }),
        );
        transport.push_json(200, json!({ "total": 156, "by_type": { "CPN1": 60 } }));
        let client = client(transport);

        let pregnancies = client.pregnancy_stats().await.unwrap();
        let consultations = client.consultation_stats().await.unwrap();

        assert_eq!(pregnancies.ongoing, 24);
        assert_eq!(pregnancies.completed_this_year, 0);
        assert_eq!(consultations.by_type.get("CPN1"), Some(&60));
    }
}

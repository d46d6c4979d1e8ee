//! Patient record endpoints

use super::{ApiClient, ApiRequest, ListResponse, Transport};
use crate::core::error::ApiError;
use crate::core::models::{Patient, PatientInput, PatientQuery, PatientStats};
use crate::core::storage::TokenStorage;

impl<T: Transport, S: TokenStorage> ApiClient<T, S> {
    /// `GET /patients/`
    pub async fn list_patients(&self, query: &PatientQuery) -> Result<Vec<Patient>, ApiError> {
        let list: ListResponse<Patient> = self
            .send(ApiRequest::get("/patients/").query(query.to_params()))
            .await?;
        Ok(list.into_items())
    }

    /// `GET /patients/{id}/`
    pub async fn get_patient(&self, id: i64) -> Result<Patient, ApiError> {
        self.send(ApiRequest::get(format!("/patients/{id}/"))).await
    }

    /// `POST /patients/`
    pub async fn create_patient(&self, input: &PatientInput) -> Result<Patient, ApiError> {
        self.send(ApiRequest::post("/patients/").json(input)?).await
    }

    /// `PUT /patients/{id}/`
    pub async fn update_patient(&self, id: i64, input: &PatientInput) -> Result<Patient, ApiError> {
        self.send(ApiRequest::put(format!("/patients/{id}/")).json(input)?)
            .await
    }

    /// `DELETE /patients/{id}/`
    pub async fn delete_patient(&self, id: i64) -> Result<(), ApiError> {
        self.send_empty(ApiRequest::delete(format!("/patients/{id}/")))
            .await
    }

    /// `GET /patients/stats/`
    pub async fn patient_stats(&self) -> Result<PatientStats, ApiError> {
        self.send(ApiRequest::get("/patients/stats/")).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::api::Method;
    use crate::core::config::ClientConfig;
    use crate::core::models::Gender;
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

    fn patient_json(id: i64) -> serde_json::Value {
        json!({
            "id": id,
            "patient_id": format!("PAT-{id:04}"),
            "first_name": "Mariam",
            "last_name": "Touré",
            "full_name": "Mariam Touré",
            "gender": "F",
            "city": "Bonoua"
        })
    }

    #[tokio::test]
    async fn test_list_patients_with_filters() {
        let client = client(MockTransport::with_json(
            200,
            json!([patient_json(1), patient_json(2)]),
        ));

        let query = PatientQuery {
            search: Some("Touré".into()),
            gender: Some(Gender::Female),
            ..Default::default()
        };
        let patients = client.list_patients(&query).await.unwrap();

        assert_eq!(patients.len(), 2);
        assert_eq!(patients[1].patient_id, "PAT-0002");
        let sent = &client.transport().requests()[0];
        assert_eq!(sent.url, "http://api.test/patients/");
        assert_eq!(
            sent.query,
            vec![
                ("search".to_string(), "Touré".to_string()),
                ("gender".to_string(), "F".to_string()),
            ]
        );
    }

    #[tokio::test]
    async fn test_list_patients_paginated() {
        let client = client(MockTransport::with_json(
            200,
            json!({ "count": 1, "next": null, "previous": null, "results": [patient_json(9)] }),
        ));

        let patients = client.list_patients(&PatientQuery::default()).await.unwrap();
        assert_eq!(patients.len(), 1);
        assert_eq!(patients[0].id, 9);
    }

    #[tokio::test]
    async fn test_get_patient_path() {
        let client = client(MockTransport::with_json(200, patient_json(5)));
        let patient = client.get_patient(5).await.unwrap();

        assert_eq!(patient.display_name(), "Mariam Touré");
        assert_eq!(
            client.transport().requests()[0].url,
            "http://api.test/patients/5/"
        );
    }

    #[tokio::test]
    async fn test_create_and_update_patient() {
        let transport = MockTransport::new();
        transport.push_json(201, patient_json(3));
        transport.push_json(200, patient_json(3));
        let client = client(transport);

        let input = PatientInput {
            first_name: Some("Mariam".into()),
            ..Default::default()
        };
        client.create_patient(&input).await.unwrap();
        client.update_patient(3, &input).await.unwrap();

        let requests = client.transport().requests();
        assert_eq!(requests[0].method, Method::Post);
        assert_eq!(requests[0].url, "http://api.test/patients/");
        assert_eq!(requests[1].method, Method::Put);
        assert_eq!(requests[1].url, "http://api.test/patients/3/");
        assert_eq!(requests[1].body.as_deref(), Some(r#"{"first_name":"Mariam"}"#));
    }

    #[tokio::test]
    async fn test_delete_patient_accepts_no_content() {
        let transport = MockTransport::new();
        transport.push_status(204, "");
        let client = client(transport);

        client.delete_patient(4).await.unwrap();
        let sent = &client.transport().requests()[0];
        assert_eq!(sent.method, Method::Delete);
        assert_eq!(sent.url, "http://api.test/patients/4/");
    }

    #[tokio::test]
    async fn test_patient_stats_total() {
        let client = client(MockTransport::with_json(200, json!({ "total": 42 })));
        let stats = client.patient_stats().await.unwrap();
        assert_eq!(stats.total, 42);
    }
}

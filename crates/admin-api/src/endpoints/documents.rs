use admin_core::models::DocumentDto;
use serde::Serialize;
use serde_json::Value;

use super::encode_segment;
use crate::client::ApiClient;
use crate::error::ApiError;

pub struct Documents<'a> {
    client: &'a ApiClient,
}

impl ApiClient {
    pub fn documents(&self) -> Documents<'_> {
        Documents { client: self }
    }
}

impl Documents<'_> {
    /// Documents the signed-in user may read.
    pub async fn accessible(&self) -> Result<Vec<DocumentDto>, ApiError> {
        self.client.get("/api/documents").await
    }

    pub async fn get(&self, id: i64) -> Result<DocumentDto, ApiError> {
        self.client.get(&format!("/api/documents/{id}")).await
    }

    pub async fn create<B: Serialize + ?Sized>(&self, document: &B) -> Result<DocumentDto, ApiError> {
        self.client.post("/api/documents", document).await
    }

    pub async fn update<B: Serialize + ?Sized>(
        &self,
        id: i64,
        document: &B,
    ) -> Result<DocumentDto, ApiError> {
        self.client.put(&format!("/api/documents/{id}"), document).await
    }

    pub async fn delete(&self, id: i64) -> Result<(), ApiError> {
        self.client.delete(&format!("/api/documents/{id}")).await
    }

    pub async fn by_stage(&self, stage: &str) -> Result<Vec<DocumentDto>, ApiError> {
        self.client
            .get(&format!("/api/documents/by-stage/{}", encode_segment(stage)))
            .await
    }

    pub async fn by_location(&self, location_id: i64) -> Result<Vec<DocumentDto>, ApiError> {
        self.client
            .get(&format!("/api/documents/by-location/{location_id}"))
            .await
    }

    /// Attach a file to document `id`. The response shape is server-defined.
    pub async fn upload(&self, id: i64, file_name: &str, bytes: Vec<u8>) -> Result<Value, ApiError> {
        self.client
            .upload(&format!("/api/documents/{id}/upload"), file_name, bytes)
            .await
    }

    /// Raw file contents of document `id`.
    pub async fn download(&self, id: i64) -> Result<Vec<u8>, ApiError> {
        self.client
            .download(&format!("/api/documents/{id}/download"))
            .await
    }
}

#[cfg(test)]
mod tests {
    use crate::client::tests::{make_client, ScriptedTransport};
    use crate::error::ErrorKind;
    use crate::transport::RequestBody;

    #[tokio::test]
    async fn test_by_stage_and_by_location() {
        let transport = ScriptedTransport::new();
        transport.respond(200, r#"[{"id":1,"title":"Rule of Life"}]"#);
        transport.respond(200, "[]");
        let (client, _session, _rx) = make_client(&transport);

        let docs = client.documents().by_stage("NOVITIATE").await.unwrap();
        assert_eq!(docs[0].title.as_deref(), Some("Rule of Life"));
        assert_eq!(
            transport.last_request().path,
            "/api/documents/by-stage/NOVITIATE"
        );

        client.documents().by_location(3).await.unwrap();
        assert_eq!(
            transport.last_request().path,
            "/api/documents/by-location/3"
        );
    }

    #[tokio::test]
    async fn test_upload_sends_multipart_file_field() {
        let transport = ScriptedTransport::new();
        transport.respond(200, r#"{"id":2,"fileName":"notes.txt"}"#);
        let (client, _session, _rx) = make_client(&transport);

        let resp = client
            .documents()
            .upload(2, "notes.txt", b"hello".to_vec())
            .await
            .unwrap();
        assert_eq!(resp["fileName"], "notes.txt");

        let req = transport.last_request();
        assert_eq!(req.path, "/api/documents/2/upload");
        assert!(matches!(req.body, RequestBody::Multipart { ref field, .. } if field == "file"));
    }

    #[tokio::test]
    async fn test_download_missing_document() {
        let transport = ScriptedTransport::new();
        transport.respond(404, r#"{"message":"Document not found"}"#);
        let (client, _session, _rx) = make_client(&transport);

        let err = client.documents().download(99).await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Validation);
        assert_eq!(err.message, "Document not found");
    }
}

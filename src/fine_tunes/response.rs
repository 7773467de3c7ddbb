use super::*;

/// Describes a fine-tune job. Returned when creating, retrieving or cancelling a job, and as an
/// entry of [`FineTunesResponse`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FineTune {
    pub id: String,
    pub object: String,
    pub created_at: u64,
    pub updated_at: u64,
    pub model: String,
    // null until the job succeeds
    #[serde(default)]
    pub fine_tuned_model: Option<String>,
    pub organization_id: String,
    pub status: String,
    #[serde(default)]
    pub hyperparams: Option<serde_json::Value>,
    #[serde(default)]
    pub training_files: Vec<File>,
    #[serde(default)]
    pub validation_files: Vec<File>,
    #[serde(default)]
    pub result_files: Vec<File>,
    // Present when retrieving a single job, absent from listings.
    #[serde(default)]
    pub events: Vec<FineTuneEvent>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FineTuneEvent {
    pub object: String,
    pub created_at: u64,
    pub level: String,
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FineTunesResponse {
    pub object: String, // Will be "list"
    pub data: Vec<FineTune>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FineTuneEventsResponse {
    pub object: String, // Will be "list"
    pub data: Vec<FineTuneEvent>,
}

#[cfg(test)]
mod response_test {
    use super::*;

    #[test]
    fn pending_job() {
        let body = r#"{
            "id": "ft-AF1WoRqd3aJAHsqc9NY7iL8F",
            "object": "fine-tune",
            "model": "curie",
            "created_at": 1614807352,
            "events": [
                { "object": "fine-tune-event", "created_at": 1614807352, "level": "info",
                  "message": "Job enqueued. Waiting for jobs ahead to complete. Queue number: 0." }
            ],
            "fine_tuned_model": null,
            "hyperparams": { "batch_size": 4, "learning_rate_multiplier": 0.1, "n_epochs": 4, "prompt_loss_weight": 0.1 },
            "organization_id": "org-123",
            "result_files": [],
            "status": "pending",
            "validation_files": [],
            "training_files": [
                { "id": "file-XGinujblHPwGLSztz8cPS8XY", "object": "file", "bytes": 1547276,
                  "created_at": 1610062281, "filename": "my-data-train.jsonl", "purpose": "fine-tune-train" }
            ],
            "updated_at": 1614807352
        }"#;

        let job: FineTune = serde_json::from_str(body).unwrap();
        assert_eq!(job.status, "pending");
        assert_eq!(job.fine_tuned_model, None);
        assert_eq!(job.training_files[0].filename, "my-data-train.jsonl");
        assert_eq!(job.events.len(), 1);
        assert_eq!(job.hyperparams.unwrap()["n_epochs"], 4);
    }

    #[test]
    fn listing_without_events() {
        let body = r#"{
            "object": "list",
            "data": [{
                "id": "ft-1", "object": "fine-tune", "model": "curie", "created_at": 1,
                "updated_at": 2, "fine_tuned_model": "curie:ft-acme-2021-03-03", "organization_id": "org-123",
                "status": "succeeded", "hyperparams": null
            }]
        }"#;

        let jobs: FineTunesResponse = serde_json::from_str(body).unwrap();
        assert!(jobs.data[0].events.is_empty());
        assert!(jobs.data[0].hyperparams.is_none());
    }
}

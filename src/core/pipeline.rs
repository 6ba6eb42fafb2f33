use crate::core::extract::{has_rich_data, VesselDetails};
use crate::core::grouping::group_generic_details;
use crate::core::{coerce, ConfigProvider, Pipeline, Storage};
use crate::domain::model::{NormalizedBatch, NormalizedListing, RawPayload, VesselRecord};
use crate::utils::error::{NormalizerError, Result};
use reqwest::Client;
use serde_json::Value;
use std::io::Write;
use zip::write::{FileOptions, ZipWriter};

/// Runs the normalization engine over a batch of broker payloads: payload
/// files (or one API fetch) in, a ZIP of normalized listings out.
pub struct ListingPipeline<S: Storage, C: ConfigProvider> {
    storage: S,
    config: C,
    client: Client,
}

impl<S: Storage, C: ConfigProvider> ListingPipeline<S, C> {
    pub fn new(storage: S, config: C) -> Self {
        Self {
            storage,
            config,
            client: Client::new(),
        }
    }

    async fn fetch_api_records(&self) -> Result<Vec<VesselRecord>> {
        let mut records = Vec::new();

        tracing::debug!("Fetching listings from: {}", self.config.api_endpoint());
        let response = self.client.get(self.config.api_endpoint()).send().await?;
        tracing::debug!("API response status: {}", response.status());

        if response.status().is_success() {
            let json: Value = response.json().await?;
            collect_records(json, &mut records);
        } else {
            tracing::warn!(
                "⚠️ Broker API returned status {}, continuing with no records",
                response.status()
            );
        }

        Ok(records)
    }
}

fn collect_records(json: Value, records: &mut Vec<VesselRecord>) {
    match json {
        Value::Array(items) => {
            for item in items {
                if let Value::Object(payload) = item {
                    records.push(to_record(payload));
                }
            }
        }
        Value::Object(payload) => records.push(to_record(payload)),
        _ => {}
    }
}

fn to_record(payload: RawPayload) -> VesselRecord {
    let id = payload
        .get("id")
        .or_else(|| payload.get("vessel_id"))
        .and_then(coerce::text);
    VesselRecord { id, payload }
}

#[async_trait::async_trait]
impl<S: Storage, C: ConfigProvider> Pipeline for ListingPipeline<S, C> {
    async fn extract(&self) -> Result<Vec<VesselRecord>> {
        let mut records = Vec::new();

        for file in self.config.payload_files() {
            tracing::debug!("Reading payload file: {}", file);
            let bytes = self.storage.read_file(file).await?;
            let json: Value = serde_json::from_slice(&bytes)?;
            collect_records(json, &mut records);
        }

        if records.is_empty() {
            records = self.fetch_api_records().await?;
        }

        tracing::info!("📥 Extracted {} vessel payloads", records.len());
        Ok(records)
    }

    async fn transform(&self, data: Vec<VesselRecord>) -> Result<NormalizedBatch> {
        let mut listings = Vec::new();
        let mut skipped = Vec::new();

        let mut writer = csv::Writer::from_writer(Vec::new());
        writer.write_record(["vessel_id", "engines", "tonnage_points", "generic_sections"])?;

        for record in data {
            if !has_rich_data(&record.payload) {
                tracing::debug!(
                    "Skipping vessel {:?}: no recognizable structure",
                    record.id
                );
                skipped.push(record);
                continue;
            }

            let details = VesselDetails::extract(&record.payload);
            let generic = group_generic_details(&record.payload);

            writer.write_record([
                record.id.clone().unwrap_or_default(),
                details
                    .engines
                    .as_ref()
                    .map(|e| e.len())
                    .unwrap_or(0)
                    .to_string(),
                details
                    .tonnage_curve
                    .as_ref()
                    .map(|t| t.len())
                    .unwrap_or(0)
                    .to_string(),
                generic.len().to_string(),
            ])?;

            listings.push(NormalizedListing {
                id: record.id,
                details,
                generic,
            });
        }

        let summary_csv = String::from_utf8(writer.into_inner().map_err(|e| {
            NormalizerError::Processing {
                message: format!("CSV writer finalization failed: {}", e),
            }
        })?)
        .map_err(|e| NormalizerError::Processing {
            message: format!("Summary CSV was not valid UTF-8: {}", e),
        })?;

        tracing::info!(
            "🔄 Normalized {} listings, {} skipped by the rich-data gate",
            listings.len(),
            skipped.len()
        );

        Ok(NormalizedBatch {
            listings,
            summary_csv,
            skipped,
        })
    }

    async fn load(&self, batch: NormalizedBatch) -> Result<String> {
        let output_path = format!("{}/normalized_listings.zip", self.config.output_path());

        let zip_data = {
            let mut zip = ZipWriter::new(std::io::Cursor::new(Vec::new()));

            zip.start_file::<_, ()>("listings.json", FileOptions::default())?;
            let listings_json = serde_json::to_string_pretty(&batch.listings)?;
            zip.write_all(listings_json.as_bytes())?;

            zip.start_file::<_, ()>("summary.csv", FileOptions::default())?;
            zip.write_all(batch.summary_csv.as_bytes())?;

            if !batch.skipped.is_empty() {
                zip.start_file::<_, ()>("skipped.json", FileOptions::default())?;
                let skipped_json = serde_json::to_string_pretty(&batch.skipped)?;
                zip.write_all(skipped_json.as_bytes())?;
            }

            let cursor = zip.finish()?;
            cursor.into_inner()
        };

        tracing::debug!("Writing ZIP archive ({} bytes) to storage", zip_data.len());
        self.storage
            .write_file("normalized_listings.zip", &zip_data)
            .await?;

        Ok(output_path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use httpmock::prelude::*;
    use std::collections::HashMap;
    use std::sync::Arc;
    use tokio::sync::Mutex;

    #[derive(Clone)]
    struct MockStorage {
        files: Arc<Mutex<HashMap<String, Vec<u8>>>>,
    }

    impl MockStorage {
        fn new() -> Self {
            Self {
                files: Arc::new(Mutex::new(HashMap::new())),
            }
        }

        async fn put_file(&self, path: &str, data: &[u8]) {
            let mut files = self.files.lock().await;
            files.insert(path.to_string(), data.to_vec());
        }

        async fn get_file(&self, path: &str) -> Option<Vec<u8>> {
            let files = self.files.lock().await;
            files.get(path).cloned()
        }
    }

    impl Storage for MockStorage {
        async fn read_file(&self, path: &str) -> Result<Vec<u8>> {
            let files = self.files.lock().await;
            files.get(path).cloned().ok_or_else(|| {
                NormalizerError::Io(std::io::Error::new(
                    std::io::ErrorKind::NotFound,
                    format!("File not found: {}", path),
                ))
            })
        }

        async fn write_file(&self, path: &str, data: &[u8]) -> Result<()> {
            let mut files = self.files.lock().await;
            files.insert(path.to_string(), data.to_vec());
            Ok(())
        }
    }

    struct MockConfig {
        api_endpoint: String,
        output_path: String,
        payload_files: Vec<String>,
        concurrent_requests: usize,
    }

    impl MockConfig {
        fn new(api_endpoint: String) -> Self {
            Self {
                api_endpoint,
                output_path: "test_output".to_string(),
                payload_files: vec![],
                concurrent_requests: 5,
            }
        }

        fn with_files(api_endpoint: String, files: Vec<String>) -> Self {
            Self {
                payload_files: files,
                ..Self::new(api_endpoint)
            }
        }
    }

    impl ConfigProvider for MockConfig {
        fn api_endpoint(&self) -> &str {
            &self.api_endpoint
        }

        fn output_path(&self) -> &str {
            &self.output_path
        }

        fn payload_files(&self) -> &[String] {
            &self.payload_files
        }

        fn concurrent_requests(&self) -> usize {
            self.concurrent_requests
        }
    }

    fn dense_vessel() -> serde_json::Value {
        serde_json::json!({
            "id": "vessel-1",
            "main_engine_1": "Caterpillar 3508",
            "main_engine_1_hp": "800",
            "main_engine_1_hours": "4.250",
            "tonnage_2_50": "450",
            "tonnage_3_00": "610"
        })
    }

    fn bare_vessel() -> serde_json::Value {
        serde_json::json!({
            "id": "vessel-2",
            "_internal_flag": true,
            "status": "active"
        })
    }

    #[tokio::test]
    async fn extract_reads_payload_files_before_the_api() {
        let storage = MockStorage::new();
        let body = serde_json::to_vec(&serde_json::json!([dense_vessel()])).unwrap();
        storage.put_file("listings.json", &body).await;

        let config = MockConfig::with_files(
            "http://unused.invalid".to_string(),
            vec!["listings.json".to_string()],
        );
        let pipeline = ListingPipeline::new(storage, config);

        let records = pipeline.extract().await.unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].id.as_deref(), Some("vessel-1"));
    }

    #[tokio::test]
    async fn extract_falls_back_to_the_api() {
        let server = MockServer::start();
        let api_mock = server.mock(|when, then| {
            when.method(GET).path("/");
            then.status(200)
                .header("Content-Type", "application/json")
                .json_body(serde_json::json!([dense_vessel(), bare_vessel()]));
        });

        let storage = MockStorage::new();
        let config = MockConfig::new(server.url("/"));
        let pipeline = ListingPipeline::new(storage, config);

        let records = pipeline.extract().await.unwrap();
        api_mock.assert();
        assert_eq!(records.len(), 2);
    }

    #[tokio::test]
    async fn extract_wraps_a_single_object_response() {
        let server = MockServer::start();
        let api_mock = server.mock(|when, then| {
            when.method(GET).path("/");
            then.status(200)
                .header("Content-Type", "application/json")
                .json_body(dense_vessel());
        });

        let storage = MockStorage::new();
        let config = MockConfig::new(server.url("/"));
        let pipeline = ListingPipeline::new(storage, config);

        let records = pipeline.extract().await.unwrap();
        api_mock.assert();
        assert_eq!(records.len(), 1);
    }

    #[tokio::test]
    async fn extract_tolerates_api_failure() {
        let server = MockServer::start();
        let api_mock = server.mock(|when, then| {
            when.method(GET).path("/");
            then.status(500);
        });

        let storage = MockStorage::new();
        let config = MockConfig::new(server.url("/"));
        let pipeline = ListingPipeline::new(storage, config);

        let records = pipeline.extract().await.unwrap();
        api_mock.assert();
        assert!(records.is_empty());
    }

    #[tokio::test]
    async fn transform_separates_rich_and_bare_payloads() {
        let storage = MockStorage::new();
        let config = MockConfig::new("http://unused.invalid".to_string());
        let pipeline = ListingPipeline::new(storage, config);

        let mut records = Vec::new();
        collect_records(
            serde_json::json!([dense_vessel(), bare_vessel()]),
            &mut records,
        );

        let batch = pipeline.transform(records).await.unwrap();

        assert_eq!(batch.listings.len(), 1);
        assert_eq!(batch.skipped.len(), 1);
        assert_eq!(batch.skipped[0].id.as_deref(), Some("vessel-2"));

        let listing = &batch.listings[0];
        let engines = listing.details.engines.as_ref().unwrap();
        assert_eq!(engines[0].horsepower, Some(800.0));
        let curve = listing.details.tonnage_curve.as_ref().unwrap();
        assert_eq!(curve.len(), 2);

        let lines: Vec<&str> = batch.summary_csv.lines().collect();
        assert_eq!(lines[0], "vessel_id,engines,tonnage_points,generic_sections");
        assert!(lines[1].starts_with("vessel-1,1,2,"));
    }

    #[tokio::test]
    async fn load_writes_the_archive_with_expected_entries() {
        let storage = MockStorage::new();
        let config = MockConfig::new("http://unused.invalid".to_string());
        let pipeline = ListingPipeline::new(storage.clone(), config);

        let mut records = Vec::new();
        collect_records(
            serde_json::json!([dense_vessel(), bare_vessel()]),
            &mut records,
        );
        let batch = pipeline.transform(records).await.unwrap();

        let output_path = pipeline.load(batch).await.unwrap();
        assert_eq!(output_path, "test_output/normalized_listings.zip");

        let zip_bytes = storage.get_file("normalized_listings.zip").await.unwrap();
        let cursor = std::io::Cursor::new(zip_bytes);
        let mut archive = zip::ZipArchive::new(cursor).unwrap();

        let mut names: Vec<String> = (0..archive.len())
            .map(|i| archive.by_index(i).unwrap().name().to_string())
            .collect();
        names.sort();
        assert_eq!(names, vec!["listings.json", "skipped.json", "summary.csv"]);
    }

    #[tokio::test]
    async fn load_omits_skipped_file_when_nothing_was_skipped() {
        let storage = MockStorage::new();
        let config = MockConfig::new("http://unused.invalid".to_string());
        let pipeline = ListingPipeline::new(storage.clone(), config);

        let mut records = Vec::new();
        collect_records(serde_json::json!([dense_vessel()]), &mut records);
        let batch = pipeline.transform(records).await.unwrap();

        pipeline.load(batch).await.unwrap();

        let zip_bytes = storage.get_file("normalized_listings.zip").await.unwrap();
        let cursor = std::io::Cursor::new(zip_bytes);
        let archive = zip::ZipArchive::new(cursor).unwrap();
        assert_eq!(archive.len(), 2);
    }
}

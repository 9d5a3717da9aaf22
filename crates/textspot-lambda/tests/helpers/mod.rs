//! Test doubles and fixtures for handler tests

#![allow(dead_code)]

use async_trait::async_trait;
use aws_lambda_events::event::s3::S3Event;
use image::{DynamicImage, GenericImageView, ImageFormat, Rgb, RgbImage};
use serde_json::json;
use std::collections::{HashMap, VecDeque};
use std::io::Cursor;
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::{Arc, Mutex};
use tokio::time::Instant;

use textspot_core::{DetectorConfig, FetchPolicy};
use textspot_detection::{DetectionError, TextDetector};
use textspot_infra::{NotificationPublisher, PublishError};
use textspot_lambda::UploadTextDetector;
use textspot_storage::{ObjectStorage, StorageError, StorageResult};

pub const BUCKET: &str = "uploads";

/// In-memory object storage
#[derive(Default)]
pub struct MockStorage {
    objects: Mutex<HashMap<(String, String), Vec<u8>>>,
    downloads: Mutex<Vec<(String, String)>>,
    /// Number of `exists` probes that report the object missing before it
    /// becomes visible
    hidden_probes: u32,
    probes: AtomicU32,
    first_probe_at: Mutex<Option<Instant>>,
}

impl MockStorage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_hidden_probes(hidden_probes: u32) -> Self {
        Self {
            hidden_probes,
            ..Self::default()
        }
    }

    pub fn put(&self, bucket: &str, key: &str, data: Vec<u8>) {
        self.objects
            .lock()
            .unwrap()
            .insert((bucket.to_string(), key.to_string()), data);
    }

    pub fn downloads(&self) -> Vec<(String, String)> {
        self.downloads.lock().unwrap().clone()
    }

    pub fn probes(&self) -> u32 {
        self.probes.load(Ordering::SeqCst)
    }

    /// Runtime clock reading at the first `exists` call
    pub fn first_probe_at(&self) -> Option<Instant> {
        *self.first_probe_at.lock().unwrap()
    }
}

#[async_trait]
impl ObjectStorage for MockStorage {
    async fn download(&self, bucket: &str, key: &str) -> StorageResult<Vec<u8>> {
        self.downloads
            .lock()
            .unwrap()
            .push((bucket.to_string(), key.to_string()));
        self.objects
            .lock()
            .unwrap()
            .get(&(bucket.to_string(), key.to_string()))
            .cloned()
            .ok_or_else(|| StorageError::NotFound(key.to_string()))
    }

    async fn exists(&self, bucket: &str, key: &str) -> StorageResult<bool> {
        self.first_probe_at
            .lock()
            .unwrap()
            .get_or_insert_with(Instant::now);
        let seen = self.probes.fetch_add(1, Ordering::SeqCst);
        if seen < self.hidden_probes {
            return Ok(false);
        }
        Ok(self
            .objects
            .lock()
            .unwrap()
            .contains_key(&(bucket.to_string(), key.to_string())))
    }
}

/// Detector replaying a fixed script of responses, then reporting no text
#[derive(Default)]
pub struct ScriptedDetector {
    script: Mutex<VecDeque<Result<Vec<String>, DetectionError>>>,
    /// Dimensions of every image submitted, in call order
    submitted: Mutex<Vec<(u32, u32)>>,
}

impl ScriptedDetector {
    pub fn new(script: Vec<Result<Vec<String>, DetectionError>>) -> Self {
        Self {
            script: Mutex::new(script.into()),
            submitted: Mutex::new(Vec::new()),
        }
    }

    /// Detector that finds `text` on the `index`-th call and nothing before
    pub fn matching_at(index: usize, text: &str) -> Self {
        let mut script: Vec<Result<Vec<String>, DetectionError>> =
            (0..index).map(|_| Ok(vec!["NOISE".to_string()])).collect();
        script.push(Ok(vec!["HELLO".to_string(), text.to_string()]));
        Self::new(script)
    }

    pub fn calls(&self) -> usize {
        self.submitted.lock().unwrap().len()
    }

    pub fn submitted_dimensions(&self) -> Vec<(u32, u32)> {
        self.submitted.lock().unwrap().clone()
    }
}

#[async_trait]
impl TextDetector for ScriptedDetector {
    fn name(&self) -> &str {
        "scripted"
    }

    async fn detect_text(&self, image: Vec<u8>) -> Result<Vec<String>, DetectionError> {
        assert_eq!(
            image::guess_format(&image).unwrap(),
            ImageFormat::Jpeg,
            "detector must receive JPEG bytes"
        );
        let dimensions = image::load_from_memory(&image).unwrap().dimensions();
        self.submitted.lock().unwrap().push(dimensions);

        self.script
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Ok(Vec::new()))
    }
}

/// Publisher recording every message it is asked to send
#[derive(Default)]
pub struct RecordingPublisher {
    sent: Mutex<Vec<(String, String)>>,
    fail: bool,
}

impl RecordingPublisher {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Self::default()
        }
    }

    pub fn sent(&self) -> Vec<(String, String)> {
        self.sent.lock().unwrap().clone()
    }
}

#[async_trait]
impl NotificationPublisher for RecordingPublisher {
    async fn publish(&self, topic_arn: &str, message: &str) -> Result<Option<String>, PublishError> {
        if self.fail {
            return Err(PublishError::Failed {
                topic_arn: topic_arn.to_string(),
                reason: "AuthorizationError".to_string(),
            });
        }
        self.sent
            .lock()
            .unwrap()
            .push((topic_arn.to_string(), message.to_string()));
        Ok(Some("5f1b1f8e-0000-4000-8000-000000000000".to_string()))
    }
}

/// Wiring of one detector with its doubles
pub struct TestHarness {
    pub storage: Arc<MockStorage>,
    pub detector: Arc<ScriptedDetector>,
    pub publisher: Arc<RecordingPublisher>,
    pub handler: UploadTextDetector,
}

impl TestHarness {
    pub fn new(
        config: DetectorConfig,
        storage: MockStorage,
        detector: ScriptedDetector,
        publisher: RecordingPublisher,
    ) -> Self {
        let storage = Arc::new(storage);
        let detector = Arc::new(detector);
        let publisher = Arc::new(publisher);
        let handler = UploadTextDetector::new(
            config,
            storage.clone(),
            detector.clone(),
            publisher.clone(),
        );
        Self {
            storage,
            detector,
            publisher,
            handler,
        }
    }
}

/// Default configuration without any waiting
pub fn test_config() -> DetectorConfig {
    DetectorConfig {
        fetch: FetchPolicy::single_attempt(),
        ..DetectorConfig::default()
    }
}

/// PNG encoded test image of the given size
pub fn png_image(width: u32, height: u32) -> Vec<u8> {
    let img = DynamicImage::ImageRgb8(RgbImage::from_fn(width, height, |x, y| {
        Rgb([(x * 40) as u8, (y * 40) as u8, 128])
    }));
    let mut buffer = Vec::new();
    img.write_to(&mut Cursor::new(&mut buffer), ImageFormat::Png)
        .unwrap();
    buffer
}

fn record(bucket: &str, key: &str) -> serde_json::Value {
    json!({
        "eventVersion": "2.1",
        "eventSource": "aws:s3",
        "awsRegion": "us-east-1",
        "eventTime": "2026-10-16T12:00:00.000Z",
        "eventName": "ObjectCreated:Put",
        "userIdentity": { "principalId": "AWS:AIDAEXAMPLE" },
        "requestParameters": { "sourceIPAddress": "127.0.0.1" },
        "responseElements": {
            "x-amz-request-id": "C3D13FE58DE4C810",
            "x-amz-id-2": "FMyUVURIY8/IgAtTv8xRjskZQpcIZ9KG4V5Wp6S7S/JRWeUWerMUE5JgHvANOjpD"
        },
        "s3": {
            "s3SchemaVersion": "1.0",
            "configurationId": "upload-trigger",
            "bucket": {
                "name": bucket,
                "ownerIdentity": { "principalId": "A3NL1KOZZKExample" },
                "arn": format!("arn:aws:s3:::{}", bucket)
            },
            "object": {
                "key": key,
                "size": 1024,
                "eTag": "d41d8cd98f00b204e9800998ecf8427e",
                "sequencer": "0055AED6DCD90281E5"
            }
        }
    })
}

/// S3 put notification with one record per (bucket, key) pair
pub fn s3_event(objects: &[(&str, &str)]) -> S3Event {
    let records: Vec<serde_json::Value> = objects
        .iter()
        .map(|(bucket, key)| record(bucket, key))
        .collect();
    serde_json::from_value(json!({ "Records": records })).unwrap()
}

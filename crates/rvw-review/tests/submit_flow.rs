//! Upload orchestration against a recording fake backend.

use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use pretty_assertions::assert_eq;
use rvw_client::ApiError;
use rvw_core::entities::{PresignRequest, PresignResponse, PresignedFile, ReviewStarted};
use rvw_core::enums::ReviewStatus;
use rvw_review::{UploadBackend, UploadError, UploadFile, UploadSession};

#[derive(Debug, Clone, PartialEq)]
enum Call {
    Presign(PresignRequest),
    Put {
        url: String,
        body: Vec<u8>,
        content_type: String,
    },
    Start(String),
}

#[derive(Default)]
struct FakeBackend {
    calls: Mutex<Vec<Call>>,
    in_flight: AtomicUsize,
    peak_in_flight: AtomicUsize,
    reject_upload_of: Option<&'static str>,
    drop_last_slot: bool,
    presign_error: Option<fn() -> ApiError>,
}

impl FakeBackend {
    fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    fn puts(&self) -> Vec<(String, Vec<u8>, String)> {
        self.calls()
            .into_iter()
            .filter_map(|c| match c {
                Call::Put {
                    url,
                    body,
                    content_type,
                } => Some((url, body, content_type)),
                _ => None,
            })
            .collect()
    }

    fn peak_in_flight(&self) -> usize {
        self.peak_in_flight.load(Ordering::SeqCst)
    }

    fn started(&self) -> bool {
        self.calls().iter().any(|c| matches!(c, Call::Start(_)))
    }
}

#[async_trait]
impl UploadBackend for FakeBackend {
    async fn presign(&self, request: &PresignRequest) -> Result<PresignResponse, ApiError> {
        self.calls.lock().unwrap().push(Call::Presign(request.clone()));
        if let Some(make_error) = self.presign_error {
            return Err(make_error());
        }
        let mut files: Vec<_> = request
            .filenames
            .iter()
            .enumerate()
            .map(|(i, name)| PresignedFile {
                filename: name.clone(),
                upload_url: format!("https://bucket.test/slot-{i}"),
                storage_key: format!("reviews/r-1/{name}"),
            })
            .collect();
        if self.drop_last_slot {
            files.pop();
        }
        Ok(PresignResponse {
            review_id: "r-1".into(),
            files,
            expires_in: 900,
        })
    }

    async fn put_object(
        &self,
        slot: &PresignedFile,
        body: Vec<u8>,
        content_type: &str,
    ) -> Result<(), ApiError> {
        self.calls.lock().unwrap().push(Call::Put {
            url: slot.upload_url.clone(),
            body,
            content_type: content_type.into(),
        });

        let now = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        self.peak_in_flight.fetch_max(now, Ordering::SeqCst);
        tokio::task::yield_now().await;
        self.in_flight.fetch_sub(1, Ordering::SeqCst);

        if self.reject_upload_of == Some(slot.filename.as_str()) {
            return Err(ApiError::Upload {
                status: 403,
                filename: slot.filename.clone(),
            });
        }
        Ok(())
    }

    async fn start_review(&self, review_id: &str) -> Result<ReviewStarted, ApiError> {
        self.calls.lock().unwrap().push(Call::Start(review_id.into()));
        Ok(ReviewStarted {
            review_id: review_id.into(),
            status: ReviewStatus::Processing,
            file_count: 3,
            created_at: "2025-03-01T10:00:00".into(),
            estimated_seconds: 60,
        })
    }
}

fn session() -> UploadSession {
    let mut session = UploadSession::new().with_template(Some("tmpl-1".into()));
    session.add(UploadFile::new("invoice.pdf", b"pdf-0".to_vec()).unwrap());
    session.add(UploadFile::new("receipt.png", b"png-1".to_vec()).unwrap());
    session.add(UploadFile::new("contract.pdf", b"pdf-2".to_vec()).unwrap());
    session
}

#[tokio::test]
async fn transfers_match_slots_by_position_then_start() {
    let backend = FakeBackend::default();

    let started = session().submit(&backend).await.expect("upload succeeds");
    assert_eq!(started.review_id, "r-1");

    let calls = backend.calls();
    assert_eq!(
        calls.first(),
        Some(&Call::Presign(PresignRequest {
            filenames: vec!["invoice.pdf".into(), "receipt.png".into(), "contract.pdf".into()],
            template_id: Some("tmpl-1".into()),
            custom_rules: None,
        }))
    );
    assert_eq!(calls.last(), Some(&Call::Start("r-1".into())));

    let mut puts = backend.puts();
    puts.sort();
    assert_eq!(
        puts,
        vec![
            ("https://bucket.test/slot-0".into(), b"pdf-0".to_vec(), "application/pdf".into()),
            ("https://bucket.test/slot-1".into(), b"png-1".to_vec(), "image/png".into()),
            ("https://bucket.test/slot-2".into(), b"pdf-2".to_vec(), "application/pdf".into()),
        ]
    );
}

#[tokio::test]
async fn all_transfers_are_in_flight_together() {
    let backend = FakeBackend::default();

    session().submit(&backend).await.expect("upload succeeds");

    assert_eq!(backend.puts().len(), 3);
    assert_eq!(backend.peak_in_flight(), 3);
    assert!(backend.started());
}

#[tokio::test]
async fn failed_transfer_never_starts_review() {
    let backend = FakeBackend {
        reject_upload_of: Some("receipt.png"),
        ..FakeBackend::default()
    };

    let err = session().submit(&backend).await.unwrap_err();
    assert_eq!(err.user_message(), "upload of receipt.png failed with status 403");
    assert!(!backend.started());
}

#[tokio::test]
async fn slot_count_mismatch_aborts_before_transfer() {
    let backend = FakeBackend {
        drop_last_slot: true,
        ..FakeBackend::default()
    };

    let err = session().submit(&backend).await.unwrap_err();
    assert!(matches!(err, UploadError::SlotMismatch { requested: 3, returned: 2 }));
    assert!(backend.puts().is_empty());
    assert!(!backend.started());
}

#[tokio::test]
async fn empty_session_is_rejected_without_calls() {
    let backend = FakeBackend::default();
    let err = UploadSession::new().submit(&backend).await.unwrap_err();
    assert!(matches!(err, UploadError::NoFiles));
    assert!(backend.calls().is_empty());
}

#[tokio::test]
async fn presign_failure_surfaces_detail_or_fallback() {
    let backend = FakeBackend {
        presign_error: Some(|| ApiError::Api {
            status: 400,
            detail: "Too many files".into(),
        }),
        ..FakeBackend::default()
    };
    let err = session().submit(&backend).await.unwrap_err();
    assert_eq!(err.user_message(), "Too many files");

    let backend = FakeBackend {
        presign_error: Some(|| ApiError::Decode("unexpected body".into())),
        ..FakeBackend::default()
    };
    let err = session().submit(&backend).await.unwrap_err();
    assert_eq!(err.user_message(), "Upload failed");
    assert!(backend.puts().is_empty());
}

//! Batch orchestrator: drives an ordered task list through fixed-size
//! concurrent chunks against an [`ImageBackend`].
//!
//! Chunks are strictly ordered; within a chunk all requests are issued
//! concurrently and every one must settle before the next chunk starts, so
//! peak in-flight request count never exceeds [`BATCH_WIDTH`]. A failed task
//! is logged and dropped; its siblings are unaffected. Cancellation is
//! checked before issuing a chunk and again after it settles: transport
//! abort is best-effort, so results that arrive after cancellation are
//! discarded rather than committed.

use crate::error::GenError;
use crate::gen::client::ImageBackend;
use crate::gen::ratio::AspectRatio;
use crate::session::{GeneratedImage, ImageKind};
use futures::future::join_all;
use tokio_util::sync::CancellationToken;

pub const BATCH_WIDTH: usize = 4;

#[derive(Debug, Clone)]
pub struct GenerationTask {
    pub category_name: String,
    pub prompt: String,
    pub variation_label: String,
    pub aspect_ratio: AspectRatio,
}

/// Where chunk results land. Implemented by `SessionState` (gallery +
/// status text) and by test recorders.
pub trait BatchSink {
    /// Receives all successful images of one chunk, newest-first, as a
    /// single atomic update.
    fn commit(&mut self, images: Vec<GeneratedImage>);

    /// Receives the per-chunk progress line.
    fn status(&mut self, status: String);
}

/// Run `tasks` against `backend` in chunks of [`BATCH_WIDTH`].
///
/// Returns `Err(GenError::Aborted)` as soon as cancellation is observed at a
/// chunk boundary; images committed by earlier chunks are left in place.
pub async fn run_batches<B, S>(
    backend: &B,
    tasks: &[GenerationTask],
    reference: &str,
    phase_label: &str,
    cancel: &CancellationToken,
    sink: &mut S,
) -> Result<(), GenError>
where
    B: ImageBackend + ?Sized,
    S: BatchSink + ?Sized,
{
    let total_chunks = tasks.len().div_ceil(BATCH_WIDTH);

    for (index, chunk) in tasks.chunks(BATCH_WIDTH).enumerate() {
        if cancel.is_cancelled() {
            return Err(GenError::Aborted);
        }

        sink.status(format!(
            "GENERATING {}: BATCH {}/{}",
            phase_label,
            index + 1,
            total_chunks
        ));

        let requests: Vec<_> = chunk
            .iter()
            .map(|task| async move {
                match backend
                    .generate(&task.prompt, reference, task.aspect_ratio, cancel)
                    .await
                {
                    Ok(url) => Some(GeneratedImage::new(
                        url,
                        format!("{} ({})", task.category_name, task.variation_label),
                        ImageKind::Initial,
                    )),
                    Err(e) => {
                        tracing::warn!(
                            category = %task.category_name,
                            error = %e,
                            "generation task failed"
                        );
                        None
                    }
                }
            })
            .collect();

        let results = join_all(requests).await;

        // Discard late arrivals from an aborted run instead of committing them.
        if cancel.is_cancelled() {
            return Err(GenError::Aborted);
        }

        let successful: Vec<GeneratedImage> = results.into_iter().flatten().collect();
        if !successful.is_empty() {
            sink.commit(successful);
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use std::sync::Mutex;

    fn task(index: usize) -> GenerationTask {
        GenerationTask {
            category_name: format!("task-{}", index),
            prompt: format!("prompt {}", index),
            variation_label: "Standard".to_string(),
            aspect_ratio: AspectRatio::Square,
        }
    }

    fn tasks(count: usize) -> Vec<GenerationTask> {
        (0..count).map(task).collect()
    }

    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    enum Event {
        Start(usize),
        End(usize),
    }

    #[derive(Default)]
    struct MockState {
        events: Vec<Event>,
        active: usize,
        max_active: usize,
        calls: usize,
    }

    /// Backend that records issue order and concurrency, failing the task
    /// indices listed in `fail`.
    struct MockBackend {
        state: Mutex<MockState>,
        fail: Vec<usize>,
        /// Cancel the token while handling this call number (1-based).
        cancel_on_call: Option<usize>,
    }

    impl MockBackend {
        fn new() -> Self {
            Self {
                state: Mutex::new(MockState::default()),
                fail: Vec::new(),
                cancel_on_call: None,
            }
        }

        fn failing(fail: Vec<usize>) -> Self {
            Self {
                fail,
                ..Self::new()
            }
        }

        fn task_index(prompt: &str) -> usize {
            prompt
                .rsplit(' ')
                .next()
                .and_then(|s| s.parse().ok())
                .unwrap()
        }
    }

    #[async_trait]
    impl ImageBackend for MockBackend {
        async fn generate(
            &self,
            prompt: &str,
            _reference: &str,
            _ratio: AspectRatio,
            cancel: &CancellationToken,
        ) -> Result<String, GenError> {
            let index = Self::task_index(prompt);
            {
                let mut state = self.state.lock().unwrap();
                state.calls += 1;
                state.active += 1;
                state.max_active = state.max_active.max(state.active);
                state.events.push(Event::Start(index));
                if Some(state.calls) == self.cancel_on_call {
                    cancel.cancel();
                }
            }

            // Yield so sibling requests interleave like real network calls.
            tokio::task::yield_now().await;

            let mut state = self.state.lock().unwrap();
            state.active -= 1;
            state.events.push(Event::End(index));

            if self.fail.contains(&index) {
                Err(GenError::EmptyResponse)
            } else {
                Ok(format!("https://img.example/{}.png", index))
            }
        }
    }

    #[derive(Default)]
    struct RecordingSink {
        commits: Vec<Vec<GeneratedImage>>,
        statuses: Vec<String>,
        /// Cancel this token after the n-th commit (1-based).
        cancel_after_commit: Option<(usize, CancellationToken)>,
    }

    impl BatchSink for RecordingSink {
        fn commit(&mut self, images: Vec<GeneratedImage>) {
            self.commits.push(images);
            if let Some((after, token)) = &self.cancel_after_commit {
                if self.commits.len() == *after {
                    token.cancel();
                }
            }
        }

        fn status(&mut self, status: String) {
            self.statuses.push(status);
        }
    }

    #[tokio::test]
    async fn test_chunk_count_and_sizes() {
        for (n, expected_chunks) in [(1, 1), (4, 1), (5, 2), (8, 2), (30, 8), (16, 4)] {
            let backend = MockBackend::new();
            let mut sink = RecordingSink::default();
            let cancel = CancellationToken::new();

            run_batches(&backend, &tasks(n), "logo", "BASIC SYSTEM", &cancel, &mut sink)
                .await
                .unwrap();

            assert_eq!(sink.statuses.len(), expected_chunks, "n = {}", n);
            assert_eq!(sink.commits.len(), expected_chunks);
            let total: usize = sink.commits.iter().map(|c| c.len()).sum();
            assert_eq!(total, n);
            for chunk in &sink.commits[..expected_chunks - 1] {
                assert_eq!(chunk.len(), BATCH_WIDTH);
            }
        }
    }

    #[tokio::test]
    async fn test_status_carries_phase_and_counters() {
        let backend = MockBackend::new();
        let mut sink = RecordingSink::default();
        let cancel = CancellationToken::new();

        run_batches(&backend, &tasks(9), "logo", "MOCKUP", &cancel, &mut sink)
            .await
            .unwrap();

        assert_eq!(
            sink.statuses,
            vec![
                "GENERATING MOCKUP: BATCH 1/3",
                "GENERATING MOCKUP: BATCH 2/3",
                "GENERATING MOCKUP: BATCH 3/3",
            ]
        );
    }

    #[tokio::test]
    async fn test_chunk_ordering_and_bounded_concurrency() {
        let backend = MockBackend::new();
        let mut sink = RecordingSink::default();
        let cancel = CancellationToken::new();

        run_batches(&backend, &tasks(12), "logo", "BASIC SYSTEM", &cancel, &mut sink)
            .await
            .unwrap();

        let state = backend.state.lock().unwrap();
        assert!(state.max_active <= BATCH_WIDTH);

        // No task of chunk k+1 may start before every task of chunk k ended.
        let mut ended = vec![false; 12];
        for event in &state.events {
            match event {
                Event::Start(i) => {
                    let chunk = i / BATCH_WIDTH;
                    for prior in 0..chunk * BATCH_WIDTH {
                        assert!(ended[prior], "task {} started before task {} settled", i, prior);
                    }
                }
                Event::End(i) => ended[*i] = true,
            }
        }
    }

    #[tokio::test]
    async fn test_partial_failure_keeps_siblings() {
        let backend = MockBackend::failing(vec![1, 2]);
        let mut sink = RecordingSink::default();
        let cancel = CancellationToken::new();

        run_batches(&backend, &tasks(4), "logo", "BASIC SYSTEM", &cancel, &mut sink)
            .await
            .unwrap();

        assert_eq!(sink.commits.len(), 1);
        let prompts: Vec<&str> = sink.commits[0].iter().map(|i| i.prompt.as_str()).collect();
        assert_eq!(prompts, vec!["task-0 (Standard)", "task-3 (Standard)"]);
    }

    #[tokio::test]
    async fn test_fully_failed_chunk_does_not_abort_run() {
        let backend = MockBackend::failing(vec![0, 1, 2, 3]);
        let mut sink = RecordingSink::default();
        let cancel = CancellationToken::new();

        run_batches(&backend, &tasks(8), "logo", "BASIC SYSTEM", &cancel, &mut sink)
            .await
            .unwrap();

        // First chunk yields nothing, second chunk still runs and commits.
        assert_eq!(sink.commits.len(), 1);
        assert_eq!(sink.commits[0].len(), 4);
        assert_eq!(backend.state.lock().unwrap().calls, 8);
    }

    #[tokio::test]
    async fn test_cancel_between_chunks_stops_issuance() {
        let backend = MockBackend::new();
        let cancel = CancellationToken::new();
        let mut sink = RecordingSink {
            cancel_after_commit: Some((2, cancel.clone())),
            ..RecordingSink::default()
        };

        let result =
            run_batches(&backend, &tasks(48), "logo", "BASIC SYSTEM", &cancel, &mut sink).await;

        assert!(matches!(result, Err(GenError::Aborted)));
        // Chunks 1 and 2 committed, chunk 3 never issued.
        assert_eq!(sink.commits.len(), 2);
        assert_eq!(backend.state.lock().unwrap().calls, 8);
    }

    #[tokio::test]
    async fn test_cancel_mid_chunk_discards_settled_results() {
        let backend = MockBackend {
            cancel_on_call: Some(6),
            ..MockBackend::new()
        };
        let cancel = CancellationToken::new();
        let mut sink = RecordingSink::default();

        let result =
            run_batches(&backend, &tasks(12), "logo", "BASIC SYSTEM", &cancel, &mut sink).await;

        assert!(matches!(result, Err(GenError::Aborted)));
        // Chunk 1 committed; chunk 2 settled but was discarded; chunk 3 never ran.
        assert_eq!(sink.commits.len(), 1);
        assert_eq!(backend.state.lock().unwrap().calls, 8);
    }
}

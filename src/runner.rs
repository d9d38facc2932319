use tokio::sync::mpsc::UnboundedSender;
use tracing::info;

use crate::api::{Analysis, HealthStatus};
use crate::client::Analyzer;
use crate::error::SentiscopeResult;

/// Work the UI hands to the background loop.
pub enum AppCommand {
    Analyze { text: String },
    CheckHealth,
}

/// Terminal outcomes flowing back. Every command produces exactly one event;
/// the UI relies on that to clear its loading state.
pub enum AppEvent {
    Analysis(SentiscopeResult<Analysis>),
    Health(SentiscopeResult<HealthStatus>),
}

/// Execute one command against the service. Each match arm performs a single
/// call and unconditionally sends its one terminal event: faults surface as
/// `Err` outcomes, never as a missing event.
pub async fn run_command(cmd: AppCommand, analyzer: &dyn Analyzer, tx: &UnboundedSender<AppEvent>) {
    match cmd {
        AppCommand::Analyze { text } => {
            info!(bytes = text.len(), "running analyze command");
            let outcome = analyzer.analyze(&text).await;
            let _ = tx.send(AppEvent::Analysis(outcome));
        }
        AppCommand::CheckHealth => {
            info!("running health check command");
            let outcome = analyzer.health().await;
            let _ = tx.send(AppEvent::Health(outcome));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::SentiscopeError;
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use tokio::sync::mpsc;

    struct FakeAnalyzer {
        calls: AtomicUsize,
        fail: bool,
    }

    impl FakeAnalyzer {
        fn new(fail: bool) -> Self {
            FakeAnalyzer {
                calls: AtomicUsize::new(0),
                fail,
            }
        }
    }

    #[async_trait]
    impl Analyzer for FakeAnalyzer {
        async fn analyze(&self, text: &str) -> SentiscopeResult<Analysis> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if self.fail {
                Err(SentiscopeError::transport(
                    "simulated outage",
                    "http://localhost:5000",
                ))
            } else {
                Ok(Analysis {
                    sentiment: "positive".into(),
                    score: Some(text.len() as f64 / 100.0),
                    scores: None,
                })
            }
        }

        async fn health(&self) -> SentiscopeResult<HealthStatus> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(HealthStatus {
                status: "Backend is running!".into(),
            })
        }
    }

    #[tokio::test]
    async fn analyze_command_makes_one_call_and_one_event() {
        let analyzer = FakeAnalyzer::new(false);
        let (tx, mut rx) = mpsc::unbounded_channel();

        run_command(
            AppCommand::Analyze {
                text: "hello".into(),
            },
            &analyzer,
            &tx,
        )
        .await;

        assert_eq!(analyzer.calls.load(Ordering::SeqCst), 1);
        match rx.try_recv() {
            Ok(AppEvent::Analysis(Ok(analysis))) => {
                assert_eq!(analysis.sentiment, "positive");
            }
            other => panic!("expected one success event, got {:?}", other.is_ok()),
        }
        assert!(rx.try_recv().is_err(), "no second event may be sent");
    }

    #[tokio::test]
    async fn failed_call_still_delivers_a_terminal_event() {
        let analyzer = FakeAnalyzer::new(true);
        let (tx, mut rx) = mpsc::unbounded_channel();

        run_command(
            AppCommand::Analyze {
                text: "hello".into(),
            },
            &analyzer,
            &tx,
        )
        .await;

        match rx.try_recv() {
            Ok(AppEvent::Analysis(Err(err))) => {
                assert!(err.to_string().starts_with("Failed to analyze sentiment."));
            }
            other => panic!("expected one failure event, got {:?}", other.is_ok()),
        }
        assert!(rx.try_recv().is_err());
    }

    #[tokio::test]
    async fn health_command_reports_status() {
        let analyzer = FakeAnalyzer::new(false);
        let (tx, mut rx) = mpsc::unbounded_channel();

        run_command(AppCommand::CheckHealth, &analyzer, &tx).await;

        match rx.try_recv() {
            Ok(AppEvent::Health(Ok(health))) => {
                assert_eq!(health.status, "Backend is running!");
            }
            other => panic!("expected one health event, got {:?}", other.is_ok()),
        }
    }
}

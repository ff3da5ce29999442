//! End-to-end behavior of the provider, recovery chain and error boundary.

use pretty_assertions::assert_eq;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use vitrine_design::{
    ApplyError, BoundaryAction, BusinessType, CssVariables, DesignErrorKind, DesignLocation,
    DesignProvider, DesignStorage, DocumentRoot, ErrorBoundary, ErrorLog, Locale, MemoryHistory,
    MemoryStorage, Navigator, NotificationCenter, ProviderState, RecoveryStrategy, RenderError,
    StorageError, ThemeTarget, DEFAULT_STORAGE_KEY,
};

struct Page {
    provider: DesignProvider<DocumentRoot>,
    history: Arc<MemoryHistory>,
    storage: Arc<MemoryStorage>,
    log: ErrorLog,
}

fn page(url: &str, stored: Option<&str>) -> Page {
    let history = Arc::new(MemoryHistory::new(url));
    let storage = Arc::new(match stored {
        Some(v) => MemoryStorage::with_value(DEFAULT_STORAGE_KEY, v),
        None => MemoryStorage::new(),
    });
    let log = ErrorLog::new(20);
    let provider = DesignProvider::new(history.clone(), storage.clone(), DocumentRoot::new())
        .with_log(log.clone());
    Page {
        provider,
        history,
        storage,
        log,
    }
}

fn design_param(history: &MemoryHistory) -> Option<String> {
    DesignLocation::parse(&history.current())
        .unwrap()
        .query_param("design")
}

#[tokio::test]
async fn medical_url_initializes_medical_theme() {
    let mut p = page("/?design=medical", None);
    let ctx = p.provider.mount().await;

    assert_eq!(ctx.business_type, BusinessType::MedicalClinic);
    assert_eq!(p.provider.state(), ProviderState::Valid);
    assert_eq!(p.provider.css_variables()["--theme-accent"], "#10b981");
    assert_eq!(p.provider.target().style_var("--theme-accent"), Some("#10b981"));
    assert!(p.provider.target().has_class("theme-medical"));
    assert!(p.log.is_empty());
}

#[tokio::test]
async fn bogus_url_falls_through_to_default_and_logs_once() {
    let mut p = page("/?design=bogus-value", None);
    let ctx = p.provider.mount().await;

    assert_eq!(ctx.business_type, BusinessType::AiAgency);
    let errors = p.log.recent_errors(10);
    assert_eq!(errors.len(), 1);
    assert_eq!(errors[0].kind, DesignErrorKind::InvalidDesignParameter);
    assert_eq!(errors[0].fallback_used, Some(BusinessType::AiAgency));

    let recovery = p.provider.last_recovery().unwrap();
    assert_eq!(recovery.strategy, Some(RecoveryStrategy::DefaultDesign));
    assert!(recovery.success);

    // The address bar now shows what is actually rendered.
    assert_eq!(design_param(&p.history).as_deref(), Some("aiAgency"));
}

#[tokio::test]
async fn stored_preference_is_used_without_url_parameter() {
    let mut p = page("/", Some("restaurant"));
    let ctx = p.provider.mount().await;

    assert_eq!(ctx.business_type, BusinessType::Restaurant);
    assert_eq!(
        p.provider.last_recovery().unwrap().strategy,
        Some(RecoveryStrategy::LocalStorage)
    );
    assert!(p.provider.target().has_class("theme-restaurant"));
    // Absent parameter is not rewritten.
    assert_eq!(p.history.current(), "/");
}

#[tokio::test]
async fn switching_design_updates_url_storage_and_class_in_place() {
    let mut p = page("/?design=medical", None);
    p.provider.mount().await;
    let entries_before = p.history.len();

    p.provider.set_current_design(BusinessType::AutoGarage).await;

    assert_eq!(p.provider.current_design(), BusinessType::AutoGarage);
    assert_eq!(p.history.current(), "/?design=autoGarage");
    assert_eq!(p.history.len(), entries_before);
    assert_eq!(p.storage.get(DEFAULT_STORAGE_KEY).as_deref(), Some("autoGarage"));
    assert!(!p.provider.target().has_class("theme-medical"));
    assert!(p.provider.target().has_class("theme-autoGarage"));
}

#[tokio::test]
async fn render_failure_shows_fallback_and_retry_keeps_context() {
    let mut p = page("/?design=medical", None);
    p.provider.mount().await;
    let mut boundary = ErrorBoundary::new(Locale::Fr);

    let outcome = boundary.render(&mut p.provider, |_ctx| -> Result<String, RenderError> {
        panic!("pricing table exploded")
    });
    let screen = outcome.fallback().expect("fallback screen");

    assert_eq!(screen.error.kind, DesignErrorKind::ContextProviderError);
    assert_eq!(
        screen.actions,
        &[
            BoundaryAction::Retry,
            BoundaryAction::Reset,
            BoundaryAction::ManualSelect
        ]
    );
    assert_eq!(screen.choices.len(), BusinessType::all().len());
    assert!(boundary.has_error());
    assert_eq!(
        p.log.error_stats().errors_by_type[&DesignErrorKind::ContextProviderError],
        1
    );

    let retried = boundary.retry(&mut p.provider, |ctx| Ok(ctx.business_type));
    assert_eq!(retried.rendered(), Some(BusinessType::MedicalClinic));
    assert!(!boundary.has_error());
    assert_eq!(p.provider.state(), ProviderState::Valid);
}

#[tokio::test]
async fn returned_render_errors_are_caught_too() {
    let mut p = page("/?design=fitness", None);
    p.provider.mount().await;
    let mut boundary = ErrorBoundary::default();

    let outcome = boundary.render(&mut p.provider, |_| -> Result<(), RenderError> {
        Err(RenderError::Failed("missing copy block".into()))
    });
    assert!(outcome.is_fallback());
    assert!(boundary.failure().unwrap().message.contains("missing copy block"));
}

#[tokio::test]
async fn manual_selection_and_reset_from_the_fallback_screen() {
    let mut p = page("/?design=medical", None);
    p.provider.mount().await;
    let mut boundary = ErrorBoundary::default();
    let _ = boundary.render(&mut p.provider, |_| -> Result<(), RenderError> {
        Err(RenderError::Failed("boom".into()))
    });

    boundary
        .select_manually(&mut p.provider, BusinessType::LawFirm)
        .await;
    assert!(!boundary.has_error());
    assert_eq!(design_param(&p.history).as_deref(), Some("lawFirm"));

    boundary.reset(&mut p.provider).await;
    assert_eq!(p.provider.current_design(), BusinessType::AiAgency);
    assert_eq!(design_param(&p.history), None);
    assert_eq!(p.storage.get(DEFAULT_STORAGE_KEY), None);
}

#[tokio::test]
async fn setting_the_same_design_twice_is_idempotent() {
    let mut p = page("/offres?lang=fr", None);
    p.provider.mount().await;

    p.provider.set_current_design(BusinessType::BeautySalon).await;
    let once = (
        p.provider.context(),
        p.history.current(),
        p.storage.get(DEFAULT_STORAGE_KEY),
        p.provider.target().clone(),
    );

    p.provider.set_current_design(BusinessType::BeautySalon).await;
    let twice = (
        p.provider.context(),
        p.history.current(),
        p.storage.get(DEFAULT_STORAGE_KEY),
        p.provider.target().clone(),
    );

    assert_eq!(once, twice);
    assert_eq!(p.history.current(), "/offres?lang=fr&design=beautySalon");
}

#[tokio::test]
async fn selection_survives_a_reload_through_storage() {
    let storage = Arc::new(MemoryStorage::new());
    let log = ErrorLog::new(8);

    let mut first = DesignProvider::new(
        Arc::new(MemoryHistory::new("/")),
        storage.clone(),
        DocumentRoot::new(),
    )
    .with_log(log.clone());
    first.mount().await;
    first.set_current_design(BusinessType::RealEstate).await;

    // Reload on a URL without the parameter.
    let mut second = DesignProvider::new(
        Arc::new(MemoryHistory::new("/contact")),
        storage.clone(),
        DocumentRoot::new(),
    )
    .with_log(log);
    let ctx = second.mount().await;

    assert_eq!(ctx.business_type, BusinessType::RealEstate);
    assert_eq!(
        second.last_recovery().unwrap().strategy,
        Some(RecoveryStrategy::LocalStorage)
    );
}

#[tokio::test]
async fn url_round_trips_after_every_selection() {
    let mut p = page("/", None);
    p.provider.mount().await;
    for &business in BusinessType::all() {
        p.provider.set_current_design(business).await;
        let value = design_param(&p.history);
        assert_eq!(
            vitrine_design::validate_business_type(value.as_deref()),
            Ok(business)
        );
    }
}

#[tokio::test]
async fn untyped_selection_is_validated() {
    let mut p = page("/?design=medical", None);
    p.provider.mount().await;

    let err = p.provider.select_design("Medical").await.unwrap_err();
    assert_eq!(err.kind, DesignErrorKind::InvalidDesignParameter);
    assert_eq!(p.provider.current_design(), BusinessType::MedicalClinic);
    assert_eq!(p.log.len(), 1);

    assert_eq!(
        p.provider.select_design("restaurant").await,
        Ok(BusinessType::Restaurant)
    );
}

struct BrokenStorage;

#[async_trait::async_trait]
impl DesignStorage for BrokenStorage {
    async fn load(&self, _key: &str) -> Result<Option<String>, StorageError> {
        Err(StorageError::Unavailable("quota exceeded".into()))
    }

    async fn store(&self, _key: &str, _value: &str) -> Result<(), StorageError> {
        Err(StorageError::Unavailable("quota exceeded".into()))
    }

    async fn remove(&self, _key: &str) -> Result<(), StorageError> {
        Err(StorageError::Unavailable("quota exceeded".into()))
    }
}

#[tokio::test]
async fn recovery_survives_every_url_and_storage_combination() {
    let urls = ["/", "/?design=", "/?design=nope", "http://[::1", "/?design=medical"];
    let stored: [Option<&str>; 4] = [None, Some(""), Some("corrupt"), Some("fitness")];

    for url in urls {
        for value in stored {
            let mut p = page(url, value);
            let ctx = p.provider.mount().await;
            assert_eq!(p.provider.state(), ProviderState::Valid, "{url} {value:?}");
            assert!(BusinessType::all().contains(&ctx.business_type));
        }

        let mut broken = DesignProvider::new(
            Arc::new(MemoryHistory::new(url)),
            Arc::new(BrokenStorage),
            DocumentRoot::new(),
        )
        .with_log(ErrorLog::new(4));
        let ctx = broken.mount().await;
        assert_eq!(broken.state(), ProviderState::Valid);
        if url != "/?design=medical" {
            assert_eq!(ctx.business_type, BusinessType::DEFAULT, "{url}");
        }
    }
}

#[tokio::test]
async fn errors_surface_as_notifications_when_listening() {
    let history = Arc::new(MemoryHistory::new("/?design=spaceship"));
    let mut provider = DesignProvider::new(
        history.clone(),
        Arc::new(MemoryStorage::new()),
        DocumentRoot::new(),
    )
    .with_log(ErrorLog::new(4))
    .with_notifications(NotificationCenter::new(Locale::En, Duration::from_secs(5)));
    provider.mount().await;

    let now = std::time::Instant::now();
    let center = provider.notifications_mut().unwrap();
    let visible = center.visible(now);
    assert_eq!(visible.len(), 1);
    assert_eq!(visible[0].error.kind, DesignErrorKind::InvalidDesignParameter);
    assert_eq!(visible[0].title, "Unknown design");
}

#[tokio::test]
async fn plain_landing_is_logged_but_not_notified() {
    let mut provider = DesignProvider::new(
        Arc::new(MemoryHistory::new("/")),
        Arc::new(MemoryStorage::new()),
        DocumentRoot::new(),
    )
    .with_log(ErrorLog::new(4))
    .with_notifications(NotificationCenter::new(Locale::Fr, Duration::from_secs(5)));
    provider.mount().await;

    assert_eq!(provider.log().len(), 1);
    assert_eq!(
        provider.log().recent_errors(1)[0].kind,
        DesignErrorKind::MissingDesignContext
    );
    let now = std::time::Instant::now();
    assert!(provider.notifications_mut().unwrap().visible(now).is_empty());
}

#[tokio::test]
async fn export_document_lists_logged_errors() {
    let mut p = page("/?design=bogus", None);
    p.provider.mount().await;
    p.provider.select_design("also-bogus").await.unwrap_err();

    let json: serde_json::Value = serde_json::from_str(&p.log.export_errors().unwrap()).unwrap();
    let records = json.as_array().unwrap();
    assert_eq!(records.len(), 2);
    assert_eq!(records[0]["kind"], "INVALID_DESIGN_PARAMETER");
    assert_eq!(records[0]["fallbackUsed"], "aiAgency");
    assert_eq!(records[0]["context"]["value"], "bogus");
    assert_eq!(records[1]["sequence"], 1);
    assert!(records[1]["timestamp"].is_string());
}

#[tokio::test]
async fn custom_history_sees_replace_not_push() {
    let history = Arc::new(MemoryHistory::new("/?design=medical"));
    let navigator: Arc<dyn Navigator> = history.clone();
    let mut provider =
        DesignProvider::new(navigator, Arc::new(MemoryStorage::new()), DocumentRoot::new())
            .with_log(ErrorLog::new(4));
    provider.mount().await;
    for &b in BusinessType::all() {
        provider.set_current_design(b).await;
    }
    assert_eq!(history.len(), 1);
}

/// Storage whose next read hangs until the caller gives up on it
struct StallingStorage {
    stall_next: AtomicBool,
    inner: MemoryStorage,
}

impl StallingStorage {
    fn new(stall_first: bool, stored: &str) -> Self {
        Self {
            stall_next: AtomicBool::new(stall_first),
            inner: MemoryStorage::with_value(DEFAULT_STORAGE_KEY, stored),
        }
    }
}

#[async_trait::async_trait]
impl DesignStorage for StallingStorage {
    async fn load(&self, key: &str) -> Result<Option<String>, StorageError> {
        if self.stall_next.swap(false, Ordering::SeqCst) {
            tokio::time::sleep(Duration::from_secs(3600)).await;
        }
        self.inner.load(key).await
    }

    async fn store(&self, key: &str, value: &str) -> Result<(), StorageError> {
        self.inner.store(key, value).await
    }

    async fn remove(&self, key: &str) -> Result<(), StorageError> {
        self.inner.remove(key).await
    }
}

#[tokio::test]
async fn cancelled_mount_can_be_mounted_again() {
    let storage = Arc::new(StallingStorage::new(true, "restaurant"));
    let mut provider =
        DesignProvider::new(Arc::new(MemoryHistory::new("/")), storage, DocumentRoot::new())
            .with_log(ErrorLog::new(4));

    let cancelled = tokio::time::timeout(Duration::from_millis(20), provider.mount()).await;
    assert!(cancelled.is_err());
    assert_eq!(provider.state(), ProviderState::Uninitialized);
    assert!(!provider.is_recovering());

    let ctx = provider.mount().await;
    assert_eq!(ctx.business_type, BusinessType::Restaurant);
    assert_eq!(provider.state(), ProviderState::Valid);
}

#[tokio::test]
async fn cancelled_recovery_does_not_block_the_next_one() {
    let storage = Arc::new(StallingStorage::new(false, "lawFirm"));
    let mut provider = DesignProvider::new(
        Arc::new(MemoryHistory::new("/")),
        storage.clone(),
        DocumentRoot::new(),
    )
    .with_log(ErrorLog::new(4));
    provider.mount().await;
    assert_eq!(provider.current_design(), BusinessType::LawFirm);

    storage.stall_next.store(true, Ordering::SeqCst);
    let cancelled = tokio::time::timeout(Duration::from_millis(20), provider.recover()).await;
    assert!(cancelled.is_err());
    assert_eq!(provider.state(), ProviderState::Valid);
    assert!(!provider.is_recovering());

    let result = provider.recover().await.expect("recovery runs");
    assert_eq!(result.strategy, Some(RecoveryStrategy::LocalStorage));
    assert_eq!(provider.state(), ProviderState::Valid);
}

/// Target that refuses every theme
struct RejectingTarget;

impl ThemeTarget for RejectingTarget {
    fn apply_theme(&mut self, class: &str, _variables: &CssVariables) -> Result<(), ApplyError> {
        Err(ApplyError(format!("stylesheet locked, cannot apply {class}")))
    }
}

#[tokio::test]
async fn theme_target_failure_is_logged_and_state_still_changes() {
    let log = ErrorLog::new(8);
    let mut provider = DesignProvider::new(
        Arc::new(MemoryHistory::new("/?design=medical")),
        Arc::new(MemoryStorage::new()),
        RejectingTarget,
    )
    .with_log(log.clone());

    let ctx = provider.mount().await;
    assert_eq!(ctx.business_type, BusinessType::MedicalClinic);

    provider.set_current_design(BusinessType::Fitness).await;
    assert_eq!(provider.current_design(), BusinessType::Fitness);
    assert_eq!(provider.state(), ProviderState::Valid);

    let kinds: Vec<_> = log.entries().iter().map(|e| e.error.kind).collect();
    assert_eq!(
        kinds,
        vec![
            DesignErrorKind::ThemeApplicationFailure,
            DesignErrorKind::ThemeApplicationFailure
        ]
    );
    assert_eq!(
        log.recent_errors(1)[0].context,
        Some(serde_json::json!({ "design": "fitness" }))
    );
}

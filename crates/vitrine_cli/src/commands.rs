//! Subcommand implementations

use anyhow::{Context, Result};
use std::path::Path;
use std::sync::Arc;
use std::time::Instant;
use vitrine_design::{
    validate_business_type, BusinessType, DesignConfig, DesignProvider, DesignStorage,
    DocumentRoot, ErrorLog, FileStorage, Locale, MemoryHistory, MemoryStorage,
    NotificationCenter, RecoveryStrategy,
};

/// Outcome of driving a provider against a URL
#[derive(Debug)]
pub struct Resolution {
    pub design: BusinessType,
    /// Strategy that produced the design; `None` when the URL carried a
    /// valid design or when every strategy failed
    pub strategy: Option<RecoveryStrategy>,
    /// Whether the recovery chain ran at mount
    pub recovered: bool,
    pub url: String,
    pub class_attr: String,
    pub style_attr: String,
    pub notices: Vec<String>,
    pub log: ErrorLog,
}

pub fn init(dir: &Path, force: bool) -> Result<()> {
    let path = crate::config::init(dir, force)?;
    println!("Created {}", path.display());
    Ok(())
}

pub fn list(config: &DesignConfig, locale: Option<&str>) -> Result<()> {
    let locale = locale
        .map(Locale::from_tag)
        .unwrap_or(config.notifications.locale);
    print!("{}", render_list(config.design.default, locale));
    Ok(())
}

fn render_list(default: BusinessType, locale: Locale) -> String {
    let mut out = String::new();
    for business in BusinessType::all() {
        let marker = if *business == default { "*" } else { " " };
        out.push_str(&format!(
            "{marker} {:<12} {:<22} {}  {}\n",
            business.key(),
            business.id(),
            business.theme().accent.to_css(),
            business.label(locale),
        ));
    }
    out
}

pub fn css(design: &str, selector: Option<&str>) -> Result<()> {
    println!("{}", render_css(design, selector)?);
    Ok(())
}

fn render_css(design: &str, selector: Option<&str>) -> Result<String> {
    let business = validate_business_type(Some(design))?;
    let selector = selector
        .map(str::to_string)
        .unwrap_or_else(|| format!(".{}", business.theme_class()));
    Ok(business.theme().css_rule(&selector))
}

pub async fn resolve(
    config: &DesignConfig,
    url: &str,
    storage: Option<&Path>,
    export_errors: Option<&Path>,
) -> Result<()> {
    let log = ErrorLog::init_global(config.log.capacity).clone();
    let resolution = run(config, log, url, storage, None).await?;
    report(&resolution, config.notifications.locale, export_errors)
}

pub async fn select(
    config: &DesignConfig,
    design: &str,
    url: &str,
    storage: Option<&Path>,
    export_errors: Option<&Path>,
) -> Result<()> {
    let log = ErrorLog::init_global(config.log.capacity).clone();
    let resolution = run(config, log, url, storage, Some(design)).await?;
    report(&resolution, config.notifications.locale, export_errors)
}

/// Mount a provider on `url`, optionally apply `selection`, and capture the
/// resulting document state.
pub async fn run(
    config: &DesignConfig,
    log: ErrorLog,
    url: &str,
    storage: Option<&Path>,
    selection: Option<&str>,
) -> Result<Resolution> {
    let history = Arc::new(MemoryHistory::new(url));
    let storage: Arc<dyn DesignStorage> = match storage {
        Some(path) => Arc::new(FileStorage::new(path)),
        None => Arc::new(MemoryStorage::new()),
    };
    let notifications =
        NotificationCenter::new(config.notifications.locale, config.notifications.auto_hide());

    let mut provider = DesignProvider::new(history.clone(), storage, DocumentRoot::new())
        .with_config(config)
        .with_log(log.clone())
        .with_notifications(notifications);

    provider.mount().await;
    let recovered = provider.last_recovery().is_some();
    let strategy = provider.last_recovery().and_then(|r| r.strategy);

    if let Some(value) = selection {
        provider
            .select_design(value)
            .await
            .with_context(|| format!("Cannot select design {value:?}"))?;
    }

    let notices: Vec<String> = provider
        .notifications_mut()
        .map(|center| {
            center
                .visible(Instant::now())
                .iter()
                .map(|n| format!("{}: {}", n.title, n.message))
                .collect()
        })
        .unwrap_or_default();

    Ok(Resolution {
        design: provider.current_design(),
        strategy,
        recovered,
        url: history.current(),
        class_attr: provider.target().class_attr(),
        style_attr: provider.target().style_attr(),
        notices,
        log,
    })
}

/// Where the shown design came from
fn source_label(resolution: &Resolution) -> &'static str {
    match (resolution.recovered, resolution.strategy) {
        (false, _) => "URL",
        (true, Some(strategy)) => strategy.as_str(),
        (true, None) => "FALLBACK (all strategies failed)",
    }
}

fn report(resolution: &Resolution, locale: Locale, export_errors: Option<&Path>) -> Result<()> {
    let source = source_label(resolution);

    println!(
        "design  {} ({})",
        resolution.design.key(),
        resolution.design.label(locale)
    );
    println!("source  {source}");
    println!("url     {}", resolution.url);
    println!("class   {}", resolution.class_attr);
    println!("style   {}", resolution.style_attr);

    for notice in &resolution.notices {
        eprintln!("! {notice}");
    }

    if let Some(path) = export_errors {
        resolution
            .log
            .export_to_file(path)
            .with_context(|| format!("Failed to export errors to {}", path.display()))?;
        tracing::info!(
            "exported {} error(s) to {}",
            resolution.log.len(),
            path.display()
        );
    }
    Ok(())
}

//! PDF Pipeline: headless browser prints the resume HTML to an A4 PDF.
//!
//! The browser is reached through `BrowserEngine` / `BrowserSession` so the
//! pipeline can run against a fake in tests. `render_pdf` owns the session for
//! the whole call and always closes it before returning, on every path.
//! `ChromiumEngine` is the production engine (Chromium over CDP).

use std::path::PathBuf;

use async_trait::async_trait;
use chromiumoxide::browser::{Browser, BrowserConfig};
use chromiumoxide::cdp::browser_protocol::page::PrintToPdfParams;
use chromiumoxide::Page;
use futures::StreamExt;
use tempfile::TempDir;
use thiserror::Error;
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

#[derive(Debug, Error)]
pub enum RenderError {
    #[error("failed to launch browser: {0}")]
    Launch(String),

    #[error("failed to load resume HTML: {0}")]
    Navigation(String),

    #[error("failed to capture PDF: {0}")]
    Capture(String),

    #[error("failed to shut down browser: {0}")]
    Teardown(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewport {
    pub width: u32,
    pub height: u32,
}

pub const VIEWPORT: Viewport = Viewport {
    width: 1200,
    height: 800,
};

/// Print settings. Lengths are in inches, as the DevTools protocol expects.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PdfOptions {
    pub paper_width_in: f64,
    pub paper_height_in: f64,
    pub margin_in: f64,
    pub print_background: bool,
    pub prefer_css_page_size: bool,
}

impl PdfOptions {
    /// ISO A4 (210mm × 297mm), no printer margins: the stylesheet owns spacing.
    pub fn a4() -> Self {
        Self {
            paper_width_in: 210.0 / 25.4,
            paper_height_in: 297.0 / 25.4,
            margin_in: 0.0,
            print_background: true,
            prefer_css_page_size: true,
        }
    }
}

/// Starts isolated browser processes.
#[async_trait]
pub trait BrowserEngine: Send + Sync {
    async fn launch(&self, viewport: Viewport) -> Result<Box<dyn BrowserSession>, RenderError>;
}

/// One running browser process, owned by a single render call.
#[async_trait]
pub trait BrowserSession: Send {
    /// Opens a page and loads `html`, returning once the load has settled.
    async fn load_html(&mut self, html: &str) -> Result<(), RenderError>;

    async fn print_pdf(&mut self, options: &PdfOptions) -> Result<Vec<u8>, RenderError>;

    /// Terminates the process. Must be safe to call more than once.
    async fn close(&mut self) -> Result<(), RenderError>;
}

/// Prints `html` to PDF bytes.
///
/// The session is closed before any result leaves this function. A teardown
/// failure after a successful capture is logged and the PDF is still returned;
/// after a failed capture the capture error wins.
pub async fn render_pdf(engine: &dyn BrowserEngine, html: &str) -> Result<Vec<u8>, RenderError> {
    let mut session = engine.launch(VIEWPORT).await?;

    let captured = capture(session.as_mut(), html).await;
    let closed = session.close().await;

    match (captured, closed) {
        (Ok(pdf), Ok(())) => Ok(pdf),
        (Ok(pdf), Err(e)) => {
            warn!("PDF captured but browser teardown failed: {e}");
            Ok(pdf)
        }
        (Err(e), Ok(())) => Err(e),
        (Err(e), Err(close_err)) => {
            warn!("Browser teardown failed after render error: {close_err}");
            Err(e)
        }
    }
}

async fn capture(session: &mut dyn BrowserSession, html: &str) -> Result<Vec<u8>, RenderError> {
    session.load_html(html).await?;
    let pdf = session.print_pdf(&PdfOptions::a4()).await?;
    if pdf.is_empty() {
        return Err(RenderError::Capture("browser returned an empty PDF".to_string()));
    }
    Ok(pdf)
}

// ────────────────────────────────────────────────────────────────────────────
// Chromium engine
// ────────────────────────────────────────────────────────────────────────────

/// Launches a fresh headless Chromium per call, each with its own throwaway profile.
#[derive(Debug, Clone, Default)]
pub struct ChromiumEngine {
    executable: Option<PathBuf>,
    no_sandbox: bool,
}

impl ChromiumEngine {
    pub fn new(executable: Option<PathBuf>, no_sandbox: bool) -> Self {
        Self {
            executable,
            no_sandbox,
        }
    }
}

#[async_trait]
impl BrowserEngine for ChromiumEngine {
    async fn launch(&self, viewport: Viewport) -> Result<Box<dyn BrowserSession>, RenderError> {
        let profile = tempfile::Builder::new()
            .prefix("resume-chromium-")
            .tempdir()
            .map_err(|e| RenderError::Launch(format!("cannot create profile dir: {e}")))?;

        let mut builder = BrowserConfig::builder()
            .user_data_dir(profile.path())
            .viewport(chromiumoxide::handler::viewport::Viewport {
                width: viewport.width,
                height: viewport.height,
                ..Default::default()
            })
            .arg("--disable-gpu")
            .arg("--disable-dev-shm-usage");
        if let Some(path) = &self.executable {
            builder = builder.chrome_executable(path);
        }
        if self.no_sandbox {
            builder = builder.no_sandbox();
        }
        let config = builder.build().map_err(RenderError::Launch)?;

        let (browser, mut handler) = Browser::launch(config)
            .await
            .map_err(|e| RenderError::Launch(e.to_string()))?;

        // The CDP connection only makes progress while the handler is polled.
        let handler_task = tokio::spawn(async move {
            while let Some(event) = handler.next().await {
                if let Err(e) = event {
                    debug!("CDP handler error: {e}");
                }
            }
        });

        info!("Launched headless browser");
        Ok(Box::new(ChromiumSession {
            browser,
            page: None,
            handler_task,
            _profile: profile,
            closed: false,
        }))
    }
}

struct ChromiumSession {
    browser: Browser,
    page: Option<Page>,
    handler_task: JoinHandle<()>,
    // Deleted on drop, after the process is gone.
    _profile: TempDir,
    closed: bool,
}

#[async_trait]
impl BrowserSession for ChromiumSession {
    async fn load_html(&mut self, html: &str) -> Result<(), RenderError> {
        let page = self
            .browser
            .new_page("about:blank")
            .await
            .map_err(|e| RenderError::Navigation(e.to_string()))?;
        // Writes the document and waits for the resulting load to finish.
        page.set_content(html)
            .await
            .map_err(|e| RenderError::Navigation(e.to_string()))?;
        self.page = Some(page);
        Ok(())
    }

    async fn print_pdf(&mut self, options: &PdfOptions) -> Result<Vec<u8>, RenderError> {
        let page = self
            .page
            .as_ref()
            .ok_or_else(|| RenderError::Capture("no page loaded".to_string()))?;

        let params = PrintToPdfParams {
            print_background: Some(options.print_background),
            paper_width: Some(options.paper_width_in),
            paper_height: Some(options.paper_height_in),
            margin_top: Some(options.margin_in),
            margin_bottom: Some(options.margin_in),
            margin_left: Some(options.margin_in),
            margin_right: Some(options.margin_in),
            prefer_css_page_size: Some(options.prefer_css_page_size),
            ..Default::default()
        };

        page.pdf(params)
            .await
            .map_err(|e| RenderError::Capture(e.to_string()))
    }

    async fn close(&mut self) -> Result<(), RenderError> {
        if self.closed {
            return Ok(());
        }
        self.closed = true;
        self.page = None;

        let result = match self.browser.close().await {
            Ok(_) => self
                .browser
                .wait()
                .await
                .map(|_| ())
                .map_err(|e| RenderError::Teardown(e.to_string())),
            Err(e) => {
                warn!("Graceful browser close failed, killing process: {e}");
                match self.browser.kill().await {
                    Some(Err(kill_err)) => Err(RenderError::Teardown(kill_err.to_string())),
                    _ => Ok(()),
                }
            }
        };

        self.handler_task.abort();
        debug!("Browser session closed");
        result
    }
}

impl Drop for ChromiumSession {
    fn drop(&mut self) {
        // Reached without close() only when the render future was cancelled;
        // dropping `Browser` kills the child process.
        if !self.closed {
            warn!("Browser session dropped without close; killing process");
        }
        self.handler_task.abort();
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
    use std::sync::{Arc, Mutex};

    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub enum FailAt {
        Nothing,
        Launch,
        Load,
        Capture,
        Close,
    }

    /// Shared view into what a fake browser saw and whether it was released.
    #[derive(Debug, Default)]
    pub struct SessionLog {
        pub launched: AtomicUsize,
        pub closed: AtomicBool,
        pub viewport: Mutex<Option<Viewport>>,
        pub options: Mutex<Option<PdfOptions>>,
        pub html: Mutex<Option<String>>,
    }

    pub struct FakeEngine {
        pub fail_at: FailAt,
        pub seen: Arc<SessionLog>,
    }

    impl FakeEngine {
        pub fn new(fail_at: FailAt) -> Self {
            Self {
                fail_at,
                seen: Arc::new(SessionLog::default()),
            }
        }
    }

    struct FakeSession {
        fail_at: FailAt,
        seen: Arc<SessionLog>,
    }

    #[async_trait]
    impl BrowserEngine for FakeEngine {
        async fn launch(&self, viewport: Viewport) -> Result<Box<dyn BrowserSession>, RenderError> {
            if self.fail_at == FailAt::Launch {
                return Err(RenderError::Launch("no chromium binary".to_string()));
            }
            self.seen.launched.fetch_add(1, Ordering::SeqCst);
            *self.seen.viewport.lock().unwrap() = Some(viewport);
            Ok(Box::new(FakeSession {
                fail_at: self.fail_at,
                seen: Arc::clone(&self.seen),
            }))
        }
    }

    #[async_trait]
    impl BrowserSession for FakeSession {
        async fn load_html(&mut self, html: &str) -> Result<(), RenderError> {
            if self.fail_at == FailAt::Load {
                return Err(RenderError::Navigation("timeout".to_string()));
            }
            *self.seen.html.lock().unwrap() = Some(html.to_string());
            Ok(())
        }

        async fn print_pdf(&mut self, options: &PdfOptions) -> Result<Vec<u8>, RenderError> {
            if self.fail_at == FailAt::Capture {
                return Err(RenderError::Capture("target crashed".to_string()));
            }
            *self.seen.options.lock().unwrap() = Some(*options);
            Ok(b"%PDF-1.7 fake".to_vec())
        }

        async fn close(&mut self) -> Result<(), RenderError> {
            self.seen.closed.store(true, Ordering::SeqCst);
            if self.fail_at == FailAt::Close {
                return Err(RenderError::Teardown("zombie".to_string()));
            }
            Ok(())
        }
    }

    #[tokio::test]
    async fn test_render_pdf_returns_bytes_and_closes() {
        let engine = FakeEngine::new(FailAt::Nothing);
        let pdf = render_pdf(&engine, "<html></html>").await.unwrap();

        assert!(pdf.starts_with(b"%PDF"));
        assert!(engine.seen.closed.load(Ordering::SeqCst));
        assert_eq!(
            engine.seen.html.lock().unwrap().as_deref(),
            Some("<html></html>")
        );
    }

    #[tokio::test]
    async fn test_capture_failure_still_closes_browser() {
        let engine = FakeEngine::new(FailAt::Capture);
        let err = render_pdf(&engine, "<html></html>").await.unwrap_err();

        assert!(matches!(err, RenderError::Capture(_)));
        assert!(
            engine.seen.closed.load(Ordering::SeqCst),
            "browser must be released before the error propagates"
        );
    }

    #[tokio::test]
    async fn test_navigation_failure_still_closes_browser() {
        let engine = FakeEngine::new(FailAt::Load);
        let err = render_pdf(&engine, "<html></html>").await.unwrap_err();

        assert!(matches!(err, RenderError::Navigation(_)));
        assert!(engine.seen.closed.load(Ordering::SeqCst));
    }

    #[tokio::test]
    async fn test_launch_failure_is_reported() {
        let engine = FakeEngine::new(FailAt::Launch);
        let err = render_pdf(&engine, "<html></html>").await.unwrap_err();

        assert!(matches!(err, RenderError::Launch(_)));
        assert_eq!(engine.seen.launched.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_teardown_failure_after_capture_keeps_pdf() {
        let engine = FakeEngine::new(FailAt::Close);
        let pdf = render_pdf(&engine, "<html></html>").await.unwrap();
        assert!(!pdf.is_empty());
    }

    #[tokio::test]
    async fn test_uses_fixed_viewport_and_a4_geometry() {
        let engine = FakeEngine::new(FailAt::Nothing);
        render_pdf(&engine, "<html></html>").await.unwrap();

        assert_eq!(*engine.seen.viewport.lock().unwrap(), Some(VIEWPORT));
        let options = engine.seen.options.lock().unwrap().unwrap();
        assert!((options.paper_width_in - 8.2677).abs() < 1e-3);
        assert!((options.paper_height_in - 11.6929).abs() < 1e-3);
        assert_eq!(options.margin_in, 0.0);
        assert!(options.print_background);
        assert!(options.prefer_css_page_size);
    }
}

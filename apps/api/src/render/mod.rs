// Rendering: validated resume content → HTML document → A4 PDF.
// HTML rendering is pure; PDF rendering drives a headless browser.

pub mod html;
pub mod pdf;

pub use html::render_resume_html;
pub use pdf::{render_pdf, BrowserEngine, ChromiumEngine};

pub mod captcha_solver;
pub mod report_writer;
pub mod screenshot;
pub mod token_extractor;

pub use captcha_solver::{normalize_guess, CaptchaSolver, TesseractSolver};
pub use report_writer::ReportWriter;
pub use screenshot::{ChromiumRenderer, DocumentRenderer};
pub use token_extractor::{extract_record, extract_tokens};

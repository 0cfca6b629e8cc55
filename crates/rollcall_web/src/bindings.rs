//! `wasm-bindgen` exports consumed by the browser UI.
//!
//! Every mutating call returns a JSON `StudentActionResponse`; list and edit
//! state are pulled as JSON after each call and re-rendered by the page.

use crate::api::StudentSession;
use crate::local_storage::LocalStorageStore;
use rollcall_core::{default_log_level, logging::normalize_level};
use wasm_bindgen::prelude::*;

/// Installs the console logger and panic hook. Safe to call repeatedly.
#[wasm_bindgen(js_name = initLogging)]
pub fn init_logging(level: Option<String>) -> String {
    console_error_panic_hook::set_once();
    let level = match normalize_level(level.as_deref().unwrap_or(default_log_level())) {
        Ok(level) => level,
        Err(err) => return err,
    };
    let filter = level.parse::<log::Level>().unwrap_or(log::Level::Info);
    // Repeat calls fail harmlessly once a logger is installed.
    let _ = console_log::init_with_level(filter);
    log::info!(
        "event=app_start module=web status=ok version={}",
        rollcall_core::core_version()
    );
    String::new()
}

#[wasm_bindgen]
pub struct WebStudentApp {
    session: StudentSession<LocalStorageStore>,
}

#[wasm_bindgen]
impl WebStudentApp {
    /// Loads the collection from `localStorage` (`key` defaults to `students`).
    #[wasm_bindgen(constructor)]
    pub fn new(key: Option<String>) -> WebStudentApp {
        let session = match key.as_deref().map(str::trim).filter(|key| !key.is_empty()) {
            Some(key) => StudentSession::open_with_key(LocalStorageStore::new(), key),
            None => StudentSession::open(LocalStorageStore::new()),
        };
        WebStudentApp { session }
    }

    #[wasm_bindgen(js_name = studentsJson)]
    pub fn students_json(&self) -> String {
        self.session.students_json()
    }

    #[wasm_bindgen(js_name = editingJson)]
    pub fn editing_json(&self) -> String {
        self.session.editing_json()
    }

    pub fn add(&mut self, fields_json: &str) -> String {
        self.session.add(fields_json).to_json()
    }

    #[wasm_bindgen(js_name = beginEdit)]
    pub fn begin_edit(&mut self, id: &str) -> String {
        self.session.begin_edit(id).to_json()
    }

    pub fn submit(&mut self, fields_json: &str) -> String {
        self.session.submit(fields_json).to_json()
    }

    #[wasm_bindgen(js_name = cancelEdit)]
    pub fn cancel_edit(&mut self) -> String {
        self.session.cancel_edit().to_json()
    }

    pub fn delete(&mut self, id: &str) -> String {
        self.session.delete(id).to_json()
    }

    /// Re-reads `localStorage`, e.g. on the window `storage` event.
    pub fn refresh(&mut self) -> usize {
        self.session.refresh()
    }
}

use std::{
    fs::{self, File},
    io::Write,
    path::{Path, PathBuf},
};

use tracing::{debug, info};

use crate::{
    core::utils::{ensure_dir, PathResolver},
    errors::{LedgerError, Result},
    ledger::Transaction,
};

use super::StorageBackend;

const FILE_EXTENSION: &str = "json";
const TMP_SUFFIX: &str = "tmp";

/// Stores each transaction sequence as a pretty-printed JSON array under
/// `<root>/ledgers/<name>.json`.
#[derive(Debug, Clone)]
pub struct JsonStorage {
    ledgers_dir: PathBuf,
}

impl JsonStorage {
    pub fn new(root: Option<PathBuf>) -> Result<Self> {
        let app_root = PathResolver::resolve_base(root);
        ensure_dir(&app_root)?;
        let ledgers_dir = PathResolver::ledger_dir_in(&app_root);
        ensure_dir(&ledgers_dir)?;
        info!(path = %ledgers_dir.display(), "json storage ready");
        Ok(Self { ledgers_dir })
    }

    pub fn ledger_path(&self, name: &str) -> PathBuf {
        self.ledgers_dir
            .join(format!("{}.{}", canonical_name(name), FILE_EXTENSION))
    }
}

impl StorageBackend for JsonStorage {
    fn save(&self, transactions: &[Transaction], name: &str) -> Result<()> {
        let path = self.ledger_path(name);
        save_transactions_to_path(transactions, &path)?;
        debug!(path = %path.display(), count = transactions.len(), "transactions saved");
        Ok(())
    }

    fn load(&self, name: &str) -> Result<Vec<Transaction>> {
        let path = self.ledger_path(name);
        if !path.exists() {
            debug!(path = %path.display(), "no saved transactions, starting empty");
            return Ok(Vec::new());
        }
        load_transactions_from_path(&path)
    }
}

/// Writes to a temporary sibling first so a failed write never truncates the existing file.
pub fn save_transactions_to_path(transactions: &[Transaction], path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        ensure_dir(parent)?;
    }
    let json = serde_json::to_string_pretty(transactions)?;
    let tmp = tmp_path(path);
    write_atomic(&tmp, &json)?;
    fs::rename(&tmp, path)?;
    Ok(())
}

pub fn load_transactions_from_path(path: &Path) -> Result<Vec<Transaction>> {
    let data = fs::read_to_string(path)?;
    serde_json::from_str(&data).map_err(|err| {
        LedgerError::storage(format!("`{}` is not a valid ledger: {err}", path.display()))
    })
}

fn canonical_name(name: &str) -> String {
    let sanitized: String = name
        .trim()
        .to_lowercase()
        .chars()
        .map(|c| match c {
            'a'..='z' | '0'..='9' | '-' => c,
            _ => '_',
        })
        .collect();
    if sanitized.trim_matches('_').is_empty() {
        super::DEFAULT_STORAGE_KEY.into()
    } else {
        sanitized
    }
}

fn tmp_path(path: &Path) -> PathBuf {
    let mut tmp = path.to_path_buf();
    let ext = match path.extension().and_then(|ext| ext.to_str()) {
        Some(existing) => format!("{}.{}", existing, TMP_SUFFIX),
        None => TMP_SUFFIX.to_string(),
    };
    tmp.set_extension(ext);
    tmp
}

fn write_atomic(path: &Path, data: &str) -> Result<()> {
    let mut file = File::create(path)?;
    file.write_all(data.as_bytes())?;
    file.flush()?;
    Ok(())
}

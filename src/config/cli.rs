use crate::core::ist::{format_ist_iso, iso_to_ist_iso, try_iso_to_ist};
use crate::core::Storage;
use crate::utils::error::Result;
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

/// Filesystem storage rooted at `base_path`; absolute paths bypass the root.
#[derive(Debug, Clone)]
pub struct LocalStorage {
    base_path: PathBuf,
}

impl LocalStorage {
    pub fn new(base_path: impl Into<PathBuf>) -> Self {
        Self {
            base_path: base_path.into(),
        }
    }

    /// Storage for a TOML job: relative paths resolve against the config
    /// file's directory.
    pub fn for_config_file(config_path: impl AsRef<Path>) -> Self {
        Self::new(job_base_dir(config_path.as_ref()))
    }

    pub fn resolve(&self, path: &str) -> PathBuf {
        self.base_path.join(path)
    }
}

pub fn job_base_dir(config_path: &Path) -> PathBuf {
    config_path
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or_else(|| Path::new("."))
        .to_path_buf()
}

/// One `convert` output line. Blank input gives an empty line; in strict mode
/// an unparsable value is an error instead of being echoed.
pub fn convert_line(value: &str, strict: bool) -> Result<String> {
    if value.trim().is_empty() {
        return Ok(String::new());
    }

    if strict {
        return try_iso_to_ist(value).map(|dt| format_ist_iso(&dt));
    }

    Ok(iso_to_ist_iso(Some(value)).unwrap_or_default())
}

/// Convert every value and write one line each. Stops at the first error,
/// so lines already written stay written.
pub fn convert_each<I, S, W>(values: I, out: &mut W, strict: bool) -> Result<usize>
where
    I: IntoIterator<Item = io::Result<S>>,
    S: AsRef<str>,
    W: Write,
{
    let mut written = 0;
    for value in values {
        writeln!(out, "{}", convert_line(value?.as_ref(), strict)?)?;
        written += 1;
    }
    Ok(written)
}

impl Storage for LocalStorage {
    fn read_file(&self, path: &str) -> Result<Vec<u8>> {
        let data = fs::read(self.resolve(path))?;
        Ok(data)
    }

    fn write_file(&self, path: &str, data: &[u8]) -> Result<()> {
        let full_path = self.resolve(path);

        if let Some(parent) = full_path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }

        fs::write(&full_path, data)?;
        Ok(())
    }
}

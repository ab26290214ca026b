use std::collections::HashMap;
use std::fs;
use std::io::{self, ErrorKind};
use std::path::PathBuf;
use std::sync::Mutex;

/// Load/save of named, ordered record sets such as the watchlist.
pub trait RecordStore: Send + Sync {
    fn load(&self, name: &str) -> io::Result<Vec<String>>;
    fn save(&self, name: &str, records: &[String]) -> io::Result<()>;
}

/// One newline-delimited file per record set.
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    pub fn new<P: Into<PathBuf>>(dir: P) -> io::Result<Self> {
        let dir = dir.into();
        fs::create_dir_all(&dir)?;
        Ok(Self { dir })
    }

    fn path(&self, name: &str) -> io::Result<PathBuf> {
        let valid = !name.is_empty()
            && name
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_');

        if !valid {
            return Err(io::Error::new(
                ErrorKind::InvalidInput,
                format!("invalid record set name '{name}'"),
            ));
        }

        Ok(self.dir.join(format!("{name}.txt")))
    }
}

impl RecordStore for FileStore {
    fn load(&self, name: &str) -> io::Result<Vec<String>> {
        let contents = match fs::read_to_string(self.path(name)?) {
            Ok(contents) => contents,
            Err(err) if err.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
            Err(err) => return Err(err),
        };

        Ok(contents
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .map(str::to_owned)
            .collect())
    }

    fn save(&self, name: &str, records: &[String]) -> io::Result<()> {
        let mut contents = records.join("\n");
        if !contents.is_empty() {
            contents.push('\n');
        }

        fs::write(self.path(name)?, contents)
    }
}

#[derive(Default)]
pub struct MemoryStore {
    sets: Mutex<HashMap<String, Vec<String>>>,
}

impl RecordStore for MemoryStore {
    fn load(&self, name: &str) -> io::Result<Vec<String>> {
        let sets = self
            .sets
            .lock()
            .map_err(|_| io::Error::new(ErrorKind::Other, "record store lock poisoned"))?;

        Ok(sets.get(name).cloned().unwrap_or_default())
    }

    fn save(&self, name: &str, records: &[String]) -> io::Result<()> {
        self.sets
            .lock()
            .map_err(|_| io::Error::new(ErrorKind::Other, "record store lock poisoned"))?
            .insert(name.to_owned(), records.to_vec());

        Ok(())
    }
}

/// Trimmed, non-empty lines with duplicates removed, first occurrence kept.
pub fn parse_names(body: &str) -> Vec<String> {
    let mut names: Vec<String> = Vec::new();

    for name in body.lines().map(str::trim).filter(|line| !line.is_empty()) {
        if !names.iter().any(|existing| existing == name) {
            names.push(name.to_owned());
        }
    }

    names
}

//! Event Store implementations
//!
//! - `InMemoryEventStore` - a `Vec` behind a lock, for tests and the demo
//! - `JsonlEventStore` - one JSON record per line, appended and synced

use std::fs::{self, File, OpenOptions};
use std::io::{self, ErrorKind, Read, Seek, SeekFrom, Write};
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Mutex, RwLock};

use tracing::{debug, warn};

use taskflow_domain::{DomainEvent, EventQuery, EventStore, EventStoreError, StoredEvent};

/// In-memory append-only log
#[derive(Debug, Default)]
pub struct InMemoryEventStore {
    records: RwLock<Vec<StoredEvent>>,
    fail_appends: AtomicBool,
}

impl InMemoryEventStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every subsequent `append` fail with `Unavailable`
    pub fn fail_appends(&self, fail: bool) {
        self.fail_appends.store(fail, Ordering::SeqCst);
    }

    /// Everything appended so far, in append order
    pub fn records(&self) -> Vec<StoredEvent> {
        self.records
            .read()
            .map(|records| records.clone())
            .unwrap_or_default()
    }

    pub fn len(&self) -> usize {
        self.records.read().map(|r| r.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl EventStore for InMemoryEventStore {
    fn append(&self, event: &DomainEvent) -> Result<(), EventStoreError> {
        if self.fail_appends.load(Ordering::SeqCst) {
            return Err(EventStoreError::Unavailable(
                "appends disabled".to_string(),
            ));
        }

        let record = event.to_record()?;
        let mut records = self
            .records
            .write()
            .map_err(|_| EventStoreError::Unavailable("poisoned lock".to_string()))?;
        records.push(record);
        Ok(())
    }

    fn query(&self, query: &EventQuery) -> Result<Vec<StoredEvent>, EventStoreError> {
        let records = self
            .records
            .read()
            .map_err(|_| EventStoreError::Unavailable("poisoned lock".to_string()))?;
        Ok(query.select(records.iter()))
    }
}

/// File-backed log in JSON Lines format
///
/// ```text
/// {"event_name":"task.created","event_data":{...},"occurred_at":"2024-05-01T12:00:00Z"}
/// {"event_name":"task.completed","event_data":{...},"occurred_at":"2024-05-01T12:30:00Z"}
/// ```
///
/// `append` returns once the line is synced to disk. A record exists once its
/// terminating newline does: an unterminated tail left by an interrupted
/// append is ignored by `query` and cut off by the next `append`.
#[derive(Debug)]
pub struct JsonlEventStore {
    path: PathBuf,
    write_lock: Mutex<()>,
}

impl JsonlEventStore {
    /// Open (or lazily create) the log at `path`
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, EventStoreError> {
        let path = path.into();
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }
        Ok(Self {
            path,
            write_lock: Mutex::new(()),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_all(&self) -> Result<Vec<StoredEvent>, EventStoreError> {
        let mut content = String::new();
        match File::open(&self.path) {
            Ok(mut file) => file.read_to_string(&mut content)?,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(e.into()),
        };

        let mut records = Vec::new();
        for line in content.split_inclusive('\n') {
            let Some(line) = line.strip_suffix('\n') else {
                warn!(
                    path = %self.path.display(),
                    bytes = line.len(),
                    "Ignoring unterminated tail"
                );
                break;
            };
            if line.trim().is_empty() {
                continue;
            }
            records.push(serde_json::from_str(line)?);
        }
        Ok(records)
    }
}

/// Length of the log up to and including its last newline, if anything
/// follows it
fn torn_tail_start(file: &mut File) -> io::Result<Option<u64>> {
    let len = file.metadata()?.len();
    if len == 0 {
        return Ok(None);
    }

    let mut last = [0u8; 1];
    file.seek(SeekFrom::End(-1))?;
    file.read_exact(&mut last)?;
    if last[0] == b'\n' {
        return Ok(None);
    }

    let mut content = Vec::with_capacity(len as usize);
    file.seek(SeekFrom::Start(0))?;
    file.read_to_end(&mut content)?;
    let keep = content
        .iter()
        .rposition(|b| *b == b'\n')
        .map_or(0, |i| i + 1);
    Ok(Some(keep as u64))
}

fn write_line(file: &mut File, line: &[u8]) -> io::Result<()> {
    file.write_all(line)?;
    file.sync_data()
}

impl EventStore for JsonlEventStore {
    fn append(&self, event: &DomainEvent) -> Result<(), EventStoreError> {
        let mut line = serde_json::to_vec(&event.to_record()?)?;
        line.push(b'\n');

        let _guard = self
            .write_lock
            .lock()
            .map_err(|_| EventStoreError::Unavailable("poisoned lock".to_string()))?;

        let mut file = OpenOptions::new()
            .create(true)
            .read(true)
            .append(true)
            .open(&self.path)?;

        if let Some(keep) = torn_tail_start(&mut file)? {
            warn!(path = %self.path.display(), keep, "Truncating unterminated tail");
            file.set_len(keep)?;
        }

        let previous_len = file.metadata()?.len();
        if let Err(e) = write_line(&mut file, &line) {
            if let Err(rollback) = file.set_len(previous_len) {
                warn!(
                    error = %rollback,
                    path = %self.path.display(),
                    "Failed to roll back partial append"
                );
            }
            return Err(e.into());
        }

        debug!(event = event.name(), path = %self.path.display(), "Event appended");
        Ok(())
    }

    fn query(&self, query: &EventQuery) -> Result<Vec<StoredEvent>, EventStoreError> {
        let records = self.read_all()?;
        Ok(query.select(records.iter()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone, Utc};
    use taskflow_domain::{
        ClientCreated, ClientId, CommentAdded, CommentId, FixedClock, TaskId, UserId,
    };

    fn clock() -> FixedClock {
        FixedClock::new(Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap())
    }

    fn client_created(id: i64, clock: &FixedClock) -> DomainEvent {
        DomainEvent::from(ClientCreated::new(
            ClientId::from_int(id).unwrap(),
            format!("Client {}", id),
            UserId::from_int(1).unwrap(),
            clock,
        ))
    }

    fn comment_added(id: i64, clock: &FixedClock) -> DomainEvent {
        DomainEvent::from(CommentAdded::new(
            CommentId::from_int(id).unwrap(),
            TaskId::from_int(1).unwrap(),
            UserId::from_int(1).unwrap(),
            "ok",
            clock,
        ))
    }

    #[test]
    fn test_in_memory_query_newest_first() {
        let store = InMemoryEventStore::new();
        let clock = clock();

        store.append(&client_created(1, &clock)).unwrap();
        clock.advance(Duration::minutes(1));
        store.append(&comment_added(1, &clock)).unwrap();
        clock.advance(Duration::minutes(1));
        store.append(&client_created(2, &clock)).unwrap();

        let all = store.query(&EventQuery::all()).unwrap();
        let names: Vec<_> = all.iter().map(|r| r.event_name.as_str()).collect();
        assert_eq!(names, ["client.created", "comment.added", "client.created"]);
        assert_eq!(all[0].event_data["client_id"], 2);

        let clients = store
            .query(&EventQuery::all().named("client.created").limit(1))
            .unwrap();
        assert_eq!(clients.len(), 1);
        assert_eq!(clients[0].event_data["client_id"], 2);
    }

    #[test]
    fn test_in_memory_failing_append() {
        let store = InMemoryEventStore::new();
        store.fail_appends(true);

        let err = store.append(&client_created(1, &clock())).unwrap_err();
        assert!(matches!(err, EventStoreError::Unavailable(_)));
        assert!(store.is_empty());

        store.fail_appends(false);
        store.append(&client_created(1, &clock())).unwrap();
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_jsonl_appends_one_line_per_event() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("events.jsonl");
        let store = JsonlEventStore::open(&path).unwrap();
        let clock = clock();

        store.append(&client_created(1, &clock)).unwrap();
        store.append(&comment_added(7, &clock)).unwrap();

        let content = fs::read_to_string(&path).unwrap();
        let lines: Vec<_> = content.lines().collect();
        assert_eq!(lines.len(), 2);
        assert!(lines[0].starts_with("{\"event_name\":\"client.created\""));

        let parsed: StoredEvent = serde_json::from_str(lines[1]).unwrap();
        assert_eq!(parsed.event_name, "comment.added");
        assert_eq!(parsed.event_data["comment_id"], 7);
    }

    #[test]
    fn test_jsonl_survives_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("events.jsonl");
        let clock = clock();

        {
            let store = JsonlEventStore::open(&path).unwrap();
            store.append(&client_created(1, &clock)).unwrap();
        }

        clock.advance(Duration::hours(1));
        let store = JsonlEventStore::open(&path).unwrap();
        store.append(&client_created(2, &clock)).unwrap();

        let since = Utc.with_ymd_and_hms(2024, 5, 1, 12, 30, 0).unwrap();
        let recent = store.query(&EventQuery::all().since(since)).unwrap();
        assert_eq!(recent.len(), 1);
        assert_eq!(recent[0].event_data["client_id"], 2);
        assert_eq!(store.query(&EventQuery::all()).unwrap().len(), 2);
    }

    #[test]
    fn test_jsonl_missing_file_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonlEventStore::open(dir.path().join("none.jsonl")).unwrap();
        assert!(store.query(&EventQuery::all()).unwrap().is_empty());
    }

    #[test]
    fn test_jsonl_recovers_from_unterminated_tail() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("events.jsonl");
        let store = JsonlEventStore::open(&path).unwrap();
        let clock = clock();

        store.append(&client_created(1, &clock)).unwrap();

        // An append that died before its newline reached the disk
        let record = client_created(2, &clock).to_record().unwrap();
        let torn = serde_json::to_string(&record).unwrap();
        OpenOptions::new()
            .append(true)
            .open(&path)
            .unwrap()
            .write_all(torn.as_bytes())
            .unwrap();

        let before = store.query(&EventQuery::all()).unwrap();
        assert_eq!(before.len(), 1);
        assert_eq!(before[0].event_data["client_id"], 1);

        store.append(&client_created(3, &clock)).unwrap();

        let ids: Vec<_> = store
            .query(&EventQuery::all())
            .unwrap()
            .iter()
            .map(|r| r.event_data["client_id"].as_i64().unwrap())
            .collect();
        assert_eq!(ids, [3, 1]);

        let content = fs::read_to_string(&path).unwrap();
        assert_eq!(content.lines().count(), 2);
        assert!(content.ends_with('\n'));
    }

    #[test]
    fn test_jsonl_corrupt_line_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("events.jsonl");
        fs::write(&path, "not json\n").unwrap();

        let store = JsonlEventStore::open(&path).unwrap();
        assert!(matches!(
            store.query(&EventQuery::all()),
            Err(EventStoreError::Serialization(_))
        ));
    }
}

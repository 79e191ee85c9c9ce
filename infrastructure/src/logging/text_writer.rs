//! Formatted text file writer for log entries.
//!
//! Each [`LogEntry`] is rendered through the configured template and appended
//! to the log file as one line. The file is opened lazily on the first entry;
//! when that first open creates the file, a header describing the layout is
//! written before any entry.
//!
//! Writes go straight to the file without buffering. Nothing is synced to
//! disk unless `durable_writes` is set.

use chrono::Utc;
use std::fs::{File, OpenOptions};
use std::io::Write;
use std::path::Path;
use std::sync::Arc;
use textlog_application::{
    DirectoryCreator, EntryRenderer, LogDirectoryProvider, LogWriter, LogWriterError,
    PriorityLabelResolver, RequestContext, StandardPriorityLabels, WriterConfig, WriterOptions,
};
use textlog_domain::{FileHeader, LogEntry};
use tracing::{debug, info, warn};

use crate::fs::{FsDirectoryCreator, PlatformLogDirectory};

/// Text log writer that appends one rendered line per entry.
///
/// Owns at most one open file handle. The handle is released by
/// [`LogWriter::dispose`] or when the writer is dropped.
pub struct TextLogWriter {
    config: WriterConfig,
    renderer: EntryRenderer,
    directories: Arc<dyn DirectoryCreator>,
    file: Option<File>,
}

impl TextLogWriter {
    /// Create a writer, resolving the default directory from the platform.
    ///
    /// The log file is not touched until the first entry is added.
    pub fn new(options: &WriterOptions) -> Result<Self, LogWriterError> {
        Self::with_directory_provider(options, &PlatformLogDirectory)
    }

    /// Create a writer, resolving the default directory from `provider`.
    pub fn with_directory_provider(
        options: &WriterOptions,
        provider: &dyn LogDirectoryProvider,
    ) -> Result<Self, LogWriterError> {
        let config = WriterConfig::resolve(options, provider)?;
        Ok(Self::from_config(config))
    }

    /// Create a writer from an already resolved configuration.
    pub fn from_config(config: WriterConfig) -> Self {
        debug!(
            "Text log writer for {} with fields {:?}",
            config.path().display(),
            config.format().fields()
        );

        let renderer =
            EntryRenderer::new(config.format().clone(), Arc::new(StandardPriorityLabels));
        Self {
            config,
            renderer,
            directories: Arc::new(FsDirectoryCreator),
            file: None,
        }
    }

    /// Replace the priority label table.
    pub fn with_priority_labels(mut self, labels: Arc<dyn PriorityLabelResolver>) -> Self {
        self.renderer = EntryRenderer::new(self.config.format().clone(), labels);
        self
    }

    /// Replace the directory creator used when the log file is new.
    pub fn with_directory_creator(mut self, directories: Arc<dyn DirectoryCreator>) -> Self {
        self.directories = directories;
        self
    }

    /// Get the path to the log file.
    pub fn path(&self) -> &Path {
        self.config.path()
    }

    /// Get the resolved configuration.
    pub fn config(&self) -> &WriterConfig {
        &self.config
    }

    /// Whether the log file handle is currently open.
    pub fn is_open(&self) -> bool {
        self.file.is_some()
    }

    /// Open the log file if it is not open yet.
    fn open(&mut self) -> Result<&mut File, LogWriterError> {
        let file = match self.file.take() {
            Some(file) => file,
            None => self.initialize()?,
        };
        Ok(self.file.insert(file))
    }

    /// Create the directory tree and the file with its header if needed,
    /// then open the file for appending.
    fn initialize(&self) -> Result<File, LogWriterError> {
        let path = self.config.path();
        let is_new = !path.exists();

        if is_new && let Some(directory) = self.config.directory() {
            self.directories
                .create_directory_tree(directory)
                .map_err(|source| {
                    warn!(
                        "Could not create log directory {}: {}",
                        directory.display(),
                        source
                    );
                    LogWriterError::DirectoryCreation {
                        path: directory.to_path_buf(),
                        source,
                    }
                })?;
        }

        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)
            .map_err(|source| {
                warn!("Could not open log file {}: {}", path.display(), source);
                LogWriterError::FileOpen {
                    path: path.to_path_buf(),
                    source,
                }
            })?;

        if !is_new {
            debug!("Opened existing log file {}", path.display());
            return Ok(file);
        }

        let header = FileHeader::new(self.config.format(), Utc::now())
            .with_guard(!self.config.suppress_guard_header());
        let file = start_new_file(file, &header, path)?;
        info!("Created log file {}", path.display());
        Ok(file)
    }

    fn append(&mut self, line: &str) -> Result<(), LogWriterError> {
        let durable = self.config.durable_writes();
        let file = self.open()?;

        let result = file.write_all(line.as_bytes()).and_then(|()| {
            if durable {
                file.sync_data()
            } else {
                Ok(())
            }
        });

        result.map_err(|source| {
            warn!(
                "Could not write log entry to {}: {}",
                self.config.path().display(),
                source
            );
            LogWriterError::EntryWrite {
                path: self.config.path().to_path_buf(),
                source,
            }
        })
    }
}

/// Write the header of a file this writer just created.
///
/// On failure the sink is closed and the file at `path` removed, so the next
/// attempt sees a missing file and writes the header again.
fn start_new_file<W: Write>(
    mut sink: W,
    header: &FileHeader,
    path: &Path,
) -> Result<W, LogWriterError> {
    match sink.write_all(header.to_string().as_bytes()) {
        Ok(()) => Ok(sink),
        Err(source) => {
            warn!("Could not write log header to {}: {}", path.display(), source);
            drop(sink);
            if let Err(e) = std::fs::remove_file(path) {
                warn!("Could not remove headerless log file {}: {}", path.display(), e);
            }
            Err(LogWriterError::HeaderWrite {
                path: path.to_path_buf(),
                source,
            })
        }
    }
}

impl LogWriter for TextLogWriter {
    fn add_entry(
        &mut self,
        entry: &mut LogEntry,
        context: Option<&dyn RequestContext>,
    ) -> Result<(), LogWriterError> {
        self.open()?;
        let line = self.renderer.render_line(entry, context);
        self.append(&line)
    }

    fn dispose(&mut self) {
        if self.file.take().is_some() {
            debug!("Closed log file {}", self.config.path().display());
        }
    }
}

impl Drop for TextLogWriter {
    fn drop(&mut self) {
        self.dispose();
    }
}

impl std::fmt::Debug for TextLogWriter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TextLogWriter")
            .field("path", &self.config.path())
            .field("open", &self.file.is_some())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use std::borrow::Cow;
    use std::io;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use textlog_application::RequestSignals;
    use textlog_domain::{GUARD_LINE, Priority};

    use crate::fs::FixedLogDirectory;

    fn boom() -> LogEntry {
        LogEntry::new("boom", Priority::Error, "app")
            .with_timestamp(Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap())
    }

    fn read(path: &Path) -> String {
        std::fs::read_to_string(path).unwrap()
    }

    /// Directory creator that counts calls and delegates to the file system.
    #[derive(Default)]
    struct CountingCreator(AtomicUsize);

    impl DirectoryCreator for CountingCreator {
        fn create_directory_tree(&self, path: &Path) -> io::Result<()> {
            self.0.fetch_add(1, Ordering::SeqCst);
            std::fs::create_dir_all(path)
        }
    }

    #[test]
    fn test_construction_does_not_touch_filesystem() {
        let dir = tempfile::tempdir().unwrap();
        let logs = dir.path().join("logs");
        let writer = TextLogWriter::new(&WriterOptions::new(&logs, "error.php")).unwrap();

        assert!(!writer.is_open());
        assert!(!logs.exists());
        assert_eq!(writer.path(), logs.join("error.php"));
    }

    #[test]
    fn test_default_directory_from_provider() {
        let dir = tempfile::tempdir().unwrap();
        let provider = FixedLogDirectory::new(dir.path());
        let writer =
            TextLogWriter::with_directory_provider(&WriterOptions::default(), &provider).unwrap();
        assert_eq!(writer.path(), dir.path().join("error.php"));
    }

    #[test]
    fn test_empty_file_name_is_a_configuration_error() {
        let result = TextLogWriter::new(&WriterOptions::new("/tmp", ""));
        assert!(matches!(result, Err(LogWriterError::Configuration(_))));
    }

    #[test]
    fn test_first_entry_creates_directories_header_and_line() {
        let dir = tempfile::tempdir().unwrap();
        let logs = dir.path().join("nested").join("logs");
        let mut writer = TextLogWriter::new(&WriterOptions::new(&logs, "error.php")).unwrap();

        let mut entry = boom();
        writer.add_entry(&mut entry, None).unwrap();
        assert!(writer.is_open());

        let content = read(&logs.join("error.php"));
        let lines: Vec<&str> = content.split('\n').collect();
        assert_eq!(lines[0], "");
        assert_eq!(lines[1], GUARD_LINE);
        assert!(lines[2].starts_with("Date: "));
        assert!(lines[2].ends_with(" UTC"));
        assert_eq!(lines[2].len(), "Date: 2024-01-01 00:00:00 UTC".len());
        assert_eq!(lines[3], "");
        assert_eq!(lines[4], "Fields: datetime\tpriority\tcategory\tmessage");
        assert_eq!(lines[5], "2024-01-01T00:00:00Z\tERROR\tapp\tboom");
        assert_eq!(lines[6], "");
        assert_eq!(lines.len(), 7);
    }

    #[test]
    fn test_suppressed_guard_header() {
        let dir = tempfile::tempdir().unwrap();
        let options = WriterOptions::new(dir.path(), "plain.log")
            .with_entry_format("{PRIORITY} {MESSAGE}")
            .with_suppressed_guard_header(true);
        let mut writer = TextLogWriter::new(&options).unwrap();

        writer.add_entry(&mut boom(), None).unwrap();

        let content = read(writer.path());
        assert!(!content.contains(GUARD_LINE));
        assert!(content.starts_with("Date: "));
        assert!(content.ends_with("\n\nFields: priority message\nERROR boom\n"));
    }

    #[test]
    fn test_existing_file_is_appended_without_header() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("error.php");
        std::fs::write(&path, "existing content\n").unwrap();

        let creator = Arc::new(CountingCreator::default());
        let mut writer = TextLogWriter::new(&WriterOptions::new(dir.path(), "error.php"))
            .unwrap()
            .with_directory_creator(creator.clone());

        writer.add_entry(&mut boom(), None).unwrap();

        assert_eq!(
            read(&path),
            "existing content\n2024-01-01T00:00:00Z\tERROR\tapp\tboom\n"
        );
        assert_eq!(creator.0.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn test_second_writer_does_not_rewrite_header() {
        let dir = tempfile::tempdir().unwrap();
        let options = WriterOptions::new(dir.path(), "error.php");

        let mut first = TextLogWriter::new(&options).unwrap();
        first.add_entry(&mut boom(), None).unwrap();
        first.dispose();

        let mut second = TextLogWriter::new(&options).unwrap();
        let mut entry = LogEntry::new("again", Priority::Warning, "app")
            .with_timestamp(Utc.with_ymd_and_hms(2024, 1, 2, 0, 0, 0).unwrap());
        second.add_entry(&mut entry, None).unwrap();
        drop(second);

        let content = read(&dir.path().join("error.php"));
        assert_eq!(content.matches("Fields: ").count(), 1);
        assert!(content.ends_with(
            "2024-01-01T00:00:00Z\tERROR\tapp\tboom\n2024-01-02T00:00:00Z\tWARNING\tapp\tagain\n"
        ));
    }

    #[test]
    fn test_initialization_happens_once() {
        let dir = tempfile::tempdir().unwrap();
        let creator = Arc::new(CountingCreator::default());
        let mut writer = TextLogWriter::new(&WriterOptions::new(dir.path().join("logs"), "a.log"))
            .unwrap()
            .with_directory_creator(creator.clone());

        for _ in 0..3 {
            writer.add_entry(&mut boom(), None).unwrap();
        }

        assert_eq!(creator.0.load(Ordering::SeqCst), 1);
        let content = read(writer.path());
        assert_eq!(content.matches("Fields: ").count(), 1);
        assert_eq!(content.matches("\tboom\n").count(), 3);
    }

    #[test]
    fn test_entry_is_mutated_in_place() {
        let dir = tempfile::tempdir().unwrap();
        let options =
            WriterOptions::new(dir.path(), "ip.log").with_entry_format("{CLIENTIP} {DATE}");
        let mut writer = TextLogWriter::new(&options).unwrap();

        let mut entry = boom();
        let signals = RequestSignals::from_remote_addr("10.1.2.3");
        writer.add_entry(&mut entry, Some(&signals)).unwrap();

        assert_eq!(entry.client_ip.as_deref(), Some("10.1.2.3"));
        assert_eq!(entry.date.as_deref(), Some("2024-01-01"));
        assert!(read(writer.path()).ends_with("10.1.2.3 2024-01-01\n"));
    }

    #[test]
    fn test_custom_priority_labels() {
        struct Lowercase;

        impl PriorityLabelResolver for Lowercase {
            fn label(&self, priority: Priority) -> Cow<'_, str> {
                Cow::Owned(priority.to_string())
            }
        }

        let dir = tempfile::tempdir().unwrap();
        let options = WriterOptions::new(dir.path(), "labels.log").with_entry_format("{PRIORITY}");
        let mut writer = TextLogWriter::new(&options)
            .unwrap()
            .with_priority_labels(Arc::new(Lowercase));

        writer.add_entry(&mut boom(), None).unwrap();
        assert!(read(writer.path()).ends_with("\nerror\n"));
    }

    #[test]
    fn test_directory_creation_failure() {
        let dir = tempfile::tempdir().unwrap();
        let blocker = dir.path().join("blocker");
        std::fs::write(&blocker, b"file").unwrap();

        let mut writer =
            TextLogWriter::new(&WriterOptions::new(blocker.join("logs"), "error.php")).unwrap();
        let mut entry = boom();
        let err = writer.add_entry(&mut entry, None).unwrap_err();

        assert!(matches!(err, LogWriterError::DirectoryCreation { .. }));
        assert_eq!(err.path(), Some(blocker.join("logs").as_path()));
        assert!(!writer.is_open());
        // Initialization failed before rendering: entry untouched
        assert!(entry.date.is_none());
    }

    #[test]
    fn test_file_open_failure() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::create_dir(dir.path().join("taken")).unwrap();

        let mut writer = TextLogWriter::new(&WriterOptions::new(dir.path(), "taken")).unwrap();
        let err = writer.add_entry(&mut boom(), None).unwrap_err();

        assert!(matches!(err, LogWriterError::FileOpen { .. }));
        assert!(err.is_initialization_error());
        assert!(!writer.is_open());
    }

    #[cfg(target_os = "linux")]
    #[test]
    fn test_write_failure_is_surfaced() {
        // Every write to /dev/full fails with ENOSPC
        let mut writer = TextLogWriter::new(&WriterOptions::new("/dev", "full")).unwrap();

        let err = writer.add_entry(&mut boom(), None).unwrap_err();
        assert!(matches!(err, LogWriterError::EntryWrite { .. }));
        assert_eq!(err.path(), Some(Path::new("/dev/full")));

        // Still usable: the next call fails the same way instead of panicking
        let err = writer.add_entry(&mut boom(), None).unwrap_err();
        assert!(matches!(err, LogWriterError::EntryWrite { .. }));
    }

    /// Sink that accepts nothing, like a full disk.
    #[derive(Debug)]
    struct FullSink;

    impl Write for FullSink {
        fn write(&mut self, _buf: &[u8]) -> io::Result<usize> {
            Err(io::Error::other("no space left on device"))
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn test_header_write_failure_removes_new_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("error.php");
        std::fs::File::create(&path).unwrap();
        let header = FileHeader::new(&Default::default(), Utc::now());

        let err = start_new_file(FullSink, &header, &path).unwrap_err();
        assert!(matches!(err, LogWriterError::HeaderWrite { .. }));
        assert!(err.is_initialization_error());
        assert_eq!(err.path(), Some(path.as_path()));
        assert!(!path.exists());

        // The retry treats the file as new and writes the header exactly once
        let mut writer = TextLogWriter::new(&WriterOptions::new(dir.path(), "error.php")).unwrap();
        writer.add_entry(&mut boom(), None).unwrap();
        let content = read(&path);
        assert_eq!(content.matches("Fields: ").count(), 1);
        assert!(content.find("Date: ").unwrap() < content.find("boom").unwrap());
    }

    #[test]
    fn test_header_write_failure_tolerates_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("never-created.php");
        let header = FileHeader::new(&Default::default(), Utc::now());

        let err = start_new_file(FullSink, &header, &path).unwrap_err();
        assert!(matches!(err, LogWriterError::HeaderWrite { .. }));
        assert!(!path.exists());
    }

    #[test]
    fn test_header_written_to_working_sink() {
        let header = FileHeader::new(&Default::default(), Utc::now()).with_guard(false);
        let sink = start_new_file(Vec::new(), &header, Path::new("unused")).unwrap();
        assert_eq!(String::from_utf8(sink).unwrap(), header.to_string());
    }

    #[test]
    fn test_dispose_twice_and_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let mut writer = TextLogWriter::new(&WriterOptions::new(dir.path(), "error.php")).unwrap();

        writer.dispose();
        writer.add_entry(&mut boom(), None).unwrap();
        writer.dispose();
        writer.dispose();
        assert!(!writer.is_open());

        // Reopens the existing file without a second header
        writer.add_entry(&mut boom(), None).unwrap();
        let content = read(writer.path());
        assert_eq!(content.matches("Fields: ").count(), 1);
        assert_eq!(content.matches("\tboom\n").count(), 2);
    }

    #[test]
    fn test_durable_writes() {
        let dir = tempfile::tempdir().unwrap();
        let options = WriterOptions::new(dir.path(), "durable.log").with_durable_writes(true);
        let mut writer = TextLogWriter::new(&options).unwrap();

        writer.add_entry(&mut boom(), None).unwrap();
        assert!(read(writer.path()).ends_with("\tboom\n"));
    }

    #[test]
    fn test_writer_from_loaded_config() {
        figment::Jail::expect_with(|jail| {
            let logs = jail.directory().join("var").join("log");
            jail.create_file(
                "textlog.toml",
                &format!(
                    concat!(
                        "[writer]\n",
                        "file_path = {:?}\n",
                        "file_name = \"site.log\"\n",
                        "entry_format = \"{{CATEGORY}}: {{MESSAGE}}\"\n",
                    ),
                    logs.display().to_string()
                ),
            )?;

            let options = crate::ConfigLoader::load_writer_options(None).map_err(|e| *e)?;
            let mut writer = TextLogWriter::new(&options).unwrap();
            writer.add_entry(&mut boom(), None).unwrap();

            let content = read(&logs.join("site.log"));
            assert!(content.contains("Fields: category: message\n"));
            assert!(content.ends_with("app: boom\n"));
            Ok(())
        });
    }
}
